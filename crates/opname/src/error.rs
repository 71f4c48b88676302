use gudang_client::ClientError;
use gudang_core::{DomainError, OpnameId};

use crate::export::ExportError;

#[derive(Debug, thiserror::Error)]
pub enum OpnameError {
    #[error("stock opname record {0} not found")]
    UnknownRecord(OpnameId),

    #[error("stock opname record {0} is not being edited")]
    NotEditing(OpnameId),

    #[error("no stock opname record is being edited")]
    NoActiveEdit,

    #[error("no counted quantity entered")]
    NoPendingValue,

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("failed to save stock opname {id}: {source}")]
    Save {
        id: OpnameId,
        #[source]
        source: ClientError,
    },

    #[error("no items selected for export")]
    EmptySelection,

    #[error(transparent)]
    Export(#[from] ExportError),
}
