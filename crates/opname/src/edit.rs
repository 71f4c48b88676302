use gudang_core::OpnameId;

/// The one record currently being counted, with its uncommitted value.
///
/// `pending` shadows the record's committed real stock until the edit is
/// saved or abandoned. `None` is a legal transient state (cleared input) but
/// cannot be saved.
///
/// `generation` tells apart two edits of the same record, so the answer to
/// an earlier save never closes a later edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    id: OpnameId,
    pending: Option<i64>,
    generation: u64,
}

impl EditSession {
    pub fn new(id: OpnameId, pending: Option<i64>, generation: u64) -> Self {
        Self {
            id,
            pending,
            generation,
        }
    }

    pub fn id(&self) -> &OpnameId {
        &self.id
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn pending(&self) -> Option<i64> {
        self.pending
    }

    pub fn set_pending(&mut self, value: Option<i64>) {
        self.pending = value;
    }

    pub fn is_for(&self, id: &OpnameId) -> bool {
        &self.id == id
    }
}
