//! `gudang-opname`: stock-opname (physical count) reconciliation.
//!
//! [`OpnameSession`] is the whole screen state as a plain struct: the listed
//! records, the single in-place edit, the export selection, search and page.
//! It talks to the ledger only through [`gudang_client::OpnameLedger`] and to
//! the user only through [`Notifier`] and [`ReportSink`], so it runs the same
//! under a renderer or in a unit test.

pub mod edit;
pub mod error;
pub mod export;
pub mod notice;
pub mod selection;
pub mod session;

pub use edit::EditSession;
pub use error::OpnameError;
pub use export::{ExportError, FileSink, REPORT_FILE_NAME, ReportSink, build_report};
pub use notice::{Notice, NoticeLevel, Notifier, TracingNotifier};
pub use selection::Selection;
pub use session::{OpnameSession, SaveOutcome, SaveRequest, save};
