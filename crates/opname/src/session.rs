//! Stock-opname screen state.

use chrono::{DateTime, Utc};

use gudang_client::{ClientError, OpnameLedger};
use gudang_core::{Entity, OpnameId};
use gudang_inventory::listing::{self, MAX_VISIBLE_PAGES, PAGE_SIZE, Page};
use gudang_inventory::{OpnameUpdate, StockOpnameRecord};

use crate::edit::EditSession;
use crate::error::OpnameError;
use crate::export::{REPORT_FILE_NAME, ReportSink, build_report};
use crate::notice::{Notice, Notifier};
use crate::selection::Selection;

const SAVED_TEXT: &str = "Stock opname was saved successfully.";
const SAVE_FAILED_TEXT: &str = "An error occurred while saving the stock opname.";
const NOTHING_SELECTED_TEXT: &str = "No items selected. Please select at least one item to export.";
const EXPORT_FAILED_TEXT: &str = "An error occurred while exporting the stock opname report.";

/// A count ready to be sent to the ledger.
///
/// Carries its own record id so the result can be applied to the right row
/// even after the user has moved on to edit another one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveRequest {
    pub id: OpnameId,
    pub update: OpnameUpdate,
    /// Generation of the edit this count came from.
    pub generation: u64,
}

/// The ledger's answer to a [`SaveRequest`].
#[derive(Debug)]
pub struct SaveOutcome {
    pub id: OpnameId,
    pub update: OpnameUpdate,
    pub generation: u64,
    pub result: Result<(), ClientError>,
}

/// Send one count to the ledger.
///
/// Does not touch any session, so a save can be in flight while the session
/// keeps accepting edits.
pub async fn save(ledger: &dyn OpnameLedger, request: SaveRequest) -> SaveOutcome {
    let result = ledger.update_opname(&request.id, &request.update).await;
    SaveOutcome {
        id: request.id,
        update: request.update,
        generation: request.generation,
        result,
    }
}

/// Everything the stock-opname screen knows.
///
/// Records are owned by the ledger: the session replaces them wholesale on
/// [`refresh`](Self::refresh) and mutates one in place only after the ledger
/// accepted its new count.
#[derive(Debug, Clone)]
pub struct OpnameSession {
    records: Vec<StockOpnameRecord>,
    editing: Option<EditSession>,
    edits_started: u64,
    selection: Selection,
    search: String,
    page: usize,
    per_page: usize,
}

impl OpnameSession {
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    /// Session over an already-loaded listing.
    pub fn with_records(records: Vec<StockOpnameRecord>) -> Self {
        Self {
            records,
            editing: None,
            edits_started: 0,
            selection: Selection::default(),
            search: String::new(),
            page: 1,
            per_page: PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, per_page: usize) -> Self {
        self.per_page = per_page.max(1);
        self
    }

    // --- listing -----------------------------------------------------------

    /// Reload every record from the ledger.
    ///
    /// On failure the previous listing stays as it was and the error is
    /// returned; fetch failures are logged, not shown to the user.
    pub async fn refresh(&mut self, ledger: &dyn OpnameLedger) -> Result<usize, ClientError> {
        let records = match ledger.list_opname().await {
            Ok(records) => records,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    kept = self.records.len(),
                    "failed to fetch stock opname"
                );
                return Err(e);
            }
        };

        self.records = records;
        self.drop_stale_state();
        tracing::info!(records = self.records.len(), "stock opname loaded");
        Ok(self.records.len())
    }

    fn drop_stale_state(&mut self) {
        let records = &self.records;
        let present = |id: &OpnameId| records.iter().any(|r| r.id() == id);

        self.selection.retain(|id| present(id));
        if let Some(edit) = &self.editing {
            if !present(edit.id()) {
                tracing::debug!(record = %edit.id(), "record gone after refresh; edit dropped");
                self.editing = None;
            }
        }
        self.page = self.page.clamp(1, self.total_pages().max(1));
    }

    pub fn records(&self) -> &[StockOpnameRecord] {
        &self.records
    }

    pub fn record(&self, id: &OpnameId) -> Option<&StockOpnameRecord> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Change the search term; the listing goes back to its first page.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
        self.page = 1;
    }

    /// Records matching the search term, in ledger order.
    pub fn filtered(&self) -> Vec<&StockOpnameRecord> {
        listing::filter(&self.records, &self.search)
    }

    pub fn total_pages(&self) -> usize {
        listing::total_pages(self.filtered().len(), self.per_page)
    }

    pub fn page(&self) -> usize {
        self.page
    }

    /// Jump to page `page`, clamped to the pages that exist.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.clamp(1, self.total_pages().max(1));
    }

    /// The current page of filtered records.
    pub fn visible(&self) -> Page<&StockOpnameRecord> {
        listing::paginate(self.filtered(), self.page, self.per_page)
    }

    /// Page numbers for the pagination control.
    pub fn page_window(&self) -> Vec<usize> {
        listing::page_window(self.page, self.total_pages(), MAX_VISIBLE_PAGES)
    }

    // --- editing -----------------------------------------------------------

    /// Start counting `id`, seeding the input with its current real stock.
    ///
    /// Any other uncommitted edit is discarded without saving.
    pub fn begin_edit(&mut self, id: &OpnameId, current: Option<i64>) -> Result<(), OpnameError> {
        if self.record(id).is_none() {
            return Err(OpnameError::UnknownRecord(id.clone()));
        }
        if let Some(previous) = &self.editing {
            if !previous.is_for(id) {
                tracing::debug!(
                    discarded = %previous.id(),
                    pending = ?previous.pending(),
                    record = %id,
                    "uncommitted edit abandoned"
                );
            }
        }
        self.edits_started += 1;
        self.editing = Some(EditSession::new(id.clone(), current, self.edits_started));
        Ok(())
    }

    /// Update the value typed for the record under edit (`None` = cleared input).
    pub fn set_pending_value(&mut self, value: Option<i64>) -> Result<(), OpnameError> {
        match &mut self.editing {
            Some(edit) => {
                edit.set_pending(value);
                Ok(())
            }
            None => Err(OpnameError::NoActiveEdit),
        }
    }

    pub fn editing(&self) -> Option<&OpnameId> {
        self.editing.as_ref().map(EditSession::id)
    }

    pub fn is_editing(&self, id: &OpnameId) -> bool {
        self.editing.as_ref().is_some_and(|e| e.is_for(id))
    }

    pub fn pending_value(&self) -> Option<i64> {
        self.editing.as_ref().and_then(EditSession::pending)
    }

    /// Prepare the save of the edit on `id`, stamped now.
    pub fn commit_edit(&self, id: &OpnameId) -> Result<SaveRequest, OpnameError> {
        self.commit_edit_at(id, Utc::now())
    }

    /// Prepare the save of the edit on `id`, stamped `at`.
    ///
    /// Nothing changes until [`apply_save`](Self::apply_save) sees the
    /// ledger's answer. A missing or negative value keeps the edit open.
    pub fn commit_edit_at(
        &self,
        id: &OpnameId,
        at: DateTime<Utc>,
    ) -> Result<SaveRequest, OpnameError> {
        let edit = self
            .editing
            .as_ref()
            .filter(|e| e.is_for(id))
            .ok_or_else(|| OpnameError::NotEditing(id.clone()))?;
        let pending = edit.pending().ok_or(OpnameError::NoPendingValue)?;
        let record = self
            .record(id)
            .ok_or_else(|| OpnameError::UnknownRecord(id.clone()))?;

        let update = record.count(pending, at)?;
        Ok(SaveRequest {
            id: id.clone(),
            update,
            generation: edit.generation(),
        })
    }

    /// Apply the ledger's answer to the record it was for.
    ///
    /// Either way, the edit the count came from ends. An edit the user has
    /// started since, on this record or another, is left alone. On failure
    /// the record keeps its previous values and the user is told.
    pub fn apply_save(
        &mut self,
        outcome: SaveOutcome,
        notifier: &dyn Notifier,
    ) -> Result<(), OpnameError> {
        let same_edit = self
            .editing
            .as_ref()
            .is_some_and(|e| e.is_for(&outcome.id) && e.generation() == outcome.generation);
        if same_edit {
            self.editing = None;
        }

        match outcome.result {
            Ok(()) => {
                match self.records.iter_mut().find(|r| r.id() == &outcome.id) {
                    Some(record) => record.apply(&outcome.update),
                    None => tracing::warn!(record = %outcome.id, "saved record no longer listed"),
                }
                tracing::info!(
                    record = %outcome.id,
                    real_stock = outcome.update.real_stock,
                    discrepancy = outcome.update.discrepancy,
                    "stock opname saved"
                );
                notifier.notify(Notice::success(SAVED_TEXT));
                Ok(())
            }
            Err(source) => {
                tracing::error!(
                    record = %outcome.id,
                    error = %source,
                    "failed to save stock opname"
                );
                notifier.notify(Notice::error(SAVE_FAILED_TEXT));
                Err(OpnameError::Save {
                    id: outcome.id,
                    source,
                })
            }
        }
    }

    /// Prepare, send and apply the edit on `id` in one go.
    pub async fn commit_edit_with(
        &mut self,
        ledger: &dyn OpnameLedger,
        notifier: &dyn Notifier,
        id: &OpnameId,
    ) -> Result<(), OpnameError> {
        let request = self.commit_edit(id)?;
        let outcome = save(ledger, request).await;
        self.apply_save(outcome, notifier)
    }

    // --- selection & export -----------------------------------------------

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Flip `id` in the export selection; returns whether it is now selected.
    pub fn toggle_select(&mut self, id: &OpnameId) -> Result<bool, OpnameError> {
        if self.record(id).is_none() {
            return Err(OpnameError::UnknownRecord(id.clone()));
        }
        Ok(self.selection.toggle(id))
    }

    /// Select every listed record (ignoring the search filter), or clear the
    /// selection if that is already what is selected.
    pub fn toggle_select_all(&mut self) {
        self.selection.toggle_all(self.records.iter().map(Entity::id));
    }

    /// Whether the "select all" box shows as checked.
    pub fn all_selected(&self) -> bool {
        self.selection.covers(self.records.iter().map(Entity::id))
    }

    /// Build the CSV of the selected records and hand it to `sink`.
    ///
    /// With nothing selected, the user gets one error notice and no file is
    /// produced.
    pub fn export_selection(
        &self,
        sink: &dyn ReportSink,
        notifier: &dyn Notifier,
    ) -> Result<(), OpnameError> {
        if self.selection.is_empty() {
            notifier.notify(Notice::error(NOTHING_SELECTED_TEXT));
            return Err(OpnameError::EmptySelection);
        }

        let selected = self
            .records
            .iter()
            .filter(|r| self.selection.contains(r.id()));

        let delivered = build_report(selected).and_then(|report| {
            sink.deliver(REPORT_FILE_NAME, report.as_bytes())
                .map_err(crate::export::ExportError::Delivery)
        });

        if let Err(e) = delivered {
            tracing::error!(error = %e, "stock opname export failed");
            notifier.notify(Notice::error(EXPORT_FAILED_TEXT));
            return Err(e.into());
        }

        tracing::info!(rows = self.selection.len(), "stock opname report exported");
        Ok(())
    }
}

impl Default for OpnameSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gudang_inventory::ToolSnapshot;

    fn record(id: &str, name: &str, location: Option<&str>) -> StockOpnameRecord {
        StockOpnameRecord::uncounted(
            OpnameId::new(id).unwrap(),
            ToolSnapshot {
                name: name.to_string(),
                sku: format!("{name}-SKU"),
                quantity: 5,
                location: location.map(str::to_string),
            },
        )
    }

    fn id(s: &str) -> OpnameId {
        OpnameId::new(s).unwrap()
    }

    #[test]
    fn new_edit_replaces_previous_one_silently() {
        let mut session = OpnameSession::with_records(vec![
            record("a", "Hammer", None),
            record("b", "Saw", None),
        ]);

        session.begin_edit(&id("a"), Some(5)).unwrap();
        session.set_pending_value(Some(9)).unwrap();
        session.begin_edit(&id("b"), None).unwrap();

        assert!(session.is_editing(&id("b")));
        assert!(!session.is_editing(&id("a")));
        assert_eq!(session.pending_value(), None);
        assert_eq!(session.record(&id("a")).unwrap().real_stock(), None);
    }

    #[test]
    fn commit_requires_a_value_for_the_record_under_edit() {
        let mut session = OpnameSession::with_records(vec![
            record("a", "Hammer", None),
            record("b", "Saw", None),
        ]);

        assert!(matches!(session.commit_edit(&id("a")), Err(OpnameError::NotEditing(_))));

        session.begin_edit(&id("a"), None).unwrap();
        assert!(matches!(session.commit_edit(&id("a")), Err(OpnameError::NoPendingValue)));
        assert!(matches!(session.commit_edit(&id("b")), Err(OpnameError::NotEditing(_))));

        session.set_pending_value(Some(-1)).unwrap();
        assert!(matches!(session.commit_edit(&id("a")), Err(OpnameError::Domain(_))));
        assert!(session.is_editing(&id("a")));
    }

    #[test]
    fn unknown_records_are_rejected() {
        let mut session = OpnameSession::with_records(vec![record("a", "Hammer", None)]);
        assert!(matches!(session.begin_edit(&id("zz"), None), Err(OpnameError::UnknownRecord(_))));
        assert!(matches!(session.toggle_select(&id("zz")), Err(OpnameError::UnknownRecord(_))));
        assert!(matches!(session.set_pending_value(Some(1)), Err(OpnameError::NoActiveEdit)));
    }

    #[test]
    fn search_resets_to_first_page_and_filters_by_location() {
        let records = (0..120)
            .map(|i| {
                let location = if i % 2 == 0 { "A1" } else { "B7" };
                record(&format!("r{i}"), &format!("Tool {i}"), Some(location))
            })
            .collect();
        let mut session = OpnameSession::with_records(records);

        assert_eq!(session.total_pages(), 3);
        session.set_page(3);
        assert_eq!(session.visible().items.len(), 20);
        assert_eq!(session.page_window(), vec![1, 2, 3]);

        session.set_search("b7");
        assert_eq!(session.search(), "b7");
        assert_eq!(session.page(), 1);
        assert_eq!(session.filtered().len(), 60);
        assert_eq!(session.total_pages(), 2);

        session.set_page(99);
        assert_eq!(session.page(), 2);
        assert_eq!(session.visible().items.len(), 10);
    }

    #[test]
    fn export_with_nothing_selected_writes_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let sink = crate::export::FileSink::new(dir.path());
        let session = OpnameSession::with_records(vec![record("a", "Hammer", Some("A1"))]);

        let err = session.export_selection(&sink, &crate::notice::TracingNotifier).unwrap_err();

        assert!(matches!(err, OpnameError::EmptySelection));
        assert!(!dir.path().join(REPORT_FILE_NAME).exists());
    }

    #[test]
    fn custom_page_size_changes_the_window() {
        let records = (0..30).map(|i| record(&format!("r{i}"), "Tool", None)).collect();
        let mut session = OpnameSession::with_records(records).with_page_size(4);

        assert_eq!(session.total_pages(), 8);
        assert_eq!(session.page_window(), vec![1, 2, 3, 4, 5]);
        session.set_page(8);
        assert_eq!(session.visible().items.len(), 2);
    }

    #[test]
    fn select_all_ignores_search_and_tracks_indicator() {
        let mut session = OpnameSession::with_records(vec![
            record("a", "Hammer", Some("A1")),
            record("b", "Saw", Some("B2")),
        ]);
        session.set_search("hammer");

        session.toggle_select_all();
        assert!(session.all_selected());
        assert_eq!(session.selection().len(), 2);

        session.toggle_select(&id("b")).unwrap();
        assert!(!session.all_selected());

        session.toggle_select_all();
        assert!(session.all_selected());
        session.toggle_select_all();
        assert!(session.selection().is_empty());
    }
}
