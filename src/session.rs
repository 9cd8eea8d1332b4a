//! Owned listing state for one dashboard session.
//!
//! The session holds the record snapshot, the filter constraints, the current
//! page, and the selected record. Its methods are the only way to change that
//! state. Derived views (filtered set, current page, pagination metadata) are
//! recomputed on each call.

use tracing::debug;

use crate::error::DashboardError;
use crate::filter::{apply_filters, DateRange, FilterState};
use crate::models::{Assessment, AssessmentStatus, AssessmentTypeCode};
use crate::pagination::{self, PageItem, PaginationState, DEFAULT_MAX_VISIBLE};

#[derive(Debug, Clone)]
pub struct DashboardSession {
    records: Vec<Assessment>,
    filters: FilterState,
    current_page: usize,
    page_size: usize,
    selected: Option<String>,
}

impl DashboardSession {
    pub fn new(records: Vec<Assessment>, page_size: usize) -> Result<Self, DashboardError> {
        if page_size == 0 {
            return Err(DashboardError::InvalidPageSize);
        }
        Ok(Self {
            records,
            filters: FilterState::default(),
            current_page: 1,
            page_size,
            selected: None,
        })
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn records(&self) -> &[Assessment] {
        &self.records
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        let search = search.into();
        self.update_filters(FilterState {
            search,
            ..self.filters.clone()
        });
    }

    pub fn set_status(&mut self, status: Option<AssessmentStatus>) {
        self.update_filters(FilterState {
            status,
            ..self.filters.clone()
        });
    }

    pub fn set_type(&mut self, type_code: Option<AssessmentTypeCode>) {
        self.update_filters(FilterState {
            type_code,
            ..self.filters.clone()
        });
    }

    pub fn set_date_range(&mut self, date_range: Option<DateRange>) {
        self.update_filters(FilterState {
            date_range,
            ..self.filters.clone()
        });
    }

    pub fn clear_filters(&mut self) {
        self.update_filters(FilterState::default());
    }

    fn update_filters(&mut self, filters: FilterState) {
        debug!(?filters, "filters changed, resetting to page 1");
        self.filters = filters;
        self.current_page = 1;
    }

    /// Move to `page` if it exists in the current filtered set.
    ///
    /// Returns `false` and leaves the state untouched otherwise.
    pub fn set_page(&mut self, page: i64) -> bool {
        let total = self.total_pages();
        match usize::try_from(page) {
            Ok(page) if page >= 1 && page <= total => {
                self.current_page = page;
                true
            }
            _ => {
                debug!(page, total_pages = total, "rejected page request");
                false
            }
        }
    }

    /// Select a record by id, or clear the selection with `None`.
    pub fn select(&mut self, id: Option<&str>) -> Result<(), DashboardError> {
        match id {
            Some(id) => {
                if !self.records.iter().any(|a| a.id == id) {
                    return Err(DashboardError::AssessmentNotFound(id.to_string()));
                }
                self.selected = Some(id.to_string());
            }
            None => self.selected = None,
        }
        Ok(())
    }

    pub fn selected(&self) -> Option<&Assessment> {
        let id = self.selected.as_deref()?;
        self.records.iter().find(|a| a.id == id)
    }

    /// Every record passing the current filters, in dataset order.
    pub fn all_filtered(&self) -> Vec<&Assessment> {
        apply_filters(&self.records, &self.filters)
    }

    /// The records on the current page.
    pub fn page(&self) -> Vec<&Assessment> {
        let filtered = self.all_filtered();
        pagination::paginate(&filtered, self.current_page, self.page_size).to_vec()
    }

    pub fn pagination(&self) -> PaginationState {
        PaginationState {
            current_page: self.current_page,
            page_size: self.page_size,
            total_items: self.all_filtered().len(),
        }
    }

    pub fn total_pages(&self) -> usize {
        self.pagination().total_pages()
    }

    pub fn page_numbers(&self) -> Vec<PageItem> {
        pagination::page_numbers(self.current_page, self.total_pages(), DEFAULT_MAX_VISIBLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset;
    use crate::test_support::{at, numbered};

    fn twelve() -> DashboardSession {
        DashboardSession::new(numbered(12), 5).unwrap()
    }

    fn sample_session() -> DashboardSession {
        DashboardSession::new(dataset::sample().unwrap().assessments, 5).unwrap()
    }

    #[test]
    fn starts_on_page_one_without_constraints() {
        let session = twelve();
        assert!(session.filters().is_empty());
        assert_eq!(
            session.pagination(),
            PaginationState {
                current_page: 1,
                page_size: 5,
                total_items: 12
            }
        );
        assert!(session.selected().is_none());
    }

    #[test]
    fn rejects_zero_page_size() {
        assert!(matches!(
            DashboardSession::new(numbered(3), 0),
            Err(DashboardError::InvalidPageSize)
        ));
    }

    #[test]
    fn twelve_records_make_three_pages() {
        let mut session = twelve();
        assert_eq!(session.total_pages(), 3);
        assert_eq!(session.page().len(), 5);

        assert!(session.set_page(3));
        assert_eq!(session.page().len(), 2);
        assert_eq!(session.page()[0].id, "ASM-011");

        assert!(!session.set_page(4));
        assert_eq!(session.pagination().current_page, 3);
    }

    #[test]
    fn invalid_page_requests_are_no_ops() {
        let mut session = twelve();
        assert!(session.set_page(2));
        for page in [0, -1, -50, 4, 100] {
            assert!(!session.set_page(page));
            assert_eq!(session.pagination().current_page, 2);
        }
    }

    #[test]
    fn set_page_changes_the_slice() {
        let mut session = twelve();
        let first = session.page()[0].id.clone();
        assert!(session.set_page(2));
        assert_ne!(session.page()[0].id, first);
    }

    #[test]
    fn every_filter_change_resets_the_page() {
        let mut session = sample_session();

        session.set_page(2);
        session.set_search("pat-");
        assert_eq!(session.pagination().current_page, 1);

        session.set_page(2);
        session.set_status(Some(AssessmentStatus::Completed));
        assert_eq!(session.pagination().current_page, 1);

        session.set_status(None);
        session.set_page(2);
        session.set_type(Some(AssessmentTypeCode::Beck));
        assert_eq!(session.pagination().current_page, 1);

        session.set_type(None);
        session.set_page(2);
        session.set_date_range(Some(DateRange {
            start: Some(at("2024-01-01T00:00:00Z")),
            end: None,
        }));
        assert_eq!(session.pagination().current_page, 1);
    }

    #[test]
    fn zero_match_search_is_empty_not_an_error() {
        let mut session = sample_session();
        session.set_search("nonexistent-patient-xyz");
        assert!(session.all_filtered().is_empty());
        assert!(session.page().is_empty());
        assert_eq!(session.total_pages(), 0);
        assert!(session.page_numbers().is_empty());
        assert!(!session.set_page(1));
    }

    #[test]
    fn clearing_an_empty_search_restores_everything() {
        let mut session = sample_session();
        let total = session.all_filtered().len();
        session.set_search("test");
        session.set_search("");
        assert_eq!(session.all_filtered().len(), total);
    }

    #[test]
    fn clear_filters_resets_every_dimension() {
        let mut session = sample_session();
        session.set_search("test");
        session.set_status(Some(AssessmentStatus::Completed));
        session.set_type(Some(AssessmentTypeCode::Mmpi));
        session.set_date_range(Some(DateRange {
            start: None,
            end: Some(at("2024-02-01T00:00:00Z")),
        }));

        session.clear_filters();

        assert_eq!(session.filters(), &FilterState::default());
        assert_eq!(session.pagination().current_page, 1);
        assert_eq!(session.all_filtered().len(), session.records().len());
    }

    #[test]
    fn clear_filters_returns_to_the_first_page() {
        let mut session = sample_session();
        session.set_search("pat-");
        assert!(session.total_pages() > 1);
        assert!(session.set_page(2));
        assert_eq!(session.pagination().current_page, 2);

        session.clear_filters();

        assert_eq!(session.pagination().current_page, 1);
        assert_eq!(session.page()[0].id, session.records()[0].id);
    }

    #[test]
    fn selection_can_change_and_clear() {
        let mut session = twelve();
        session.select(Some("ASM-001")).unwrap();
        assert_eq!(session.selected().map(|a| a.id.as_str()), Some("ASM-001"));

        session.select(Some("ASM-002")).unwrap();
        assert_eq!(session.selected().map(|a| a.id.as_str()), Some("ASM-002"));

        session.select(None).unwrap();
        assert!(session.selected().is_none());
    }

    #[test]
    fn selecting_an_unknown_id_keeps_the_previous_selection() {
        let mut session = twelve();
        session.select(Some("ASM-003")).unwrap();
        assert!(matches!(
            session.select(Some("ASM-999")),
            Err(DashboardError::AssessmentNotFound(_))
        ));
        assert_eq!(session.selected().map(|a| a.id.as_str()), Some("ASM-003"));
    }

    #[test]
    fn page_window_tracks_the_current_page() {
        let mut session = DashboardSession::new(numbered(50), 5).unwrap();
        session.set_page(5);
        assert_eq!(
            session.page_numbers(),
            vec![
                PageItem::Page(1),
                PageItem::Gap,
                PageItem::Page(4),
                PageItem::Page(5),
                PageItem::Page(6),
                PageItem::Gap,
                PageItem::Page(10),
            ]
        );
    }
}
