//! Selection list controller.
//!
//! [`SelectionList`] binds a shared sequence of posters to rows, keeps the
//! set of selected row indices and reports the selection count to an
//! observer after every toggle. Rows are drawn through the passive
//! [`PosterView`] capability so the controller never sees concrete widgets.

use crate::error::{AppError, Result};
use crate::types::PosterRecord;
use log::trace;
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

/// A row view that can display one poster and its selection marker.
pub trait PosterView {
    /// Show `poster`, marked as selected or not.
    fn bind(&mut self, poster: &PosterRecord, is_selected: bool);
}

/// Observer called with the selection count after every toggle.
pub type SelectionCallback = Box<dyn FnMut(usize)>;

/// Tracks which rows of a poster list are selected.
pub struct SelectionList {
    records: Rc<[PosterRecord]>,
    selected: HashSet<usize>,
    invalidated: Vec<usize>,
    on_selection_changed: SelectionCallback,
}

impl SelectionList {
    /// Create a controller over `records` with nothing selected.
    pub fn new(records: Rc<[PosterRecord]>, on_selection_changed: SelectionCallback) -> Self {
        Self {
            records,
            selected: HashSet::new(),
            invalidated: Vec::new(),
            on_selection_changed,
        }
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    /// Bind row `index` to `view`.
    ///
    /// Only reads state, so calling it repeatedly binds the same output.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::IndexOutOfRange`] if `index >= row_count()`.
    pub fn render_row<V: PosterView + ?Sized>(&self, index: usize, view: &mut V) -> Result<()> {
        let poster = self.record(index)?;
        view.bind(poster, self.selected.contains(&index));
        Ok(())
    }

    /// Flip the selection of row `index` and return the new selection count.
    ///
    /// The row is queued for re-render and the observer has been called with
    /// the new count by the time this returns.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::IndexOutOfRange`] if `index >= row_count()`. The
    /// selection is left untouched and the observer is not called.
    pub fn toggle_row(&mut self, index: usize) -> Result<usize> {
        self.record(index)?;

        if !self.selected.remove(&index) {
            self.selected.insert(index);
        }
        if !self.invalidated.contains(&index) {
            self.invalidated.push(index);
        }

        let count = self.selected.len();
        trace!("Toggled row {}, {} selected", index, count);
        (self.on_selection_changed)(count);
        Ok(count)
    }

    /// Currently selected row indices. Iteration order is unspecified.
    pub fn selected_indices(&self) -> &HashSet<usize> {
        &self.selected
    }

    /// Number of selected rows.
    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Whether row `index` is selected. Out-of-range rows are never selected.
    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    /// Take the rows toggled since the last call, in toggle order.
    pub fn take_invalidated_rows(&mut self) -> Vec<usize> {
        std::mem::take(&mut self.invalidated)
    }

    fn record(&self, index: usize) -> Result<&PosterRecord> {
        self.records
            .get(index)
            .ok_or(AppError::IndexOutOfRange {
                index,
                len: self.records.len(),
            })
    }
}

impl fmt::Debug for SelectionList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionList")
            .field("rows", &self.records.len())
            .field("selected", &self.selected)
            .field("invalidated", &self.invalidated)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use std::cell::RefCell;

    /// Records every bind as (title, selected).
    #[derive(Default)]
    struct RecordingView {
        binds: Vec<(String, bool)>,
    }

    impl PosterView for RecordingView {
        fn bind(&mut self, poster: &PosterRecord, is_selected: bool) {
            self.binds.push((poster.title.clone(), is_selected));
        }
    }

    fn list_with_log() -> (SelectionList, Rc<RefCell<Vec<usize>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        let list = SelectionList::new(
            Catalog::builtin().records(),
            Box::new(move |count| sink.borrow_mut().push(count)),
        );
        (list, log)
    }

    #[test]
    fn test_new_list_is_empty() {
        let (list, log) = list_with_log();
        assert_eq!(list.row_count(), 10);
        assert!(list.selected_indices().is_empty());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_empty_records() {
        let mut list = SelectionList::new(Rc::from(Vec::new()), Box::new(|_| {}));
        assert_eq!(list.row_count(), 0);
        assert!(matches!(
            list.toggle_row(0),
            Err(AppError::IndexOutOfRange { index: 0, len: 0 })
        ));
    }

    #[test]
    fn test_toggle_is_involution() {
        let (mut list, log) = list_with_log();
        assert_eq!(list.toggle_row(4).unwrap(), 1);
        assert!(list.is_selected(4));
        assert_eq!(list.toggle_row(4).unwrap(), 0);
        assert!(!list.is_selected(4));
        assert_eq!(*log.borrow(), vec![1, 0]);
    }

    #[test]
    fn test_callback_fires_before_toggle_returns() {
        let (mut list, log) = list_with_log();
        for i in [2, 5, 7] {
            let count = list.toggle_row(i).unwrap();
            assert_eq!(log.borrow().last(), Some(&count));
            assert_eq!(list.selected_count(), count);
        }
        assert_eq!(*log.borrow(), vec![1, 2, 3]);
    }

    #[test]
    fn test_out_of_range_toggle_leaves_state() {
        let (mut list, log) = list_with_log();
        list.toggle_row(1).unwrap();

        let err = list.toggle_row(list.row_count()).unwrap_err();
        assert!(matches!(
            err,
            AppError::IndexOutOfRange { index: 10, len: 10 }
        ));
        assert_eq!(list.selected_count(), 1);
        assert_eq!(*log.borrow(), vec![1]);
    }

    #[test]
    fn test_far_out_of_range_toggle() {
        let (mut list, log) = list_with_log();
        assert!(matches!(
            list.toggle_row(usize::MAX),
            Err(AppError::IndexOutOfRange { index: usize::MAX, len: 10 })
        ));
        assert!(list.selected_indices().is_empty());
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_render_row_marks_selection() {
        let (mut list, _) = list_with_log();
        list.toggle_row(3).unwrap();

        let mut view = RecordingView::default();
        list.render_row(2, &mut view).unwrap();
        list.render_row(3, &mut view).unwrap();
        assert_eq!(
            view.binds,
            vec![("Bullet Train".to_string(), false), ("Deadpool".to_string(), true)]
        );
    }

    #[test]
    fn test_render_row_is_idempotent() {
        let (mut list, _) = list_with_log();
        list.toggle_row(0).unwrap();

        let mut first = RecordingView::default();
        let mut second = RecordingView::default();
        list.render_row(0, &mut first).unwrap();
        list.render_row(0, &mut second).unwrap();
        assert_eq!(first.binds, second.binds);
        assert!(list.take_invalidated_rows() == vec![0]);
    }

    #[test]
    fn test_render_row_out_of_range() {
        let (list, _) = list_with_log();
        let mut view = RecordingView::default();
        assert!(list.render_row(10, &mut view).is_err());
        assert!(view.binds.is_empty());
    }

    #[test]
    fn test_invalidated_rows_drain() {
        let (mut list, _) = list_with_log();
        list.toggle_row(5).unwrap();
        list.toggle_row(1).unwrap();
        list.toggle_row(5).unwrap();
        assert_eq!(list.take_invalidated_rows(), vec![5, 1]);
        assert!(list.take_invalidated_rows().is_empty());
    }
}
