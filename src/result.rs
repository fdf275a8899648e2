//! Query results.
//!
//! A [`ResultView`] is a fixed snapshot of the rows matched by a query. It does not copy rows: it
//! holds the ordinals of the matched rows and a shared borrow of the log they live in. The
//! borrow ties the view to the store, so the store can be neither written to nor cleared while a
//! view is alive.
//!
//! Callers that need to remember rows past that point can take detached [`RowHandle`]s and
//! resolve them against the store later. A handle is stamped with the store's epoch, which
//! advances on every `clear`, so a handle from a previous run resolves to `None` instead of to an
//! unrelated row.
//!
//! ```rust
//! use simstore::{BasicDataStore, DataStoreRead, DataStoreWrite, EntityId, Timestamp};
//!
//! let mut store = BasicDataStore::default();
//! store.put_cyclic(Timestamp(0), EntityId(1), "intVal", 2).unwrap();
//!
//! let result = store.get_cyclic(None, None, "*");
//! for row in &result {
//!     println!("{} {} {} {}", row.timestamp, row.entity_id, row.key, row.value);
//! }
//! ```

use std::fmt::{self, Debug, Formatter};
use std::iter::FusedIterator;

use serde::Serialize;

use crate::row::{AcyclicRow, CyclicRow};

/// A detached reference to a row, valid until the store is next cleared.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RowHandle {
    pub epoch: u64,
    pub ordinal: usize,
}

/// An ordered, read-only view over the rows matched by a query.
pub struct ResultView<'a, R> {
    log: &'a [R],
    epoch: u64,
    ordinals: Vec<usize>,
}

/// Result of [`get_cyclic`](crate::DataStoreRead::get_cyclic).
pub type CyclicResult<'a> = ResultView<'a, CyclicRow>;
/// Result of [`get_acyclic`](crate::DataStoreRead::get_acyclic).
pub type AcyclicResult<'a> = ResultView<'a, AcyclicRow>;

impl<'a, R> ResultView<'a, R> {
    /// Every ordinal must be a valid position in `log`.
    pub(crate) fn new(log: &'a [R], epoch: u64, ordinals: Vec<usize>) -> Self {
        debug_assert!(ordinals.iter().all(|ordinal| *ordinal < log.len()));
        Self {
            log,
            epoch,
            ordinals,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ordinals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ordinals.is_empty()
    }

    /// The row at position `index` within this result.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds. Use [`ResultView::get`] for a checked lookup.
    #[must_use]
    pub fn at(&self, index: usize) -> &'a R {
        match self.get(index) {
            Some(row) => row,
            None => panic!(
                "result index out of bounds: the len is {} but the index is {}",
                self.len(),
                index
            ),
        }
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&'a R> {
        let log = self.log;
        self.ordinals.get(index).map(|ordinal| &log[*ordinal])
    }

    #[must_use]
    pub fn first(&self) -> Option<&'a R> {
        self.get(0)
    }

    #[must_use]
    pub fn last(&self) -> Option<&'a R> {
        self.len().checked_sub(1).and_then(|index| self.get(index))
    }

    pub fn iter(&self) -> Iter<'a, '_, R> {
        Iter {
            log: self.log,
            ordinals: self.ordinals.iter(),
        }
    }

    /// Detached handles to the matched rows, in result order.
    pub fn handles(&self) -> impl Iterator<Item = RowHandle> + '_ {
        self.ordinals.iter().map(|ordinal| RowHandle {
            epoch: self.epoch,
            ordinal: *ordinal,
        })
    }

    /// Copies the matched rows out of the store.
    #[must_use]
    pub fn to_vec(&self) -> Vec<R>
    where
        R: Clone,
    {
        self.iter().cloned().collect()
    }
}

impl<R: Debug> Debug for ResultView<'_, R> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, 'v, R> IntoIterator for &'v ResultView<'a, R> {
    type Item = &'a R;
    type IntoIter = Iter<'a, 'v, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the rows of a [`ResultView`].
pub struct Iter<'a, 'v, R> {
    log: &'a [R],
    ordinals: std::slice::Iter<'v, usize>,
}

impl<'a, R> Iterator for Iter<'a, '_, R> {
    type Item = &'a R;

    fn next(&mut self) -> Option<Self::Item> {
        let log = self.log;
        self.ordinals.next().map(|ordinal| &log[*ordinal])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ordinals.size_hint()
    }
}

impl<R> DoubleEndedIterator for Iter<'_, '_, R> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let log = self.log;
        self.ordinals.next_back().map(|ordinal| &log[*ordinal])
    }
}

impl<R> ExactSizeIterator for Iter<'_, '_, R> {}

impl<R> FusedIterator for Iter<'_, '_, R> {}

#[cfg(test)]
mod tests {
    use super::*;

    const LOG: [&str; 4] = ["a", "b", "c", "d"];

    #[test]
    fn view_follows_ordinal_order() {
        let view = ResultView::new(&LOG, 0, vec![1, 3]);
        assert_eq!(view.len(), 2);
        assert_eq!(*view.at(0), "b");
        assert_eq!(*view.at(1), "d");
        assert_eq!(view.first(), Some(&"b"));
        assert_eq!(view.last(), Some(&"d"));
        assert_eq!(view.iter().copied().collect::<Vec<_>>(), vec!["b", "d"]);
        assert_eq!(view.iter().rev().copied().collect::<Vec<_>>(), vec!["d", "b"]);
    }

    #[test]
    fn view_can_be_iterated_repeatedly() {
        let view = ResultView::new(&LOG, 0, vec![0, 2]);
        let first: Vec<_> = (&view).into_iter().collect();
        let second: Vec<_> = (&view).into_iter().collect();
        assert_eq!(first, second);
        assert_eq!(view.iter().len(), 2);
    }

    #[test]
    fn empty_view_is_valid() {
        let view: ResultView<'_, &str> = ResultView::new(&LOG, 0, Vec::new());
        assert!(view.is_empty());
        assert_eq!(view.get(0), None);
        assert_eq!(view.first(), None);
        assert_eq!(view.last(), None);
        assert_eq!(view.iter().next(), None);
    }

    #[test]
    #[should_panic(expected = "result index out of bounds: the len is 1 but the index is 1")]
    fn at_past_the_end_panics() {
        let view = ResultView::new(&LOG, 0, vec![0]);
        let _ = view.at(1);
    }

    #[test]
    fn handles_carry_epoch() {
        let view = ResultView::new(&LOG, 7, vec![2, 3]);
        let handles: Vec<_> = view.handles().collect();
        assert_eq!(
            handles,
            vec![
                RowHandle {
                    epoch: 7,
                    ordinal: 2
                },
                RowHandle {
                    epoch: 7,
                    ordinal: 3
                }
            ]
        );
    }

    #[test]
    fn to_vec_copies_rows() {
        let view = ResultView::new(&LOG, 0, vec![3, 0]);
        assert_eq!(view.to_vec(), vec!["d", "a"]);
        assert_eq!(format!("{view:?}"), r#"["d", "a"]"#);
    }
}
