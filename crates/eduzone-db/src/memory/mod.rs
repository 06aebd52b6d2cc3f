//! In-memory repositories.
//!
//! A set of typed tables behind one `RwLock`. Every compound read-modify-write
//! (unique email insert, stock counters with their loans, status transitions)
//! runs under a single write guard, so it is atomic with respect to other
//! requests. Ids come from a per-table counter and are never reused.

mod books;
mod events;
mod feedback;
mod forms;
mod teachers;
mod users;

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use eduzone_models::{Book, CalendarEvent, Feedback, Form, Loan, Teacher, User};

pub use books::MemoryBookRepository;
pub use events::MemoryEventRepository;
pub use feedback::MemoryFeedbackRepository;
pub use forms::MemoryFormRepository;
pub use teachers::MemoryTeacherRepository;
pub use users::MemoryUserRepository;

/// Rows keyed by id, in id order.
#[derive(Debug, Clone)]
pub struct Table<T> {
    rows: BTreeMap<i64, T>,
    last_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<T: Clone> Table<T> {
    /// Assigns the next id, builds the row with it and stores it.
    pub fn insert_with(&mut self, build: impl FnOnce(i64) -> T) -> T {
        self.last_id += 1;
        let row = build(self.last_id);
        self.rows.insert(self.last_id, row.clone());
        row
    }

    pub fn get(&self, id: i64) -> Option<T> {
        self.rows.get(&id).cloned()
    }

    pub fn select(&self, predicate: impl Fn(&T) -> bool) -> Vec<T> {
        self.rows.values().filter(|row| predicate(*row)).cloned().collect()
    }

    pub fn any(&self, predicate: impl Fn(&T) -> bool) -> bool {
        self.rows.values().any(predicate)
    }

    /// Applies `apply` to row `id` if it exists and satisfies `predicate`.
    pub fn update_where(
        &mut self,
        id: i64,
        predicate: impl FnOnce(&T) -> bool,
        apply: impl FnOnce(&mut T),
    ) -> Option<T> {
        let row = self.rows.get_mut(&id)?;
        if !predicate(row) {
            return None;
        }
        apply(row);
        Some(row.clone())
    }

    /// Removes row `id` if it exists and satisfies `predicate`.
    pub fn remove_where(&mut self, id: i64, predicate: impl FnOnce(&T) -> bool) -> Option<T> {
        if !predicate(self.rows.get(&id)?) {
            return None;
        }
        self.rows.remove(&id)
    }

    /// Removes every row matching `predicate`, returning how many went.
    pub fn remove_all(&mut self, predicate: impl Fn(&T) -> bool) -> usize {
        let before = self.rows.len();
        self.rows.retain(|_, row| !predicate(row));
        before - self.rows.len()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct Tables {
    pub users: Table<User>,
    pub books: Table<Book>,
    pub loans: Table<Loan>,
    pub teachers: Table<Teacher>,
    pub events: Table<CalendarEvent>,
    pub forms: Table<Form>,
    pub feedback: Table<Feedback>,
}

/// Shared handle to the in-memory tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryDatabase {
    inner: Arc<RwLock<Tables>>,
}

impl MemoryDatabase {
    pub async fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.inner.read().await
    }

    pub async fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.inner.write().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_never_reused() {
        let mut table: Table<(i64, &str)> = Table::default();
        let first = table.insert_with(|id| (id, "a"));
        let second = table.insert_with(|id| (id, "b"));
        assert_eq!((first.0, second.0), (1, 2));

        assert!(table.remove_where(2, |_| true).is_some());
        let third = table.insert_with(|id| (id, "c"));
        assert_eq!(third.0, 3);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_update_where_respects_predicate() {
        let mut table: Table<i32> = Table::default();
        table.insert_with(|_| 0);

        assert!(table.update_where(1, |v| *v > 0, |v| *v -= 1).is_none());
        assert_eq!(table.get(1), Some(0));
        assert_eq!(table.update_where(1, |_| true, |v| *v += 5), Some(5));
        assert!(table.update_where(99, |_| true, |v| *v += 1).is_none());
    }

    #[test]
    fn test_remove_all_matching() {
        let mut table: Table<i32> = Table::default();
        for v in [1, 2, 3, 4] {
            table.insert_with(|_| v);
        }
        assert_eq!(table.remove_all(|v| v % 2 == 0), 2);
        assert_eq!(table.select(|_| true), vec![1, 3]);
    }

    #[test]
    fn test_remove_where_respects_predicate() {
        let mut table: Table<i32> = Table::default();
        table.insert_with(|_| 7);
        assert!(table.remove_where(1, |v| *v == 8).is_none());
        assert_eq!(table.remove_where(1, |v| *v == 7), Some(7));
        assert!(table.is_empty());
    }
}
