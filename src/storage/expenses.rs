//! Expense repository for JSON storage
//!
//! Manages loading and saving expenses to expenses.json. Every mutation is
//! written to disk before it becomes visible to readers.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Expense, ExpenseId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable expense table
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ExpenseData {
    expenses: Vec<Expense>,
}

/// Repository for expense persistence
pub struct ExpenseRepository {
    path: PathBuf,
    data: RwLock<HashMap<ExpenseId, Expense>>,
}

/// Newest date first; same-day records newest-created first
fn sort_newest_first(expenses: &mut [Expense]) {
    expenses.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
}

impl ExpenseRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    fn read(&self) -> ExpenseResult<RwLockReadGuard<'_, HashMap<ExpenseId, Expense>>> {
        self.data
            .read()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> ExpenseResult<RwLockWriteGuard<'_, HashMap<ExpenseId, Expense>>> {
        self.data
            .write()
            .map_err(|e| ExpenseError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Load expenses from disk; a missing file is an empty table
    pub fn load(&self) -> ExpenseResult<()> {
        let file_data: ExpenseData = read_json(&self.path)?;

        let mut data = self.write()?;
        data.clear();
        for expense in file_data.expenses {
            data.insert(expense.id, expense);
        }

        log::debug!("Loaded {} expenses from {}", data.len(), self.path.display());
        Ok(())
    }

    /// Save expenses to disk
    pub fn save(&self) -> ExpenseResult<()> {
        let data = self.write()?;
        self.persist(&data)
    }

    fn persist(&self, data: &HashMap<ExpenseId, Expense>) -> ExpenseResult<()> {
        let mut expenses: Vec<_> = data.values().cloned().collect();
        sort_newest_first(&mut expenses);

        write_json_atomic(&self.path, &ExpenseData { expenses })
    }

    /// Apply a change to a copy of the table, write it, then publish it
    ///
    /// The write lock is held across the change and the file write, so
    /// concurrent writers queue up and the table in memory only ever holds
    /// what is on disk. A failed change or write leaves both untouched.
    fn commit<T, F>(&self, change: F) -> ExpenseResult<T>
    where
        F: FnOnce(&mut HashMap<ExpenseId, Expense>) -> ExpenseResult<T>,
    {
        let mut data = self.write()?;
        let mut next = data.clone();
        let result = change(&mut next)?;
        self.persist(&next)?;
        *data = next;
        Ok(result)
    }

    /// Get an expense by ID
    pub fn get(&self, id: ExpenseId) -> ExpenseResult<Option<Expense>> {
        Ok(self.read()?.get(&id).cloned())
    }

    /// Get all expenses, newest date first
    pub fn get_all(&self) -> ExpenseResult<Vec<Expense>> {
        let mut expenses: Vec<_> = self.read()?.values().cloned().collect();
        sort_newest_first(&mut expenses);
        Ok(expenses)
    }

    /// Insert and persist a new expense; an existing id is rejected
    pub fn insert(&self, expense: Expense) -> ExpenseResult<()> {
        self.insert_many(vec![expense])
    }

    /// Insert and persist several expenses with a single write
    ///
    /// Either all of them are stored or none are.
    pub fn insert_many(&self, expenses: Vec<Expense>) -> ExpenseResult<()> {
        if expenses.is_empty() {
            return Ok(());
        }
        self.commit(|data| {
            for expense in expenses {
                if data.contains_key(&expense.id) {
                    return Err(ExpenseError::Storage(format!(
                        "Duplicate expense id: {}",
                        expense.id
                    )));
                }
                data.insert(expense.id, expense);
            }
            Ok(())
        })
    }

    /// Replace and persist an existing expense; returns false if the id is unknown
    pub fn replace(&self, expense: Expense) -> ExpenseResult<bool> {
        if !self.read()?.contains_key(&expense.id) {
            return Ok(false);
        }
        self.commit(|data| match data.get_mut(&expense.id) {
            Some(slot) => {
                *slot = expense;
                Ok(true)
            }
            // Deleted by another writer in between
            None => Ok(false),
        })
    }

    /// Delete and persist, returning the expense if it existed
    pub fn delete(&self, id: ExpenseId) -> ExpenseResult<Option<Expense>> {
        if !self.read()?.contains_key(&id) {
            return Ok(None);
        }
        self.commit(|data| Ok(data.remove(&id)))
    }

    pub fn count(&self) -> ExpenseResult<usize> {
        Ok(self.read()?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Money, NewExpense};
    use chrono::{Duration, NaiveDate, Utc};
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, ExpenseRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("expenses.json");
        let repo = ExpenseRepository::new(path);
        (temp_dir, repo)
    }

    fn expense(title: &str, y: i32, m: u32, d: u32) -> Expense {
        Expense::from_new(
            NewExpense::new(
                title,
                Money::from_major(100),
                NaiveDate::from_ymd_opt(y, m, d).unwrap(),
                Category::Food,
            ),
            "default",
        )
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_insert_and_get() {
        let (_temp_dir, repo) = create_test_repo();
        let e = expense("Coffee", 2024, 3, 1);
        let id = e.id;

        repo.insert(e.clone()).unwrap();
        assert_eq!(repo.get(id).unwrap(), Some(e.clone()));
        assert!(repo.insert(e).is_err());
    }

    #[test]
    fn test_get_all_orders_by_date_then_created() {
        let (_temp_dir, repo) = create_test_repo();
        let mut early = expense("early", 2024, 3, 1);
        let mut late = expense("late", 2024, 3, 1);
        early.created_at = Some(Utc::now() - Duration::seconds(10));
        late.created_at = Some(Utc::now());

        repo.insert(early).unwrap();
        repo.insert(expense("old", 2023, 12, 31)).unwrap();
        repo.insert(late).unwrap();
        repo.insert(expense("newest", 2024, 4, 2)).unwrap();

        let titles: Vec<_> = repo.get_all().unwrap().into_iter().map(|e| e.title).collect();
        assert_eq!(titles, vec!["newest", "late", "early", "old"]);
    }

    #[test]
    fn test_replace_and_delete() {
        let (_temp_dir, repo) = create_test_repo();
        let mut e = expense("Coffee", 2024, 3, 1);
        let id = e.id;
        repo.insert(e.clone()).unwrap();

        e.title = "Tea".into();
        assert!(repo.replace(e.clone()).unwrap());
        assert_eq!(repo.get(id).unwrap().unwrap().title, "Tea");

        assert!(!repo.replace(expense("ghost", 2024, 1, 1)).unwrap());

        assert_eq!(repo.delete(id).unwrap().map(|e| e.title), Some("Tea".into()));
        assert_eq!(repo.delete(id).unwrap(), None);
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_mutations_are_persisted() {
        let (temp_dir, repo) = create_test_repo();
        let mut e = expense("Coffee", 2024, 3, 1);
        let id = e.id;
        let reload = || {
            let repo = ExpenseRepository::new(temp_dir.path().join("expenses.json"));
            repo.load().unwrap();
            repo
        };

        repo.insert(e.clone()).unwrap();
        assert_eq!(reload().count().unwrap(), 1);

        e.title = "Tea".into();
        repo.replace(e).unwrap();
        assert_eq!(reload().get(id).unwrap().unwrap().title, "Tea");

        repo.delete(id).unwrap();
        assert_eq!(reload().count().unwrap(), 0);
    }

    #[test]
    fn test_insert_many_is_all_or_nothing() {
        let (_temp_dir, repo) = create_test_repo();
        let existing = expense("Coffee", 2024, 3, 1);
        repo.insert(existing.clone()).unwrap();

        let batch = vec![expense("Bus", 2024, 3, 2), existing];
        assert!(repo.insert_many(batch).is_err());
        assert_eq!(repo.count().unwrap(), 1);

        repo.insert_many(vec![expense("Bus", 2024, 3, 2), expense("Book", 2024, 3, 3)])
            .unwrap();
        assert_eq!(repo.count().unwrap(), 3);
    }

    #[test]
    fn test_failed_write_leaves_table_unchanged() {
        let temp_dir = TempDir::new().unwrap();
        // A directory where the file should be makes every write fail
        let path = temp_dir.path().join("expenses.json");
        std::fs::create_dir(&path).unwrap();
        let repo = ExpenseRepository::new(path);

        assert!(repo.insert(expense("Coffee", 2024, 3, 1)).is_err());
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_concurrent_inserts_are_all_stored() {
        let (temp_dir, repo) = create_test_repo();

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|t| {
                    let repo = &repo;
                    scope.spawn(move || {
                        (0..25).try_for_each(|i| {
                            repo.insert(expense(&format!("t{}-{}", t, i), 2024, 3, 1))
                        })
                    })
                })
                .collect();
            for handle in handles {
                handle.join().unwrap().unwrap();
            }
        });

        assert_eq!(repo.count().unwrap(), 200);
        let reloaded = ExpenseRepository::new(temp_dir.path().join("expenses.json"));
        reloaded.load().unwrap();
        assert_eq!(reloaded.count().unwrap(), 200);
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        let e = expense("Coffee", 2024, 3, 1);
        let id = e.id;
        repo.insert(e).unwrap();
        repo.save().unwrap();

        let contents = std::fs::read_to_string(temp_dir.path().join("expenses.json")).unwrap();
        assert!(contents.contains("\"expenses\""));

        let repo2 = ExpenseRepository::new(temp_dir.path().join("expenses.json"));
        repo2.load().unwrap();
        assert_eq!(repo2.count().unwrap(), 1);
        assert_eq!(repo2.get(id).unwrap().unwrap().title, "Coffee");
    }
}
