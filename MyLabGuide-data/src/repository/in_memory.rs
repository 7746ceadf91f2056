use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use uuid::Uuid;

use crate::models::blood_test::StoredBloodTest;
use super::blood_test::HistoryFilter;
use super::errors::RepositoryError;

/// In-memory storage for blood tests, used when the database is unavailable
#[derive(Debug, Clone)]
pub struct InMemoryStorage {
    tests: Arc<Mutex<HashMap<String, StoredBloodTest>>>,
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStorage {
    /// Create a new in-memory storage
    pub fn new() -> Self {
        Self {
            tests: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Store a test in memory
    pub fn store_test(&self, test: &StoredBloodTest) -> Result<StoredBloodTest, RepositoryError> {
        let mut store = self.tests.lock()?;
        store.insert(test.id.clone(), test.clone());
        Ok(test.clone())
    }

    /// All tests of a user, newest first
    pub fn get_for_user(&self, user_id: &str) -> Result<Vec<StoredBloodTest>, RepositoryError> {
        let store = self.tests.lock()?;
        let mut tests: Vec<StoredBloodTest> = store
            .values()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect();
        sort_newest_first(&mut tests);
        Ok(tests)
    }

    /// Most recent test of a user
    pub fn get_latest(&self, user_id: &str) -> Result<Option<StoredBloodTest>, RepositoryError> {
        Ok(self.get_for_user(user_id)?.into_iter().next())
    }

    /// Get a test by ID, scoped to its owner
    pub fn get_by_id(&self, user_id: &str, id: &Uuid) -> Result<Option<StoredBloodTest>, RepositoryError> {
        let store = self.tests.lock()?;
        Ok(store
            .get(&id.to_string())
            .filter(|t| t.user_id == user_id)
            .cloned())
    }

    /// Filtered, paginated history of a user
    pub fn get_filtered(
        &self,
        user_id: &str,
        filter: &HistoryFilter,
    ) -> Result<(Vec<StoredBloodTest>, usize), RepositoryError> {
        let tests = self.get_for_user(user_id)?;
        Ok(apply_filter(tests, filter))
    }

    /// Remove every test of a user, returning how many were removed
    pub fn delete_all_for_user(&self, user_id: &str) -> Result<usize, RepositoryError> {
        let mut store = self.tests.lock()?;
        let before = store.len();
        store.retain(|_, t| t.user_id != user_id);
        Ok(before - store.len())
    }
}

/// Sort by test date, then insertion time, newest first
pub(crate) fn sort_newest_first(tests: &mut [StoredBloodTest]) {
    tests.sort_by(|a, b| b.recency_key().cmp(&a.recency_key()));
}

/// Apply the date range, sort direction and pagination of a filter.
/// Returns the requested page and the number of tests matching the range.
pub(crate) fn apply_filter(
    tests: Vec<StoredBloodTest>,
    filter: &HistoryFilter,
) -> (Vec<StoredBloodTest>, usize) {
    let mut matching: Vec<StoredBloodTest> = tests
        .into_iter()
        .filter(|test| {
            if let Some(start) = filter.start_date.as_deref() {
                if test.test_date.as_str() < start {
                    return false;
                }
            }
            if let Some(end) = filter.end_date.as_deref() {
                if test.test_date.as_str() > end {
                    return false;
                }
            }
            true
        })
        .collect();

    sort_newest_first(&mut matching);
    if !filter.sort_desc.unwrap_or(true) {
        matching.reverse();
    }

    let total = matching.len();
    let offset = filter.offset.unwrap_or(0);
    let limit = filter.limit.unwrap_or(total);

    let page = matching.into_iter().skip(offset).take(limit).collect();
    (page, total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn stored(user_id: &str, test_date: &str, created_at: &str) -> StoredBloodTest {
        StoredBloodTest {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            test_date: test_date.to_string(),
            values: BTreeMap::from([("glucose".to_string(), 95.0)]),
            analysis: vec!["Glucose normal (95).".to_string()],
            recommendation: "Values are broadly within the normal range.".to_string(),
            risk_tier: "low".to_string(),
            risk_score: 0,
            created_at: created_at.to_string(),
        }
    }

    #[test]
    fn test_history_is_newest_first_and_per_user() {
        let storage = InMemoryStorage::new();
        storage.store_test(&stored("alice", "2024-01-10", "2024-01-10T08:00:00Z")).unwrap();
        storage.store_test(&stored("alice", "2024-03-02", "2024-03-02T08:00:00Z")).unwrap();
        storage.store_test(&stored("bob", "2024-05-01", "2024-05-01T08:00:00Z")).unwrap();

        let history = storage.get_for_user("alice").unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].test_date, "2024-03-02");
        assert_eq!(history[1].test_date, "2024-01-10");

        let latest = storage.get_latest("bob").unwrap().unwrap();
        assert_eq!(latest.test_date, "2024-05-01");
    }

    #[test]
    fn test_same_date_uses_insertion_time() {
        let storage = InMemoryStorage::new();
        storage.store_test(&stored("alice", "2024-01-10", "2024-01-10T08:00:00Z")).unwrap();
        let later = storage.store_test(&stored("alice", "2024-01-10", "2024-01-10T09:30:00Z")).unwrap();

        let latest = storage.get_latest("alice").unwrap().unwrap();
        assert_eq!(latest.id, later.id);
    }

    #[test]
    fn test_get_by_id_hides_other_users_tests() {
        let storage = InMemoryStorage::new();
        let test = storage.store_test(&stored("alice", "2024-01-10", "2024-01-10T08:00:00Z")).unwrap();
        let id = Uuid::parse_str(&test.id).unwrap();

        assert!(storage.get_by_id("alice", &id).unwrap().is_some());
        assert!(storage.get_by_id("mallory", &id).unwrap().is_none());
    }

    #[test]
    fn test_filtered_range_and_pagination() {
        let storage = InMemoryStorage::new();
        for (day, created) in [
            ("2024-01-01", "2024-01-01T08:00:00Z"),
            ("2024-02-01", "2024-02-01T08:00:00Z"),
            ("2024-03-01", "2024-03-01T08:00:00Z"),
            ("2024-04-01", "2024-04-01T08:00:00Z"),
        ] {
            storage.store_test(&stored("alice", day, created)).unwrap();
        }

        let filter = HistoryFilter {
            start_date: Some("2024-02-01".to_string()),
            end_date: Some("2024-04-01".to_string()),
            limit: Some(2),
            offset: Some(1),
            sort_desc: Some(true),
        };
        let (page, total) = storage.get_filtered("alice", &filter).unwrap();
        assert_eq!(total, 3);
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].test_date, "2024-03-01");
        assert_eq!(page[1].test_date, "2024-02-01");

        let ascending = HistoryFilter {
            sort_desc: Some(false),
            ..HistoryFilter::default()
        };
        let (page, total) = storage.get_filtered("alice", &ascending).unwrap();
        assert_eq!(total, 4);
        assert_eq!(page[0].test_date, "2024-01-01");
    }

    #[test]
    fn test_delete_all_for_user() {
        let storage = InMemoryStorage::new();
        storage.store_test(&stored("alice", "2024-01-10", "2024-01-10T08:00:00Z")).unwrap();
        storage.store_test(&stored("alice", "2024-02-10", "2024-02-10T08:00:00Z")).unwrap();
        storage.store_test(&stored("bob", "2024-02-10", "2024-02-10T08:00:00Z")).unwrap();

        assert_eq!(storage.delete_all_for_user("alice").unwrap(), 2);
        assert!(storage.get_for_user("alice").unwrap().is_empty());
        assert_eq!(storage.get_for_user("bob").unwrap().len(), 1);
    }
}
