use std::collections::BTreeMap;

use rusqlite::types::Type;
use rusqlite::{params, Row};
use tracing::debug;
use uuid::Uuid;

use crate::database::DatabasePool;
use crate::models::blood_test::StoredBloodTest;
use super::blood_test::HistoryFilter;
use super::errors::RepositoryError;

const SELECT_COLUMNS: &str = "SELECT id, user_id, test_date, lab_values, analysis, recommendation,
        risk_tier, risk_score, created_at
     FROM blood_tests";

/// Database storage operations for blood tests
pub struct DatabaseStorage;

impl DatabaseStorage {
    /// Store a test in the database
    pub fn store_test(pool: &DatabasePool, test: &StoredBloodTest) -> Result<(), RepositoryError> {
        debug!("Storing blood test in database: id={}", test.id);

        let values = serde_json::to_string(&test.values)?;
        let analysis = serde_json::to_string(&test.analysis)?;

        match pool {
            DatabasePool::SQLite(pool) => {
                let conn = pool.get()?;
                conn.execute(
                    "INSERT INTO blood_tests
                     (id, user_id, test_date, lab_values, analysis, recommendation, risk_tier, risk_score, created_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                    params![
                        test.id,
                        test.user_id,
                        test.test_date,
                        values,
                        analysis,
                        test.recommendation,
                        test.risk_tier,
                        test.risk_score,
                        test.created_at,
                    ],
                )?;
                Ok(())
            }
        }
    }

    /// All tests of a user, newest first
    pub fn get_for_user(pool: &DatabasePool, user_id: &str) -> Result<Vec<StoredBloodTest>, RepositoryError> {
        debug!("Getting blood tests for user {} from database", user_id);

        match pool {
            DatabasePool::SQLite(pool) => {
                let conn = pool.get()?;
                let mut stmt = conn.prepare(&format!(
                    "{} WHERE user_id = ?1 ORDER BY test_date DESC, created_at DESC",
                    SELECT_COLUMNS
                ))?;

                let tests = stmt.query_map([user_id], row_to_test)?;
                Ok(tests.collect::<Result<Vec<_>, _>>()?)
            }
        }
    }

    /// Most recent test of a user
    pub fn get_latest(pool: &DatabasePool, user_id: &str) -> Result<Option<StoredBloodTest>, RepositoryError> {
        debug!("Getting latest blood test for user {} from database", user_id);

        match pool {
            DatabasePool::SQLite(pool) => {
                let conn = pool.get()?;
                let mut stmt = conn.prepare(&format!(
                    "{} WHERE user_id = ?1 ORDER BY test_date DESC, created_at DESC LIMIT 1",
                    SELECT_COLUMNS
                ))?;

                match stmt.query_row([user_id], row_to_test) {
                    Ok(test) => Ok(Some(test)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(RepositoryError::Sqlite(e)),
                }
            }
        }
    }

    /// Get a test by ID, scoped to its owner
    pub fn get_by_id(
        pool: &DatabasePool,
        user_id: &str,
        id: &Uuid,
    ) -> Result<Option<StoredBloodTest>, RepositoryError> {
        debug!("Getting blood test by ID from database: id={}", id);

        match pool {
            DatabasePool::SQLite(pool) => {
                let conn = pool.get()?;
                let mut stmt = conn.prepare(&format!(
                    "{} WHERE id = ?1 AND user_id = ?2",
                    SELECT_COLUMNS
                ))?;

                match stmt.query_row(params![id.to_string(), user_id], row_to_test) {
                    Ok(test) => Ok(Some(test)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(RepositoryError::Sqlite(e)),
                }
            }
        }
    }

    /// Filtered, paginated history of a user
    pub fn get_filtered(
        pool: &DatabasePool,
        user_id: &str,
        filter: &HistoryFilter,
    ) -> Result<(Vec<StoredBloodTest>, usize), RepositoryError> {
        debug!("Getting filtered blood tests for user {} from database", user_id);

        let sort_direction = if filter.sort_desc.unwrap_or(true) { "DESC" } else { "ASC" };

        match pool {
            DatabasePool::SQLite(pool) => {
                let conn = pool.get()?;

                let mut where_clauses = vec!["user_id = ?"];
                let mut params: Vec<&dyn rusqlite::ToSql> = vec![&user_id];

                if let Some(ref start) = filter.start_date {
                    where_clauses.push("test_date >= ?");
                    params.push(start);
                }

                if let Some(ref end) = filter.end_date {
                    where_clauses.push("test_date <= ?");
                    params.push(end);
                }

                let where_sql = where_clauses.join(" AND ");

                let count_query = format!("SELECT COUNT(*) FROM blood_tests WHERE {}", where_sql);
                let total: i64 = conn.query_row(
                    &count_query,
                    rusqlite::params_from_iter(params.iter()),
                    |row| row.get(0),
                )?;
                let total = total as usize;

                // SQLite treats a negative LIMIT as "no limit"
                let limit = filter
                    .limit
                    .map(|l| i64::try_from(l).unwrap_or(i64::MAX))
                    .unwrap_or(-1);
                let offset = i64::try_from(filter.offset.unwrap_or(0)).unwrap_or(i64::MAX);

                let query = format!(
                    "{} WHERE {} ORDER BY test_date {dir}, created_at {dir} LIMIT {} OFFSET {}",
                    SELECT_COLUMNS,
                    where_sql,
                    limit,
                    offset,
                    dir = sort_direction,
                );

                let mut stmt = conn.prepare(&query)?;
                let tests = stmt.query_map(rusqlite::params_from_iter(params.iter()), row_to_test)?;
                let page = tests.collect::<Result<Vec<_>, _>>()?;

                Ok((page, total))
            }
        }
    }

    /// Remove every test of a user, returning how many were removed
    pub fn delete_all_for_user(pool: &DatabasePool, user_id: &str) -> Result<usize, RepositoryError> {
        debug!("Deleting all blood tests for user {} from database", user_id);

        match pool {
            DatabasePool::SQLite(pool) => {
                let conn = pool.get()?;
                let removed = conn.execute("DELETE FROM blood_tests WHERE user_id = ?1", [user_id])?;
                Ok(removed)
            }
        }
    }
}

/// Map a row selected with `SELECT_COLUMNS` to the storage model
fn row_to_test(row: &Row<'_>) -> rusqlite::Result<StoredBloodTest> {
    let values_json: String = row.get(3)?;
    let analysis_json: String = row.get(4)?;

    let values: BTreeMap<String, f64> = serde_json::from_str(&values_json)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?;
    let analysis: Vec<String> = serde_json::from_str(&analysis_json)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?;

    Ok(StoredBloodTest {
        id: row.get(0)?,
        user_id: row.get(1)?,
        test_date: row.get(2)?,
        values,
        analysis,
        recommendation: row.get(5)?,
        risk_tier: row.get(6)?,
        risk_score: row.get(7)?,
        created_at: row.get(8)?,
    })
}
