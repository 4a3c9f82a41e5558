//! Read-only access to the crawled entry database
//!
//! The crawler (a separate tool) maintains an SQLite database with one
//! row per sequence: `oeis_entries(oeis_id, main_content, bfile_content)`.
//! This module only ever reads it; the connection is opened read-only and
//! immutable so a concurrent crawl cannot be disturbed.

use anyhow::{Context, Result};
use sqlx::sqlite::SqlitePool;
use std::path::Path;

/// One raw entry as stored by the crawler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    pub sequence_id: u32,
    pub main_text: String,
    pub bfile_text: String,
}

#[derive(sqlx::FromRow)]
struct EntryRow {
    oeis_id: i64,
    main_content: String,
    bfile_content: String,
}

/// Open the entry database read-only.
pub async fn connect_readonly(database_path: &Path) -> Result<SqlitePool> {
    if !database_path.exists() {
        anyhow::bail!("database file {} not found", database_path.display());
    }

    let url = format!("sqlite://{}?mode=ro&immutable=1", database_path.display());
    let pool = SqlitePool::connect(&url)
        .await
        .with_context(|| format!("failed to open database {}", database_path.display()))?;

    // Verify the read-only mode actually took: a write must fail.
    #[cfg(debug_assertions)]
    {
        let probe = sqlx::query("CREATE TABLE IF NOT EXISTS _write_probe (id INTEGER)")
            .execute(&pool)
            .await;
        if probe.is_ok() {
            panic!("database connection is unexpectedly writable");
        }
    }

    Ok(pool)
}

/// Fetch raw entries in ascending id order, optionally limited.
pub async fn fetch_entries(pool: &SqlitePool, limit: Option<usize>) -> Result<Vec<RawEntry>> {
    let rows: Vec<EntryRow> = match limit {
        Some(limit) => {
            sqlx::query_as(
                "SELECT oeis_id, main_content, bfile_content FROM oeis_entries \
                 ORDER BY oeis_id LIMIT ?",
            )
            .bind(limit as i64)
            .fetch_all(pool)
            .await
        }
        None => {
            sqlx::query_as(
                "SELECT oeis_id, main_content, bfile_content FROM oeis_entries ORDER BY oeis_id",
            )
            .fetch_all(pool)
            .await
        }
    }
    .context("failed to fetch entries from database")?;

    rows.into_iter()
        .map(|row| {
            let sequence_id = u32::try_from(row.oeis_id)
                .with_context(|| format!("invalid oeis_id {} in database", row.oeis_id))?;
            Ok(RawEntry {
                sequence_id,
                main_text: row.main_content,
                bfile_text: row.bfile_content,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seeded_pool() -> SqlitePool {
        let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
        sqlx::query(
            "CREATE TABLE oeis_entries (
                oeis_id INTEGER PRIMARY KEY,
                main_content TEXT NOT NULL,
                bfile_content TEXT NOT NULL
            )",
        )
        .execute(&pool)
        .await
        .unwrap();

        for (id, main) in [
            (45, "%I\n%S 1,1,2\n%N Fib.\n%K nonn"),
            (7, "%I\n%S 1,0,0\n%N a(n) = 0^n.\n%K nonn"),
            (142, "%I\n%S 1,1,2,6\n%N Factorials.\n%K nonn"),
        ] {
            sqlx::query("INSERT INTO oeis_entries VALUES (?, ?, ?)")
                .bind(id)
                .bind(main)
                .bind("1 1\n")
                .execute(&pool)
                .await
                .unwrap();
        }

        pool
    }

    #[tokio::test]
    async fn test_fetch_orders_by_id() {
        let pool = seeded_pool().await;
        let entries = fetch_entries(&pool, None).await.unwrap();

        let ids: Vec<u32> = entries.iter().map(|e| e.sequence_id).collect();
        assert_eq!(ids, vec![7, 45, 142]);
        assert!(entries[1].main_text.contains("Fib."));
    }

    #[tokio::test]
    async fn test_fetch_respects_limit() {
        let pool = seeded_pool().await;
        let entries = fetch_entries(&pool, Some(2)).await.unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].sequence_id, 7);
    }

    #[tokio::test]
    async fn test_connect_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.sqlite3");

        assert!(connect_readonly(&missing).await.is_err());
    }
}
