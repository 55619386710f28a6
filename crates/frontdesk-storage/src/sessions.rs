// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session record read/write operations.

use rusqlite::params;

use frontdesk_core::FrontdeskError;

use crate::database::Database;

/// Fetch the raw JSON record for a key.
pub async fn get_record(db: &Database, key: &str) -> Result<Option<String>, FrontdeskError> {
    let key = key.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare("SELECT record FROM sessions WHERE key = ?1")?;
            let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
            match result {
                Ok(record) => Ok(Some(record)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Upsert the JSON record for a key.
pub async fn put_record(
    db: &Database,
    key: &str,
    record: &str,
    updated_at: &str,
) -> Result<(), FrontdeskError> {
    let key = key.to_string();
    let record = record.to_string();
    let updated_at = updated_at.to_string();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO sessions (key, record, updated_at)
                 VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET record = ?2, updated_at = ?3",
                params![key, record, updated_at],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap(), true).await.unwrap();
        (db, dir)
    }

    #[tokio::test]
    async fn put_and_get_record_round_trips() {
        let (db, _dir) = setup_db().await;

        put_record(&db, "session:c1", r#"{"owner":"bot"}"#, "2026-01-01T00:00:00Z")
            .await
            .unwrap();
        let record = get_record(&db, "session:c1").await.unwrap();
        assert_eq!(record.as_deref(), Some(r#"{"owner":"bot"}"#));

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn get_missing_key_returns_none() {
        let (db, _dir) = setup_db().await;
        let record = get_record(&db, "session:unknown").await.unwrap();
        assert!(record.is_none());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn put_replaces_existing_record() {
        let (db, _dir) = setup_db().await;

        put_record(&db, "session:c2", r#"{"owner":"bot"}"#, "2026-01-01T00:00:00Z")
            .await
            .unwrap();
        put_record(&db, "session:c2", r#"{"owner":"human"}"#, "2026-01-01T00:01:00Z")
            .await
            .unwrap();

        let record = get_record(&db, "session:c2").await.unwrap();
        assert_eq!(record.as_deref(), Some(r#"{"owner":"human"}"#));
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn records_for_distinct_keys_are_independent() {
        let (db, _dir) = setup_db().await;

        put_record(&db, "session:a", "1", "t").await.unwrap();
        put_record(&db, "session:b", "2", "t").await.unwrap();

        assert_eq!(get_record(&db, "session:a").await.unwrap().as_deref(), Some("1"));
        assert_eq!(get_record(&db, "session:b").await.unwrap().as_deref(), Some("2"));
        db.close().await.unwrap();
    }
}
