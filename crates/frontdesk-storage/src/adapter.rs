// SPDX-FileCopyrightText: 2026 Frontdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the SessionStore trait.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use frontdesk_config::model::StorageConfig;
use frontdesk_core::types::{AdapterType, HealthStatus, Session};
use frontdesk_core::{FrontdeskError, PluginAdapter, SessionStore};

use crate::database::Database;
use crate::sessions;

/// Fixed namespace prefix for persisted session keys.
pub const SESSION_KEY_PREFIX: &str = "session:";

/// Build the namespaced storage key for a conversation.
pub fn session_key(conversation_id: &str) -> String {
    format!("{SESSION_KEY_PREFIX}{conversation_id}")
}

/// SQLite-backed session store.
///
/// Wraps a [`Database`] handle; session records are stored as JSON under the
/// `session:` key prefix. The database is lazily opened on the first call to
/// [`SessionStore::initialize`]. Writes for different conversations are
/// serialized by SQLite's single writer, which is well below the webhook
/// event rate this service sees; a networked KV backend can replace this
/// behind the same trait.
pub struct SqliteSessionStore {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteSessionStore {
    /// Create a new store with the given configuration.
    ///
    /// The database connection is not opened until `initialize` is called.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Returns the underlying Database, or an error if not initialized.
    fn db(&self) -> Result<&Database, FrontdeskError> {
        self.db.get().ok_or_else(|| FrontdeskError::Storage {
            source: "store not initialized -- call initialize() first".into(),
        })
    }
}

#[async_trait]
impl PluginAdapter for SqliteSessionStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Store
    }

    async fn health_check(&self) -> Result<HealthStatus, FrontdeskError> {
        let db = self.db()?;
        db.connection()
            .call(|conn| {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), FrontdeskError> {
        if let Some(db) = self.db.get() {
            db.close().await?;
            debug!("shutdown: WAL checkpoint complete");
        }
        Ok(())
    }
}

#[async_trait]
impl SessionStore for SqliteSessionStore {
    async fn initialize(&self) -> Result<(), FrontdeskError> {
        let db = Database::open(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| FrontdeskError::Storage {
            source: "store already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite session store initialized");
        Ok(())
    }

    async fn close(&self) -> Result<(), FrontdeskError> {
        self.db()?.close().await
    }

    async fn get(&self, conversation_id: &str) -> Result<Option<Session>, FrontdeskError> {
        let key = session_key(conversation_id);
        let record = sessions::get_record(self.db()?, &key).await?;
        match record {
            None => Ok(None),
            Some(json) => {
                let session: Session =
                    serde_json::from_str(&json).map_err(|e| FrontdeskError::Storage {
                        source: Box::new(e),
                    })?;
                Ok(Some(session))
            }
        }
    }

    async fn put(&self, session: &Session) -> Result<(), FrontdeskError> {
        let key = session_key(&session.conversation_id);
        let json = serde_json::to_string(session).map_err(|e| FrontdeskError::Storage {
            source: Box::new(e),
        })?;
        sessions::put_record(self.db()?, &key, &json, &session.updated_at).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use frontdesk_core::types::Owner;
    use tempfile::tempdir;

    fn make_config(path: &str) -> StorageConfig {
        StorageConfig {
            database_path: path.to_string(),
            wal_mode: true,
        }
    }

    async fn open_store(dir: &tempfile::TempDir, name: &str) -> SqliteSessionStore {
        let db_path = dir.path().join(name);
        let store = SqliteSessionStore::new(make_config(db_path.to_str().unwrap()));
        store.initialize().await.unwrap();
        store
    }

    #[test]
    fn session_key_uses_fixed_prefix() {
        assert_eq!(session_key("abc"), "session:abc");
    }

    #[tokio::test]
    async fn store_implements_plugin_adapter() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir, "meta.db").await;
        assert_eq!(store.name(), "sqlite");
        assert_eq!(store.version(), semver::Version::new(0, 1, 0));
        assert_eq!(store.adapter_type(), AdapterType::Store);
    }

    #[tokio::test]
    async fn initialize_twice_returns_error() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir, "double.db").await;
        assert!(store.initialize().await.is_err());
    }

    #[tokio::test]
    async fn operations_fail_before_initialize() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("uninit.db");
        let store = SqliteSessionStore::new(make_config(db_path.to_str().unwrap()));

        assert!(store.get("c1").await.is_err());
        assert!(store.health_check().await.is_err());
    }

    #[tokio::test]
    async fn health_check_healthy_when_initialized() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir, "health.db").await;
        assert_eq!(store.health_check().await.unwrap(), HealthStatus::Healthy);
    }

    #[tokio::test]
    async fn get_unseen_conversation_returns_none() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir, "miss.db").await;
        assert!(store.get("never-seen").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn put_then_get_round_trips_identically() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir, "roundtrip.db").await;

        let mut session = Session::new("chat-42");
        session.owner = Owner::Human;
        session.pending_transfer = true;

        store.put(&session).await.unwrap();
        let loaded = store.get("chat-42").await.unwrap().unwrap();
        assert_eq!(loaded, session);
    }

    #[tokio::test]
    async fn put_overwrites_previous_record() {
        let dir = tempdir().unwrap();
        let store = open_store(&dir, "overwrite.db").await;

        let mut session = Session::new("chat-ow");
        store.put(&session).await.unwrap();

        session.owner = Owner::Human;
        session.touch();
        store.put(&session).await.unwrap();

        let loaded = store.get("chat-ow").await.unwrap().unwrap();
        assert_eq!(loaded.owner, Owner::Human);
    }

    #[tokio::test]
    async fn records_survive_reopen() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("durable.db");
        let path = db_path.to_str().unwrap().to_string();

        {
            let store = SqliteSessionStore::new(make_config(&path));
            store.initialize().await.unwrap();
            store.put(&Session::new("chat-durable")).await.unwrap();
            store.shutdown().await.unwrap();
        }

        let store = SqliteSessionStore::new(make_config(&path));
        store.initialize().await.unwrap();
        let loaded = store.get("chat-durable").await.unwrap();
        assert!(loaded.is_some());
    }

    #[tokio::test]
    async fn concurrent_puts_for_distinct_conversations() {
        let dir = tempdir().unwrap();
        let store = std::sync::Arc::new(open_store(&dir, "concurrent.db").await);

        let mut handles = Vec::new();
        for i in 0..10 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.put(&Session::new(format!("chat-{i}"))).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        for i in 0..10 {
            let loaded = store.get(&format!("chat-{i}")).await.unwrap();
            assert!(loaded.is_some(), "chat-{i} should have a record");
        }
    }
}
