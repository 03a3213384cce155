use super::TokenStore;
use crate::{Error, Result};
use async_trait::async_trait;
use libsql::{Builder, Connection};
use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
};
use tracing::{debug, info, warn};

/// Key/value storage that survives restarts, keyed like browser local storage.
pub struct SessionStorage {
    conn: Option<Connection>,
    // In-memory fallback storage
    fallback: Arc<Mutex<HashMap<String, String>>>,
    // Set once a write misses the database; the fallback then owns every key.
    degraded: AtomicBool,
    token_key: String,
}

impl SessionStorage {
    pub async fn new(db_path: &str, token_key: impl Into<String>) -> Result<Self> {
        let mut storage = Self {
            conn: None,
            fallback: Arc::new(Mutex::new(HashMap::new())),
            degraded: AtomicBool::new(false),
            token_key: token_key.into(),
        };

        match storage.init_database(db_path).await {
            Ok(()) => {
                info!("Session storage initialized: {}", db_path);
            }
            Err(e) => {
                warn!(
                    "Session storage initialization failed, using in-memory fallback: {}",
                    e
                );
            }
        }

        Ok(storage)
    }

    async fn init_database(&mut self, db_path: &str) -> Result<()> {
        let db = Builder::new_local(db_path).build().await?;

        // One connection for the lifetime of the store keeps `:memory:` databases alive.
        let conn = db.connect()?;
        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS storage (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )
            "#,
            (),
        )
        .await?;

        self.conn = Some(conn);
        Ok(())
    }

    pub fn is_persistent(&self) -> bool {
        self.active_conn().is_some()
    }

    /// The database connection, unless the store has fallen back to memory.
    fn active_conn(&self) -> Option<&Connection> {
        if self.degraded.load(Ordering::Acquire) {
            return None;
        }
        self.conn.as_ref()
    }

    /// Copies every row into the in-memory map. The database is not read or
    /// written again by this store.
    async fn degrade(&self) -> Result<()> {
        let copied = match self.conn {
            Some(ref conn) => Self::dump_db(conn).await.unwrap_or_else(|e| {
                warn!("Could not copy session storage into fallback: {}", e);
                Vec::new()
            }),
            None => Vec::new(),
        };

        let mut fallback = self.lock_fallback()?;
        for (key, value) in copied {
            fallback.entry(key).or_insert(value);
        }
        self.degraded.store(true, Ordering::Release);
        Ok(())
    }

    pub async fn get_item(&self, key: &str) -> Result<Option<String>> {
        if let Some(conn) = self.active_conn() {
            match Self::get_from_db(conn, key).await {
                Ok(value) => return Ok(value),
                Err(e) => {
                    warn!("Failed to read from session storage, using fallback: {}", e);
                }
            }
        }

        let fallback = self.lock_fallback()?;
        Ok(fallback.get(key).cloned())
    }

    pub async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        if let Some(conn) = self.active_conn() {
            match Self::set_in_db(conn, key, value).await {
                Ok(()) => {
                    debug!("Stored item under key: {}", key);
                    return Ok(());
                }
                Err(e) => {
                    warn!("Failed to write to session storage, using fallback: {}", e);
                    self.degrade().await?;
                }
            }
        }

        let mut fallback = self.lock_fallback()?;
        fallback.insert(key.to_string(), value.to_string());
        Ok(())
    }

    pub async fn remove_item(&self, key: &str) -> Result<()> {
        match self.active_conn() {
            Some(conn) => {
                conn.execute("DELETE FROM storage WHERE key = ?1", [key])
                    .await?;
                debug!("Removed item under key: {}", key);
            }
            None => {
                self.lock_fallback()?.remove(key);
            }
        }
        Ok(())
    }

    async fn get_from_db(conn: &Connection, key: &str) -> Result<Option<String>> {
        let mut rows = conn
            .query("SELECT value FROM storage WHERE key = ?1", [key])
            .await?;

        match rows.next().await? {
            Some(row) => Ok(Some(row.get::<String>(0)?)),
            None => Ok(None),
        }
    }

    async fn dump_db(conn: &Connection) -> Result<Vec<(String, String)>> {
        let mut rows = conn.query("SELECT key, value FROM storage", ()).await?;

        let mut items = Vec::new();
        while let Some(row) = rows.next().await? {
            items.push((row.get::<String>(0)?, row.get::<String>(1)?));
        }
        Ok(items)
    }

    async fn set_in_db(conn: &Connection, key: &str, value: &str) -> Result<()> {
        conn.execute(
            "INSERT INTO storage (key, value) VALUES (?1, ?2) \
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            [key, value],
        )
        .await?;
        Ok(())
    }

    fn lock_fallback(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>> {
        self.fallback
            .lock()
            .map_err(|e| Error::internal(format!("Mutex lock failed: {e}")))
    }
}

#[async_trait]
impl TokenStore for SessionStorage {
    async fn get_token(&self) -> Result<Option<String>> {
        self.get_item(&self.token_key).await
    }

    async fn set_token(&self, token: &str) -> Result<()> {
        self.set_item(&self.token_key, token).await
    }

    async fn clear_token(&self) -> Result<()> {
        self.remove_item(&self.token_key).await
    }
}
