//! SQLite-backed key/value store.
//!
//! # Invariants
//! - The wrapped connection must carry the installed schema (`open_db*`).
//! - `list` returns keys in rowid order, i.e. first-insert order.

use super::{DeleteReceipt, KeyListing, KeyValueStore, StoreResult, StoredValue};
use crate::db::schema::ensure_installed;
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};

/// Key/value store persisted in the `kv_entries` table.
pub struct SqliteStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStore<'conn> {
    /// Wraps a connection that was bootstrapped through `open_db*`.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        ensure_installed(conn)?;
        Ok(Self { conn })
    }
}

impl KeyValueStore for SqliteStore<'_> {
    fn get(&self, key: &str) -> StoreResult<Option<StoredValue>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value.map(|value| StoredValue::private(key, value)))
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<StoredValue> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(StoredValue::private(key, value))
    }

    fn delete(&self, key: &str) -> StoreResult<DeleteReceipt> {
        let changed = self
            .conn
            .execute("DELETE FROM kv_entries WHERE key = ?1;", [key])?;
        if changed == 0 {
            debug!("event=kv_delete module=store status=ok existed=false");
        }
        Ok(DeleteReceipt::for_key(key))
    }

    fn list(&self, prefix: &str) -> StoreResult<KeyListing> {
        // substr comparison avoids LIKE wildcard escaping for `_` and `%`.
        let mut stmt = self.conn.prepare(
            "SELECT key FROM kv_entries
             WHERE substr(key, 1, length(?1)) = ?1
             ORDER BY rowid ASC;",
        )?;
        let mut rows = stmt.query([prefix])?;
        let mut keys = Vec::new();
        while let Some(row) = rows.next()? {
            keys.push(row.get::<_, String>(0)?);
        }
        Ok(KeyListing {
            keys,
            prefix: prefix.to_string(),
            shared: false,
        })
    }
}
