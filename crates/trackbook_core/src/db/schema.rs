//! Key/value schema installer.
//!
//! The store keeps a single table, so the schema is installed in one step
//! and stamped into `PRAGMA user_version`. A database stamped with a newer
//! version belongs to a newer binary and is left untouched.

use crate::db::{DbError, DbResult};
use rusqlite::Connection;

/// Schema version written by this binary.
pub const SCHEMA_VERSION: u32 = 1;

const KV_ENTRIES_SQL: &str = include_str!("kv_entries.sql");

/// Installs the `kv_entries` table on a fresh database.
///
/// Already-installed databases are accepted as they are.
pub fn install_schema(conn: &mut Connection) -> DbResult<()> {
    match schema_version(conn)? {
        SCHEMA_VERSION => Ok(()),
        0 => {
            let tx = conn.transaction()?;
            tx.execute_batch(KV_ENTRIES_SQL)?;
            tx.pragma_update(None, "user_version", SCHEMA_VERSION)?;
            tx.commit()?;
            Ok(())
        }
        db_version => Err(DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported: SCHEMA_VERSION,
        }),
    }
}

/// Reads the schema version stamped on the connection.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}

/// Rejects connections that were not bootstrapped through `open_db*`.
pub fn ensure_installed(conn: &Connection) -> DbResult<()> {
    let actual_version = schema_version(conn)?;
    if actual_version != SCHEMA_VERSION {
        return Err(DbError::UninitializedConnection {
            expected_version: SCHEMA_VERSION,
            actual_version,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{ensure_installed, install_schema, schema_version, SCHEMA_VERSION};
    use rusqlite::Connection;

    #[test]
    fn install_is_repeatable() {
        let mut conn = Connection::open_in_memory().unwrap();
        install_schema(&mut conn).unwrap();
        install_schema(&mut conn).unwrap();
        assert_eq!(schema_version(&conn).unwrap(), SCHEMA_VERSION);
        ensure_installed(&conn).unwrap();
    }

    #[test]
    fn raw_connection_is_not_installed() {
        let conn = Connection::open_in_memory().unwrap();
        assert!(ensure_installed(&conn).is_err());
    }
}
