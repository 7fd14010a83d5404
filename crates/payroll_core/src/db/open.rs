//! Store handle: one-time bootstrap plus per-call connections.
//!
//! # Responsibility
//! - Open the configured SQLite file and apply the schema.
//! - Configure pragmas required by core behavior on every connection.
//!
//! # Invariants
//! - `Store::open` is the only path that may create the database file.
//! - `Store::connect` never creates a file; a vanished database surfaces as
//!   a connection failure instead of a silently empty store.

use super::schema::{apply_schema, table_exists, REQUIRED_TABLES};
use super::{DbError, DbResult};
use crate::config::StoreConfig;
use log::{debug, error, info};
use rusqlite::{Connection, OpenFlags};
use std::time::Instant;

/// Handle to a bootstrapped payroll database.
///
/// Cheap to clone; holds configuration only, never an open connection.
#[derive(Debug, Clone)]
pub struct Store {
    config: StoreConfig,
}

impl Store {
    /// Opens the configured database file and applies the schema.
    ///
    /// # Side effects
    /// - Creates the database file when it does not exist.
    /// - Emits `db_open` logging events with duration and status.
    pub fn open(config: StoreConfig) -> DbResult<Self> {
        let started_at = Instant::now();
        info!("event=db_open module=db status=start");

        let mut conn = match Connection::open(&config.db_path) {
            Ok(conn) => conn,
            Err(err) => {
                error!(
                    "event=db_open module=db status=error duration_ms={} error_code=db_open_failed error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                return Err(err.into());
            }
        };

        match bootstrap_connection(&mut conn, &config) {
            Ok(()) => {
                info!(
                    "event=db_open module=db status=ok duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(Self { config })
            }
            Err(err) => {
                error!(
                    "event=db_open module=db status=error duration_ms={} error_code=db_bootstrap_failed error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Returns the configuration this store was opened with.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Opens a new connection for exactly one repository operation.
    ///
    /// The caller owns the connection; dropping it releases the handle.
    pub fn connect(&self) -> DbResult<Connection> {
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(&self.config.db_path, flags).map_err(|err| {
            debug!("event=db_connect module=db status=error error={err}");
            DbError::from(err)
        })?;
        configure_connection(&conn, &self.config)?;
        Ok(conn)
    }
}

fn configure_connection(conn: &Connection, config: &StoreConfig) -> DbResult<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(config.busy_timeout)?;
    Ok(())
}

fn bootstrap_connection(conn: &mut Connection, config: &StoreConfig) -> DbResult<()> {
    configure_connection(conn, config)?;
    apply_schema(conn)?;
    for table in REQUIRED_TABLES {
        if !table_exists(conn, table)? {
            return Err(DbError::MissingRequiredTable(table));
        }
    }
    Ok(())
}
