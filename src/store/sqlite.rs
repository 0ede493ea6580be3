//! SQLite-backed naming store.
//! One read-only connection per pass; the lookup query is prepared at open time so a
//! missing table or a malformed query fails before anything is renamed.

use anyhow::{Context, Result, bail};
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags, OptionalExtension};
use tracing::{debug, trace};

use super::NameStore;
use crate::errors::RenamerError;

/// Keys accepted as the database location in `Key=Value;...` connection strings.
const SOURCE_KEYS: &[&str] = &["data source", "datasource", "filename"];
/// Keys that only make sense for server databases.
const SERVER_KEYS: &[&str] = &["server", "host", "address", "initial catalog"];

/// Extract the SQLite location from a connection string.
///
/// Accepts a plain path, a `file:` URI, or `Data Source=<path>;...`.
pub fn parse_connection_string(raw: &str) -> Result<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        bail!(RenamerError::InvalidConfig("connection string is empty".into()));
    }
    if raw.starts_with("file:") || !raw.contains('=') {
        return Ok(raw.to_string());
    }

    let mut source = None;
    let mut saw_pair = false;
    for part in raw.split(';').map(str::trim).filter(|p| !p.is_empty()) {
        let Some((key, value)) = part.split_once('=') else {
            continue;
        };
        saw_pair = true;
        let key = key.trim().to_ascii_lowercase();
        if SERVER_KEYS.contains(&key.as_str()) {
            bail!(RenamerError::InvalidConfig(format!(
                "connection string names a database server ('{key}'); only SQLite files are supported"
            )));
        }
        if SOURCE_KEYS.contains(&key.as_str()) {
            source = Some(value.trim().to_string());
        }
    }

    match source {
        Some(s) if !s.is_empty() => Ok(s),
        // A bare path that happens to contain '='.
        None if !saw_pair || !raw.contains(';') => Ok(raw.to_string()),
        _ => bail!(RenamerError::InvalidConfig(
            "connection string has no 'Data Source'".into()
        )),
    }
}

/// Naming store reading from a SQLite database.
pub struct SqliteStore {
    conn: Connection,
    query: String,
}

impl SqliteStore {
    /// Open the database read-only and prepare `query`.
    pub fn open(connection_string: &str, query: &str) -> Result<Self> {
        let location = parse_connection_string(connection_string)?;
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(&location, flags)
            .map_err(RenamerError::from)
            .with_context(|| format!("open naming store '{location}'"))?;
        debug!(location = %location, "Opened naming store");
        Self::from_connection(conn, query)
    }

    /// Wrap an existing connection; `query` must take exactly one parameter.
    pub fn from_connection(conn: Connection, query: &str) -> Result<Self> {
        {
            let stmt = conn
                .prepare_cached(query)
                .map_err(RenamerError::from)
                .with_context(|| format!("prepare lookup query '{query}'"))?;
            if stmt.parameter_count() != 1 {
                bail!(RenamerError::InvalidConfig(format!(
                    "lookup query must take exactly one parameter, found {}",
                    stmt.parameter_count()
                )));
            }
            if stmt.column_count() < 1 {
                bail!(RenamerError::InvalidConfig(
                    "lookup query must return a name column".into()
                ));
            }
        }
        Ok(Self {
            conn,
            query: query.to_string(),
        })
    }
}

impl NameStore for SqliteStore {
    fn lookup(&self, id: i64) -> Result<Option<String>> {
        let mut stmt = self
            .conn
            .prepare_cached(&self.query)
            .map_err(RenamerError::from)?;
        let name = stmt
            .query_row([id], |row| {
                Ok(match row.get_ref(0)? {
                    ValueRef::Text(t) => Some(String::from_utf8_lossy(t).into_owned()),
                    ValueRef::Integer(i) => Some(i.to_string()),
                    ValueRef::Real(f) => Some(f.to_string()),
                    ValueRef::Null | ValueRef::Blob(_) => None,
                })
            })
            .optional()
            .map_err(RenamerError::from)?
            .flatten();
        trace!(id, found = name.is_some(), "naming store lookup");
        Ok(name)
    }
}
