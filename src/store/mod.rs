//! Naming store: resolves a numeric node identifier to a display name.
//!
//! The walker only depends on the `NameStore` capability, so passes can run against
//! the SQLite-backed store in production and an in-memory map in tests.

mod sqlite;

pub use sqlite::{SqliteStore, parse_connection_string};

use anyhow::Result;
use std::cell::Cell;
use std::collections::HashMap;

/// Resolve an identifier to a name.
pub trait NameStore {
    /// Ok(None) means "no entry"; Err means the store itself failed.
    fn lookup(&self, id: i64) -> Result<Option<String>>;
}

impl<T: NameStore + ?Sized> NameStore for &T {
    fn lookup(&self, id: i64) -> Result<Option<String>> {
        (**self).lookup(id)
    }
}

/// HashMap-backed store. Counts lookups so callers can assert which names hit the store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    names: HashMap<i64, String>,
    lookups: Cell<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: i64, name: impl Into<String>) -> &mut Self {
        self.names.insert(id, name.into());
        self
    }

    /// Number of lookups served so far.
    pub fn lookup_count(&self) -> usize {
        self.lookups.get()
    }
}

impl<S: Into<String>> FromIterator<(i64, S)> for MemoryStore {
    fn from_iter<I: IntoIterator<Item = (i64, S)>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(|(id, n)| (id, n.into())).collect(),
            lookups: Cell::new(0),
        }
    }
}

impl NameStore for MemoryStore {
    fn lookup(&self, id: i64) -> Result<Option<String>> {
        self.lookups.set(self.lookups.get() + 1);
        Ok(self.names.get(&id).cloned())
    }
}
