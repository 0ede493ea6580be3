//! Name resolution: lookup, sanitize, truncate, and collision suffixes.
//!
//! Length policy: `max_length` counts characters of the base name only; the extension is
//! appended unchanged. For suffixed candidates the base is shortened so that
//! `base + "~n"` still fits, which keeps truncated names distinct from each other once
//! suffixed. A limit shorter than the suffix itself leaves an empty base, so the candidate
//! is the suffix alone and is longer than the limit.

use anyhow::Result;
use std::path::Path;
use tracing::debug;

use super::EntryKind;
use crate::store::NameStore;

/// Characters stripped from every resolved name.
pub const DISALLOWED_CHARS: &[char] = &['/', ':', '\'', '?', '\r', '\n'];
/// Separator between a base name and its collision counter.
pub const SUFFIX_SEPARATOR: char = '~';

/// Remove every disallowed character and nothing else.
pub fn sanitize_name(input: &str) -> String {
    input
        .chars()
        .filter(|c| !DISALLOWED_CHARS.contains(c))
        .collect()
}

/// Keep at most `max_chars` characters (never splits a UTF-8 sequence).
pub fn truncate_name(input: &str, max_chars: usize) -> &str {
    match input.char_indices().nth(max_chars) {
        Some((idx, _)) => &input[..idx],
        None => input,
    }
}

/// Numeric node identifier encoded in a name, if any. Surrounding whitespace is tolerated.
pub fn parse_node_id(name: &str) -> Option<i64> {
    name.trim().parse::<i64>().ok()
}

/// Split a file name into stem and extension (extension without the dot).
fn split_extension(name: &str) -> (&str, Option<&str>) {
    let p = Path::new(name);
    match (
        p.file_stem().and_then(|s| s.to_str()),
        p.extension().and_then(|e| e.to_str()),
    ) {
        (Some(stem), Some(ext)) => (stem, Some(ext)),
        _ => (name, None),
    }
}

/// A cleaned base name ready to produce candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedName {
    base: String,
    extension: Option<String>,
    max_length: usize,
}

impl ResolvedName {
    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }

    /// Candidate name for a collision attempt: `base[~n][.ext]`.
    pub fn candidate(&self, attempt: u32) -> String {
        let mut name = if attempt == 0 {
            self.base.clone()
        } else {
            let suffix = format!("{SUFFIX_SEPARATOR}{attempt}");
            let budget = self.max_length.saturating_sub(suffix.chars().count());
            let mut s = truncate_name(&self.base, budget).to_string();
            s.push_str(&suffix);
            s
        };
        if let Some(ext) = &self.extension {
            name.push('.');
            name.push_str(ext);
        }
        name
    }
}

/// Turns entry names into resolved names using a naming store.
pub struct NameResolver<'a, S: NameStore + ?Sized> {
    store: &'a S,
    max_length: usize,
}

impl<'a, S: NameStore + ?Sized> NameResolver<'a, S> {
    pub fn new(store: &'a S, max_length: usize) -> Self {
        Self { store, max_length }
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Resolve an entry name.
    ///
    /// Integer stems are looked up; a hit replaces the stem, a miss keeps it. Returns
    /// Ok(None) when neither the stored nor the original name survives cleaning.
    pub fn resolve(&self, name: &str, kind: EntryKind) -> Result<Option<ResolvedName>> {
        let (stem, extension) = match kind {
            EntryKind::File => split_extension(name),
            EntryKind::Directory => (name, None),
        };

        let stored = match parse_node_id(stem) {
            Some(id) => self.store.lookup(id)?,
            None => None,
        };

        let from_store = stored.as_deref().and_then(|n| self.clean(n));
        if stored.is_some() && from_store.is_none() {
            debug!(name, stored = ?stored, "Stored name is empty after cleaning; using original");
        }

        Ok(from_store
            .or_else(|| self.clean(stem))
            .map(|base| ResolvedName {
                base,
                extension: extension.map(str::to_string),
                max_length: self.max_length,
            }))
    }

    fn clean(&self, raw: &str) -> Option<String> {
        let sanitized = sanitize_name(raw);
        let base = truncate_name(&sanitized, self.max_length);
        match base {
            "" | "." | ".." => None,
            ok => Some(ok.to_string()),
        }
    }
}
