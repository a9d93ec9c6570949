//! Interned string storage shared with the detection engine.
//!
//! Detection results never carry text directly; every property name and
//! value is an index into a string table owned by the engine. The enhancer
//! only needs the narrow [`StringTable`] contract, and [`InternTable`] is the
//! in-memory implementation used by records, fixtures, and tests.

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Index of an interned string.
///
/// Handles are only meaningful for the table that issued them; comparing
/// handles from two different tables is a logic error the type cannot catch.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StringHandle(pub u32);

impl fmt::Display for StringHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Contract consumed from the detection engine's string table.
pub trait StringTable {
    /// Returns the handle for `text`, adding it when unknown.
    ///
    /// Must be idempotent: interning the same text twice yields the same
    /// handle.
    fn intern(&mut self, text: &str) -> Result<StringHandle>;

    /// Resolves a handle back to its text, or `None` for foreign handles.
    fn resolve(&self, handle: StringHandle) -> Option<&str>;

    /// Looks up an existing handle without adding anything.
    fn find(&self, text: &str) -> Option<StringHandle>;
}

/// Deduplicating in-memory string table.
///
/// Once [`InternTable::freeze`] is called the table rejects new strings while
/// still answering for strings it already holds, which is the
/// read-after-construction guarantee concurrent readers rely on.
#[derive(Clone, Debug, Default)]
pub struct InternTable {
    values: Vec<String>,
    by_text: HashMap<String, StringHandle>,
    frozen: bool,
    limit: Option<usize>,
}

impl InternTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table that refuses to grow beyond `limit` entries.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// Stop accepting new strings.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl StringTable for InternTable {
    fn intern(&mut self, text: &str) -> Result<StringHandle> {
        if let Some(handle) = self.by_text.get(text) {
            return Ok(*handle);
        }
        if self.frozen {
            bail!("string table is frozen; cannot add '{text}'");
        }
        if let Some(limit) = self.limit {
            if self.values.len() >= limit {
                bail!("string table is full ({limit} entries); cannot add '{text}'");
            }
        }
        let Ok(raw) = u32::try_from(self.values.len()) else {
            bail!("string table handle space exhausted");
        };
        let handle = StringHandle(raw);
        self.values.push(text.to_string());
        self.by_text.insert(text.to_string(), handle);
        Ok(handle)
    }

    fn resolve(&self, handle: StringHandle) -> Option<&str> {
        self.values.get(handle.0 as usize).map(String::as_str)
    }

    fn find(&self, text: &str) -> Option<StringHandle> {
        self.by_text.get(text).copied()
    }
}
