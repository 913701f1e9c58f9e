//! Sequencer: order collected captures by the number after `Page_`.
//!
//! The key is the leading ASCII digit run of a case-insensitive
//! `^Page_([0-9]+)` match. Other Unicode digits do not count, so a name like
//! `Page_١٢.png` is unnumbered. Names without an index sort as
//! [`UNNUMBERED_KEY`], which is larger than any realistic page index, so they
//! cluster at the end. The sort is stable: equal keys (including every
//! unnumbered name) keep discovery order.
//!
//! Indices are compared as arbitrary-precision decimals, so digit runs longer
//! than a `u64` still order correctly.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::path::{Path, PathBuf};

/// Sort key given to names without a parseable page index.
pub const UNNUMBERED_KEY: u64 = 1_000_000_000;

static PAGE_INDEX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^Page_([0-9]+)").unwrap());

/// A non-negative decimal page index of any length.
///
/// Stored as ASCII digits without leading zeros (`"0"` for zero). Ordering
/// is numeric: shorter digit strings are smaller, equal lengths compare
/// lexically.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageIndex {
    digits: String,
}

impl PageIndex {
    /// Parse a run of ASCII digits. `None` if `digits` is empty or holds
    /// anything else.
    pub fn parse(digits: &str) -> Option<Self> {
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let trimmed = digits.trim_start_matches('0');
        let digits = if trimmed.is_empty() { "0" } else { trimmed };
        Some(Self {
            digits: digits.to_string(),
        })
    }

    /// The key shared by every unnumbered name.
    pub fn unnumbered() -> Self {
        Self::from(UNNUMBERED_KEY)
    }

    /// The index as a `u64`, if it fits.
    pub fn as_u64(&self) -> Option<u64> {
        self.digits.parse().ok()
    }

    pub fn digits(&self) -> &str {
        &self.digits
    }
}

impl From<u64> for PageIndex {
    fn from(n: u64) -> Self {
        Self {
            digits: n.to_string(),
        }
    }
}

impl Ord for PageIndex {
    fn cmp(&self, other: &Self) -> Ordering {
        self.digits
            .len()
            .cmp(&other.digits.len())
            .then_with(|| self.digits.cmp(&other.digits))
    }
}

impl PartialOrd for PageIndex {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for PageIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.digits)
    }
}

/// A JSON number when it fits in a `u64`, a digit string otherwise.
impl Serialize for PageIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_u64() {
            Some(n) => serializer.serialize_u64(n),
            None => serializer.serialize_str(&self.digits),
        }
    }
}

/// Parse the page index at the start of `file_name`.
///
/// Returns `None` when the name does not start with `Page_<digits>`.
pub fn page_index(file_name: &str) -> Option<PageIndex> {
    let caps = PAGE_INDEX_RE.captures(file_name)?;
    PageIndex::parse(caps.get(1)?.as_str())
}

/// One collected capture and its parsed index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageEntry {
    pub file_name: String,
    pub page_index: Option<PageIndex>,
}

impl PageEntry {
    pub fn new(file_name: impl Into<String>) -> Self {
        let file_name = file_name.into();
        let page_index = page_index(&file_name);
        Self {
            file_name,
            page_index,
        }
    }

    /// Key used for ordering: the page index, or [`UNNUMBERED_KEY`].
    pub fn sort_key(&self) -> PageIndex {
        self.page_index.clone().unwrap_or_else(PageIndex::unnumbered)
    }
}

/// Captures of one folder, in page order.
#[derive(Debug, Clone, Serialize)]
pub struct PageSequence {
    folder: PathBuf,
    entries: Vec<PageEntry>,
}

impl PageSequence {
    /// Order `file_names` (in discovery order) into a page sequence.
    pub fn new(folder: impl Into<PathBuf>, file_names: Vec<String>) -> Self {
        let entries = sequence(file_names.into_iter().map(PageEntry::new).collect());
        Self {
            folder: folder.into(),
            entries,
        }
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    pub fn entries(&self) -> &[PageEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Full path of every capture, in page order.
    pub fn paths(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.entries.iter().map(|e| self.folder.join(&e.file_name))
    }

    /// File names in page order.
    pub fn file_names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.file_name.as_str()).collect()
    }
}

/// Stable-sort entries by [`PageEntry::sort_key`].
pub fn sequence(mut entries: Vec<PageEntry>) -> Vec<PageEntry> {
    entries.sort_by_cached_key(PageEntry::sort_key);
    entries
}
