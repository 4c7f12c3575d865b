//! Read-only view of a source catalogue record.
//!
//! Field generation needs a handful of record-level facts beyond the name
//! and title strings themselves: the record identifier (for override
//! lookups), the form/medium tokens, the title-language tags, and whether a
//! given tree path exists at all (relator prefilters ask this). The
//! [`RecordView`] trait captures exactly that surface so the generation code
//! never depends on any one storage layout.
//!
//! [`PathTree`] is the bundled implementation: an insertion-ordered
//! path→values multimap that callers populate from whatever their upstream
//! store holds.
//!
//! # Examples
//!
//! ```ignore
//! use marcgen::record_view::{PathTree, RecordView};
//!
//! let mut record = PathTree::new();
//! record.push("id", "B45123");
//! record.push("fo", "mfiche");
//! record.push("fo", "el");
//! record.push("tl", "eng");
//!
//! assert!(record.has("fo"));
//! assert_eq!(record.value("id"), Some("B45123"));
//! assert_eq!(record.values("fo"), &["mfiche", "el"]);
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Read access to the record facts field generation consults.
///
/// Paths are short lowercase node names from the legacy record tree
/// (`"id"`, `"fo"`, `"tl"`, ...). A path is "present" when it holds at
/// least one non-empty value.
pub trait RecordView {
    /// First value at `path`, if any.
    fn value(&self, path: &str) -> Option<&str>;

    /// Value at `path` and position `index`, if any.
    fn value_at(&self, path: &str, index: usize) -> Option<&str>;

    /// All values at `path`, in insertion order. Empty when absent.
    fn values(&self, path: &str) -> &[String];

    /// Whether `path` holds at least one non-empty value.
    fn has(&self, path: &str) -> bool {
        self.values(path).iter().any(|v| !v.is_empty())
    }
}

/// Insertion-ordered path→values store implementing [`RecordView`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathTree {
    nodes: IndexMap<String, Vec<String>>,
}

impl PathTree {
    /// Create an empty tree.
    #[must_use]
    pub fn new() -> Self {
        PathTree { nodes: IndexMap::new() }
    }

    /// Append a value under `path`, preserving insertion order.
    pub fn push(&mut self, path: impl Into<String>, value: impl Into<String>) {
        self.nodes.entry(path.into()).or_default().push(value.into());
    }

    /// Number of distinct paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree has no paths at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate over `(path, values)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.nodes.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

impl RecordView for PathTree {
    fn value(&self, path: &str) -> Option<&str> {
        self.nodes.get(path).and_then(|v| v.first()).map(String::as_str)
    }

    fn value_at(&self, path: &str, index: usize) -> Option<&str> {
        self.nodes.get(path).and_then(|v| v.get(index)).map(String::as_str)
    }

    fn values(&self, path: &str) -> &[String] {
        self.nodes.get(path).map(Vec::as_slice).unwrap_or(&[])
    }
}
