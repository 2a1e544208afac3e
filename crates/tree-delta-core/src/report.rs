//! The diff report entities consumed by rendering and filtering.
//!
//! A [`Report`] is an ordered list of [`Diff`]s between a "from" and a
//! "to" document set. Diff order is discovery order and is preserved by
//! every operation in this crate; nothing re-sorts it.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use tree_delta_node::Node;
use tree_delta_path::Path;

/// A detail kind tag outside the supported set.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unsupported detail kind {0:?}")]
pub struct UnsupportedKindError(pub String);

/// The kind of one typed change at a diff location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetailKind {
    /// A value exists only on the "to" side.
    Addition,
    /// A value exists only on the "from" side.
    Removal,
    /// Both sides exist with differing values (types may differ too).
    Modification,
    /// A sequence holds the same elements in a different order.
    OrderChange,
}

impl DetailKind {
    /// Wire tag used in rendered reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            DetailKind::Addition => "+",
            DetailKind::Removal => "-",
            DetailKind::Modification => "~",
            DetailKind::OrderChange => "->",
        }
    }
}

impl fmt::Display for DetailKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DetailKind {
    type Err = UnsupportedKindError;

    /// Guard for externally-supplied tags. Within this crate the kind is
    /// a closed enum and render dispatch is exhaustive; foreign tags are
    /// rejected here, at the data boundary.
    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "+" => Ok(DetailKind::Addition),
            "-" => Ok(DetailKind::Removal),
            "~" => Ok(DetailKind::Modification),
            "->" => Ok(DetailKind::OrderChange),
            other => Err(UnsupportedKindError(other.to_string())),
        }
    }
}

/// One typed change at a diff location.
///
/// Which of `from`/`to` is meaningful depends on [`DetailKind`]:
/// additions carry only `to`, removals only `from`, modifications and
/// order changes both.
#[derive(Debug, Clone, PartialEq)]
pub struct Detail {
    pub kind: DetailKind,
    pub from: Option<Node>,
    pub to: Option<Node>,
}

impl Detail {
    pub fn addition(to: Option<Node>) -> Self {
        Self {
            kind: DetailKind::Addition,
            from: None,
            to,
        }
    }

    pub fn removal(from: Option<Node>) -> Self {
        Self {
            kind: DetailKind::Removal,
            from,
            to: None,
        }
    }

    pub fn modification(from: Node, to: Node) -> Self {
        Self {
            kind: DetailKind::Modification,
            from: Some(from),
            to: Some(to),
        }
    }

    pub fn order_change(from: Node, to: Node) -> Self {
        Self {
            kind: DetailKind::OrderChange,
            from: Some(from),
            to: Some(to),
        }
    }
}

/// One changed location, identified by path, carrying one or more
/// details.
///
/// `path` is `None` only when the entire document differs at the root.
/// A well-formed diff never has an empty `details` list.
#[derive(Debug, Clone, PartialEq)]
pub struct Diff {
    pub path: Option<Path>,
    pub details: Vec<Detail>,
}

impl Diff {
    pub fn new(path: Option<Path>, details: Vec<Detail>) -> Self {
        Self { path, details }
    }
}

/// The roots of one parsed input; more than one root means a
/// multi-document input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentSet {
    pub documents: Vec<Node>,
}

impl DocumentSet {
    pub fn new(documents: Vec<Node>) -> Self {
        Self { documents }
    }
}

/// The full ordered set of diffs between a "from" and a "to" document
/// set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    pub from: DocumentSet,
    pub to: DocumentSet,
    pub diffs: Vec<Diff>,
}

impl Report {
    pub fn new(from: DocumentSet, to: DocumentSet, diffs: Vec<Diff>) -> Self {
        Self { from, to, diffs }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_tags_roundtrip() {
        for kind in [
            DetailKind::Addition,
            DetailKind::Removal,
            DetailKind::Modification,
            DetailKind::OrderChange,
        ] {
            assert_eq!(kind.as_str().parse::<DetailKind>().unwrap(), kind);
        }
    }

    #[test]
    fn foreign_kind_tag_is_rejected() {
        let err = "*".parse::<DetailKind>().unwrap_err();
        assert_eq!(err, UnsupportedKindError("*".to_string()));
        assert_eq!(err.to_string(), "unsupported detail kind \"*\"");
    }
}
