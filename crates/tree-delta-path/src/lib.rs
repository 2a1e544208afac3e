//! Document tree paths with two textual renderings.
//!
//! A [`Path`] locates one node inside a (possibly multi-root) document
//! set. It renders in two mutually exclusive styles:
//!
//! - dotted/structured style: `spec.containers.0.image`
//! - slash-delimited absolute ("go-patch") style: `/spec/containers/0/image`
//!
//! The canonical string form, used for equality and prefix comparisons,
//! is the dotted style without the document-root prefix; [`Path`]
//! implements [`std::fmt::Display`] accordingly. When a document set
//! holds more than one root, rendered paths carry a `#<index>:` prefix
//! identifying the root they belong to.

use std::fmt;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("empty path string")]
    Empty,
    #[error("path must start with '/'")]
    NotAbsolute,
    #[error("empty path segment")]
    EmptySegment,
}

/// One step into a document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathElement {
    /// Mapping key
    Key(String),
    /// Sequence index
    Index(usize),
}

impl fmt::Display for PathElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathElement::Key(key) => f.write_str(key),
            PathElement::Index(idx) => write!(f, "{idx}"),
        }
    }
}

impl From<&str> for PathElement {
    fn from(key: &str) -> Self {
        PathElement::Key(key.to_string())
    }
}

impl From<usize> for PathElement {
    fn from(idx: usize) -> Self {
        PathElement::Index(idx)
    }
}

/// Location of one node inside a document set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    /// Which root of a multi-root document set this path belongs to.
    pub document_index: usize,
    /// Steps from that root down to the node.
    pub elements: Vec<PathElement>,
}

impl Path {
    /// Path in the first document root.
    pub fn new(elements: Vec<PathElement>) -> Self {
        Self {
            document_index: 0,
            elements,
        }
    }

    /// Path in the document root at `document_index`.
    pub fn in_document(document_index: usize, elements: Vec<PathElement>) -> Self {
        Self {
            document_index,
            elements,
        }
    }

    /// Whether `input` is written in the slash-delimited absolute syntax.
    pub fn is_go_patch_syntax(input: &str) -> bool {
        input.starts_with('/')
    }

    /// Parse the dotted/structured syntax, e.g. `spec.containers.0`.
    ///
    /// Purely numeric segments parse as sequence indices.
    pub fn parse_dotted(input: &str) -> Result<Self, PathError> {
        if input.is_empty() {
            return Err(PathError::Empty);
        }
        let mut elements = Vec::new();
        for segment in input.split('.') {
            elements.push(parse_segment(segment)?);
        }
        Ok(Self::new(elements))
    }

    /// Parse the slash-delimited absolute syntax, e.g. `/spec/containers/0`.
    ///
    /// `/` on its own is the document root.
    pub fn parse_go_patch(input: &str) -> Result<Self, PathError> {
        if input.is_empty() {
            return Err(PathError::Empty);
        }
        if !input.starts_with('/') {
            return Err(PathError::NotAbsolute);
        }
        if input == "/" {
            return Ok(Self::new(Vec::new()));
        }
        let mut elements = Vec::new();
        for segment in input.split('/').skip(1) {
            elements.push(parse_segment(segment)?);
        }
        Ok(Self::new(elements))
    }

    /// Dotted rendering without the document-root prefix.
    pub fn to_dot_style(&self) -> String {
        let mut out = String::new();
        for (i, element) in self.elements.iter().enumerate() {
            if i > 0 {
                out.push('.');
            }
            out.push_str(&element.to_string());
        }
        out
    }

    /// Slash-delimited rendering without the document-root prefix.
    pub fn to_go_patch_style(&self) -> String {
        if self.elements.is_empty() {
            return "/".to_string();
        }
        let mut out = String::new();
        for element in &self.elements {
            out.push('/');
            out.push_str(&element.to_string());
        }
        out
    }

    /// Rendering in the selected syntax style, optionally prefixed with
    /// the document-root index (`#<index>:`).
    pub fn styled(&self, use_go_patch: bool, show_document_root: bool) -> String {
        let base = if use_go_patch {
            self.to_go_patch_style()
        } else {
            self.to_dot_style()
        };
        if show_document_root {
            format!("#{}:{}", self.document_index, base)
        } else {
            base
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_dot_style())
    }
}

fn parse_segment(segment: &str) -> Result<PathElement, PathError> {
    if segment.is_empty() {
        return Err(PathError::EmptySegment);
    }
    match segment.parse::<usize>() {
        Ok(idx) if segment.bytes().all(|b| b.is_ascii_digit()) => Ok(PathElement::Index(idx)),
        _ => Ok(PathElement::Key(segment.to_string())),
    }
}
