//! Rendering of a [`Report`] into a serializable JSON report document.
//!
//! The output shape is a summary (diff count) plus one entry per diff,
//! each holding the rendered path string and its list of rendered
//! details. Additions populate `addition` only, removals `removal`
//! only, modifications and order changes populate both. The exception
//! is an order change over non-sequence nodes, which populates neither.

use std::fmt::Write as _;
use std::io::{BufWriter, Write};

use base64::Engine;
use serde::Serialize;
use thiserror::Error;
use tree_delta_node::{Node, NodeError};

use crate::report::{Detail, DetailKind, Diff, Report, UnsupportedKindError};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Kind(#[from] UnsupportedKindError),
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error(transparent)]
    Node(#[from] NodeError),
    #[error("report encoding failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// One rendered detail. Absent fields are omitted from the output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailEntry {
    pub kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removal: Option<String>,
}

/// One rendered diff: path string plus its rendered details.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiffEntry {
    pub path: String,
    pub details: Vec<DetailEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub changes: usize,
}

/// The whole serializable report document. `differences` is omitted
/// entirely for a no-diff report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportDoc {
    pub summary: Summary,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub differences: Vec<DiffEntry>,
}

/// Renders a [`Report`] into a [`ReportDoc`].
///
/// `use_go_patch_paths` selects the slash-delimited path style over the
/// dotted one. Path strings carry a document-root prefix only when the
/// "from" side holds more than one document root.
#[derive(Debug)]
pub struct Renderer<'a> {
    report: &'a Report,
    use_go_patch_paths: bool,
}

impl<'a> Renderer<'a> {
    pub fn new(report: &'a Report) -> Self {
        Self {
            report,
            use_go_patch_paths: false,
        }
    }

    pub fn with_go_patch_paths(mut self, use_go_patch_paths: bool) -> Self {
        self.use_go_patch_paths = use_go_patch_paths;
        self
    }

    /// Build the serializable report document.
    ///
    /// Any decode or serialization failure aborts the whole render; no
    /// partial document is produced.
    pub fn generate(&self) -> Result<ReportDoc, RenderError> {
        let show_document_root = self.report.from.documents.len() > 1;

        let mut differences = Vec::with_capacity(self.report.diffs.len());
        for diff in &self.report.diffs {
            differences.push(self.diff_entry(diff, show_document_root)?);
        }

        Ok(ReportDoc {
            summary: Summary {
                changes: self.report.diffs.len(),
            },
            differences,
        })
    }

    /// Serialize the report document to compact JSON and write it fully
    /// to `out`, flushing before returning.
    pub fn write_report<W: Write>(&self, out: W) -> Result<(), RenderError> {
        let mut writer = BufWriter::new(out);
        let doc = self.generate()?;
        let encoded = serde_json::to_string(&doc)?;
        writer.write_all(encoded.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    fn diff_entry(&self, diff: &Diff, show_document_root: bool) -> Result<DiffEntry, RenderError> {
        let path = diff
            .path
            .as_ref()
            .map(|p| p.styled(self.use_go_patch_paths, show_document_root))
            .unwrap_or_default();

        let mut details = Vec::with_capacity(diff.details.len());
        for detail in &diff.details {
            details.push(detail_entry(detail)?);
        }

        Ok(DiffEntry { path, details })
    }
}

fn detail_entry(detail: &Detail) -> Result<DetailEntry, RenderError> {
    match detail.kind {
        DetailKind::Addition => Ok(DetailEntry {
            kind: detail.kind.as_str(),
            addition: Some(json_string(detail.to.as_ref())?),
            removal: None,
        }),
        DetailKind::Removal => Ok(DetailEntry {
            kind: detail.kind.as_str(),
            addition: None,
            removal: Some(json_string(detail.from.as_ref())?),
        }),
        DetailKind::Modification => modification_entry(detail),
        DetailKind::OrderChange => order_change_entry(detail),
    }
}

fn modification_entry(detail: &Detail) -> Result<DetailEntry, RenderError> {
    let kind = detail.kind.as_str();
    match (&detail.from, &detail.to) {
        // Two plain strings keep their raw values, no re-encoding.
        (Some(Node::Str(from)), Some(Node::Str(to))) => Ok(DetailEntry {
            kind,
            addition: Some(to.clone()),
            removal: Some(from.clone()),
        }),
        // Two binary payloads are decoded and shown as hex dumps.
        (Some(Node::Binary(from)), Some(Node::Binary(to))) => {
            let from = base64::engine::general_purpose::STANDARD.decode(from)?;
            let to = base64::engine::general_purpose::STANDARD.decode(to)?;
            Ok(DetailEntry {
                kind,
                addition: Some(hex_dump(&to)),
                removal: Some(hex_dump(&from)),
            })
        }
        (from, to) => Ok(DetailEntry {
            kind,
            addition: Some(json_string(to.as_ref())?),
            removal: Some(json_string(from.as_ref())?),
        }),
    }
}

fn order_change_entry(detail: &Detail) -> Result<DetailEntry, RenderError> {
    let kind = detail.kind.as_str();
    match (&detail.from, &detail.to) {
        (Some(Node::Sequence(from)), Some(Node::Sequence(to))) => Ok(DetailEntry {
            kind,
            addition: Some(scalar_array_json(to)?),
            removal: Some(scalar_array_json(from)?),
        }),
        // An order change over anything but sequences is a defined
        // no-op: kind only, no fields.
        _ => Ok(DetailEntry {
            kind,
            addition: None,
            removal: None,
        }),
    }
}

/// Per-element text of a sequence, encoded as a compact JSON array of
/// strings. Elements use their raw scalar text when they have one,
/// otherwise their compact JSON form.
fn scalar_array_json(items: &[Node]) -> Result<String, RenderError> {
    let mut texts = Vec::with_capacity(items.len());
    for item in items {
        match item.scalar_text() {
            Some(text) => texts.push(text),
            None => texts.push(item.to_compact_json()?),
        }
    }
    Ok(serde_json::to_string(&texts)?)
}

/// Compact JSON of an optional node; an absent node is the `null` token.
fn json_string(node: Option<&Node>) -> Result<String, RenderError> {
    match node {
        None => Ok("null".to_string()),
        Some(node) => Ok(node.to_compact_json()?),
    }
}

/// Canonical hex dump: 16 bytes per line, 8-digit offset, two 8-byte
/// hex groups, printable-ASCII gutter between `|` bars, short final
/// lines padded so the gutter stays aligned.
fn hex_dump(data: &[u8]) -> String {
    let mut out = String::with_capacity((data.len() / 16 + 1) * 79);
    for (line, chunk) in data.chunks(16).enumerate() {
        let _ = write!(out, "{:08x}  ", line * 16);
        for slot in 0..16 {
            match chunk.get(slot) {
                Some(byte) => {
                    let _ = write!(out, "{byte:02x} ");
                }
                None => out.push_str("   "),
            }
            if slot == 7 {
                out.push(' ');
            }
        }
        out.push(' ');
        out.push('|');
        for byte in chunk {
            out.push(if (0x20..0x7f).contains(byte) {
                *byte as char
            } else {
                '.'
            });
        }
        out.push('|');
        out.push('\n');
    }
    out
}
