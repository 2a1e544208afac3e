//! Path-predicate filtering of reports.
//!
//! One selection primitive, four public operations built as predicate
//! constructors over it: exact-match inclusion, prefix exclusion, and
//! pattern inclusion/exclusion. Every operation returns a new report;
//! the input is never mutated. Diff order is preserved.
//!
//! A diff without a path (whole-document difference) never matches an
//! inclusion predicate and never matches an exclusion predicate: it is
//! dropped by [`Report::filter`] / [`Report::filter_regexp`] and always
//! retained by [`Report::exclude`] / [`Report::exclude_regexp`].

use regex::Regex;
use thiserror::Error;
use tree_delta_path::{Path, PathError};

use crate::report::Report;

#[derive(Debug, Error)]
pub enum FilterError {
    #[error("exclude path must use the slash-delimited syntax, got {0:?}")]
    NotGoPatchSyntax(String),
    #[error(transparent)]
    Path(#[from] PathError),
    #[error("invalid filter pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl Report {
    /// Keep only the diffs whose path satisfies `keep`, copying the
    /// from/to document references unchanged.
    fn filter_by<F>(&self, keep: F) -> Report
    where
        F: Fn(Option<&Path>) -> bool,
    {
        Report {
            from: self.from.clone(),
            to: self.to.clone(),
            diffs: self
                .diffs
                .iter()
                .filter(|diff| keep(diff.path.as_ref()))
                .cloned()
                .collect(),
        }
    }

    /// Keep only diffs whose canonical path string exactly equals one of
    /// the given dotted-syntax paths.
    ///
    /// Unparsable inputs are silently skipped (they never match). An
    /// empty input list returns the report unchanged.
    pub fn filter(&self, paths: &[&str]) -> Report {
        if paths.is_empty() {
            return self.clone();
        }

        let wanted: Vec<String> = paths
            .iter()
            .filter_map(|input| Path::parse_dotted(input).ok())
            .map(|path| path.to_string())
            .collect();

        self.filter_by(|path| {
            path.is_some_and(|path| {
                let canonical = path.to_string();
                wanted.iter().any(|w| *w == canonical)
            })
        })
    }

    /// Drop every diff whose canonical path string starts with one of
    /// the given slash-delimited path prefixes.
    ///
    /// Each input must be in the slash-delimited syntax and must parse;
    /// otherwise the call fails and the report is left untouched. An
    /// empty input list returns the report unchanged.
    pub fn exclude(&self, paths: &[&str]) -> Result<Report, FilterError> {
        if paths.is_empty() {
            return Ok(self.clone());
        }

        let mut prefixes = Vec::with_capacity(paths.len());
        for input in paths {
            if !Path::is_go_patch_syntax(input) {
                return Err(FilterError::NotGoPatchSyntax((*input).to_string()));
            }
            prefixes.push(Path::parse_go_patch(input)?.to_string());
        }

        Ok(self.filter_by(|path| match path {
            Some(path) => {
                let canonical = path.to_string();
                !prefixes.iter().any(|prefix| canonical.starts_with(prefix.as_str()))
            }
            None => true,
        }))
    }

    /// Keep only diffs whose canonical path string matches at least one
    /// of the given patterns.
    ///
    /// An invalid pattern fails the whole call. An empty input list
    /// returns the report unchanged.
    pub fn filter_regexp(&self, patterns: &[&str]) -> Result<Report, FilterError> {
        if patterns.is_empty() {
            return Ok(self.clone());
        }

        let regexps = compile_patterns(patterns)?;
        Ok(self.filter_by(|path| {
            path.is_some_and(|path| {
                let canonical = path.to_string();
                regexps.iter().any(|re| re.is_match(&canonical))
            })
        }))
    }

    /// Drop every diff whose canonical path string matches any of the
    /// given patterns.
    ///
    /// An invalid pattern fails the whole call. An empty input list
    /// returns the report unchanged.
    pub fn exclude_regexp(&self, patterns: &[&str]) -> Result<Report, FilterError> {
        if patterns.is_empty() {
            return Ok(self.clone());
        }

        let regexps = compile_patterns(patterns)?;
        Ok(self.filter_by(|path| match path {
            Some(path) => {
                let canonical = path.to_string();
                !regexps.iter().any(|re| re.is_match(&canonical))
            }
            None => true,
        }))
    }
}

fn compile_patterns(patterns: &[&str]) -> Result<Vec<Regex>, FilterError> {
    patterns
        .iter()
        .map(|pattern| Regex::new(pattern).map_err(FilterError::Pattern))
        .collect()
}
