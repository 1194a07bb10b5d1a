//! Structural paths into configuration trees.
//!
//! A [`Path`] is an ordered sequence of [`Step`]s, each either a map key or a
//! sequence index. Paths are used both as storage addresses for the
//! [`Configuration`](crate::backend::Configuration) contract and as values in
//! the reference index, so they are cheap to compare, hash and clone.
//!
//! # Canonical form
//!
//! Steps are joined with `/`, every step is preceded by a `/`, and the root
//! (the empty path) renders as the empty string. Indices render as `#n`.
//! Inside keys the characters `\`, `/` and `#` are escaped with a backslash.
//!
//! ```rust
//! use confstore::tree::{Path, Step};
//! use std::str::FromStr;
//!
//! let path = Path::root().push("confRoot").push("childList").push(0usize);
//! assert_eq!(path.render(), "/confRoot/childList/#0");
//!
//! let parsed = Path::from_str("/confRoot/childList/#0")?;
//! assert_eq!(parsed, path);
//! assert_eq!(parsed.last(), Some(&Step::Index(0)));
//! # Ok::<(), confstore::tree::PathError>(())
//! ```

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

const SEPARATOR: char = '/';
const INDEX_MARKER: char = '#';
const ESCAPE: char = '\\';

/// Error type for path parsing failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    /// The string is not a canonical path rendering.
    #[error("Malformed path '{input}': {reason}")]
    Malformed { input: String, reason: String },
}

impl PathError {
    fn malformed(input: &str, reason: impl Into<String>) -> Self {
        PathError::Malformed {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    /// The offending input string.
    pub fn input(&self) -> &str {
        match self {
            PathError::Malformed { input, .. } => input,
        }
    }
}

/// A single navigation step.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Step {
    /// Descend into a map entry.
    Key(String),
    /// Descend into a sequence element.
    Index(usize),
}

impl Step {
    /// Returns the key if this is a key step.
    pub fn as_key(&self) -> Option<&str> {
        match self {
            Step::Key(key) => Some(key),
            Step::Index(_) => None,
        }
    }

    /// Returns the index if this is an index step.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Step::Index(index) => Some(*index),
            Step::Key(_) => None,
        }
    }

    fn render_into(&self, out: &mut String) {
        match self {
            Step::Key(key) => {
                for c in key.chars() {
                    if matches!(c, SEPARATOR | INDEX_MARKER | ESCAPE) {
                        out.push(ESCAPE);
                    }
                    out.push(c);
                }
            }
            Step::Index(index) => {
                out.push(INDEX_MARKER);
                out.push_str(&index.to_string());
            }
        }
    }
}

impl From<&str> for Step {
    fn from(key: &str) -> Self {
        Step::Key(key.to_string())
    }
}

impl From<String> for Step {
    fn from(key: String) -> Self {
        Step::Key(key)
    }
}

impl From<&String> for Step {
    fn from(key: &String) -> Self {
        Step::Key(key.clone())
    }
}

impl From<usize> for Step {
    fn from(index: usize) -> Self {
        Step::Index(index)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.render_into(&mut out);
        f.write_str(&out)
    }
}

/// An owned path into a configuration tree.
///
/// Equality and hashing are step-wise, which coincides with comparing
/// canonical renderings since rendering is injective. Ordering is step-wise
/// too: every path sorts immediately before the contiguous run of its descendants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Path {
    steps: Vec<Step>,
}

impl Path {
    /// The document root.
    pub fn root() -> Self {
        Self { steps: Vec::new() }
    }

    /// Builds a path from its steps.
    pub fn from_steps(steps: impl IntoIterator<Item = Step>) -> Self {
        Self {
            steps: steps.into_iter().collect(),
        }
    }

    /// Appends a step, consuming `self`.
    pub fn push(mut self, step: impl Into<Step>) -> Self {
        self.steps.push(step.into());
        self
    }

    /// Returns a new path one step below this one.
    pub fn child(&self, step: impl Into<Step>) -> Self {
        let mut steps = Vec::with_capacity(self.steps.len() + 1);
        steps.extend_from_slice(&self.steps);
        steps.push(step.into());
        Self { steps }
    }

    /// Appends every step of `other` to this path.
    pub fn join(&self, other: &Path) -> Self {
        let mut steps = self.steps.clone();
        steps.extend_from_slice(&other.steps);
        Self { steps }
    }

    /// Returns the parent path, or `None` for the root.
    pub fn parent(&self) -> Option<Path> {
        if self.steps.is_empty() {
            None
        } else {
            Some(Self {
                steps: self.steps[..self.steps.len() - 1].to_vec(),
            })
        }
    }

    /// Returns the last step, or `None` for the root.
    pub fn last(&self) -> Option<&Step> {
        self.steps.last()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns `true` for the root path.
    pub fn is_root(&self) -> bool {
        self.steps.is_empty()
    }

    /// Returns `true` if `self` is a (non-strict) prefix of `other`.
    ///
    /// The root is a prefix of every path and every path is a prefix of itself.
    pub fn is_prefix_of(&self, other: &Path) -> bool {
        other.steps.starts_with(&self.steps)
    }

    /// Returns every strict ancestor of this path, nearest first.
    pub fn ancestors(&self) -> impl Iterator<Item = Path> + '_ {
        (0..self.steps.len()).rev().map(|len| Self {
            steps: self.steps[..len].to_vec(),
        })
    }

    /// Renders the canonical escaped string form.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for step in &self.steps {
            out.push(SEPARATOR);
            step.render_into(&mut out);
        }
        out
    }

    /// Parses a canonical rendering. Inverse of [`Path::render`].
    pub fn parse(input: &str) -> Result<Self, PathError> {
        if input.is_empty() {
            return Ok(Self::root());
        }

        let mut chars = input.chars();
        if chars.next() != Some(SEPARATOR) {
            return Err(PathError::malformed(input, "path must start with '/'"));
        }

        let mut steps = Vec::new();
        let mut segment = String::new();
        // Set when the segment began with an unescaped '#'.
        let mut is_index = false;
        let mut segment_started = false;

        while let Some(c) = chars.next() {
            match c {
                ESCAPE => match chars.next() {
                    Some(escaped @ (SEPARATOR | INDEX_MARKER | ESCAPE)) => {
                        segment.push(escaped);
                        segment_started = true;
                    }
                    Some(other) => {
                        return Err(PathError::malformed(
                            input,
                            format!("invalid escape sequence '\\{other}'"),
                        ));
                    }
                    None => {
                        return Err(PathError::malformed(input, "dangling escape at end of path"));
                    }
                },
                SEPARATOR => {
                    steps.push(finish_segment(input, &mut segment, is_index)?);
                    is_index = false;
                    segment_started = false;
                }
                INDEX_MARKER => {
                    if segment_started {
                        return Err(PathError::malformed(input, "unescaped '#' inside a key"));
                    }
                    is_index = true;
                    segment_started = true;
                }
                other => {
                    segment.push(other);
                    segment_started = true;
                }
            }
        }
        steps.push(finish_segment(input, &mut segment, is_index)?);

        Ok(Self { steps })
    }
}

fn finish_segment(input: &str, segment: &mut String, is_index: bool) -> Result<Step, PathError> {
    let text = std::mem::take(segment);
    if !is_index {
        return Ok(Step::Key(text));
    }
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PathError::malformed(
            input,
            format!("invalid sequence index '#{text}'"),
        ));
    }
    text.parse::<usize>()
        .map(Step::Index)
        .map_err(|_| PathError::malformed(input, format!("sequence index '#{text}' out of range")))
}

impl FromStr for Path {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Path::parse(s)
    }
}

impl TryFrom<&str> for Path {
    type Error = PathError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Path::parse(s)
    }
}

impl From<Vec<Step>> for Path {
    fn from(steps: Vec<Step>) -> Self {
        Self { steps }
    }
}

impl AsRef<Path> for Path {
    fn as_ref(&self) -> &Path {
        self
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl Serialize for Path {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.render().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Path {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Path::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Constructs a [`Path`] from a list of steps.
///
/// String-like arguments become key steps and `usize` arguments become index
/// steps.
///
/// ```rust
/// # use confstore::path;
/// let path = path!("confRoot", "childList", 0usize);
/// assert_eq!(path.render(), "/confRoot/childList/#0");
/// assert!(path!().is_root());
/// ```
#[macro_export]
macro_rules! path {
    () => {
        $crate::tree::Path::root()
    };

    ($($step:expr),+ $(,)?) => {{
        $crate::tree::Path::root()$(.push($step))+
    }};
}
