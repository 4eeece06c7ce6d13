//! Validation error trees
//!
//! An [`ErrorTree`] mirrors the shape of the form document; a leaf holding a
//! message marks an invalid field, anything else means valid. Updates never
//! mutate: [`ErrorTree::with`] returns a new tree that shares nothing with
//! the siblings it leaves alone. Clearing a slot prunes it, so clearing the
//! last message of a tree gives back [`ErrorTree::Empty`].

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{DepositError, Result};

/// One step in a field path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Named field
    Key(String),
    /// Array index
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// A field path such as `contributors[1].ids[0].value`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath(Vec<PathSegment>);

impl FieldPath {
    /// Path from segments
    #[must_use]
    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self(segments)
    }

    /// Segments of the path
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// Extend the path by one segment
    #[must_use]
    pub fn join(&self, segment: impl Into<PathSegment>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }
}

impl FromStr for FieldPath {
    type Err = DepositError;

    fn from_str(path: &str) -> Result<Self> {
        if path.is_empty() {
            return Err(DepositError::field_path(path, "empty path"));
        }

        let mut segments = Vec::new();
        for part in path.split('.') {
            let (name, mut rest) = match part.find('[') {
                Some(idx) => (&part[..idx], &part[idx..]),
                None => (part, ""),
            };
            if name.is_empty() {
                return Err(DepositError::field_path(path, "empty field name"));
            }
            segments.push(PathSegment::Key(name.to_string()));

            while !rest.is_empty() {
                let close = rest
                    .find(']')
                    .filter(|_| rest.starts_with('['))
                    .ok_or_else(|| DepositError::field_path(path, "unbalanced brackets"))?;
                let index = rest[1..close]
                    .parse::<usize>()
                    .map_err(|e| DepositError::field_path(path, format!("bad index: {e}")))?;
                segments.push(PathSegment::Index(index));
                rest = &rest[close + 1..];
            }
        }

        Ok(Self(segments))
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if i == 0 => write!(f, "{key}")?,
                PathSegment::Key(key) => write!(f, ".{key}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

/// Tree of validation messages shaped like the form document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorTree {
    /// No error here
    #[default]
    Empty,
    /// Error message for a single field
    Message(String),
    /// Errors per array element
    List(Vec<ErrorTree>),
    /// Errors per named field
    Node(IndexMap<String, ErrorTree>),
}

impl ErrorTree {
    /// Leaf holding a message
    pub fn message(text: impl Into<String>) -> Self {
        Self::Message(text.into())
    }

    /// Node from `(name, subtree)` pairs
    pub fn node<K: Into<String>>(fields: impl IntoIterator<Item = (K, ErrorTree)>) -> Self {
        Self::Node(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Whether the tree holds no message anywhere
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Message(_) => false,
            Self::List(items) => items.iter().all(Self::is_empty),
            Self::Node(fields) => fields.values().all(Self::is_empty),
        }
    }

    /// Subtree at a path
    #[must_use]
    pub fn get(&self, path: &FieldPath) -> Option<&ErrorTree> {
        path.segments()
            .iter()
            .try_fold(self, |tree, segment| match (tree, segment) {
                (Self::Node(fields), PathSegment::Key(key)) => fields.get(key),
                (Self::List(items), PathSegment::Index(index)) => items.get(*index),
                _ => None,
            })
    }

    /// Message at a path, if any
    #[must_use]
    pub fn message_at(&self, path: &FieldPath) -> Option<&str> {
        match self.get(path) {
            Some(Self::Message(text)) => Some(text.as_str()),
            _ => None,
        }
    }

    /// New tree with `subtree` placed at `path`
    ///
    /// Intermediate nodes and lists are created as needed; lists are padded
    /// with [`ErrorTree::Empty`]. A leaf in the way is replaced. Placing an
    /// empty subtree clears the slot: trailing empty list items and empty
    /// fields are dropped, and parents left with nothing collapse to
    /// [`ErrorTree::Empty`].
    #[must_use]
    pub fn with(&self, path: &FieldPath, subtree: ErrorTree) -> ErrorTree {
        Self::with_segments(self, path.segments(), subtree)
    }

    fn with_segments(tree: &ErrorTree, segments: &[PathSegment], subtree: ErrorTree) -> ErrorTree {
        let Some((head, rest)) = segments.split_first() else {
            return subtree;
        };

        match head {
            PathSegment::Key(key) => {
                let mut fields = match tree {
                    Self::Node(fields) => fields.clone(),
                    _ => IndexMap::new(),
                };
                let child = fields.get(key).cloned().unwrap_or_default();
                match Self::with_segments(&child, rest, subtree) {
                    Self::Empty => {
                        fields.shift_remove(key);
                    }
                    child => {
                        fields.insert(key.clone(), child);
                    }
                }
                if fields.is_empty() { Self::Empty } else { Self::Node(fields) }
            }
            PathSegment::Index(index) => {
                let mut items = match tree {
                    Self::List(items) => items.clone(),
                    _ => Vec::new(),
                };
                let child = items.get(*index).cloned().unwrap_or_default();
                let child = Self::with_segments(&child, rest, subtree);
                if child != Self::Empty && items.len() <= *index {
                    items.resize(*index + 1, Self::Empty);
                }
                if let Some(slot) = items.get_mut(*index) {
                    *slot = child;
                }
                while items.last() == Some(&Self::Empty) {
                    items.pop();
                }
                if items.is_empty() { Self::Empty } else { Self::List(items) }
            }
        }
    }

    /// Lay `other` over this tree
    ///
    /// Messages in `other` win; empty spots in `other` keep what this tree
    /// has.
    #[must_use]
    pub fn overlay(&self, other: &ErrorTree) -> ErrorTree {
        match (self, other) {
            (_, Self::Empty) => self.clone(),
            (Self::Node(mine), Self::Node(theirs)) => {
                let mut fields = mine.clone();
                for (key, value) in theirs {
                    let merged = match mine.get(key) {
                        Some(existing) => existing.overlay(value),
                        None => value.clone(),
                    };
                    fields.insert(key.clone(), merged);
                }
                Self::Node(fields)
            }
            (Self::List(mine), Self::List(theirs)) => {
                let len = mine.len().max(theirs.len());
                let items = (0..len)
                    .map(|i| match (mine.get(i), theirs.get(i)) {
                        (Some(a), Some(b)) => a.overlay(b),
                        (Some(a), None) => a.clone(),
                        (None, Some(b)) => b.clone(),
                        (None, None) => Self::Empty,
                    })
                    .collect();
                Self::List(items)
            }
            _ => other.clone(),
        }
    }
}
