//! Path segments and the cursor used to walk them.
//!
//! This module provides [`PathSegment`], a single step into a tree (a named
//! field or an array index), and [`Cursor`], a zipper over a non-empty
//! sequence of segments that tracks which segments were already visited.

use std::fmt::{self, Display};

/// A single step into a tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A field/property access (e.g., `user`, `email`)
    Key(String),
    /// An array index access (e.g., `[0]`, `[42]`)
    Index(usize),
}

impl PathSegment {
    /// Creates a new key segment.
    pub fn key(name: impl Into<String>) -> Self {
        PathSegment::Key(name.into())
    }

    /// Creates a new index segment.
    pub fn index(idx: usize) -> Self {
        PathSegment::Index(idx)
    }
}

impl Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(name) => write!(f, "{}", name),
            PathSegment::Index(idx) => write!(f, "[{}]", idx),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(name: &str) -> Self {
        PathSegment::Key(name.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(name: String) -> Self {
        PathSegment::Key(name)
    }
}

impl From<usize> for PathSegment {
    fn from(idx: usize) -> Self {
        PathSegment::Index(idx)
    }
}

/// A zipper over a non-empty sequence.
///
/// The cursor has a focus, the items already visited before it, and the
/// items after it. Moving the focus never drops an item, so [`Cursor::to_vec`]
/// always returns the full sequence in order.
///
/// # Example
///
/// ```rust
/// use biopsy::{Cursor, PathSegment};
///
/// let cursor = Cursor::from_cons(
///     PathSegment::key("users"),
///     vec![PathSegment::index(0), PathSegment::key("email")],
/// );
///
/// assert_eq!(cursor.to_string(), "users.[0].email");
///
/// let last = cursor.next().and_then(|c| c.next()).unwrap();
/// assert_eq!(last.focus(), &PathSegment::key("email"));
/// assert!(last.is_last());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cursor<T> {
    prevs: Vec<T>,
    focus: T,
    nexts: Vec<T>,
}

impl<T: Clone> Cursor<T> {
    /// Builds a cursor focused on `head`, followed by `tail`.
    pub fn from_cons(head: T, tail: impl IntoIterator<Item = T>) -> Self {
        let mut nexts: Vec<T> = tail.into_iter().collect();
        nexts.reverse();
        Self {
            prevs: Vec::new(),
            focus: head,
            nexts,
        }
    }

    /// Builds a cursor focused on the first item, or `None` for an empty sequence.
    pub fn from_seq(items: impl IntoIterator<Item = T>) -> Option<Self> {
        let mut iter = items.into_iter();
        let head = iter.next()?;
        Some(Self::from_cons(head, iter))
    }

    /// Returns a cursor moved one item forward, or `None` at the end.
    pub fn next(&self) -> Option<Self> {
        let mut moved = self.clone();
        let focus = moved.nexts.pop()?;
        moved.prevs.push(std::mem::replace(&mut moved.focus, focus));
        Some(moved)
    }

    /// Returns a cursor moved one item back, or `None` at the start.
    pub fn prev(&self) -> Option<Self> {
        let mut moved = self.clone();
        let focus = moved.prevs.pop()?;
        moved.nexts.push(std::mem::replace(&mut moved.focus, focus));
        Some(moved)
    }

    /// Returns a cursor moved back to the first item.
    pub fn rewind(&self) -> Self {
        let mut moved = self.clone();
        while let Some(focus) = moved.prevs.pop() {
            moved.nexts.push(std::mem::replace(&mut moved.focus, focus));
        }
        moved
    }

    /// Visits every position from the current focus to the end, left to right.
    ///
    /// `step` receives the accumulator and the cursor positioned at each item,
    /// so it can inspect what was already visited and what remains.
    pub fn fold<S, F>(&self, seed: S, mut step: F) -> S
    where
        F: FnMut(S, &Cursor<T>) -> S,
    {
        let mut acc = seed;
        let mut current = self.clone();
        loop {
            acc = step(acc, &current);
            match current.nexts.pop() {
                Some(focus) => {
                    let previous = std::mem::replace(&mut current.focus, focus);
                    current.prevs.push(previous);
                }
                None => return acc,
            }
        }
    }

    /// Returns the full sequence in order.
    pub fn to_vec(&self) -> Vec<T> {
        let mut items = self.visited();
        items.push(self.focus.clone());
        items.extend(self.remaining());
        items
    }

    /// Returns the items before the focus, in order.
    pub fn visited(&self) -> Vec<T> {
        self.prevs.iter().cloned().collect()
    }

    /// Returns the items after the focus, in order.
    pub fn remaining(&self) -> Vec<T> {
        self.nexts.iter().rev().cloned().collect()
    }
}

impl<T> Cursor<T> {
    /// Returns the focused item.
    pub fn focus(&self) -> &T {
        &self.focus
    }

    /// Returns true if no items follow the focus.
    pub fn is_last(&self) -> bool {
        self.nexts.is_empty()
    }

    /// Returns true if no items precede the focus.
    pub fn is_first(&self) -> bool {
        self.prevs.is_empty()
    }

    /// Returns the total number of items.
    pub fn len(&self) -> usize {
        self.prevs.len() + 1 + self.nexts.len()
    }

    /// Always false: a cursor holds at least its focus.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl<T: Clone + Display> Cursor<T> {
    /// Returns the display label of every item, in order.
    pub fn labels(&self) -> Vec<String> {
        self.to_vec().iter().map(ToString::to_string).collect()
    }
}

impl<T: Clone + Display> Display for Cursor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.labels().join("."))
    }
}
