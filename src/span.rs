//! Offset intervals for the two coordinate spaces of a scope tree
//!
//! A [`Span`] is a half-open `[begin, end)` interval. The same type is used
//! for source-document offsets (as reported by a scanner) and for offsets in
//! the rendered outline; [`Space`] selects which of a node's spans a search
//! runs over.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A half-open interval of offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    begin: usize,
    end: usize,
}

impl Span {
    /// Create a span between two offsets (endpoints are ordered, so
    /// `Span::new(5, 2)` is the same span as `Span::new(2, 5)`)
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            begin: a.min(b),
            end: a.max(b),
        }
    }

    /// An empty span positioned at `offset`
    pub fn empty(offset: usize) -> Self {
        Self {
            begin: offset,
            end: offset,
        }
    }

    pub fn begin(&self) -> usize {
        self.begin
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn size(&self) -> usize {
        self.end - self.begin
    }

    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    /// Whether `other` lies entirely within this span (a span contains itself).
    ///
    /// An empty `other` is a position rather than a range, so it belongs to
    /// the span covering its offset: `[1, 5)` does not contain `[5, 5)`, but
    /// `[5, 8)` does.
    pub fn contains(&self, other: Span) -> bool {
        if other.is_empty() && other != *self {
            return self.contains_point(other.begin);
        }
        other.begin >= self.begin && other.end <= self.end
    }

    /// Whether `point` is one of the offsets covered by this span
    pub fn contains_point(&self, point: usize) -> bool {
        self.begin <= point && point < self.end
    }

    /// Whether the two spans share at least one offset
    pub fn overlaps(&self, other: Span) -> bool {
        self.begin < other.end && other.begin < self.end
    }

    /// Overlap without either span containing the other.
    ///
    /// Well-formed scopes are always nested or disjoint, so this only holds
    /// for conflicting scanner output.
    pub fn intersects_but_not_contains(&self, other: Span) -> bool {
        self.overlaps(other) && !self.contains(other) && !other.contains(*self)
    }

    /// Whether this span ends at or before `other` begins
    pub fn is_left_of(&self, other: Span) -> bool {
        self.end <= other.begin
    }

    /// Position of this span relative to `key`.
    ///
    /// `Less` when the span lies wholly before the key, `Greater` when wholly
    /// after it, and `Equal` when the two are related (containment in either
    /// direction, or the span covering the point). Returns `None` when a span
    /// key intersects this span without containment.
    pub fn locate(&self, key: Key) -> Option<Ordering> {
        match key {
            Key::Point(point) => Some(if self.end <= point {
                Ordering::Less
            } else if point < self.begin {
                Ordering::Greater
            } else {
                Ordering::Equal
            }),
            Key::Span(other) => {
                if self.contains(other) || other.contains(*self) {
                    Some(Ordering::Equal)
                } else if self.overlaps(other) {
                    None
                } else if self.is_left_of(other) {
                    Some(Ordering::Less)
                } else {
                    Some(Ordering::Greater)
                }
            }
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.begin, self.end)
    }
}

impl From<std::ops::Range<usize>> for Span {
    fn from(range: std::ops::Range<usize>) -> Self {
        Span::new(range.start, range.end)
    }
}

/// Search key for ordered lookups over sibling scopes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A single offset, used for display lookups
    Point(usize),
    /// A whole span, used when placing a new scope
    Span(Span),
}

/// Which coordinate space a search runs over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Space {
    /// Offsets into the scanned source document
    Source,
    /// Offsets into the rendered outline text
    Display,
}
