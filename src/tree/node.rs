//! Scope nodes and the arena that owns them
//!
//! Nodes refer to each other by [`NodeId`]. A node's `parent` is only an
//! index, so ownership stays with the arena and there are no reference
//! cycles. Children are kept sorted by source span; siblings never overlap.

use std::cmp::Ordering;
use std::ops::{Index, IndexMut};

use crate::error::{ScopeError, ScopeLabel};
use crate::span::{Key, Space, Span};

/// Name of the synthetic scope covering the whole document
pub const FILE_SCOPE_NAME: &str = "FILE";

/// Stable handle to a node in a [`super::ScopeTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// The synthetic file scope is always the first node allocated
    pub(crate) const FILE: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ScopeNode {
    pub(crate) name: String,
    pub(crate) source: Span,
    pub(crate) children: Vec<NodeId>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) depth: usize,
    /// Node label plus all descendants in the rendered outline
    pub(crate) display: Span,
    /// The node's own line in the rendered outline, newline included
    pub(crate) label: Span,
}

impl ScopeNode {
    pub(crate) fn new(source: Span, name: String) -> Self {
        Self {
            name,
            source,
            children: Vec::new(),
            parent: None,
            depth: 0,
            display: Span::default(),
            label: Span::default(),
        }
    }

    pub(crate) fn span(&self, space: Space) -> Span {
        match space {
            Space::Source => self.source,
            Space::Display => self.display,
        }
    }

    pub(crate) fn label(&self) -> ScopeLabel {
        ScopeLabel::new(self.name.clone(), self.source)
    }

    /// Outline level of this node: top-level scopes sit at level 0
    pub(crate) fn level(&self) -> usize {
        self.depth.saturating_sub(1)
    }

    /// The single outline line for this node
    pub(crate) fn render_self(&self, indent_width: usize) -> String {
        let indent = self.level() * indent_width;
        let mut line = String::with_capacity(indent + self.name.len() + 1);
        line.extend(std::iter::repeat(' ').take(indent));
        line.push_str(&self.name);
        line.push('\n');
        line
    }
}

/// Outcome of a sibling search that found no intersection
pub(crate) type Slot = Result<usize, usize>;

#[derive(Debug, Clone)]
pub(crate) struct Arena {
    nodes: Vec<ScopeNode>,
}

impl Arena {
    /// Create an arena holding only the file scope
    pub(crate) fn new(document_length: usize) -> Self {
        Self {
            nodes: vec![ScopeNode::new(
                Span::new(0, document_length),
                FILE_SCOPE_NAME.to_string(),
            )],
        }
    }

    pub(crate) fn alloc(&mut self, node: ScopeNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Drop the most recently allocated node, which must not be linked yet
    pub(crate) fn discard(&mut self, id: NodeId) {
        debug_assert_eq!(id.index(), self.nodes.len() - 1);
        debug_assert!(self.nodes[id.index()].parent.is_none());
        self.nodes.pop();
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn get(&self, id: NodeId) -> Option<&ScopeNode> {
        self.nodes.get(id.index())
    }

    /// Binary search `parent`'s children for `key`.
    ///
    /// `Ok(Ok(index))` is a sibling related to the key, `Ok(Err(index))` is
    /// the insertion point when no sibling relates to it. `Err(sibling)` is a
    /// sibling the key intersects; point keys never produce it.
    fn search(&self, parent: NodeId, key: Key, space: Space) -> Result<Slot, NodeId> {
        let children = &self[parent].children;
        let mut lo = 0;
        let mut hi = children.len();
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            let sibling = children[mid];
            match self[sibling].span(space).locate(key) {
                Some(Ordering::Less) => lo = mid + 1,
                Some(Ordering::Greater) => hi = mid,
                Some(Ordering::Equal) => return Ok(Ok(mid)),
                None => return Err(sibling),
            }
        }
        Ok(Err(lo))
    }

    /// Locate `key` among `parent`'s children, reporting intersections as
    /// errors against the scope `name` being placed.
    pub(crate) fn find_insertion_index(
        &self,
        parent: NodeId,
        key: Key,
        space: Space,
        name: &str,
    ) -> Result<Slot, ScopeError> {
        self.search(parent, key, space).map_err(|sibling| {
            let span = match key {
                Key::Span(span) => span,
                Key::Point(point) => Span::empty(point),
            };
            ScopeError::Intersect {
                existing: self[sibling].label(),
                inserted: ScopeLabel::new(name, span),
            }
        })
    }

    /// Index of the child of `parent` whose `space` span contains `point`
    pub(crate) fn child_containing(&self, parent: NodeId, point: usize, space: Space) -> Option<usize> {
        match self.search(parent, Key::Point(point), space) {
            Ok(Ok(index)) => Some(index),
            _ => None,
        }
    }

    /// The run `lo..hi` of `parent`'s children contained by `span`, grown in
    /// both directions from `found`
    pub(crate) fn contained_run(&self, parent: NodeId, found: usize, span: Span) -> (usize, usize) {
        let children = &self[parent].children;
        let mut lo = found;
        while lo > 0 && span.contains(self[children[lo - 1]].source) {
            lo -= 1;
        }
        let mut hi = found + 1;
        while hi < children.len() && span.contains(self[children[hi]].source) {
            hi += 1;
        }
        (lo, hi)
    }

    /// Check that a scope `span` named `name` may replace `parent`'s children
    /// `lo..hi` (an empty range for a plain insertion at `lo`).
    pub(crate) fn check_placement(
        &self,
        parent: NodeId,
        lo: usize,
        hi: usize,
        span: Span,
        name: &str,
    ) -> Result<(), ScopeError> {
        let node = &self[parent];
        let inserted = || ScopeLabel::new(name, span);

        if node.source.intersects_but_not_contains(span) {
            return Err(ScopeError::Intersect {
                existing: node.label(),
                inserted: inserted(),
            });
        }
        if !node.source.contains(span) {
            return Err(ScopeError::Nesting {
                parent: node.label(),
                child: inserted(),
            });
        }

        let left = lo.checked_sub(1).map(|i| node.children[i]);
        let right = node.children.get(hi).copied();
        for (neighbour, expected) in [(left, Ordering::Less), (right, Ordering::Greater)] {
            let Some(neighbour) = neighbour else {
                continue;
            };
            let sibling = &self[neighbour];
            if sibling.source.locate(Key::Span(span)) == Some(expected) {
                continue;
            }
            if sibling.source == span {
                return Err(ScopeError::Duplicate {
                    existing: sibling.label(),
                    inserted: inserted(),
                });
            }
            return Err(ScopeError::Intersect {
                existing: sibling.label(),
                inserted: inserted(),
            });
        }
        Ok(())
    }

    /// Insert `child` under `parent` at `index` after validating placement
    pub(crate) fn add_child(&mut self, parent: NodeId, child: NodeId, index: usize) -> Result<(), ScopeError> {
        let node = &self[child];
        self.check_placement(parent, index, index, node.source, &node.name)?;
        self.attach(parent, child, index);
        Ok(())
    }

    /// Link `child` under `parent` at `index` without validation, updating the
    /// depth of the whole moved subtree
    pub(crate) fn attach(&mut self, parent: NodeId, child: NodeId, index: usize) {
        let depth = self[parent].depth + 1;
        self[parent].children.insert(index, child);
        self[child].parent = Some(parent);

        let mut stack = vec![(child, depth)];
        while let Some((id, depth)) = stack.pop() {
            let node = &mut self[id];
            node.depth = depth;
            stack.extend(node.children.iter().map(|&c| (c, depth + 1)));
        }
    }

    /// Pre-order iterator over the subtree rooted at `root`, `root` included
    pub(crate) fn preorder(&self, root: NodeId) -> Preorder<'_> {
        Preorder {
            arena: self,
            stack: vec![root],
        }
    }
}

impl Index<NodeId> for Arena {
    type Output = ScopeNode;

    fn index(&self, id: NodeId) -> &ScopeNode {
        &self.nodes[id.index()]
    }
}

impl IndexMut<NodeId> for Arena {
    fn index_mut(&mut self, id: NodeId) -> &mut ScopeNode {
        &mut self.nodes[id.index()]
    }
}

pub(crate) struct Preorder<'a> {
    arena: &'a Arena,
    stack: Vec<NodeId>,
}

impl Iterator for Preorder<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.arena[id].children.iter().rev().copied());
        Some(id)
    }
}
