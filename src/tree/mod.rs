//! The scope tree
//!
//! A [`ScopeTree`] holds the scopes of one document as a forest of nested,
//! non-overlapping source spans under a synthetic file scope. Scopes can be
//! inserted in any order; the tree keeps containment and sibling order
//! intact, re-parenting existing scopes when a larger one arrives later.
//!
//! ## Coordinate spaces
//!
//! Every node has a *source* span (fixed at insertion) and a *display* span:
//! the range of the rendered outline covering the node's line and all of its
//! descendants. Display spans are derived by [`ScopeTree::render`] and go
//! stale on every insert:
//!
//! ```text
//! insert ──▶ Dirty ──render──▶ Clean ──insert──▶ Dirty
//!                                │
//!                      find / display_span
//! ```

mod node;

pub use node::{NodeId, FILE_SCOPE_NAME};

use node::{Arena, ScopeNode};

use crate::error::{RenderError, ScopeError, ScopeLabel};
use crate::fold::FoldRegion;
use crate::span::{Key, Space, Span};

/// Indent width used until a tree is configured otherwise
pub const DEFAULT_INDENT_WIDTH: usize = 4;

/// Nested scopes of a single document
#[derive(Debug, Clone)]
pub struct ScopeTree {
    nodes: Arena,
    indent_width: usize,
    /// Set by the first render
    rendered: bool,
    dirty: bool,
}

impl ScopeTree {
    /// Create an empty tree for a document of `document_length` offsets
    pub fn new(document_length: usize) -> Self {
        Self::with_indent_width(document_length, DEFAULT_INDENT_WIDTH)
    }

    pub fn with_indent_width(document_length: usize, indent_width: usize) -> Self {
        Self {
            nodes: Arena::new(document_length),
            indent_width,
            rendered: false,
            dirty: true,
        }
    }

    /// Length of the document covered by the file scope
    pub fn document_length(&self) -> usize {
        self.nodes[NodeId::FILE].source.end()
    }

    pub fn indent_width(&self) -> usize {
        self.indent_width
    }

    /// Change the indent width. Takes effect on the next render; display
    /// spans from the last render stay as they were.
    pub fn set_indent_width(&mut self, indent_width: usize) {
        self.indent_width = indent_width;
    }

    /// Number of inserted scopes (the file scope is not counted)
    pub fn size(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Whether display spans are stale
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Insert a scope covering `span` in the source document.
    ///
    /// The scope is placed under the smallest existing scope containing it.
    /// Existing siblings that the new scope contains become its children.
    /// On error the tree is left exactly as it was.
    pub fn insert(&mut self, span: Span, name: impl Into<String>) -> Result<NodeId, ScopeError> {
        let name = name.into();
        let file = &self.nodes[NodeId::FILE];
        if file.source.intersects_but_not_contains(span) {
            return Err(ScopeError::Intersect {
                existing: file.label(),
                inserted: ScopeLabel::new(name, span),
            });
        }
        if !file.source.contains(span) {
            return Err(ScopeError::Nesting {
                parent: file.label(),
                child: ScopeLabel::new(name, span),
            });
        }

        let mut parent = NodeId::FILE;
        let id = loop {
            let slot = self
                .nodes
                .find_insertion_index(parent, Key::Span(span), Space::Source, &name)?;

            match slot {
                Ok(found) => {
                    let sibling_id = self.nodes[parent].children[found];
                    let sibling = &self.nodes[sibling_id];
                    if sibling.source == span {
                        return Err(ScopeError::Duplicate {
                            existing: sibling.label(),
                            inserted: ScopeLabel::new(name, span),
                        });
                    }
                    if sibling.source.contains(span) {
                        parent = sibling_id;
                        continue;
                    }

                    let (lo, hi) = self.nodes.contained_run(parent, found, span);
                    self.nodes.check_placement(parent, lo, hi, span, &name)?;

                    let id = self.nodes.alloc(ScopeNode::new(span, name));
                    let swallowed: Vec<NodeId> =
                        self.nodes[parent].children.drain(lo..hi).collect();
                    tracing::trace!(
                        "Scope {} at {} takes {} existing scope(s) as children",
                        self.nodes[id].name,
                        span,
                        swallowed.len()
                    );
                    self.nodes.attach(parent, id, lo);
                    for (index, child) in swallowed.into_iter().enumerate() {
                        self.nodes.attach(id, child, index);
                    }
                    break id;
                }
                Err(index) => {
                    let id = self.nodes.alloc(ScopeNode::new(span, name));
                    if let Err(err) = self.nodes.add_child(parent, id, index) {
                        self.nodes.discard(id);
                        return Err(err);
                    }
                    break id;
                }
            }
        };

        self.dirty = true;
        Ok(id)
    }

    /// Render the outline text and recompute every display span.
    ///
    /// Each scope produces one line, indented by its nesting level. Display
    /// offsets count characters of the returned text.
    pub fn render(&mut self) -> String {
        let indent_width = self.indent_width;
        let mut out = String::new();
        let mut cursor = 0;
        self.render_node(NodeId::FILE, indent_width, &mut out, &mut cursor);

        self.rendered = true;
        self.dirty = false;
        tracing::debug!(
            "Rendered {} scope(s) into {} characters",
            self.size(),
            cursor
        );
        out
    }

    fn render_node(&mut self, id: NodeId, indent_width: usize, out: &mut String, cursor: &mut usize) {
        let start = *cursor;
        if id != NodeId::FILE {
            let line = self.nodes[id].render_self(indent_width);
            *cursor += line.chars().count();
            out.push_str(&line);
        }
        self.nodes[id].label = Span::new(start, *cursor);

        for index in 0..self.nodes[id].children.len() {
            let child = self.nodes[id].children[index];
            self.render_node(child, indent_width, out, cursor);
        }
        self.nodes[id].display = Span::new(start, *cursor);
    }

    /// Smallest scope whose display span contains `point`.
    ///
    /// Returns `None` when the point lies outside the rendered outline.
    pub fn find(&self, point: usize) -> Result<Option<ScopeRef<'_>>, RenderError> {
        self.ensure_rendered()?;
        if !self.nodes[NodeId::FILE].display.contains_point(point) {
            return Ok(None);
        }

        let mut current = NodeId::FILE;
        while let Some(index) = self.nodes.child_containing(current, point, Space::Display) {
            current = self.nodes[current].children[index];
        }

        if current == NodeId::FILE {
            Ok(None)
        } else {
            Ok(Some(self.scope(current)))
        }
    }

    /// Fold region of the smallest scope containing `point`
    pub fn find_region(&self, point: usize) -> Result<Option<FoldRegion>, RenderError> {
        match self.find(point)? {
            Some(scope) => scope.fold_region().map(Some),
            None => Ok(None),
        }
    }

    /// Look up an inserted scope by id
    pub fn get(&self, id: NodeId) -> Option<ScopeRef<'_>> {
        if id == NodeId::FILE {
            return None;
        }
        self.nodes.get(id).map(|_| self.scope(id))
    }

    /// Top-level scopes in source order
    pub fn roots(&self) -> impl Iterator<Item = ScopeRef<'_>> + '_ {
        self.children_of(NodeId::FILE)
    }

    /// Every inserted scope in outline (pre-order) order
    pub fn iter(&self) -> impl Iterator<Item = ScopeRef<'_>> + '_ {
        self.nodes
            .preorder(NodeId::FILE)
            .skip(1)
            .map(move |id| self.scope(id))
    }

    /// Display span covering the whole rendered outline
    pub fn display_extent(&self) -> Result<Span, RenderError> {
        self.ensure_rendered()?;
        Ok(self.nodes[NodeId::FILE].display)
    }

    fn children_of(&self, id: NodeId) -> impl Iterator<Item = ScopeRef<'_>> + '_ {
        self.nodes[id].children.iter().map(move |&c| self.scope(c))
    }

    fn scope(&self, id: NodeId) -> ScopeRef<'_> {
        ScopeRef { tree: self, id }
    }

    fn ensure_rendered(&self) -> Result<(), RenderError> {
        if !self.rendered {
            Err(RenderError::NotRendered)
        } else if self.dirty {
            Err(RenderError::Dirty)
        } else {
            Ok(())
        }
    }

    fn subtree_eq(&self, id: NodeId, other: &ScopeTree, other_id: NodeId) -> bool {
        let a = &self.nodes[id];
        let b = &other.nodes[other_id];
        a.name == b.name
            && a.source == b.source
            && a.children.len() == b.children.len()
            && a
                .children
                .iter()
                .zip(&b.children)
                .all(|(&x, &y)| self.subtree_eq(x, other, y))
    }
}

/// Trees are equal when they have the same shape and every pair of
/// corresponding scopes has the same name and source span. Display spans
/// are derived and not compared.
impl PartialEq for ScopeTree {
    fn eq(&self, other: &Self) -> bool {
        self.subtree_eq(NodeId::FILE, other, NodeId::FILE)
    }
}

impl Eq for ScopeTree {}

/// Borrowed view of one scope in a tree
#[derive(Clone, Copy)]
pub struct ScopeRef<'a> {
    tree: &'a ScopeTree,
    id: NodeId,
}

impl<'a> ScopeRef<'a> {
    fn node(&self) -> &'a ScopeNode {
        &self.tree.nodes[self.id]
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &'a str {
        &self.node().name
    }

    pub fn source_span(&self) -> Span {
        self.node().source
    }

    /// Range of the rendered outline covering this scope and its descendants
    pub fn display_span(&self) -> Result<Span, RenderError> {
        self.tree.ensure_rendered()?;
        Ok(self.node().display)
    }

    /// Range of this scope's own outline line, trailing newline included
    pub fn label_span(&self) -> Result<Span, RenderError> {
        self.tree.ensure_rendered()?;
        Ok(self.node().label)
    }

    /// Nesting depth; top-level scopes have depth 1, under the file scope
    pub fn depth(&self) -> usize {
        self.node().depth
    }

    /// Enclosing scope, `None` for top-level scopes
    pub fn parent(&self) -> Option<ScopeRef<'a>> {
        self.node()
            .parent
            .filter(|&p| p != NodeId::FILE)
            .map(|p| self.tree.scope(p))
    }

    pub fn children(&self) -> impl Iterator<Item = ScopeRef<'a>> + 'a {
        self.tree.children_of(self.id)
    }

    /// Foldable view of this scope, anchored just past its rendered name
    pub fn fold_region(&self) -> Result<FoldRegion, RenderError> {
        let label = self.label_span()?;
        let display = self.display_span()?;
        Ok(FoldRegion::new(
            display,
            label.end() - 1,
            self.node().name.clone(),
        ))
    }
}

impl std::fmt::Debug for ScopeRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScopeRef")
            .field("id", &self.id)
            .field("name", &self.name())
            .field("source", &self.source_span())
            .finish()
    }
}
