//! Rendered outline with folding
//!
//! [`OutlineView`] owns a scope tree and the text it renders to, and maps
//! clicks in that text to fold toggles. Folded ranges are kept by a
//! [`FoldLayer`], the in-memory stand-in for an editor's fold surface.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::RenderError;
use crate::fold::{FoldCommand, FoldRegion, SelectionSink};
use crate::span::Span;
use crate::tree::{NodeId, ScopeRef, ScopeTree};

/// Marker shown in place of folded text
pub const FOLD_MARKER: char = '…';

/// Selection and folded ranges of the outline text
#[derive(Debug, Clone, Default)]
pub struct FoldLayer {
    selection: Vec<Span>,
    folded: Vec<Span>,
}

impl FoldLayer {
    /// Currently folded display spans, sorted by position
    pub fn folded(&self) -> &[Span] {
        &self.folded
    }

    pub fn clear(&mut self) {
        self.selection.clear();
        self.folded.clear();
    }
}

impl SelectionSink for FoldLayer {
    fn clear_selection(&mut self) {
        self.selection.clear();
    }

    fn add_selection(&mut self, span: Span) {
        self.selection.push(span);
    }

    fn run(&mut self, command: FoldCommand) {
        match command {
            FoldCommand::Fold => {
                for span in &self.selection {
                    if !self.folded.contains(span) {
                        self.folded.push(*span);
                    }
                }
                self.folded.sort_by_key(|s| (s.begin(), std::cmp::Reverse(s.end())));
            }
            FoldCommand::Unfold => {
                let selection = &self.selection;
                self.folded.retain(|span| !selection.contains(span));
            }
        }
    }
}

/// A scope tree together with its rendered, foldable outline
#[derive(Debug)]
pub struct OutlineView {
    tree: ScopeTree,
    text: String,
    regions: HashMap<NodeId, FoldRegion>,
    folds: FoldLayer,
}

impl OutlineView {
    /// Render `tree` and wrap it with no folds applied
    pub fn new(mut tree: ScopeTree) -> Self {
        let text = tree.render();
        Self {
            tree,
            text,
            regions: HashMap::new(),
            folds: FoldLayer::default(),
        }
    }

    pub fn tree(&self) -> &ScopeTree {
        &self.tree
    }

    /// Fully expanded outline text
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn folds(&self) -> &FoldLayer {
        &self.folds
    }

    /// Re-render with a new indent width. Display spans move, so every fold
    /// is dropped.
    pub fn set_indent_width(&mut self, indent_width: usize) {
        self.tree.set_indent_width(indent_width);
        self.refresh();
    }

    /// Re-render the outline and forget all fold state
    pub fn refresh(&mut self) {
        self.text = self.tree.render();
        self.regions.clear();
        self.folds.clear();
    }

    /// Fold or unfold the scope under display offset `offset`.
    ///
    /// Returns `false` when nothing was toggled: the offset is outside the
    /// outline or the scope has nothing to hide.
    pub fn toggle_at(&mut self, offset: usize) -> Result<bool, RenderError> {
        let Some(scope) = self.tree.find(offset)? else {
            tracing::debug!("No scope at outline offset {}", offset);
            return Ok(false);
        };

        let region = match self.regions.entry(scope.id()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(scope.fold_region()?),
        };
        if !region.is_collapsible() {
            return Ok(false);
        }

        region.toggle(&mut self.folds);
        Ok(true)
    }

    /// Whether the scope `id` is currently folded
    pub fn is_folded(&self, id: NodeId) -> bool {
        self.regions.get(&id).is_some_and(FoldRegion::is_folded)
    }

    /// Outline text as shown with folds applied
    pub fn visible_text(&self) -> String {
        let chars: Vec<char> = self.text.chars().collect();
        let mut out = String::with_capacity(self.text.len());
        let mut cursor = 0;

        for span in self.folds.folded() {
            let begin = span.begin().min(chars.len());
            let end = span.end().min(chars.len());
            // Nested inside a fold already applied
            if begin < cursor {
                continue;
            }
            out.extend(&chars[cursor..begin]);
            out.push(FOLD_MARKER);
            if end > begin && chars[end - 1] == '\n' {
                out.push('\n');
            }
            cursor = end;
        }
        out.extend(&chars[cursor..]);
        out
    }

    pub fn snapshot(&self) -> Vec<OutlineNode> {
        snapshot(&self.tree)
    }
}

/// A single node in a serialized outline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineNode {
    pub name: String,
    pub source: Span,
    /// Absent when the tree has not been rendered since its last change
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<Span>,
    pub children: Vec<OutlineNode>,
}

impl OutlineNode {
    /// Whether this node has children (can be expanded/collapsed)
    pub fn is_collapsible(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Nested copy of `tree` for serialization
pub fn snapshot(tree: &ScopeTree) -> Vec<OutlineNode> {
    tree.roots().map(outline_node).collect()
}

fn outline_node(scope: ScopeRef<'_>) -> OutlineNode {
    OutlineNode {
        name: scope.name().to_string(),
        source: scope.source_span(),
        display: scope.display_span().ok(),
        children: scope.children().map(outline_node).collect(),
    }
}
