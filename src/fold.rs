//! Fold regions for expanding and collapsing scopes in a rendered outline
//!
//! A [`FoldRegion`] is built on demand from a scope's display span. Toggling
//! it drives a [`SelectionSink`] (the view showing the outline); the scope
//! tree itself is never touched, and always renders fully expanded text.

use crate::span::Span;

/// Instruction sent to the view when a region is toggled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoldCommand {
    Fold,
    Unfold,
}

/// The view-side selection and folding surface
pub trait SelectionSink {
    fn clear_selection(&mut self);

    fn add_selection(&mut self, span: Span);

    /// Apply `command` to the current selection
    fn run(&mut self, command: FoldCommand);
}

/// A scope's display span plus whether the view currently has it folded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoldRegion {
    span: Span,
    anchor: usize,
    name: String,
    folded: bool,
}

impl FoldRegion {
    /// `anchor` is the display offset just past the scope's rendered name
    pub fn new(span: Span, anchor: usize, name: impl Into<String>) -> Self {
        Self {
            span,
            anchor: anchor.clamp(span.begin(), span.end()),
            name: name.into(),
            folded: false,
        }
    }

    /// The full display span of the scope
    pub fn span(&self) -> Span {
        self.span
    }

    /// The part of the display span hidden when folded; the scope's own name
    /// stays visible
    pub fn fold_span(&self) -> Span {
        Span::new(self.anchor, self.span.end())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_folded(&self) -> bool {
        self.folded
    }

    /// Whether folding hides anything beyond the label's line break
    pub fn is_collapsible(&self) -> bool {
        self.fold_span().size() > 1
    }

    /// Fold or unfold this region in `sink`, depending on its current state
    pub fn toggle<S: SelectionSink + ?Sized>(&mut self, sink: &mut S) {
        sink.clear_selection();
        sink.add_selection(self.fold_span());

        let command = if self.folded {
            tracing::info!("Unfolding region {} {}", self.name, self.span);
            FoldCommand::Unfold
        } else {
            tracing::info!("Folding region {} {}", self.name, self.span);
            FoldCommand::Fold
        };
        sink.run(command);

        sink.clear_selection();
        self.folded = !self.folded;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingSink {
        events: Vec<String>,
        selection: Vec<Span>,
    }

    impl SelectionSink for RecordingSink {
        fn clear_selection(&mut self) {
            self.selection.clear();
            self.events.push("clear".to_string());
        }

        fn add_selection(&mut self, span: Span) {
            self.selection.push(span);
            self.events.push(format!("select {}", span));
        }

        fn run(&mut self, command: FoldCommand) {
            self.events.push(format!("{:?} {}", command, self.selection.len()));
        }
    }

    #[test]
    fn test_toggle_selects_past_name_and_alternates() {
        // "root\n    child\n": root spans 0..15, its name ends at 4
        let mut region = FoldRegion::new(Span::new(0, 15), 4, "root");
        let mut sink = RecordingSink::default();

        region.toggle(&mut sink);
        assert!(region.is_folded());
        assert_eq!(
            sink.events,
            vec!["clear", "select (4, 15)", "Fold 1", "clear"]
        );
        assert!(sink.selection.is_empty());

        sink.events.clear();
        region.toggle(&mut sink);
        assert!(!region.is_folded());
        assert_eq!(
            sink.events,
            vec!["clear", "select (4, 15)", "Unfold 1", "clear"]
        );
    }

    #[test]
    fn test_leaf_region_is_not_collapsible() {
        // "leaf\n": only the line break follows the name
        let region = FoldRegion::new(Span::new(0, 5), 4, "leaf");
        assert_eq!(region.fold_span(), Span::new(4, 5));
        assert!(!region.is_collapsible());
    }

    #[test]
    fn test_anchor_is_clamped_to_span() {
        let region = FoldRegion::new(Span::new(10, 20), 30, "x");
        assert_eq!(region.fold_span(), Span::empty(20));
    }
}
