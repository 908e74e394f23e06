//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::path::PathBuf;

use scope_tree::{ScopeTree, Span};

/// Build a tree over a document of `len` offsets, inserting `scopes` in order
pub fn tree_from(len: usize, scopes: &[(usize, usize, &str)]) -> ScopeTree {
    let mut tree = ScopeTree::new(len);
    for &(begin, end, name) in scopes {
        tree.insert(Span::new(begin, end), name)
            .unwrap_or_else(|e| panic!("inserting {}: {}", name, e));
    }
    tree
}

/// root > child1 > child3, root > child2 > child4, inserted out of order
pub fn nested_tree() -> ScopeTree {
    tree_from(
        10,
        &[
            (0, 10, "root"),
            (1, 5, "child1"),
            (6, 9, "child2"),
            (2, 4, "child3"),
            (7, 8, "child4"),
        ],
    )
}

pub fn sample_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("samples")
        .join(name)
}

/// Contents of a file under `samples/`
pub fn sample(name: &str) -> String {
    let path = sample_path(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("reading {}: {}", path.display(), e))
}
