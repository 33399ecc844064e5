//! Shared test utilities for the docs-sidebar test suite.
//!
//! Provides fixture setup and lookup helpers over the fixture site in
//! `fixtures/site/`: a `sidebars.json` declaration and the `docs/` tree it
//! references.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let sidebars = load_fixture_sidebars(tmp.path());
//! let docs = scan_fixture_docs(tmp.path());
//!
//! let sdk = find_category(sidebars.get("docs").unwrap(), "Installing the Lit SDK");
//! assert_eq!(sdk.items.len(), 1);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::config::DocsConfig;
use crate::declaration;
use crate::docs::{self, ContentCollection};
use crate::types::{Category, SidebarCollection, SidebarTree};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/site/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/site");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Load `sidebars.json` from a fixture copy. Panics on any error.
pub fn load_fixture_sidebars(root: &Path) -> SidebarCollection {
    declaration::load(&root.join("sidebars.json"))
        .unwrap_or_else(|e| panic!("fixture sidebars failed to load: {e}"))
}

/// Scan `docs/` in a fixture copy with the default extensions.
pub fn scan_fixture_docs(root: &Path) -> ContentCollection {
    docs::scan_docs(&root.join("docs"), &DocsConfig::default().extensions)
        .unwrap_or_else(|e| panic!("fixture docs failed to scan: {e}"))
}

// =========================================================================
// Tree lookups — panics with a clear message on miss
// =========================================================================

/// Find a category anywhere in the tree by label. Panics if not found.
pub fn find_category<'a>(tree: &'a SidebarTree, label: &str) -> &'a Category {
    tree.walk()
        .filter_map(|visit| visit.node.as_category())
        .find(|category| category.label == label)
        .unwrap_or_else(|| {
            let labels: Vec<&str> = tree
                .walk()
                .filter_map(|visit| visit.node.as_category())
                .map(|category| category.label.as_str())
                .collect();
            panic!("category '{label}' not found. Available: {labels:?}")
        })
}

/// Labels of a category's direct child categories, in order.
pub fn child_category_labels(category: &Category) -> Vec<&str> {
    category
        .items
        .iter()
        .filter_map(|node| node.as_category())
        .map(|child| child.label.as_str())
        .collect()
}
