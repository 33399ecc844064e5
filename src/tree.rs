//! Read-only queries over a built sidebar tree.
//!
//! All traversal goes through [`Walk`], a depth-first pre-order iterator
//! with an explicit stack: no recursion, so arbitrarily deep trees are
//! walked without risk of overflowing the call stack. A walk borrows the
//! tree and can be restarted at any time by calling [`SidebarTree::walk`]
//! again.

use crate::docs::ContentCollection;
use crate::types::{Category, CategoryLink, GeneratedIndex, SidebarCollection, SidebarNode, SidebarTree};
use std::collections::BTreeSet;

/// A node as seen during a walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visit<'a> {
    pub node: &'a SidebarNode,
    /// 0 for top-level items.
    pub depth: usize,
    /// 1-based position among siblings.
    pub position: usize,
}

struct Frame<'a> {
    parent: Option<&'a SidebarNode>,
    siblings: std::iter::Enumerate<std::slice::Iter<'a, SidebarNode>>,
}

/// Lazy depth-first pre-order iterator over a sidebar tree.
pub struct Walk<'a> {
    stack: Vec<Frame<'a>>,
}

impl<'a> Walk<'a> {
    fn new(items: &'a [SidebarNode]) -> Self {
        Self {
            stack: vec![Frame {
                parent: None,
                siblings: items.iter().enumerate(),
            }],
        }
    }

    /// Ancestors of the node at `depth` that was just yielded, root first.
    ///
    /// Only valid right after `next()` returned a visit at that depth: the
    /// frames below it are exactly that node's open ancestors.
    fn ancestors(&self, depth: usize) -> impl Iterator<Item = &'a SidebarNode> + '_ {
        self.stack[1..=depth].iter().filter_map(|frame| frame.parent)
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = Visit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let frame = self.stack.last_mut()?;
            match frame.siblings.next() {
                Some((i, node)) => {
                    let depth = self.stack.len() - 1;
                    if let SidebarNode::Category(category) = node {
                        self.stack.push(Frame {
                            parent: Some(node),
                            siblings: category.items.iter().enumerate(),
                        });
                    }
                    return Some(Visit {
                        node,
                        depth,
                        position: i + 1,
                    });
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

/// A page a reader can land on, in sidebar reading order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavPage<'a> {
    /// A document, either a doc ref or a category's `doc` link.
    Doc { id: &'a str },
    /// A category's generated landing page.
    GeneratedIndex {
        label: &'a str,
        index: &'a GeneratedIndex,
    },
}

impl NavPage<'_> {
    /// Document id for doc pages, published slug for generated indexes.
    pub fn target(&self) -> String {
        match self {
            NavPage::Doc { id } => id.to_string(),
            NavPage::GeneratedIndex { label, index } => index.effective_slug(label),
        }
    }
}

/// Previous/next pages around a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pagination<'a> {
    pub previous: Option<NavPage<'a>>,
    pub next: Option<NavPage<'a>>,
}

impl SidebarNode {
    /// Whether this node or anything below it references `id`.
    pub fn contains_document(&self, id: &str) -> bool {
        self.document_id() == Some(id)
            || Walk::new(self.children()).any(|visit| visit.node.document_id() == Some(id))
    }
}

impl SidebarTree {
    /// Start a fresh pre-order walk.
    pub fn walk(&self) -> Walk<'_> {
        Walk::new(&self.items)
    }

    /// Call `visitor` for every node in pre-order.
    pub fn traverse<'a, F>(&'a self, mut visitor: F)
    where
        F: FnMut(Visit<'a>),
    {
        for visit in self.walk() {
            visitor(visit);
        }
    }

    /// Every document id referenced by the tree: doc refs and category
    /// `doc` links.
    pub fn resolve_document_ids(&self) -> BTreeSet<&str> {
        self.walk()
            .filter_map(|visit| visit.node.document_id())
            .collect()
    }

    /// Root-to-target path for the first node (in pre-order) that
    /// references `id`. The last element is the node itself. Empty when no
    /// node references `id`.
    pub fn find_by_document_id(&self, id: &str) -> Vec<&SidebarNode> {
        let mut walk = self.walk();
        while let Some(visit) = walk.next() {
            if visit.node.document_id() == Some(id) {
                let mut path: Vec<&SidebarNode> = walk.ancestors(visit.depth).collect();
                path.push(visit.node);
                return path;
            }
        }
        Vec::new()
    }

    /// Navigable pages in reading order.
    ///
    /// A category contributes its linked doc or generated index before its
    /// children; unlinked categories contribute nothing themselves.
    pub fn pages(&self) -> Vec<NavPage<'_>> {
        self.walk()
            .filter_map(|visit| match visit.node {
                SidebarNode::Doc(doc) => Some(NavPage::Doc { id: &doc.id }),
                SidebarNode::Category(Category {
                    label, link: Some(link), ..
                }) => Some(match link {
                    CategoryLink::Doc { id } => NavPage::Doc { id },
                    CategoryLink::GeneratedIndex(index) => NavPage::GeneratedIndex { label, index },
                }),
                SidebarNode::Category(_) => None,
            })
            .collect()
    }

    /// Previous and next pages around the first occurrence of `id`.
    ///
    /// Returns `None` when the document is not in this tree.
    pub fn pagination(&self, id: &str) -> Option<Pagination<'_>> {
        let pages = self.pages();
        let at = pages
            .iter()
            .position(|page| matches!(page, NavPage::Doc { id: page_id } if *page_id == id))?;
        Some(Pagination {
            previous: at.checked_sub(1).map(|i| pages[i]),
            next: pages.get(at + 1).copied(),
        })
    }
}

impl SidebarCollection {
    /// Every document id referenced by any sidebar.
    pub fn resolve_document_ids(&self) -> BTreeSet<&str> {
        self.sidebars
            .values()
            .flat_map(|tree| tree.resolve_document_ids())
            .collect()
    }

    /// Sidebars containing `id`, each with the path to it.
    pub fn locate(&self, id: &str) -> Vec<(&str, Vec<&SidebarNode>)> {
        self.iter()
            .filter_map(|(name, tree)| {
                let path = tree.find_by_document_id(id);
                (!path.is_empty()).then_some((name, path))
            })
            .collect()
    }
}

/// Display label for a node.
///
/// Categories carry their own label. Doc refs are labelled from the content
/// collection when one is available, otherwise from their id.
pub fn node_label(node: &SidebarNode, docs: Option<&ContentCollection>) -> String {
    match node {
        SidebarNode::Category(category) => category.label.clone(),
        SidebarNode::Doc(doc) => doc_label(&doc.id, docs),
    }
}

pub fn doc_label(id: &str, docs: Option<&ContentCollection>) -> String {
    docs.and_then(|docs| docs.get(id))
        .map(|entry| entry.label.clone())
        .unwrap_or_else(|| crate::naming::label_from_id(id))
}

/// Labels along a path returned by [`SidebarTree::find_by_document_id`].
pub fn breadcrumb(path: &[&SidebarNode], docs: Option<&ContentCollection>) -> Vec<String> {
    path.iter().map(|node| node_label(node, docs)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::construct;
    use crate::test_helpers::*;
    use serde_json::json;

    fn tree(items: serde_json::Value) -> SidebarTree {
        construct([("docs", items)])
            .unwrap()
            .get("docs")
            .cloned()
            .unwrap()
    }

    fn sample() -> SidebarTree {
        tree(json!([
            {
                "type": "category",
                "label": "Getting Started",
                "items": ["intro/overview", "intro/what-is"],
            },
            {
                "type": "category",
                "label": "SDK",
                "link": {"type": "doc", "id": "sdk/installation"},
                "items": [
                    {
                        "type": "category",
                        "label": "Migrations",
                        "link": {"type": "generated-index", "title": "Migrations"},
                        "items": ["sdk/migrations/6.0.0"],
                    },
                ],
            },
            "faq",
        ]))
    }

    #[test]
    fn walk_is_pre_order_with_depth_and_position() {
        let tree = sample();
        let seen: Vec<(String, usize, usize)> = tree
            .walk()
            .map(|v| (node_label(v.node, None), v.depth, v.position))
            .collect();
        assert_eq!(
            seen,
            vec![
                ("Getting Started".to_string(), 0, 1),
                ("overview".to_string(), 1, 1),
                ("what is".to_string(), 1, 2),
                ("SDK".to_string(), 0, 2),
                ("Migrations".to_string(), 1, 1),
                ("6.0.0".to_string(), 2, 1),
                ("faq".to_string(), 0, 3),
            ]
        );
    }

    #[test]
    fn walk_visits_every_node_once() {
        let tree = sample();
        assert_eq!(tree.walk().count(), 7);
        let categories = tree
            .walk()
            .filter(|v| matches!(v.node, SidebarNode::Category(_)))
            .count();
        assert_eq!(categories, 3);
    }

    #[test]
    fn walk_is_restartable() {
        let tree = sample();
        let first: Vec<_> = tree.walk().collect();
        let second: Vec<_> = tree.walk().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn traverse_calls_visitor_in_order() {
        let tree = sample();
        let mut depths = Vec::new();
        tree.traverse(|visit| depths.push(visit.depth));
        assert_eq!(depths, vec![0, 1, 1, 0, 1, 2, 0]);
    }

    #[test]
    fn empty_tree_walks_nothing() {
        assert_eq!(SidebarTree::default().walk().count(), 0);
    }

    #[test]
    fn resolve_ids_for_single_nested_doc() {
        let tree = tree(json!([{"type": "category", "label": "X", "items": ["a"]}]));
        assert_eq!(tree.resolve_document_ids(), BTreeSet::from(["a"]));
    }

    #[test]
    fn resolve_ids_includes_category_doc_links() {
        let tree = sample();
        let ids = tree.resolve_document_ids();
        assert_eq!(
            ids.into_iter().collect::<Vec<_>>(),
            vec![
                "faq",
                "intro/overview",
                "intro/what-is",
                "sdk/installation",
                "sdk/migrations/6.0.0",
            ]
        );
    }

    #[test]
    fn find_returns_root_to_leaf_path() {
        let tree = tree(json!([{"type": "category", "label": "X", "items": ["a"]}]));
        let path = tree.find_by_document_id("a");
        assert_eq!(path.len(), 2);
        assert_eq!(path[0].as_category().map(|c| c.label.as_str()), Some("X"));
        assert_eq!(path[1].document_id(), Some("a"));
        assert!(tree.find_by_document_id("missing").is_empty());
    }

    #[test]
    fn find_deep_path_after_siblings_closed() {
        let tree = sample();
        let path = tree.find_by_document_id("sdk/migrations/6.0.0");
        assert_eq!(breadcrumb(&path, None), vec!["SDK", "Migrations", "6.0.0"]);
    }

    #[test]
    fn find_matches_category_doc_link() {
        let tree = sample();
        let path = tree.find_by_document_id("sdk/installation");
        assert_eq!(breadcrumb(&path, None), vec!["SDK"]);
    }

    #[test]
    fn find_top_level_doc() {
        let tree = sample();
        assert_eq!(breadcrumb(&tree.find_by_document_id("faq"), None), vec!["faq"]);
    }

    #[test]
    fn contains_document_searches_subtree() {
        let tree = sample();
        let sdk = &tree.items[1];
        assert!(sdk.contains_document("sdk/installation"));
        assert!(sdk.contains_document("sdk/migrations/6.0.0"));
        assert!(!sdk.contains_document("faq"));
    }

    #[test]
    fn pages_in_reading_order() {
        let tree = sample();
        let targets: Vec<String> = tree.pages().iter().map(NavPage::target).collect();
        assert_eq!(
            targets,
            vec![
                "intro/overview",
                "intro/what-is",
                "sdk/installation",
                "category/migrations",
                "sdk/migrations/6.0.0",
                "faq",
            ]
        );
    }

    #[test]
    fn pagination_around_doc() {
        let tree = sample();
        let around = tree.pagination("sdk/installation").unwrap();
        assert_eq!(around.previous, Some(NavPage::Doc { id: "intro/what-is" }));
        assert_eq!(
            around.next.map(|p| p.target()),
            Some("category/migrations".to_string())
        );

        let first = tree.pagination("intro/overview").unwrap();
        assert_eq!(first.previous, None);
        let last = tree.pagination("faq").unwrap();
        assert_eq!(last.next, None);
        assert!(tree.pagination("missing").is_none());
    }

    #[test]
    fn ten_levels_deep() {
        let mut items = json!(["deep/leaf"]);
        for level in (0..10).rev() {
            items = json!([{"type": "category", "label": format!("Level {level}"), "items": items}]);
        }
        let tree = tree(items);
        let visits: Vec<_> = tree.walk().collect();
        assert_eq!(visits.len(), 11);
        assert_eq!(visits.last().unwrap().depth, 10);
        assert_eq!(tree.find_by_document_id("deep/leaf").len(), 11);
    }

    #[test]
    fn collection_locate_and_ids() {
        let collection = construct([
            ("docs", json!(["shared", "docs/only"])),
            ("api", json!([{"type": "category", "label": "API", "items": ["shared"]}])),
        ])
        .unwrap();
        let found = collection.locate("shared");
        let names: Vec<&str> = found.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, vec!["api", "docs"]);
        assert_eq!(found[0].1.len(), 2);
        assert_eq!(collection.resolve_document_ids().len(), 2);
        assert!(collection.locate("nope").is_empty());
    }

    #[test]
    fn doc_labels_come_from_content() {
        let tmp = setup_fixtures();
        let docs = scan_fixture_docs(tmp.path());
        assert_eq!(doc_label("intro/overview", Some(&docs)), "Overview");
        assert_eq!(doc_label("not/there", Some(&docs)), "there");
    }

    #[test]
    fn fixture_tree_shape() {
        let tmp = setup_fixtures();
        let sidebars = load_fixture_sidebars(tmp.path());
        let tree = sidebars.get("docs").unwrap();

        let sdk = find_category(tree, "Installing the Lit SDK");
        assert_eq!(child_category_labels(sdk), vec!["Migrating from earlier versions"]);
        let migrations = find_category(tree, "Migrating from earlier versions");
        assert_eq!(
            child_category_labels(migrations),
            vec!["Migrating from 2.x.x to 3.x.x"]
        );

        let docs = scan_fixture_docs(tmp.path());
        let path = tree.find_by_document_id("sdk/migrations/3.0.0/changes");
        assert_eq!(
            breadcrumb(&path, Some(&docs)),
            vec![
                "Installing the Lit SDK",
                "Migrating from earlier versions",
                "Migrating from 2.x.x to 3.x.x",
                "Changes in 3.0.0",
            ]
        );
    }

    #[test]
    fn collection_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SidebarCollection>();
    }
}
