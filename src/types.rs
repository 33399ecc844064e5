//! The sidebar tree model.
//!
//! These types are only ever produced by [`crate::declaration::construct`],
//! which validates the raw declaration first. Once built, a
//! [`SidebarCollection`] is immutable: every query in [`crate::tree`] takes
//! `&self`, so a collection can be shared between threads behind a plain
//! reference or an `Arc` with no locking.
//!
//! Serialization goes back to the declaration form (doc refs as bare
//! strings, categories as `{"type": "category", ...}` objects), so a
//! collection written out with `serde_json` can be constructed again.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;

/// Named sidebars, keyed by sidebar name.
///
/// Names are unique by construction. The map order (alphabetical) carries
/// no meaning; order *within* each tree does.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SidebarCollection {
    pub(crate) sidebars: BTreeMap<String, SidebarTree>,
}

impl SidebarCollection {
    /// Look up a sidebar by name.
    pub fn get(&self, name: &str) -> Option<&SidebarTree> {
        self.sidebars.get(name)
    }

    /// Iterate `(name, tree)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SidebarTree)> {
        self.sidebars.iter().map(|(name, tree)| (name.as_str(), tree))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sidebars.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.sidebars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sidebars.is_empty()
    }
}

impl Serialize for SidebarCollection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sidebars.len()))?;
        for (name, tree) in &self.sidebars {
            map.serialize_entry(name, tree)?;
        }
        map.end()
    }
}

/// One sidebar: the top-level nodes in display order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SidebarTree {
    pub items: Vec<SidebarNode>,
}

impl SidebarTree {
    pub fn new(items: Vec<SidebarNode>) -> Self {
        Self { items }
    }
}

impl Serialize for SidebarTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

/// A node in a sidebar tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarNode {
    /// Leaf pointing at a document. The display label lives with the
    /// document, not here.
    Doc(DocRef),
    /// Grouping node with its own label and children.
    Category(Category),
}

impl SidebarNode {
    /// Document id referenced by this node, if any.
    ///
    /// For a category this is the id of its `doc` link; generated-index
    /// pages and unlinked categories reference no document.
    pub fn document_id(&self) -> Option<&str> {
        match self {
            SidebarNode::Doc(doc) => Some(&doc.id),
            SidebarNode::Category(category) => match &category.link {
                Some(CategoryLink::Doc { id }) => Some(id),
                _ => None,
            },
        }
    }

    /// Children of a category; empty for doc refs.
    pub fn children(&self) -> &[SidebarNode] {
        match self {
            SidebarNode::Doc(_) => &[],
            SidebarNode::Category(category) => &category.items,
        }
    }

    pub fn as_category(&self) -> Option<&Category> {
        match self {
            SidebarNode::Category(category) => Some(category),
            SidebarNode::Doc(_) => None,
        }
    }
}

impl Serialize for SidebarNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SidebarNode::Doc(doc) => serializer.serialize_str(&doc.id),
            SidebarNode::Category(category) => category.serialize(serializer),
        }
    }
}

/// Leaf reference to a document by its path-like id (`sdk/installation`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocRef {
    pub id: String,
}

/// A grouping node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// Display text. Never empty.
    pub label: String,
    /// Whether the category starts collapsed. Defaults to `true`.
    pub collapsed: bool,
    /// Page shown when the category itself is clicked.
    pub link: Option<CategoryLink>,
    pub items: Vec<SidebarNode>,
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("type", "category")?;
        map.serialize_entry("label", &self.label)?;
        map.serialize_entry("collapsed", &self.collapsed)?;
        if let Some(link) = &self.link {
            map.serialize_entry("link", link)?;
        }
        map.serialize_entry("items", &self.items)?;
        map.end()
    }
}

/// What a category links to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryLink {
    /// An existing document.
    Doc { id: String },
    /// A landing page synthesized from metadata, listing the children.
    GeneratedIndex(GeneratedIndex),
}

impl Serialize for CategoryLink {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        match self {
            CategoryLink::Doc { id } => {
                map.serialize_entry("type", "doc")?;
                map.serialize_entry("id", id)?;
            }
            CategoryLink::GeneratedIndex(index) => {
                map.serialize_entry("type", "generated-index")?;
                map.serialize_entry("title", &index.title)?;
                if let Some(description) = &index.description {
                    map.serialize_entry("description", description)?;
                }
                if !index.keywords.is_empty() {
                    map.serialize_entry("keywords", &index.keywords)?;
                }
                if let Some(slug) = &index.slug {
                    map.serialize_entry("slug", slug)?;
                }
            }
        }
        map.end()
    }
}

/// Metadata for a generated category landing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedIndex {
    pub title: String,
    pub description: Option<String>,
    /// Keywords in declaration order.
    pub keywords: Vec<String>,
    /// Explicit URL slug. When absent, one is derived from the category
    /// label (see [`GeneratedIndex::effective_slug`]).
    pub slug: Option<String>,
}

impl GeneratedIndex {
    /// The slug the landing page is published under.
    ///
    /// - `slug: "/migrations"` → `"migrations"`
    /// - no slug, label `"Lit Actions"` → `"category/lit-actions"`
    pub fn effective_slug(&self, category_label: &str) -> String {
        match &self.slug {
            Some(slug) => slug.trim_matches('/').to_string(),
            None => format!("category/{}", crate::naming::slugify(category_label)),
        }
    }
}
