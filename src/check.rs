//! Cross-check sidebars against the content collection.
//!
//! The sidebar model only guarantees structure. Whether every referenced
//! document exists is a question for the content collection, answered here:
//!
//! - **missing**: a sidebar references an id with no document. Always an
//!   error; the site build would fail on it.
//! - **unlisted**: a document no sidebar references. Reachable by URL but
//!   absent from navigation, which is sometimes intended, so it only fails
//!   the check when configured to.

use crate::docs::ContentCollection;
use crate::tree::breadcrumb;
use crate::types::SidebarCollection;
use serde::Serialize;
use std::collections::BTreeSet;

/// A sidebar reference to a document that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingDoc {
    pub sidebar: String,
    pub id: String,
    /// Labels from the sidebar root down to the referencing node.
    pub breadcrumb: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    pub missing: Vec<MissingDoc>,
    pub unlisted: Vec<String>,
    /// Number of distinct document ids referenced across all sidebars.
    pub referenced: usize,
}

impl CheckReport {
    /// True when every reference resolves.
    pub fn is_ok(&self) -> bool {
        self.missing.is_empty()
    }

    /// True when every reference resolves and, if `strict`, every document
    /// is listed somewhere.
    pub fn passes(&self, strict: bool) -> bool {
        self.is_ok() && (!strict || self.unlisted.is_empty())
    }
}

/// Compare every sidebar against the known documents.
///
/// Missing references are reported once per sidebar and id, in sidebar
/// name order then id order.
pub fn check(sidebars: &SidebarCollection, docs: &ContentCollection) -> CheckReport {
    let mut missing = Vec::new();
    let mut referenced = BTreeSet::new();

    for (name, tree) in sidebars.iter() {
        for id in tree.resolve_document_ids() {
            referenced.insert(id);
            if !docs.contains(id) {
                let path = tree.find_by_document_id(id);
                missing.push(MissingDoc {
                    sidebar: name.to_string(),
                    id: id.to_string(),
                    breadcrumb: breadcrumb(&path, Some(docs)),
                });
            }
        }
    }

    let unlisted = docs
        .ids()
        .filter(|id| !referenced.contains(id))
        .map(str::to_string)
        .collect();

    CheckReport {
        missing,
        unlisted,
        referenced: referenced.len(),
    }
}
