//! # docs-sidebar
//!
//! Validated navigation trees ("sidebars") for static documentation sites.
//!
//! A documentation site declares its sidebars in a config file: named
//! trees of categories and document references, with optional generated
//! landing pages for categories. This crate turns that declaration into a
//! typed, immutable tree, rejects malformed declarations up front, and
//! answers the questions a site renderer asks of it.
//!
//! # Pipeline
//!
//! ```text
//! 1. Load      sidebars.json  →  SidebarCollection   (declaration → validated tree)
//! 2. Scan      docs/          →  ContentCollection   (files → known document ids)
//! 3. Check     both           →  CheckReport         (missing / unlisted documents)
//! 4. Query     tree           →  walk, paths, pagination, text/HTML output
//! ```
//!
//! The tree model (steps 1 and 4) never touches the filesystem. Scanning
//! and checking are separate so a caller that already knows its documents
//! can build a [`docs::ContentCollection`] directly.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | The tree model: `SidebarCollection`, `SidebarTree`, `SidebarNode` |
//! | [`declaration`] | `construct`: declaration validation, JSON/TOML loading |
//! | [`tree`] | Pre-order walks, document id resolution, paths, pagination |
//! | [`docs`] | Docs directory scanning into a content collection |
//! | [`check`] | Cross-check of sidebars against the content collection |
//! | [`naming`] | Number-prefix stripping, fallback labels, slugs |
//! | [`config`] | `docs-sidebar.toml` loading, validation, merging |
//! | [`output`] | CLI output formatting |
//! | [`render`] | HTML sidebar and breadcrumb markup via Maud |
//!
//! # Design Decisions
//!
//! ## Explicit Node Variants
//!
//! Declarations mix shapes: a bare string is a doc ref, an object is a doc
//! ref or a category depending on its `type`. [`declaration::construct`]
//! resolves every item into [`types::SidebarNode::Doc`] or
//! [`types::SidebarNode::Category`] once, and rejects anything it can't
//! classify. Downstream code matches on an enum instead of re-inspecting
//! JSON.
//!
//! ## Build Once, Share Freely
//!
//! A collection has no interior mutability and no global registry. Load it
//! at startup, then pass `&SidebarCollection` (or an `Arc`) to whatever
//! needs it; concurrent readers need no locks.
//!
//! ## No Recursion Limits
//!
//! Construction and [`tree::Walk`] use explicit stacks, and
//! [`declaration::parse_json`] lifts serde_json's recursion limit and grows
//! its stack on demand, so loading and querying have no fixed nesting
//! depth. Derived comparison, cloning and dropping, serialization and HTML
//! rendering still recurse once per category level; they are fine for
//! thousands of levels on a default thread stack.

pub mod check;
pub mod config;
pub mod declaration;
pub mod docs;
pub mod naming;
pub mod output;
pub mod render;
pub mod tree;
pub mod types;

pub use declaration::{LoadError, ValidationError, construct};
pub use types::{
    Category, CategoryLink, DocRef, GeneratedIndex, SidebarCollection, SidebarNode, SidebarTree,
};

#[cfg(test)]
pub(crate) mod test_helpers;
