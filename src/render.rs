//! HTML rendering of a sidebar.
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating,
//! so labels coming from declarations and front matter are escaped
//! automatically.
//!
//! Categories render as `<details>`/`<summary>` so collapsing works without
//! JavaScript. A category starts open when it is declared expanded or when
//! it contains the current document. The current item gets
//! `class="current"`.

use crate::docs::ContentCollection;
use crate::tree::{breadcrumb, doc_label};
use crate::types::{Category, CategoryLink, SidebarNode, SidebarTree};
use maud::{Markup, html};

/// URL of a document under `base_url`.
pub fn doc_href(base_url: &str, id: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), id)
}

/// Renders a sidebar as nested lists.
///
/// `current` is the id of the page being viewed, if any.
pub fn render_sidebar(
    tree: &SidebarTree,
    current: Option<&str>,
    docs: Option<&ContentCollection>,
    base_url: &str,
) -> Markup {
    let ctx = RenderContext {
        current,
        docs,
        base_url,
    };
    html! {
        nav.sidebar {
            ul.sidebar-items {
                @for item in &tree.items {
                    (render_item(item, &ctx))
                }
            }
        }
    }
}

/// Renders the breadcrumb for the current document, or nothing when the
/// document is not in this sidebar.
pub fn render_breadcrumb(
    tree: &SidebarTree,
    current: &str,
    docs: Option<&ContentCollection>,
) -> Markup {
    let path = tree.find_by_document_id(current);
    let labels = breadcrumb(&path, docs);
    html! {
        @if !labels.is_empty() {
            nav.breadcrumb aria-label="Breadcrumb" {
                ol {
                    @for label in &labels {
                        li { (label) }
                    }
                }
            }
        }
    }
}

struct RenderContext<'a> {
    current: Option<&'a str>,
    docs: Option<&'a ContentCollection>,
    base_url: &'a str,
}

impl RenderContext<'_> {
    fn is_current(&self, id: &str) -> bool {
        self.current == Some(id)
    }

    fn contains_current(&self, node: &SidebarNode) -> bool {
        self.current.is_some_and(|id| node.contains_document(id))
    }
}

fn render_item(node: &SidebarNode, ctx: &RenderContext) -> Markup {
    match node {
        SidebarNode::Doc(doc) => {
            let is_current = ctx.is_current(&doc.id);
            html! {
                li.sidebar-doc.current[is_current] {
                    a href=(doc_href(ctx.base_url, &doc.id))
                        aria-current=[is_current.then_some("page")] {
                        (doc_label(&doc.id, ctx.docs))
                    }
                }
            }
        }
        SidebarNode::Category(category) => render_category(node, category, ctx),
    }
}

fn render_category(node: &SidebarNode, category: &Category, ctx: &RenderContext) -> Markup {
    let open = !category.collapsed || ctx.contains_current(node);
    let is_current = node.document_id().is_some_and(|id| ctx.is_current(id));
    html! {
        li.sidebar-category.current[is_current] {
            details open[open] {
                summary {
                    @match &category.link {
                        Some(CategoryLink::Doc { id }) => {
                            a href=(doc_href(ctx.base_url, id)) { (category.label) }
                        }
                        Some(CategoryLink::GeneratedIndex(index)) => {
                            a href=(doc_href(ctx.base_url, &index.effective_slug(&category.label)))
                                title=[index.description.as_deref()] {
                                (category.label)
                            }
                        }
                        None => {
                            span.sidebar-group { (category.label) }
                        }
                    }
                }
                @if !category.items.is_empty() {
                    ul {
                        @for child in &category.items {
                            (render_item(child, ctx))
                        }
                    }
                }
            }
        }
    }
}
