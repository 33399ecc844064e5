//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Every sidebar entry leads with its positional index and display label;
//! the document id or generated-index slug behind it follows as an indented
//! context line. The output reads as a table of contents while still letting
//! users trace each entry back to a file.
//!
//! # Output Format
//!
//! ## Tree
//!
//! ```text
//! docs
//! 001 Getting Started
//!     001 Overview
//!         Doc: intro/overview
//! 002 Installing the Lit SDK (expanded)
//!     Doc: sdk/installation
//!     001 Migrating from earlier versions
//!         Index: category/migrating-from-earlier-versions
//! ```
//!
//! ## Check
//!
//! ```text
//! Missing documents
//!     docs: sdk/gone
//!         Path: SDK → gone
//!
//! Unlisted documents
//!     resources/glossary
//!
//! 12 documents referenced, 1 missing, 1 unlisted
//! ```
//!
//! # Architecture
//!
//! Each view has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.

use crate::check::CheckReport;
use crate::config::RenderConfig;
use crate::docs::ContentCollection;
use crate::tree::{NavPage, Pagination, breadcrumb, doc_label};
use crate::types::{CategoryLink, SidebarNode, SidebarTree};

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string for a depth level.
fn indent(depth: usize, width: usize) -> String {
    " ".repeat(depth * width)
}

/// Format an entry header: optional positional index + label.
fn entry_header(position: usize, label: &str, numbered: bool) -> String {
    if numbered {
        format!("{} {}", format_index(position), label)
    } else {
        label.to_string()
    }
}

/// Context line for a document reference, flagging ids the content
/// collection doesn't know.
fn doc_line(id: &str, docs: Option<&ContentCollection>) -> String {
    match docs {
        Some(docs) if !docs.contains(id) => format!("Doc: {} (missing)", id),
        _ => format!("Doc: {}", id),
    }
}

// ============================================================================
// Tree
// ============================================================================

/// Format one sidebar as an indented table of contents.
pub fn format_tree_output(
    name: &str,
    tree: &SidebarTree,
    docs: Option<&ContentCollection>,
    render: &RenderConfig,
) -> Vec<String> {
    let mut lines = vec![name.to_string()];
    let width = render.indent_width;

    for visit in tree.walk() {
        let base_indent = indent(visit.depth, width);
        let context_indent = indent(visit.depth + 1, width);
        match visit.node {
            SidebarNode::Doc(doc) => {
                let label = doc_label(&doc.id, docs);
                lines.push(format!(
                    "{}{}",
                    base_indent,
                    entry_header(visit.position, &label, render.numbered)
                ));
                lines.push(format!("{}{}", context_indent, doc_line(&doc.id, docs)));
            }
            SidebarNode::Category(category) => {
                let expanded = if category.collapsed { "" } else { " (expanded)" };
                lines.push(format!(
                    "{}{}{}",
                    base_indent,
                    entry_header(visit.position, &category.label, render.numbered),
                    expanded
                ));
                match &category.link {
                    Some(CategoryLink::Doc { id }) => {
                        lines.push(format!("{}{}", context_indent, doc_line(id, docs)));
                    }
                    Some(CategoryLink::GeneratedIndex(index)) => {
                        lines.push(format!(
                            "{}Index: {}",
                            context_indent,
                            index.effective_slug(&category.label)
                        ));
                    }
                    None => {}
                }
            }
        }
    }

    lines
}

/// Print a sidebar tree to stdout.
pub fn print_tree_output(
    name: &str,
    tree: &SidebarTree,
    docs: Option<&ContentCollection>,
    render: &RenderConfig,
) {
    for line in format_tree_output(name, tree, docs, render) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

/// Format a cross-check report.
pub fn format_check_output(report: &CheckReport) -> Vec<String> {
    let mut lines = Vec::new();

    if !report.missing.is_empty() {
        lines.push("Missing documents".to_string());
        for missing in &report.missing {
            lines.push(format!("    {}: {}", missing.sidebar, missing.id));
            lines.push(format!("        Path: {}", missing.breadcrumb.join(" → ")));
        }
        lines.push(String::new());
    }

    if !report.unlisted.is_empty() {
        lines.push("Unlisted documents".to_string());
        for id in &report.unlisted {
            lines.push(format!("    {}", id));
        }
        lines.push(String::new());
    }

    lines.push(format!(
        "{} {} referenced, {} missing, {} unlisted",
        report.referenced,
        plural(report.referenced, "document", "documents"),
        report.missing.len(),
        report.unlisted.len()
    ));
    lines
}

pub fn print_check_output(report: &CheckReport) {
    for line in format_check_output(report) {
        println!("{}", line);
    }
}

fn plural<'a>(n: usize, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 { one } else { many }
}

// ============================================================================
// Locate
// ============================================================================

/// Format where a document sits: one block per sidebar, with breadcrumb and
/// previous/next pages.
pub fn format_locate_output(
    id: &str,
    found: &[(&str, Vec<&SidebarNode>, Option<Pagination<'_>>)],
    docs: Option<&ContentCollection>,
) -> Vec<String> {
    if found.is_empty() {
        return vec![format!("{} is not in any sidebar", id)];
    }

    let mut lines = Vec::new();
    for (name, path, pagination) in found {
        lines.push(name.to_string());
        lines.push(format!("    Path: {}", breadcrumb(path, docs).join(" → ")));
        if let Some(pagination) = pagination {
            if let Some(previous) = &pagination.previous {
                lines.push(format!("    Previous: {}", page_line(previous, docs)));
            }
            if let Some(next) = &pagination.next {
                lines.push(format!("    Next: {}", page_line(next, docs)));
            }
        }
    }
    lines
}

pub fn print_locate_output(
    id: &str,
    found: &[(&str, Vec<&SidebarNode>, Option<Pagination<'_>>)],
    docs: Option<&ContentCollection>,
) {
    for line in format_locate_output(id, found, docs) {
        println!("{}", line);
    }
}

fn page_line(page: &NavPage<'_>, docs: Option<&ContentCollection>) -> String {
    match page {
        NavPage::Doc { id } => format!("{} ({})", doc_label(id, docs), id),
        NavPage::GeneratedIndex { label, .. } => format!("{} ({})", label, page.target()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::MissingDoc;
    use crate::declaration::construct;
    use serde_json::json;

    fn sample() -> SidebarTree {
        construct([(
            "docs",
            json!([
                {"type": "category", "label": "Getting Started", "items": ["intro/overview"]},
                {
                    "type": "category",
                    "label": "SDK",
                    "collapsed": false,
                    "link": {"type": "doc", "id": "sdk/installation"},
                    "items": [{
                        "type": "category",
                        "label": "Migrations",
                        "link": {"type": "generated-index", "title": "Migrations"},
                    }],
                },
            ]),
        )])
        .unwrap()
        .get("docs")
        .cloned()
        .unwrap()
    }

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(1000), "1000");
    }

    #[test]
    fn tree_output_layout() {
        let lines = format_tree_output("docs", &sample(), None, &RenderConfig::default());
        assert_eq!(
            lines,
            vec![
                "docs",
                "001 Getting Started",
                "    001 overview",
                "        Doc: intro/overview",
                "002 SDK (expanded)",
                "    Doc: sdk/installation",
                "    001 Migrations",
                "        Index: category/migrations",
            ]
        );
    }

    #[test]
    fn tree_output_unnumbered_with_custom_indent() {
        let render = RenderConfig {
            indent_width: 2,
            numbered: false,
            ..RenderConfig::default()
        };
        let lines = format_tree_output("docs", &sample(), None, &render);
        assert_eq!(lines[2], "  overview");
        assert_eq!(lines[3], "    Doc: intro/overview");
    }

    #[test]
    fn tree_output_uses_doc_labels_and_flags_missing() {
        let docs = ContentCollection::from_ids(["intro/overview"]);
        let lines = format_tree_output("docs", &sample(), Some(&docs), &RenderConfig::default());
        assert!(lines.contains(&"        Doc: intro/overview".to_string()));
        assert!(lines.contains(&"    Doc: sdk/installation (missing)".to_string()));
    }

    #[test]
    fn check_output_sections() {
        let report = CheckReport {
            missing: vec![MissingDoc {
                sidebar: "docs".to_string(),
                id: "sdk/gone".to_string(),
                breadcrumb: vec!["SDK".to_string(), "gone".to_string()],
            }],
            unlisted: vec!["resources/glossary".to_string()],
            referenced: 12,
        };
        assert_eq!(
            format_check_output(&report),
            vec![
                "Missing documents",
                "    docs: sdk/gone",
                "        Path: SDK → gone",
                "",
                "Unlisted documents",
                "    resources/glossary",
                "",
                "12 documents referenced, 1 missing, 1 unlisted",
            ]
        );
    }

    #[test]
    fn check_output_clean() {
        let report = CheckReport {
            referenced: 1,
            ..CheckReport::default()
        };
        assert_eq!(
            format_check_output(&report),
            vec!["1 document referenced, 0 missing, 0 unlisted"]
        );
    }

    #[test]
    fn locate_output_with_pagination() {
        let tree = sample();
        let path = tree.find_by_document_id("sdk/installation");
        let pagination = tree.pagination("sdk/installation");
        let lines = format_locate_output("sdk/installation", &[("docs", path, pagination)], None);
        assert_eq!(
            lines,
            vec![
                "docs",
                "    Path: SDK",
                "    Previous: overview (intro/overview)",
                "    Next: Migrations (category/migrations)",
            ]
        );
    }

    #[test]
    fn locate_output_not_found() {
        assert_eq!(
            format_locate_output("nope", &[], None),
            vec!["nope is not in any sidebar"]
        );
    }
}
