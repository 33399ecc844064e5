//! Content collection: the documents a sidebar may reference.
//!
//! The sidebar model never touches the filesystem; this module is the
//! bridge that turns a docs directory into the set of known document ids,
//! so references can be cross-checked ([`crate::check`]) and doc refs can
//! be given display labels.
//!
//! ## Document Ids
//!
//! ```text
//! docs/
//! ├── 01-intro/
//! │   ├── 010-overview.md        → intro/overview
//! │   └── what-is.mdx            → intro/what-is
//! ├── sdk/
//! │   ├── installation.md        → sdk/installation
//! │   └── migrations/
//! │       └── 6.0.0.md           → sdk/migrations/6.0.0
//! ├── _partials/                 # skipped (underscore prefix)
//! └── .drafts/                   # skipped (hidden)
//! ```
//!
//! Number prefixes are stripped per segment (see [`crate::naming`]). A
//! front matter `id:` replaces the last segment of the id.
//!
//! ## Labels
//!
//! First available wins: front matter `sidebar_label`, front matter
//! `title`, first `# heading`, then the id's last segment.

use crate::naming;
use pulldown_cmark::{Event, HeadingLevel, MetadataBlockKind, Options, Parser, Tag, TagEnd};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

#[derive(Error, Debug)]
pub enum DocsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Docs directory not found: {0}")]
    MissingRoot(PathBuf),
    #[error("Duplicate document id `{id}`: {first} and {second}")]
    DuplicateId {
        id: String,
        first: PathBuf,
        second: PathBuf,
    },
}

/// A document discovered in the docs directory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocEntry {
    pub id: String,
    /// Label shown for doc refs pointing at this document.
    pub label: String,
    /// Page title (front matter `title` or first heading), if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Path relative to the docs root.
    pub source_path: String,
}

/// All known documents, keyed by id.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ContentCollection {
    docs: BTreeMap<String, DocEntry>,
}

impl ContentCollection {
    /// Collection of bare ids, for callers that know their documents without
    /// scanning a directory.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let docs = ids
            .into_iter()
            .map(|id| {
                let id = id.into();
                let entry = DocEntry {
                    label: naming::label_from_id(&id),
                    title: None,
                    source_path: id.clone(),
                    id: id.clone(),
                };
                (id, entry)
            })
            .collect();
        Self { docs }
    }

    pub fn get(&self, id: &str) -> Option<&DocEntry> {
        self.docs.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.docs.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.docs.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DocEntry> {
        self.docs.values()
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

/// Walk `root` and collect every document whose extension is in
/// `extensions` (compared case-insensitively, without the dot).
pub fn scan_docs(root: &Path, extensions: &[String]) -> Result<ContentCollection, DocsError> {
    if !root.is_dir() {
        return Err(DocsError::MissingRoot(root.to_path_buf()));
    }

    let mut docs: BTreeMap<String, DocEntry> = BTreeMap::new();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_skipped(e));

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() || !has_extension(entry.path(), extensions) {
            continue;
        }
        let rel_path = entry.path().strip_prefix(root).unwrap_or(entry.path());
        let content = fs::read_to_string(entry.path())?;
        let doc = parse_doc(rel_path, &content);

        if let Some(existing) = docs.get(&doc.id) {
            return Err(DocsError::DuplicateId {
                id: doc.id,
                first: PathBuf::from(&existing.source_path),
                second: rel_path.to_path_buf(),
            });
        }
        docs.insert(doc.id.clone(), doc);
    }

    Ok(ContentCollection { docs })
}

/// Hidden (`.`) and partial (`_`) files and directories are not documents.
fn is_skipped(entry: &DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || name.starts_with('_')
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .map(|e| {
            let e = e.to_string_lossy();
            extensions.iter().any(|allowed| allowed.eq_ignore_ascii_case(&e))
        })
        .unwrap_or(false)
}

/// Build the entry for one document from its relative path and contents.
fn parse_doc(rel_path: &Path, content: &str) -> DocEntry {
    let source_path = rel_path
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    let without_ext = match source_path.rfind('.') {
        Some(dot) if dot > source_path.rfind('/').map_or(0, |slash| slash + 1) => {
            &source_path[..dot]
        }
        _ => source_path.as_str(),
    };
    let mut id = naming::strip_number_prefixes(without_ext);

    let (front_matter, heading) = extract_metadata(content);
    if let Some(custom) = front_matter.get("id") {
        id = match id.rfind('/') {
            Some(slash) => format!("{}/{}", &id[..slash], custom),
            None => custom.clone(),
        };
    }

    let title = front_matter.get("title").cloned().or(heading);
    let label = front_matter
        .get("sidebar_label")
        .cloned()
        .or_else(|| title.clone())
        .unwrap_or_else(|| naming::label_from_id(&id));

    DocEntry {
        id,
        label,
        title,
        source_path,
    }
}

/// Front matter key/values and the text of the first level-1 heading.
fn extract_metadata(content: &str) -> (BTreeMap<String, String>, Option<String>) {
    let options = Options::ENABLE_YAML_STYLE_METADATA_BLOCKS;
    let mut front_matter = BTreeMap::new();
    let mut in_metadata = false;
    let mut in_h1 = false;
    let mut heading = String::new();

    for event in Parser::new_ext(content, options) {
        match event {
            Event::Start(Tag::MetadataBlock(MetadataBlockKind::YamlStyle)) => in_metadata = true,
            Event::End(TagEnd::MetadataBlock(_)) => in_metadata = false,
            Event::Text(text) if in_metadata => parse_front_matter(&text, &mut front_matter),
            Event::Start(Tag::Heading {
                level: HeadingLevel::H1,
                ..
            }) => in_h1 = true,
            Event::End(TagEnd::Heading(HeadingLevel::H1)) => {
                let text = heading.trim();
                if !text.is_empty() {
                    return (front_matter, Some(text.to_string()));
                }
                in_h1 = false;
            }
            Event::Text(text) | Event::Code(text) if in_h1 => heading.push_str(&text),
            _ => {}
        }
    }
    (front_matter, None)
}

/// Flat `key: value` lines only. Nested YAML is ignored; the keys read
/// here (`id`, `title`, `sidebar_label`) are always scalars.
fn parse_front_matter(text: &str, out: &mut BTreeMap<String, String>) {
    for line in text.lines() {
        if line.starts_with([' ', '\t', '-', '#']) {
            continue;
        }
        if let Some((key, value)) = line.split_once(':') {
            let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
            if !value.is_empty() {
                out.insert(key.trim().to_string(), value.to_string());
            }
        }
    }
}
