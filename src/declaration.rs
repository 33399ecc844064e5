//! Sidebar declarations and their validation.
//!
//! A declaration is the literal, loosely-shaped form authors write:
//!
//! ```json
//! {
//!   "docs": [
//!     {
//!       "type": "category",
//!       "label": "Getting Started",
//!       "collapsed": true,
//!       "link": { "type": "doc", "id": "intro/overview" },
//!       "items": [
//!         "intro/what-is-lit-protocol",
//!         { "type": "doc", "id": "resources/how-it-works" }
//!       ]
//!     }
//!   ]
//! }
//! ```
//!
//! ## Item Shapes
//!
//! - a bare string is a doc ref shorthand
//! - `{"type": "doc", "id": ...}` is the explicit doc ref
//! - `{"type": "category", "label": ..., "collapsed"?, "link"?, "items"?}`
//!
//! Category links are `{"type": "doc", "id"}` or
//! `{"type": "generated-index", "title", "description"?, "keywords"?, "slug"?}`.
//!
//! Anything else is rejected rather than guessed at: unknown `type` tags,
//! unknown keys, and values of the wrong JSON type all fail [`construct`]
//! with a [`ValidationError`] naming the offending item
//! (`docs[1].items[0].link`). Nothing partial is ever returned.
//!
//! Construction walks the declaration with an explicit stack, and JSON text
//! is parsed without serde_json's recursion limit, so loading has no fixed
//! nesting depth.

use crate::types::{
    Category, CategoryLink, DocRef, GeneratedIndex, SidebarCollection, SidebarNode, SidebarTree,
};
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("duplicate sidebar name `{0}`")]
    DuplicateSidebar(String),
    #[error("{path}: category is missing `label`")]
    MissingLabel { path: String },
    #[error("{path}: category `label` must not be empty")]
    EmptyLabel { path: String },
    #[error("{path}: generated-index link is missing `title`")]
    MissingTitle { path: String },
    #[error("{path}: missing required field `{field}`")]
    MissingField { path: String, field: &'static str },
    #[error("{path}: unknown item type `{tag}`")]
    UnknownItemType { path: String, tag: String },
    #[error("{path}: unknown link type `{tag}`")]
    UnknownLinkType { path: String, tag: String },
    #[error("{path}: unknown field `{field}`")]
    UnknownField { path: String, field: String },
    #[error("{path}: {message}")]
    InvalidShape { path: String, message: String },
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Sidebar validation error: {0}")]
    Validation(#[from] ValidationError),
    #[error("Unsupported sidebar file format: {0} (expected .json or .toml)")]
    UnsupportedFormat(PathBuf),
}

/// Top-level `name → items` entries exactly as written, duplicates included.
///
/// `serde_json::Value` objects keep only the last of two equal keys, which
/// would hide a duplicated sidebar name, so the top level is collected into
/// a list instead.
#[derive(Debug, Clone, Default)]
pub struct Declarations(pub Vec<(String, Value)>);

impl<'de> Deserialize<'de> for Declarations {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = Declarations;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of sidebar names to item lists")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, StrictValue(items))) =
                    access.next_entry::<String, StrictValue>()?
                {
                    entries.push((name, items));
                }
                Ok(Declarations(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

/// A JSON value whose objects must not repeat a key.
///
/// Inside an item, `{"type": "doc", "id": "a", "id": "b"}` has no single
/// meaning, so it fails to parse instead of keeping the last `id`.
struct StrictValue(Value);

impl<'de> Deserialize<'de> for StrictValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(StrictValueVisitor).map(StrictValue)
    }
}

struct StrictValueVisitor;

impl<'de> Visitor<'de> for StrictValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("any JSON value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
        Ok(Value::from(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
        Ok(Value::from(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
        Ok(serde_json::Number::from_f64(v).map_or(Value::Null, Value::Number))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
        Ok(Value::String(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
        Ok(Value::String(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        StrictValue::deserialize(deserializer).map(|StrictValue(value)| value)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> Result<Value, A::Error> {
        let mut values = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some(StrictValue(value)) = access.next_element()? {
            values.push(value);
        }
        Ok(Value::Array(values))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Value, A::Error> {
        let mut fields = Map::new();
        while let Some(key) = access.next_key::<String>()? {
            if fields.contains_key(&key) {
                return Err(de::Error::custom(format_args!("duplicate key `{key}`")));
            }
            let StrictValue(value) = access.next_value()?;
            fields.insert(key, value);
        }
        Ok(Value::Object(fields))
    }
}

impl IntoIterator for Declarations {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Validate declarations and build the sidebar collection.
///
/// Each entry is a sidebar name and its item list. Fails on the first
/// invalid item, or on a sidebar name seen twice.
pub fn construct<I, N>(declarations: I) -> Result<SidebarCollection, ValidationError>
where
    I: IntoIterator<Item = (N, Value)>,
    N: Into<String>,
{
    let mut sidebars = BTreeMap::new();
    for (name, items) in declarations {
        let name = name.into();
        if sidebars.contains_key(&name) {
            return Err(ValidationError::DuplicateSidebar(name));
        }
        let tree = build_tree(&name, &items)?;
        sidebars.insert(name, tree);
    }
    Ok(SidebarCollection { sidebars })
}

/// Build a collection from a single JSON object literal (e.g. `json!({...})`).
pub fn construct_value(value: Value) -> Result<SidebarCollection, ValidationError> {
    match value {
        Value::Object(map) => construct(map),
        other => Err(ValidationError::InvalidShape {
            path: "<root>".to_string(),
            message: format!("expected a map of sidebars, found {}", kind_of(&other)),
        }),
    }
}

/// Parse and validate a JSON sidebar declaration.
///
/// serde_json's recursion limit is lifted and the parser's stack grows on
/// demand, so deeply nested categories load like shallow ones.
pub fn parse_json(text: &str) -> Result<SidebarCollection, LoadError> {
    let mut json = serde_json::Deserializer::from_str(text);
    json.disable_recursion_limit();
    let declarations = Declarations::deserialize(serde_stacker::Deserializer::new(&mut json))?;
    json.end()?;
    Ok(construct(declarations)?)
}

/// Parse and validate a TOML sidebar declaration.
///
/// TOML forbids duplicate keys itself, so a duplicated sidebar name
/// surfaces as [`LoadError::Toml`].
pub fn parse_toml(text: &str) -> Result<SidebarCollection, LoadError> {
    let declarations: Declarations = toml::from_str(text)?;
    Ok(construct(declarations)?)
}

/// Load a declaration file, choosing the format from its extension.
pub fn load(path: &Path) -> Result<SidebarCollection, LoadError> {
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "json" => parse_json(&fs::read_to_string(path)?),
        "toml" => parse_toml(&fs::read_to_string(path)?),
        _ => Err(LoadError::UnsupportedFormat(path.to_path_buf())),
    }
}

// =============================================================================
// Tree building
// =============================================================================

/// A category whose header has been validated but whose children are still
/// being built.
struct PendingCategory {
    label: String,
    collapsed: bool,
    link: Option<CategoryLink>,
}

struct Frame<'a> {
    path: String,
    remaining: std::iter::Enumerate<std::slice::Iter<'a, Value>>,
    built: Vec<SidebarNode>,
    category: Option<PendingCategory>,
}

fn build_tree(name: &str, items: &Value) -> Result<SidebarTree, ValidationError> {
    let items = expect_array(items, name)?;
    let mut stack = vec![Frame {
        path: name.to_string(),
        remaining: items.iter().enumerate(),
        built: Vec::with_capacity(items.len()),
        category: None,
    }];

    loop {
        let Some(frame) = stack.last_mut() else {
            unreachable!("the root frame is only popped on return");
        };
        match frame.remaining.next() {
            Some((i, item)) => {
                let path = item_path(&frame.path, i);
                match classify(item, &path)? {
                    Item::Doc(doc) => frame.built.push(SidebarNode::Doc(doc)),
                    Item::Category(category, children) => {
                        let children = expect_array(children, &format!("{path}.items"))?;
                        stack.push(Frame {
                            path: format!("{path}.items"),
                            remaining: children.iter().enumerate(),
                            built: Vec::with_capacity(children.len()),
                            category: Some(category),
                        });
                    }
                }
            }
            None => {
                let Some(done) = stack.pop() else {
                    unreachable!("stack checked non-empty above");
                };
                match (done.category, stack.last_mut()) {
                    (Some(category), Some(parent)) => {
                        parent.built.push(SidebarNode::Category(Category {
                            label: category.label,
                            collapsed: category.collapsed,
                            link: category.link,
                            items: done.built,
                        }));
                    }
                    _ => return Ok(SidebarTree::new(done.built)),
                }
            }
        }
    }
}

fn item_path(parent: &str, index: usize) -> String {
    format!("{parent}[{index}]")
}

static EMPTY_ITEMS: Value = Value::Array(Vec::new());

enum Item<'a> {
    Doc(DocRef),
    Category(PendingCategory, &'a Value),
}

fn classify<'a>(item: &'a Value, path: &str) -> Result<Item<'a>, ValidationError> {
    match item {
        Value::String(id) => Ok(Item::Doc(doc_ref(id, path)?)),
        Value::Object(fields) => {
            let tag = required_str(fields, "type", path)?;
            match tag {
                "doc" => {
                    reject_unknown(fields, &["type", "id"], path)?;
                    let id = required_str(fields, "id", path)?;
                    Ok(Item::Doc(doc_ref(id, path)?))
                }
                "category" => {
                    reject_unknown(fields, &["type", "label", "collapsed", "link", "items"], path)?;
                    let label = match fields.get("label") {
                        None | Some(Value::Null) => {
                            return Err(ValidationError::MissingLabel {
                                path: path.to_string(),
                            });
                        }
                        Some(value) => expect_str(value, &format!("{path}.label"))?,
                    };
                    if label.trim().is_empty() {
                        return Err(ValidationError::EmptyLabel {
                            path: path.to_string(),
                        });
                    }
                    let collapsed = match fields.get("collapsed") {
                        None => true,
                        Some(Value::Bool(b)) => *b,
                        Some(other) => {
                            return Err(wrong_type(other, "a boolean", &format!("{path}.collapsed")));
                        }
                    };
                    let link = fields
                        .get("link")
                        .map(|link| category_link(link, &format!("{path}.link")))
                        .transpose()?;
                    let children = fields.get("items").unwrap_or(&EMPTY_ITEMS);
                    Ok(Item::Category(
                        PendingCategory {
                            label: label.to_string(),
                            collapsed,
                            link,
                        },
                        children,
                    ))
                }
                other => Err(ValidationError::UnknownItemType {
                    path: path.to_string(),
                    tag: other.to_string(),
                }),
            }
        }
        other => Err(wrong_type(other, "a doc id or an item object", path)),
    }
}

fn category_link(link: &Value, path: &str) -> Result<CategoryLink, ValidationError> {
    let Value::Object(fields) = link else {
        return Err(wrong_type(link, "a link object", path));
    };
    match required_str(fields, "type", path)? {
        "doc" => {
            reject_unknown(fields, &["type", "id"], path)?;
            let id = required_str(fields, "id", path)?;
            Ok(CategoryLink::Doc {
                id: doc_ref(id, path)?.id,
            })
        }
        "generated-index" => {
            reject_unknown(
                fields,
                &["type", "title", "description", "keywords", "slug"],
                path,
            )?;
            let title = match fields.get("title") {
                None | Some(Value::Null) => {
                    return Err(ValidationError::MissingTitle {
                        path: path.to_string(),
                    });
                }
                Some(value) => expect_str(value, &format!("{path}.title"))?.to_string(),
            };
            let description = optional_str(fields, "description", path)?;
            let slug = optional_str(fields, "slug", path)?;
            let keywords = match fields.get("keywords") {
                None => Vec::new(),
                Some(value) => {
                    let keywords_path = format!("{path}.keywords");
                    expect_array(value, &keywords_path)?
                        .iter()
                        .enumerate()
                        .map(|(i, k)| {
                            expect_str(k, &item_path(&keywords_path, i)).map(str::to_string)
                        })
                        .collect::<Result<Vec<_>, _>>()?
                }
            };
            Ok(CategoryLink::GeneratedIndex(GeneratedIndex {
                title,
                description,
                keywords,
                slug,
            }))
        }
        other => Err(ValidationError::UnknownLinkType {
            path: path.to_string(),
            tag: other.to_string(),
        }),
    }
}

// =============================================================================
// Field helpers
// =============================================================================

fn doc_ref(id: &str, path: &str) -> Result<DocRef, ValidationError> {
    if id.trim().is_empty() {
        return Err(ValidationError::InvalidShape {
            path: path.to_string(),
            message: "document id must not be empty".to_string(),
        });
    }
    if id.trim() != id {
        return Err(ValidationError::InvalidShape {
            path: path.to_string(),
            message: format!("document id {id:?} has surrounding whitespace"),
        });
    }
    Ok(DocRef { id: id.to_string() })
}

fn required_str<'a>(
    fields: &'a Map<String, Value>,
    field: &'static str,
    path: &str,
) -> Result<&'a str, ValidationError> {
    match fields.get(field) {
        None | Some(Value::Null) => Err(ValidationError::MissingField {
            path: path.to_string(),
            field,
        }),
        Some(value) => expect_str(value, &format!("{path}.{field}")),
    }
}

fn optional_str(
    fields: &Map<String, Value>,
    field: &str,
    path: &str,
) -> Result<Option<String>, ValidationError> {
    match fields.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => Ok(Some(expect_str(value, &format!("{path}.{field}"))?.to_string())),
    }
}

fn reject_unknown(
    fields: &Map<String, Value>,
    allowed: &[&str],
    path: &str,
) -> Result<(), ValidationError> {
    match fields.keys().find(|key| !allowed.contains(&key.as_str())) {
        Some(field) => Err(ValidationError::UnknownField {
            path: path.to_string(),
            field: field.clone(),
        }),
        None => Ok(()),
    }
}

fn expect_str<'a>(value: &'a Value, path: &str) -> Result<&'a str, ValidationError> {
    value
        .as_str()
        .ok_or_else(|| wrong_type(value, "a string", path))
}

fn expect_array<'a>(value: &'a Value, path: &str) -> Result<&'a Vec<Value>, ValidationError> {
    value
        .as_array()
        .ok_or_else(|| wrong_type(value, "a list", path))
}

fn wrong_type(value: &Value, expected: &str, path: &str) -> ValidationError {
    ValidationError::InvalidShape {
        path: path.to_string(),
        message: format!("expected {expected}, found {}", kind_of(value)),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
