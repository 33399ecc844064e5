//! Name handling shared by the docs scanner, the tree queries and the
//! renderers.
//!
//! ## Number Prefixes
//!
//! Doc files and directories may carry a numeric ordering prefix
//! (`01-intro/`, `010-overview.md`). The prefix orders files on disk but is
//! not part of the document id:
//! - `01-intro/010-overview.md` → id `intro/overview`
//!
//! ## Display Labels
//!
//! A doc ref carries no label of its own. When the document has neither
//! front matter nor a heading, the label falls back to the last id segment
//! with dashes and underscores turned into spaces:
//! - `sdk/migrations/what-is-new` → "what is new"

/// Result of parsing a path segment like `020-getting-started`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedName {
    /// Number prefix if present (e.g., `20` from `020-getting-started`)
    pub number: Option<u32>,
    /// Segment with the prefix removed. For unnumbered segments, this is
    /// the full input.
    pub name: String,
}

/// Split an optional `NNN-` (or `NNN_`, `NNN.`) prefix off a path segment.
///
/// - `"020-getting-started"` → number=Some(20), name="getting-started"
/// - `"01_setup"` → number=Some(1), name="setup"
/// - `"001"` → number=None, name="001" (a bare number is a name)
/// - `"6.0.0"` → number=None, name="6.0.0" (versions and dates are names)
/// - `"overview"` → number=None, name="overview"
pub fn parse_segment(segment: &str) -> ParsedName {
    let digits = segment.bytes().take_while(u8::is_ascii_digit).count();
    if digits > 0 && digits < segment.len() {
        let (prefix, rest) = segment.split_at(digits);
        if let Some(name) = rest.strip_prefix(['-', '_', '.']) {
            if name.starts_with(|c: char| !c.is_ascii_digit()) {
                if let Ok(number) = prefix.parse::<u32>() {
                    return ParsedName {
                        number: Some(number),
                        name: name.to_string(),
                    };
                }
            }
        }
    }
    ParsedName {
        number: None,
        name: segment.to_string(),
    }
}

/// Strip number prefixes from every segment of a `/`-separated path.
pub fn strip_number_prefixes(path: &str) -> String {
    path.split('/')
        .map(|segment| parse_segment(segment).name)
        .collect::<Vec<_>>()
        .join("/")
}

/// Fallback display label for a document id.
pub fn label_from_id(doc_id: &str) -> String {
    let last = doc_id.rsplit('/').next().unwrap_or(doc_id);
    parse_segment(last).name.replace(['-', '_'], " ")
}

/// Lowercase URL slug: runs of non-alphanumerics collapse to one `-`.
///
/// - `"Installing the Lit SDK"` → `"installing-the-lit-sdk"`
/// - `"Migrating from 2.x.x to 3.x.x"` → `"migrating-from-2-x-x-to-3-x-x"`
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}
