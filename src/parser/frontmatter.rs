//! YAML frontmatter parsing, tolerant of template syntax and malformed input.

use regex::Regex;
use serde_yaml::{Mapping, Value};
use std::path::Path;
use std::sync::LazyLock;
use tracing::warn;

const DELIMITER: &str = "---";

/// Literal substituted for `{{...}}` template placeholders before parsing;
/// the placeholders are not valid YAML and would abort the parse.
const TEMPLATE_VALUE: &str = "TEMPLATE_VALUE";

static TEMPLATE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{\{[^}]+\}\}").unwrap());

/// Split content into a frontmatter mapping and the remaining body.
///
/// Returns an empty mapping and the original text unchanged when the header
/// is absent, unterminated, or fails to parse. A header that parses to
/// something other than a mapping also yields an empty mapping.
pub fn split_frontmatter<'a>(content: &'a str, path: &Path) -> (Mapping, &'a str) {
    if !content.starts_with(DELIMITER) {
        return (Mapping::new(), content);
    }

    let Some(end) = content[3..].find(DELIMITER).map(|i| i + 3) else {
        return (Mapping::new(), content);
    };

    let header = TEMPLATE.replace_all(&content[3..end], TEMPLATE_VALUE);

    match serde_yaml::from_str::<Value>(&header) {
        Ok(Value::Mapping(mapping)) => (mapping, &content[end + 3..]),
        Ok(Value::Null) => (Mapping::new(), &content[end + 3..]),
        Ok(_) => {
            warn!(
                "frontmatter in {} is not a mapping; ignoring it",
                path.display()
            );
            (Mapping::new(), &content[end + 3..])
        }
        Err(e) => {
            warn!(
                "failed to parse frontmatter in {}; continuing without it: {}",
                path.display(),
                e
            );
            (Mapping::new(), content)
        }
    }
}

/// Normalize the `tags` field to a list of strings.
///
/// Absent and null values yield an empty list; a scalar string becomes a
/// single-element list; a sequence keeps its string elements.
pub fn normalize_tags(frontmatter: &Mapping) -> Vec<String> {
    match frontmatter.get(&Value::String("tags".to_string())) {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::String(tag)) => vec![tag.clone()],
        Some(Value::Sequence(seq)) => seq
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        Some(_) => Vec::new(),
    }
}
