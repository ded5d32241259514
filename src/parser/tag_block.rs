//! Tagged list-item block extraction.
//!
//! List items may span multiple lines (wrapped text, nested sub-bullets) and
//! are treated as one unit both when deciding tag membership and when
//! extracting, so context attached to a tagged item is never dropped.

use crate::error::Result;
use regex::Regex;
use std::sync::LazyLock;

// A list item starts with optional indentation, a dash and at least one space.
static LIST_ITEM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\s*)-\s+").unwrap());

/// Build the word-boundary matcher for `#tag`.
///
/// The character before `#` (if any) and the character after the tag word
/// (if any) must be neither a word character nor `#`, so `#project` does not
/// match inside `#projectplan`, `#project2` or `##project`. Matching is
/// case-sensitive. The regex crate has no lookaround; both boundaries are
/// consuming groups, which is sufficient for a membership test.
pub fn tag_pattern(tag: &str) -> Result<Regex> {
    let pattern = format!(r"(?:^|[^\w#])#{}(?:$|[^\w#])", regex::escape(tag));
    Ok(Regex::new(&pattern)?)
}

/// Extract the list-item blocks whose joined text contains the tag.
///
/// Blocks are returned in discovery order; the caller joins them with a
/// blank line to form the extraction result for the note.
pub fn extract_tagged_blocks(body: &str, pattern: &Regex) -> Vec<String> {
    if !pattern.is_match(body) {
        return Vec::new();
    }

    let lines: Vec<&str> = body.lines().collect();
    let mut blocks = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let Some(caps) = LIST_ITEM.captures(lines[i]) else {
            i += 1;
            continue;
        };

        let base_indent = caps[1].chars().count();
        let mut block_lines = vec![lines[i]];
        let mut j = i + 1;

        while j < lines.len() && continues_block(lines[j], base_indent) {
            block_lines.push(lines[j]);
            j += 1;
        }

        // Blank lines between the block and whatever follows belong to
        // neither; blanks interior to the block stay.
        while block_lines.last().is_some_and(|l| l.trim().is_empty()) {
            block_lines.pop();
        }

        let block = block_lines.join("\n");
        if pattern.is_match(&block) {
            blocks.push(block);
        }

        i = j;
    }

    blocks
}

/// A line continues the open block when it is blank, indented deeper than
/// the item, or same-or-deeper wrapped text that does not itself start a new
/// list item. A new item at the block's own indent always seals it.
fn continues_block(line: &str, base_indent: usize) -> bool {
    if line.trim().is_empty() {
        return true;
    }

    let indent = line.chars().take_while(|c| c.is_whitespace()).count();
    if indent > base_indent {
        return true;
    }

    !LIST_ITEM.is_match(line) && indent >= base_indent
}
