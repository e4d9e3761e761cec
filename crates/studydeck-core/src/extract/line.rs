// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Line classification shared by every extraction strategy.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::card::CodeType;

static QUESTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\*\*Q:\s*(.+?)\s*\*\*$").unwrap());
static ANSWER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^A:\s*(.*)$").unwrap());
static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").unwrap());
static LIST_ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[-*+]|\d+[.)])\s+(.*)$").unwrap());

/// How many lines before an opening fence are searched for a marker.
pub const MARKER_WINDOW: usize = 5;

/// Language given to fences without a language tag.
pub const DEFAULT_LANGUAGE: &str = "plaintext";

/// Lines starting with this are editorial tips and never become content.
pub const TIP_MARKER: &str = "💡";

const BAD_MARKERS: [&str; 6] = ["❌", "✗", "✘", "🚫", "bad example", "bad practice"];
const GOOD_MARKERS: [&str; 5] = ["✅", "✔", "✓", "good example", "good practice"];

/// A single line of Markdown, classified.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Line<'a> {
    /// An opening or closing code fence.
    Fence { language: &'a str },
    /// A line like `**Q: <text>**`.
    Question(&'a str),
    /// A line like `A: <text>`.
    Answer(&'a str),
    /// An ATX heading.
    Heading { level: usize, text: &'a str },
    /// A horizontal rule.
    Rule,
    /// A line starting with a pipe.
    TableRow(&'a str),
    /// A bulleted or numbered list item.
    ListItem(&'a str),
    /// An editorial tip line.
    Tip,
    Blank,
    /// Any other line, trimmed.
    Text(&'a str),
}

impl<'a> Line<'a> {
    /// Classify a line, recognizing question and answer markers.
    pub fn read(line: &'a str) -> Self {
        Self::classify(line, true)
    }

    /// Classify a line as prose: question and answer markers are plain text.
    pub fn read_prose(line: &'a str) -> Self {
        Self::classify(line, false)
    }

    fn classify(line: &'a str, qa: bool) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Line::Blank;
        }
        if let Some(rest) = line.strip_prefix("```") {
            let language = rest.trim_start_matches('`').split_whitespace().next();
            return Line::Fence {
                language: language.unwrap_or(""),
            };
        }
        if qa {
            if let Some(caps) = QUESTION_RE.captures(line) {
                return Line::Question(caps.get(1).map_or("", |m| m.as_str()));
            }
            if let Some(caps) = ANSWER_RE.captures(line) {
                return Line::Answer(caps.get(1).map_or("", |m| m.as_str()));
            }
        }
        if let Some(caps) = HEADING_RE.captures(line) {
            return Line::Heading {
                level: caps[1].len(),
                text: caps.get(2).map_or("", |m| m.as_str().trim()),
            };
        }
        if is_rule(line) {
            return Line::Rule;
        }
        if line.starts_with('|') {
            return Line::TableRow(line);
        }
        if let Some(caps) = LIST_ITEM_RE.captures(line) {
            return Line::ListItem(caps.get(1).map_or("", |m| m.as_str()));
        }
        if line.starts_with(TIP_MARKER) {
            return Line::Tip;
        }
        Line::Text(line)
    }
}

/// Three or more of the same `-`, `*` or `_`, optionally spaced out.
fn is_rule(line: &str) -> bool {
    let mut chars = line.chars().filter(|c| !c.is_whitespace());
    let Some(first) = chars.next() else {
        return false;
    };
    if !matches!(first, '-' | '*' | '_') {
        return false;
    }
    let mut count = 1;
    for c in chars {
        if c != first {
            return false;
        }
        count += 1;
    }
    count >= 3
}

fn marker_in(line: &str) -> Option<CodeType> {
    let normalized = line.to_lowercase().replace('\u{fe0f}', "");
    if BAD_MARKERS.iter().any(|m| normalized.contains(m)) {
        Some(CodeType::Bad)
    } else if GOOD_MARKERS.iter().any(|m| normalized.contains(m)) {
        Some(CodeType::Good)
    } else {
        None
    }
}

/// Decide whether the fence opening at `fence_idx` is a good or bad example.
///
/// Walks backward from the line above the fence over at most
/// [`MARKER_WINDOW`] lines; the nearest line with a marker wins. A line with
/// both kinds of marker counts as bad.
pub fn scan_code_type(lines: &[&str], fence_idx: usize) -> CodeType {
    let end = fence_idx.min(lines.len());
    let start = end.saturating_sub(MARKER_WINDOW);
    lines[start..end]
        .iter()
        .rev()
        .find_map(|line| marker_in(line))
        .unwrap_or(CodeType::Neutral)
}

/// Split a pipe-delimited row into trimmed cells.
pub fn split_row(row: &str) -> Vec<String> {
    let row = row.trim();
    let row = row.strip_prefix('|').unwrap_or(row);
    let row = row.strip_suffix('|').unwrap_or(row);
    row.split('|').map(|cell| cell.trim().to_string()).collect()
}

/// A row like `|---|:---:|`.
pub fn is_separator_row(cells: &[String]) -> bool {
    cells.iter().any(|cell| cell.contains('-'))
        && cells.iter().all(|cell| {
            cell.chars()
                .all(|c| c == '-' || c == ':' || c.is_whitespace())
        })
}
