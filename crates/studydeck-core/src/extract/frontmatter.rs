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

use serde::Deserialize;

/// Metadata that can be specified at the top of a Markdown file.
#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FileMetadata {
    /// Overrides the topic derived from the path.
    pub topic: Option<String>,
    /// Overrides the category derived from the path or source.
    pub category: Option<String>,
    /// Leave the file out of the deck entirely.
    pub skip: bool,
}

fn is_delimiter(line: &str) -> bool {
    line.trim() == "---"
}

/// Split TOML frontmatter, fenced by `---` lines, from the Markdown body.
///
/// A leading `---` is also a valid horizontal rule, so when there is no
/// closing delimiter, or the fenced block is not metadata, the text is
/// treated as plain Markdown and returned whole.
pub fn extract_frontmatter(text: &str) -> (FileMetadata, &str) {
    let mut lines = text.split_inclusive('\n');
    let Some(first) = lines.next().filter(|line| is_delimiter(line)) else {
        return (FileMetadata::default(), text);
    };

    let frontmatter_start = first.len();
    let mut offset = frontmatter_start;
    for line in lines {
        if is_delimiter(line) {
            let frontmatter = &text[frontmatter_start..offset];
            return match toml::from_str::<FileMetadata>(frontmatter) {
                Ok(metadata) => (metadata, &text[offset + line.len()..]),
                Err(e) => {
                    log::debug!("Leading '---' block is not frontmatter: {e}");
                    (FileMetadata::default(), text)
                }
            };
        }
        offset += line.len();
    }
    log::debug!("Leading '---' has no closing '---', reading it as a rule");
    (FileMetadata::default(), text)
}
