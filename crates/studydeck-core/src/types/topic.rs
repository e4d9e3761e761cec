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

//! Grouping labels and keys derived from file paths.

use crate::types::card::GENERAL;

/// Topic key used when a name normalizes to nothing.
pub const GENERAL_TOPIC_ID: &str = "general";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TopicInfo {
    /// The path with forward slashes.
    pub source_file: String,
    pub topic_id: String,
    pub topic_label: String,
}

impl TopicInfo {
    /// Derive the topic of a file from its name. The path is expected to be
    /// relative to the content root already.
    pub fn from_path(path: &str) -> Self {
        let source_file = normalize_source(path);
        let stem = file_stem(&source_file);
        TopicInfo {
            topic_id: normalize_topic_id(stem),
            topic_label: topic_label(stem),
            source_file,
        }
    }
}

/// Forward slashes, no leading `./`.
pub fn normalize_source(path: &str) -> String {
    let path = path.replace('\\', "/");
    match path.strip_prefix("./") {
        Some(rest) => rest.to_string(),
        None => path,
    }
}

/// The last path segment without its extension.
fn file_stem(path: &str) -> &str {
    let name = path.rsplit('/').next().unwrap_or(path);
    match name.rfind('.') {
        Some(0) | None => name,
        Some(idx) => &name[..idx],
    }
}

/// `async-await_basics` becomes `Async Await Basics`.
pub fn topic_label(name: &str) -> String {
    let spaced: String = name
        .chars()
        .map(|c| if c == '-' || c == '_' { ' ' } else { c })
        .collect();
    let words: Vec<String> = spaced.split_whitespace().map(capitalize).collect();
    if words.is_empty() {
        GENERAL.to_string()
    } else {
        words.join(" ")
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lowercase, runs of anything but ASCII letters and digits collapsed to a
/// single hyphen, no hyphens at either end.
pub fn normalize_topic_id(name: &str) -> String {
    let mut id = String::with_capacity(name.len());
    let mut pending_hyphen = false;
    for c in name.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !id.is_empty() {
                id.push('-');
            }
            pending_hyphen = false;
            id.push(c);
        } else {
            pending_hyphen = true;
        }
    }
    if id.is_empty() {
        GENERAL_TOPIC_ID.to_string()
    } else {
        id
    }
}
