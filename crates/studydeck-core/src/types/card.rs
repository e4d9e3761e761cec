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
use serde::Serialize;

use crate::types::topic::TopicInfo;
use crate::types::topic::normalize_topic_id;
use crate::types::topic::topic_label;

/// Category given to cards from question/answer files.
pub const QA_CATEGORY: &str = "Questions";

/// Category and topic fallback when nothing better can be derived.
pub const GENERAL: &str = "General";

/// One study unit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub question: String,
    pub answer: Vec<ContentBlock>,
    pub category: String,
    pub topic: String,
    pub topic_id: String,
    pub source: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_index: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_section: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_concept: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Which extraction strategy produced a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardKind {
    Qa,
    Index,
    Section,
    Concept,
}

impl Card {
    /// Build a card from its parts. Returns `None` when there is nothing to
    /// show on the answer side, or no question to ask.
    pub fn new(
        origin: &CardOrigin,
        kind: CardKind,
        question: String,
        answer: Vec<ContentBlock>,
    ) -> Option<Self> {
        if answer.is_empty() || question.trim().is_empty() {
            return None;
        }
        Some(Card {
            id: None,
            question,
            answer,
            category: origin.category.clone(),
            topic: origin.topic.clone(),
            topic_id: origin.topic_id.clone(),
            source: origin.source.clone(),
            is_index: kind == CardKind::Index,
            is_section: kind == CardKind::Section,
            is_concept: kind == CardKind::Concept,
        })
    }

    pub fn kind(&self) -> CardKind {
        if self.is_index {
            CardKind::Index
        } else if self.is_section {
            CardKind::Section
        } else if self.is_concept {
            CardKind::Concept
        } else {
            CardKind::Qa
        }
    }
}

/// A typed fragment of an answer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    Text {
        content: String,
    },
    List {
        items: Vec<String>,
    },
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    Code {
        language: String,
        code: String,
        #[serde(rename = "codeType")]
        code_type: CodeType,
    },
}

/// Whether a code sample is shown as something to imitate or to avoid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodeType {
    Good,
    Bad,
    Neutral,
}

impl CodeType {
    /// Generic title used for an example that has no heading of its own.
    pub fn example_title(self) -> &'static str {
        match self {
            CodeType::Good => "Good Example",
            CodeType::Bad => "Bad Example",
            CodeType::Neutral => "Example",
        }
    }
}

/// Per-file metadata stamped onto every card extracted from that file.
#[derive(Clone, Debug, PartialEq)]
pub struct CardOrigin {
    pub source: String,
    pub category: String,
    pub topic: String,
    pub topic_id: String,
}

impl CardOrigin {
    /// Topic from the file name, category given by the caller.
    pub fn from_file_name(source_path: &str, category: &str) -> Self {
        let TopicInfo {
            source_file,
            topic_id,
            topic_label,
        } = TopicInfo::from_path(source_path);
        CardOrigin {
            source: source_file,
            category: category.to_string(),
            topic: topic_label,
            topic_id,
        }
    }

    /// Category from the first path segment, topic from the second.
    ///
    /// `notes/async/tasks.md` gives category `Notes` and topic `Async`. With
    /// a single directory the topic comes from the file name instead, and a
    /// bare file name falls back to the `General` category.
    pub fn from_path_segments(source_path: &str) -> Self {
        let info = TopicInfo::from_path(source_path);
        let segments: Vec<&str> = info
            .source_file
            .split('/')
            .filter(|s| !s.is_empty() && *s != ".")
            .collect();
        let category = if segments.len() >= 2 {
            topic_label(segments[0])
        } else {
            GENERAL.to_string()
        };
        let (topic, topic_id) = if segments.len() >= 3 {
            (topic_label(segments[1]), normalize_topic_id(segments[1]))
        } else {
            (info.topic_label, info.topic_id)
        };
        CardOrigin {
            source: info.source_file,
            category,
            topic,
            topic_id,
        }
    }

    /// Replace the traceability path, keeping the derived grouping.
    pub fn with_source(mut self, source: &str) -> Self {
        self.source = source.replace('\\', "/");
        self
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = category.to_string();
        self
    }

    pub fn with_topic(mut self, topic: &str) -> Self {
        self.topic = topic.to_string();
        self.topic_id = normalize_topic_id(topic);
        self
    }
}
