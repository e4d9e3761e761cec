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

//! The overview card built from a deck's landing document.

use crate::extract::blocks::Blocks;
use crate::extract::line::Line;
use crate::markdown::clean;
use crate::types::card::Card;
use crate::types::card::CardKind;
use crate::types::card::CardOrigin;

/// Question used when the document has no heading.
pub const OVERVIEW_QUESTION: &str = "Overview";

/// Category of the overview card.
pub const OVERVIEW_CATEGORY: &str = "Overview";

#[derive(Clone, Debug, Default)]
pub struct OverviewOptions {
    /// Use this as the question instead of the first heading.
    pub question: Option<String>,
    pub category: Option<String>,
    pub topic: Option<String>,
}

/// Build the overview card. Returns `None` when the document has no prose
/// or lists to show.
pub fn extract_index_overview(
    markdown: &str,
    source_path: &str,
    options: &OverviewOptions,
) -> Option<Card> {
    let category = options.category.as_deref().unwrap_or(OVERVIEW_CATEGORY);
    let mut origin = CardOrigin::from_file_name(source_path, category);
    if let Some(topic) = &options.topic {
        origin = origin.with_topic(topic);
    }

    let mut question = options.question.clone();
    let mut content = Blocks::default();
    let mut in_fence = false;

    for raw in markdown.lines() {
        let line = Line::read_prose(raw);
        if let Line::Fence { .. } = line {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }
        match line {
            Line::Heading { text, .. } => {
                content.flush_all();
                if question.is_none() {
                    let text = clean(text);
                    if !text.is_empty() {
                        question = Some(text);
                        continue;
                    }
                }
                content.push_text(text);
                content.flush_all();
            }
            Line::Blank | Line::Rule => content.flush_all(),
            Line::ListItem(text) => {
                if !content.in_list() {
                    content.flush_all();
                }
                content.push_list_item(text);
            }
            Line::Text(text) | Line::Question(text) | Line::Answer(text) => {
                if content.in_list() {
                    content.continue_list(text);
                } else {
                    content.push_text(text);
                }
            }
            Line::TableRow(_) | Line::Tip | Line::Fence { .. } => {}
        }
    }

    let question = question.unwrap_or_else(|| OVERVIEW_QUESTION.to_string());
    Card::new(&origin, CardKind::Index, question, content.take())
}
