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

//! Good and bad code examples, titled by the heading above them.

use crate::extract::blocks::CodeFence;
use crate::extract::line::Line;
use crate::extract::line::scan_code_type;
use crate::markdown::clean;
use crate::types::card::Card;
use crate::types::card::CardKind;
use crate::types::card::CardOrigin;
use crate::types::card::CodeType;
use crate::types::card::ContentBlock;

/// Extract one card per fenced example marked good or bad.
pub fn extract_concepts(markdown: &str, source_path: &str) -> Vec<Card> {
    let origin = CardOrigin::from_path_segments(source_path);
    ConceptExtractor::new(origin).extract(markdown)
}

pub struct ConceptExtractor {
    origin: CardOrigin,
}

impl ConceptExtractor {
    pub fn new(origin: CardOrigin) -> Self {
        ConceptExtractor { origin }
    }

    pub fn extract(&self, markdown: &str) -> Vec<Card> {
        let lines: Vec<&str> = markdown.lines().collect();
        let mut fence = CodeFence::default();
        let mut heading: Option<String> = None;
        let mut cards = Vec::new();

        for (line_num, raw) in lines.iter().enumerate() {
            match Line::read_prose(raw) {
                Line::Fence { language } => {
                    if !fence.is_open() {
                        fence.open(language, scan_code_type(&lines, line_num));
                        continue;
                    }
                    let Some(block) = fence.close() else {
                        continue;
                    };
                    let code_type = match &block {
                        ContentBlock::Code { code_type, .. } => *code_type,
                        _ => CodeType::Neutral,
                    };
                    if code_type == CodeType::Neutral {
                        continue;
                    }
                    // The heading titles one example only.
                    let question = heading
                        .take()
                        .unwrap_or_else(|| code_type.example_title().to_string());
                    if let Some(card) = Card::new(&self.origin, CardKind::Concept, question, vec![block])
                    {
                        cards.push(card);
                    }
                }
                _ if fence.is_open() => fence.push(raw),
                Line::Heading { level: 2, text } => {
                    let text = clean(text);
                    heading = (!text.is_empty()).then_some(text);
                }
                _ => {}
            }
        }
        cards
    }
}
