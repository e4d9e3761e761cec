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

//! One card per heading-delimited section of a note.

use crate::extract::blocks::Blocks;
use crate::extract::blocks::CodeFence;
use crate::extract::line::Line;
use crate::extract::line::scan_code_type;
use crate::markdown::clean;
use crate::types::card::Card;
use crate::types::card::CardKind;
use crate::types::card::CardOrigin;

/// Extract one card per `##`, `###` or `####` section.
pub fn extract_sections(markdown: &str, source_path: &str) -> Vec<Card> {
    let origin = CardOrigin::from_path_segments(source_path);
    SectionExtractor::new(origin).extract(markdown)
}

pub struct SectionExtractor {
    origin: CardOrigin,
}

struct Section {
    title: String,
    level: usize,
}

#[derive(Default)]
struct State {
    fence: CodeFence,
    section: Option<Section>,
    content: Blocks,
    cards: Vec<Card>,
}

impl SectionExtractor {
    pub fn new(origin: CardOrigin) -> Self {
        SectionExtractor { origin }
    }

    pub fn extract(&self, markdown: &str) -> Vec<Card> {
        let lines: Vec<&str> = markdown.lines().collect();
        let mut state = State::default();
        for (line_num, raw) in lines.iter().enumerate() {
            self.read_line(&mut state, &lines, line_num, raw);
        }
        self.close(&mut state);
        state.cards
    }

    fn read_line(&self, state: &mut State, lines: &[&str], line_num: usize, raw: &str) {
        let line = Line::read_prose(raw);

        if let Line::Fence { language } = line {
            if state.fence.is_open() {
                let block = state.fence.close();
                if state.section.is_some() {
                    if let Some(block) = block {
                        state.content.push(block);
                    }
                }
            } else {
                if state.section.is_some() {
                    state.content.flush_all();
                }
                state
                    .fence
                    .open(language, scan_code_type(lines, line_num));
            }
            return;
        }
        if state.fence.is_open() {
            state.fence.push(raw);
            return;
        }

        match line {
            Line::Heading { level: 1, .. } => {
                self.close(state);
                return;
            }
            Line::Heading { level, text } => {
                let nested = matches!(&state.section, Some(section) if level > section.level);
                if nested {
                    state.content.flush_all();
                    state.content.push_text(text);
                    state.content.flush_all();
                } else if level <= 4 {
                    self.close(state);
                    let title = clean(text);
                    if !title.is_empty() {
                        state.section = Some(Section { title, level });
                    }
                }
                return;
            }
            Line::Rule => {
                self.close(state);
                return;
            }
            _ => {}
        }
        if state.section.is_none() {
            return;
        }

        let content = &mut state.content;
        match line {
            Line::Blank => content.flush_all(),
            Line::TableRow(row) => {
                if !content.in_table() {
                    content.flush_all();
                }
                content.push_table_row(row);
            }
            Line::ListItem(text) => {
                if !content.in_list() {
                    content.flush_paragraph();
                }
                content.push_list_item(text);
            }
            Line::Tip => {}
            Line::Text(text) | Line::Question(text) | Line::Answer(text) => {
                if content.in_list() {
                    content.continue_list(text);
                } else {
                    content.push_text(text);
                }
            }
            Line::Fence { .. } | Line::Heading { .. } | Line::Rule => {}
        }
    }

    /// Emit the open section, if it collected anything.
    fn close(&self, state: &mut State) {
        let content = state.content.take();
        if let Some(section) = state.section.take() {
            if let Some(card) = Card::new(&self.origin, CardKind::Section, section.title, content)
            {
                state.cards.push(card);
            }
        }
    }
}
