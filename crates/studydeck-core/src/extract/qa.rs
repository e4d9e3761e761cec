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

//! Question/answer pairs marked up as `**Q: ...**` followed by `A: ...`.

use crate::extract::blocks::Blocks;
use crate::extract::blocks::CodeFence;
use crate::extract::line::Line;
use crate::extract::line::scan_code_type;
use crate::markdown::clean;
use crate::types::card::Card;
use crate::types::card::CardKind;
use crate::types::card::CardOrigin;
use crate::types::card::QA_CATEGORY;

/// Extract every question/answer card from a file.
pub fn extract_qa(markdown: &str, source_path: &str) -> Vec<Card> {
    let origin = CardOrigin::from_file_name(source_path, QA_CATEGORY);
    QaExtractor::new(origin).extract(markdown)
}

pub struct QaExtractor {
    origin: CardOrigin,
}

#[derive(Default)]
struct State {
    fence: CodeFence,
    question: Option<String>,
    answer: Blocks,
    cards: Vec<Card>,
}

impl QaExtractor {
    pub fn new(origin: CardOrigin) -> Self {
        QaExtractor { origin }
    }

    pub fn extract(&self, markdown: &str) -> Vec<Card> {
        let lines: Vec<&str> = markdown.lines().collect();
        let mut state = State::default();
        for (line_num, raw) in lines.iter().enumerate() {
            self.read_line(&mut state, &lines, line_num, raw);
        }
        self.emit(&mut state);
        state.cards
    }

    fn read_line(&self, state: &mut State, lines: &[&str], line_num: usize, raw: &str) {
        let line = Line::read(raw);

        if let Line::Fence { language } = line {
            if state.fence.is_open() {
                let block = state.fence.close();
                if state.question.is_some() {
                    if let Some(block) = block {
                        state.answer.push(block);
                    }
                }
            } else {
                if state.question.is_some() {
                    state.answer.flush_all();
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
            Line::Question(text) => {
                self.emit(state);
                let question = clean(text);
                state.question = (!question.is_empty()).then_some(question);
                return;
            }
            // A section boundary: whatever follows it up to the next question
            // belongs to the section cards, not to this one.
            Line::Heading { level: 2, .. } => {
                self.emit(state);
                return;
            }
            _ => {}
        }
        if state.question.is_none() {
            return;
        }

        let answer = &mut state.answer;
        if answer.in_table() && !matches!(line, Line::TableRow(_) | Line::Blank) {
            answer.flush_table();
        }
        match line {
            Line::Answer(text) => {
                answer.flush_all();
                answer.push_text(text);
            }
            Line::Blank => answer.flush_all(),
            Line::Heading {
                level: 3 | 4,
                text,
            } => {
                answer.flush_all();
                answer.push_text(text);
            }
            Line::TableRow(row) => {
                if !answer.in_table() {
                    answer.flush_all();
                }
                answer.push_table_row(row);
            }
            Line::ListItem(text) => {
                if !answer.in_list() {
                    answer.flush_all();
                }
                answer.push_list_item(text);
            }
            // Rules and tips are never prose, but an open list still folds
            // them into its last item.
            Line::Rule | Line::Tip => {
                if answer.in_list() {
                    answer.continue_list(raw);
                }
            }
            Line::Heading { text, .. } | Line::Text(text) => {
                if answer.in_list() {
                    answer.continue_list(text);
                } else {
                    answer.push_text(text);
                }
            }
            Line::Fence { .. } | Line::Question(_) => {}
        }
    }

    /// Finish the pending card, if it has both a question and an answer, and
    /// reset for the next one.
    fn emit(&self, state: &mut State) {
        let answer = state.answer.take();
        if let Some(question) = state.question.take() {
            if let Some(card) = Card::new(&self.origin, CardKind::Qa, question, answer) {
                state.cards.push(card);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::card::CodeType;
    use crate::types::card::ContentBlock;

    fn text(content: &str) -> ContentBlock {
        ContentBlock::Text {
            content: content.to_string(),
        }
    }

    #[test]
    fn test_empty_string() {
        assert!(extract_qa("", "q.md").is_empty());
        assert!(extract_qa("\n\n\n", "q.md").is_empty());
    }

    #[test]
    fn test_no_question_lines() {
        let input = "# Title\n\nA: orphan answer\n\n- list\n\n```\ncode\n```\n";
        assert!(extract_qa(input, "q.md").is_empty());
    }

    #[test]
    fn test_basic_card() {
        let cards = extract_qa("**Q: What is X?**\nA: X is a thing.\n", "q.md");
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].question, "What is X?");
        assert_eq!(cards[0].answer, vec![text("X is a thing.")]);
    }

    #[test]
    fn test_card_metadata() {
        let cards = extract_qa("**Q: Q?**\nA: a\n", "csharp\\async_await.md");
        assert_eq!(cards[0].category, "Questions");
        assert_eq!(cards[0].topic, "Async Await");
        assert_eq!(cards[0].topic_id, "async-await");
        assert_eq!(cards[0].source, "csharp/async_await.md");
        assert_eq!(cards[0].id, None);
        assert_eq!(cards[0].kind(), CardKind::Qa);
    }

    #[test]
    fn test_answer_paragraph_continues() {
        let input = "**Q: Why?**\nA: Because the\n**runtime** says so.\n\nSecond paragraph.";
        let cards = extract_qa(input, "q.md");
        assert_eq!(
            cards[0].answer,
            vec![
                text("Because the runtime says so."),
                text("Second paragraph.")
            ]
        );
    }

    #[test]
    fn test_bad_example_code() {
        let input = "**Q: Q?**\nA: Look:\n❌ Bad Example\n```csharp\nvar x = 1;\n```\n";
        let cards = extract_qa(input, "q.md");
        assert_eq!(cards.len(), 1);
        assert_eq!(
            cards[0].answer,
            vec![
                text("Look: ❌ Bad Example"),
                ContentBlock::Code {
                    language: "csharp".to_string(),
                    code: "var x = 1;".to_string(),
                    code_type: CodeType::Bad,
                }
            ]
        );
    }

    #[test]
    fn test_nearer_marker_wins() {
        let input = "**Q: Q?**\n✅ Good Example\n\n❌ Bad Example\n```\nx\n```\n\n✅ Good\n```\ny\n```";
        let cards = extract_qa(input, "q.md");
        let types: Vec<CodeType> = cards[0]
            .answer
            .iter()
            .filter_map(|block| match block {
                ContentBlock::Code { code_type, .. } => Some(*code_type),
                _ => None,
            })
            .collect();
        assert_eq!(types, vec![CodeType::Bad, CodeType::Good]);
    }

    #[test]
    fn test_code_is_verbatim() {
        let input = "**Q: Q?**\n```\n# not a heading\n**Q: not a question**\n\n  - not a list\n```";
        let cards = extract_qa(input, "q.md");
        assert_eq!(cards.len(), 1);
        assert_eq!(
            cards[0].answer,
            vec![ContentBlock::Code {
                language: "plaintext".to_string(),
                code: "# not a heading\n**Q: not a question**\n\n  - not a list".to_string(),
                code_type: CodeType::Neutral,
            }]
        );
    }

    #[test]
    fn test_consecutive_questions() {
        let input = "**Q: First?**\n**Q: Second?**\nA: Only this one.";
        let cards = extract_qa(input, "q.md");
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].question, "Second?");
    }

    #[test]
    fn test_question_without_answer_is_dropped() {
        assert!(extract_qa("**Q: Lonely?**\n\n", "q.md").is_empty());
    }

    #[test]
    fn test_table() {
        let input = "**Q: Q?**\n| A | B |\n|---|---|\n| 1 | 2 |\n";
        let cards = extract_qa(input, "q.md");
        assert_eq!(
            cards[0].answer,
            vec![ContentBlock::Table {
                headers: vec!["A".to_string(), "B".to_string()],
                rows: vec![vec!["1".to_string(), "2".to_string()]],
            }]
        );
    }

    #[test]
    fn test_table_with_only_separator_is_dropped() {
        let input = "**Q: Q?**\nA: Intro.\n| A | B |\n|---|---|\nAfter.";
        let cards = extract_qa(input, "q.md");
        assert_eq!(cards[0].answer, vec![text("Intro."), text("After.")]);
    }

    #[test]
    fn test_non_table_line_closes_table() {
        let input = "**Q: Q?**\n| A |\n| 1 |\nText\n| B |\n| 2 |";
        let cards = extract_qa(input, "q.md");
        assert_eq!(cards[0].answer.len(), 3);
        assert!(matches!(&cards[0].answer[1], ContentBlock::Text { content } if content == "Text"));
    }

    #[test]
    fn test_list_with_continuation() {
        let input = "**Q: Q?**\nA: Reasons:\n- first reason that\nwraps here\n- second\n\nDone.";
        let cards = extract_qa(input, "q.md");
        assert_eq!(
            cards[0].answer,
            vec![
                text("Reasons:"),
                ContentBlock::List {
                    items: vec![
                        "first reason that wraps here".to_string(),
                        "second".to_string()
                    ]
                },
                text("Done.")
            ]
        );
    }

    #[test]
    fn test_numbered_list() {
        let input = "**Q: Q?**\n1. one\n2. `two`";
        let cards = extract_qa(input, "q.md");
        assert_eq!(
            cards[0].answer,
            vec![ContentBlock::List {
                items: vec!["one".to_string(), "two".to_string()]
            }]
        );
    }

    #[test]
    fn test_subheadings_become_prose() {
        let input = "**Q: Q?**\nA: Intro\n### Details\nMore text\n#### Deeper";
        let cards = extract_qa(input, "q.md");
        assert_eq!(
            cards[0].answer,
            vec![text("Intro"), text("Details More text"), text("Deeper")]
        );
    }

    #[test]
    fn test_rules_and_tips_are_not_content() {
        let input = "**Q: Q?**\nA: One\n---\n💡 Tip: skip me\nTwo";
        let cards = extract_qa(input, "q.md");
        assert_eq!(cards[0].answer, vec![text("One Two")]);
    }

    #[test]
    fn test_rule_inside_list_continues_item() {
        let input = "**Q: Q?**\n- item\n---\nmore";
        let cards = extract_qa(input, "q.md");
        assert_eq!(
            cards[0].answer,
            vec![ContentBlock::List {
                items: vec!["item --- more".to_string()]
            }]
        );
    }

    /// Content after a level-2 heading and before the next question is not
    /// part of any question card. The section extractor picks it up.
    #[test]
    fn test_level_two_heading_drops_following_content() {
        let input = "**Q: First?**\nA: one\n## Section\nOrphan text\n- orphan item\n**Q: Second?**\nA: two";
        let cards = extract_qa(input, "q.md");
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].answer, vec![text("one")]);
        assert_eq!(cards[1].question, "Second?");
        assert_eq!(cards[1].answer, vec![text("two")]);
    }

    #[test]
    fn test_multiple_cards() {
        let input = "**Q: A?**\nA: a\n\n**Q: B?**\nA: b\n\n**Q: C?**\n";
        let cards = extract_qa(input, "q.md");
        let questions: Vec<&str> = cards.iter().map(|c| c.question.as_str()).collect();
        assert_eq!(questions, vec!["A?", "B?"]);
    }

    #[test]
    fn test_question_text_is_cleaned() {
        let cards = extract_qa("**Q: What does `await` do?**\nA: yields", "q.md");
        assert_eq!(cards[0].question, "What does await do?");
    }

    #[test]
    fn test_unclosed_fence_is_dropped() {
        let input = "**Q: Q?**\nA: text\n```\nnever closed";
        let cards = extract_qa(input, "q.md");
        assert_eq!(cards[0].answer, vec![text("text")]);
    }

    #[test]
    fn test_every_card_has_content() {
        let input = "**Q: A?**\n\n**Q: B?**\n```\n```\n**Q: C?**\n| h |\n|---|\n";
        assert!(extract_qa(input, "q.md").is_empty());
    }
}
