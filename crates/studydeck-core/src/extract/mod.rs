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

//! Markdown to card extraction.
//!
//! Four strategies read the same kind of input and differ in what they turn
//! into cards:
//!
//! - [`qa`]: `**Q: ...**` / `A: ...` pairs.
//! - [`sections`]: one card per heading-delimited section.
//! - [`concepts`]: one card per fenced example marked good or bad.
//! - [`overview`]: a single card for the deck's landing document.
//!
//! They share the line classifier in [`line`] and the accumulators in
//! [`blocks`], and keep no state between files.

use std::fmt::Display;
use std::fmt::Formatter;

use serde::Deserialize;
use serde::Serialize;

use crate::types::card::Card;
use crate::types::card::CardOrigin;
use crate::types::card::QA_CATEGORY;

pub mod blocks;
pub mod concepts;
pub mod frontmatter;
pub mod line;
pub mod overview;
pub mod qa;
pub mod sections;

use concepts::ConceptExtractor;
use frontmatter::extract_frontmatter;
use qa::QaExtractor;
use sections::SectionExtractor;

/// How the files of a source directory are turned into cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Qa,
    Sections,
    Concepts,
}

impl Display for Strategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Qa => write!(f, "qa"),
            Strategy::Sections => write!(f, "sections"),
            Strategy::Concepts => write!(f, "concepts"),
        }
    }
}

impl Strategy {
    /// The grouping metadata this strategy derives from a path.
    pub fn origin(self, path: &str) -> CardOrigin {
        match self {
            Strategy::Qa => CardOrigin::from_file_name(path, QA_CATEGORY),
            Strategy::Sections | Strategy::Concepts => CardOrigin::from_path_segments(path),
        }
    }

    pub fn extract(self, origin: CardOrigin, markdown: &str) -> Vec<Card> {
        match self {
            Strategy::Qa => QaExtractor::new(origin).extract(markdown),
            Strategy::Sections => SectionExtractor::new(origin).extract(markdown),
            Strategy::Concepts => ConceptExtractor::new(origin).extract(markdown),
        }
    }
}

/// One Markdown file handed to the extractors.
pub struct Document<'a> {
    /// Path that topic and category are derived from.
    pub path: &'a str,
    /// Path recorded on the cards.
    pub source: &'a str,
    pub text: &'a str,
}

/// Extract the cards of one file, honoring its frontmatter. A category
/// override from the caller applies unless the frontmatter sets its own.
pub fn extract_document(
    strategy: Strategy,
    document: &Document,
    category: Option<&str>,
) -> Vec<Card> {
    let (metadata, body) = extract_frontmatter(document.text);
    if metadata.skip {
        return Vec::new();
    }
    let mut origin = strategy.origin(document.path).with_source(document.source);
    if let Some(category) = metadata.category.as_deref().or(category) {
        origin = origin.with_category(category);
    }
    if let Some(topic) = &metadata.topic {
        origin = origin.with_topic(topic);
    }
    strategy.extract(origin, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fallible;

    fn document<'a>(path: &'a str, text: &'a str) -> Document<'a> {
        Document {
            path,
            source: path,
            text,
        }
    }

    #[test]
    fn test_strategy_from_config_value() -> Fallible<()> {
        #[derive(Deserialize)]
        struct Wrapper {
            strategy: Strategy,
        }
        let wrapper: Wrapper = toml::from_str("strategy = \"sections\"")?;
        assert_eq!(wrapper.strategy, Strategy::Sections);
        assert_eq!(wrapper.strategy.to_string(), "sections");
        Ok(())
    }

    #[test]
    fn test_extract_document_with_frontmatter() -> Fallible<()> {
        let text = "---\ntopic = \"Threads\"\n---\n**Q: Q?**\nA: a";
        let cards = extract_document(Strategy::Qa, &document("misc.md", text), None);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].topic, "Threads");
        assert_eq!(cards[0].topic_id, "threads");
        assert_eq!(cards[0].category, "Questions");
        Ok(())
    }

    #[test]
    fn test_category_precedence() -> Fallible<()> {
        let text = "**Q: Q?**\nA: a";
        let cards = extract_document(Strategy::Qa, &document("a.md", text), Some("Interview"));
        assert_eq!(cards[0].category, "Interview");

        let text = "---\ncategory = \"Mine\"\n---\n**Q: Q?**\nA: a";
        let cards = extract_document(Strategy::Qa, &document("a.md", text), Some("Interview"));
        assert_eq!(cards[0].category, "Mine");
        Ok(())
    }

    #[test]
    fn test_skipped_document() -> Fallible<()> {
        let text = "---\nskip = true\n---\n**Q: Q?**\nA: a";
        assert!(extract_document(Strategy::Qa, &document("a.md", text), None).is_empty());
        Ok(())
    }

    #[test]
    fn test_source_differs_from_path() -> Fallible<()> {
        let document = Document {
            path: "dotnet/memory/gc.md",
            source: "notes/dotnet/memory/gc.md",
            text: "## GC\nGenerations.",
        };
        let cards = extract_document(Strategy::Sections, &document, None);
        assert_eq!(cards[0].category, "Dotnet");
        assert_eq!(cards[0].topic, "Memory");
        assert_eq!(cards[0].source, "notes/dotnet/memory/gc.md");
        Ok(())
    }

    #[test]
    fn test_rule_separated_questions() {
        let text = "---\n**Q: What is X?**\nA: X is a thing.\n---\n**Q: What is Y?**\nA: Y.\n";
        let cards = extract_document(Strategy::Qa, &document("q.md", text), None);
        let questions: Vec<&str> = cards.iter().map(|c| c.question.as_str()).collect();
        assert_eq!(questions, vec!["What is X?", "What is Y?"]);
    }

    #[test]
    fn test_unclosed_leading_rule() {
        let text = "---\n**Q: What is X?**\nA: X is a thing.\n";
        let cards = extract_document(Strategy::Qa, &document("q.md", text), None);
        assert_eq!(cards.len(), 1);
    }
}
