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

use std::env::current_dir;
use std::fs::read_to_string;
use std::path::Path;
use std::path::PathBuf;

use studydeck_core::Card;
use studydeck_core::Document;
use studydeck_core::OverviewOptions;
use studydeck_core::error::ErrorReport;
use studydeck_core::error::Fallible;
use studydeck_core::error::fail;
use studydeck_core::extract_document;
use studydeck_core::extract_index_overview;
use walkdir::DirEntry;
use walkdir::WalkDir;

use crate::config::DeckConfig;
use crate::config::SourceConfig;

/// A deck directory, its configuration, and every card extracted from it.
pub struct Collection {
    pub directory: PathBuf,
    pub config: DeckConfig,
    pub cards: Vec<Card>,
}

impl Collection {
    pub fn new(directory: Option<String>) -> Fallible<Self> {
        let directory: PathBuf = match directory {
            Some(dir) => PathBuf::from(dir),
            None => current_dir()?,
        };
        if !directory.exists() {
            return fail("directory does not exist.");
        }
        let directory = directory.canonicalize()?;
        let config = DeckConfig::load(&directory)?;
        let cards = collect_cards(&directory, &config)?;
        log::debug!(
            "Collected {} cards from {}",
            cards.len(),
            directory.display()
        );
        Ok(Collection {
            directory,
            config,
            cards,
        })
    }
}

/// Read the overview document and every source directory of a deck, then
/// number the cards in the order they were found.
pub fn collect_cards(root: &Path, config: &DeckConfig) -> Fallible<Vec<Card>> {
    let mut cards = Vec::new();

    let overview_path = config.overview.as_ref().map(|name| root.join(name));
    if let Some(path) = overview_path.as_ref().filter(|p| p.is_file()) {
        let text = read_to_string(path)?;
        let options = OverviewOptions {
            question: config.overview_title.clone(),
            ..OverviewOptions::default()
        };
        match extract_index_overview(&text, &relative_source(root, path), &options) {
            Some(card) => cards.push(card),
            None => log::debug!("{}: nothing to show in the overview", path.display()),
        }
    }

    for source in &config.sources {
        let extracted = collect_source(root, source, overview_path.as_deref())?;
        cards.extend(extracted);
    }

    assign_ids(&mut cards);
    Ok(cards)
}

fn collect_source(
    root: &Path,
    source: &SourceConfig,
    overview: Option<&Path>,
) -> Fallible<Vec<Card>> {
    let directory = root.join(&source.path);
    if !directory.is_dir() {
        return fail(format!("source directory does not exist: {}", source.path));
    }
    let mut cards = Vec::new();
    let walker = WalkDir::new(&directory)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_hidden(entry));
    for entry in walker {
        let entry = entry.map_err(|e| {
            ErrorReport::new(format!("Failed to walk {}: {e}", directory.display()))
        })?;
        let path = entry.path();
        if !(path.is_file() && path.extension().is_some_and(|ext| ext == "md")) {
            continue;
        }
        if overview.is_some_and(|overview| overview == path) {
            continue;
        }
        let document_path = relative_source(&directory, path);
        let source_path = relative_source(root, path);
        let text =
            read_to_string(path).map_err(|e| ErrorReport::from(e).in_file(&source_path))?;
        let document = Document {
            path: &document_path,
            source: &source_path,
            text: &text,
        };
        let extracted = extract_document(source.strategy, &document, source.category.as_deref());
        if extracted.is_empty() {
            log::debug!("{source_path}: no {} cards", source.strategy);
            continue;
        }
        log::debug!(
            "{source_path}: {} {} cards",
            extracted.len(),
            source.strategy
        );
        cards.extend(extracted);
    }
    Ok(cards)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.'))
}

/// `path` relative to `root`, joined with forward slashes.
fn relative_source(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Number cards `card-1`, `card-2`, ... in order.
pub fn assign_ids(cards: &mut [Card]) {
    for (idx, card) in cards.iter_mut().enumerate() {
        card.id = Some(format!("card-{}", idx + 1));
    }
}

#[cfg(test)]
mod tests {
    use std::fs::create_dir_all;
    use std::fs::write;

    use studydeck_core::CardKind;

    use super::*;
    use crate::helper::create_tmp_copy_of_test_directory;
    use crate::helper::create_tmp_directory;

    #[test]
    fn test_non_existent_directory() {
        let result = Collection::new(Some("./derpherp".to_string()));
        let err = result.err().map(|e| e.to_string());
        assert_eq!(err.as_deref(), Some("error: directory does not exist."));
    }

    #[test]
    fn test_test_directory() -> Fallible<()> {
        let directory = create_tmp_copy_of_test_directory()?;
        let collection = Collection::new(Some(directory))?;
        let cards = &collection.cards;
        assert_eq!(collection.config.title, ".NET Study Deck");

        let kinds: Vec<CardKind> = cards.iter().map(|c| c.kind()).collect();
        assert_eq!(kinds[0], CardKind::Index);
        assert_eq!(kinds.iter().filter(|k| **k == CardKind::Qa).count(), 4);
        assert_eq!(kinds.iter().filter(|k| **k == CardKind::Section).count(), 3);
        assert_eq!(kinds.iter().filter(|k| **k == CardKind::Concept).count(), 2);

        let ids: Vec<&str> = cards.iter().filter_map(|c| c.id.as_deref()).collect();
        let expected: Vec<String> = (1..=cards.len()).map(|i| format!("card-{i}")).collect();
        assert_eq!(ids, expected);

        assert!(cards.iter().all(|c| !c.answer.is_empty()));
        assert!(cards.iter().all(|c| !c.source.contains('\\')));
        Ok(())
    }

    #[test]
    fn test_sources_are_root_relative() -> Fallible<()> {
        let directory = create_tmp_copy_of_test_directory()?;
        let collection = Collection::new(Some(directory))?;
        let gc = collection
            .cards
            .iter()
            .find(|c| c.is_section)
            .ok_or_else(|| ErrorReport::new("no section card"))?;
        assert_eq!(gc.source, "notes/dotnet/memory/garbage-collection.md");
        assert_eq!(gc.category, "Dotnet");
        assert_eq!(gc.topic, "Memory");

        let interview = collection
            .cards
            .iter()
            .find(|c| c.kind() == CardKind::Qa)
            .ok_or_else(|| ErrorReport::new("no question card"))?;
        assert_eq!(interview.category, "Interview");
        Ok(())
    }

    #[test]
    fn test_defaults_without_config() -> Fallible<()> {
        let directory = create_tmp_directory()?;
        write(directory.join("README.md"), "# Welcome\nHello.\n**Q: Not here?**\nA: no")?;
        create_dir_all(directory.join("sub"))?;
        write(directory.join("sub/basics.md"), "**Q: Here?**\nA: yes")?;
        write(directory.join("empty.md"), "Nothing to see.")?;
        create_dir_all(directory.join(".hidden"))?;
        write(directory.join(".hidden/secret.md"), "**Q: Hidden?**\nA: yes")?;

        let config = DeckConfig::load(&directory)?;
        let cards = collect_cards(&directory, &config)?;
        assert_eq!(cards.len(), 2);
        assert!(cards[0].is_index);
        assert_eq!(cards[0].question, "Welcome");
        assert_eq!(cards[1].question, "Here?");
        assert_eq!(cards[1].source, "sub/basics.md");
        assert_eq!(cards[1].id.as_deref(), Some("card-2"));
        Ok(())
    }

    #[test]
    fn test_leading_rule_does_not_abort() -> Fallible<()> {
        let directory = create_tmp_directory()?;
        write(
            directory.join("rules.md"),
            "---\n**Q: What is X?**\nA: X is a thing.\n---\n**Q: What is Y?**\nA: Y.\n",
        )?;
        write(directory.join("unclosed.md"), "---\n**Q: What is Z?**\nA: Z.\n")?;
        let config = DeckConfig::load(&directory)?;
        let cards = collect_cards(&directory, &config)?;
        let questions: Vec<&str> = cards.iter().map(|c| c.question.as_str()).collect();
        assert_eq!(questions, vec!["What is X?", "What is Y?", "What is Z?"]);
        Ok(())
    }

    #[test]
    fn test_missing_source_directory() -> Fallible<()> {
        let directory = create_tmp_directory()?;
        let config = DeckConfig::parse("[[sources]]\npath = \"nope\"\nstrategy = \"qa\"\n")?;
        assert!(collect_cards(&directory, &config).is_err());
        Ok(())
    }

    #[test]
    fn test_assign_ids() {
        let mut cards = studydeck_core::extract_qa("**Q: A?**\nA: a\n**Q: B?**\nA: b", "q.md");
        assign_ids(&mut cards);
        assert_eq!(cards[0].id.as_deref(), Some("card-1"));
        assert_eq!(cards[1].id.as_deref(), Some("card-2"));
    }
}
