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

use std::fs::read_to_string;
use std::path::Path;

use serde::Deserialize;
use studydeck_core::Strategy;
use studydeck_core::error::ErrorReport;
use studydeck_core::error::Fallible;

/// Name of the optional configuration file at the root of a deck.
pub const CONFIG_FILE: &str = "studydeck.toml";

const DEFAULT_TITLE: &str = "Study Deck";
const DEFAULT_OVERVIEW: &str = "README.md";

/// Deck-level settings, read from `studydeck.toml`.
#[derive(Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeckConfig {
    /// Title shown in the viewer.
    pub title: String,
    /// Landing document turned into the overview card, relative to the root.
    pub overview: Option<String>,
    /// Question of the overview card, instead of its first heading.
    pub overview_title: Option<String>,
    /// Directories to read, in order.
    pub sources: Vec<SourceConfig>,
}

#[derive(Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    /// Directory relative to the deck root.
    pub path: String,
    pub strategy: Strategy,
    /// Category for every card from this directory.
    #[serde(default)]
    pub category: Option<String>,
}

impl Default for DeckConfig {
    fn default() -> Self {
        DeckConfig {
            title: DEFAULT_TITLE.to_string(),
            overview: Some(DEFAULT_OVERVIEW.to_string()),
            overview_title: None,
            sources: vec![SourceConfig {
                path: ".".to_string(),
                strategy: Strategy::Qa,
                category: None,
            }],
        }
    }
}

impl DeckConfig {
    /// Load the configuration of the deck at `directory`, falling back to the
    /// defaults when there is no configuration file.
    pub fn load(directory: &Path) -> Fallible<Self> {
        let path = directory.join(CONFIG_FILE);
        if !path.exists() {
            log::debug!("No {CONFIG_FILE} in {}, using defaults", directory.display());
            return Ok(DeckConfig::default());
        }
        let text = read_to_string(&path)?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Fallible<Self> {
        let config: DeckConfig = toml::from_str(text)
            .map_err(|e| ErrorReport::new(format!("Failed to parse {CONFIG_FILE}: {e}")))?;
        if config.sources.is_empty() {
            return Err(ErrorReport::new(format!(
                "{CONFIG_FILE} must list at least one source"
            )));
        }
        Ok(config)
    }
}
