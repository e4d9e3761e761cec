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

use chrono::SecondsFormat;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use studydeck_core::Card;
use studydeck_core::error::Fallible;

/// Name of the global the viewer reads the dataset from.
pub const DATASET_GLOBAL: &str = "STUDY_DECK";

/// Everything the viewer needs, as written to `cards.js` or exported as JSON.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub title: String,
    pub generated_at: String,
    /// Content hash of the cards. Changes whenever any card does.
    pub version: String,
    pub topics: Vec<TopicSummary>,
    pub cards: Vec<Card>,
}

/// One entry of the viewer's topic sidebar.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicSummary {
    pub topic_id: String,
    pub topic: String,
    pub category: String,
    pub count: usize,
}

impl Dataset {
    pub fn new(title: &str, cards: Vec<Card>) -> Fallible<Self> {
        let version = content_version(&cards)?;
        Ok(Dataset {
            title: title.to_string(),
            generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            version,
            topics: summarize_topics(&cards),
            cards,
        })
    }

    pub fn to_json(&self) -> Fallible<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// A script that assigns the dataset to `window.STUDY_DECK`.
    pub fn to_script(&self) -> Fallible<String> {
        let json = serde_json::to_string(self)?;
        Ok(format!("window.{DATASET_GLOBAL} = {json};\n"))
    }
}

/// First 16 hex digits of the blake3 hash of the serialized cards.
fn content_version(cards: &[Card]) -> Fallible<String> {
    let bytes = serde_json::to_vec(cards)?;
    let hash = blake3::hash(&bytes).to_hex();
    Ok(hash.as_str()[..16].to_string())
}

/// Topics in order of first appearance, with their card counts.
fn summarize_topics(cards: &[Card]) -> Vec<TopicSummary> {
    let mut topics: Vec<TopicSummary> = Vec::new();
    for card in cards {
        match topics.iter_mut().find(|t| t.topic_id == card.topic_id) {
            Some(summary) => summary.count += 1,
            None => topics.push(TopicSummary {
                topic_id: card.topic_id.clone(),
                topic: card.topic.clone(),
                category: card.category.clone(),
                count: 1,
            }),
        }
    }
    topics
}
