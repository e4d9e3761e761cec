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

use studydeck_core::Card;
use studydeck_core::CardKind;
use studydeck_core::error::Fallible;

use crate::collection::Collection;

/// Card counts per extraction strategy.
#[derive(Debug, Default, PartialEq)]
pub struct CardCounts {
    pub overview: usize,
    pub qa: usize,
    pub sections: usize,
    pub concepts: usize,
}

impl CardCounts {
    pub fn of(cards: &[Card]) -> Self {
        let mut counts = CardCounts::default();
        for card in cards {
            match card.kind() {
                CardKind::Index => counts.overview += 1,
                CardKind::Qa => counts.qa += 1,
                CardKind::Section => counts.sections += 1,
                CardKind::Concept => counts.concepts += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.overview + self.qa + self.sections + self.concepts
    }
}

pub fn check_collection(directory: Option<String>) -> Fallible<()> {
    let collection = Collection::new(directory)?;
    let counts = CardCounts::of(&collection.cards);
    println!("{}", collection.config.title);
    println!("  overview:  {}", counts.overview);
    println!("  questions: {}", counts.qa);
    println!("  sections:  {}", counts.sections);
    println!("  concepts:  {}", counts.concepts);
    println!("  total:     {}", counts.total());
    Ok(())
}
