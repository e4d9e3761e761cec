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

use std::fs::write;

use studydeck_core::error::Fallible;

use crate::collection::Collection;
use crate::dataset::Dataset;

pub fn export_collection(directory: Option<String>, output: Option<String>) -> Fallible<()> {
    let collection = Collection::new(directory)?;
    let dataset = Dataset::new(&collection.config.title, collection.cards)?;
    let json = dataset.to_json()?;
    match output {
        Some(path) => {
            write(&path, json)?;
            log::debug!("Exported {} cards to {path}", dataset.cards.len());
        }
        None => println!("{json}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs::read_to_string;
    use std::path::Path;

    use studydeck_core::CardKind;

    use super::*;
    use crate::helper::create_tmp_copy_of_test_directory;

    #[test]
    fn test_export_to_file() -> Fallible<()> {
        let directory = create_tmp_copy_of_test_directory()?;
        let output = Path::new(&directory).join("deck.json").display().to_string();
        export_collection(Some(directory), Some(output.clone()))?;
        let dataset: Dataset = serde_json::from_str(&read_to_string(&output)?)?;
        assert_eq!(dataset.title, ".NET Study Deck");
        assert_eq!(dataset.cards.len(), 10);
        assert_eq!(dataset.cards[0].kind(), CardKind::Index);
        assert_eq!(dataset.cards[0].id.as_deref(), Some("card-1"));
        Ok(())
    }

    #[test]
    fn test_export_to_stdout() -> Fallible<()> {
        let directory = create_tmp_copy_of_test_directory()?;
        export_collection(Some(directory), None)
    }
}
