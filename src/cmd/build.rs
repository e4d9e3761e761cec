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

use std::path::PathBuf;

use studydeck_core::error::Fallible;

use crate::collection::Collection;
use crate::dataset::Dataset;
use crate::site::Site;

/// Default output directory, relative to the deck directory.
pub const DEFAULT_OUTPUT: &str = "dist";

/// Render the viewer for a collection in memory.
pub fn render_site(collection: &Collection) -> Fallible<Site> {
    let dataset = Dataset::new(&collection.config.title, collection.cards.clone())?;
    Site::new(&dataset)
}

pub fn build_site(directory: Option<String>, output: Option<String>) -> Fallible<()> {
    let collection = Collection::new(directory)?;
    let output: PathBuf = match output {
        Some(path) => PathBuf::from(path),
        None => collection.directory.join(DEFAULT_OUTPUT),
    };
    let site = render_site(&collection)?;
    site.write_to(&output)?;
    println!(
        "Wrote {} cards to {}",
        collection.cards.len(),
        output.display()
    );
    Ok(())
}
