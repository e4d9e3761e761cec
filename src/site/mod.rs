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

mod template;

use std::fs::create_dir_all;
use std::fs::write;
use std::path::Path;

use studydeck_core::error::Fallible;

use crate::dataset::Dataset;
use crate::site::template::index_page;

pub const INDEX_HTML: &str = "index.html";
pub const CARDS_JS: &str = "cards.js";
pub const APP_JS: &str = "app.js";
pub const STYLE_CSS: &str = "style.css";
pub const SW_JS: &str = "sw.js";

/// One file of the generated site.
pub struct Asset {
    pub name: &'static str,
    pub content_type: &'static str,
    pub body: String,
}

/// The complete static viewer, rendered in memory.
pub struct Site {
    assets: Vec<Asset>,
}

impl Site {
    pub fn new(dataset: &Dataset) -> Fallible<Self> {
        let assets = vec![
            Asset {
                name: INDEX_HTML,
                content_type: "text/html; charset=utf-8",
                body: index_page(&dataset.title).into_string(),
            },
            Asset {
                name: CARDS_JS,
                content_type: "text/javascript",
                body: dataset.to_script()?,
            },
            Asset {
                name: APP_JS,
                content_type: "text/javascript",
                body: include_str!("app.js").to_string(),
            },
            Asset {
                name: STYLE_CSS,
                content_type: "text/css",
                body: include_str!("style.css").to_string(),
            },
            Asset {
                name: SW_JS,
                content_type: "text/javascript",
                body: service_worker(&dataset.version),
            },
        ];
        Ok(Site { assets })
    }

    pub fn get(&self, name: &str) -> Option<&Asset> {
        self.assets.iter().find(|asset| asset.name == name)
    }

    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    /// Write every asset into `directory`, creating it if needed.
    pub fn write_to(&self, directory: &Path) -> Fallible<()> {
        create_dir_all(directory)?;
        for asset in &self.assets {
            let path = directory.join(asset.name);
            log::debug!("Writing {}", path.display());
            write(path, &asset.body)?;
        }
        Ok(())
    }
}

/// The service worker script, prefixed with the cache name and the list of
/// files to cache.
fn service_worker(version: &str) -> String {
    let mut content = String::new();
    content.push_str(&format!("const CACHE_NAME = 'studydeck-{version}';\n"));
    content.push_str("const ASSETS = [\n  './',\n");
    for name in [INDEX_HTML, CARDS_JS, APP_JS, STYLE_CSS] {
        content.push_str(&format!("  './{name}',\n"));
    }
    content.push_str("];\n\n");
    content.push_str(include_str!("sw.js"));
    content
}

#[cfg(test)]
mod tests {
    use std::fs::read_to_string;

    use studydeck_core::extract_qa;

    use super::*;
    use crate::helper::create_tmp_directory;

    fn sample_site() -> Fallible<(Dataset, Site)> {
        let cards = extract_qa("**Q: What is a <Span>?**\nA: A view over memory.", "spans.md");
        let dataset = Dataset::new("My <Deck>", cards)?;
        let site = Site::new(&dataset)?;
        Ok((dataset, site))
    }

    #[test]
    fn test_assets() -> Fallible<()> {
        let (_, site) = sample_site()?;
        let names: Vec<&str> = site.assets().iter().map(|a| a.name).collect();
        assert_eq!(names, vec![INDEX_HTML, CARDS_JS, APP_JS, STYLE_CSS, SW_JS]);
        assert!(site.get("missing.js").is_none());
        Ok(())
    }

    #[test]
    fn test_index_escapes_title() -> Fallible<()> {
        let (_, site) = sample_site()?;
        let html = &site.get(INDEX_HTML).map(|a| a.body.clone()).unwrap_or_default();
        assert!(html.contains("<title>My &lt;Deck&gt;</title>"));
        assert!(html.contains("src=\"cards.js\""));
        assert!(html.contains("src=\"app.js\""));
        Ok(())
    }

    #[test]
    fn test_service_worker_uses_version() -> Fallible<()> {
        let (dataset, site) = sample_site()?;
        let sw = &site.get(SW_JS).map(|a| a.body.clone()).unwrap_or_default();
        let expected = format!("const CACHE_NAME = 'studydeck-{}';", dataset.version);
        assert!(sw.starts_with(&expected));
        assert!(sw.contains("'./cards.js'"));
        Ok(())
    }

    #[test]
    fn test_write_to() -> Fallible<()> {
        let (_, site) = sample_site()?;
        let dir = create_tmp_directory()?.join("dist");
        site.write_to(&dir)?;
        for asset in site.assets() {
            assert_eq!(read_to_string(dir.join(asset.name))?, asset.body);
        }
        Ok(())
    }
}
