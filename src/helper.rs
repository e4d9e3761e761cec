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

use std::fs::copy;
use std::fs::create_dir_all;
use std::path::PathBuf;

use studydeck_core::error::ErrorReport;
use studydeck_core::error::Fallible;
use tempfile::tempdir;
use walkdir::WalkDir;

/// Create a temporary directory that outlives the test.
pub fn create_tmp_directory() -> Fallible<PathBuf> {
    let dir = tempdir()?.keep();
    Ok(dir.canonicalize()?)
}

/// Copy the `test` deck into a fresh temporary directory and return its path.
pub fn create_tmp_copy_of_test_directory() -> Fallible<String> {
    let source = PathBuf::from("./test").canonicalize()?;
    let target = create_tmp_directory()?;
    for entry in WalkDir::new(&source) {
        let entry = entry.map_err(|e| ErrorReport::new(e.to_string()))?;
        let relative = entry
            .path()
            .strip_prefix(&source)
            .map_err(|e| ErrorReport::new(e.to_string()))?;
        let destination = target.join(relative);
        if entry.file_type().is_dir() {
            create_dir_all(&destination)?;
        } else {
            copy(entry.path(), &destination)?;
        }
    }
    Ok(target.display().to_string())
}

/// A response read to completion.
pub struct Fetched {
    pub status: reqwest::StatusCode,
    pub headers: reqwest::header::HeaderMap,
    pub body: String,
}

impl Fetched {
    pub fn header(&self, name: &str) -> &str {
        self.headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
    }
}

/// GET a URL and read the whole body.
pub async fn fetch(url: &str) -> Fallible<Fetched> {
    let response = reqwest::get(url)
        .await
        .map_err(|e| ErrorReport::new(e.to_string()))?;
    let status = response.status();
    let headers = response.headers().clone();
    let body = response
        .text()
        .await
        .map_err(|e| ErrorReport::new(e.to_string()))?;
    Ok(Fetched {
        status,
        headers,
        body,
    })
}
