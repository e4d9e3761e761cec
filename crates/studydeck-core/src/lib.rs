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

//! studydeck-core: Markdown to flashcard extraction.
//!
//! This library provides:
//! - Card and content block types that serialize to the viewer's dataset
//! - Topic and label derivation from file paths
//! - Inline Markdown cleanup
//! - The question/answer, section, concept and overview extractors

pub mod error;
pub mod extract;
pub mod markdown;
pub mod types;

// Re-exports for convenience
pub use error::{ErrorReport, Fallible, fail};
pub use extract::concepts::extract_concepts;
pub use extract::overview::{OverviewOptions, extract_index_overview};
pub use extract::qa::extract_qa;
pub use extract::sections::extract_sections;
pub use extract::{Document, Strategy, extract_document};
pub use markdown::clean;
pub use types::card::{Card, CardKind, CardOrigin, CodeType, ContentBlock};
pub use types::topic::{TopicInfo, normalize_topic_id};
