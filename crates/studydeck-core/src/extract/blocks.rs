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

//! Accumulators that turn runs of classified lines into content blocks.
//!
//! Each accumulator collects lines until it is flushed, at which point it
//! yields at most one [`ContentBlock`] and is empty again.

use crate::extract::line::DEFAULT_LANGUAGE;
use crate::extract::line::is_separator_row;
use crate::extract::line::split_row;
use crate::markdown::clean;
use crate::markdown::collapse_whitespace;
use crate::types::card::CodeType;
use crate::types::card::ContentBlock;

fn clean_prose(text: &str) -> String {
    collapse_whitespace(&clean(text))
}

/// Consecutive prose lines.
#[derive(Default)]
pub struct Paragraph {
    lines: Vec<String>,
}

impl Paragraph {
    pub fn push(&mut self, text: &str) {
        let text = text.trim();
        if !text.is_empty() {
            self.lines.push(text.to_string());
        }
    }

    pub fn is_open(&self) -> bool {
        !self.lines.is_empty()
    }

    pub fn flush(&mut self) -> Option<ContentBlock> {
        let lines = std::mem::take(&mut self.lines);
        let content = clean_prose(&lines.join(" "));
        if content.is_empty() {
            None
        } else {
            Some(ContentBlock::Text { content })
        }
    }
}

/// Bulleted or numbered items.
#[derive(Default)]
pub struct ListBlock {
    items: Vec<String>,
}

impl ListBlock {
    pub fn push_item(&mut self, text: &str) {
        self.items.push(text.trim().to_string());
    }

    /// Append a wrapped line to the last item. Returns false, and drops the
    /// line, when there is no item to continue.
    pub fn continue_last(&mut self, text: &str) -> bool {
        match self.items.last_mut() {
            Some(item) => {
                item.push(' ');
                item.push_str(text.trim());
                true
            }
            None => false,
        }
    }

    pub fn is_open(&self) -> bool {
        !self.items.is_empty()
    }

    pub fn flush(&mut self) -> Option<ContentBlock> {
        let items: Vec<String> = std::mem::take(&mut self.items)
            .iter()
            .map(|item| clean_prose(item))
            .collect();
        if items.is_empty() {
            None
        } else {
            Some(ContentBlock::List { items })
        }
    }
}

/// Pipe-delimited rows. The first row is the header, separator rows are
/// dropped, and a table without data rows yields nothing.
#[derive(Default)]
pub struct TableBlock {
    headers: Option<Vec<String>>,
    rows: Vec<Vec<String>>,
}

impl TableBlock {
    pub fn push_row(&mut self, row: &str) {
        let cells = split_row(row);
        if is_separator_row(&cells) {
            return;
        }
        let cells: Vec<String> = cells.iter().map(|cell| clean_prose(cell)).collect();
        match self.headers {
            None => self.headers = Some(cells),
            Some(_) => self.rows.push(cells),
        }
    }

    pub fn is_open(&self) -> bool {
        self.headers.is_some()
    }

    pub fn flush(&mut self) -> Option<ContentBlock> {
        let headers = self.headers.take();
        let rows = std::mem::take(&mut self.rows);
        match headers {
            Some(headers) if !rows.is_empty() => Some(ContentBlock::Table { headers, rows }),
            _ => None,
        }
    }
}

struct OpenFence {
    language: String,
    code_type: CodeType,
    lines: Vec<String>,
}

/// State of a fenced code region.
#[derive(Default)]
pub struct CodeFence {
    open: Option<OpenFence>,
}

impl CodeFence {
    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn open(&mut self, language: &str, code_type: CodeType) {
        let language = if language.is_empty() {
            DEFAULT_LANGUAGE
        } else {
            language
        };
        self.open = Some(OpenFence {
            language: language.to_string(),
            code_type,
            lines: Vec::new(),
        });
    }

    /// Keep a line verbatim.
    pub fn push(&mut self, line: &str) {
        if let Some(fence) = &mut self.open {
            fence.lines.push(line.to_string());
        }
    }

    /// Close the fence. Yields a code block unless no lines were collected.
    pub fn close(&mut self) -> Option<ContentBlock> {
        let fence = self.open.take()?;
        if fence.lines.is_empty() {
            return None;
        }
        Some(ContentBlock::Code {
            language: fence.language,
            code: fence.lines.join("\n"),
            code_type: fence.code_type,
        })
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Pending {
    Paragraph,
    List,
    Table,
}

/// The blocks of one answer under construction, plus the paragraph, list
/// and table accumulators feeding it.
///
/// Pending accumulators are flushed in the order they were opened, so block
/// order always follows line order.
#[derive(Default)]
pub struct Blocks {
    done: Vec<ContentBlock>,
    paragraph: Paragraph,
    list: ListBlock,
    table: TableBlock,
    opened: Vec<Pending>,
}

impl Blocks {
    fn mark_open(&mut self, pending: Pending) {
        if !self.opened.contains(&pending) {
            self.opened.push(pending);
        }
    }

    pub fn push_text(&mut self, text: &str) {
        self.paragraph.push(text);
        if self.paragraph.is_open() {
            self.mark_open(Pending::Paragraph);
        }
    }

    pub fn push_list_item(&mut self, text: &str) {
        self.list.push_item(text);
        self.mark_open(Pending::List);
    }

    pub fn continue_list(&mut self, text: &str) -> bool {
        self.list.continue_last(text)
    }

    pub fn push_table_row(&mut self, row: &str) {
        self.table.push_row(row);
        if self.table.is_open() {
            self.mark_open(Pending::Table);
        }
    }

    pub fn push(&mut self, block: ContentBlock) {
        self.flush_all();
        self.done.push(block);
    }

    pub fn in_list(&self) -> bool {
        self.list.is_open()
    }

    pub fn in_table(&self) -> bool {
        self.table.is_open()
    }

    pub fn flush_paragraph(&mut self) {
        self.flush_one(Pending::Paragraph);
    }

    pub fn flush_list(&mut self) {
        self.flush_one(Pending::List);
    }

    pub fn flush_table(&mut self) {
        self.flush_one(Pending::Table);
    }

    /// Flush one accumulator, along with anything opened before it.
    fn flush_one(&mut self, target: Pending) {
        let Some(pos) = self.opened.iter().position(|p| *p == target) else {
            return;
        };
        let earlier: Vec<Pending> = self.opened.drain(..=pos).collect();
        for pending in earlier {
            self.emit(pending);
        }
    }

    pub fn flush_all(&mut self) {
        let opened = std::mem::take(&mut self.opened);
        for pending in opened {
            self.emit(pending);
        }
    }

    fn emit(&mut self, pending: Pending) {
        let block = match pending {
            Pending::Paragraph => self.paragraph.flush(),
            Pending::List => self.list.flush(),
            Pending::Table => self.table.flush(),
        };
        if let Some(block) = block {
            self.done.push(block);
        }
    }

    /// True when nothing, finished or pending, has been collected.
    pub fn is_empty(&self) -> bool {
        self.done.is_empty() && self.opened.is_empty()
    }

    /// Flush everything and hand over the finished blocks.
    pub fn take(&mut self) -> Vec<ContentBlock> {
        self.flush_all();
        std::mem::take(&mut self.done)
    }

    /// Drop everything collected so far.
    pub fn clear(&mut self) {
        *self = Blocks::default();
    }
}
