//! Tree-sitter backed `HighlightParser`.
//!
//! The parser keeps the last tree together with a rope copy of the text it
//! was parsed from. An incremental request splices the changed bytes into
//! that rope, edits the old tree to match and lets tree-sitter reuse it.

mod classify;

use self::classify::classify_node;
use crate::kernel::highlight::DiffRange;
use crate::kernel::language::LanguageId;
use crate::kernel::services::ports::parser::{Highlight, HighlightParser, ParserError, Result};
use ropey::Rope;
use tree_sitter::{InputEdit, Language, Parser, Point, Tree};

pub struct TreeSitterParser {
    parser: Parser,
    language: Option<LanguageId>,
    tree: Option<Tree>,
    text: Rope,
}

impl TreeSitterParser {
    pub fn new() -> Self {
        Self {
            parser: Parser::new(),
            language: None,
            tree: None,
            text: Rope::new(),
        }
    }

    pub fn language(&self) -> Option<LanguageId> {
        self.language
    }

    fn current_language(&self) -> Result<LanguageId> {
        self.language.ok_or(ParserError::NoLanguage)
    }

    fn check_diff(&self, changed: &str, diff: DiffRange) -> Result<()> {
        let len = self.text.len_bytes();
        if diff.start > diff.old_end || diff.old_end > len {
            return Err(ParserError::InvalidDiffState(format!(
                "range {}..{} outside parsed text of {} bytes",
                diff.start, diff.old_end, len
            )));
        }
        if diff.new_end < diff.start || changed.len() != diff.inserted_len() {
            return Err(ParserError::InvalidDiffState(format!(
                "changed text is {} bytes, diff expects {}",
                changed.len(),
                diff.new_end.saturating_sub(diff.start)
            )));
        }
        for offset in [diff.start, diff.old_end] {
            if self.text.char_to_byte(self.text.byte_to_char(offset)) != offset {
                return Err(ParserError::InvalidDiffState(format!(
                    "offset {} splits a character",
                    offset
                )));
            }
        }
        Ok(())
    }
}

impl Default for TreeSitterParser {
    fn default() -> Self {
        Self::new()
    }
}

impl HighlightParser for TreeSitterParser {
    fn set_language(&mut self, language: LanguageId) -> Result<()> {
        self.parser
            .set_language(grammar(language))
            .map_err(|e| ParserError::Language(format!("{}: {}", language, e)))?;
        self.language = Some(language);
        self.tree = None;
        self.text = Rope::new();
        tracing::debug!(%language, "grammar loaded");
        Ok(())
    }

    fn parse_full(&mut self, text: &Rope) -> Result<Vec<Highlight>> {
        let language = self.current_language()?;
        self.tree = None;
        let tree = parse_rope(&mut self.parser, text, None).ok_or(ParserError::TreeCreation)?;
        self.text = text.clone();
        let highlights = collect_highlights(language, &tree, &self.text);
        self.tree = Some(tree);
        Ok(highlights)
    }

    fn parse_incremental(&mut self, changed: &str, diff: DiffRange) -> Result<Vec<Highlight>> {
        let language = self.current_language()?;
        if self.tree.is_none() {
            return Err(ParserError::InvalidDiffState(
                "no previous tree to edit".to_string(),
            ));
        }
        self.check_diff(changed, diff)?;

        let start_position = point_at(&self.text, diff.start);
        let old_end_position = point_at(&self.text, diff.old_end);

        let start_char = self.text.byte_to_char(diff.start);
        let old_end_char = self.text.byte_to_char(diff.old_end);
        self.text.remove(start_char..old_end_char);
        self.text.insert(start_char, changed);

        let edit = InputEdit {
            start_byte: diff.start,
            old_end_byte: diff.old_end,
            new_end_byte: diff.new_end,
            start_position,
            old_end_position,
            new_end_position: point_at(&self.text, diff.new_end),
        };

        let Some(mut old_tree) = self.tree.take() else {
            return Err(ParserError::TreeCreation);
        };
        old_tree.edit(&edit);
        let tree = parse_rope(&mut self.parser, &self.text, Some(&old_tree))
            .ok_or(ParserError::TreeCreation)?;

        let highlights = collect_highlights(language, &tree, &self.text);
        self.tree = Some(tree);
        Ok(highlights)
    }

    fn list_kinds(&self) -> Result<Vec<String>> {
        let language = self.parser.language().ok_or(ParserError::NoLanguage)?;
        let mut kinds: Vec<String> = (0..language.node_kind_count())
            .filter_map(|id| u16::try_from(id).ok())
            .filter(|&id| language.node_kind_is_named(id))
            .filter_map(|id| language.node_kind_for_id(id))
            .map(str::to_string)
            .collect();
        kinds.sort();
        kinds.dedup();
        Ok(kinds)
    }
}

fn grammar(language: LanguageId) -> Language {
    match language {
        LanguageId::Rust => tree_sitter_rust::language(),
        LanguageId::Go => tree_sitter_go::language(),
        LanguageId::Python => tree_sitter_python::language(),
        LanguageId::C => tree_sitter_c::language(),
        LanguageId::Cpp => tree_sitter_cpp::language(),
        LanguageId::Java => tree_sitter_java::language(),
        LanguageId::JavaScript | LanguageId::Jsx => tree_sitter_javascript::language(),
        LanguageId::TypeScript => tree_sitter_typescript::language_typescript(),
        LanguageId::Tsx => tree_sitter_typescript::language_tsx(),
        LanguageId::Json => tree_sitter_json::language(),
        LanguageId::Yaml => tree_sitter_yaml::language(),
        LanguageId::Html => tree_sitter_html::language(),
        LanguageId::Xml => tree_sitter_xml::language_xml(),
        LanguageId::Css => tree_sitter_css::language(),
        LanguageId::Toml => tree_sitter_toml::language(),
        LanguageId::Sql => db3_sqlparser::language(),
        LanguageId::Bash => tree_sitter_bash::language(),
    }
}

/// Row/column of a byte offset; the column is in bytes, as tree-sitter expects.
fn point_at(rope: &Rope, byte: usize) -> Point {
    let row = rope.byte_to_line(byte);
    let column = byte.saturating_sub(rope.line_to_byte(row));
    Point { row, column }
}

fn parse_rope(parser: &mut Parser, rope: &Rope, old_tree: Option<&Tree>) -> Option<Tree> {
    let mut cache = RopeChunkCache::new(rope);
    parser.parse_with(
        &mut |byte_offset, _| cache.bytes_from(byte_offset),
        old_tree,
    )
}

struct RopeChunkCache<'a> {
    rope: &'a Rope,
    chunk: &'a str,
    start: usize,
    end: usize,
}

impl<'a> RopeChunkCache<'a> {
    fn new(rope: &'a Rope) -> Self {
        Self {
            rope,
            chunk: "",
            start: 0,
            end: 0,
        }
    }

    fn bytes_from(&mut self, byte_offset: usize) -> &'a [u8] {
        if byte_offset >= self.rope.len_bytes() {
            return &[];
        }

        if byte_offset < self.start || byte_offset >= self.end {
            let (chunk, chunk_start, _, _) = self.rope.chunk_at_byte(byte_offset);
            self.chunk = chunk;
            self.start = chunk_start;
            self.end = chunk_start + chunk.len();
        }

        let rel = byte_offset.saturating_sub(self.start);
        &self.chunk.as_bytes()[rel..]
    }
}

/// Pre-order walk; leaf kinds hide their children. Sorted by start, parents first.
fn collect_highlights(language: LanguageId, tree: &Tree, rope: &Rope) -> Vec<Highlight> {
    let mut stack = vec![tree.root_node()];
    let mut highlights = Vec::new();

    while let Some(node) = stack.pop() {
        if node.start_byte() >= node.end_byte() {
            continue;
        }

        if let Some(kind) = classify_node(language, node, rope) {
            highlights.push(Highlight::new(node.start_byte(), node.end_byte(), kind.tag()));
            if kind.is_leaf() {
                continue;
            }
        }

        for i in (0..node.child_count()).rev() {
            if let Some(child) = node.child(i) {
                stack.push(child);
            }
        }
    }

    highlights.sort_by_key(|h| h.start);
    highlights
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/syntax/mod.rs"]
mod tests;
