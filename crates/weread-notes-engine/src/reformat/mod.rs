//! # Reformatting
//!
//! Turns a flattened WeRead clipboard export into structured Markdown.
//!
//! ## Pipeline
//!
//! 1. **Preamble** (`preamble`): the `《title》` line and the author /
//!    notes-count lines after it
//! 2. **Line Classification** (`classify`): each remaining line gets a
//!    [`LineKind`] from its own shape and its two physical neighbours
//! 3. **Note Assembly** (`assembler`): a [`NoteAssembler`] pairs quotes with
//!    thoughts through single-slot pending buffers and emits [`NotePart`]s
//! 4. **Rendering** (`render`): a [`MarkdownWriter`] turns parts into lines
//!
//! ## Key Invariants
//!
//! - Total over all inputs: no error type, no panics
//! - Nothing is retained between calls except the book name on a
//!   [`Reformatter`]
//! - Output fed back in renders to itself: headings, quotes and fences this
//!   module writes are recognised and never wrapped a second time

pub mod assembler;
pub mod classify;
pub mod markers;
pub mod preamble;
pub mod render;

pub use assembler::{Note, NoteAssembler, NotePart};
pub use classify::{
    LineKind, LineRef, NoteLineClassifier, is_chapter_heading, is_sandwiched_heading,
    lines_with_neighbours,
};
pub use preamble::Preamble;
pub use render::MarkdownWriter;

use markers::Title;

/// Result of one reformatting run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedNotes {
    pub markdown: String,
    /// Bracketed book title when the export had one.
    pub title: Option<String>,
}

/// Reformats a raw export into Markdown.
pub fn reformat(raw: &str) -> String {
    reformat_notes(raw).markdown
}

/// Reformats a raw export, also returning the detected book title.
pub fn reformat_notes(raw: &str) -> FormattedNotes {
    let lines: Vec<&str> = raw.split('\n').map(str::trim).collect();
    let preamble = Preamble::extract(&lines);

    let mut writer = MarkdownWriter::new();
    if let Some(title) = preamble.title {
        writer.title(title);
    }
    writer.metadata(&preamble.metadata);

    let classifier = NoteLineClassifier;
    let mut assembler = NoteAssembler::new();
    let mut skipped = 0usize;
    for lr in lines_with_neighbours(&lines, preamble.body_start) {
        let kind = classifier.classify(&lr);
        if kind.is_skipped() {
            skipped += 1;
            continue;
        }
        assembler.push(kind);
    }

    let parts = assembler.finish();
    log::debug!(
        "reformatted {} lines: title={:?}, {} metadata, {} skipped, {} parts",
        lines.len(),
        preamble.title,
        preamble.metadata.len(),
        skipped,
        parts.len()
    );

    for part in &parts {
        writer.part(part);
    }

    FormattedNotes {
        markdown: writer.finish(),
        title: preamble.title.map(str::to_owned),
    }
}

/// Reformatter that remembers the title of the last book it saw, for the
/// reflection prompt.
#[derive(Debug, Default, Clone)]
pub struct Reformatter {
    book_name: Option<String>,
}

impl Reformatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Same output as [`reformat`]. The cached book name is only replaced
    /// when this input has a title.
    pub fn reformat(&mut self, raw: &str) -> String {
        let notes = reformat_notes(raw);
        if let Some(title) = notes.title {
            self.book_name = Some(title);
        }
        notes.markdown
    }

    pub fn book_name(&self) -> Option<&str> {
        self.book_name.as_deref()
    }
}

/// Recovers the book name from an already formatted document.
pub fn book_name_from_markdown(markdown: &str) -> Option<String> {
    markdown
        .lines()
        .map(str::trim)
        .find_map(Title::extract)
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = "《示例之书》\n作者：某人  10个笔记\n第一章\n◆ 这是一句高亮\n原文：这是原文内容\n这是我的想法";

    #[test]
    fn end_to_end_sample() {
        assert_eq!(
            reformat(SAMPLE),
            "# 《示例之书》\n\n作者：某人  10个笔记\n\n## 第一章\n\n```txt\n◆ 这是一句高亮\n```\n\n> 这是原文内容\n\n这是我的想法\n"
        );
    }

    #[test]
    fn marked_first_line_after_preamble_is_a_highlight() {
        let raw = "《示例之书》\n作者：某人  10个笔记\n◆ 第一章\n◆ 这是一句高亮\n原文：这是原文内容\n这是我的想法";
        let out = reformat(raw);

        assert!(out.contains("```txt\n◆ 第一章\n```"));
        assert!(out.contains("```txt\n◆ 这是一句高亮\n```"));
        assert!(out.ends_with("> 这是原文内容\n\n这是我的想法\n"));
    }

    #[test]
    fn empty_and_whitespace_input() {
        assert_eq!(reformat(""), "");
        assert_eq!(reformat("   \n\t\n"), "");
    }

    #[test]
    fn single_character_is_a_heading() {
        assert_eq!(reformat("x"), "## x\n");
    }

    #[test]
    fn crlf_line_endings() {
        let raw = SAMPLE.replace('\n', "\r\n");
        assert_eq!(reformat(&raw), reformat(SAMPLE));
    }

    #[test]
    fn missing_title_keeps_content() {
        let out = reformat("这是一条没有原文的想法\n原文：这是原文内容");
        assert_eq!(out, "> 这是原文内容\n\n这是一条没有原文的想法\n");
    }

    #[test]
    fn pairing_is_order_independent() {
        let quote_first = reformat("《书》\n文前\n原文：这是原文内容\n这是我的想法");
        let thought_first = reformat("《书》\n文前\n这是我的想法\n原文：这是原文内容");

        let expected = "# 《书》\n\n## 文前\n\n> 这是原文内容\n\n这是我的想法\n";
        assert_eq!(quote_first, expected);
        assert_eq!(thought_first, expected);
    }

    #[test]
    fn noise_lines_are_dropped() {
        let raw = "《书》\n◆ 高亮的一句话\n◆ 2024/01/01发表想法\n\n这是我的想法\n\n原文：这是原文内容\n\n-- 来自微信读书";
        let out = reformat(raw);

        assert!(!out.contains("发表想法"));
        assert!(!out.contains("来自微信读书"));
        assert!(out.ends_with("> 这是原文内容\n\n这是我的想法\n\n```txt\n◆ 高亮的一句话\n```\n"));
    }

    #[test]
    fn thought_first_pair_is_written_before_open_highlight() {
        let out = reformat("《书》\n文前\n◆ 高亮内容一\n这是我对原文的一段想法\n原文：这是原文内容\n◆ 高亮内容二");

        assert_eq!(
            out,
            "# 《书》\n\n## 文前\n\n> 这是原文内容\n\n这是我对原文的一段想法\n\n```txt\n◆ 高亮内容一\n```\n\n```txt\n◆ 高亮内容二\n```\n"
        );
        assert_eq!(reformat(&out), out);
    }

    #[test]
    fn unpaired_thoughts_before_highlight_are_stable() {
        let once = reformat("《书》\n文前\n这是第一条很长的想法\n这是第二条很长的想法\n◆ 高亮内容");

        assert_eq!(once, "# 《书》\n\n## 文前\n\n```txt\n◆ 高亮内容\n```\n");
        assert_eq!(reformat(&once), once);
    }

    #[test]
    fn lone_trailing_thought_after_metadata_is_stable() {
        let once = reformat("《书》\n作者：某人\n原文：\n这是一条没有原文的想法");

        assert_eq!(once, "# 《书》\n\n作者：某人\n\n这是一条没有原文的想法\n");
        assert_eq!(reformat(&once), once);
    }

    #[test]
    fn trimmed_markdown_markers_after_title_are_stable() {
        let once = reformat("《书》\n## \n短");

        assert_eq!(once, "# 《书》\n\n## ##\n\n## 短\n");
        assert_eq!(reformat(&once), once);
    }

    #[test]
    fn trailing_thought_appears_once_unwrapped() {
        let out = reformat("《书》\n◆ 高亮的一句话\n最后这一条想法没有原文");

        assert!(out.ends_with("```\n\n最后这一条想法没有原文\n"));
        assert_eq!(out.matches("最后这一条想法没有原文").count(), 1);
        assert!(!out.contains("> 最后这一条想法没有原文"));
    }

    #[test]
    fn reformatting_output_is_stable() {
        let once = reformat(SAMPLE);
        let twice = reformat(&once);

        assert_eq!(twice, once);
        assert!(!twice.contains("## ## "));
        assert!(!twice.contains("> > "));
    }

    #[test]
    fn reformatter_caches_book_name() {
        let mut reformatter = Reformatter::new();
        assert_eq!(reformatter.book_name(), None);

        reformatter.reformat(SAMPLE);
        assert_eq!(reformatter.book_name(), Some("《示例之书》"));

        reformatter.reformat("没有标题的一段很长的文字");
        assert_eq!(reformatter.book_name(), Some("《示例之书》"));
    }

    #[test]
    fn book_name_from_formatted_markdown() {
        let formatted = reformat(SAMPLE);
        assert_eq!(
            book_name_from_markdown(&formatted),
            Some("《示例之书》".to_string())
        );
        assert_eq!(book_name_from_markdown("## 第一章"), None);
    }

    #[test]
    fn reformat_notes_reports_title() {
        let notes = reformat_notes(SAMPLE);
        assert_eq!(notes.title.as_deref(), Some("《示例之书》"));
        assert_eq!(notes.markdown, reformat(SAMPLE));
    }
}
