use super::assembler::NotePart;
use super::markers::{Fence, Heading, OriginalQuote, Title};

/// Append-only list of Markdown lines. Every block is followed by one blank
/// separator line.
#[derive(Debug, Default)]
pub struct MarkdownWriter {
    lines: Vec<String>,
}

impl MarkdownWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(&mut self, title: &str) {
        self.block([format!("{}{title}", Title::RENDERED_PREFIX)]);
    }

    /// Author and notes-count lines, joined into one paragraph.
    pub fn metadata(&mut self, lines: &[&str]) {
        if lines.is_empty() {
            return;
        }
        self.block([lines.join(" ")]);
    }

    pub fn part(&mut self, part: &NotePart<'_>) {
        match part {
            NotePart::Heading(text) => {
                self.block([format!("{}{text}", Heading::RENDERED_PREFIX)]);
            }
            NotePart::Highlight(text) => self.block([
                Fence::OPEN.to_string(),
                (*text).to_string(),
                Fence::DELIMITER.to_string(),
            ]),
            NotePart::Quote(text) => {
                self.block([format!("{}{text}", OriginalQuote::RENDERED_PREFIX)]);
            }
            NotePart::Thought(text) => self.block([(*text).to_string()]),
        }
    }

    pub fn finish(self) -> String {
        self.lines.join("\n")
    }

    fn block<const N: usize>(&mut self, lines: [String; N]) {
        self.lines.extend(lines);
        self.lines.push(String::new());
    }
}
