use super::markers::{Fence, Heading, Highlight, Noise, OriginalQuote};

/// A trimmed input line together with its physical neighbours.
///
/// Neighbours are the adjacent input lines, blank lines included, and the
/// empty string past either edge of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRef<'a> {
    pub index: usize,
    pub text: &'a str,
    pub prev: &'a str,
    pub next: &'a str,
}

/// Walks `lines` from `start`, attaching each line's neighbours.
///
/// Lines before `start` still serve as neighbours, so the first content line
/// after the preamble sees the last preamble line as its predecessor.
pub fn lines_with_neighbours<'a>(
    lines: &[&'a str],
    start: usize,
) -> impl Iterator<Item = LineRef<'a>> {
    (start..lines.len()).map(move |index| LineRef {
        index,
        text: lines[index],
        prev: index
            .checked_sub(1)
            .and_then(|i| lines.get(i))
            .copied()
            .unwrap_or(""),
        next: lines.get(index + 1).copied().unwrap_or(""),
    })
}

/// Semantic kind of a single line. Text payloads borrow from the input and
/// have any marker prefix already stripped, except highlights which keep
/// their glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    Blank,
    TimestampOrNoise,
    /// Fence line left over from an earlier run; the renderer re-creates it.
    FenceDelimiter,
    ChapterHeading(&'a str),
    Highlight(&'a str),
    OriginalQuote(&'a str),
    ReaderThought(&'a str),
}

impl LineKind<'_> {
    /// Whether the line is dropped before reaching the assembler.
    pub fn is_skipped(&self) -> bool {
        matches!(
            self,
            LineKind::Blank | LineKind::TimestampOrNoise | LineKind::FenceDelimiter
        )
    }
}

/// Classifies lines of a WeRead export.
pub struct NoteLineClassifier;

impl NoteLineClassifier {
    /// Classifies a line into a [`LineKind`] from the line and its neighbours
    /// alone.
    pub fn classify<'a>(&self, lr: &LineRef<'a>) -> LineKind<'a> {
        let text = lr.text;

        if text.is_empty() {
            return LineKind::Blank;
        }
        if Noise::is_noise(text) {
            return LineKind::TimestampOrNoise;
        }
        if Fence::is_delimiter(text) {
            return LineKind::FenceDelimiter;
        }
        if let Some(heading) = Heading::strip_rendered(text) {
            return LineKind::ChapterHeading(heading);
        }
        if is_chapter_heading(text, lr.prev, lr.next) {
            return LineKind::ChapterHeading(text);
        }
        if Highlight::is_highlight(text) {
            return LineKind::Highlight(text);
        }
        if let Some(quote) = OriginalQuote::strip(text) {
            return LineKind::OriginalQuote(quote);
        }
        LineKind::ReaderThought(text)
    }
}

/// Decides whether `current` is a chapter heading.
///
/// Headings carry no marker in the export. A line is taken as one when it is
/// sandwiched between the notes-count line, a highlight or an original quote
/// above and a highlight below, or when it is short enough to be a bare
/// section name. Either condition is sufficient.
pub fn is_chapter_heading(current: &str, prev: &str, next: &str) -> bool {
    if current.is_empty()
        || Highlight::is_highlight(current)
        || OriginalQuote::is_original(current)
        || OriginalQuote::is_rendered(current)
    {
        return false;
    }

    is_sandwiched_heading(prev, next) || current.chars().count() <= Heading::MAX_BARE_CHARS
}

/// The neighbour half of [`is_chapter_heading`]: a highlight below, and the
/// notes-count line, a highlight or an original quote above.
pub fn is_sandwiched_heading(prev: &str, next: &str) -> bool {
    if prev.is_empty() || next.is_empty() || !Highlight::is_highlight(next) {
        return false;
    }
    prev.contains(Heading::NOTES_COUNT_WORD)
        || Highlight::is_highlight(prev)
        || OriginalQuote::is_original(prev)
}
