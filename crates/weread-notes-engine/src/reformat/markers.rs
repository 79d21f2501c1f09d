//! Literal markers of the WeRead clipboard export.
//!
//! Every piece of syntax knowledge about the export (and about the Markdown
//! shapes this crate writes back out) lives here, so the classifier and the
//! preamble scanner never spell out a literal themselves.

/// Highlighted excerpt lines start with a fixed glyph.
pub struct Highlight;

impl Highlight {
    pub const MARKER: &'static str = "◆";

    pub fn is_highlight(line: &str) -> bool {
        line.starts_with(Self::MARKER)
    }
}

/// Quoted original passages the reader commented on.
pub struct OriginalQuote;

impl OriginalQuote {
    /// Prefix used by the export. Three characters, stripped before storage.
    pub const PREFIX: &'static str = "原文：";
    /// Prefix of the blockquote lines this crate renders.
    pub const RENDERED_PREFIX: &'static str = "> ";

    pub fn is_original(line: &str) -> bool {
        line.starts_with(Self::PREFIX)
    }

    pub fn is_rendered(line: &str) -> bool {
        line.starts_with(Self::RENDERED_PREFIX)
    }

    /// Returns the quoted text when `line` is an export quote or a rendered
    /// blockquote.
    pub fn strip(line: &str) -> Option<&str> {
        line.strip_prefix(Self::PREFIX)
            .or_else(|| line.strip_prefix(Self::RENDERED_PREFIX))
    }
}

/// Chapter headings as rendered by this crate.
pub struct Heading;

impl Heading {
    pub const RENDERED_PREFIX: &'static str = "## ";
    /// The "N个笔记" notes-count word found on the author line.
    pub const NOTES_COUNT_WORD: &'static str = "笔记";
    /// Headings are at most this many characters when no neighbour gives
    /// them away ("文前", "自序", "后记" ...).
    pub const MAX_BARE_CHARS: usize = 5;

    pub fn strip_rendered(line: &str) -> Option<&str> {
        line.strip_prefix(Self::RENDERED_PREFIX)
    }
}

/// Fenced block wrapping a highlight in rendered output.
pub struct Fence;

impl Fence {
    pub const DELIMITER: &'static str = "```";
    pub const OPEN: &'static str = "```txt";

    pub fn is_delimiter(line: &str) -> bool {
        line.starts_with(Self::DELIMITER)
    }
}

/// Lines carrying no note content: the "thought published at" timestamp and
/// the app signature appended to every export.
pub struct Noise;

impl Noise {
    pub const PHRASES: [&'static str; 2] = ["发表想法", "-- 来自微信读书"];

    pub fn is_noise(line: &str) -> bool {
        Self::PHRASES.iter().any(|phrase| line.contains(phrase))
    }
}

/// Book title line, `《书名》`.
pub struct Title;

impl Title {
    pub const OPEN: char = '《';
    pub const CLOSE: char = '》';
    pub const RENDERED_PREFIX: &'static str = "# ";

    /// Returns the bracketed title (brackets included) when `line` is a title
    /// line, either as exported or as previously rendered.
    pub fn extract(line: &str) -> Option<&str> {
        let candidate = line.strip_prefix(Self::RENDERED_PREFIX).unwrap_or(line);
        (candidate.starts_with(Self::OPEN) && candidate.ends_with(Self::CLOSE)).then_some(candidate)
    }

    pub fn is_rendered(line: &str) -> bool {
        line.starts_with(Self::RENDERED_PREFIX) && Self::extract(line).is_some()
    }
}

/// Lines that end the author/notes-count preamble.
pub struct ContentStart;

impl ContentStart {
    /// "Front matter" section marker of the export.
    pub const FRONT_MATTER: &'static str = "文前";
    /// Leading characters of Markdown headings and blockquotes. Metadata never
    /// starts with one, or the joined paragraph would read back as a block.
    pub const MARKDOWN_BLOCK_MARKERS: [char; 2] = ['#', '>'];

    pub fn matches(line: &str) -> bool {
        line.starts_with(Self::FRONT_MATTER)
            || line.starts_with(Self::MARKDOWN_BLOCK_MARKERS)
            || Highlight::is_highlight(line)
            || OriginalQuote::is_original(line)
            || Fence::is_delimiter(line)
    }
}
