use super::classify::is_sandwiched_heading;
use super::markers::{ContentStart, Title};

/// Title and author/notes-count lines at the head of an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preamble<'a> {
    /// Bracketed book title, brackets included.
    pub title: Option<&'a str>,
    pub metadata: Vec<&'a str>,
    /// Index of the first line that belongs to the note body.
    pub body_start: usize,
}

impl<'a> Preamble<'a> {
    /// Scans trimmed `lines` for the title and the metadata that follows it.
    ///
    /// Everything up to and including the first title line is consumed. The
    /// metadata runs until the first content marker or the first line shaped
    /// like a chapter heading by its neighbours, skipping blank lines. A
    /// rendered `# 《title》` is followed by at most one metadata line, the
    /// paragraph an earlier run wrote.
    /// Without a title there is no preamble and the body starts at line 0.
    pub fn extract(lines: &[&'a str]) -> Self {
        let Some((title_index, title)) = lines
            .iter()
            .enumerate()
            .find_map(|(i, &line)| Title::extract(line).map(|title| (i, title)))
        else {
            return Self {
                title: None,
                metadata: Vec::new(),
                body_start: 0,
            };
        };

        let max_metadata = if Title::is_rendered(lines[title_index]) {
            1
        } else {
            usize::MAX
        };
        let mut metadata = Vec::new();
        let mut body_start = title_index + 1;
        while let Some(&line) = lines.get(body_start) {
            if !line.is_empty() {
                if metadata.len() == max_metadata {
                    break;
                }
                let prev = lines[body_start - 1];
                let next = lines.get(body_start + 1).copied().unwrap_or("");
                if ContentStart::matches(line) || is_sandwiched_heading(prev, next) {
                    break;
                }
                metadata.push(line);
            }
            body_start += 1;
        }

        Self {
            title: Some(title),
            metadata,
            body_start,
        }
    }
}
