use super::classify::LineKind;

/// One unit of assembled output, in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotePart<'a> {
    Heading(&'a str),
    Highlight(&'a str),
    Quote(&'a str),
    Thought(&'a str),
}

/// The note being accumulated between flush points.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Note<'a> {
    pub highlight: Option<&'a str>,
    pub thought: Option<&'a str>,
}

impl Note<'_> {
    pub fn has_content(&self) -> bool {
        self.highlight.is_some() || self.thought.is_some()
    }
}

/// Groups classified lines into notes.
///
/// Quotes and thoughts may arrive in either order, so each has a single
/// pending slot that waits for its counterpart. A quote slot is emptied by
/// pairing or by a flush. A thought slot is emptied by pairing, replaced by
/// the next unpaired thought, and dropped by a highlight or heading.
#[derive(Debug, Default)]
pub struct NoteAssembler<'a> {
    note: Note<'a>,
    pending_original: Option<&'a str>,
    pending_thought: Option<&'a str>,
    out: Vec<NotePart<'a>>,
}

impl<'a> NoteAssembler<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: LineKind<'a>) {
        match kind {
            LineKind::Blank | LineKind::TimestampOrNoise | LineKind::FenceDelimiter => {}
            LineKind::ChapterHeading(heading) => {
                self.flush();
                // pending_original is not cleared here; flush has consumed it.
                self.pending_thought = None;
                self.out.push(NotePart::Heading(heading));
            }
            LineKind::Highlight(highlight) => {
                self.flush();
                self.pending_thought = None;
                self.note.highlight = Some(highlight);
            }
            LineKind::OriginalQuote(quote) => self.push_original(quote),
            LineKind::ReaderThought(thought) => self.push_thought(thought),
        }
    }

    pub fn finish(mut self) -> Vec<NotePart<'a>> {
        // EOF flush
        self.flush();
        if let Some(thought) = self.pending_thought.take() {
            self.out.push(NotePart::Thought(thought));
        }
        self.out
    }

    fn push_original(&mut self, quote: &'a str) {
        // A thought that came first is closed by its quote right away. The
        // current note stays open until the next flush. An empty quote closes
        // nothing.
        if !quote.is_empty()
            && let Some(thought) = self.pending_thought.take()
        {
            self.out.push(NotePart::Quote(quote));
            self.out.push(NotePart::Thought(thought));
            return;
        }

        if self.note.has_content() || self.pending_original.is_some() {
            self.flush();
        }
        self.pending_original = (!quote.is_empty()).then_some(quote);
    }

    fn push_thought(&mut self, thought: &'a str) {
        if let Some(quote) = self.pending_original.take() {
            self.out.push(NotePart::Quote(quote));
            self.out.push(NotePart::Thought(thought));
            return;
        }

        if self.note.thought.is_some() {
            self.flush();
        }
        self.pending_thought = Some(thought);
    }

    /// Emits the current note, then resets it. No-op when there is nothing
    /// to say.
    fn flush(&mut self) {
        let note = std::mem::take(&mut self.note);

        if let Some(highlight) = note.highlight {
            self.out.push(NotePart::Highlight(highlight));
        }
        if let Some(quote) = self.pending_original.take() {
            self.out.push(NotePart::Quote(quote));
            if let Some(thought) = note.thought {
                self.out.push(NotePart::Thought(thought));
            }
        } else if let Some(thought) = note.thought {
            self.out.push(NotePart::Thought(thought));
        }
    }
}
