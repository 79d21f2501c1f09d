//! Quotes in a formatted document that a reflection can be asked about.
//!
//! Every top-level blockquote is a target. Its thought is the paragraph that
//! directly follows it, or empty when the next block is anything else.

use pulldown_cmark::{Event, Parser, Tag};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReflectionTarget {
    pub quote: String,
    pub thought: String,
}

#[derive(Debug, Default)]
enum State {
    #[default]
    Scanning,
    Quote(String),
    AfterQuote(String),
    Thought(String, String),
}

struct TargetCollector {
    state: State,
    targets: Vec<ReflectionTarget>,
}

impl TargetCollector {
    fn new() -> Self {
        Self {
            state: State::Scanning,
            targets: Vec::new(),
        }
    }

    /// A new top-level block begins.
    fn start_block(&mut self, tag: &Tag<'_>) {
        self.state = match (std::mem::take(&mut self.state), tag) {
            (State::AfterQuote(quote), Tag::Paragraph) => State::Thought(quote, String::new()),
            (previous, Tag::BlockQuote(_)) => {
                self.settle(previous);
                State::Quote(String::new())
            }
            (previous, _) => {
                self.settle(previous);
                State::Scanning
            }
        };
    }

    /// The current top-level block ended.
    fn end_block(&mut self) {
        self.state = match std::mem::take(&mut self.state) {
            State::Quote(quote) => State::AfterQuote(quote),
            State::Thought(quote, thought) => {
                self.emit(quote, thought);
                State::Scanning
            }
            other => other,
        };
    }

    fn text(&mut self, text: &str) {
        if let State::Quote(buf) | State::Thought(_, buf) = &mut self.state {
            buf.push_str(text);
        }
    }

    fn settle(&mut self, state: State) {
        if let State::AfterQuote(quote) = state {
            self.emit(quote, String::new());
        }
    }

    fn emit(&mut self, quote: String, thought: String) {
        let quote = quote.trim();
        if quote.is_empty() {
            return;
        }
        self.targets.push(ReflectionTarget {
            quote: quote.to_string(),
            thought: thought.trim().to_string(),
        });
    }

    fn finish(mut self) -> Vec<ReflectionTarget> {
        let last = std::mem::take(&mut self.state);
        self.settle(last);
        self.targets
    }
}

/// Lists the reflection targets of a formatted document in order.
pub fn reflection_targets(markdown: &str) -> Vec<ReflectionTarget> {
    let mut collector = TargetCollector::new();
    let mut depth = 0usize;

    for event in Parser::new(markdown) {
        match event {
            Event::Start(tag) => {
                if depth == 0 {
                    collector.start_block(&tag);
                } else if matches!(tag, Tag::Paragraph) {
                    // paragraphs inside one quote are kept on separate lines
                    if let State::Quote(buf) = &mut collector.state {
                        if !buf.is_empty() {
                            buf.push('\n');
                        }
                    }
                }
                depth += 1;
            }
            Event::End(_) => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    collector.end_block();
                }
            }
            Event::Text(text) | Event::Code(text) => collector.text(&text),
            Event::SoftBreak | Event::HardBreak => collector.text("\n"),
            Event::Rule if depth == 0 => {
                let previous = std::mem::take(&mut collector.state);
                collector.settle(previous);
            }
            _ => {}
        }
    }

    let targets = collector.finish();
    log::debug!("found {} reflection targets", targets.len());
    targets
}
