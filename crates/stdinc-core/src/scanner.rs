//! Lexical classifier — decides, for every byte of a file, whether it is code,
//! string literal, line comment, or block comment.
//!
//! The classifier is a single forward pass over a [`SourceText`] buffer with an
//! explicit [`LexState`] value. It yields `(offset, state)` for each byte it
//! classifies.
//!
//! ## Rules
//!
//! - In [`LexState::Code`], checked in this order: `/*` enters a block comment,
//!   `//` enters a line comment, `"` enters a string.
//! - In [`LexState::String`], a backslash escapes the next byte and `"` ends the
//!   string.
//! - In [`LexState::BlockComment`], `*/` ends the comment.
//! - Strings and line comments end at the line break. Block comments carry
//!   over to the next line.
//! - `#include` seen in code drops the rest of its line: those bytes are not
//!   classified (and not yielded) at all.
//!
//! Known limitation: a string literal is never continued onto the next line,
//! so multi-line raw strings (`R"(...)"`) are misclassified after their first
//! line.

use crate::source::SourceText;

/// Directive whose line tail is dropped from scanning.
pub const INCLUDE_DIRECTIVE: &str = "#include";

/// Classification of one byte of source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LexState {
    Code,
    String,
    LineComment,
    BlockComment,
}

/// Iterator over `(byte offset, state)` pairs for one file.
pub struct Classifier<'a> {
    bytes: &'a [u8],
    pos: usize,
    state: LexState,
    /// State for the second byte of a two-byte token (`/*`, `*/`, `\x`).
    carry: Option<LexState>,
}

impl<'a> Classifier<'a> {
    /// Classify a whole file.
    pub fn new(source: &'a SourceText) -> Self {
        Self::from_text(source.as_str())
    }

    /// Classify raw text. Line breaks must already be `\n`.
    pub fn from_text(text: &'a str) -> Self {
        Self {
            bytes: text.as_bytes(),
            pos: 0,
            state: LexState::Code,
            carry: None,
        }
    }

    /// The state the next unclassified byte would start in.
    pub fn state(&self) -> LexState {
        self.state
    }

    fn at(&self, pattern: &[u8]) -> bool {
        self.bytes[self.pos..].starts_with(pattern)
    }

    /// Whether the byte after `pos` exists and lies on the same line.
    fn next_on_line(&self) -> bool {
        self.bytes.get(self.pos + 1).is_some_and(|&b| b != b'\n')
    }

    fn skip_to_line_end(&mut self) {
        self.pos = self.bytes[self.pos..]
            .iter()
            .position(|&b| b == b'\n')
            .map_or(self.bytes.len(), |n| self.pos + n);
    }

    /// Emit the byte at `pos` as `state` and advance.
    fn emit(&mut self, state: LexState) -> (usize, LexState) {
        let at = self.pos;
        self.pos += 1;
        (at, state)
    }
}

impl Iterator for Classifier<'_> {
    type Item = (usize, LexState);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(state) = self.carry.take() {
            return Some(self.emit(state));
        }

        loop {
            let byte = *self.bytes.get(self.pos)?;

            if byte == b'\n' {
                self.pos += 1;
                if self.state != LexState::BlockComment {
                    self.state = LexState::Code;
                }
                continue;
            }

            return Some(match self.state {
                LexState::Code => {
                    if self.at(INCLUDE_DIRECTIVE.as_bytes()) {
                        self.skip_to_line_end();
                        continue;
                    }
                    if self.at(b"/*") {
                        self.state = LexState::BlockComment;
                        self.carry = Some(LexState::BlockComment);
                        self.emit(LexState::BlockComment)
                    } else if self.at(b"//") {
                        self.state = LexState::LineComment;
                        self.emit(LexState::LineComment)
                    } else if byte == b'"' {
                        self.state = LexState::String;
                        self.emit(LexState::String)
                    } else {
                        self.emit(LexState::Code)
                    }
                }
                LexState::String => {
                    if byte == b'\\' {
                        if self.next_on_line() {
                            self.carry = Some(LexState::String);
                        }
                    } else if byte == b'"' {
                        self.state = LexState::Code;
                    }
                    self.emit(LexState::String)
                }
                LexState::BlockComment => {
                    if self.at(b"*/") {
                        self.state = LexState::Code;
                        self.carry = Some(LexState::BlockComment);
                    }
                    self.emit(LexState::BlockComment)
                }
                LexState::LineComment => self.emit(LexState::LineComment),
            });
        }
    }
}

/// Collapse a file into runs of equal state: `(state, start..end)`.
///
/// Bytes dropped after `#include` and line breaks split runs.
#[cfg(test)]
fn runs(source: &SourceText) -> Vec<(LexState, std::ops::Range<usize>)> {
    let mut out: Vec<(LexState, std::ops::Range<usize>)> = Vec::new();
    for (offset, state) in Classifier::new(source) {
        match out.last_mut() {
            Some((last, range)) if *last == state && range.end == offset => range.end += 1,
            _ => out.push((state, offset..offset + 1)),
        }
    }
    out
}
