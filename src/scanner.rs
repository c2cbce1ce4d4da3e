//! Backward lexical scanner.
//!
//! Position algebra over the raw document text.  There is no tokenizer and
//! no parse tree: every primitive walks backward from a cursor one character
//! at a time, wrapping to the end of the previous line at column zero, and
//! stops at the start of the document.
//!
//! Positions follow the LSP convention of pointing *between* characters.
//! A match is reported as the position just after the matching character,
//! so `(line, col)` means "the character at `col - 1` matched".  Because a
//! real match always has `col >= 1`, `(0, 0)` doubles as the "not found"
//! sentinel ([`NOT_FOUND`]).
//!
//! Columns count Unicode scalar values, not UTF-16 code units; markup is
//! overwhelmingly ASCII so the two agree in practice.

use tower_lsp::lsp_types::{Position, Range};

/// Returned by the match primitives when the start of the document is
/// reached without a match.
pub const NOT_FOUND: Position = Position {
    line: 0,
    character: 0,
};

/// `\w`: letters, digits and underscore.
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// The word run ending at a position, and where it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrecedingWord {
    pub word: String,
    pub start: Position,
}

/// A document split into lines of characters, ready for backward scans.
///
/// Built once per request from the current text; all scans are read-only.
#[derive(Debug, Clone)]
pub struct TextScanner {
    lines: Vec<Vec<char>>,
}

impl TextScanner {
    pub fn new(text: &str) -> Self {
        let lines = text
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line).chars().collect())
            .collect();
        Self { lines }
    }

    pub fn line_count(&self) -> u32 {
        self.lines.len() as u32
    }

    /// Number of characters on `line`, or 0 past the end of the document.
    pub fn line_len(&self, line: u32) -> u32 {
        self.lines
            .get(line as usize)
            .map(|l| l.len() as u32)
            .unwrap_or(0)
    }

    /// Pull a position back inside the document.
    fn clamp(&self, pos: Position) -> Position {
        let last = self.line_count().saturating_sub(1);
        if pos.line > last {
            return Position::new(last, self.line_len(last));
        }
        Position::new(pos.line, pos.character.min(self.line_len(pos.line)))
    }

    fn char_at(&self, line: u32, col: u32) -> Option<char> {
        self.lines
            .get(line as usize)
            .and_then(|l| l.get(col as usize))
            .copied()
    }

    /// The character immediately before `pos` on the same line.
    pub fn char_before(&self, pos: Position) -> Option<char> {
        let pos = self.clamp(pos);
        if pos.character == 0 {
            return None;
        }
        self.char_at(pos.line, pos.character - 1)
    }

    /// Walk backward from `pos`, calling `visit(ch, position_after_ch)` for
    /// every character until it returns `true`.
    fn scan_backward(
        &self,
        pos: Position,
        mut visit: impl FnMut(char, Position) -> bool,
    ) -> Position {
        let pos = self.clamp(pos);
        for line in (0..=pos.line).rev() {
            let start = if line == pos.line {
                pos.character
            } else {
                self.line_len(line)
            };
            let chars = &self.lines[line as usize];
            for col in (1..=start).rev() {
                let after = Position::new(line, col);
                if visit(chars[col as usize - 1], after) {
                    return after;
                }
            }
        }
        NOT_FOUND
    }

    /// Nearest position before `pos` whose preceding character satisfies
    /// `pattern`.
    pub fn first_preceding_match(&self, pos: Position, pattern: impl Fn(char) -> bool) -> Position {
        self.scan_backward(pos, |c, _| pattern(c))
    }

    /// Like [`first_preceding_match`](Self::first_preceding_match), but
    /// characters inside `{ … }` pairs that close before `pos` are skipped.
    ///
    /// A `}` opens a nested region (scanning backward), the matching `{`
    /// closes it again; the depth never drops below zero.  The pattern is
    /// tested before the depth is updated, so searching for `{` finds the
    /// brace that structurally encloses `pos`.
    pub fn first_char_outside_brace_pairs(
        &self,
        pos: Position,
        pattern: impl Fn(char) -> bool,
    ) -> Position {
        let mut depth: u32 = 0;
        self.scan_backward(pos, |c, _| {
            if depth == 0 && pattern(c) {
                return true;
            }
            match c {
                '}' => depth += 1,
                '{' => depth = depth.saturating_sub(1),
                _ => {}
            }
            false
        })
    }

    /// The maximal run of word characters ending at `pos`.  Never crosses a
    /// line boundary; the word is empty if `pos` does not follow a word
    /// character.
    pub fn preceding_word(&self, pos: Position) -> PrecedingWord {
        let pos = self.clamp(pos);
        let chars = match self.lines.get(pos.line as usize) {
            Some(chars) => chars,
            None => {
                return PrecedingWord {
                    word: String::new(),
                    start: pos,
                };
            }
        };

        let end = pos.character as usize;
        let mut start = end;
        while start > 0 && is_word_char(chars[start - 1]) {
            start -= 1;
        }

        PrecedingWord {
            word: chars[start..end].iter().collect(),
            start: Position::new(pos.line, start as u32),
        }
    }

    /// The nearest non-whitespace character before `pos` and the position
    /// *of* that character (not after it).
    pub fn preceding_non_space(&self, pos: Position) -> Option<(char, Position)> {
        let after = self.first_preceding_match(pos, |c| !c.is_whitespace());
        if after == NOT_FOUND {
            return None;
        }
        let at = Position::new(after.line, after.character - 1);
        self.char_at(at.line, at.character).map(|c| (c, at))
    }

    /// The word under the cursor, extended in both directions, with its range.
    pub fn word_at(&self, pos: Position) -> Option<(String, Range)> {
        let pos = self.clamp(pos);
        let chars = self.lines.get(pos.line as usize)?;

        let mut start = pos.character as usize;
        let mut end = start;
        while start > 0 && is_word_char(chars[start - 1]) {
            start -= 1;
        }
        while end < chars.len() && is_word_char(chars[end]) {
            end += 1;
        }

        if start == end {
            return None;
        }
        Some((
            chars[start..end].iter().collect(),
            Range::new(
                Position::new(pos.line, start as u32),
                Position::new(pos.line, end as u32),
            ),
        ))
    }
}

/// Convert a byte offset (as reported by regex matches) into a position
/// using the same line and column rules as [`TextScanner`].
pub fn offset_to_position(text: &str, offset: usize) -> Position {
    let offset = offset.min(text.len());
    let before = &text[..offset];
    let line = before.matches('\n').count() as u32;
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let character = before[line_start..].chars().filter(|&c| c != '\r').count() as u32;
    Position::new(line, character)
}
