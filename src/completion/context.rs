//! Completion context detection.
//!
//! Decides what kind of completion the cursor asks for by looking at the
//! text immediately before it.  The word currently being typed (possibly
//! empty) is ignored; what matters is what precedes it.

use tower_lsp::lsp_types::Position;

use crate::scanner::{TextScanner, is_word_char};

/// What the text before the cursor asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionContext {
    /// `subject.` or `subject.par`: members of whatever `subject` names.
    MemberAccess { subject: String },
    /// `import ` or `import Qt.Par`: module names.
    Import,
    /// Anything else.
    General,
}

/// Classify the cursor position.
///
/// A dotted path that directly follows `import` is a module path, not a
/// member access, so `import QtQuick.` completes modules.
pub fn detect_context(scanner: &TextScanner, pos: Position) -> CompletionContext {
    let partial = scanner.preceding_word(pos);

    if follows_import_keyword(scanner, partial.start) {
        return CompletionContext::Import;
    }

    if scanner.char_before(partial.start) == Some('.') {
        let dot = Position::new(partial.start.line, partial.start.character - 1);
        return CompletionContext::MemberAccess {
            subject: scanner.preceding_word(dot).word,
        };
    }

    CompletionContext::General
}

/// Whether the (dotted) word ending at `pos` is preceded, on the same line,
/// by the word `import`.
fn follows_import_keyword(scanner: &TextScanner, pos: Position) -> bool {
    let mut start = pos;
    while scanner
        .char_before(start)
        .is_some_and(|c| is_word_char(c) || c == '.')
    {
        start.character -= 1;
    }

    let Some((c, at)) = scanner.preceding_non_space(start) else {
        return false;
    };
    if at.line != pos.line || !is_word_char(c) {
        return false;
    }

    scanner
        .preceding_word(Position::new(at.line, at.character + 1))
        .word
        == "import"
}
