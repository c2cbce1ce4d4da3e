use qmlantom_lsp::scanner::{NOT_FOUND, TextScanner, is_word_char, offset_to_position};
use tower_lsp::lsp_types::{Position, Range};

fn pos(line: u32, character: u32) -> Position {
    Position { line, character }
}

// ─── first_preceding_match ──────────────────────────────────────────────────

#[test]
fn test_first_preceding_match_same_line() {
    let scanner = TextScanner::new("Rectangle {  ");
    // Just after `{`.
    assert_eq!(scanner.first_preceding_match(pos(0, 13), |c| c == '{'), pos(0, 11));
    // Just after the `e` of `Rectangle`.
    assert_eq!(scanner.first_preceding_match(pos(0, 11), is_word_char), pos(0, 9));
}

#[test]
fn test_first_preceding_match_wraps_to_previous_line() {
    let scanner = TextScanner::new("Item\n\n   x");
    assert_eq!(scanner.first_preceding_match(pos(2, 3), is_word_char), pos(0, 4));
}

#[test]
fn test_first_preceding_match_not_found_is_origin() {
    let scanner = TextScanner::new("abc\ndef");
    assert_eq!(scanner.first_preceding_match(pos(1, 3), |c| c == '{'), NOT_FOUND);
}

#[test]
fn test_first_preceding_match_clamps_out_of_range_positions() {
    let scanner = TextScanner::new("ab\ncd");
    assert_eq!(scanner.first_preceding_match(pos(9, 99), is_word_char), pos(1, 2));
    assert_eq!(scanner.first_preceding_match(pos(0, 99), |c| c == 'a'), pos(0, 1));
}

// ─── first_char_outside_brace_pairs ─────────────────────────────────────────

#[test]
fn test_outside_brace_pairs_skips_closed_inner_block() {
    let scanner = TextScanner::new("{ { } X");
    let found = scanner.first_char_outside_brace_pairs(pos(0, 7), |c| c == '{');
    // The outer brace sits at column 0.
    assert_eq!(found, pos(0, 1));
}

#[test]
fn test_outside_brace_pairs_finds_unclosed_inner_block() {
    let scanner = TextScanner::new("{ { X");
    assert_eq!(scanner.first_char_outside_brace_pairs(pos(0, 5), |c| c == '{'), pos(0, 3));
}

#[test]
fn test_outside_brace_pairs_across_lines() {
    let text = concat!(
        "Item {\n",
        "    Rectangle {\n",
        "        color: \"red\"\n",
        "    }\n",
        "    \n",
        "}\n",
    );
    let scanner = TextScanner::new(text);
    assert_eq!(scanner.first_char_outside_brace_pairs(pos(4, 4), |c| c == '{'), pos(0, 6));
    assert_eq!(scanner.first_char_outside_brace_pairs(pos(2, 8), |c| c == '{'), pos(1, 15));
}

#[test]
fn test_outside_brace_pairs_nested_pairs_and_extra_closers() {
    // Two closed pairs are skipped; the outermost brace is reported.
    let scanner = TextScanner::new("{ { { } } X");
    assert_eq!(scanner.first_char_outside_brace_pairs(pos(0, 11), |c| c == '{'), pos(0, 1));
    // An extra `}` keeps the only `{` nested.
    let scanner = TextScanner::new("{ } } X");
    assert_eq!(scanner.first_char_outside_brace_pairs(pos(0, 7), |c| c == '{'), NOT_FOUND);
}

#[test]
fn test_outside_brace_pairs_depth_floors_at_zero() {
    // Unmatched `{` met while searching for something else leave the depth
    // at zero, so the `:` before them is still reported.
    let scanner = TextScanner::new("a: { { X");
    assert_eq!(scanner.first_char_outside_brace_pairs(pos(0, 8), |c| c == ':'), pos(0, 2));
}

#[test]
fn test_outside_brace_pairs_other_patterns() {
    let scanner = TextScanner::new("a: { b: 1 } X");
    assert_eq!(scanner.first_char_outside_brace_pairs(pos(0, 13), |c| c == ':'), pos(0, 2));
}

// ─── preceding_word / preceding_non_space ───────────────────────────────────

#[test]
fn test_preceding_word() {
    let scanner = TextScanner::new("    rect1.co");
    let word = scanner.preceding_word(pos(0, 12));
    assert_eq!(word.word, "co");
    assert_eq!(word.start, pos(0, 10));

    let word = scanner.preceding_word(pos(0, 9));
    assert_eq!(word.word, "rect1");
    assert_eq!(word.start, pos(0, 4));
}

#[test]
fn test_preceding_word_empty_after_non_word() {
    let scanner = TextScanner::new("rect1.");
    let word = scanner.preceding_word(pos(0, 6));
    assert_eq!(word.word, "");
    assert_eq!(word.start, pos(0, 6));
}

#[test]
fn test_preceding_word_stops_at_line_start() {
    let scanner = TextScanner::new("abc\ndef");
    let word = scanner.preceding_word(pos(1, 2));
    assert_eq!(word.word, "de");
    assert_eq!(word.start, pos(1, 0));
    assert_eq!(scanner.preceding_word(pos(1, 0)).word, "");
}

#[test]
fn test_preceding_non_space() {
    let scanner = TextScanner::new("Item {\n   \n   ");
    assert_eq!(scanner.preceding_non_space(pos(2, 3)), Some(('{', pos(0, 5))));
    let scanner = TextScanner::new("   ");
    assert_eq!(scanner.preceding_non_space(pos(0, 3)), None);
}

// ─── word_at / offsets ──────────────────────────────────────────────────────

#[test]
fn test_word_at_extends_both_directions() {
    let scanner = TextScanner::new("    Rectangle {");
    let (word, range) = scanner.word_at(pos(0, 7)).unwrap();
    assert_eq!(word, "Rectangle");
    assert_eq!(range, Range::new(pos(0, 4), pos(0, 13)));
    assert!(scanner.word_at(pos(0, 2)).is_none());
}

#[test]
fn test_crlf_line_endings_are_not_part_of_lines() {
    let scanner = TextScanner::new("Item {\r\n  x\r\n}");
    assert_eq!(scanner.line_len(0), 6);
    assert_eq!(scanner.first_char_outside_brace_pairs(pos(1, 3), |c| c == '{'), pos(0, 6));
}

#[test]
fn test_offset_to_position() {
    let text = "import QtQuick 2.0\nRectangle {\n  id: rect1\n}";
    let offset = text.find("id:").unwrap();
    assert_eq!(offset_to_position(text, offset), pos(2, 2));
    assert_eq!(offset_to_position(text, 0), pos(0, 0));
    assert_eq!(offset_to_position("a\r\nbc", 4), pos(1, 1));
}
