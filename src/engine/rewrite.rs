#![forbid(unsafe_code)]

//! Text rewriting primitives used by `TextConformanceEngine::transform`

use crate::rules::Transformation;
use crate::rules::builtin::VARIATION_SELECTOR;

/// Apply position-indexed edits to `text`
///
/// Edits are sorted by start offset; an edit overlapping an earlier one is
/// dropped. The survivors are applied right-to-left so that replacing one span
/// never shifts the offsets of a span still waiting to be replaced.
pub fn apply_edits(text: &str, mut edits: Vec<Transformation>) -> String {
    edits.sort_by_key(|e| e.start);

    let mut accepted: Vec<Transformation> = Vec::with_capacity(edits.len());
    for edit in edits {
        if accepted.last().is_some_and(|prev| edit.start < prev.end) {
            continue;
        }
        accepted.push(edit);
    }

    let mut out = text.to_string();
    for edit in accepted.iter().rev() {
        out.replace_range(edit.start..edit.end, &edit.replacement);
    }
    out
}

/// Split text into sentences, each keeping its terminator run and leading whitespace
///
/// A trailing fragment without terminator counts as a sentence.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if !is_terminator(c) {
            continue;
        }
        let mut end = i + c.len_utf8();
        while let Some(&(j, d)) = chars.peek() {
            if !is_terminator(d) {
                break;
            }
            end = j + d.len_utf8();
            chars.next();
        }
        sentences.push(&text[start..end]);
        start = end;
    }

    if start < text.len() {
        sentences.push(&text[start..]);
    }
    sentences
}

fn is_terminator(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

/// Drop every sentence for which `is_prohibited` returns true
pub fn remove_sentences(text: &str, is_prohibited: impl Fn(&str) -> bool) -> String {
    let mut kept = String::with_capacity(text.len());
    let mut removed_any = false;

    for sentence in split_sentences(text) {
        if is_prohibited(sentence) {
            removed_any = true;
        } else {
            kept.push_str(sentence);
        }
    }

    if removed_any {
        kept.trim_start().to_string()
    } else {
        kept
    }
}

/// Remove prohibited symbols, together with a variation selector trailing one
pub fn strip_symbols(text: &str, is_prohibited: impl Fn(char) -> bool) -> String {
    let mut out = String::with_capacity(text.len());
    let mut after_symbol = false;

    for c in text.chars() {
        if is_prohibited(c) {
            after_symbol = true;
            continue;
        }
        if after_symbol && c == VARIATION_SELECTOR {
            continue;
        }
        after_symbol = false;
        out.push(c);
    }
    out
}

/// Append `suffix` on its own trailing line unless the trimmed text already ends with it
pub fn ensure_suffix(text: &str, suffix: &str) -> String {
    let body = text.trim_end();
    if body.ends_with(suffix) {
        return text.to_string();
    }
    if body.is_empty() {
        return suffix.to_string();
    }
    format!("{}\n{}", body, suffix)
}
