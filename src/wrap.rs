//! Word wrapping of text to a fixed number of terminal columns.
//!
//! Lines are broken at whitespace where possible. Whitespace following a word stays
//! on the same line as the word, so concatenating the produced fragments gives back
//! the original line. Words wider than the whole line are broken at grapheme boundaries.

// third-party imports
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

#[cfg(test)]
mod tests;

// ---

/// Splits a single line into fragments that fit into `width` columns.
///
/// The last fragment keeps the line terminator of `line`, if any.
/// Other fragments have no terminator.
/// An empty string produces no fragments, a bare line terminator produces one.
pub fn wrap(line: &str, width: usize) -> Vec<&str> {
    let width = width.max(1);
    let body = line.trim_end_matches(['\n', '\r']);
    if body.is_empty() {
        return if line.is_empty() { Vec::new() } else { vec![line] };
    }

    let mut fragments = Vec::new();
    let mut start = 0;
    let mut used = 0;

    for (offset, token) in tokens(body) {
        let visible = token.trim_end().width();
        if used > 0 && used + visible > width {
            fragments.push(&body[start..offset]);
            start = offset;
            used = 0;
        }

        if visible <= width {
            used += token.width();
            continue;
        }

        // hard break of a token wider than the line
        for (i, grapheme) in token.grapheme_indices(true) {
            let w = grapheme.width();
            if !is_blank(grapheme) && used > 0 && used + w > width {
                fragments.push(&body[start..offset + i]);
                start = offset + i;
                used = 0;
            }
            used += w;
        }
    }

    fragments.push(&line[start..]);
    fragments
}

/// Wraps a line and terminates every fragment produced by wrapping with a line feed.
///
/// The last fragment keeps the original terminator of `line`, or has none.
pub fn reflow_line(line: &str, width: usize) -> Vec<String> {
    let fragments = wrap(line, width);
    let last = fragments.len().saturating_sub(1);
    fragments
        .into_iter()
        .enumerate()
        .map(|(i, fragment)| if i < last { format!("{fragment}\n") } else { fragment.to_owned() })
        .collect()
}

/// Wraps multi-line text and returns it as a single string.
pub fn reflow(text: &str, width: usize) -> String {
    text.split_inclusive('\n')
        .flat_map(|line| reflow_line(line, width))
        .collect()
}

/// Returns the number of terminal lines the text occupies when wrapped to `width` columns.
pub fn line_count(text: &str, width: usize) -> usize {
    text.split_inclusive('\n').map(|line| wrap(line, width).len()).sum()
}

// ---

/// Splits text into words, each followed by its trailing whitespace.
/// Leading whitespace belongs to the first word.
fn tokens(text: &str) -> Vec<(usize, &str)> {
    let mut starts = vec![0];
    let mut blank = false;
    let mut word = false;
    for (i, grapheme) in text.grapheme_indices(true) {
        let is_blank = is_blank(grapheme);
        if blank && !is_blank && word {
            starts.push(i);
        }
        word |= !is_blank;
        blank = is_blank;
    }
    starts.push(text.len());

    starts.windows(2).map(|w| (w[0], &text[w[0]..w[1]])).collect()
}

fn is_blank(grapheme: &str) -> bool {
    grapheme.chars().all(char::is_whitespace)
}
