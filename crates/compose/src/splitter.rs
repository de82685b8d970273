//! Thread splitter.
//!
//! Cuts text into posts of at most `limit` characters, preferring a line
//! break, then a space, and hard-cutting only when neither leaves a
//! reasonably sized post. Lengths count Unicode scalar values, not bytes.

/// A cut earlier than this many characters is rejected in favour of the
/// next strategy.
pub const MIN_CHUNK_CHARS: usize = 120;

/// Split `text` into posts labelled `i/N\n`.
///
/// Empty (or whitespace-only) input produces no posts.
pub fn split(text: &str, limit: usize) -> Vec<String> {
    let limit = limit.max(1);
    let mut chunks: Vec<&str> = Vec::new();
    let mut rest = text.trim();

    while rest.chars().count() > limit {
        let cut = cut_point(rest, limit);
        let chunk = rest[..cut].trim();
        if !chunk.is_empty() {
            chunks.push(chunk);
        }
        rest = rest[cut..].trim();
    }
    if !rest.is_empty() {
        chunks.push(rest);
    }

    let total = chunks.len();
    chunks
        .into_iter()
        .enumerate()
        .map(|(i, chunk)| format!("{}/{}\n{}", i + 1, total, chunk))
        .collect()
}

/// Byte offset to cut at. `text` must be longer than `limit` characters.
fn cut_point(text: &str, limit: usize) -> usize {
    let mut newline = None;
    let mut space = None;
    let mut hard = text.len();

    for (i, (byte, ch)) in text.char_indices().enumerate().take(limit + 1) {
        match ch {
            '\n' => newline = Some((i, byte)),
            ' ' => space = Some((i, byte)),
            _ => {}
        }
        if i == limit {
            hard = byte;
        }
    }

    [newline, space]
        .into_iter()
        .flatten()
        .find(|(i, _)| *i >= MIN_CHUNK_CHARS)
        .map_or(hard, |(_, byte)| byte)
}
