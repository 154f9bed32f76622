//! Shared utilities for channel implementations.

/// Split a long message into chunks of at most `max_len` bytes.
///
/// Chunks end on UTF-8 char boundaries, after the last newline that fits
/// when there is one. A char wider than `max_len` becomes its own chunk.
pub fn split_message(text: &str, max_len: usize) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut rest = text;

    while rest.len() > max_len {
        let (head, tail) = rest.split_at(chunk_end(rest, max_len));
        chunks.push(head);
        rest = tail;
    }
    if !rest.is_empty() || chunks.is_empty() {
        chunks.push(rest);
    }

    chunks
}

/// Byte length of the next chunk of `rest`.
fn chunk_end(rest: &str, max_len: usize) -> usize {
    let mut fits = 0;
    let mut after_newline = None;

    for (i, c) in rest.char_indices() {
        let end = i + c.len_utf8();
        if end > max_len {
            break;
        }
        fits = end;
        if c == '\n' {
            after_newline = Some(end);
        }
    }

    match after_newline {
        Some(end) => end,
        None if fits > 0 => fits,
        None => rest.chars().next().map_or(rest.len(), char::len_utf8),
    }
}
