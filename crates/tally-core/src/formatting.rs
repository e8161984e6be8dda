//! Formatting utilities for outbound Discord text.

/// Split `text` into chunks of at most `max_len` bytes, preferring line boundaries.
///
/// Lines longer than `max_len` are cut on char boundaries.
pub fn split_message(text: &str, max_len: usize) -> Vec<String> {
    let max_len = max_len.max(1);
    if text.len() <= max_len {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();

    for line in text.lines() {
        let needed = if current.is_empty() {
            line.len()
        } else {
            current.len() + 1 + line.len()
        };
        if needed <= max_len {
            if !current.is_empty() {
                current.push('\n');
            }
            current.push_str(line);
            continue;
        }

        if !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
        }

        let mut remaining = line;
        while remaining.len() > max_len {
            let cut = floor_char_boundary(remaining, max_len);
            chunks.push(remaining[..cut].to_string());
            remaining = &remaining[cut..];
        }
        current = remaining.to_string();
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

fn floor_char_boundary(s: &str, mut idx: usize) -> usize {
    while idx > 0 && !s.is_char_boundary(idx) {
        idx -= 1;
    }
    if idx == 0 {
        // max_len smaller than the first char; emit that char whole.
        s.chars().next().map(char::len_utf8).unwrap_or(0)
    } else {
        idx
    }
}
