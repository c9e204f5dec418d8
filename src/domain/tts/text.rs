use regex::Regex;
use std::sync::LazyLock;

static SENTENCE_END: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([.!?।]+\s+)").unwrap());

/// Split text into batches that respect sentence boundaries.
/// Each batch is at most `max_batch_size` bytes.
pub fn split_into_batches(text: &str, max_batch_size: usize) -> Vec<String> {
    if text.len() <= max_batch_size {
        return vec![text.to_string()];
    }

    let mut batches = Vec::new();
    let mut current_batch = String::new();
    let mut last_end = 0;

    for mat in SENTENCE_END.find_iter(text) {
        let sentence = &text[last_end..mat.end()];

        if !current_batch.is_empty() && current_batch.len() + sentence.len() > max_batch_size {
            batches.push(current_batch.trim().to_string());
            current_batch = String::new();
        }

        if sentence.len() > max_batch_size {
            batches.extend(split_by_chars(sentence, max_batch_size));
        } else {
            current_batch.push_str(sentence);
        }
        last_end = mat.end();
    }

    // Text after the last sentence boundary
    if last_end < text.len() {
        let remaining = &text[last_end..];

        if !current_batch.is_empty() && current_batch.len() + remaining.len() > max_batch_size {
            batches.push(current_batch.trim().to_string());
            current_batch = String::new();
        }

        if remaining.len() > max_batch_size {
            batches.extend(split_by_chars(remaining, max_batch_size));
        } else {
            current_batch.push_str(remaining);
        }
    }

    if !current_batch.trim().is_empty() {
        batches.push(current_batch.trim().to_string());
    }

    batches
}

/// Hard split on char boundaries, for runs without sentence punctuation
fn split_by_chars(text: &str, max_batch_size: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    for c in text.chars() {
        if current.len() + c.len_utf8() > max_batch_size {
            chunks.push(std::mem::take(&mut current));
        }
        current.push(c);
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
