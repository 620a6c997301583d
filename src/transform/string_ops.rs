use std::borrow::Cow;

/// Returns a lowercase representation, reusing the original string if already lowercase.
pub fn lowercase(input: &str) -> Cow<'_, str> {
    if input.chars().all(|ch| !ch.is_uppercase()) {
        Cow::Borrowed(input)
    } else {
        Cow::Owned(input.to_lowercase())
    }
}

/// Returns an uppercase representation, avoiding allocation when unnecessary.
pub fn uppercase(input: &str) -> Cow<'_, str> {
    if input.chars().all(|ch| !ch.is_lowercase()) {
        Cow::Borrowed(input)
    } else {
        Cow::Owned(input.to_uppercase())
    }
}

/// Capitalises the first character of every whitespace-delimited word and lowercases the rest.
/// Whitespace runs are kept as they are.
pub fn titlecase(input: &str) -> Cow<'_, str> {
    let mut output = String::with_capacity(input.len());
    let mut at_word_start = true;
    for ch in input.chars() {
        if ch.is_whitespace() {
            output.push(ch);
            at_word_start = true;
        } else if at_word_start {
            output.extend(ch.to_uppercase());
            at_word_start = false;
        } else {
            output.extend(ch.to_lowercase());
        }
    }
    if output == input {
        Cow::Borrowed(input)
    } else {
        Cow::Owned(output)
    }
}

/// Character range `[begin, end)` clamped to the string; `begin > end` is empty.
pub fn substring(value: &str, begin: usize, end: usize) -> Cow<'_, str> {
    if begin >= end {
        return Cow::Owned(String::new());
    }
    let mut start_byte: Option<usize> = None;
    let mut end_byte: Option<usize> = None;
    for (char_index, (byte_index, _)) in value.char_indices().enumerate() {
        if char_index == begin {
            start_byte = Some(byte_index);
        }
        if char_index == end {
            end_byte = Some(byte_index);
            break;
        }
    }
    let Some(start_byte) = start_byte else {
        return Cow::Owned(String::new());
    };
    let end_byte = end_byte.unwrap_or(value.len());
    if start_byte == 0 && end_byte == value.len() {
        return Cow::Borrowed(value);
    }
    Cow::Borrowed(&value[start_byte..end_byte])
}

/// Splits at the first occurrence of `delimiter`.
///
/// When the delimiter is absent the first part is the value minus its final character and the
/// second part is empty. Downstream data recorded with the legacy wrangler depends on this.
pub fn split_first<'a>(value: &'a str, delimiter: &str) -> (Cow<'a, str>, Cow<'a, str>) {
    match value.find(delimiter) {
        Some(idx) => (
            Cow::Borrowed(&value[..idx]),
            Cow::Borrowed(&value[idx + delimiter.len()..]),
        ),
        None => {
            let head = value
                .char_indices()
                .last()
                .map(|(idx, _)| &value[..idx])
                .unwrap_or("");
            (Cow::Borrowed(head), Cow::Borrowed(""))
        }
    }
}
