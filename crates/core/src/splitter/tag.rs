use super::state::DollarTag;

/// Reads a dollar-quote tag (`$` + `[A-Za-z0-9_]*` + `$`) starting at `index`.
///
/// Returns `None` when `index` does not point at `$`, or when the scan hits a
/// character outside the identifier class (or the end of input) before the
/// closing `$`. The caller then treats the leading `$` as plain text, which is
/// what keeps positional parameters like `$1` out of dollar-quote mode.
pub fn read_dollar_tag(text: &str, index: usize) -> Option<DollarTag<'_>> {
    let bytes = text.as_bytes();
    if bytes.get(index) != Some(&b'$') {
        return None;
    }

    let mut end = index + 1;
    while end < bytes.len() && (bytes[end].is_ascii_alphanumeric() || bytes[end] == b'_') {
        end += 1;
    }

    match bytes.get(end) {
        Some(b'$') => Some(DollarTag::new(&text[index..=end])),
        _ => None,
    }
}
