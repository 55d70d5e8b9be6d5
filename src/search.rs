//! Substring search over byte slices.

/// Returns the position of the first occurrence of `needle` in
/// `haystack`.
///
/// The empty needle matches at position 0. Single-byte needles use a
/// direct scan. Longer needles scan for the first byte and verify the
/// remainder by direct comparison; after a failed verification the scan
/// resumes one byte past the candidate, so overlapping candidates are
/// not skipped. Worst case O(haystack * needle), fine for the short
/// needles this is used with.
#[must_use]
pub fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    if needle.len() > haystack.len() {
        return None;
    }

    let first = needle[0];
    if needle.len() == 1 {
        return haystack.iter().position(|&b| b == first);
    }

    let last_candidate = haystack.len() - needle.len();
    let mut from = 0;
    while from <= last_candidate {
        let rel = haystack[from..].iter().position(|&b| b == first)?;
        let at = from + rel;
        if at > last_candidate {
            return None;
        }
        if haystack[at + 1..at + needle.len()] == needle[1..] {
            return Some(at);
        }
        from = at + 1;
    }
    None
}
