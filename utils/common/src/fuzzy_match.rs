//! Unicode-aware fuzzy subsequence matching, used for interactive filtering
//! of file paths, symbols, agent names, and the like.

/// Fuzzy-match `needle` as a case-insensitive subsequence of `haystack`.
///
/// Returns the matched character indices (into `haystack`, one per matched
/// original character, deduplicated when a single character's lowercase
/// expansion consumes more than one needle character) and a score where
/// lower is better: a prefix match scores `-100`, and each unit of spread
/// beyond the minimal contiguous span adds `1`.
///
/// An empty `needle` always matches with no indices and the best possible
/// score.
pub fn fuzzy_match(haystack: &str, needle: &str) -> Option<(Vec<usize>, i32)> {
    if needle.is_empty() {
        return Some((Vec::new(), i32::MAX));
    }

    // Each original character can lowercase into more than one char (e.g.
    // 'İ' -> "i" + combining dot above); tag every expanded char with the
    // index of the original character it came from.
    let haystack_flat: Vec<(char, usize)> = haystack
        .chars()
        .enumerate()
        .flat_map(|(idx, ch)| ch.to_lowercase().map(move |lower| (lower, idx)))
        .collect();
    let needle_flat: Vec<char> = needle.chars().flat_map(char::to_lowercase).collect();

    let mut needle_pos = 0;
    let mut matched_flat_positions = Vec::new();
    let mut matched_indices: Vec<usize> = Vec::new();

    for (flat_pos, (ch, orig_idx)) in haystack_flat.iter().enumerate() {
        if needle_pos >= needle_flat.len() {
            break;
        }
        if *ch == needle_flat[needle_pos] {
            matched_flat_positions.push(flat_pos);
            if matched_indices.last() != Some(orig_idx) {
                matched_indices.push(*orig_idx);
            }
            needle_pos += 1;
        }
    }

    if needle_pos < needle_flat.len() {
        return None;
    }

    let first_flat = *matched_flat_positions.first()?;
    let last_flat = *matched_flat_positions.last()?;
    let span = last_flat - first_flat;
    let window = span.saturating_sub(needle_flat.len().saturating_sub(1));

    let prefix_bonus = if matched_indices.first() == Some(&0) { -100 } else { 0 };
    let score = prefix_bonus + window as i32;

    Some((matched_indices, score))
}

#[cfg(test)]
#[path = "fuzzy_match.test.rs"]
mod tests;
