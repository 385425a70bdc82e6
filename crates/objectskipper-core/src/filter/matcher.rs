//! Comment pattern matching

/// Pick the longest candidate that is a literal prefix of `comment`
///
/// Two distinct prefixes of equal length cannot both match the same
/// comment, so the result does not depend on iteration order.
pub fn longest_matching_prefix<'a>(
    candidates: impl IntoIterator<Item = &'a str>,
    comment: &str,
) -> Option<&'a str> {
    candidates
        .into_iter()
        .filter(|prefix| comment.starts_with(prefix))
        .max_by_key(|prefix| prefix.len())
}

/// Derive an object id from a boundary comment
///
/// Strips every leading character that occurs anywhere in `prefix`, then
/// trims whitespace. This is a character-class strip, not a substring
/// removal: with prefix `EDGE`, `EDGEGECube` yields `Cube` and
/// `EDGE Deck` yields `Deck` only because the space stops the strip.
pub fn strip_prefix_chars(comment: &str, prefix: &str) -> String {
    comment
        .trim_start_matches(|c: char| prefix.contains(c))
        .trim()
        .to_string()
}
