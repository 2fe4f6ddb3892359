//! Approximate token-to-dictionary matching tolerant of small typos.
//!
//! Dictionaries are ordered slices: when several keys qualify, the first
//! token and then the first key in declaration order wins.

/// Minimum character-overlap ratio for a fuzzy hit
pub const MIN_SCORE: f64 = 0.75;

/// Maximum length difference between token and key for a fuzzy hit
pub const MAX_LEN_DIFF: usize = 2;

/// Ordered mapping of canonical keys to resolved values
pub type Dictionary<V> = [(&'static str, V)];

/// Split input into candidate tokens (whitespace/commas, at least 2 chars)
pub fn tokenize(input: &str) -> impl Iterator<Item = &str> {
    input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| token.chars().count() >= 2)
}

/// Share of token characters that occur anywhere in `key`
pub fn similarity(token: &str, key: &str) -> f64 {
    let token_len = token.chars().count();
    let key_len = key.chars().count();
    let longest = token_len.max(key_len);
    if longest == 0 {
        return 0.0;
    }
    let shared = token.chars().filter(|c| key.contains(*c)).count();
    shared as f64 / longest as f64
}

fn is_close(token: &str, key: &str) -> bool {
    let diff = token.chars().count().abs_diff(key.chars().count());
    diff <= MAX_LEN_DIFF && similarity(token, key) >= MIN_SCORE
}

/// Value of the first token that equals a dictionary key exactly
pub fn exact_match<V: Clone>(input: &str, dictionary: &Dictionary<V>) -> Option<V> {
    tokenize(input).find_map(|token| {
        dictionary
            .iter()
            .find(|(key, _)| *key == token)
            .map(|(_, value)| value.clone())
    })
}

/// Resolve the first dictionary entry matched by any token of `input`.
///
/// An exact hit on a token returns immediately; otherwise the first key
/// passing the overlap and length checks for that token is taken.
pub fn fuzzy_match<V: Clone>(input: &str, dictionary: &Dictionary<V>) -> Option<V> {
    for token in tokenize(input) {
        if let Some((_, value)) = dictionary.iter().find(|(key, _)| *key == token) {
            return Some(value.clone());
        }
        if let Some((key, value)) = dictionary.iter().find(|(key, _)| is_close(token, key)) {
            tracing::debug!(token, key = *key, "fuzzy match");
            return Some(value.clone());
        }
    }
    None
}
