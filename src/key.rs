//! Hierarchical topic keys.
//!
//! A key is a string of tokens separated by [`SEPARATOR`], e.g. `"Agents/3/Vehicle/Velocity"`.
//! In a query key the token [`WILDCARD`] matches any single token at its position. Stored keys
//! must be well formed (see [`validate_stored_key`]); query keys are never rejected, a malformed
//! query key just matches nothing.

use crate::error::DataStoreError;

/// Separator for hierarchical keys. Exactly one character.
pub const SEPARATOR: char = '/';

/// Matches any single token inside a query key. Exactly one character.
pub const WILDCARD: &str = "*";

/// The tokens of a key, in order.
pub type Tokens = Vec<String>;

/// Splits a key into its tokens. Empty tokens are kept, so `"a//b"` yields three tokens.
#[must_use]
pub fn tokenize(key: &str) -> Tokens {
    key.split(SEPARATOR).map(str::to_string).collect()
}

/// Splits a key into borrowed tokens. Used for query keys, which are tokenized once per query.
#[must_use]
pub fn tokenize_borrowed(key: &str) -> Vec<&str> {
    key.split(SEPARATOR).collect()
}

#[must_use]
pub fn is_wildcard(key: &str) -> bool {
    key == WILDCARD
}

/// Whole-key match: both tokenizations have the same length and every query token is either the
/// wildcard or equal to the stored token at the same position.
#[must_use]
pub fn tokens_match<Q: AsRef<str>, S: AsRef<str>>(query: &[Q], stored: &[S]) -> bool {
    query.len() == stored.len()
        && query
            .iter()
            .zip(stored)
            .all(|(q, s)| q.as_ref() == WILDCARD || q.as_ref() == s.as_ref())
}

/// Prefix match: `stored` has at least as many tokens as `prefix` and its leading tokens match
/// `prefix` (wildcards allowed). An empty prefix matches everything.
#[must_use]
pub fn tokens_start_with<P: AsRef<str>, S: AsRef<str>>(stored: &[S], prefix: &[P]) -> bool {
    prefix.len() <= stored.len() && tokens_match(prefix, &stored[..prefix.len()])
}

/// Checks that `key` may be written to the store.
///
/// # Errors
///
/// Returns [`DataStoreError::InvalidKey`] if the key is empty, contains an empty token (a
/// leading, trailing or doubled separator) or contains the wildcard token.
pub fn validate_stored_key(key: &str) -> Result<(), DataStoreError> {
    let reason = if key.is_empty() {
        "key is empty"
    } else if key.split(SEPARATOR).any(str::is_empty) {
        "key contains an empty token"
    } else if key.split(SEPARATOR).any(is_wildcard) {
        "wildcard is not allowed in a stored key"
    } else {
        return Ok(());
    };

    Err(DataStoreError::InvalidKey {
        key: key.to_string(),
        reason: reason.to_string(),
    })
}
