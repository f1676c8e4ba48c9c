//! Normalizer — turns raw customer fields into match-key digests.
//!
//! Every digest funnels through [`digest`]: the lowercase hex SHA-256 of the
//! UTF-8 bytes of a normalized plaintext. Nothing in here fails. Garbage in
//! a phone or zip field is normalized as far as it goes and hashed anyway.

use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of `s`.
pub fn digest(s: &str) -> String {
    hex::encode(Sha256::digest(s.as_bytes()))
}

/// Trim surrounding whitespace and lowercase.
pub fn normalize_text(s: &str) -> String {
    lowercase(s.trim())
}

/// Simple per-character lowercase mapping. Unlike [`str::to_lowercase`],
/// context is ignored (a final `Σ` maps to `σ`) and no character expands
/// into two (`İ` maps to plain `i`).
fn lowercase(s: &str) -> String {
    s.chars()
        .map(|c| c.to_lowercase().next().unwrap_or(c))
        .collect()
}

/// Digest of [`normalize_text`]. Used for names and email.
pub fn text_digest(s: &str) -> String {
    digest(&normalize_text(s))
}

/// Canonical digit string for a phone number, before hashing.
///
/// Non-digits are stripped. A 10-digit result gets the North American
/// country code `1` prepended; with `add_plus`, an 11-digit result is then
/// prefixed with `+`. No length check beyond that.
pub fn phone_digits(raw: &str, add_plus: bool) -> String {
    let mut digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.len() == 10 {
        digits.insert(0, '1');
    }
    if add_plus && digits.len() == 11 {
        digits.insert(0, '+');
    }
    digits
}

/// Digest of [`phone_digits`].
pub fn normalize_phone(raw: &str, add_plus: bool) -> String {
    digest(&phone_digits(raw, add_plus))
}

/// Lowercase, drop every space character, hash.
pub fn normalize_zip(raw: &str) -> String {
    digest(&lowercase(raw).replace(' ', ""))
}

/// Zero or one email digest. An empty source produces no key at all.
pub fn email_list(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    vec![text_digest(raw)]
}

/// Phone digests in home-then-cell order, skipping empty sources.
///
/// Identical numbers are kept twice; the list is never reordered.
pub fn phone_list(home: &str, cell: &str, add_plus: bool) -> Vec<String> {
    let mut numbers = Vec::with_capacity(2);
    if !home.is_empty() {
        numbers.push(normalize_phone(home, add_plus));
    }
    if !cell.is_empty() {
        numbers.push(normalize_phone(cell, add_plus));
    }
    numbers
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
