//! Domain-specific assertion macros for convsync harnesses.
//!
//! These add context-rich failure messages that make it clear *which*
//! match-key rule was violated.

/// Assert that a string is a 64-character lowercase hex SHA-256 digest.
///
/// ```rust
/// assert_digest!(event.match_keys.first_name);
/// ```
#[macro_export]
macro_rules! assert_digest {
    ($value:expr) => {{
        let value: &str = &$value;
        if value.len() != 64
            || !value
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        {
            panic!(
                "assert_digest! failed: {:?} is not a lowercase hex SHA-256 digest",
                value
            );
        }
    }};
}

/// Assert that a digest equals the SHA-256 of an expected plaintext.
///
/// ```rust
/// assert_digest_of!(keys.birth_year, "1990");
/// ```
#[macro_export]
macro_rules! assert_digest_of {
    ($value:expr, $plaintext:expr) => {{
        let value: &str = &$value;
        let plaintext: &str = $plaintext;
        let expected = convsync_core::normalizer::digest(plaintext);
        if value != expected {
            panic!(
                "assert_digest_of! failed:\n  plaintext: {:?}\n  expected:  {}\n  actual:    {}",
                plaintext, expected, value
            );
        }
    }};
}

/// Assert that every match-key digest in a JSON event is well formed,
/// walking the offline (`match_keys`) or online (`user_data`) bundle.
pub fn assert_all_digests(event: &serde_json::Value) {
    let (bundle, plaintext) = if let Some(keys) = event.get("match_keys") {
        (keys, "extern_id")
    } else {
        (&event["user_data"], "external_id")
    };
    let obj = bundle.as_object().expect("identity bundle must be an object");
    for (key, value) in obj {
        if key == plaintext || (key == "country" && value == "") {
            continue;
        }
        match value {
            serde_json::Value::String(s) => assert_digest!(s),
            serde_json::Value::Array(items) => {
                for item in items {
                    assert_digest!(item.as_str().expect("digest lists hold strings"));
                }
            }
            other => panic!("unexpected value for {key}: {other}"),
        }
    }
}
