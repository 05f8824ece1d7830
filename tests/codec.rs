//! Encoded secret format tests.
//!
//! Covers the text format through the public API, plus property tests that
//! any encodable secret survives a decode and keeps its canonical form.

use proptest::prelude::*;
use secretcrypt::core::codec::{decode, encode, Encoded};
use secretcrypt::core::types::params;
use secretcrypt::error::CodecError;
use secretcrypt::{Ciphertext, DecryptParams};

#[test]
fn test_decode_local() {
    let encoded = decode("local::3q2+7w==").unwrap();
    assert_eq!(encoded.backend, "local");
    assert!(encoded.params.is_empty());
    assert_eq!(encoded.ciphertext.as_str(), "3q2+7w==");
}

#[test]
fn test_decode_kms() {
    let encoded = decode("kms:region=us-east-1:AQICAHh").unwrap();
    assert_eq!(encoded.params, params([("region", "us-east-1")]));
}

#[test]
fn test_empty_is_zero_value() {
    let encoded = decode("").unwrap();
    assert_eq!(encoded, Encoded::default());
    assert!(encoded.is_empty());
    assert_eq!(encoded.encode().unwrap(), "");
}

#[test]
fn test_ciphertext_may_contain_delimiters() {
    let encoded = decode("plain:a=1:x:y&z=w").unwrap();
    assert_eq!(encoded.ciphertext.as_str(), "x:y&z=w");
}

#[test]
fn test_malformed_inputs() {
    for text in ["local", "local:", ":a=1:abc", "plain:novalue:abc", "plain:=v:abc", "plain:a=1&a=2:x"] {
        assert!(
            matches!(decode(text), Err(CodecError::Malformed { .. })),
            "expected {:?} to be malformed",
            text
        );
    }
}

#[test]
fn test_encode_canonical_order() {
    let p = params([("zeta", "1"), ("alpha", "2"), ("mid", "3")]);
    assert_eq!(
        encode("plain", &p, &Ciphertext::from("ct")).unwrap(),
        "plain:alpha=2&mid=3&zeta=1:ct"
    );
}

#[test]
fn test_encode_rejects_reserved() {
    let ct = Ciphertext::from("ct");
    assert!(encode("a:b", &DecryptParams::new(), &ct).is_err());
    assert!(encode("plain", &params([("k", "a:b")]), &ct).is_err());
    assert!(encode("plain", &params([("k", "a&b")]), &ct).is_err());
    assert!(encode("plain", &params([("k=x", "v")]), &ct).is_err());
    assert!(encode("", &DecryptParams::new(), &ct).is_err());
}

fn name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_-]{0,11}"
}

fn value() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_./+=-]{0,24}"
}

proptest! {
    #[test]
    fn prop_encode_then_decode(
        backend in name(),
        pairs in proptest::collection::btree_map(name(), value(), 0..5),
        ciphertext in "[ -~]{0,64}",
    ) {
        let ct = Ciphertext::from(ciphertext.as_str());
        let text = encode(&backend, &pairs, &ct).unwrap();
        let decoded = decode(&text).unwrap();

        prop_assert_eq!(decoded.backend, backend);
        prop_assert_eq!(decoded.params, pairs);
        prop_assert_eq!(decoded.ciphertext, ct);
    }

    #[test]
    fn prop_decode_never_panics(text in "\\PC{0,64}") {
        let _ = decode(&text);
    }

    #[test]
    fn prop_decoded_reencodes_canonically(text in "[a-z]{1,6}:([a-z]{1,4}=[a-z=]{0,4}&?){0,4}:[ -~]{0,16}") {
        if let Ok(decoded) = decode(&text) {
            let canonical = decoded.encode().unwrap();
            prop_assert_eq!(decode(&canonical).unwrap(), decoded);
        }
    }
}
