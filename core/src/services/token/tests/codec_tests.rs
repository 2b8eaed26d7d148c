//! Unit tests for segment encoding and signing

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::services::token::codec::{decode_segment, encode_segment, TokenSigner};

#[test]
fn test_segments_are_unpadded_base64url() {
    let encoded = encode_segment(&[0xfb, 0xff, 0xfe, 0x01]);
    assert_eq!(encoded, "-__-AQ");
    assert!(!encoded.contains('='));
    assert_eq!(decode_segment(&encoded).unwrap(), vec![0xfb, 0xff, 0xfe, 0x01]);
}

#[test]
fn test_decode_rejects_padding_and_foreign_alphabet() {
    assert!(decode_segment("AQ==").is_err());
    assert!(decode_segment("+/8").is_err());
    assert!(decode_segment("not*base64").is_err());
}

#[test]
fn test_signature_matches_plain_hmac_sha256() {
    let signer = TokenSigner::new(b"forum-secret").unwrap();
    let signature = signer.sign("header.payload");

    let mut mac = Hmac::<Sha256>::new_from_slice(b"forum-secret").unwrap();
    mac.update(b"header.payload");
    let expected = encode_segment(&mac.finalize().into_bytes());

    assert_eq!(signature, expected);
    assert_eq!(signature.len(), 43);
}

#[test]
fn test_signer_is_reusable() {
    let signer = TokenSigner::new(b"forum-secret").unwrap();
    assert_eq!(signer.sign("a.b"), signer.sign("a.b"));
    assert_ne!(signer.sign("a.b"), signer.sign("a.c"));
}

#[test]
fn test_verify_requires_exact_signature() {
    let signer = TokenSigner::new(b"forum-secret").unwrap();
    let signature = signer.sign("a.b");

    assert!(signer.verify("a.b", &signature));
    assert!(!signer.verify("a.c", &signature));
    assert!(!signer.verify("a.b", &signature[..42]));
    assert!(!signer.verify("a.b", &format!("{}A", signature)));
    assert!(!signer.verify("a.b", ""));
}

#[test]
fn test_different_keys_produce_different_signatures() {
    let first = TokenSigner::new(b"k1").unwrap();
    let second = TokenSigner::new(b"k2").unwrap();
    assert!(!second.verify("a.b", &first.sign("a.b")));
}

#[test]
fn test_signer_debug_is_redacted() {
    let signer = TokenSigner::new(b"very-secret-key").unwrap();
    let rendered = format!("{:?}", signer);
    assert!(rendered.contains("redacted"));
    assert!(!rendered.contains("very-secret-key"));
}
