//! Security properties of credentials and session ids.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]

use std::time::{Duration, Instant};

use authcore::crypto::{
    constant_time_eq, generate_session_id, PasswordHasher, Pbkdf2Hasher, ALGORITHM, KEY_LEN,
};
use authcore::{AuthError, Credential, SecretString};

fn hasher() -> Pbkdf2Hasher {
    Pbkdf2Hasher::new(2_000)
}

// =============================================================================
// Password Credential Tests
// =============================================================================

#[test]
fn verify_accepts_the_hashed_password() {
    let hasher = hasher();
    for password in ["a", "correct horse battery staple", "пароль", "🔑🔑🔑", "$$$"] {
        let hash = hasher.hash(password).unwrap();
        assert!(hasher.verify(password, &hash).unwrap(), "{password:?}");
    }
}

#[test]
fn verify_rejects_other_passwords() {
    let hasher = hasher();
    let hash = hasher.hash("password1").unwrap();

    for other in ["password2", "Password1", "password1 ", "", "password"] {
        assert!(!hasher.verify(other, &hash).unwrap(), "{other:?}");
    }
}

#[test]
fn same_password_produces_different_credentials() {
    let hasher = hasher();

    let hash1 = hasher.hash("testpassword123").unwrap();
    let hash2 = hasher.hash("testpassword123").unwrap();

    assert_ne!(hash1, hash2);
    assert!(hasher.verify("testpassword123", &hash1).unwrap());
    assert!(hasher.verify("testpassword123", &hash2).unwrap());
}

#[test]
fn credential_never_contains_plaintext() {
    let hash = hasher().hash("plaintext-password").unwrap();
    assert!(!hash.contains("plaintext-password"));
}

#[test]
fn credential_parse_encode_roundtrip() {
    let hash = hasher().hash("roundtrip").unwrap();
    let credential: Credential = hash.parse().unwrap();

    assert_eq!(credential.to_string(), hash);
    assert!(hash.starts_with(ALGORITHM));
}

#[test]
fn raising_work_factor_keeps_old_credentials_valid() {
    let old = Pbkdf2Hasher::new(1_000).hash("stable").unwrap();
    let new = Pbkdf2Hasher::new(3_000);

    assert!(new.verify("stable", &old).unwrap());
    assert!(new.hash("stable").unwrap().contains("$3000$"));
}

#[test]
fn unsupported_algorithm_is_an_error_not_false() {
    let hasher = hasher();
    let hash = hasher.hash("pw").unwrap();
    let foreign = hash.replacen(ALGORITHM, "pbkdf2_sha512", 1);

    // neither the right nor a wrong password gets a boolean back
    for password in ["pw", "nope"] {
        assert_eq!(
            hasher.verify(password, &foreign).unwrap_err(),
            AuthError::UnsupportedAlgorithm("pbkdf2_sha512".to_owned())
        );
    }
}

#[test]
fn malformed_credential_is_an_error_not_false() {
    let hasher = hasher();
    let result = hasher.verify("pw", "pbkdf2_sha256$600000$onlythree");

    let err = result.unwrap_err();
    assert!(matches!(err, AuthError::MalformedCredential(_)));
    assert!(err.is_credential_integrity_error());
}

// =============================================================================
// Session Id Tests
// =============================================================================

#[test]
fn session_ids_are_high_entropy_and_url_safe() {
    let ids: Vec<SecretString> = (0..64).map(|_| generate_session_id(32)).collect();

    for (i, id) in ids.iter().enumerate() {
        let raw = id.expose_secret();
        assert_eq!(raw.len(), 43);
        assert!(raw
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_'));
        assert!(ids[i + 1..].iter().all(|other| other != id));
    }
}

#[test]
fn secret_string_redacts_session_ids() {
    let id = generate_session_id(32);
    let raw = id.expose_secret().to_owned();

    assert!(!format!("{id:?}").contains(&raw));
    assert!(!format!("{id}").contains(&raw));
}

// =============================================================================
// Timing
// =============================================================================

fn median_compare_time(a: &[u8], b: &[u8], rounds: usize) -> Duration {
    let mut samples: Vec<Duration> = (0..rounds)
        .map(|_| {
            let start = Instant::now();
            for _ in 0..64 {
                std::hint::black_box(constant_time_eq(
                    std::hint::black_box(a),
                    std::hint::black_box(b),
                ));
            }
            start.elapsed()
        })
        .collect();
    samples.sort_unstable();
    samples[rounds / 2]
}

#[test]
#[ignore = "statistical timing check; run with --release -- --ignored"]
fn comparison_time_does_not_depend_on_matching_prefix() {
    let reference = vec![0xA5u8; 4096];

    let mut early_mismatch = reference.clone();
    early_mismatch[0] ^= 0xFF;

    let mut late_mismatch = reference.clone();
    late_mismatch[4095] ^= 0xFF;

    // warm up caches and frequency scaling
    median_compare_time(&reference, &early_mismatch, 200);

    let early = median_compare_time(&reference, &early_mismatch, 2_000);
    let late = median_compare_time(&reference, &late_mismatch, 2_000);

    let ratio = late.as_secs_f64() / early.as_secs_f64();
    assert!(
        (0.5..2.0).contains(&ratio),
        "early={early:?} late={late:?} ratio={ratio:.2}"
    );
}

#[test]
fn key_length_is_fixed() {
    let credential: Credential = hasher().hash("pw").unwrap().parse().unwrap();
    assert_eq!(credential.derived_key().len(), KEY_LEN);
}
