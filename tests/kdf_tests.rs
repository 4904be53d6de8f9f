//! tests/kdf_tests.rs
//! Key derivation against published vectors.

use spadeace::{
    derive_argon2_key, derive_pbkdf2_key, derive_scrypt_key, derive_sha256_key, KeyDerivation,
    SpadeError,
};

#[test]
fn sha256_of_password_without_salt() {
    let mut key = [0u8; 32];
    derive_sha256_key("abc", b"", &mut key);
    assert_eq!(
        hex::encode(key),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
}

#[test]
fn pbkdf2_hmac_sha256_vectors() {
    let cases = [
        (1, "120fb6cffcf8b32c43e7225256c4f837a86548c92ccc35480805987cb70be17b"),
        (2, "ae4d0c95af6b46d32d0adff928f06dd02a303f8ef3c251dfd6e2d85a95474c43"),
    ];
    for (iterations, expected) in cases {
        let mut key = [0u8; 32];
        derive_pbkdf2_key("password", b"salt", iterations, &mut key).unwrap();
        assert_eq!(hex::encode(key), expected, "{iterations} iterations");
    }
}

#[test]
fn pbkdf2_rejects_zero_iterations() {
    let mut key = [0u8; 32];
    let err = derive_pbkdf2_key("password", b"salt", 0, &mut key).unwrap_err();
    assert!(matches!(err, SpadeError::Kdf(_)));
}

#[test]
fn scrypt_rfc7914_vector() {
    let mut key = [0u8; 64];
    derive_scrypt_key("", b"", 4, 1, 1, &mut key).unwrap();
    assert_eq!(
        hex::encode(key),
        "77d6576238657b203b19ca42c18a0497f16b4844e3074ae8dfdffa3fede21442\
         fcd0069ded0948f8326a753a0fc81f17e8d3e0fb2e0d3628cf35e20c38d18906"
    );
}

#[test]
fn scrypt_short_output_is_a_prefix() {
    let mut short = [0u8; 8];
    let mut long = [0u8; 64];
    derive_scrypt_key("", b"", 4, 1, 1, &mut short).unwrap();
    derive_scrypt_key("", b"", 4, 1, 1, &mut long).unwrap();
    assert_eq!(short[..], long[..8]);
}

#[test]
fn key_derivation_enum_dispatches() {
    let pbkdf2 = KeyDerivation::Pbkdf2Sha256 { salt: b"salt".to_vec(), iterations: 1 };
    let key = pbkdf2.derive("password", 32).unwrap();
    assert_eq!(
        hex::encode(&*key),
        "120fb6cffcf8b32c43e7225256c4f837a86548c92ccc35480805987cb70be17b"
    );

    assert_eq!(KeyDerivation::default().derive("abc", 16).unwrap().len(), 16);
    assert!(matches!(
        KeyDerivation::default().derive("abc", 0),
        Err(SpadeError::Kdf(_))
    ));
}

#[test]
fn named_defaults() {
    match KeyDerivation::pbkdf2() {
        KeyDerivation::Pbkdf2Sha256 { salt, iterations } => {
            assert_eq!(salt, b"SpadeAce");
            assert_eq!(iterations, 10_000);
        }
        other => panic!("unexpected {other:?}"),
    }
    match KeyDerivation::scrypt() {
        KeyDerivation::Scrypt { log_n, r, p, .. } => assert_eq!((log_n, r, p), (14, 8, 1)),
        other => panic!("unexpected {other:?}"),
    }
    match KeyDerivation::argon2id() {
        KeyDerivation::Argon2id { salt, m_cost, t_cost, p_cost } => {
            assert_eq!(salt, b"SpadeAce");
            assert_eq!((m_cost, t_cost, p_cost), (19_456, 2, 1));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn argon2id_matches_direct_derivation() {
    let kdf = KeyDerivation::Argon2id {
        salt: b"somesalt".to_vec(),
        m_cost: 32,
        t_cost: 2,
        p_cost: 1,
    };
    let key = kdf.derive("password", 24).unwrap();

    let mut direct = [0u8; 24];
    derive_argon2_key("password", b"somesalt", 32, 2, 1, &mut direct).unwrap();
    assert_eq!(&key[..], &direct[..]);
    assert_eq!(kdf.label(), "Argon2id");
}

#[test]
fn scrypt_memory_limit_is_enforced() {
    let mut key = [0u8; 32];
    let err = derive_scrypt_key("x", b"salt", 40, 8, 1, &mut key).unwrap_err();
    assert!(err.to_string().contains("memory limit"));
    derive_scrypt_key("x", b"salt", 10, 8, 1, &mut key).unwrap();
}

#[test]
fn invalid_scrypt_parameters_are_errors() {
    let bad = KeyDerivation::Scrypt { salt: Vec::new(), log_n: 64, r: 8, p: 1 };
    assert!(matches!(bad.derive("x", 32), Err(SpadeError::Kdf(_))));
}
