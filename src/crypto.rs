//! Cryptographic primitive provider: the one seam where this crate
//! touches an actual crypto library. DNSSEC ECDSA signatures are RFC
//! 6605 fixed-length `r || s`, not an ASN.1 DER encoding, so this
//! provider uses `ring`'s `_FIXED` verification algorithms rather than
//! the `_ASN1` ones.

use ring::signature;
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha384};

/// DNSSEC algorithm numbers this provider can verify signatures for.
pub mod algorithm {
    pub const RSASHA1: u8 = 5;
    pub const RSASHA1_NSEC3_SHA1: u8 = 7;
    pub const RSASHA256: u8 = 8;
    pub const RSASHA512: u8 = 10;
    pub const ECDSAP256SHA256: u8 = 13;
    pub const ECDSAP384SHA384: u8 = 14;
    pub const ED25519: u8 = 15;
}

/// DS digest type numbers this provider can hash for.
pub mod digest_type {
    pub const SHA1: u8 = 1;
    pub const SHA256: u8 = 2;
    pub const SHA384: u8 = 4;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    Ok,
    Bad,
    Unsupported,
    InternalErr,
}

/// Hash + public-key verify, modeled as a trait object so the core never
/// hard-codes a crypto library.
pub trait CryptoProvider {
    fn supports(&self, algorithm: u8) -> bool;
    fn digest_size(&self, digest_algorithm: u8) -> usize;
    /// `None` if `digest_algorithm` is unsupported.
    fn hash(&self, digest_algorithm: u8, input: &[u8]) -> Option<Vec<u8>>;
    fn verify(&self, algorithm: u8, key: &[u8], message: &[u8], signature: &[u8]) -> VerifyOutcome;
}

pub fn digest_size(digest_algorithm: u8) -> usize {
    match digest_algorithm {
        digest_type::SHA1 => 20,
        digest_type::SHA256 => 32,
        digest_type::SHA384 => 48,
        _ => 0,
    }
}

/// Default provider backed by `ring` + `sha1`/`sha2`, mirroring the
/// algorithm coverage of `infrastructure/dns/dnssec/crypto.rs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RingCryptoProvider;

impl CryptoProvider for RingCryptoProvider {
    fn supports(&self, algorithm: u8) -> bool {
        use self::algorithm::*;
        matches!(
            algorithm,
            RSASHA1 | RSASHA1_NSEC3_SHA1 | RSASHA256 | RSASHA512 | ECDSAP256SHA256
                | ECDSAP384SHA384 | ED25519
        )
    }

    fn digest_size(&self, digest_algorithm: u8) -> usize {
        digest_size(digest_algorithm)
    }

    fn hash(&self, digest_algorithm: u8, input: &[u8]) -> Option<Vec<u8>> {
        match digest_algorithm {
            digest_type::SHA1 => {
                let mut h = Sha1::new();
                h.update(input);
                Some(h.finalize().to_vec())
            }
            digest_type::SHA256 => {
                let mut h = Sha256::new();
                h.update(input);
                Some(h.finalize().to_vec())
            }
            digest_type::SHA384 => {
                let mut h = Sha384::new();
                h.update(input);
                Some(h.finalize().to_vec())
            }
            _ => None,
        }
    }

    fn verify(&self, algorithm: u8, key: &[u8], message: &[u8], sig: &[u8]) -> VerifyOutcome {
        use self::algorithm::*;
        match algorithm {
            RSASHA1 | RSASHA1_NSEC3_SHA1 => verify_rsa(
                key,
                message,
                sig,
                &signature::RSA_PKCS1_1024_8192_SHA1_FOR_LEGACY_USE_ONLY,
            ),
            RSASHA256 => verify_rsa(key, message, sig, &signature::RSA_PKCS1_2048_8192_SHA256),
            RSASHA512 => verify_rsa(key, message, sig, &signature::RSA_PKCS1_2048_8192_SHA512),
            ECDSAP256SHA256 => verify_unparsed(
                key,
                message,
                sig,
                &signature::ECDSA_P256_SHA256_FIXED,
                64,
                64,
            ),
            ECDSAP384SHA384 => verify_unparsed(
                key,
                message,
                sig,
                &signature::ECDSA_P384_SHA384_FIXED,
                96,
                96,
            ),
            ED25519 => verify_unparsed(key, message, sig, &signature::ED25519, 32, 64),
            _ => VerifyOutcome::Unsupported,
        }
    }
}

/// Parse a DNSKEY RSA public key (RFC 3110): 1-byte exponent length, or
/// `0x00` + 2-byte length for long form, followed by exponent then
/// modulus.
fn parse_rsa_key(key_data: &[u8]) -> Option<(Vec<u8>, Vec<u8>)> {
    if key_data.is_empty() {
        return None;
    }
    let first = key_data[0];
    let (exp_len, exp_start) = if first == 0 {
        if key_data.len() < 3 {
            return None;
        }
        (u16::from_be_bytes([key_data[1], key_data[2]]) as usize, 3)
    } else {
        (first as usize, 1)
    };
    let exp_end = exp_start.checked_add(exp_len)?;
    if exp_end > key_data.len() {
        return None;
    }
    let exponent = key_data[exp_start..exp_end].to_vec();
    let modulus = key_data[exp_end..].to_vec();
    if modulus.is_empty() {
        return None;
    }
    Some((exponent, modulus))
}

fn verify_rsa(
    key: &[u8],
    message: &[u8],
    sig: &[u8],
    params: &'static signature::RsaParameters,
) -> VerifyOutcome {
    let Some((exponent, modulus)) = parse_rsa_key(key) else {
        return VerifyOutcome::InternalErr;
    };
    let public_key = signature::RsaPublicKeyComponents {
        n: &modulus,
        e: &exponent,
    };
    match public_key.verify(params, message, sig) {
        Ok(()) => VerifyOutcome::Ok,
        Err(_) => VerifyOutcome::Bad,
    }
}

fn verify_unparsed(
    key: &[u8],
    message: &[u8],
    sig: &[u8],
    alg: &'static dyn signature::VerificationAlgorithm,
    expected_key_len: usize,
    expected_sig_len: usize,
) -> VerifyOutcome {
    if key.len() != expected_key_len || sig.len() != expected_sig_len {
        return VerifyOutcome::Bad;
    }
    let public_key = signature::UnparsedPublicKey::new(alg, key);
    match public_key.verify(message, sig) {
        Ok(()) => VerifyOutcome::Ok,
        Err(_) => VerifyOutcome::Bad,
    }
}
