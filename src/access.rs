//! Length-checked field extraction over DNSKEY, DS, and RRSIG rdata.
//! Every accessor returns a sentinel (`0` or an empty slice) on a short
//! read instead of failing — callers translate a sentinel into `Bogus`,
//! the accessor layer itself never does.

use crate::rrset::{DnskeySet, RrSet};

/// ZSK bit: flags bit 0x0100, host order.
pub const ZSK_FLAG: u16 = 0x0100;
/// Secure Entry Point bit (KSK indicator), flags bit 0x0001.
pub const SEP_FLAG: u16 = 0x0001;

fn u16_be(data: &[u8], at: usize) -> u16 {
    match data.get(at..at + 2) {
        Some([a, b]) => u16::from_be_bytes([*a, *b]),
        _ => 0,
    }
}

fn u32_be(data: &[u8], at: usize) -> u32 {
    match data.get(at..at + 4) {
        Some([a, b, c, d]) => u32::from_be_bytes([*a, *b, *c, *d]),
        _ => 0,
    }
}

// ---------------------------------------------------------------------
// DNSKEY
// ---------------------------------------------------------------------

pub fn dnskey_get_flags(keys: &DnskeySet, i: usize) -> u16 {
    u16_be(keys.key_rdata(i), 0)
}

pub fn dnskey_get_protocol(keys: &DnskeySet, i: usize) -> u8 {
    keys.key_rdata(i).get(2).copied().unwrap_or(0)
}

pub fn dnskey_get_algo(keys: &DnskeySet, i: usize) -> u8 {
    keys.key_rdata(i).get(3).copied().unwrap_or(0)
}

pub fn dnskey_public_key(keys: &DnskeySet, i: usize) -> &[u8] {
    let rdata = keys.key_rdata(i);
    if rdata.len() < 4 {
        &[]
    } else {
        &rdata[4..]
    }
}

pub fn dnskey_is_zsk(keys: &DnskeySet, i: usize) -> bool {
    dnskey_get_flags(keys, i) & ZSK_FLAG != 0
}

pub fn dnskey_is_ksk(keys: &DnskeySet, i: usize) -> bool {
    dnskey_get_flags(keys, i) & SEP_FLAG != 0
}

/// Base set of algorithms supported for DS→DNSKEY algorithm matching
/// independent of any signature-verification backend:
/// `{RSAMD5, DSA, DSA-NSEC3-SHA1, RSASHA1, RSASHA1-NSEC3-SHA1}`.
const BASE_SUPPORTED_KEY_ALGOS: [u8; 5] = [1, 3, 5, 6, 7];

/// Algorithms the bundled `RingCryptoProvider` additionally advertises
/// for signature verification.
const BACKEND_SUPPORTED_KEY_ALGOS: [u8; 4] = [8, 13, 14, 15];

fn algo_is_supported(algo: u8) -> bool {
    BASE_SUPPORTED_KEY_ALGOS.contains(&algo) || BACKEND_SUPPORTED_KEY_ALGOS.contains(&algo)
}

pub fn dnskey_algo_is_supported(keys: &DnskeySet, i: usize) -> bool {
    algo_is_supported(dnskey_get_algo(keys, i))
}

/// RFC 4034 Appendix B keytag, computed over the full DNSKEY RDATA.
pub fn dnskey_calc_keytag(keys: &DnskeySet, i: usize) -> u16 {
    crate::keytag::compute(keys.key_rdata(i))
}

// ---------------------------------------------------------------------
// DS
// ---------------------------------------------------------------------

pub fn ds_get_key_tag(ds: &RrSet, j: u16) -> u16 {
    u16_be(ds.data_rr(j), 0)
}

pub fn ds_get_algo(ds: &RrSet, j: u16) -> u8 {
    ds.data_rr(j).get(2).copied().unwrap_or(0)
}

pub fn ds_get_digest_type(ds: &RrSet, j: u16) -> u8 {
    ds.data_rr(j).get(3).copied().unwrap_or(0)
}

pub fn ds_get_digest(ds: &RrSet, j: u16) -> &[u8] {
    let rdata = ds.data_rr(j);
    if rdata.len() < 4 {
        &[]
    } else {
        &rdata[4..]
    }
}

pub fn ds_digest_algo_is_supported(ds: &RrSet, j: u16) -> bool {
    crate::digest::digest_size(ds_get_digest_type(ds, j)) > 0
}

pub fn ds_key_algo_is_supported(ds: &RrSet, j: u16) -> bool {
    algo_is_supported(ds_get_algo(ds, j))
}

// ---------------------------------------------------------------------
// RRSIG
// ---------------------------------------------------------------------

pub fn rrsig_get_type_covered(sig: &[u8]) -> u16 {
    u16_be(sig, 0)
}

pub fn rrsig_get_algo(sig: &[u8]) -> u8 {
    sig.get(2).copied().unwrap_or(0)
}

pub fn rrsig_get_labels(sig: &[u8]) -> u8 {
    sig.get(3).copied().unwrap_or(0)
}

pub fn rrsig_get_original_ttl(sig: &[u8]) -> u32 {
    u32_be(sig, 4)
}

pub fn rrsig_get_expiration(sig: &[u8]) -> u32 {
    u32_be(sig, 8)
}

pub fn rrsig_get_inception(sig: &[u8]) -> u32 {
    u32_be(sig, 12)
}

pub fn rrsig_get_key_tag(sig: &[u8]) -> u16 {
    u16_be(sig, 16)
}

/// Signer name, `None` if the name is truncated or extends past `sig`.
pub fn rrsig_get_signer_name(sig: &[u8]) -> Option<&[u8]> {
    let rest = sig.get(18..)?;
    let len = crate::dname::validate(rest)?;
    Some(&rest[..len])
}

/// Raw signature block trailing the signer name, `None` if the RRSIG is
/// too short to contain one (signer name not followed by any bytes).
pub fn rrsig_get_signature(sig: &[u8]) -> Option<&[u8]> {
    let rest = sig.get(18..)?;
    let name_len = crate::dname::validate(rest)?;
    sig.get(18 + name_len..)
}

/// The "sig header": the fixed 18-byte prefix plus the signer name —
/// this is the slice the canonicalizer copies into scratch before
/// lowering the signer name in place.
pub fn rrsig_get_header(sig: &[u8]) -> Option<&[u8]> {
    let rest = sig.get(18..)?;
    let name_len = crate::dname::validate(rest)?;
    sig.get(..18 + name_len)
}
