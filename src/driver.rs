//! The public entry points that try every signature against every
//! candidate key (or a single key/sig pair), short-circuiting on the
//! first `Secure` verdict.

use tracing::{info, trace};

use crate::crypto::CryptoProvider;
use crate::digest;
use crate::rrset::{DnskeySet, RrSet};
use crate::verify::{self, VerifyEnv};
use crate::Verdict;

/// Combine per-attempt verdicts under try-all-signatures semantics: any
/// `Secure` wins immediately; otherwise `Bogus` beats `Unchecked` beats
/// no attempts at all (empty input is `Bogus` — "no signatures present").
fn fold(acc: Verdict, next: Verdict) -> Verdict {
    match (acc, next) {
        (Verdict::Secure, _) | (_, Verdict::Secure) => Verdict::Secure,
        (Verdict::Bogus, _) | (_, Verdict::Bogus) => Verdict::Bogus,
        _ => Verdict::Unchecked,
    }
}

/// Verify `rrset` against every key in `keys`, trying every RRSIG over
/// every candidate key, stopping at the first `Secure`.
pub fn dnskeyset_verify_rrset<C: CryptoProvider>(
    env: &mut VerifyEnv<C>,
    rrset: &RrSet,
    keys: &DnskeySet,
) -> Verdict {
    if rrset.rrsig_count() == 0 || keys.is_empty() {
        trace!("no rrsigs or no candidate keys; rrset is bogus");
        return Verdict::Bogus;
    }

    let mut acc = None;
    for sig_idx in 0..rrset.rrsig_count() {
        for key_idx in 0..keys.len() {
            let verdict = verify::verify_one(env, rrset, keys, key_idx, sig_idx);
            acc = Some(match acc {
                None => verdict,
                Some(prev) => fold(prev, verdict),
            });
            if acc == Some(Verdict::Secure) {
                info!(sig_idx, key_idx, "rrset verified secure");
                return Verdict::Secure;
            }
        }
    }
    acc.unwrap_or(Verdict::Bogus)
}

/// Verify `rrset` against a single candidate `key` (index `key_idx` into
/// `keys`), trying every RRSIG covering it.
pub fn dnskey_verify_rrset<C: CryptoProvider>(
    env: &mut VerifyEnv<C>,
    rrset: &RrSet,
    keys: &DnskeySet,
    key_idx: usize,
) -> Verdict {
    if rrset.rrsig_count() == 0 || key_idx >= keys.len() {
        return Verdict::Bogus;
    }
    let mut acc = None;
    for sig_idx in 0..rrset.rrsig_count() {
        let verdict = verify::verify_one(env, rrset, keys, key_idx, sig_idx);
        acc = Some(match acc {
            None => verdict,
            Some(prev) => fold(prev, verdict),
        });
        if acc == Some(Verdict::Secure) {
            return Verdict::Secure;
        }
    }
    acc.unwrap_or(Verdict::Bogus)
}

/// Verify a single RRSIG (`sig_idx`) against every key in `keys`.
pub fn dnskeyset_verify_rrset_sig<C: CryptoProvider>(
    env: &mut VerifyEnv<C>,
    rrset: &RrSet,
    keys: &DnskeySet,
    sig_idx: u16,
) -> Verdict {
    if sig_idx >= rrset.rrsig_count() || keys.is_empty() {
        return Verdict::Bogus;
    }
    let mut acc = None;
    for key_idx in 0..keys.len() {
        let verdict = verify::verify_one(env, rrset, keys, key_idx, sig_idx);
        acc = Some(match acc {
            None => verdict,
            Some(prev) => fold(prev, verdict),
        });
        if acc == Some(Verdict::Secure) {
            return Verdict::Secure;
        }
    }
    acc.unwrap_or(Verdict::Bogus)
}

/// Verify a single RRSIG (`sig_idx`) against a single DNSKEY (`key_idx`).
/// The direct, non-try-all entry point: runs the full precondition chain
/// and actually invokes the crypto backend, rather than skipping it.
pub fn dnskey_verify_rrset_sig<C: CryptoProvider>(
    env: &mut VerifyEnv<C>,
    rrset: &RrSet,
    keys: &DnskeySet,
    key_idx: usize,
    sig_idx: u16,
) -> Verdict {
    if key_idx >= keys.len() || sig_idx >= rrset.rrsig_count() {
        return Verdict::Bogus;
    }
    verify::verify_one(env, rrset, keys, key_idx, sig_idx)
}

/// Verify a DS RRset against a DNSKEY set: each DS record is checked
/// against every candidate key's digest, short-circuiting on the first
/// match whose key algorithm/digest type are both supported.
pub fn ds_verify_dnskeyset<C: CryptoProvider>(
    env: &mut VerifyEnv<C>,
    ds_set: &RrSet,
    keys: &DnskeySet,
) -> Verdict {
    if ds_set.count() == 0 || keys.is_empty() {
        return Verdict::Bogus;
    }

    let mut acc = None;
    for ds_idx in ds_set.data_indices() {
        if !crate::access::ds_key_algo_is_supported(ds_set, ds_idx)
            || !crate::access::ds_digest_algo_is_supported(ds_set, ds_idx)
        {
            acc = Some(fold(acc.unwrap_or(Verdict::Unchecked), Verdict::Unchecked));
            continue;
        }
        for key_idx in 0..keys.len() {
            let key_tag = crate::access::dnskey_calc_keytag(keys, key_idx);
            if key_tag != crate::access::ds_get_key_tag(ds_set, ds_idx) {
                continue;
            }
            if crate::access::dnskey_get_algo(keys, key_idx)
                != crate::access::ds_get_algo(ds_set, ds_idx)
            {
                continue;
            }
            let matched = digest::ds_digest_match_dnskey(
                env.crypto,
                env.scratch_mut(),
                ds_set,
                ds_idx,
                keys,
                key_idx,
            );
            let verdict = match matched {
                Ok(true) => Verdict::Secure,
                Ok(false) => Verdict::Bogus,
                Err(_) => Verdict::Unchecked,
            };
            acc = Some(match acc {
                None => verdict,
                Some(prev) => fold(prev, verdict),
            });
            if acc == Some(Verdict::Secure) {
                return Verdict::Secure;
            }
        }
    }
    acc.unwrap_or(Verdict::Bogus)
}
