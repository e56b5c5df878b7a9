//! Checks a DS record's digest against a candidate DNSKEY. SHA-1 and
//! SHA-256 are the mandatory digest types; SHA-384 is wired in too since
//! the `CryptoProvider` capability already covers it for a single match
//! arm.

use subtle::ConstantTimeEq;

use crate::crypto::CryptoProvider;
use crate::dname;
use crate::error::DnssecError;
use crate::rrset::{DnskeySet, RrSet};
use crate::scratch::ScratchBuffer;

pub use crate::crypto::digest_size;

/// Does DS record `ds_idx` (of `ds_set`) match candidate DNSKEY `key_idx`
/// (of `keys`)? Builds `lowercased(owner) | DNSKEY RDATA` into `scratch`
/// and hashes it with the DS's digest type, per RFC 4034 §5.1.4.
pub fn ds_digest_match_dnskey<C: CryptoProvider>(
    crypto: &C,
    scratch: &mut ScratchBuffer,
    ds_set: &RrSet,
    ds_idx: u16,
    keys: &DnskeySet,
    key_idx: usize,
) -> Result<bool, DnssecError> {
    let digest_type = crate::access::ds_get_digest_type(ds_set, ds_idx);
    let expected = crate::access::ds_get_digest(ds_set, ds_idx);

    if expected.is_empty() || expected.len() != crypto.digest_size(digest_type) {
        return Ok(false);
    }

    scratch.clear();
    let mut owner = keys.owner().to_vec();
    dname::lowercase_in_place(&mut owner);
    scratch.write(&owner)?;
    scratch.write(keys.key_rdata(key_idx))?;

    let Some(actual) = crypto.hash(digest_type, scratch.as_slice()) else {
        return Ok(false);
    };

    Ok(bool::from(actual.ct_eq(expected)))
}
