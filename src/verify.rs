//! Verifies one RRSIG against one candidate DNSKEY: runs the ordered
//! structural/semantic preconditions and then actually invokes the
//! crypto backend.

use tracing::debug;

use crate::access;
use crate::canon;
use crate::crypto::{CryptoProvider, VerifyOutcome};
use crate::dname;
use crate::error::DnssecError;
use crate::rrset::{DnskeySet, RrSet};
use crate::scratch::ScratchBuffer;
use crate::Verdict;

/// Policy knobs threaded through a single top-level verification call.
/// Owns the scratch buffer exclusively for the call's duration.
pub struct VerifyEnv<'p, C: CryptoProvider> {
    pub crypto: &'p C,
    pub now: u32,
    /// ZSK-bit enforcement is stricter than RFC 4035 requires (SHOULD,
    /// not MUST); kept as a single-point switch so a caller can relax it
    /// without touching verification logic.
    pub require_zsk_flag: bool,
    scratch: ScratchBuffer,
}

impl<'p, C: CryptoProvider> VerifyEnv<'p, C> {
    pub fn new(crypto: &'p C, now: u32) -> Self {
        Self {
            crypto,
            now,
            require_zsk_flag: true,
            scratch: ScratchBuffer::new(),
        }
    }

    pub fn with_zsk_required(mut self, required: bool) -> Self {
        self.require_zsk_flag = required;
        self
    }

    pub fn scratch_mut(&mut self) -> &mut ScratchBuffer {
        &mut self.scratch
    }
}

/// Verify one RRSIG (`sig_idx`) against one DNSKEY (`key_idx`): runs the
/// ordered preconditions followed by the crypto backend call.
pub fn verify_one<C: CryptoProvider>(
    env: &mut VerifyEnv<C>,
    rrset: &RrSet,
    keys: &DnskeySet,
    key_idx: usize,
    sig_idx: u16,
) -> Verdict {
    let sig = rrset.rrsig_rr(sig_idx);

    // 1. RRSIG RDATA length: fixed prefix + at least one signer-name
    // byte, plus a non-empty signature after the signer name.
    if sig.len() < 18 + 1 {
        debug!("rrsig rdata shorter than fixed header");
        return Verdict::Bogus;
    }
    let Some(signer_name) = access::rrsig_get_signer_name(sig) else {
        debug!("rrsig signer name invalid or truncated");
        return Verdict::Bogus;
    };
    let Some(signature) = access::rrsig_get_signature(sig) else {
        debug!("rrsig missing signature block");
        return Verdict::Bogus;
    };
    if signature.is_empty() {
        debug!("rrsig signature block is empty");
        return Verdict::Bogus;
    }

    // 2. ZSK bit.
    if env.require_zsk_flag && !crate::access::dnskey_is_zsk(keys, key_idx) {
        debug!("candidate dnskey lacks zsk flag");
        return Verdict::Bogus;
    }

    // 3. Signer name is a valid wire dname (already checked by
    // rrsig_get_signer_name above via dname::validate).

    // 4. Signer name equals DNSKEY owner name, case-insensitive.
    if !dname::eq_ignore_case(signer_name, keys.owner()) {
        debug!("rrsig signer name does not match dnskey owner");
        return Verdict::Bogus;
    }

    // 5. type_covered matches RRset type.
    if access::rrsig_get_type_covered(sig) != rrset.rtype() {
        debug!("rrsig type_covered does not match rrset type");
        return Verdict::Bogus;
    }

    // 6. Algorithm matches.
    let sig_algo = access::rrsig_get_algo(sig);
    if sig_algo != crate::access::dnskey_get_algo(keys, key_idx) {
        debug!("rrsig algorithm does not match dnskey algorithm");
        return Verdict::Bogus;
    }

    // 7. Key tag matches.
    let key_tag = crate::access::dnskey_calc_keytag(keys, key_idx);
    if access::rrsig_get_key_tag(sig) != key_tag {
        debug!("rrsig key tag does not match dnskey key tag");
        return Verdict::Bogus;
    }

    // 8. labels <= label count of RRset owner.
    if access::rrsig_get_labels(sig) as u16 > dname::label_count(rrset.owner()) as u16 {
        debug!("rrsig labels exceeds rrset owner label count");
        return Verdict::Bogus;
    }

    // 9. Date window.
    let inception = access::rrsig_get_inception(sig);
    let expiration = access::rrsig_get_expiration(sig);
    if !crate::date::is_valid(inception, expiration, env.now) {
        debug!("rrsig outside validity window");
        return Verdict::Bogus;
    }

    let Some(sig_header) = access::rrsig_get_header(sig) else {
        debug!("rrsig header reconstruction failed");
        return Verdict::Bogus;
    };

    match canon::build_signed_message(&mut env.scratch, rrset, sig_header, signer_name.len()) {
        Err(DnssecError::Allocation) => {
            debug!("scratch allocation failed during canonicalization");
            return Verdict::Unchecked;
        }
        Err(_) => return Verdict::Unchecked,
        Ok(Err(_label_count_exceeded)) => {
            debug!("rrsig labels field exceeds owner name label count");
            return Verdict::Bogus;
        }
        Ok(Ok(())) => {}
    }

    let message = env.scratch.as_slice();
    let key_rdata = keys.key_rdata(key_idx);
    let public_key = if key_rdata.len() < 4 {
        &[][..]
    } else {
        &key_rdata[4..]
    };

    match env.crypto.verify(sig_algo, public_key, message, signature) {
        VerifyOutcome::Ok => Verdict::Secure,
        VerifyOutcome::Bad => {
            debug!("signature did not verify");
            Verdict::Bogus
        }
        VerifyOutcome::Unsupported => {
            let err = DnssecError::UnsupportedAlgorithm(sig_algo);
            debug!(error = %err, "backend cannot verify this algorithm");
            Verdict::Unchecked
        }
        VerifyOutcome::InternalErr => {
            let err = DnssecError::BackendInternal;
            debug!(error = %err, "crypto backend reported an internal error");
            Verdict::Unchecked
        }
    }
}
