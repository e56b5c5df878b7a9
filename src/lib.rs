//! DNSSEC signature-verification core.
//!
//! Authenticates an RRset against a DNSKEY set, or a DS RRset against
//! the DNSKEY set it delegates to. No message parsing, no resolution,
//! no caching — callers own the wire buffers and hand in already-framed
//! resource-record slices; everything above the RRset line (transport,
//! cache, API) is someone else's concern.
//!
//! The public surface never returns a `Result` — every failure mode a
//! caller can hit, including internal crypto-backend errors and scratch
//! allocation failures, collapses into [`Verdict::Unchecked`]. Structured
//! diagnostics for *why* a verdict came out the way it did are emitted as
//! `tracing` events rather than carried in the return value.

pub mod access;
pub mod canon;
pub mod crypto;
pub mod date;
pub mod digest;
pub mod dname;
pub mod driver;
pub mod error;
pub mod keytag;
pub mod rrset;
pub mod scratch;
pub mod verify;

pub use crypto::{CryptoProvider, RingCryptoProvider, VerifyOutcome};
pub use date::{Clock, SystemClock};
pub use driver::{
    dnskey_verify_rrset, dnskey_verify_rrset_sig, dnskeyset_verify_rrset,
    dnskeyset_verify_rrset_sig, ds_verify_dnskeyset,
};
pub use error::DnssecError;
pub use rrset::{DnskeySet, RrSet};
pub use verify::VerifyEnv;

/// The outcome of any verification call in this crate: secure, bogus, or
/// unchecked. There is deliberately no `Bogus(reason)` variant carrying
/// structured detail — that detail is a `tracing` event at the point of
/// rejection, not part of the type callers branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// At least one RRSIG verified against a key authorized to sign it.
    Secure,
    /// Every attempt failed a structural, semantic, or cryptographic
    /// check. Also the verdict for "nothing to try" (no RRSIGs, or no
    /// candidate keys).
    Bogus,
    /// No attempt could be completed to a definite answer — unsupported
    /// algorithm, allocation failure, or other internal backend error.
    /// Never produced by a clean structural or cryptographic rejection.
    Unchecked,
}
