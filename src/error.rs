use thiserror::Error;

/// Internal failure that maps to [`crate::Verdict::Unchecked`].
///
/// Never returned from the public `dnskey*_verify_rrset*` entry points —
/// those return a bare [`crate::Verdict`] — but used internally by the
/// crypto backend and the scratch buffer to distinguish "try again, do not
/// cache" failures from structural/cryptographic rejection (`Bogus`).
#[derive(Error, Debug)]
pub enum DnssecError {
    #[error("scratch buffer allocation failed")]
    Allocation,

    #[error("cryptographic backend reported an internal error")]
    BackendInternal,

    #[error("unsupported algorithm reached verification after commit: {0}")]
    UnsupportedAlgorithm(u8),
}
