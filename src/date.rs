//! RRSIG inception/expiration validity under 32-bit signed
//! serial-number arithmetic (RFC 4034 §3.1.5 / RFC 1982).

use std::time::{SystemTime, UNIX_EPOCH};

/// Injectable time source, mirroring
/// `infrastructure/dns/dnssec/crypto.rs::is_time_valid`'s
/// `SystemTime::now()` call, generalized behind a trait so tests can pin
/// `now` without touching the system clock.
pub trait Clock {
    fn now(&self) -> u32;
}

/// Default clock: wall-clock seconds since the Unix epoch, truncated to
/// 32 bits (matches the wire representation of RRSIG inception/expiration).
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u32 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as u32)
            .unwrap_or(0)
    }
}

/// `a` is "before" `b` under RFC 1982 serial arithmetic: true iff the
/// 32-bit signed difference `a - b` is negative. Gives inception/
/// expiration a ~68-year sliding window centered on whichever epoch the
/// comparison is made relative to.
fn serial_before(a: u32, b: u32) -> bool {
    (a.wrapping_sub(b) as i32) < 0
}

/// Validate an RRSIG's time window against `now`: false if
/// `inception > expiration`, `now < inception`, or `now > expiration`.
pub fn is_valid(inception: u32, expiration: u32, now: u32) -> bool {
    if serial_before(expiration, inception) {
        return false;
    }
    if serial_before(now, inception) {
        return false;
    }
    if serial_before(expiration, now) {
        return false;
    }
    true
}
