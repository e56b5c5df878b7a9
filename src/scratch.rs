use crate::error::DnssecError;

/// Append-only scratch region reused across verification calls.
///
/// Mirrors the subset of spec's "clear/write/flip/current-cursor/limit"
/// primitives that a pure-append canonicalizer needs: nothing in this
/// crate ever reads past its own write cursor, so "flip" and "limit"
/// collapse into `as_slice()` returning exactly the written prefix.
///
/// Contents are considered garbage on entry and undefined again once the
/// caller drops or clears the buffer — callers must not assume zeroing.
#[derive(Debug, Default)]
pub struct ScratchBuffer {
    buf: Vec<u8>,
}

impl ScratchBuffer {
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            buf: Vec::with_capacity(cap),
        }
    }

    /// Reset the cursor to zero without releasing the underlying allocation.
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    pub fn position(&self) -> usize {
        self.buf.len()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    /// Append bytes, reserving capacity fallibly so an OOM condition
    /// surfaces as [`DnssecError::Allocation`] rather than aborting the
    /// process.
    pub fn write(&mut self, bytes: &[u8]) -> Result<(), DnssecError> {
        self.buf
            .try_reserve(bytes.len())
            .map_err(|_| DnssecError::Allocation)?;
        self.buf.extend_from_slice(bytes);
        Ok(())
    }

    pub fn write_u8(&mut self, b: u8) -> Result<(), DnssecError> {
        self.write(&[b])
    }

    pub fn write_u16_be(&mut self, v: u16) -> Result<(), DnssecError> {
        self.write(&v.to_be_bytes())
    }

    pub fn write_u32_be(&mut self, v: u32) -> Result<(), DnssecError> {
        self.write(&v.to_be_bytes())
    }

    /// Mutable access to the bytes written so far — used for in-place
    /// lowering of the signer name and embedded RDATA names.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.buf
    }
}
