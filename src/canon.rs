//! Builds the exact byte sequence an RRSIG covers, per RFC 4034 §6:
//! canonical RR ordering and dedup, canonical owner name (including
//! wildcard synthesis), and type-specific RDATA name lowering.

use crate::access;
use crate::dname;
use crate::error::DnssecError;
use crate::rrset::RrSet;
use crate::scratch::ScratchBuffer;

/// Fatal structural error: the RRSIG's `labels` field names more labels
/// than the RRset's owner name actually has.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelCountExceeded;

/// Build the canonical signed message for `sig` (an RRSIG rdata slice)
/// over `rrset`'s data RRs into `scratch`, which is cleared first.
///
/// Returns `Err(LabelCountExceeded)` for the one structural-but-not-crypto
/// failure this step can hit; allocation failure surfaces as
/// `DnssecError::Allocation` via the outer `Result`.
pub fn build_signed_message(
    scratch: &mut ScratchBuffer,
    rrset: &RrSet,
    sig_header: &[u8],
    signer_name_len: usize,
) -> Result<Result<(), LabelCountExceeded>, DnssecError> {
    scratch.clear();

    // Sig header (fixed 18 bytes + signer name), signer name lowered in
    // place within scratch only.
    scratch.write(sig_header)?;
    let header_start = 0usize;
    lowercase_signer_name(scratch, header_start, signer_name_len);

    let rrsig_labels = sig_header[3];
    let owner_labels = dname::label_count(rrset.owner());

    let canonical_owner: Vec<u8> = if rrsig_labels as u16 == owner_labels as u16 {
        let mut owner = rrset.owner().to_vec();
        dname::lowercase_in_place(&mut owner);
        owner
    } else if (rrsig_labels as u16) < owner_labels as u16 {
        let strip = (owner_labels - rrsig_labels) as usize;
        let mut suffix = dname::strip_leftmost_labels(rrset.owner(), strip).to_vec();
        dname::lowercase_in_place(&mut suffix);
        let mut owner = Vec::with_capacity(2 + suffix.len());
        owner.extend_from_slice(b"\x01*");
        owner.extend_from_slice(&suffix);
        owner
    } else {
        return Ok(Err(LabelCountExceeded));
    };

    let original_ttl = access::rrsig_get_original_ttl(sig_header);
    let sorted = canonical_sort_dedup(rrset);

    for idx in sorted {
        let rdata = rrset.data_rr(idx);
        scratch.write(&canonical_owner)?;
        scratch.write_u16_be(rrset.rtype())?;
        scratch.write_u16_be(rrset.rclass())?;
        scratch.write_u32_be(original_ttl)?;
        scratch.write_u16_be(rdata.len() as u16)?;
        let rdata_start = scratch.position();
        scratch.write(rdata)?;
        lower_rdata_names(scratch.as_mut_slice(), rdata_start, rdata.len(), rrset.rtype());
    }

    Ok(Ok(()))
}

fn lowercase_signer_name(scratch: &mut ScratchBuffer, header_start: usize, signer_name_len: usize) {
    let name_start = header_start + 18;
    let name_end = name_start + signer_name_len;
    let buf = scratch.as_mut_slice();
    if name_end <= buf.len() {
        dname::lowercase_in_place(&mut buf[name_start..name_end]);
    }
}

/// RFC 4034 §6.3 canonical ordering: data RRs sorted by RDATA as unsigned
/// byte strings, bitwise-equal duplicates removed. Implemented by
/// swapping index slots only — never touches the underlying RR bytes.
fn canonical_sort_dedup(rrset: &RrSet) -> Vec<u16> {
    let mut idx: Vec<u16> = rrset.data_indices().collect();
    idx.sort_by(|&a, &b| rrset.data_rr(a).cmp(rrset.data_rr(b)));
    idx.dedup_by(|&mut a, &mut b| rrset.data_rr(a) == rrset.data_rr(b));
    idx
}

/// Type-specific RDATA name-lowering table. Operates on
/// `buf[rdata_start..rdata_start + rdata_len]` in place. Every offset is
/// range-checked against the surviving length first; an insufficiently
/// long RR is left untouched rather than erroring.
fn lower_rdata_names(buf: &mut [u8], rdata_start: usize, rdata_len: usize, rtype: u16) {
    let end = rdata_start + rdata_len;
    if end > buf.len() {
        return;
    }
    let rdata = &mut buf[rdata_start..end];

    match rtype {
        // NS, MD, MF, CNAME, MB, MG, MR, PTR, DNAME, NXT, NSEC
        2 | 3 | 4 | 5 | 7 | 8 | 9 | 12 | 39 | 30 | 47 => {
            lower_name_at(rdata, 0);
        }
        // SOA, MINFO, RP: two adjacent names
        6 | 14 | 17 => {
            if let Some(n1) = name_len_at(rdata, 0) {
                lower_name_at(rdata, 0);
                lower_name_at(rdata, n1);
            }
        }
        // MX, RT, AFSDB, KX: 2-byte preference then name
        15 | 21 | 18 | 36 => {
            lower_name_at(rdata, 2);
        }
        // SRV: 6 bytes (prio/weight/port) then name
        33 => {
            lower_name_at(rdata, 6);
        }
        // PX: 2 bytes then two adjacent names
        26 => {
            if rdata.len() >= 2 {
                if let Some(n1) = name_len_at(rdata, 2) {
                    lower_name_at(rdata, 2);
                    lower_name_at(rdata, 2 + n1);
                }
            }
        }
        // SIG, RRSIG: 18 fixed bytes then signer name
        24 | 46 => {
            lower_name_at(rdata, 18);
        }
        // HINFO: two successive character-strings, lowercase their content
        13 => lower_hinfo(rdata),
        // NAPTR: 4 bytes, three character-strings, then a name
        35 => lower_naptr(rdata),
        _ => {}
    }
}

fn name_len_at(rdata: &[u8], offset: usize) -> Option<usize> {
    rdata.get(offset..).and_then(dname::validate)
}

fn lower_name_at(rdata: &mut [u8], offset: usize) {
    if let Some(len) = rdata.get(offset..).and_then(dname::validate) {
        dname::lowercase_in_place(&mut rdata[offset..offset + len]);
    }
}

fn char_string_len_at(rdata: &[u8], offset: usize) -> Option<usize> {
    let len = *rdata.get(offset)? as usize;
    if offset + 1 + len > rdata.len() {
        None
    } else {
        Some(1 + len)
    }
}

fn lower_hinfo(rdata: &mut [u8]) {
    let mut pos = 0usize;
    for _ in 0..2 {
        let Some(len) = rdata.get(pos).copied() else {
            return;
        };
        let len = len as usize;
        let end = pos + 1 + len;
        if end > rdata.len() {
            return;
        }
        for b in &mut rdata[pos + 1..end] {
            b.make_ascii_lowercase();
        }
        pos = end;
    }
}

fn lower_naptr(rdata: &mut [u8]) {
    if rdata.len() < 4 {
        return;
    }
    let mut pos = 4usize;
    for _ in 0..3 {
        match char_string_len_at(rdata, pos) {
            Some(len) => pos += len,
            None => return,
        }
    }
    lower_name_at(rdata, pos);
}
