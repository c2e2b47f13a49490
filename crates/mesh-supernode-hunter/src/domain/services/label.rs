//! Switch label printing, parsing and splicing.

use crate::domain::AddressError;

/// Length of a printed label: four 4-digit hex groups and three dots.
pub const LABEL_TEXT_LEN: usize = 19;

/// Labels longer than this many bits cannot be spliced together.
const MAX_SPLICED_BITS: u32 = 59;

/// Print a label as `xxxx.xxxx.xxxx.xxxx`.
pub fn format_label(label: u64) -> String {
    format!(
        "{:04x}.{:04x}.{:04x}.{:04x}",
        (label >> 48) & 0xffff,
        (label >> 32) & 0xffff,
        (label >> 16) & 0xffff,
        label & 0xffff
    )
}

/// Parse a label printed by [`format_label`].
pub fn parse_label(text: &str) -> Result<u64, AddressError> {
    let bytes = text.as_bytes();
    if bytes.len() != LABEL_TEXT_LEN {
        return Err(AddressError::InvalidLabel(text.to_string()));
    }

    let mut label = 0u64;
    for (i, &c) in bytes.iter().enumerate() {
        if i % 5 == 4 {
            if c != b'.' {
                return Err(AddressError::InvalidLabel(text.to_string()));
            }
            continue;
        }
        let digit = (c as char)
            .to_digit(16)
            .ok_or_else(|| AddressError::InvalidLabel(text.to_string()))?;
        label = (label << 4) | u64::from(digit);
    }
    Ok(label)
}

fn log2(n: u64) -> u32 {
    if n == 0 {
        0
    } else {
        63 - n.leading_zeros()
    }
}

/// Extend the path `via_here` with the hop-relative path `go_here`.
///
/// Used to turn a label reported by a remote node (relative to that node)
/// into a label relative to us. Returns `None` if the result would not fit.
pub fn splice(go_here: u64, via_here: u64) -> Option<u64> {
    let via_bits = log2(via_here);
    if log2(go_here) + via_bits > MAX_SPLICED_BITS {
        return None;
    }
    Some(((go_here ^ 1) << via_bits) ^ via_here)
}
