// src/text/utf8.rs
//
// Byte-level UTF-8 helpers. Only the shortest encoding of a codepoint is
// accepted; surrogates (0xD800..=0xDFFF) and values past 0x10FFFF are
// rejected.
//
// codepoint range      1st byte  2nd byte  3rd byte  4th byte
// 000000 - 00007F      0xxxxxxx
// 000080 - 0007FF      110xxxxx  10xxxxxx
// 000800 - 00FFFF      1110xxxx  10xxxxxx  10xxxxxx
// 010000 - 10FFFF      11110xxx  10xxxxxx  10xxxxxx  10xxxxxx

use thiserror::Error;

pub const REPLACEMENT: u32 = 0xFFFD;
pub const MAX_CODEPOINT: u32 = 0x10FFFF;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Utf8Error {
    #[error("invalid lead byte 0x{0:02x}")]
    InvalidLeadByte(u8),

    #[error("sequence needs {needed} bytes, only {available} available")]
    Truncated { needed: usize, available: usize },

    #[error("invalid continuation byte 0x{0:02x}")]
    InvalidContinuation(u8),

    #[error("overlong encoding of U+{0:04X}")]
    Overlong(u32),

    #[error("invalid codepoint 0x{0:x}")]
    InvalidCodepoint(u32),
}

pub fn is_valid_codepoint(cp: u32) -> bool {
    cp <= MAX_CODEPOINT && !(0xD800..=0xDFFF).contains(&cp)
}

fn is_continuation(b: u8) -> bool {
    b & 0b1100_0000 == 0b1000_0000
}

/// Number of bytes in a sequence starting with `lead`.
pub fn lead_byte_len(lead: u8) -> Result<usize, Utf8Error> {
    match lead {
        0x00..=0x7F => Ok(1),
        0xC0..=0xDF => Ok(2),
        0xE0..=0xEF => Ok(3),
        0xF0..=0xF7 => Ok(4),
        _ => Err(Utf8Error::InvalidLeadByte(lead)),
    }
}

/// Decodes the character at the start of `bytes`, returning it together with
/// the number of bytes it occupies.
pub fn decode(bytes: &[u8]) -> Result<(char, usize), Utf8Error> {
    let lead = *bytes.first().ok_or(Utf8Error::Truncated { needed: 1, available: 0 })?;
    let len = lead_byte_len(lead)?;
    if len > bytes.len() {
        return Err(Utf8Error::Truncated { needed: len, available: bytes.len() });
    }

    const LEAD_MASK: [u8; 4] = [0b0111_1111, 0b0001_1111, 0b0000_1111, 0b0000_0111];
    let mut cp = u32::from(lead & LEAD_MASK[len - 1]);
    for &b in &bytes[1..len] {
        if !is_continuation(b) {
            return Err(Utf8Error::InvalidContinuation(b));
        }
        cp = (cp << 6) | u32::from(b & 0b0011_1111);
    }

    let shortest = match cp {
        0..=0x7F => 1,
        0x80..=0x7FF => 2,
        0x800..=0xFFFF => 3,
        _ => 4,
    };
    if shortest != len {
        return Err(Utf8Error::Overlong(cp));
    }
    if !is_valid_codepoint(cp) {
        return Err(Utf8Error::InvalidCodepoint(cp));
    }
    // is_valid_codepoint rules out every value char::from_u32 rejects
    char::from_u32(cp).map(|c| (c, len)).ok_or(Utf8Error::InvalidCodepoint(cp))
}

/// Writes the encoding of `cp` into `buf`, substituting U+FFFD for values
/// that are not codepoints.
pub fn encode(cp: u32, buf: &mut [u8; 4]) -> &[u8] {
    let cp = if is_valid_codepoint(cp) { cp } else { REPLACEMENT };
    let len = if cp < 0x80 {
        buf[0] = cp as u8;
        1
    } else if cp < 0x800 {
        buf[0] = 0b1100_0000 | ((cp >> 6) & 0b0001_1111) as u8;
        buf[1] = 0b1000_0000 | (cp & 0b0011_1111) as u8;
        2
    } else if cp < 0x10000 {
        buf[0] = 0b1110_0000 | ((cp >> 12) & 0b0000_1111) as u8;
        buf[1] = 0b1000_0000 | ((cp >> 6) & 0b0011_1111) as u8;
        buf[2] = 0b1000_0000 | (cp & 0b0011_1111) as u8;
        3
    } else {
        buf[0] = 0b1111_0000 | ((cp >> 18) & 0b0000_0111) as u8;
        buf[1] = 0b1000_0000 | ((cp >> 12) & 0b0011_1111) as u8;
        buf[2] = 0b1000_0000 | ((cp >> 6) & 0b0011_1111) as u8;
        buf[3] = 0b1000_0000 | (cp & 0b0011_1111) as u8;
        4
    };
    &buf[..len]
}

/// Counts the characters in `bytes`, validating the whole sequence.
pub fn count(bytes: &[u8]) -> Result<usize, Utf8Error> {
    let mut chars = 0;
    let mut rest = bytes;
    while !rest.is_empty() {
        let (_, len) = decode(rest)?;
        rest = &rest[len..];
        chars += 1;
    }
    Ok(chars)
}

/// Byte offset of the character `n` characters after the start of `bytes`.
/// Expects already validated input; stops at the end of `bytes` instead of
/// walking past it.
pub fn advance(bytes: &[u8], n: usize) -> usize {
    let mut offset = 0;
    for _ in 0..n {
        let Some(&lead) = bytes.get(offset) else { break };
        offset += lead_byte_len(lead).unwrap_or(1);
    }
    offset.min(bytes.len())
}
