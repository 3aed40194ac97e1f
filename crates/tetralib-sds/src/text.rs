//! Text coding schemes, \[AI\] 29.5.4 and table 29.29.
//!
//! Only a curated subset of the schemes defined by the standard is
//! implemented: the ISO 8859 parts 1-10 and 13-15, a handful of PC code
//! pages, and UTF-16BE. Decoding and encoding never fail: any scheme outside
//! the subset falls back to ISO 8859-1 (with a warning), and characters a
//! scheme cannot represent become `?`.

use tracing::warn;

use crate::charset;
use crate::pdu::PduBuffer;

/// A text coding scheme identifier (7 bits).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextEncoding(pub u8);

impl TextEncoding {
    pub const PACKED_7BIT: TextEncoding = TextEncoding(0x00);
    pub const ISO8859_1: TextEncoding = TextEncoding(0x01);
    pub const ISO8859_2: TextEncoding = TextEncoding(0x02);
    pub const ISO8859_3: TextEncoding = TextEncoding(0x03);
    pub const ISO8859_4: TextEncoding = TextEncoding(0x04);
    pub const ISO8859_5: TextEncoding = TextEncoding(0x05);
    pub const ISO8859_6: TextEncoding = TextEncoding(0x06);
    pub const ISO8859_7: TextEncoding = TextEncoding(0x07);
    pub const ISO8859_8: TextEncoding = TextEncoding(0x08);
    pub const ISO8859_9: TextEncoding = TextEncoding(0x09);
    pub const ISO8859_10: TextEncoding = TextEncoding(0x0A);
    pub const ISO8859_13: TextEncoding = TextEncoding(0x0B);
    pub const ISO8859_14: TextEncoding = TextEncoding(0x0C);
    pub const ISO8859_15: TextEncoding = TextEncoding(0x0D);
    pub const CODE_PAGE_437: TextEncoding = TextEncoding(0x0E);
    pub const CODE_PAGE_737: TextEncoding = TextEncoding(0x0F);
    pub const CODE_PAGE_850: TextEncoding = TextEncoding(0x10);
    pub const CODE_PAGE_852: TextEncoding = TextEncoding(0x11);
    pub const CODE_PAGE_855: TextEncoding = TextEncoding(0x12);
    pub const CODE_PAGE_860: TextEncoding = TextEncoding(0x13);
    pub const CODE_PAGE_861: TextEncoding = TextEncoding(0x14);
    pub const CODE_PAGE_863: TextEncoding = TextEncoding(0x15);
    pub const CODE_PAGE_865: TextEncoding = TextEncoding(0x16);
    pub const CODE_PAGE_866: TextEncoding = TextEncoding(0x17);
    pub const CODE_PAGE_869: TextEncoding = TextEncoding(0x18);
    pub const UTF16BE: TextEncoding = TextEncoding(0x1A);

    /// Bits used per character in this coding scheme.
    pub fn bits_per_char(self) -> usize {
        if self == TextEncoding::PACKED_7BIT {
            7
        } else {
            8
        }
    }
}

/// Length in bits of an encoded text with `chars` characters.
pub fn text_bits(encoding: TextEncoding, chars: usize) -> usize {
    chars * encoding.bits_per_char()
}

/// Length in bytes of an encoded text with `chars` characters.
pub fn text_bytes(encoding: TextEncoding, chars: usize) -> usize {
    (text_bits(encoding, chars) + 7) / 8
}

/// Number of whole characters that fit into `bits`.
pub fn chars_in_bits(encoding: TextEncoding, bits: usize) -> usize {
    bits / encoding.bits_per_char()
}

/// Decode payload text with the given coding scheme.
///
/// Never fails: schemes outside the supported subset decode as ISO 8859-1
/// with a warning so an unknown scheme cannot make a whole message
/// unreadable.
pub fn decode_payload_text(encoding: TextEncoding, bytes: &[u8]) -> String {
    if encoding == TextEncoding::UTF16BE {
        return decode_utf16be(bytes);
    }
    let effective = fall_back_if_unsupported(encoding);
    bytes
        .iter()
        .map(|&b| charset::decode_byte(effective, b))
        .collect()
}

/// Append payload text in the given coding scheme to `buf`.
///
/// Unrepresentable characters are encoded as `?`; schemes outside the
/// supported subset are encoded as ISO 8859-1 with a warning.
pub fn encode_payload_text(buf: &mut PduBuffer, text: &str, encoding: TextEncoding) {
    if encoding == TextEncoding::UTF16BE {
        encode_utf16be(buf, text);
        return;
    }
    let effective = fall_back_if_unsupported(encoding);
    for c in text.chars() {
        buf.put_u8(charset::encode_char(effective, c).unwrap_or(b'?'));
    }
}

/// Slice `text` into the maximal character prefixes whose encoded form fits
/// within `max_bits`. Used to fragment long messages into concatenated
/// parts. Empty input yields no parts.
pub fn split_to_max_bits(encoding: TextEncoding, max_bits: usize, text: &str) -> Vec<String> {
    let max_chars = chars_in_bits(encoding, max_bits);
    if text.is_empty() || max_chars == 0 {
        return Vec::new();
    }
    text.chars()
        .collect::<Vec<_>>()
        .chunks(max_chars)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

/// Length of the operational-tactical address (OPTA) block some networks
/// prepend to message text.
const OPTA_LENGTH: usize = 24;

/// Split a leading OPTA block off the given text.
///
/// An OPTA is a fixed 24-character block containing a `#`. Returns the OPTA
/// (or an empty string) and the remaining text.
pub fn split_leading_opta(s: &str) -> (&str, &str) {
    if s.len() < OPTA_LENGTH || !s.is_char_boundary(OPTA_LENGTH) {
        return ("", s);
    }
    let (opta, tail) = s.split_at(OPTA_LENGTH);
    if opta.contains('#') {
        (opta, tail)
    } else {
        ("", s)
    }
}

/// Digit count of a trailing individual TETRA subscriber identity.
const ITSI_LENGTH: usize = 16;

/// Split a trailing ITSI off the given text.
///
/// Some terminals append the sender's 16-digit ITSI after a two-byte
/// separator (`\r\r` or `\x1A\x00`). Returns the remaining text and the ITSI
/// (or an empty string).
pub fn split_trailing_itsi(s: &str) -> (&str, &str) {
    if s.len() < ITSI_LENGTH + 2 {
        return (s, "");
    }
    let split = s.len() - ITSI_LENGTH;
    if !s.is_char_boundary(split) || !s.is_char_boundary(split - 2) {
        return (s, "");
    }
    let itsi = &s[split..];
    if !itsi.bytes().all(|b| b.is_ascii_digit()) {
        return (s, "");
    }
    match &s[split - 2..split] {
        "\r\r" | "\x1a\x00" => (&s[..split - 2], itsi),
        _ => (s, ""),
    }
}

fn fall_back_if_unsupported(encoding: TextEncoding) -> TextEncoding {
    if charset::supports(encoding) {
        encoding
    } else {
        warn!(
            scheme = encoding.0,
            "text coding scheme not supported, using ISO 8859-1 as fallback"
        );
        TextEncoding::ISO8859_1
    }
}

fn decode_utf16be(bytes: &[u8]) -> String {
    if bytes.len() % 2 != 0 {
        warn!("UTF-16BE payload has odd length, dropping trailing byte");
    }
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
        .collect();
    String::from_utf16_lossy(&units)
}

fn encode_utf16be(buf: &mut PduBuffer, text: &str) {
    for unit in text.encode_utf16() {
        buf.put_slice(&unit.to_be_bytes());
    }
}
