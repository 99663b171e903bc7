//! Text encodings for reading and persisting documents.
//!
//! Loading sniffs a byte order mark and decodes accordingly, falling back to
//! UTF-8. Persisting encodes with the document's configured [`Encoding`].

use crate::error::{IniError, IniResult};

const BOM_UTF8: &[u8] = &[0xEF, 0xBB, 0xBF];
const BOM_UTF16_LE: &[u8] = &[0xFF, 0xFE];
const BOM_UTF16_BE: &[u8] = &[0xFE, 0xFF];

/// The byte order mark as a decoded character
pub const BOM_CHAR: char = '\u{feff}';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    /// UTF-8 without a byte order mark
    #[default]
    Utf8,
    /// UTF-8 preceded by `EF BB BF`
    Utf8Bom,
    /// UTF-16 little endian with BOM
    Utf16Le,
    /// UTF-16 big endian with BOM
    Utf16Be,
}

impl Encoding {
    /// Guess the encoding of raw bytes from their byte order mark
    pub fn detect(bytes: &[u8]) -> Self {
        if bytes.starts_with(BOM_UTF8) {
            Encoding::Utf8Bom
        } else if bytes.starts_with(BOM_UTF16_LE) {
            Encoding::Utf16Le
        } else if bytes.starts_with(BOM_UTF16_BE) {
            Encoding::Utf16Be
        } else {
            Encoding::Utf8
        }
    }

    /// Encode text, writing a byte order mark where the encoding has one
    pub fn encode(&self, text: &str) -> Vec<u8> {
        match self {
            Encoding::Utf8 => text.as_bytes().to_vec(),
            Encoding::Utf8Bom => {
                let mut bytes = Vec::with_capacity(text.len() + BOM_UTF8.len());
                bytes.extend_from_slice(BOM_UTF8);
                bytes.extend_from_slice(text.as_bytes());
                bytes
            }
            Encoding::Utf16Le => {
                let mut bytes = BOM_UTF16_LE.to_vec();
                for unit in text.encode_utf16() {
                    bytes.extend_from_slice(&unit.to_le_bytes());
                }
                bytes
            }
            Encoding::Utf16Be => {
                let mut bytes = BOM_UTF16_BE.to_vec();
                for unit in text.encode_utf16() {
                    bytes.extend_from_slice(&unit.to_be_bytes());
                }
                bytes
            }
        }
    }
}

/// Decode bytes, honoring and stripping a byte order mark.
///
/// Input without a BOM is read as UTF-8; invalid sequences become U+FFFD.
pub fn decode(bytes: &[u8]) -> IniResult<String> {
    match Encoding::detect(bytes) {
        Encoding::Utf8 => Ok(String::from_utf8_lossy(bytes).into_owned()),
        Encoding::Utf8Bom => Ok(String::from_utf8_lossy(&bytes[BOM_UTF8.len()..]).into_owned()),
        Encoding::Utf16Le => decode_utf16(&bytes[BOM_UTF16_LE.len()..], u16::from_le_bytes),
        Encoding::Utf16Be => decode_utf16(&bytes[BOM_UTF16_BE.len()..], u16::from_be_bytes),
    }
}

fn decode_utf16(body: &[u8], unit: fn([u8; 2]) -> u16) -> IniResult<String> {
    if body.len() % 2 != 0 {
        return Err(IniError::encoding(format!(
            "UTF-16 body has an odd length of {} bytes",
            body.len()
        )));
    }

    let units = body
        .chunks_exact(2)
        .map(|pair| unit([pair[0], pair[1]]))
        .collect::<Vec<u16>>();

    Ok(char::decode_utf16(units)
        .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect())
}
