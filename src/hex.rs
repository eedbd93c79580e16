use crate::encoder::WORD_BITS;

/// Placeholder written in place of a hex word that could not be formatted.
pub const HEX_ERROR: &str = "ERROR";

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum HexError {
    #[error("expected 16 bits, got {0}")]
    Length(usize),
    #[error("invalid binary digit {0:?}")]
    Digit(char),
}

/// Render a 16-character binary string as four uppercase hex digits.
pub fn bits_to_hex(bits: &str) -> Result<String, HexError> {
    let len = bits.chars().count();
    if len != WORD_BITS as usize {
        return Err(HexError::Length(len));
    }
    if let Some(c) = bits.chars().find(|c| !matches!(c, '0' | '1')) {
        return Err(HexError::Digit(c));
    }
    let val = u16::from_str_radix(bits, 2).map_err(|_| HexError::Length(len))?;
    Ok(format!("{val:04X}"))
}

/// Like [`bits_to_hex`] but yields [`HEX_ERROR`] instead of failing.
pub fn format_or_marker(bits: &str) -> String {
    bits_to_hex(bits).unwrap_or_else(|_| HEX_ERROR.to_string())
}
