//! The base-32 geohash alphabet: digits and lowercase letters minus `a`, `i`,
//! `l` and `o`.
//!
//! Decoding folds ASCII uppercase to lowercase, so `"9Q8YYK"` and `"9q8yyk"`
//! name the same cell. Encoding always produces lowercase.

use crate::error::{self, Error};

/// Number of bits carried by one geohash character.
pub const BITS_PER_CHAR: u32 = 5;

/// Symbols indexed by their 5-bit value.
pub const ALPHABET: &[u8; 32] = b"0123456789bcdefghjkmnpqrstuvwxyz";

/// Sentinel marking an ASCII code point outside the alphabet.
const INVALID: u8 = 0xff;

/// Reverse lookup from ASCII code point to 5-bit value.
const DECODE: [u8; 128] = {
    let mut table = [INVALID; 128];
    let mut value = 0;
    while value < ALPHABET.len() {
        table[ALPHABET[value] as usize] = value as u8;
        value += 1;
    }
    table
};

/// ASCII symbol for the low five bits of `value`.
#[inline]
pub(crate) fn symbol(value: u8) -> u8 {
    ALPHABET[usize::from(value & 0x1f)]
}

/// 5-bit value of a symbol already known to be in the alphabet.
#[inline]
pub(crate) fn symbol_value(symbol: u8) -> u8 {
    DECODE[usize::from(symbol & 0x7f)] & 0x1f
}

/// Map the low five bits of `value` to their alphabet symbol.
#[inline]
pub fn bits_to_char(value: u8) -> char {
    char::from(symbol(value))
}

/// Map an alphabet symbol to its 5-bit value.
///
/// Uppercase ASCII letters are folded before lookup; anything else outside the
/// alphabet is an [`Error::InvalidCharacter`].
#[inline]
pub fn char_to_bits(c: char) -> error::Result<u8> {
    if !c.is_ascii() {
        return Err(Error::InvalidCharacter(c));
    }
    match DECODE[usize::from(c.to_ascii_lowercase() as u8)] {
        INVALID => Err(Error::InvalidCharacter(c)),
        value => Ok(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bijection() -> error::Result<()> {
        for v in 0u8..32 {
            assert_eq!(char_to_bits(bits_to_char(v))?, v);
        }
        Ok(())
    }

    #[test]
    fn uppercase_folds() -> error::Result<()> {
        for &symbol in ALPHABET {
            let lower = char::from(symbol);
            assert_eq!(char_to_bits(lower.to_ascii_uppercase())?, char_to_bits(lower)?);
        }
        Ok(())
    }

    #[test]
    fn excluded_symbols() {
        for c in ['a', 'i', 'l', 'o', 'A', 'I', 'L', 'O', '@', '_', ' ', 'é', '\u{7f}'] {
            assert_eq!(char_to_bits(c), Err(Error::InvalidCharacter(c)));
        }
    }

    #[test]
    fn symbols_round_trip() {
        for &sym in ALPHABET {
            assert_eq!(symbol(symbol_value(sym)), sym);
        }
    }

    #[test]
    fn high_bits_are_ignored() {
        assert_eq!(bits_to_char(0b1110_0000), '0');
        assert_eq!(bits_to_char(0xff), 'z');
    }
}
