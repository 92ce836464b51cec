//! Byte classes used by the scanner. All predicates are total over `u8`.

/// ASCII decimal digit.
#[inline]
pub fn is_digit(c: u8) -> bool {
    c.is_ascii_digit()
}

/// ASCII letter or underscore: the bytes an identifier may start with.
#[inline]
pub fn is_alpha(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_'
}

#[inline]
pub fn is_alpha_numeric(c: u8) -> bool {
    is_alpha(c) || is_digit(c)
}
