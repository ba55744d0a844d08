//! Numeric argument parsing
//!
//! `[+|-]digits`, where digits are decimal, `0x` hex or `0b` binary.
//! The result must fit a signed integer of the requested width.

use super::ConsoleError;

/// Width of the signed target field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntWidth {
    I8,
    I16,
    I32,
    I64,
}

impl IntWidth {
    /// Width from a size in bytes (1, 2, 4 or 8)
    pub fn from_bytes(bytes: usize) -> Option<Self> {
        match bytes {
            1 => Some(Self::I8),
            2 => Some(Self::I16),
            4 => Some(Self::I32),
            8 => Some(Self::I64),
            _ => None,
        }
    }

    pub fn min(self) -> i64 {
        match self {
            Self::I8 => i8::MIN as i64,
            Self::I16 => i16::MIN as i64,
            Self::I32 => i32::MIN as i64,
            Self::I64 => i64::MIN,
        }
    }

    pub fn max(self) -> i64 {
        match self {
            Self::I8 => i8::MAX as i64,
            Self::I16 => i16::MAX as i64,
            Self::I32 => i32::MAX as i64,
            Self::I64 => i64::MAX,
        }
    }
}

/// Parse `text` into a signed integer that fits `width`.
///
/// Errors: `MissingArg` for empty input, `InvalidValue` for anything that
/// is not a numeral, `OutOfRange` when the value does not fit.
pub fn parse_signed(text: &str, width: IntWidth) -> Result<i64, ConsoleError> {
    let bytes = text.as_bytes();
    if bytes.is_empty() {
        return Err(ConsoleError::MissingArg);
    }

    let (negative, rest) = match bytes[0] {
        b'-' => (true, &bytes[1..]),
        b'+' => (false, &bytes[1..]),
        _ => (false, bytes),
    };

    let (radix, digits) = match rest {
        [b'0', b'x' | b'X', tail @ ..] => (16, tail),
        [b'0', b'b' | b'B', tail @ ..] => (2, tail),
        _ => (10, rest),
    };

    if digits.is_empty() {
        return Err(ConsoleError::InvalidValue);
    }

    // Magnitude saturates once it can no longer fit any width; keep scanning
    // so that garbage after a huge number is still reported as InvalidValue.
    let mut magnitude: u64 = 0;
    let mut too_big = false;
    for &c in digits {
        let digit = (c as char).to_digit(radix).ok_or(ConsoleError::InvalidValue)?;
        match magnitude
            .checked_mul(radix as u64)
            .and_then(|m| m.checked_add(digit as u64))
        {
            Some(m) => magnitude = m,
            None => too_big = true,
        }
    }
    if too_big {
        return Err(ConsoleError::OutOfRange);
    }

    let value = if negative {
        -(magnitude as i128)
    } else {
        magnitude as i128
    };

    if value < width.min() as i128 || value > width.max() as i128 {
        return Err(ConsoleError::OutOfRange);
    }

    Ok(value as i64)
}

/// Signed integer types an argument can be parsed into
pub trait SignedArg: Sized {
    const WIDTH: IntWidth;

    /// Conversion from a value already checked against `WIDTH`
    fn from_checked(value: i64) -> Self;
}

macro_rules! signed_arg {
    ($($ty:ty => $width:ident),*) => {$(
        impl SignedArg for $ty {
            const WIDTH: IntWidth = IntWidth::$width;

            fn from_checked(value: i64) -> Self {
                value as $ty
            }
        }
    )*};
}

signed_arg!(i8 => I8, i16 => I16, i32 => I32, i64 => I64);

/// Parse an argument straight into `T`.
///
/// ```
/// use rust_libcli::console::numeric::parse_arg;
///
/// assert_eq!(parse_arg::<i16>("-123"), Ok(-123));
/// ```
pub fn parse_arg<T: SignedArg>(text: &str) -> Result<T, ConsoleError> {
    parse_signed(text, T::WIDTH).map(T::from_checked)
}
