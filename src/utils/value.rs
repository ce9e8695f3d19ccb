//! Typed value parsers.
//!
//! Each parser takes the value fragment of one spec line (already stripped
//! of surrounding whitespace) and must consume all of it. Any character
//! left over is an error, there is no partial consumption.

use crate::registry::{CcAlgorithm, CcAlgorithmLookup};
use crate::spec::error::ValueError;
use crate::spec::types::ConnectionId;
use std::path::PathBuf;

/// Largest value accepted by [`parse_bounded_int`] (2^27 - 1)
pub const MAX_BOUNDED_INT: u64 = 0x7ff_ffff;

/// Parse an unsigned base-10 integer.
///
/// # Examples
/// ```
/// use simspec::utils::value::parse_u64;
///
/// assert_eq!(parse_u64("1000").unwrap(), 1000);
/// assert!(parse_u64(" 1000").is_err());
/// assert!(parse_u64("-1").is_err());
/// assert!(parse_u64("").is_err());
/// ```
pub fn parse_u64(text: &str) -> Result<u64, ValueError> {
    let mut value: u64 = 0;
    let mut digits = 0;

    for c in text.chars() {
        let Some(d) = c.to_digit(10) else {
            return Err(ValueError::UnexpectedChar(c));
        };
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u64::from(d)))
            .ok_or(ValueError::Overflow)?;
        digits += 1;
    }

    if digits == 0 {
        return Err(ValueError::MissingDigits);
    }
    Ok(value)
}

/// Parse an unsigned integer no larger than [`MAX_BOUNDED_INT`]
pub fn parse_bounded_int(text: &str) -> Result<i32, ValueError> {
    let value = parse_u64(text)?;
    if value > MAX_BOUNDED_INT {
        return Err(ValueError::OutOfRange {
            value,
            max: MAX_BOUNDED_INT,
        });
    }
    // Cap is below i32::MAX.
    Ok(value as i32)
}

/// Parse a fixed-point decimal of the form `digits ('.' digits)?`.
///
/// # Examples
/// ```
/// use simspec::utils::value::parse_decimal;
///
/// assert_eq!(parse_decimal("10").unwrap(), 10.0);
/// assert!((parse_decimal("0.25").unwrap() - 0.25).abs() < 1e-12);
/// assert!(parse_decimal("1e3").is_err());
/// ```
pub fn parse_decimal(text: &str) -> Result<f64, ValueError> {
    let (int_part, frac_part) = match text.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (text, None),
    };

    let mut value = 0.0;
    let mut int_digits = 0;
    for c in int_part.chars() {
        let d = c.to_digit(10).ok_or(ValueError::UnexpectedChar(c))?;
        value = value * 10.0 + f64::from(d);
        int_digits += 1;
    }
    if int_digits == 0 {
        return Err(ValueError::MissingDigits);
    }

    if let Some(frac_part) = frac_part {
        if frac_part.is_empty() {
            return Err(ValueError::MissingDigits);
        }
        let mut scale = 1.0;
        for c in frac_part.chars() {
            let d = c.to_digit(10).ok_or(ValueError::UnexpectedChar(c))?;
            scale /= 10.0;
            value += f64::from(d) * scale;
        }
    }

    if !value.is_finite() {
        return Err(ValueError::Overflow);
    }
    Ok(value)
}

/// Parse a hexadecimal connection identifier.
///
/// Digit pairs fill bytes from the left. A final odd digit lands in the
/// high nibble of the next byte with a zero low nibble. Unfilled bytes are
/// zero and the identifier is always [`ConnectionId::LEN`] bytes long.
///
/// # Examples
/// ```
/// use simspec::utils::value::parse_connection_id;
///
/// let cid = parse_connection_id("0102abc").unwrap();
/// assert_eq!(cid.as_bytes(), &[0x01, 0x02, 0xab, 0xc0, 0, 0, 0, 0]);
/// assert!(parse_connection_id("0123456789abcdef00").is_err());
/// ```
pub fn parse_connection_id(text: &str) -> Result<ConnectionId, ValueError> {
    let mut bytes = [0u8; ConnectionId::LEN];

    for (i, c) in text.chars().enumerate() {
        let nibble = c.to_digit(16).ok_or(ValueError::UnexpectedChar(c))? as u8;
        let index = i / 2;
        if index >= ConnectionId::LEN {
            return Err(ValueError::ConnectionIdTooLong {
                max: ConnectionId::LEN,
            });
        }
        if i % 2 == 0 {
            bytes[index] = nibble << 4;
        } else {
            bytes[index] |= nibble;
        }
    }

    Ok(ConnectionId::new(bytes))
}

/// Copy `text` into an owned string
pub fn parse_text(text: &str) -> Result<String, ValueError> {
    let mut owned = String::new();
    owned.try_reserve_exact(text.len())?;
    owned.push_str(text);
    Ok(owned)
}

/// Parse a file or directory name.
///
/// On Windows targets forward slashes are rewritten to backslashes.
pub fn parse_path(text: &str) -> Result<PathBuf, ValueError> {
    let owned = parse_text(text)?;
    if cfg!(windows) {
        Ok(PathBuf::from(owned.replace('/', "\\")))
    } else {
        Ok(PathBuf::from(owned))
    }
}

/// Resolve a congestion control algorithm by name
pub fn parse_cc_algo<L>(text: &str, lookup: &L) -> Result<CcAlgorithm, ValueError>
where
    L: CcAlgorithmLookup + ?Sized,
{
    lookup
        .lookup(text)
        .ok_or_else(|| ValueError::UnknownAlgorithm(text.to_string()))
}
