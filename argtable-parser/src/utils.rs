//! Value coercion utilities.
//!
//! These follow the legacy conventions of `-flag=value` command lines: any value other than `"0"`
//! is true, and integers are read like C `atoi64`, falling back to zero instead of failing.

use core::num::IntErrorKind;
use core::str::FromStr;

use crate::Error;

/// Interpret a raw value as a boolean. Only the exact string `"0"` is false, so a flag given
/// without a value (bound to `""`) is true.
#[inline(always)]
pub fn parse_bool(value: &str) -> bool {
    value != "0"
}

/// Get the longest leading integer of `value`: optional whitespace, an optional sign, then
/// decimal digits. The result is empty when there are no digits.
pub fn leading_integer(value: &str) -> &str {
    let value = value.trim_start();
    let bytes = value.as_bytes();

    let sign = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let digits = bytes[sign..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count();

    if digits == 0 {
        return "";
    }

    &value[..sign + digits]
}

/// Integer types that can be read lossily from a raw value.
///
/// Note that this never fails: `"NaN"` reads as `0`, `"12abc"` as `12`, and out-of-range values
/// saturate. Use [`parse_strict`] when a malformed value must be reported.
pub trait LossyInteger: Sized {
    /// Read the leading integer of `value`, or zero.
    fn parse_lossy(value: &str) -> Self;
}

macro_rules! make_lossy_integer_impl {
    ($($target:ty),+) => {
        $(
            impl LossyInteger for $target {
                fn parse_lossy(value: &str) -> Self {
                    match leading_integer(value).parse::<$target>() {
                        Ok(x) => x,
                        Err(e) => match e.kind() {
                            IntErrorKind::PosOverflow => <$target>::MAX,
                            IntErrorKind::NegOverflow => <$target>::MIN,
                            _ => 0,
                        },
                    }
                }
            }
        )+
    };
}

make_lossy_integer_impl!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

/// Parse a raw value into `T`, reporting a boolean-present flag (empty value) as missing.
pub fn parse_strict<T: FromStr>(value: &str) -> Result<T, Error> {
    value.parse::<T>().map_err(|_| {
        if value.is_empty() {
            Error::MissingArgument
        } else {
            Error::InvalidArgument
        }
    })
}
