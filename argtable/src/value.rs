//! Typed defaults for [`ArgRegistry::get_arg`](crate::ArgRegistry::get_arg).

use alloc::string::String;

use argtable_parser::utils::LossyInteger;

/// A default value accepted by `get_arg`. The type of the default selects how the raw value of
/// the flag is read.
pub trait ArgDefault: Sized {
    /// The resolved value type.
    type Output;

    /// Resolve the raw value of a flag, or the default when the flag is absent.
    fn resolve(value: Option<&str>, default: Self) -> Self::Output;
}

impl ArgDefault for &str {
    type Output = String;

    fn resolve(value: Option<&str>, default: Self) -> Self::Output {
        value.unwrap_or(default).into()
    }
}

impl ArgDefault for String {
    type Output = String;

    fn resolve(value: Option<&str>, default: Self) -> Self::Output {
        value.map(String::from).unwrap_or(default)
    }
}

// A present value that is not a number reads as zero, not as the default. Integer defaults are
// only accepted as `i64`, so that a bare literal such as `8080` needs no suffix.
impl ArgDefault for i64 {
    type Output = i64;

    fn resolve(value: Option<&str>, default: Self) -> Self::Output {
        value.map(i64::parse_lossy).unwrap_or(default)
    }
}
