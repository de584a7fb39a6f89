//! A parser for collecting flags from a token stream into a look-up table.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::str::FromStr;

use log::{debug, trace};

use crate::lexer::{Flag, IntoTokens, Token, normalize_name};
use crate::utils::{parse_bool, parse_strict};

/// Defines the possible errors that may occur during strict look-ups of arguments.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub enum Error {
    /// The argument value is invalid, meaning that it cannot be converted to the destination
    /// type. This could mean that there is a missing implementation for [`str::parse`] trait.
    #[error("invalid argument")]
    InvalidArgument,

    /// The argument value is missing, which occurs when the flag is given without `=value` and
    /// the destination type cannot be built from an empty string.
    #[error("missing argument")]
    MissingArgument,
}

/// Options controlling how a table is built from the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ParseOptions {
    /// Drop the first argument, conventionally the program name.
    pub skip_program_name: bool,

    /// Prefix turning a flag into the negation of another (e.g. `-noverbose`). Empty disables
    /// negation.
    pub negation_prefix: &'static str,
}

impl ParseOptions {
    /// The default negation prefix.
    pub const NEGATION_PREFIX: &'static str = "no";

    /// Create the default options.
    pub const fn new() -> Self {
        ParseOptions {
            skip_program_name: true,
            negation_prefix: Self::NEGATION_PREFIX,
        }
    }

    /// Set whether the first argument is the program name.
    pub const fn skip_program_name(mut self, skip: bool) -> Self {
        self.skip_program_name = skip;
        self
    }

    /// Set the negation prefix.
    pub const fn negation_prefix(mut self, prefix: &'static str) -> Self {
        self.negation_prefix = prefix;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Defines the result of argument parsing. This is a simple key-value store that offers a look-up
/// over parsed flags.
///
/// Every flag is recorded under its own name with all the values it was given, in order. A flag
/// `-noX` additionally records a negation candidate for `X`, which only survives if `X` itself
/// was never given: an explicit flag always beats its negation, whatever the order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArgTable {
    explicit: BTreeMap<String, Vec<String>>,
    negated: BTreeMap<String, String>,
    positionals: Vec<String>,
}

impl ArgTable {
    /// Parse the command line input from a token stream.
    pub fn parse<'a, S>(argv: impl IntoTokens<'a, S>, options: &ParseOptions) -> Self
    where
        S: AsRef<str> + 'a,
    {
        let mut tokens = argv.into_tokens();

        if options.skip_program_name {
            tokens.next();
        }

        let mut out = Self::default();

        for token in tokens {
            match token {
                Token::Flag(flag) => out.insert_flag(flag, options.negation_prefix),
                Token::Value(value) => {
                    trace!("positional argument {:?}", value);
                    out.positionals.push(value.into());
                }
            }
        }

        out.discard_overridden_negations();
        out
    }

    fn insert_flag(&mut self, flag: Flag<'_>, negation_prefix: &str) {
        let value = flag.value_or_empty();
        trace!("flag {:?} = {:?}", flag.name, value);

        if let Some(target) = flag.negated(negation_prefix) {
            // Last one wins, as for explicit flags.
            self.negated.insert(target.into(), value.into());
        }

        self.explicit
            .entry(flag.name.into())
            .or_default()
            .push(value.into());
    }

    fn discard_overridden_negations(&mut self) {
        let explicit = &self.explicit;

        self.negated.retain(|name, _| {
            let overridden = explicit.contains_key(name);
            if overridden {
                debug!("negation of {:?} discarded, flag is given explicitly", name);
            }
            !overridden
        });
    }

    /// Get the number of distinct flags given explicitly.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.explicit.len()
    }

    /// Check if no flag has been given.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.explicit.is_empty()
    }

    /// Check if the flag has been given explicitly (i.e. not through a negation).
    #[inline(always)]
    pub fn contains(&self, name: &str) -> bool {
        self.explicit.contains_key(normalize_name(name))
    }

    /// Check if the flag has been given, either explicitly or through a negation.
    pub fn is_set(&self, name: &str) -> bool {
        let name = normalize_name(name);
        self.explicit.contains_key(name) || self.negated.contains_key(name)
    }

    /// Get the last value given to the flag. A flag without `=value` yields `Some("")`.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.explicit
            .get(normalize_name(name))
            .and_then(|values| values.last())
            .map(String::as_str)
    }

    /// Get all the values given to the flag, in order.
    pub fn values(&self, name: &str) -> &[String] {
        self.explicit
            .get(normalize_name(name))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Get the value of the live negation of the flag, if any.
    pub fn negation(&self, name: &str) -> Option<&str> {
        self.negated
            .get(normalize_name(name))
            .map(String::as_str)
    }

    /// Resolve the flag as a boolean.
    ///
    /// An explicit flag is true unless its value is `"0"`. Otherwise a live negation yields the
    /// opposite of its own value, so `-noX` is false and `-noX=0` is true. `None` means the flag
    /// has not been given at all.
    pub fn flag(&self, name: &str) -> Option<bool> {
        self.value(name)
            .map(parse_bool)
            .or_else(|| self.negation(name).map(|value| !parse_bool(value)))
    }

    /// Get the positional arguments (i.e. everything that is not a flag).
    #[inline(always)]
    pub fn positionals(&self) -> &[String] {
        &self.positionals
    }

    /// Bind a value to the flag unless it is already set. Return `true` if the value was bound.
    ///
    /// A name that is empty once its hyphens are stripped is never bound, as no flag on the
    /// command line can have it.
    pub fn insert_if_unset(&mut self, name: &str, value: &str) -> bool {
        if normalize_name(name).is_empty() {
            trace!("flag name {:?} is empty, ignoring it", name);
            return false;
        }

        if self.is_set(name) {
            trace!("flag {:?} is already set, keeping it", name);
            return false;
        }

        let name = normalize_name(name);
        debug!("flag {:?} set to {:?}", name, value);
        self.explicit.insert(name.into(), alloc::vec![value.into()]);
        true
    }

    /// Try to get and parse the last value of the flag, if any.
    pub fn try_get_one<T>(&self, name: &str) -> Result<Option<T>, Error>
    where
        T: FromStr,
    {
        self.value(name).map(parse_strict::<T>).transpose()
    }

    /// Try to get and parse all the values of the flag. The result can be constructed from an
    /// iterator.
    pub fn try_get_many<B, T>(&self, name: &str) -> Result<Option<B>, Error>
    where
        B: FromIterator<T>,
        T: FromStr,
    {
        if !self.contains(name) {
            return Ok(None);
        }

        // Collect on Seq<Result<T, _>> can be coerced to Result<Seq<T>, _>.
        self.values(name)
            .iter()
            .map(|value| parse_strict::<T>(value))
            .collect::<Result<B, _>>()
            .map(Some)
    }
}
