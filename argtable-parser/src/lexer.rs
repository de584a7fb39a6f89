//! A lexer for generating tokens from a command line.

/// A flag read from the command line. Only store the name, not the hyphens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Flag<'a> {
    /// Flag name, without leading hyphens and without the `=value` part.
    pub name: &'a str,

    /// Raw value after the first `=`, if any (e.g. `-name=value`).
    pub value: Option<&'a str>,
}

impl<'a> Flag<'a> {
    /// Get the raw value, where a flag without `=` is bound to the empty string.
    #[inline(always)]
    pub fn value_or_empty(&self) -> &'a str {
        self.value.unwrap_or_default()
    }

    /// Get the name this flag negates when it starts with `prefix` (e.g. `noverbose` negates
    /// `verbose`). An empty prefix or an empty remainder never negates anything.
    pub fn negated(&self, prefix: &str) -> Option<&'a str> {
        if prefix.is_empty() {
            return None;
        }

        self.name
            .strip_prefix(prefix)
            .filter(|target| !target.is_empty())
    }
}

/// Defines a `Token` that has been read from the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Token<'a> {
    /// Flag (e.g. `-name`, `--name=value`).
    Flag(Flag<'a>),

    /// Value (i.e. everything that is not a flag).
    Value(&'a str),
}

impl<'a> Token<'a> {
    /// Classify a single raw argument.
    ///
    /// Both `-` and `--` introduce a flag, so `--name=1` and `-name=1` yield the same token. A
    /// lone hyphen, a lone double hyphen, or a flag with an empty name (e.g. `-=1`) is a value.
    pub fn classify(arg: &'a str) -> Self {
        let body = match arg.strip_prefix("--").or_else(|| arg.strip_prefix('-')) {
            Some(body) => body,
            None => return Token::Value(arg),
        };

        let (name, value) = match body.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (body, None),
        };

        if name.is_empty() {
            return Token::Value(arg);
        }

        Token::Flag(Flag { name, value })
    }

    /// Evaluate if the token string is a flag.
    #[inline(always)]
    pub fn is_flag(input: &str) -> bool {
        matches!(Token::classify(input), Token::Flag(_))
    }
}

/// Strip the leading hyphens of a flag name given by a caller, so that `-name`, `--name` and
/// `name` all address the same entry.
#[inline(always)]
pub fn normalize_name(name: &str) -> &str {
    name.strip_prefix("--")
        .or_else(|| name.strip_prefix('-'))
        .unwrap_or(name)
}

/// Defines a lexer that is responsible for streaming tokens from the command line input.
///
/// A lexer acts like an forward iterator.
#[derive(Clone, Debug)]
pub struct Tokens<'a, S> {
    argv: &'a [S],
    cursor: usize,
}

impl<'a, S: AsRef<str>> Tokens<'a, S> {
    /// Create a new lexer from the command line input.
    pub fn new(argv: &'a [S]) -> Self {
        Tokens { argv, cursor: 0 }
    }

    /// Get the number of tokens left.
    #[inline(always)]
    pub fn remaining(&self) -> usize {
        self.argv.len().saturating_sub(self.cursor)
    }
}

impl<'a, S: AsRef<str>> Iterator for Tokens<'a, S> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let arg = self.argv.get(self.cursor)?.as_ref();
        self.cursor += 1;

        Some(Token::classify(arg))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining(), Some(self.remaining()))
    }
}

/// Conversion into a token stream.
pub trait IntoTokens<'a, S> {
    /// Create the token stream.
    fn into_tokens(self) -> Tokens<'a, S>;
}

impl<'a, S: AsRef<str>> IntoTokens<'a, S> for Tokens<'a, S> {
    fn into_tokens(self) -> Tokens<'a, S> {
        self
    }
}

impl<'a, S: AsRef<str>> IntoTokens<'a, S> for &'a [S] {
    fn into_tokens(self) -> Tokens<'a, S> {
        Tokens::new(self)
    }
}

impl<'a, S: AsRef<str>, const N: usize> IntoTokens<'a, S> for &'a [S; N] {
    fn into_tokens(self) -> Tokens<'a, S> {
        Tokens::new(self.as_slice())
    }
}

impl<'a, S: AsRef<str>> IntoTokens<'a, S> for &'a alloc::vec::Vec<S> {
    fn into_tokens(self) -> Tokens<'a, S> {
        Tokens::new(self.as_slice())
    }
}
