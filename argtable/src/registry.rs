//! The argument registry: parse once, look up many times.

use alloc::string::String;
use alloc::vec::Vec;
use core::str::FromStr;

use log::debug;

use argtable_parser::{ArgTable, IntoTokens, ParseOptions};

use crate::Error;
use crate::value::ArgDefault;

/// Defines the registry of command line flags.
///
/// The registry is built empty, filled by [`ArgRegistry::parse`] and then queried with typed
/// look-ups. Parsing again replaces the whole table, nothing of the previous command line is
/// kept.
///
/// Flag names given to look-ups may keep their hyphens: `"-verbose"`, `"--verbose"` and
/// `"verbose"` address the same flag.
#[derive(Clone, Debug, Default)]
pub struct ArgRegistry {
    table: ArgTable,
    options: ParseOptions,
}

impl ArgRegistry {
    /// Create an empty registry with the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry with the given options.
    pub fn with_options(options: ParseOptions) -> Self {
        ArgRegistry {
            table: ArgTable::default(),
            options,
        }
    }

    /// Create a registry from the arguments of the current process.
    #[cfg(feature = "std")]
    pub fn from_env() -> Self {
        let argv: Vec<String> = std::env::args_os()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect();

        let mut registry = Self::new();
        registry.parse(&argv);
        registry
    }

    /// Get the parsing options.
    #[inline(always)]
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Get the underlying table.
    #[inline(always)]
    pub fn table(&self) -> &ArgTable {
        &self.table
    }

    /// Parse the command line, replacing any previously parsed one. The first argument is the
    /// program name unless the options say otherwise.
    pub fn parse<'a, S>(&mut self, argv: impl IntoTokens<'a, S>)
    where
        S: AsRef<str> + 'a,
    {
        self.table = ArgTable::parse(argv, &self.options);
        debug!(
            "parsed {} flags and {} positional arguments",
            self.table.len(),
            self.table.positionals().len()
        );
    }

    /// Get the value of the flag, or `default` if it has not been given.
    ///
    /// The type of `default` selects the result: a string default yields the last value as is
    /// (`""` for a flag given without `=value`), an integer default yields the value read as an
    /// integer.
    ///
    /// Beware that a present value that is not a number reads as `0`, not as `default`: with
    /// `-port=http`, `get_arg("port", 8080)` is `0`. Use [`ArgRegistry::try_get_arg`] to detect
    /// such values. A negation alone (e.g. `-noport`) does not count as a value.
    pub fn get_arg<D: ArgDefault>(&self, name: &str, default: D) -> D::Output {
        D::resolve(self.table.value(name), default)
    }

    /// Get the flag as a boolean, or `default` if it has not been given.
    ///
    /// An explicit flag is true unless its value is `"0"`, and always wins over its negation.
    /// Without it, `-noX` makes `X` false and `-noX=0` makes it true.
    pub fn get_bool_arg(&self, name: &str, default: bool) -> bool {
        self.table.flag(name).unwrap_or(default)
    }

    /// Try to get and parse the last value of the flag. Unlike [`ArgRegistry::get_arg`], a
    /// value that cannot be converted is reported.
    pub fn try_get_arg<T>(&self, name: &str) -> Result<Option<T>, Error>
    where
        T: FromStr,
    {
        Ok(self.table.try_get_one(name)?)
    }

    /// Get all the values given to the flag, in order.
    #[inline(always)]
    pub fn get_multi_args(&self, name: &str) -> &[String] {
        self.table.values(name)
    }

    /// Try to get and parse all the values of the flag, in order. Fail on the first value that
    /// cannot be converted.
    pub fn try_get_multi_args<T>(&self, name: &str) -> Result<Option<Vec<T>>, Error>
    where
        T: FromStr,
    {
        Ok(self.table.try_get_many(name)?)
    }

    /// Check if the flag has been given, either explicitly or through its negation.
    #[inline(always)]
    pub fn is_arg_set(&self, name: &str) -> bool {
        self.table.is_set(name)
    }

    /// Set the flag to `value` unless it has already been given. Return `true` if set.
    pub fn soft_set_arg(&mut self, name: &str, value: &str) -> bool {
        self.table.insert_if_unset(name, value)
    }

    /// Set the flag to `value` unless it has already been given. Return `true` if set.
    pub fn soft_set_bool_arg(&mut self, name: &str, value: bool) -> bool {
        self.soft_set_arg(name, if value { "1" } else { "0" })
    }

    /// Get the positional arguments (i.e. everything that is not a flag).
    #[inline(always)]
    pub fn positionals(&self) -> &[String] {
        self.table.positionals()
    }
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;

    use super::*;

    fn reset_args(registry: &mut ArgRegistry, args: &str) {
        let argv: Vec<&str> = core::iter::once("testprog")
            .chain(args.split_whitespace())
            .collect();

        registry.parse(&argv);
    }

    fn registry(args: &str) -> ArgRegistry {
        let mut registry = ArgRegistry::new();
        reset_args(&mut registry, args);
        registry
    }

    fn assert_bool_arg(registry: &ArgRegistry, name: &str, expected: bool) {
        assert_that!(registry.get_bool_arg(name, false), eq(expected));
        assert_that!(registry.get_bool_arg(name, true), eq(expected));
    }

    #[test]
    fn it_should_resolve_boolean_flag() {
        let args = registry("-OPC");
        assert_bool_arg(&args, "-OPC", true);

        assert_that!(args.get_bool_arg("-fo", false), eq(false));
        assert_that!(args.get_bool_arg("-fo", true), eq(true));

        assert_that!(args.get_bool_arg("-OPCo", false), eq(false));
        assert_that!(args.get_bool_arg("-OPCo", true), eq(true));

        assert_bool_arg(&registry("-OPC=0"), "-OPC", false);
        assert_bool_arg(&registry("-OPC=1"), "-OPC", true);
    }

    #[test]
    fn it_should_map_negated_flag() {
        assert_bool_arg(&registry("-noOPC"), "-OPC", false);
        assert_bool_arg(&registry("-noOPC=1"), "-OPC", false);
        assert_bool_arg(&registry("-noOPC=0"), "-OPC", true);
        assert_bool_arg(&registry("--noOPC=1"), "-OPC", false);
    }

    #[test]
    fn it_should_let_explicit_flag_win_over_negation() {
        assert_bool_arg(&registry("-OPC -noOPC"), "-OPC", true);
        assert_bool_arg(&registry("-noOPC -OPC"), "-OPC", true);
        assert_bool_arg(&registry("-OPC --noOPC"), "-OPC", true);
        assert_bool_arg(&registry("-OPC=1 -noOPC=1"), "-OPC", true);
        assert_bool_arg(&registry("-OPC=0 -noOPC=0"), "-OPC", false);
        assert_bool_arg(&registry("-noOPC=0 -OPC=0"), "-OPC", false);
    }

    #[test]
    fn it_should_treat_double_dash_as_single_dash() {
        assert_bool_arg(&registry("--OPC=1"), "-OPC", true);
        assert_bool_arg(&registry("--OPC"), "-OPC", true);

        let args = registry("--OPC=verbose --bar=1");
        let value = args.get_arg("-OPC", "");
        assert_that!(value.as_str(), eq("verbose"));
        assert_that!(args.get_arg("-bar", 0), eq(1));
    }

    #[test]
    fn it_should_resolve_string_arg() {
        let args = registry("");
        let value = args.get_arg("-OPC", "");
        assert_that!(value.as_str(), eq(""));
        let value = args.get_arg("-OPC", "eleven");
        assert_that!(value.as_str(), eq("eleven"));

        for line in ["-OPC -bar", "-OPC="] {
            let args = registry(line);
            let value = args.get_arg("-OPC", "");
            assert_that!(value.as_str(), eq(""));
            let value = args.get_arg("-OPC", "eleven");
            assert_that!(value.as_str(), eq(""));
        }

        for (line, expected) in [("-OPC=11", "11"), ("-OPC=eleven", "eleven")] {
            let args = registry(line);
            let value = args.get_arg("-OPC", "");
            assert_that!(value.as_str(), eq(expected));
            let value = args.get_arg("-OPC", String::from("eleven"));
            assert_that!(value.as_str(), eq(expected));
        }
    }

    #[test]
    fn it_should_resolve_integer_arg() {
        let args = registry("");
        assert_that!(args.get_arg("-OPC", 11), eq(11));
        assert_that!(args.get_arg("-OPC", 0), eq(0));

        let args = registry("-OPC -bar");
        assert_that!(args.get_arg("-OPC", 11), eq(0));
        assert_that!(args.get_arg("-bar", 11), eq(0));

        let args = registry("-OPC=11 -bar=12");
        assert_that!(args.get_arg("-OPC", 0), eq(11));
        assert_that!(args.get_arg("-bar", 11), eq(12));
    }

    #[test]
    fn it_should_read_malformed_integer_as_zero() {
        let args = registry("-OPC=NaN -bar=NotANumber");
        assert_that!(args.get_arg("-OPC", 1), eq(0));
        assert_that!(args.get_arg("-bar", 11), eq(0));

        let value = args.get_arg("-OPC", "");
        assert_that!(value.as_str(), eq("NaN"));
    }

    #[test]
    fn it_should_ignore_negation_for_string_arg() {
        let args = registry("-noOPC");
        let value = args.get_arg("-OPC", "eleven");
        assert_that!(value.as_str(), eq("eleven"));
        assert_that!(args.get_arg("-OPC", 11), eq(11));
    }

    #[test]
    fn it_should_replace_previous_args() {
        let mut args = ArgRegistry::new();

        reset_args(&mut args, "-OPC=11 -noverbose pos");
        reset_args(&mut args, "-bar");

        assert_that!(args.get_arg("-OPC", 5), eq(5));
        assert_that!(args.get_bool_arg("-verbose", true), eq(true));
        assert_that!(args.positionals().is_empty(), eq(true));
        assert_bool_arg(&args, "-bar", true);
    }

    #[test]
    fn it_should_be_idempotent() {
        let mut once = ArgRegistry::new();
        reset_args(&mut once, "-OPC=3 -noquiet file");

        let mut twice = ArgRegistry::new();
        reset_args(&mut twice, "-OPC=3 -noquiet file");
        reset_args(&mut twice, "-OPC=3 -noquiet file");

        assert_that!(once.table(), eq(twice.table()));
    }

    #[test]
    fn it_should_keep_every_value() {
        let args = registry("-n=1 -n=2");

        let values: Vec<&str> = args.get_multi_args("-n").iter().map(String::as_str).collect();
        assert_that!(values, eq(&vec!["1", "2"]));
        assert_that!(args.get_arg("-n", 0), eq(2));
        assert_that!(args.get_multi_args("-m").is_empty(), eq(true));
    }

    #[test]
    fn it_should_parse_every_value() {
        let args = registry("-n=1 -n=2 -m=1 -m=x");

        assert_that!(
            args.try_get_multi_args::<u32>("-n"),
            eq(&Ok(Some(vec![1, 2])))
        );
        assert_that!(
            args.try_get_multi_args::<u32>("-m"),
            eq(&Err(Error::Parser(argtable_parser::Error::InvalidArgument)))
        );
        assert_that!(args.try_get_multi_args::<u32>("-k"), eq(&Ok(None)));
    }

    #[test]
    fn it_should_reject_empty_name_on_soft_set() {
        let mut args = registry("");

        assert_that!(args.soft_set_arg("-", "1"), eq(false));
        assert_that!(args.soft_set_bool_arg("--", true), eq(false));
        assert_that!(args.table().is_empty(), eq(true));
    }

    #[test]
    fn it_should_report_set_args() {
        let args = registry("-OPC -noquiet");

        assert_that!(args.is_arg_set("-OPC"), eq(true));
        assert_that!(args.is_arg_set("-quiet"), eq(true));
        assert_that!(args.is_arg_set("-bar"), eq(false));
    }

    #[test]
    fn it_should_soft_set_args() {
        let mut args = registry("-OPC=0 -noquiet");

        assert_that!(args.soft_set_bool_arg("-OPC", true), eq(false));
        assert_that!(args.soft_set_bool_arg("-quiet", true), eq(false));
        assert_that!(args.soft_set_arg("-bar", "7"), eq(true));
        assert_that!(args.soft_set_arg("-bar", "8"), eq(false));
        assert_that!(args.soft_set_bool_arg("-baz", false), eq(true));

        assert_bool_arg(&args, "-OPC", false);
        assert_bool_arg(&args, "-quiet", false);
        assert_that!(args.get_arg("-bar", 0), eq(7));
        assert_bool_arg(&args, "-baz", false);
    }

    #[test]
    fn it_should_keep_positionals() {
        let args = registry("input.txt -OPC output.txt");

        let positionals: Vec<&str> = args.positionals().iter().map(String::as_str).collect();
        assert_that!(positionals, eq(&vec!["input.txt", "output.txt"]));
        assert_that!(args.is_arg_set("input.txt"), eq(false));
    }

    #[test]
    fn it_should_report_invalid_values() {
        let args = registry("-OPC=NaN -bar=12 -baz");

        assert_that!(
            args.try_get_arg::<u32>("-OPC"),
            eq(&Err(Error::Parser(argtable_parser::Error::InvalidArgument)))
        );
        assert_that!(
            args.try_get_arg::<u32>("-baz"),
            eq(&Err(Error::Parser(argtable_parser::Error::MissingArgument)))
        );
        assert_that!(args.try_get_arg::<u32>("-bar"), eq(&Ok(Some(12))));
        assert_that!(args.try_get_arg::<u32>("-qux"), eq(&Ok(None)));
    }

    #[test]
    fn it_should_honour_options() {
        let options = ParseOptions::new()
            .skip_program_name(false)
            .negation_prefix("disable-");
        let mut args = ArgRegistry::with_options(options);

        args.parse(&["-first", "--disable-color"]);
        assert_bool_arg(&args, "-first", true);
        assert_bool_arg(&args, "-color", false);

        args.parse(&["-noOPC"]);
        assert_that!(args.get_bool_arg("-OPC", true), eq(true));
        assert_that!(*args.options(), eq(options));
    }
}
