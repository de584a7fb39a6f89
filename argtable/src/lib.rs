//! argtable, a registry of legacy `-flag=value` command line arguments with typed look-ups.
//!
//! ```
//! use argtable::ArgRegistry;
//!
//! let mut args = ArgRegistry::new();
//! args.parse(&["prog", "-port=8333", "--nolisten", "-debug"]);
//!
//! assert_eq!(args.get_arg("-port", 0), 8333);
//! assert_eq!(args.get_arg("-datadir", "/tmp"), "/tmp");
//! assert!(!args.get_bool_arg("-listen", true));
//! assert!(args.get_bool_arg("-debug", false));
//! ```
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![deny(missing_docs)]

extern crate alloc;

pub use argtable_parser as parser;

pub mod registry;
pub mod value;

pub use parser::ParseOptions;
pub use registry::ArgRegistry;
pub use value::ArgDefault;

/// Defines the possible errors that may occur during usage of the crate.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub enum Error {
    /// An error comes from the parsing of arguments.
    #[error(transparent)]
    Parser(#[from] parser::Error),
}
