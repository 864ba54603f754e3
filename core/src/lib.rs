//! Alias-aware command-line option parsing into caller-owned values.
//!
//! This crate turns a flat list of tokens into typed values written straight
//! into variables owned by the caller:
//!
//! - [`ArgParser`] — registry of options and the single-pass parsing engine.
//! - [`Slot`] / [`IntoSlots`] — typed destinations; an option binds one slot
//!   per expected value.
//! - [`check_prefix`], [`split_option`], [`extract_aliases`] — the lexical
//!   rules deciding which tokens name options.
//! - [`render_help`] — help listing built from [`ArgParser::describe`].
//!
//! Options accept several aliases (`"-o, --output"`), values given as
//! `--name value...` or `--name=value...`, and any number of trailing values.
//! Flags bind a `bool` and take no values.
//!
//! # Example
//!
//! ```
//! use argbind_core::{ArgError, ArgParser};
//!
//! let mut count: i32 = 0;
//! let mut ratio: f32 = 0.0;
//! let mut dry_run = false;
//! {
//!     let mut parser = ArgParser::named("mytool");
//!     parser
//!         .add_option("-n, --number", "Count and ratio", (&mut count, &mut ratio))
//!         .unwrap();
//!     parser.add_flag("--dry-run", "Do nothing", &mut dry_run).unwrap();
//!     parser.parse(["-n=3", "0.25", "--dry-run"]).unwrap();
//! }
//! assert_eq!((count, ratio, dry_run), (3, 0.25, true));
//!
//! // Conversion failures name the option and the 1-based argument.
//! let mut count: i32 = 0;
//! let mut parser = ArgParser::new();
//! parser.add_option("-n", "Count", &mut count).unwrap();
//! let err = parser.parse(["-n", "three"]).unwrap_err();
//! assert!(matches!(err, ArgError::ConversionFailure { index: 1, .. }));
//! ```

mod alias;
mod config;
mod error;
mod help;
mod lexical;
mod option;
mod parser;
mod slot;

pub use alias::extract_aliases;
pub use config::{DEFAULT_HELP_TOKEN, ParserConfig};
pub use error::{ArgError, AssignError, Result};
pub use help::{HelpFormat, OptionInfo, render_help};
pub use lexical::{SplitOption, check_prefix, is_name_start, split_option};
pub use option::OptionKind;
pub use parser::{ArgParser, OptionHandle, ParseOutcome};
pub use slot::{BindSlot, IntoSlots, Slot, assign_results};

/// Parses the process arguments, or `$args`, with `$parser`.
///
/// On failure the error is printed as `error: <message>` to stderr and the
/// process exits with status 1. Process arguments that are not valid Unicode
/// fail the same way. When the help listing was printed the process exits
/// with status 0.
///
/// ```no_run
/// use argbind_core::{ArgParser, arg_parse};
///
/// let mut name = String::new();
/// {
///     let mut app = ArgParser::new();
///     app.add_option("--name", "Who to greet", &mut name).unwrap();
///     arg_parse!(app);
/// }
/// println!("hello {name}");
/// ```
#[macro_export]
macro_rules! arg_parse {
    (@outcome $result:expr) => {
        match $result {
            Ok($crate::ParseOutcome::Help) => ::std::process::exit(0),
            Ok(_) => {}
            Err(err) => {
                eprintln!("error: {err}");
                ::std::process::exit(1);
            }
        }
    };
    ($parser:expr) => {
        $crate::arg_parse!(@outcome $parser.parse_env())
    };
    ($parser:expr, $args:expr) => {
        $crate::arg_parse!(@outcome $parser.parse_args($args))
    };
}
