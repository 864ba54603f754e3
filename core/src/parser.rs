//! Option registry and the token-consumption state machine.
//!
//! Parsing walks the tokens left to right. Each run starts at a token that
//! names a registered option and collects every following data token (see
//! [`check_prefix`]) as that option's raw values. Once the queue is empty,
//! every matched option converts its values into the destinations bound at
//! registration.

use std::collections::{HashMap, VecDeque};
use std::ffi::OsString;

use tracing::{debug, trace, warn};

use crate::alias::extract_aliases;
use crate::config::ParserConfig;
use crate::error::{ArgError, Result};
use crate::help::{OptionInfo, render_help};
use crate::lexical::{check_prefix, split_option};
use crate::option::{BoundOption, Converter, OptionKind};
use crate::slot::{IntoSlots, assign_results};

/// Identifies a registered option within its [`ArgParser`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OptionHandle(usize);

/// How a [`parse`](ArgParser::parse) call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseOutcome {
    /// All tokens were consumed and every matched option converted.
    Parsed,
    /// The help token was given alone; the listing was printed.
    Help,
    /// The parser already ran a pass; nothing was changed.
    AlreadyParsed,
}

/// Registry of options bound to caller-owned destinations.
///
/// Destinations are borrowed mutably for `'a`, so they can be read only once
/// the parser has been dropped. A parser runs a single pass: later calls to
/// [`parse`](Self::parse) return [`ParseOutcome::AlreadyParsed`] without
/// touching any option.
///
/// # Examples
///
/// ```
/// use argbind_core::ArgParser;
///
/// let mut input = String::new();
/// let mut size: (u32, u32) = (0, 0);
/// let mut verbose = false;
/// {
///     let mut parser = ArgParser::named("resize");
///     parser.add_option("-i, --input", "Image to read", &mut input).unwrap();
///     parser.add_option("-s, --size", "Width and height", (&mut size.0, &mut size.1)).unwrap();
///     parser.add_flag("-v, --verbose", "Explain what is done", &mut verbose).unwrap();
///     parser.parse(["--input=cat.png", "-s", "640", "480", "-v"]).unwrap();
/// }
/// assert_eq!(input, "cat.png");
/// assert_eq!(size, (640, 480));
/// assert!(verbose);
/// ```
#[derive(Debug)]
pub struct ArgParser<'a> {
    config: ParserConfig,
    options: Vec<BoundOption<'a>>,
    index: HashMap<String, usize>,
    parsed: bool,
}

impl Default for ArgParser<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> ArgParser<'a> {
    /// Creates an empty parser without a program name.
    pub fn new() -> Self {
        Self::with_config(ParserConfig::default())
    }

    /// Creates an empty parser for `name`.
    pub fn named(name: &str) -> Self {
        Self::with_config(ParserConfig::default().with_name(name))
    }

    /// Creates an empty parser from explicit settings.
    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            config,
            options: Vec::new(),
            index: HashMap::new(),
            parsed: false,
        }
    }

    /// Program name, empty until configured or taken from `argv[0]`.
    pub fn name(&self) -> &str {
        self.config.name.as_deref().unwrap_or_default()
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Registers an option converting its values into `slots`.
    ///
    /// `declaration` lists the aliases, separated by whitespace, `,` or `;`
    /// (e.g. `"-o, --output"`). `slots` fixes the arity: a single `&mut T`,
    /// a tuple of them, or a list of [`Slot`](crate::Slot)s.
    ///
    /// # Errors
    ///
    /// Returns [`ArgError::DuplicateAlias`] when an alias is already owned by
    /// another option; nothing is registered in that case.
    pub fn add_option<S>(
        &mut self,
        declaration: &str,
        description: &str,
        slots: S,
    ) -> Result<OptionHandle>
    where
        S: IntoSlots<'a>,
    {
        let mut slots = slots.into_slots();
        let arity = slots.len();
        let convert: Converter<'a> =
            Box::new(move |results: &[String]| assign_results(results, &mut slots));
        self.register(declaration, description, OptionKind::Option, arity, convert)
    }

    /// Registers a flag that sets `flag` to `true` when named.
    ///
    /// Data tokens following the flag are collected but never converted. An
    /// absent flag leaves `flag` unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ArgError::DuplicateAlias`] like [`add_option`](Self::add_option).
    pub fn add_flag(
        &mut self,
        declaration: &str,
        description: &str,
        flag: &'a mut bool,
    ) -> Result<OptionHandle> {
        let convert: Converter<'a> = Box::new(move |_results: &[String]| {
            *flag = true;
            Ok(())
        });
        self.register(declaration, description, OptionKind::Flag, 0, convert)
    }

    fn register(
        &mut self,
        declaration: &str,
        description: &str,
        kind: OptionKind,
        arity: usize,
        convert: Converter<'a>,
    ) -> Result<OptionHandle> {
        let aliases = extract_aliases(declaration);

        if let Some(taken) = aliases.iter().find(|a| self.index.contains_key(a.as_str())) {
            return Err(ArgError::DuplicateAlias(taken.clone()));
        }
        if aliases.is_empty() {
            warn!(declaration, "Declaration contains no usable option name");
        }

        let id = self.options.len();
        for alias in &aliases {
            self.index.insert(alias.clone(), id);
        }
        debug!(?aliases, ?kind, arity, "Registered option");

        self.options
            .push(BoundOption::new(aliases, description, kind, arity, convert));
        Ok(OptionHandle(id))
    }

    /// Parses `tokens`, not including the program name.
    ///
    /// A single token equal to the configured help token prints the help
    /// listing to stdout instead and leaves the parser unused.
    ///
    /// # Errors
    ///
    /// Fails on the first [`InvalidLeadingToken`](ArgError::InvalidLeadingToken),
    /// [`UnknownOption`](ArgError::UnknownOption),
    /// [`DuplicateMatch`](ArgError::DuplicateMatch),
    /// [`MissingArguments`](ArgError::MissingArguments) or
    /// [`ConversionFailure`](ArgError::ConversionFailure). Destinations
    /// converted before the failure keep their new values, and the parser
    /// counts as used.
    pub fn parse<I, S>(&mut self, tokens: I) -> Result<ParseOutcome>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut queue: VecDeque<String> = tokens.into_iter().map(Into::into).collect();

        if queue.len() == 1 && queue[0] == self.config.help_token {
            debug!(token = %self.config.help_token, "Printing help instead of parsing");
            print!("{}", self.help_text());
            return Ok(ParseOutcome::Help);
        }

        if self.parsed {
            debug!("Parser already ran; ignoring tokens");
            return Ok(ParseOutcome::AlreadyParsed);
        }
        self.parsed = true;

        debug!(tokens = queue.len(), "Parsing arguments");
        while !queue.is_empty() {
            self.consume_run(&mut queue)?;
        }

        for option in &mut self.options {
            option.run_conversion()?;
        }

        debug!(
            matched = self.options.iter().filter(|o| o.is_parsed()).count(),
            "Finished parsing"
        );
        Ok(ParseOutcome::Parsed)
    }

    /// Parses a full argument vector whose first element is the program name.
    ///
    /// The program name is adopted only when none was configured.
    pub fn parse_args<I, S>(&mut self, args: I) -> Result<ParseOutcome>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut args = args.into_iter().map(Into::<String>::into);
        if let Some(program) = args.next() {
            if self.config.name.as_deref().is_none_or(str::is_empty) {
                self.config.name = Some(program);
            }
        }
        self.parse(args)
    }

    /// Like [`parse_args`](Self::parse_args), for arguments that may not be
    /// valid Unicode.
    ///
    /// # Errors
    ///
    /// Returns [`ArgError::InvalidEncoding`] for the first argument that is
    /// not valid Unicode. Nothing is parsed in that case and the parser stays
    /// unused.
    pub fn parse_args_os<I, S>(&mut self, args: I) -> Result<ParseOutcome>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let args = args
            .into_iter()
            .map(|arg| {
                arg.into().into_string().map_err(|raw| {
                    ArgError::InvalidEncoding(raw.to_string_lossy().into_owned())
                })
            })
            .collect::<Result<Vec<String>>>()?;
        self.parse_args(args)
    }

    /// Parses the arguments of the current process.
    pub fn parse_env(&mut self) -> Result<ParseOutcome> {
        self.parse_args_os(std::env::args_os())
    }

    /// Consumes one option token and the data tokens that follow it.
    fn consume_run(&mut self, queue: &mut VecDeque<String>) -> Result<()> {
        let Some(token) = queue.pop_front() else {
            return Ok(());
        };

        let split = split_option(&token);
        if !split.is_option {
            return Err(ArgError::InvalidLeadingToken(token.clone()));
        }
        let Some(&id) = self.index.get(split.name) else {
            return Err(ArgError::UnknownOption(split.name.to_string()));
        };
        if !split.value.is_empty() {
            queue.push_front(split.value.to_string());
        }

        let option = &mut self.options[id];
        option.mark_parsed()?;
        trace!(option = %split.name, "Matched option");

        while queue.front().is_some_and(|next| !check_prefix(next)) {
            if let Some(value) = queue.pop_front() {
                trace!(option = %split.name, %value, "Collected value");
                option.add_result(value);
            }
        }

        Ok(())
    }

    /// Describes every registered option in registration order.
    pub fn describe(&self) -> Vec<OptionInfo> {
        self.options
            .iter()
            .map(|option| OptionInfo {
                aliases: option.aliases().to_vec(),
                description: option.description().to_string(),
                arity: option.arity(),
                kind: option.kind(),
            })
            .collect()
    }

    /// Renders the help listing in the configured format.
    pub fn help_text(&self) -> String {
        render_help(self.name(), &self.describe(), self.config.help_format)
    }

    /// Returns `true` once a parse pass has started.
    pub fn is_parsed(&self) -> bool {
        self.parsed
    }

    /// Returns `true` if the option was named during the pass.
    pub fn is_matched(&self, handle: OptionHandle) -> bool {
        self.options
            .get(handle.0)
            .is_some_and(BoundOption::is_parsed)
    }

    /// Raw tokens collected for the option, before conversion.
    pub fn raw_results(&self, handle: OptionHandle) -> &[String] {
        self.options
            .get(handle.0)
            .map(BoundOption::results)
            .unwrap_or_default()
    }

    /// Aliases of the option.
    pub fn aliases(&self, handle: OptionHandle) -> &[String] {
        self.options
            .get(handle.0)
            .map(BoundOption::aliases)
            .unwrap_or_default()
    }

    /// Looks up the option owning `alias`.
    pub fn find(&self, alias: &str) -> Option<OptionHandle> {
        self.index.get(alias).copied().map(OptionHandle)
    }

    /// Number of registered options.
    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot::Slot;

    #[test]
    fn test_every_alias_resolves_to_one_option() {
        let mut value = String::new();
        let mut parser = ArgParser::new();
        let handle = parser
            .add_option("-f, -friend,--qw;--flag", "example", &mut value)
            .unwrap();

        for alias in ["-f", "-friend", "--qw", "--flag"] {
            assert_eq!(parser.find(alias), Some(handle));
        }
        assert_eq!(parser.aliases(handle), ["-f", "-friend", "--qw", "--flag"]);
        assert_eq!(parser.len(), 1);
    }

    #[test]
    fn test_duplicate_alias_registers_nothing() {
        let (mut a, mut b) = (0i32, 0i32);
        let mut parser = ArgParser::new();
        parser.add_option("--number, -n", "first", &mut a).unwrap();

        let err = parser.add_option("--num, --number", "second", &mut b).unwrap_err();
        assert_eq!(err, ArgError::DuplicateAlias("--number".to_string()));
        assert_eq!(parser.find("--num"), None);
        assert_eq!(parser.len(), 1);
    }

    #[test]
    fn test_inline_value_feeds_first_slot() {
        let mut values = [0i32; 3];
        {
            let mut parser = ArgParser::new();
            let handle = parser
                .add_option("-opt2", "three ints", Slot::each(&mut values))
                .unwrap();
            parser.parse(["-opt2=9", "8", "7"]).unwrap();
            assert_eq!(parser.raw_results(handle), ["9", "8", "7"]);
        }
        assert_eq!(values, [9, 8, 7]);
    }

    #[test]
    fn test_negative_numbers_are_values() {
        let mut pair = (0i32, 0.0f64);
        {
            let mut parser = ArgParser::new();
            parser
                .add_option("-p", "point", (&mut pair.0, &mut pair.1))
                .unwrap();
            parser.parse(["-p", "-3", "-1.5"]).unwrap();
        }
        assert_eq!(pair, (-3, -1.5));
    }

    #[test]
    fn test_inline_value_that_looks_like_option_is_reparsed() {
        let mut name = String::new();
        let mut flag = false;
        let mut parser = ArgParser::new();
        parser.add_option("--name", "one string", &mut name).unwrap();
        parser.add_flag("--flag", "flag", &mut flag).unwrap();

        let err = parser.parse(["--name=--flag"]).unwrap_err();
        assert!(matches!(err, ArgError::MissingArguments { index: 1, .. }));
    }

    #[test]
    fn test_unknown_option() {
        let mut parser = ArgParser::new();
        let err = parser.parse(["--missing=1"]).unwrap_err();
        assert_eq!(err, ArgError::UnknownOption("--missing".to_string()));
    }

    #[test]
    fn test_same_option_twice_is_duplicate_match() {
        let mut level = 0u8;
        let mut parser = ArgParser::new();
        parser.add_option("-l, --level", "level", &mut level).unwrap();

        let err = parser.parse(["-l", "1", "--level", "2"]).unwrap_err();
        assert_eq!(
            err,
            ArgError::DuplicateMatch {
                option: "-l, --level".to_string()
            }
        );
    }

    #[test]
    fn test_second_parse_is_noop() {
        let mut level = 0u8;
        {
            let mut parser = ArgParser::new();
            let handle = parser.add_option("-l", "level", &mut level).unwrap();
            assert_eq!(parser.parse(["-l", "1"]), Ok(ParseOutcome::Parsed));
            assert_eq!(parser.parse(["-l", "2"]), Ok(ParseOutcome::AlreadyParsed));
            assert_eq!(parser.parse(["bogus"]), Ok(ParseOutcome::AlreadyParsed));
            assert_eq!(parser.raw_results(handle), ["1"]);
        }
        assert_eq!(level, 1);
    }

    #[test]
    fn test_help_token_bypasses_matching() {
        let mut verbose = false;
        {
            let mut parser = ArgParser::named("tool");
            let handle = parser.add_flag("--help, -v", "conflicting", &mut verbose).unwrap();
            assert_eq!(parser.parse(["--help"]), Ok(ParseOutcome::Help));
            assert!(!parser.is_matched(handle));
            assert!(!parser.is_parsed());
        }
        assert!(!verbose);
    }

    #[test]
    fn test_custom_help_token() {
        let config = ParserConfig::default().with_help_token("-h");
        let mut parser = ArgParser::with_config(config);
        assert_eq!(parser.parse(["-h"]), Ok(ParseOutcome::Help));
        assert_eq!(
            parser.parse(["--help"]),
            Err(ArgError::UnknownOption("--help".to_string()))
        );
    }

    #[test]
    fn test_parse_args_adopts_program_name() {
        let mut parser = ArgParser::new();
        parser.parse_args(["/usr/bin/tool"]).unwrap();
        assert_eq!(parser.name(), "/usr/bin/tool");

        let mut named = ArgParser::named("fixed");
        named.parse_args(["/usr/bin/tool"]).unwrap();
        assert_eq!(named.name(), "fixed");
    }

    #[test]
    fn test_declaration_without_aliases_is_unreachable() {
        let mut value = String::new();
        let mut parser = ArgParser::new();
        let handle = parser.add_option("value", "no dash", &mut value).unwrap();
        assert!(parser.aliases(handle).is_empty());
        assert_eq!(
            parser.parse(["value"]),
            Err(ArgError::InvalidLeadingToken("value".to_string()))
        );
    }

    #[test]
    fn test_describe_in_registration_order() {
        let (mut a, mut b, mut f) = (String::new(), 0u8, false);
        let mut parser = ArgParser::new();
        parser.add_option("--zeta", "last name", &mut a).unwrap();
        parser.add_option("--alpha", "first name", (&mut b,)).unwrap();
        parser.add_flag("-f", "a flag", &mut f).unwrap();

        let names: Vec<String> = parser.describe().iter().map(OptionInfo::display_names).collect();
        assert_eq!(names, ["--zeta", "--alpha", "-f"]);
        assert_eq!(parser.describe()[2].kind, OptionKind::Flag);
        assert_eq!(parser.describe()[1].arity, 1);
    }

    #[test]
    fn test_flag_ignores_trailing_values() {
        let mut verbose = false;
        {
            let mut parser = ArgParser::new();
            let handle = parser.add_flag("--flag", "a flag", &mut verbose).unwrap();
            assert_eq!(parser.parse(["--flag", "x", "y"]), Ok(ParseOutcome::Parsed));
            assert_eq!(parser.raw_results(handle), ["x", "y"]);
        }
        assert!(verbose);
    }

    #[test]
    fn test_unknown_option_message_has_no_help_hint() {
        let config = ParserConfig::default().with_help_token("-h");
        let mut parser = ArgParser::with_config(config);
        let err = parser.parse(["--verbose"]).unwrap_err();
        assert_eq!(err.to_string(), "unidentified option: --verbose");
    }

    #[cfg(unix)]
    #[test]
    fn test_parse_args_os_rejects_invalid_unicode() {
        use std::os::unix::ffi::OsStringExt;

        let mut value = String::new();
        let mut parser = ArgParser::named("tool");
        parser.add_option("--qw", "one value", &mut value).unwrap();

        let argv = vec![
            OsString::from("tool"),
            OsString::from("--qw"),
            OsString::from_vec(vec![b'a', 0xff]),
        ];
        assert_eq!(
            parser.parse_args_os(argv),
            Err(ArgError::InvalidEncoding("a\u{FFFD}".to_string()))
        );
        assert!(!parser.is_parsed());
        assert_eq!(parser.parse_args_os(["tool", "--qw", "ok"]), Ok(ParseOutcome::Parsed));
    }
}
