//! A registered option and its per-pass state.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ArgError, AssignError, Result};

/// Stored conversion from the collected tokens into the bound destinations.
pub(crate) type Converter<'a> =
    Box<dyn FnMut(&[String]) -> std::result::Result<(), AssignError> + 'a>;

/// Whether an option binds values or is a plain on/off flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    /// Binds one destination per collected value.
    Option,
    /// Sets a `bool` when named; collected values are ignored.
    Flag,
}

pub(crate) struct BoundOption<'a> {
    aliases: Vec<String>,
    description: String,
    kind: OptionKind,
    arity: usize,
    results: Vec<String>,
    parsed: bool,
    invoked: bool,
    convert: Converter<'a>,
}

impl<'a> BoundOption<'a> {
    pub(crate) fn new(
        aliases: Vec<String>,
        description: &str,
        kind: OptionKind,
        arity: usize,
        convert: Converter<'a>,
    ) -> Self {
        Self {
            aliases,
            description: description.to_string(),
            kind,
            arity,
            results: Vec::new(),
            parsed: false,
            invoked: false,
            convert,
        }
    }

    pub(crate) fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub(crate) fn description(&self) -> &str {
        &self.description
    }

    pub(crate) fn kind(&self) -> OptionKind {
        self.kind
    }

    pub(crate) fn arity(&self) -> usize {
        self.arity
    }

    pub(crate) fn results(&self) -> &[String] {
        &self.results
    }

    pub(crate) fn is_parsed(&self) -> bool {
        self.parsed
    }

    /// Alias list used to name the option in error messages.
    pub(crate) fn display_names(&self) -> String {
        self.aliases.join(", ")
    }

    /// Records a match of this option; a second match in the same pass fails.
    pub(crate) fn mark_parsed(&mut self) -> Result<()> {
        if self.parsed {
            return Err(ArgError::DuplicateMatch {
                option: self.display_names(),
            });
        }
        self.parsed = true;
        Ok(())
    }

    pub(crate) fn add_result(&mut self, token: String) {
        self.results.push(token);
        self.invoked = false;
    }

    /// Runs the bound conversion once per pass, and only if the option was
    /// matched.
    pub(crate) fn run_conversion(&mut self) -> Result<()> {
        if !self.parsed || self.invoked {
            return Ok(());
        }

        let outcome = (self.convert)(&self.results);
        self.invoked = true;

        outcome.map_err(|err| match err {
            AssignError::Missing { index } => ArgError::MissingArguments {
                option: self.display_names(),
                index,
            },
            AssignError::Conversion {
                index,
                token,
                expected,
            } => ArgError::ConversionFailure {
                option: self.display_names(),
                index,
                token,
                expected: expected.to_string(),
            },
        })
    }
}

impl fmt::Debug for BoundOption<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundOption")
            .field("aliases", &self.aliases)
            .field("kind", &self.kind)
            .field("arity", &self.arity)
            .field("results", &self.results)
            .field("parsed", &self.parsed)
            .field("invoked", &self.invoked)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    fn counting_option(calls: &Cell<usize>) -> BoundOption<'_> {
        BoundOption::new(
            vec!["-n".to_string(), "--number".to_string()],
            "count calls",
            OptionKind::Option,
            1,
            Box::new(move |results: &[String]| {
                calls.set(calls.get() + 1);
                if results.is_empty() {
                    Err(AssignError::Missing { index: 1 })
                } else {
                    Ok(())
                }
            }),
        )
    }

    #[test]
    fn test_mark_parsed_twice_is_duplicate_match() {
        let calls = Cell::new(0);
        let mut option = counting_option(&calls);
        option.mark_parsed().unwrap();
        assert_eq!(
            option.mark_parsed(),
            Err(ArgError::DuplicateMatch {
                option: "-n, --number".to_string()
            })
        );
    }

    #[test]
    fn test_conversion_skipped_when_not_parsed() {
        let calls = Cell::new(0);
        let mut option = counting_option(&calls);
        option.run_conversion().unwrap();
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_conversion_runs_once() {
        let calls = Cell::new(0);
        let mut option = counting_option(&calls);
        option.mark_parsed().unwrap();
        option.add_result("5".to_string());
        option.run_conversion().unwrap();
        option.run_conversion().unwrap();
        assert_eq!(calls.get(), 1);

        option.add_result("6".to_string());
        option.run_conversion().unwrap();
        assert_eq!(calls.get(), 2);
        assert_eq!(option.results(), ["5", "6"]);
    }

    #[test]
    fn test_missing_values_name_the_option() {
        let calls = Cell::new(0);
        let mut option = counting_option(&calls);
        option.mark_parsed().unwrap();
        let err = option.run_conversion().unwrap_err();
        assert_eq!(
            err,
            ArgError::MissingArguments {
                option: "-n, --number".to_string(),
                index: 1,
            }
        );
        assert_eq!(
            err.to_string(),
            "option -n, --number is not assigned properly starting from argument 1"
        );
    }
}
