//! The grouped argument parser.
//!
//! [`ArgParser`] owns an [`OptionTable`] and the results of the most recent
//! parse. Each call to [`ArgParser::parse`] starts from empty results, matches
//! the arguments, then validates mandatory presence and group constraints.

use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

use serde::Serialize;
use tracing::{debug, warn};

use crate::config::ParserConfig;
use crate::error::{ArgError, Result};
use crate::grammar::OptionTable;
use crate::help::render_help;
use crate::matcher::{ParsedArgs, match_args};
use crate::validate::check_constraints;

/// What a successful [`ArgParser::parse`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseOutcome {
    /// Arguments were matched and validated.
    Parsed,
    /// The first argument requested help; nothing was captured.
    HelpRequested,
}

/// Captured values keyed by canonical spelling, for display and dumping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParseReport {
    pub options: BTreeMap<String, Vec<String>>,
    pub positional: Vec<String>,
}

/// Command-line parser driven by an option grammar.
///
/// A parser is not internally synchronized; [`parse`](Self::parse) takes
/// `&mut self`. Share one across threads behind a `Mutex`, or give each
/// thread its own instance.
///
/// # Examples
///
/// ```
/// use optgroup_core::{ArgParser, ParseOutcome};
///
/// let mut parser: ArgParser = "\
/// ! -n --count <int>  | Repetitions
/// ?^1 -j --json       | JSON output
/// ?^1 -y --yaml       | YAML output
/// "
/// .parse()
/// .unwrap();
///
/// let outcome = parser.parse(["--count", "3", "-y", "input.txt"]).unwrap();
/// assert_eq!(outcome, ParseOutcome::Parsed);
/// assert_eq!(parser.get::<u32>("-n").unwrap(), 3);
/// assert!(parser.is_present("--yaml").unwrap());
/// assert_eq!(parser.positional(), ["input.txt"]);
///
/// assert!(parser.parse(["-n", "1", "-j", "-y"]).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ArgParser {
    pub(crate) table: OptionTable,
    config: ParserConfig,
    pub(crate) parsed: ParsedArgs,
}

impl ArgParser {
    pub fn new(table: OptionTable) -> Self {
        Self::with_config(table, ParserConfig::default())
    }

    pub fn with_config(table: OptionTable, config: ParserConfig) -> Self {
        Self {
            table,
            config,
            parsed: ParsedArgs::default(),
        }
    }

    /// Loads the grammar from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(OptionTable::load(path)?))
    }

    pub fn table(&self) -> &OptionTable {
        &self.table
    }

    /// Settings the parser was built with.
    ///
    /// # Examples
    ///
    /// ```
    /// use optgroup_core::{ArgParser, IorPolicy, ParserConfig};
    ///
    /// let config = ParserConfig::default().with_ior_policy(IorPolicy::AtLeastOne);
    /// let parser = ArgParser::with_config("? -v".parse().unwrap(), config);
    /// assert_eq!(parser.config().ior_policy, IorPolicy::AtLeastOne);
    /// assert!(parser.config().is_help_flag("--help"));
    /// ```
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Results of the most recent parse.
    pub fn parsed(&self) -> &ParsedArgs {
        &self.parsed
    }

    /// Parses an argument vector (program name excluded).
    ///
    /// Results of any previous call are discarded first, so a parser can be
    /// reused after an error.
    ///
    /// # Errors
    ///
    /// Matching errors ([`MissingParameter`](ArgError::MissingParameter),
    /// [`BadArgument`](ArgError::BadArgument)) and the first constraint
    /// violation ([`Constraint`](ArgError::Constraint)).
    pub fn parse<I, S>(&mut self, args: I) -> Result<ParseOutcome>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parsed.clear();

        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        if let Some(first) = args.first() {
            if self.config.is_help_flag(first) {
                warn!(flag = %first, "Help requested, skipping argument matching");
                return Ok(ParseOutcome::HelpRequested);
            }
        }

        self.parsed = match_args(&self.table, args)?;

        let violations = check_constraints(&self.table, &self.parsed, self.config.ior_policy);
        if let Some(first) = violations.into_iter().next() {
            return Err(ArgError::Constraint(first));
        }

        debug!(
            options = self.parsed.iter().count(),
            positional = self.parsed.positional().len(),
            "Parsed arguments"
        );
        Ok(ParseOutcome::Parsed)
    }

    /// Renders help for the loaded grammar.
    pub fn help(&self) -> String {
        render_help(&self.table, &self.config)
    }

    /// Snapshot of the captured values under canonical spellings.
    pub fn report(&self) -> ParseReport {
        let options = self
            .parsed
            .iter()
            .filter_map(|(id, values)| {
                let spec = self.table.get(id)?;
                Some((spec.canonical().to_string(), values.to_vec()))
            })
            .collect();
        ParseReport {
            options,
            positional: self.parsed.positional().to_vec(),
        }
    }
}

impl FromStr for ArgParser {
    type Err = ArgError;

    fn from_str(grammar: &str) -> Result<Self> {
        Ok(Self::new(grammar.parse()?))
    }
}
