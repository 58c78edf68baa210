//! Grouped command-line option parsing.
//!
//! Options are declared in a small line-oriented grammar and compiled into an
//! [`OptionTable`]. An [`ArgParser`] then matches an argument vector against
//! the table and validates presence and group constraints:
//!
//! - [`OptionTable`] — grammar loading ([`from_str`](std::str::FromStr),
//!   [`from_reader`](OptionTable::from_reader), [`load`](OptionTable::load))
//!   and dumping ([`to_grammar`](OptionTable::to_grammar)).
//! - [`match_args`] — single left-to-right scan into [`ParsedArgs`].
//! - [`check_constraints`] — mandatory, uniqueness, AND, XOR and (optionally)
//!   IOR group checks, reported as [`ConstraintError`]s.
//! - [`ArgParser::get`] / [`ArgParser::get_vec`] — typed value access.
//!
//! # Example
//!
//! ```
//! use optgroup_core::*;
//!
//! let grammar = "\
//! // input and output
//! ! -i --input <string>     | Input file
//! ?&1 -o --output <string>  | Output file
//! !&1 -f --format <json|yaml>  | Output format
//! ?+ -v --verbose           | More output
//! ";
//!
//! let mut parser: ArgParser = grammar.parse().unwrap();
//! parser
//!     .parse(["-i", "in.txt", "-o", "out.json", "-f", "json", "-v", "-v", "extra"])
//!     .unwrap();
//!
//! assert_eq!(parser.get::<String>("--input").unwrap(), "in.txt");
//! assert_eq!(parser.count("-v").unwrap(), 2);
//! assert_eq!(parser.positional(), ["extra"]);
//!
//! // -o is in AND group 1 with the mandatory -f
//! let err = parser.parse(["-i", "in.txt", "-o", "out.json"]).unwrap_err();
//! assert!(matches!(
//!     err,
//!     ArgError::Constraint(ConstraintError::AndGroupIncomplete { group: 1, .. })
//! ));
//! ```

mod accessor;
mod config;
mod error;
mod grammar;
mod help;
mod matcher;
mod parser;
mod types;
mod validate;

pub use config::{IorPolicy, ParserConfig};
pub use error::{ArgError, Result};
pub use grammar::OptionTable;
pub use help::render_help;
pub use matcher::{ParsedArgs, match_args};
pub use parser::{ArgParser, ParseOutcome, ParseReport};
pub use types::*;
pub use validate::{ConstraintError, check_constraints};
