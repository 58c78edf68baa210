//! Argument matching against an option table.
//!
//! Tokens are scanned once, left to right, with no backtracking. A token that
//! is a declared spelling is consumed as that option, together with the next
//! token when the option takes a value. Every other token is positional.

use std::collections::BTreeMap;

use tracing::debug;

use crate::error::{ArgError, Result};
use crate::grammar::OptionTable;
use crate::types::OptionId;

/// Values captured by one parse.
///
/// Values are keyed by [`OptionId`], so an option typed through either of its
/// spellings accumulates in one list. Flags record an empty string per
/// occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArgs {
    values: BTreeMap<OptionId, Vec<String>>,
    positional: Vec<String>,
}

impl ParsedArgs {
    /// Records one occurrence of an option.
    pub fn push_value(&mut self, id: OptionId, value: String) {
        self.values.entry(id).or_default().push(value);
    }

    pub fn push_positional(&mut self, arg: String) {
        self.positional.push(arg);
    }

    /// Captured values of `id`, in argument order.
    pub fn values(&self, id: OptionId) -> &[String] {
        self.values.get(&id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of times `id` was supplied.
    pub fn count(&self, id: OptionId) -> usize {
        self.values(id).len()
    }

    pub fn contains(&self, id: OptionId) -> bool {
        self.count(id) > 0
    }

    /// Arguments that matched no declared spelling, in order.
    pub fn positional(&self) -> &[String] {
        &self.positional
    }

    /// Iterates supplied options in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (OptionId, &[String])> {
        self.values.iter().map(|(id, values)| (*id, values.as_slice()))
    }

    pub fn clear(&mut self) {
        self.values.clear();
        self.positional.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.positional.is_empty()
    }
}

/// Matches `args` (program name excluded) against `table`.
///
/// # Errors
///
/// - [`MissingParameter`](ArgError::MissingParameter) when an option that
///   takes a value is the last token.
/// - [`BadArgument`](ArgError::BadArgument) when a value does not match the
///   option's pattern.
///
/// # Examples
///
/// ```
/// use optgroup_core::{OptionTable, match_args};
///
/// let table: OptionTable = "? -n --count <int>\n? -v".parse().unwrap();
/// let parsed = match_args(&table, ["in.txt", "--count", "3", "-v"]).unwrap();
///
/// let count = table.lookup("-n").unwrap();
/// assert_eq!(parsed.values(count), ["3"]);
/// assert_eq!(parsed.positional(), ["in.txt"]);
/// ```
pub fn match_args<I, S>(table: &OptionTable, args: I) -> Result<ParsedArgs>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut parsed = ParsedArgs::default();
    let mut tokens = args.into_iter().map(Into::into);

    while let Some(token) = tokens.next() {
        let Some(id) = table.lookup(&token) else {
            debug!(token = %token, "Positional argument");
            parsed.push_positional(token);
            continue;
        };
        let Some(spec) = table.get(id) else {
            parsed.push_positional(token);
            continue;
        };

        let value = match &spec.param {
            Some(pattern) => {
                let value = tokens.next().ok_or_else(|| ArgError::MissingParameter {
                    option: token.clone(),
                })?;
                if !pattern.is_match(&value) {
                    return Err(ArgError::BadArgument {
                        option: token,
                        expected: pattern.declared.clone(),
                        actual: value,
                    });
                }
                value
            }
            None => String::new(),
        };

        debug!(token = %token, option = spec.canonical(), value = %value, "Matched option");
        parsed.push_value(id, value);
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(grammar: &str) -> OptionTable {
        grammar.parse().expect("grammar should load")
    }

    #[test]
    fn test_flag_records_empty_value() {
        let table = table("! -v");
        let parsed = match_args(&table, ["-v"]).unwrap();
        assert_eq!(parsed.values(OptionId(0)), [""]);
        assert!(parsed.positional().is_empty());
    }

    #[test]
    fn test_positional_interleaving() {
        let table = table("? -v");
        let parsed = match_args(&table, ["foo", "-v", "bar"]).unwrap();
        assert_eq!(parsed.positional(), ["foo", "bar"]);
        assert!(parsed.contains(OptionId(0)));
    }

    #[test]
    fn test_value_is_consumed_even_if_it_looks_like_an_option() {
        let table = table("? -e <string>\n? -v");
        let parsed = match_args(&table, ["-e", "-v"]).unwrap();
        assert_eq!(parsed.values(OptionId(0)), ["-v"]);
        assert!(!parsed.contains(OptionId(1)));
    }

    #[test]
    fn test_missing_parameter() {
        let table = table("? -o --output <string>");
        let err = match_args(&table, ["--output"]).unwrap_err();
        match err {
            ArgError::MissingParameter { option } => assert_eq!(option, "--output"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_bad_argument_names_pattern_and_value() {
        let table = table("! -n <int>");
        let err = match_args(&table, ["-n", "abc"]).unwrap_err();
        match err {
            ArgError::BadArgument {
                option,
                expected,
                actual,
            } => {
                assert_eq!(option, "-n");
                assert_eq!(expected, "int");
                assert_eq!(actual, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_both_spellings_accumulate_under_one_identity() {
        let table = table("?+ -I --include <string>");
        let parsed = match_args(&table, ["-I", "a", "--include", "b", "-I", "c"]).unwrap();
        assert_eq!(parsed.values(OptionId(0)), ["a", "b", "c"]);
    }

    #[test]
    fn test_unknown_dashed_tokens_are_positional() {
        let table = table("? -v");
        let parsed = match_args(&table, ["--verbose", "-"]).unwrap();
        assert_eq!(parsed.positional(), ["--verbose", "-"]);
        assert!(!parsed.contains(OptionId(0)));
    }

    #[test]
    fn test_clear_resets_everything() {
        let table = table("? -v");
        let mut parsed = match_args(&table, ["-v", "x"]).unwrap();
        assert!(!parsed.is_empty());
        parsed.clear();
        assert!(parsed.is_empty());
    }
}
