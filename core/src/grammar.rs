//! Option grammar loading.
//!
//! A grammar declares one option per line:
//!
//! ```text
//! [?!][|&^]?[1-9]?[-+]?  <spelling> [<spelling>] [<pattern>] [| help text]
//! ```
//!
//! - `?` optional, `!` mandatory
//! - `|` inclusive-or group (default), `&` AND group, `^` XOR group
//! - `1`–`9` group number (default `0`, ungrouped)
//! - `-` unique (default), `+` repeatable
//! - `<pattern>` a value pattern: `int`, `real`, `float`, `string`, or a regex
//! - `| help text` trailing description
//!
//! `//` starts a comment that runs to the end of the line, and blank lines are
//! ignored. Errors report 1-based line numbers.
//!
//! # Examples
//!
//! ```
//! use optgroup_core::OptionTable;
//!
//! let table: OptionTable = "\
//! ! -i --input <string>   | Input file
//! ?^1 -j --json           | Emit JSON
//! ?^1 -y --yaml           | Emit YAML   // mutually exclusive with -j
//! ?+ -I <string>          | Include path
//! "
//! .parse()
//! .unwrap();
//!
//! assert_eq!(table.len(), 4);
//! assert_eq!(table.lookup("--input"), table.lookup("-i"));
//! assert_eq!(table.spec("-y").unwrap().help, "Emit YAML");
//! ```

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Serialize, Serializer};
use tracing::debug;

use crate::error::{ArgError, Result};
use crate::types::{Group, GroupKind, OptionId, OptionSpec, ParamPattern};

static LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<req>[?!])(?P<kind>[|&^])?(?P<num>[1-9])?(?P<uniq>[-+])?\s+(?P<first>-[^\s<|]*)(?:\s+(?P<second>-[^\s<|]*))?(?:\s+<(?P<param>.+?)>)?\s*(?:\|(?P<help>.*))?$",
    )
    .expect("static regex must compile")
});

/// The declared options, in declaration order, with a spelling index.
#[derive(Debug, Clone, Default)]
pub struct OptionTable {
    specs: Vec<OptionSpec>,
    index: HashMap<String, OptionId>,
}

impl OptionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a grammar file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](ArgError::IoError) if the file cannot be read, or
    /// any grammar error produced by [`from_reader`](Self::from_reader).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Loads a grammar from a line-oriented reader.
    ///
    /// # Errors
    ///
    /// - [`Grammar`](ArgError::Grammar) for a line that does not follow the
    ///   declaration syntax.
    /// - [`InvalidPattern`](ArgError::InvalidPattern) for a `<...>` that is
    ///   neither an alias nor a valid regex.
    /// - [`DuplicateSpelling`](ArgError::DuplicateSpelling) when a spelling
    ///   is declared twice.
    pub fn from_reader(reader: impl BufRead) -> Result<Self> {
        let mut table = Self::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            if let Some(spec) = parse_line(idx + 1, &line)? {
                table.insert(idx + 1, spec)?;
            }
        }
        debug!(options = table.len(), "Loaded option grammar");
        Ok(table)
    }

    /// Appends a programmatically built option.
    ///
    /// A duplicate spelling is reported with the line number the option would
    /// have had in a grammar file.
    pub fn push(&mut self, spec: OptionSpec) -> Result<OptionId> {
        let line = self.specs.len() + 1;
        self.insert(line, spec)
    }

    fn insert(&mut self, line: usize, spec: OptionSpec) -> Result<OptionId> {
        let id = OptionId(self.specs.len());
        for (pos, spelling) in spec.spellings.iter().enumerate() {
            let repeated_in_line = spec.spellings[..pos].contains(spelling);
            if repeated_in_line || self.index.contains_key(spelling) {
                return Err(ArgError::DuplicateSpelling {
                    line,
                    spelling: spelling.clone(),
                });
            }
        }
        for spelling in &spec.spellings {
            self.index.insert(spelling.clone(), id);
        }
        debug!(line, option = spec.canonical(), group = %spec.group, "Declared option");
        self.specs.push(spec);
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Resolves a spelling to its option identity.
    pub fn lookup(&self, spelling: &str) -> Option<OptionId> {
        self.index.get(spelling).copied()
    }

    /// Returns the option declared under `spelling`.
    pub fn spec(&self, spelling: &str) -> Option<&OptionSpec> {
        self.lookup(spelling).map(|id| &self.specs[id.0])
    }

    pub fn get(&self, id: OptionId) -> Option<&OptionSpec> {
        self.specs.get(id.0)
    }

    /// Iterates options in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (OptionId, &OptionSpec)> {
        self.specs
            .iter()
            .enumerate()
            .map(|(idx, spec)| (OptionId(idx), spec))
    }

    /// Iterates the options that belong to `group`.
    pub fn members(&self, group: Group) -> impl Iterator<Item = (OptionId, &OptionSpec)> {
        self.iter().filter(move |(_, spec)| spec.group == group)
    }

    /// Renders the whole table back into the grammar language.
    ///
    /// Loading the result yields an equal table.
    ///
    /// # Examples
    ///
    /// ```
    /// use optgroup_core::OptionTable;
    ///
    /// let table: OptionTable = "!&3+ -x --ex <[a-z]+> | Letters".parse().unwrap();
    /// let reloaded: OptionTable = table.to_grammar().parse().unwrap();
    /// assert_eq!(table, reloaded);
    /// ```
    pub fn to_grammar(&self) -> String {
        self.specs
            .iter()
            .map(|spec| spec.to_grammar_line() + "\n")
            .collect()
    }
}

impl PartialEq for OptionTable {
    fn eq(&self, other: &Self) -> bool {
        self.specs == other.specs
    }
}

impl Eq for OptionTable {}

impl FromStr for OptionTable {
    type Err = ArgError;

    fn from_str(grammar: &str) -> Result<Self> {
        Self::from_reader(grammar.as_bytes())
    }
}

impl Serialize for OptionTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.specs.serialize(serializer)
    }
}

/// Strips a trailing `//` comment.
fn strip_comment(line: &str) -> &str {
    match line.find("//") {
        Some(idx) => &line[..idx],
        None => line,
    }
}

/// Parses one grammar line; `Ok(None)` for blank and comment-only lines.
fn parse_line(line_no: usize, raw: &str) -> Result<Option<OptionSpec>> {
    let line = strip_comment(raw).trim();
    if line.is_empty() {
        return Ok(None);
    }

    let grammar_error = || ArgError::Grammar {
        line: line_no,
        text: raw.to_string(),
    };
    let caps = LINE_RE.captures(line).ok_or_else(grammar_error)?;

    let optional = &caps["req"] == "?";
    let kind = caps
        .name("kind")
        .and_then(|m| m.as_str().chars().next())
        .and_then(GroupKind::from_marker)
        .unwrap_or_default();
    let number = caps
        .name("num")
        .and_then(|m| m.as_str().parse::<u8>().ok())
        .unwrap_or(0);
    let unique = caps.name("uniq").is_none_or(|m| m.as_str() == "-");

    let mut spellings = vec![caps["first"].to_string()];
    if let Some(second) = caps.name("second") {
        spellings.push(second.as_str().to_string());
    }

    let param = match caps.name("param") {
        Some(m) => {
            let declared = m.as_str().trim();
            let pattern =
                ParamPattern::new(declared).map_err(|err| ArgError::InvalidPattern {
                    line: line_no,
                    pattern: declared.to_string(),
                    reason: err.to_string(),
                })?;
            Some(pattern)
        }
        None => None,
    };

    let help = caps
        .name("help")
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default();

    Ok(Some(OptionSpec {
        spellings,
        optional,
        group: Group::new(kind, number),
        unique,
        param,
        help,
    }))
}
