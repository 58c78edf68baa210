//! Option table type definitions.
//!
//! This module defines the data model produced by the grammar loader: one
//! [`OptionSpec`] per declaration line, its [`Group`] membership, and the
//! compiled [`ParamPattern`] that values must match. The types serialize with
//! [`serde`] so a loaded table can be dumped as JSON or YAML.

use std::fmt;

use regex::Regex;
use serde::Serialize;

/// Stable identity of an option: its position in declaration order.
///
/// Both spellings of a declaration resolve to the same `OptionId`, so values
/// are recorded under one identity regardless of which spelling was typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct OptionId(pub usize);

/// Joint presence policy of a group.
///
/// # Examples
///
/// ```
/// use optgroup_core::GroupKind;
///
/// assert_eq!(GroupKind::default(), GroupKind::Ior);
/// assert_eq!(GroupKind::from_marker('^'), Some(GroupKind::Xor));
/// assert_eq!(GroupKind::And.marker(), '&');
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GroupKind {
    /// Inclusive or: any or all members (the default).
    #[default]
    Ior,
    /// All non-optional members together.
    And,
    /// At most one member.
    Xor,
}

impl GroupKind {
    /// Parses a grammar group marker (`|`, `&`, `^`).
    pub fn from_marker(marker: char) -> Option<Self> {
        match marker {
            '|' => Some(Self::Ior),
            '&' => Some(Self::And),
            '^' => Some(Self::Xor),
            _ => None,
        }
    }

    /// Returns the grammar marker for this kind.
    pub fn marker(self) -> char {
        match self {
            Self::Ior => '|',
            Self::And => '&',
            Self::Xor => '^',
        }
    }
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ior => f.write_str("IOR"),
            Self::And => f.write_str("AND"),
            Self::Xor => f.write_str("XOR"),
        }
    }
}

/// Group membership of an option: a `(kind, number)` pair.
///
/// Group number `0` means "ungrouped"; such options are never subject to a
/// joint presence check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
pub struct Group {
    pub kind: GroupKind,
    pub number: u8,
}

impl Group {
    pub fn new(kind: GroupKind, number: u8) -> Self {
        Self { kind, number }
    }

    /// Returns `true` for groups `1`–`9`.
    pub fn is_numbered(&self) -> bool {
        self.number != 0
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} group {}", self.kind, self.number)
    }
}

const INT_PATTERN: &str = r"[+-]?[0-9]+";
const REAL_PATTERN: &str = r"[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?";
const STRING_PATTERN: &str = r"(?s:.*)";

/// Expands a named pattern alias (`int`, `real`, `float`, `string`).
///
/// Returns `None` for anything else, which is then used as a literal regex.
pub fn expand_alias(name: &str) -> Option<&'static str> {
    match name {
        "int" => Some(INT_PATTERN),
        "real" | "float" => Some(REAL_PATTERN),
        "string" => Some(STRING_PATTERN),
        _ => None,
    }
}

/// A value pattern declared as `<...>` in the grammar, compiled once.
///
/// The regex is anchored so a value must match it in full.
///
/// # Examples
///
/// ```
/// use optgroup_core::ParamPattern;
///
/// let int = ParamPattern::new("int").unwrap();
/// assert!(int.is_match("-42"));
/// assert!(!int.is_match("42abc"));
///
/// let choice = ParamPattern::new("json|yaml").unwrap();
/// assert!(choice.is_match("yaml"));
/// assert!(!choice.is_match("toml"));
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ParamPattern {
    /// Pattern text as declared between the angle brackets.
    pub declared: String,
    /// Regex the declared text resolves to (alias-expanded).
    pub expanded: String,
    #[serde(skip)]
    regex: Regex,
}

impl ParamPattern {
    /// Resolves aliases and compiles the anchored regex.
    ///
    /// The expanded text must compile on its own, so an unbalanced
    /// declaration cannot close the anchoring group.
    pub fn new(declared: &str) -> Result<Self, regex::Error> {
        let expanded = expand_alias(declared).unwrap_or(declared).to_string();
        Regex::new(&expanded)?;
        let regex = Regex::new(&format!("^(?:{expanded})$"))?;
        Ok(Self {
            declared: declared.to_string(),
            expanded,
            regex,
        })
    }

    /// Returns `true` if `value` matches the whole pattern.
    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }

    /// Returns `true` if the pattern was declared through a named alias.
    pub fn is_alias(&self) -> bool {
        expand_alias(&self.declared).is_some()
    }
}

impl PartialEq for ParamPattern {
    fn eq(&self, other: &Self) -> bool {
        self.declared == other.declared
    }
}

impl Eq for ParamPattern {}

/// One declared option.
///
/// `spellings[0]` is the primary spelling and doubles as the canonical key
/// used in messages; an optional second entry is the alternate spelling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionSpec {
    pub spellings: Vec<String>,
    pub optional: bool,
    pub group: Group,
    pub unique: bool,
    pub param: Option<ParamPattern>,
    pub help: String,
}

impl OptionSpec {
    /// Creates an optional, ungrouped, unique flag.
    ///
    /// # Examples
    ///
    /// ```
    /// use optgroup_core::{Group, GroupKind, OptionSpec};
    ///
    /// let spec = OptionSpec::flag("-v")
    ///     .with_alias("--verbose")
    ///     .with_group(Group::new(GroupKind::Xor, 1))
    ///     .with_help("Be chatty");
    /// assert_eq!(spec.canonical(), "-v");
    /// assert!(spec.matches("--verbose"));
    /// assert!(!spec.takes_value());
    /// ```
    pub fn flag(spelling: &str) -> Self {
        Self {
            spellings: vec![spelling.to_string()],
            optional: true,
            group: Group::default(),
            unique: true,
            param: None,
            help: String::new(),
        }
    }

    pub fn with_alias(mut self, spelling: &str) -> Self {
        self.spellings.push(spelling.to_string());
        self
    }

    pub fn with_group(mut self, group: Group) -> Self {
        self.group = group;
        self
    }

    pub fn with_param(mut self, param: ParamPattern) -> Self {
        self.param = Some(param);
        self
    }

    pub fn with_help(mut self, help: &str) -> Self {
        self.help = help.to_string();
        self
    }

    /// Marks the option as mandatory.
    pub fn required(mut self) -> Self {
        self.optional = false;
        self
    }

    /// Allows the option to appear more than once.
    pub fn repeatable(mut self) -> Self {
        self.unique = false;
        self
    }

    /// Returns the canonical key (the primary spelling).
    pub fn canonical(&self) -> &str {
        self.spellings.first().map(String::as_str).unwrap_or_default()
    }

    /// Returns `true` if `token` is one of this option's spellings.
    pub fn matches(&self, token: &str) -> bool {
        self.spellings.iter().any(|s| s == token)
    }

    /// Returns `true` if the option consumes the following argument.
    pub fn takes_value(&self) -> bool {
        self.param.is_some()
    }

    /// Renders the option back into one grammar line.
    ///
    /// # Examples
    ///
    /// ```
    /// use optgroup_core::{Group, GroupKind, OptionSpec, ParamPattern};
    ///
    /// let spec = OptionSpec::flag("-n")
    ///     .with_alias("--count")
    ///     .with_param(ParamPattern::new("int").unwrap())
    ///     .with_group(Group::new(GroupKind::And, 2))
    ///     .required()
    ///     .repeatable()
    ///     .with_help("How many");
    /// assert_eq!(spec.to_grammar_line(), "!&2+ -n --count <int> | How many");
    /// ```
    pub fn to_grammar_line(&self) -> String {
        let mut line = String::new();
        line.push(if self.optional { '?' } else { '!' });
        line.push(self.group.kind.marker());
        if self.group.is_numbered() {
            line.push_str(&self.group.number.to_string());
        }
        line.push(if self.unique { '-' } else { '+' });
        for spelling in &self.spellings {
            line.push(' ');
            line.push_str(spelling);
        }
        if let Some(param) = &self.param {
            line.push_str(&format!(" <{}>", param.declared));
        }
        if !self.help.is_empty() {
            line.push_str(" | ");
            line.push_str(&self.help);
        }
        line
    }
}
