//! Typed access to captured option values.
//!
//! Keys may be any declared spelling of an option. Values are converted with
//! [`FromStr`] on the whole captured string, so a `String` keeps embedded
//! spaces intact.

use std::any::type_name;
use std::str::FromStr;

use crate::error::{ArgError, Result};
use crate::parser::ArgParser;
use crate::types::OptionId;

impl ArgParser {
    fn resolve(&self, key: &str) -> Result<OptionId> {
        self.table
            .lookup(key)
            .ok_or_else(|| ArgError::UnknownOption(key.to_string()))
    }

    /// First value of `key`, converted to `T`.
    ///
    /// # Errors
    ///
    /// - [`UnknownOption`](ArgError::UnknownOption) if `key` is not declared.
    /// - [`NotPresent`](ArgError::NotPresent) if the option was not supplied.
    /// - [`Conversion`](ArgError::Conversion) if the value does not convert.
    ///
    /// # Examples
    ///
    /// ```
    /// use optgroup_core::{ArgError, ArgParser};
    ///
    /// let mut parser: ArgParser = "? -t --title <string>\n? -r <real>".parse().unwrap();
    /// parser.parse(["--title", "two words", "-r", "2.5"]).unwrap();
    ///
    /// assert_eq!(parser.get::<String>("-t").unwrap(), "two words");
    /// assert_eq!(parser.get::<f64>("-r").unwrap(), 2.5);
    /// assert!(matches!(parser.get::<u8>("-r"), Err(ArgError::Conversion { .. })));
    ///
    /// parser.parse(["-r", "1"]).unwrap();
    /// assert!(matches!(parser.get::<String>("--title"), Err(ArgError::NotPresent(_))));
    /// ```
    pub fn get<T>(&self, key: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let id = self.resolve(key)?;
        let value = self
            .parsed
            .values(id)
            .first()
            .ok_or_else(|| ArgError::NotPresent(key.to_string()))?;
        convert(key, value)
    }

    /// Every value of `key`, converted to `T`; empty if never supplied.
    ///
    /// # Errors
    ///
    /// [`UnknownOption`](ArgError::UnknownOption) for an undeclared key and
    /// [`Conversion`](ArgError::Conversion) for the first value that does not
    /// convert.
    ///
    /// # Examples
    ///
    /// ```
    /// use optgroup_core::ArgParser;
    ///
    /// let mut parser: ArgParser = "?+ -p --port <int>".parse().unwrap();
    /// parser.parse(["-p", "80", "--port", "443"]).unwrap();
    /// assert_eq!(parser.get_vec::<u16>("--port").unwrap(), vec![80, 443]);
    ///
    /// parser.parse(Vec::<String>::new()).unwrap();
    /// assert!(parser.get_vec::<u16>("-p").unwrap().is_empty());
    /// ```
    pub fn get_vec<T>(&self, key: &str) -> Result<Vec<T>>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let id = self.resolve(key)?;
        self.parsed
            .values(id)
            .iter()
            .map(|value| convert(key, value))
            .collect()
    }

    /// First value of `key`, or `default` when it was not supplied.
    pub fn get_or<T>(&self, key: &str, default: T) -> Result<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.get(key) {
            Err(ArgError::NotPresent(_)) => Ok(default),
            other => other,
        }
    }

    /// Returns `true` if the option was supplied at least once.
    pub fn is_present(&self, key: &str) -> Result<bool> {
        Ok(self.parsed.contains(self.resolve(key)?))
    }

    /// Number of times the option was supplied.
    pub fn count(&self, key: &str) -> Result<usize> {
        Ok(self.parsed.count(self.resolve(key)?))
    }

    /// Arguments that matched no declared spelling.
    pub fn positional(&self) -> &[String] {
        self.parsed.positional()
    }
}

fn convert<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.parse::<T>().map_err(|err| ArgError::Conversion {
        option: key.to_string(),
        value: value.to_string(),
        target: type_name::<T>(),
        reason: err.to_string(),
    })
}
