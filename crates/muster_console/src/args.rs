//! Command-line tokenization and argument access.
//!
//! Input is split on whitespace; double quotes group words into a single
//! token. An unquoted token of the form `key=value` is an option, every
//! other token is positional.

use std::collections::BTreeMap;
use std::str::FromStr;

use muster_foundation::{Error, Result};

/// One token of command input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    /// The token text, quotes removed.
    pub text: String,
    /// Whether the token was quoted.
    pub quoted: bool,
}

impl Token {
    fn word(text: String) -> Self {
        Self {
            text,
            quoted: false,
        }
    }

    fn quoted(text: String) -> Self {
        Self { text, quoted: true }
    }
}

/// Splits a command line into tokens.
///
/// Case is preserved. An unterminated quote runs to the end of the line.
#[must_use]
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = input.chars();
    let mut current = String::new();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if !current.is_empty() {
                    tokens.push(Token::word(std::mem::take(&mut current)));
                }
                let mut quoted = String::new();
                for c in chars.by_ref() {
                    if c == '"' {
                        break;
                    }
                    quoted.push(c);
                }
                tokens.push(Token::quoted(quoted));
            }
            c if c.is_whitespace() => {
                if !current.is_empty() {
                    tokens.push(Token::word(std::mem::take(&mut current)));
                }
            }
            c => current.push(c),
        }
    }

    if !current.is_empty() {
        tokens.push(Token::word(current));
    }

    tokens
}

/// Parsed command arguments.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Args {
    positional: Vec<String>,
    options: BTreeMap<String, String>,
}

impl Args {
    /// Splits tokens into positional arguments and `key=value` options.
    ///
    /// Option keys are lowercased. Quoted tokens are always positional.
    #[must_use]
    pub fn from_tokens(tokens: &[Token]) -> Self {
        let mut args = Self::default();
        for token in tokens {
            match token.text.split_once('=') {
                Some((key, value)) if !token.quoted && !key.is_empty() => {
                    args.options.insert(key.to_lowercase(), value.to_string());
                }
                _ => args.positional.push(token.text.clone()),
            }
        }
        args
    }

    /// Tokenizes and parses an argument string.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        Self::from_tokens(&tokenize(input))
    }

    /// Returns the number of positional arguments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positional.len()
    }

    /// Returns true if there are no positional arguments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positional.is_empty()
    }

    /// Returns a positional argument.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.positional.get(index).map(String::as_str)
    }

    /// Returns the positional arguments from `index` on.
    #[must_use]
    pub fn tail(&self, index: usize) -> &[String] {
        self.positional.get(index..).unwrap_or_default()
    }

    /// Joins the positional arguments from `index` on with single spaces.
    ///
    /// Lets unquoted multi-word names through, e.g. `show hero Lucon the Bold`.
    #[must_use]
    pub fn rest(&self, index: usize) -> String {
        self.tail(index).join(" ")
    }

    /// Returns an option value.
    #[must_use]
    pub fn option(&self, key: &str) -> Option<&str> {
        self.options.get(&key.to_lowercase()).map(String::as_str)
    }

    /// Parses an option value.
    ///
    /// # Errors
    ///
    /// Returns the parse error of `T` when the value is malformed.
    pub fn option_parsed<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.option(key)
            .map(|raw| {
                raw.parse::<T>().map_err(|e| {
                    Error::invalid_argument(format!("invalid value for '{key}': {e}"))
                })
            })
            .transpose()
    }

    /// Iterates options in key order.
    pub fn options(&self) -> impl Iterator<Item = (&str, &str)> {
        self.options.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
