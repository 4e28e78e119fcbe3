//! The wrapped command line.

use std::fmt;

/// Executable plus arguments, as handed over on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandSpec {
    argv: Vec<String>,
}

impl CommandSpec {
    pub fn new(argv: Vec<String>) -> Self {
        Self { argv }
    }

    /// The executable, if any was given.
    pub fn program(&self) -> Option<&str> {
        self.argv.first().map(String::as_str)
    }

    pub fn args(&self) -> &[String] {
        self.argv.get(1..).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.argv.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for CommandSpec {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.argv.join(" "))
    }
}
