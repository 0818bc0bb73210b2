use std::fmt;
use thiserror::Error;

/// Error raised when trying to parse an invalid option.
#[derive(Debug, Clone, Error)]
#[error("unsupported oracle option `{option}`")]
pub struct ParseOptionError {
    option: Box<str>,
}

/// How an [`Oracle`][crate::Oracle] drives the generators it checks.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Compliance {
    /// Full proxying: every yielded value is observed and every input is
    /// delivered to wherever the generator is suspended.
    #[default]
    Textbook,
    /// Reproduce the observations recorded against the reference
    /// interpreter, see [`drive_interleaved`][crate::drive_interleaved].
    Reference,
}

impl fmt::Display for Compliance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Textbook => write!(f, "textbook"),
            Self::Reference => write!(f, "reference"),
        }
    }
}

/// Options that can be provided to an [`Oracle`][crate::Oracle].
#[derive(Debug, Default, Clone)]
pub struct Options {
    /// The compliance mode used when driving.
    pub(crate) compliance: Compliance,
}

impl Options {
    /// Parse an option using the `<option>[=<value>]` syntax.
    ///
    /// ```
    /// use delegation_oracle::{Compliance, Options};
    ///
    /// let mut options = Options::default();
    /// options.parse_option("compliance=reference")?;
    /// assert_eq!(options.compliance(), Compliance::Reference);
    ///
    /// assert!(options.parse_option("compliance=strict").is_err());
    /// assert!(options.parse_option("budget=10").is_err());
    /// # Ok::<_, delegation_oracle::ParseOptionError>(())
    /// ```
    pub fn parse_option(&mut self, option: &str) -> Result<(), ParseOptionError> {
        let (head, tail) = match option.split_once('=') {
            Some((head, tail)) => (head, Some(tail)),
            None => (option, None),
        };

        match (head, tail) {
            ("compliance", Some("textbook")) => {
                self.compliance = Compliance::Textbook;
            }
            ("compliance", Some("reference")) => {
                self.compliance = Compliance::Reference;
            }
            _ => {
                return Err(ParseOptionError {
                    option: option.into(),
                });
            }
        }

        Ok(())
    }

    /// Set the compliance mode. Defaults to [`Compliance::Textbook`].
    pub fn set_compliance(&mut self, compliance: Compliance) {
        self.compliance = compliance;
    }

    /// Get the compliance mode.
    pub fn compliance(&self) -> Compliance {
        self.compliance
    }
}
