use serde::{Deserialize, Serialize};
use std::fmt;

/// A value carried over the channels of a generator.
///
/// [`Value::Unit`] is the "no value" sentinel. It is what the start signal
/// and `next()` deliver, and what a plain iterator completes with.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Value {
    /// The "no value" sentinel.
    #[default]
    Unit,
    /// A boolean.
    Bool(bool),
    /// An integer.
    Integer(i64),
    /// A string.
    String(String),
    /// A tuple of values.
    Tuple(Vec<Value>),
}

impl Value {
    /// Construct a tuple value.
    pub fn tuple<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Self::Tuple(values.into_iter().map(Into::into).collect())
    }

    /// Test if the value is the "no value" sentinel.
    pub fn is_unit(&self) -> bool {
        matches!(self, Self::Unit)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unit => write!(f, "()"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s:?}"),
            Self::Tuple(values) => {
                write!(f, "(")?;

                let mut it = values.iter().peekable();

                while let Some(value) = it.next() {
                    write!(f, "{value}")?;

                    if it.peek().is_some() {
                        write!(f, ", ")?;
                    }
                }

                // NB: single-element tuples keep their trailing comma.
                if values.len() == 1 {
                    write!(f, ",")?;
                }

                write!(f, ")")
            }
        }
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Self::Unit
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

#[cfg(test)]
mod tests {
    use super::Value;

    #[test]
    fn test_display() {
        assert_eq!(Value::Unit.to_string(), "()");
        assert_eq!(Value::from("sent 0").to_string(), "\"sent 0\"");
        assert_eq!(Value::tuple([1i64]).to_string(), "(1,)");
        assert_eq!(
            Value::tuple([Value::from("a"), Value::from(true)]).to_string(),
            "(\"a\", true)"
        );
    }
}
