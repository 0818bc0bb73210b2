use crate::Value;

/// The state of a generator after it has been resumed.
///
/// ```
/// use delegation_oracle::{GeneratorFn, GeneratorState, Value};
///
/// let f = GeneratorFn::generator("f")
///     .yield_into(1i64, "n")
///     .ret(delegation_oracle::Expr::local("n"))
///     .build();
///
/// let mut generator = f.call();
///
/// // Initial resume takes the start signal.
/// assert_eq!(generator.next()?, GeneratorState::Yielded(Value::from(1i64)));
///
/// // Additional resumes send a value into the generator.
/// assert_eq!(
///     generator.resume(Value::from(42i64))?,
///     GeneratorState::Complete(Value::from(42i64))
/// );
/// # Ok::<_, delegation_oracle::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum GeneratorState {
    /// The generator yielded.
    Yielded(Value),
    /// The generator completed.
    Complete(Value),
}

impl GeneratorState {
    /// Test if the state is yielded.
    pub fn is_yielded(&self) -> bool {
        matches!(self, Self::Yielded(..))
    }

    /// Test if the state is complete.
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete(..))
    }
}
