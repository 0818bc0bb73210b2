use crate::Value;
use thiserror::Error;

/// Errors raised while resuming, delegating or driving a generator.
#[derive(Error, Debug)]
#[error(transparent)]
pub struct Error {
    kind: Box<ErrorKind>,
}

impl<E> From<E> for Error
where
    ErrorKind: From<E>,
{
    fn from(err: E) -> Self {
        Self {
            kind: Box::new(ErrorKind::from(err)),
        }
    }
}

impl Error {
    /// Access the underlying error kind.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Convert into the underlying error kind.
    pub fn into_kind(self) -> ErrorKind {
        *self.kind
    }

    /// Test if the error is one of the faults raised by the forwarding and
    /// async contracts, as opposed to misuse of a generator by its driver.
    pub fn is_contract_fault(&self) -> bool {
        matches!(
            &*self.kind,
            ErrorKind::UnsupportedSend { .. }
                | ErrorKind::TypeContract { .. }
                | ErrorKind::ProtocolViolation { .. }
                | ErrorKind::YieldInAsync { .. }
        )
    }
}

/// The kind of error encountered.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A real value was sent to a delegation target which only accepts the
    /// start signal.
    #[error("cannot send `{value}` to a plain iterator, only `()` is accepted")]
    UnsupportedSend {
        /// The value which was sent.
        value: Value,
    },
    /// An untagged generator was composed with an async boundary.
    #[error("`{function}` cannot be composed with {target} across an async boundary")]
    TypeContract {
        /// The function whose contract was violated.
        function: String,
        /// Description of what it was composed with.
        target: String,
    },
    /// A coroutine driven as an awaited task yielded something other than the
    /// "no value" sentinel.
    #[error("task got bad yield `{value}`, only `()` is allowed")]
    ProtocolViolation {
        /// The offending value.
        value: Value,
    },
    /// The driver ran out of inputs before the generator completed.
    #[error("ran out of inputs after {yielded} yielded values")]
    ExhaustedInput {
        /// The number of values yielded before inputs ran out.
        yielded: usize,
    },
    /// A value other than the start signal was used to start a generator.
    #[error("cannot send `{value}` to a just-started generator")]
    JustStarted {
        /// The value which was sent.
        value: Value,
    },
    /// Trying to resume a generator that has completed.
    #[error("cannot resume a generator that has completed")]
    GeneratorComplete,
    /// Trying to resume a generator which previously failed.
    #[error("cannot resume a generator that has failed")]
    GeneratorFailed,
    /// An async function contains a direct yield.
    #[error("async function `{function}` cannot yield directly")]
    YieldInAsync {
        /// The offending function.
        function: String,
    },
    /// An expression referenced a local which has not been bound.
    #[error("missing local `{name}`")]
    MissingLocal {
        /// Name of the local.
        name: String,
    },
}
