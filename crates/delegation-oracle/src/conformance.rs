use crate::{
    drive, drive_interleaved, Compliance, Error, GeneratorFn, Log, Options, Transcript, Value,
};
use std::fmt;
use thiserror::Error;

/// Drives generators according to its [`Options`] and checks them against
/// conformance [`Case`]s.
#[derive(Debug, Default, Clone)]
pub struct Oracle {
    options: Options,
}

impl Oracle {
    /// Construct an oracle with the given options.
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    /// The options of the oracle.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Call the function and drive the generator to completion, using the
    /// configured compliance mode.
    pub fn drive<I>(&self, function: &GeneratorFn, inputs: I) -> Result<Transcript, Error>
    where
        I: IntoIterator<Item = Value>,
    {
        let mut generator = function.call();

        match self.options.compliance {
            Compliance::Textbook => drive(&mut generator, inputs),
            Compliance::Reference => drive_interleaved(&mut generator, inputs),
        }
    }

    /// Run a conformance case and compare what was observed with what it
    /// expects.
    #[tracing::instrument(
        skip_all,
        fields(case = case.name, compliance = %self.options.compliance)
    )]
    pub fn verify(&self, case: &Case) -> Result<Transcript, VerifyError> {
        for (_, log, _) in &case.logs {
            log.clear();
        }

        let transcript = self
            .drive(&case.function, case.inputs.iter().cloned())
            .map_err(|error| VerifyError::Drive {
                case: case.name,
                error,
            })?;

        compare(case.name, "yielded", &case.yielded, &transcript.yielded)?;
        compare(case.name, "completion", &case.completion, &transcript.completion)?;

        for (name, log, expected) in &case.logs {
            compare(case.name, name, expected, &log.snapshot())?;
        }

        tracing::trace!("case passed");
        Ok(transcript)
    }
}

fn compare<T>(case: &'static str, what: &str, expected: &T, actual: &T) -> Result<(), VerifyError>
where
    T: ?Sized + PartialEq + fmt::Debug,
{
    if expected == actual {
        return Ok(());
    }

    Err(VerifyError::Mismatch {
        case,
        what: what.to_owned(),
        expected: format!("{expected:?}"),
        actual: format!("{actual:?}"),
    })
}

/// Error raised when a [`Case`] doesn't hold.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// Driving the generator failed.
    #[error("case `{case}` failed to drive")]
    Drive {
        /// Name of the case.
        case: &'static str,
        /// The runtime fault.
        #[source]
        error: Error,
    },
    /// An observation didn't match the expectation.
    #[error("case `{case}`: expected {what} to be {expected}, but was {actual}")]
    Mismatch {
        /// Name of the case.
        case: &'static str,
        /// The observation which differed.
        what: String,
        /// Rendering of the expected value.
        expected: String,
        /// Rendering of the observed value.
        actual: String,
    },
}

/// A conformance case: a program, the inputs to drive it with, and the
/// observations it is expected to produce.
///
/// ```
/// use delegation_oracle::{Case, GeneratorFn, Log, Oracle, Value};
///
/// let sent = Log::new();
///
/// let function = GeneratorFn::generator("send_only")
///     .yield_into_log(Value::Unit, &sent)
///     .build();
///
/// let case = Case::new("send_only", function)
///     .inputs([42i64])
///     .yielded([Value::Unit])
///     .log("sent", &sent, [42i64]);
///
/// Oracle::default().verify(&case)?;
/// # Ok::<_, delegation_oracle::VerifyError>(())
/// ```
#[derive(Debug, Clone)]
#[must_use = "cases do nothing unless verified"]
pub struct Case {
    name: &'static str,
    function: GeneratorFn,
    inputs: Vec<Value>,
    yielded: Vec<Value>,
    completion: Value,
    logs: Vec<(&'static str, Log, Vec<Value>)>,
}

impl Case {
    /// Construct a case which expects nothing to be yielded, and the
    /// generator to complete with [`Value::Unit`].
    pub fn new(name: &'static str, function: GeneratorFn) -> Self {
        Self {
            name,
            function,
            inputs: Vec::new(),
            yielded: Vec::new(),
            completion: Value::Unit,
            logs: Vec::new(),
        }
    }

    /// The name of the case.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Set the inputs to drive the generator with.
    pub fn inputs<I>(self, inputs: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            ..self
        }
    }

    /// Expect the given values to be recorded as yielded.
    pub fn yielded<I>(self, yielded: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Self {
            yielded: yielded.into_iter().map(Into::into).collect(),
            ..self
        }
    }

    /// Expect the generator to complete with the given value.
    pub fn completion(self, completion: impl Into<Value>) -> Self {
        Self {
            completion: completion.into(),
            ..self
        }
    }

    /// Expect the given log to contain the given values after driving.
    pub fn log<I>(mut self, name: &'static str, log: &Log, expected: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let expected = expected.into_iter().map(Into::into).collect();
        self.logs.push((name, log.clone(), expected));
        self
    }
}
