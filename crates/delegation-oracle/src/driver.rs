use crate::{Error, ErrorKind, Generator, GeneratorState, Value};
use serde::{Deserialize, Serialize};

/// Everything a driver observed while driving a generator to completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    /// Values yielded to the driver, as recorded by the driver.
    pub yielded: Vec<Value>,
    /// Values delivered into the generator after the start signal.
    pub sent: Vec<Value>,
    /// The completion value of the generator.
    pub completion: Value,
    /// Inputs which were left over when the generator completed.
    pub unused: usize,
}

/// Drive a generator to completion.
///
/// The generator is first resumed with the start signal, and then once with
/// each input in order, one input per yielded value.
///
/// # Errors
///
/// Errors with [`ErrorKind::ExhaustedInput`] if the inputs run out before the
/// generator completes, and with whatever fault the generator raises.
#[tracing::instrument(skip_all, fields(function = generator.function().name()))]
pub fn drive<I>(generator: &mut Generator, inputs: I) -> Result<Transcript, Error>
where
    I: IntoIterator<Item = Value>,
{
    let mut inputs = inputs.into_iter();
    let mut yielded = Vec::new();
    let mut sent = Vec::new();

    let mut state = generator.next()?;

    loop {
        let value = match state {
            GeneratorState::Yielded(value) => value,
            GeneratorState::Complete(completion) => {
                return Ok(Transcript {
                    yielded,
                    sent,
                    completion,
                    unused: inputs.count(),
                });
            }
        };

        yielded.push(value);

        let Some(input) = inputs.next() else {
            return Err(Error::from(ErrorKind::ExhaustedInput {
                yielded: yielded.len(),
            }));
        };

        sent.push(input.clone());
        state = generator.resume(input)?;
    }
}

/// Drive a generator by alternating `next()` and `send(input)`.
///
/// Only the values produced by `next()` are recorded as yielded. The value
/// produced by each `send(input)` is discarded, and every `next()` after the
/// first delivers [`Value::Unit`] into the generator. This reproduces the
/// observations recorded against the reference interpreter.
///
/// # Errors
///
/// Errors with [`ErrorKind::ExhaustedInput`] if the inputs run out before the
/// generator completes, and with whatever fault the generator raises.
#[tracing::instrument(skip_all, fields(function = generator.function().name()))]
pub fn drive_interleaved<I>(generator: &mut Generator, inputs: I) -> Result<Transcript, Error>
where
    I: IntoIterator<Item = Value>,
{
    let mut inputs = inputs.into_iter();
    let mut yielded = Vec::new();
    let mut sent = Vec::new();

    let mut state = generator.next()?;

    loop {
        match state {
            GeneratorState::Yielded(value) => yielded.push(value),
            GeneratorState::Complete(completion) => {
                return Ok(Transcript {
                    yielded,
                    sent,
                    completion,
                    unused: inputs.count(),
                });
            }
        }

        let Some(input) = inputs.next() else {
            return Err(Error::from(ErrorKind::ExhaustedInput {
                yielded: yielded.len(),
            }));
        };

        sent.push(input.clone());

        if let GeneratorState::Complete(completion) = generator.resume(input)? {
            return Ok(Transcript {
                yielded,
                sent,
                completion,
                unused: inputs.count(),
            });
        }

        tracing::trace!("discarding value produced by send");
        sent.push(Value::Unit);
        state = generator.next()?;
    }
}
