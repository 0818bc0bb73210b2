use crate::{Error, ErrorKind, Generator, GeneratorState, Target, Value};
use std::rc::Rc;

/// An active delegation held by a suspended generator.
pub(crate) enum Delegation {
    /// Delegating to a generator, which receives every forwarded input.
    Generator(Generator),
    /// Delegating to a plain iterator, which only accepts the start signal.
    Iter(Sequence),
}

impl Delegation {
    /// Set up a delegation which hasn't been started yet.
    pub(crate) fn new(target: &Target) -> Self {
        match target {
            Target::Generator(function) => Self::Generator(function.call()),
            Target::Iter(values) => Self::Iter(Sequence {
                values: values.clone(),
                index: 0,
            }),
        }
    }

    /// Forward an input to the delegation target.
    pub(crate) fn resume(&mut self, input: Value) -> Result<GeneratorState, Error> {
        match self {
            Self::Generator(generator) => generator.resume(input),
            Self::Iter(sequence) => sequence.resume(input),
        }
    }
}

/// A plain iterator over a fixed sequence of values.
pub(crate) struct Sequence {
    values: Rc<[Value]>,
    index: usize,
}

impl Sequence {
    fn resume(&mut self, input: Value) -> Result<GeneratorState, Error> {
        if !input.is_unit() {
            return Err(Error::from(ErrorKind::UnsupportedSend { value: input }));
        }

        let Some(value) = self.values.get(self.index) else {
            return Ok(GeneratorState::Complete(Value::Unit));
        };

        self.index += 1;
        Ok(GeneratorState::Yielded(value.clone()))
    }
}
