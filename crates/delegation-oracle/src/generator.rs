use crate::delegation::Delegation;
use crate::{
    Bind, Error, ErrorKind, ExecutionState, Expr, GeneratorFn, GeneratorState, Step, Suspension,
    Value,
};
use hashbrown::HashMap;
use std::fmt;
use std::iter;

/// A generator produced by calling a [`GeneratorFn`].
///
/// The first resumption must use the start signal ([`Value::Unit`]). Every
/// following resumption delivers its input to the point where the generator
/// is suspended: the yield step it stopped at, or the delegation target it is
/// currently forwarding to.
pub struct Generator {
    function: GeneratorFn,
    /// Index of the current step.
    ip: usize,
    locals: HashMap<Box<str>, Value>,
    state: ExecutionState,
    delegation: Option<Box<Delegation>>,
}

impl Generator {
    pub(crate) fn new(function: GeneratorFn) -> Self {
        Self {
            function,
            ip: 0,
            locals: HashMap::new(),
            state: ExecutionState::Created,
            delegation: None,
        }
    }

    /// The function this generator was produced from.
    pub fn function(&self) -> &GeneratorFn {
        &self.function
    }

    /// The current state of the generator.
    pub fn state(&self) -> ExecutionState {
        self.state
    }

    /// Resume the generator with the start signal, which is the same as
    /// resuming it with [`Value::Unit`].
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<GeneratorState, Error> {
        self.resume(Value::Unit)
    }

    /// Resume the generator with a value and get the next generator state.
    #[tracing::instrument(skip_all, fields(function = self.function.name(), input = %value))]
    pub fn resume(&mut self, value: Value) -> Result<GeneratorState, Error> {
        let resumed = match self.state {
            ExecutionState::Created => {
                if !value.is_unit() {
                    return Err(Error::from(ErrorKind::JustStarted { value }));
                }

                None
            }
            ExecutionState::Suspended(suspension) => Some(suspension),
            ExecutionState::Running => {
                return Err(Error::from(ErrorKind::GeneratorFailed));
            }
            ExecutionState::Completed => {
                return Err(Error::from(ErrorKind::GeneratorComplete));
            }
            ExecutionState::Failed => {
                return Err(Error::from(ErrorKind::GeneratorFailed));
            }
        };

        self.state = ExecutionState::Running;

        match self.run(resumed, value) {
            Ok(GeneratorState::Yielded(value)) => {
                self.state = ExecutionState::Suspended(match self.delegation {
                    Some(..) => Suspension::Delegated,
                    None => Suspension::Direct,
                });

                tracing::trace!(state = %self.state, yielded = %value);
                Ok(GeneratorState::Yielded(value))
            }
            Ok(GeneratorState::Complete(value)) => {
                self.state = ExecutionState::Completed;
                self.locals.clear();
                tracing::trace!(completion = %value, "completed");
                Ok(GeneratorState::Complete(value))
            }
            Err(error) => {
                self.state = ExecutionState::Failed;
                self.delegation = None;
                self.locals.clear();
                tracing::debug!(%error, "generator failed");
                Err(error)
            }
        }
    }

    fn run(&mut self, resumed: Option<Suspension>, input: Value) -> Result<GeneratorState, Error> {
        match resumed {
            None => self.function.check_contract()?,
            Some(Suspension::Direct) => self.complete_step(input)?,
            Some(Suspension::Delegated) => {
                let Some(delegation) = self.delegation.as_mut() else {
                    return Err(Error::from(ErrorKind::GeneratorFailed));
                };

                tracing::trace!(forwarded = %input);

                match delegation.resume(input)? {
                    GeneratorState::Yielded(value) => {
                        return Ok(GeneratorState::Yielded(value));
                    }
                    GeneratorState::Complete(value) => {
                        tracing::trace!(result = %value, "delegation completed");
                        self.delegation = None;
                        self.complete_step(value)?;
                    }
                }
            }
        }

        let function = self.function.clone();

        while let Some(step) = function.steps().get(self.ip) {
            match step {
                Step::Yield { value, .. } => {
                    let value = self.eval(value)?;
                    return Ok(GeneratorState::Yielded(value));
                }
                Step::Delegate { target, .. } => {
                    tracing::trace!(%target, "delegating");

                    let mut delegation = Delegation::new(target);

                    match delegation.resume(Value::Unit)? {
                        GeneratorState::Yielded(value) => {
                            self.delegation = Some(Box::new(delegation));
                            return Ok(GeneratorState::Yielded(value));
                        }
                        GeneratorState::Complete(value) => {
                            tracing::trace!(result = %value, "delegation completed");
                            self.complete_step(value)?;
                        }
                    }
                }
                Step::Record { log, value } => {
                    log.push(self.eval(value)?);
                    self.ip += 1;
                }
                Step::Return(value) => {
                    let value = self.eval(value)?;
                    self.ip = function.steps().len();
                    return Ok(GeneratorState::Complete(value));
                }
            }
        }

        Ok(GeneratorState::Complete(Value::Unit))
    }

    /// Deliver the value produced by the suspending step at the current
    /// instruction and move past it.
    fn complete_step(&mut self, value: Value) -> Result<(), Error> {
        let bind = match self.function.steps().get(self.ip) {
            Some(Step::Yield { bind, .. } | Step::Delegate { bind, .. }) => bind,
            _ => return Err(Error::from(ErrorKind::GeneratorFailed)),
        };

        match bind {
            Bind::Discard => (),
            Bind::Local(name) => {
                self.locals.insert(name.clone(), value);
            }
            Bind::Log(log) => log.push(value),
        }

        self.ip += 1;
        Ok(())
    }

    fn eval(&self, expr: &Expr) -> Result<Value, Error> {
        Ok(match expr {
            Expr::Value(value) => value.clone(),
            Expr::Local(name) => match self.locals.get(name) {
                Some(value) => value.clone(),
                None => {
                    return Err(Error::from(ErrorKind::MissingLocal {
                        name: name.to_string(),
                    }))
                }
            },
            Expr::Tuple(items) => Value::Tuple(
                items
                    .iter()
                    .map(|item| self.eval(item))
                    .collect::<Result<_, _>>()?,
            ),
        })
    }
}

impl IntoIterator for Generator {
    type Item = Result<Value, Error>;
    type IntoIter = Iter;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        Iter {
            generator: Some(self),
        }
    }
}

/// An iterator which drives a generator with the start signal only, the way
/// a `for` loop does.
///
/// Stops after the generator completes or fails.
pub struct Iter {
    generator: Option<Generator>,
}

impl iter::Iterator for Iter {
    type Item = Result<Value, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let generator = self.generator.as_mut()?;

        match generator.next() {
            Ok(GeneratorState::Yielded(value)) => Some(Ok(value)),
            Ok(GeneratorState::Complete(..)) => {
                self.generator = None;
                None
            }
            Err(error) => {
                self.generator = None;
                Some(Err(error))
            }
        }
    }
}

impl fmt::Debug for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generator")
            .field("function", &self.function.name())
            .field("state", &self.state)
            .finish()
    }
}
