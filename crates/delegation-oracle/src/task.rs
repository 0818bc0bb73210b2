use crate::{Error, ErrorKind, Generator, GeneratorFn, GeneratorState, Value};
use futures_core::future::FusedFuture;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// A generator driven as an awaited task.
///
/// Only functions tagged as coroutine-compatible, or native async functions,
/// can be driven as tasks. Every suspension must carry the "no value"
/// sentinel, which the task treats as a cooperative yield to whatever is
/// polling it. The task always resumes the generator with the sentinel.
///
/// ```
/// use delegation_oracle::{GeneratorFn, Task, Value};
///
/// let sleep = GeneratorFn::coroutine("sleep").yield_value(Value::Unit).build();
///
/// let main = GeneratorFn::async_fn("main")
///     .delegate(sleep)
///     .ret("done")
///     .build();
///
/// let output = futures_executor::block_on(Task::new(&main))?;
/// assert_eq!(output, Value::from("done"));
/// # Ok::<_, delegation_oracle::Error>(())
/// ```
pub struct Task {
    generator: Option<Generator>,
}

impl Task {
    /// Construct a task which calls the given function.
    pub fn new(function: &GeneratorFn) -> Self {
        Self::from_generator(function.call())
    }

    /// Construct a task out of a generator.
    pub fn from_generator(generator: Generator) -> Self {
        Self {
            generator: Some(generator),
        }
    }

    /// Check if the task has finished, successfully or not.
    pub fn is_completed(&self) -> bool {
        self.generator.is_none()
    }

    fn step(generator: &mut Generator) -> Poll<Result<Value, Error>> {
        let function = generator.function();

        if !function.flavor().is_awaitable() {
            return Poll::Ready(Err(Error::from(ErrorKind::TypeContract {
                function: function.name().to_owned(),
                target: String::from("an awaited task"),
            })));
        }

        match generator.resume(Value::Unit) {
            Ok(GeneratorState::Yielded(Value::Unit)) => Poll::Pending,
            Ok(GeneratorState::Yielded(value)) => {
                Poll::Ready(Err(Error::from(ErrorKind::ProtocolViolation { value })))
            }
            Ok(GeneratorState::Complete(value)) => Poll::Ready(Ok(value)),
            Err(error) => Poll::Ready(Err(error)),
        }
    }
}

impl Future for Task {
    type Output = Result<Value, Error>;

    #[tracing::instrument(skip_all)]
    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();

        let Some(generator) = this.generator.as_mut() else {
            return Poll::Ready(Err(Error::from(ErrorKind::GeneratorComplete)));
        };

        match Self::step(generator) {
            Poll::Pending => {
                tracing::trace!(function = generator.function().name(), "suspended");
                cx.waker().wake_by_ref();
                Poll::Pending
            }
            Poll::Ready(result) => {
                if let Err(error) = &result {
                    tracing::debug!(%error, "task aborted");
                }

                this.generator = None;
                Poll::Ready(result)
            }
        }
    }
}

impl FusedFuture for Task {
    fn is_terminated(&self) -> bool {
        self.is_completed()
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("generator", &self.generator)
            .finish()
    }
}
