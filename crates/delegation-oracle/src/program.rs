use crate::{Error, ErrorKind, Generator, Log, Value};
use std::fmt;
use std::rc::Rc;

/// The flavor of a generator function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flavor {
    /// A plain generator, not usable across an async boundary.
    Generator,
    /// A generator explicitly tagged as coroutine-compatible.
    Coroutine,
    /// A native async function. It can only suspend by awaiting another
    /// awaitable.
    Async,
}

impl Flavor {
    /// Test if functions of this flavor can be driven as an awaited task.
    pub fn is_awaitable(self) -> bool {
        matches!(self, Self::Coroutine | Self::Async)
    }
}

/// An expression evaluated inside of a generator.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A constant value.
    Value(Value),
    /// Reference to a local bound by an earlier step.
    Local(Box<str>),
    /// A tuple built out of other expressions.
    Tuple(Vec<Expr>),
}

impl Expr {
    /// Reference a local.
    pub fn local(name: &str) -> Self {
        Self::Local(name.into())
    }

    /// Construct a tuple expression.
    pub fn tuple<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Expr>,
    {
        Self::Tuple(items.into_iter().collect())
    }
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<&str> for Expr {
    fn from(value: &str) -> Self {
        Self::Value(Value::from(value))
    }
}

impl From<String> for Expr {
    fn from(value: String) -> Self {
        Self::Value(Value::from(value))
    }
}

impl From<i64> for Expr {
    fn from(value: i64) -> Self {
        Self::Value(Value::from(value))
    }
}

impl From<bool> for Expr {
    fn from(value: bool) -> Self {
        Self::Value(Value::from(value))
    }
}

/// Where the value produced by a suspending step ends up.
#[derive(Debug, Clone)]
pub enum Bind {
    /// The value is dropped.
    Discard,
    /// The value is bound to a local.
    Local(Box<str>),
    /// The value is appended to a log.
    Log(Log),
}

/// The target of a delegation step.
#[derive(Clone)]
pub enum Target {
    /// Delegate to a fresh call of a generator function of any flavor.
    Generator(GeneratorFn),
    /// Delegate to a plain iterator over a fixed sequence.
    Iter(Rc<[Value]>),
}

impl Target {
    /// Construct a plain iterator target.
    pub fn iter<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Self::Iter(values.into_iter().map(Into::into).collect())
    }
}

impl From<GeneratorFn> for Target {
    fn from(function: GeneratorFn) -> Self {
        Self::Generator(function)
    }
}

impl From<&GeneratorFn> for Target {
    fn from(function: &GeneratorFn) -> Self {
        Self::Generator(function.clone())
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generator(function) => fmt::Display::fmt(function, f),
            Self::Iter(values) => write!(f, "plain iterator of length {}", values.len()),
        }
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generator(function) => f.debug_tuple("Generator").field(function).finish(),
            Self::Iter(values) => f.debug_tuple("Iter").field(values).finish(),
        }
    }
}

/// A single step of a generator program.
#[derive(Debug, Clone)]
pub enum Step {
    /// Yield a value. The input the generator is resumed with goes to `bind`.
    Yield {
        /// The yielded value.
        value: Expr,
        /// Where the received input goes.
        bind: Bind,
    },
    /// Delegate to a target until it completes. Its completion value goes to
    /// `bind`.
    Delegate {
        /// The delegation target.
        target: Target,
        /// Where the completion value of the target goes.
        bind: Bind,
    },
    /// Append a value to a log.
    Record {
        /// The log to append to.
        log: Log,
        /// The recorded value.
        value: Expr,
    },
    /// Complete with the given value.
    Return(Expr),
}

struct Program {
    name: Box<str>,
    flavor: Flavor,
    steps: Vec<Step>,
}

/// A generator function, a named program that is instantiated into a fresh
/// [`Generator`] every time it is called.
///
/// Cloning is cheap and shares the program.
#[derive(Clone)]
pub struct GeneratorFn {
    program: Rc<Program>,
}

impl GeneratorFn {
    /// Start building a plain generator function.
    pub fn generator(name: &str) -> Builder {
        Builder::new(name, Flavor::Generator)
    }

    /// Start building a generator function tagged as coroutine-compatible.
    pub fn coroutine(name: &str) -> Builder {
        Builder::new(name, Flavor::Coroutine)
    }

    /// Start building a native async function.
    pub fn async_fn(name: &str) -> Builder {
        Builder::new(name, Flavor::Async)
    }

    /// The name of the function.
    pub fn name(&self) -> &str {
        &self.program.name
    }

    /// The flavor of the function.
    pub fn flavor(&self) -> Flavor {
        self.program.flavor
    }

    /// The steps making up the function.
    pub fn steps(&self) -> &[Step] {
        &self.program.steps
    }

    /// Call the function, producing a generator which hasn't been started.
    pub fn call(&self) -> Generator {
        Generator::new(self.clone())
    }

    /// Check that the function respects the async composition rules.
    ///
    /// Only the function's own steps are checked. Delegation targets are
    /// checked when they are first resumed.
    pub(crate) fn check_contract(&self) -> Result<(), Error> {
        for step in self.steps() {
            match step {
                Step::Yield { .. } if self.flavor() == Flavor::Async => {
                    return Err(Error::from(ErrorKind::YieldInAsync {
                        function: self.name().to_owned(),
                    }));
                }
                Step::Delegate { target, .. } => self.check_target(target)?,
                _ => (),
            }
        }

        Ok(())
    }

    fn check_target(&self, target: &Target) -> Result<(), Error> {
        let compatible = match (self.flavor(), target) {
            (Flavor::Generator, Target::Generator(inner)) => inner.flavor() != Flavor::Async,
            (Flavor::Async, Target::Generator(inner)) => inner.flavor().is_awaitable(),
            (Flavor::Async, Target::Iter(..)) => false,
            _ => true,
        };

        if compatible {
            return Ok(());
        }

        Err(Error::from(ErrorKind::TypeContract {
            function: self.name().to_owned(),
            target: target.to_string(),
        }))
    }
}

impl fmt::Display for GeneratorFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.flavor() {
            Flavor::Generator => write!(f, "generator `{}`", self.name()),
            Flavor::Coroutine => write!(f, "coroutine `{}`", self.name()),
            Flavor::Async => write!(f, "async fn `{}`", self.name()),
        }
    }
}

impl fmt::Debug for GeneratorFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratorFn")
            .field("name", &self.name())
            .field("flavor", &self.flavor())
            .field("steps", &self.steps().len())
            .finish()
    }
}

/// Builder for a [`GeneratorFn`].
///
/// Each method appends one step, in program order.
#[must_use = "builders do nothing unless built"]
pub struct Builder {
    name: Box<str>,
    flavor: Flavor,
    steps: Vec<Step>,
}

impl Builder {
    fn new(name: &str, flavor: Flavor) -> Self {
        Self {
            name: name.into(),
            flavor,
            steps: Vec::new(),
        }
    }

    /// `yield value`, discarding whatever the generator is resumed with.
    pub fn yield_value(self, value: impl Into<Expr>) -> Self {
        self.step(Step::Yield {
            value: value.into(),
            bind: Bind::Discard,
        })
    }

    /// `let local = yield value`.
    pub fn yield_into(self, value: impl Into<Expr>, local: &str) -> Self {
        self.step(Step::Yield {
            value: value.into(),
            bind: Bind::Local(local.into()),
        })
    }

    /// `log.append((yield value))`.
    pub fn yield_into_log(self, value: impl Into<Expr>, log: &Log) -> Self {
        self.step(Step::Yield {
            value: value.into(),
            bind: Bind::Log(log.clone()),
        })
    }

    /// `yield from target`, discarding its completion value.
    pub fn delegate(self, target: impl Into<Target>) -> Self {
        self.step(Step::Delegate {
            target: target.into(),
            bind: Bind::Discard,
        })
    }

    /// `let local = yield from target`.
    pub fn delegate_into(self, target: impl Into<Target>, local: &str) -> Self {
        self.step(Step::Delegate {
            target: target.into(),
            bind: Bind::Local(local.into()),
        })
    }

    /// `log.append(value)`.
    pub fn record(self, log: &Log, value: impl Into<Expr>) -> Self {
        self.step(Step::Record {
            log: log.clone(),
            value: value.into(),
        })
    }

    /// `return value`.
    pub fn ret(self, value: impl Into<Expr>) -> Self {
        self.step(Step::Return(value.into()))
    }

    /// Append a raw step.
    pub fn step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    /// Finish building the function.
    pub fn build(self) -> GeneratorFn {
        GeneratorFn {
            program: Rc::new(Program {
                name: self.name,
                flavor: self.flavor,
                steps: self.steps,
            }),
        }
    }
}
