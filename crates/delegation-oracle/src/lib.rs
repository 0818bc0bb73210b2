//! A test oracle for generator delegation.
//!
//! This crate is a small interpreter for generator programs which predicts
//! the exact sequence of values yielded to an external driver, the values
//! received by every nested generator, and the final completion value.
//!
//! Programs are built from steps: direct yields, delegation to a
//! sub-generator or a plain iterator, appends to a shared [`Log`], and a
//! return. While a generator delegates, every value sent into it is forwarded
//! to the delegation target, and every value the target yields is forwarded
//! outward, until the target completes.
//!
//! ```
//! use delegation_oracle::{Expr, GeneratorFn, Log, Oracle, Value};
//!
//! let sent = Log::new();
//!
//! let inner = GeneratorFn::generator("inner")
//!     .yield_into_log("from inner", &sent)
//!     .ret("inner return value")
//!     .build();
//!
//! let outer = GeneratorFn::generator("outer")
//!     .delegate_into(inner, "x")
//!     .ret(Expr::tuple([Expr::local("x"), Expr::from("from outer")]))
//!     .build();
//!
//! let transcript = Oracle::default().drive(&outer, [Value::from("sent 0")])?;
//!
//! assert_eq!(transcript.yielded, [Value::from("from inner")]);
//! assert_eq!(sent.snapshot(), [Value::from("sent 0")]);
//! assert_eq!(
//!     transcript.completion,
//!     Value::tuple([Value::from("inner return value"), Value::from("from outer")])
//! );
//! # Ok::<_, delegation_oracle::Error>(())
//! ```
//!
//! Generators can also be driven as awaited [`Task`]s, which is only allowed
//! for programs tagged coroutine-compatible, see [`GeneratorFn::coroutine`].

#![deny(missing_docs)]

mod conformance;
mod delegation;
mod driver;
mod error;
mod execution;
mod generator;
mod generator_state;
mod log;
mod options;
mod program;
pub mod suite;
mod task;
mod value;


pub use self::conformance::{Case, Oracle, VerifyError};
pub use self::driver::{drive, drive_interleaved, Transcript};
pub use self::error::{Error, ErrorKind};
pub use self::execution::{ExecutionState, Suspension};
pub use self::generator::{Generator, Iter};
pub use self::generator_state::GeneratorState;
pub use self::log::Log;
pub use self::options::{Compliance, Options, ParseOptionError};
pub use self::program::{Bind, Builder, Expr, Flavor, GeneratorFn, Step, Target};
pub use self::task::Task;
pub use self::value::Value;

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
