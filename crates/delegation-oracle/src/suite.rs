//! The built-in conformance suite.
//!
//! These cases encode the scenarios probed against the reference
//! interpreter. Where its observations differ from full proxying, the
//! expectations depend on the [`Compliance`] mode the suite is built for.
//!
//! ```
//! use delegation_oracle::{suite, Compliance, Options, Oracle};
//!
//! for compliance in [Compliance::Textbook, Compliance::Reference] {
//!     let mut options = Options::default();
//!     options.set_compliance(compliance);
//!     let oracle = Oracle::new(options);
//!
//!     for case in suite::cases(compliance) {
//!         oracle.verify(&case)?;
//!     }
//! }
//! # Ok::<_, delegation_oracle::VerifyError>(())
//! ```

use crate::{Case, Compliance, Expr, GeneratorFn, Log, Target, Value};

/// Every case of the suite, with expectations for the given compliance mode.
pub fn cases(compliance: Compliance) -> Vec<Case> {
    vec![
        send_only(),
        yield_from_without_outer_yield(),
        yield_from_with_yield_before(compliance),
        yield_from_with_yield_after(compliance),
        yield_from_sequence(compliance),
    ]
}

/// A bare `yield` behaves like `yield None`; the value sent afterwards is
/// received by the generator.
pub fn send_only() -> Case {
    let sent = Log::new();

    let function = GeneratorFn::generator("send_only")
        .yield_into(Value::Unit, "x")
        .record(&sent, Expr::local("x"))
        .build();

    Case::new("send_only", function)
        .inputs([42i64])
        .yielded([Value::Unit])
        .log("sent", &sent, [42i64])
}

/// Pieces shared by the `yield from` demonstrations.
struct Demonstration {
    sent_to_inner: Log,
    sent_to_outer: Log,
    inner: GeneratorFn,
}

impl Demonstration {
    fn new() -> Self {
        let sent_to_inner = Log::new();

        let inner = GeneratorFn::generator("inner")
            .yield_into_log("from inner", &sent_to_inner)
            .ret("inner return value")
            .build();

        Self {
            sent_to_inner,
            sent_to_outer: Log::new(),
            inner,
        }
    }

    fn completion(outer: &str) -> Value {
        Value::tuple([
            Value::from("inner return value"),
            Value::from(format!("from {outer}")),
        ])
    }

    fn ret(outer: &str) -> Expr {
        Expr::tuple([Expr::local("inner_return"), Expr::from(format!("from {outer}"))])
    }
}

/// Inputs named the way the reference harness names them.
fn numbered(count: usize) -> impl Iterator<Item = Value> {
    (0..count).map(|n| Value::from(format!("sent {n}")))
}

/// The outer generator only delegates, so every value passes straight
/// through in both compliance modes.
pub fn yield_from_without_outer_yield() -> Case {
    let d = Demonstration::new();

    let outer = GeneratorFn::generator("outer_no_yield")
        .delegate_into(&d.inner, "inner_return")
        .ret(Demonstration::ret("outer_no_yield"))
        .build();

    Case::new("yield_from_without_outer_yield", outer)
        .inputs(numbered(1))
        .yielded(["from inner"])
        .completion(Demonstration::completion("outer_no_yield"))
        .log("sent_to_inner", &d.sent_to_inner, ["sent 0"])
        .log("sent_to_outer", &d.sent_to_outer, Vec::<Value>::new())
}

/// A direct yield before the delegation.
///
/// Under [`Compliance::Reference`] the value yielded by the inner generator
/// is lost and the inner generator receives `()` instead of `"sent 1"`.
pub fn yield_from_with_yield_before(compliance: Compliance) -> Case {
    let d = Demonstration::new();

    let outer = GeneratorFn::generator("outer_with_yield_before")
        .yield_into_log("yielded before", &d.sent_to_outer)
        .delegate_into(&d.inner, "inner_return")
        .ret(Demonstration::ret("outer_with_yield_before"))
        .build();

    let case = Case::new("yield_from_with_yield_before", outer)
        .inputs(numbered(2))
        .completion(Demonstration::completion("outer_with_yield_before"))
        .log("sent_to_outer", &d.sent_to_outer, ["sent 0"]);

    match compliance {
        Compliance::Textbook => case
            .yielded(["yielded before", "from inner"])
            .log("sent_to_inner", &d.sent_to_inner, ["sent 1"]),
        Compliance::Reference => case
            .yielded(["yielded before"])
            .log("sent_to_inner", &d.sent_to_inner, [Value::Unit]),
    }
}

/// A direct yield after the delegation.
///
/// Under [`Compliance::Reference`] the value yielded after the delegation is
/// lost and the outer generator receives `()` instead of `"sent 1"`.
pub fn yield_from_with_yield_after(compliance: Compliance) -> Case {
    let d = Demonstration::new();

    let outer = GeneratorFn::generator("outer_with_yield_after")
        .delegate_into(&d.inner, "inner_return")
        .yield_into_log("yielded after", &d.sent_to_outer)
        .ret(Demonstration::ret("outer_with_yield_after"))
        .build();

    let case = Case::new("yield_from_with_yield_after", outer)
        .inputs(numbered(2))
        .completion(Demonstration::completion("outer_with_yield_after"))
        .log("sent_to_inner", &d.sent_to_inner, ["sent 0"]);

    match compliance {
        Compliance::Textbook => case
            .yielded(["from inner", "yielded after"])
            .log("sent_to_outer", &d.sent_to_outer, ["sent 1"]),
        Compliance::Reference => case
            .yielded(["from inner"])
            .log("sent_to_outer", &d.sent_to_outer, [Value::Unit]),
    }
}

/// Delegating to a plain three element sequence, which completes with `()`.
///
/// The driver only sends the start signal since the sequence accepts
/// nothing else. Under [`Compliance::Reference`] every other element is
/// produced by a `send` and therefore not recorded.
pub fn yield_from_sequence(compliance: Compliance) -> Case {
    let result = Log::new();

    let outer = GeneratorFn::generator("outer_sequence")
        .delegate_into(Target::iter([1i64, 2, 3]), "result")
        .record(&result, Expr::local("result"))
        .build();

    let case = Case::new("yield_from_sequence", outer)
        .inputs([Value::Unit, Value::Unit, Value::Unit])
        .log("result", &result, [Value::Unit]);

    match compliance {
        Compliance::Textbook => case.yielded([1i64, 2, 3]),
        Compliance::Reference => case.yielded([1i64, 3]),
    }
}
