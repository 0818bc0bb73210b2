use crate::tests::init_tracing;
use crate::{
    ErrorKind, ExecutionState, Expr, GeneratorFn, GeneratorState, Log, Result, Suspension, Value,
};

#[test]
fn test_bare_yield_then_send() -> Result<()> {
    init_tracing();

    let sent = Log::new();

    let function = GeneratorFn::generator("send_only")
        .yield_into(Value::Unit, "x")
        .record(&sent, Expr::local("x"))
        .build();

    let mut generator = function.call();

    assert_eq!(generator.next()?, GeneratorState::Yielded(Value::Unit));
    assert_eq!(
        generator.resume(Value::from(42i64))?,
        GeneratorState::Complete(Value::Unit)
    );
    assert_eq!(sent.snapshot(), [Value::from(42i64)]);
    Ok(())
}

#[test]
fn test_state_transitions() -> Result<()> {
    let function = GeneratorFn::generator("f").yield_value(1i64).build();
    let mut generator = function.call();

    assert_eq!(generator.state(), ExecutionState::Created);
    generator.next()?;
    assert_eq!(
        generator.state(),
        ExecutionState::Suspended(Suspension::Direct)
    );
    generator.next()?;
    assert_eq!(generator.state(), ExecutionState::Completed);
    assert!(generator.state().is_terminal());
    Ok(())
}

#[test]
fn test_just_started_rejects_value() -> Result<()> {
    let function = GeneratorFn::generator("f").yield_value(1i64).build();
    let mut generator = function.call();

    let error = generator.resume(Value::from("early")).unwrap_err();
    assert!(matches!(
        error.kind(),
        ErrorKind::JustStarted { value } if *value == Value::from("early")
    ));

    // The generator is still usable with the start signal.
    assert_eq!(generator.state(), ExecutionState::Created);
    assert_eq!(generator.next()?, GeneratorState::Yielded(Value::from(1i64)));
    Ok(())
}

#[test]
fn test_resume_after_complete() -> Result<()> {
    let function = GeneratorFn::generator("f").ret(7i64).build();
    let mut generator = function.call();

    assert_eq!(generator.next()?, GeneratorState::Complete(Value::from(7i64)));

    let error = generator.next().unwrap_err();
    assert!(matches!(error.kind(), ErrorKind::GeneratorComplete));
    Ok(())
}

#[test]
fn test_falls_off_the_end() -> Result<()> {
    let log = Log::new();
    let function = GeneratorFn::generator("f").record(&log, true).build();
    let mut generator = function.call();

    assert_eq!(generator.next()?, GeneratorState::Complete(Value::Unit));
    assert_eq!(log.snapshot(), [Value::from(true)]);
    Ok(())
}

#[test]
fn test_fault_fails_generator() -> Result<()> {
    let function = GeneratorFn::generator("f")
        .yield_value(1i64)
        .ret(Expr::local("nope"))
        .build();

    let mut generator = function.call();
    generator.next()?;

    let error = generator.next().unwrap_err();
    assert!(matches!(error.kind(), ErrorKind::MissingLocal { name } if name == "nope"));
    assert_eq!(generator.state(), ExecutionState::Failed);

    let error = generator.next().unwrap_err();
    assert!(matches!(error.kind(), ErrorKind::GeneratorFailed));
    Ok(())
}

#[test]
fn test_direct_yields_echo_one_input_each() -> Result<()> {
    for count in 0..6i64 {
        let log = Log::new();
        let mut builder = GeneratorFn::generator("echo");

        for n in 0..count {
            builder = builder.yield_into_log(n, &log);
        }

        let mut generator = builder.build().call();
        let mut state = generator.next()?;
        let mut yielded = Vec::new();

        while let GeneratorState::Yielded(value) = state {
            let n = yielded.len() as i64;
            yielded.push(value);
            state = generator.resume(Value::from(n * 10))?;

            // Exactly one input has been delivered per completed yield.
            assert_eq!(log.len(), yielded.len());
        }

        let expected = (0..count).map(Value::from).collect::<Vec<_>>();
        assert_eq!(yielded, expected);

        let echoed = (0..count).map(|n| Value::from(n * 10)).collect::<Vec<_>>();
        assert_eq!(log.snapshot(), echoed);
    }

    Ok(())
}

#[test]
fn test_into_iter() -> Result<()> {
    let function = GeneratorFn::generator("f")
        .yield_value("a")
        .yield_value("b")
        .ret("ignored")
        .build();

    let values = function.call().into_iter().collect::<Result<Vec<_>>>()?;
    assert_eq!(values, [Value::from("a"), Value::from("b")]);
    Ok(())
}

#[test]
fn test_return_tuple_of_bound_locals() -> Result<()> {
    let function = GeneratorFn::generator("f")
        .yield_into("first", "a")
        .yield_into("second", "b")
        .ret(Expr::tuple([Expr::local("b"), Expr::local("a")]))
        .build();

    let mut generator = function.call();
    generator.next()?;
    generator.resume(Value::from(1i64))?;

    assert_eq!(
        generator.resume(Value::from(2i64))?,
        GeneratorState::Complete(Value::tuple([2i64, 1]))
    );
    Ok(())
}
