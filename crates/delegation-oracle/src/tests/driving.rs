use crate::tests::init_tracing;
use crate::{
    drive, drive_interleaved, Compliance, ErrorKind, Expr, GeneratorFn, Log, Options, Oracle,
    Result, Transcript, Value,
};

/// A generator which yields once directly, then delegates to an inner
/// generator which yields once.
fn yield_before(sent_to_outer: &Log, sent_to_inner: &Log) -> GeneratorFn {
    let inner = GeneratorFn::generator("inner")
        .yield_into_log("from inner", sent_to_inner)
        .ret("inner return value")
        .build();

    GeneratorFn::generator("outer")
        .yield_into_log("yielded before", sent_to_outer)
        .delegate_into(inner, "r")
        .ret(Expr::tuple([Expr::local("r"), Expr::from("from outer")]))
        .build()
}

fn inputs() -> Vec<Value> {
    vec![Value::from("sent 0"), Value::from("sent 1")]
}

#[test]
fn test_drive_forwards_every_input() -> Result<()> {
    init_tracing();

    let sent_to_outer = Log::new();
    let sent_to_inner = Log::new();
    let function = yield_before(&sent_to_outer, &sent_to_inner);

    let transcript = drive(&mut function.call(), inputs())?;

    assert_eq!(
        transcript,
        Transcript {
            yielded: vec![Value::from("yielded before"), Value::from("from inner")],
            sent: inputs(),
            completion: Value::tuple(["inner return value", "from outer"]),
            unused: 0,
        }
    );

    assert_eq!(sent_to_outer.snapshot(), [Value::from("sent 0")]);
    assert_eq!(sent_to_inner.snapshot(), [Value::from("sent 1")]);
    Ok(())
}

#[test]
fn test_drive_interleaved_loses_values() -> Result<()> {
    init_tracing();

    let sent_to_outer = Log::new();
    let sent_to_inner = Log::new();
    let function = yield_before(&sent_to_outer, &sent_to_inner);

    let transcript = drive_interleaved(&mut function.call(), inputs())?;

    assert_eq!(
        transcript,
        Transcript {
            yielded: vec![Value::from("yielded before")],
            sent: vec![Value::from("sent 0"), Value::Unit],
            completion: Value::tuple(["inner return value", "from outer"]),
            unused: 1,
        }
    );

    assert_eq!(sent_to_outer.snapshot(), [Value::from("sent 0")]);
    assert_eq!(sent_to_inner.snapshot(), [Value::Unit]);
    Ok(())
}

#[test]
fn test_drive_counts_unused_inputs() -> Result<()> {
    let function = GeneratorFn::generator("f").yield_value(1i64).build();

    let transcript = drive(&mut function.call(), [Value::Unit, Value::Unit, Value::Unit])?;
    assert_eq!(transcript.yielded, [Value::from(1i64)]);
    assert_eq!(transcript.unused, 2);
    Ok(())
}

#[test]
fn test_drive_exhausts_input() {
    let function = GeneratorFn::generator("f")
        .yield_value(1i64)
        .yield_value(2i64)
        .build();

    let error = drive(&mut function.call(), [Value::Unit]).unwrap_err();
    assert!(matches!(
        error.kind(),
        ErrorKind::ExhaustedInput { yielded: 2 }
    ));

    let error = drive_interleaved(&mut function.call(), []).unwrap_err();
    assert!(matches!(
        error.kind(),
        ErrorKind::ExhaustedInput { yielded: 1 }
    ));
}

#[test]
fn test_oracle_dispatches_on_compliance() -> Result<()> {
    let log = Log::new();
    let function = yield_before(&log, &log);

    let textbook = Oracle::default().drive(&function, inputs())?;
    assert_eq!(textbook.yielded.len(), 2);

    let mut options = Options::default();
    options.set_compliance(Compliance::Reference);
    let reference = Oracle::new(options).drive(&function, inputs())?;
    assert_eq!(reference.yielded.len(), 1);
    assert_eq!(reference.completion, textbook.completion);
    Ok(())
}

#[test]
fn test_parse_option() {
    let mut options = Options::default();
    assert_eq!(options.compliance(), Compliance::Textbook);

    assert!(options.parse_option("compliance=reference").is_ok());
    assert_eq!(options.compliance(), Compliance::Reference);

    assert!(options.parse_option("compliance=textbook").is_ok());
    assert_eq!(options.compliance(), Compliance::Textbook);

    let error = options.parse_option("compliance").unwrap_err();
    assert_eq!(error.to_string(), "unsupported oracle option `compliance`");
    assert_eq!(options.compliance(), Compliance::Textbook);
}

#[test]
fn test_transcript_serializes() -> anyhow::Result<()> {
    let transcript = Transcript {
        yielded: vec![Value::from(1i64), Value::Unit],
        sent: vec![Value::from("x")],
        completion: Value::tuple([Value::Bool(true)]),
        unused: 0,
    };

    let json = serde_json::to_string(&transcript)?;
    let back: Transcript = serde_json::from_str(&json)?;
    assert_eq!(back, transcript);
    Ok(())
}
