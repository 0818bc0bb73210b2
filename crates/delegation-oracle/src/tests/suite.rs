use crate::tests::init_tracing;
use crate::{suite, Case, Compliance, GeneratorFn, Options, Oracle, VerifyError};

fn oracle(compliance: Compliance) -> Oracle {
    let mut options = Options::default();
    options.set_compliance(compliance);
    Oracle::new(options)
}

#[test]
fn test_suite_passes() -> Result<(), VerifyError> {
    init_tracing();

    for compliance in [Compliance::Textbook, Compliance::Reference] {
        let oracle = oracle(compliance);

        for case in suite::cases(compliance) {
            oracle.verify(&case)?;
        }
    }

    Ok(())
}

#[test]
fn test_cases_can_be_verified_twice() -> Result<(), VerifyError> {
    let oracle = Oracle::default();

    for case in suite::cases(Compliance::Textbook) {
        oracle.verify(&case)?;
        oracle.verify(&case)?;
    }

    Ok(())
}

#[test]
fn test_modes_disagree() {
    let reference = oracle(Compliance::Reference);

    let mismatches = suite::cases(Compliance::Textbook)
        .iter()
        .filter(|case| reference.verify(case).is_err())
        .map(Case::name)
        .collect::<Vec<_>>();

    assert_eq!(
        mismatches,
        [
            "yield_from_with_yield_before",
            "yield_from_with_yield_after",
            "yield_from_sequence",
        ]
    );
}

#[test]
fn test_mismatch_is_reported() {
    let function = GeneratorFn::generator("f").yield_value(1i64).build();

    let case = Case::new("wrong", function)
        .inputs([0i64])
        .yielded([2i64]);

    let error = Oracle::default().verify(&case).unwrap_err();

    match error {
        VerifyError::Mismatch {
            case,
            what,
            expected,
            actual,
        } => {
            assert_eq!(case, "wrong");
            assert_eq!(what, "yielded");
            assert_eq!(expected, "[Integer(2)]");
            assert_eq!(actual, "[Integer(1)]");
        }
        error => panic!("unexpected error: {error}"),
    }
}

#[test]
fn test_drive_failure_is_reported() {
    let function = GeneratorFn::generator("f").yield_value(1i64).build();
    let case = Case::new("starved", function);

    let error = Oracle::default().verify(&case).unwrap_err();
    assert!(matches!(error, VerifyError::Drive { case: "starved", .. }));
}
