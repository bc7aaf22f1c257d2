use field::Fr;
use mimc::{MimcParams, MimcSponge};
use proptest::prelude::*;

use crate::hash::{HASH, KEY};
use crate::init::{RADIUS, X, Y};
use crate::*;

const HASH_1764_KEY_0: &str =
    "15893827533473716138720882070731822975159228540693753428689375377280130954696";
const LOCATION_ID_701_KEY_0: &str =
    "14198786152986749381750411848397070196222700383004056615312942239038759646852";

fn init_assignment(radius: u64, x: i64, y: i64) -> Assignment {
    Assignment::from(InitWitness {
        radius,
        key: Fr::ZERO,
        x,
        y,
    })
}

fn sections(evaluation: &Evaluation) -> Vec<&str> {
    evaluation
        .violations
        .iter()
        .filter_map(|violation| violation.section.as_deref())
        .collect()
}

/// Evaluate with both backends and require that they agree.
fn evaluate_both<C: Circuit>(circuit: &C, assignment: &Assignment) -> Evaluation {
    let direct = evaluate(circuit, assignment).unwrap();
    let replayed = compile(circuit).unwrap().check(assignment).unwrap();
    assert_eq!(direct, replayed);
    direct
}

#[test]
fn test_init_accepts_point_inside_annulus() {
    let evaluation = evaluate_both(&InitCircuit::default(), &init_assignment(1000, 701, 700));
    assert!(evaluation.is_satisfied());
    assert_eq!(
        evaluation.output(LOCATION_ID),
        Some(LOCATION_ID_701_KEY_0.parse::<Fr>().unwrap())
    );
}

#[test]
fn test_init_rejects_point_on_inner_boundary_side() {
    // 700^2 + 700^2 = 980000 = 0.98 * 1000^2, not strictly above.
    let evaluation = evaluate_both(&InitCircuit::default(), &init_assignment(1000, 700, 700));
    assert_eq!(sections(&evaluation), vec!["annulus lower bound"]);
}

#[test]
fn test_init_rejects_point_on_outer_circle() {
    let evaluation = evaluate_both(&InitCircuit::default(), &init_assignment(1000, 1000, 0));
    assert_eq!(sections(&evaluation), vec!["annulus upper bound"]);
    assert!(matches!(
        evaluation.into_result(),
        Err(CircuitError::Unsatisfied { count: 1, .. })
    ));
}

#[test]
fn test_init_rejects_origin() {
    let evaluation = evaluate_both(&InitCircuit::default(), &init_assignment(1000, 0, 0));
    assert_eq!(sections(&evaluation), vec!["annulus lower bound"]);
}

#[test]
fn test_init_accepts_negative_coordinates() {
    let evaluation = evaluate_both(&InitCircuit::default(), &init_assignment(1000, -701, -700));
    assert!(evaluation.is_satisfied());

    let expected = MimcSponge::new(Fr::ZERO)
        .hash_one(&[Fr::from_i64(-701)])
        .unwrap();
    assert_eq!(evaluation.output(LOCATION_ID), Some(expected));
}

#[test]
fn test_init_coordinate_range() {
    let radius = (1 << 31) + 2;

    let evaluation = evaluate_both(&InitCircuit::default(), &init_assignment(radius, 1 << 31, 0));
    assert_eq!(sections(&evaluation), vec!["coordinate range"]);

    let evaluation = evaluate_both(&InitCircuit::default(), &init_assignment(radius, 0, 1 << 31));
    assert_eq!(sections(&evaluation), vec!["coordinate range"]);

    let evaluation = evaluate_both(
        &InitCircuit::default(),
        &init_assignment(radius, -(1 << 31), 0),
    );
    assert!(evaluation.is_satisfied());

    let evaluation = evaluate_both(
        &InitCircuit::default(),
        &init_assignment(radius, -(1 << 31) - 1, 0),
    );
    assert_eq!(sections(&evaluation), vec!["coordinate range"]);
}

#[test]
fn test_init_location_id_depends_on_x_only() {
    let circuit = InitCircuit::default();
    let a = evaluate(&circuit, &init_assignment(1000, 701, 700)).unwrap();
    let b = evaluate(&circuit, &init_assignment(1000, 701, -700)).unwrap();
    assert!(a.is_satisfied() && b.is_satisfied());
    assert_eq!(a.output(LOCATION_ID), b.output(LOCATION_ID));
}

#[test]
fn test_init_location_id_depends_on_key() {
    let circuit = InitCircuit::default();
    let zero = evaluate(&circuit, &init_assignment(1000, 701, 700)).unwrap();
    let one = init_assignment(1000, 701, 700).with(PLANETHASH_KEY, Fr::ONE);
    let one = evaluate(&circuit, &one).unwrap();
    assert!(one.is_satisfied());
    assert_ne!(zero.output(LOCATION_ID), one.output(LOCATION_ID));
}

#[test]
fn test_init_with_custom_params() {
    let params = MimcParams::new(10, "mimcsponge").unwrap();
    let circuit = InitCircuit::new(params.clone());
    let evaluation = evaluate_both(&circuit, &init_assignment(1000, 701, 700));

    let expected = MimcSponge::from_params(Fr::ZERO, &params, 1)
        .unwrap()
        .hash_one(&[Fr::from_canonical_u64(701)])
        .unwrap();
    assert_eq!(evaluation.output(LOCATION_ID), Some(expected));
}

#[test]
fn test_init_slots_and_public_witness() {
    let circuit = InitCircuit::default();
    let system = compile(&circuit).unwrap();
    assert_eq!(system.slots(), circuit.slots());
    assert_eq!(system.outputs.len(), 1);
    assert_eq!(system.outputs[0].name, LOCATION_ID);

    let assignment = init_assignment(1000, 701, 700);
    let evaluation = system.check(&assignment).unwrap();
    let complete = assignment.complete(&evaluation);
    assert_eq!(
        complete.get(LOCATION_ID),
        Some(LOCATION_ID_701_KEY_0.parse::<Fr>().unwrap())
    );

    let public = assignment.public_part(&circuit.slots());
    assert_eq!(public.len(), 2);
    assert_eq!(public.get(RADIUS), Some(Fr::from_canonical_u64(1000)));
    assert_eq!(public.get(PLANETHASH_KEY), Some(Fr::ZERO));
    assert_eq!(public.get(X), None);
    assert_eq!(public.get(Y), None);
}

#[test]
fn test_init_missing_input() {
    let mut assignment = Assignment::new();
    assignment.set(RADIUS, Fr::from_canonical_u64(1000));
    assignment.set(PLANETHASH_KEY, Fr::ZERO);
    assignment.set(X, Fr::from_canonical_u64(701));

    let err = evaluate(&InitCircuit::default(), &assignment).unwrap_err();
    assert_eq!(err, CircuitError::MissingInput(Y.to_string()));

    let err = compile(&InitCircuit::default())
        .unwrap()
        .check(&assignment)
        .unwrap_err();
    assert_eq!(err, CircuitError::MissingInput(Y.to_string()));
}

#[test]
fn test_init_system_survives_postcard() {
    let system = compile(&InitCircuit::default()).unwrap();
    let bytes = system.to_bytes().unwrap();
    let decoded = ConstraintSystem::from_bytes(&bytes).unwrap();
    assert_eq!(decoded, system);

    let evaluation = decoded.check(&init_assignment(1000, 701, 700)).unwrap();
    assert!(evaluation.is_satisfied());
}

#[test]
fn test_from_bytes_rejects_forward_reference() {
    let system = ConstraintSystem {
        gates: vec![Gate::Add(Wire(0), Wire(1)), Gate::Constant(Fr::ONE)],
        ..Default::default()
    };
    let bytes = system.to_bytes().unwrap();
    assert!(matches!(
        ConstraintSystem::from_bytes(&bytes),
        Err(CircuitError::Serialization(_))
    ));
}

#[test]
fn test_check_rejects_malformed_graph() {
    let json = r#"{"inputs":[],"gates":[{"Add":[0,1]}],"assertions":[],"outputs":[]}"#;
    let system: ConstraintSystem = serde_json::from_str(json).unwrap();
    assert!(matches!(
        system.check(&Assignment::new()),
        Err(CircuitError::Serialization(_))
    ));
}

#[test]
fn test_validate_rejects_input_gate_without_matching_slot() {
    let system = ConstraintSystem {
        inputs: vec![InputSlot {
            name: "a".to_string(),
            visibility: Visibility::Public,
            wire: Wire(1),
        }],
        gates: vec![Gate::Input { slot: 0 }, Gate::Constant(Fr::ONE)],
        ..Default::default()
    };
    assert!(matches!(system.validate(), Err(CircuitError::Serialization(_))));

    let assignment = Assignment::new().with("a", Fr::ONE);
    assert!(system.check(&assignment).is_err());
}

#[test]
fn test_validate_rejects_out_of_range_assertion_wire() {
    let system = ConstraintSystem {
        gates: vec![Gate::Constant(Fr::ONE)],
        assertions: vec![Assertion {
            kind: AssertionKind::Equal,
            lhs: Wire(0),
            rhs: Wire(5),
            section: None,
        }],
        ..Default::default()
    };
    assert!(matches!(system.validate(), Err(CircuitError::Serialization(_))));
    assert!(system.check(&Assignment::new()).is_err());
}

#[test]
fn test_validate_rejects_out_of_range_output_wire() {
    let system = ConstraintSystem {
        gates: vec![Gate::Constant(Fr::ONE)],
        outputs: vec![OutputSlot {
            name: "out".to_string(),
            wire: Wire(3),
        }],
        ..Default::default()
    };
    assert!(matches!(system.validate(), Err(CircuitError::Serialization(_))));
    let bytes = system.to_bytes().unwrap();
    assert!(ConstraintSystem::from_bytes(&bytes).is_err());
}

#[test]
fn test_validate_accepts_compiled_systems() {
    compile(&InitCircuit::default()).unwrap().validate().unwrap();
    compile(&HashCircuit::new(Visibility::Public))
        .unwrap()
        .validate()
        .unwrap();
}

#[test]
fn test_init_stats() {
    let stats = compile(&InitCircuit::default()).unwrap().stats();
    assert_eq!(stats.public_inputs, 2);
    assert_eq!(stats.secret_inputs, 2);
    assert_eq!(stats.comparisons, 2);
    // two range checks, two annulus bounds
    assert_eq!(stats.assertions, 4);
    // x^2, y^2, r^2, two scalings, 220 rounds of t^5
    assert_eq!(stats.multiplications, 5 + 3 * 220);
}

fn hash_assignment(x: i64, hash: Fr) -> Assignment {
    Assignment::from(HashWitness {
        key: Fr::ZERO,
        x,
        hash,
    })
}

#[test]
fn test_hash_accepts_matching_hash() {
    let circuit = HashCircuit::new(Visibility::Secret);
    let evaluation = evaluate_both(
        &circuit,
        &hash_assignment(1764, HASH_1764_KEY_0.parse::<Fr>().unwrap()),
    );
    assert!(evaluation.is_satisfied());
    assert!(evaluation.outputs.is_empty());
}

#[test]
fn test_hash_rejects_wrong_hash() {
    let circuit = HashCircuit::new(Visibility::Secret);
    let expected: Fr = HASH_1764_KEY_0.parse::<Fr>().unwrap();
    let evaluation = evaluate_both(&circuit, &hash_assignment(1764, expected + Fr::ONE));
    assert_eq!(sections(&evaluation), vec!["hash preimage"]);
    assert_eq!(evaluation.violations[0].kind, AssertionKind::Equal);
    assert_eq!(evaluation.violations[0].lhs, expected);
}

#[test]
fn test_hash_range_is_upper_bound_only() {
    let circuit = HashCircuit::new(Visibility::Secret);
    let sponge = MimcSponge::new(Fr::ZERO);

    let max = i32::MAX as i64;
    let hash = sponge.hash_one(&[Fr::from_i64(max)]).unwrap();
    assert!(evaluate_both(&circuit, &hash_assignment(max, hash)).is_satisfied());

    let hash = sponge.hash_one(&[Fr::from_i64(max + 1)]).unwrap();
    let evaluation = evaluate_both(&circuit, &hash_assignment(max + 1, hash));
    assert_eq!(sections(&evaluation), vec!["coordinate range"]);

    // -1 is p - 1 canonically
    let hash = sponge.hash_one(&[Fr::from_i64(-1)]).unwrap();
    let evaluation = evaluate_both(&circuit, &hash_assignment(-1, hash));
    assert_eq!(sections(&evaluation), vec!["coordinate range"]);
}

#[test]
fn test_hash_visibility_is_caller_chosen() {
    let assignment = hash_assignment(1764, HASH_1764_KEY_0.parse::<Fr>().unwrap());

    let secret = HashCircuit::new(Visibility::Secret);
    let public = HashCircuit::new(Visibility::Public);

    assert_eq!(assignment.public_part(&secret.slots()).get(HASH), None);
    assert!(assignment.public_part(&public.slots()).get(HASH).is_some());
    assert!(assignment.public_part(&secret.slots()).get(KEY).is_some());

    let system = compile(&public).unwrap();
    assert_eq!(system.stats().public_inputs, 3);
    assert!(system.check(&assignment).unwrap().is_satisfied());
}

#[test]
fn test_assignment_json_round_trip() {
    let assignment = hash_assignment(1764, HASH_1764_KEY_0.parse::<Fr>().unwrap());
    let json = assignment.to_json().unwrap();
    assert!(json.contains(&format!(r#""hash":"{HASH_1764_KEY_0}""#)));
    assert_eq!(Assignment::from_json(&json).unwrap(), assignment);

    // integers are accepted on input
    let parsed = Assignment::from_json(r#"{"key":0,"x":1764,"hash":"1"}"#).unwrap();
    assert_eq!(parsed.get(X), Some(Fr::from_canonical_u64(1764)));
}

struct TwiceDeclared;

impl Circuit for TwiceDeclared {
    fn slots(&self) -> Vec<Slot> {
        vec![Slot::secret("a")]
    }

    fn define<A: CircuitApi>(&self, api: &mut A) -> Result<Vec<Derived<A::Var>>> {
        api.input("a", Visibility::Secret)?;
        api.input("a", Visibility::Secret)?;
        Ok(Vec::new())
    }
}

#[test]
fn test_duplicate_input_is_an_error() {
    let assignment = Assignment::new().with("a", Fr::ONE);
    let expected = CircuitError::DuplicateInput("a".to_string());
    assert_eq!(evaluate(&TwiceDeclared, &assignment).unwrap_err(), expected);
    assert_eq!(compile(&TwiceDeclared).unwrap_err(), expected);
}

#[test]
fn test_found_location_satisfies_init() {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    let mut rng = StdRng::seed_from_u64(42);
    let key = Fr::from_canonical_u64(5);
    let circuit = InitCircuit::default();
    for radius in [1000, 65_536, 1 << 31] {
        let location = find_location(radius, key, &mut rng).unwrap();
        let evaluation = evaluate_both(&circuit, &Assignment::from(location.witness()));
        assert!(evaluation.is_satisfied());
        assert_eq!(evaluation.output(LOCATION_ID), Some(location.location_id));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_builder_and_evaluator_agree(
        radius in 1u64..5000,
        x in -5000i64..5000,
        y in -5000i64..5000,
        key in any::<u64>(),
    ) {
        let assignment = init_assignment(radius, x, y)
            .with(PLANETHASH_KEY, Fr::from_canonical_u64(key));
        let circuit = InitCircuit::default();
        let direct = evaluate(&circuit, &assignment).unwrap();
        let replayed = compile(&circuit).unwrap().check(&assignment).unwrap();
        prop_assert_eq!(&direct, &replayed);
        prop_assert_eq!(direct.is_satisfied(), search::in_annulus(radius, x, y));
    }
}
