//! Example finding a location, checking its witness and dumping the artifacts
//! an external prover consumes.

use circuit::{
    compile, evaluate, find_location, Assignment, HashCircuit, HashWitness, InitCircuit,
    Visibility, LOCATION_ID,
};
use field::Fr;
use rand::rng;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

const RADIUS: u64 = 1 << 16;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut rng = rng();
    let key = Fr::from_canonical_u64(0);

    let search_start = Instant::now();
    let location = find_location(RADIUS, key, &mut rng).expect("location");
    let search_time = search_start.elapsed();

    let init = InitCircuit::default();
    let compile_start = Instant::now();
    let system = compile(&init).expect("compile");
    let compile_time = compile_start.elapsed();
    let stats = system.stats();

    let assignment = Assignment::from(location.witness());
    let evaluation = system.check(&assignment).expect("check");
    assert_eq!(evaluation.output(LOCATION_ID), Some(location.location_id));
    let outputs = evaluation.clone().into_result().expect("satisfied");

    let witness = assignment.complete(&evaluation);
    let public = witness.public_part(&system.slots());
    let system_bytes = system.to_bytes().expect("serialize system");

    println!("Location: ({}, {})", location.x, location.y);
    println!("LocationId: {}", outputs[0].value);
    println!("Search time: {:?}", search_time);
    println!("Compile time: {:?}", compile_time);
    println!("Gates: {}", system.gates.len());
    println!("Multiplications: {}", stats.multiplications);
    println!("Assertions: {}", stats.assertions);
    println!("Constraint system size (bytes): {}", system_bytes.len());
    println!("Public witness: {}", public.to_json().expect("json"));

    let hash = HashCircuit::new(Visibility::Secret);
    let reveal = Assignment::from(HashWitness {
        key,
        x: location.x,
        hash: location.location_id,
    });
    let opened = evaluate(&hash, &reveal).expect("evaluate");
    // HashCircuit only bounds x from above, so negative coordinates cannot be opened.
    assert_eq!(opened.is_satisfied(), location.x >= 0);
    println!("Commitment opened: {}", opened.is_satisfied());
}
