//! Prints sponge vectors for cross-implementation checks.

use field::Fr;
use mimc::{MimcParams, MimcSponge};

fn main() {
    let cases: [(u64, &[i64], usize); 4] = [
        (0, &[1764], 1),
        (1, &[1764], 1),
        (7, &[1, 2], 2),
        (0, &[-5], 1),
    ];

    let params = MimcParams::default();
    for (key, inputs, outputs) in cases {
        let sponge =
            MimcSponge::from_params(Fr::from_canonical_u64(key), &params, outputs).expect("sponge");
        let inputs: Vec<Fr> = inputs.iter().copied().map(Fr::from_i64).collect();
        let digest = sponge.hash(&inputs).expect("hash");

        let line = serde_json::json!({
            "key": key.to_string(),
            "inputs": inputs,
            "outputs": digest,
        });
        println!("{line}");
    }
}
