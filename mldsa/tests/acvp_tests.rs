//! NIST ACVP (Automated Cryptographic Validation Protocol) tests for ML-DSA.
//!
//! These tests use official NIST test vectors from:
//! https://github.com/usnistgov/ACVP-Server/tree/master/gen-val/json-files
//!
//! Note: These tests are skipped when the test vectors are not present
//! (e.g., when running from crates.io package where they are excluded).

use mldsa::fips202::Native;
use mldsa::sign::{keygen_internal, verify_extmu, verify_internal};
use mldsa::ParameterSet;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Path to the ACVP test vectors directory
const ACVP_DIR: &str = "tests/acvp";

fn acvp_vectors_available() -> bool {
    Path::new(ACVP_DIR).exists()
}

macro_rules! skip_if_no_vectors {
    () => {
        if !acvp_vectors_available() {
            eprintln!("Skipping ACVP test: test vectors not available (excluded from crates.io package)");
            return;
        }
    };
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AcvpFile {
    test_groups: Vec<Value>,
}

fn load(path: &str) -> AcvpFile {
    let content = fs::read_to_string(path).expect("Failed to read ACVP file");
    serde_json::from_str(&content).expect("Failed to parse ACVP JSON")
}

fn field<'a>(value: &'a Value, name: &str) -> Option<&'a str> {
    value.get(name).and_then(Value::as_str)
}

fn hex_field(value: &Value, name: &str) -> Vec<u8> {
    hex::decode(field(value, name).unwrap_or_default()).expect("Invalid hex string")
}

fn tg_id(group: &Value) -> u64 {
    group["tgId"].as_u64().expect("missing tgId")
}

fn expected_group<'a>(expected: &'a AcvpFile, id: u64) -> &'a [Value] {
    expected
        .test_groups
        .iter()
        .find(|g| tg_id(g) == id)
        .and_then(|g| g["tests"].as_array())
        .expect("Expected test group not found")
}

fn run_keygen<P: ParameterSet>() {
    let prompt = load("tests/acvp/keygen_prompt.json");
    let expected = load("tests/acvp/keygen_expected.json");

    let group = prompt
        .test_groups
        .iter()
        .find(|g| field(g, "parameterSet") == Some(P::NAME))
        .expect("KeyGen test group not found in prompt");
    let results = expected_group(&expected, tg_id(group));

    let mut passed = 0;
    for (case, result) in group["tests"].as_array().into_iter().flatten().zip(results) {
        assert_eq!(case["tcId"], result["tcId"], "Test case ID mismatch");
        let seed: [u8; 32] = hex_field(case, "seed")
            .try_into()
            .expect("Invalid seed length");

        let (sk, pk) = keygen_internal::<P, Native>(&seed);
        assert_eq!(pk, hex_field(result, "pk"), "{} KeyGen tcId={}: pk mismatch", P::NAME, case["tcId"]);
        assert_eq!(sk, hex_field(result, "sk"), "{} KeyGen tcId={}: sk mismatch", P::NAME, case["tcId"]);
        passed += 1;
    }
    println!("{} KeyGen: {passed} ACVP tests passed", P::NAME);
}

/// Pure and internal SigVer groups; pre-hash groups other than SHAKE-256 are skipped.
fn run_sigver<P: ParameterSet>() {
    let prompt = load("tests/acvp/sigver_prompt.json");
    let expected = load("tests/acvp/sigver_expected.json");

    let mut passed = 0;
    for group in prompt
        .test_groups
        .iter()
        .filter(|g| field(g, "parameterSet") == Some(P::NAME))
    {
        let interface = field(group, "signatureInterface").unwrap_or("internal");
        let pre_hash = field(group, "preHash").unwrap_or("pure");
        if interface == "external" && pre_hash != "pure" {
            continue;
        }
        let results = expected_group(&expected, tg_id(group));

        for (case, result) in group["tests"].as_array().into_iter().flatten().zip(results) {
            assert_eq!(case["tcId"], result["tcId"], "Test case ID mismatch");
            let pk = if case.get("pk").is_some() {
                hex_field(case, "pk")
            } else {
                hex_field(group, "pk")
            };
            let signature = hex_field(case, "signature");

            let valid = if let Some(mu) = field(case, "mu") {
                let mu: [u8; 64] = hex::decode(mu)
                    .expect("Invalid hex string")
                    .try_into()
                    .expect("Invalid mu length");
                verify_extmu::<P, Native>(&pk, &mu, &signature)
            } else if interface == "external" {
                let message = hex_field(case, "message");
                let context = hex_field(case, "context");
                let header = [0u8, context.len() as u8];
                verify_internal::<P, Native>(&pk, &[&header[..], &context[..], &message[..]], &signature)
            } else {
                let message = hex_field(case, "message");
                verify_internal::<P, Native>(&pk, &[&message[..]], &signature)
            };

            let want = result["testPassed"].as_bool().expect("missing testPassed");
            assert_eq!(
                valid, want,
                "{} SigVer tcId={}: expected {want}, got {valid}",
                P::NAME, case["tcId"]
            );
            passed += 1;
        }
    }
    println!("{} SigVer: {passed} ACVP tests passed", P::NAME);
}

#[cfg(feature = "ml-dsa-44")]
mod ml_dsa_44 {
    use super::*;
    use mldsa::Params44;

    #[test]
    fn test_acvp_keygen_ml_dsa_44() {
        skip_if_no_vectors!();
        run_keygen::<Params44>();
    }

    #[test]
    fn test_acvp_sigver_ml_dsa_44() {
        skip_if_no_vectors!();
        run_sigver::<Params44>();
    }
}

#[cfg(feature = "ml-dsa-65")]
mod ml_dsa_65 {
    use super::*;
    use mldsa::Params65;

    #[test]
    fn test_acvp_keygen_ml_dsa_65() {
        skip_if_no_vectors!();
        run_keygen::<Params65>();
    }

    #[test]
    fn test_acvp_sigver_ml_dsa_65() {
        skip_if_no_vectors!();
        run_sigver::<Params65>();
    }
}

#[cfg(feature = "ml-dsa-87")]
mod ml_dsa_87 {
    use super::*;
    use mldsa::Params87;

    #[test]
    fn test_acvp_keygen_ml_dsa_87() {
        skip_if_no_vectors!();
        run_keygen::<Params87>();
    }

    #[test]
    fn test_acvp_sigver_ml_dsa_87() {
        skip_if_no_vectors!();
        run_sigver::<Params87>();
    }
}
