//! NIST ACVP (Automated Cryptographic Validation Protocol) tests for SHA-3
//! and SHAKE.
//!
//! Vectors come from the ACVP server's `SHA3-*` and `SHAKE-*` JSON files:
//! https://github.com/usnistgov/ACVP-Server/tree/master/gen-val/json-files
//!
//! Place `<algorithm>_prompt.json` and `<algorithm>_expected.json` under
//! `tests/acvp/`. Tests are skipped when the directory is absent (it is
//! excluded from the published package). Only byte-aligned AFT and VOT cases
//! are run; Monte Carlo groups are skipped.

use mldsa_fips202::{sha3_256, sha3_512, shake128, shake256};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Path to the ACVP test vectors directory
const ACVP_DIR: &str = "tests/acvp";

fn acvp_vectors_available() -> bool {
    Path::new(ACVP_DIR).exists()
}

/// Skip the test if ACVP vectors are not available
macro_rules! skip_if_no_vectors {
    () => {
        if !acvp_vectors_available() {
            eprintln!("Skipping ACVP test: test vectors not available");
            return;
        }
    };
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFile {
    test_groups: Vec<PromptGroup>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptGroup {
    tg_id: u32,
    test_type: String,
    tests: Vec<PromptCase>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptCase {
    tc_id: u32,
    msg: String,
    len: usize,
    #[serde(default)]
    out_len: Option<usize>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExpectedFile {
    test_groups: Vec<ExpectedGroup>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExpectedGroup {
    tg_id: u32,
    tests: Vec<ExpectedCase>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExpectedCase {
    tc_id: u32,
    md: String,
}

fn hex_decode(s: &str) -> Vec<u8> {
    hex::decode(s).expect("Invalid hex string")
}

fn load<T: for<'de> Deserialize<'de>>(path: &str) -> Option<T> {
    let content = fs::read_to_string(path).ok()?;
    Some(serde_json::from_str(&content).expect("Failed to parse ACVP JSON"))
}

/// Run every byte-aligned AFT/VOT case of `algorithm` through `hash`.
///
/// `hash` receives the message and the expected output length in bytes.
fn run_vectors(algorithm: &str, hash: impl Fn(&[u8], usize) -> Vec<u8>) -> usize {
    let prompt_path = format!("{ACVP_DIR}/{algorithm}_prompt.json");
    let expected_path = format!("{ACVP_DIR}/{algorithm}_expected.json");
    let (Some(prompt), Some(expected)) = (
        load::<PromptFile>(&prompt_path),
        load::<ExpectedFile>(&expected_path),
    ) else {
        eprintln!("Skipping {algorithm}: vector files not present");
        return 0;
    };

    let mut passed = 0;
    for group in &prompt.test_groups {
        if group.test_type != "AFT" && group.test_type != "VOT" {
            continue;
        }
        let expected_group = expected
            .test_groups
            .iter()
            .find(|g| g.tg_id == group.tg_id)
            .expect("Expected test group not found");

        for case in &group.tests {
            if case.len % 8 != 0 || case.out_len.is_some_and(|bits| bits % 8 != 0) {
                continue;
            }
            let result = expected_group
                .tests
                .iter()
                .find(|t| t.tc_id == case.tc_id)
                .expect("Expected test case not found");

            let msg = hex_decode(&case.msg);
            let msg = &msg[..case.len / 8];
            let md = hex_decode(&result.md);

            assert_eq!(
                hash(msg, md.len()),
                md,
                "{algorithm} tgId={} tcId={}: digest mismatch",
                group.tg_id,
                case.tc_id
            );
            passed += 1;
        }
    }
    passed
}

#[test]
fn test_acvp_sha3_256() {
    skip_if_no_vectors!();
    let passed = run_vectors("sha3_256", |msg, _| sha3_256(msg).to_vec());
    eprintln!("SHA3-256: {passed} cases passed");
}

#[test]
fn test_acvp_sha3_512() {
    skip_if_no_vectors!();
    let passed = run_vectors("sha3_512", |msg, _| sha3_512(msg).to_vec());
    eprintln!("SHA3-512: {passed} cases passed");
}

#[test]
fn test_acvp_shake128() {
    skip_if_no_vectors!();
    let passed = run_vectors("shake128", |msg, len| {
        let mut out = vec![0u8; len];
        shake128(&mut out, msg);
        out
    });
    eprintln!("SHAKE128: {passed} cases passed");
}

#[test]
fn test_acvp_shake256() {
    skip_if_no_vectors!();
    let passed = run_vectors("shake256", |msg, len| {
        let mut out = vec![0u8; len];
        shake256(&mut out, msg);
        out
    });
    eprintln!("SHAKE256: {passed} cases passed");
}
