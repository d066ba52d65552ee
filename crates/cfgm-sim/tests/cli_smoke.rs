use std::fs::{self, File};
use std::io::Read;
use std::path::Path;
use std::process::{Command, Output};

use flate2::read::GzDecoder;
use serde_json::Value;

const CYCLE: &str = "a b\nb c\nc d\nd a\n";

fn cfgm_sim(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cfgm-sim"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("run cfgm-sim")
}

fn read_gz(path: &Path) -> String {
    let mut text = String::new();
    GzDecoder::new(File::open(path).expect("open"))
        .read_to_string(&mut text)
        .expect("gunzip");
    text
}

fn weighted_degrees(text: &str) -> std::collections::BTreeMap<String, usize> {
    let mut degrees = std::collections::BTreeMap::new();
    for line in text.lines() {
        let mut parts = line.split_whitespace();
        let a = parts.next().expect("source").to_string();
        let b = parts.next().expect("target").to_string();
        let weight: usize = line
            .rsplit(": ")
            .next()
            .and_then(|w| w.trim_end_matches('}').parse().ok())
            .expect("weight");
        *degrees.entry(a).or_default() += weight;
        *degrees.entry(b).or_default() += weight;
    }
    degrees
}

#[test]
fn rewire_writes_seeded_ensemble_and_manifest() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("cycle.edgelist");
    fs::write(&input, CYCLE).unwrap();
    let out = dir.path().join("out");

    let output = cfgm_sim(&[
        "rewire",
        "-i",
        input.to_str().unwrap(),
        "-n",
        "3",
        "--seed",
        "7",
        "--output",
        out.to_str().unwrap(),
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let manifest: Value =
        serde_json::from_str(&fs::read_to_string(out.join("manifest.json")).unwrap()).unwrap();
    assert_eq!(manifest["nodes"], 4);
    assert_eq!(manifest["edges"], 4);
    assert_eq!(manifest["config"]["size"], 3);
    let files = manifest["replicas"][0]["files"].as_array().unwrap();
    assert_eq!(files.len(), 3);

    for idx in 0..3 {
        let path = out.join(format!("seed7_{idx}.edgelist.gz"));
        let degrees = weighted_degrees(&read_gz(&path));
        assert!(degrees.values().all(|d| *d == 2), "{degrees:?}");
        assert_eq!(degrees.len(), 4);
    }
}

#[test]
fn seeded_runs_are_reproducible() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("cycle.edgelist");
    fs::write(&input, CYCLE).unwrap();

    let mut hashes = Vec::new();
    for name in ["first", "second"] {
        let out = dir.path().join(name);
        let output = cfgm_sim(&[
            "rewire",
            "-i",
            input.to_str().unwrap(),
            "-n",
            "4",
            "--seed",
            "11",
            "--output",
            out.to_str().unwrap(),
        ]);
        assert!(output.status.success());
        let manifest: Value = serde_json::from_slice(&output.stdout).unwrap();
        hashes.push(manifest["replicas"][0]["ensemble_hash"].clone());
    }
    assert_eq!(hashes[0], hashes[1]);
}

#[test]
fn infeasible_input_fails_without_writing_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("loop.edgelist");
    fs::write(&input, "a a\n").unwrap();
    let out = dir.path().join("out");

    let output = cfgm_sim(&[
        "rewire",
        "-i",
        input.to_str().unwrap(),
        "--retry-budget",
        "5",
        "--output",
        out.to_str().unwrap(),
    ]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("ensemble-exhausted"));
    assert!(!out.exists());
}

#[test]
fn degrees_reports_weighted_degrees() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("weighted.edgelist");
    fs::write(&input, "a b {'weight': 2}\nb c 1\n").unwrap();

    let output = cfgm_sim(&["degrees", "-i", input.to_str().unwrap()]);
    assert!(output.status.success());
    let summary: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["stubs"], 6);
    assert_eq!(
        summary["degrees"],
        serde_json::json!([["a", 2], ["b", 3], ["c", 1]])
    );
}

#[test]
fn diagram_merges_parallel_edges() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("pairs.edgelist");
    fs::write(&input, "a b 2\nb c\n").unwrap();

    let output = cfgm_sim(&["diagram", "-i", input.to_str().unwrap(), "--horizontal"]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "direction: right\n\na -- b : 2 {style: {font-size: 24; bold: true}}\nb -- c\n"
    );
}

#[test]
fn oversized_weight_is_reported_not_panicked() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("huge.edgelist");
    fs::write(&input, "a b 18446744073709551615\nb a 1\n").unwrap();

    let output = cfgm_sim(&["degrees", "-i", input.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid-weight"));
}

#[test]
fn json_log_format_flag_is_accepted() {
    let output = cfgm_sim(&["--log-format", "json", "version"]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap().trim(),
        env!("CARGO_PKG_VERSION")
    );
}
