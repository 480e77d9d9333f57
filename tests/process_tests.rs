//! Runs real subprocesses: a shell script stands in for clang.
//!
//! Everything lives in one test function so no other thread in this binary forks while a
//! freshly written script is still open for writing.
#![cfg(unix)]

mod common;

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::process::Command;

use common::{PLUGIN, write};
use golden_harness::harness::TracingReporter;
use golden_harness::{ComparisonOutcome, GoldenFileTestHarness, HarnessConfig};

const TOOL_SCRIPT: &str = r#"#!/bin/sh
for last; do :; done
case "$last" in
  ok.cpp) echo "ok" ;;
  fail.cpp) echo "fail.cpp:1:1: error: bad" >&2; exit 1 ;;
  expected_error.cpp) echo "expected_error.cpp:3:1: error: [chromium-style] bad" >&2; exit 1 ;;
  crlf.cpp) printf 'sub\\dir\\a.h:1:1: warning: w\r\n' ;;
  mixed.cpp) echo out1; echo err1 >&2; echo out2 ;;
  flags.cpp) echo "$@" ;;
  where.cpp) ls ;;
esac
"#;

fn install_tool(root: &Path) -> std::path::PathBuf {
    let path = write(root, "fake-clang", TOOL_SCRIPT);
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[test]
fn real_tool_runs_end_to_end() {
    let root = tempfile::tempdir().unwrap();
    let tests = root.path().join("tests");
    fs::create_dir(&tests).unwrap();
    let tool = install_tool(root.path());

    write(&tests, "ok.cpp", "");
    write(&tests, "ok.txt", "ok\n");
    write(&tests, "fail.cpp", "");
    write(&tests, "fail.txt", "ok\n");
    write(&tests, "expected_error.cpp", "");
    write(
        &tests,
        "expected_error.txt",
        "expected_error.cpp:3:1: error: [chromium-style] bad\n",
    );
    write(&tests, "crlf.cpp", "");
    write(&tests, "crlf.txt", "sub/dir/a.h:1:1: warning: w\n");
    write(&tests, "mixed.cpp", "");
    write(&tests, "mixed.txt", "out1\nerr1\nout2\n");
    write(&tests, "flags.cpp", "");
    write(&tests, "flags.flags", "-DX=1 -Wall");
    write(
        &tests,
        "flags.txt",
        "-c -std=c++14 -Xclang -add-plugin -Xclang find-bad-constructs -DX=1 -Wall flags.cpp\n",
    );
    write(&tests, "missing.mm", "");

    // Harness API against the process executor.
    let harness = GoldenFileTestHarness::new(HarnessConfig::new(&tests, &tool, PLUGIN)).unwrap();
    let summary = harness.run_with_reporter(&mut TracingReporter).unwrap();

    let mut failing = summary.failing.clone();
    failing.sort();
    assert_eq!(failing, vec!["fail", "missing"]);
    assert_eq!(summary.passing.len(), 5);
    assert_eq!(summary.exit_code(), 2);
    assert_eq!(
        fs::read_to_string(tests.join("fail.txt.actual")).unwrap(),
        "fail.cpp:1:1: error: bad\n"
    );
    assert!(tests.join("missing.txt.actual").exists());
    assert!(!tests.join("ok.txt.actual").exists());

    // The tool runs inside the test directory.
    write(&tests, "where.cpp", "");
    let where_case = harness
        .collect_cases()
        .unwrap()
        .into_iter()
        .find(|c| c.name == "where")
        .unwrap();
    match harness.run_case(&where_case) {
        ComparisonOutcome::FailedNoBaseline => {}
        other => panic!("unexpected outcome {other:?}"),
    }
    let listing = fs::read_to_string(tests.join("where.txt.actual")).unwrap();
    assert!(listing.lines().any(|l| l == "where.cpp"));
    fs::remove_file(tests.join("where.cpp")).unwrap();
    fs::remove_file(tests.join("where.txt.actual")).unwrap();

    // The binary: exit status is the failing count.
    let status = Command::new(env!("CARGO_BIN_EXE_golden-harness"))
        .arg("--tool")
        .arg(&tool)
        .arg("--plugin")
        .arg(PLUGIN)
        .arg("--no-color")
        .arg(&tests)
        .output()
        .unwrap();
    assert_eq!(status.status.code(), Some(2));
    let stdout = String::from_utf8_lossy(&status.stdout);
    assert!(stdout.contains("Testing ok.cpp... passed!"));
    assert!(stdout.contains("Ran 7 tests: 5 succeeded, 2 failed"));

    // Reset mode records every baseline, then a plain run is clean.
    let reset = Command::new(env!("CARGO_BIN_EXE_golden-harness"))
        .arg("--tool")
        .arg(&tool)
        .arg("--plugin")
        .arg(PLUGIN)
        .arg("--reset-results")
        .arg(&tests)
        .output()
        .unwrap();
    assert_eq!(reset.status.code(), Some(0));
    assert_eq!(fs::read_to_string(tests.join("missing.txt")).unwrap(), "");

    let clean = Command::new(env!("CARGO_BIN_EXE_golden-harness"))
        .arg("--tool")
        .arg(&tool)
        .arg("--plugin")
        .arg(PLUGIN)
        .arg("--json")
        .arg(&tests)
        .output()
        .unwrap();
    assert_eq!(clean.status.code(), Some(0));
    let json: serde_json::Value = serde_json::from_slice(&clean.stdout).unwrap();
    assert_eq!(json["failed"], 0);
    assert_eq!(json["total"], 7);

    // Configuration problems exit before any case runs.
    let bad = Command::new(env!("CARGO_BIN_EXE_golden-harness"))
        .arg("--tool")
        .arg(&tool)
        .arg("--plugin")
        .arg(PLUGIN)
        .arg(root.path().join("nope"))
        .output()
        .unwrap();
    assert_eq!(bad.status.code(), Some(1));
    assert!(!bad.stderr.is_empty());
}
