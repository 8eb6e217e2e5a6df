use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::tempdir;

#[test]
fn frustum_prints_snapshot_and_footprint() {
    let mut cmd = cargo_bin_cmd!("fov-locator");
    let output = cmd
        .args(["frustum", "--origin", "100,100", "--look-at", "100,0"])
        .output()
        .expect("run fov-locator");
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).expect("json");
    let gaze = json["frustum"]["gaze_deg"].as_f64().expect("gaze");
    assert!((gaze + 90.0).abs() < 1e-9, "gaze {gaze}");
    assert_eq!(json["footprint"]["visible"].as_array().map(Vec::len), Some(4));
    assert!(json["distance_to_visible_ground"].as_f64().expect("distance") > 0.0);
}

#[test]
fn solve_recovers_origin_from_corners() {
    let half = (46.4_f64 / 2.0).to_radians();
    let dx = 100.0 * half.tan();
    let mut cmd = cargo_bin_cmd!("fov-locator");
    let output = cmd
        .arg("solve")
        .arg(format!("--edge-a={},-100", -dx))
        .arg(format!("--edge-b={dx},-100"))
        .arg("--near=0,0")
        .output()
        .expect("run fov-locator");
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).expect("json");
    let chosen = &json["chosen"];
    let x = chosen[0].as_f64().expect("x");
    let y = chosen[1].as_f64().expect("y");
    assert!(x.abs() < 1e-6 && y.abs() < 1e-6, "chosen ({x}, {y})");
    assert_eq!(json["candidates"].as_array().map(Vec::len), Some(2));
}

#[test]
fn solve_fails_for_collapsed_corners() {
    let mut cmd = cargo_bin_cmd!("fov-locator");
    cmd.args(["solve", "--edge-a", "10,10", "--edge-b", "10,10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Coincident"));
}

#[test]
fn rejects_malformed_point() {
    let mut cmd = cargo_bin_cmd!("fov-locator");
    cmd.args(["frustum", "--origin", "100", "--look-at", "100,0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected X,Y"));
}

#[test]
fn replay_writes_report() {
    let dir = tempdir().expect("tempdir");
    let script = dir.path().join("session.json");
    let report = dir.path().join("report.json");
    fs::write(
        &script,
        r#"{
            "center": [100.0, 100.0],
            "events": [
                { "press": { "x": 100.0, "y": 100.0 } },
                { "drag": { "x": 130.0, "y": 120.0 } },
                { "release": { "x": 130.0, "y": 120.0 } },
                { "key": { "key": "s" } }
            ],
            "objects": [[300.0, 0.0]]
        }"#,
    )
    .expect("write script");

    let mut cmd = cargo_bin_cmd!("fov-locator");
    cmd.arg("replay")
        .arg(&script)
        .arg("--out")
        .arg(&report)
        .assert()
        .success()
        .stdout(predicate::str::contains("wrote session report"));

    let json: Value = serde_json::from_str(&fs::read_to_string(&report).expect("read report"))
        .expect("json");
    assert_eq!(json["events_applied"], 4);
    assert_eq!(json["rejected_drags"], 0);
    assert_eq!(json["region"]["radius"].as_f64(), Some(15.0));
    let display = json["display"].as_str().expect("display");
    assert!(display.starts_with("Location: (130.0, 120.0) Radius: 15.0"), "{display}");
    assert_eq!(json["bearings"].as_array().map(Vec::len), Some(1));
}

#[test]
fn replay_reports_missing_script() {
    let dir = tempdir().expect("tempdir");
    let mut cmd = cargo_bin_cmd!("fov-locator");
    cmd.arg("replay")
        .arg(dir.path().join("nope.json"))
        .assert()
        .failure();
}
