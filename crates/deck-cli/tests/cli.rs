use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn compile_fixture_writes_html() {
    let out = tempfile::tempdir().unwrap();
    let mut cmd = cargo_bin_cmd!("deck");
    cmd.arg(fixture_path("quarterly.deck"))
        .arg("--output-dir")
        .arg(out.path());

    cmd.assert().success();

    let html = fs::read_to_string(out.path().join("Quarterly.html")).unwrap();
    assert!(html.contains("<div class='slide Intro active' data-transition='fade' data-repeats='1'>"));
    assert!(html.contains("<div class='slide Numbers' data-transition='jump' data-repeats='2'>"));
    assert!(html.contains("Q3 &lt;draft&gt; &amp; notes"));
    assert!(html.contains(".Logo {\nmax-width: 200px;\nborder-radius: 8px;\nborder-style: solid;\n }"));
}

#[test]
fn dump_layout_prints_json() {
    let out = tempfile::tempdir().unwrap();
    let mut cmd = cargo_bin_cmd!("deck");
    cmd.arg(fixture_path("quarterly.deck"))
        .arg("-o")
        .arg(out.path())
        .arg("--dump-layout");

    cmd.assert().success().stdout(
        predicate::str::contains("\"identifier\": \"Numbers\"")
            .and(predicate::str::contains("\"min_row\": -1")),
    );
}

#[test]
fn custom_asset_root() {
    let out = tempfile::tempdir().unwrap();
    let mut cmd = cargo_bin_cmd!("deck");
    cmd.arg(fixture_path("quarterly.deck"))
        .arg("-o")
        .arg(out.path())
        .arg("--assets")
        .arg("player");

    cmd.assert().success();

    let html = fs::read_to_string(out.path().join("Quarterly.html")).unwrap();
    assert!(html.contains("<link rel='stylesheet' href='player/css/styles.css'>"));
    assert!(html.contains("<script src='player/js/core.js'></script>"));
}

#[test]
fn semantic_errors_fail_the_build() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.deck");
    fs::write(&input, "presentation Broken\nSlide S:\nStructure S:\n  add Ghost\n").unwrap();

    let mut cmd = cargo_bin_cmd!("deck");
    cmd.env("RUST_LOG", "error")
        .arg(&input)
        .arg("-o")
        .arg(dir.path().join("out"));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Object with identifier 'Ghost' does not exist"));
    assert!(!dir.path().join("out").exists());
}

#[test]
fn layout_cycle_is_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("cycle.deck");
    fs::write(
        &input,
        "presentation Cycle\nSlide S:\nTextblock A:\nTextblock B:\n\
         Structure S:\n  add A\n  add B\n  A top of B\n  B top of A\n",
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("deck");
    cmd.env("RUST_LOG", "warn")
        .arg(&input)
        .arg("-o")
        .arg(dir.path());

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Positioning cycle in slide 'S'"));
    assert!(dir.path().join("Cycle.html").exists());
}

#[test]
fn missing_input_fails() {
    let mut cmd = cargo_bin_cmd!("deck");
    cmd.arg("does/not/exist.deck");
    cmd.assert().failure().stderr(predicate::str::contains("Cannot read"));
}
