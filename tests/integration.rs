use std::path::Path;
use std::process::{Command, Output};

fn doclinks_cmd(fixture: &str) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_doclinks"));
    cmd.current_dir(Path::new("tests/fixtures").join(fixture));
    cmd
}

fn doclinks_in(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_doclinks"));
    cmd.current_dir(dir);
    cmd
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

#[test]
fn clean_tree_passes() {
    let output = doclinks_cmd("basic").output().unwrap();
    let out = stdout(&output);
    assert_eq!(output.status.code(), Some(0), "stdout: {out}");
    assert!(out.contains("Scanning 3 documentation files..."));
    assert!(out.contains("All links valid across 3 files."));
    assert!(out.contains("PASSED: Documentation Link Validation"));
    assert!(!out.contains("Excluding directories"));
}

#[test]
fn broken_links_fail_in_file_then_line_order() {
    let output = doclinks_cmd("broken").output().unwrap();
    let out = stdout(&output);
    assert_eq!(output.status.code(), Some(1), "stdout: {out}");
    assert!(out.contains("FOUND 3 broken link(s) in 2 file(s):"));

    let file_link = out
        .find("  docs/a.md:3: broken link [missing](./nope.md) -> file not found")
        .unwrap();
    let anchor_link = out
        .find("  docs/a.md:5: broken anchor #nope (heading not found)")
        .unwrap();
    let template = out
        .find("  templates/t.md:1: broken link [placeholder](LINK_TO_PHASE0_README)")
        .unwrap();
    assert!(file_link < anchor_link);
    assert!(anchor_link < template);
    assert!(out.contains("FAILED: Documentation Link Validation"));
}

#[test]
fn exclude_removes_errors_and_file_count() {
    for flag in [vec!["--exclude", "templates"], vec!["--exclude=templates"]] {
        let output = doclinks_cmd("broken").args(&flag).output().unwrap();
        let out = stdout(&output);
        assert_eq!(output.status.code(), Some(1));
        assert!(out.contains("Excluding directories: templates"));
        assert!(out.contains("Scanning 1 documentation files..."));
        assert!(out.contains("FOUND 2 broken link(s) in 1 file(s):"));
        assert!(!out.contains("templates/t.md"));
    }
}

#[test]
fn repeated_runs_are_identical() {
    let first = doclinks_cmd("broken").output().unwrap();
    let second = doclinks_cmd("broken").output().unwrap();
    assert_eq!(first.status.code(), second.status.code());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn unknown_flags_are_ignored() {
    let output = doclinks_cmd("basic")
        .args(["--frobnicate", "-q", "--exclude"])
        .output()
        .unwrap();
    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn positional_paths_narrow_the_scan() {
    let output = doclinks_cmd("broken").arg("templates").output().unwrap();
    let out = stdout(&output);
    assert_eq!(output.status.code(), Some(1));
    assert!(out.contains("Scanning 1 documentation files..."));
    assert!(out.contains("templates/t.md:1"));

    let missing = doclinks_cmd("broken").arg("no-such-dir").output().unwrap();
    assert_eq!(missing.status.code(), Some(0));
    assert!(stdout(&missing).contains("Scanning 0 documentation files..."));
}

#[test]
fn verbose_traces_every_checked_link() {
    let output = doclinks_cmd("basic").arg("-v").output().unwrap();
    let out = stdout(&output);
    assert_eq!(output.status.code(), Some(0));
    assert!(out.contains("  SKIP (external): README.md:11 -> https://example.com/definitely/missing"));
    assert!(out.contains("  OK (anchor): README.md:7 -> #setup--install"));
    assert!(out.contains("  OK (file): docs/guide.md:6 -> ../README.md"));
    assert!(out.contains("  OK (anchor): docs/guide.md:5 -> #cafe-notes"));
    assert!(!out.contains("data:image"));
}

#[test]
fn json_report_is_parseable() {
    let output = doclinks_cmd("broken").args(["--format", "json", "-v"]).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["files_scanned"], 2);
    assert_eq!(report["files_with_errors"], 2);
    assert_eq!(report["passed"], false);
    assert_eq!(report["broken"][0]["file"], "docs/a.md");
    assert_eq!(report["broken"][0]["line"], 3);
    assert_eq!(report["broken"][1]["kind"], "anchor");
    assert_eq!(report["broken"].as_array().unwrap().len(), 3);
}

#[test]
fn config_file_adds_exclusions() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), ".doclinks.toml", "exclude = [\"history\"]\n");
    write(dir.path(), "history/old.md", "[gone](../moved.md)\n");
    write(dir.path(), "docs/index.md", "# Index\n[self](#index)\n");

    let output = doclinks_in(dir.path()).output().unwrap();
    let out = stdout(&output);
    assert_eq!(output.status.code(), Some(0), "stdout: {out}");
    assert!(out.contains("Excluding directories: history"));
    assert!(out.contains("Scanning 1 documentation files..."));
}

#[test]
fn malformed_config_is_a_runtime_error() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), ".doclinks.toml", "exclude = \"not a list\"\n");
    write(dir.path(), "a.md", "# A\n");

    let output = doclinks_in(dir.path()).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error: Invalid Config"));
}

#[test]
fn root_flag_scans_another_tree() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "docs/a.md", "[b](./b.md)\n");

    let missing = doclinks_cmd("basic").arg("--root").arg(dir.path()).output().unwrap();
    assert_eq!(missing.status.code(), Some(1));
    assert!(stdout(&missing).contains("docs/a.md:1: broken link [b](./b.md) -> file not found"));

    write(dir.path(), "docs/b.md", "# B\n");
    let present = doclinks_cmd("basic").arg("--root").arg(dir.path()).output().unwrap();
    assert_eq!(present.status.code(), Some(0));
}

#[test]
fn root_flag_accepts_a_single_file() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "a.md", "# A\n[top](#a) and [b](b.md)\n");
    write(dir.path(), "b.md", "# B\n");

    let output = doclinks_in(dir.path()).arg("--root").arg("a.md").output().unwrap();
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Scanning 1 documentation files..."));
}
