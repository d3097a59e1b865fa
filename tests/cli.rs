#![allow(deprecated)]

#[allow(unused_imports)]
use assert_cmd::cargo::CommandCargoExt;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn cmd(temp: &TempDir) -> assert_cmd::Command {
    let mut c = assert_cmd::Command::cargo_bin("novamind").unwrap();
    c.env("NOVAMIND_DIR", temp.path()).env("NO_COLOR", "1");
    c
}

/// Run `new` and return the generated id.
fn create(temp: &TempDir, args: &[&str]) -> String {
    let out = cmd(temp)
        .arg("new")
        .args(args)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let out = String::from_utf8_lossy(&out);
    out.trim()
        .strip_prefix("Created note ")
        .and_then(|rest| rest.split_whitespace().next())
        .expect("id in output")
        .to_string()
}

fn read_note(dir: &Path, id: &str) -> String {
    fs::read_to_string(dir.join(format!("{id}.md"))).expect("note file")
}

#[test]
fn new_writes_front_matter_file() {
    let temp = TempDir::new().unwrap();
    let id = create(
        &temp,
        &["Sprint Plan", "Plan", "the", "sprint", "--tags", "alpha, beta, alpha"],
    );

    let text = read_note(temp.path(), &id);
    assert!(text.starts_with("---\nid: "));
    assert!(text.contains("title: Sprint Plan"));
    assert!(text.contains("tags:\n- alpha\n- beta\n"));
    assert!(text.ends_with("---\n\nPlan the sprint"));
}

#[test]
fn list_shows_notes_sorted_with_tags() {
    let temp = TempDir::new().unwrap();
    cmd(&temp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No notes yet"));

    let a = create(&temp, &["First", "-t", "work"]);
    let b = create(&temp, &["Second"]);

    let out = cmd(&temp)
        .arg("list")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let out = String::from_utf8_lossy(&out);
    let ids: Vec<&str> =
        out.lines().filter_map(|l| l.split_whitespace().next()).collect();
    let mut expected = vec![a.as_str(), b.as_str()];
    expected.sort();
    assert_eq!(ids, expected);
    assert!(out.contains("First"));
    assert!(out.contains("#work"));

    cmd(&temp)
        .args(["list", "-t", "work"])
        .assert()
        .success()
        .stdout(predicate::str::contains("First"))
        .stdout(predicate::str::contains("Second").not());

    cmd(&temp)
        .args(["list", "-s", "second"])
        .assert()
        .success()
        .stdout(predicate::str::contains(b.as_str()))
        .stdout(predicate::str::contains(a.as_str()).not());
}

#[test]
fn view_prints_metadata_and_body() {
    let temp = TempDir::new().unwrap();
    let id = create(&temp, &["Viewed", "body", "text", "--status", "Open"]);

    cmd(&temp)
        .args(["view", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("# Viewed ({id})")))
        .stdout(predicate::str::contains("Status: Open"))
        .stdout(predicate::str::contains("body text"));

    cmd(&temp)
        .args(["view", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Note nope not found"));
}

#[test]
fn edit_fields_rewrites_file() {
    let temp = TempDir::new().unwrap();
    let id = create(&temp, &["Before", "old body"]);

    cmd(&temp)
        .args([
            "edit",
            &id,
            "--title",
            "After",
            "--status",
            "Done",
            "--responsible",
            "Robin",
            "--tags",
            "z, a",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Updated {id}")));

    let text = read_note(temp.path(), &id);
    assert!(text.contains("title: After"));
    assert!(text.contains("status: Done"));
    assert!(text.contains("responsible: Robin"));
    assert!(text.contains("tags:\n- a\n- z\n"));
    assert!(text.ends_with("old body"));
}

#[test]
fn edit_with_blank_title_falls_back_to_untitled() {
    let temp = TempDir::new().unwrap();
    let id = create(&temp, &["Named", "body"]);

    cmd(&temp).args(["edit", &id, "--title", "  "]).assert().success();
    assert!(read_note(temp.path(), &id).contains("title: Untitled\n"));

    let fresh = create(&temp, &["--title", "", "text"]);
    assert!(read_note(temp.path(), &fresh).contains("title: Untitled\n"));
}

#[test]
fn edit_with_editor_keeps_body() {
    let temp = TempDir::new().unwrap();
    let id = create(&temp, &["Edited", "unchanged body"]);

    cmd(&temp)
        .env("EDITOR", "true")
        .args(["edit", &id])
        .assert()
        .success();
    assert!(read_note(temp.path(), &id).ends_with("unchanged body"));

    cmd(&temp)
        .env("EDITOR", "false")
        .args(["edit", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Edit canceled."));
}

#[cfg(unix)]
#[test]
fn edit_with_editor_reads_back_scratch_file() {
    let temp = TempDir::new().unwrap();
    let id = create(&temp, &["Scripted", "old"]);
    let script = temp.path().join("editor.sh");
    fs::write(&script, "#!/bin/sh\nprintf 'rewritten body' > \"$1\"\n").unwrap();
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
    }

    cmd(&temp)
        .env("EDITOR", &script)
        .args(["edit", &id])
        .assert()
        .success();
    assert!(read_note(temp.path(), &id).ends_with("rewritten body"));
}

#[test]
fn delete_removes_file_and_reports_missing() {
    let temp = TempDir::new().unwrap();
    let id = create(&temp, &["Doomed"]);
    assert!(temp.path().join(format!("{id}.md")).exists());

    cmd(&temp)
        .args(["delete", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("Deleted {id}")));
    assert!(!temp.path().join(format!("{id}.md")).exists());

    cmd(&temp)
        .args(["delete", &id])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn tags_lists_index_with_counts() {
    let temp = TempDir::new().unwrap();
    cmd(&temp)
        .arg("tags")
        .assert()
        .success()
        .stdout(predicate::str::contains("No tags found."));

    create(&temp, &["One", "--tags", "beta, alpha"]);
    create(&temp, &["Two", "-t", "beta"]);

    let out = cmd(&temp)
        .arg("tags")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let out = String::from_utf8_lossy(&out);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("#alpha"));
    assert!(lines[0].contains("count    1"));
    assert!(lines[1].starts_with("#beta"));
    assert!(lines[1].contains("count    2"));
}

#[test]
fn hand_written_files_are_listed() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("loose-thoughts.md"), "no header at all").unwrap();
    fs::write(
        temp.path().join("half.md"),
        "---\ntitle: Half open\n\nnever closed",
    )
    .unwrap();

    cmd(&temp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Loose thoughts"))
        .stdout(predicate::str::contains("Half"));
}

#[test]
fn path_and_unknown_command() {
    let temp = TempDir::new().unwrap();
    cmd(&temp)
        .arg("path")
        .assert()
        .success()
        .stdout(predicate::str::contains(temp.path().to_string_lossy().to_string()));

    cmd(&temp)
        .arg("frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown command: frobnicate"));
}

#[test]
fn alias_binary_forwards() {
    let temp = TempDir::new().unwrap();
    let mut c = assert_cmd::Command::cargo_bin("nova").unwrap();
    c.env("NOVAMIND_DIR", temp.path())
        .arg("help")
        .assert()
        .success()
        .stdout(predicate::str::contains("NovaMind notes"));
}
