//! The scripted walkthrough against a real temporary directory.

use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;
use guardfs::demo::{self, moved_file, COPY_FILE, SOURCE_FILE};
use guardfs::{GuardedFileOperator, RealFs};

#[test]
fn walkthrough_with_cleanup_leaves_no_files() {
    let temp = TempDir::new().unwrap();
    let op = GuardedFileOperator::new(RealFs::rooted(temp.path()));

    let mut out = Vec::new();
    let steps = demo::run_scenario(&op, &mut out, true).expect("scenario output");
    assert!(steps.iter().all(|s| !s.outcome.is_failed()));

    temp.child(SOURCE_FILE).assert(predicate::path::missing());
    temp.child(COPY_FILE).assert(predicate::path::missing());
    temp.child(moved_file()).assert(predicate::path::missing());
    temp.child(demo::MOVE_DIR).assert(predicate::path::is_dir());

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("> copy test.txt -> default.txt"));
    assert!(text.contains("File copied"));
}

#[test]
fn walkthrough_twice_without_cleanup_keeps_first_move() {
    let temp = TempDir::new().unwrap();
    let op = GuardedFileOperator::new(RealFs::rooted(temp.path()));

    demo::run_scenario(&op, &mut std::io::sink(), false).unwrap();
    let expected = format!("{}\n", demo::SOURCE_TEXT);
    temp.child(moved_file()).assert(expected.as_str());
    temp.child(SOURCE_FILE).assert(predicate::path::missing());

    let steps = demo::run_scenario(&op, &mut std::io::sink(), false).unwrap();
    assert!(steps.iter().any(|s| s.outcome.to_string()
        == "Cannot move! Destination file already exists"));
    temp.child(SOURCE_FILE).assert(expected.as_str());
}
