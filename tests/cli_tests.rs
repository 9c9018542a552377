use clap::Parser;
use guardfs::cli::{Args, Command};
use guardfs::config::types::{Config, LogLevel};
use std::path::PathBuf;

#[test]
fn parses_every_subcommand() {
    let cases: Vec<(Vec<&str>, Command)> = vec![
        (
            vec!["guardfs", "create", "a.txt", "--content", "hi"],
            Command::Create {
                path: PathBuf::from("a.txt"),
                content: "hi".into(),
            },
        ),
        (
            vec!["guardfs", "read", "a.txt"],
            Command::Read {
                path: PathBuf::from("a.txt"),
            },
        ),
        (
            vec!["guardfs", "delete", "a.txt"],
            Command::Delete {
                path: PathBuf::from("a.txt"),
            },
        ),
        (
            vec!["guardfs", "copy", "a.txt", "b.txt"],
            Command::Copy {
                src: PathBuf::from("a.txt"),
                dst: PathBuf::from("b.txt"),
            },
        ),
        (
            vec!["guardfs", "move", "a.txt", "d/b.txt"],
            Command::Move {
                src: PathBuf::from("a.txt"),
                dst: PathBuf::from("d/b.txt"),
            },
        ),
        (
            vec!["guardfs", "mkdir", "d"],
            Command::Mkdir {
                path: PathBuf::from("d"),
            },
        ),
        (vec!["guardfs", "demo", "--cleanup"], Command::Demo { cleanup: true }),
        (vec!["guardfs", "faults"], Command::Faults),
    ];

    for (argv, expected) in cases {
        let args = Args::parse_from(argv.iter().copied());
        assert_eq!(args.command, Some(expected), "argv: {argv:?}");
    }
}

#[test]
fn create_content_defaults_to_empty() {
    let args = Args::parse_from(["guardfs", "create", "a.txt"]);
    assert_eq!(
        args.command,
        Some(Command::Create {
            path: PathBuf::from("a.txt"),
            content: String::new(),
        })
    );
}

#[test]
fn global_flags_after_subcommand() {
    let args = Args::parse_from(["guardfs", "mkdir", "d", "--dir", "/tmp/work", "--dry-run"]);
    assert_eq!(args.dir, Some(PathBuf::from("/tmp/work")));
    assert!(args.dry_run);
}

#[test]
fn effective_log_level_precedence() {
    let args = Args::parse_from(["guardfs", "--debug", "--log-level", "quiet", "faults"]);
    assert_eq!(args.effective_log_level(), Some(LogLevel::Debug)); // --debug wins

    let args = Args::parse_from(["guardfs", "--log-level", "info", "faults"]);
    assert_eq!(args.effective_log_level(), Some(LogLevel::Info));

    let args = Args::parse_from(["guardfs", "faults"]);
    assert_eq!(args.effective_log_level(), None);
}

#[test]
fn invalid_log_level_is_rejected_by_parser() {
    let res = Args::try_parse_from(["guardfs", "--log-level", "loud", "faults"]);
    assert!(res.is_err());
}

#[test]
fn apply_overrides_sets_flags() {
    let args = Args::parse_from([
        "guardfs",
        "--log-level",
        "info",
        "--log-file",
        "/tmp/g.log",
        "--json",
        "--dry-run",
        "faults",
    ]);
    let mut cfg = Config::default();
    args.apply_overrides(&mut cfg);
    assert_eq!(cfg.log_level, LogLevel::Info);
    assert_eq!(cfg.log_file, Some(PathBuf::from("/tmp/g.log")));
    assert!(cfg.json);
    assert!(cfg.dry_run);
}

#[test]
fn unset_flags_keep_config_values() {
    let args = Args::parse_from(["guardfs", "faults"]);
    let mut cfg = Config {
        log_level: LogLevel::Quiet,
        log_file: Some(PathBuf::from("/var/log/g.log")),
        json: true,
        dry_run: true,
    };
    let before = cfg.clone();
    args.apply_overrides(&mut cfg);
    assert_eq!(cfg, before);
}
