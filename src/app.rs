//! Application orchestrator.
//! Loads/merges config, initializes logging, builds the operator and dispatches the subcommand.
//!
//! Exit status: success for completed, refused and dry-run outcomes; failure only
//! when the host filesystem rejected an action whose preconditions held.

use anyhow::{bail, Context, Result};
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::{debug, error};

use guardfs::cli::{Args, Command};
use guardfs::config::CONFIG_ENV;
use guardfs::output as out;
use guardfs::{
    default_config_path, demo, faults, load_config, Config, GuardedFileOperator, Outcome, RealFs,
};

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<ExitCode> {
    // Handle --print-config before logging init
    if args.print_config {
        print_config_location();
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = args.command.clone() else {
        bail!("no command given; run with --help to see the available commands");
    };

    // Build config (may read XML). CLI args override config values.
    // A broken config file still gets logging from defaults + CLI so the
    // failure is reported with its code.
    let ((mut cfg, cfg_path), config_error) = match load_config() {
        Ok(loaded) => (loaded, None),
        Err(e) => ((Config::default(), None), Some(e)),
    };
    args.apply_overrides(&mut cfg);

    // Guard must live until the end of run to flush file logs
    let guard = init_tracing(cfg.log_level, cfg.log_file.as_deref(), cfg.json)
        .context("initialize logging")?;

    if let Some(e) = config_error {
        error!(code = e.code(), kind = e.kind(), error = %e, "Configuration could not be loaded");
        drop(guard);
        return Err(anyhow::Error::new(e).context("load configuration"));
    }

    debug!(
        config = %cfg_path.as_ref().map(|p| p.display().to_string()).unwrap_or_else(|| "<defaults>".into()),
        dry_run = cfg.dry_run,
        "Starting guardfs: {:?}",
        command
    );

    let fs = match &args.dir {
        Some(dir) => RealFs::rooted(dir),
        None => RealFs::new(),
    };
    let op = GuardedFileOperator::new(fs).with_dry_run(cfg.dry_run);

    let result = dispatch(&op, command);

    drop(guard);
    result
}

fn dispatch(op: &GuardedFileOperator<RealFs>, command: Command) -> Result<ExitCode> {
    let outcome = match command {
        Command::Create { path, content } => op.create(&path, &content),
        Command::Read { path } => {
            // Release the stdout lock before printing the status line.
            let mut stdout = io::stdout().lock();
            let outcome = op.read(&path, &mut stdout);
            drop(stdout);
            outcome
        }
        Command::Delete { path } => op.delete(&path),
        Command::Copy { src, dst } => op.copy(&src, &dst),
        Command::Move { src, dst } => op.move_file(&src, &dst),
        Command::Mkdir { path } => op.make_directory(&path),
        Command::Demo { cleanup } => {
            let mut stdout = io::stdout().lock();
            let steps = demo::run_scenario(op, &mut stdout, cleanup)
                .context("write walkthrough output")?;
            let mut failed = 0usize;
            for step in steps.iter().filter(|s| s.outcome.is_failed()) {
                error!(step = %step.label, outcome = %step.outcome, "Walkthrough step failed");
                failed += 1;
            }
            if failed > 0 {
                error!(failed, "Walkthrough finished with host failures");
                return Ok(ExitCode::FAILURE);
            }
            return Ok(ExitCode::SUCCESS);
        }
        Command::Faults => {
            let mut stdout = io::stdout().lock();
            faults::run_fault_demos(&mut stdout).context("write fault demo output")?;
            stdout.flush().context("flush stdout")?;
            return Ok(ExitCode::SUCCESS);
        }
    };

    out::print_outcome(&outcome);
    Ok(exit_code_for(&outcome))
}

fn exit_code_for(outcome: &Outcome) -> ExitCode {
    if outcome.is_failed() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn print_config_location() {
    if let Some(cfg_env) = std::env::var(CONFIG_ENV).ok().filter(|v| !v.is_empty()) {
        out::print_info(&format!("Using {CONFIG_ENV} (explicit):\n  {cfg_env}\n"));
        out::print_info(&format!("To override, unset {CONFIG_ENV} or set it to another file."));
        return;
    }
    match default_config_path() {
        Some(p) => {
            out::print_info(&format!("Default guardfs config path:\n  {}\n", p.display()));
            if p.exists() {
                out::print_info("A config file exists at that location.");
            } else {
                out::print_info("No config file exists there; built-in defaults are used.");
            }
        }
        None => out::print_error("Could not determine a default config path"),
    }
}
