//! `termenu`: show a selection menu and report the choice through the exit status.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::CliConfig;
use std::process::ExitCode;
use termenu::{
    init_logging, init_tracing, install_terminal_panic_hook, log_debug, log_file_path, MenuError,
    Selection, TerminalMenu,
};

fn main() -> ExitCode {
    // Status 0 is reserved for "nothing selected", which covers usage errors too.
    let config = match CliConfig::try_parse() {
        Ok(config) => config,
        Err(err) => {
            let _ = err.print();
            return ExitCode::SUCCESS;
        }
    };

    init_logging(&config.logging);
    init_tracing(&config.logging);
    install_terminal_panic_hook();
    log_debug("=== termenu started ===");
    log_debug(&format!("Log file: {:?}", log_file_path()));

    match run(&config) {
        Ok(Some(selection)) => {
            if config.print_to_stdout() {
                if let Some(line) = stdout_line(&selection) {
                    println!("{line}");
                }
            }
            ExitCode::from(exit_value(&selection))
        }
        Ok(None) => ExitCode::SUCCESS,
        Err(err) => {
            log_debug(&failure_log_line(&err));
            eprintln!("{err:#}");
            ExitCode::SUCCESS
        }
    }
}

fn run(config: &CliConfig) -> Result<Option<Selection>> {
    let mut menu = TerminalMenu::new(&config.entries, config.menu_options())?;
    menu.show().context("failed to show the menu")
}

/// Configuration mistakes are reported before the terminal is touched; keep
/// them apart from terminal and I/O failures in the debug log.
fn failure_log_line(err: &anyhow::Error) -> String {
    let is_configuration = err
        .downcast_ref::<MenuError>()
        .is_some_and(MenuError::is_configuration_error);
    if is_configuration {
        format!("invalid menu configuration: {err:#}")
    } else {
        format!("termenu failed: {err:#}")
    }
}

/// `i + 1` for the first chosen entry, 0 when nothing was chosen.
fn exit_value(selection: &Selection) -> u8 {
    selection
        .indices()
        .first()
        .map(|index| u8::try_from(index + 1).unwrap_or(u8::MAX))
        .unwrap_or(0)
}

fn stdout_line(selection: &Selection) -> Option<String> {
    let indices = selection.indices();
    if indices.is_empty() {
        return None;
    }
    Some(
        indices
            .iter()
            .map(|index| (index + 1).to_string())
            .collect::<Vec<_>>()
            .join(","),
    )
}
