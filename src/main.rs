//! Main application entry point and high-level flow coordination.
//!
//! This module stays focused on CLI dispatch: parse arguments, load
//! configuration, assemble the session with its real providers, and hand off.
//! Everything time-related lives in the library.

use std::sync::Arc;

use anyhow::Result;

use salawat::args::{self, CliAction};
use salawat::config::{self, Config};
use salawat::constants::{EXIT_FAILURE, EXIT_SUCCESS};
use salawat::display::TerminalRenderer;
use salawat::providers::{AladhanProvider, IpLocationProvider};
use salawat::session::{Session, SessionParams};
use salawat::{log_end, log_error, log_pipe, log_version};

fn main() {
    let action = args::parse_args(std::env::args().skip(1));

    let exit_code = match action {
        CliAction::ShowHelp => {
            args::print_help();
            EXIT_SUCCESS
        }
        CliAction::ShowVersion => {
            args::print_version();
            EXIT_SUCCESS
        }
        CliAction::ShowHelpDueToError => {
            args::print_help();
            EXIT_FAILURE
        }
        CliAction::Run {
            debug_enabled,
            config_dir,
        } => run(debug_enabled, config_dir, None, false),
        CliAction::Times {
            debug_enabled,
            config_dir,
            date,
        } => run(debug_enabled, config_dir, date, true),
    };

    std::process::exit(exit_code);
}

fn run(
    debug_enabled: bool,
    config_dir: Option<String>,
    date: Option<String>,
    once: bool,
) -> i32 {
    log_version!();
    match try_run(debug_enabled, config_dir, date, once) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            log_pipe!();
            log_error!("{e:#}");
            log_end!();
            EXIT_FAILURE
        }
    }
}

fn try_run(
    debug_enabled: bool,
    config_dir: Option<String>,
    date: Option<String>,
    once: bool,
) -> Result<()> {
    config::set_config_dir(config_dir)?;
    let config = Config::load()?;

    let date = date
        .map(|raw| {
            chrono::NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                .map_err(|e| anyhow::anyhow!("Invalid --date {raw:?}: {e}. Use YYYY-MM-DD"))
        })
        .transpose()?;

    let renderer = Arc::new(TerminalRenderer::new(config.digit_locale()));
    let session = Session::new(SessionParams {
        debug_enabled,
        location_provider: Box::new(IpLocationProvider::new()?),
        prayer_provider: Box::new(AladhanProvider::new()?),
        renderer,
        config,
    });

    if once {
        session.run_once(date)?;
        log_end!();
        Ok(())
    } else {
        session.run()
    }
}
