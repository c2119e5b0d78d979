//! Command-line argument parsing and processing.
//!
//! This module handles parsing of command-line arguments and provides a clean
//! interface for the main application logic. It supports the standard help,
//! version, and debug flags while gracefully handling unknown options.

/// Represents the parsed command-line arguments and their intended actions.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Run the countdown daemon with these settings
    Run {
        debug_enabled: bool,
        config_dir: Option<String>,
    },
    /// Print one day's prayer table and next event, then exit
    Times {
        debug_enabled: bool,
        config_dir: Option<String>,
        /// `--date YYYY-MM-DD`; today in the location's timezone when absent
        date: Option<String>,
    },
    /// Display help information and exit
    ShowHelp,
    /// Display version information and exit
    ShowVersion,
    /// Show help due to unknown arguments and exit
    ShowHelpDueToError,
}

/// Parse command-line arguments into an action.
pub fn parse_args<I>(args: I) -> CliAction
where
    I: IntoIterator<Item = String>,
{
    let args: Vec<String> = args.into_iter().collect();

    let mut debug_enabled = false;
    let mut config_dir: Option<String> = None;
    let mut date: Option<String> = None;
    let mut subcommand: Option<&str> = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => return CliAction::ShowHelp,
            "--version" | "-V" => return CliAction::ShowVersion,
            "--debug" | "-d" => debug_enabled = true,
            "--config-dir" | "-c" => match iter.next() {
                Some(dir) => config_dir = Some(dir.clone()),
                None => return CliAction::ShowHelpDueToError,
            },
            "--date" => match iter.next() {
                Some(value) => date = Some(value.clone()),
                None => return CliAction::ShowHelpDueToError,
            },
            "times" if subcommand.is_none() => subcommand = Some("times"),
            _ => return CliAction::ShowHelpDueToError,
        }
    }

    match subcommand {
        Some("times") => CliAction::Times {
            debug_enabled,
            config_dir,
            date,
        },
        Some(_) => CliAction::ShowHelpDueToError,
        None if date.is_some() => CliAction::ShowHelpDueToError,
        None => CliAction::Run {
            debug_enabled,
            config_dir,
        },
    }
}

/// Print usage information.
pub fn print_help() {
    println!("salawat v{}", env!("CARGO_PKG_VERSION"));
    println!("Prayer times with a live Adhān/Iqāma countdown");
    println!();
    println!("Usage: salawat [OPTIONS] [COMMAND]");
    println!();
    println!("Commands:");
    println!("  times                Print one day's prayer table and exit");
    println!();
    println!("Options:");
    println!("  -d, --debug          Enable debug output");
    println!("  -c, --config-dir DIR Use DIR instead of the default config directory");
    println!("      --date DATE      Target date for 'times' (YYYY-MM-DD)");
    println!("  -h, --help           Print help");
    println!("  -V, --version        Print version");
}

/// Print version information.
pub fn print_version() {
    println!("salawat v{}", env!("CARGO_PKG_VERSION"));
}
