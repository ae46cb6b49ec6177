//! pi3g TFT installer binary

use anyhow::{Context, Result};
use clap::builder::PossibleValuesParser;
use clap::{Args, Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;
use std::{env, panic, process};
use tft_installer::display::{Rotation, profiles};
use tft_installer::exit_codes::{EXIT_ERROR, EXIT_PANIC, EXIT_SUCCESS};
use tft_installer::installer::defaults::ASSUME_YES_ENV;
use tft_installer::logger::JsonLogger;
use tft_installer::utils::is_env_true;
use tft_installer::{InstallOptions, UninstallOptions, prompt};

const VERSION: &str = tft_installer::version::VERSION;

#[derive(Parser, Debug)]
#[command(
    name = "tft-installer",
    version = VERSION,
    about = "Install drivers and boot configuration for pi3g TFT displays"
)]
struct Cli {
    /// Log level (trace, debug, info, warn, error, json[:level])
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Install the display driver and configure the system
    Install(InstallArgs),
    /// Remove the installer's boot configuration and disable fbcp
    Uninstall {
        /// Show output of external commands
        #[arg(short, long)]
        verbose: bool,
    },
}

#[derive(Args, Debug)]
struct InstallArgs {
    /// Display to install (prompted for when omitted)
    #[arg(short, long, value_parser = PossibleValuesParser::new(profiles::identifiers()))]
    display: Option<String>,

    /// Rotation in degrees: 0, 90, 180 or 270 (prompted for when omitted)
    #[arg(short, long)]
    rotation: Option<u32>,

    /// Reboot when done without asking
    #[arg(long, conflicts_with = "no_reboot")]
    reboot: bool,

    /// Do not reboot when done
    #[arg(long)]
    no_reboot: bool,

    /// Show output of external commands
    #[arg(short, long)]
    verbose: bool,

    /// Directory holding the overlay .dts sources (defaults to CWD)
    #[arg(long)]
    overlay_dir: Option<PathBuf>,
}

fn main() {
    // Set up panic handler to return specific exit code
    panic::set_hook(Box::new(|panic_info| {
        eprintln!("PANIC: {}", panic_info);
        process::exit(EXIT_PANIC);
    }));

    let result = panic::catch_unwind(run);

    match result {
        Ok(exit_code) => process::exit(exit_code),
        Err(_) => {
            eprintln!("Fatal: Unhandled panic in installer");
            process::exit(EXIT_PANIC);
        }
    }
}

fn run() -> i32 {
    // Handle --version before clap so build details are included
    if env::args().nth(1).as_deref() == Some("--version") {
        println!("tft-installer {}", tft_installer::version::full_version());
        return EXIT_SUCCESS;
    }

    let cli = Cli::parse();

    let verbose = match &cli.command {
        Command::Install(args) => args.verbose,
        Command::Uninstall { verbose } => *verbose,
    };
    init_logging(cli.log_level.as_deref(), verbose);

    let outcome = match cli.command {
        Command::Install(args) => run_install(args),
        Command::Uninstall { verbose } => {
            tft_installer::uninstall(&UninstallOptions { verbose }).map_err(Into::into)
        }
    };

    match outcome {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            EXIT_ERROR
        }
    }
}

fn init_logging(cli_level: Option<&str>, verbose: bool) {
    if let Some(level) = cli_level {
        JsonLogger::init_with_level(level, "CLI --log-level");
    } else if verbose {
        JsonLogger::init_with_level("debug", "CLI --verbose");
    } else {
        JsonLogger::init();
    }
}

fn run_install(args: InstallArgs) -> Result<()> {
    // Before any prompt
    tft_installer::check_privileges()?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    let display = match args.display {
        Some(display) => display,
        None => {
            writeln!(output, "Select your display:")?;
            prompt::choose(&mut input, &mut output, &profiles::identifiers(), "Display")
                .context("No display selected")?
                .to_string()
        }
    };

    let rotation = match args.rotation {
        Some(rotation) => rotation,
        None => {
            let choices: Vec<u32> = Rotation::ALL.iter().map(|r| r.degrees()).collect();
            writeln!(output, "Select rotation:")?;
            prompt::choose(&mut input, &mut output, &choices, "Rotation")
                .context("No rotation selected")?
        }
    };

    let installer = tft_installer::install(&InstallOptions {
        display,
        rotation,
        verbose: args.verbose,
        overlay_dir: args.overlay_dir,
    })?;

    let flag = if args.reboot {
        Some(true)
    } else if args.no_reboot {
        Some(false)
    } else {
        None
    };
    let reboot = prompt::reboot_decision(flag, is_env_true(ASSUME_YES_ENV), &mut input, &mut output)
        .context("Could not read reboot answer")?;

    if reboot {
        installer.reboot()?;
    }
    Ok(())
}
