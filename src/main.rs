//! This is a small utility for stamping a GPS position, camera details and
//! photo attributes into the EXIF metadata of a folder of JPEG files.
//!
//! Copyright 2023-5 Seth Pendergrass. See LICENSE.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::prim::Params;

mod commands;
mod error;
mod io;
mod prim;
mod setup;
mod stamp;
#[cfg(test)]
mod testing;

#[derive(Parser)]
struct Args {
    /// JSON parameter file, layered over the saved defaults.
    #[arg(short = 'p', long = "params", global = true)]
    params_file: Option<PathBuf>,

    /// Verbosity level. Max: 2.
    #[arg(short, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write EXIF metadata into every JPEG file directly inside a folder.
    Stamp {
        dir: PathBuf,

        #[command(flatten)]
        params: Params,

        /// Build and check the metadata, but do not write any file.
        #[arg(long)]
        dry_run: bool,

        /// Save the resulting parameters as defaults for later runs.
        #[arg(long)]
        save: bool,
    },
    /// Print the metadata fields managed by `stamp` for a JPEG file.
    Show { file: PathBuf },
}

fn main() -> ExitCode {
    let args = Args::parse();
    setup::configure_logging(args.verbose);

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> error::Result<ExitCode> {
    match args.command {
        Commands::Stamp {
            dir,
            params,
            dry_run,
            save,
        } => {
            let params = setup::load_params(args.params_file.as_deref())?.overlay(params);
            let settings = params.validate()?;
            if save {
                setup::save_params(&params)?;
            }

            let summary = commands::stamp(&dir, &settings, !dry_run)?;
            if summary.is_success() {
                Ok(ExitCode::SUCCESS)
            } else {
                log::error!("{} file(s) could not be stamped.", summary.failed.len());
                Ok(ExitCode::from(2))
            }
        }
        Commands::Show { file } => {
            commands::show(&file)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
