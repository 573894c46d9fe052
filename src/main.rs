//! PWDB tools - Crosscheck and plot the Pulse Wave Database
//!
//! This is the binary entry point. All logic lives in the library.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use pwdb_app::{load_settings, PlotOptions};
use pwdb_core::prelude::*;
use pwdb_core::{
    parse_signal_list, parse_signal_prefix, parse_signal_types, parse_site_list, parse_subjects,
    SignalList, SignalTypeList, SiteList, SubjectSet,
};

/// PWDB tools - Crosscheck models and plot waveforms of the Pulse Wave Database
#[derive(Parser, Debug)]
#[command(name = "pwdb")]
#[command(about = "Crosscheck and plot the Pulse Wave Database", long_about = None)]
struct Cli {
    /// Show more debug (repeat for more)
    #[arg(short = 'v', action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that every topology model matches its geometry
    Crosscheck {
        /// PWDB root dir
        #[arg(value_name = "PWDB_DIR")]
        pwdb_dir: PathBuf,

        /// Rename dirs to match models
        #[arg(long)]
        rename: bool,
    },

    /// Plot signals across subjects and topologies
    Plot(PlotArgs),
}

#[derive(Args, Debug)]
struct PlotArgs {
    /// PWDB root dir(s)
    #[arg(value_name = "PWDB_DIR", required = true)]
    pwdb_dirs: Vec<PathBuf>,

    /// Signal names, e.g. "Radial_U,Brachial_U"
    #[arg(long, value_parser = parse_signal_list)]
    signals: Option<SignalList>,

    /// Site names, e.g. "Left Radial Artery,Digital Artery"
    #[arg(long, value_parser = parse_site_list)]
    sites: Option<SiteList>,

    /// Signal types, e.g. "P,U,PPG"
    #[arg(long, value_parser = parse_signal_types)]
    types: Option<SignalTypeList>,

    /// Subject numbers and ranges, e.g. "1,3-5"
    #[arg(long, value_parser = parse_subjects)]
    subjects: Option<SubjectSet>,

    /// Plot every site on the path from the aortic root to PREFIX
    #[arg(long, value_name = "PREFIX", value_parser = parse_signal_prefix, requires = "model")]
    path: Option<String>,

    /// Model table used to trace --path
    #[arg(long, value_name = "FILE")]
    model: Option<PathBuf>,

    /// Print the selected path and stop
    #[arg(long)]
    query: bool,

    /// Export every figure as text into DIR
    #[arg(long, value_name = "DIR")]
    dir: Option<PathBuf>,

    /// Do not show the figures
    #[arg(long)]
    batch: bool,
}

impl PlotArgs {
    fn into_options(self, verbose: u8) -> PlotOptions {
        PlotOptions {
            pwdb_dirs: self.pwdb_dirs,
            verbose,
            signals: self.signals,
            sites: self.sites,
            types: self.types,
            subjects: self.subjects,
            path: self.path,
            model: self.model,
            query: self.query,
            dir: self.dir,
            batch: self.batch,
        }
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    pwdb_core::logging::init(cli.verbose)?;
    pwdb_tui::install_panic_hook();

    let mut stdout = std::io::stdout().lock();
    let result = match cli.command {
        Command::Crosscheck { pwdb_dir, rename } => {
            pwdb_tools::crosscheck::run(&pwdb_dir, rename, &mut stdout).map(|_| ())
        }
        Command::Plot(args) => {
            let base_path = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            let settings = load_settings(&base_path);
            let options = args.into_options(cli.verbose);
            pwdb_tools::plot::run(&options, &settings, &mut stdout)
        }
    };

    // Bad input and missing data get a plain message instead of a report
    if let Err(e) = &result {
        if e.is_usage() || e.is_fatal() {
            error!("{}", e);
            eprintln!("{e}");
            std::process::exit(if e.is_usage() { 2 } else { 1 });
        }
    }
    result?;

    Ok(())
}
