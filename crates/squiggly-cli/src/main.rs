mod cli;
mod commands;
mod error;


use clap::Parser;
use tracing::Level;

use cli::{Cli, Command};
use commands::check::CheckArgs;
use commands::cst::CstArgs;
use commands::dump::DumpArgs;
use commands::filter_loader::load_filter;
use error::CliError;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli.command) {
        match err {
            CliError::Diagnostics(rendered) => eprint!("{rendered}"),
            other => eprintln!("error: {other}"),
        }
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => return,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Command) -> Result<(), CliError> {
    match command {
        Command::Dump {
            filter,
            mode,
            depths,
            json,
            color,
        } => {
            let source = load_filter(&filter)?;
            let args = DumpArgs {
                property: mode.property,
                depths,
                json,
                color: color.should_colorize(),
            };
            print!("{}", commands::dump::run(&source, &args)?);
        }
        Command::Cst {
            filter,
            mode,
            trivia,
            spans,
            color,
        } => {
            let source = load_filter(&filter)?;
            let args = CstArgs {
                property: mode.property,
                trivia,
                spans,
                color: color.should_colorize(),
            };
            let output = commands::cst::run(&source, &args)?;
            print!("{}", output.tree);
            if let Some(diagnostics) = output.diagnostics {
                return Err(CliError::Diagnostics(diagnostics));
            }
        }
        Command::Check {
            filter,
            mode,
            color,
        } => {
            let source = load_filter(&filter)?;
            let args = CheckArgs {
                property: mode.property,
                color: color.should_colorize(),
                origin: filter.origin(),
            };
            commands::check::run(&source, &args)?;
        }
    }
    Ok(())
}
