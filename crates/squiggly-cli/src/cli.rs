use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    pub fn should_colorize(self) -> bool {
        match self {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => std::io::IsTerminal::is_terminal(&std::io::stderr()),
        }
    }
}

#[derive(Parser)]
#[command(name = "squiggly", bin_name = "squiggly")]
#[command(about = "Inspect compiled Squiggly field filters")]
pub struct Cli {
    /// Log compiler events (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the compiled selection tree
    #[command(after_help = r#"EXAMPLES:
  squiggly dump 'a.b,c[0:3],-d'
  squiggly dump 'a{b,c}' --depths
  squiggly dump 'a|**.upper()' --json
  squiggly dump -f filter.txt --property"#)]
    Dump {
        #[command(flatten)]
        filter: FilterArgs,

        #[command(flatten)]
        mode: ModeArgs,

        /// Show node depths
        #[arg(long)]
        depths: bool,

        /// Print the tree as JSON
        #[arg(long)]
        json: bool,

        /// Colorize diagnostics (auto-detected by default)
        #[arg(long, default_value = "auto", value_name = "WHEN")]
        color: ColorChoice,
    },

    /// Show the concrete syntax tree
    #[command(after_help = r#"EXAMPLES:
  squiggly cst 'a.b{c}'
  squiggly cst 'a, b' --trivia --spans"#)]
    Cst {
        #[command(flatten)]
        filter: FilterArgs,

        #[command(flatten)]
        mode: ModeArgs,

        /// Include whitespace tokens
        #[arg(long)]
        trivia: bool,

        /// Show source spans
        #[arg(long)]
        spans: bool,

        /// Colorize diagnostics (auto-detected by default)
        #[arg(long, default_value = "auto", value_name = "WHEN")]
        color: ColorChoice,
    },

    /// Validate a filter
    #[command(after_help = r#"EXAMPLES:
  squiggly check 'a{b,c'
  squiggly check -f filter.txt --color never"#)]
    Check {
        #[command(flatten)]
        filter: FilterArgs,

        #[command(flatten)]
        mode: ModeArgs,

        /// Colorize diagnostics (auto-detected by default)
        #[arg(long, default_value = "auto", value_name = "WHEN")]
        color: ColorChoice,
    },
}

#[derive(Args)]
#[group(id = "filter_input", required = true, multiple = false)]
pub struct FilterArgs {
    /// Filter as inline text
    #[arg(value_name = "FILTER")]
    pub filter_text: Option<String>,

    /// Filter from file (use "-" for stdin)
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    pub filter_file: Option<PathBuf>,
}

impl FilterArgs {
    /// The file name diagnostics point at, when the filter came from one.
    pub fn origin(&self) -> Option<String> {
        self.filter_file
            .as_ref()
            .filter(|path| path.as_os_str() != "-")
            .map(|path| path.display().to_string())
    }
}

#[derive(Args)]
pub struct ModeArgs {
    /// Compile as a property filter (a single expression list, no `|`)
    #[arg(long)]
    pub property: bool,
}
