use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};

#[derive(Subcommand)]
pub enum SubCommands {
    #[command(about = "Build the secondary structure annotation row of every structure in a file")]
    Annotate(AnnotateArgs),
    #[command(about = "List the base pairs and helices of every structure in a file")]
    Pairs(PairsArgs),
}

#[derive(Parser)]
#[command(name = "secstr")]
#[command(about = "Derive alignment annotation rows from folded RNA secondary structures")]
pub struct Cli {
    #[command(subcommand)]
    pub command: SubCommands,

    /// Log more (repeat for more detail); RUST_LOG takes precedence
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// The number of threads that secstr will use
    #[arg(
        short = 't',
        long = "threads",
        default_value_t = 8usize,
        value_name = "n"
    )]
    pub num_threads: usize,

    /// Where to place output (stdout if not set)
    #[arg(short = 'o', long = "output", value_name = "path")]
    pub output_path: Option<PathBuf>,

    /// Allow secstr to overwrite files
    #[arg(short = 'q', long = "allow-overwrite", default_value_t = false)]
    pub allow_overwrite: bool,
}

#[derive(ValueEnum, strum::Display, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Args, Debug, Clone)]
pub struct AnnotateArgs {
    /// Folded structures in Vienna (RNAfold) format
    #[arg(value_name = "STRUCTURES.fold")]
    pub structures_path: PathBuf,

    /// The output format
    #[arg(short = 'f', long = "format", value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Arguments that are common across all secstr subcommands
    #[command(flatten)]
    pub common_args: CommonArgs,
}

#[derive(Args, Debug, Clone)]
pub struct PairsArgs {
    /// Folded structures in Vienna (RNAfold) format
    #[arg(value_name = "STRUCTURES.fold")]
    pub structures_path: PathBuf,

    /// Arguments that are common across all secstr subcommands
    #[command(flatten)]
    pub common_args: CommonArgs,
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{check, let_assert};

    #[test]
    fn test_every_subcommand_takes_threads() -> anyhow::Result<()> {
        let cli = Cli::try_parse_from(["secstr", "pairs", "in.fold", "-t", "2"])?;
        let_assert!(SubCommands::Pairs(args) = cli.command);
        check!(args.common_args.num_threads == 2);

        let cli = Cli::try_parse_from(["secstr", "annotate", "in.fold", "--threads", "3", "-v"])?;
        check!(cli.verbose == 1);
        let_assert!(SubCommands::Annotate(args) = cli.command);
        check!(args.common_args.num_threads == 3);
        check!(args.format == OutputFormat::Table);
        Ok(())
    }

    #[test]
    fn test_threads_default() -> anyhow::Result<()> {
        let cli = Cli::try_parse_from(["secstr", "pairs", "in.fold"])?;
        let_assert!(SubCommands::Pairs(args) = cli.command);
        check!(args.common_args.num_threads == 8);
        check!(args.common_args.output_path == None);
        Ok(())
    }
}
