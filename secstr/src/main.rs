mod annotate;
mod args;
mod output_step;
mod pairs;
mod util;

use annotate::annotate;
use args::{Cli, SubCommands};
use pairs::pairs;
use util::{init_logger, set_threads};

use clap::Parser;

fn main() -> anyhow::Result<()> {
    color_backtrace::install();

    let cli = Cli::parse();
    init_logger(cli.verbose);

    match cli.command {
        SubCommands::Annotate(args) => {
            set_threads(args.common_args.num_threads)?;
            annotate(&args)?;
        }
        SubCommands::Pairs(args) => {
            set_threads(args.common_args.num_threads)?;
            pairs(&args)?;
        }
    }
    Ok(())
}
