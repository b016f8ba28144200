//! wordcrawl - search a directory tree for a pattern and report per-file
//! match statistics (json/jsonl/md)

use anyhow::Result;
use clap::Parser;

use wordcrawl::cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::run(cli)
}
