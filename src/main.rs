//! CLI entry point for the emoji mosaic converter

use clap::Parser;
use emoji_mosaic::io::cli::{Cli, FileProcessor};

fn main() -> emoji_mosaic::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let mut processor = FileProcessor::new(cli);
    processor.process().map(|_| ())
}
