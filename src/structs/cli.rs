use clap::Parser;
use crate::enums::commands::Commands;

#[derive(Parser)]
#[clap(name = "relnotes")]
#[clap(about = "AI-powered dual-tone release notes generator", long_about = None)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}
