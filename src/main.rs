use clap::Parser;
use relnotes::errors::ErrorHandler;
use relnotes::structs::cli::Cli;
use relnotes::workers::command_runner::CommandRunner;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut runner = CommandRunner::new();

    if let Err(error) = runner.run_command(cli.command).await {
        ErrorHandler::handle_error(&error);
        std::process::exit(1);
    }
}
