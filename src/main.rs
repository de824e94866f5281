use clap::Parser;

use loopsmith::cli::{output, solve, strategies, Cli, Commands, StrategiesCommand};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Solve(args) => solve::run(args).await,
        Commands::Strategies(StrategiesCommand::List) => strategies::list(),
    };

    if let Err(e) = result {
        output::error(&format!("{e}"));
        std::process::exit(1);
    }
}
