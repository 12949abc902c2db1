mod cli;
mod commands;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("tagdown=info".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match &cli.command {
        Commands::Show(args) => commands::read::show(args, cli.format),
        Commands::Get(args) => commands::read::get(args, cli.format),
        Commands::Set(args) => commands::edit::set(args, cli.format),
        Commands::Delete(args) => commands::edit::delete(args, cli.format),
        Commands::Truncate(args) => commands::read::truncate(args, cli.format),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
