use clap::Parser;
use tracing_subscriber::EnvFilter;

mod backend;
mod cli;
mod commands;
mod output;

use backend::StoreHandle;
use cli::{Cli, Commands};
use output::OutputFormat;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Logs go to stderr so command output stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("confstore=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let format = OutputFormat::from_flag(cli.json);
    let store = StoreHandle::open(&cli)?;

    match &cli.command {
        Commands::Get(args) => commands::get::run(args, &store, format)?,
        Commands::Put(args) => commands::put::run(args, &store, format)?,
        Commands::Remove(args) => commands::remove::run(args, &store, format)?,
        Commands::Exists(args) => commands::exists::run(args, &store, format)?,
        Commands::Lookup(args) => commands::lookup::run(args, &store, format)?,
        Commands::Index => commands::index::run(&store, format)?,
    }

    if cli.command.mutates() {
        store.save()?;
    }
    Ok(())
}
