use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use store::Store;

mod catalog;
mod cli;
mod commands;
mod generator;
mod models;
mod progress;
mod store;
mod types;
mod utils;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let store = Store::open()?;

    match cli.cmd {
        Commands::Plan(cmd) => commands::plan::handle(cmd, &store)?,
        Commands::Session(cmd) => commands::session::handle(cmd, &store)?,
        Commands::Catalog(cmd) => commands::catalog::handle(cmd, &store)?,
        Commands::Profile(cmd) => commands::profile::handle(cmd)?,
        Commands::Config(cmd) => commands::config::handle(cmd)?,
        Commands::Calendar { year, month } => commands::calendar::handle(&store, year, month)?,
        Commands::Status { graph, weeks } => commands::status::handle(&store, graph, weeks)?,
    }

    Ok(())
}
