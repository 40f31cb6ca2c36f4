pub mod cli;
pub mod data;
pub mod engine;
pub mod explore;
pub mod io_utils;
pub mod loader;
pub mod options;
pub mod preview;
pub mod table;

use std::{env, sync::OnceLock};

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

use crate::cli::{Cli, Commands};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("storelens", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Explore(args) => explore::execute(&args),
        Commands::Options(args) => options::execute(&args),
        Commands::Preview(args) => preview::execute(&args),
    }
}
