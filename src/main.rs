//! TourWithMe - manage and serve the travel agency site content.

use anyhow::Result;
use clap::Parser;
use tourwithme::{
    cli::{Cli, Commands},
    commands,
    config::AppConfig,
    context::SiteProvider,
    debug, logger, serve,
    store::{FileStorage, SiteStore},
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::set_verbose(cli.verbose);

    let config = AppConfig::load(&cli)?;
    let storage_dir = config.storage_dir();
    debug!("storage"; "using {}", storage_dir.display());

    let provider = SiteProvider::new(SiteStore::load(FileStorage::new(storage_dir)));
    let cx = provider.context();

    match &cli.command {
        Commands::Serve { .. } => serve::serve_site(&config, cx),
        command => commands::run(command, cx),
    }
}
