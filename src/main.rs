mod app;
mod config;
mod error;
mod events;
mod logger;
mod places;
mod state;
mod store;
mod ui;
mod utils;

use crate::app::App;
use crate::config::Config;
use anyhow::Result;
use clap::{App as ClapApp, Arg};
use log::LevelFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let matches = ClapApp::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .arg(
            Arg::with_name("config")
                .short("c")
                .long("config")
                .value_name("DIR")
                .help("Sets a custom directory for the configuration file")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("debug")
                .short("d")
                .long("debug")
                .help("Enables debug level logging"),
        )
        .get_matches();

    let level = if matches.is_present("debug") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let logs = logger::init(level)?;

    let mut config = Config::new();
    config.load(matches.value_of("config"))?;
    App::start(config, logs).await?;
    Ok(())
}
