//! Main application entry point.

use clap::Parser;

fn main() {
    env_logger::init();
    log::info!("Starting InkPad");

    let config = inkpad_app::Config::parse();
    if let Err(e) = inkpad_app::App::run(config) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
