//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use env_logger::{Builder, Env};

fn main() {
    Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .format_module_path(false)
        .init();

    if let Err(err) = fuelroute_cli::run() {
        eprintln!("fuelroute: {err}");
        std::process::exit(1);
    }
}
