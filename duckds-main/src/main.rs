use std::process;

use clap::Parser;
use duckds_logging::{error, info};
use duckds_main::{args::Command, run};

fn main() {
    if let Err(err) = duckds_logging::init_logging() {
        eprintln!("Failed to initialise logging: {:?}", err);
    }

    let command = Command::parse();
    info!("Running {:?}", command);

    match run(&command) {
        Ok(out) => println!("{}", out),
        Err(err) => {
            error!("{:?}", err);
            process::exit(1);
        }
    }
}
