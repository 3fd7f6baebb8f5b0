use clap::Parser;
use std::process;
use stockcsv_feed::cli::{Args, commands};

fn main() {
    let args = Args::parse();

    if let Err(error) = commands::setup_logging(&args) {
        eprintln!("Failed to initialize logging: {:#}", error);
        process::exit(1);
    }

    match commands::run(&args) {
        Ok(()) => process::exit(0),
        Err(error) => {
            // An unparseable date stops everything; report the offending text as is
            let row_error = error
                .downcast_ref::<stockcsv_feed::Error>()
                .and_then(|e| e.row_error())
                .filter(|e| e.is_unparseable_date());

            match row_error {
                Some(row_error) => eprintln!("{}", row_error),
                None => eprintln!("Error: {:#}", error),
            }
            process::exit(1);
        }
    }
}
