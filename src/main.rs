//! Command-line interface for ffactory
//!
//! # Usage Examples
//!
//! ## Generate
//! ```bash
//! # Print the table described by a schema file
//! ffactory generate --schema people.yaml
//!
//! # Override row count and seed, export to people.json
//! ffactory generate --schema people.yaml --rows 1000 --seed 7 \
//!   --format json --output people
//! ```
//!
//! ## Sample
//! ```bash
//! # 10 random rows out of 100, without replacement
//! ffactory sample --schema people.yaml --rows 100 random -n 10
//!
//! # Every 3rd row, 20 rows in total
//! ffactory sample --schema people.yaml --rows 100 systematic --interval 3 -n 20
//!
//! # Two whole clusters by the `boolean` column
//! ffactory sample --schema people.yaml cluster --column boolean -n 2
//! ```
//!
//! ## Info
//! ```bash
//! ffactory info --schema people.yaml
//! ```
//!
//! Logging is controlled with `RUST_LOG` (e.g. `RUST_LOG=info`).

use clap::Parser;
use ffactory::cli::{run, Cli};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(output) => println!("{output}"),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    }
}
