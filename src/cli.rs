//! Command-line arguments and command handlers.
//!
//! Handlers return the text to print so they can be driven from tests.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use factory_core::{SchemaFile, Table};
use factory_generator::DataFactory;
use factory_present::{export_table, render_table, render_table_wrapped, ExportFormat};
use factory_sampler::TableSampler;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ffactory")]
#[command(about = "Generate and sample reproducible synthetic tables")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a table from a schema file
    Generate {
        #[command(flatten)]
        schema: SchemaArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Generate a table and draw a sample from it
    Sample {
        #[command(flatten)]
        schema: SchemaArgs,

        /// Seed of the sampler (same seed = same sample)
        #[arg(long, default_value = "42", env = "FFACTORY_SAMPLE_SEED")]
        sample_seed: u64,

        #[command(flatten)]
        output: OutputArgs,

        #[command(subcommand)]
        method: SampleMethod,
    },

    /// Print a summary of the schema
    Info {
        #[command(flatten)]
        schema: SchemaArgs,
    },
}

/// Schema file and the settings that override it.
#[derive(Args, Clone, Debug)]
pub struct SchemaArgs {
    /// Path to schema YAML file
    #[arg(long, short = 's', env = "FFACTORY_SCHEMA")]
    pub schema: PathBuf,

    /// Number of rows to generate (defaults to the schema's `rows`)
    #[arg(long, env = "FFACTORY_ROWS")]
    pub rows: Option<usize>,

    /// Base seed (defaults to the schema's `seed`)
    #[arg(long, env = "FFACTORY_SEED")]
    pub seed: Option<u64>,
}

/// Export target; the table is printed when omitted.
#[derive(Args, Clone, Debug, Default)]
pub struct OutputArgs {
    /// Export format (csv, json or html)
    #[arg(long, requires = "output")]
    pub format: Option<ExportFormat>,

    /// Export path without extension
    #[arg(long, short = 'o', requires = "format")]
    pub output: Option<String>,

    /// Wrap printed cells so lines fit this many columns
    #[arg(long, conflicts_with = "output")]
    pub width: Option<u16>,
}

#[derive(Subcommand, Clone, Debug)]
pub enum SampleMethod {
    /// Simple random sampling
    Random {
        /// Number of rows to draw
        #[arg(short = 'n', long = "size")]
        n: usize,

        /// Allow drawing the same row more than once
        #[arg(long)]
        with_replacement: bool,
    },

    /// Proportional sampling over the values of a column
    Stratified {
        /// Number of rows to draw
        #[arg(short = 'n', long = "size")]
        n: usize,

        /// Column defining the strata
        #[arg(long)]
        column: String,
    },

    /// Every `interval`-th row
    Systematic {
        /// Step between selected rows
        #[arg(long)]
        interval: usize,

        /// Number of rows to draw
        #[arg(short = 'n', long = "size")]
        n: usize,
    },

    /// Whole groups of rows sharing a column value
    Cluster {
        /// Column defining the clusters
        #[arg(long)]
        column: String,

        /// Number of clusters to draw
        #[arg(short = 'n', long = "size")]
        n: usize,
    },
}

/// Load the schema file and build a factory with the CLI overrides.
///
/// Returns the factory and the number of rows to generate.
pub fn load_factory(args: &SchemaArgs) -> anyhow::Result<(DataFactory, usize)> {
    let mut file = SchemaFile::from_file(&args.schema)
        .with_context(|| format!("Failed to load schema from {:?}", args.schema))?;
    if let Some(seed) = args.seed {
        file.seed = seed;
    }
    let rows = args.rows.unwrap_or(file.rows);

    let factory = DataFactory::from_schema_file(&file)
        .with_context(|| format!("Invalid columns in {:?}", args.schema))?;
    tracing::debug!(
        "Loaded schema {:?}: locale {}, seed {}, {} columns",
        args.schema,
        file.locale,
        file.seed,
        factory.schema().len()
    );
    Ok((factory, rows))
}

/// Print or export a table according to `output`.
pub fn emit(table: &Table, output: &OutputArgs) -> anyhow::Result<String> {
    match (&output.format, &output.output) {
        (Some(format), Some(path)) => {
            let written = export_table(table, *format, path)
                .with_context(|| format!("Failed to export {format} to '{path}'"))?;
            Ok(format!(
                "Exported {} rows to {}",
                table.len(),
                written.display()
            ))
        }
        _ => Ok(match output.width {
            Some(width) => render_table_wrapped(table.columns(), table.rows(), width),
            None => render_table(table.columns(), table.rows()),
        }),
    }
}

/// Run `ffactory generate`.
pub fn run_generate(schema: &SchemaArgs, output: &OutputArgs) -> anyhow::Result<String> {
    let (mut factory, rows) = load_factory(schema)?;
    let table = factory.generate_table(rows, true)?;
    emit(table, output)
}

/// Run `ffactory sample`.
pub fn run_sample(
    schema: &SchemaArgs,
    sample_seed: u64,
    output: &OutputArgs,
    method: &SampleMethod,
) -> anyhow::Result<String> {
    let (mut factory, rows) = load_factory(schema)?;
    let table = factory.generate_table(rows, true)?;
    let mut sampler = TableSampler::new(table, sample_seed);

    let sample = match method {
        SampleMethod::Random {
            n,
            with_replacement,
        } => sampler.random_sampling(*n, *with_replacement),
        SampleMethod::Stratified { n, column } => sampler.stratified_sampling(*n, column),
        SampleMethod::Systematic { interval, n } => sampler.systematic_sampling(*interval, *n),
        SampleMethod::Cluster { column, n } => sampler.cluster_sampling(column, *n),
    }
    .with_context(|| format!("Sampling {rows} generated rows failed"))?;

    emit(&sample, output)
}

/// Run `ffactory info`.
pub fn run_info(schema: &SchemaArgs) -> anyhow::Result<String> {
    let (factory, rows) = load_factory(schema)?;
    Ok(format!("{}\nRows to generate: {}", factory.info(), rows))
}

/// Dispatch a parsed command line.
pub fn run(cli: Cli) -> anyhow::Result<String> {
    match cli.command {
        Commands::Generate { schema, output } => run_generate(&schema, &output),
        Commands::Sample {
            schema,
            sample_seed,
            output,
            method,
        } => run_sample(&schema, sample_seed, &output, &method),
        Commands::Info { schema } => run_info(&schema),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sample_command() {
        let cli = Cli::try_parse_from([
            "ffactory",
            "sample",
            "--schema",
            "people.yaml",
            "--rows",
            "100",
            "stratified",
            "-n",
            "10",
            "--column",
            "boolean",
        ])
        .unwrap();

        let Commands::Sample {
            schema,
            sample_seed,
            method,
            ..
        } = cli.command
        else {
            panic!("Expected sample command");
        };
        assert_eq!(schema.rows, Some(100));
        assert_eq!(sample_seed, 42);
        assert!(matches!(
            method,
            SampleMethod::Stratified { n: 10, ref column } if column == "boolean"
        ));
    }

    #[test]
    fn test_parse_width() {
        let cli = Cli::try_parse_from([
            "ffactory", "generate", "--schema", "people.yaml", "--width", "80",
        ])
        .unwrap();
        let Commands::Generate { output, .. } = cli.command else {
            panic!("Expected generate command");
        };
        assert_eq!(output.width, Some(80));

        let err = Cli::try_parse_from([
            "ffactory", "generate", "--schema", "people.yaml", "--width", "80", "--format",
            "csv", "--output", "out",
        ]);
        assert!(err.is_err());
    }

    #[test]
    fn test_format_requires_output() {
        let err = Cli::try_parse_from([
            "ffactory",
            "generate",
            "--schema",
            "people.yaml",
            "--format",
            "csv",
        ]);
        assert!(err.is_err());

        let err = Cli::try_parse_from([
            "ffactory",
            "generate",
            "--schema",
            "people.yaml",
            "--format",
            "xlsx",
            "--output",
            "out",
        ]);
        assert!(err.is_err());
    }
}
