//! vdiv - Voltage Divider Resistor Selection
//!
//! Picks a sourceable resistor pair for a forward or inverse divider.
//!
//! # Usage
//!
//! ```bash
//! vdiv --v-in '10+-1%' --v-out '2.5+-5%' --current 50u --temp -20..50
//! vdiv --inverse --v-in 0.788/0.8/0.812 --v-out '3.3+-2%' --current 100u --json
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use voltage_divider::{
    catalog::Mounting,
    circuit::DividerCircuit,
    error::{DividerError, Result},
    toleranced::parse_value,
    DesignSettings, DividerConstraints, InMemoryCatalog, PartsCatalog, StandardCatalog,
    Toleranced,
};

/// Voltage divider resistor selection
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Solve an inverse divider (v-in is the reference at the middle node)
    #[arg(long)]
    inverse: bool,

    /// Input voltage, e.g. '10+-1%' or '0.788/0.8/0.812'
    #[arg(long, allow_hyphen_values = true)]
    v_in: Toleranced,

    /// Required output voltage range
    #[arg(long, allow_hyphen_values = true)]
    v_out: Toleranced,

    /// Divider current budget in amps, e.g. 50u
    #[arg(long, value_parser = parse_current)]
    current: f64,

    /// Precision tier in percent (repeatable, default: 20..0.1 ladder)
    #[arg(long = "precision", value_name = "PCT")]
    precisions: Vec<f64>,

    /// Coarse search window in percent
    #[arg(long)]
    search_range: Option<f64>,

    /// Minimum number of sources per resistor
    #[arg(long)]
    min_sources: Option<usize>,

    /// Maximum records per catalog query
    #[arg(long)]
    query_limit: Option<usize>,

    /// Operating temperature range in degC, e.g. -20..50
    #[arg(long, allow_hyphen_values = true)]
    temp: Option<Toleranced>,

    /// Mounting style (smd, through-hole)
    #[arg(long)]
    mounting: Option<Mounting>,

    /// Accepted case code (repeatable)
    #[arg(long = "case", value_name = "CASE")]
    cases: Vec<String>,

    /// Minimum stock level
    #[arg(long)]
    min_stock: Option<u32>,

    /// JSON parts catalog (default: synthesized E-series catalog)
    #[arg(long, value_name = "FILE")]
    catalog: Option<PathBuf>,

    /// Subcircuit name
    #[arg(long)]
    name: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,
}

fn parse_current(s: &str) -> Result<f64> {
    parse_value(s).ok_or_else(|| DividerError::value_parse(s, "expected a current such as 50u"))
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let constraints = build_constraints(&args)?;
    log::debug!("Constraints: {constraints}");

    let catalog: Box<dyn PartsCatalog> = match &args.catalog {
        Some(path) => Box::new(InMemoryCatalog::load(path)?),
        None => Box::new(StandardCatalog::default()),
    };

    let circuit = DividerCircuit::from_constraints(&constraints, &catalog, args.name.as_deref())?;

    if args.json {
        println!("{}", circuit.to_json()?);
    } else {
        println!("{}", circuit.summary());
        println!();
        print!("{}", circuit.to_netlist());
    }
    Ok(())
}

fn build_constraints(args: &Args) -> Result<DividerConstraints> {
    let mut settings = DesignSettings::default();
    if let Some(mounting) = args.mounting {
        settings.base_query.mounting = Some(mounting);
    }
    if !args.cases.is_empty() {
        settings.base_query.cases = args.cases.clone();
    }
    if let Some(min_stock) = args.min_stock {
        settings.base_query.min_stock = min_stock;
    }

    let mut builder = if args.inverse {
        DividerConstraints::inverse(args.v_in, args.v_out, args.current)
    } else {
        DividerConstraints::forward(args.v_in, args.v_out, args.current)
    }
    .settings(&settings);

    if !args.precisions.is_empty() {
        builder = builder.precision_series(args.precisions.clone());
    }
    if let Some(range) = args.search_range {
        builder = builder.search_range(range);
    }
    if let Some(n) = args.min_sources {
        builder = builder.min_sources(n);
    }
    if let Some(n) = args.query_limit {
        builder = builder.query_limit(n);
    }
    if let Some(temp) = args.temp {
        builder = builder.temp_range(temp);
    }
    builder.build()
}
