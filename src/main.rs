use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use cql_startup::config::DEFAULT_PROFILE;
use cql_startup::{DefaultDriverContext, DriverConfig, Startup, StartupError, StaticIdentity};
use itertools::Itertools;
use tracing::{info, Level};

/// Print the options a driver would send in its STARTUP message.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// JSON driver configuration file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Execution profile to resolve compression from
    #[arg(long, default_value = DEFAULT_PROFILE)]
    profile: String,
    /// Compression algorithm; overrides the selected profile
    #[arg(long)]
    compression: Option<String>,
    /// Extra startup option as KEY=VALUE (repeatable). Reserved keys are ignored.
    #[arg(long = "option", value_name = "KEY=VALUE")]
    options: Vec<String>,
    /// Report this driver name instead of the packaged one
    #[arg(long, requires = "driver_version")]
    driver_name: Option<String>,
    /// Report this driver version instead of the packaged one
    #[arg(long, requires = "driver_name")]
    driver_version: Option<String>,
    /// Print the encoded message body as hex instead of JSON
    #[arg(long)]
    hex: bool,
    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(args) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    // Load config.
    let mut config = match &args.config {
        Some(path) => DriverConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => DriverConfig::default(),
    };
    if let Some(alg) = args.compression {
        match config.profiles.get_mut(&args.profile) {
            Some(profile) => profile.protocol.compression = Some(alg),
            None => config.default.protocol.compression = Some(alg),
        }
    }

    let extra = parse_options(&args.options)?;
    let extra = (!extra.is_empty()).then_some(extra);
    let mut context = DefaultDriverContext::for_profile(&config, &args.profile, extra)?;
    if let (Some(name), Some(version)) = (args.driver_name, args.driver_version) {
        context = context.with_identity(Arc::new(StaticIdentity::new(name, version)));
    }

    let startup = Startup::new(context.startup_options()?);
    info!(options = startup.options.len(), "assembled startup message");

    if args.hex {
        let body = startup.encode_body()?;
        println!("{:02x}", body.iter().format(""));
    } else {
        let sorted: serde_json::Map<String, serde_json::Value> = startup
            .options
            .sorted()
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.map_or(serde_json::Value::Null, |s| s.into())))
            .collect();
        println!("{}", serde_json::to_string_pretty(&sorted)?);
    }
    Ok(())
}

fn parse_options(raw: &[String]) -> Result<HashMap<String, Option<String>>, StartupError> {
    raw.iter()
        .map(|arg| {
            arg.split_once('=')
                .filter(|(k, _)| !k.is_empty())
                .map(|(k, v)| (k.to_string(), Some(v.to_string())))
                .ok_or_else(|| StartupError::BadOptionArg(arg.clone()))
        })
        .collect()
}
