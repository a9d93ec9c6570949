//! Runs a detection record through the capability enhancer.
//!
//! Reads one `detection_record_v1` JSON document from a file or stdin,
//! validates it, and prints the resulting capability profile as compact JSON.
//! With `--describe` the output becomes an object holding both the profile
//! and the resolved device properties.

use anyhow::{Context, Result, bail};
use devicecaps::{DetectionRecord, Enhancer, EnhancerConfig, RecordSchema};
use serde_json::{Value, json};
use std::env;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "DEVICECAPS_LOG";

fn main() {
    init_logging();
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run() -> Result<()> {
    let args = CliArgs::parse()?;
    let input = args.source.read()?;

    let record = if args.skip_validation {
        let value: Value =
            serde_json::from_str(input.trim()).context("Unable to parse detection record JSON")?;
        DetectionRecord::from_value_unchecked(value)?
    } else {
        let schema = match &args.schema {
            Some(path) => RecordSchema::load(path)?,
            None => RecordSchema::embedded()?,
        };
        DetectionRecord::parse(&input, &schema)?
    };

    let interned = record.intern()?;

    let config = EnhancerConfig::from_env()?;
    let enhancer = Enhancer::with_config(interned.strings, config)?;
    let profile = enhancer.transform(&interned.result, &interned.existing);
    debug!(capabilities = profile.len(), "profile built");

    let output = if args.describe {
        // The match happened upstream; the record carries no timing for it.
        let properties = enhancer.describe(&interned.result, None);
        json!({
            "capabilities": profile,
            "properties": properties,
        })
    } else {
        serde_json::to_value(&profile)?
    };

    println!("{}", serde_json::to_string(&output)?);
    Ok(())
}

struct CliArgs {
    source: InputSource,
    schema: Option<PathBuf>,
    describe: bool,
    skip_validation: bool,
}

enum InputSource {
    File(PathBuf),
    Stdin,
}

impl InputSource {
    fn read(&self) -> Result<String> {
        match self {
            InputSource::File(path) => {
                if !path.is_file() {
                    bail!("input file not found: {}", path.display());
                }
                fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
            }
            InputSource::Stdin => {
                let mut buf = String::new();
                io::stdin()
                    .read_to_string(&mut buf)
                    .context("reading stdin")?;
                Ok(buf)
            }
        }
    }
}

impl CliArgs {
    fn parse() -> Result<Self> {
        Self::parse_from(env::args_os().skip(1))
    }

    fn parse_from(mut args: impl Iterator<Item = std::ffi::OsString>) -> Result<Self> {
        let mut source: Option<InputSource> = None;
        let mut schema: Option<PathBuf> = None;
        let mut describe = false;
        let mut skip_validation = false;

        while let Some(arg_os) = args.next() {
            let arg = arg_os
                .into_string()
                .map_err(|_| anyhow::anyhow!("argument is not valid UTF-8"))?;
            match arg.as_str() {
                "--file" => {
                    let path = next_value(&mut args, "--file")?;
                    if source.is_some() {
                        bail!("--file/--stdin may only be provided once");
                    }
                    source = Some(InputSource::File(PathBuf::from(path)));
                }
                "--stdin" => {
                    if source.is_some() {
                        bail!("--file/--stdin may only be provided once");
                    }
                    source = Some(InputSource::Stdin);
                }
                "--schema" => {
                    schema = Some(PathBuf::from(next_value(&mut args, "--schema")?));
                }
                "--describe" => describe = true,
                "--skip-validation" => skip_validation = true,
                "--help" | "-h" => {
                    print!("{}", usage());
                    std::process::exit(0);
                }
                other => bail!("unknown flag: {other}"),
            }
        }

        if skip_validation && schema.is_some() {
            bail!("--schema cannot be combined with --skip-validation");
        }

        Ok(CliArgs {
            source: source.unwrap_or(InputSource::Stdin),
            schema,
            describe,
            skip_validation,
        })
    }
}

fn next_value(args: &mut impl Iterator<Item = std::ffi::OsString>, flag: &str) -> Result<String> {
    args.next()
        .map(|os| {
            os.into_string()
                .map_err(|_| anyhow::anyhow!("value for {flag} is not valid UTF-8"))
        })
        .transpose()?
        .ok_or_else(|| anyhow::anyhow!("missing value for {flag}"))
}

fn usage() -> &'static str {
    "Usage: enhance-record [--file PATH|--stdin] [--schema PATH] [--describe] [--skip-validation]\n\
Reads a detection_record_v1 JSON document, runs it through the capability enhancer, and prints the profile as compact JSON.\n\
Environment: DEVICECAPS_LOG (tracing filter, default warn), DEVICECAPS_OVERRIDE_BROWSER, DEVICECAPS_RENDERING_TYPE.\n"
}
