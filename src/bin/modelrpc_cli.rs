//! modelrpc CLI - inspect API models and call their operations
//!
//! Usage:
//!   modelrpc-cli describe [--model <path>]                  Show operation help
//!   modelrpc-cli validate [--model <path>]                  Validate a model file
//!   modelrpc-cli call [--model <path>] <op> [ARGS...]       Invoke an operation

use anyhow::{anyhow, bail, Context};
use modelrpc::model::ModelLoader;
use modelrpc::{Args, ClientBuilder};
use serde_json::Value;
use std::path::PathBuf;

#[tokio::main]
async fn main() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    let result = match args[1].as_str() {
        "describe" => cmd_describe(&args[2..]).await,
        "validate" => cmd_validate(&args[2..]).await,
        "call" => cmd_call(&args[2..]).await,
        "version" | "--version" | "-V" => {
            cmd_version();
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn print_usage() {
    println!(
        r#"modelrpc-cli - model-driven RPC client

USAGE:
    modelrpc-cli <COMMAND> [OPTIONS]

COMMANDS:
    describe [--model <path>]               Show every operation's signature and docs
    validate [--model <path>]               Validate an API model file
    call [--model <path>] [--endpoint <url>] <operation> [ARGS...]
                                            Invoke an operation; ARGS are either all
                                            key=value (keyword) or all bare (positional),
                                            each parsed as JSON with a string fallback
    version                                 Show version information
    help                                    Show this help message

ENVIRONMENT:
    MODELRPC_MODEL_PATH                     Default API model file
    MODELRPC_ENDPOINT_URL                   Override the model's endpoint_url
    MODELRPC_HTTP_TIMEOUT_SECS              HTTP timeout (default 30)
    RUST_LOG                                Log filter (default warn)"#
    );
}

fn cmd_version() {
    println!("modelrpc-cli {}", env!("CARGO_PKG_VERSION"));
}

/// Options shared by every command, plus whatever is left over.
struct CommonArgs {
    model: PathBuf,
    endpoint: Option<String>,
    rest: Vec<String>,
}

fn parse_common(args: &[String]) -> anyhow::Result<CommonArgs> {
    let mut model = None;
    let mut endpoint = None;
    let mut rest = Vec::new();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--model" => {
                model = Some(PathBuf::from(
                    iter.next().ok_or_else(|| anyhow!("--model requires a path"))?,
                ));
            }
            "--endpoint" => {
                endpoint = Some(
                    iter.next()
                        .ok_or_else(|| anyhow!("--endpoint requires a URL"))?
                        .clone(),
                );
            }
            _ => rest.push(arg.clone()),
        }
    }

    let model = match model {
        Some(path) => path,
        None => std::env::var("MODELRPC_MODEL_PATH")
            .map(PathBuf::from)
            .map_err(|_| anyhow!("no model given: use --model <path> or set MODELRPC_MODEL_PATH"))?,
    };

    Ok(CommonArgs {
        model,
        endpoint,
        rest,
    })
}

async fn cmd_describe(args: &[String]) -> anyhow::Result<()> {
    let common = parse_common(args)?;
    let client = ClientBuilder::new()
        .model_path(&common.model)
        .build()
        .await
        .with_context(|| format!("loading {}", common.model.display()))?;

    println!("Endpoint: {}", client.model().endpoint_url);
    println!();
    print!("{}", client.help());
    Ok(())
}

async fn cmd_validate(args: &[String]) -> anyhow::Result<()> {
    let common = parse_common(args)?;
    print!("  {}... ", common.model.display());

    match ModelLoader::new().load_from_file(&common.model).await {
        Ok(model) => {
            println!("OK");
            println!("    endpoint: {}", model.endpoint_url);
            println!("    operations: {}", model.operations.len());
            for op in model.operations.values() {
                let unsupported = op
                    .input
                    .unsupported_kinds()
                    .into_iter()
                    .chain(op.output.unsupported_kinds());
                for (path, kind) in unsupported {
                    println!("    WARN {}: unsupported schema kind '{}' at {}", op.name, kind, path);
                }
            }
            Ok(())
        }
        Err(e) => {
            println!("FAIL");
            bail!(e)
        }
    }
}

async fn cmd_call(args: &[String]) -> anyhow::Result<()> {
    let common = parse_common(args)?;
    let (operation, call_args) = common
        .rest
        .split_first()
        .ok_or_else(|| anyhow!("Usage: modelrpc-cli call [--model <path>] <operation> [ARGS...]"))?;

    let mut builder = ClientBuilder::new().model_path(&common.model);
    if let Some(endpoint) = common.endpoint {
        builder = builder.endpoint_override(endpoint);
    }
    let client = builder.build().await?;

    let result = client.call(operation, parse_call_args(call_args)).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

/// `key=value` becomes a keyword argument when `key` is an identifier,
/// anything else a positional one. Mixing both is left to the validator.
fn parse_call_args(raw: &[String]) -> Args {
    raw.iter().fold(Args::new(), |args, arg| match arg.split_once('=') {
        Some((key, value)) if is_identifier(key) => args.kwarg(key, parse_value(value)),
        _ => args.arg(parse_value(arg)),
    })
}

fn is_identifier(key: &str) -> bool {
    !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
