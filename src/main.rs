use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use chrono::Local;
use clap::builder::{OsStringValueParser, TypedValueParser};
use clap::{Parser, ValueEnum};

use ocreport_client::OcClient;
use ocreport_html::render_report;

mod config;
mod module;
mod output;
mod pipeline;

use config::Config;
use module::{ModuleArgs, ModuleResult};

/// ocreport - HTML report of deployment configs and pods per OpenShift namespace
#[derive(Parser, Debug)]
#[command(name = "ocreport")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// How arguments are received and the result is reported
    #[arg(long, value_enum, default_value_t = Mode::Cli)]
    mode: Mode,

    /// Comma-separated list of namespaces (default: all; cli mode only)
    #[arg(long, value_name = "LIST")]
    namespaces: Option<String>,

    /// Output HTML file (default: stdout; cli mode only)
    #[arg(
        long,
        value_name = "FILE",
        value_parser = OsStringValueParser::new().map(PathBuf::from)
    )]
    output: Option<PathBuf>,

    /// Environment variable holding the JSON arguments in module mode
    #[arg(long, value_name = "VAR", default_value = module::DEFAULT_ARGS_ENV)]
    args_env: String,

    /// TOML config file
    #[arg(long, value_name = "FILE", env = "OCREPORT_CONFIG")]
    config: Option<PathBuf>,

    /// Control-plane client binary (default: oc)
    #[arg(long, value_name = "PATH")]
    client: Option<String>,

    /// Stylesheet URL linked from the report
    #[arg(long, value_name = "URL")]
    stylesheet_url: Option<String>,

    /// Number of namespaces fetched at the same time
    #[arg(long, value_name = "N")]
    concurrency: Option<usize>,

    /// Log client invocations to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Arguments from flags; HTML to stdout or --output
    Cli,
    /// Arguments from a JSON environment variable; JSON result on stdout
    Module,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Logs go to stderr so stdout only carries the report or module result
    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match args.mode {
        Mode::Cli => match run_cli(&args).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("Error: {:#}", e);
                ExitCode::FAILURE
            }
        },
        Mode::Module => {
            let result = run_module(&args)
                .await
                .unwrap_or_else(|e| ModuleResult::failed(&e));
            println!("{}", result.to_json());
            if result.failed {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
    }
}

async fn run_cli(args: &Args) -> Result<()> {
    let config = load_config(args)?;
    let filter = args
        .namespaces
        .as_deref()
        .map(pipeline::split_namespaces);

    let html = generate_report(&config, filter.as_deref()).await?;

    match output::output_target(args.output.as_deref()) {
        Some(path) => {
            output::write_report(path, &html)?;
            println!("{}", output::written_message(path));
        }
        None => println!("{}", html),
    }
    Ok(())
}

async fn run_module(args: &Args) -> Result<ModuleResult> {
    reject_cli_only_flags(args)?;
    let config = load_config(args)?;
    let module_args = ModuleArgs::from_env(&args.args_env)?;
    let filter = module_args.namespace_filter();

    let html = generate_report(&config, filter.as_deref()).await?;
    module::finish(html, module_args.output.as_deref())
}

/// Module mode takes its namespaces and output from the JSON arguments only
fn reject_cli_only_flags(args: &Args) -> Result<()> {
    if args.namespaces.is_some() || args.output.is_some() {
        bail!(
            "--namespaces and --output are not accepted in module mode, pass them in {}",
            args.args_env
        );
    }
    Ok(())
}

/// Config file values with command-line overrides applied
fn load_config(args: &Args) -> Result<Config> {
    let mut config = Config::load(args.config.as_deref())?;
    if let Some(client) = &args.client {
        config.client = client.clone();
    }
    if let Some(url) = &args.stylesheet_url {
        config.stylesheet_url = url.clone();
    }
    if let Some(concurrency) = args.concurrency {
        config.concurrency = concurrency;
    }
    Ok(config)
}

/// Run the pipeline against the configured client and render the result
async fn generate_report(config: &Config, filter: Option<&[String]>) -> Result<String> {
    let client = OcClient::new(&config.client).with_timeout(config.command_timeout());

    let data = pipeline::collect_report(&client, filter, config.concurrency())
        .await
        .with_context(|| format!("Failed to list namespaces with `{}`", client.binary()))?;

    Ok(render_report(&data, &config.report_options(), Local::now()))
}
