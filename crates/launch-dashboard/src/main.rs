use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use launch_dashboard::telemetry::init_tracing;
use launch_dashboard::{Dashboard, DashboardConfig};
use launch_derive::SiteSelection;
use serde::Serialize;
use std::io::BufReader;
use std::path::{Path, PathBuf};

fn cli() -> Command {
    Command::new("launch-dash")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Launch records dashboard")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("data")
                .long("data")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Launch table CSV (overrides config)"),
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON lines on stderr"),
        )
        .subcommand(Command::new("inspect").about("Print the site selector, slider and bindings"))
        .subcommand(
            Command::new("proportion")
                .about("Print the success pie for a site selection")
                .arg(
                    Arg::new("site")
                        .long("site")
                        .default_value(launch_dataset::ALL_SITES)
                        .help("Launch site, or ALL"),
                ),
        )
        .subcommand(
            Command::new("scatter")
                .about("Print the payload/outcome scatter")
                .arg(
                    Arg::new("site")
                        .long("site")
                        .default_value(launch_dataset::ALL_SITES)
                        .help("Launch site, or ALL"),
                )
                .arg(
                    Arg::new("low")
                        .long("low")
                        .value_parser(value_parser!(f64))
                        .help("Lower payload bound in kg (default: dataset minimum)"),
                )
                .arg(
                    Arg::new("high")
                        .long("high")
                        .value_parser(value_parser!(f64))
                        .help("Upper payload bound in kg (default: dataset maximum)"),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .value_parser(value_parser!(u64))
                        .help("Jitter seed for reproducible output"),
                ),
        )
        .subcommand(
            Command::new("replay")
                .about("Feed control snapshots through a session and print each rendered event")
                .arg(
                    Arg::new("events")
                        .long("events")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("File of JSON control states, one per line"),
                ),
        )
}

fn load_config(matches: &ArgMatches) -> Result<DashboardConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => DashboardConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => DashboardConfig::default(),
    };
    if let Some(data) = matches.get_one::<PathBuf>("data") {
        config = config.with_data_path(data.clone());
    }
    Ok(config)
}

fn print_pretty<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn site_arg(args: &ArgMatches) -> SiteSelection {
    args.get_one::<String>("site")
        .map_or(SiteSelection::All, |s| SiteSelection::from(s.as_str()))
}

async fn replay(dashboard: &Dashboard, path: &Path) -> Result<()> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening event file {}", path.display()))?;
    let mut out = std::io::stdout().lock();
    dashboard
        .replay(BufReader::new(file), &mut out)
        .await
        .with_context(|| format!("replaying {}", path.display()))?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = cli().get_matches();
    let config = load_config(&matches)?;
    init_tracing(&config.log_filter, matches.get_flag("log-json"));

    let dashboard = match Dashboard::start(config) {
        Ok(dashboard) => dashboard,
        Err(e) => {
            tracing::error!("Dashboard failed to start: {}", e);
            return Err(e.into());
        }
    };
    dashboard.install_global()?;

    match matches.subcommand() {
        Some(("inspect", _)) => print_pretty(&dashboard.manifest())?,
        Some(("proportion", args)) => print_pretty(&dashboard.proportion_view(&site_arg(args)))?,
        Some(("scatter", args)) => {
            let figure = dashboard.scatter_view(
                &site_arg(args),
                args.get_one::<f64>("low").copied(),
                args.get_one::<f64>("high").copied(),
                args.get_one::<u64>("seed").copied(),
            )?;
            print_pretty(&figure)?;
        }
        Some(("replay", args)) => {
            let path = args
                .get_one::<PathBuf>("events")
                .context("--events is required")?;
            replay(&dashboard, path).await?;
        }
        _ => {}
    }
    Ok(())
}
