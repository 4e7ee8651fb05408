use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use gitversion::config;
use gitversion::git::Git2Repository;
use gitversion::ui;
use gitversion::{BumpOptions, Bumper, Field};

#[derive(clap::Parser)]
#[command(name = "gitversion", version, about = "Manage versions using git tags")]
struct Args {
    #[arg(long, global = true, help = "Set a prefix for the tag name (e.g. v1.0.0)")]
    prefix: Option<String>,

    #[arg(long, global = true, help = "Consider only tags merged into this branch")]
    merged: bool,

    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, global = true, help = "Log progress to stderr")]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Increment the version and create a new git tag
    #[command(visible_alias = "b")]
    Bump {
        #[arg(
            value_name = "FIELD",
            help = "Field to bump: major, minor, patch, prerelease or auto"
        )]
        field: String,

        #[arg(
            short = 'n',
            long,
            help = "Do not add a git tag; only report the tag that would be added"
        )]
        dry_run: bool,
    },

    /// Output the latest tagged version
    #[command(visible_alias = "s")]
    Show,

    /// Output every version tag, latest first
    #[command(visible_alias = "l")]
    List,
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args) {
        ui::display_error(format!("{:#}", e));
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn run(args: Args) -> Result<()> {
    let config = config::load_config(args.config.as_deref())
        .context("loading configuration")?
        .with_overrides(args.prefix, args.merged);

    match args.command.unwrap_or(Command::Show) {
        Command::Bump { field, dry_run } => {
            let field: Field = field.parse()?;
            let options = BumpOptions::new(field)
                .prefix(config.prefix)
                .merged(config.merged)
                .dry_run(dry_run);
            let tag = open_bumper()?.bump(&options)?;
            println!("{}", tag);
        }
        Command::Show => {
            let latest = open_bumper()?.latest_version(&config.prefix, config.merged)?;
            println!("{}", latest.render(&config.prefix));
        }
        Command::List => {
            let versions = open_bumper()?.sorted_versions(&config.prefix, config.merged)?;
            println!("{}", ui::format_version_list(&config.prefix, &versions));
        }
    }

    Ok(())
}

fn open_bumper() -> Result<Bumper<Git2Repository>> {
    let repo = Git2Repository::open(".").context("opening git repository")?;
    Ok(Bumper::new(repo))
}
