//! newsdesk CLI
//!
//! Converts audience policies between editor and API shapes and drives the
//! news API from the command line.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde::de::DeserializeOwned;

use newsdesk::{
    audience::{
        IdGenerator, SequentialIds, UuidGenerator, convert_to_api, convert_to_component,
        describe_groups, validate_groups,
    },
    error::{AppError, Result},
    models::{ApiGroup, AssignmentPolicy, Config, Group, NewsQuery, StatusFilter},
    services::{NewsClient, new_draft},
};

/// newsdesk - News administration console backend
#[derive(Parser, Debug)]
#[command(
    name = "newsdesk",
    version,
    about = "News administration: audience policies and news API"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "newsdesk.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Number tree nodes 1, 2, 3... instead of random UUIDs
    #[arg(long, global = true)]
    deterministic_ids: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert audience data between editor groups and API trees
    Convert {
        #[command(subcommand)]
        direction: Direction,
    },

    /// Print editor groups as labelled text
    Describe {
        /// JSON file with a list of groups
        groups: PathBuf,
    },

    /// Validate the configuration file
    ValidateConfig,

    /// Work with news records
    News {
        #[command(subcommand)]
        action: NewsAction,
    },

    /// Preview which employees an audience policy would reach
    TestAssignment {
        /// JSON file with inclusion groups
        #[arg(long)]
        filter: Option<PathBuf>,

        /// JSON file with exclusion groups
        #[arg(long)]
        exclude: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
enum Direction {
    /// Editor groups (JSON list) → API tree
    ToApi { groups: PathBuf },
    /// API tree (JSON object) → editor groups
    ToComponent { tree: PathBuf },
}

#[derive(Subcommand, Debug)]
enum NewsAction {
    /// List news
    List {
        /// all, draft, preview, published or a status code
        #[arg(long, default_value = "all")]
        status: String,

        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Title search
        #[arg(long, default_value = "")]
        search: String,
    },

    /// Show one news record
    Show { id: String },

    /// Create a draft valid for one month
    Create { title: String },

    /// Delete a news record
    Delete { id: String },

    /// Show counts per publish status
    Counters,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool, level: &str) {
    let level = if verbose { "debug" } else { level };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn read_groups(path: Option<&PathBuf>) -> Result<Vec<Group>> {
    match path {
        Some(path) => {
            let groups: Vec<Group> = read_json(path)?;
            validate_groups(&groups)?;
            Ok(groups)
        }
        None => Ok(Vec::new()),
    }
}

fn id_generator(deterministic: bool) -> Box<dyn IdGenerator> {
    if deterministic {
        Box::new(SequentialIds::new())
    } else {
        Box::new(UuidGenerator)
    }
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load_or_default(&cli.config);
    init_logging(cli.verbose, &config.logging.level);

    log::debug!("Loaded configuration from {}", cli.config.display());

    let mut ids = id_generator(cli.deterministic_ids);

    match cli.command {
        Command::Convert { direction } => match direction {
            Direction::ToApi { groups } => {
                let groups: Vec<Group> = read_json(&groups)?;
                print_json(&convert_to_api(&groups, &mut ids))?;
            }
            Direction::ToComponent { tree } => {
                let tree: ApiGroup = read_json(&tree)?;
                print_json(&convert_to_component(&tree))?;
            }
        },

        Command::Describe { groups } => {
            let groups: Vec<Group> = read_json(&groups)?;
            for line in describe_groups(&groups, &config.audience) {
                println!("{line}");
            }
        }

        Command::ValidateConfig => {
            log::info!("Validating configuration...");
            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK ({})", config.api.base_url);
        }

        Command::News { action } => {
            config.validate()?;
            let client = NewsClient::new(&config.api)?;
            let subordinates = config.api.subordinates.as_str();

            match action {
                NewsAction::List {
                    status,
                    page,
                    search,
                } => {
                    let publish_status = StatusFilter::parse(&status).ok_or_else(|| {
                        AppError::validation(format!("unknown status filter '{status}'"))
                    })?;
                    let query = NewsQuery {
                        publish_status,
                        page,
                        page_size: config.api.page_size,
                        search,
                        subordinates: subordinates.to_string(),
                        ..NewsQuery::default()
                    };
                    let page = client.list(&query).await?;
                    log::info!(
                        "{} news ({}), page {}",
                        page.total,
                        publish_status.label(),
                        page.current_page
                    );
                    print_json(&page)?;
                }
                NewsAction::Show { id } => print_json(&client.get(&id, subordinates).await?)?,
                NewsAction::Create { title } => {
                    let payload = new_draft(&title, Utc::now())?;
                    print_json(&client.create(&payload).await?)?;
                }
                NewsAction::Delete { id } => client.delete(&id).await?,
                NewsAction::Counters => {
                    print_json(&client.counters(NewsQuery::default().status, subordinates).await?)?
                }
            }
        }

        Command::TestAssignment { filter, exclude } => {
            config.validate()?;
            let policy = AssignmentPolicy::from_groups(
                &read_groups(filter.as_ref())?,
                &read_groups(exclude.as_ref())?,
                &mut ids,
            );
            let client = NewsClient::new(&config.api)?;
            print_json(&client.test_assignment(&policy).await?)?;
        }
    }

    Ok(())
}
