//! Triqueta CLI - Command-line client for the Triqueta Digital API.

mod commands;
mod navigator;
mod output;

use clap::{Parser, Subcommand};
use tracing::debug;
use triqueta_api::models::{ActivityFilters, FavoriteFilters, RecommendationQuery};
use triqueta_api::{ApiError, DEFAULT_EXECUTIONS_LIMIT, DEFAULT_PENDING_LIMIT};
use triqueta_auth::AuthError;
use triqueta_config_and_utils::{Config, Paths, DEFAULT_LOG_LEVEL};
use uuid::Uuid;

/// Triqueta CLI - Browse activities, manage favorites and administer the catalogue.
#[derive(Parser)]
#[command(name = "triqueta")]
#[command(about = "Triqueta CLI for the Triqueta Digital activity platform")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format (text or json)
    #[arg(short, long, default_value = "text", global = true)]
    format: output::OutputFormat,

    /// Log level (trace, debug, info, warn, error). Defaults to the configured level.
    #[arg(long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Login with email and password
    Login {
        /// Account email; prompted for when omitted
        #[arg(short, long)]
        email: Option<String>,
    },

    /// Create an account and log into it
    Register {
        /// Account email; prompted for when omitted
        #[arg(short, long)]
        email: Option<String>,
        /// Full name for the profile
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Logout and clear session
    Logout,

    /// Check authentication status
    Status,

    /// Show the current account
    Me,

    /// Browse activities
    Activities {
        #[command(subcommand)]
        command: ActivityCommands,
    },

    /// Manage favorites
    Favorites {
        #[command(subcommand)]
        command: FavoriteCommands,
    },

    /// Personalised recommendations
    Recommendations {
        /// Maximum number of results
        #[arg(short, long)]
        limit: Option<u32>,
        /// Only this activity type
        #[arg(short, long)]
        tipo: Option<String>,
        /// Only this locality
        #[arg(long)]
        localidad: Option<String>,
        /// Leave out activities already saved
        #[arg(long)]
        exclude_favorited: bool,
    },

    /// Administration (admin accounts only)
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },
}

#[derive(Subcommand)]
enum ActivityCommands {
    /// List activities
    List {
        /// Free-text search
        #[arg(short, long)]
        query: Option<String>,
        #[arg(short, long)]
        tipo: Option<String>,
        #[arg(short, long)]
        localidad: Option<String>,
        /// Only free activities
        #[arg(long)]
        gratis: bool,
        /// Filter by tag (repeatable)
        #[arg(long = "tag")]
        etiquetas: Vec<String>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        page_size: Option<u32>,
    },
    /// Show activity details
    Show {
        /// Activity ID
        id: Uuid,
    },
}

#[derive(Subcommand)]
enum FavoriteCommands {
    /// List favorites
    List {
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        page_size: Option<u32>,
    },
    /// Save an activity
    Add {
        /// Activity ID
        id: Uuid,
    },
    /// Remove a saved activity
    Remove {
        /// Activity ID
        id: Uuid,
    },
    /// Check whether an activity is saved
    Check {
        /// Activity ID
        id: Uuid,
    },
    /// Number of saved activities
    Count,
}

#[derive(Subcommand)]
enum AdminCommands {
    /// Platform metrics
    Dashboard,
    /// Latest ETL execution
    EtlStatus,
    /// List ETL executions
    EtlRuns {
        #[arg(short, long, default_value_t = DEFAULT_EXECUTIONS_LIMIT)]
        limit: u32,
        #[arg(short, long, default_value_t = 0)]
        offset: u32,
    },
    /// Show one ETL execution
    EtlRun {
        /// Execution ID
        id: i64,
    },
    /// Queue an ETL run
    EtlTrigger {
        /// Data source (idrd, csv, ...)
        #[arg(default_value = "idrd")]
        source: String,
    },
    /// Activities awaiting moderation
    Pending {
        #[arg(short, long, default_value_t = DEFAULT_PENDING_LIMIT)]
        limit: u32,
        #[arg(short, long, default_value_t = 0)]
        offset: u32,
    },
    /// Approve a pending activity
    Approve {
        /// Activity ID
        id: i64,
    },
    /// Reject a pending activity
    Reject {
        /// Activity ID
        id: i64,
    },
}

/// `--log-level` wins over `config.json` and `TRIQUETA_LOG_LEVEL`.
fn log_level(flag: Option<String>) -> String {
    flag.or_else(|| {
        Paths::new()
            .ok()
            .and_then(|paths| Config::load(&paths).ok())
            .map(|config| config.log_level)
    })
    .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
}

/// The text to show for a failed command.
fn error_message(error: &anyhow::Error) -> String {
    if let Some(api) = error.downcast_ref::<ApiError>() {
        return api.user_message();
    }
    if let Some(AuthError::InvalidCredentials(detail)) = error.downcast_ref::<AuthError>() {
        return detail.clone();
    }
    error.to_string()
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    triqueta_config_and_utils::init_logging(&log_level(cli.log_level));

    let format = cli.format;
    let result = match cli.command {
        Commands::Login { email } => commands::login(email, &format).await,
        Commands::Register { email, name } => commands::register(email, name, &format).await,
        Commands::Logout => commands::logout(&format).await,
        Commands::Status => commands::status(&format).await,
        Commands::Me => commands::me(&format).await,
        Commands::Activities { command } => match command {
            ActivityCommands::List {
                query,
                tipo,
                localidad,
                gratis,
                etiquetas,
                page,
                page_size,
            } => {
                let filters = ActivityFilters {
                    q: query,
                    tipo,
                    localidad,
                    es_gratis: gratis.then_some(true),
                    etiquetas,
                    page,
                    page_size,
                    ..Default::default()
                };
                commands::activities_list(filters, &format).await
            }
            ActivityCommands::Show { id } => commands::activities_show(id, &format).await,
        },
        Commands::Favorites { command } => match command {
            FavoriteCommands::List { page, page_size } => {
                let filters = FavoriteFilters {
                    page,
                    page_size,
                    ..Default::default()
                };
                commands::favorites_list(filters, &format).await
            }
            FavoriteCommands::Add { id } => commands::favorites_add(id, &format).await,
            FavoriteCommands::Remove { id } => commands::favorites_remove(id, &format).await,
            FavoriteCommands::Check { id } => commands::favorites_check(id, &format).await,
            FavoriteCommands::Count => commands::favorites_count(&format).await,
        },
        Commands::Recommendations {
            limit,
            tipo,
            localidad,
            exclude_favorited,
        } => {
            let query = RecommendationQuery {
                limit,
                tipo,
                localidad,
                exclude_favorited: exclude_favorited.then_some(true),
            };
            commands::recommendations(query, &format).await
        }
        Commands::Admin { command } => match command {
            AdminCommands::Dashboard => commands::admin_dashboard(&format).await,
            AdminCommands::EtlStatus => commands::admin_etl_status(&format).await,
            AdminCommands::EtlRuns { limit, offset } => {
                commands::admin_etl_runs(limit, offset, &format).await
            }
            AdminCommands::EtlRun { id } => commands::admin_etl_run(id, &format).await,
            AdminCommands::EtlTrigger { source } => {
                commands::admin_etl_trigger(&source, &format).await
            }
            AdminCommands::Pending { limit, offset } => {
                commands::admin_pending(limit, offset, &format).await
            }
            AdminCommands::Approve { id } => commands::admin_approve(id, &format).await,
            AdminCommands::Reject { id } => commands::admin_reject(id, &format).await,
        },
    };

    if let Err(e) = result {
        debug!(error = ?e, "command failed");
        output::print_error(&error_message(&e), &format);
        std::process::exit(1);
    }
}
