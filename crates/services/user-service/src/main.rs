//! User Service - CRUD over the users table.

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use domain::{CreateUser, UpdateUser, DEFAULT_LOOKUP_USER_ID};
use user_service_lib::config::UserServiceConfig;
use user_service_lib::output::OutputFormat;
use user_service_lib::{MigrateAction, UserAction};

#[derive(Parser)]
#[command(name = "user-service")]
#[command(about = "Create, read, update and delete users")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Database URL (overrides the environment)
    #[arg(long, global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List users, fetch one by ID, then list databases (default)
    Startup {
        #[arg(long, default_value_t = DEFAULT_LOOKUP_USER_ID, allow_negative_numbers = true)]
        user_id: i32,
    },
    /// List all users
    List,
    /// Fetch a user by ID
    Get {
        #[arg(allow_negative_numbers = true)]
        id: i32,
    },
    /// Insert a user and print the generated ID
    Create(UserFields),
    /// Overwrite a user's name and age
    Update {
        #[arg(allow_negative_numbers = true)]
        id: i32,
        #[command(flatten)]
        fields: UserFields,
    },
    /// Delete a user by ID
    Delete {
        #[arg(allow_negative_numbers = true)]
        id: i32,
    },
    /// List databases on the server
    Databases,
    /// Database migration commands
    Migrate {
        #[command(subcommand)]
        action: MigrateCommands,
    },
}

#[derive(Args)]
struct UserFields {
    #[arg(long)]
    name: String,
    #[arg(long, allow_negative_numbers = true)]
    age: i32,
}

#[derive(Subcommand)]
enum MigrateCommands {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset database and run all migrations
    Fresh,
}

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match UserServiceConfig::from_env() {
        Ok(config) => config.with_database_url(cli.database_url),
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    tracing::debug!(?config, "Configuration loaded");

    let format = OutputFormat::from_json_flag(cli.json);
    let command = cli.command.unwrap_or(Commands::Startup {
        user_id: DEFAULT_LOOKUP_USER_ID,
    });

    let result = match dispatch(command) {
        Dispatch::Users(action) => user_service_lib::run(&config, action, format).await,
        Dispatch::Migrate(action) => user_service_lib::run_migrations(&config, action).await,
    };

    if let Err(e) = result {
        tracing::error!(code = e.code(), "Command failed: {}", e);
        std::process::exit(1);
    }
}

enum Dispatch {
    Users(UserAction),
    Migrate(MigrateAction),
}

fn dispatch(command: Commands) -> Dispatch {
    let action = match command {
        Commands::Startup { user_id } => UserAction::Startup { user_id },
        Commands::List => UserAction::List,
        Commands::Get { id } => UserAction::Get { id },
        Commands::Create(fields) => UserAction::Create(CreateUser::new(fields.name, fields.age)),
        Commands::Update { id, fields } => UserAction::Update {
            id,
            changes: UpdateUser::new(fields.name, fields.age),
        },
        Commands::Delete { id } => UserAction::Delete { id },
        Commands::Databases => UserAction::Databases,
        Commands::Migrate { action } => {
            return Dispatch::Migrate(match action {
                MigrateCommands::Up => MigrateAction::Up,
                MigrateCommands::Down => MigrateAction::Down,
                MigrateCommands::Status => MigrateAction::Status,
                MigrateCommands::Fresh => MigrateAction::Fresh,
            })
        }
    };
    Dispatch::Users(action)
}

/// Initialize tracing subscriber
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        "debug".to_string()
    } else {
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Dispatch {
        let cli = Cli::try_parse_from(args).unwrap();
        dispatch(cli.command.unwrap())
    }

    #[test]
    fn test_negative_ids_reach_the_repository() {
        assert!(matches!(
            parse(&["user-service", "get", "-1"]),
            Dispatch::Users(UserAction::Get { id: -1 })
        ));
        assert!(matches!(
            parse(&["user-service", "delete", "-7"]),
            Dispatch::Users(UserAction::Delete { id: -7 })
        ));
        assert!(matches!(
            parse(&["user-service", "startup", "--user-id", "-2"]),
            Dispatch::Users(UserAction::Startup { user_id: -2 })
        ));
    }

    #[test]
    fn test_update_with_negative_id_and_age() {
        let action = parse(&["user-service", "update", "-1", "--name", "Bass", "--age", "-3"]);

        match action {
            Dispatch::Users(UserAction::Update { id, changes }) => {
                assert_eq!(id, -1);
                assert_eq!(changes, UpdateUser::new("Bass", -3));
            }
            _ => panic!("expected an update action"),
        }
    }

    #[test]
    fn test_create_and_migrate_dispatch() {
        match parse(&["user-service", "create", "--name", "Alice", "--age", "40"]) {
            Dispatch::Users(UserAction::Create(params)) => {
                assert_eq!(params, CreateUser::new("Alice", 40));
            }
            _ => panic!("expected a create action"),
        }
        assert!(matches!(
            parse(&["user-service", "migrate", "status"]),
            Dispatch::Migrate(MigrateAction::Status)
        ));
    }

    #[test]
    fn test_startup_defaults_lookup_id() {
        assert!(matches!(
            parse(&["user-service", "startup"]),
            Dispatch::Users(UserAction::Startup {
                user_id: DEFAULT_LOOKUP_USER_ID
            })
        ));
    }
}
