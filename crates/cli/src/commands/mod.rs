pub mod config;
pub mod cook;
pub mod doctor;
pub mod favorites;
pub mod migrate;
pub mod pantry;
pub mod recipes;

use std::sync::Arc;

use serde::Serialize;
use whatcanicook_core::config::{AppConfig, LoadOptions};
use whatcanicook_core::errors::{ApplicationError, InterfaceError};
use whatcanicook_db::{
    connect_with_config, migrations, FavoritesRepository, KeyValueStore, PantryRepository,
    RecipeLoader, SqlKeyValueStore,
};

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
}

#[derive(Debug, Serialize)]
struct CommandReport<'a, T: Serialize> {
    command: &'a str,
    status: &'static str,
    #[serde(flatten)]
    data: &'a T,
}

impl CommandResult {
    pub fn success(command: &str, message: impl Into<String>) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
        };
        Self { exit_code, output: serialize_payload(payload) }
    }

    /// Successful outcome carrying structured data next to `command` and `status`.
    pub fn report<T: Serialize>(command: &str, data: &T) -> Self {
        let report = CommandReport { command, status: "ok", data };
        match serde_json::to_string_pretty(&report) {
            Ok(output) => Self { exit_code: 0, output },
            Err(error) => Self::failure(command, "serialization", error.to_string(), 1),
        }
    }

    /// Plain text output for human-oriented renderings.
    pub fn text(output: impl Into<String>) -> Self {
        Self { exit_code: 0, output: output.into() }
    }

    /// Maps an application error onto the stable error classes and exit codes.
    pub fn from_application_error(command: &str, error: ApplicationError) -> Self {
        let interface = error.into_interface(command);
        let notice = interface.user_message();
        match interface {
            InterfaceError::BadRequest { message, .. } => {
                Self::failure(command, "bad_request", format!("{notice} ({message})"), 6)
            }
            InterfaceError::Conflict { message, .. } => {
                Self::failure(command, "conflict", format!("{notice} ({message})"), 7)
            }
            InterfaceError::ServiceUnavailable { message, .. } => {
                Self::failure(command, "service_unavailable", format!("{notice} ({message})"), 8)
            }
        }
    }
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}

/// Loads configuration and a single-threaded runtime, or the failure to report.
pub(crate) fn prepare(
    command: &str,
) -> Result<(AppConfig, tokio::runtime::Runtime), CommandResult> {
    let config = AppConfig::load(LoadOptions::default()).map_err(|error| {
        CommandResult::failure(
            command,
            "config_validation",
            format!("configuration issue: {error}"),
            2,
        )
    })?;

    let runtime =
        tokio::runtime::Builder::new_current_thread().enable_all().build().map_err(|error| {
            CommandResult::failure(
                command,
                "runtime_init",
                format!("failed to initialize async runtime: {error}"),
                3,
            )
        })?;

    Ok((config, runtime))
}

/// Repositories over one migrated database, plus the recipe files.
pub(crate) struct Kitchen {
    pub pantry: PantryRepository,
    pub favorites: FavoritesRepository,
    pub recipes: RecipeLoader,
}

impl Kitchen {
    pub(crate) async fn open(command: &str, config: &AppConfig) -> Result<Self, CommandResult> {
        let pool = connect_with_config(&config.storage).await.map_err(|error| {
            CommandResult::failure(command, "db_connectivity", error.to_string(), 4)
        })?;
        migrations::run_pending(&pool)
            .await
            .map_err(|error| CommandResult::failure(command, "migration", error.to_string(), 5))?;

        let store: Arc<dyn KeyValueStore> = Arc::new(SqlKeyValueStore::new(pool));
        Ok(Self {
            pantry: PantryRepository::new(store.clone()),
            favorites: FavoritesRepository::new(store),
            recipes: RecipeLoader::from_config(&config.recipes),
        })
    }
}

/// Runs `body` against an opened kitchen on a fresh runtime.
pub(crate) fn with_kitchen<F, Fut>(command: &str, body: F) -> CommandResult
where
    F: FnOnce(Kitchen) -> Fut,
    Fut: std::future::Future<Output = CommandResult>,
{
    let (config, runtime) = match prepare(command) {
        Ok(prepared) => prepared,
        Err(result) => return result,
    };

    runtime.block_on(async {
        match Kitchen::open(command, &config).await {
            Ok(kitchen) => body(kitchen).await,
            Err(result) => result,
        }
    })
}

pub(crate) fn persistence_failure(command: &str, error: impl ToString) -> CommandResult {
    CommandResult::from_application_error(
        command,
        ApplicationError::Persistence(error.to_string()),
    )
}

pub(crate) fn recipe_source_failure(command: &str, error: impl ToString) -> CommandResult {
    CommandResult::from_application_error(
        command,
        ApplicationError::RecipeSource(error.to_string()),
    )
}
