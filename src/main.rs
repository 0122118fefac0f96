//! cqlbind - bind positional values into a CQL statement and execute it.

mod cli;

use cli::{Cli, OutputFormat, StatementKind};
use cql_bind::config::{Config, ConnectionConfig};
use cql_bind::db::{self, MockSession, Session};
use cql_bind::error::{CqlBindError, Result};
use cql_bind::logging;
use cql_bind::query::StatementExecutor;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse_args();

    if cli.log_file {
        logging::init_file_logging();
    } else {
        logging::init_stderr_logging();
    }

    if let Err(e) = run(cli).await {
        error!("{}: {}", e.category(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let format = cli.parse_output_format().map_err(CqlBindError::config)?;

    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let config = Config::load_from_file(&config_path)?;

    let mode = cli.bind_mode(config.binding.mode)?;
    let bindings = cli.parse_bindings()?;
    let kind = cli.statement_kind();

    if cli.dry_run {
        let session = MockSession::new();
        let executor = StatementExecutor::with_mode(&session, mode);
        let cql = match kind {
            StatementKind::Statement => executor.render_statement(&cli.template, &bindings)?,
            StatementKind::Affecting => executor.render_affecting(&cli.template, &bindings)?,
            StatementKind::Raw => cli.template.clone(),
        };
        print_output(format, "statement", serde_json::Value::String(cql));
        return Ok(());
    }

    let session: Box<dyn Session> = if cli.mock_session {
        info!("Using in-memory mock session");
        Box::new(MockSession::new())
    } else {
        let connection = resolve_connection(&cli, &config)?;
        info!("Connection: {}", connection.display_string());
        db::connect(&connection).await?
    };

    let executor = StatementExecutor::with_mode(session.as_ref(), mode);
    let outcome = match kind {
        StatementKind::Statement => executor
            .statement(&cli.template, &bindings)
            .await
            .map(|applied| ("applied", serde_json::Value::Bool(applied))),
        StatementKind::Affecting => executor
            .affecting_statement(&cli.template, &bindings)
            .await
            .map(|count| ("affected_rows", serde_json::Value::from(count))),
        StatementKind::Raw => executor.raw(&cli.template).await.and_then(|result| {
            match format {
                OutputFormat::Text => Ok(("rows", serde_json::Value::String(result.to_tsv()))),
                OutputFormat::Json => serde_json::to_value(&result)
                    .map(|json| ("result", json))
                    .map_err(|e| CqlBindError::internal(format!("Failed to encode result: {e}"))),
            }
        }),
    };

    session.close().await?;

    let (key, value) = outcome?;
    print_output(format, key, value);
    Ok(())
}

/// Resolves the final connection configuration from CLI args, config file, and environment.
///
/// Precedence: CLI arguments, then the named (or default) connection from the
/// config file, then DB_* environment variables, then built-in defaults.
fn resolve_connection(cli: &Cli, config: &Config) -> Result<ConnectionConfig> {
    let mut connection = match cli.connection_name() {
        Some(name) => config.get_connection(Some(name)).cloned().ok_or_else(|| {
            CqlBindError::config(format!("Connection '{}' not found in config file", name))
        })?,
        None => config.get_connection(None).cloned().unwrap_or_default(),
    };

    if let Some(overrides) = cli.to_connection_config()? {
        connection.merge(&overrides);
    }

    connection.apply_env_defaults(true);

    Ok(connection)
}

fn print_output(format: OutputFormat, key: &str, value: serde_json::Value) {
    match format {
        OutputFormat::Text => match value {
            serde_json::Value::String(s) => println!("{s}"),
            other => println!("{other}"),
        },
        OutputFormat::Json => {
            let mut object = serde_json::Map::new();
            object.insert(key.to_string(), value);
            println!("{}", serde_json::Value::Object(object));
        }
    }
}
