//! Per-operation database connection provider.
//!
//! Every tool invocation opens its own `PgConnection` and drops it when the
//! operation's scope ends, on every exit path. There is no pool and no
//! shared handle, so concurrent invocations never contend on in-process
//! state; isolation between them is whatever PostgreSQL's autocommit
//! semantics provide. No code in this crate opens an explicit transaction,
//! so each statement commits immediately.

use sqlx::{Connection, PgConnection};
use tracing::debug;

use super::config::Config;

/// Open a fresh connection to the configured database.
///
/// Callers hold the connection only for the duration of one operation.
/// Dropping it closes the underlying socket.
pub async fn connect(config: &Config) -> Result<PgConnection, sqlx::Error> {
    debug!("Opening database connection");
    PgConnection::connect(&config.database.url).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_unreachable_fails() {
        let mut config = Config::default();
        // Nothing listens on port 1; connect must report an error rather
        // than hang or panic.
        config.database.url = "postgres://127.0.0.1:1/expenses".to_string();
        let result = connect(&config).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_connect_invalid_url_fails() {
        let mut config = Config::default();
        config.database.url = "not-a-connection-string".to_string();
        let result = connect(&config).await;
        assert!(result.is_err());
    }
}
