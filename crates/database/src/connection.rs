use crate::error::DbError;
use configuration::DatabaseSettings;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection, MySqlSslMode};
use sqlx::{ConnectOptions, Connection};

/// Opens connections to the MySQL store.
///
/// The connect options are built once from the settings; every call to
/// [`ConnectionProvider::acquire`] then opens a brand new connection.
#[derive(Debug, Clone)]
pub struct ConnectionProvider {
    options: MySqlConnectOptions,
}

impl ConnectionProvider {
    pub fn new(settings: &DatabaseSettings) -> Self {
        let mut options = MySqlConnectOptions::new()
            .host(&settings.host)
            .port(settings.port)
            .username(&settings.user)
            .password(&settings.password)
            .database(&settings.name)
            .charset("utf8mb4");

        if let Some(ca) = &settings.ssl_ca {
            options = options.ssl_mode(MySqlSslMode::VerifyCa).ssl_ca(ca);
        }

        Self { options }
    }

    /// Opens a new connection. The caller owns it and should hand it back to
    /// [`release`] when done.
    pub async fn acquire(&self) -> Result<MySqlConnection, DbError> {
        self.options.connect().await.map_err(|e| {
            tracing::error!(error = %e, "Could not connect to the database.");
            DbError::Connection(e)
        })
    }
}

/// Closes a connection, logging instead of failing if the goodbye handshake breaks.
pub async fn release(conn: MySqlConnection) {
    if let Err(e) = conn.close().await {
        tracing::warn!(error = %e, "Failed to close database connection cleanly.");
    }
}
