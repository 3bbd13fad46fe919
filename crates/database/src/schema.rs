use crate::connection::{release, ConnectionProvider};
use crate::DbError;
use sqlx::mysql::MySqlConnection;
use sqlx::Connection;
use std::path::Path;

/// Splits a SQL script on `;` and drops blank statements.
///
/// The split is purely textual, so scripts must not contain `;` inside
/// string literals.
pub fn split_statements(script: &str) -> Vec<&str> {
    script
        .split(';')
        .map(str::trim)
        .filter(|statement| !statement.is_empty())
        .collect()
}

/// Runs a schema/seed script against a fresh connection.
///
/// Statements run in file order inside one transaction that is committed once
/// at the end. The first failing statement aborts the rest and its error is
/// returned. Returns the number of statements executed.
pub async fn load_schema(provider: &ConnectionProvider, path: &Path) -> Result<usize, DbError> {
    let script = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| DbError::SchemaFile {
            path: path.to_path_buf(),
            source,
        })?;
    let statements = split_statements(&script);
    tracing::info!(path = %path.display(), statements = statements.len(), "Loading schema.");

    let mut conn = provider.acquire().await?;
    let outcome = execute_all(&mut conn, &statements).await;
    release(conn).await;
    outcome?;

    Ok(statements.len())
}

async fn execute_all(conn: &mut MySqlConnection, statements: &[&str]) -> Result<(), DbError> {
    let mut tx = conn.begin().await?;
    for (index, statement) in statements.iter().enumerate() {
        tracing::debug!(statement = index + 1, "Executing schema statement.");
        sqlx::raw_sql(statement).execute(&mut *tx).await?;
    }
    tx.commit().await?;
    Ok(())
}
