use crate::connection::{release, ConnectionProvider};
use crate::DbError;
use async_trait::async_trait;
use core_types::{format_imovel, Imovel, ImovelRow, NewImovel};

const SELECT_ALL: &str = "SELECT id, logradouro, tipo_logradouro, bairro, cidade, cep, tipo, valor, data_aquisicao \
     FROM imoveis ORDER BY id";
const SELECT_BY_ID: &str = "SELECT id, logradouro, tipo_logradouro, bairro, cidade, cep, tipo, valor, data_aquisicao \
     FROM imoveis WHERE id = ?";
const SELECT_BY_TIPO: &str = "SELECT id, logradouro, tipo_logradouro, bairro, cidade, cep, tipo, valor, data_aquisicao \
     FROM imoveis WHERE tipo = ? ORDER BY id";
const SELECT_BY_CIDADE: &str = "SELECT id, logradouro, tipo_logradouro, bairro, cidade, cep, tipo, valor, data_aquisicao \
     FROM imoveis WHERE cidade = ? ORDER BY id";

/// The data access contract used by the HTTP handlers.
///
/// Every method returns records already passed through the record formatter.
/// Update and delete report whether a row with that id existed.
#[async_trait]
pub trait ImovelStore: Send + Sync {
    async fn list_imoveis(&self) -> Result<Vec<Imovel>, DbError>;

    async fn get_imovel(&self, id: i64) -> Result<Option<Imovel>, DbError>;

    /// Inserts a record and returns the id assigned by the store.
    async fn insert_imovel(&self, imovel: &NewImovel) -> Result<i64, DbError>;

    /// Replaces every field of the record `id`. Returns `false` if no such row exists.
    async fn update_imovel(&self, id: i64, imovel: &NewImovel) -> Result<bool, DbError>;

    /// Deletes the record `id`. Returns `false` if no such row exists.
    async fn delete_imovel(&self, id: i64) -> Result<bool, DbError>;

    async fn find_by_tipo(&self, tipo: &str) -> Result<Vec<Imovel>, DbError>;

    async fn find_by_cidade(&self, cidade: &str) -> Result<Vec<Imovel>, DbError>;
}

/// The MySQL implementation of [`ImovelStore`].
///
/// Each method opens its own connection through the provider and closes it
/// before returning, whether the statement succeeded or not.
#[derive(Debug, Clone)]
pub struct DbRepository {
    provider: ConnectionProvider,
}

impl DbRepository {
    pub fn new(provider: ConnectionProvider) -> Self {
        Self { provider }
    }

    async fn fetch_filtered(&self, sql: &'static str, value: &str) -> Result<Vec<Imovel>, DbError> {
        let mut conn = self.provider.acquire().await?;
        let rows = sqlx::query_as::<_, ImovelRow>(sql)
            .bind(value)
            .fetch_all(&mut conn)
            .await;
        release(conn).await;

        Ok(rows?.into_iter().map(format_imovel).collect())
    }
}

#[async_trait]
impl ImovelStore for DbRepository {
    async fn list_imoveis(&self) -> Result<Vec<Imovel>, DbError> {
        let mut conn = self.provider.acquire().await?;
        let rows = sqlx::query_as::<_, ImovelRow>(SELECT_ALL)
            .fetch_all(&mut conn)
            .await;
        release(conn).await;

        Ok(rows?.into_iter().map(format_imovel).collect())
    }

    async fn get_imovel(&self, id: i64) -> Result<Option<Imovel>, DbError> {
        let mut conn = self.provider.acquire().await?;
        let row = sqlx::query_as::<_, ImovelRow>(SELECT_BY_ID)
            .bind(id)
            .fetch_optional(&mut conn)
            .await;
        release(conn).await;

        Ok(row?.map(format_imovel))
    }

    async fn insert_imovel(&self, imovel: &NewImovel) -> Result<i64, DbError> {
        let mut conn = self.provider.acquire().await?;
        let result = sqlx::query(
            r#"
            INSERT INTO imoveis (logradouro, tipo_logradouro, bairro, cidade, cep, tipo, valor, data_aquisicao)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(imovel.logradouro.as_str())
        .bind(imovel.tipo_logradouro.as_str())
        .bind(imovel.bairro.as_str())
        .bind(imovel.cidade.as_str())
        .bind(imovel.cep.as_str())
        .bind(imovel.tipo.as_str())
        .bind(imovel.valor)
        .bind(imovel.data_aquisicao.as_str())
        .execute(&mut conn)
        .await;
        release(conn).await;

        let new_id = result?.last_insert_id();
        i64::try_from(new_id).map_err(|_| DbError::InvalidId(new_id))
    }

    async fn update_imovel(&self, id: i64, imovel: &NewImovel) -> Result<bool, DbError> {
        let mut conn = self.provider.acquire().await?;
        // sqlx negotiates CLIENT_FOUND_ROWS, so rows_affected counts matched
        // rows even when the new values equal the old ones.
        let result = sqlx::query(
            r#"
            UPDATE imoveis
            SET logradouro = ?, tipo_logradouro = ?, bairro = ?, cidade = ?,
                cep = ?, tipo = ?, valor = ?, data_aquisicao = ?
            WHERE id = ?
            "#,
        )
        .bind(imovel.logradouro.as_str())
        .bind(imovel.tipo_logradouro.as_str())
        .bind(imovel.bairro.as_str())
        .bind(imovel.cidade.as_str())
        .bind(imovel.cep.as_str())
        .bind(imovel.tipo.as_str())
        .bind(imovel.valor)
        .bind(imovel.data_aquisicao.as_str())
        .bind(id)
        .execute(&mut conn)
        .await;
        release(conn).await;

        Ok(result?.rows_affected() > 0)
    }

    async fn delete_imovel(&self, id: i64) -> Result<bool, DbError> {
        let mut conn = self.provider.acquire().await?;
        let result = sqlx::query("DELETE FROM imoveis WHERE id = ?")
            .bind(id)
            .execute(&mut conn)
            .await;
        release(conn).await;

        Ok(result?.rows_affected() > 0)
    }

    async fn find_by_tipo(&self, tipo: &str) -> Result<Vec<Imovel>, DbError> {
        self.fetch_filtered(SELECT_BY_TIPO, tipo).await
    }

    async fn find_by_cidade(&self, cidade: &str) -> Result<Vec<Imovel>, DbError> {
        self.fetch_filtered(SELECT_BY_CIDADE, cidade).await
    }
}
