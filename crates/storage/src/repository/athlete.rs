use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::AthleteStore;
use crate::Database;
use crate::dto::athlete::UpdateAthleteRequest;
use crate::error::{Result, StorageError};
use crate::models::{Athlete, AthleteDetail};

const DETAIL_COLUMNS: &str = r#"
    a.id, a.created_at, a.nome, a.cpf, a.idade, a.peso, a.altura, a.sexo,
    a.categoria_id, c.nome AS categoria_nome,
    a.centro_treinamento_id, ct.nome AS centro_treinamento_nome
"#;

const DETAIL_JOINS: &str = r#"
    JOIN categorias c ON c.id = a.categoria_id
    JOIN centros_treinamento ct ON ct.id = a.centro_treinamento_id
"#;

pub struct AthleteRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AthleteRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all athletes with their category and training center names
    pub async fn list(&self) -> Result<Vec<AthleteDetail>> {
        let sql = format!(
            "SELECT {DETAIL_COLUMNS} FROM atletas a {DETAIL_JOINS} ORDER BY a.created_at, a.id"
        );

        let athletes = sqlx::query_as::<_, AthleteDetail>(&sql)
            .fetch_all(self.pool)
            .await?;

        Ok(athletes)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<AthleteDetail>> {
        let sql = format!("SELECT {DETAIL_COLUMNS} FROM atletas a {DETAIL_JOINS} WHERE a.id = $1");

        let athlete = sqlx::query_as::<_, AthleteDetail>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(athlete)
    }

    /// Names are not unique, so the oldest athlete with that name is returned
    pub async fn find_by_nome(&self, nome: &str) -> Result<Option<AthleteDetail>> {
        let sql = format!(
            "SELECT {DETAIL_COLUMNS} FROM atletas a {DETAIL_JOINS} \
             WHERE a.nome = $1 ORDER BY a.created_at LIMIT 1"
        );

        let athlete = sqlx::query_as::<_, AthleteDetail>(&sql)
            .bind(nome)
            .fetch_optional(self.pool)
            .await?;

        Ok(athlete)
    }

    pub async fn find_by_cpf(&self, cpf: &str) -> Result<Option<AthleteDetail>> {
        let sql = format!("SELECT {DETAIL_COLUMNS} FROM atletas a {DETAIL_JOINS} WHERE a.cpf = $1");

        let athlete = sqlx::query_as::<_, AthleteDetail>(&sql)
            .bind(cpf)
            .fetch_optional(self.pool)
            .await?;

        Ok(athlete)
    }

    /// Insert a new athlete. A taken cpf surfaces as SQLSTATE 23505.
    pub async fn create(&self, athlete: &Athlete) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO atletas (
                id, created_at, nome, cpf, idade, peso, altura, sexo,
                categoria_id, centro_treinamento_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(athlete.id)
        .bind(athlete.created_at)
        .bind(&athlete.nome)
        .bind(&athlete.cpf)
        .bind(athlete.idade)
        .bind(athlete.peso)
        .bind(athlete.altura)
        .bind(&athlete.sexo)
        .bind(athlete.categoria_id)
        .bind(athlete.centro_treinamento_id)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Update an existing athlete, keeping current values for absent fields
    pub async fn update(
        &self,
        existing: &AthleteDetail,
        req: &UpdateAthleteRequest,
    ) -> Result<AthleteDetail> {
        let nome = req.nome.as_ref().unwrap_or(&existing.nome);
        let idade = req.idade.unwrap_or(existing.idade);

        let sql = format!(
            r#"
            WITH a AS (
                UPDATE atletas
                SET nome = $2,
                    idade = $3
                WHERE id = $1
                RETURNING *
            )
            SELECT {DETAIL_COLUMNS} FROM a {DETAIL_JOINS}
            "#
        );

        let athlete = sqlx::query_as::<_, AthleteDetail>(&sql)
            .bind(existing.id)
            .bind(nome)
            .bind(idade)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        Ok(athlete)
    }

    /// Delete an athlete by ID
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM atletas WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}

#[async_trait]
impl AthleteStore for Database {
    async fn insert_athlete(&self, athlete: &Athlete) -> Result<()> {
        AthleteRepository::new(self.pool()).create(athlete).await
    }

    async fn list_athletes(&self) -> Result<Vec<AthleteDetail>> {
        AthleteRepository::new(self.pool()).list().await
    }

    async fn find_athlete_by_id(&self, id: Uuid) -> Result<Option<AthleteDetail>> {
        AthleteRepository::new(self.pool()).find_by_id(id).await
    }

    async fn find_athlete_by_nome(&self, nome: &str) -> Result<Option<AthleteDetail>> {
        AthleteRepository::new(self.pool()).find_by_nome(nome).await
    }

    async fn find_athlete_by_cpf(&self, cpf: &str) -> Result<Option<AthleteDetail>> {
        AthleteRepository::new(self.pool()).find_by_cpf(cpf).await
    }

    async fn update_athlete(
        &self,
        existing: &AthleteDetail,
        changes: &UpdateAthleteRequest,
    ) -> Result<AthleteDetail> {
        AthleteRepository::new(self.pool())
            .update(existing, changes)
            .await
    }

    async fn delete_athlete(&self, id: Uuid) -> Result<()> {
        AthleteRepository::new(self.pool()).delete(id).await
    }
}
