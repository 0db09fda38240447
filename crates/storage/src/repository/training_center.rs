use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::TrainingCenterStore;
use crate::Database;
use crate::error::Result;
use crate::models::TrainingCenter;

/// Repository for TrainingCenter database operations
pub struct TrainingCenterRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> TrainingCenterRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<TrainingCenter>> {
        let centers = sqlx::query_as::<_, TrainingCenter>(
            "SELECT id, nome, endereco, proprietario FROM centros_treinamento",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(centers)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<TrainingCenter>> {
        let center = sqlx::query_as::<_, TrainingCenter>(
            r#"
            SELECT id, nome, endereco, proprietario
            FROM centros_treinamento
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(center)
    }

    pub async fn find_by_nome(&self, nome: &str) -> Result<Option<TrainingCenter>> {
        let center = sqlx::query_as::<_, TrainingCenter>(
            r#"
            SELECT id, nome, endereco, proprietario
            FROM centros_treinamento
            WHERE nome = $1
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(nome)
        .fetch_optional(self.pool)
        .await?;

        Ok(center)
    }

    pub async fn create(&self, center: &TrainingCenter) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO centros_treinamento (id, nome, endereco, proprietario)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(center.id)
        .bind(&center.nome)
        .bind(&center.endereco)
        .bind(&center.proprietario)
        .execute(self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl TrainingCenterStore for Database {
    async fn insert_training_center(&self, center: &TrainingCenter) -> Result<()> {
        TrainingCenterRepository::new(self.pool()).create(center).await
    }

    async fn list_training_centers(&self) -> Result<Vec<TrainingCenter>> {
        TrainingCenterRepository::new(self.pool()).list().await
    }

    async fn find_training_center_by_id(&self, id: Uuid) -> Result<Option<TrainingCenter>> {
        TrainingCenterRepository::new(self.pool()).find_by_id(id).await
    }

    async fn find_training_center_by_nome(&self, nome: &str) -> Result<Option<TrainingCenter>> {
        TrainingCenterRepository::new(self.pool()).find_by_nome(nome).await
    }
}
