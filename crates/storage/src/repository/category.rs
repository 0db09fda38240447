use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::CategoryStore;
use crate::Database;
use crate::error::Result;
use crate::models::Category;

/// Repository for Category database operations
pub struct CategoryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CategoryRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all categories
    pub async fn list(&self) -> Result<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>("SELECT id, nome FROM categorias")
            .fetch_all(self.pool)
            .await?;

        Ok(categories)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>> {
        let category =
            sqlx::query_as::<_, Category>("SELECT id, nome FROM categorias WHERE id = $1")
                .bind(id)
                .fetch_optional(self.pool)
                .await?;

        Ok(category)
    }

    pub async fn find_by_nome(&self, nome: &str) -> Result<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, nome FROM categorias WHERE nome = $1 ORDER BY id LIMIT 1",
        )
        .bind(nome)
        .fetch_optional(self.pool)
        .await?;

        Ok(category)
    }

    /// Insert a new category
    pub async fn create(&self, category: &Category) -> Result<()> {
        sqlx::query("INSERT INTO categorias (id, nome) VALUES ($1, $2)")
            .bind(category.id)
            .bind(&category.nome)
            .execute(self.pool)
            .await?;

        Ok(())
    }
}

#[async_trait]
impl CategoryStore for Database {
    async fn insert_category(&self, category: &Category) -> Result<()> {
        CategoryRepository::new(self.pool()).create(category).await
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        CategoryRepository::new(self.pool()).list().await
    }

    async fn find_category_by_id(&self, id: Uuid) -> Result<Option<Category>> {
        CategoryRepository::new(self.pool()).find_by_id(id).await
    }

    async fn find_category_by_nome(&self, nome: &str) -> Result<Option<Category>> {
        CategoryRepository::new(self.pool()).find_by_nome(nome).await
    }
}
