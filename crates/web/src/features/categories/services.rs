use uuid::Uuid;
use workout_storage::{
    CategoryStore,
    dto::category::{CategoryResponse, CreateCategoryRequest},
    models::Category,
};

use crate::error::{ApiResult, WebError};

/// Create a new category
pub async fn create_category<S>(
    store: &S,
    request: CreateCategoryRequest,
) -> ApiResult<CategoryResponse>
where
    S: CategoryStore + ?Sized,
{
    let category = Category {
        id: Uuid::new_v4(),
        nome: request.nome,
    };

    store.insert_category(&category).await?;
    tracing::info!(categoria_id = %category.id, "Category created");

    Ok(CategoryResponse::from(category))
}

/// List all categories
pub async fn list_categories<S>(store: &S) -> ApiResult<Vec<CategoryResponse>>
where
    S: CategoryStore + ?Sized,
{
    let categories = store.list_categories().await?;

    Ok(categories.into_iter().map(CategoryResponse::from).collect())
}

/// Get category by id
pub async fn get_category<S>(store: &S, id: Uuid) -> ApiResult<CategoryResponse>
where
    S: CategoryStore + ?Sized,
{
    store
        .find_category_by_id(id)
        .await?
        .map(CategoryResponse::from)
        .ok_or_else(|| WebError::NotFound("Categoria não encontrada".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use workout_storage::MemoryStore;

    #[tokio::test]
    async fn created_category_round_trips() {
        let store = MemoryStore::new();

        let created = create_category(
            &store,
            CreateCategoryRequest {
                nome: "CrossFit".to_string(),
            },
        )
        .await
        .unwrap();
        let fetched = get_category(&store, created.id).await.unwrap();

        assert_eq!(created, fetched);
        assert_eq!(list_categories(&store).await.unwrap(), vec![created]);
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let store = MemoryStore::new();

        let err = get_category(&store, Uuid::new_v4()).await.unwrap_err();

        assert!(matches!(err, WebError::NotFound(msg) if msg == "Categoria não encontrada"));
    }
}
