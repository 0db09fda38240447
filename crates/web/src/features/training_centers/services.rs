use uuid::Uuid;
use workout_storage::{
    TrainingCenterStore,
    dto::training_center::{CreateTrainingCenterRequest, TrainingCenterResponse},
    models::TrainingCenter,
};

use crate::error::{ApiResult, WebError};

/// Create a new training center
pub async fn create_training_center<S>(
    store: &S,
    request: CreateTrainingCenterRequest,
) -> ApiResult<TrainingCenterResponse>
where
    S: TrainingCenterStore + ?Sized,
{
    let center = TrainingCenter {
        id: Uuid::new_v4(),
        nome: request.nome,
        endereco: request.endereco,
        proprietario: request.proprietario,
    };

    store.insert_training_center(&center).await?;
    tracing::info!(centro_treinamento_id = %center.id, "Training center created");

    Ok(TrainingCenterResponse::from(center))
}

/// List all training centers
pub async fn list_training_centers<S>(store: &S) -> ApiResult<Vec<TrainingCenterResponse>>
where
    S: TrainingCenterStore + ?Sized,
{
    let centers = store.list_training_centers().await?;

    Ok(centers.into_iter().map(TrainingCenterResponse::from).collect())
}

/// Get training center by id
pub async fn get_training_center<S>(store: &S, id: Uuid) -> ApiResult<TrainingCenterResponse>
where
    S: TrainingCenterStore + ?Sized,
{
    store
        .find_training_center_by_id(id)
        .await?
        .map(TrainingCenterResponse::from)
        .ok_or_else(|| WebError::NotFound("Centro de treinamento não encontrado".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use workout_storage::MemoryStore;

    #[tokio::test]
    async fn create_then_get() {
        let store = MemoryStore::new();

        let created = create_training_center(
            &store,
            CreateTrainingCenterRequest {
                nome: "CT King".to_string(),
                endereco: "Rua das Botas".to_string(),
                proprietario: "José".to_string(),
            },
        )
        .await
        .unwrap();

        let fetched = get_training_center(&store, created.id).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(list_training_centers(&store).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let store = MemoryStore::new();

        let err = get_training_center(&store, Uuid::new_v4())
            .await
            .unwrap_err();

        assert!(
            matches!(err, WebError::NotFound(msg) if msg == "Centro de treinamento não encontrado")
        );
    }
}
