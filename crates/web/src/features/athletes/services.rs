use chrono::Utc;
use uuid::Uuid;
use workout_storage::{
    AthleteStore, CategoryStore, TrainingCenterStore,
    dto::{
        athlete::{AthleteListItem, AthleteResponse, CreateAthleteRequest, UpdateAthleteRequest},
        common::{LimitOffsetPage, LimitOffsetParams, paginate},
    },
    models::{Athlete, AthleteDetail},
};

use crate::error::{ApiResult, WebError};

const NOT_FOUND: &str = "Atleta não encontrado";
const NOT_FOUND_BY_NAME: &str = "Atleta não encontrado com o nome pesquisado";
const NOT_FOUND_BY_CPF: &str = "Atleta não encontrado com o CPF pesquisado";

/// Create a new athlete.
///
/// Category and training center are looked up by name and stored by id.
/// The cpf uniqueness check is left to the store so that concurrent
/// creations with the same cpf produce exactly one winner.
pub async fn create_athlete<S>(
    store: &S,
    request: CreateAthleteRequest,
) -> ApiResult<AthleteResponse>
where
    S: AthleteStore + CategoryStore + TrainingCenterStore + ?Sized,
{
    let categoria = store
        .find_category_by_nome(&request.categoria.nome)
        .await?
        .ok_or_else(|| {
            WebError::BadRequest(format!(
                "A categoria {} não foi encontrada",
                request.categoria.nome
            ))
        })?;

    let centro_treinamento = store
        .find_training_center_by_nome(&request.centro_treinamento.nome)
        .await?
        .ok_or_else(|| {
            WebError::BadRequest(format!(
                "O centro de treinamento {} não foi encontrado",
                request.centro_treinamento.nome
            ))
        })?;

    let response = AthleteResponse::from_request(Uuid::new_v4(), Utc::now().naive_utc(), request);

    let athlete = Athlete {
        id: response.id,
        created_at: response.created_at,
        nome: response.nome.clone(),
        cpf: response.cpf.clone(),
        idade: response.idade,
        peso: response.peso,
        altura: response.altura,
        sexo: response.sexo.clone(),
        categoria_id: categoria.id,
        centro_treinamento_id: centro_treinamento.id,
    };

    if let Err(e) = store.insert_athlete(&athlete).await {
        if e.is_unique_violation() {
            tracing::warn!(cpf = %athlete.cpf, "Athlete cpf already registered");
            return Err(WebError::SeeOther(format!(
                "Já existe atleta cadastrado com CPF {}",
                athlete.cpf
            )));
        }

        tracing::error!("Failed to insert athlete: {:?}", e);
        return Err(WebError::InternalServerError(
            "Erro ao cadastrar dados do atleta".to_string(),
        ));
    }

    tracing::info!(atleta_id = %athlete.id, "Athlete created");

    Ok(response)
}

/// List athletes one page at a time, each with its summary line
pub async fn list_athletes<S>(
    store: &S,
    params: &LimitOffsetParams,
) -> ApiResult<LimitOffsetPage<AthleteListItem>>
where
    S: AthleteStore + ?Sized,
{
    let athletes = store.list_athletes().await?;

    let items: Vec<AthleteListItem> = athletes.into_iter().map(AthleteListItem::from).collect();

    Ok(paginate(items, params))
}

pub async fn get_athlete<S>(store: &S, id: Uuid) -> ApiResult<AthleteResponse>
where
    S: AthleteStore + ?Sized,
{
    find_existing(store, id).await.map(AthleteResponse::from)
}

pub async fn get_athlete_by_nome<S>(store: &S, nome: &str) -> ApiResult<AthleteResponse>
where
    S: AthleteStore + ?Sized,
{
    store
        .find_athlete_by_nome(nome)
        .await?
        .map(AthleteResponse::from)
        .ok_or_else(|| WebError::NotFound(NOT_FOUND_BY_NAME.to_string()))
}

pub async fn get_athlete_by_cpf<S>(store: &S, cpf: &str) -> ApiResult<AthleteResponse>
where
    S: AthleteStore + ?Sized,
{
    store
        .find_athlete_by_cpf(cpf)
        .await?
        .map(AthleteResponse::from)
        .ok_or_else(|| WebError::NotFound(NOT_FOUND_BY_CPF.to_string()))
}

/// Update the fields present in `request`, leaving the others untouched
pub async fn update_athlete<S>(
    store: &S,
    id: Uuid,
    request: &UpdateAthleteRequest,
) -> ApiResult<AthleteResponse>
where
    S: AthleteStore + ?Sized,
{
    let existing = find_existing(store, id).await?;

    if request.is_empty() {
        return Ok(AthleteResponse::from(existing));
    }

    let updated = store.update_athlete(&existing, request).await?;

    Ok(AthleteResponse::from(updated))
}

pub async fn delete_athlete<S>(store: &S, id: Uuid) -> ApiResult<()>
where
    S: AthleteStore + ?Sized,
{
    let athlete = find_existing(store, id).await?;
    store.delete_athlete(athlete.id).await?;

    tracing::info!(atleta_id = %athlete.id, "Athlete deleted");

    Ok(())
}

async fn find_existing<S>(store: &S, id: Uuid) -> ApiResult<AthleteDetail>
where
    S: AthleteStore + ?Sized,
{
    store
        .find_athlete_by_id(id)
        .await?
        .ok_or_else(|| WebError::NotFound(NOT_FOUND.to_string()))
}
