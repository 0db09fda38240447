use axum::{Router, routing::get};

use super::handlers::{
    create_athlete, delete_athlete, get_athlete, get_athlete_by_cpf, get_athlete_by_nome,
    list_athletes, update_athlete,
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_athletes).post(create_athlete))
        .route(
            "/:id",
            get(get_athlete).patch(update_athlete).delete(delete_athlete),
        )
        .route("/busca-por-nome/:nome", get(get_athlete_by_nome))
        .route("/busca-por-cpf/:cpf", get(get_athlete_by_cpf))
}
