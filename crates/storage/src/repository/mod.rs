//! Data access for the three resources.
//!
//! Each resource has a store trait. `Database` implements all of them on
//! top of PostgreSQL through the `*Repository` types, and `MemoryStore`
//! keeps everything in process for local runs and tests.

use async_trait::async_trait;
use uuid::Uuid;

use crate::dto::athlete::UpdateAthleteRequest;
use crate::error::Result;
use crate::models::{Athlete, AthleteDetail, Category, TrainingCenter};

pub mod athlete;
pub mod category;
pub mod memory;
pub mod training_center;

#[async_trait]
pub trait CategoryStore: Send + Sync {
    async fn insert_category(&self, category: &Category) -> Result<()>;

    async fn list_categories(&self) -> Result<Vec<Category>>;

    async fn find_category_by_id(&self, id: Uuid) -> Result<Option<Category>>;

    /// Exact match on `nome`. Names are not unique, so stores must pick the
    /// same match every time: PostgreSQL takes the lowest id, `MemoryStore`
    /// the first inserted.
    async fn find_category_by_nome(&self, nome: &str) -> Result<Option<Category>>;
}

#[async_trait]
pub trait TrainingCenterStore: Send + Sync {
    async fn insert_training_center(&self, center: &TrainingCenter) -> Result<()>;

    async fn list_training_centers(&self) -> Result<Vec<TrainingCenter>>;

    async fn find_training_center_by_id(&self, id: Uuid) -> Result<Option<TrainingCenter>>;

    /// Exact match on `nome`, picked the same way as categories.
    async fn find_training_center_by_nome(&self, nome: &str) -> Result<Option<TrainingCenter>>;
}

#[async_trait]
pub trait AthleteStore: Send + Sync {
    /// Fails with a unique violation when the cpf is already taken.
    async fn insert_athlete(&self, athlete: &Athlete) -> Result<()>;

    async fn list_athletes(&self) -> Result<Vec<AthleteDetail>>;

    async fn find_athlete_by_id(&self, id: Uuid) -> Result<Option<AthleteDetail>>;

    async fn find_athlete_by_nome(&self, nome: &str) -> Result<Option<AthleteDetail>>;

    async fn find_athlete_by_cpf(&self, cpf: &str) -> Result<Option<AthleteDetail>>;

    /// Applies the fields present in `changes` and returns the stored row.
    async fn update_athlete(
        &self,
        existing: &AthleteDetail,
        changes: &UpdateAthleteRequest,
    ) -> Result<AthleteDetail>;

    async fn delete_athlete(&self, id: Uuid) -> Result<()>;
}

/// Everything the web layer needs from persistence.
pub trait GymStore: CategoryStore + TrainingCenterStore + AthleteStore {}

impl<T> GymStore for T where T: CategoryStore + TrainingCenterStore + AthleteStore {}
