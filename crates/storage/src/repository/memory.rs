//! In-process store for local runs and tests.
//!
//! Rows live in insertion order behind a single `RwLock`. Every operation
//! takes the lock once and releases it before returning, so the cpf check
//! and the insert of an athlete happen atomically.

use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use super::{AthleteStore, CategoryStore, TrainingCenterStore};
use crate::dto::athlete::UpdateAthleteRequest;
use crate::error::{Result, StorageError};
use crate::models::{Athlete, AthleteDetail, Category, TrainingCenter};

#[derive(Debug, Default)]
struct Tables {
    categories: Vec<Category>,
    training_centers: Vec<TrainingCenter>,
    athletes: Vec<Athlete>,
}

impl Tables {
    fn detail(&self, athlete: &Athlete) -> Option<AthleteDetail> {
        let category = self
            .categories
            .iter()
            .find(|c| c.id == athlete.categoria_id)?;
        let center = self
            .training_centers
            .iter()
            .find(|c| c.id == athlete.centro_treinamento_id)?;

        Some(AthleteDetail {
            id: athlete.id,
            created_at: athlete.created_at,
            nome: athlete.nome.clone(),
            cpf: athlete.cpf.clone(),
            idade: athlete.idade,
            peso: athlete.peso,
            altura: athlete.altura,
            sexo: athlete.sexo.clone(),
            categoria_id: category.id,
            categoria_nome: category.nome.clone(),
            centro_treinamento_id: center.id,
            centro_treinamento_nome: center.nome.clone(),
        })
    }

    fn find_detail(&self, pred: impl Fn(&Athlete) -> bool) -> Option<AthleteDetail> {
        self.athletes
            .iter()
            .find(|a| pred(a))
            .and_then(|a| self.detail(a))
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CategoryStore for MemoryStore {
    async fn insert_category(&self, category: &Category) -> Result<()> {
        let mut tables = self.tables.write();
        if tables.categories.iter().any(|c| c.id == category.id) {
            return Err(StorageError::UniqueViolation("categorias_pkey".to_string()));
        }
        tables.categories.push(category.clone());
        Ok(())
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        Ok(self.tables.read().categories.clone())
    }

    async fn find_category_by_id(&self, id: Uuid) -> Result<Option<Category>> {
        let tables = self.tables.read();
        Ok(tables.categories.iter().find(|c| c.id == id).cloned())
    }

    async fn find_category_by_nome(&self, nome: &str) -> Result<Option<Category>> {
        let tables = self.tables.read();
        Ok(tables.categories.iter().find(|c| c.nome == nome).cloned())
    }
}

#[async_trait]
impl TrainingCenterStore for MemoryStore {
    async fn insert_training_center(&self, center: &TrainingCenter) -> Result<()> {
        let mut tables = self.tables.write();
        if tables.training_centers.iter().any(|c| c.id == center.id) {
            return Err(StorageError::UniqueViolation(
                "centros_treinamento_pkey".to_string(),
            ));
        }
        tables.training_centers.push(center.clone());
        Ok(())
    }

    async fn list_training_centers(&self) -> Result<Vec<TrainingCenter>> {
        Ok(self.tables.read().training_centers.clone())
    }

    async fn find_training_center_by_id(&self, id: Uuid) -> Result<Option<TrainingCenter>> {
        let tables = self.tables.read();
        Ok(tables.training_centers.iter().find(|c| c.id == id).cloned())
    }

    async fn find_training_center_by_nome(&self, nome: &str) -> Result<Option<TrainingCenter>> {
        let tables = self.tables.read();
        Ok(tables
            .training_centers
            .iter()
            .find(|c| c.nome == nome)
            .cloned())
    }
}

#[async_trait]
impl AthleteStore for MemoryStore {
    async fn insert_athlete(&self, athlete: &Athlete) -> Result<()> {
        let mut tables = self.tables.write();

        if tables.athletes.iter().any(|a| a.id == athlete.id) {
            return Err(StorageError::UniqueViolation("atletas_pkey".to_string()));
        }
        if tables.athletes.iter().any(|a| a.cpf == athlete.cpf) {
            return Err(StorageError::UniqueViolation("atletas_cpf_key".to_string()));
        }
        if !tables.categories.iter().any(|c| c.id == athlete.categoria_id) {
            return Err(StorageError::ConstraintViolation(
                "atletas_categoria_id_fkey".to_string(),
            ));
        }
        if !tables
            .training_centers
            .iter()
            .any(|c| c.id == athlete.centro_treinamento_id)
        {
            return Err(StorageError::ConstraintViolation(
                "atletas_centro_treinamento_id_fkey".to_string(),
            ));
        }

        tables.athletes.push(athlete.clone());
        Ok(())
    }

    async fn list_athletes(&self) -> Result<Vec<AthleteDetail>> {
        let tables = self.tables.read();
        Ok(tables
            .athletes
            .iter()
            .filter_map(|a| tables.detail(a))
            .collect())
    }

    async fn find_athlete_by_id(&self, id: Uuid) -> Result<Option<AthleteDetail>> {
        Ok(self.tables.read().find_detail(|a| a.id == id))
    }

    async fn find_athlete_by_nome(&self, nome: &str) -> Result<Option<AthleteDetail>> {
        Ok(self.tables.read().find_detail(|a| a.nome == nome))
    }

    async fn find_athlete_by_cpf(&self, cpf: &str) -> Result<Option<AthleteDetail>> {
        Ok(self.tables.read().find_detail(|a| a.cpf == cpf))
    }

    async fn update_athlete(
        &self,
        existing: &AthleteDetail,
        changes: &UpdateAthleteRequest,
    ) -> Result<AthleteDetail> {
        let mut tables = self.tables.write();

        let athlete = tables
            .athletes
            .iter_mut()
            .find(|a| a.id == existing.id)
            .ok_or(StorageError::NotFound)?;

        if let Some(nome) = &changes.nome {
            athlete.nome = nome.clone();
        }
        if let Some(idade) = changes.idade {
            athlete.idade = idade;
        }

        let updated = athlete.clone();
        tables.detail(&updated).ok_or(StorageError::NotFound)
    }

    async fn delete_athlete(&self, id: Uuid) -> Result<()> {
        let mut tables = self.tables.write();
        let before = tables.athletes.len();
        tables.athletes.retain(|a| a.id != id);

        if tables.athletes.len() == before {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
