use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::AthleteDetail;

/// Category referenced by name from an athlete payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CategoryRef {
    #[validate(length(min = 1, max = 10))]
    #[schema(example = "Scale")]
    pub nome: String,
}

/// Training center referenced by name from an athlete payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct TrainingCenterRef {
    #[validate(length(min = 1, max = 20))]
    #[schema(example = "CT King")]
    pub nome: String,
}

/// Request payload for creating a new athlete
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct CreateAthleteRequest {
    #[validate(length(
        min = 1,
        max = 500,
        message = "nome must be between 1 and 500 characters"
    ))]
    #[schema(example = "João")]
    pub nome: String,

    #[validate(length(
        min = 1,
        max = 11,
        message = "cpf must be between 1 and 11 characters"
    ))]
    #[schema(example = "01234567890")]
    pub cpf: String,

    #[schema(example = 34)]
    pub idade: i32,

    #[validate(range(exclusive_min = 0.0, message = "peso must be positive"))]
    #[schema(example = 80.5)]
    pub peso: f64,

    #[validate(range(exclusive_min = 0.0, message = "altura must be positive"))]
    #[schema(example = 1.8)]
    pub altura: f64,

    #[validate(length(equal = 1, message = "sexo must be a single character"))]
    #[schema(example = "M")]
    pub sexo: String,

    #[validate(nested)]
    pub categoria: CategoryRef,

    #[validate(nested)]
    pub centro_treinamento: TrainingCenterRef,
}

/// Request payload for a partial athlete update.
///
/// Only fields present in the payload are applied.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateAthleteRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, max = 500))]
    pub nome: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idade: Option<i32>,
}

impl UpdateAthleteRequest {
    pub fn is_empty(&self) -> bool {
        self.nome.is_none() && self.idade.is_none()
    }
}

/// Athlete as returned by create, lookup and update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AthleteResponse {
    pub id: Uuid,
    pub created_at: NaiveDateTime,
    pub nome: String,
    pub cpf: String,
    pub idade: i32,
    pub peso: f64,
    pub altura: f64,
    pub sexo: String,
    pub categoria: CategoryRef,
    pub centro_treinamento: TrainingCenterRef,
}

impl AthleteResponse {
    pub fn from_request(id: Uuid, created_at: NaiveDateTime, req: CreateAthleteRequest) -> Self {
        Self {
            id,
            created_at,
            nome: req.nome,
            cpf: req.cpf,
            idade: req.idade,
            peso: req.peso,
            altura: req.altura,
            sexo: req.sexo,
            categoria: req.categoria,
            centro_treinamento: req.centro_treinamento,
        }
    }
}

impl From<AthleteDetail> for AthleteResponse {
    fn from(athlete: AthleteDetail) -> Self {
        Self {
            id: athlete.id,
            created_at: athlete.created_at,
            nome: athlete.nome,
            cpf: athlete.cpf,
            idade: athlete.idade,
            peso: athlete.peso,
            altura: athlete.altura,
            sexo: athlete.sexo,
            categoria: CategoryRef {
                nome: athlete.categoria_nome,
            },
            centro_treinamento: TrainingCenterRef {
                nome: athlete.centro_treinamento_nome,
            },
        }
    }
}

/// Athlete as returned by the listing endpoint, with its summary line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AthleteListItem {
    #[serde(flatten)]
    pub athlete: AthleteResponse,
    pub resumo: String,
}

impl From<AthleteDetail> for AthleteListItem {
    fn from(athlete: AthleteDetail) -> Self {
        let resumo = summary(
            &athlete.nome,
            &athlete.categoria_nome,
            &athlete.centro_treinamento_nome,
        );

        Self {
            athlete: AthleteResponse::from(athlete),
            resumo,
        }
    }
}

pub fn summary(nome: &str, categoria: &str, centro_treinamento: &str) -> String {
    format!("{nome} pratica {categoria} no centro de treinamento {centro_treinamento}.")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_payload() -> serde_json::Value {
        serde_json::json!({
            "nome": "João",
            "cpf": "01234567890",
            "idade": 34,
            "peso": 80.5,
            "altura": 1.8,
            "sexo": "M",
            "categoria": { "nome": "Scale" },
            "centro_treinamento": { "nome": "CT King" }
        })
    }

    fn parse(value: serde_json::Value) -> Result<CreateAthleteRequest, serde_json::Error> {
        serde_json::from_value(value)
    }

    #[test]
    fn valid_payload_passes() {
        let req = parse(valid_payload()).unwrap();
        assert!(req.validate().is_ok());
    }

    #[test]
    fn unknown_top_level_field_is_rejected() {
        let mut payload = valid_payload();
        payload["apelido"] = serde_json::json!("Jo");
        assert!(parse(payload).is_err());
    }

    #[test]
    fn unknown_nested_field_is_rejected() {
        let mut payload = valid_payload();
        payload["categoria"]["id"] = serde_json::json!("abc");
        assert!(parse(payload).is_err());
    }

    #[test]
    fn non_positive_measures_fail() {
        let mut payload = valid_payload();
        payload["peso"] = serde_json::json!(0.0);
        payload["altura"] = serde_json::json!(-1.7);
        let errors = parse(payload).unwrap().validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("peso"));
        assert!(fields.contains_key("altura"));
    }

    #[test]
    fn sexo_must_be_one_character() {
        let mut payload = valid_payload();
        payload["sexo"] = serde_json::json!("MF");
        assert!(parse(payload).unwrap().validate().is_err());
    }

    #[test]
    fn oversized_cpf_fails() {
        let mut payload = valid_payload();
        payload["cpf"] = serde_json::json!("012345678901");
        let errors = parse(payload).unwrap().validate().unwrap_err();
        assert!(errors.field_errors().contains_key("cpf"));
    }

    #[test]
    fn nested_reference_is_validated() {
        let mut payload = valid_payload();
        payload["categoria"]["nome"] = serde_json::json!("Muito longa demais");
        assert!(parse(payload).unwrap().validate().is_err());
    }

    #[test]
    fn update_distinguishes_absent_from_zero() {
        let absent: UpdateAthleteRequest = serde_json::from_str(r#"{"nome": "Maria"}"#).unwrap();
        assert_eq!(absent.nome.as_deref(), Some("Maria"));
        assert_eq!(absent.idade, None);

        let zero: UpdateAthleteRequest = serde_json::from_str(r#"{"idade": 0}"#).unwrap();
        assert_eq!(zero.idade, Some(0));
        assert_eq!(zero.nome, None);
    }

    #[test]
    fn update_rejects_fields_outside_its_schema() {
        let result: Result<UpdateAthleteRequest, _> =
            serde_json::from_str(r#"{"cpf": "99999999999"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn list_item_carries_summary_and_flattens() {
        let detail = AthleteDetail {
            id: Uuid::new_v4(),
            created_at: chrono::Utc::now().naive_utc(),
            nome: "Ana".to_string(),
            cpf: "123".to_string(),
            idade: 28,
            peso: 60.0,
            altura: 1.65,
            sexo: "F".to_string(),
            categoria_id: Uuid::new_v4(),
            categoria_nome: "RX".to_string(),
            centro_treinamento_id: Uuid::new_v4(),
            centro_treinamento_nome: "CT King".to_string(),
        };

        let item = AthleteListItem::from(detail);
        assert_eq!(item.resumo, "Ana pratica RX no centro de treinamento CT King.");

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["nome"], "Ana");
        assert_eq!(json["categoria"]["nome"], "RX");
        assert_eq!(json["resumo"], item.resumo);
    }
}
