use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

pub const MAX_LIMIT: u64 = 100;

#[derive(Debug, Clone, Copy, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct LimitOffsetParams {
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default)]
    pub offset: u64,
}

fn default_limit() -> u64 {
    50
}

impl Default for LimitOffsetParams {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            offset: 0,
        }
    }
}

impl LimitOffsetParams {
    pub fn new(limit: u64, offset: u64) -> Self {
        Self { limit, offset }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.limit < 1 || self.limit > MAX_LIMIT {
            return Err(format!("limit must be between 1 and {}", MAX_LIMIT));
        }
        Ok(())
    }
}

/// One window of a result set plus the size of the whole set.
#[derive(Debug, Serialize, ToSchema)]
pub struct LimitOffsetPage<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
}

/// Cuts a fully materialized result set down to the requested window.
pub fn paginate<T>(items: Vec<T>, params: &LimitOffsetParams) -> LimitOffsetPage<T> {
    let total = items.len() as u64;
    let offset = usize::try_from(params.offset).unwrap_or(usize::MAX);
    let limit = usize::try_from(params.limit).unwrap_or(usize::MAX);

    let items = items.into_iter().skip(offset).take(limit).collect();

    LimitOffsetPage {
        items,
        total,
        limit: params.limit,
        offset: params.offset,
    }
}
