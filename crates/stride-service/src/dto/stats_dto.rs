//! Aggregate statistics DTOs.

use serde::{Deserialize, Serialize};
use stride_core::ModulePopularity;
use utoipa::ToSchema;

/// Number of tasks logged against one module code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ModulePopularityResponse {
    pub module_code: String,
    pub count: u64,
}

impl From<ModulePopularity> for ModulePopularityResponse {
    fn from(popularity: ModulePopularity) -> Self {
        Self {
            module_code: popularity.module_code,
            count: popularity.count,
        }
    }
}
