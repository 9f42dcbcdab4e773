//! Module popularity aggregate.

use serde::{Deserialize, Serialize};

/// Number of tasks logged against one module code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ModulePopularity {
    /// Module (category) code.
    pub module_code: String,
    /// Number of tasks with this module code.
    pub count: u64,
}

impl ModulePopularity {
    #[must_use]
    pub fn new(module_code: impl Into<String>, count: u64) -> Self {
        Self {
            module_code: module_code.into(),
            count,
        }
    }
}

/// Orders aggregate rows most popular first, ties by module code.
pub fn rank_modules(rows: &mut [ModulePopularity]) {
    rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.module_code.cmp(&b.module_code)));
}
