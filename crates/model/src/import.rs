use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::ExampleData;

/// Outcome of one import run from `latlongdata` into posts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ImportStatistics {
    pub total_rows: u64,
    pub skipped_invalid: u64,
    pub skipped_outside_bbox: u64,
    pub updated: u64,
    pub created: u64,
}

impl ImportStatistics {
    pub fn skipped(&self) -> u64 {
        self.skipped_invalid + self.skipped_outside_bbox
    }
}

impl ExampleData for ImportStatistics {
    fn example_data() -> Self {
        Self {
            total_rows: 120,
            skipped_invalid: 3,
            skipped_outside_bbox: 2,
            updated: 10,
            created: 41,
        }
    }
}
