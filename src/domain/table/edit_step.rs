use serde::{Deserialize, Serialize};

/// One interactive editor action, replayed in order on a loaded table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditStep {
    Select { columns: Vec<String> },
    Rename { from: String, to: String },
    Filter { column: String, value: String },
}
