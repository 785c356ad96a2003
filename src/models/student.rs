use serde::{Deserialize, Serialize};

/// One roster entry, loaded read-only from the roster CSV.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub name: String,
    #[serde(default)]
    pub id: String,
}
