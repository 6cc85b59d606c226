use serde::{Deserialize, Serialize};

/// Directory entry for a service provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Advocate {
    pub id: String,
    pub name: String,
    pub specialty: String,
    pub rating: f64,
    pub bio: String,
}
