use serde::{Deserialize, Serialize};

/// Row of the external `doctors` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoctorRecord {
    pub id: i32,
    pub name: String,
    pub specialization: String,
    pub hospital: String,
    pub email: String,
    pub phone: String,
}

/// Build the `LIKE` pattern for a case-insensitive substring match
pub fn specialization_pattern(query: &str) -> String {
    format!("%{}%", query.to_lowercase())
}
