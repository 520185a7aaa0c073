use serde::Serialize;

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    // Bcrypt hash; never serialized into responses.
    #[serde(skip_serializing)]
    pub password: String,
    pub role: String,
    pub status: String,
    pub employee_code: Option<String>,
    pub birthdate: Option<String>,
}

// Admin listing row: user plus a derived "currently clocked in" flag.
#[derive(Debug, sqlx::FromRow, Serialize)]
pub struct UserSummary {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    pub status: String,
    pub employee_code: Option<String>,
    pub birthdate: Option<String>,
    pub is_clocked_in: bool,
}
