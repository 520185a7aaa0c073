use serde::Deserialize;

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
    pub status: Option<String>,
    pub employee_code: Option<String>,
    pub birthdate: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateUserRequest {
    pub name: String,
    pub email: String,
    pub password: Option<String>,
    pub role: Option<String>,
    pub status: Option<String>,
    pub employee_code: Option<String>,
    pub birthdate: Option<String>,
}
