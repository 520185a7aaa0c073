use serde::Deserialize;

#[derive(Deserialize)]
pub struct CreateTaskRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateTaskRequest {
    pub name: String,
    pub description: Option<String>,
    pub status: String,
}
