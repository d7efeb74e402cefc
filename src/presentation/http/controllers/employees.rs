// src/presentation/http/controllers/employees.rs
use crate::application::{
    dto::{DirectoryStatsDto, EmployeeDto},
    queries::directory::ListEmployeesQuery,
};
use crate::presentation::http::error::{ErrorResponse, HttpResult, IntoHttpResult};
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Path, Query},
};
use serde::Deserialize;
use utoipa::IntoParams;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListEmployeesParams {
    /// Free-text match over name, email, department and location.
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/v1/employees",
    params(ListEmployeesParams),
    responses(
        (status = 200, description = "Roster in directory order.", body = [EmployeeDto])
    ),
    tag = "Directory"
)]
pub async fn list_employees(
    Extension(state): Extension<HttpState>,
    Query(params): Query<ListEmployeesParams>,
) -> HttpResult<Json<Vec<EmployeeDto>>> {
    let query = ListEmployeesQuery {
        q: params.q,
        location: params.location,
        department: params.department,
    };
    state
        .services
        .directory_queries
        .list_employees(query)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/employees/stats",
    responses(
        (status = 200, description = "Headcount per location and department.", body = DirectoryStatsDto)
    ),
    tag = "Directory"
)]
pub async fn directory_stats(
    Extension(state): Extension<HttpState>,
) -> HttpResult<Json<DirectoryStatsDto>> {
    state
        .services
        .directory_queries
        .stats()
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/employees/{id}",
    params(("id" = String, Path, description = "Employee identifier")),
    responses(
        (status = 200, body = EmployeeDto),
        (status = 404, body = ErrorResponse)
    ),
    tag = "Directory"
)]
pub async fn get_employee(
    Extension(state): Extension<HttpState>,
    Path(id): Path<String>,
) -> HttpResult<Json<EmployeeDto>> {
    state
        .services
        .directory_queries
        .get_employee(&id)
        .await
        .into_http()
        .map(Json)
}
