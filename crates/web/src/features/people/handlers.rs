use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::{
        common::PagedResult,
        person::{CreatePersonRequest, PeopleFilter, PersonResponse},
    },
    models::Person,
};
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/people",
    params(PeopleFilter),
    responses(
        (status = 200, description = "People page retrieved successfully", body = PagedResult<PersonResponse>),
        (status = 400, description = "Invalid query parameters")
    ),
    tag = "people"
)]
pub async fn get_people(
    State(db): State<Database>,
    Query(filter): Query<PeopleFilter>,
) -> Result<Response, WebError> {
    let result = services::get_people(db.pool(), &filter).await?;

    Ok(Json(result).into_response())
}

#[utoipa::path(
    post,
    path = "/api/people",
    request_body = CreatePersonRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Person created successfully", body = PersonResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "A person with this id already exists")
    ),
    tag = "people"
)]
pub async fn create_person(
    State(db): State<Database>,
    Json(req): Json<CreatePersonRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let person = Person::from(req);
    services::add_person(db.pool(), &person).await?;

    Ok((StatusCode::CREATED, Json(PersonResponse::from(person))).into_response())
}
