//! Person API handlers
//!
//! Contains HTTP request handlers for person CRUD operations. Every handler
//! forwards to the person store; the only decision made here is whether an
//! id exists.

use crate::error::AppError;
use crate::person::{Person, PersonId};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::{debug, info};

/// GET /api/persons - List all persons
pub async fn list_persons(State(state): State<AppState>) -> Result<Json<Vec<Person>>, AppError> {
    let persons = state.persons.find_all().await?;
    debug!(count = persons.len(), "Listed persons");
    Ok(Json(persons))
}

/// GET /api/persons/:id - Get a specific person
pub async fn get_person(
    State(state): State<AppState>,
    Path(id): Path<PersonId>,
) -> Result<Json<Person>, AppError> {
    match state.persons.find_by_id(id).await? {
        Some(person) => Ok(Json(person)),
        None => Err(AppError::PersonNotFound(id)),
    }
}

/// POST /api/persons - Create a new person
pub async fn create_person(
    State(state): State<AppState>,
    Json(person): Json<Person>,
) -> Result<Json<Person>, AppError> {
    let saved = state.persons.save(person).await?;
    info!(person_id = ?saved.id, "Created person");
    Ok(Json(saved))
}

/// PUT /api/persons/:id - Replace a person
///
/// The path id always wins over any id in the body. Existence is checked
/// before saving, without a transaction around the two calls.
pub async fn update_person(
    State(state): State<AppState>,
    Path(id): Path<PersonId>,
    Json(person): Json<Person>,
) -> Result<Json<Person>, AppError> {
    match state.persons.find_by_id(id).await? {
        Some(_) => {
            let saved = state.persons.save(person.with_id(id)).await?;
            info!(person_id = id, "Updated person");
            Ok(Json(saved))
        }
        None => Err(AppError::PersonNotFound(id)),
    }
}

/// DELETE /api/persons/:id - Delete a person
pub async fn delete_person(
    State(state): State<AppState>,
    Path(id): Path<PersonId>,
) -> Result<StatusCode, AppError> {
    match state.persons.find_by_id(id).await? {
        Some(_) => {
            state.persons.delete_by_id(id).await?;
            info!(person_id = id, "Deleted person");
            Ok(StatusCode::OK)
        }
        None => Err(AppError::PersonNotFound(id)),
    }
}
