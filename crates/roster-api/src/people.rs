//! Handlers for the person endpoints.
//!
//! | Method   | Path            | Notes |
//! |----------|-----------------|-------|
//! | `POST`   | `/create`       | Body: `{"name":..,"surname":..,"patronymic":..}`; 201 |
//! | `GET`    | `/select`       | `?id=` or `?filter=&value=`, optional `start`/`end` |
//! | `GET`    | `/select/{id}`  | 404 if not found |
//! | `PUT`    | `/update/{id}`  | Body: partial person; 204 |
//! | `DELETE` | `/delete/{id}`  | 204 |

use axum::{
  Json,
  body::Bytes,
  extract::{
    Path, Query, State,
    rejection::{JsonRejection, PathRejection, QueryRejection},
  },
  http::StatusCode,
  response::IntoResponse,
};
use roster_core::{
  enrich::Enricher,
  person::{Person, PersonId, PersonPatch},
  query::{Filter, Page, PersonQuery},
  store::PersonStore,
};
use serde::Deserialize;
use tracing::debug;

use crate::{AppState, error::ApiError};

// ─── Create ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub name:       String,
  pub surname:    String,
  #[serde(default)]
  pub patronymic: String,
}

/// `POST /create`
pub async fn create<S, E>(
  State(state): State<AppState<S, E>>,
  body: Result<Json<CreateBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: PersonStore,
  E: Enricher,
{
  let Json(body) = body?;
  if body.name.trim().is_empty() || body.surname.trim().is_empty() {
    return Err(ApiError::BadRequest("name and surname are required".into()));
  }

  let person = state
    .service
    .create(body.name.trim(), &body.surname, &body.patronymic)
    .await?;
  Ok((StatusCode::CREATED, Json(person)))
}

// ─── Select ──────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct SelectParams {
  pub id:     Option<PersonId>,
  pub filter: Option<String>,
  pub value:  Option<String>,
  pub start:  Option<u32>,
  pub end:    Option<u32>,
}

impl SelectParams {
  /// Resolve the raw query string into a [`PersonQuery`]. `path_id` is the
  /// `{id}` segment of `/select/{id}`, if any.
  pub fn into_query(
    self,
    path_id: Option<PersonId>,
    select_limit: u32,
  ) -> Result<PersonQuery, ApiError> {
    let page = Page::window(
      self.start.unwrap_or(0),
      self.end.unwrap_or(select_limit),
    )?;

    let id = match (path_id, self.id) {
      (Some(_), Some(_)) => {
        return Err(ApiError::BadRequest("id given both in the path and the query".into()));
      }
      (id, None) | (None, id) => id,
    };

    match (id, self.filter, self.value) {
      (Some(id), None, None) => Ok(PersonQuery::ById(id)),
      (Some(_), _, _) => Err(ApiError::BadRequest(
        "id and filter cannot be combined".into(),
      )),
      (None, Some(field), Some(value)) => {
        Ok(PersonQuery::Filtered { filter: Filter::parse(&field, &value)?, page })
      }
      (None, Some(_), None) | (None, None, Some(_)) => Err(ApiError::BadRequest(
        "filter and value must be given together".into(),
      )),
      (None, None, None) => Err(ApiError::BadRequest(
        "either id or filter is required".into(),
      )),
    }
  }
}

/// `GET /select?id=<id>` or `GET /select?filter=<field>&value=<value>`
pub async fn select<S, E>(
  State(state): State<AppState<S, E>>,
  params: Result<Query<SelectParams>, QueryRejection>,
) -> Result<Json<Vec<Person>>, ApiError>
where
  S: PersonStore,
  E: Enricher,
{
  let Query(params) = params?;
  run_select(&state, params, None).await
}

/// `GET /select/{id}`
pub async fn select_one<S, E>(
  State(state): State<AppState<S, E>>,
  id: Result<Path<PersonId>, PathRejection>,
  params: Result<Query<SelectParams>, QueryRejection>,
) -> Result<Json<Vec<Person>>, ApiError>
where
  S: PersonStore,
  E: Enricher,
{
  let Path(id) = id?;
  let Query(params) = params?;
  run_select(&state, params, Some(id)).await
}

async fn run_select<S, E>(
  state: &AppState<S, E>,
  params: SelectParams,
  path_id: Option<PersonId>,
) -> Result<Json<Vec<Person>>, ApiError>
where
  S: PersonStore,
  E: Enricher,
{
  let query = params.into_query(path_id, state.select_limit)?;
  debug!(?query, "select request");
  Ok(Json(state.service.select(query).await?))
}

// ─── Update ──────────────────────────────────────────────────────────────────

/// `PUT /update/{id}`
pub async fn update<S, E>(
  State(state): State<AppState<S, E>>,
  id: Result<Path<PersonId>, PathRejection>,
  body: Bytes,
) -> Result<StatusCode, ApiError>
where
  S: PersonStore,
  E: Enricher,
{
  let Path(id) = id?;
  let patch = PersonPatch::from_slice(&body)?;
  state.service.update_by_id(id, patch).await?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── Delete ──────────────────────────────────────────────────────────────────

/// `DELETE /delete/{id}`
pub async fn delete<S, E>(
  State(state): State<AppState<S, E>>,
  id: Result<Path<PersonId>, PathRejection>,
) -> Result<StatusCode, ApiError>
where
  S: PersonStore,
  E: Enricher,
{
  let Path(id) = id?;
  state.service.delete_by_id(id).await?;
  Ok(StatusCode::NO_CONTENT)
}
