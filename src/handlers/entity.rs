//! Person CRUD and search handlers. One set serves every entity; the router
//! state carries which table and which messages to use.

use crate::entity::{EntityDef, ID_ERROR};
use crate::error::AppError;
use crate::model::{Person, SearchRequest, SearchResult};
use crate::response::{failure, success};
use crate::state::EntityState;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, Path, State},
    response::Response,
};
use serde::de::DeserializeOwned;

fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::malformed(format!("invalid id '{raw}'")))
}

/// Raw request body. Extraction failures, such as exceeding the body limit,
/// reach the handler instead of short-circuiting with axum's own response.
type RawBody = Result<Bytes, BytesRejection>;

fn parse_body<T: DeserializeOwned>(body: RawBody) -> Result<T, AppError> {
    let bytes = body.map_err(|e| AppError::malformed(format!("unreadable body: {e}")))?;
    serde_json::from_slice(&bytes).map_err(|e| AppError::malformed(format!("invalid body: {e}")))
}

fn report(entity: &EntityDef, op: &'static str, err: &AppError) {
    match err {
        AppError::MalformedInput(_) => {
            tracing::warn!(entity = entity.name, op, kind = err.kind(), error = %err, "rejected request")
        }
        AppError::Service(_) => {
            tracing::error!(entity = entity.name, op, kind = err.kind(), error = %err, "request failed")
        }
    }
}

pub async fn list(State(state): State<EntityState>) -> Response {
    let entity = *state.service.entity();
    let ctx = state.policy.op_context();
    match state.service.list_all(&ctx).await {
        Ok(rows) => success(rows, entity.queried_message()),
        Err(e) => {
            report(&entity, "list", &AppError::from(e));
            failure(Option::<Vec<Person>>::None, entity.get_error_message())
        }
    }
}

pub async fn read(State(state): State<EntityState>, Path(raw_id): Path<String>) -> Response {
    let entity = *state.service.entity();
    let result = async {
        let id = parse_id(&raw_id)?;
        Ok::<_, AppError>(state.service.get(&state.policy.op_context(), id).await?)
    }
    .await;
    match result {
        Ok(person) => success(person, entity.queried_message()),
        Err(e) => {
            report(&entity, "read", &e);
            failure(Person::default(), entity.get_error_message())
        }
    }
}

pub async fn create(State(state): State<EntityState>, body: RawBody) -> Response {
    let entity = *state.service.entity();
    let result = async {
        let person: Person = parse_body(body)?;
        Ok::<_, AppError>(state.service.create(&state.policy.op_context(), person).await?)
    }
    .await;
    match result {
        Ok(person) => success(person, entity.created_message()),
        Err(e) => {
            report(&entity, "create", &e);
            failure(Person::default(), entity.get_error_message())
        }
    }
}

pub async fn update(State(state): State<EntityState>, body: RawBody) -> Response {
    let entity = *state.service.entity();
    let result = async {
        let person: Person = parse_body(body)?;
        Ok::<_, AppError>(state.service.update(&state.policy.op_context(), person).await?)
    }
    .await;
    match result {
        Ok(person) => success(person, entity.updated_message()),
        Err(e) => {
            report(&entity, "update", &e);
            failure(Person::default(), entity.get_error_message())
        }
    }
}

pub async fn delete(State(state): State<EntityState>, Path(raw_id): Path<String>) -> Response {
    let entity = *state.service.entity();
    let id = match parse_id(&raw_id) {
        Ok(id) => id,
        Err(e) => {
            report(&entity, "delete", &e);
            return failure(Person::default(), ID_ERROR);
        }
    };
    match state.service.delete(&state.policy.op_context(), id).await {
        Ok(person) => success(person, entity.deleted_message()),
        Err(e) => {
            report(&entity, "delete", &AppError::from(e));
            failure(Person::default(), entity.delete_error_message())
        }
    }
}

/// Search takes its criteria from the request body, even on GET.
pub async fn search(State(state): State<EntityState>, body: RawBody) -> Response {
    let entity = *state.service.entity();
    let result = async {
        let req: SearchRequest = parse_body(body)?;
        let found = state
            .service
            .search(&state.policy.op_context(), &req.search_string, req.pagination, req.sort_by)
            .await?;
        Ok::<_, AppError>(found)
    }
    .await;
    match result {
        Ok(found) => success(found, entity.queried_message()),
        Err(e) => {
            report(&entity, "search", &e);
            failure(SearchResult::default(), entity.get_error_message())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_must_be_integers() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert_eq!(parse_id(" 7 ").unwrap(), 7);
        assert!(matches!(parse_id("abc"), Err(AppError::MalformedInput(_))));
        assert!(matches!(parse_id(""), Err(AppError::MalformedInput(_))));
    }

    #[test]
    fn bodies_must_be_json() {
        let bad = Ok(Bytes::from_static(b"{not json"));
        assert!(matches!(parse_body::<Person>(bad), Err(AppError::MalformedInput(_))));
        let ok = Ok(Bytes::from_static(br#"{"firstname":"Lando","lastname":"Norris","year":2}"#));
        let p: Person = parse_body(ok).unwrap();
        assert_eq!(p, Person::new("Lando", "Norris", 2));
    }
}
