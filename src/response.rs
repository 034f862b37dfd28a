//! Standard response envelope: `{status, data, message}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Status {
    Success,
    Error,
}

#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub status: Status,
    pub data: T,
    pub message: String,
}

/// HTTP 200 with a success envelope.
pub fn success<T: Serialize>(data: T, message: impl Into<String>) -> Response {
    (
        StatusCode::OK,
        Json(Envelope {
            status: Status::Success,
            data,
            message: message.into(),
        }),
    )
        .into_response()
}

/// HTTP 500 with an error envelope. Every failure uses this status, whatever its kind.
pub fn failure<T: Serialize>(data: T, message: impl Into<String>) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(Envelope {
            status: Status::Error,
            data,
            message: message.into(),
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Person;

    #[test]
    fn envelope_field_order() {
        let env = Envelope {
            status: Status::Success,
            data: Person::new("Charles", "Leclerc", 3).with_id(1),
            message: "Student Created Successfully".into(),
        };
        assert_eq!(
            serde_json::to_string(&env).unwrap(),
            r#"{"status":"Success","data":{"id":1,"firstname":"Charles","lastname":"Leclerc","year":3},"message":"Student Created Successfully"}"#
        );
    }

    #[test]
    fn failure_is_500_with_json() {
        let resp = failure(Option::<Vec<Person>>::None, "Error Getting Students ");
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            resp.headers().get(axum::http::header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert_eq!(success((), "ok").status(), StatusCode::OK);
    }
}
