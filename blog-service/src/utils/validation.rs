use axum::{
    Json,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use serde_json::json;
use validator::Validate;

/// Json extractor that runs `validator` rules before the handler sees the
/// payload. Parse and validation failures both map to 400 with the uniform
/// error envelope.
pub struct ValidatedJson<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + 'static,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|e| {
            envelope_error(StatusCode::BAD_REQUEST, format!("Json parse error: {}", e))
        })?;

        value.validate().map_err(|e| {
            envelope_error(StatusCode::BAD_REQUEST, format!("Validation error: {}", e))
        })?;

        Ok(ValidatedJson(value))
    }
}

fn envelope_error(status: StatusCode, message: String) -> Response {
    (status, Json(json!({ "success": false, "message": message }))).into_response()
}

/// Strip HTML tags, leaving only text content. Used to decide whether a
/// field is empty once markup is discounted.
pub fn strip_tags(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_tag = false;
    for c in input.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

/// True when the input holds no text after tag stripping and trimming.
pub fn is_blank_markup(input: &str) -> bool {
    strip_tags(input).trim().is_empty()
}
