use axum::extract::{Request, State};
use axum::http::{HeaderMap, HeaderValue, Method, header};
use axum::middleware::Next;
use axum::response::Response;
use rapid_console_core::AppError;
use url::Url;

use crate::error::ApiResult;
use crate::state::AppState;

pub async fn require_same_origin_for_mutations(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    if is_state_changing_method(request.method()) {
        check_same_origin(request.headers(), &state.frontend_url)?;
    }

    Ok(next.run(request).await)
}

fn check_same_origin(headers: &HeaderMap, allowed_origin: &str) -> Result<(), AppError> {
    if headers.get("sec-fetch-site") == Some(&HeaderValue::from_static("cross-site")) {
        return Err(AppError::Forbidden("cross-site request blocked".to_owned()));
    }

    let Some(expected) = origin_of(allowed_origin) else {
        return Err(AppError::Internal(format!(
            "invalid FRONTEND_URL '{allowed_origin}'"
        )));
    };

    let origin = header_origin(headers, header::ORIGIN);
    let referer = header_origin(headers, header::REFERER);

    if origin.as_deref() != Some(expected.as_str()) && referer.as_deref() != Some(expected.as_str())
    {
        return Err(AppError::Forbidden("origin validation failed".to_owned()));
    }

    Ok(())
}

fn header_origin(headers: &HeaderMap, name: header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .and_then(origin_of)
}

/// Scheme, host and port of a URL; `None` for opaque origins.
fn origin_of(value: &str) -> Option<String> {
    let origin = Url::parse(value.trim()).ok()?.origin();
    origin.is_tuple().then(|| origin.ascii_serialization())
}

fn is_state_changing_method(method: &Method) -> bool {
    matches!(
        *method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    )
}
