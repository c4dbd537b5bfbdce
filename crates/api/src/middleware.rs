use axum::{
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};

use storekeep_auth::Role;
use storekeep_core::OperatorId;

use crate::context::OperatorContext;

/// Operator id header, set by the fronting host after it authenticated the caller.
pub const OPERATOR_ID_HEADER: &str = "x-operator-id";
/// Comma-separated role list, set by the fronting host.
pub const OPERATOR_ROLES_HEADER: &str = "x-operator-roles";

/// Attach an [`OperatorContext`] to the request or reject it with 401.
pub async fn operator_middleware(
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let operator = extract_operator(req.headers())?;
    req.extensions_mut().insert(operator);
    Ok(next.run(req).await)
}

fn extract_operator(headers: &HeaderMap) -> Result<OperatorContext, StatusCode> {
    let operator_id: OperatorId = header_str(headers, OPERATOR_ID_HEADER)?
        .parse()
        .map_err(|_| StatusCode::UNAUTHORIZED)?;

    let roles = match headers.get(OPERATOR_ROLES_HEADER) {
        Some(value) => value
            .to_str()
            .map_err(|_| StatusCode::UNAUTHORIZED)?
            .split(',')
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(|r| Role::new(r.to_string()))
            .collect(),
        None => Vec::new(),
    };

    Ok(OperatorContext::new(operator_id, roles))
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Result<&'a str, StatusCode> {
    let value = headers
        .get(name)
        .ok_or(StatusCode::UNAUTHORIZED)?
        .to_str()
        .map_err(|_| StatusCode::UNAUTHORIZED)?
        .trim();

    if value.is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }
    Ok(value)
}
