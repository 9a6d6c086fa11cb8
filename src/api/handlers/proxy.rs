// Raw proxy endpoint - forwards { action, chain, address, txHash } to
// Blockchair and returns the provider payload untouched.

use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use serde_json::Value;
use tracing::info;

use crate::api::error::ApiResult;
use crate::api::SharedProxy;
use crate::models::request::ProxyRequest;
use crate::proxy::errors::ProxyError;

#[tracing::instrument(skip(proxy, body))]
pub async fn proxy_handler(State(proxy): State<SharedProxy>, body: Bytes) -> ApiResult<Json<Value>> {
    // A missing credential fails every request, whatever the body holds
    if proxy.config().api_key.is_none() {
        return Err(ProxyError::MissingCredential.into());
    }

    let request: ProxyRequest = serde_json::from_slice(&body)
        .map_err(|e| ProxyError::InvalidRequestBody(e.to_string()))?;

    info!(action = ?request.action, "Processing proxy request");

    Ok(Json(proxy.forward(&request).await?))
}

/// CORS preflight, answered before any validation
pub async fn preflight_handler() -> StatusCode {
    StatusCode::OK
}
