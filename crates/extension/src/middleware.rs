//! Authentication extractor for extension calls.
//!
//! The platform is configured to send a shared secret in the
//! `x-extension-secret` header on every extension call. When the
//! deployment has no secret configured, calls pass unauthenticated.

use axum::{extract::FromRequestParts, http::request::Parts};
use secrecy::ExposeSecret;

use crate::error::AppError;
use crate::state::AppState;

/// Header the platform transmits the shared secret in.
pub const EXTENSION_SECRET_HEADER: &str = "x-extension-secret";

/// Extractor that requires the extension shared secret.
///
/// Rejects with 401 when a secret is configured and the header is missing
/// or does not match.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(
///     _secret: RequireExtensionSecret,
///     Json(payload): Json<ExtensionRequest>,
/// ) -> impl IntoResponse {
///     // only reached with a valid secret
/// }
/// ```
pub struct RequireExtensionSecret;

impl FromRequestParts<AppState> for RequireExtensionSecret {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(expected) = state.config().extension_secret.as_ref() else {
            return Ok(Self);
        };

        let provided = parts
            .headers
            .get(EXTENSION_SECRET_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                AppError::Unauthorized("missing extension secret header".to_string())
            })?;

        if provided != expected.expose_secret() {
            return Err(AppError::Unauthorized(
                "invalid extension secret".to_string(),
            ));
        }

        Ok(Self)
    }
}
