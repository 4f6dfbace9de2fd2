//! HTTP routes for the extension.

use axum::{extract::State, routing::post, Json, Router};

use crate::builder::build_shipping_method_actions;
use crate::error::AppError;
use crate::middleware::RequireExtensionSecret;
use crate::platform::{ExtensionRequest, ExtensionResponse};
use crate::state::AppState;

/// Build the extension router.
pub fn routes() -> Router<AppState> {
    Router::new().route("/extension", post(extension))
}

/// Handle a cart-update extension call from the platform.
///
/// Calls about resources other than carts answer with no actions. A cart
/// call without the cart object is a platform misconfiguration and gets a
/// 400 back.
async fn extension(
    State(state): State<AppState>,
    _secret: RequireExtensionSecret,
    Json(payload): Json<ExtensionRequest>,
) -> Result<Json<ExtensionResponse>, AppError> {
    tracing::info!(
        action = %payload.action,
        type_id = %payload.resource.type_id,
        "Extension call"
    );

    if payload.resource.type_id != "cart" {
        return Ok(Json(ExtensionResponse::default()));
    }

    let Some(cart) = payload.resource.obj.as_ref() else {
        return Err(AppError::BadRequest(
            "cart resource without cart object".to_string(),
        ));
    };

    let actions = build_shipping_method_actions(Some(cart), state.shipping()).await;
    Ok(Json(ExtensionResponse { actions }))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use secrecy::SecretString;
    use tower::ServiceExt;

    use super::*;
    use crate::config::{ExtensionConfig, PlatformConfig, ShippingInfoConfig};

    fn test_config(extension_secret: Option<&str>) -> ExtensionConfig {
        ExtensionConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 0,
            shipping_info: ShippingInfoConfig {
                base_url: "http://localhost:9".to_string(),
                api_key: SecretString::from("aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6"),
            },
            platform: PlatformConfig {
                base_url: "http://localhost:9".to_string(),
                project_key: "wallart".to_string(),
                api_token: SecretString::from("aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6"),
            },
            extension_secret: extension_secret.map(SecretString::from),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 1.0,
        }
    }

    fn app(extension_secret: Option<&str>) -> Router {
        let state = AppState::new(test_config(extension_secret)).unwrap();
        routes().with_state(state)
    }

    fn request(body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/extension")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn digital_cart_payload() -> serde_json::Value {
        serde_json::json!({
            "action": "Update",
            "resource": {
                "typeId": "cart",
                "obj": {
                    "store": { "key": "de" },
                    "lineItems": [
                        {
                            "price": { "value": { "centAmount": 999, "currencyCode": "EUR" } },
                            "quantity": 1,
                            "variant": { "attributes": [] }
                        }
                    ]
                }
            }
        })
    }

    #[tokio::test]
    async fn test_digital_cart_returns_digital_actions() {
        let response = app(None)
            .oneshot(request(digital_cart_payload()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let actions = json["actions"].as_array().unwrap();
        assert_eq!(actions.len(), 4);
        assert_eq!(
            actions[0],
            serde_json::json!({
                "action": "setShippingMethod",
                "shippingMethod": { "typeId": "shipping-method", "key": "digital-shipping" }
            })
        );
        assert_eq!(actions[3], serde_json::json!({ "action": "recalculate" }));
    }

    #[tokio::test]
    async fn test_non_cart_resource_returns_no_actions() {
        let response = app(None)
            .oneshot(request(serde_json::json!({
                "action": "Update",
                "resource": { "typeId": "order" }
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json, serde_json::json!({ "actions": [] }));
    }

    #[tokio::test]
    async fn test_cart_without_object_is_bad_request() {
        let response = app(None)
            .oneshot(request(serde_json::json!({
                "action": "Update",
                "resource": { "typeId": "cart" }
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_secret_is_unauthorized() {
        let response = app(Some("aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6"))
            .oneshot(request(digital_cart_payload()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_valid_secret_passes() {
        let secret = "aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6";
        let mut req = request(digital_cart_payload());
        req.headers_mut()
            .insert("x-extension-secret", secret.parse().unwrap());
        let response = app(Some(secret)).oneshot(req).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
