// Vcgate - A verifiable credential issuance gateway built with Rust
// Copyright (C) 2025 Vcgate Project Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use serde::Serialize;

use crate::{token_issuer::CallbackParams, AppState};

pub const LOGIN_PATH: &str = "/login";
pub const CALLBACK_PATH: &str = "/callback";

/// Start the OAuth2 login by redirecting to the provider authorization URL.
/// The token issuer may add a correlation cookie to the jar on the way out.
pub async fn login(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let (jar, url) = state.token_issuer.auth_code_url(jar);

    (jar, Redirect::temporary(&url))
}

/// Provider callback: exchange the authorization code for a token and answer
/// with the credential document. Exchange failures are logged and the user is
/// sent back to the application root without any failure detail.
pub async fn callback(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(params): Query<CallbackParams>,
) -> Response {
    let token = match state.token_issuer.exchange(&jar, &params).await {
        Ok(token) => token,
        Err(e) => {
            tracing::error!("Token exchange failed: {:?}", e);
            return Redirect::temporary("/").into_response();
        }
    };

    match state.credentials.issue(&token) {
        Ok(credential) => write_json_response(&credential),
        Err(e) => {
            tracing::error!("Credential issuance failed: {:?}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Serialize a value to a JSON response. A value that fails to serialize is
/// logged and answered with 500 instead of a truncated 200 body.
fn write_json_response<T: Serialize>(value: &T) -> Response {
    match serde_json::to_vec(value) {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to serialize response body: {:?}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{create_test_app_state, StubTokenIssuer, STUB_AUTH_URL};
    use anyhow::Result;
    use serde::ser::Error as _;
    use serde_json::Value;

    async fn response_json(response: Response) -> Result<Value> {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;

        Ok(serde_json::from_slice(&body)?)
    }

    #[tokio::test]
    async fn test_login_redirects_to_provider() {
        let state = create_test_app_state(StubTokenIssuer::succeeding());

        let response = login(State(state), CookieJar::new()).await.into_response();

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            STUB_AUTH_URL
        );
    }

    #[tokio::test]
    async fn test_callback_success_returns_credential_json() -> Result<()> {
        let state = create_test_app_state(StubTokenIssuer::succeeding());

        let response = callback(
            State(state),
            CookieJar::new(),
            Query(CallbackParams::default()),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = response_json(response).await?;
        assert_eq!(body["type"], "VerifiableCredential");

        Ok(())
    }

    #[tokio::test]
    async fn test_callback_failure_redirects_to_root() {
        let state = create_test_app_state(StubTokenIssuer::failing());

        let response = callback(
            State(state),
            CookieJar::new(),
            Query(CallbackParams::default()),
        )
        .await;

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");
    }

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: serde::Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(S::Error::custom("refused"))
        }
    }

    #[tokio::test]
    async fn test_write_json_response_sets_content_type() -> Result<()> {
        let response = write_json_response(&serde_json::json!({"ok": true}));

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_write_json_response_surfaces_serialization_failure() {
        let response = write_json_response(&Unserializable);

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
