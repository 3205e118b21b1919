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

use std::time::Duration;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use axum_extra::extract::cookie::{Cookie, CookieJar};
use oauth2::{
    basic::BasicClient, AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken,
    EndpointNotSet, EndpointSet, RedirectUrl, Scope, TokenResponse, TokenUrl,
};
use serde::Deserialize;

use crate::config::OAuth2Config;

/// Cookie carrying the authorization state between the login redirect and
/// the provider callback.
const STATE_COOKIE: &str = "oauth_state";

/// oauth2 client with both the authorization and token endpoints configured.
type ConfiguredClient =
    BasicClient<EndpointSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

/// Query parameters delivered by the provider redirect. Both are optional at
/// the HTTP layer; the token issuer validates them.
#[derive(Debug, Default, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
}

/// Opaque token returned by a successful code exchange. Never echoed to the
/// client; only the credential source sees it.
#[derive(Debug, Clone)]
pub struct ExchangedToken {
    pub access_token: String,
    pub expires_in: Option<Duration>,
}

/// The two operations of the authorization-code flow this gateway needs.
/// Alternate providers and test stubs substitute through this trait.
#[async_trait]
pub trait TokenIssuer: Send + Sync {
    /// Build the provider authorization URL. Any correlation state the flow
    /// needs later is added to the returned cookie jar.
    fn auth_code_url(&self, jar: CookieJar) -> (CookieJar, String);

    /// Exchange the callback's authorization code for a token.
    async fn exchange(&self, jar: &CookieJar, params: &CallbackParams) -> Result<ExchangedToken>;
}

/// Production issuer backed by the configured OAuth2 provider.
pub struct OAuth2TokenIssuer {
    client: ConfiguredClient,
    scopes: Vec<Scope>,
    http: reqwest::Client,
}

impl OAuth2TokenIssuer {
    pub fn from_config(config: &OAuth2Config) -> Result<Self> {
        let client = BasicClient::new(ClientId::new(config.client_id.clone()))
            .set_client_secret(ClientSecret::new(config.client_secret.clone()))
            .set_auth_uri(AuthUrl::new(config.auth_url.clone()).context("Invalid OAUTH2_AUTH_URL")?)
            .set_token_uri(
                TokenUrl::new(config.token_url.clone()).context("Invalid OAUTH2_TOKEN_URL")?,
            )
            .set_redirect_uri(
                RedirectUrl::new(config.redirect_url.clone())
                    .context("Invalid OAUTH2_REDIRECT_URL")?,
            );

        // Token requests must not follow redirects.
        let http = reqwest::ClientBuilder::new()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .context("Failed to build token HTTP client")?;

        Ok(Self {
            client,
            scopes: config.scopes.iter().cloned().map(Scope::new).collect(),
            http,
        })
    }
}

#[async_trait]
impl TokenIssuer for OAuth2TokenIssuer {
    fn auth_code_url(&self, jar: CookieJar) -> (CookieJar, String) {
        let mut request = self.client.authorize_url(CsrfToken::new_random);
        for scope in &self.scopes {
            request = request.add_scope(scope.clone());
        }
        let (url, csrf) = request.url();

        let cookie = Cookie::build((STATE_COOKIE, csrf.secret().clone()))
            .path("/")
            .http_only(true)
            .same_site(cookie::SameSite::Lax)
            .build();

        (jar.add(cookie), url.to_string())
    }

    async fn exchange(&self, jar: &CookieJar, params: &CallbackParams) -> Result<ExchangedToken> {
        let code = params
            .code
            .as_deref()
            .context("Callback is missing the code parameter")?;
        let returned_state = params
            .state
            .as_deref()
            .context("Callback is missing the state parameter")?;

        let stored_state = jar
            .get(STATE_COOKIE)
            .context("Authorization state cookie is missing")?;
        if stored_state.value() != returned_state {
            bail!("Authorization state mismatch");
        }

        let response = self
            .client
            .exchange_code(AuthorizationCode::new(code.to_owned()))
            .request_async(&self.http)
            .await
            .context("Authorization code exchange failed")?;

        Ok(ExchangedToken {
            access_token: response.access_token().secret().clone(),
            expires_in: response.expires_in(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::create_test_config;
    use httpmock::prelude::*;
    use std::collections::HashMap;

    fn build_issuer(config: &OAuth2Config) -> OAuth2TokenIssuer {
        OAuth2TokenIssuer::from_config(config).expect("Failed to build issuer from test config")
    }

    fn jar_with_state(state: &str) -> CookieJar {
        CookieJar::new().add(Cookie::new(STATE_COOKIE, state.to_owned()))
    }

    #[test]
    fn test_from_config_rejects_invalid_auth_url() {
        let mut config = create_test_config().oauth2;
        config.auth_url = "not a url".to_string();

        assert!(OAuth2TokenIssuer::from_config(&config).is_err());
    }

    #[test]
    fn test_auth_code_url_sets_state_cookie_matching_url() {
        let config = create_test_config().oauth2;
        let issuer = build_issuer(&config);

        let (jar, url) = issuer.auth_code_url(CookieJar::new());

        let cookie = jar
            .get(STATE_COOKIE)
            .expect("State cookie should be set by auth_code_url");

        let url = url::Url::parse(&url).expect("Authorization URL should parse");
        let pairs: HashMap<_, _> = url.query_pairs().into_owned().collect();

        assert_eq!(pairs.get("state"), Some(&cookie.value().to_string()));
        assert_eq!(pairs.get("response_type"), Some(&"code".to_string()));
        assert_eq!(pairs.get("client_id"), Some(&config.client_id));
        assert_eq!(pairs.get("redirect_uri"), Some(&config.redirect_url));
        assert_eq!(pairs.get("scope"), Some(&"openid".to_string()));
    }

    #[test]
    fn test_auth_code_url_uses_fresh_state_per_call() {
        let issuer = build_issuer(&create_test_config().oauth2);

        let (jar_a, _) = issuer.auth_code_url(CookieJar::new());
        let (jar_b, _) = issuer.auth_code_url(CookieJar::new());

        let state_a = jar_a.get(STATE_COOKIE).unwrap().value().to_string();
        let state_b = jar_b.get(STATE_COOKIE).unwrap().value().to_string();
        assert_ne!(state_a, state_b);
    }

    #[tokio::test]
    async fn test_exchange_rejects_missing_code() {
        let issuer = build_issuer(&create_test_config().oauth2);

        let params = CallbackParams {
            code: None,
            state: Some("xyz".to_string()),
        };
        let result = issuer.exchange(&jar_with_state("xyz"), &params).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_exchange_rejects_missing_state_cookie() {
        let issuer = build_issuer(&create_test_config().oauth2);

        let params = CallbackParams {
            code: Some("any-code".to_string()),
            state: Some("xyz".to_string()),
        };
        let result = issuer.exchange(&CookieJar::new(), &params).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_exchange_rejects_state_mismatch() {
        let issuer = build_issuer(&create_test_config().oauth2);

        let params = CallbackParams {
            code: Some("any-code".to_string()),
            state: Some("tampered".to_string()),
        };
        let result = issuer.exchange(&jar_with_state("xyz"), &params).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_exchange_returns_token_from_provider() {
        let server = MockServer::start_async().await;

        let mut config = create_test_config().oauth2;
        config.token_url = server.url("/token");
        let issuer = build_issuer(&config);

        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/token")
                    .header("content-type", "application/x-www-form-urlencoded");
                then.status(200)
                    .header("content-type", "application/json")
                    .body(
                        "{\"access_token\":\"access-success\",\"token_type\":\"bearer\",\"expires_in\":3600}",
                    );
            })
            .await;

        let params = CallbackParams {
            code: Some("auth-code".to_string()),
            state: Some("xyz".to_string()),
        };
        let token = issuer
            .exchange(&jar_with_state("xyz"), &params)
            .await
            .expect("Exchange against the mock provider should succeed");

        mock.assert_async().await;
        assert_eq!(token.access_token, "access-success");
        assert_eq!(token.expires_in, Some(Duration::from_secs(3600)));
    }
}
