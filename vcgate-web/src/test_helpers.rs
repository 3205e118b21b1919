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

use std::sync::Arc;

use anyhow::{bail, Result};
use async_trait::async_trait;
use axum_extra::extract::cookie::CookieJar;

use crate::{
    config::{Config, OAuth2Config},
    credential::StaticCredentialSource,
    token_issuer::{CallbackParams, ExchangedToken, TokenIssuer},
    AppState,
};

pub const STUB_AUTH_URL: &str = "https://provider.example/auth?state=xyz";

/// Token issuer stub with a fixed authorization URL and a scripted exchange
/// outcome. Stateless across requests.
pub struct StubTokenIssuer {
    pub auth_url: String,
    pub fail_exchange: bool,
}

impl StubTokenIssuer {
    pub fn succeeding() -> Self {
        Self {
            auth_url: STUB_AUTH_URL.to_string(),
            fail_exchange: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            auth_url: STUB_AUTH_URL.to_string(),
            fail_exchange: true,
        }
    }
}

#[async_trait]
impl TokenIssuer for StubTokenIssuer {
    fn auth_code_url(&self, jar: CookieJar) -> (CookieJar, String) {
        (jar, self.auth_url.clone())
    }

    async fn exchange(&self, _jar: &CookieJar, _params: &CallbackParams) -> Result<ExchangedToken> {
        if self.fail_exchange {
            bail!("Exchange rejected by stub");
        }

        Ok(ExchangedToken {
            access_token: "stub-access-token".to_string(),
            expires_in: None,
        })
    }
}

pub fn create_test_config() -> Config {
    Config {
        host: "localhost".to_string(),
        port: 3000,
        oauth2: OAuth2Config {
            client_id: "test-client".to_string(),
            client_secret: "test-secret".to_string(),
            auth_url: "https://provider.example/auth".to_string(),
            token_url: "https://provider.example/token".to_string(),
            redirect_url: "http://localhost:3000/callback".to_string(),
            scopes: vec!["openid".to_string()],
        },
    }
}

pub fn create_test_app_state(issuer: StubTokenIssuer) -> AppState {
    AppState::new(
        Arc::new(issuer),
        Arc::new(StaticCredentialSource::new()),
        create_test_config(),
    )
}
