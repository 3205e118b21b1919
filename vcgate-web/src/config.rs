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

use anyhow::{Context, Result};
use std::env;

use crate::handlers::issuance::CALLBACK_PATH;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub oauth2: OAuth2Config,
}

/// Settings for the OAuth2 provider the gateway authenticates against.
#[derive(Debug, Clone)]
pub struct OAuth2Config {
    pub client_id: String,
    pub client_secret: String,
    pub auth_url: String,
    pub token_url: String,
    pub redirect_url: String,
    pub scopes: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .context("Invalid PORT")?;

        let oauth2 = OAuth2Config::from_env(&host, port)?;

        Ok(Self { host, port, oauth2 })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl OAuth2Config {
    fn from_env(host: &str, port: u16) -> Result<Self> {
        // The provider must redirect back to this service's callback route
        // unless an explicit redirect URL is configured.
        let default_redirect_url = format!("http://{}:{}{}", host, port, CALLBACK_PATH);

        Ok(Self {
            client_id: env::var("OAUTH2_CLIENT_ID").context("OAUTH2_CLIENT_ID is required")?,
            client_secret: env::var("OAUTH2_CLIENT_SECRET")
                .context("OAUTH2_CLIENT_SECRET is required")?,
            auth_url: env::var("OAUTH2_AUTH_URL").context("OAUTH2_AUTH_URL is required")?,
            token_url: env::var("OAUTH2_TOKEN_URL").context("OAUTH2_TOKEN_URL is required")?,
            redirect_url: env::var("OAUTH2_REDIRECT_URL").unwrap_or(default_redirect_url),
            scopes: env::var("OAUTH2_SCOPES")
                .unwrap_or_else(|_| "openid".to_string())
                .split_whitespace()
                .map(str::to_string)
                .collect(),
        })
    }
}
