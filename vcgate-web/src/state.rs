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

use crate::config::Config;
use crate::credential::CredentialSource;
use crate::token_issuer::TokenIssuer;

/// Shared handler state. The token issuer and credential source are injected
/// once at startup and only read afterwards; handlers hold no mutable state.
#[derive(Clone)]
pub struct AppState {
    pub token_issuer: Arc<dyn TokenIssuer>,
    pub credentials: Arc<dyn CredentialSource>,
    pub config: Config,
}

impl AppState {
    pub fn new(
        token_issuer: Arc<dyn TokenIssuer>,
        credentials: Arc<dyn CredentialSource>,
        config: Config,
    ) -> Self {
        Self {
            token_issuer,
            credentials,
            config,
        }
    }
}
