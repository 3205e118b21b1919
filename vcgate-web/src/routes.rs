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

use anyhow::Result;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::{
    handler_registry::{HandlerRegistry, RouteHandler},
    handlers::{self, issuance},
    AppState,
};

/// Mount every registered route descriptor onto a fresh router.
pub fn create_router(state: AppState) -> Result<Router> {
    let mut router = Router::new();

    for handler in build_registry()?.into_handlers() {
        let (path, route) = handler.into_parts();
        router = router.route(&path, route);
    }

    Ok(router.layer(TraceLayer::new_for_http()).with_state(state))
}

fn build_registry() -> Result<HandlerRegistry> {
    let mut registry = HandlerRegistry::new();

    registry.register(RouteHandler::get(issuance::LOGIN_PATH, handlers::login))?;
    registry.register(RouteHandler::get(issuance::CALLBACK_PATH, handlers::callback))?;
    registry.register(RouteHandler::get("/health", health))?;

    Ok(registry)
}

// Health check handler
async fn health() -> &'static str {
    "OK"
}
