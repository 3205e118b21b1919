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

use anyhow::{bail, Result};
use axum::{
    handler::Handler,
    http::Method,
    routing::{self, MethodRouter},
};

use crate::AppState;

/// A single route descriptor: path, HTTP method and the handler to mount.
/// Built once at startup and never mutated.
pub struct RouteHandler {
    path: String,
    method: Method,
    route: MethodRouter<AppState>,
}

impl RouteHandler {
    pub fn get<H, T>(path: impl Into<String>, handler: H) -> Self
    where
        H: Handler<T, AppState>,
        T: 'static,
    {
        Self {
            path: path.into(),
            method: Method::GET,
            route: routing::get(handler),
        }
    }

    pub fn post<H, T>(path: impl Into<String>, handler: H) -> Self
    where
        H: Handler<T, AppState>,
        T: 'static,
    {
        Self {
            path: path.into(),
            method: Method::POST,
            route: routing::post(handler),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Split the descriptor into the pieces `axum::Router::route` wants.
    pub fn into_parts(self) -> (String, MethodRouter<AppState>) {
        (self.path, self.route)
    }
}

/// Ordered set of route descriptors exposed by this service. The registry
/// performs no dispatch; the caller mounts the descriptors onto its router.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: Vec<RouteHandler>,
}

impl HandlerRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Append a route descriptor. Path+method pairs must be unique within a
    /// registry; a duplicate is a startup configuration error.
    pub fn register(&mut self, handler: RouteHandler) -> Result<()> {
        if self
            .handlers
            .iter()
            .any(|h| h.path == handler.path && h.method == handler.method)
        {
            bail!(
                "Duplicate route registered: {} {}",
                handler.method,
                handler.path
            );
        }

        self.handlers.push(handler);

        Ok(())
    }

    /// All registered descriptors, in registration order.
    pub fn handlers(&self) -> &[RouteHandler] {
        &self.handlers
    }

    pub fn into_handlers(self) -> Vec<RouteHandler> {
        self.handlers
    }
}
