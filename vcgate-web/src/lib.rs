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

pub mod config;
pub mod credential;
pub mod handler_registry;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod token_issuer;

#[cfg(test)]
pub mod test_helpers;

pub use config::Config;
pub use state::AppState;
