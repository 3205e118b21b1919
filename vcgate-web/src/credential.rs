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

use anyhow::{Context as _, Result};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::token_issuer::ExchangedToken;

/// A W3C-shaped verifiable credential document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    #[serde(rename = "@context")]
    pub context: String,
    pub id: String,
    #[serde(rename = "type")]
    pub credential_type: String,
    pub credential_subject: CredentialSubject,
    pub issuer: Issuer,
    pub issuance_date: DateTime<Utc>,
    pub proof: Proof,
    pub expiration_date: DateTime<Utc>,
    pub credential_status: CredentialStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialSubject {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issuer {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proof {
    #[serde(rename = "type")]
    pub proof_type: String,
    pub created: DateTime<Utc>,
    pub proof_purpose: String,
    pub verification_method: String,
    pub jws: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialStatus {
    pub id: String,
    #[serde(rename = "type")]
    pub status_type: String,
}

/// Produces the credential returned after a successful login, keyed by the
/// exchanged token. Seam for an external issuance service.
pub trait CredentialSource: Send + Sync {
    fn issue(&self, token: &ExchangedToken) -> Result<Credential>;
}

const SAMPLE_JWS: &str = "eyJhbGciOiJQUzI1NiIsImI2NCI6ZmFsc2UsImNyaXQiOlsiYjY0Il19..DJBMvvFAIC00nSGB6Tn0XKbbF9XrsaJZREWvR2aONYTQQxnyXirtXnlewJMBBn2h9hfcGZrvnC1b6PgWmukzFJ1IiH1dWgnDIS81BH-IxXnPkbuYDeySorc4QU9MJxdVkY5EL4HYbcIfwKj6X4LBQ2_ZHZIu1jdqLcRZqHcsDF5KKylKc1THn5VRWy5WhYg_gBnyWny8E6Qkrze53MR7OuAmmNJ1m1nN8SxDrG6a08L78J0-Fbas5OjAQz3c17GY8mVuDPOBIOVjMEghBlgl3nOi1ysxbRGhHLEK4s0KKbeRogZdgt1DkQxDFxxn41QWDw_mmMCjs9qxg0zcZzqEJw";

/// Issues a fixed sample credential regardless of the authenticated identity.
/// Stand-in for the real issuer component.
pub struct StaticCredentialSource;

impl StaticCredentialSource {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StaticCredentialSource {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialSource for StaticCredentialSource {
    fn issue(&self, _token: &ExchangedToken) -> Result<Credential> {
        Ok(Credential {
            context: "https://www.w3.org/2018/credentials/v1".to_string(),
            id: "http://example.edu/credentials/1872".to_string(),
            credential_type: "VerifiableCredential".to_string(),
            credential_subject: CredentialSubject {
                id: "did:example:ebfeb1f712ebc6f1c276e12ec21".to_string(),
            },
            issuer: Issuer {
                id: "did:example:76e12ec712ebc6f1c221ebfeb1f".to_string(),
                name: "Example University".to_string(),
            },
            issuance_date: timestamp(2010, 1, 1, 19, 23, 24)?,
            proof: Proof {
                proof_type: "RsaSignature2018".to_string(),
                created: timestamp(2018, 6, 18, 21, 19, 10)?,
                proof_purpose: "assertionMethod".to_string(),
                verification_method: "https://example.com/jdoe/keys/1".to_string(),
                jws: SAMPLE_JWS.to_string(),
            },
            expiration_date: timestamp(2020, 1, 1, 19, 23, 24)?,
            credential_status: CredentialStatus {
                id: "https://example.edu/status/24".to_string(),
                status_type: "CredentialStatusList2017".to_string(),
            },
        })
    }
}

fn timestamp(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> Result<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, month, day, hour, min, sec)
        .single()
        .context("Invalid credential timestamp")
}
