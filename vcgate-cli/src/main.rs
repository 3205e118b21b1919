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

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;
use serde_json::{json, Value};
use std::env;

const ADMIN_URL_ENV: &str = "ADMIN_URL";
const ADMIN_REGISTER_ENDPOINT: &str = "/admin/auth/local/register";
const STUDENT_CARDS_ENDPOINT: &str = "/studentcards";
const TRANSCRIPTS_ENDPOINT: &str = "/transcripts";

#[derive(Parser)]
#[command(name = "vcgate")]
#[command(about = "Vcgate CLI tool for demo data management")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Populate the demo CMS with sample student cards and transcripts
    SeedDemo {
        /// Admin URL of the demo CMS instance, e.g. http://localhost:1337
        #[arg(long, short = 'a')]
        admin_url: Option<String>,
    },
}

#[derive(Debug, Deserialize)]
struct AdminUser {
    jwt: String,
    user: AdminAccount,
}

#[derive(Debug, Deserialize)]
struct AdminAccount {
    username: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::SeedDemo { admin_url } => {
            let admin_url = admin_url
                .or_else(|| env::var(ADMIN_URL_ENV).ok())
                .context("Admin URL not provided (use --admin-url or ADMIN_URL)")?;

            seed_demo(&admin_url).await
        }
    }
}

async fn seed_demo(admin_url: &str) -> Result<()> {
    let client = reqwest::Client::new();

    let auth_token = create_admin_user(&client, admin_url).await?;

    let student_card = sample_student_card();
    let transcript = sample_transcript();

    create_record(
        &client,
        &auth_token,
        &format!("{}{}", admin_url, STUDENT_CARDS_ENDPOINT),
        &student_card,
    )
    .await?;
    create_record(
        &client,
        &auth_token,
        &format!("{}{}", admin_url, TRANSCRIPTS_ENDPOINT),
        &transcript,
    )
    .await?;

    let fetched = get_record(
        &client,
        &auth_token,
        &format!("{}{}/1", admin_url, STUDENT_CARDS_ENDPOINT),
    )
    .await?;
    verify_record(&fetched, &student_card)?;

    println!("Demo data created; browse the records at {}/admin/", admin_url);

    Ok(())
}

/// Register the demo admin account and return its bearer token.
async fn create_admin_user(client: &reqwest::Client, admin_url: &str) -> Result<String> {
    let admin_user_values = json!({
        "username": "strapi",
        "email": "user@strapi.io",
        "password": "strapi",
    });

    let admin: AdminUser = client
        .post(format!("{}{}", admin_url, ADMIN_REGISTER_ENDPOINT))
        .json(&admin_user_values)
        .send()
        .await
        .context("Failed to reach the admin registration endpoint")?
        .error_for_status()
        .context("Admin registration was rejected")?
        .json()
        .await
        .context("Failed to parse the admin registration response")?;

    println!("Registered admin user {}", admin.user.username);

    Ok(format!("Bearer {}", admin.jwt))
}

async fn create_record(
    client: &reqwest::Client,
    auth_token: &str,
    url: &str,
    record: &Value,
) -> Result<()> {
    client
        .post(url)
        .header(AUTHORIZATION, auth_token)
        .json(record)
        .send()
        .await
        .with_context(|| format!("Failed to post record to {}", url))?
        .error_for_status()
        .with_context(|| format!("Record was rejected by {}", url))?;

    Ok(())
}

async fn get_record(client: &reqwest::Client, auth_token: &str, url: &str) -> Result<Value> {
    client
        .get(url)
        .header(AUTHORIZATION, auth_token)
        .send()
        .await
        .with_context(|| format!("Failed to fetch record from {}", url))?
        .error_for_status()
        .with_context(|| format!("Record fetch was rejected by {}", url))?
        .json()
        .await
        .context("Failed to parse the fetched record")
}

/// Check that the stored record came back with the same identity fields.
fn verify_record(fetched: &Value, stored: &Value) -> Result<()> {
    for key in ["studentid", "name"] {
        if fetched.get(key) != stored.get(key) {
            bail!("Fetched record does not match the stored record on {}", key);
        }
    }

    Ok(())
}

fn sample_student_card() -> Value {
    json!({
        "studentid": "1234568",
        "name": "Tanu",
        "university": "Faber College",
        "semester": 3,
        "issuedate": "2019-01-02T00:00:00.000Z",
    })
}

fn sample_transcript() -> Value {
    json!({
        "studentid": "323456898",
        "name": "Tanu",
        "university": "Faber College",
        "status": "graduated",
        "totalcredits": "100",
        "course": "Bachelors'in Computing Science",
    })
}
