use anyhow::{bail, Context};
use chrono::Duration;
use clap::Subcommand;
use serde_json::json;

use crate::auth::{Subject, TokenAuthenticator};
use crate::cli::OutputFormat;
use crate::config;

#[derive(Subcommand)]
pub enum TokenCommands {
    #[command(about = "Sign a token whose subject is the given author id")]
    Issue {
        #[arg(help = "Author id to place in the token")]
        author_id: i32,
        #[arg(long, help = "Lifetime in hours (defaults to SECURITY_JWT_EXPIRY_HOURS)")]
        ttl_hours: Option<u64>,
        #[arg(long, conflicts_with = "ttl_hours", help = "Issue a token without an exp claim")]
        no_expiry: bool,
    },

    #[command(about = "Check a token against JWT_SECRET and print its subject")]
    Verify {
        #[arg(help = "Token, with or without a Bearer prefix")]
        token: String,
    },
}

pub async fn handle(cmd: TokenCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let security = &config::config().security;
    if security.jwt_secret.is_empty() {
        bail!("JWT_SECRET is not set");
    }
    let authenticator = TokenAuthenticator::new(&security.jwt_secret)?
        .with_bearer_prefix(security.accept_bearer_prefix);

    match cmd {
        TokenCommands::Issue { author_id, ttl_hours, no_expiry } => {
            let ttl = lifetime(ttl_hours.unwrap_or(security.jwt_expiry_hours), no_expiry)?;
            let token = authenticator.issue(Subject::from(author_id), ttl)?;
            match output_format {
                OutputFormat::Json => println!("{}", json!({ "token": token, "id": author_id })),
                OutputFormat::Text => println!("{}", token),
            }
            Ok(())
        }
        TokenCommands::Verify { token } => match authenticator.verify_header(&token) {
            Ok(claims) => {
                match output_format {
                    OutputFormat::Json => println!(
                        "{}",
                        json!({ "valid": true, "id": claims.id, "exp": claims.exp })
                    ),
                    OutputFormat::Text => println!("valid: subject {}", claims.id),
                }
                Ok(())
            }
            Err(reason) => {
                if output_format == OutputFormat::Json {
                    println!("{}", json!({ "valid": false, "reason": reason.to_string() }));
                }
                bail!("token rejected: {}", reason)
            }
        },
    }
}

fn lifetime(hours: u64, no_expiry: bool) -> anyhow::Result<Option<Duration>> {
    if no_expiry {
        return Ok(None);
    }
    let hours = i64::try_from(hours).context("ttl is too large")?;
    Duration::try_hours(hours).map(Some).context("ttl is too large")
}
