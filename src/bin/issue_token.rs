//! CLI tool for minting and checking event sink credentials
//!
//! Uses the same secret flags and environment variables as the server.

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde_json::Value;

use event_sink::auth::{issuer::parse_claim, Claims, TokenIssuer, TokenVerifier};
use event_sink::config::SecretArgs;

#[derive(Parser)]
#[command(name = "issue-token")]
#[command(about = "Issue or verify HS256 credentials for the event sink")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    secret: SecretArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Issue a new token
    Issue {
        /// Subject recorded with every event sent using this token
        #[arg(short, long)]
        sub: String,

        /// Lifetime in seconds; omit for a token that never expires
        #[arg(short, long)]
        ttl_secs: Option<u64>,

        /// Extra claims (key=value pairs, values parsed as JSON when possible)
        #[arg(short, long, value_parser = parse_claim)]
        claim: Vec<(String, Value)>,
    },
    /// Verify a token and print its claims
    Verify {
        /// Token to verify
        token: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let secret = cli.secret.load()?;

    match cli.command {
        Commands::Issue { sub, ttl_secs, claim } => {
            let extra: Claims = claim.into_iter().collect();
            let token = TokenIssuer::new(&secret).issue(&sub, ttl_secs, extra)?;
            println!("{}", token);
        }
        Commands::Verify { token } => {
            let claims = TokenVerifier::new(&secret).verify(&token)?;
            println!("{}", serde_json::to_string_pretty(&claims)?);
        }
    }

    Ok(())
}
