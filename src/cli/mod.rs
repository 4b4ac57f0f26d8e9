pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use uuid::Uuid;

use crate::auth::Role;
use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "hotel-booking-api")]
#[command(about = "Hotel booking API - customer accounts and room inventory")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve {
        #[arg(long, help = "Port to listen on, overrides SERVER_PORT")]
        port: Option<u16>,

        #[arg(
            long,
            value_enum,
            default_value_t = StoreKind::Postgres,
            help = "Persistence backend"
        )]
        store: StoreKind,
    },

    #[command(about = "Mint an access token signed with the configured secret")]
    Token {
        #[arg(long, help = "Role claim (ADMIN or CUSTOMER)")]
        role: Role,

        #[arg(long, help = "customerId claim")]
        customer_id: Option<Uuid>,

        #[arg(long, help = "Lifetime in days, defaults to SECURITY_ACCESS_TOKEN_TTL_DAYS")]
        ttl_days: Option<i64>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreKind {
    /// PostgreSQL through a sqlx pool
    Postgres,
    /// Process-local, lost on exit
    Memory,
}

pub async fn run(cli: Cli, config: AppConfig) -> anyhow::Result<()> {
    match cli.command.unwrap_or(Commands::Serve {
        port: None,
        store: StoreKind::Postgres,
    }) {
        Commands::Serve { port, store } => commands::serve::handle(port, store, config).await,
        Commands::Token {
            role,
            customer_id,
            ttl_days,
        } => commands::token::handle(role, customer_id, ttl_days, config).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_serve_flags() {
        let args = ["hotel-booking-api", "serve", "--port", "9000", "--store", "memory"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Some(Commands::Serve { port, store }) => {
                assert_eq!(port, Some(9000));
                assert_eq!(store, StoreKind::Memory);
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn parses_token_flags() {
        let args = ["hotel-booking-api", "token", "--role", "ADMIN", "--ttl-days", "1"];
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Some(Commands::Token { role, customer_id, ttl_days }) => {
                assert_eq!(role, Role::Admin);
                assert_eq!(customer_id, None);
                assert_eq!(ttl_days, Some(1));
            }
            _ => panic!("expected token"),
        }

        assert!(Cli::try_parse_from(["hotel-booking-api", "token", "--role", "OWNER"]).is_err());
    }

    #[test]
    fn no_subcommand_is_allowed() {
        let cli = Cli::try_parse_from(["hotel-booking-api"]).unwrap();
        assert!(cli.command.is_none());
    }
}
