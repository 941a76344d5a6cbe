use api_client::frameworks::telemetry::init_tracing;
use api_client::interface_adapters::protocol::OrderSearch;
use api_client::{
    AdminApi, AssetResolver, AuthenticatedClient, ClientConfig, ClientError, FileSessionStore,
    GuestApi, GuestAuthenticatedClient, InMemorySessionStore, Session, SessionStore,
    display_date_time, today,
};
use api_client::use_cases::dates::days_ago;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

/// Command-line driver for the restaurant API client, handy against a local backend.
#[derive(Parser)]
#[command(name = "api_client", version)]
struct Cli {
    /// TOML config file; environment variables are used when absent.
    #[arg(long, env = "CLIENT_CONFIG")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in as staff and persist the token.
    Login { email: String, password: String },
    /// Show the signed-in user.
    Whoami,
    /// Search orders from the last `days` days.
    Orders {
        #[arg(long, default_value_t = 30)]
        days: u64,
        #[arg(long)]
        status: Option<String>,
    },
    /// Resolve a table link and persist the guest context.
    Table { code: String },
    /// Show the brand with its logo resolved against the asset origin.
    Brand,
    /// Drop the stored credentials and guest context.
    Logout,
}

#[tokio::main]
async fn main() {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        tracing::error!(error = %e, "command failed");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = match cli.config {
        Some(path) => ClientConfig::from_toml_file(path)?,
        None => ClientConfig::from_env()?,
    };

    let store: Arc<dyn SessionStore> = match &config.session_file {
        Some(path) => Arc::new(FileSessionStore::new(path)),
        None => {
            tracing::warn!("SESSION_FILE not set; session will not outlive this command.");
            Arc::new(InMemorySessionStore::new())
        }
    };
    let session = Session::new(store);
    let redirect = Arc::new(|route: &str| {
        tracing::warn!(%route, "session expired; sign in again.");
    });

    match cli.command {
        Command::Login { email, password } => {
            let admin = admin_api(&config, &session, redirect)?;
            let user = admin.login(&email, &password).await?;
            println!("signed in as {} <{}>", user.name, user.email);
        }
        Command::Whoami => {
            let admin = admin_api(&config, &session, redirect)?;
            let user = admin.current_user().await?;
            println!("{} <{}>", user.name, user.email);
        }
        Command::Orders { days, status } => {
            let admin = admin_api(&config, &session, redirect)?;
            let orders = admin
                .search_orders(&OrderSearch {
                    from: Some(days_ago(days)),
                    to: Some(today()),
                    status,
                })
                .await?;
            for order in orders {
                let created = order
                    .get("created_at")
                    .and_then(|v| v.as_str())
                    .map(display_date_time)
                    .unwrap_or_default();
                println!("#{}  {}  {}", order["id"], order["status"], created);
            }
        }
        Command::Table { code } => {
            let guest = guest_api(&config, &session, redirect)?;
            let issued = guest.resolve_table(&code).await?;
            println!(
                "table {code} served by employee {}",
                issued.employee_id.as_deref().unwrap_or("-")
            );
        }
        Command::Brand => {
            let guest = guest_api(&config, &session, redirect)?;
            let brand = guest.brand().await?;
            let assets = AssetResolver::new(&config.asset_base_url)?;
            let logo = brand
                .logo
                .as_deref()
                .and_then(|path| assets.resolve(path))
                .unwrap_or_default();
            println!("{}  {}", brand.name, logo);
        }
        Command::Logout => {
            let admin = admin_api(&config, &session, redirect)?;
            admin.logout().await?;
            println!("signed out");
        }
    }
    Ok(())
}

fn admin_api(
    config: &ClientConfig,
    session: &Session,
    redirect: Arc<impl Fn(&str) + Send + Sync + 'static>,
) -> Result<AdminApi, ClientError> {
    let client = AuthenticatedClient::new(config, session.clone(), redirect)?;
    Ok(AdminApi::new(client, session.clone()))
}

fn guest_api(
    config: &ClientConfig,
    session: &Session,
    redirect: Arc<impl Fn(&str) + Send + Sync + 'static>,
) -> Result<GuestApi, ClientError> {
    let client = GuestAuthenticatedClient::new(config, session.clone(), redirect)?;
    Ok(GuestApi::new(client, session.clone()))
}
