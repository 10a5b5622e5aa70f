use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use photogram::cli::{self, Cli, Commands};
use photogram::users::ProfileUpdate;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "photogram=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => cli::commands::init().await,
        Commands::Serve { host, port } => cli::commands::serve(host, port).await,
        Commands::Register {
            name,
            email,
            password,
        } => cli::commands::register(&name, &email, &password).await,
        Commands::Login { email, password } => cli::commands::login(&email, &password).await,
        Commands::Logout => cli::commands::logout().await,
        Commands::Whoami => cli::commands::whoami().await,
        Commands::Profile {
            name,
            bio,
            image,
            password,
        } => {
            cli::commands::profile(ProfileUpdate {
                name,
                password,
                bio,
                profile_image: image,
            })
            .await
        }
        Commands::User { id, format } => cli::commands::user(&id, format).await,
        Commands::Photo { action } => cli::commands::photo(action).await,
    }
}
