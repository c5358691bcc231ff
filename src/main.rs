use std::io;
use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;
use log::{error, info, warn};

use taskvault::auth::TokenCodec;
use taskvault::config::Config;
use taskvault::middleware::CorsFilter;
use taskvault::repository::{InMemoryRepository, PgRepository, Repository};
use taskvault::routes::{self, health};
use taskvault::AppState;

fn startup_error(context: &str, err: impl std::fmt::Display) -> io::Error {
    error!("{}: {}", context, err);
    io::Error::new(io::ErrorKind::Other, format!("{}: {}", context, err))
}

async fn open_repository(config: &Config) -> io::Result<Arc<dyn Repository>> {
    match &config.database_url {
        Some(url) => {
            let repo = PgRepository::connect(url, config.database_max_connections)
                .await
                .map_err(|e| startup_error("failed to connect to database", e))?;
            repo.migrate()
                .await
                .map_err(|e| startup_error("failed to run migrations", e))?;
            info!("using postgres storage");
            Ok(Arc::new(repo))
        }
        None => {
            warn!("DATABASE_URL not set; tasks and users are kept in memory only");
            Ok(Arc::new(InMemoryRepository::new()))
        }
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(|e| startup_error("invalid configuration", e))?;
    let repo = open_repository(&config).await?;

    let tokens = TokenCodec::new(config.jwt_secret.as_bytes(), config.token_ttl);
    let state = web::Data::new(AppState::new(repo, tokens, config.password_scheme));

    info!("Starting TaskVault server at {}", config.server_url());
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(CorsFilter)
            .wrap(Logger::default())
            .service(health::health)
            .configure(routes::config)
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
