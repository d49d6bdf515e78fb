use actix_web::{middleware::Logger, web, App, HttpServer};
use clap::Parser;
use sqlx::{Pool, Postgres};
use std::io;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt, Layer};

use job_tracker::api::{self, job::JobService, validation};
use job_tracker::board::{BoardState, BoardView};
use job_tracker::cli::{Cli, Command};
use job_tracker::client::HttpJobsClient;
use job_tracker::config::Config;
use job_tracker::db::{self, JobRepository, JobStore, MemoryJobStore};
use job_tracker::shutdown::ShutdownCoordinator;

/// Console output plus daily rotating files, one per level:
/// logs/info.log.2024-12-22, logs/error.log.2024-12-22, ...
fn init_tracing(log_dir: &str) -> io::Result<()> {
    std::fs::create_dir_all(log_dir)?;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());

    let info_layer = tracing_subscriber::fmt::layer()
        .with_writer(tracing_appender::rolling::daily(log_dir, "info.log"))
        .with_ansi(false)
        .with_filter(LevelFilter::INFO);

    let warn_layer = tracing_subscriber::fmt::layer()
        .with_writer(tracing_appender::rolling::daily(log_dir, "warn.log"))
        .with_ansi(false)
        .with_filter(LevelFilter::WARN);

    let error_layer = tracing_subscriber::fmt::layer()
        .with_writer(tracing_appender::rolling::daily(log_dir, "error.log"))
        .with_ansi(false)
        .with_filter(LevelFilter::ERROR);

    let debug_layer = tracing_subscriber::fmt::layer()
        .with_writer(tracing_appender::rolling::daily(log_dir, "debug.log"))
        .with_ansi(false)
        .with_filter(LevelFilter::DEBUG);

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stdout)
        .with_ansi(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(info_layer)
        .with(warn_layer)
        .with(error_layer)
        .with(debug_layer)
        .init();
    Ok(())
}

async fn connect(config: &Config) -> io::Result<Pool<Postgres>> {
    let database_url = config.database_url().map_err(io::Error::other)?;
    let pool = db::connection::get_connection(database_url, config.max_db_connections)
        .await
        .map_err(|e| {
            error!("Failed to connect to database: {}", e);
            io::Error::other(e)
        })?;
    info!("Database connection pool established");
    Ok(pool)
}

async fn migrate(pool: &Pool<Postgres>) -> io::Result<()> {
    db::migrations::run_migrations(pool).await.map_err(|e| {
        error!("Failed to run database migrations: {}", e);
        io::Error::other(e)
    })
}

async fn serve(config: Config, in_memory: bool) -> io::Result<()> {
    info!("Starting job-tracker server");
    info!("  - Max payload size: {} bytes", config.max_payload_size);

    let (store, pool): (Arc<dyn JobStore>, Option<Pool<Postgres>>) = if in_memory {
        info!("  - Store: in-memory (jobs are lost on exit)");
        (Arc::new(MemoryJobStore::new()), None)
    } else {
        info!("  - Max database connections: {}", config.max_db_connections);
        let pool = connect(&config).await?;
        migrate(&pool).await?;
        (Arc::new(JobRepository::new(pool.clone())), Some(pool))
    };

    let job_service = web::Data::new(JobService::new(store));
    let max_payload_size = config.max_payload_size;

    let server = HttpServer::new(move || {
        App::new()
            .wrap(api::cors())
            .wrap(Logger::default())
            .app_data(job_service.clone())
            .app_data(web::PayloadConfig::default().limit(max_payload_size))
            .app_data(validation::json_config().limit(max_payload_size))
            .configure(api::api_config)
    })
    .bind((config.host.as_str(), config.port))?
    .run();

    info!("Server running on http://{}:{}", config.host, config.port);

    let server_handle = server.handle();
    let server_task = tokio::spawn(server);

    ShutdownCoordinator::new(server_handle, server_task, pool)
        .wait_for_shutdown()
        .await
}

async fn print_board(api_url: &str, page_size: usize) -> io::Result<()> {
    let client = HttpJobsClient::new(api_url);
    let mut board = BoardState::new(page_size);
    board.load(&client).await.map_err(io::Error::other)?;
    print!("{}", BoardView(&board));
    Ok(())
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    let cli = Cli::parse();

    let config = Config::from_env().map_err(io::Error::other)?;
    init_tracing(&config.log_dir)?;

    match cli.command() {
        Command::Serve { in_memory } => serve(config, in_memory).await,
        Command::Migrate => {
            let pool = connect(&config).await?;
            migrate(&pool).await?;
            pool.close().await;
            Ok(())
        }
        Command::Board { api_url, page_size } => {
            let api_url = api_url.unwrap_or_else(|| config.api_url.clone());
            print_board(&api_url, page_size).await
        }
    }
}
