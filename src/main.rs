use actix_web::{App, HttpServer, middleware, web};
use dotenvy::dotenv;

use sign_recipes::ai::AiProviders;
use sign_recipes::config::ServerConfig;
use sign_recipes::db::{establish_connection_pool, run_migrations};
use sign_recipes::repository::DieselRepository;
use sign_recipes::routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let config = ServerConfig::from_env();

    let pool = match establish_connection_pool(&config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };

    match pool.get() {
        Ok(mut conn) => {
            if let Err(e) = run_migrations(&mut conn) {
                log::error!("Failed to run database migrations: {e}");
                std::process::exit(1);
            }
        }
        Err(e) => {
            log::error!("Failed to get database connection: {e}");
            std::process::exit(1);
        }
    }

    let repo = DieselRepository::new(pool);
    let providers = AiProviders::from_config(&config.ai);
    log::info!(
        "Starting server on {}:{} with database {}",
        config.address,
        config.port,
        config.database_url
    );

    let bind = (config.address.clone(), config.port);
    HttpServer::new(move || {
        App::new()
            .wrap(routes::cors(&config.cors_allowed_origin))
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .configure(routes::configure)
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(providers.clone()))
            .app_data(web::Data::new(config.clone()))
    })
    .bind(bind)?
    .run()
    .await
}
