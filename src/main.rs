use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use sqlx::PgPool;

use taskvault::auth::{Authenticator, TokenManager};
use taskvault::config::Config;
use taskvault::routes::{self, health};
use taskvault::store::{PgTaskStore, PgUserStore};
use taskvault::tasks::TaskService;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    let pool = PgPool::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    // The signing secret leaves the configuration exactly once, here.
    let tokens = TokenManager::from_secret(&config.jwt_secret);
    let authenticator = Authenticator::new(PgUserStore::new(pool.clone()), tokens.clone());
    let task_service = TaskService::new(PgTaskStore::new(pool.clone()));

    log::info!("Starting taskvault server at {}", config.server_url());

    let bind_addr = (config.server_host.clone(), config.server_port);
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(tokens.clone()))
            .app_data(web::Data::new(authenticator.clone()))
            .app_data(web::Data::new(task_service.clone()))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(health::health)
            .service(web::scope("/api").configure(routes::config))
    })
    .bind(bind_addr)?
    .run()
    .await
}
