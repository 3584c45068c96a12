use std::env;
use std::time::Duration;

use dotenvy::dotenv;
use fruitstand::domain::catalog::CatalogSnapshot;
use fruitstand::domain::ports::CatalogSource;
use fruitstand::{
    build_server, create_pool, run_migrations, spawn_catalog_refresh, CatalogFeed,
    DieselCatalogSource, TokenManager,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set");
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse()
        .expect("PORT must be a valid number");
    let refresh_secs: u64 = env::var("CATALOG_REFRESH_SECS")
        .unwrap_or_else(|_| "30".to_string())
        .parse()
        .expect("CATALOG_REFRESH_SECS must be a valid number");

    let pool = create_pool(&database_url);
    run_migrations(&pool);

    let catalog = DieselCatalogSource::new(pool.clone());
    let feed = match catalog.snapshot() {
        Ok(snapshot) => CatalogFeed::new(snapshot),
        Err(e) => {
            log::warn!("starting with an empty catalog: {e}");
            CatalogFeed::new(CatalogSnapshot::default())
        }
    };
    spawn_catalog_refresh(catalog, feed.clone(), Duration::from_secs(refresh_secs));

    let tokens = TokenManager::new(jwt_secret);

    log::info!("Starting server at http://{}:{}", host, port);

    build_server(pool, feed, tokens, &host, port)?.await
}
