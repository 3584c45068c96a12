pub mod application;
pub mod auth;
pub mod db;
pub mod domain;
pub mod errors;
pub mod feed;
pub mod handlers;
pub mod infrastructure;
pub mod schema;

use std::time::Duration;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use application::accounts::AccountService;
use application::carts::CartRegistry;
use application::checkout::CheckoutService;
use application::orders::OrderQueryService;
use domain::ports::CatalogSource;
use infrastructure::order_sink::DieselOrderStore;
use infrastructure::user_repo::DieselUserRepository;

pub use auth::TokenManager;
pub use db::{create_pool, DbPool};
pub use feed::CatalogFeed;
pub use infrastructure::catalog_repo::DieselCatalogSource;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) {
    let mut conn = pool.get().expect("Failed to get DB connection for migrations");
    conn.run_pending_migrations(MIGRATIONS)
        .expect("Failed to run database migrations");
}

/// Everything the handlers need, shared across workers.
pub struct AppState {
    pub accounts: AccountService<DieselUserRepository>,
    pub checkout: CheckoutService<DieselOrderStore, DieselUserRepository>,
    pub orders: OrderQueryService<DieselOrderStore>,
    pub carts: CartRegistry,
    pub feed: CatalogFeed,
    pub tokens: TokenManager,
}

impl AppState {
    pub fn new(pool: DbPool, feed: CatalogFeed, tokens: TokenManager) -> Self {
        let users = DieselUserRepository::new(pool.clone());
        let store = DieselOrderStore::new(pool);
        AppState {
            accounts: AccountService::new(users.clone()),
            checkout: CheckoutService::new(store.clone(), users),
            orders: OrderQueryService::new(store),
            carts: CartRegistry::new(),
            feed,
            tokens,
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::sign_up,
        handlers::auth::sign_in,
        handlers::catalog::list_products,
        handlers::catalog::list_advertisements,
        handlers::cart::get_cart,
        handlers::cart::add_item,
        handlers::cart::set_quantity,
        handlers::cart::remove_item,
        handlers::checkout::place_order,
        handlers::orders::list_orders,
        handlers::orders::get_order,
        handlers::profile::get_profile,
        handlers::profile::update_profile,
    ),
    tags(
        (name = "auth", description = "Sign-up and sign-in"),
        (name = "catalog", description = "Product and advertisement browsing"),
        (name = "cart", description = "Per-user shopping cart"),
        (name = "checkout", description = "Order submission"),
        (name = "orders", description = "Order history"),
        (name = "profile", description = "Profile management"),
    )
)]
pub struct ApiDoc;

/// Periodically reload the catalog from its source and publish fresh
/// snapshots to the feed. Subscribers are only woken when the catalog
/// actually changed.
pub fn spawn_catalog_refresh<C: CatalogSource + Clone>(source: C, feed: CatalogFeed, every: Duration) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        interval.tick().await;
        loop {
            interval.tick().await;
            let src = source.clone();
            match web::block(move || src.snapshot()).await {
                Ok(Ok(snapshot)) => {
                    if *feed.current() != snapshot {
                        feed.publish(snapshot);
                    }
                }
                Ok(Err(e)) => log::warn!("catalog refresh failed: {e}"),
                Err(e) => log::warn!("catalog refresh task failed: {e}"),
            }
        }
    });
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    pool: DbPool,
    feed: CatalogFeed,
    tokens: TokenManager,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let state = web::Data::new(AppState::new(pool, feed, tokens));

    Ok(HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .service(
                web::scope("/auth")
                    .route("/signup", web::post().to(handlers::auth::sign_up))
                    .route("/signin", web::post().to(handlers::auth::sign_in)),
            )
            .service(
                web::scope("/catalog")
                    .route("", web::get().to(handlers::catalog::list_products))
                    .route(
                        "/advertisements",
                        web::get().to(handlers::catalog::list_advertisements),
                    ),
            )
            .service(
                web::scope("/cart")
                    .route("", web::get().to(handlers::cart::get_cart))
                    .route("/items", web::post().to(handlers::cart::add_item))
                    .route(
                        "/items/{product_id}",
                        web::put().to(handlers::cart::set_quantity),
                    )
                    .route(
                        "/items/{product_id}",
                        web::delete().to(handlers::cart::remove_item),
                    ),
            )
            .service(
                web::scope("/checkout")
                    .route("", web::post().to(handlers::checkout::place_order)),
            )
            .service(
                web::scope("/orders")
                    .route("", web::get().to(handlers::orders::list_orders))
                    .route("/{id}", web::get().to(handlers::orders::get_order)),
            )
            .service(
                web::scope("/profile")
                    .route("", web::get().to(handlers::profile::get_profile))
                    .route("", web::put().to(handlers::profile::update_profile)),
            )
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}
