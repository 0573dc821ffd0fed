use std::sync::Arc;

use actix_identity::IdentityMiddleware;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::{App, HttpServer, middleware, web};
use dotenvy::dotenv;
use pushkind_common::models::config::CommonServerConfig;
use pushkind_common::routes::logout;

use pushkind_pos::config::ServerConfig;
use pushkind_pos::db::establish_connection_pool;
use pushkind_pos::notifications::{LogSender, NotificationSender, TicketzSender};
use pushkind_pos::repository::DieselRepository;
use pushkind_pos::routes::cash_sessions::{
    add_register, close_session, list_registers, open_session, show_current_session,
    show_session,
};
use pushkind_pos::routes::catalog::{add_customer, add_product, show_customer, show_product};
use pushkind_pos::routes::inventory::{
    add_inventory_item, list_inventory, replace_recipe, show_inventory_item, show_recipe,
};
use pushkind_pos::routes::orders::{
    add_item, link_customer, list_orders, open_order, remove_item, settle_order,
    show_customer_order, show_order, show_table_order, update_status,
};
use pushkind_pos::routes::reports::{sales_report, sales_report_csv, show_dashboard};
use pushkind_pos::routes::tables::{add_table, list_tables, show_table};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    let secret_key = match &config.secret {
        Some(secret) => Key::from(secret.as_bytes()),
        None => Key::generate(),
    };

    let common_config = CommonServerConfig {
        secret: config.secret.clone().unwrap_or_default(),
        auth_service_url: config.auth_service_url.clone(),
    };

    let pool = match establish_connection_pool(&config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);

    let notifier: Arc<dyn NotificationSender> = match &config.ticketz {
        Some(ticketz) => {
            log::info!("Customer notifications go through Ticketz");
            Arc::new(TicketzSender::new(&ticketz.api_url, &ticketz.api_token))
        }
        None => {
            log::warn!("Ticketz is not configured, customer notifications are only logged");
            Arc::new(LogSender)
        }
    };
    let notifier = web::Data::from(notifier);

    let domain = config.domain.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .cookie_domain(Some(format!(".{domain}")))
                    .build(),
            )
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(logout)
            .service(
                web::scope("/api/v1")
                    .service(list_tables)
                    .service(show_table)
                    .service(add_table)
                    .service(show_table_order)
                    .service(add_product)
                    .service(show_product)
                    .service(add_customer)
                    .service(show_customer)
                    .service(show_customer_order)
                    .service(list_inventory)
                    .service(show_inventory_item)
                    .service(add_inventory_item)
                    .service(show_recipe)
                    .service(replace_recipe)
                    .service(list_registers)
                    .service(add_register)
                    .service(open_session)
                    .service(show_current_session)
                    .service(show_session)
                    .service(close_session)
                    .service(open_order)
                    .service(list_orders)
                    .service(show_order)
                    .service(add_item)
                    .service(remove_item)
                    .service(link_customer)
                    .service(update_status)
                    .service(settle_order)
                    .service(show_dashboard)
                    .service(sales_report_csv)
                    .service(sales_report),
            )
            .app_data(web::Data::new(repo.clone()))
            .app_data(notifier.clone())
            .app_data(web::Data::new(common_config.clone()))
    })
    .bind((config.address.as_str(), config.port))?
    .run()
    .await
}
