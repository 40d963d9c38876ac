use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::time::Duration;
use user_service::{api, config::Config, database};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

fn init_logger(debug: bool) {
    let level = if debug { "debug" } else { "info" };
    env_logger::init_from_env(env_logger::Env::new().default_filter_or(level));
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            init_logger(false);
            log::error!("❌ Failed to read configuration: {}", e);
            std::process::exit(1);
        }
    };
    init_logger(config.is_debug());

    log::info!("🚀 Starting User Service...");

    let db = database::MongoDB::new(&config.mongodb)
        .map_err(|e| std::io::Error::other(format!("invalid MongoDB configuration: {}", e)))?;
    match db.health_check().await {
        Ok(()) => log::info!("✅ MongoDB reachable"),
        Err(e) => log::warn!("⚠️  MongoDB not reachable yet: {}", e),
    }
    let db_data = web::Data::new(db);

    log::info!("📝 Registering user handler");
    let server = HttpServer::new(move || {
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(db_data.clone())
            .wrap(Logger::default())
            .service(SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi))
            .route("/health", web::get().to(api::health::health_check))
            .configure(api::users::configure)
    })
    .client_request_timeout(REQUEST_TIMEOUT)
    .client_disconnect_timeout(REQUEST_TIMEOUT);

    #[cfg(unix)]
    let server = if config.listen.is_socket() {
        let socket_path = config.listen.socket_path(&std::env::current_exe()?);
        log::debug!("socket path: {}", socket_path.display());
        if socket_path.exists() {
            std::fs::remove_file(&socket_path)?;
        }
        let server = server.bind_uds(&socket_path)?;
        log::info!("🌐 Server is listening on unix socket: {}", socket_path.display());
        server
    } else {
        let server = server.bind(config.listen.address())?;
        log::info!("🌐 Server is listening on {}", config.listen.address());
        server
    };

    #[cfg(not(unix))]
    let server = {
        if config.listen.is_socket() {
            log::warn!("⚠️  Unix sockets unsupported on this platform, falling back to TCP");
        }
        let server = server.bind(config.listen.address())?;
        log::info!("🌐 Server is listening on {}", config.listen.address());
        server
    };

    log::info!(
        "📚 Swagger UI available at /swagger-ui/, OpenAPI spec at /api-docs/openapi.json"
    );

    server.run().await
}
