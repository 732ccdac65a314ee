use std::io;

use actix_web::{middleware::Logger, App, HttpServer};
use todo_manager::{app, AppServices, Config};

fn startup_error(err: todo_manager::AppError) -> io::Error {
    io::Error::new(io::ErrorKind::Other, err.to_string())
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(startup_error)?;
    let services = AppServices::from_config(&config)
        .await
        .map_err(startup_error)?;

    log::info!("Starting todo-manager server at {}", config.server_url());
    log::info!("Accepting browser requests from {}", config.frontend_url);

    let frontend_url = config.frontend_url.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(app::cors(&frontend_url))
            .wrap(Logger::default())
            .configure(|cfg| services.configure(cfg))
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
