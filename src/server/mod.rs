//! The key-holding proxy in front of the Gemini API.

pub mod handlers;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{
    dev::{fn_service, ServiceRequest},
    middleware, web, App, HttpServer,
};

use crate::{
    config::Config,
    gemini::{proxy_client::GENERATE_PATH, GeminiClient, GenerateTransport},
};

pub struct ProxyState {
    pub upstream: Arc<dyn GenerateTransport>,
    pub started_at: Instant,
}

impl ProxyState {
    pub fn new(upstream: Arc<dyn GenerateTransport>) -> Self {
        Self {
            upstream,
            started_at: Instant::now(),
        }
    }

    /// Without a key the client still builds; requests are refused per call.
    pub fn from_config(config: &Config) -> Self {
        Self::new(Arc::new(GeminiClient::new(&config.gemini)))
    }
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub static_dir: Option<PathBuf>,
    pub max_body_bytes: usize,
}

impl ServerSettings {
    pub fn from_config(config: &Config) -> Self {
        let static_dir = if config.static_dir.is_dir() {
            Some(config.static_dir.clone())
        } else {
            log::warn!(
                "Static directory {} not found; serving the API only",
                config.static_dir.display()
            );
            None
        };

        Self {
            static_dir,
            max_body_bytes: config.max_body_bytes(),
        }
    }
}

/// Registers the API routes and, when present, the SPA files.
pub fn configure(cfg: &mut web::ServiceConfig, settings: &ServerSettings) {
    cfg.app_data(
        web::JsonConfig::default()
            .limit(settings.max_body_bytes)
            .error_handler(handlers::json_error_handler),
    )
    .route("/health", web::get().to(handlers::health));

    let generate = web::resource(GENERATE_PATH).route(web::post().to(handlers::generate));

    match &settings.static_dir {
        Some(dir) => {
            // Any other method on the API path gets the SPA shell, like every unknown GET.
            let index = dir.join("index.html");
            let api_index = index.clone();
            cfg.service(generate.default_service(fn_service(move |req: ServiceRequest| {
                let index = api_index.clone();
                async move { handlers::spa_index(&index, req).await }
            })));
            cfg.service(
                Files::new("/", dir)
                    .index_file("index.html")
                    .default_handler(fn_service(move |req: ServiceRequest| {
                        let index = index.clone();
                        async move { handlers::spa_index(&index, req).await }
                    })),
            );
        }
        None => {
            cfg.service(generate);
        }
    }
}

pub async fn run(config: Config) -> std::io::Result<()> {
    let state = web::Data::new(ProxyState::from_config(&config));
    let settings = ServerSettings::from_config(&config);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::Logger::new("%a \"%r\" %s %b %Dms"))
            .wrap(Cors::permissive())
            .configure(|cfg| configure(cfg, &settings))
    })
    .bind(config.bind_address())?
    .run()
    .await
}
