//! Student service binary.
//!
//! Configuration is read from the environment:
//!
//! * `HTTP_ADDR` - listen address, default `0.0.0.0:8080`
//! * `DATABASE_URL` - PostgreSQL connection string; when unset the service
//!   falls back to a volatile in-memory store suitable only for development
//! * `RUST_LOG` - tracing filter, e.g. `info,student_service=debug`

use std::io;
use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use student_service::domain::ports::StudentRepository;
use student_service::inbound::http::health::{self, HealthState};
use student_service::middleware::request_log::RequestLog;
use student_service::outbound::persistence::diesel_student_repository::{
    run_pending_migrations, DieselStudentRepository,
};
use student_service::outbound::persistence::{DbPool, InMemoryStudentRepository, PoolConfig};
#[cfg(debug_assertions)]
use student_service::doc;
use student_service::inbound;

const DEFAULT_HTTP_ADDR: &str = "0.0.0.0:8080";

fn init_tracing() {
    let result = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init();
    if let Err(err) = result {
        eprintln!("failed to initialise tracing: {err}");
    }
}

async fn build_repository() -> io::Result<Arc<dyn StudentRepository>> {
    match std::env::var("DATABASE_URL") {
        Ok(url) => {
            run_pending_migrations(&url)
                .await
                .map_err(|err| io::Error::other(err.to_string()))?;
            let pool = DbPool::new(PoolConfig::new(url))
                .await
                .map_err(|err| io::Error::other(err.to_string()))?;
            info!("using PostgreSQL student repository");
            Ok(Arc::new(DieselStudentRepository::new(pool)))
        }
        Err(_) => {
            warn!("DATABASE_URL is not set; falling back to the in-memory store (data is not persisted)");
            Ok(Arc::new(InMemoryStudentRepository::new()))
        }
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    init_tracing();

    let addr = std::env::var("HTTP_ADDR").unwrap_or_else(|_| DEFAULT_HTTP_ADDR.to_owned());
    let repository = build_repository().await?;
    let state = inbound::http::state::HttpState::new(repository);
    let health_state = web::Data::new(HealthState::new());

    let app_health = health_state.clone();
    let server = HttpServer::new(move || {
        let app = App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(app_health.clone())
            .wrap(RequestLog)
            .service(web::scope("/api").configure(inbound::http::configure))
            .service(health::ready)
            .service(health::live);
        #[cfg(debug_assertions)]
        let app = app.service(doc::openapi_json);
        app
    })
    .bind(&addr)?;

    info!(%addr, "student service listening");
    health_state.mark_ready();
    server.run().await
}
