use std::net::TcpListener;
use std::path::PathBuf;

use actix_cors::Cors;
use actix_web::dev::Server;
use actix_web::web;
use actix_web::web::Data;
use actix_web::App;
use actix_web::HttpServer;
use tracing_actix_web::TracingLogger;

use crate::configuration::Settings;
use crate::relay_client::SUBSCRIBE_PATH;
use crate::routes::health_check;
use crate::routes::proxy_subscribe;
use crate::routes::static_assets;
use crate::routes::PropagateStatus;
use crate::upstream_client::UpstreamClient;

/// Wrapper for actix's `Server` with access to the bound port. Not to be
/// confused with actix's `App`!
pub struct Application {
    /// Left private; use `get_port` to access
    port: u16,
    server: Server,
}

impl Application {
    /// Bind the configured address and build the `Server` (not yet running).
    pub async fn build(cfg: Settings) -> Result<Self, anyhow::Error> {
        let addr = format!("{}:{}", cfg.application.host, cfg.application.port);
        let listener = TcpListener::bind(&addr)?;

        // port 0 in the config means "let the OS pick"; the real one is here
        let port = listener.local_addr()?.port();
        tracing::info!("listening on {addr} (port {port})");

        let server = run(
            listener,
            cfg.upstream.client(),
            PropagateStatus(cfg.upstream.propagate_status),
            cfg.application.static_dir,
        )?;

        Ok(Self { port, server })
    }

    pub fn get_port(&self) -> u16 { self.port }

    /// Because this consumes `self`, this should be the final function call (or
    /// passed to `tokio::spawn`)
    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> { self.server.await }
}

/// The server is not responsible for binding to an address, it only listens to
/// an already bound address.
///
/// Declares all endpoints. Order matters: the static file service is mounted
/// at `/` and must come last.
pub fn run(
    listener: TcpListener,
    upstream: UpstreamClient,
    propagate: PropagateStatus,
    static_dir: PathBuf,
) -> Result<Server, anyhow::Error> {
    // `Data` is externally an `Arc`, so every worker shares one client (and
    // one connection pool)
    let upstream = Data::new(upstream);
    let propagate = Data::new(propagate);

    // actix spins up one worker per core, each running its own copy of the
    // `App` built by this closure
    let server = HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(TracingLogger::default())
            .route("/health_check", web::get().to(health_check))
            .route(SUBSCRIBE_PATH, web::post().to(proxy_subscribe))
            .service(static_assets(&static_dir))
            .app_data(upstream.clone())
            .app_data(propagate.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
