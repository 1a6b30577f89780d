use once_cell::sync::Lazy;
use secrecy::Secret;
use subscribe_relay::configuration::get_configuration;
use subscribe_relay::configuration::Settings;
use subscribe_relay::relay_client::RelayClient;
use subscribe_relay::startup::Application;
use subscribe_relay::telemetry::get_subscriber;
use subscribe_relay::telemetry::init_subscriber;
use wiremock::MockServer;

/// Path the mock upstream is mounted at; mimics the Apps Script webhook.
pub const UPSTREAM_PATH: &str = "/macros/s/test/exec";

/// Init the tracing subscriber once for the whole test binary.
///
/// To opt in to verbose logging, use the env var `TEST_LOG`:
///
/// ```sh
///      TEST_LOG=true cargo test [test_name] | bunyan
/// ```
static TRACING: Lazy<()> = Lazy::new(|| {
    // the two sinks are different closure types, hence the match arms
    match std::env::var("TEST_LOG") {
        Ok(_) => {
            let subscriber = get_subscriber("test", "debug", std::io::stdout);
            init_subscriber(subscriber).expect("init tracing");
        }
        Err(_) => {
            let subscriber = get_subscriber("test", "debug", std::io::sink);
            init_subscriber(subscriber).expect("init tracing");
        }
    };
});

pub struct TestApp {
    pub addr: String,
    /// Stands in for the third-party webhook
    pub upstream_server: MockServer,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// `POST /api/proxy/subscribe` with a json body
    pub async fn post_subscribe(
        &self,
        body: &serde_json::Value,
    ) -> reqwest::Response {
        self.api_client
            .post(format!("{}/api/proxy/subscribe", self.addr))
            .json(body)
            .send()
            .await
            .expect("execute request")
    }

    /// `POST /api/proxy/subscribe` with whatever bytes the caller wants
    pub async fn post_subscribe_raw(
        &self,
        body: &str,
    ) -> reqwest::Response {
        self.api_client
            .post(format!("{}/api/proxy/subscribe", self.addr))
            .header("Content-Type", "application/json")
            .body(body.to_owned())
            .send()
            .await
            .expect("execute request")
    }

    pub async fn get(
        &self,
        path: &str,
    ) -> reqwest::Response {
        self.api_client
            .get(format!("{}{path}", self.addr))
            .send()
            .await
            .expect("execute request")
    }

    /// A form-side client pointed at this app
    pub fn relay_client(&self) -> RelayClient { RelayClient::new(Some(self.addr.clone())) }
}

/// An address nothing is listening on
pub fn unused_address() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    format!("http://127.0.0.1:{port}")
}

/// Spawn the app with the default (local) config, a random port and a mock
/// upstream.
pub async fn spawn_app() -> TestApp { spawn_app_with(|_| {}).await }

/// Like `spawn_app`, but `customise` gets the last word on the config.
pub async fn spawn_app_with(customise: impl FnOnce(&mut Settings)) -> TestApp {
    Lazy::force(&TRACING);

    let upstream_server = MockServer::start().await;

    let cfg = {
        let mut cfg = get_configuration().expect("read configuration");
        // port 0: the OS picks a free port, which is then read back from the app
        cfg.application.port = 0;
        cfg.upstream.url = Secret::new(format!("{}{UPSTREAM_PATH}", upstream_server.uri()));
        customise(&mut cfg);
        cfg
    };

    let app = Application::build(cfg).await.expect("build app");
    let addr = format!("http://127.0.0.1:{}", app.get_port());
    tokio::spawn(app.run_until_stopped());

    TestApp {
        addr,
        upstream_server,
        api_client: reqwest::Client::new(),
    }
}
