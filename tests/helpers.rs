// Shared test helpers: upstream fixtures and an in-process server.
//
// Included with `mod helpers;` from the integration test files.

use std::net::SocketAddr;
use std::time::Duration;

use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use countries_dashboard::{serve_with_shutdown, AppState, Config, LogFormat, LogLevel};

/// A REST Countries v3.1 record with every field the dashboard requests.
#[allow(dead_code)] // Used by other test files
pub fn country_json(common: &str, cca2: &str, cca3: &str, population: u64) -> Value {
    json!({
        "name": {
            "common": common,
            "official": format!("Republic of {}", common),
            "nativeName": {
                "fra": { "official": format!("République de {}", common), "common": common }
            }
        },
        "capital": [format!("{} City", common)],
        "region": "Europe",
        "subregion": "Western Europe",
        "population": population,
        "area": 1000.5,
        "flags": {
            "png": format!("https://flagcdn.com/w320/{}.png", cca2.to_lowercase()),
            "svg": format!("https://flagcdn.com/{}.svg", cca2.to_lowercase())
        },
        "cca2": cca2,
        "cca3": cca3,
        "currencies": { "EUR": { "name": "Euro", "symbol": "€" } },
        "languages": { "fra": "French" },
        "borders": ["DEU"],
        "continents": ["Europe"]
    })
}

/// Config pointed at a mock countries API, tuned for fast tests.
#[allow(dead_code)] // Used by other test files
pub fn test_config(countries_api_url: &str) -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        countries_api_url: countries_api_url.to_string(),
        countries_timeout: Duration::from_secs(5),
        relay_timeout: Duration::from_secs(2),
        user_agent: "Countries Dashboard/1.0".to_string(),
        site_url: "https://dashboard.test".to_string(),
        log_level: LogLevel::Error, // Reduce noise in tests
        log_format: LogFormat::Plain,
        ..Default::default()
    }
}

/// A running server; dropping it without `stop` leaves the task to the runtime.
#[allow(dead_code)] // Used by other test files
pub struct TestServer {
    pub addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    handle: tokio::task::JoinHandle<anyhow::Result<()>>,
}

#[allow(dead_code)] // Used by other test files
impl TestServer {
    pub fn url(&self, path_and_query: &str) -> String {
        format!("http://{}{}", self.addr, path_and_query)
    }

    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        self.handle
            .await
            .expect("Server task panicked")
            .expect("Server returned an error");
    }
}

/// Binds an ephemeral port and serves the router built from `config`.
#[allow(dead_code)] // Used by other test files
pub async fn spawn_server(config: &Config) -> TestServer {
    let state = AppState::from_config(config).expect("Failed to build app state");
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local address");

    let (tx, rx) = oneshot::channel::<()>();
    let handle = tokio::spawn(serve_with_shutdown(listener, state, async {
        let _ = rx.await;
    }));

    TestServer {
        addr,
        shutdown: Some(tx),
        handle,
    }
}
