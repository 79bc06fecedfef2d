//! Endpoint selection and failover tests.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Mutex;

use paybox_gateway::config::schema::{GlobalsConfig, ProbeConfig, ServerConfig, ServerRegistry};
use paybox_gateway::endpoint::probe::{HealthProbe, HttpProbe, ProbeError};
use paybox_gateway::endpoint::selector::{select_endpoint, ServerError};

mod common;

/// Probe double that serves canned bodies per URL and records call order.
struct ScriptedProbe {
    responses: HashMap<String, String>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedProbe {
    fn new(responses: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            responses: responses.into_iter().collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl HealthProbe for ScriptedProbe {
    async fn fetch(&self, url: &str) -> Result<String, ProbeError> {
        self.calls.lock().unwrap().push(url.to_string());
        self.responses
            .get(url)
            .cloned()
            .ok_or_else(|| ProbeError::Transport("connection refused".to_string()))
    }
}

fn registry() -> ServerRegistry {
    let server = |host: &str| ServerConfig {
        protocol: "https".to_string(),
        host: host.to_string(),
        health_path: "/load.html".to_string(),
    };
    ServerRegistry {
        primary: server("tpeweb.example.com"),
        secondary: server("tpeweb1.example.com"),
        preprod: server("preprod-tpeweb.example.com"),
    }
}

fn globals(production: bool) -> GlobalsConfig {
    GlobalsConfig {
        hmac_key: "41424344".to_string(),
        production,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_failover_probes_primary_before_secondary() {
    let servers = registry();
    let probe = ScriptedProbe::new([
        (servers.primary.health_url(), common::BUSY_PAGE.to_string()),
        (servers.secondary.health_url(), common::LIVE_PAGE.to_string()),
    ]);

    let selected = select_endpoint(&globals(true), &servers, &probe).await.unwrap();

    assert_eq!(selected, servers.secondary);
    assert_eq!(
        probe.calls(),
        vec![servers.primary.health_url(), servers.secondary.health_url()]
    );
}

#[tokio::test]
async fn test_healthy_primary_short_circuits() {
    let servers = registry();
    let probe = ScriptedProbe::new([
        (servers.primary.health_url(), common::LIVE_PAGE.to_string()),
        (servers.secondary.health_url(), common::LIVE_PAGE.to_string()),
    ]);

    let selected = select_endpoint(&globals(true), &servers, &probe).await.unwrap();

    assert_eq!(selected, servers.primary);
    assert_eq!(probe.calls(), vec![servers.primary.health_url()]);
}

#[tokio::test]
async fn test_transport_error_fails_over() {
    let servers = registry();
    // Primary has no scripted response: the probe reports a transport error.
    let probe = ScriptedProbe::new([(
        servers.secondary.health_url(),
        common::LIVE_PAGE.to_string(),
    )]);

    let selected = select_endpoint(&globals(true), &servers, &probe).await.unwrap();

    assert_eq!(selected, servers.secondary);
}

#[tokio::test]
async fn test_exhaustion_fails_with_none_available() {
    let servers = registry();
    let probe = ScriptedProbe::new([
        (servers.primary.health_url(), common::BUSY_PAGE.to_string()),
        (
            servers.secondary.health_url(),
            "<html><body>maintenance</body></html>".to_string(),
        ),
    ]);

    let err = select_endpoint(&globals(true), &servers, &probe)
        .await
        .unwrap_err();

    assert_eq!(err, ServerError::NoneAvailable);
    assert_eq!(probe.calls().len(), 2);
}

#[tokio::test]
async fn test_non_production_probes_only_preprod() {
    let servers = registry();
    let probe = ScriptedProbe::new([
        (servers.primary.health_url(), common::LIVE_PAGE.to_string()),
        (servers.secondary.health_url(), common::LIVE_PAGE.to_string()),
        (servers.preprod.health_url(), common::LIVE_PAGE.to_string()),
    ]);

    let selected = select_endpoint(&globals(false), &servers, &probe).await.unwrap();

    assert_eq!(selected, servers.preprod);
    assert_eq!(probe.calls(), vec![servers.preprod.health_url()]);
}

#[tokio::test]
async fn test_unhealthy_preprod_has_no_fallback() {
    let servers = registry();
    let probe = ScriptedProbe::new([
        (servers.preprod.health_url(), common::BUSY_PAGE.to_string()),
        (servers.primary.health_url(), common::LIVE_PAGE.to_string()),
    ]);

    let err = select_endpoint(&globals(false), &servers, &probe)
        .await
        .unwrap_err();

    assert_eq!(err, ServerError::NoneAvailable);
    assert_eq!(probe.calls(), vec![servers.preprod.health_url()]);
}

#[tokio::test]
async fn test_http_probe_against_mock_servers() {
    let primary_addr: SocketAddr = "127.0.0.1:28271".parse().unwrap();
    let secondary_addr: SocketAddr = "127.0.0.1:28272".parse().unwrap();
    common::start_mock_server(primary_addr, common::BUSY_PAGE).await;
    common::start_mock_server(secondary_addr, common::LIVE_PAGE).await;

    let http_server = |addr: SocketAddr| ServerConfig {
        protocol: "http".to_string(),
        host: addr.to_string(),
        health_path: "/load.html".to_string(),
    };
    let servers = ServerRegistry {
        primary: http_server(primary_addr),
        secondary: http_server(secondary_addr),
        preprod: ServerConfig::default(),
    };

    let probe = HttpProbe::new(&ProbeConfig { timeout_secs: 5 });
    let selected = select_endpoint(&globals(true), &servers, &probe).await.unwrap();

    assert_eq!(selected.host, secondary_addr.to_string());
}

#[tokio::test]
async fn test_http_probe_connection_refused_exhausts() {
    // Nothing listens on these ports.
    let http_server = |port: u16| ServerConfig {
        protocol: "http".to_string(),
        host: format!("127.0.0.1:{}", port),
        health_path: "/load.html".to_string(),
    };
    let servers = ServerRegistry {
        primary: http_server(28281),
        secondary: http_server(28282),
        preprod: ServerConfig::default(),
    };

    let probe = HttpProbe::new(&ProbeConfig { timeout_secs: 1 });
    let err = select_endpoint(&globals(true), &servers, &probe)
        .await
        .unwrap_err();

    assert_eq!(err, ServerError::NoneAvailable);
}
