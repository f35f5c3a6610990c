//! Both listeners started together from one configuration.

use axum::http::StatusCode;
use flareproxy::{Adapter, AdapterConfig};
use tokio::sync::oneshot;

mod common;

use common::{direct_client, proxied_client, solved, start_stub_upstream};

#[tokio::test]
async fn direct_and_proxy_listeners_share_one_upstream() {
    let stub = start_stub_upstream(|_| (200, solved("<p>shared</p>"))).await;

    let config = AdapterConfig {
        upstream_url: stub.url.clone(),
        bind_host: "127.0.0.1".into(),
        direct_port: 0,
        proxy_port: Some(0),
        metrics_address: None,
    };
    let adapter = Adapter::bind(config).await.unwrap();
    assert_eq!(adapter.config().upstream_url, stub.url);
    let direct_addr = adapter.direct_addr().unwrap();
    let proxy_addr = adapter.proxy_addr().unwrap().unwrap();

    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let running = tokio::spawn(adapter.serve(async move {
        let _ = stop_rx.await;
    }));

    let direct = direct_client()
        .get(format!("http://{}/example.com/a", direct_addr))
        .send()
        .await
        .unwrap();
    assert_eq!(direct.status(), StatusCode::OK);
    assert_eq!(direct.text().await.unwrap(), "<p>shared</p>");

    let proxied = proxied_client(proxy_addr)
        .get("http://example.com/b")
        .send()
        .await
        .unwrap();
    assert_eq!(proxied.status(), StatusCode::OK);
    assert_eq!(proxied.text().await.unwrap(), "<p>shared</p>");

    assert_eq!(
        stub.urls(),
        vec!["https://example.com/a".to_string(), "https://example.com/b".to_string()]
    );

    stop_tx.send(()).unwrap();
    running.await.unwrap().unwrap();
}

#[tokio::test]
async fn proxy_listener_is_optional() {
    let config = AdapterConfig {
        bind_host: "127.0.0.1".into(),
        direct_port: 0,
        proxy_port: None,
        ..Default::default()
    };
    let adapter = Adapter::bind(config).await.unwrap();
    assert_eq!(adapter.config().proxy_port, None);
    assert!(adapter.config().proxy_address().is_none());
    assert!(adapter.proxy_addr().is_none());
    assert!(adapter.direct_addr().is_ok());

    // Serving a direct-only adapter stops cleanly on the signal.
    adapter.serve(async {}).await.unwrap();
}

#[tokio::test]
async fn bind_failure_is_reported() {
    let taken = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = taken.local_addr().unwrap().port();

    let config = AdapterConfig {
        bind_host: "127.0.0.1".into(),
        direct_port: port,
        ..Default::default()
    };
    let err = Adapter::bind(config).await.err().unwrap();
    assert!(err.to_string().contains(&port.to_string()));
}
