//! Web server for letterfeed.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
#[cfg(unix)]
use tokio::net::UnixListener;

use crate::config::{Config, ServerConfig};
use crate::error::Result;
use crate::feed::FeedService;

use super::handlers::AppState;
use super::router::create_router;

/// Web server for the feed proxy.
pub struct WebServer {
    /// Server configuration.
    server_config: ServerConfig,
    /// Application state.
    state: Arc<AppState>,
}

impl WebServer {
    /// Create a new web server from the full configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let service = FeedService::new(&config.upstream)?;
        let favicon_url = format!(
            "{}/favicon.ico",
            config.upstream.base_url.trim_end_matches('/')
        );

        Ok(Self {
            server_config: config.server.clone(),
            state: Arc::new(AppState {
                service,
                favicon_url,
            }),
        })
    }

    /// Run the web server.
    ///
    /// Binds the configured Unix-domain socket when `server.socket` is
    /// set, otherwise the TCP host/port pair.
    pub async fn run(self) -> std::io::Result<()> {
        let router = create_router(self.state);

        #[cfg(unix)]
        if let Some(socket) = self
            .server_config
            .socket
            .as_deref()
            .filter(|s| !s.is_empty())
        {
            // Remove a stale socket file from a previous run
            if std::path::Path::new(socket).exists() {
                std::fs::remove_file(socket)?;
            }
            let listener = UnixListener::bind(socket)?;
            tracing::info!("Listening on unix socket {}", socket);
            return axum::serve(listener, router.clone()).await;
        }

        let addr = format!("{}:{}", self.server_config.host, self.server_config.port);
        let listener = TcpListener::bind(&addr).await?;
        tracing::info!("Listening on http://{}", listener.local_addr()?);
        axum::serve(listener, router).await
    }

    /// Run the server and return the actual bound TCP address.
    ///
    /// This is useful for testing when binding to port 0.
    pub async fn run_with_addr(self) -> std::io::Result<SocketAddr> {
        let router = create_router(self.state);

        let addr = format!("{}:{}", self.server_config.host, self.server_config.port);
        let listener = TcpListener::bind(&addr).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!("Listening on http://{}", local_addr);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, router).await {
                tracing::error!("Web server error: {}", e);
            }
        });

        Ok(local_addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        let mut config = Config::default();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 0;
        config
    }

    #[tokio::test]
    async fn test_web_server_new() {
        let server = WebServer::new(&test_config()).unwrap();
        assert_eq!(server.server_config.host, "127.0.0.1");
        assert_eq!(
            server.state.favicon_url,
            "http://tinyletter.com/favicon.ico"
        );
    }

    #[tokio::test]
    async fn test_web_server_binds_random_port() {
        let server = WebServer::new(&test_config()).unwrap();
        let addr = server.run_with_addr().await.unwrap();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_ne!(addr.port(), 0);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_web_server_binds_unix_socket() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        use tokio::net::UnixStream;

        let dir = tempfile::tempdir().unwrap();
        let socket = dir.path().join("letterfeed.sock");
        // A stale socket file from a previous run must not prevent the bind
        std::fs::write(&socket, b"stale").unwrap();

        let mut config = test_config();
        config.server.socket = Some(socket.to_str().unwrap().to_string());

        let server = WebServer::new(&config).unwrap();
        tokio::spawn(async move {
            let _ = server.run().await;
        });

        let mut stream = None;
        for _ in 0..50 {
            match UnixStream::connect(&socket).await {
                Ok(s) => {
                    stream = Some(s);
                    break;
                }
                Err(_) => tokio::time::sleep(std::time::Duration::from_millis(10)).await,
            }
        }
        let mut stream = stream.expect("server did not bind the socket");

        stream
            .write_all(b"GET /favicon.ico HTTP/1.1\r\nhost: localhost\r\n\r\n")
            .await
            .unwrap();
        let mut buf = vec![0u8; 1024];
        let n = stream.read(&mut buf).await.unwrap();
        let response = String::from_utf8_lossy(&buf[..n]);

        assert!(response.starts_with("HTTP/1.1 301"));
        assert!(response.contains("http://tinyletter.com/favicon.ico"));
    }
}
