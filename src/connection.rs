//! Database connection factory
//!
//! Opens one session per call from explicit RDS settings. There is no pool:
//! every invocation gets its own session and drops it when done, which closes
//! the connection and lets the spawned driver task finish. That drop happens
//! on every exit path, error paths included.

use crate::config::RdsConfig;
use crate::error::AppError;
use tokio_postgres::{Client, NoTls};
use tracing::{debug, error};

/// An open database session, released by drop
pub struct DbSession {
    client: Client,
}

impl DbSession {
    pub fn client(&self) -> &Client {
        &self.client
    }
}

/// Open a fresh session using explicit connection values
pub async fn open(rds: &RdsConfig) -> Result<DbSession, AppError> {
    let mut pg = tokio_postgres::Config::new();
    pg.host(&rds.endpoint);
    pg.port(rds.port_number);
    pg.user(&rds.user_name);
    pg.password(&rds.user_pwd);
    pg.dbname(&rds.db_name);

    let use_tls = requires_tls(&rds.endpoint);
    debug!(endpoint = %rds.endpoint, port = rds.port_number, use_tls, "opening connection");

    let client = if use_tls {
        let (client, connection) = pg
            .connect(tls_connector())
            .await
            .map_err(|e| AppError::Connection(e.to_string()))?;
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                error!("connection task ended with error: {}", e);
            }
        });
        client
    } else {
        let (client, connection) = pg
            .connect(NoTls)
            .await
            .map_err(|e| AppError::Connection(e.to_string()))?;
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                error!("connection task ended with error: {}", e);
            }
        });
        client
    };

    Ok(DbSession { client })
}

/// Managed RDS endpoints terminate TLS themselves; plain hosts (local dev,
/// CI containers) do not.
fn requires_tls(endpoint: &str) -> bool {
    endpoint.ends_with(".rds.amazonaws.com")
}

/// Build the TLS connector from the platform trust store
fn tls_connector() -> tokio_postgres_rustls::MakeRustlsConnect {
    let certs = rustls_native_certs::load_native_certs();
    let mut root_store = rustls::RootCertStore::empty();
    for cert in certs.certs {
        root_store.add(cert).ok();
    }

    let tls_config = rustls::ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth();

    tokio_postgres_rustls::MakeRustlsConnect::new(tls_config)
}
