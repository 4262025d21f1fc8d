//! Server settings and the serving loop.
//!
//! Settings come from three layers, later overriding earlier: compiled
//! defaults, an optional `config/rfcontrol.toml`, and `RFCONTROL_`-prefixed
//! environment variables (`RFCONTROL_GRPC__PORT=50052`).

use crate::grpc::rf_control_service::RfControlServiceImpl;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use rf_hardware::{DeviceRegistry, SimulatorSettings};
use rf_proto::rf_control_service_server::RfControlServiceServer;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;
use std::sync::Arc;
use tonic::transport::Server;

/// Default location of the optional settings file.
pub const DEFAULT_CONFIG_PATH: &str = "config/rfcontrol.toml";

/// Complete server configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub grpc: GrpcSettings,
    pub simulator: SimulatorSettings,
}

/// Transport-level settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GrpcSettings {
    pub bind_address: IpAddr,
    pub port: u16,
}

impl Default for GrpcSettings {
    fn default() -> Self {
        Self {
            bind_address: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 50051,
        }
    }
}

impl GrpcSettings {
    /// The socket address to listen on.
    pub fn socket(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }
}

impl ServerSettings {
    /// Load settings from the default file location plus environment.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(Path::new(DEFAULT_CONFIG_PATH))
    }

    /// Load settings from a specific file path plus environment.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(ServerSettings::default()));
        if path.exists() {
            figment = figment.merge(Toml::file(path));
        } else {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
        }
        figment = figment.merge(Env::prefixed("RFCONTROL_").split("__"));
        Ok(figment.extract()?)
    }
}

/// The RF control gRPC server.
pub struct RfControlServer {
    settings: ServerSettings,
}

impl RfControlServer {
    pub fn new(settings: ServerSettings) -> Self {
        Self { settings }
    }

    /// Build the registry and serve until a shutdown signal arrives.
    pub async fn serve(self) -> anyhow::Result<()> {
        let addr = self.settings.grpc.socket();
        let registry = Arc::new(DeviceRegistry::new(self.settings.simulator));
        let service = RfControlServiceImpl::new(registry);

        tracing::info!(%addr, "starting RF control server");
        Server::builder()
            .add_service(RfControlServiceServer::new(service))
            .serve_with_shutdown(addr, shutdown_signal())
            .await?;
        tracing::info!("server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        return;
    }
    tracing::info!("shutdown signal received");
}
