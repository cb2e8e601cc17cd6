use anyhow::Result;
use std::time::Duration;

use switchboard_core::config::Config;
use switchboard_core::dispatcher::Dispatcher;
use switchboard_core::forwarder::Forwarder;
use switchboard_core::registry::{default_catalog, Registry};

/// Assemble the registry/forwarder/dispatcher from configuration and run the
/// server until ctrl-c.
pub fn run(port: Option<u16>) -> Result<()> {
    let config = Config::from_env();
    let port = port.unwrap_or(config.port);

    let registry = Registry::build(&default_catalog(&config));
    tracing::info!("registry built with {} actions", registry.len());

    let forwarder = Forwarder::new(Duration::from_secs(config.request_timeout_secs));
    let dispatcher = Dispatcher::new(registry, forwarder);

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;
        let actual_port = listener.local_addr()?.port();
        println!("switchboard → http://localhost:{actual_port}");

        tokio::select! {
            res = switchboard_server::serve_on(dispatcher, listener) => res,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("shutting down");
                Ok(())
            }
        }
    })
}
