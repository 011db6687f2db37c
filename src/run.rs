use std::sync::Arc;

use crate::chain::Chain;
use crate::client::{MintClient, MintService};
use crate::config::Config;
use crate::controller::{Controller, ControllerInterface};

/// Starts a controller backed by the HTTP mint client and returns an
/// interface for it. All interactions with the form go through
/// `ControllerInterface`.
pub fn start_controller(config: &Config, chain: Chain) -> eyre::Result<ControllerInterface> {
    let client = MintClient::new(config)?;
    tracing::info!(endpoint = %client.endpoint(), chain = %chain, "Starting mint form");

    Ok(start_controller_with_service(Arc::new(client), chain))
}

/// Same as `start_controller` with a caller-provided mint service.
pub fn start_controller_with_service(
    service: Arc<dyn MintService>,
    chain: Chain,
) -> ControllerInterface {
    let (cmd_send, cmd_recv) = tokio::sync::mpsc::channel(1024);

    let mut controller = Controller::new(chain, service, cmd_recv);
    tokio::spawn(async move {
        controller.run_loop().await;
    });

    ControllerInterface::new(cmd_send)
}
