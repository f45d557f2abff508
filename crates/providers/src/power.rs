//! Shutdown, reboot and waking the desktop

use async_trait::async_trait;
use jarvis::{config::NetworkConfig, CapabilityResult, PowerOp, SystemPower};

use crate::{network::NetworkTools, process};

pub struct PowerControl {
    network: NetworkTools,
}

impl PowerControl {
    pub fn new(network: NetworkConfig) -> Self {
        Self {
            network: NetworkTools::new(network),
        }
    }
}

/// Platform command for a local power operation
pub fn power_command(op: PowerOp) -> Option<(&'static str, Vec<&'static str>)> {
    match op {
        PowerOp::Shutdown if cfg!(windows) => Some(("shutdown", vec!["/s", "/t", "1"])),
        PowerOp::Shutdown => Some(("shutdown", vec!["-h", "now"])),
        PowerOp::Reboot if cfg!(windows) => Some(("shutdown", vec!["/r", "/t", "1"])),
        PowerOp::Reboot => Some(("shutdown", vec!["-r", "now"])),
        PowerOp::WakeRemote => None,
    }
}

#[async_trait]
impl SystemPower for PowerControl {
    async fn power(&self, op: PowerOp) -> CapabilityResult<String> {
        let Some((program, args)) = power_command(op) else {
            return self.network.wake().await;
        };

        tracing::warn!("Power operation requested: {:?}", op);
        process::run(program, &args).await?;

        Ok(match op {
            PowerOp::Reboot => "Rebooting the computer.",
            _ => "Shutting down the computer.",
        }
        .to_string())
    }
}
