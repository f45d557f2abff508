//! Network diagnostics and wake-on-LAN

use std::time::{Duration, Instant};

use async_trait::async_trait;
use jarvis::{
    config::NetworkConfig, CapabilityError, CapabilityResult, NetworkCheck, NetworkDiagnostics,
};
use once_cell::sync::Lazy;
use regex::Regex;
use tokio::{net::UdpSocket, process::Command};

static HOST_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9.:\-]*$").expect("valid host regex"));

static PACKET_LOSS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+(?:\.\d+)?)% (?:packet )?loss").expect("valid loss regex"));

/// Linux/macOS `rtt min/avg/max` or Windows `Average = 12ms`
static AVERAGE_RTT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:= [\d.]+/([\d.]+)/)|(?:Average = (\d+)ms)").expect("valid rtt regex")
});

static MAC_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9A-Fa-f]{2})[:-]?([0-9A-Fa-f]{2})[:-]?([0-9A-Fa-f]{2})[:-]?([0-9A-Fa-f]{2})[:-]?([0-9A-Fa-f]{2})[:-]?([0-9A-Fa-f]{2})$")
        .expect("valid mac regex")
});

const SPEED_TEST_TIMEOUT: Duration = Duration::from_secs(60);

pub struct NetworkTools {
    config: NetworkConfig,
    client: reqwest::Client,
}

impl NetworkTools {
    pub fn new(config: NetworkConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    pub async fn ping(&self, host: &str) -> CapabilityResult<String> {
        let host = host.trim();
        // Never let a "host" turn into a ping flag
        if !HOST_PATTERN.is_match(host) {
            return Err(CapabilityError::failed(format!(
                "'{}' doesn't look like a host name.",
                host
            )));
        }

        let count = self.config.ping_count.max(1).to_string();
        let count_flag = if cfg!(windows) { "-n" } else { "-c" };

        tracing::info!("Pinging {} ({} packets)", host, count);
        let output = Command::new("ping")
            .args([count_flag, count.as_str(), host])
            .output()
            .await
            .map_err(|e| CapabilityError::failed(format!("Failed to run ping: {}", e)))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(summarize_ping(host, &stdout, output.status.success()))
    }

    pub async fn speed_test(&self) -> CapabilityResult<String> {
        let url = &self.config.speed_test_url;
        tracing::info!("Running speed test against {}", url);

        let started = Instant::now();
        let response = self
            .client
            .get(url)
            .timeout(SPEED_TEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| CapabilityError::unreachable("the speed test server", e))?;

        if !response.status().is_success() {
            return Err(CapabilityError::failed(format!(
                "Speed test server answered {}",
                response.status()
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| CapabilityError::unreachable("the speed test server", e))?;

        Ok(format_speed(body.len(), started.elapsed()))
    }

    /// Send a magic packet to the configured MAC address
    pub async fn wake(&self) -> CapabilityResult<String> {
        let mac = self
            .config
            .wake_mac
            .as_deref()
            .ok_or_else(|| CapabilityError::NotConfigured("The MAC address of your PC".into()))?;
        let mac = parse_mac(mac)
            .ok_or_else(|| CapabilityError::failed(format!("'{}' is not a valid MAC address", mac)))?;

        let socket = UdpSocket::bind("0.0.0.0:0")
            .await
            .map_err(|e| CapabilityError::failed(format!("Failed to open socket: {}", e)))?;
        socket
            .set_broadcast(true)
            .map_err(|e| CapabilityError::failed(format!("Failed to enable broadcast: {}", e)))?;
        socket
            .send_to(&magic_packet(&mac), &self.config.wake_broadcast)
            .await
            .map_err(|e| CapabilityError::failed(format!("Failed to send wake packet: {}", e)))?;

        tracing::info!("Sent wake-on-LAN packet via {}", self.config.wake_broadcast);
        Ok("Waking up your PC.".to_string())
    }
}

#[async_trait]
impl NetworkDiagnostics for NetworkTools {
    async fn diagnose(&self, check: NetworkCheck) -> CapabilityResult<String> {
        match check {
            NetworkCheck::Ping(host) => self.ping(&host).await,
            NetworkCheck::SpeedTest => self.speed_test().await,
        }
    }
}

/// One-line summary of `ping` output
pub fn summarize_ping(host: &str, output: &str, success: bool) -> String {
    if !success {
        return format!("{} is not responding.", host);
    }

    let loss = PACKET_LOSS
        .captures(output)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string());
    let average = AVERAGE_RTT
        .captures(output)
        .and_then(|c| c.get(1).or_else(|| c.get(2)))
        .and_then(|m| m.as_str().parse::<f64>().ok());

    match (average, loss) {
        (Some(avg), Some(loss)) => format!(
            "{} responded in {:.0} ms on average with {}% packet loss.",
            host, avg, loss
        ),
        (Some(avg), None) => format!("{} responded in {:.0} ms on average.", host, avg),
        _ => format!("{} is reachable.", host),
    }
}

pub fn format_speed(bytes: usize, elapsed: Duration) -> String {
    let seconds = elapsed.as_secs_f64().max(0.001);
    let mbps = bytes as f64 * 8.0 / seconds / 1_000_000.0;
    format!("Your download speed is about {:.1} Mbps.", mbps)
}

pub fn parse_mac(mac: &str) -> Option<[u8; 6]> {
    let captures = MAC_PATTERN.captures(mac.trim())?;
    let mut bytes = [0u8; 6];
    for (i, byte) in bytes.iter_mut().enumerate() {
        *byte = u8::from_str_radix(captures.get(i + 1)?.as_str(), 16).ok()?;
    }
    Some(bytes)
}

/// Six 0xFF bytes followed by the MAC repeated sixteen times
pub fn magic_packet(mac: &[u8; 6]) -> Vec<u8> {
    let mut packet = vec![0xFF; 6];
    for _ in 0..16 {
        packet.extend_from_slice(mac);
    }
    packet
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINUX_PING: &str = "\
PING 8.8.8.8 (8.8.8.8) 56(84) bytes of data.
64 bytes from 8.8.8.8: icmp_seq=1 ttl=117 time=11.9 ms

--- 8.8.8.8 ping statistics ---
4 packets transmitted, 4 received, 0% packet loss, time 3004ms
rtt min/avg/max/mdev = 11.214/12.480/13.902/0.998 ms
";

    const WINDOWS_PING: &str = "\
Packets: Sent = 4, Received = 4, Lost = 0 (0% loss),
Approximate round trip times in milli-seconds:
    Minimum = 10ms, Maximum = 14ms, Average = 12ms
";

    #[test]
    fn test_summarize_linux_ping() {
        assert_eq!(
            summarize_ping("8.8.8.8", LINUX_PING, true),
            "8.8.8.8 responded in 12 ms on average with 0% packet loss."
        );
    }

    #[test]
    fn test_summarize_windows_ping() {
        assert_eq!(
            summarize_ping("8.8.8.8", WINDOWS_PING, true),
            "8.8.8.8 responded in 12 ms on average with 0% packet loss."
        );
    }

    #[test]
    fn test_failed_ping() {
        assert_eq!(
            summarize_ping("10.0.0.99", "", false),
            "10.0.0.99 is not responding."
        );
    }

    #[tokio::test]
    async fn test_flag_like_host_is_rejected() {
        let tools = NetworkTools::new(NetworkConfig::default());
        assert!(tools.ping("-f 8.8.8.8").await.is_err());
        assert!(tools.ping("host; rm -rf /").await.is_err());
    }

    #[test]
    fn test_format_speed() {
        assert_eq!(
            format_speed(10_000_000, Duration::from_secs(2)),
            "Your download speed is about 40.0 Mbps."
        );
    }

    #[test]
    fn test_parse_mac() {
        let expected = [0xAA, 0xBB, 0xCC, 0x01, 0x02, 0x03];
        assert_eq!(parse_mac("AA:BB:CC:01:02:03"), Some(expected));
        assert_eq!(parse_mac("aa-bb-cc-01-02-03"), Some(expected));
        assert_eq!(parse_mac("aabbcc010203"), Some(expected));
        assert_eq!(parse_mac("AA:BB:CC:01:02"), None);
        assert_eq!(parse_mac("GG:BB:CC:01:02:03"), None);
    }

    #[test]
    fn test_magic_packet_layout() {
        let mac = [1, 2, 3, 4, 5, 6];
        let packet = magic_packet(&mac);
        assert_eq!(packet.len(), 102);
        assert!(packet[..6].iter().all(|b| *b == 0xFF));
        assert!(packet[6..].chunks(6).all(|chunk| chunk == mac));
    }

    #[tokio::test]
    async fn test_wake_without_mac_is_not_configured() {
        let tools = NetworkTools::new(NetworkConfig::default());
        assert!(matches!(
            tools.wake().await,
            Err(CapabilityError::NotConfigured(_))
        ));
    }
}
