//! Host metrics: CPU, memory, temperature, GPU and the clock

use async_trait::async_trait;
use chrono::{Local, NaiveDateTime};
use jarvis::{CapabilityError, CapabilityResult, MetricKind, SystemMetrics};
use sysinfo::{Components, CpuRefreshKind, MemoryRefreshKind, RefreshKind, System};

use crate::process;

const BYTES_PER_GB: f64 = 1_073_741_824.0;

/// Component labels that report the CPU package temperature
const CPU_SENSOR_LABELS: &[&str] = &["package", "tctl", "tdie", "cpu", "core"];

#[derive(Debug, Default)]
pub struct SysinfoMetrics;

impl SysinfoMetrics {
    pub fn new() -> Self {
        Self
    }

    /// Global CPU usage in percent
    pub async fn cpu_usage(&self) -> CapabilityResult<f32> {
        tokio::task::spawn_blocking(|| {
            let mut sys = System::new_with_specifics(
                RefreshKind::new().with_cpu(CpuRefreshKind::everything()),
            );
            // Usage is a delta between two samples
            std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
            sys.refresh_cpu_all();
            sys.global_cpu_usage()
        })
        .await
        .map_err(|e| CapabilityError::failed(format!("CPU sampling failed: {}", e)))
    }

    /// Used and total memory in bytes
    pub fn memory(&self) -> (u64, u64) {
        let sys = System::new_with_specifics(
            RefreshKind::new().with_memory(MemoryRefreshKind::everything()),
        );
        (sys.used_memory(), sys.total_memory())
    }

    /// Hottest CPU sensor in °C, if the platform exposes one
    pub fn cpu_temperature(&self) -> Option<f32> {
        let components = Components::new_with_refreshed_list();
        components
            .iter()
            .filter(|c| {
                let label = c.label().to_lowercase();
                CPU_SENSOR_LABELS.iter().any(|l| label.contains(l))
            })
            .map(|c| c.temperature())
            .filter(|t| t.is_finite() && *t > 0.0)
            .fold(None, |max: Option<f32>, t| Some(max.map_or(t, |m| m.max(t))))
    }

    async fn gpu_info(&self) -> CapabilityResult<String> {
        let output = process::run(
            "nvidia-smi",
            &[
                "--query-gpu=name,utilization.gpu,temperature.gpu",
                "--format=csv,noheader,nounits",
            ],
        )
        .await
        .map_err(|e| match e {
            CapabilityError::Unsupported(_) => CapabilityError::Unsupported("GPU info".into()),
            other => other,
        })?;

        parse_gpu_line(&output)
            .ok_or_else(|| CapabilityError::failed("I couldn't read the GPU status."))
    }
}

pub fn format_cpu(usage: f32) -> String {
    format!("The current CPU usage is {:.1}%.", usage)
}

pub fn format_ram(used: u64, total: u64) -> String {
    if total == 0 {
        return "I couldn't read the memory usage.".to_string();
    }
    let percent = used as f64 / total as f64 * 100.0;
    format!(
        "RAM usage is at {:.1}% ({:.1} GB of {:.1} GB).",
        percent,
        used as f64 / BYTES_PER_GB,
        total as f64 / BYTES_PER_GB
    )
}

pub fn format_temperature(celsius: Option<f32>) -> String {
    match celsius {
        Some(t) => format!("The CPU temperature is {:.0}°C.", t),
        None => "CPU temperature is not available on this system.".to_string(),
    }
}

pub fn format_time(now: NaiveDateTime) -> String {
    format!(
        "It is {} on {}.",
        now.format("%H:%M"),
        now.format("%A, %B %-d")
    )
}

/// First line of `nvidia-smi` CSV output: `name, util, temp`
fn parse_gpu_line(output: &str) -> Option<String> {
    let line = output.lines().next()?;
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    match fields.as_slice() {
        [name, util, temp] if !name.is_empty() => Some(format!(
            "Your {} is at {}% load and {}°C.",
            name, util, temp
        )),
        _ => None,
    }
}

#[async_trait]
impl SystemMetrics for SysinfoMetrics {
    async fn metric(&self, kind: MetricKind) -> CapabilityResult<String> {
        match kind {
            MetricKind::Cpu => Ok(format_cpu(self.cpu_usage().await?)),
            MetricKind::Ram => {
                let (used, total) = self.memory();
                Ok(format_ram(used, total))
            }
            MetricKind::Temperature => Ok(format_temperature(self.cpu_temperature())),
            MetricKind::Gpu => self.gpu_info().await,
            MetricKind::Time => Ok(format_time(Local::now().naive_local())),
        }
    }
}
