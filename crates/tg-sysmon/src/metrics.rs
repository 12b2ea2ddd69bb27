//! Host metrics collection and report formatting
//!
//! sysinfo-backed snapshots rendered as Markdown for Telegram. Collection is
//! best-effort throughout: anything that cannot be resolved degrades to a
//! placeholder instead of failing the reply.

use std::net::IpAddr;
use std::path::Path;

use chrono::Local;
use sysinfo::{Disks, MINIMUM_CPU_UPDATE_INTERVAL, Networks, System};
use tracing::warn;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;
const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Full server report for `/info`.
///
/// CPU usage needs two samples; the wait between them is the minimum the
/// library accepts, so the reply stays prompt.
pub async fn detailed_report() -> String {
    let mut sys = System::new_all();
    sys.refresh_all();
    tokio::time::sleep(MINIMUM_CPU_UPDATE_INTERVAL).await;
    sys.refresh_cpu_usage();

    let hostname = System::host_name().unwrap_or_else(|| "unknown".to_string());
    let os_name = System::name().unwrap_or_else(|| "unknown".to_string());
    let os_release = System::kernel_version().unwrap_or_else(|| "unknown".to_string());
    let arch = std::env::consts::ARCH;

    let networks = Networks::new_with_refreshed_list();
    let local_ip = local_ipv4(&networks).unwrap_or_else(|| "unavailable".to_string());

    let cpu_percent = sys.global_cpu_usage();
    let core_count = sys.cpus().len();
    let cpu_mhz = sys.cpus().first().map(|cpu| cpu.frequency()).unwrap_or(0);

    let mem_percent = percent(sys.used_memory(), sys.total_memory());
    let mem_total_gb = bytes_to_gb(sys.total_memory());
    let mem_avail_gb = bytes_to_gb(sys.available_memory());

    let disks = Disks::new_with_refreshed_list();
    let (disk_percent, disk_total_gb, disk_free_gb) = root_disk_usage(&disks);

    let process_mb = current_process_rss_mb(&sys);
    let uptime = format_uptime(System::uptime());
    let now = Local::now().format("%H:%M:%S");

    format!(
        "🖥 *SERVER REPORT — tg-sysmon v{VERSION}*\n\n\
         *System:*\n\
         • Hostname: `{hostname}`\n\
         • OS: `{os_name} {os_release}`\n\
         • Architecture: `{arch}`\n\
         • Local IP: `{local_ip}`\n\n\
         *CPU:*\n\
         • Usage: `{cpu_percent:.1}%`\n\
         • Cores: `{core_count}`\n\
         • Frequency: `{cpu_mhz} MHz`\n\n\
         *Memory:*\n\
         • Used: `{mem_percent:.1}%`\n\
         • Total: `{mem_total_gb} GB`\n\
         • Available: `{mem_avail_gb} GB`\n\n\
         *Disk:*\n\
         • Used: `{disk_percent:.1}%`\n\
         • Total: `{disk_total_gb} GB`\n\
         • Free: `{disk_free_gb} GB`\n\n\
         *Process:*\n\
         • Bot memory: `{process_mb} MB`\n\
         • Uptime: `{uptime}`\n\
         • Time: `{now}`"
    )
}

/// Abbreviated report for `/status`.
pub fn quick_status() -> String {
    let mut sys = System::new();
    sys.refresh_memory();
    sys.refresh_cpu_usage();

    let hostname = System::host_name().unwrap_or_else(|| "unknown".to_string());
    let cpu_percent = sys.global_cpu_usage();
    let mem_percent = percent(sys.used_memory(), sys.total_memory());
    let now = Local::now().format("%H:%M:%S");

    format!(
        "📊 *STATUS — tg-sysmon v{VERSION}*\n\
         • Hostname: `{hostname}`\n\
         • CPU: `{cpu_percent:.1}%`\n\
         • Memory: `{mem_percent:.1}%`\n\
         • Time: `{now}`"
    )
}

pub(crate) fn bytes_to_mb(bytes: u64) -> f64 {
    round2(bytes as f64 / BYTES_PER_MB)
}

pub(crate) fn bytes_to_gb(bytes: u64) -> f64 {
    round2(bytes as f64 / BYTES_PER_GB)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn percent(used: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round2(used as f64 * 100.0 / total as f64)
}

/// Seconds of uptime rendered as `Nd HH:MM:SS` (days omitted when zero).
pub(crate) fn format_uptime(secs: u64) -> String {
    let days = secs / 86_400;
    let hours = (secs % 86_400) / 3600;
    let minutes = (secs % 3600) / 60;
    let seconds = secs % 60;

    if days > 0 {
        format!("{days}d {hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    }
}

/// First non-loopback IPv4 address across interfaces.
fn local_ipv4(networks: &Networks) -> Option<String> {
    for data in networks.list().values() {
        for ip in data.ip_networks() {
            if let IpAddr::V4(addr) = ip.addr {
                if !addr.is_loopback() {
                    return Some(addr.to_string());
                }
            }
        }
    }
    None
}

/// Usage of the root mount (falls back to the first listed disk).
fn root_disk_usage(disks: &Disks) -> (f64, f64, f64) {
    let disk = disks
        .list()
        .iter()
        .find(|d| d.mount_point() == Path::new("/"))
        .or_else(|| disks.list().first());

    match disk {
        Some(disk) => {
            let total = disk.total_space();
            let free = disk.available_space();
            (
                percent(total.saturating_sub(free), total),
                bytes_to_gb(total),
                bytes_to_gb(free),
            )
        }
        None => (0.0, 0.0, 0.0),
    }
}

fn current_process_rss_mb(sys: &System) -> f64 {
    match sysinfo::get_current_pid() {
        Ok(pid) => sys.process(pid).map(|p| bytes_to_mb(p.memory())).unwrap_or(0.0),
        Err(e) => {
            warn!("cannot resolve current pid: {e}");
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_to_gb() {
        assert_eq!(bytes_to_gb(0), 0.0);
        assert_eq!(bytes_to_gb(1024 * 1024 * 1024), 1.0);
        assert_eq!(bytes_to_gb(1_610_612_736), 1.5);
    }

    #[test]
    fn test_bytes_to_mb() {
        assert_eq!(bytes_to_mb(1024 * 1024), 1.0);
        assert_eq!(bytes_to_mb(5 * 1024 * 1024 + 512 * 1024), 5.5);
    }

    #[test]
    fn test_percent_handles_zero_total() {
        assert_eq!(percent(10, 0), 0.0);
        assert_eq!(percent(1, 4), 25.0);
    }

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(0), "00:00:00");
        assert_eq!(format_uptime(61), "00:01:01");
        assert_eq!(format_uptime(3661), "01:01:01");
        assert_eq!(format_uptime(90_061), "1d 01:01:01");
    }

    #[test]
    fn test_quick_status_shape() {
        let status = quick_status();
        assert!(status.contains("Hostname"));
        assert!(status.contains("CPU"));
        assert!(status.contains("Memory"));
    }

    #[tokio::test]
    async fn test_detailed_report_shape() {
        let report = detailed_report().await;
        for section in ["*System:*", "*CPU:*", "*Memory:*", "*Disk:*", "*Process:*"] {
            assert!(report.contains(section), "missing section {section}");
        }
    }
}
