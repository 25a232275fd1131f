use serde::{Deserialize, Serialize};
use tracing::debug;

const UNKNOWN: &str = "Unknown";

/// Disk figures carried through to the report as opaque strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiskStatus {
    pub total: String,
    pub used: String,
    pub available: String,
}

impl DiskStatus {
    pub fn unknown() -> Self {
        Self {
            total: UNKNOWN.to_string(),
            used: UNKNOWN.to_string(),
            available: UNKNOWN.to_string(),
        }
    }
}

impl Default for DiskStatus {
    fn default() -> Self {
        Self::unknown()
    }
}

/// Query `df -h` for a mount point. Any failure yields "Unknown" figures.
pub fn probe(mount: &str) -> DiskStatus {
    let output = std::process::Command::new("df").args(["-h", mount]).output();

    match output {
        Ok(out) if out.status.success() => {
            parse_df(&String::from_utf8_lossy(&out.stdout)).unwrap_or_else(DiskStatus::unknown)
        }
        Ok(out) => {
            debug!(status = %out.status, "df exited unsuccessfully");
            DiskStatus::unknown()
        }
        Err(e) => {
            debug!(error = %e, "df could not be run");
            DiskStatus::unknown()
        }
    }
}

/// Parse the second line of `df -h`: filesystem, size, used, available, ...
pub fn parse_df(stdout: &str) -> Option<DiskStatus> {
    let line = stdout.lines().nth(1)?;
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 4 {
        return None;
    }
    Some(DiskStatus {
        total: parts[1].to_string(),
        used: parts[2].to_string(),
        available: parts[3].to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_df_macos() {
        let out = "Filesystem      Size   Used  Avail Capacity iused ifree %iused  Mounted on\n\
                   /dev/disk3s1s1  460Gi  10Gi  40Gi    21%  404k  419M    0%   /\n";
        let status = parse_df(out).unwrap();
        assert_eq!(status.total, "460Gi");
        assert_eq!(status.used, "10Gi");
        assert_eq!(status.available, "40Gi");
    }

    #[test]
    fn test_parse_df_garbage() {
        assert!(parse_df("").is_none());
        assert!(parse_df("header only\n").is_none());
        assert!(parse_df("header\nshort line\n").is_none());
    }
}
