//! Display helpers
//!
//! Human-readable sizes and download names.

use std::path::Path;

const UNIT: u64 = 1024;
const PREFIXES: &[u8] = b"KMGTPE";

/// Format a byte count with binary prefixes, e.g. `1536` -> `"    1.5 KB"`
pub fn format_bytes(bytes: u64) -> String {
    if bytes < UNIT {
        return format!("{} B", bytes);
    }

    let mut div = UNIT;
    let mut exp = 0;
    let mut n = bytes / UNIT;
    while n >= UNIT {
        div *= UNIT;
        exp += 1;
        n /= UNIT;
    }

    format!(
        "{:7.1} {}B",
        bytes as f64 / div as f64,
        PREFIXES[exp] as char
    )
}

/// Name a download should be saved under: the last component of the path
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_sizes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1), "1 B");
        assert_eq!(format_bytes(1023), "1023 B");
    }

    #[test]
    fn test_prefixed_sizes() {
        assert_eq!(format_bytes(1024), "    1.0 KB");
        assert_eq!(format_bytes(1536), "    1.5 KB");
        assert_eq!(format_bytes(1024 * 1024), "    1.0 MB");
        assert_eq!(format_bytes(5 * 1024 * 1024 * 1024), "    5.0 GB");
        assert_eq!(format_bytes(1023 * 1024), " 1023.0 KB");
        assert_eq!(format_bytes(u64::MAX), "   16.0 EB");
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name(Path::new("/tmp/dir/report.pdf")), "report.pdf");
        assert_eq!(display_name(Path::new("notes.txt")), "notes.txt");
        assert_eq!(display_name(Path::new("/")), "/");
    }
}
