/// Render a byte count for humans: plain bytes below 1 KiB, then two-decimal
/// KiB/MiB/GiB at 1024 steps.
pub fn format_bytes(bytes: i64) -> String {
    if bytes < 1024 {
        format!("{} bytes", bytes)
    } else if (bytes >> 10) < 1024 {
        format!("{:.2} KiB", bytes as f64 / 1024.0)
    } else if (bytes >> 20) < 1024 {
        format!("{:.2} MiB", bytes as f64 / (1024.0 * 1024.0))
    } else {
        format!("{:.2} GiB", bytes as f64 / (1024.0 * 1024.0 * 1024.0))
    }
}
