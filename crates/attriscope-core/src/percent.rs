/// Format `n` as a whole percentage of `total`.
///
/// A zero total is not a measurable ratio and renders as "N/A" instead of
/// dividing by zero.
pub fn pct(n: u64, total: u64) -> String {
    if total == 0 {
        return "N/A".into();
    }
    format!("{:.0}%", n as f64 / total as f64 * 100.0)
}
