//! Helpers for asserting on rendered Prometheus exposition text.

/// Extract a sample value from rendered exposition text.
///
/// Finds the first non-comment line for `name` whose label set contains all
/// of `labels`, and parses its trailing value. Returns `None` when no such
/// sample exists (e.g. the series has not been recorded yet).
///
/// ```rust
/// use web_test_utils::counter_value;
///
/// let rendered = "http_requests_total{method=\"GET\",route=\"/health\",status_code=\"200\"} 3\n";
/// let value = counter_value(rendered, "http_requests_total", &[("route", "/health")]);
/// assert_eq!(value, Some(3.0));
/// ```
pub fn counter_value(rendered: &str, name: &str, labels: &[(&str, &str)]) -> Option<f64> {
    rendered
        .lines()
        .filter(|line| !line.starts_with('#'))
        .filter(|line| {
            // Match "name{...}" or bare "name ", not prefixed series like
            // name_sum/name_count.
            line.strip_prefix(name)
                .is_some_and(|rest| rest.starts_with('{') || rest.starts_with(' '))
        })
        .filter(|line| {
            labels
                .iter()
                .all(|(key, value)| line.contains(&format!("{}=\"{}\"", key, value)))
        })
        .find_map(|line| line.split_whitespace().last()?.parse().ok())
}
