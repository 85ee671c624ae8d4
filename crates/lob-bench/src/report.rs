//! Self-contained HTML performance report.

use chrono::Local;
use serde::Serialize;

use crate::bench::LatencySummary;

/// One replayed file's results.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub file: String,
    pub skipped_rows: u64,
    pub rejected: u64,
    pub resting_after: u64,
    #[serde(flatten)]
    pub summary: LatencySummary,
}

/// Render all runs into a single static page. The raw results are
/// embedded as JSON for downstream tooling.
pub fn render_html(reports: &[RunReport]) -> String {
    let generated = Local::now().format("%Y-%m-%d %H:%M:%S");
    let json = serde_json::to_string_pretty(reports).unwrap_or_else(|_| "[]".to_string());

    let mut rows = String::new();
    for r in reports {
        rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{:.0}</td><td>{:.0}</td>\
             <td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape(&r.file),
            r.summary.operations,
            r.summary.fills,
            r.summary.throughput_per_sec,
            r.summary.avg_ns,
            r.summary.median_ns,
            r.summary.p95_ns,
            r.summary.p99_ns,
        ));
    }

    let peak = reports
        .iter()
        .map(|r| r.summary.throughput_per_sec)
        .fold(0.0f64, f64::max);
    let best_avg = reports
        .iter()
        .map(|r| r.summary.avg_ns)
        .fold(f64::INFINITY, f64::min);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Order Book Performance Report</title>
<style>
  body {{ font-family: -apple-system, 'Segoe UI', sans-serif; margin: 2rem auto; max-width: 960px; color: #1a202c; }}
  h1 {{ font-size: 1.6rem; }}
  .cards {{ display: flex; gap: 1rem; margin: 1.5rem 0; }}
  .card {{ flex: 1; border: 1px solid #e2e8f0; border-radius: 8px; padding: 1rem; }}
  .card .value {{ font-size: 1.8rem; font-weight: 600; }}
  .card .label {{ color: #718096; font-size: 0.85rem; }}
  table {{ border-collapse: collapse; width: 100%; }}
  th, td {{ text-align: right; padding: 0.4rem 0.6rem; border-bottom: 1px solid #e2e8f0; }}
  th:first-child, td:first-child {{ text-align: left; }}
  thead th {{ color: #718096; font-weight: 600; }}
  footer {{ margin-top: 2rem; color: #a0aec0; font-size: 0.8rem; }}
</style>
</head>
<body>
<h1>Order Book Performance Report</h1>
<div class="cards">
  <div class="card"><div class="value">{peak:.0}</div><div class="label">peak orders/sec</div></div>
  <div class="card"><div class="value">{best_avg:.0} ns</div><div class="label">best average latency</div></div>
  <div class="card"><div class="value">{runs}</div><div class="label">files replayed</div></div>
</div>
<table>
<thead><tr><th>file</th><th>orders</th><th>fills</th><th>orders/sec</th>
<th>avg ns</th><th>median ns</th><th>p95 ns</th><th>p99 ns</th></tr></thead>
<tbody>
{rows}</tbody>
</table>
<footer>generated {generated}</footer>
<script type="application/json" id="results">
{json}
</script>
</body>
</html>
"#,
        runs = reports.len(),
    )
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
