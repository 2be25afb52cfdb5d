//! In-process metrics registry for the app.
//!
//! Counter/gauge/histogram types with dynamic labels backed by `DashMap`.
//! Labels are flattened into sorted key vectors, and series are sorted at
//! render time so scrapes are stable. Histogram observations are kept in
//! integer microseconds and rendered in seconds.

use dashmap::DashMap;
use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

type LabelKey = Vec<(String, String)>;

/// Helper to escape label values.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn label_key(labels: &[(&str, &str)]) -> LabelKey {
    let mut key: LabelKey = labels
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    key.sort();
    key
}

fn label_str(key: &LabelKey) -> String {
    key.iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
        .collect::<Vec<_>>()
        .join(",")
}

fn write_header(out: &mut String, name: &str, help: &str, kind: &str) {
    let _ = writeln!(out, "# HELP {} {}", name, help);
    let _ = writeln!(out, "# TYPE {} {}", name, kind);
}

#[derive(Default)]
pub struct CounterVec {
    map: DashMap<LabelKey, AtomicU64>,
}

impl CounterVec {
    /// Increment by 1.
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.add(labels, 1);
    }

    /// Increment by an arbitrary value.
    pub fn add(&self, labels: &[(&str, &str)], v: u64) {
        let counter = self
            .map
            .entry(label_key(labels))
            .or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(v, Ordering::Relaxed);
    }

    /// Current value of one series (0 if never touched).
    pub fn get(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Sum across all series.
    pub fn total(&self) -> u64 {
        self.map.iter().map(|r| r.value().load(Ordering::Relaxed)).sum()
    }

    /// Render in Prometheus text exposition format.
    fn render(&self, name: &str, help: &str, out: &mut String) {
        write_header(out, name, help, "counter");
        let mut rows: Vec<(String, u64)> = self
            .map
            .iter()
            .map(|r| (label_str(r.key()), r.value().load(Ordering::Relaxed)))
            .collect();
        rows.sort();
        for (labels, val) in rows {
            let _ = writeln!(out, "{}{{{}}} {}", name, labels, val);
        }
    }
}

/// Unlabeled gauge holding the last value set.
#[derive(Default)]
pub struct Gauge {
    bits: AtomicU64,
}

impl Gauge {
    pub fn set(&self, v: f64) {
        self.bits.store(v.to_bits(), Ordering::Relaxed);
    }

    pub fn get(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Relaxed))
    }

    fn render(&self, name: &str, help: &str, out: &mut String) {
        write_header(out, name, help, "gauge");
        let _ = writeln!(out, "{} {}", name, self.get());
    }
}

// Fixed buckets in microseconds, rendered as seconds:
// 5ms, 10ms, 25ms, 50ms, 100ms, 250ms, 500ms, 1s, 2.5s, 5s, 10s
pub const BUCKETS_MICROS: [u64; 11] = [
    5_000, 10_000, 25_000, 50_000, 100_000, 250_000, 500_000, 1_000_000, 2_500_000, 5_000_000,
    10_000_000,
];

struct AtomicHistogram {
    count: AtomicU64,
    sum: AtomicU64,
    buckets: [AtomicU64; BUCKETS_MICROS.len()],
}

impl Default for AtomicHistogram {
    fn default() -> Self {
        Self {
            count: AtomicU64::new(0),
            sum: AtomicU64::new(0),
            buckets: std::array::from_fn(|_| AtomicU64::new(0)),
        }
    }
}

/// Point-in-time copy of one histogram series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistogramSnapshot {
    pub count: u64,
    pub sum_micros: u64,
    /// Cumulative, aligned with `BUCKETS_MICROS`.
    pub buckets: Vec<u64>,
}

#[derive(Default)]
pub struct HistogramVec {
    map: DashMap<LabelKey, AtomicHistogram>,
}

impl HistogramVec {
    /// Observe a duration and increment cumulative buckets.
    pub fn observe(&self, labels: &[(&str, &str)], duration: Duration) {
        let hist = self
            .map
            .entry(label_key(labels))
            .or_insert_with(AtomicHistogram::default);
        let micros = u64::try_from(duration.as_micros()).unwrap_or(u64::MAX);

        hist.count.fetch_add(1, Ordering::Relaxed);
        hist.sum.fetch_add(micros, Ordering::Relaxed);

        // every bucket whose bound covers the value
        for (i, &b) in BUCKETS_MICROS.iter().enumerate() {
            if micros <= b {
                hist.buckets[i].fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    pub fn snapshot(&self, labels: &[(&str, &str)]) -> Option<HistogramSnapshot> {
        self.map.get(&label_key(labels)).map(|h| HistogramSnapshot {
            count: h.count.load(Ordering::Relaxed),
            sum_micros: h.sum.load(Ordering::Relaxed),
            buckets: h.buckets.iter().map(|b| b.load(Ordering::Relaxed)).collect(),
        })
    }

    /// Render in Prometheus text exposition format (unit: seconds).
    fn render(&self, name: &str, help: &str, out: &mut String) {
        write_header(out, name, help, "histogram");

        let mut keys: Vec<LabelKey> = self.map.iter().map(|r| r.key().clone()).collect();
        keys.sort();

        for key in keys {
            let Some(hist) = self.map.get(&key) else { continue };

            let labels = label_str(&key);
            let prefix = if labels.is_empty() { String::new() } else { format!("{},", labels) };

            // count first, buckets capped by it: +Inf never trails a finite bucket
            let count = hist.count.load(Ordering::Relaxed);
            for (i, &le) in BUCKETS_MICROS.iter().enumerate() {
                let bucket = hist.buckets[i].load(Ordering::Relaxed).min(count);
                let _ = writeln!(
                    out,
                    "{}_bucket{{{}le=\"{}\"}} {}",
                    name,
                    prefix,
                    le as f64 / 1e6,
                    bucket
                );
            }
            let _ = writeln!(out, "{}_bucket{{{}le=\"+Inf\"}} {}", name, prefix, count);

            let sum = hist.sum.load(Ordering::Relaxed) as f64 / 1e6;
            let _ = writeln!(out, "{}_sum{{{}}} {}", name, labels, sum);
            let _ = writeln!(out, "{}_count{{{}}} {}", name, labels, count);
        }
    }
}

pub const HTTP_REQUESTS_TOTAL: &str = "http_requests_total";
pub const HTTP_REQUEST_DURATION: &str = "http_request_duration_seconds";
pub const APP_UPTIME: &str = "app_uptime_seconds";

/// Instruments recorded by the request-tracking middleware.
#[derive(Default)]
pub struct AppMetrics {
    /// Labels: method, path, status.
    pub http_requests: CounterVec,
    /// Labels: path.
    pub http_duration: HistogramVec,
    pub uptime: Gauge,
}

impl AppMetrics {
    /// Record one finished request.
    pub fn record_request(
        &self,
        method: &str,
        path: &str,
        status: u16,
        elapsed: Duration,
        uptime: Duration,
    ) {
        let status = status.to_string();
        self.http_requests
            .inc(&[("method", method), ("path", path), ("status", status.as_str())]);
        self.http_duration.observe(&[("path", path)], elapsed);
        self.uptime.set(uptime.as_secs_f64());
    }

    /// Render all registered metrics.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.http_requests
            .render(HTTP_REQUESTS_TOTAL, "Total HTTP requests", &mut out);
        self.http_duration
            .render(HTTP_REQUEST_DURATION, "HTTP request latency", &mut out);
        self.uptime
            .render(APP_UPTIME, "Application uptime in seconds", &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_accumulates_per_label_set() {
        let c = CounterVec::default();
        c.inc(&[("path", "/"), ("method", "GET")]);
        c.inc(&[("method", "GET"), ("path", "/")]);
        c.add(&[("method", "GET"), ("path", "/health")], 5);

        assert_eq!(c.get(&[("path", "/"), ("method", "GET")]), 2);
        assert_eq!(c.get(&[("path", "/health"), ("method", "GET")]), 5);
        assert_eq!(c.get(&[("path", "/missing")]), 0);
        assert_eq!(c.total(), 7);
    }

    #[test]
    fn histogram_buckets_are_cumulative() {
        let h = HistogramVec::default();
        let labels = [("path", "/simulate/slow")];
        h.observe(&labels, Duration::from_millis(3));
        h.observe(&labels, Duration::from_millis(200));
        h.observe(&labels, Duration::from_secs(30));

        let snap = h.snapshot(&labels).unwrap();
        assert_eq!(snap.count, 3);
        assert_eq!(snap.sum_micros, 3_000 + 200_000 + 30_000_000);
        // 5ms bucket sees only the 3ms sample, 250ms onward sees two
        assert_eq!(snap.buckets[0], 1);
        assert_eq!(snap.buckets[4], 1);
        assert_eq!(snap.buckets[5], 2);
        assert_eq!(*snap.buckets.last().unwrap(), 2);
        assert!(snap.buckets.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn inf_bucket_never_trails_finite_buckets_under_concurrent_observes() {
        let h = std::sync::Arc::new(HistogramVec::default());
        let writers: Vec<_> = (0..4)
            .map(|t| {
                let h = std::sync::Arc::clone(&h);
                std::thread::spawn(move || {
                    for i in 0..20_000u64 {
                        let d = Duration::from_micros((i * 7 + t) % 20_000);
                        h.observe(&[("path", "/")], d);
                    }
                })
            })
            .collect();

        for _ in 0..200 {
            let mut out = String::new();
            h.render("lat", "x", &mut out);
            let mut inf = None;
            let mut finite = Vec::new();
            for line in out.lines().filter(|l| l.starts_with("lat_bucket")) {
                let v: u64 = line.rsplit(' ').next().unwrap().parse().unwrap();
                if line.contains("+Inf") {
                    inf = Some(v);
                } else {
                    finite.push(v);
                }
            }
            if let Some(inf) = inf {
                assert!(finite.iter().all(|&b| b <= inf), "{out}");
            }
        }

        for w in writers {
            w.join().unwrap();
        }
        assert_eq!(h.snapshot(&[("path", "/")]).unwrap().count, 80_000);
    }

    #[test]
    fn gauge_holds_last_value() {
        let g = Gauge::default();
        assert_eq!(g.get(), 0.0);
        g.set(12.5);
        g.set(3.25);
        assert_eq!(g.get(), 3.25);
    }

    #[test]
    fn render_exposition_format() {
        let m = AppMetrics::default();
        m.record_request("GET", "/health", 200, Duration::from_millis(2), Duration::from_secs(4));

        let out = m.render();
        assert!(out.contains("# HELP http_requests_total Total HTTP requests"));
        assert!(out.contains("# TYPE http_requests_total counter"));
        assert!(out.contains(r#"http_requests_total{method="GET",path="/health",status="200"} 1"#));
        assert!(out.contains("# TYPE http_request_duration_seconds histogram"));
        assert!(out.contains(
            r#"http_request_duration_seconds_bucket{path="/health",le="0.005"} 1"#
        ));
        assert!(out.contains(
            r#"http_request_duration_seconds_bucket{path="/health",le="+Inf"} 1"#
        ));
        assert!(out.contains(r#"http_request_duration_seconds_sum{path="/health"} 0.002"#));
        assert!(out.contains(r#"http_request_duration_seconds_count{path="/health"} 1"#));
        assert!(out.contains("# TYPE app_uptime_seconds gauge\napp_uptime_seconds 4\n"));
    }

    #[test]
    fn label_values_are_escaped() {
        let c = CounterVec::default();
        c.inc(&[("path", "a\"b\\c\nd")]);
        let mut out = String::new();
        c.render("x_total", "x", &mut out);
        assert!(out.contains(r#"x_total{path="a\"b\\c\nd"} 1"#));
    }

    #[test]
    fn render_order_is_stable() {
        let c = CounterVec::default();
        for p in ["/z", "/a", "/m"] {
            c.inc(&[("path", p)]);
        }
        let mut out = String::new();
        c.render("x_total", "x", &mut out);
        let a = out.find("/a").unwrap();
        let m = out.find("/m").unwrap();
        let z = out.find("/z").unwrap();
        assert!(a < m && m < z);
    }
}
