//! Optional destinations for violations beyond the receipt file.
//!
//! The audit never depends on a sink succeeding; the CLI decides whether a
//! sink failure is fatal.

use crate::report::to_renderable;
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use vmguard_types::{AuditReceipt, Verdict};

pub trait ReportSink: Send + Sync {
    fn record(&self, receipt: &AuditReceipt) -> anyhow::Result<()>;
}

/// Writes one JSON line per violation, for a log shipper to pick up.
#[derive(Clone, Debug)]
pub struct JsonlSink {
    path: Utf8PathBuf,
}

impl JsonlSink {
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

impl ReportSink for JsonlSink {
    fn record(&self, receipt: &AuditReceipt) -> anyhow::Result<()> {
        let text = vmguard_render::render_jsonl(&to_renderable(receipt));
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create directory: {}", parent))?;
        }
        std::fs::write(&self.path, text).with_context(|| format!("write jsonl: {}", self.path))?;
        Ok(())
    }
}

/// Emits one `warn` event per violation through `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl ReportSink for TracingSink {
    fn record(&self, receipt: &AuditReceipt) -> anyhow::Result<()> {
        if receipt.verdict == Verdict::Error {
            if let Some(failure) = &receipt.error {
                tracing::error!(
                    kind = ?failure.kind,
                    resource_id = failure.resource_id.as_deref(),
                    rule = failure.rule.as_deref(),
                    "{}",
                    failure.message
                );
            }
            return Ok(());
        }

        for v in to_renderable(receipt).violations {
            tracing::warn!(
                resource_id = %v.resource_id,
                fingerprint = v.fingerprint.as_deref(),
                "{}",
                v.message
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime_error_receipt;
    use vmguard_types::ViolationReport;

    fn receipt_with(violations: ViolationReport) -> AuditReceipt {
        let mut receipt = runtime_error_receipt("unused");
        receipt.verdict = if violations.is_empty() {
            Verdict::Pass
        } else {
            Verdict::Fail
        };
        receipt.error = None;
        receipt.violations = violations;
        receipt
    }

    #[test]
    fn jsonl_sink_writes_one_line_per_violation() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let root = Utf8Path::from_path(tmp.path()).expect("utf8 path");
        let sink = JsonlSink::new(root.join("out/violations.jsonl"));

        let mut violations = ViolationReport::new();
        violations.insert(
            "vm-1",
            vec![
                "OS disk is not encrypted.".to_string(),
                "Missing 'owner' tag for tracking responsibility.".to_string(),
            ],
        );
        sink.record(&receipt_with(violations)).expect("record");

        let text = std::fs::read_to_string(sink.path()).expect("read jsonl");
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).expect("json line"))
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["resource_id"], "vm-1");
        assert_eq!(lines[1]["message"], "Missing 'owner' tag for tracking responsibility.");
        assert_eq!(lines[0]["fingerprint"].as_str().map(str::len), Some(64));
    }

    #[test]
    fn jsonl_sink_truncates_on_clean_run() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let root = Utf8Path::from_path(tmp.path()).expect("utf8 path");
        let path = root.join("violations.jsonl");
        std::fs::write(&path, "stale\n").expect("seed file");

        JsonlSink::new(path.clone())
            .record(&receipt_with(ViolationReport::new()))
            .expect("record");
        assert_eq!(std::fs::read_to_string(&path).expect("read"), "");
    }

    /// Captures JSON-formatted events emitted while `f` runs.
    fn capture_events(f: impl FnOnce()) -> Vec<serde_json::Value> {
        use std::sync::{Arc, Mutex};
        use tracing_subscriber::fmt::MakeWriter;

        #[derive(Clone, Default)]
        struct Buffer(Arc<Mutex<Vec<u8>>>);

        struct BufferWriter(Arc<Mutex<Vec<u8>>>);

        impl<'a> MakeWriter<'a> for Buffer {
            type Writer = BufferWriter;

            fn make_writer(&'a self) -> Self::Writer {
                BufferWriter(Arc::clone(&self.0))
            }
        }

        impl std::io::Write for BufferWriter {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                self.0.lock().expect("lock buffer").extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let buffer = Buffer::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(buffer.clone())
            .json()
            .with_max_level(tracing::Level::TRACE)
            .finish();
        tracing::subscriber::with_default(subscriber, f);

        let bytes = buffer.0.lock().expect("lock buffer").clone();
        String::from_utf8(bytes)
            .expect("utf8 log output")
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| serde_json::from_str(l).expect("json log line"))
            .collect()
    }

    #[test]
    fn tracing_sink_warns_once_per_violation() {
        let mut violations = ViolationReport::new();
        violations.insert(
            "vm-1",
            vec![
                "OS disk is not encrypted.".to_string(),
                "Missing 'owner' tag for tracking responsibility.".to_string(),
            ],
        );
        violations.insert("vm-2", vec!["VM allows unrestricted traffic.".to_string()]);
        let receipt = receipt_with(violations);

        let sink: Box<dyn ReportSink> = Box::new(TracingSink);
        let events = capture_events(|| sink.record(&receipt).expect("record"));

        assert_eq!(events.len(), 3);
        for event in &events {
            assert_eq!(event["level"], "WARN");
            assert_eq!(event["fields"]["fingerprint"].as_str().map(str::len), Some(64));
        }
        assert_eq!(events[0]["fields"]["resource_id"], "vm-1");
        assert_eq!(events[0]["fields"]["message"], "OS disk is not encrypted.");
        assert_eq!(
            events[1]["fields"]["message"],
            "Missing 'owner' tag for tracking responsibility."
        );
        assert_eq!(events[2]["fields"]["resource_id"], "vm-2");
    }

    #[test]
    fn tracing_sink_is_silent_on_a_clean_run() {
        let receipt = receipt_with(ViolationReport::new());
        let events = capture_events(|| TracingSink.record(&receipt).expect("record"));
        assert!(events.is_empty());
    }

    #[test]
    fn tracing_sink_reports_an_error_verdict_once() {
        let receipt = runtime_error_receipt("boom");
        let events = capture_events(|| TracingSink.record(&receipt).expect("record"));

        assert_eq!(events.len(), 1);
        assert_eq!(events[0]["level"], "ERROR");
        assert_eq!(events[0]["fields"]["message"], "boom");
        assert_eq!(events[0]["fields"]["kind"], "Runtime");
    }
}
