use prometheus::{IntCounterVec, IntGauge, Opts, Registry};

use lazy_static::lazy_static;

pub const METRICS_NAMESPACE: &str = "affinity_webhook";

lazy_static! {
    pub static ref DECISIONS: IntCounterVec = IntCounterVec::new(
      Opts::new("decisions", "affinity-webhook decisions by affinity variant")
      .namespace(METRICS_NAMESPACE),
      &["variant"]
    ).unwrap();
    pub static ref ERRORS: IntCounterVec = IntCounterVec::new(
      Opts::new("errors", "affinity-webhook admission errors")
      .namespace(METRICS_NAMESPACE),
      &["name"]
    ).unwrap();
    pub static ref DECISION_COUNTER: IntGauge = IntGauge::with_opts(
      Opts::new("decision_counter", "affinity-webhook requests decided since start")
      .namespace(METRICS_NAMESPACE)
    ).unwrap();
}

pub fn custom_metrics(registry: &Registry) -> prometheus::Result<()> {
  registry.register(Box::new(DECISIONS.clone()))?;
  registry.register(Box::new(ERRORS.clone()))?;
  registry.register(Box::new(DECISION_COUNTER.clone()))?;
  Ok(())
}

pub fn decision_made(variant: &str, counter: u64) {
  DECISIONS.with_label_values(&[variant]).inc();
  DECISION_COUNTER.set(counter as i64);
}

pub fn error_happened(name: &str) {
  ERRORS.with_label_values(&[name]).inc_by(1);
}
