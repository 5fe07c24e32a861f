//! Diagnostic channel for failed cycles: a bounded record buffer mirrored to the log.

use std::collections::VecDeque;

use chrono::{DateTime, Local};

use crate::error::MetricsError;

pub fn push_capped<T>(dq: &mut VecDeque<T>, v: T, cap: usize) {
    if dq.len() == cap {
        dq.pop_front();
    }
    dq.push_back(v);
}

#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub at: DateTime<Local>,
    pub cycle: u64,
    pub message: String,
}

pub struct Diagnostics {
    records: VecDeque<ErrorRecord>,
    cap: usize,
    total: u64,
}

impl Diagnostics {
    pub fn new(cap: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(cap),
            cap: cap.max(1),
            total: 0,
        }
    }

    pub fn report(&mut self, cycle: u64, err: &MetricsError) {
        tracing::error!(cycle, error = %err, "error updating metrics");
        self.total += 1;
        push_capped(
            &mut self.records,
            ErrorRecord {
                at: Local::now(),
                cycle,
                message: err.to_string(),
            },
            self.cap,
        );
    }

    /// Every failure reported so far, including ones evicted from the buffer.
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn records(&self) -> impl Iterator<Item = &ErrorRecord> {
        self.records.iter()
    }

    pub fn last(&self) -> Option<&ErrorRecord> {
        self.records.back()
    }
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new(64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchFailure;

    #[test]
    fn push_capped_evicts_oldest() {
        let mut dq = VecDeque::new();
        for i in 0..5 {
            push_capped(&mut dq, i, 3);
        }
        assert_eq!(dq, VecDeque::from(vec![2, 3, 4]));
    }

    #[test]
    fn report_keeps_bounded_records_and_total() {
        let mut d = Diagnostics::new(2);
        for cycle in 1..=3 {
            let err = MetricsError::FetchFailed(FetchFailure::Status(
                reqwest::StatusCode::UNAUTHORIZED,
            ));
            d.report(cycle, &err);
        }
        assert_eq!(d.total(), 3);
        assert_eq!(d.records().count(), 2);
        let last = d.last().unwrap();
        assert_eq!(last.cycle, 3);
        assert!(last.message.contains("401"), "{}", last.message);
    }
}
