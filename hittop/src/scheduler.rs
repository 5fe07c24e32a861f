//! Polling scheduler: run one cycle right away, then one per refresh interval, forever.
//!
//! A cycle is fetch-then-render. Cycles are awaited one after another by the owning task, so
//! they never overlap; when a cycle outlasts the interval the missed ticks are skipped rather
//! than fired back to back. There is no stop signal: dropping the owner ends the polling.

use std::time::Duration;

use tokio::time::{interval, Interval, MissedTickBehavior};

use crate::api::MetricsSource;
use crate::dashboard::Dashboard;
use crate::diagnostics::Diagnostics;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// Nothing has run yet.
    Idle,
    /// The first cycle has started; stays here for good.
    Polling,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    Updated,
    Failed,
}

pub struct PollingScheduler {
    period: Duration,
    state: SchedulerState,
    ticker: Option<Interval>,
    cycles: u64,
    diagnostics: Diagnostics,
}

impl PollingScheduler {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            state: SchedulerState::Idle,
            ticker: None,
            cycles: 0,
            diagnostics: Diagnostics::default(),
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Wait for the next cycle slot. The first call returns immediately.
    /// Cancel-safe, so it can sit in a `select!` next to input handling.
    pub async fn tick(&mut self) {
        let period = self.period;
        let ticker = self.ticker.get_or_insert_with(|| {
            let mut t = interval(period);
            t.set_missed_tick_behavior(MissedTickBehavior::Skip);
            t
        });
        ticker.tick().await;
    }

    /// One fetch-then-render. Errors stop here: they are reported and nothing on screen changes.
    pub async fn run_cycle<S>(&mut self, source: &S, dashboard: &mut Dashboard) -> CycleOutcome
    where
        S: MetricsSource + ?Sized,
    {
        if self.state == SchedulerState::Idle {
            tracing::info!(period_ms = self.period.as_millis() as u64, "polling started");
            self.state = SchedulerState::Polling;
        }
        self.cycles += 1;

        match source.fetch_metrics().await {
            Ok(snapshot) => {
                dashboard.apply(&snapshot);
                tracing::debug!(cycle = self.cycles, "dashboard updated");
                CycleOutcome::Updated
            }
            Err(e) => {
                self.diagnostics.report(self.cycles, &e);
                CycleOutcome::Failed
            }
        }
    }

    /// Poll until the surrounding task is dropped.
    pub async fn run<S>(&mut self, source: &S, dashboard: &mut Dashboard)
    where
        S: MetricsSource + ?Sized,
    {
        loop {
            self.tick().await;
            self.run_cycle(source, dashboard).await;
        }
    }
}
