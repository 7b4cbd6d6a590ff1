// Copyright (C) 2026 The Ledger Feed Project.
//
// poll.rs file belongs to the ledger-feed project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Timer-driven refresh scheduling with pause/resume.
//!
//! Two states, `Running` and `Paused`, initial `Running`. While running,
//! a tokio interval task emits one tick per period on a bounded channel.
//! `pause` aborts the task; `resume` emits one immediate tick and spawns
//! a fresh interval, so the timer never drifts across a pause. The tick
//! channel has capacity one: an immediate resume tick coalesces with a
//! still-unconsumed timer tick instead of queueing a duplicate refresh.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::debug;

/// Scheduler state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    /// Timer ticks are being emitted.
    Running,
    /// No ticks are emitted until [`PollScheduler::resume`].
    Paused,
}

/// Emits refresh ticks on a fixed interval unless paused.
pub struct PollScheduler {
    period: Duration,
    tick_tx: mpsc::Sender<()>,
    timer: Option<JoinHandle<()>>,
    state: PollState,
}

impl PollScheduler {
    /// Creates a running scheduler and the receiver its ticks arrive on.
    ///
    /// Must be called within a tokio runtime. The first timer tick fires
    /// one full period after creation; the initial fetch is the
    /// consumer's responsibility.
    pub fn new(period: Duration) -> (Self, mpsc::Receiver<()>) {
        let (tick_tx, tick_rx) = mpsc::channel(1);
        let mut scheduler = Self {
            period,
            tick_tx,
            timer: None,
            state: PollState::Paused,
        };
        scheduler.spawn_timer();
        scheduler.state = PollState::Running;
        (scheduler, tick_rx)
    }

    fn spawn_timer(&mut self) {
        let tick_tx = self.tick_tx.clone();
        let period = self.period;
        self.timer = Some(tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first interval tick completes immediately; consume it so
            // ticks start one full period from now.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if tick_tx.send(()).await.is_err() {
                    break;
                }
            }
        }));
    }

    /// Stops timer-driven ticks. No tick is forced on entry. Idempotent.
    pub fn pause(&mut self) {
        if self.state == PollState::Paused {
            return;
        }
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
        self.state = PollState::Paused;
        debug!("poll scheduler paused");
    }

    /// Emits one immediate tick and restarts the timer. Idempotent.
    pub fn resume(&mut self) {
        if self.state == PollState::Running {
            return;
        }
        // Coalesces with any pending tick thanks to the capacity-1 channel.
        let _ = self.tick_tx.try_send(());
        self.spawn_timer();
        self.state = PollState::Running;
        debug!("poll scheduler resumed");
    }

    /// Current state.
    pub fn state(&self) -> PollState {
        self.state
    }

    /// Configured tick period.
    pub fn period(&self) -> Duration {
        self.period
    }
}

impl Drop for PollScheduler {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}
