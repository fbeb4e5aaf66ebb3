// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Async handle that runs a [`Simulator`] on its own tokio task
//!
//! The task sleeps until the next timer deadline, polls the simulator and
//! pushes a fresh [`RunSnapshot`] into a `watch` channel. The handle only
//! talks to the task over channels: commands go in over an mpsc, snapshots
//! come out over the watch. Dropping a running handle cancels its run.

use crate::clock::TokioClock;
use crate::simulator::Simulator;
use cf_core::{
    Entropy, EventBus, EventReceiver, IdGen, RunId, RunSnapshot, RunState, SimulatorConfig,
    SimulatorError, StageDefinition, Subscription, ThreadEntropy, UuidIdGen,
};
use std::time::Instant;
use tokio::sync::{mpsc, oneshot, watch};

enum Command {
    /// Cancel the run, acknowledging once the final snapshot is out
    Cancel(oneshot::Sender<()>),
}

struct Running {
    run_id: RunId,
    commands: mpsc::UnboundedSender<Command>,
    snapshots: watch::Receiver<RunSnapshot>,
}

enum Phase<E: Entropy, I: IdGen> {
    Ready(Box<Simulator<TokioClock, E, I>>),
    Running(Running),
}

/// Single-use async driver for one pipeline run
pub struct ProgressHandle<E = ThreadEntropy, I = UuidIdGen>
where
    E: Entropy,
    I: IdGen,
{
    /// Shared with the simulator so subscriptions can be made before start
    bus: EventBus,
    phase: Phase<E, I>,
    next_subscriber: u64,
}

impl ProgressHandle {
    /// Handle with thread-local randomness and uuid run ids
    pub fn new(config: SimulatorConfig) -> Self {
        Self::with_parts(config, ThreadEntropy, UuidIdGen)
    }
}

impl<E, I> ProgressHandle<E, I>
where
    E: Entropy + 'static,
    I: IdGen + 'static,
{
    pub fn with_parts(config: SimulatorConfig, entropy: E, id_gen: I) -> Self {
        let simulator = Simulator::new(config, TokioClock, entropy, id_gen);
        Self {
            bus: simulator.bus().clone(),
            phase: Phase::Ready(Box::new(simulator)),
            next_subscriber: 0,
        }
    }

    /// Start the run on a background task and return its first snapshot
    ///
    /// Must be called from within a tokio runtime. A rejected stage list
    /// leaves the handle ready for another attempt; once a run has started
    /// every further start fails with [`SimulatorError::AlreadyStarted`].
    pub fn start(&mut self, stages: Vec<StageDefinition>) -> Result<RunSnapshot, SimulatorError> {
        self.launch(None, stages)
    }

    pub fn start_with_id(
        &mut self,
        id: impl Into<RunId>,
        stages: Vec<StageDefinition>,
    ) -> Result<RunSnapshot, SimulatorError> {
        self.launch(Some(id.into()), stages)
    }

    fn launch(
        &mut self,
        id: Option<RunId>,
        stages: Vec<StageDefinition>,
    ) -> Result<RunSnapshot, SimulatorError> {
        let snapshot = match &mut self.phase {
            Phase::Ready(simulator) => match id {
                Some(id) => simulator.start_with_id(id, stages)?,
                None => simulator.start(stages)?,
            },
            Phase::Running(running) => {
                return Err(SimulatorError::AlreadyStarted(running.run_id.clone()))
            }
        };

        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(snapshot.clone());
        let running = Phase::Running(Running {
            run_id: snapshot.run_id.clone(),
            commands: command_tx,
            snapshots: snapshot_rx,
        });
        if let Phase::Ready(simulator) = std::mem::replace(&mut self.phase, running) {
            tokio::spawn(drive(simulator, command_rx, snapshot_tx));
        }

        Ok(snapshot)
    }

    /// Id of the started run
    pub fn run_id(&self) -> Option<&RunId> {
        match &self.phase {
            Phase::Running(running) => Some(&running.run_id),
            Phase::Ready(_) => None,
        }
    }

    /// Latest-value channel of run snapshots, `None` before start
    pub fn snapshots(&self) -> Option<watch::Receiver<RunSnapshot>> {
        match &self.phase {
            Phase::Running(running) => Some(running.snapshots.clone()),
            Phase::Ready(_) => None,
        }
    }

    /// Subscribe to events whose names match any of `patterns`
    pub fn events(&mut self, patterns: &[&str]) -> EventReceiver {
        self.next_subscriber += 1;
        let id = format!("handle-{}", self.next_subscriber);
        self.bus.subscribe(Subscription::new(id, patterns))
    }

    /// Receiver that yields `run:complete` exactly once
    pub fn on_complete(&mut self) -> EventReceiver {
        self.events(&["run:complete"])
    }

    /// Cancel the run and return its final snapshot
    ///
    /// Once this returns no further snapshot is published. After natural
    /// completion it changes nothing and returns the completed snapshot;
    /// before start it returns `None`.
    pub async fn cancel(&self) -> Option<RunSnapshot> {
        let Phase::Running(running) = &self.phase else {
            return None;
        };
        let (ack_tx, ack_rx) = oneshot::channel();
        if running.commands.send(Command::Cancel(ack_tx)).is_ok() {
            // The task may finish on its own before reading the command
            let _ = ack_rx.await;
        }
        let snapshot = running.snapshots.borrow().clone();
        Some(snapshot)
    }

    /// Wait for the run to complete or be cancelled
    pub async fn wait(&self) -> Option<RunSnapshot> {
        let Phase::Running(running) = &self.phase else {
            return None;
        };
        let mut snapshots = running.snapshots.clone();
        if let Ok(snapshot) = snapshots.wait_for(is_terminal).await {
            return Some(snapshot.clone());
        }
        let snapshot = snapshots.borrow().clone();
        Some(snapshot)
    }
}

fn is_terminal(snapshot: &RunSnapshot) -> bool {
    matches!(snapshot.state, RunState::Complete | RunState::Cancelled)
}

async fn drive<E, I>(
    mut simulator: Box<Simulator<TokioClock, E, I>>,
    mut commands: mpsc::UnboundedReceiver<Command>,
    snapshots: watch::Sender<RunSnapshot>,
) where
    E: Entropy,
    I: IdGen,
{
    while !simulator.is_finished() {
        let deadline = simulator.next_deadline();

        tokio::select! {
            biased;

            command = commands.recv() => {
                simulator.cancel();
                publish(&simulator, &snapshots);
                match command {
                    Some(Command::Cancel(ack)) => {
                        let _ = ack.send(());
                    }
                    None => tracing::debug!("progress handle dropped, run cancelled"),
                }
                return;
            }

            _ = sleep_until(deadline) => {
                simulator.poll();
                publish(&simulator, &snapshots);
            }
        }
    }
}

fn publish<E: Entropy, I: IdGen>(
    simulator: &Simulator<TokioClock, E, I>,
    snapshots: &watch::Sender<RunSnapshot>,
) {
    if let Some(snapshot) = simulator.snapshot() {
        snapshots.send_replace(snapshot);
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(tokio::time::Instant::from_std(at)).await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
#[path = "handle_tests.rs"]
mod tests;
