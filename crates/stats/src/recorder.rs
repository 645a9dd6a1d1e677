//! Background stats persistence.
//!
//! Bridges the synchronous game loop with stats writes: the loop submits
//! commands without waiting, a task on a private tokio runtime applies them in
//! order and publishes the resulting [`UserStats`].

use tokio::runtime::{Builder, Runtime};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use beat_the_box_core::RoundResult;

use crate::store::StatsStore;
use crate::user_stats::UserStats;

/// Work item for the recorder task.
#[derive(Debug, Clone)]
pub enum StatsCommand {
    RoundEnded(RoundResult),
    Guess { correct: bool },
    Reset,
}

/// Running recorder instance.
pub struct StatsRecorder {
    rt: Option<Runtime>,
    cmd_tx: Option<mpsc::UnboundedSender<StatsCommand>>,
    latest_rx: watch::Receiver<UserStats>,
    worker: Option<JoinHandle<()>>,
}

impl StatsRecorder {
    /// Load the current stats and start the worker.
    pub fn start(store: StatsStore) -> std::io::Result<Self> {
        let initial = store.load();
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<StatsCommand>();
        let (latest_tx, latest_rx) = watch::channel(initial);

        let rt = Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("stats-recorder")
            .enable_all()
            .build()?;
        let worker = rt.spawn(run_worker(store, cmd_rx, latest_tx));

        Ok(Self {
            rt: Some(rt),
            cmd_tx: Some(cmd_tx),
            latest_rx,
            worker: Some(worker),
        })
    }

    /// Queue a command. Returns false once the recorder has stopped.
    pub fn submit(&self, command: StatsCommand) -> bool {
        match &self.cmd_tx {
            Some(tx) => tx.send(command).is_ok(),
            None => false,
        }
    }

    pub fn record_round_end(&self, result: RoundResult) -> bool {
        self.submit(StatsCommand::RoundEnded(result))
    }

    pub fn record_guess(&self, correct: bool) -> bool {
        self.submit(StatsCommand::Guess { correct })
    }

    pub fn reset(&self) -> bool {
        self.submit(StatsCommand::Reset)
    }

    /// Stats after the most recently applied command.
    pub fn latest(&self) -> UserStats {
        self.latest_rx.borrow().clone()
    }

    /// Stop accepting commands and wait for queued writes to land.
    pub fn shutdown(mut self) -> UserStats {
        self.finish();
        self.latest()
    }

    fn finish(&mut self) {
        // Closing the sender ends the worker loop once the queue drains.
        self.cmd_tx.take();
        if let (Some(rt), Some(worker)) = (self.rt.as_ref(), self.worker.take()) {
            if let Err(e) = rt.block_on(worker) {
                tracing::warn!("stats recorder task failed: {}", e);
            }
        }
        self.rt.take();
    }
}

impl Drop for StatsRecorder {
    fn drop(&mut self) {
        self.finish();
    }
}

async fn run_worker(
    store: StatsStore,
    mut cmd_rx: mpsc::UnboundedReceiver<StatsCommand>,
    latest_tx: watch::Sender<UserStats>,
) {
    while let Some(command) = cmd_rx.recv().await {
        let store = store.clone();
        let applied = tokio::task::spawn_blocking(move || apply(&store, command)).await;
        match applied {
            Ok(stats) => {
                latest_tx.send_replace(stats);
            }
            Err(e) => tracing::warn!("stats write panicked: {}", e),
        }
    }
    tracing::debug!("stats recorder drained");
}

fn apply(store: &StatsStore, command: StatsCommand) -> UserStats {
    match command {
        StatsCommand::RoundEnded(result) => store.record_round_end(&result),
        StatsCommand::Guess { correct } => store.record_guess(correct),
        StatsCommand::Reset => {
            store.reset();
            store.load()
        }
    }
}
