//! Runs a [`WorkoutSession`] on a single task.
//!
//! Every change to the session, whether a user command or a timer tick, travels
//! through one queue and is applied by the same task. Each running timer is a
//! separate ticker task that sends its token once per second. Tickers are aborted
//! when the session no longer lists their token, and ticks that were already queued
//! are rejected by the session itself.

use std::{collections::HashMap, time::Duration};

use log::{debug, info};
use reptrack_domain::{
    SessionError, SessionSnapshot, TimerToken, Workout, WorkoutHistory, WorkoutSession,
};
use tokio::{
    sync::{mpsc, oneshot, watch},
    task::JoinHandle,
    time::{self, Instant, MissedTickBehavior},
};

use crate::Settings;

pub const TICK: Duration = Duration::from_secs(1);

/// Everything owned by the driver task.
pub struct Tracker {
    pub session: WorkoutSession,
    pub history: WorkoutHistory,
}

impl Tracker {
    #[must_use]
    pub fn new(session: WorkoutSession, history: WorkoutHistory) -> Self {
        Self { session, history }
    }

    /// Finishes the active workout and moves it into the history.
    pub fn finish_and_archive(&mut self) -> Result<Workout, SessionError> {
        let workout = self.session.finish_workout()?;
        self.history.archive(workout.clone());
        Ok(workout)
    }
}

type Call = Box<dyn FnOnce(&mut Tracker) + Send>;

enum Message {
    Call(Call),
    Tick(TimerToken),
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverError {
    #[error("session driver has stopped")]
    Stopped,
}

#[derive(Clone)]
pub struct SessionHandle {
    sender: mpsc::UnboundedSender<Message>,
    snapshots: watch::Receiver<SessionSnapshot>,
}

impl SessionHandle {
    /// Starts the driver task. It stops once every handle has been dropped.
    #[must_use]
    pub fn spawn(tracker: Tracker) -> (Self, JoinHandle<()>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let (snapshot_sender, snapshots) = watch::channel(tracker.session.snapshot());
        let driver = Driver {
            tracker,
            receiver,
            ticks: sender.downgrade(),
            timers: HashMap::new(),
            snapshots: snapshot_sender,
        };
        let task = tokio::spawn(driver.run());
        (Self { sender, snapshots }, task)
    }

    pub async fn call<T, F>(&self, f: F) -> Result<T, DriverError>
    where
        F: FnOnce(&mut Tracker) -> T + Send + 'static,
        T: Send + 'static,
    {
        let (result_sender, result) = oneshot::channel();
        self.sender
            .send(Message::Call(Box::new(move |tracker| {
                let _ = result_sender.send(f(tracker));
            })))
            .map_err(|_| DriverError::Stopped)?;
        result.await.map_err(|_| DriverError::Stopped)
    }

    pub async fn apply_settings(&self, settings: Settings) -> Result<(), DriverError> {
        self.call(move |tracker| tracker.session.set_rest_duration(settings.rest_duration))
            .await
    }

    pub async fn finish_workout(&self) -> Result<Result<Workout, SessionError>, DriverError> {
        self.call(Tracker::finish_and_archive).await
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshots.clone()
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshots.borrow().clone()
    }
}

struct Driver {
    tracker: Tracker,
    receiver: mpsc::UnboundedReceiver<Message>,
    ticks: mpsc::WeakUnboundedSender<Message>,
    timers: HashMap<TimerToken, JoinHandle<()>>,
    snapshots: watch::Sender<SessionSnapshot>,
}

impl Driver {
    async fn run(mut self) {
        while let Some(message) = self.receiver.recv().await {
            match message {
                Message::Call(call) => call(&mut self.tracker),
                Message::Tick(token) => {
                    self.tracker.session.tick(token);
                }
            }
            self.reconcile_timers();
            self.publish();
        }
        for (_, ticker) in self.timers.drain() {
            ticker.abort();
        }
        info!("session driver stopped");
    }

    fn reconcile_timers(&mut self) {
        let active = self.tracker.session.active_timers();
        self.timers.retain(|token, ticker| {
            let keep = active.contains(token);
            if !keep {
                debug!("stopping {} ticker", token.kind);
                ticker.abort();
            }
            keep
        });
        for token in active {
            if !self.timers.contains_key(&token) {
                debug!("starting {} ticker", token.kind);
                let ticker = spawn_ticker(token, self.ticks.clone());
                self.timers.insert(token, ticker);
            }
        }
    }

    fn publish(&self) {
        let next = self.tracker.session.snapshot();
        self.snapshots.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
    }
}

fn spawn_ticker(token: TimerToken, ticks: mpsc::WeakUnboundedSender<Message>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = time::interval_at(Instant::now() + TICK, TICK);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            let Some(sender) = ticks.upgrade() else {
                break;
            };
            if sender.send(Message::Tick(token)).is_err() {
                break;
            }
        }
    })
}
