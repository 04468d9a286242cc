use std::sync::Arc;

use chrono::{Duration, Local};
use log::{debug, info, warn};

use crate::{
    Catalog, DEFAULT_TARGET_HOLD, DEFAULT_TARGET_SETS, Exercise, ExerciseKind, ExerciseSet, Name,
    ProgramDay, RecordTracker, Reps, RestDuration, RestState, RestTimer, SessionError, Stopwatch,
    Target, Tick, Time, TimerKind, TimerToken, Weight, Workout, WorkoutTemplate,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum Phase {
    Idle,
    Active,
    Finished,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Started,
    ExerciseAdded(usize),
    ExerciseSelected(usize),
    SetCompleted {
        exercise: usize,
        set: ExerciseSet,
        new_record: bool,
    },
    AlternativeSwitched(usize),
    Paused,
    Resumed,
    RestStarted(TimerToken),
    RestTick(u32),
    RestFinished,
    RestSkipped,
    ElapsedTick(u32),
    RecordBadgeDismissed,
    Finished,
    Discarded,
}

/// State handed to observers after every change.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub phase: Phase,
    pub workout: Option<Workout>,
    pub current_exercise: usize,
    pub elapsed: u32,
    pub paused: bool,
    pub rest: RestState,
    pub new_record: bool,
}

pub trait Observer: Send {
    fn notify(&mut self, event: &SessionEvent, snapshot: &SessionSnapshot);
}

impl<F> Observer for F
where
    F: FnMut(&SessionEvent, &SessionSnapshot) + Send,
{
    fn notify(&mut self, event: &SessionEvent, snapshot: &SessionSnapshot) {
        self(event, snapshot);
    }
}

enum State {
    Idle,
    Active(Workout),
    Finished(Workout),
}

/// Controller for the live workout.
///
/// At most one workout is active at a time. Timer ticks are fed in from outside
/// through [`WorkoutSession::tick`] and are ignored unless their token matches one of
/// [`WorkoutSession::active_timers`].
pub struct WorkoutSession {
    catalog: Arc<Catalog>,
    records: RecordTracker,
    rest_duration: RestDuration,
    state: State,
    session: u64,
    current: usize,
    rest: RestTimer,
    clock: Stopwatch,
    paused: bool,
    new_record: bool,
    observers: Vec<Box<dyn Observer>>,
}

impl WorkoutSession {
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, records: RecordTracker) -> Self {
        Self {
            catalog,
            records,
            rest_duration: RestDuration::default(),
            state: State::Idle,
            session: 0,
            current: 0,
            rest: RestTimer::default(),
            clock: Stopwatch::default(),
            paused: false,
            new_record: false,
            observers: vec![],
        }
    }

    pub fn subscribe(&mut self, observer: Box<dyn Observer>) {
        self.observers.push(observer);
    }

    /// Takes effect the next time a rest period starts.
    pub fn set_rest_duration(&mut self, rest_duration: RestDuration) {
        self.rest_duration = rest_duration;
    }

    #[must_use]
    pub fn rest_duration(&self) -> RestDuration {
        self.rest_duration
    }

    #[must_use]
    pub fn records(&self) -> &RecordTracker {
        &self.records
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        match self.state {
            State::Idle => Phase::Idle,
            State::Active(_) => Phase::Active,
            State::Finished(_) => Phase::Finished,
        }
    }

    #[must_use]
    pub fn workout(&self) -> Option<&Workout> {
        match &self.state {
            State::Idle => None,
            State::Active(workout) | State::Finished(workout) => Some(workout),
        }
    }

    #[must_use]
    pub fn current_exercise_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_exercise(&self) -> Option<&Exercise> {
        match &self.state {
            State::Active(workout) => workout.exercises.get(self.current),
            State::Idle | State::Finished(_) => None,
        }
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[must_use]
    pub fn has_new_record(&self) -> bool {
        self.new_record
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase(),
            workout: self.workout().cloned(),
            current_exercise: self.current,
            elapsed: self.clock.elapsed(),
            paused: self.paused,
            rest: self.rest.state(),
            new_record: self.new_record,
        }
    }

    /// A new workout may replace the current one only if nothing has been added to it.
    #[must_use]
    pub fn validate_workout_start(&self) -> bool {
        match &self.state {
            State::Active(workout) => workout.is_empty(),
            State::Idle | State::Finished(_) => true,
        }
    }

    pub fn start_from_template(&mut self, template: &WorkoutTemplate) -> Result<(), SessionError> {
        self.check_start()?;
        let mut workout = Workout::new(template.name.clone(), Local::now());
        workout.exercises = template
            .exercises
            .iter()
            .filter_map(|name| match Name::new(name) {
                Ok(name) => Some(self.instantiate(name, DEFAULT_TARGET_SETS, None)),
                Err(err) => {
                    warn!("skipping exercise {name:?} of template {}: {err}", template.name);
                    None
                }
            })
            .collect();
        self.begin(workout);
        Ok(())
    }

    pub fn start_from_program_day(&mut self, day: &ProgramDay) -> Result<(), SessionError> {
        self.check_start()?;
        let mut workout = Workout::new(day.name.clone(), Local::now());
        workout.exercises = day
            .exercises
            .iter()
            .filter_map(|e| match Name::new(&e.name) {
                Ok(name) => {
                    let hold = match e.target {
                        Target::Hold(time) => Some(time),
                        Target::Reps(_) => None,
                    };
                    Some(self.instantiate(name, e.sets, hold))
                }
                Err(err) => {
                    warn!("skipping exercise {:?} of {}: {err}", e.name, day.name);
                    None
                }
            })
            .collect();
        self.begin(workout);
        Ok(())
    }

    pub fn start_empty(&mut self, name: &str) -> Result<(), SessionError> {
        let name = Name::new(name)?;
        self.check_start()?;
        self.begin(Workout::new(name, Local::now()));
        Ok(())
    }

    pub fn add_exercise(
        &mut self,
        name: &str,
        target_sets: u32,
        kind: ExerciseKind,
        hold: Option<Time>,
    ) -> Result<usize, SessionError> {
        let name = Name::new(name)?;
        let alternatives = self.catalog.alternatives(name.as_str());
        let tutorial = self.catalog.tutorial(name.as_str()).map(ToString::to_string);
        let exercise =
            Exercise::new(name, target_sets, kind, hold).with_metadata(alternatives, tutorial);
        let workout = self.active_mut()?;
        workout.exercises.push(exercise);
        let index = workout.exercises.len() - 1;
        self.notify(SessionEvent::ExerciseAdded(index));
        Ok(index)
    }

    pub fn select_exercise(&mut self, index: usize) -> Result<(), SessionError> {
        let workout = self.active_mut()?;
        if index >= workout.exercises.len() {
            return Err(SessionError::InvalidExerciseIndex(index));
        }
        self.current = index;
        self.notify(SessionEvent::ExerciseSelected(index));
        Ok(())
    }

    pub fn next_exercise(&mut self) -> Result<usize, SessionError> {
        let index = self.current + 1;
        self.select_exercise(index)?;
        Ok(index)
    }

    pub fn previous_exercise(&mut self) -> Result<usize, SessionError> {
        self.active_mut()?;
        let index = self
            .current
            .checked_sub(1)
            .ok_or(SessionError::InvalidExerciseIndex(0))?;
        self.select_exercise(index)?;
        Ok(index)
    }

    /// Logs a weight and reps set for the current exercise.
    ///
    /// Returns whether the set is a new personal record. On success the rest timer
    /// is (re)started.
    pub fn complete_set(&mut self, weight: Weight, reps: Reps) -> Result<bool, SessionError> {
        self.check_running()?;
        let current = self.current;
        let exercise = self.current_mut()?;
        let set = exercise
            .record_set(weight, reps)
            .inspect_err(|err| warn!("rejected set: {err}"))?
            .clone();
        let name = exercise.name().clone();

        let new_record = self.records.record_if_best(&name, weight, reps, Local::now());
        if new_record {
            self.new_record = true;
        }
        self.notify(SessionEvent::SetCompleted {
            exercise: current,
            set,
            new_record,
        });
        self.start_rest();
        Ok(new_record)
    }

    pub fn complete_hold_set(&mut self, duration: Time) -> Result<(), SessionError> {
        self.check_running()?;
        let current = self.current;
        let set = self
            .current_mut()?
            .record_hold(duration)
            .inspect_err(|err| warn!("rejected hold: {err}"))?
            .clone();
        self.notify(SessionEvent::SetCompleted {
            exercise: current,
            set,
            new_record: false,
        });
        self.start_rest();
        Ok(())
    }

    #[must_use]
    pub fn validate_alternative_switch(&self) -> bool {
        self.current_exercise().is_some()
    }

    /// Renames the current exercise, keeping its recorded sets.
    pub fn switch_to_alternative(&mut self, name: &str) -> Result<(), SessionError> {
        let name = Name::new(name)?;
        let kind = self.catalog.classify(name.as_str());
        let tutorial = self.catalog.tutorial(name.as_str()).map(ToString::to_string);
        let mut alternatives = self.catalog.alternatives(name.as_str());
        let current = self.current;
        let exercise = self.current_mut()?;
        if alternatives.is_empty() {
            alternatives = exercise
                .alternatives()
                .iter()
                .map(|a| {
                    if a == name.as_str() {
                        exercise.name().to_string()
                    } else {
                        a.clone()
                    }
                })
                .collect();
        }
        info!("switching {} to {name}", exercise.name());
        exercise.replace(name, kind, alternatives, tutorial);
        self.notify(SessionEvent::AlternativeSwitched(current));
        Ok(())
    }

    pub fn pause_workout(&mut self) -> Result<(), SessionError> {
        self.active_mut()?;
        if self.paused {
            return Err(SessionError::Paused);
        }
        self.paused = true;
        self.clock.stop();
        self.rest.skip();
        self.notify(SessionEvent::Paused);
        Ok(())
    }

    pub fn resume_workout(&mut self) -> Result<(), SessionError> {
        self.active_mut()?;
        if !self.paused {
            return Err(SessionError::NotPaused);
        }
        self.paused = false;
        self.clock.start();
        self.notify(SessionEvent::Resumed);
        Ok(())
    }

    /// Returns `false` if no rest period was running.
    pub fn skip_rest(&mut self) -> Result<bool, SessionError> {
        self.active_mut()?;
        let skipped = self.rest.skip();
        if skipped {
            self.notify(SessionEvent::RestSkipped);
        }
        Ok(skipped)
    }

    pub fn dismiss_record_badge(&mut self) {
        if self.new_record {
            self.new_record = false;
            self.notify(SessionEvent::RecordBadgeDismissed);
        }
    }

    /// Freezes the active workout and returns it for archiving.
    pub fn finish_workout(&mut self) -> Result<Workout, SessionError> {
        let mut workout = match std::mem::replace(&mut self.state, State::Idle) {
            State::Active(workout) => workout,
            state => {
                self.state = state;
                return Err(SessionError::NoActiveWorkout);
            }
        };
        self.stop_timers();
        workout.elapsed = Duration::seconds(i64::from(self.clock.elapsed()));
        workout.completed = true;
        info!(
            "finished workout {} after {} s with {} sets",
            workout.name,
            workout.elapsed.num_seconds(),
            workout.num_sets()
        );
        self.state = State::Finished(workout.clone());
        self.notify(SessionEvent::Finished);
        Ok(workout)
    }

    /// Drops the active workout without archiving it.
    pub fn discard_workout(&mut self) -> Result<(), SessionError> {
        self.active_mut()?;
        self.stop_timers();
        self.state = State::Idle;
        self.current = 0;
        info!("discarded workout");
        self.notify(SessionEvent::Discarded);
        Ok(())
    }

    /// Timers the host has to drive, one tick per second each.
    #[must_use]
    pub fn active_timers(&self) -> Vec<TimerToken> {
        if self.paused || !matches!(self.state, State::Active(_)) {
            return vec![];
        }
        let mut timers = vec![];
        if self.clock.is_running() {
            timers.push(self.token(TimerKind::Elapsed, self.clock.generation()));
        }
        if self.rest.is_running() {
            timers.push(self.token(TimerKind::Rest, self.rest.generation()));
        }
        timers
    }

    pub fn tick(&mut self, token: TimerToken) -> Tick {
        if token.session != self.session || !matches!(self.state, State::Active(_)) {
            debug!("discarding {} tick of ended session {}", token.kind, token.session);
            return Tick::Stale;
        }
        if self.paused {
            debug!("discarding {} tick while paused", token.kind);
            return Tick::Stale;
        }
        let tick = match token.kind {
            TimerKind::Elapsed => self.clock.tick(token.generation),
            TimerKind::Rest => self.rest.tick(token.generation),
        };
        match (token.kind, tick) {
            (TimerKind::Elapsed, Tick::Applied(seconds)) => {
                if let State::Active(workout) = &mut self.state {
                    workout.elapsed = Duration::seconds(i64::from(seconds));
                }
                self.notify(SessionEvent::ElapsedTick(seconds));
            }
            (TimerKind::Rest, Tick::Applied(remaining)) => {
                self.notify(SessionEvent::RestTick(remaining));
            }
            (TimerKind::Rest, Tick::Finished) => {
                info!("rest finished");
                self.notify(SessionEvent::RestFinished);
            }
            (_, Tick::Stale) => debug!("discarding stale {} tick", token.kind),
            (TimerKind::Elapsed, Tick::Finished) => {}
        }
        tick
    }

    /// Sets can only be logged while the workout is active and not paused.
    fn check_running(&mut self) -> Result<(), SessionError> {
        self.active_mut()?;
        if self.paused {
            warn!("rejected set while paused");
            return Err(SessionError::Paused);
        }
        Ok(())
    }

    fn check_start(&self) -> Result<(), SessionError> {
        if self.validate_workout_start() {
            Ok(())
        } else {
            warn!("refusing to start a workout while another is in progress");
            Err(SessionError::WorkoutInProgress)
        }
    }

    fn instantiate(&self, name: Name, target_sets: u32, hold: Option<Time>) -> Exercise {
        let kind = self.catalog.classify(name.as_str());
        let hold = match kind {
            ExerciseKind::Hold => {
                hold.or_else(|| Some(Time::new(DEFAULT_TARGET_HOLD).unwrap_or_default()))
            }
            ExerciseKind::WeightReps => None,
        };
        let alternatives = self.catalog.alternatives(name.as_str());
        let tutorial = self.catalog.tutorial(name.as_str()).map(ToString::to_string);
        Exercise::new(name, target_sets, kind, hold).with_metadata(alternatives, tutorial)
    }

    fn begin(&mut self, workout: Workout) {
        info!(
            "starting workout {} with {} exercises",
            workout.name,
            workout.exercises.len()
        );
        self.session += 1;
        self.state = State::Active(workout);
        self.current = 0;
        self.paused = false;
        self.new_record = false;
        self.rest = RestTimer::default();
        self.clock = Stopwatch::default();
        self.clock.start();
        self.notify(SessionEvent::Started);
    }

    fn start_rest(&mut self) {
        let generation = self.rest.start(self.rest_duration);
        let token = self.token(TimerKind::Rest, generation);
        self.notify(SessionEvent::RestStarted(token));
    }

    fn stop_timers(&mut self) {
        self.clock.stop();
        self.rest.skip();
        self.paused = false;
    }

    fn token(&self, kind: TimerKind, generation: u64) -> TimerToken {
        TimerToken {
            session: self.session,
            kind,
            generation,
        }
    }

    fn active_mut(&mut self) -> Result<&mut Workout, SessionError> {
        match &mut self.state {
            State::Active(workout) => Ok(workout),
            State::Idle | State::Finished(_) => {
                warn!("no active workout");
                Err(SessionError::NoActiveWorkout)
            }
        }
    }

    fn current_mut(&mut self) -> Result<&mut Exercise, SessionError> {
        let current = self.current;
        self.active_mut()?
            .exercises
            .get_mut(current)
            .ok_or(SessionError::InvalidExerciseIndex(current))
    }

    fn notify(&mut self, event: SessionEvent) {
        if self.observers.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        for observer in &mut self.observers {
            observer.notify(&event, &snapshot);
        }
    }
}
