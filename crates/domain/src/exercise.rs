use serde::{Deserialize, Serialize};

use crate::{Name, Reps, Time, ValidationError, Weight};

pub const DEFAULT_TARGET_SETS: u32 = 3;
pub const DEFAULT_TARGET_HOLD: u32 = 30;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
pub enum ExerciseKind {
    #[default]
    #[strum(to_string = "weight and reps")]
    WeightReps,
    #[strum(to_string = "hold")]
    Hold,
}

/// A completed set. Weight and reps are zero for holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseSet {
    pub number: u32,
    pub weight: Weight,
    pub reps: Reps,
    pub hold: Option<Time>,
}

impl ExerciseSet {
    #[must_use]
    pub fn volume(&self) -> f32 {
        self.reps * self.weight
    }
}

/// An exercise as performed within one workout.
///
/// The current-set counter is always one past the number of recorded sets, so
/// the fields stay private and sets are only added through [`Exercise::record_set`]
/// and [`Exercise::record_hold`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    name: Name,
    sets: Vec<ExerciseSet>,
    current_set: u32,
    target_sets: u32,
    kind: ExerciseKind,
    target_hold: Option<Time>,
    alternatives: Vec<String>,
    tutorial: Option<String>,
}

impl Exercise {
    #[must_use]
    pub fn new(name: Name, target_sets: u32, kind: ExerciseKind, target_hold: Option<Time>) -> Self {
        Self {
            name,
            sets: vec![],
            current_set: 1,
            target_sets: target_sets.max(1),
            kind,
            target_hold: match kind {
                ExerciseKind::Hold => target_hold,
                ExerciseKind::WeightReps => None,
            },
            alternatives: vec![],
            tutorial: None,
        }
    }

    #[must_use]
    pub fn with_metadata(mut self, alternatives: Vec<String>, tutorial: Option<String>) -> Self {
        self.alternatives = alternatives;
        self.tutorial = tutorial;
        self
    }

    #[must_use]
    pub fn name(&self) -> &Name {
        &self.name
    }

    #[must_use]
    pub fn sets(&self) -> &[ExerciseSet] {
        &self.sets
    }

    #[must_use]
    pub fn current_set(&self) -> u32 {
        self.current_set
    }

    #[must_use]
    pub fn target_sets(&self) -> u32 {
        self.target_sets
    }

    #[must_use]
    pub fn kind(&self) -> ExerciseKind {
        self.kind
    }

    #[must_use]
    pub fn target_hold(&self) -> Option<Time> {
        self.target_hold
    }

    #[must_use]
    pub fn alternatives(&self) -> &[String] {
        &self.alternatives
    }

    #[must_use]
    pub fn tutorial(&self) -> Option<&str> {
        self.tutorial.as_deref()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.sets.len() >= self.target_sets as usize
    }

    #[must_use]
    pub fn volume(&self) -> f32 {
        self.sets.iter().map(ExerciseSet::volume).sum()
    }

    pub fn record_set(&mut self, weight: Weight, reps: Reps) -> Result<&ExerciseSet, ValidationError> {
        validate_set(weight, reps)?;
        self.expect_kind(ExerciseKind::WeightReps)?;
        Ok(self.push(weight, reps, None))
    }

    pub fn record_hold(&mut self, duration: Time) -> Result<&ExerciseSet, ValidationError> {
        if !duration.is_positive() {
            return Err(ValidationError::NonPositiveHold);
        }
        self.expect_kind(ExerciseKind::Hold)?;
        Ok(self.push(Weight::default(), Reps::default(), Some(duration)))
    }

    /// Swaps in another exercise while keeping the sets recorded so far.
    pub(crate) fn replace(
        &mut self,
        name: Name,
        kind: ExerciseKind,
        alternatives: Vec<String>,
        tutorial: Option<String>,
    ) {
        self.target_hold = match (self.kind, kind) {
            (ExerciseKind::Hold, ExerciseKind::Hold) => self.target_hold,
            (_, ExerciseKind::Hold) => Some(Time::new(DEFAULT_TARGET_HOLD).unwrap_or_default()),
            (_, ExerciseKind::WeightReps) => None,
        };
        self.name = name;
        self.kind = kind;
        self.alternatives = alternatives;
        self.tutorial = tutorial;
    }

    fn expect_kind(&self, kind: ExerciseKind) -> Result<(), ValidationError> {
        if self.kind == kind {
            Ok(())
        } else {
            Err(ValidationError::WrongExerciseKind {
                exercise: self.name.to_string(),
                kind: self.kind,
            })
        }
    }

    fn push(&mut self, weight: Weight, reps: Reps, hold: Option<Time>) -> &ExerciseSet {
        self.sets.push(ExerciseSet {
            number: self.current_set,
            weight,
            reps,
            hold,
        });
        self.current_set += 1;
        &self.sets[self.sets.len() - 1]
    }
}

pub fn validate_set(weight: Weight, reps: Reps) -> Result<(), ValidationError> {
    if !weight.is_positive() {
        return Err(ValidationError::NonPositiveWeight);
    }
    if !reps.is_positive() {
        return Err(ValidationError::NonPositiveReps);
    }
    Ok(())
}
