use std::cmp::Ordering;

use chrono::{DateTime, Local};
use log::info;
use serde::{Deserialize, Serialize};

use crate::{Name, Reps, ValidationError, Weight, validate_set};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalRecord {
    pub exercise: Name,
    pub weight: Weight,
    pub reps: Reps,
    pub date: DateTime<Local>,
}

impl PersonalRecord {
    /// Heavier wins; at equal weight more reps win.
    #[must_use]
    pub fn compare(&self, weight: Weight, reps: Reps) -> Ordering {
        self.weight
            .partial_cmp(&weight)
            .unwrap_or(Ordering::Equal)
            .then(self.reps.cmp(&reps))
    }
}

pub fn validate_record_addition(
    exercise: &str,
    weight: Weight,
    reps: Reps,
) -> Result<(Name, Weight, Reps), ValidationError> {
    let name = Name::new(exercise)?;
    validate_set(weight, reps)?;
    Ok((name, weight, reps))
}

/// Append-only history of personal records.
///
/// Superseded records are kept so that progress over time can be shown.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordTracker {
    records: Vec<PersonalRecord>,
}

impl RecordTracker {
    #[must_use]
    pub fn new(records: Vec<PersonalRecord>) -> Self {
        Self { records }
    }

    #[must_use]
    pub fn records(&self) -> &[PersonalRecord] {
        &self.records
    }

    pub fn history<'a, 'b>(
        &'a self,
        exercise: &'b Name,
    ) -> impl Iterator<Item = &'a PersonalRecord> + use<'a, 'b> {
        self.records.iter().filter(move |r| &r.exercise == exercise)
    }

    #[must_use]
    pub fn best(&self, exercise: &Name) -> Option<&PersonalRecord> {
        self.history(exercise).fold(None, |best, r| match best {
            Some(b) if b.compare(r.weight, r.reps) != Ordering::Less => Some(b),
            _ => Some(r),
        })
    }

    #[must_use]
    pub fn is_new_record(&self, exercise: &Name, weight: Weight, reps: Reps) -> bool {
        self.best(exercise)
            .is_none_or(|best| best.compare(weight, reps) == Ordering::Less)
    }

    /// Stores the result if it beats every earlier record for the exercise.
    ///
    /// The first result for an exercise is always a record. A result equal to the
    /// current best is not.
    pub fn record_if_best(
        &mut self,
        exercise: &Name,
        weight: Weight,
        reps: Reps,
        date: DateTime<Local>,
    ) -> bool {
        if !self.is_new_record(exercise, weight, reps) {
            return false;
        }
        info!("new personal record for {exercise}: {weight} x {reps}");
        self.records.push(PersonalRecord {
            exercise: exercise.clone(),
            weight,
            reps,
            date,
        });
        true
    }
}
