use std::collections::BTreeSet;

use chrono::{Datelike, Days, NaiveDate};

use crate::{Workout, WorkoutID};

/// Finished workouts of the current app run, oldest first.
#[derive(Debug, Default, Clone)]
pub struct WorkoutHistory {
    workouts: Vec<Workout>,
}

impl WorkoutHistory {
    #[must_use]
    pub fn new(workouts: Vec<Workout>) -> Self {
        let mut history = Self { workouts };
        history.workouts.sort_by_key(|w| w.start);
        history
    }

    #[must_use]
    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn archive(&mut self, workout: Workout) {
        let index = self.workouts.partition_point(|w| w.start <= workout.start);
        self.workouts.insert(index, workout);
    }

    pub fn remove(&mut self, id: WorkoutID) -> Option<Workout> {
        let index = self.workouts.iter().position(|w| w.id == id)?;
        Some(self.workouts.remove(index))
    }

    /// Consecutive training days up to today.
    ///
    /// A streak is still alive if the last workout was yesterday.
    #[must_use]
    pub fn streak(&self, today: NaiveDate) -> u32 {
        let dates = self.dates();
        let start = if dates.contains(&today) {
            today
        } else {
            match today.checked_sub_days(Days::new(1)) {
                Some(yesterday) if dates.contains(&yesterday) => yesterday,
                _ => return 0,
            }
        };
        let mut streak = 0;
        let mut day = Some(start);
        while let Some(d) = day.filter(|d| dates.contains(d)) {
            streak += 1;
            day = d.checked_sub_days(Days::new(1));
        }
        streak
    }

    #[must_use]
    pub fn longest_streak(&self) -> u32 {
        let mut longest = 0;
        let mut current = 0;
        let mut previous: Option<NaiveDate> = None;
        for date in self.dates() {
            current = match previous.and_then(|p| p.checked_add_days(Days::new(1))) {
                Some(next) if next == date => current + 1,
                _ => 1,
            };
            longest = longest.max(current);
            previous = Some(date);
        }
        longest
    }

    /// Workouts in the ISO week containing `date`.
    #[must_use]
    pub fn workouts_in_week(&self, date: NaiveDate) -> usize {
        let week = date.iso_week();
        self.workouts
            .iter()
            .filter(|w| w.date().iso_week() == week)
            .count()
    }

    #[must_use]
    pub fn total_volume(&self) -> f32 {
        self.workouts.iter().map(Workout::volume).sum()
    }

    fn dates(&self) -> BTreeSet<NaiveDate> {
        self.workouts.iter().map(Workout::date).collect()
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use chrono::{Local, TimeZone};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::{Exercise, ExerciseKind, Name, Reps, Weight};

    use super::*;

    fn workout(id: u128, year: i32, month: u32, day: u32) -> Workout {
        let mut workout = Workout::new(
            Name::new("W").unwrap(),
            Local.with_ymd_and_hms(year, month, day, 18, 0, 0).unwrap(),
        );
        workout.id = id.into();
        workout.completed = true;
        workout
    }

    fn history() -> WorkoutHistory {
        WorkoutHistory::new(vec![
            workout(5, 2024, 3, 10),
            workout(1, 2024, 3, 1),
            workout(2, 2024, 3, 2),
            workout(3, 2024, 3, 3),
            workout(4, 2024, 3, 3),
            workout(6, 2024, 3, 11),
        ])
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    #[test]
    fn test_new_sorts_by_start() {
        assert_eq!(
            history()
                .workouts()
                .iter()
                .map(|w| w.id)
                .collect::<Vec<_>>(),
            vec![1.into(), 2.into(), 3.into(), 4.into(), 5.into(), 6.into()]
        );
    }

    #[rstest]
    #[case(date(11), 2)]
    #[case(date(12), 2)]
    #[case(date(13), 0)]
    #[case(date(3), 3)]
    #[case(date(4), 3)]
    #[case(date(9), 0)]
    fn test_streak(#[case] today: NaiveDate, #[case] expected: u32) {
        assert_eq!(history().streak(today), expected);
    }

    #[test]
    fn test_longest_streak() {
        assert_eq!(history().longest_streak(), 3);
        assert_eq!(WorkoutHistory::default().longest_streak(), 0);
    }

    #[test]
    fn test_workouts_in_week() {
        assert_eq!(history().workouts_in_week(date(1)), 4);
        assert_eq!(history().workouts_in_week(date(10)), 1);
        assert_eq!(history().workouts_in_week(date(11)), 1);
        assert_eq!(history().workouts_in_week(date(20)), 0);
    }

    #[test]
    fn test_archive_and_remove() {
        let mut history = history();
        history.archive(workout(7, 2024, 3, 5));
        assert_eq!(history.workouts()[4].id, 7.into());
        assert_eq!(history.remove(7.into()).map(|w| w.id), Some(7.into()));
        assert_eq!(history.remove(7.into()), None);
    }

    #[test]
    fn test_total_volume() {
        let mut w = workout(1, 2024, 3, 1);
        let mut squat = Exercise::new(
            Name::new("Squat").unwrap(),
            1,
            ExerciseKind::WeightReps,
            None,
        );
        squat
            .record_set(Weight::new(100.0).unwrap(), Reps::new(5).unwrap())
            .unwrap();
        w.exercises.push(squat);
        let history = WorkoutHistory::new(vec![w, workout(2, 2024, 3, 2)]);
        assert_approx_eq!(history.total_volume(), 500.0);
    }
}
