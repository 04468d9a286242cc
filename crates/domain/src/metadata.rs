//! Name-based lookups over the [`Catalog`].
//!
//! A queried name is first matched exactly, ignoring case. Otherwise every table key contained in
//! the query is a candidate and the longest one wins, so "Tuck Front Lever" resolves
//! to "Front Lever" rather than to a shorter key such as "Lever". Equal-length
//! candidates resolve in key order.

use log::debug;

use crate::{Catalog, ExerciseInfo, ExerciseKind};

impl Catalog {
    #[must_use]
    pub fn exercise_info(&self, name: &str) -> Option<&ExerciseInfo> {
        if let Some(info) = self.exercises.get(name).or_else(|| {
            self.exercises
                .iter()
                .find(|(key, _)| key.to_lowercase() == name.to_lowercase())
                .map(|(_, info)| info)
        }) {
            return Some(info);
        }
        let key = longest_contained(self.exercises.keys().map(String::as_str), name)?;
        debug!("matched {name:?} to exercise {key:?}");
        self.exercises.get(key)
    }

    /// Equipment-free alternatives, empty if the exercise is unknown.
    #[must_use]
    pub fn alternatives(&self, name: &str) -> Vec<String> {
        self.exercise_info(name)
            .map(|info| info.alternatives.clone())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn tutorial(&self, name: &str) -> Option<&str> {
        if let Some(tutorial) = self.exercise_info(name).and_then(|i| i.tutorial.as_deref()) {
            return Some(tutorial);
        }
        self.skill_tutorial(name)
    }

    fn skill_tutorial(&self, name: &str) -> Option<&str> {
        let levels = self
            .skills
            .iter()
            .flat_map(|s| s.levels())
            .filter_map(|l| Some((l.name.as_str(), l.tutorial.as_deref()?)));
        let skills = self.skills.iter().filter_map(|s| {
            let tutorial = s.levels().iter().find_map(|l| l.tutorial.as_deref())?;
            Some((s.name().as_str(), tutorial))
        });
        let candidates = levels.chain(skills).collect::<Vec<_>>();

        if let Some(tutorial) = candidates
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, tutorial)| *tutorial)
        {
            return Some(tutorial);
        }
        let key = longest_contained(candidates.iter().map(|(key, _)| *key), name)?;
        candidates
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, tutorial)| *tutorial)
    }

    /// Timed holds are recognized by name; anything else is tracked by weight and reps.
    #[must_use]
    pub fn classify(&self, name: &str) -> ExerciseKind {
        let name = name.to_lowercase();
        let contains = |markers: &[String]| {
            markers
                .iter()
                .any(|marker| name.contains(&marker.to_lowercase()))
        };
        if contains(&self.hold_markers) && !contains(&self.rep_markers) {
            ExerciseKind::Hold
        } else {
            ExerciseKind::WeightReps
        }
    }
}

fn longest_contained<'a>(keys: impl Iterator<Item = &'a str>, query: &str) -> Option<&'a str> {
    let query = query.to_lowercase();
    let mut best: Option<&str> = None;
    for key in keys {
        if key.is_empty() || !query.contains(&key.to_lowercase()) {
            continue;
        }
        match best {
            Some(b) if b.len() > key.len() || (b.len() == key.len() && b <= key) => {}
            _ => best = Some(key),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn catalog() -> Catalog {
        Catalog::builtin()
    }

    #[test]
    fn test_alternatives_exact() {
        assert_eq!(
            catalog().alternatives("Bench Press"),
            vec!["Push-ups", "Diamond Push-ups", "Decline Push-ups"]
        );
    }

    #[test]
    fn test_alternatives_is_pure() {
        let catalog = catalog();
        assert_eq!(
            catalog.alternatives("Bench Press"),
            catalog.alternatives("Bench Press")
        );
    }

    #[rstest]
    #[case("bench press")]
    #[case("BENCH PRESS")]
    fn test_exact_match_ignores_case(#[case] query: &str) {
        let catalog = catalog();
        let expected = catalog.exercises.get("Bench Press").unwrap();
        assert_eq!(
            catalog.exercise_info(query).map(|i| &i.alternatives),
            Some(&expected.alternatives)
        );
    }

    #[test]
    fn test_alternatives_miss() {
        assert!(catalog().alternatives("Underwater Basket Weaving").is_empty());
    }

    #[test]
    fn test_alternatives_substring() {
        assert_eq!(
            catalog().alternatives("Paused Squat"),
            catalog().alternatives("Squat")
        );
    }

    #[test]
    fn test_alternatives_longest_key_wins() {
        let catalog = Catalog::new(
            BTreeMap::from([
                (
                    "Press".to_string(),
                    ExerciseInfo {
                        alternatives: vec!["A".to_string()],
                        tutorial: None,
                    },
                ),
                (
                    "Bench Press".to_string(),
                    ExerciseInfo {
                        alternatives: vec!["B".to_string()],
                        tutorial: None,
                    },
                ),
            ]),
            vec![],
            vec![],
            vec![],
        );
        assert_eq!(catalog.alternatives("Close-Grip Bench Press"), vec!["B"]);
        assert_eq!(catalog.alternatives("Floor Press"), vec!["A"]);
    }

    #[test]
    fn test_tutorial_substring() {
        let catalog = catalog();
        assert!(catalog.tutorial("Planche").is_some());
        assert_eq!(
            catalog.tutorial("Planche - Tuck Planche"),
            catalog.tutorial("Planche")
        );
    }

    #[rstest]
    #[case("Tuck Planche", Some("https://www.youtube.com/results?search_query=planche+tutorial"))]
    #[case("Wall Handstand", Some("https://www.youtube.com/results?search_query=wall+handstand"))]
    #[case("Handstand", Some("https://www.youtube.com/results?search_query=wall+handstand"))]
    #[case(
        "Handstand - Freestanding Handstand",
        Some("https://www.youtube.com/results?search_query=wall+handstand")
    )]
    #[case("Tuck L-sit", Some("https://www.youtube.com/results?search_query=l-sit+progression"))]
    #[case("Lunges", None)]
    #[case("Unknown", None)]
    fn test_tutorial_skill_fallback(#[case] name: &str, #[case] expected: Option<&str>) {
        assert_eq!(catalog().tutorial(name), expected);
    }

    #[rstest]
    #[case("Plank", ExerciseKind::Hold)]
    #[case("side plank", ExerciseKind::Hold)]
    #[case("L-sit Hold", ExerciseKind::Hold)]
    #[case("Tuck Front Lever", ExerciseKind::Hold)]
    #[case("Planche - Tuck Planche", ExerciseKind::Hold)]
    #[case("Dead Hang", ExerciseKind::Hold)]
    #[case("Handstand Push-ups", ExerciseKind::WeightReps)]
    #[case("Front Lever Raises", ExerciseKind::WeightReps)]
    #[case("Bench Press", ExerciseKind::WeightReps)]
    #[case("Squat", ExerciseKind::WeightReps)]
    fn test_classify(#[case] name: &str, #[case] expected: ExerciseKind) {
        assert_eq!(catalog().classify(name), expected);
    }

    #[rstest]
    #[case(&["Lever", "Front Lever", "Back Lever"], "Tuck Front Lever", Some("Front Lever"))]
    #[case(&["Row", "Bow"], "Elbow Row", Some("Bow"))]
    #[case(&["Row", ""], "Upright Row", Some("Row"))]
    #[case(&["Squat"], "Lunge", None)]
    fn test_longest_contained(
        #[case] keys: &[&str],
        #[case] query: &str,
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(longest_contained(keys.iter().copied(), query), expected);
    }
}
