use std::collections::BTreeMap;

use chrono::Duration;
use log::warn;

use crate::{
    CalisthenicsSkill, Name, ProgramCategory, ProgramDay, ProgramExercise, ProgressionLevel, Reps,
    SkillCategory, Target, Time, WorkoutProgram, WorkoutTemplate,
};

/// Read-only reference data shared by the session and the presentation layer.
///
/// The catalog is built once at startup, either from the built-in tables or from
/// host-supplied data, and handed to its users behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub(crate) exercises: BTreeMap<String, ExerciseInfo>,
    pub(crate) skills: Vec<CalisthenicsSkill>,
    pub(crate) programs: Vec<WorkoutProgram>,
    pub(crate) templates: Vec<WorkoutTemplate>,
    pub(crate) hold_markers: Vec<String>,
    pub(crate) rep_markers: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExerciseInfo {
    pub alternatives: Vec<String>,
    pub tutorial: Option<String>,
}

impl Catalog {
    #[must_use]
    pub fn new(
        exercises: BTreeMap<String, ExerciseInfo>,
        skills: Vec<CalisthenicsSkill>,
        programs: Vec<WorkoutProgram>,
        templates: Vec<WorkoutTemplate>,
    ) -> Self {
        Self {
            exercises,
            skills,
            programs,
            templates,
            hold_markers: HOLD_MARKERS.iter().map(ToString::to_string).collect(),
            rep_markers: REP_MARKERS.iter().map(ToString::to_string).collect(),
        }
    }

    /// Replaces the name fragments used to recognize timed exercises.
    #[must_use]
    pub fn with_markers(mut self, hold_markers: &[&str], rep_markers: &[&str]) -> Self {
        self.hold_markers = hold_markers.iter().map(ToString::to_string).collect();
        self.rep_markers = rep_markers.iter().map(ToString::to_string).collect();
        self
    }

    #[must_use]
    pub fn builtin() -> Self {
        let exercises = EXERCISES
            .iter()
            .map(|(name, alternatives, tutorial)| {
                (
                    (*name).to_string(),
                    ExerciseInfo {
                        alternatives: alternatives.iter().map(ToString::to_string).collect(),
                        tutorial: tutorial.map(ToString::to_string),
                    },
                )
            })
            .collect();
        let skills = SKILLS.iter().filter_map(BaseSkill::build).collect();
        let programs = PROGRAMS.iter().filter_map(BaseProgram::build).collect();
        let templates = TEMPLATES
            .iter()
            .filter_map(|(name, exercises, minutes)| match Name::new(name) {
                Ok(name) => Some(WorkoutTemplate::new(
                    name,
                    exercises.iter().map(ToString::to_string).collect(),
                    Duration::minutes(*minutes),
                )),
                Err(err) => {
                    warn!("skipping template {name}: {err}");
                    None
                }
            })
            .collect();
        Self::new(exercises, skills, programs, templates)
    }

    #[must_use]
    pub fn skills(&self) -> &[CalisthenicsSkill] {
        &self.skills
    }

    #[must_use]
    pub fn skill(&self, name: &str) -> Option<&CalisthenicsSkill> {
        self.skills.iter().find(|s| s.name() == name)
    }

    #[must_use]
    pub fn programs(&self) -> &[WorkoutProgram] {
        &self.programs
    }

    #[must_use]
    pub fn program(&self, name: &str) -> Option<&WorkoutProgram> {
        self.programs.iter().find(|p| p.name == name)
    }

    #[must_use]
    pub fn templates(&self) -> &[WorkoutTemplate] {
        &self.templates
    }

    #[must_use]
    pub fn exercise_names(&self) -> Vec<&str> {
        self.exercises.keys().map(String::as_str).collect()
    }
}

const HOLD_MARKERS: &[&str] = &[
    "Plank",
    "Hold",
    "L-sit",
    "Lever",
    "Planche",
    "Handstand",
    "Dead Hang",
    "Wall Sit",
    "Hollow Body",
    "Human Flag",
];

const REP_MARKERS: &[&str] = &["Push-up", "Pull-up", "Press", "Raise", "Row"];

type BaseExercise = (&'static str, &'static [&'static str], Option<&'static str>);

const EXERCISES: &[BaseExercise] = &[
    (
        "Bench Press",
        &["Push-ups", "Diamond Push-ups", "Decline Push-ups"],
        Some("https://www.youtube.com/results?search_query=bench+press+form"),
    ),
    (
        "Incline Bench Press",
        &["Decline Push-ups", "Pike Push-ups"],
        None,
    ),
    (
        "Overhead Press",
        &["Pike Push-ups", "Handstand Push-ups"],
        Some("https://www.youtube.com/results?search_query=overhead+press+form"),
    ),
    ("Dips", &["Bench Dips", "Diamond Push-ups"], None),
    (
        "Squat",
        &["Bodyweight Squats", "Bulgarian Split Squats", "Pistol Squats"],
        Some("https://www.youtube.com/results?search_query=barbell+squat+form"),
    ),
    (
        "Deadlift",
        &["Single-Leg Romanian Deadlifts", "Glute Bridges", "Nordic Curls"],
        Some("https://www.youtube.com/results?search_query=deadlift+form"),
    ),
    ("Leg Press", &["Bodyweight Squats", "Jump Squats"], None),
    ("Lunges", &["Reverse Lunges", "Step-ups"], None),
    (
        "Pull-ups",
        &["Inverted Rows", "Negative Pull-ups", "Doorframe Rows"],
        Some("https://www.youtube.com/results?search_query=pull+up+tutorial"),
    ),
    ("Barbell Row", &["Inverted Rows", "Doorframe Rows"], None),
    ("Lat Pulldown", &["Pull-ups", "Negative Pull-ups"], None),
    ("Bicep Curls", &["Chin-ups", "Towel Curls"], None),
    ("Tricep Extensions", &["Diamond Push-ups", "Bench Dips"], None),
    (
        "Plank",
        &["Hollow Body Hold", "Dead Bug", "Side Plank"],
        Some("https://www.youtube.com/results?search_query=plank+form"),
    ),
    ("Hanging Leg Raises", &["Lying Leg Raises", "Tuck-ups"], None),
    (
        "Planche",
        &["Pseudo Planche Push-ups", "Planche Leans"],
        Some("https://www.youtube.com/results?search_query=planche+tutorial"),
    ),
    (
        "Front Lever",
        &["Tuck Front Lever", "Front Lever Raises"],
        Some("https://www.youtube.com/results?search_query=front+lever+tutorial"),
    ),
];

struct BaseSkill {
    name: &'static str,
    category: SkillCategory,
    levels: &'static [BaseLevel],
}

struct BaseLevel {
    name: &'static str,
    description: &'static str,
    hold: u32,
    reps: u32,
    tutorial: Option<&'static str>,
}

impl BaseSkill {
    fn build(&self) -> Option<CalisthenicsSkill> {
        let name = match Name::new(self.name) {
            Ok(name) => name,
            Err(err) => {
                warn!("skipping skill {}: {err}", self.name);
                return None;
            }
        };
        let levels = self
            .levels
            .iter()
            .zip(1..)
            .map(|(l, level)| ProgressionLevel {
                level,
                name: l.name.to_string(),
                description: l.description.to_string(),
                target: base_target(l.hold, l.reps),
                tutorial: l.tutorial.map(ToString::to_string),
            })
            .collect();
        CalisthenicsSkill::new(name, self.category, levels)
            .inspect_err(|err| warn!("skipping skill {}: {err}", self.name))
            .ok()
    }
}

struct BaseProgram {
    name: &'static str,
    category: ProgramCategory,
    description: &'static str,
    days: &'static [(&'static str, &'static [(&'static str, u32, u32, u32)])],
}

impl BaseProgram {
    fn build(&self) -> Option<WorkoutProgram> {
        let name = Name::new(self.name)
            .inspect_err(|err| warn!("skipping program {}: {err}", self.name))
            .ok()?;
        let days = self
            .days
            .iter()
            .zip(1..)
            .map(|((day_name, exercises), day)| {
                Some(ProgramDay {
                    day,
                    name: Name::new(day_name)
                        .inspect_err(|err| warn!("skipping program {}: {err}", self.name))
                        .ok()?,
                    exercises: exercises
                        .iter()
                        .map(|(exercise, sets, reps, hold)| ProgramExercise {
                            name: (*exercise).to_string(),
                            sets: *sets,
                            target: base_target(*hold, *reps),
                        })
                        .collect(),
                })
            })
            .collect::<Option<Vec<_>>>()?;
        Some(WorkoutProgram {
            name,
            category: self.category,
            description: self.description.to_string(),
            days,
        })
    }
}

fn base_target(hold: u32, reps: u32) -> Target {
    if hold > 0 {
        Target::Hold(Time::new(hold).unwrap_or_default())
    } else {
        Target::Reps(Reps::new(reps).unwrap_or_default())
    }
}

const SKILLS: &[BaseSkill] = &[
    BaseSkill {
        name: "Planche",
        category: SkillCategory::Push,
        levels: &[
            BaseLevel {
                name: "Planche Lean",
                description: "Lean forward in a push-up position with straight arms",
                hold: 30,
                reps: 0,
                tutorial: Some("https://www.youtube.com/results?search_query=planche+lean"),
            },
            BaseLevel {
                name: "Tuck Planche",
                description: "Knees tucked to the chest, hips level with the shoulders",
                hold: 15,
                reps: 0,
                tutorial: Some("https://www.youtube.com/results?search_query=tuck+planche"),
            },
            BaseLevel {
                name: "Advanced Tuck Planche",
                description: "Back flat, knees pulled away from the chest",
                hold: 10,
                reps: 0,
                tutorial: None,
            },
            BaseLevel {
                name: "Straddle Planche",
                description: "Legs straight and spread wide",
                hold: 5,
                reps: 0,
                tutorial: None,
            },
        ],
    },
    BaseSkill {
        name: "Front Lever",
        category: SkillCategory::Pull,
        levels: &[
            BaseLevel {
                name: "Tuck Front Lever",
                description: "Hang horizontally with knees tucked",
                hold: 15,
                reps: 0,
                tutorial: Some("https://www.youtube.com/results?search_query=tuck+front+lever"),
            },
            BaseLevel {
                name: "One-Leg Front Lever",
                description: "One leg extended, the other tucked",
                hold: 10,
                reps: 0,
                tutorial: None,
            },
            BaseLevel {
                name: "Full Front Lever",
                description: "Body straight and horizontal",
                hold: 5,
                reps: 0,
                tutorial: None,
            },
        ],
    },
    BaseSkill {
        name: "Handstand",
        category: SkillCategory::Balance,
        levels: &[
            BaseLevel {
                name: "Wall Handstand",
                description: "Chest to the wall, arms locked",
                hold: 60,
                reps: 0,
                tutorial: Some("https://www.youtube.com/results?search_query=wall+handstand"),
            },
            BaseLevel {
                name: "Freestanding Handstand",
                description: "Balance without support",
                hold: 30,
                reps: 0,
                tutorial: None,
            },
        ],
    },
    BaseSkill {
        name: "L-sit",
        category: SkillCategory::Core,
        levels: &[
            BaseLevel {
                name: "Tuck L-sit",
                description: "Support on parallettes with knees tucked",
                hold: 20,
                reps: 0,
                tutorial: Some("https://www.youtube.com/results?search_query=l-sit+progression"),
            },
            BaseLevel {
                name: "Full L-sit",
                description: "Legs straight and parallel to the floor",
                hold: 15,
                reps: 0,
                tutorial: None,
            },
        ],
    },
    BaseSkill {
        name: "Muscle-up",
        category: SkillCategory::Pull,
        levels: &[
            BaseLevel {
                name: "Explosive Pull-ups",
                description: "Pull the chest to the bar",
                hold: 0,
                reps: 8,
                tutorial: None,
            },
            BaseLevel {
                name: "Negative Muscle-ups",
                description: "Slow descent through the transition",
                hold: 0,
                reps: 5,
                tutorial: None,
            },
            BaseLevel {
                name: "Strict Muscle-up",
                description: "Full repetition without kipping",
                hold: 0,
                reps: 3,
                tutorial: Some("https://www.youtube.com/results?search_query=muscle+up+tutorial"),
            },
        ],
    },
];

const PROGRAMS: &[BaseProgram] = &[
    BaseProgram {
        name: "Beginner Full Body",
        category: ProgramCategory::Strength,
        description: "Three whole-body sessions per week built around the main lifts",
        days: &[
            (
                "Full Body A",
                &[("Squat", 3, 5, 0), ("Bench Press", 3, 5, 0), ("Barbell Row", 3, 5, 0)],
            ),
            (
                "Full Body B",
                &[("Deadlift", 1, 5, 0), ("Overhead Press", 3, 5, 0), ("Pull-ups", 3, 8, 0)],
            ),
            (
                "Full Body C",
                &[("Squat", 3, 5, 0), ("Dips", 3, 10, 0), ("Plank", 3, 0, 45)],
            ),
        ],
    },
    BaseProgram {
        name: "Push Pull Legs",
        category: ProgramCategory::Hypertrophy,
        description: "Split routine with higher volume per muscle group",
        days: &[
            (
                "Push",
                &[
                    ("Bench Press", 4, 8, 0),
                    ("Overhead Press", 3, 10, 0),
                    ("Tricep Extensions", 3, 12, 0),
                ],
            ),
            (
                "Pull",
                &[
                    ("Pull-ups", 4, 8, 0),
                    ("Barbell Row", 3, 10, 0),
                    ("Bicep Curls", 3, 12, 0),
                ],
            ),
            (
                "Legs",
                &[("Squat", 4, 8, 0), ("Leg Press", 3, 12, 0), ("Lunges", 3, 10, 0)],
            ),
        ],
    },
    BaseProgram {
        name: "Calisthenics Foundations",
        category: ProgramCategory::Calisthenics,
        description: "Bodyweight basics and static holds",
        days: &[
            (
                "Statics",
                &[("Planche Lean", 3, 0, 20), ("Tuck Front Lever", 3, 0, 10), ("Plank", 3, 0, 60)],
            ),
            (
                "Dynamics",
                &[("Pull-ups", 4, 6, 0), ("Dips", 4, 8, 0), ("Hanging Leg Raises", 3, 10, 0)],
            ),
        ],
    },
];

const TEMPLATES: &[(&str, &[&str], i64)] = &[
    ("Push Day", &["Bench Press", "Overhead Press", "Dips"], 60),
    ("Pull Day", &["Pull-ups", "Barbell Row", "Bicep Curls"], 55),
    ("Leg Day", &["Squat", "Deadlift", "Lunges"], 70),
    ("Core Blast", &["Plank", "Hanging Leg Raises", "L-sit Hold"], 25),
];
