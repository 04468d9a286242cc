#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod catalog;
mod error;
mod exercise;
mod history;
mod metadata;
mod name;
mod program;
mod record;
mod session;
mod template;
mod timer;
mod tutorial;
mod units;
mod workout;

pub use catalog::{Catalog, ExerciseInfo};
pub use error::{ReadError, SessionError, StorageError, UpdateError, ValidationError};
pub use exercise::{
    DEFAULT_TARGET_HOLD, DEFAULT_TARGET_SETS, Exercise, ExerciseKind, ExerciseSet, validate_set,
};
pub use history::WorkoutHistory;
pub use name::{Name, NameError};
pub use program::{
    CalisthenicsSkill, ProgramCategory, ProgramDay, ProgramExercise, ProgressionLevel,
    SkillCategory, SkillError, Target, WorkoutProgram,
};
pub use record::{PersonalRecord, RecordTracker, validate_record_addition};
pub use session::{Observer, Phase, SessionEvent, SessionSnapshot, WorkoutSession};
pub use template::{TemplateID, TemplateLibrary, WorkoutTemplate};
pub use timer::{
    RestDuration, RestDurationError, RestState, RestTimer, Stopwatch, Tick, TimerKind, TimerToken,
};
pub use tutorial::{LinkOpener, TutorialError, TutorialLink, open_tutorial};
pub use units::{Reps, RepsError, Time, TimeError, Weight, WeightError};
pub use workout::{Workout, WorkoutID};
