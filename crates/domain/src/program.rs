use chrono::Duration;

use crate::{Name, Reps, Time, WorkoutTemplate};

#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutProgram {
    pub name: Name,
    pub category: ProgramCategory,
    pub description: String,
    pub days: Vec<ProgramDay>,
}

impl WorkoutProgram {
    #[must_use]
    pub fn day(&self, day: u32) -> Option<&ProgramDay> {
        self.days.iter().find(|d| d.day == day)
    }

    #[must_use]
    pub fn num_days(&self) -> usize {
        self.days.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
pub enum ProgramCategory {
    Strength,
    Hypertrophy,
    Calisthenics,
    Endurance,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgramDay {
    pub day: u32,
    pub name: Name,
    pub exercises: Vec<ProgramExercise>,
}

impl ProgramDay {
    /// Rough duration assuming two minutes per set including rest.
    #[must_use]
    pub fn estimated_duration(&self) -> Duration {
        Duration::minutes(
            self.exercises
                .iter()
                .map(|e| i64::from(e.sets) * 2)
                .sum::<i64>(),
        )
    }

    #[must_use]
    pub fn to_template(&self) -> WorkoutTemplate {
        WorkoutTemplate::new(
            self.name.clone(),
            self.exercises.iter().map(|e| e.name.clone()).collect(),
            self.estimated_duration(),
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgramExercise {
    pub name: String,
    pub sets: u32,
    pub target: Target,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Target {
    Reps(Reps),
    Hold(Time),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalisthenicsSkill {
    name: Name,
    category: SkillCategory,
    levels: Vec<ProgressionLevel>,
}

impl CalisthenicsSkill {
    pub fn new(
        name: Name,
        category: SkillCategory,
        levels: Vec<ProgressionLevel>,
    ) -> Result<Self, SkillError> {
        if levels.is_empty() {
            return Err(SkillError::NoLevels);
        }
        if let Some(pair) = levels.windows(2).find(|w| w[0].level >= w[1].level) {
            return Err(SkillError::UnorderedLevels(pair[0].level, pair[1].level));
        }
        Ok(Self {
            name,
            category,
            levels,
        })
    }

    #[must_use]
    pub fn name(&self) -> &Name {
        &self.name
    }

    #[must_use]
    pub fn category(&self) -> SkillCategory {
        self.category
    }

    #[must_use]
    pub fn levels(&self) -> &[ProgressionLevel] {
        &self.levels
    }

    #[must_use]
    pub fn level(&self, level: u32) -> Option<&ProgressionLevel> {
        self.levels.iter().find(|l| l.level == level)
    }

    #[must_use]
    pub fn next_level(&self, current: u32) -> Option<&ProgressionLevel> {
        self.levels.iter().find(|l| l.level > current)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgressionLevel {
    pub level: u32,
    pub name: String,
    pub description: String,
    pub target: Target,
    pub tutorial: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
pub enum SkillCategory {
    Push,
    Pull,
    Core,
    Balance,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SkillError {
    #[error("skill must have at least one level")]
    NoLevels,
    #[error("levels must be strictly ascending ({0} >= {1})")]
    UnorderedLevels(u32, u32),
}
