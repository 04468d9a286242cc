use crate::{ExerciseKind, NameError};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("weight must be greater than zero")]
    NonPositiveWeight,
    #[error("reps must be greater than zero")]
    NonPositiveReps,
    #[error("hold duration must be greater than zero")]
    NonPositiveHold,
    #[error("{exercise} is tracked as {kind}")]
    WrongExerciseKind { exercise: String, kind: ExerciseKind },
    #[error(transparent)]
    Name(#[from] NameError),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("no active workout")]
    NoActiveWorkout,
    #[error("a workout with exercises is already in progress")]
    WorkoutInProgress,
    #[error("no exercise at index {0}")]
    InvalidExerciseIndex(usize),
    #[error("workout is already paused")]
    Paused,
    #[error("workout is not paused")]
    NotPaused,
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl From<NameError> for SessionError {
    fn from(value: NameError) -> Self {
        SessionError::Validation(ValidationError::Name(value))
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ReadError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

#[derive(thiserror::Error, Debug)]
pub enum UpdateError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl From<ReadError> for UpdateError {
    fn from(value: ReadError) -> Self {
        match value {
            ReadError::Storage(storage) => UpdateError::Storage(storage),
            ReadError::Other(other) => UpdateError::Other(other),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("storage unavailable")]
    Unavailable,
    #[error("corrupt entry for key {0}")]
    Corrupt(String),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_error_from_read_error() {
        assert!(matches!(
            UpdateError::from(ReadError::Storage(StorageError::Unavailable)),
            UpdateError::Storage(StorageError::Unavailable)
        ));
        assert!(matches!(
            UpdateError::from(ReadError::Other("foo".into())),
            UpdateError::Other(error) if error.to_string() == "foo"
        ));
    }

    #[test]
    fn test_session_error_from_name_error() {
        assert_eq!(
            SessionError::from(NameError::Empty),
            SessionError::Validation(ValidationError::Name(NameError::Empty))
        );
    }

    #[test]
    fn test_wrong_exercise_kind_message() {
        assert_eq!(
            ValidationError::WrongExerciseKind {
                exercise: "Plank".to_string(),
                kind: ExerciseKind::Hold
            }
            .to_string(),
            "Plank is tracked as hold"
        );
    }
}
