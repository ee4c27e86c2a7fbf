use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HabitError {
    #[error("EMPTY_INPUT: {field} must not be blank")]
    EmptyInput { field: &'static str },
}
