use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty {
        field: &'static str,
    },
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
    NotNumeric {
        field: &'static str,
        input: String,
    },
    OutOfRange {
        field: &'static str,
        min: u64,
        actual: u64,
    },
    InvalidPhoneNumber {
        input: String,
    },
    InvalidScheduleTime {
        input: String,
    },
    MissingEnv {
        var: &'static str,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::TooLong { field, max, actual } => {
                write!(f, "{field} is too long: {actual} characters (max {max})")
            }
            Self::NotNumeric { field, input } => {
                write!(f, "{field} must contain only digits: {input}")
            }
            Self::OutOfRange { field, min, actual } => {
                write!(f, "{field} out of range: {actual} (expected at least {min})")
            }
            Self::InvalidPhoneNumber { input } => write!(f, "invalid phone number: {input}"),
            Self::InvalidScheduleTime { input } => {
                write!(f, "invalid schedule time: {input} (expected yyyy-mm-dd hh:mm)")
            }
            Self::MissingEnv { var } => write!(f, "{var} environment variable is not set"),
        }
    }
}

impl std::error::Error for ValidationError {}
