// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("Clock reading is negative: {0} ms")]
    NegativeBase(i64),

    #[error("Random offset {offset} is outside [0, {max})")]
    OffsetOutOfRange { offset: u64, max: u64 },
}

pub type Result<T> = std::result::Result<T, DomainError>;
