//! Tab error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TabError {
    #[error("Tab index out of bounds: {index} (tab count {len})")]
    IndexOutOfBounds { index: usize, len: usize },
}
