//! TabView Tab Collection
//!
//! The ordered set of tabs a container shows and the one that is active.
//! The model enforces two invariants after every operation:
//! - the active tab is a member of the collection, and is `None` exactly
//!   when the collection is empty
//! - no tab appears twice

mod error;
mod event;
mod model;
mod tab;

pub use error::TabError;
pub use event::{StructureChange, TabModelDelegate};
pub use model::{TabCollectionModel, MAX_CASCADE};
pub use tab::{Tab, TabContent, TabId};

pub type Result<T> = std::result::Result<T, TabError>;
