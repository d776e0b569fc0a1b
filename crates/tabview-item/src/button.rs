//! Bar button descriptors

use serde::{Deserialize, Serialize};

/// A renderable action control shown in one of the bar's button groups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BarButton {
    /// Identifier the host uses to route taps
    pub id: String,
    /// Text or symbol name shown on the control
    pub label: String,
    /// Disabled buttons are still laid out, but ignore taps
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

fn enabled_by_default() -> bool {
    true
}

impl BarButton {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            enabled: true,
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}
