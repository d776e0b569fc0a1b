//! Container themes
//!
//! A theme is immutable configuration. Swapping it restyles the bar and the
//! container background; it never touches tab data.

use serde::{Deserialize, Serialize};

use crate::error::ThemeError;
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    #[serde(default = "opaque")]
    pub a: f32,
}

fn opaque() -> f32 {
    1.0
}

impl Rgba {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn gray(white: f32) -> Self {
        Self::new(white, white, white, 1.0)
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    fn validate(&self, field: &'static str) -> Result<()> {
        for value in [self.r, self.g, self.b, self.a] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ThemeError::ComponentOutOfRange { field, value });
            }
        }
        Ok(())
    }
}

/// Material behind the bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlurStyle {
    ExtraLight,
    Light,
    Dark,
    Regular,
    Prominent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusBarStyle {
    Default,
    LightContent,
    DarkContent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub background_color: Rgba,
    pub bar_tint_color: Rgba,
    pub bar_title_color: Rgba,
    pub bar_blur_style: BlurStyle,
    pub separator_color: Rgba,
    pub tab_close_button_color: Rgba,
    pub tab_background_deselected_color: Rgba,
    pub tab_text_color: Rgba,
    pub tab_selection_color: Rgba,
    pub status_bar_style: StatusBarStyle,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            background_color: Rgba::gray(1.0),
            bar_tint_color: Rgba::gray(0.97),
            bar_title_color: Rgba::gray(0.0),
            bar_blur_style: BlurStyle::Light,
            separator_color: Rgba::gray(0.7),
            tab_close_button_color: Rgba::gray(0.25),
            tab_background_deselected_color: Rgba::gray(0.85),
            tab_text_color: Rgba::gray(0.0),
            tab_selection_color: Rgba::gray(0.97),
            status_bar_style: StatusBarStyle::Default,
        }
    }

    pub fn dark() -> Self {
        Self {
            background_color: Rgba::gray(0.1),
            bar_tint_color: Rgba::gray(0.15),
            bar_title_color: Rgba::gray(1.0),
            bar_blur_style: BlurStyle::Dark,
            separator_color: Rgba::gray(0.3),
            tab_close_button_color: Rgba::gray(0.8),
            tab_background_deselected_color: Rgba::gray(0.08),
            tab_text_color: Rgba::gray(1.0),
            tab_selection_color: Rgba::gray(0.15),
            status_bar_style: StatusBarStyle::LightContent,
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let theme: Theme = serde_json::from_str(json)?;
        theme.validate()?;
        Ok(theme)
    }

    /// Check every colour component is within `0.0..=1.0`
    pub fn validate(&self) -> Result<()> {
        self.background_color.validate("background_color")?;
        self.bar_tint_color.validate("bar_tint_color")?;
        self.bar_title_color.validate("bar_title_color")?;
        self.separator_color.validate("separator_color")?;
        self.tab_close_button_color
            .validate("tab_close_button_color")?;
        self.tab_background_deselected_color
            .validate("tab_background_deselected_color")?;
        self.tab_text_color.validate("tab_text_color")?;
        self.tab_selection_color.validate("tab_selection_color")?;
        Ok(())
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}
