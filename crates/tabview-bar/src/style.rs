//! Visual style the renderer applies, derived from a [`Theme`]

use crate::theme::{BlurStyle, Rgba, Theme};

/// Bar background is the theme tint at this opacity, over the blur.
const BAR_TINT_ALPHA: f32 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectorStyle {
    pub close_button_color: Rgba,
    pub deselected_background_color: Rgba,
    pub selected_background_color: Rgba,
    pub text_color: Rgba,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarStyle {
    pub background_color: Rgba,
    pub blur_style: BlurStyle,
    pub title_color: Rgba,
    pub separator_color: Rgba,
    pub selector: SelectorStyle,
}

impl From<&Theme> for BarStyle {
    fn from(theme: &Theme) -> Self {
        Self {
            background_color: theme.bar_tint_color.with_alpha(BAR_TINT_ALPHA),
            blur_style: theme.bar_blur_style,
            title_color: theme.bar_title_color,
            separator_color: theme.separator_color,
            selector: SelectorStyle {
                close_button_color: theme.tab_close_button_color,
                deselected_background_color: theme.tab_background_deselected_color,
                selected_background_color: theme.tab_selection_color,
                text_color: theme.tab_text_color,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tint_is_translucent() {
        let theme = Theme::dark();
        let style = BarStyle::from(&theme);

        assert_eq!(style.background_color, theme.bar_tint_color.with_alpha(0.7));
        assert_eq!(style.blur_style, BlurStyle::Dark);
        assert_eq!(style.selector.text_color, theme.tab_text_color);
    }
}
