//! Emerald theme: dark slate with emerald and amber accents

use ratatui::style::Color;

use super::Theme;

pub const EMERALD: Theme = Theme {
    name: String::new(),

    bg_primary: Color::Rgb(15, 23, 42),   // slate-900
    bg_secondary: Color::Rgb(30, 41, 59), // slate-800
    bg_tertiary: Color::Rgb(51, 65, 85),  // slate-700

    fg_primary: Color::Rgb(226, 232, 240),   // slate-200
    fg_secondary: Color::Rgb(248, 250, 252), // slate-50
    fg_muted: Color::Rgb(100, 116, 139),     // slate-500

    accent_primary: Color::Rgb(16, 185, 129),   // emerald-500
    accent_secondary: Color::Rgb(245, 158, 11), // amber-500

    success: Color::Rgb(52, 211, 153), // emerald-400
    warning: Color::Rgb(251, 191, 36), // amber-400
    error: Color::Rgb(248, 113, 113),  // red-400

    border: Color::Rgb(51, 65, 85),           // slate-700
    border_focused: Color::Rgb(16, 185, 129), // emerald-500
    selection: Color::Rgb(6, 78, 59),         // emerald-900
    user_bubble: Color::Rgb(4, 120, 87),      // emerald-700
};

impl Theme {
    pub fn emerald() -> Self {
        Theme { name: "Emerald".to_string(), ..EMERALD }
    }
}
