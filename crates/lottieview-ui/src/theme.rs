// crates/lottieview-ui/src/theme.rs
//
// Light / dark palettes and the egui style built from them. The active
// Palette is threaded through every panel call; nothing reads a global.

use egui::{Color32, Context, Stroke, Style, Visuals};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark  => ThemeMode::Light,
        }
    }

    /// Accepts "dark" / "light" in any case; anything else is None.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark"  => Some(ThemeMode::Dark),
            "light" => Some(ThemeMode::Light),
            _       => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ThemeMode::Light => "☀ Light Theme",
            ThemeMode::Dark  => "🌙 Dark Theme",
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            ThemeMode::Light => Palette::LIGHT,
            ThemeMode::Dark  => Palette::DARK,
        }
    }
}

// ── Palette ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub background:     Color32,
    pub surface:        Color32,
    pub text:           Color32,
    pub text_secondary: Color32,
    pub border:         Color32,
    pub primary:        Color32,
    pub primary_dark:   Color32,
    pub error:          Color32,
    pub placeholder:    Color32,
}

impl Palette {
    pub const LIGHT: Palette = Palette {
        background:     Color32::from_rgb(0xff, 0xff, 0xff),
        surface:        Color32::from_rgb(0xfa, 0xfa, 0xfa),
        text:           Color32::from_rgb(0x1a, 0x1a, 0x1a),
        text_secondary: Color32::from_rgb(0x49, 0x45, 0x4f),
        border:         Color32::from_rgb(0xe0, 0xe0, 0xe0),
        primary:        Color32::from_rgb(0x67, 0x50, 0xa4),
        primary_dark:   Color32::from_rgb(0x7d, 0x52, 0x60),
        error:          Color32::from_rgb(0xd3, 0x2f, 0x2f),
        placeholder:    Color32::from_rgb(0xf5, 0xf5, 0xf5),
    };

    pub const DARK: Palette = Palette {
        background:     Color32::from_rgb(0x1e, 0x1e, 0x1e),
        surface:        Color32::from_rgb(0x1e, 0x1e, 0x1e),
        text:           Color32::from_rgb(0xff, 0xff, 0xff),
        text_secondary: Color32::from_rgb(0xb0, 0xb0, 0xb0),
        border:         Color32::from_rgb(0x40, 0x40, 0x40),
        primary:        Color32::from_rgb(0x9d, 0x7d, 0xd8),
        primary_dark:   Color32::from_rgb(0xb8, 0x94, 0xc4),
        error:          Color32::from_rgb(0xef, 0x53, 0x50),
        placeholder:    Color32::from_rgb(0x2a, 0x2a, 0x2a),
    };
}

/// Apply spacing and visuals for `mode`. Called at startup and on every
/// theme toggle.
pub fn configure_style(ctx: &Context, mode: ThemeMode) {
    let p = mode.palette();
    let mut style = Style::default();

    style.spacing.item_spacing     = egui::vec2(8.0, 8.0);
    style.spacing.window_margin    = egui::Margin::same(12);
    style.spacing.button_padding   = egui::vec2(14.0, 7.0);
    style.spacing.scroll.bar_width = 8.0;

    let cr = egui::CornerRadius::same(6);

    let mut v = match mode {
        ThemeMode::Light => Visuals::light(),
        ThemeMode::Dark  => Visuals::dark(),
    };
    v.panel_fill       = p.background;
    v.window_fill      = p.surface;
    v.faint_bg_color   = p.surface;
    v.extreme_bg_color = p.placeholder;
    v.window_stroke    = Stroke::new(1.0, p.border);

    v.selection.bg_fill = p.primary;
    v.selection.stroke  = Stroke::new(1.0, Color32::WHITE);
    v.hyperlink_color   = p.primary;

    v.widgets.noninteractive.bg_fill       = p.surface;
    v.widgets.noninteractive.bg_stroke     = Stroke::new(1.0, p.border);
    v.widgets.noninteractive.fg_stroke     = Stroke::new(1.0, p.text_secondary);
    v.widgets.noninteractive.corner_radius = cr;

    v.widgets.inactive.bg_fill             = p.placeholder;
    v.widgets.inactive.bg_stroke           = Stroke::new(1.0, p.border);
    v.widgets.inactive.fg_stroke           = Stroke::new(1.0, p.text);
    v.widgets.inactive.corner_radius       = cr;

    v.widgets.hovered.bg_fill              = p.placeholder;
    v.widgets.hovered.bg_stroke            = Stroke::new(1.0, p.primary);
    v.widgets.hovered.fg_stroke            = Stroke::new(1.5, p.primary);
    v.widgets.hovered.corner_radius        = cr;

    v.widgets.active.bg_fill               = p.primary_dark;
    v.widgets.active.bg_stroke             = Stroke::new(1.0, p.primary);
    v.widgets.active.fg_stroke             = Stroke::new(2.0, Color32::WHITE);
    v.widgets.active.corner_radius         = cr;

    v.override_text_color = Some(p.text);

    ctx.set_visuals(v);
    ctx.set_style(style);

    // Pin the preference so an OS light/dark switch doesn't override ours.
    ctx.options_mut(|o| {
        o.theme_preference = match mode {
            ThemeMode::Light => egui::ThemePreference::Light,
            ThemeMode::Dark  => egui::ThemePreference::Dark,
        };
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_toggle() {
        assert_eq!(ThemeMode::parse(" Dark "), Some(ThemeMode::Dark));
        assert_eq!(ThemeMode::parse("light"), Some(ThemeMode::Light));
        assert_eq!(ThemeMode::parse("sepia"), None);
        assert_eq!(ThemeMode::Light.toggled(), ThemeMode::Dark);
        assert_eq!(ThemeMode::default(), ThemeMode::Light);
    }

    #[test]
    fn palettes_differ_where_it_matters() {
        assert_ne!(Palette::LIGHT.background, Palette::DARK.background);
        assert_ne!(Palette::LIGHT.text, Palette::DARK.text);
        assert_eq!(ThemeMode::Dark.palette(), Palette::DARK);
    }
}
