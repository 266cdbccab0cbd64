//! The built-in default configuration.
//!
//! Colors follow the common terminal palettes of dark, light and
//! high-contrast editor themes. `default` gets no rule so it inherits the
//! surface colors; `inverted` maps to the surface background (as a
//! foreground) and the surface text color (as a background).

use crate::style::{Attribute, NamedColor, StyleKey, StyleProperties, ThemeOverrideSet, ThemedProperties};
use crate::theme::ThemeKind;

use super::source::RenderConfig;

/// `(color, [dark, light, high-contrast])`.
const PALETTE: [(NamedColor, [&str; 3]); 16] = [
    (NamedColor::Black, ["#000000", "#000000", "#000000"]),
    (NamedColor::Red, ["#cd3131", "#cd3131", "#cd0000"]),
    (NamedColor::Green, ["#0dbc79", "#00bc00", "#00cd00"]),
    (NamedColor::Yellow, ["#e5e510", "#949800", "#cdcd00"]),
    (NamedColor::Blue, ["#2472c8", "#0451a5", "#0000ee"]),
    (NamedColor::Magenta, ["#bc3fbc", "#bc05bc", "#cd00cd"]),
    (NamedColor::Cyan, ["#11a8cd", "#0598bc", "#00cdcd"]),
    (NamedColor::LightGray, ["#e5e5e5", "#555555", "#e5e5e5"]),
    (NamedColor::DarkGray, ["#666666", "#666666", "#7f7f7f"]),
    (NamedColor::LightRed, ["#f14c4c", "#cd3131", "#ff0000"]),
    (NamedColor::LightGreen, ["#23d18b", "#14ce14", "#00ff00"]),
    (NamedColor::LightYellow, ["#f5f543", "#b5ba00", "#ffff00"]),
    (NamedColor::LightBlue, ["#3b8eea", "#0451a5", "#5c5cff"]),
    (NamedColor::LightMagenta, ["#d670d6", "#bc05bc", "#ff00ff"]),
    (NamedColor::LightCyan, ["#29b8db", "#0598bc", "#00ffff"]),
    (NamedColor::White, ["#e5e5e5", "#a5a5a5", "#ffffff"]),
];

/// Surface `[background, text]` per theme, in [`ThemeKind::ALL`] order.
const SURFACE: [[&str; 2]; 3] = [
    ["#1e1e1e", "#cccccc"],
    ["#ffffff", "#333333"],
    ["#000000", "#ffffff"],
];

impl RenderConfig {
    /// The built-in configuration used when no file is given.
    pub fn default_palette() -> Self {
        let mut config = RenderConfig::new()
            .with_font(
                StyleProperties::new()
                    .with("font-family", "Menlo, Consolas, 'DejaVu Sans Mono', monospace")
                    .with("font-size", "13px")
                    .with("line-height", "1.4"),
            )
            .with_custom_css(surface_css());

        let inverted_fg = per_theme("color", |i| SURFACE[i][0]);
        let inverted_bg = per_theme("background-color", |i| SURFACE[i][1]);
        config = config
            .with_style(StyleKey::ForegroundColor(NamedColor::Inverted).to_string(), inverted_fg)
            .with_style(StyleKey::BackgroundColor(NamedColor::Inverted).to_string(), inverted_bg);

        for (color, values) in PALETTE {
            config = config
                .with_style(
                    StyleKey::ForegroundColor(color).to_string(),
                    per_theme("color", |i| values[i]),
                )
                .with_style(
                    StyleKey::BackgroundColor(color).to_string(),
                    per_theme("background-color", |i| values[i]),
                );
        }

        let attribute_rules = [
            (Attribute::Bold, StyleProperties::new().with("font-weight", "bold")),
            (Attribute::Dim, StyleProperties::new().with("opacity", "0.6")),
            (
                Attribute::Underlined,
                StyleProperties::new().with("text-decoration", "underline"),
            ),
            (
                Attribute::Blink,
                StyleProperties::new().with("animation", "ansiview-blink 1s steps(1) infinite"),
            ),
            (Attribute::Hidden, StyleProperties::new().with("opacity", "0")),
        ];
        for (attribute, props) in attribute_rules {
            config = config.with_style(
                StyleKey::Attribute(attribute).to_string(),
                ThemeOverrideSet::Universal(props),
            );
        }

        config
    }
}

fn per_theme(property: &str, value: impl Fn(usize) -> &'static str) -> ThemeOverrideSet {
    let themed = ThemeKind::ALL
        .into_iter()
        .enumerate()
        .fold(ThemedProperties::default(), |themed, (i, theme)| {
            themed.with(theme, StyleProperties::new().with(property, value(i)))
        });
    ThemeOverrideSet::Themed(themed)
}

fn surface_css() -> StyleProperties {
    let mut css = StyleProperties::new().with(
        "body",
        StyleProperties::new()
            .with("margin", "0")
            .with("padding", "8px 12px"),
    );
    for (i, theme) in ThemeKind::ALL.into_iter().enumerate() {
        css.insert(
            format!("body.{}", theme.class_name()),
            StyleProperties::new()
                .with("background-color", SURFACE[i][0])
                .with("color", SURFACE[i][1]),
        );
    }
    css.insert(
        "@keyframes ansiview-blink",
        StyleProperties::new().with("50%", StyleProperties::new().with("opacity", "0")),
    );
    css
}
