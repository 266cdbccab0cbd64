//! Select Graphic Rendition state tracking.

use ansiview_render::{Attribute, NamedColor, SegmentContext};

/// Returns the parameter list of an SGR sequence (`ESC [ params m`), or
/// `None` for any other sequence.
pub(crate) fn sgr_params(sequence: &str) -> Option<&str> {
    let params = sequence.strip_prefix("\x1b[")?.strip_suffix('m')?;
    params
        .bytes()
        .all(|b| b.is_ascii_digit() || b == b';' || b == b':')
        .then_some(params)
}

/// Applies the codes of one SGR parameter list to `style`.
///
/// Parameters are separated by `;`. An empty parameter (and so an empty
/// list) is a reset. A parameter that is not a number fitting the code
/// range is skipped. A parameter containing `:` is one code with its
/// sub-parameters and never spills into the codes after it.
pub(crate) fn apply(style: &mut SegmentContext, params: &str) {
    let params: Vec<&str> = params.split(';').collect();

    let mut i = 0;
    while i < params.len() {
        let param = params[i];
        i += 1;

        if param.contains(':') {
            apply_group(style, param);
            continue;
        }
        let Some(code) = parse_code(param) else {
            tracing::debug!(param, "ignoring unparsable SGR parameter");
            continue;
        };

        if let layer @ (38 | 48) = code {
            let args: Vec<Option<u16>> = params[i..].iter().map(|p| parse_code(p)).collect();
            let (color, consumed) = extended_color(&args);
            set_layer(style, layer, color);
            i += consumed;
        } else {
            apply_code(style, code);
        }
    }
}

/// `38:5:n`, `48:2:cs:r:g:b`, `4:0` and similar colon forms.
fn apply_group(style: &mut SegmentContext, group: &str) {
    let subs: Vec<Option<u16>> = group.split(':').map(|p| p.parse().ok()).collect();
    match subs.as_slice() {
        [Some(layer @ (38 | 48)), Some(5), index, ..] => {
            let color = index.and_then(palette_color);
            set_layer(style, *layer, color);
        }
        [Some(38 | 48), ..] => {
            tracing::debug!(group, "ignoring extended color outside the named palette");
        }
        [Some(4), Some(0), ..] => style.attributes.set(Attribute::Underlined, false),
        [Some(code), ..] => apply_code(style, *code),
        _ => tracing::debug!(group, "ignoring unparsable SGR parameter"),
    }
}

fn apply_code(style: &mut SegmentContext, code: u16) {
    match code {
        0 => *style = SegmentContext::text(),
        1 => style.attributes.set(Attribute::Bold, true),
        2 => style.attributes.set(Attribute::Dim, true),
        4 => style.attributes.set(Attribute::Underlined, true),
        5 | 6 => style.attributes.set(Attribute::Blink, true),
        7 => style.attributes.set(Attribute::Inverted, true),
        8 => style.attributes.set(Attribute::Hidden, true),
        21 | 22 => {
            style.attributes.set(Attribute::Bold, false);
            style.attributes.set(Attribute::Dim, false);
        }
        24 => style.attributes.set(Attribute::Underlined, false),
        25 => style.attributes.set(Attribute::Blink, false),
        27 => style.attributes.set(Attribute::Inverted, false),
        28 => style.attributes.set(Attribute::Hidden, false),
        30..=37 => style.foreground = palette(code - 30),
        90..=97 => style.foreground = palette(code - 90 + 8),
        39 => style.foreground = NamedColor::Default,
        40..=47 => style.background = palette(code - 40),
        100..=107 => style.background = palette(code - 100 + 8),
        49 => style.background = NamedColor::Default,
        _ => {}
    }
}

/// Empty parameters mean `0`.
fn parse_code(param: &str) -> Option<u16> {
    if param.is_empty() {
        Some(0)
    } else {
        param.parse().ok()
    }
}

fn set_layer(style: &mut SegmentContext, layer: u16, color: Option<NamedColor>) {
    let Some(color) = color else {
        return;
    };
    if layer == 38 {
        style.foreground = color;
    } else {
        style.background = color;
    }
}

fn palette(index: u16) -> NamedColor {
    NamedColor::from_palette_index(index).unwrap_or(NamedColor::Default)
}

fn palette_color(index: u16) -> Option<NamedColor> {
    let color = NamedColor::from_palette_index(index);
    if color.is_none() {
        tracing::debug!(index, "ignoring 256-color index outside the named palette");
    }
    color
}

/// Reads the `;`-separated arguments of a `38`/`48` code.
///
/// Returns the color, if it has a named equivalent, and how many
/// parameters were consumed.
fn extended_color(args: &[Option<u16>]) -> (Option<NamedColor>, usize) {
    match args {
        [Some(5), index, ..] => (index.and_then(palette_color), 2),
        [Some(5)] => (None, 1),
        [Some(2), rest @ ..] => {
            tracing::debug!("ignoring truecolor SGR parameters");
            (None, 1 + rest.len().min(3))
        }
        [] => (None, 0),
        _ => (None, 1),
    }
}
