//! Property-based tests for ansiview-render using proptest.

use std::collections::HashSet;
use std::sync::Arc;

use ansiview_render::config::{RenderConfig, RenderSnapshot};
use ansiview_render::{
    escape_terminal_text, Attribute, DocumentRenderer, KeyCompactor, NamedColor, Nonces, Segment,
    SegmentContext, SegmentRenderer, StyleKey, StyleProperties, StylesheetCompiler, TextDocument,
    ThemeKind, ThemeOverrideSet, ThemedProperties,
};
use proptest::prelude::*;

// ============================================================================
// Test helpers
// ============================================================================

fn unescape(html: &str) -> String {
    html.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

fn color_strategy() -> impl Strategy<Value = NamedColor> {
    prop::sample::select(NamedColor::ALL.to_vec())
}

fn context_strategy() -> impl Strategy<Value = SegmentContext> {
    (
        color_strategy(),
        color_strategy(),
        prop::collection::vec(prop::sample::select(Attribute::ALL.to_vec()), 0..4),
        any::<bool>(),
    )
        .prop_map(|(fg, bg, attributes, line_end)| {
            attributes.into_iter().fold(
                SegmentContext::text()
                    .foreground(fg)
                    .background(bg)
                    .line_end(line_end),
                |ctx, attribute| ctx.attribute(attribute),
            )
        })
}

fn props_strategy() -> impl Strategy<Value = Option<StyleProperties>> {
    prop::option::of("[a-z]{1,8}".prop_map(|v| StyleProperties::new().with("color", v)))
}

fn themed_strategy() -> impl Strategy<Value = ThemedProperties> {
    (props_strategy(), props_strategy(), props_strategy()).prop_map(|(dark, light, high_contrast)| {
        ThemedProperties {
            dark,
            light,
            high_contrast,
        }
    })
}

fn snapshot() -> Arc<RenderSnapshot> {
    Arc::new(RenderSnapshot::build(Arc::new(KeyCompactor::new()), &RenderConfig::new()).unwrap())
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// Unescaping the escaped text yields the input.
    #[test]
    fn escape_round_trips(text in any::<String>()) {
        prop_assert_eq!(unescape(&escape_terminal_text(&text)), text);
    }

    /// Rendered segments never carry document text that could open markup.
    #[test]
    fn rendered_text_is_inert(text in "[ -~]{0,40}", ctx in context_strategy()) {
        let compactor = KeyCompactor::new();
        let html = SegmentRenderer::new(&compactor).render(&text, &ctx).unwrap();

        let inner_start = html.find("\">").unwrap() + 2;
        let inner_start = inner_start + html[inner_start..].find("\">").unwrap() + 2;
        let inner_end = html.find("</span></span>").unwrap();
        let inner = &html[inner_start..inner_end];

        prop_assert!(!inner.contains('<'));
        prop_assert!(!inner.contains('>'));
        prop_assert!(!inner.contains(' '));
        prop_assert_eq!(unescape(inner), text);
    }

    /// A themed key always compiles to exactly one rule per theme.
    #[test]
    fn themed_keys_cover_every_theme(themed in themed_strategy()) {
        let compactor = KeyCompactor::new();
        let settings = vec![(
            "foreground-color-red".to_string(),
            ThemeOverrideSet::Themed(themed),
        )];
        let tree = StylesheetCompiler::new(&compactor).compile(&settings).unwrap();

        prop_assert_eq!(tree.len(), 3);
        for theme in ThemeKind::ALL {
            let selector = format!(".{} .h", theme.class_name());
            prop_assert!(tree.contains_key(&selector));
        }
    }

    /// A universal key compiles to a single unscoped rule.
    #[test]
    fn universal_keys_emit_one_rule(key in prop::sample::select(StyleKey::all().collect::<Vec<_>>())) {
        let compactor = KeyCompactor::new();
        let settings = vec![(
            key.to_string(),
            ThemeOverrideSet::Universal(StyleProperties::new().with("opacity", "1")),
        )];
        let tree = StylesheetCompiler::new(&compactor).compile(&settings).unwrap();

        prop_assert_eq!(tree.len(), 1);
        let selector = format!(".{}", compactor.compact(key));
        prop_assert!(tree.contains_key(&selector));
    }

    /// The sink receives the header, one chunk per line and the footer.
    #[test]
    fn streaming_emits_lines_plus_two(lines in prop::collection::vec("[a-z <&]{0,12}", 0..30)) {
        let text = lines.join("\n");
        let mut segments = Vec::new();
        let mut offset = 0;
        for line in &lines {
            segments.push(Segment::new(offset..offset + line.len(), SegmentContext::text().line_end(true)));
            offset += line.len() + 1;
        }

        let document = TextDocument::new("p.log", text);
        let mut chunks: Vec<String> = Vec::new();
        let nonces = Nonces::generate();
        let outcome = DocumentRenderer::new(snapshot())
            .render_with_nonces(&document, segments, &nonces, &mut chunks)
            .unwrap();

        prop_assert_eq!(outcome.segments(), lines.len());
        prop_assert_eq!(chunks.len(), lines.len() + 2);
    }
}

#[test]
fn compacted_tokens_are_unique() {
    let compactor = KeyCompactor::new();
    let tokens: HashSet<&str> = StyleKey::all().map(|key| compactor.compact(key)).collect();
    assert_eq!(tokens.len(), StyleKey::COUNT);
}
