//! Typography extraction from a style-guide frame
//!
//! A style-guide frame is laid out as
//!
//! ```text
//! <selected frame>
//! └── "All Styles" (frame)
//!     ├── header (skipped)
//!     └── <text style> (frame)
//!         └── <breakpoint> (frame, "Desktop" in its name for desktop)
//!             ├── [0] frame: [0] text = font name
//!             └── [1] frame: [0] size, [1] line height, [2] letter spacing
//! ```
//!
//! and is turned into Sass mixins with a `desktopAndUp` override block.

use std::fmt::Write as _;

use crate::document::Node;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Breakpoint {
    Mobile,
    Desktop,
}

impl Breakpoint {
    fn from_node_name(name: &str) -> Self {
        if name.contains("Desktop") {
            Breakpoint::Desktop
        } else {
            Breakpoint::Mobile
        }
    }
}

/// One text style at one breakpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontData {
    pub font_name: String,
    pub font_size: String,
    pub line_height: String,
    pub letter_spacing: String,
    pub breakpoint: Breakpoint,
}

/// A text style with desktop overrides where they differ from mobile
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontMixin {
    pub font_name: String,
    pub font_size: String,
    pub line_height: String,
    pub letter_spacing: String,
    pub desktop_font_size: Option<String>,
    pub desktop_line_height: Option<String>,
    pub desktop_letter_spacing: Option<String>,
}

impl FontMixin {
    fn has_desktop(&self) -> bool {
        self.desktop_font_size.is_some()
            || self.desktop_line_height.is_some()
            || self.desktop_letter_spacing.is_some()
    }
}

/// Collect font data from the style-guide frame under `parent`
pub fn extract(parent: &Node, styles_frame: &str) -> Vec<FontData> {
    let mut data = Vec::new();

    for styles in parent
        .children
        .iter()
        .filter(|c| c.is_frame() && c.name == styles_frame)
    {
        for style_node in styles.children.iter().skip(1).filter(|n| n.is_frame()) {
            for breakpoint_node in style_node.children.iter().filter(|n| n.is_frame()) {
                data.push(read_breakpoint(breakpoint_node));
            }
        }
    }

    data
}

fn read_breakpoint(node: &Node) -> FontData {
    let mut font = FontData {
        font_name: String::new(),
        font_size: String::new(),
        line_height: String::new(),
        letter_spacing: String::new(),
        breakpoint: Breakpoint::from_node_name(&node.name),
    };

    for (i, details) in node.children.iter().enumerate().take(2) {
        if !details.is_frame() {
            continue;
        }
        if i == 0 {
            if let Some(name) = details.children.first().and_then(Node::text) {
                font.font_name = name.split_whitespace().collect();
            }
            continue;
        }
        let text_at = |index: usize| {
            details
                .children
                .get(index)
                .and_then(Node::text)
                .unwrap_or_default()
                .to_string()
        };
        font.font_size = text_at(0);
        font.line_height = text_at(1);
        font.letter_spacing = text_at(2);
    }

    font
}

/// Pair mobile styles with their desktop counterpart (same font name).
///
/// Desktop values are recorded only when they differ from mobile and are not
/// empty. Desktop styles without a mobile counterpart are dropped.
pub fn to_mixins(data: &[FontData]) -> Vec<FontMixin> {
    let differing = |mobile: &str, desktop: &str| {
        (mobile != desktop && !desktop.is_empty()).then(|| desktop.to_string())
    };

    data.iter()
        .filter(|d| d.breakpoint == Breakpoint::Mobile)
        .map(|mobile| {
            let desktop = data
                .iter()
                .find(|d| d.breakpoint == Breakpoint::Desktop && d.font_name == mobile.font_name);

            let mut mixin = FontMixin {
                font_name: mobile.font_name.clone(),
                font_size: mobile.font_size.clone(),
                line_height: mobile.line_height.clone(),
                letter_spacing: mobile.letter_spacing.clone(),
                ..FontMixin::default()
            };
            if let Some(desktop) = desktop {
                mixin.desktop_font_size = differing(&mobile.font_size, &desktop.font_size);
                mixin.desktop_line_height = differing(&mobile.line_height, &desktop.line_height);
                mixin.desktop_letter_spacing =
                    differing(&mobile.letter_spacing, &desktop.letter_spacing);
            }
            mixin
        })
        .collect()
}

/// Render mixins as Sass, each preceded by a blank line
pub fn render_sass(mixins: &[FontMixin]) -> String {
    let mut out = String::new();
    for mixin in mixins {
        out.push_str("\n\n ");
        render_mixin(&mut out, mixin);
    }
    out
}

fn render_mixin(out: &mut String, mixin: &FontMixin) {
    let _ = write!(
        out,
        "@mixin text{} {{\n\t font-size: rem({});\n\t line-height: rem({});\n\t letter-spacing: rem({});",
        mixin.font_name, mixin.font_size, mixin.line_height, mixin.letter_spacing
    );

    if mixin.has_desktop() {
        out.push_str("\n\n\t @include desktopAndUp {");
        let overrides = [
            ("font-size", &mixin.desktop_font_size),
            ("line-height", &mixin.desktop_line_height),
            ("letter-spacing", &mixin.desktop_letter_spacing),
        ];
        for (property, value) in overrides {
            if let Some(value) = value {
                let _ = write!(out, "\n\t\t {}: rem({});", property, value);
            }
        }
        out.push_str("\n\t }");
    }

    out.push_str("\n }");
}
