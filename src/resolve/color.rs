//! Color channel formatting

use crate::config::ColorOptions;
use crate::document::Color;

/// Alpha channel component name
const ALPHA: &str = "a";

/// Scale and truncate one channel toward zero
fn format_channel(value: f64, multiplier: f64) -> String {
    let scaled = (value * multiplier).trunc();
    // -0.0 prints as "-0"
    if scaled == 0.0 {
        "0".to_string()
    } else {
        format!("{}", scaled)
    }
}

/// Placeholder entries for a color under one mode: `{mode}-R`, `{mode}-G`, ...
pub fn color_placeholders(mode: &str, color: &Color, options: &ColorOptions) -> Vec<(String, String)> {
    color
        .components()
        .into_iter()
        .map(|(component, value)| {
            let multiplier = if component == ALPHA {
                options.alpha_multiplier
            } else {
                options.channel_multiplier
            };
            (
                format!("{}-{}", mode, component.to_uppercase()),
                format_channel(value, multiplier),
            )
        })
        .collect()
}
