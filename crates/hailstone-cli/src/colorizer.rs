//! Terminal colorization for chart output
//!
//! Applies ANSI escape codes to chart elements using crossterm.

use crossterm::style::{Color, Stylize};

/// Colorize chart output using ANSI escape codes
///
/// Applies colors to the chart elements:
/// - Axis lines and corners: Cyan
/// - Sequence markers: Yellow
/// - Labels: Default (terminal color)
pub fn colorize_chart(input: &str) -> String {
    let mut result = String::with_capacity(input.len() * 2); // Extra space for ANSI codes

    for line in input.lines() {
        for c in line.chars() {
            let colored = match c {
                // Axis characters (Unicode and ASCII)
                '│' | '─' | '└' | '|' | '+' => {
                    format!("{}", c.to_string().with(Color::Cyan))
                }
                '-' => {
                    // Hyphens also appear in negative axis labels
                    if is_axis_line(line) {
                        format!("{}", c.to_string().with(Color::Cyan))
                    } else {
                        c.to_string()
                    }
                }
                // Sequence markers
                '●' | '*' => {
                    format!("{}", c.to_string().with(Color::Yellow))
                }
                _ => c.to_string(),
            };
            result.push_str(&colored);
        }
        result.push('\n');
    }

    // Remove trailing newline to match input format
    if !input.ends_with('\n') && result.ends_with('\n') {
        result.pop();
    }

    result
}

/// Check whether a line is the x axis rather than label text
fn is_axis_line(line: &str) -> bool {
    line.contains("---") || line.contains("+--") || line.contains("└")
}
