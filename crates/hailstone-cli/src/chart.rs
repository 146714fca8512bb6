//! ASCII line charts for sequence output
//!
//! Renders a sequence as a fixed-size character grid: one marker per column,
//! values scaled to rows, with min/max labels on the y axis. Sequences longer
//! than the chart width are downsampled by taking the maximum of each bucket,
//! so peaks stay visible.

use hailstone::Sequence;

/// Glyph set used for chart rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartStyle {
    /// Pure ASCII: * | - +
    Ascii,
    /// Unicode markers and box-drawing axes
    #[default]
    Unicode,
}

impl ChartStyle {
    fn marker(&self) -> char {
        match self {
            ChartStyle::Ascii => '*',
            ChartStyle::Unicode => '●',
        }
    }

    fn y_axis(&self) -> char {
        match self {
            ChartStyle::Ascii => '|',
            ChartStyle::Unicode => '│',
        }
    }

    fn x_axis(&self) -> char {
        match self {
            ChartStyle::Ascii => '-',
            ChartStyle::Unicode => '─',
        }
    }

    fn corner(&self) -> char {
        match self {
            ChartStyle::Ascii => '+',
            ChartStyle::Unicode => '└',
        }
    }
}

/// Value scaling applied before plotting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartScale {
    /// Plot raw values
    #[default]
    Linear,
    /// Plot log10 of the absolute value; zero plots as zero
    Log10,
}

impl ChartScale {
    fn apply(&self, value: i64) -> f64 {
        match self {
            ChartScale::Linear => value as f64,
            ChartScale::Log10 => {
                if value == 0 {
                    0.0
                } else {
                    (value.unsigned_abs() as f64).log10()
                }
            }
        }
    }
}

/// Chart dimensions and style
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartConfig {
    pub width: usize,
    pub height: usize,
    pub style: ChartStyle,
    pub scale: ChartScale,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 64,
            height: 16,
            style: ChartStyle::default(),
            scale: ChartScale::default(),
        }
    }
}

/// Render a sequence as a character-grid line chart
pub fn render_chart(sequence: &Sequence, config: &ChartConfig) -> String {
    render_values(sequence.values(), config)
}

fn render_values(values: &[i64], config: &ChartConfig) -> String {
    if values.is_empty() || config.width == 0 || config.height == 0 {
        return String::new();
    }

    let points = downsample(values, config.width, config.scale);
    let columns = points.len();

    let min = points.iter().copied().fold(f64::INFINITY, f64::min);
    let max = points.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = max - min;

    // Row index per column, 0 = bottom row
    let rows: Vec<usize> = points
        .iter()
        .map(|p| {
            if span == 0.0 {
                0
            } else {
                (((p - min) / span) * (config.height - 1) as f64).round() as usize
            }
        })
        .collect();

    let top_label = format_axis_value(max, config.scale);
    let bottom_label = format_axis_value(min, config.scale);
    let gutter = top_label.len().max(bottom_label.len());

    let mut out = String::new();
    for row in (0..config.height).rev() {
        let label = if row == config.height - 1 {
            top_label.as_str()
        } else if row == 0 {
            bottom_label.as_str()
        } else {
            ""
        };
        out.push_str(&format!("{:>width$} ", label, width = gutter));
        out.push(config.style.y_axis());
        for &point_row in &rows {
            if point_row == row {
                out.push(config.style.marker());
            } else {
                out.push(' ');
            }
        }
        out.push('\n');
    }

    // X axis with the step count at the right edge
    out.push_str(&format!("{:>width$} ", "", width = gutter));
    out.push(config.style.corner());
    for _ in 0..columns {
        out.push(config.style.x_axis());
    }
    out.push('\n');
    out.push_str(&format!(
        "{:>width$} 0{:>steps$}\n",
        "",
        values.len() - 1,
        width = gutter,
        steps = columns.saturating_sub(1).max(1)
    ));

    out
}

/// Reduce values to at most `width` plot points, keeping bucket maxima
fn downsample(values: &[i64], width: usize, scale: ChartScale) -> Vec<f64> {
    if values.len() <= width {
        return values.iter().map(|v| scale.apply(*v)).collect();
    }

    (0..width)
        .map(|bucket| {
            let lo = bucket * values.len() / width;
            let hi = ((bucket + 1) * values.len() / width).max(lo + 1);
            values[lo..hi]
                .iter()
                .map(|v| scale.apply(*v))
                .fold(f64::NEG_INFINITY, f64::max)
        })
        .collect()
}

fn format_axis_value(value: f64, scale: ChartScale) -> String {
    match scale {
        ChartScale::Linear => format!("{}", value as i64),
        ChartScale::Log10 => format!("{:.2}", value),
    }
}
