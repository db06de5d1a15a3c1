//! SVG sparkline paths for the dashboard activity chart.

use serde::Serialize;

const WIDTH: f64 = 400.0;
const HEIGHT: f64 = 200.0;
const PADDING: f64 = 10.0;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPaths {
    pub line: String,
    pub fill: String,
}

/// Line and closed fill paths over a 400x200 viewbox.
///
/// Empty input yields empty paths. A single value sits at x = 0.
pub fn build_chart_paths(values: &[usize]) -> ChartPaths {
    if values.is_empty() {
        return ChartPaths::default();
    }

    let max = values.iter().copied().max().unwrap_or(0).max(1) as f64;
    let usable = HEIGHT - 2.0 * PADDING;
    let step = if values.len() > 1 {
        WIDTH / (values.len() - 1) as f64
    } else {
        0.0
    };

    let line = values
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let x = i as f64 * step;
            let y = PADDING + usable * (1.0 - v as f64 / max);
            let cmd = if i == 0 { 'M' } else { 'L' };
            format!("{}{:.0},{:.0}", cmd, x, y)
        })
        .collect::<Vec<_>>()
        .join(" ");

    let fill = format!("{} L{:.0},{:.0} L0,{:.0} Z", line, WIDTH, HEIGHT, HEIGHT);

    ChartPaths { line, fill }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_points() {
        let paths = build_chart_paths(&[0, 5, 10]);
        assert_eq!(paths.line, "M0,190 L200,100 L400,10");
        assert_eq!(paths.fill, "M0,190 L200,100 L400,10 L400,200 L0,200 Z");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(build_chart_paths(&[]), ChartPaths::default());
    }

    #[test]
    fn test_all_zero_uses_unit_max() {
        let paths = build_chart_paths(&[0, 0]);
        assert_eq!(paths.line, "M0,190 L400,190");
    }

    #[test]
    fn test_single_value() {
        let paths = build_chart_paths(&[3]);
        assert_eq!(paths.line, "M0,10");
        assert_eq!(paths.fill, "M0,10 L400,200 L0,200 Z");
    }
}
