//! Sampling a function for display and rendering it as SVG.

use std::path::Path;

use plotters::prelude::*;
use tracing::debug;

use crate::analysis::AnalysisResult;
use crate::config::PlotConfig;
use crate::error::PlotError;
use crate::eval::eval_f64;

/// Curve segments and marked points, in plot coordinates.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlotData {
    pub segments: Vec<Vec<(f64, f64)>>,
    pub x_intercepts: Vec<(f64, f64)>,
    pub y_intercept: Option<(f64, f64)>,
    pub holes: Vec<(f64, f64)>,
    pub eval_point: Option<(f64, f64)>,
    pub asymptotes: Vec<f64>,
}

impl PlotData {
    /// Sample the reduced function on an even grid.
    ///
    /// The curve breaks at points where the function is undefined, where it
    /// leaves the vertical view, and across vertical asymptotes.
    pub fn sample(analysis: &AnalysisResult, eval_point: Option<(f64, f64)>, config: &PlotConfig) -> Self {
        let var = analysis.variable.as_str();
        let steps = config.samples.max(2) - 1;
        let width = config.x_max - config.x_min;

        let mut segments = Vec::new();
        let mut current: Vec<(f64, f64)> = Vec::new();
        let mut previous_x: Option<f64> = None;
        for i in 0..=steps {
            let x = config.x_min + width * i as f64 / steps as f64;
            let crosses_pole = previous_x.is_some_and(|px| {
                analysis.asymptotes.iter().any(|&a| px < a && a < x)
            });
            let y = eval_f64(&analysis.reduced, var, x)
                .ok()
                .filter(|y| y.abs() <= config.y_limit);

            if crosses_pole || y.is_none() {
                flush(&mut segments, &mut current);
            }
            if let Some(y) = y {
                current.push((x, y));
            }
            previous_x = Some(x);
        }
        flush(&mut segments, &mut current);
        debug!(segments = segments.len(), "sampled plot");

        PlotData {
            segments,
            x_intercepts: analysis.x_intercepts.clone(),
            y_intercept: analysis.y_intercept,
            holes: analysis.holes.clone(),
            eval_point,
            asymptotes: analysis.asymptotes.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

fn flush(segments: &mut Vec<Vec<(f64, f64)>>, current: &mut Vec<(f64, f64)>) {
    if !current.is_empty() {
        segments.push(std::mem::take(current));
    }
}

/// Write the plot to `path` as SVG: axes, curve, asymptotes and markers.
pub fn render_svg(data: &PlotData, path: impl AsRef<Path>, config: &PlotConfig) -> Result<(), PlotError> {
    if data.is_empty() {
        return Err(PlotError::NoData);
    }
    let render = |e: &dyn std::fmt::Display| PlotError::Render(e.to_string());

    let root = SVGBackend::new(path.as_ref(), (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| render(&e))?;

    let (x_min, x_max) = (config.x_min, config.x_max);
    let (y_min, y_max) = (-config.y_limit, config.y_limit);
    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(|e| render(&e))?;

    // Text is left out so rendering needs no font backend.
    chart
        .draw_series(LineSeries::new(
            [(x_min, 0.0), (x_max, 0.0)],
            BLACK.stroke_width(1),
        ))
        .map_err(|e| render(&e))?;
    if x_min <= 0.0 && 0.0 <= x_max {
        chart
            .draw_series(LineSeries::new(
                [(0.0, y_min), (0.0, y_max)],
                BLACK.stroke_width(1),
            ))
            .map_err(|e| render(&e))?;
    }

    for &a in data.asymptotes.iter().filter(|&&a| x_min <= a && a <= x_max) {
        chart
            .draw_series(LineSeries::new(
                [(a, y_min), (a, y_max)],
                RGBColor(160, 160, 160).stroke_width(1),
            ))
            .map_err(|e| render(&e))?;
    }

    for segment in &data.segments {
        chart
            .draw_series(LineSeries::new(segment.iter().copied(), BLUE.stroke_width(2)))
            .map_err(|e| render(&e))?;
    }

    let in_view = |&(x, y): &(f64, f64)| x_min <= x && x <= x_max && y_min <= y && y <= y_max;
    chart
        .draw_series(
            data.x_intercepts
                .iter()
                .copied()
                .filter(in_view)
                .map(|p| Circle::new(p, 5, RED.filled())),
        )
        .map_err(|e| render(&e))?;
    chart
        .draw_series(
            data.y_intercept
                .into_iter()
                .filter(in_view)
                .map(|p| Circle::new(p, 5, GREEN.filled())),
        )
        .map_err(|e| render(&e))?;
    chart
        .draw_series(
            data.holes
                .iter()
                .copied()
                .filter(in_view)
                .map(|p| Circle::new(p, 6, WHITE.filled())),
        )
        .map_err(|e| render(&e))?;
    chart
        .draw_series(
            data.holes
                .iter()
                .copied()
                .filter(in_view)
                .map(|p| Circle::new(p, 6, BLUE.stroke_width(2))),
        )
        .map_err(|e| render(&e))?;
    chart
        .draw_series(
            data.eval_point
                .into_iter()
                .filter(in_view)
                .map(|p| Circle::new(p, 7, MAGENTA.filled())),
        )
        .map_err(|e| render(&e))?;

    root.present().map_err(|e| render(&e))?;
    Ok(())
}
