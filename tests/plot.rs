use std::fs;

use rfa::{render_svg, Analyzer, PlotConfig, PlotData, PlotError};

fn sample(function: &str, config: &PlotConfig) -> PlotData {
    let result = Analyzer::default().analyze(function).expect("analyze function");
    PlotData::sample(&result, None, config)
}

#[test]
fn curve_breaks_at_an_asymptote() {
    let data = sample("1/(x - 2)", &PlotConfig::default());
    assert!(data.segments.len() >= 2);
    for segment in &data.segments {
        let left = segment.iter().all(|&(x, _)| x < 2.0);
        let right = segment.iter().all(|&(x, _)| x > 2.0);
        assert!(left || right, "segment crosses the asymptote");
    }
    assert_eq!(data.asymptotes, vec![2.0]);
}

#[test]
fn points_outside_the_view_are_dropped() {
    let config = PlotConfig {
        y_limit: 5.0,
        ..PlotConfig::default()
    };
    let data = sample("x^2", &config);
    assert!(data
        .segments
        .iter()
        .flatten()
        .all(|&(_, y)| y.abs() <= 5.0));
    assert_eq!(data.segments.len(), 1);
}

#[test]
fn markers_follow_the_analysis() {
    let data = sample("(x^2 - 1)/(x - 1)", &PlotConfig::default());
    assert_eq!(data.holes, vec![(1.0, 2.0)]);
    assert_eq!(data.x_intercepts, vec![(-1.0, 0.0)]);
    assert_eq!(data.y_intercept, Some((0.0, 1.0)));
    assert_eq!(data.segments.len(), 1);
}

#[test]
fn writes_an_svg_file() {
    let config = PlotConfig {
        samples: 101,
        width: 320,
        height: 240,
        ..PlotConfig::default()
    };
    let data = sample("(x - 3)/((x - 3)*(x + 1))", &config);
    let path = std::env::temp_dir().join(format!("rfa-plot-{}.svg", std::process::id()));
    render_svg(&data, &path, &config).expect("render plot");
    let svg = fs::read_to_string(&path).expect("read plot back");
    assert!(svg.contains("<svg"));
    assert!(svg.contains("<circle"));
    let _ = fs::remove_file(&path);
}

#[test]
fn nothing_to_plot() {
    let config = PlotConfig::default();
    let data = sample("sqrt(x - 100)", &config);
    assert!(data.is_empty());
    let path = std::env::temp_dir().join("rfa-empty.svg");
    assert!(matches!(
        render_svg(&data, &path, &config),
        Err(PlotError::NoData)
    ));
}
