// Chart rendering: metric bar charts and confusion-matrix heatmaps.
//
// Both figures are 2x2 grids drawn with plotters' SVG backend. SVG keeps
// text as text, so no font files or system font libraries are needed.

use std::error::Error;
use std::path::Path;

use plotters::coord::ranged1d::SegmentValue;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::error::ReportError;
use crate::pipeline::ModelResult;

const METRIC_FIGURE_SIZE: (u32, u32) = (1400, 1000);
const CONFUSION_FIGURE_SIZE: (u32, u32) = (1600, 1200);
const BAR_COLOR: RGBColor = RGBColor(76, 114, 176);
// Endpoints of the light-to-dark blue heatmap scale
const HEAT_LOW: (f64, f64, f64) = (247.0, 251.0, 255.0);
const HEAT_HIGH: (f64, f64, f64) = (8.0, 48.0, 107.0);

type MetricFn = fn(&ModelResult) -> f64;

/// Four bar charts (precision, recall, F1, accuracy) comparing every model.
/// The y-axis is fixed to [0, 1].
pub fn render_metric_comparison(path: &Path, results: &[ModelResult]) -> Result<(), ReportError> {
    draw_metric_comparison(path, results).map_err(|e| ReportError::Render {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// One annotated confusion-matrix heatmap per model.
pub fn render_confusion_matrices(path: &Path, results: &[ModelResult]) -> Result<(), ReportError> {
    draw_confusion_matrices(path, results).map_err(|e| ReportError::Render {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn draw_metric_comparison(path: &Path, results: &[ModelResult]) -> Result<(), Box<dyn Error>> {
    let root = SVGBackend::new(path, METRIC_FIGURE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let metrics: [(&str, MetricFn); 4] = [
        ("Precision", |r: &ModelResult| r.precision),
        ("Recall", |r: &ModelResult| r.recall),
        ("F1 Score", |r: &ModelResult| r.f1),
        ("Accuracy", |r: &ModelResult| r.accuracy),
    ];
    let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
    let last = segment_end(results.len());

    for (panel, (metric, value)) in root.split_evenly((2, 2)).iter().zip(metrics) {
        let mut chart = ChartBuilder::on(panel)
            .caption(format!("{metric} Comparison"), ("sans-serif", 22))
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(55)
            .build_cartesian_2d((0u32..last).into_segmented(), 0.0f64..1.0)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(names.len() + 1)
            .x_label_formatter(&|v| segment_name(v, &names))
            .x_label_style(("sans-serif", 13))
            .y_desc(metric)
            .draw()?;

        chart.draw_series(
            Histogram::vertical(&chart)
                .style(BAR_COLOR.filled())
                .margin(25)
                .data(results.iter().enumerate().map(|(i, r)| (i as u32, value(r)))),
        )?;
    }

    root.present()?;
    Ok(())
}

fn draw_confusion_matrices(path: &Path, results: &[ModelResult]) -> Result<(), Box<dyn Error>> {
    let root = SVGBackend::new(path, CONFUSION_FIGURE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    for (panel, result) in root.split_evenly((2, 2)).iter().zip(results) {
        let cm = &result.confusion;
        let k = cm.n_classes();
        let labels = axis_labels(&result.report.class_names);
        let max = cm.max_count().max(1) as f64;
        let last = segment_end(k);

        let mut chart = ChartBuilder::on(panel)
            .caption(format!("Confusion Matrix - {}", result.name), ("sans-serif", 22))
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(130)
            .build_cartesian_2d((0u32..last).into_segmented(), (0u32..last).into_segmented())?;

        // Row 0 is drawn at the top, so y segment i holds actual class k-1-i
        let predicted: Vec<String> = labels.iter().map(|l| format!("Predicted {l}")).collect();
        let actual: Vec<String> = labels.iter().rev().map(|l| format!("Actual {l}")).collect();

        chart
            .configure_mesh()
            .disable_mesh()
            .x_labels(k + 1)
            .y_labels(k + 1)
            .x_label_formatter(&|v| segment_name(v, &predicted))
            .y_label_formatter(&|v| segment_name(v, &actual))
            .label_style(("sans-serif", 15))
            .draw()?;

        let mut cells = Vec::with_capacity(k * k);
        for row in 0..k {
            for col in 0..k {
                cells.push((row, col, cm.get(row, col)));
            }
        }

        chart.draw_series(cells.iter().map(|&(row, col, count)| {
            let y = k - 1 - row;
            Rectangle::new(
                [(edge(col, k), edge(y, k)), (edge(col + 1, k), edge(y + 1, k))],
                heat_color(count as f64 / max).filled(),
            )
        }))?;

        chart.draw_series(cells.iter().map(|&(row, col, count)| {
            let y = (k - 1 - row) as u32;
            let color = if count as f64 / max > 0.5 { WHITE } else { BLACK };
            Text::new(
                count.to_string(),
                (SegmentValue::CenterOf(col as u32), SegmentValue::CenterOf(y)),
                ("sans-serif", 26)
                    .into_font()
                    .color(&color)
                    .pos(Pos::new(HPos::Center, VPos::Center)),
            )
        }))?;
    }

    root.present()?;
    Ok(())
}

/// Upper bound of a discrete range holding `n` segments (plotters ranges
/// are inclusive). A single segment still gets a non-degenerate axis.
fn segment_end(n: usize) -> u32 {
    (n.max(2) - 1) as u32
}

/// Boundary `i` of a `k`-segment axis; boundary `k` is the far edge.
fn edge(i: usize, k: usize) -> SegmentValue<u32> {
    if i >= k {
        SegmentValue::Last
    } else {
        SegmentValue::Exact(i as u32)
    }
}

fn segment_name<S: AsRef<str>>(value: &SegmentValue<u32>, names: &[S]) -> String {
    match value {
        SegmentValue::CenterOf(i) => names
            .get(*i as usize)
            .map(|s| s.as_ref().to_string())
            .unwrap_or_default(),
        _ => String::new(),
    }
}

/// Binary problems read as Negative/Positive; anything else uses raw labels.
fn axis_labels(class_names: &[String]) -> Vec<String> {
    if class_names.len() == 2 {
        vec!["Negative".to_string(), "Positive".to_string()]
    } else {
        class_names.to_vec()
    }
}

fn heat_color(t: f64) -> RGBColor {
    let t = t.clamp(0.0, 1.0);
    let lerp = |a: f64, b: f64| (a + (b - a) * t).round() as u8;
    RGBColor(
        lerp(HEAT_LOW.0, HEAT_HIGH.0),
        lerp(HEAT_LOW.1, HEAT_HIGH.1),
        lerp(HEAT_LOW.2, HEAT_HIGH.2),
    )
}
