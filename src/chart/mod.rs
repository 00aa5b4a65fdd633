//! Six-panel dashboard rendered to a standalone plotly HTML page.

use std::path::Path;

use anyhow::{Context, Result, bail};
use plotly::common::{
    Anchor, DashType, Font, Line, Marker, Mode, Orientation, TextPosition, Title,
};
use plotly::layout::{Annotation, Axis, GridPattern, LayoutGrid, Margin};
use plotly::{Bar, Layout, Plot, Scatter};

use crate::engine::Summary;
use crate::engine::summary::MEDIAN_BAND;
use crate::model::AnalysisRow;

const CALL: &str = "#667eea";
const PUT: &str = "#f093fb";
const CALL_PREMIUM: &str = "#4facfe";
const PUT_PREMIUM: &str = "#00f2fe";
const UPPER_BAND: &str = "#43e97b";
const LOWER_BAND: &str = "#fa709a";

const PANELS: [&str; 6] = [
    "Call vs Put IRR Comparison",
    "Call vs Put Premium Comparison",
    "52-Week Price Percentile",
    "Spot Price vs Strike Prices",
    "Average IRR Comparison",
    "Premium to Strike Price Ratio",
];

/// Axis id for the n-th (1-based) subplot: `x`, `x2`, `x3`, ...
fn axis_id(axis: &str, panel: usize) -> String {
    if panel == 1 {
        axis.to_string()
    } else {
        format!("{axis}{panel}")
    }
}

fn titled(text: &str) -> Axis {
    Axis::new().title(Title::from(text)).show_grid(true)
}

/// Build the dashboard figure.
pub fn dashboard(rows: &[AnalysisRow], summary: &Summary) -> Plot {
    let symbols: Vec<String> = rows.iter().map(|r| r.symbol.clone()).collect();
    let column = |f: fn(&AnalysisRow) -> f64| rows.iter().map(f).collect::<Vec<f64>>();

    let mut plot = Plot::new();

    // 1. IRR comparison
    plot.add_trace(
        Bar::new(symbols.clone(), column(|r| r.ce_irr))
            .name("CE IRR")
            .marker(Marker::new().color(CALL))
            .opacity(0.8)
            .x_axis("x")
            .y_axis("y"),
    );
    plot.add_trace(
        Bar::new(symbols.clone(), column(|r| r.pe_irr))
            .name("PE IRR")
            .marker(Marker::new().color(PUT))
            .opacity(0.8)
            .x_axis("x")
            .y_axis("y"),
    );

    // 2. Premium comparison
    plot.add_trace(
        Bar::new(symbols.clone(), column(|r| r.ce_premium))
            .name("CE Premium")
            .marker(Marker::new().color(CALL_PREMIUM))
            .opacity(0.8)
            .x_axis("x2")
            .y_axis("y2"),
    );
    plot.add_trace(
        Bar::new(symbols.clone(), column(|r| r.pe_premium))
            .name("PE Premium")
            .marker(Marker::new().color(PUT_PREMIUM))
            .opacity(0.8)
            .x_axis("x2")
            .y_axis("y2"),
    );

    // 3. 52-week percentile, coloured by band half
    let percentiles = column(|r| r.percentile);
    let band_colors: Vec<&'static str> = percentiles
        .iter()
        .map(|&p| if p >= MEDIAN_BAND { UPPER_BAND } else { LOWER_BAND })
        .collect();
    let labels: Vec<String> = percentiles.iter().map(|p| format!("{p:.1}%")).collect();
    plot.add_trace(
        Bar::new(percentiles, symbols.clone())
            .name("Percentile")
            .orientation(Orientation::Horizontal)
            .marker(Marker::new().color_array(band_colors))
            .text_array(labels)
            .text_position(TextPosition::Outside)
            .opacity(0.8)
            .show_legend(false)
            .x_axis("x3")
            .y_axis("y3"),
    );
    if let (Some(first), Some(last)) = (symbols.first(), symbols.last()) {
        plot.add_trace(
            Scatter::new(vec![MEDIAN_BAND, MEDIAN_BAND], vec![first.clone(), last.clone()])
                .name("50% Mark")
                .mode(Mode::Lines)
                .line(Line::new().color("red").dash(DashType::Dash).width(2.0))
                .x_axis("x3")
                .y_axis("y3"),
        );
    }

    // 4. Spot vs strikes
    plot.add_trace(
        Scatter::new(symbols.clone(), column(|r| r.spot_price))
            .name("Spot Price")
            .mode(Mode::LinesMarkers)
            .line(Line::new().color(CALL).width(2.5))
            .marker(Marker::new().size(8))
            .x_axis("x4")
            .y_axis("y4"),
    );
    plot.add_trace(
        Scatter::new(symbols.clone(), column(|r| r.ce_strike))
            .name("CE Strike")
            .mode(Mode::LinesMarkers)
            .line(Line::new().color(CALL_PREMIUM).width(2.0).dash(DashType::Dash))
            .marker(Marker::new().size(6))
            .x_axis("x4")
            .y_axis("y4"),
    );
    plot.add_trace(
        Scatter::new(symbols.clone(), column(|r| r.pe_strike))
            .name("PE Strike")
            .mode(Mode::LinesMarkers)
            .line(Line::new().color(PUT).width(2.0).dash(DashType::Dash))
            .marker(Marker::new().size(6))
            .x_axis("x4")
            .y_axis("y4"),
    );

    // 5. Average IRR
    let averages = vec![summary.mean_ce_irr, summary.mean_pe_irr];
    let labels: Vec<String> = averages.iter().map(|v| format!("{v:.2}%")).collect();
    plot.add_trace(
        Bar::new(vec!["Call Options", "Put Options"], averages)
            .name("Average IRR")
            .marker(Marker::new().color_array(vec![CALL, PUT]))
            .text_array(labels)
            .text_position(TextPosition::Outside)
            .opacity(0.8)
            .show_legend(false)
            .x_axis("x5")
            .y_axis("y5"),
    );

    // 6. Premium / strike ratio
    plot.add_trace(
        Scatter::new(symbols.clone(), column(AnalysisRow::ce_premium_ratio))
            .name("CE Ratio")
            .mode(Mode::Markers)
            .marker(
                Marker::new()
                    .size(12)
                    .color(CALL)
                    .line(Line::new().color("black").width(0.5)),
            )
            .opacity(0.7)
            .x_axis("x6")
            .y_axis("y6"),
    );
    plot.add_trace(
        Scatter::new(symbols, column(AnalysisRow::pe_premium_ratio))
            .name("PE Ratio")
            .mode(Mode::Markers)
            .marker(
                Marker::new()
                    .size(12)
                    .color(PUT)
                    .line(Line::new().color("black").width(0.5)),
            )
            .opacity(0.7)
            .x_axis("x6")
            .y_axis("y6"),
    );

    let annotations: Vec<Annotation> = PANELS
        .iter()
        .enumerate()
        .map(|(idx, title)| {
            let panel = idx + 1;
            Annotation::new()
                .text(format!("<b>{title}</b>"))
                .x_ref(format!("{} domain", axis_id("x", panel)))
                .y_ref(format!("{} domain", axis_id("y", panel)))
                .x(0.5)
                .y(1.08)
                .x_anchor(Anchor::Center)
                .y_anchor(Anchor::Bottom)
                .font(Font::new().size(13))
                .show_arrow(false)
        })
        .collect();

    plot.set_layout(
        Layout::new()
            .title(Title::from("<b>NSE Options Trading Analysis Dashboard</b>"))
            .height(1000)
            .margin(Margin::new().left(70).right(30).top(110).bottom(90))
            .annotations(annotations)
            .grid(
                LayoutGrid::new()
                    .rows(2)
                    .columns(3)
                    .x_gap(0.12)
                    .y_gap(0.3)
                    .pattern(GridPattern::Independent),
            )
            .x_axis(titled("Symbol"))
            .y_axis(titled("IRR (%)"))
            .x_axis2(titled("Symbol"))
            .y_axis2(titled("Premium (₹)"))
            .x_axis3(titled("Percentile (%)"))
            .y_axis3(Axis::new())
            .x_axis4(titled("Symbol"))
            .y_axis4(titled("Price (₹)"))
            .x_axis5(Axis::new())
            .y_axis5(titled("Average IRR (%)"))
            .x_axis6(titled("Symbol"))
            .y_axis6(titled("Premium/Strike Ratio (%)")),
    );

    plot
}

/// Render the dashboard to a self-contained HTML file at `path`.
pub fn save(rows: &[AnalysisRow], summary: &Summary, path: &Path) -> Result<()> {
    if rows.is_empty() {
        bail!("no rows to plot");
    }
    let html = dashboard(rows, summary).to_html();
    std::fs::write(path, html).with_context(|| format!("writing chart {}", path.display()))?;
    Ok(())
}
