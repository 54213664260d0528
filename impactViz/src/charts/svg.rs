// SVG bar charts: one panel per series, drawn identically in single and combined figures
use std::fmt::Write as _;

use crate::analysis::formatting::format_thousands;
use crate::charts::series::ChartSeries;
use crate::config::constants::*;

// Panel margins in SVG units
const PANEL_MARGIN_LEFT: f64 = 95.0;
const PANEL_MARGIN_RIGHT: f64 = 20.0;
const PANEL_MARGIN_BOTTOM: f64 = 55.0;
const PANEL_TITLE_GAP: f64 = 10.0;
const Y_TICK_LENGTH: f64 = 4.0;
const Y_TICK_LABEL_GAP: f64 = 7.0;
const X_TICK_LABEL_OFFSET: f64 = 18.0;
const Y_LABEL_X: f64 = 22.0;

fn font_units(points: f64) -> f64 {
    points * SVG_UNITS_PER_INCH / POINTS_PER_INCH
}

/// A rendered SVG document and its physical size
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub width_in: f64,
    pub height_in: f64,
    pub svg: String,
}

impl Figure {
    /// Raster size at the given resolution
    pub fn pixel_size(&self, dpi: u32) -> (u32, u32) {
        (
            (self.width_in * dpi as f64).round() as u32,
            (self.height_in * dpi as f64).round() as u32,
        )
    }
}

/// Plot-area geometry inside a panel
struct PlotArea {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    x_min: f64,
    x_max: f64,
    y_max: f64,
}

impl PlotArea {
    fn new(panel_width: f64, panel_height: f64, y_max: f64) -> Self {
        let top = font_units(TITLE_FONT_PT) + font_units(TITLE_PAD_PT) + PANEL_TITLE_GAP;
        let half_span = 0.5 + BAR_WIDTH / 2.0;
        let data_span = 1.0 + BAR_WIDTH;
        let margin = X_AXIS_MARGIN * data_span;
        Self {
            left: PANEL_MARGIN_LEFT,
            top,
            width: panel_width - PANEL_MARGIN_LEFT - PANEL_MARGIN_RIGHT,
            height: panel_height - top - PANEL_MARGIN_BOTTOM,
            x_min: 0.5 - half_span - margin,
            x_max: 0.5 + half_span + margin,
            y_max,
        }
    }

    fn bottom(&self) -> f64 {
        self.top + self.height
    }

    fn x(&self, value: f64) -> f64 {
        self.left + (value - self.x_min) / (self.x_max - self.x_min) * self.width
    }

    fn y(&self, value: f64) -> f64 {
        self.bottom() - value / self.y_max * self.height
    }
}

/// Evenly spaced "nice" ticks from zero up to `upper`, with the decimals needed to print them
pub fn axis_ticks(upper: f64) -> (Vec<f64>, usize) {
    let raw_step = upper / TARGET_TICK_COUNT;
    let magnitude = 10f64.powf(raw_step.log10().floor());
    let normalized = raw_step / magnitude;
    let nice = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 2.5 {
        2.5
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    let step = nice * magnitude;

    let mut decimals = if magnitude < 1.0 {
        (-magnitude.log10()).round() as usize
    } else {
        0
    };
    if nice == 2.5 && magnitude < 10.0 {
        decimals += 1;
    }

    let count = (upper / step + 1e-9).floor() as usize;
    let ticks = (0..=count).map(|i| i as f64 * step).collect();
    (ticks, decimals)
}

fn escape_text(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Markup for one chart panel in panel-local coordinates.
/// Both figure kinds embed exactly this string, so a single chart
/// matches its counterpart in the combined figure.
pub fn panel_markup(series: &ChartSeries, panel_width: f64, panel_height: f64) -> String {
    let kind = series.kind;
    let area = PlotArea::new(panel_width, panel_height, series.y_upper_limit());
    let tick_font = font_units(TICK_FONT_PT);
    let mut svg = String::new();

    // Title and y-axis label
    let _ = writeln!(
        svg,
        r#"<text x="{:.2}" y="{:.2}" text-anchor="middle" font-size="{:.2}" fill="{}">{}</text>"#,
        area.left + area.width / 2.0,
        area.top - font_units(TITLE_PAD_PT),
        font_units(TITLE_FONT_PT),
        COLOR_SUSTREND_DARK,
        escape_text(kind.title())
    );
    let label_y = area.top + area.height / 2.0;
    let _ = writeln!(
        svg,
        r#"<text x="{:.2}" y="{:.2}" text-anchor="middle" font-size="{:.2}" fill="{}" transform="rotate(-90 {:.2} {:.2})">{}</text>"#,
        Y_LABEL_X,
        label_y,
        font_units(AXIS_LABEL_FONT_PT),
        kind.y_label_color(),
        Y_LABEL_X,
        label_y,
        escape_text(kind.y_label())
    );

    // Y ticks
    let (ticks, decimals) = axis_ticks(area.y_max);
    for tick in ticks {
        let y = area.y(tick);
        let _ = writeln!(
            svg,
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="1"/>"#,
            area.left - Y_TICK_LENGTH,
            y,
            area.left,
            y,
            COLOR_PRIMARY_DARK
        );
        let _ = writeln!(
            svg,
            r#"<text x="{:.2}" y="{:.2}" text-anchor="end" font-size="{:.2}" fill="{}">{}</text>"#,
            area.left - Y_TICK_LABEL_GAP,
            y + tick_font * 0.35,
            tick_font,
            COLOR_PRIMARY_DARK,
            format_thousands(tick, decimals)
        );
    }

    // Bars, annotations and category labels
    let colors = kind.bar_colors();
    for (index, value) in series.values().into_iter().enumerate() {
        let center = index as f64;
        let bar_left = area.x(center - BAR_WIDTH / 2.0);
        let bar_right = area.x(center + BAR_WIDTH / 2.0);
        let bar_top = area.y(value);
        let bar_height = area.bottom() - bar_top;
        if bar_height > 0.0 {
            let _ = writeln!(
                svg,
                r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}"/>"#,
                bar_left,
                bar_top,
                bar_right - bar_left,
                bar_height,
                colors[index]
            );
        }

        let center_x = area.x(center);
        let _ = writeln!(
            svg,
            r#"<text x="{:.2}" y="{:.2}" text-anchor="middle" font-size="{:.2}" fill="{}">{}</text>"#,
            center_x,
            area.y(value * (1.0 + ANNOTATION_OFFSET)) - 2.0,
            tick_font,
            COLOR_PRIMARY_DARK,
            escape_text(&kind.annotate(value))
        );

        let label_y = area.bottom() + X_TICK_LABEL_OFFSET;
        let _ = writeln!(
            svg,
            r#"<text x="{:.2}" y="{:.2}" text-anchor="middle" font-size="{:.2}" fill="{}" transform="rotate({:.1} {:.2} {:.2})">{}</text>"#,
            center_x,
            label_y,
            tick_font,
            COLOR_PRIMARY_DARK,
            -X_LABEL_ROTATION,
            center_x,
            label_y,
            escape_text(CATEGORY_LABELS[index])
        );
    }

    // Left and bottom spines only
    let _ = writeln!(
        svg,
        r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="1"/>"#,
        area.left,
        area.top,
        area.left,
        area.bottom(),
        COLOR_SPINE
    );
    let _ = writeln!(
        svg,
        r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="1"/>"#,
        area.left,
        area.bottom(),
        area.left + area.width,
        area.bottom(),
        COLOR_SPINE
    );

    svg
}

fn open_document(svg: &mut String, width: f64, height: f64) {
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{:.0}" height="{:.0}" viewBox="0 0 {:.0} {:.0}" font-family="{}">"#,
        width, height, width, height, CHART_FONT_FAMILY
    );
    let _ = writeln!(
        svg,
        r#"<rect x="0" y="0" width="{:.0}" height="{:.0}" fill="{}"/>"#,
        width, height, COLOR_BACKGROUND
    );
}

/// One chart on its own, used for export
pub fn render_single_figure(series: &ChartSeries) -> Figure {
    let figure_width = SINGLE_FIGURE_WIDTH_IN * SVG_UNITS_PER_INCH;
    let figure_height = SINGLE_FIGURE_HEIGHT_IN * SVG_UNITS_PER_INCH;

    let mut svg = String::new();
    open_document(&mut svg, figure_width, figure_height);
    svg.push_str("<g>\n");
    svg.push_str(&panel_markup(series, figure_width, figure_height));
    svg.push_str("</g>\n</svg>\n");

    Figure {
        width_in: SINGLE_FIGURE_WIDTH_IN,
        height_in: SINGLE_FIGURE_HEIGHT_IN,
        svg,
    }
}

/// All charts side by side; each panel has the single-figure size
pub fn render_combined_figure(series: &[ChartSeries]) -> Figure {
    let panel_width = SINGLE_FIGURE_WIDTH_IN * SVG_UNITS_PER_INCH;
    let panel_height = SINGLE_FIGURE_HEIGHT_IN * SVG_UNITS_PER_INCH;
    let width_in = SINGLE_FIGURE_WIDTH_IN * series.len() as f64;

    let mut svg = String::new();
    open_document(&mut svg, panel_width * series.len() as f64, panel_height);
    for (index, item) in series.iter().enumerate() {
        let _ = writeln!(svg, r#"<g transform="translate({:.0} 0)">"#, index as f64 * panel_width);
        svg.push_str(&panel_markup(item, panel_width, panel_height));
        svg.push_str("</g>\n");
    }
    svg.push_str("</svg>\n");

    Figure {
        width_in,
        height_in: SINGLE_FIGURE_HEIGHT_IN,
        svg,
    }
}
