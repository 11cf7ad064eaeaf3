//! SVG chart renderer.
//!
//! Draws a 2 x 2 grid of panels from a [`Report`]: execution time bars,
//! GFLOPS bars, speedup bars with a reference line at 1.0, and the
//! thread-sweep line chart (time on the left axis, GFLOPS on the right).
//! Bar colours come from each variant's [`VariantCategory`].

use std::fmt::{self, Write};

use crate::record::VariantCategory;
use crate::report::Report;
use crate::scaling::ScalingSummary;

const SVG_W: f64 = 1200.0;
const TITLE_H: f64 = 70.0;
const PANEL_W: f64 = SVG_W / 2.0;
const PANEL_H: f64 = 460.0;
const PLOT_LEFT: f64 = 72.0;
const PLOT_RIGHT: f64 = 64.0;
const PLOT_TOP: f64 = 44.0;
const PLOT_BOTTOM: f64 = 120.0;
const Y_TICKS: u32 = 5;

const TIME_COLOUR: &str = "#1F77B4";
const GFLOPS_COLOUR: &str = "#2CA02C";
const REFERENCE_COLOUR: &str = "#D62728";

/// Fill colour for a variant category.
pub fn category_colour(category: VariantCategory) -> &'static str {
    match category {
        VariantCategory::Sequential => "#D62728",
        VariantCategory::ThreadParallel => "#1F77B4",
        VariantCategory::ProcessParallel => "#2CA02C",
        VariantCategory::Hybrid | VariantCategory::Other => "#FF7F0E",
    }
}

/// Render the four-panel chart as an SVG document.
///
/// `family` names the thread-sweep family in the last panel's title; it is
/// used for the placeholder when the report has no sweep.
pub fn render(report: &Report, matrix_size: u32, family: &str) -> String {
    let mut out = String::new();
    write_chart(&mut out, report, matrix_size, family).expect("writing to a String cannot fail");
    out
}

struct Bar<'a> {
    label: &'a str,
    value: f64,
    colour: &'static str,
}

fn write_chart(w: &mut String, report: &Report, matrix_size: u32, family: &str) -> fmt::Result {
    let svg_h = TITLE_H + 2.0 * PANEL_H + 20.0;

    writeln!(
        w,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{SVG_W}\" height=\"{svg_h}\" font-family=\"Arial,sans-serif\">"
    )?;
    writeln!(w, "<rect width=\"{SVG_W}\" height=\"{svg_h}\" fill=\"#FFFFFF\"/>")?;
    writeln!(
        w,
        "<text x=\"{:.1}\" y=\"30\" text-anchor=\"middle\" font-size=\"20\" font-weight=\"bold\" fill=\"#222\">Matrix-Matrix Multiplication Performance Analysis</text>",
        SVG_W / 2.0
    )?;
    writeln!(
        w,
        "<text x=\"{:.1}\" y=\"54\" text-anchor=\"middle\" font-size=\"16\" font-weight=\"bold\" fill=\"#222\">({matrix_size}×{matrix_size})</text>",
        SVG_W / 2.0
    )?;

    let time_bars: Vec<Bar<'_>> = report
        .summaries
        .iter()
        .map(|s| Bar {
            label: &s.variant,
            value: s.mean_time_ms,
            colour: category_colour(s.category),
        })
        .collect();
    let gflops_bars: Vec<Bar<'_>> = report
        .summaries
        .iter()
        .map(|s| Bar {
            label: &s.variant,
            value: s.mean_gflops,
            colour: category_colour(s.category),
        })
        .collect();
    let speedup_bars: Vec<Bar<'_>> = report
        .speedup
        .entries
        .iter()
        .map(|e| Bar {
            label: &e.variant,
            value: e.speedup,
            colour: category_colour(e.category),
        })
        .collect();

    let panel = Panel::at(0, 0);
    panel.frame(w, "Execution Time Comparison")?;
    panel.bars(w, &time_bars, "Time (ms)", |v| format!("{v:.1}"), None)?;

    let panel = Panel::at(1, 0);
    panel.frame(w, "Performance (GFLOPS)")?;
    panel.bars(w, &gflops_bars, "GFLOPS", |v| format!("{v:.1}"), None)?;

    let panel = Panel::at(0, 1);
    panel.frame(w, &format!("Speedup vs {}", report.speedup.baseline))?;
    panel.bars(w, &speedup_bars, "Speedup", |v| format!("{v:.2}x"), Some(1.0))?;

    let panel = Panel::at(1, 1);
    panel.frame(w, &format!("{family} Scaling"))?;
    match &report.scaling {
        Some(scaling) => panel.scaling(w, scaling)?,
        None => panel.notice(w, &format!("No {family} scaling data available"))?,
    }

    writeln!(w, "</svg>")
}

/// One cell of the 2 x 2 grid.
struct Panel {
    x: f64,
    y: f64,
}

impl Panel {
    fn at(col: u32, row: u32) -> Self {
        Self {
            x: f64::from(col) * PANEL_W,
            y: TITLE_H + f64::from(row) * PANEL_H,
        }
    }

    fn left(&self) -> f64 {
        self.x + PLOT_LEFT
    }

    fn right(&self) -> f64 {
        self.x + PANEL_W - PLOT_RIGHT
    }

    fn top(&self) -> f64 {
        self.y + PLOT_TOP
    }

    fn bottom(&self) -> f64 {
        self.y + PANEL_H - PLOT_BOTTOM
    }

    fn width(&self) -> f64 {
        self.right() - self.left()
    }

    fn height(&self) -> f64 {
        self.bottom() - self.top()
    }

    /// Vertical position of `value` on an axis running from 0 to `max`.
    fn y_of(&self, value: f64, max: f64) -> f64 {
        self.bottom() - value.min(max) / max * self.height()
    }

    fn frame(&self, w: &mut String, title: &str) -> fmt::Result {
        writeln!(
            w,
            "<rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" rx=\"6\" fill=\"#FAFAFA\" stroke=\"#DDD\" stroke-width=\"1\"/>",
            self.x + 6.0,
            self.y + 4.0,
            PANEL_W - 12.0,
            PANEL_H - 8.0
        )?;
        writeln!(
            w,
            "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"14\" font-weight=\"bold\" fill=\"#222\">{}</text>",
            self.x + PANEL_W / 2.0,
            self.y + 28.0,
            escape(title)
        )
    }

    fn notice(&self, w: &mut String, text: &str) -> fmt::Result {
        writeln!(
            w,
            "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"13\" fill=\"#555\">{}</text>",
            self.x + PANEL_W / 2.0,
            self.y + PANEL_H / 2.0,
            escape(text)
        )
    }

    /// Tick labels and rotated caption for a vertical axis.
    ///
    /// The left axis also draws the horizontal grid lines.
    fn y_axis(&self, w: &mut String, max: f64, caption: &str, colour: &str, right: bool) -> fmt::Result {
        for i in 0..=Y_TICKS {
            let value = max * f64::from(i) / f64::from(Y_TICKS);
            let ty = self.y_of(value, max);
            if !right {
                writeln!(
                    w,
                    "<line x1=\"{:.1}\" y1=\"{ty:.1}\" x2=\"{:.1}\" y2=\"{ty:.1}\" stroke=\"#E5E5E5\" stroke-width=\"1\"/>",
                    self.left(),
                    self.right()
                )?;
            }
            let (tx, anchor) = if right {
                (self.right() + 6.0, "start")
            } else {
                (self.left() - 6.0, "end")
            };
            writeln!(
                w,
                "<text x=\"{tx:.1}\" y=\"{:.1}\" text-anchor=\"{anchor}\" font-size=\"10\" fill=\"{colour}\">{}</text>",
                ty + 3.5,
                fmt_tick(value)
            )?;
        }

        let cx = if right { self.right() + 50.0 } else { self.left() - 54.0 };
        let cy = self.top() + self.height() / 2.0;
        writeln!(
            w,
            "<text x=\"{cx:.1}\" y=\"{cy:.1}\" text-anchor=\"middle\" font-size=\"12\" font-weight=\"bold\" fill=\"{colour}\" transform=\"rotate(-90 {cx:.1} {cy:.1})\">{}</text>",
            escape(caption)
        )
    }

    fn x_axis_line(&self, w: &mut String) -> fmt::Result {
        writeln!(
            w,
            "<line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"#888\" stroke-width=\"1\"/>",
            self.left(),
            self.bottom(),
            self.right(),
            self.bottom()
        )
    }

    fn bars(
        &self,
        w: &mut String,
        bars: &[Bar<'_>],
        caption: &str,
        value_label: impl Fn(f64) -> String,
        reference: Option<f64>,
    ) -> fmt::Result {
        if bars.is_empty() {
            return self.notice(w, "No data");
        }

        let peak = bars
            .iter()
            .map(|b| b.value)
            .chain(reference)
            .filter(|v| v.is_finite())
            .fold(0.0, f64::max);
        let max = nice_max(peak * 1.1);

        self.y_axis(w, max, caption, "#333", false)?;

        let slot = self.width() / bars.len() as f64;
        let bar_w = slot * 0.6;
        for (i, bar) in bars.iter().enumerate() {
            let bx = self.left() + slot * i as f64 + (slot - bar_w) / 2.0;
            let cx = bx + bar_w / 2.0;
            let by = self.y_of(bar.value, max);
            let bh = self.bottom() - by;

            writeln!(
                w,
                "<rect x=\"{bx:.1}\" y=\"{by:.1}\" width=\"{bar_w:.1}\" height=\"{bh:.1}\" fill=\"{}\" fill-opacity=\"0.7\" stroke=\"#000\" stroke-width=\"1\"/>",
                bar.colour
            )?;
            writeln!(
                w,
                "<text x=\"{cx:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"10\" fill=\"#222\">{}</text>",
                by - 4.0,
                value_label(bar.value)
            )?;

            let ly = self.bottom() + 14.0;
            writeln!(
                w,
                "<text x=\"{cx:.1}\" y=\"{ly:.1}\" text-anchor=\"end\" font-size=\"10\" fill=\"#333\" transform=\"rotate(-45 {cx:.1} {ly:.1})\">{}</text>",
                escape(bar.label)
            )?;
        }

        if let Some(level) = reference {
            let ry = self.y_of(level, max);
            writeln!(
                w,
                "<line x1=\"{:.1}\" y1=\"{ry:.1}\" x2=\"{:.1}\" y2=\"{ry:.1}\" stroke=\"{REFERENCE_COLOUR}\" stroke-width=\"2\" stroke-dasharray=\"8,5\"/>",
                self.left(),
                self.right()
            )?;
            writeln!(
                w,
                "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"end\" font-size=\"11\" fill=\"{REFERENCE_COLOUR}\">Baseline ({}x)</text>",
                self.right() - 4.0,
                self.top() + 12.0,
                fmt_tick(level)
            )?;
        }

        self.x_axis_line(w)
    }

    fn scaling(&self, w: &mut String, scaling: &ScalingSummary) -> fmt::Result {
        let points = &scaling.points;
        let time_max = nice_max(scaling.max_time_ms * 1.1);
        let gflops_peak = points
            .iter()
            .map(|p| p.gflops)
            .filter(|v| v.is_finite())
            .fold(0.0, f64::max);
        let gflops_max = nice_max(gflops_peak * 1.1);

        self.y_axis(w, time_max, "Time (ms)", TIME_COLOUR, false)?;
        self.y_axis(w, gflops_max, "GFLOPS", GFLOPS_COLOUR, true)?;

        let lo = points.first().map_or(1, |p| p.concurrency);
        let hi = points.last().map_or(1, |p| p.concurrency);
        let inset = 24.0;
        let x_of = |threads: u32| -> f64 {
            if hi == lo {
                self.left() + self.width() / 2.0
            } else {
                self.left()
                    + inset
                    + f64::from(threads - lo) / f64::from(hi - lo) * (self.width() - 2.0 * inset)
            }
        };

        let mut ticks: Vec<u32> = points.iter().map(|p| p.concurrency).collect();
        ticks.dedup();
        for threads in ticks {
            writeln!(
                w,
                "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"10\" fill=\"#333\">{threads}</text>",
                x_of(threads),
                self.bottom() + 14.0
            )?;
        }
        writeln!(
            w,
            "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-size=\"12\" font-weight=\"bold\" fill=\"#333\">Number of Threads</text>",
            self.left() + self.width() / 2.0,
            self.bottom() + 36.0
        )?;

        let time_line: Vec<(f64, f64)> = points
            .iter()
            .map(|p| (x_of(p.concurrency), self.y_of(p.time_ms, time_max)))
            .collect();
        let gflops_line: Vec<(f64, f64)> = points
            .iter()
            .map(|p| (x_of(p.concurrency), self.y_of(p.gflops, gflops_max)))
            .collect();

        polyline(w, &time_line, TIME_COLOUR)?;
        for &(px, py) in &time_line {
            writeln!(w, "<circle cx=\"{px:.1}\" cy=\"{py:.1}\" r=\"5\" fill=\"{TIME_COLOUR}\"/>")?;
        }
        polyline(w, &gflops_line, GFLOPS_COLOUR)?;
        for &(px, py) in &gflops_line {
            writeln!(
                w,
                "<rect x=\"{:.1}\" y=\"{:.1}\" width=\"9\" height=\"9\" fill=\"{GFLOPS_COLOUR}\"/>",
                px - 4.5,
                py - 4.5
            )?;
        }

        // Legend, upper left.
        let lx = self.left() + 10.0;
        let ly = self.top() + 14.0;
        for (i, (label, colour)) in [("Execution Time", TIME_COLOUR), ("GFLOPS", GFLOPS_COLOUR)]
            .into_iter()
            .enumerate()
        {
            let row_y = ly + i as f64 * 16.0;
            writeln!(
                w,
                "<line x1=\"{lx:.1}\" y1=\"{row_y:.1}\" x2=\"{:.1}\" y2=\"{row_y:.1}\" stroke=\"{colour}\" stroke-width=\"2\"/>",
                lx + 20.0
            )?;
            writeln!(
                w,
                "<text x=\"{:.1}\" y=\"{:.1}\" font-size=\"11\" fill=\"#333\">{label}</text>",
                lx + 26.0,
                row_y + 4.0
            )?;
        }

        self.x_axis_line(w)
    }
}

fn polyline(w: &mut String, points: &[(f64, f64)], colour: &str) -> fmt::Result {
    let mut coords = String::new();
    for (i, (x, y)) in points.iter().enumerate() {
        if i > 0 {
            coords.push(' ');
        }
        write!(coords, "{x:.1},{y:.1}")?;
    }
    writeln!(
        w,
        "<polyline points=\"{coords}\" fill=\"none\" stroke=\"{colour}\" stroke-width=\"2\"/>"
    )
}

/// Smallest 1/2/2.5/5 x 10^k that is at least `v`.
fn nice_max(v: f64) -> f64 {
    if !v.is_finite() || v <= 0.0 {
        return 1.0;
    }
    let base = 10f64.powf(v.log10().floor());
    [1.0, 2.0, 2.5, 5.0, 10.0]
        .into_iter()
        .map(|m| m * base)
        .find(|&candidate| v <= candidate)
        .unwrap_or(10.0 * base)
}

fn fmt_tick(v: f64) -> String {
    let s = format!("{v:.2}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Escape text for use inside an SVG element.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
