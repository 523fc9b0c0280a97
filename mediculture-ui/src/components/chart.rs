//! Chart Components
//!
//! Pie and bar charts drawn on an HTML5 canvas.

use leptos::*;
use std::f64::consts::PI;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::api::CountEntry;

/// Slice and bar colors, cycled in order
const SERIES_COLORS: [&str; 6] = [
    "#FF9800", // Orange (primary)
    "#4CAF50", // Green
    "#2196F3", // Blue
    "#9C27B0", // Purple
    "#F44336", // Red
    "#00BCD4", // Cyan
];

const BACKGROUND: &str = "#1f2937"; // gray-800
const LABEL_COLOR: &str = "#9ca3af"; // gray-400

fn series_color(idx: usize) -> &'static str {
    SERIES_COLORS[idx % SERIES_COLORS.len()]
}

/// Pie chart of labelled counts
#[component]
pub fn PieChart(
    #[prop(into)]
    data: Signal<Vec<CountEntry>>,
) -> impl IntoView {
    let canvas_ref = create_node_ref::<html::Canvas>();

    create_effect(move |_| {
        let entries = data.get();
        if let Some(canvas) = canvas_ref.get() {
            draw_pie(&canvas, &entries);
        }
    });

    view! {
        <div class="relative">
            <canvas
                node_ref=canvas_ref
                width="400"
                height="300"
                class="w-full h-64 rounded-lg"
            />
            <ChartLegend data=data />
        </div>
    }
}

/// Vertical bar chart of labelled counts
#[component]
pub fn BarChart(
    #[prop(into)]
    data: Signal<Vec<CountEntry>>,
) -> impl IntoView {
    let canvas_ref = create_node_ref::<html::Canvas>();

    create_effect(move |_| {
        let entries = data.get();
        if let Some(canvas) = canvas_ref.get() {
            draw_bars(&canvas, &entries);
        }
    });

    view! {
        <canvas
            node_ref=canvas_ref
            width="600"
            height="300"
            class="w-full h-64 rounded-lg"
        />
    }
}

/// Legend showing slice colors
#[component]
fn ChartLegend(data: Signal<Vec<CountEntry>>) -> impl IntoView {
    view! {
        <div class="flex justify-center flex-wrap gap-4 mt-4">
            {move || {
                data.get()
                    .into_iter()
                    .enumerate()
                    .map(|(idx, entry)| {
                        view! {
                            <div class="flex items-center space-x-2">
                                <div
                                    class="w-3 h-3 rounded-full"
                                    style=format!("background-color: {}", series_color(idx))
                                />
                                <span class="text-sm text-gray-300 capitalize">
                                    {format!("{} ({})", entry.label, entry.count)}
                                </span>
                            </div>
                        }
                    })
                    .collect::<Vec<_>>()
            }}
        </div>
    }
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()?
        .dyn_into::<CanvasRenderingContext2d>()
        .ok()
}

/// Start and end angle of each slice, starting at twelve o'clock
fn pie_slices(entries: &[CountEntry]) -> Vec<(f64, f64)> {
    let total: usize = entries.iter().map(|e| e.count).sum();
    if total == 0 {
        return Vec::new();
    }

    let mut start = -PI / 2.0;
    entries
        .iter()
        .map(|entry| {
            let sweep = entry.count as f64 / total as f64 * 2.0 * PI;
            let slice = (start, start + sweep);
            start += sweep;
            slice
        })
        .collect()
}

fn draw_pie(canvas: &HtmlCanvasElement, entries: &[CountEntry]) {
    let Some(ctx) = context_2d(canvas) else {
        return;
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;

    ctx.set_fill_style(&BACKGROUND.into());
    ctx.fill_rect(0.0, 0.0, width, height);

    let slices = pie_slices(entries);
    if slices.is_empty() {
        draw_empty(&ctx, width, height);
        return;
    }

    let cx = width / 2.0;
    let cy = height / 2.0;
    let radius = (width.min(height) / 2.0) - 20.0;

    for (idx, (start, end)) in slices.iter().enumerate() {
        ctx.set_fill_style(&series_color(idx).into());
        ctx.begin_path();
        ctx.move_to(cx, cy);
        let _ = ctx.arc(cx, cy, radius, *start, *end);
        ctx.close_path();
        ctx.fill();

        // Slice outline
        ctx.set_stroke_style(&BACKGROUND.into());
        ctx.set_line_width(2.0);
        ctx.stroke();
    }
}

fn draw_bars(canvas: &HtmlCanvasElement, entries: &[CountEntry]) {
    let Some(ctx) = context_2d(canvas) else {
        return;
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;

    // Margins
    let margin_left = 40.0;
    let margin_right = 20.0;
    let margin_top = 20.0;
    let margin_bottom = 50.0;

    let chart_width = width - margin_left - margin_right;
    let chart_height = height - margin_top - margin_bottom;

    ctx.set_fill_style(&BACKGROUND.into());
    ctx.fill_rect(0.0, 0.0, width, height);

    let max = entries.iter().map(|e| e.count).max().unwrap_or(0);
    if max == 0 {
        draw_empty(&ctx, width, height);
        return;
    }

    // Horizontal grid lines with y-axis labels
    ctx.set_stroke_style(&"#374151".into()); // gray-700
    ctx.set_line_width(1.0);
    ctx.set_font("12px sans-serif");
    for i in 0..=4 {
        let y = margin_top + (i as f64 / 4.0) * chart_height;
        ctx.begin_path();
        ctx.move_to(margin_left, y);
        ctx.line_to(width - margin_right, y);
        ctx.stroke();

        let value = max as f64 * (1.0 - i as f64 / 4.0);
        ctx.set_fill_style(&LABEL_COLOR.into());
        let _ = ctx.fill_text(&format!("{:.0}", value), 5.0, y + 4.0);
    }

    let slot = chart_width / entries.len() as f64;
    let bar_width = slot * 0.6;

    for (idx, entry) in entries.iter().enumerate() {
        let bar_height = entry.count as f64 / max as f64 * chart_height;
        let x = margin_left + idx as f64 * slot + (slot - bar_width) / 2.0;
        let y = margin_top + chart_height - bar_height;

        ctx.set_fill_style(&series_color(idx).into());
        ctx.fill_rect(x, y, bar_width, bar_height);

        ctx.set_fill_style(&LABEL_COLOR.into());
        let _ = ctx.fill_text(&entry.count.to_string(), x + bar_width / 2.0 - 4.0, y - 4.0);
        let _ = ctx.fill_text(&short_label(&entry.label), x, height - margin_bottom / 2.0);
    }
}

fn draw_empty(ctx: &CanvasRenderingContext2d, width: f64, height: f64) {
    ctx.set_fill_style(&"#6b7280".into());
    ctx.set_font("16px sans-serif");
    let _ = ctx.fill_text("No data", width / 2.0 - 28.0, height / 2.0);
}

/// Axis label cut to fit under a bar
fn short_label(label: &str) -> String {
    if label.chars().count() > 12 {
        let head: String = label.chars().take(11).collect();
        format!("{}…", head)
    } else {
        label.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(label: &str, count: usize) -> CountEntry {
        CountEntry {
            label: label.to_string(),
            count,
        }
    }

    #[test]
    fn test_pie_slices_cover_circle() {
        let slices = pie_slices(&[entry("scheduled", 3), entry("completed", 1)]);
        assert_eq!(slices.len(), 2);
        assert!((slices[0].0 + PI / 2.0).abs() < 1e-9);
        assert!((slices[0].1 - slices[0].0 - 1.5 * PI).abs() < 1e-9);
        assert!((slices[1].1 - (1.5 * PI)).abs() < 1e-9);
    }

    #[test]
    fn test_pie_slices_empty_total() {
        assert!(pie_slices(&[]).is_empty());
        assert!(pie_slices(&[entry("unknown", 0)]).is_empty());
    }

    #[test]
    fn test_short_label() {
        assert_eq!(short_label("Antibiotic"), "Antibiotic");
        assert_eq!(short_label("Antihistamines & Allergy"), "Antihistami…");
    }
}
