//! Results container markup
//!
//! Each function returns the complete new contents of the results container.
//! Nothing is patched incrementally and nothing from a previous render is
//! carried over.

use std::fmt::Write;

use crate::api::{BatchResult, PredictionResult};

/// Bar color for classes other than the predicted one
pub const DEFAULT_BAR_COLOR: &str = "#3498db";

/// Bars narrower than this many percent carry no inline label
pub const INLINE_LABEL_THRESHOLD: f64 = 10.0;

pub const SAMPLE_LOADED_MESSAGE: &str =
    "Sample data loaded! Click \"Classify Bean\" to see the prediction.";

/// One row of the probability chart
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityBar {
    pub label: String,
    pub percent: f64,
    pub color: String,
    pub highlighted: bool,
    /// Text drawn inside the bar, if it is wide enough
    pub inline_label: Option<String>,
}

/// Chart rows for a prediction, highest probability first
pub fn probability_bars(result: &PredictionResult) -> Vec<ProbabilityBar> {
    let Some(ref probabilities) = result.probabilities else {
        return Vec::new();
    };

    probabilities
        .ranked()
        .into_iter()
        .map(|entry| {
            let highlighted = entry.label == result.label;
            ProbabilityBar {
                label: entry.label.clone(),
                percent: entry.percent,
                color: if highlighted { result.color.clone() } else { DEFAULT_BAR_COLOR.to_string() },
                highlighted,
                inline_label: (entry.percent >= INLINE_LABEL_THRESHOLD)
                    .then(|| format_percent(entry.percent)),
            }
        })
        .collect()
}

/// One decimal place followed by `%`. Exact ties round away from zero, as
/// JavaScript's `toFixed(1)` does.
pub fn format_percent(value: f64) -> String {
    format!("{}%", format_tenths(value))
}

fn format_tenths(value: f64) -> String {
    let scaled = value * 10.0;
    // the product is exact only when the fused residual is zero
    let exact_tie = scaled.is_finite() && scaled.fract().abs() == 0.5 && value.mul_add(10.0, -scaled) == 0.0;
    if exact_tie {
        format!("{:.1}", scaled.abs().ceil().copysign(scaled) / 10.0)
    } else {
        format!("{:.1}", value)
    }
}

pub fn render_prediction(result: &PredictionResult) -> String {
    let color = escape(&result.color);
    let mut html = format!(
        r#"<div class="prediction-result" style="border-left-color: {color};">
    <div class="result-header">
        <div class="bean-type">{label}</div>
        <div class="confidence-badge">{confidence} Confidence</div>
    </div>
    <div class="bean-details">
        <div class="scientific-name">{scientific}</div>
        <p>{description}</p>
    </div>
"#,
        color = color,
        label = escape(&result.label),
        confidence = format_percent(result.confidence),
        scientific = escape(&result.scientific_name),
        description = escape(&result.description),
    );

    let bars = probability_bars(result);
    if result.probabilities.is_some() {
        html.push_str("    <div class=\"probability-chart\">\n        <h4>Classification Probabilities:</h4>\n");
        for bar in &bars {
            let bar_color = escape(&bar.color);
            let class = if bar.highlighted { "probability-item top" } else { "probability-item" };
            let _ = write!(
                html,
                r#"        <div class="{class}" style="border-left-color: {bar_color};">
            <span>{label}</span>
            <div class="probability-bar">
                <div class="probability-fill" style="width: {width}%; background: {bar_color};">{inline}</div>
            </div>
            <span>{value}</span>
        </div>
"#,
                class = class,
                bar_color = bar_color,
                label = escape(&bar.label),
                width = bar.percent,
                inline = bar.inline_label.as_deref().unwrap_or(""),
                value = format_percent(bar.percent),
            );
        }
        html.push_str("    </div>\n");
    }

    html.push_str("</div>");
    html
}

pub fn render_batch(result: &BatchResult) -> String {
    let mut html = format!(
        "<div class=\"success-message\">✅ Successfully classified {} beans</div>\n<div class=\"batch-results\">\n",
        result.len()
    );

    for row in &result.predictions {
        let color = escape(&row.color);
        let _ = write!(
            html,
            r#"    <div class="batch-result-item" style="border-left-color: {color};">
        <div class="batch-bean-color" style="background-color: {color};"></div>
        <div>
            <strong>Bean {instance}: {label}</strong>
            <div class="batch-bean-details">{scientific} - {description}</div>
        </div>
    </div>
"#,
            color = color,
            instance = row.instance,
            label = escape(&row.label),
            scientific = escape(&row.scientific_name),
            description = escape(&row.description),
        );
    }

    html.push_str("</div>");
    html
}

pub fn render_error(message: &str) -> String {
    format!("<div class=\"error-message\">❌ {}</div>", escape(message))
}

pub fn render_success(message: &str) -> String {
    format!("<div class=\"success-message\">✅ {}</div>", escape(message))
}

/// Escape text for HTML element content and quoted attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{BatchPrediction, Probabilities};

    fn result_with(probabilities: Option<Probabilities>) -> PredictionResult {
        PredictionResult {
            label: "A".to_string(),
            confidence: 70.0,
            scientific_name: "Phaseolus vulgaris".to_string(),
            description: "Turkish kidney bean".to_string(),
            color: "#8B4513".to_string(),
            probabilities,
            prediction: Some(0),
        }
    }

    #[test]
    fn test_bars_ordered_and_highlighted() {
        let result = result_with(Some(Probabilities::from([("B", 30.0), ("A", 70.0)])));
        let bars = probability_bars(&result);
        assert_eq!(bars.len(), 2);

        assert_eq!(bars[0].label, "A");
        assert!(bars[0].highlighted);
        assert_eq!(bars[0].color, "#8B4513");
        assert_eq!(bars[0].inline_label.as_deref(), Some("70.0%"));

        assert_eq!(bars[1].label, "B");
        assert!(!bars[1].highlighted);
        assert_eq!(bars[1].color, DEFAULT_BAR_COLOR);
        assert_eq!(bars[1].inline_label.as_deref(), Some("30.0%"));
    }

    #[test]
    fn test_inline_label_threshold_boundary() {
        let result = result_with(Some(Probabilities::from([("A", 80.01), ("B", 10.0), ("C", 9.99)])));
        let bars = probability_bars(&result);
        assert_eq!(bars[1].label, "B");
        assert_eq!(bars[1].inline_label.as_deref(), Some("10.0%"));
        assert_eq!(bars[2].label, "C");
        assert_eq!(bars[2].inline_label, None);

        // the value is still printed next to the bar
        let html = render_prediction(&result);
        assert!(html.contains("style=\"width: 10%; background: #3498db;\">10.0%</div>"));
        assert!(html.contains("style=\"width: 9.99%; background: #3498db;\"></div>"));
        assert!(html.contains("<span>10.0%</span>"));
    }

    #[test]
    fn test_format_percent_ties_round_up() {
        assert_eq!(format_percent(91.25), "91.3%");
        assert_eq!(format_percent(0.25), "0.3%");
        assert_eq!(format_percent(8.75), "8.8%");
        assert_eq!(format_percent(12.25), "12.3%");
        // not a tie in binary: 0.35 is stored just below
        assert_eq!(format_percent(0.35), "0.3%");
        assert_eq!(format_percent(92.6789), "92.7%");
        assert_eq!(format_percent(10.0), "10.0%");
        assert_eq!(format_percent(0.0), "0.0%");
    }

    #[test]
    fn test_tied_values_in_header_and_bars() {
        let mut result = result_with(Some(Probabilities::from([("A", 91.25), ("B", 8.75)])));
        result.confidence = 91.25;
        let bars = probability_bars(&result);
        assert_eq!(bars[0].inline_label.as_deref(), Some("91.3%"));
        assert_eq!(bars[1].inline_label, None);

        let html = render_prediction(&result);
        assert!(html.contains("<div class=\"confidence-badge\">91.3% Confidence</div>"));
        assert!(html.contains("<span>8.8%</span>"));
    }

    #[test]
    fn test_render_prediction_header() {
        let mut result = result_with(None);
        result.confidence = 92.6789;
        let html = render_prediction(&result);
        assert!(html.contains("<div class=\"bean-type\">A</div>"));
        assert!(html.contains("92.7% Confidence"));
        assert!(html.contains("Phaseolus vulgaris"));
        assert!(!html.contains("probability-chart"));
    }

    #[test]
    fn test_render_escapes_server_text() {
        let mut result = result_with(None);
        result.description = "<script>alert(1)</script>".to_string();
        let html = render_prediction(&result);
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_render_batch_rows() {
        let batch = BatchResult {
            predictions: vec![
                BatchPrediction {
                    instance: 1,
                    label: "SEKER".to_string(),
                    scientific_name: "Phaseolus vulgaris".to_string(),
                    description: "Sugar bean".to_string(),
                    color: "#FFD700".to_string(),
                    confidence: None,
                },
                BatchPrediction {
                    instance: 2,
                    label: "SIRA".to_string(),
                    scientific_name: "Vigna radiata".to_string(),
                    description: "Mung bean".to_string(),
                    color: "#90EE90".to_string(),
                    confidence: Some(77.0),
                },
            ],
        };
        let html = render_batch(&batch);
        assert!(html.contains("Successfully classified 2 beans"));
        assert!(html.contains("<strong>Bean 1: SEKER</strong>"));
        assert!(html.contains("<strong>Bean 2: SIRA</strong>"));
        assert!(html.contains("background-color: #90EE90;"));
        assert!(html.find("Bean 1").unwrap() < html.find("Bean 2").unwrap());
    }

    #[test]
    fn test_render_error_and_success() {
        assert_eq!(
            render_error("Model not loaded"),
            "<div class=\"error-message\">❌ Model not loaded</div>"
        );
        assert!(render_success(SAMPLE_LOADED_MESSAGE).contains("&quot;Classify Bean&quot;"));
    }
}
