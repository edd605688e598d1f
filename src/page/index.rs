//! Demo page markup
//!
//! The page talks to the UI server with htmx: each form action posts the
//! current field values and swaps the returned fragment into the results
//! container.

use std::fmt::Write;

use crate::features::FeatureSpec;
use crate::render::escape;
use crate::shortcuts::Shortcut;

use super::{BATCH_INPUT_ID, FEATURE_INPUTS_ID, PREDICTION_FORM_ID, RESULTS_CONTAINER_ID};

const STYLE: &str = r#"
body{font-family:system-ui,sans-serif;background:#f4f6f8;color:#2c3e50;margin:0}
header{background:#2c3e50;color:#fff;padding:1rem 2rem}
main{display:grid;grid-template-columns:1fr 1fr;gap:2rem;padding:2rem}
.card{background:#fff;border-radius:8px;padding:1.5rem;box-shadow:0 1px 3px rgba(0,0,0,.1)}
#feature-inputs{display:grid;grid-template-columns:1fr 1fr;gap:.75rem}
#feature-inputs label{display:block;font-size:.85rem;font-weight:600}
#feature-inputs input{width:100%;padding:.4rem}
textarea{width:100%;min-height:6rem;font-family:monospace}
button{margin-top:1rem;padding:.5rem 1rem;border:0;border-radius:4px;background:#3498db;color:#fff;cursor:pointer}
.hint{font-size:.8rem;color:#7f8c8d}
.prediction-result,.batch-result-item,.probability-item{border-left:4px solid #3498db;padding-left:.75rem;margin-bottom:.75rem}
.result-header{display:flex;justify-content:space-between;align-items:center}
.bean-type{font-size:1.5rem;font-weight:700}
.confidence-badge{background:#2ecc71;color:#fff;border-radius:12px;padding:.2rem .6rem}
.scientific-name{font-style:italic}
.probability-item{display:grid;grid-template-columns:7rem 1fr 4rem;align-items:center;gap:.5rem}
.probability-bar{background:#ecf0f1;border-radius:4px;height:1.2rem}
.probability-fill{height:100%;border-radius:4px;color:#fff;font-size:.75rem;text-align:right}
.batch-result-item{display:flex;gap:.75rem;align-items:center}
.batch-bean-color{width:1.5rem;height:1.5rem;border-radius:50%;border:1px solid #ccc}
.batch-bean-details{font-size:.9rem;color:#666}
.success-message{background:#eafaf1;color:#1e8449;padding:.75rem;border-radius:4px}
.error-message{background:#fdedec;color:#c0392b;padding:.75rem;border-radius:4px}
"#;

/// The `feature-inputs` block. With `oob` set it carries `hx-swap-oob` so it
/// can ride along another response and replace the block in place.
pub fn render_feature_inputs(features: &[FeatureSpec], values: &[String], oob: bool) -> String {
    let mut html = if oob {
        format!("<div id=\"{}\" hx-swap-oob=\"true\">\n", FEATURE_INPUTS_ID)
    } else {
        format!("<div id=\"{}\">\n", FEATURE_INPUTS_ID)
    };

    for (index, feature) in features.iter().enumerate() {
        let value = values.get(index).map(String::as_str).unwrap_or("");
        let _ = write!(
            html,
            r#"    <div class="feature" title="{description}">
        <label for="feature-{index}">{name}</label>
        <input type="number" step="any" id="feature-{index}" name="feature" value="{value}">
    </div>
"#,
            description = escape(feature.description),
            index = index,
            name = escape(feature.name),
            value = escape(value),
        );
    }

    html.push_str("</div>");
    html
}

/// Full demo page
pub fn render_index_page(features: &[FeatureSpec], values: &[String]) -> String {
    let predict_trigger = escape(&format!("submit, {}", Shortcut::Predict.hx_trigger()));
    let sample_trigger = escape(&format!("click, {}", Shortcut::LoadSample.hx_trigger()));

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Bean Classifier Pro</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <style>{style}</style>
</head>
<body>
    <header>
        <h1>🌱 Bean Classifier Pro</h1>
        <span class="hint">v{version} · {count} morphological features</span>
    </header>
    <main>
        <section class="card">
            <h2>Bean Measurements</h2>
            <form id="{form_id}" hx-post="/ui/predict" hx-target="#{results_id}" hx-swap="innerHTML" hx-trigger="{predict_trigger}">
{inputs}
                <button type="submit">Classify Bean</button>
                <button type="button" hx-post="/ui/sample" hx-include="#{inputs_id}" hx-target="#{results_id}" hx-swap="innerHTML" hx-trigger="{sample_trigger}">Load Sample Data</button>
            </form>
            <p class="hint">{predict_label} to classify · {sample_label} to load sample data</p>
        </section>
        <section class="card">
            <h2>Batch Prediction</h2>
            <textarea id="{batch_id}" name="batch" placeholder="[[42000, 750, ...], [...]]"></textarea>
            <button type="button" hx-post="/ui/batch_predict" hx-include="#{batch_id}" hx-target="#{results_id}" hx-swap="innerHTML">Batch Classify</button>
            <h2>Results</h2>
            <div id="{results_id}"></div>
        </section>
    </main>
</body>
</html>"##,
        style = STYLE,
        version = env!("CARGO_PKG_VERSION"),
        count = features.len(),
        form_id = PREDICTION_FORM_ID,
        results_id = RESULTS_CONTAINER_ID,
        inputs_id = FEATURE_INPUTS_ID,
        batch_id = BATCH_INPUT_ID,
        predict_trigger = predict_trigger,
        sample_trigger = sample_trigger,
        inputs = render_feature_inputs(features, values, false),
        predict_label = Shortcut::Predict.label(),
        sample_label = Shortcut::LoadSample.label(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::BEAN_FEATURES;

    #[test]
    fn test_page_exposes_element_contract() {
        let html = render_index_page(&BEAN_FEATURES, &[]);
        for id in [PREDICTION_FORM_ID, FEATURE_INPUTS_ID, BATCH_INPUT_ID, RESULTS_CONTAINER_ID] {
            assert!(html.contains(&format!("id=\"{}\"", id)), "missing element {}", id);
        }
        assert_eq!(html.matches("name=\"feature\"").count(), BEAN_FEATURES.len());
    }

    #[test]
    fn test_feature_inputs_keep_values_and_order() {
        let values = vec!["42000".to_string(), "750".to_string()];
        let html = render_feature_inputs(&BEAN_FEATURES[..3], &values, true);
        assert!(html.starts_with("<div id=\"feature-inputs\" hx-swap-oob=\"true\">"));
        assert!(html.contains("id=\"feature-0\" name=\"feature\" value=\"42000\""));
        assert!(html.contains("id=\"feature-1\" name=\"feature\" value=\"750\""));
        assert!(html.contains("id=\"feature-2\" name=\"feature\" value=\"\""));
        assert!(html.find("Area").unwrap() < html.find("Perimeter").unwrap());
    }

    #[test]
    fn test_shortcut_triggers_present() {
        let html = render_index_page(&BEAN_FEATURES, &[]);
        assert!(html.contains("key==&#39;Enter&#39;"));
        assert!(html.contains("Ctrl+Shift+L"));
    }
}
