//! Bean Classifier CLI Module
//!
//! Command-line front end: one-shot predictions, batch runs, model info, the
//! web UI server and an interactive form.

use clap::{Parser, Subcommand};
use colored::*;
use std::path::{Path, PathBuf};

use crate::api::{BatchResult, HttpPredictionClient, ModelInfo, PredictionApi, PredictionResult};
use crate::config::{ClientConfig, UiServerConfig};
use crate::controller::{describe_error, ActionOutcome, FormController, BATCH_ERROR_PREFIX, PREDICT_ERROR_PREFIX};
use crate::features::{BEAN_FEATURES, SAMPLE_VALUES};
use crate::page::{MemoryPage, Page};
use crate::render::{format_percent, probability_bars};
use crate::shortcuts::Shortcut;

// ─── Styling helpers ───────────────────────────────────────────────────────────

const W: usize = 58; // box inner width
const BAR_WIDTH: usize = 30;

fn dim(s: &str) -> ColoredString   { s.truecolor(100, 100, 100) }
fn accent(s: &str) -> ColoredString { s.truecolor(120, 170, 255) }
fn muted(s: &str) -> ColoredString  { s.truecolor(140, 140, 140) }
fn ok(s: &str) -> ColoredString     { s.truecolor(100, 210, 120) }

fn line_box_top()    { println!("  {}", dim("┌─────────────────────────────────────────────────────────┐")); }
fn line_box_bottom() { println!("  {}", dim("└─────────────────────────────────────────────────────────┘")); }
fn line_box_sep()    { println!("  {}", dim("├─────────────────────────────────────────────────────────┤")); }

fn line_box(content: &str) {
    let visible_len = strip_ansi(content).chars().count();
    let pad = W.saturating_sub(visible_len);
    println!("  {}  {}{} {}", dim("│"), content, " ".repeat(pad), dim("│"));
}

fn line_box_center(content: &str) {
    let visible_len = strip_ansi(content).chars().count();
    let total_pad = W.saturating_sub(visible_len);
    let left = total_pad / 2;
    let right = total_pad - left;
    println!("  {}  {}{}{} {}", dim("│"), " ".repeat(left), content, " ".repeat(right), dim("│"));
}

fn line_box_empty() { line_box(""); }

fn strip_ansi(s: &str) -> String {
    let mut out = String::new();
    let mut in_escape = false;
    for c in s.chars() {
        if c == '\x1b' { in_escape = true; continue; }
        if in_escape { if c == 'm' { in_escape = false; } continue; }
        out.push(c);
    }
    out
}

fn kv(key: &str, val: &str) -> String {
    format!("{} {}", muted(key), val.white())
}

fn step_ok(msg: &str) {
    println!("  {} {}", ok("✓"), msg);
}

fn step_fail(msg: &str) {
    println!("  {} {}", "✗".red(), msg.red());
}

fn section(title: &str) {
    println!();
    println!("  {}", title.white().bold());
    println!("  {}", dim(&"─".repeat(56)));
}

/// `#RRGGBB` to an RGB triple
fn hex_rgb(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.trim().strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

fn swatch(color: &str) -> ColoredString {
    match hex_rgb(color) {
        Some((r, g, b)) => "●".truecolor(r, g, b),
        None => "●".normal(),
    }
}

fn bar(percent: f64, color: &str) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    let fill = "█".repeat(filled);
    let fill = match hex_rgb(color) {
        Some((r, g, b)) => fill.truecolor(r, g, b),
        None => fill.normal(),
    };
    format!("{}{}", fill, dim(&"░".repeat(BAR_WIDTH - filled)))
}

// ─── CLI definition ────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "bean-classifier")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Dry Bean classifier front end: form, batch and web UI")]
#[command(long_about = None)]
pub struct Cli {
    /// Prediction service base URL (default: $CLASSIFIER_API_URL or http://127.0.0.1:5000/)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Request timeout in seconds (default: none)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify one bean
    Predict {
        /// Feature values in model order, comma separated
        #[arg(long, value_delimiter = ',', num_args = 1.., conflicts_with = "sample")]
        values: Vec<String>,

        /// Use the built-in sample measurements
        #[arg(long)]
        sample: bool,

        /// Write the rendered result markup to this file
        #[arg(long)]
        html: Option<PathBuf>,
    },

    /// Classify several beans from a JSON array of arrays
    Batch {
        /// File holding the batch JSON
        #[arg(short, long, conflicts_with = "json")]
        input: Option<PathBuf>,

        /// Batch JSON given inline
        #[arg(long)]
        json: Option<String>,

        /// Write the rendered result markup to this file
        #[arg(long)]
        html: Option<PathBuf>,
    },

    /// Show model metadata reported by the service
    Info,

    /// Start the web UI
    Serve {
        /// Server port (default: $UI_PORT or 8080)
        #[arg(short, long)]
        port: Option<u16>,

        /// Server host (default: $UI_HOST or 127.0.0.1)
        #[arg(long)]
        host: Option<String>,
    },
}

impl Cli {
    /// Client configuration from the environment, overridden by flags
    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::default();
        if let Some(ref url) = self.api_url {
            config.api_url = url.clone();
        }
        if let Some(secs) = self.timeout {
            config.timeout_secs = Some(secs);
        }
        config
    }
}

/// Web UI configuration from the environment, overridden by flags
pub fn server_config(client: &ClientConfig, host: Option<String>, port: Option<u16>) -> UiServerConfig {
    let mut config = UiServerConfig { client: client.clone(), ..UiServerConfig::default() };
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }
    config
}

fn form_controller(config: &ClientConfig, page: MemoryPage) -> anyhow::Result<FormController<HttpPredictionClient, MemoryPage>> {
    Ok(FormController::new(HttpPredictionClient::new(config)?, page))
}

fn write_html(path: Option<&Path>, page: &MemoryPage) -> anyhow::Result<()> {
    if let Some(path) = path {
        std::fs::write(path, page.results())?;
        step_ok(&format!("Result markup written → {}", path.display()));
    }
    Ok(())
}

// ─── Output ────────────────────────────────────────────────────────────────────

pub fn print_prediction(result: &PredictionResult) {
    section("Prediction");

    println!(
        "  {} {}  {}",
        swatch(&result.color),
        result.label.white().bold(),
        accent(&format!("{} confidence", format_percent(result.confidence)))
    );
    println!("  {}", muted(&result.scientific_name).italic());
    println!("  {}", result.description);

    let bars = probability_bars(result);
    if !bars.is_empty() {
        println!();
        for row in &bars {
            let name = if row.highlighted { row.label.white().bold() } else { muted(&row.label) };
            println!("  {:<10} {} {:>6}", name, bar(row.percent, &row.color), format_percent(row.percent));
        }
    }
    println!();
}

pub fn print_batch(result: &BatchResult) {
    section("Batch");
    step_ok(&format!("Successfully classified {} beans", result.len()));
    println!();

    for row in &result.predictions {
        println!(
            "  {} {:<8} {:<10} {}",
            swatch(&row.color),
            muted(&format!("Bean {}", row.instance)),
            row.label.white().bold(),
            muted(&format!("{} - {}", row.scientific_name, row.description))
        );
    }
    println!();
}

pub fn print_model_info(info: &ModelInfo) {
    section("Model");

    println!("  {:<18} {}", muted("Type"), info.model_type);
    if let Some(ref architecture) = info.architecture {
        println!("  {:<18} {}", muted("Architecture"), architecture);
    }
    println!("  {:<18} {}", muted("Features"), info.features_expected);
    if let Some(accuracy) = info.accuracy {
        println!("  {:<18} {:.2}%", muted("Accuracy"), accuracy);
    }
    if let Some(ref steps) = info.preprocessing {
        println!("  {:<18} {}", muted("Preprocessing"), steps.join(", "));
    }
    if let Some(ref classes) = info.bean_classes {
        println!();
        for (index, class) in classes {
            println!(
                "  {:>3}  {} {:<10} {}",
                dim(&index.to_string()),
                swatch(&class.color),
                class.name.white().bold(),
                muted(&format!("{} - {}", class.scientific_name, class.description))
            );
        }
    }
    if let Some(ref names) = info.feature_names {
        println!();
        for (i, name) in names.iter().enumerate() {
            println!("  {:>3}  {}", dim(&i.to_string()), name);
        }
    }
    println!();
}

// ─── Commands ──────────────────────────────────────────────────────────────────

pub async fn cmd_predict(
    config: &ClientConfig,
    values: &[String],
    sample: bool,
    html: Option<&Path>,
) -> anyhow::Result<()> {
    let page = if sample {
        MemoryPage::with_fields(BEAN_FEATURES.len())
    } else if values.is_empty() {
        anyhow::bail!("Provide --values or --sample");
    } else {
        MemoryPage::with_values(values.to_vec())
    };

    let controller = form_controller(config, page)?;
    if sample {
        let filled = controller.load_sample_data();
        step_ok(&format!("Sample data loaded into {} fields", filled));
    }

    let outcome = controller.predict().await;
    write_html(html, controller.page())?;
    let result = outcome.map_err(|e| anyhow::anyhow!(describe_error(&e, PREDICT_ERROR_PREFIX)))?;
    print_prediction(&result);
    Ok(())
}

pub async fn cmd_batch(
    config: &ClientConfig,
    input: Option<&Path>,
    json: Option<&str>,
    html: Option<&Path>,
) -> anyhow::Result<()> {
    let text = match (input, json) {
        (Some(path), _) => std::fs::read_to_string(path)?,
        (None, Some(json)) => json.to_string(),
        (None, None) => anyhow::bail!("Provide --input or --json"),
    };

    let controller = form_controller(config, MemoryPage::default().with_batch(text))?;
    let outcome = controller.batch_predict().await;
    write_html(html, controller.page())?;
    let result = outcome.map_err(|e| anyhow::anyhow!(describe_error(&e, BATCH_ERROR_PREFIX)))?;
    print_batch(&result);
    Ok(())
}

pub async fn cmd_info(config: &ClientConfig) -> anyhow::Result<()> {
    let controller = form_controller(config, MemoryPage::with_fields(BEAN_FEATURES.len()))?;
    match controller.initialize().await {
        Some(info) => print_model_info(&info),
        None => anyhow::bail!("Model info unavailable from {}", config.api_url),
    }
    Ok(())
}

// ─── Serve ─────────────────────────────────────────────────────────────────────

pub async fn cmd_serve(config: UiServerConfig) -> anyhow::Result<()> {
    use crate::server::run_server;

    let (host, port) = (config.host.as_str(), config.port);

    println!();
    line_box_top();
    line_box_empty();
    line_box_center(&format!("{}", "Bean Classifier".white().bold()));
    line_box_center(&format!("{}", dim(&format!("v{}", env!("CARGO_PKG_VERSION")))));
    line_box_empty();
    line_box_sep();
    line_box_empty();
    line_box(&kv("Web UI ", &format!("http://{}:{}", host, port)));
    line_box(&kv("Health ", &format!("http://{}:{}/health", host, port)));
    line_box(&kv("Model  ", &config.client.api_url));
    line_box_empty();
    line_box_sep();
    line_box_empty();
    line_box_center(&format!("{}", dim("ctrl+c to stop")));
    line_box_empty();
    line_box_bottom();
    println!();

    run_server(config).await
}

// ─── Interactive mode ──────────────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!("       {}", "🌱 Bean Classifier".truecolor(100, 210, 120).bold());
    println!("       {}", dim(&format!("Dry Bean form  ·  v{}  ·  rust", env!("CARGO_PKG_VERSION"))));
    println!();
}

fn print_form(page: &MemoryPage) {
    section("Form");
    for (feature, value) in BEAN_FEATURES.iter().zip(page.feature_values()) {
        let shown = if value.is_empty() { dim("—") } else { value.white() };
        println!("  {:<18} {}", muted(feature.name), shown);
    }
    println!();
}

fn read_features(page: &MemoryPage) -> anyhow::Result<()> {
    use dialoguer::Input;

    let current = page.feature_values().join(",");
    let line: String = Input::new()
        .with_prompt(format!("  {} values, comma separated", BEAN_FEATURES.len()))
        .with_initial_text(current)
        .allow_empty(true)
        .interact_text()?;

    let mut values = line.split(',').map(|v| v.trim().to_string());
    for index in 0..page.feature_count() {
        page.set_feature_value(index, values.next().unwrap_or_default());
    }
    Ok(())
}

pub async fn cmd_interactive(server: &UiServerConfig) -> anyhow::Result<()> {
    use dialoguer::{Input, Select, theme::ColorfulTheme};

    let config = &server.client;

    print_banner();

    let theme = ColorfulTheme {
        active_item_prefix: dialoguer::console::style("  ›".to_string()).for_stderr().cyan(),
        active_item_style: dialoguer::console::Style::new().for_stderr().white().bold(),
        inactive_item_prefix: dialoguer::console::style("   ".to_string()).for_stderr(),
        inactive_item_style: dialoguer::console::Style::new().for_stderr().color256(245),
        prompt_prefix: dialoguer::console::style("  ?".to_string()).for_stderr().color256(111),
        prompt_style: dialoguer::console::Style::new().for_stderr().white().bold(),
        ..ColorfulTheme::default()
    };

    let controller = form_controller(config, MemoryPage::with_fields(BEAN_FEATURES.len()))?;
    if let Some(info) = controller.initialize().await {
        step_ok(&format!("{} ready, {} features", info.model_type, info.features_expected));
    } else {
        step_fail(&format!("Model info unavailable from {}", config.api_url));
    }

    let items = [
        format!("Classify bean         {}", Shortcut::Predict.label().to_lowercase()),
        format!("Load sample data      {}", Shortcut::LoadSample.label().to_lowercase()),
        "Edit features         enter the measurements".to_string(),
        "Show form             current field values".to_string(),
        "Batch classify        json array of arrays".to_string(),
        "Model info            what the service runs".to_string(),
        format!("Start web UI          form on {}:{}", server.host, server.port),
        "Exit".to_string(),
    ];

    loop {
        println!();
        let sel = Select::with_theme(&theme)
            .with_prompt("What would you like to do")
            .items(&items)
            .default(0)
            .interact_opt()?;

        match sel {
            Some(0) => match controller.run(Shortcut::Predict).await {
                Ok(ActionOutcome::Prediction(result)) => print_prediction(&result),
                Ok(_) => {}
                Err(e) => step_fail(&describe_error(&e, PREDICT_ERROR_PREFIX)),
            },
            Some(1) => {
                let filled = controller.load_sample_data();
                step_ok(&format!(
                    "Sample data loaded into {} of {} fields ({} reference values)",
                    filled,
                    controller.page().feature_count(),
                    SAMPLE_VALUES.len()
                ));
            }
            Some(2) => read_features(controller.page())?,
            Some(3) => print_form(controller.page()),
            Some(4) => {
                let text: String = Input::with_theme(&theme)
                    .with_prompt("Batch JSON")
                    .allow_empty(true)
                    .interact_text()?;
                controller.page().set_batch_input(text);
                match controller.batch_predict().await {
                    Ok(result) => print_batch(&result),
                    Err(e) => step_fail(&describe_error(&e, BATCH_ERROR_PREFIX)),
                }
            }
            Some(5) => match controller.api().model_info().await {
                Ok(info) => print_model_info(&info),
                Err(e) => step_fail(&format!("Error loading model info: {}", e)),
            },
            Some(6) => {
                cmd_serve(server.clone()).await?;
                break;
            }
            Some(7) | None => {
                println!();
                println!("  {}", dim("goodbye"));
                println!();
                break;
            }
            _ => {}
        }
    }

    Ok(())
}
