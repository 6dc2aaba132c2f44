//! Terminal rendering for command results.
//!
//! In `--json` mode every human-facing line is suppressed and commands
//! print a single JSON document instead; errors become `{"error": ...}`.

use std::time::Duration;

use console::{style, Term};
use feast_commerce::cart::OrderTotals;
use indicatif::{ProgressBar, ProgressStyle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Human { verbose: bool },
    Json,
}

#[derive(Clone)]
pub struct Output {
    mode: Mode,
}

impl Output {
    pub fn new(verbose: bool, json: bool) -> Self {
        let mode = if json {
            Mode::Json
        } else {
            Mode::Human { verbose }
        };
        Self { mode }
    }

    pub fn is_json(&self) -> bool {
        self.mode == Mode::Json
    }

    fn stdout(&self, line: impl AsRef<str>) {
        if !self.is_json() {
            // Write errors such as a closed pipe are ignored.
            let _ = Term::stdout().write_line(line.as_ref());
        }
    }

    fn stderr(&self, line: impl AsRef<str>) {
        if !self.is_json() {
            let _ = Term::stderr().write_line(line.as_ref());
        }
    }

    pub fn info(&self, msg: &str) {
        self.stdout(format!("{} {msg}", style("ℹ").cyan()));
    }

    pub fn success(&self, msg: &str) {
        self.stdout(format!("{} {msg}", style("✓").green().bold()));
    }

    pub fn warn(&self, msg: &str) {
        self.stderr(format!("{} {msg}", style("!").yellow().bold()));
    }

    /// Errors are the one message kind that is still emitted in JSON mode.
    pub fn error(&self, msg: &str) {
        match self.mode {
            Mode::Json => eprintln!("{}", serde_json::json!({ "error": msg })),
            Mode::Human { .. } => {
                eprintln!("{} {}", style("error:").red().bold(), msg);
            }
        }
    }

    /// Shown only with `--verbose`.
    pub fn debug(&self, msg: &str) {
        if let Mode::Human { verbose: true } = self.mode {
            self.stderr(style(format!("· {msg}")).dim().to_string());
        }
    }

    pub fn header(&self, title: &str) {
        self.stdout("");
        self.stdout(style(title).bold().underlined().to_string());
    }

    /// Pretty-printed document on stdout, regardless of mode.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(doc) => println!("{doc}"),
            Err(e) => self.error(&format!("Could not encode result: {e}")),
        }
    }

    pub fn kv(&self, key: &str, value: &str) {
        self.stdout(format!("  {} {value}", style(format!("{key}:")).dim()));
    }

    pub fn list_item(&self, item: &str) {
        self.stdout(format!("  - {item}"));
    }

    /// Left-aligned columns padded to `widths`; extra columns are dropped.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        let mut row = String::from(" ");
        for (col, width) in cols.iter().zip(widths) {
            row.push(' ');
            row.push_str(&pad(col, *width));
            row.push(' ');
        }
        self.stdout(row.trim_end());
    }

    /// Price breakdown. The discount line only appears when one applies.
    pub fn totals(&self, totals: &OrderTotals, fee_label: &str) {
        self.kv("Subtotal", &totals.subtotal.display());
        if totals.has_discount() {
            self.kv("Discount", &format!("-{}", totals.discount.display()));
        }
        self.kv(fee_label, &totals.delivery_fee.display());
        self.stdout(format!(
            "  {} {}",
            style("Total:").bold(),
            style(totals.total.display()).bold().green()
        ));
    }

    /// Ticking spinner; hidden in JSON mode so stdout stays parseable.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.is_json() {
            return ProgressBar::hidden();
        }
        let bar = ProgressBar::new_spinner();
        if let Ok(template) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            bar.set_style(template);
        }
        bar.set_message(msg.to_owned());
        bar.enable_steady_tick(Duration::from_millis(80));
        bar
    }
}

/// Pads to `width` characters, not bytes.
fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    let mut padded = text.to_owned();
    padded.extend(std::iter::repeat(' ').take(width.saturating_sub(len)));
    padded
}

/// Colours an order or reservation status by how settled it is.
pub fn status_badge(status: &str) -> String {
    let styled = style(status);
    match status.to_ascii_lowercase().as_str() {
        "completed" | "confirmed" => styled.green().to_string(),
        "preparing" | "ready" | "out_for_delivery" | "pending" => styled.yellow().to_string(),
        "cancelled" => styled.dim().to_string(),
        _ => status.to_owned(),
    }
}

pub fn format_rating(rating: f64) -> String {
    format!("★ {rating:.1}")
}
