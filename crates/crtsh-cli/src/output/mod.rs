//! Rendering of extracted names and live-check results.

use anyhow::Result;
use colored::Colorize;
use crtsh::{HostnameSet, ResolutionResult, ResultCollection};
use std::fmt::Write as _;
use tabled::settings::object::Rows;
use tabled::settings::{Alignment, Modify, Panel, Style};
use tabled::{Table, Tabled};

/// Available output modes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// Aligned table with a title row
    #[default]
    Table,
    /// One `[*]` line per entry
    Plain,
    /// Pretty-printed JSON
    Json,
}

#[derive(Tabled)]
struct NameRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Name")]
    name: String,
}

#[derive(Tabled)]
struct LiveRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "IP Addresses")]
    ips: String,
}

/// Turns names or results into the text written to stdout.
#[derive(Debug, Clone, Copy)]
pub struct Presenter {
    mode: OutputMode,
    show_unresolvable: bool,
    color: bool,
}

impl Presenter {
    /// Create a presenter for one output mode
    pub const fn new(mode: OutputMode, show_unresolvable: bool, color: bool) -> Self {
        Self {
            mode,
            show_unresolvable,
            color,
        }
    }

    /// Render the extracted names (no live check).
    pub fn names(&self, domain: &str, names: &HostnameSet) -> Result<String> {
        match self.mode {
            OutputMode::Json => Ok(json_line(names)?),
            OutputMode::Table => {
                let rows: Vec<NameRow> = names
                    .iter()
                    .enumerate()
                    .map(|(i, name)| NameRow {
                        index: i + 1,
                        name: name.to_string(),
                    })
                    .collect();
                Ok(titled_table(
                    Table::new(&rows),
                    &format!("Extracted domains for {domain:?}"),
                ))
            }
            OutputMode::Plain => {
                let mut out = String::new();
                writeln!(out, "{} Extracted data for {domain:?}", self.marker())?;
                for name in names.iter() {
                    writeln!(out, "{} {name}", self.marker())?;
                }
                Ok(out)
            }
        }
    }

    /// Render live-check results with resolvable/unresolvable counts.
    pub fn results(&self, domain: &str, results: &ResultCollection) -> Result<String> {
        let visible: Vec<&ResolutionResult> = results
            .sorted_by_hostname()
            .into_iter()
            .filter(|r| self.show_unresolvable || !r.is_unresolvable())
            .collect();
        let resolvable = results.resolvable_count();
        let unresolvable = results.unresolvable_count();

        match self.mode {
            OutputMode::Json => Ok(json_line(&visible)?),
            OutputMode::Table => {
                let rows: Vec<LiveRow> = visible
                    .iter()
                    .enumerate()
                    .map(|(i, r)| LiveRow {
                        index: i + 1,
                        name: r.hostname.clone(),
                        ips: r.ips_joined(),
                    })
                    .collect();
                Ok(titled_table(
                    Table::new(&rows),
                    &format!(
                        "Live domains for {domain:?} ({resolvable} resolvable; {unresolvable} unresolvable)"
                    ),
                ))
            }
            OutputMode::Plain => {
                let mut out = String::new();
                writeln!(
                    out,
                    "{} Checked live domains for {domain:?} - {} ({resolvable} resolvable; {unresolvable} unresolvable)",
                    self.marker(),
                    results.len(),
                )?;
                for r in visible {
                    writeln!(out, "{} {} => {}", self.marker(), r.hostname, r.ips_joined())?;
                }
                Ok(out)
            }
        }
    }

    fn marker(&self) -> String {
        if self.color {
            "[*]".green().bold().to_string()
        } else {
            "[*]".to_string()
        }
    }
}

fn titled_table(mut table: Table, title: &str) -> String {
    table
        .with(Style::rounded())
        .with(Panel::header(title))
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    let mut rendered = table.to_string();
    rendered.push('\n');
    rendered
}

fn json_line<T: serde::Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    let mut rendered = serde_json::to_string_pretty(value)?;
    rendered.push('\n');
    Ok(rendered)
}
