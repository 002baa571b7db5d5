use colored::Colorize;

use crate::directory::Record;
use crate::engine::Page;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "text" | "txt" | "table" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

const HEADERS: [&str; 4] = ["Name", "Email", "Phone", "Location"];

/// "X - Y of Z". An empty view reads "0 - 0 of 0".
pub fn range_label(page: &Page<'_>) -> String {
    if page.rows.is_empty() {
        return format!("0 - 0 of {}", page.total);
    }
    format!("{} - {} of {}", page.start, page.end, page.total)
}

fn columns(record: &Record) -> [String; 4] {
    [
        record.full_name.clone(),
        record.email.clone(),
        record.phone.clone(),
        record.location(),
    ]
}

fn pad(value: &str, width: usize) -> String {
    let len = value.chars().count();
    let mut out = value.to_string();
    out.extend(std::iter::repeat(' ').take(width.saturating_sub(len)));
    out
}

pub fn render_text(page: &Page<'_>) -> String {
    let rows: Vec<[String; 4]> = page.rows.iter().map(columns).collect();
    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in rows.iter() {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header = HEADERS
        .iter()
        .zip(widths.iter())
        .map(|(h, w)| pad(h, *w))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(&header.bold().to_string());
    out.push('\n');
    let rule_len = widths.iter().sum::<usize>() + 2 * (widths.len() - 1);
    out.push_str(&"-".repeat(rule_len));
    out.push('\n');

    if rows.is_empty() {
        out.push_str(&"no users match".dimmed().to_string());
        out.push('\n');
    }
    for row in rows.iter() {
        let line = row
            .iter()
            .zip(widths.iter())
            .map(|(cell, w)| pad(cell, *w))
            .collect::<Vec<_>>()
            .join("  ");
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out.push('\n');
    out.push_str(&status_line(page));
    out.push('\n');
    out
}

fn status_line(page: &Page<'_>) -> String {
    let prev = if page.can_retreat {
        "<".bold().to_string()
    } else {
        "<".dimmed().to_string()
    };
    let next = if page.can_advance {
        ">".bold().to_string()
    } else {
        ">".dimmed().to_string()
    };
    let mut line = format!(
        "Rows per page: {}  {}  {} {}  page {}",
        page.page_size,
        range_label(page),
        prev,
        next,
        page.current_page
    );
    line.push_str(&format!("  scope: {}", page.scope.to_string().cyan()));
    if !page.term.is_empty() {
        line.push_str(&format!("  search: \"{}\"", page.term.yellow()));
    }
    line
}

pub fn render_json(page: &Page<'_>) -> Vec<u8> {
    serde_json::to_vec_pretty(page).unwrap_or_else(|_| b"{}\n".to_vec())
}

pub fn render(page: &Page<'_>, format: OutputFormat) -> Vec<u8> {
    match format {
        OutputFormat::Text => render_text(page).into_bytes(),
        OutputFormat::Json => {
            let mut out = render_json(page);
            out.push(b'\n');
            out
        }
    }
}
