use std::io::{self, IsTerminal, Write};

use unicode_width::UnicodeWidthStr;

use crate::config::Config;
use crate::task;

#[derive(Debug, Clone)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(cfg: &Config) -> anyhow::Result<Self> {
        let color = cfg.get_bool("color")?.unwrap_or(true);

        Ok(Self { color })
    }

    #[tracing::instrument(skip(self, entries))]
    pub fn print_task_table(&mut self, entries: &[String]) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();
        self.write_task_table(&mut out, entries)
    }

    pub fn write_task_table<W: Write>(
        &self,
        writer: W,
        entries: &[String],
    ) -> anyhow::Result<()> {
        let headers = vec![
            "#".to_string(),
            "Done".to_string(),
            "Added".to_string(),
            "Task".to_string(),
        ];

        let mut rows = Vec::with_capacity(entries.len());
        for (idx, entry) in entries.iter().enumerate() {
            let parts = task::parts(entry);
            let index = self.paint(&(idx + 1).to_string(), "33");
            let done = if parts.completed {
                self.paint("✓", "32")
            } else {
                String::new()
            };
            let stamp = parts.stamp.unwrap_or_default().to_string();
            rows.push(vec![index, done, stamp, parts.text.to_string()]);
        }

        write_table(writer, headers, rows)
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if !self.color || !io::stdout().is_terminal() {
            return text.to_string();
        }
        format!("\x1b[{code}m{text}\x1b[0m")
    }
}

fn write_table<W: Write>(
    mut writer: W,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
) -> anyhow::Result<()> {
    let column_count = headers.len();
    let mut widths = vec![0usize; column_count];

    for (idx, header) in headers.iter().enumerate() {
        widths[idx] = widths[idx].max(UnicodeWidthStr::width(header.as_str()));
    }

    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(UnicodeWidthStr::width(strip_ansi(cell).as_str()));
        }
    }

    for idx in 0..column_count {
        write!(writer, "{:width$} ", headers[idx], width = widths[idx])?;
    }
    writeln!(writer)?;

    for idx in 0..column_count {
        write!(writer, "{:-<width$} ", "", width = widths[idx])?;
    }
    writeln!(writer)?;

    for row in rows {
        for idx in 0..column_count {
            let cell = &row[idx];
            let visible_width = UnicodeWidthStr::width(strip_ansi(cell).as_str());
            let padding = widths[idx].saturating_sub(visible_width);
            write!(writer, "{}{} ", cell, " ".repeat(padding))?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut escaped = false;

    for ch in s.chars() {
        if escaped {
            if ch == 'm' {
                escaped = false;
            }
            continue;
        }

        if ch == '\x1b' {
            escaped = true;
            continue;
        }

        out.push(ch);
    }

    out
}
