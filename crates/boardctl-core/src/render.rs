use std::io::{self, IsTerminal, Write};

use anyhow::anyhow;
use unicode_width::UnicodeWidthStr;

use crate::api::SyncOutcome;
use crate::config::Config;
use crate::model::TaskBlock;
use crate::view::BoardView;

#[derive(Debug, Clone)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(cfg: &Config) -> anyhow::Result<Self> {
        let color_cfg = cfg.get("color").unwrap_or_else(|| "on".to_string());
        let color = match color_cfg.to_ascii_lowercase().as_str() {
            "on" | "yes" | "true" | "1" => true,
            "off" | "no" | "false" | "0" => false,
            other => return Err(anyhow!("invalid color setting: {other}")),
        };

        Ok(Self { color })
    }

    #[tracing::instrument(skip(self, out, boards))]
    pub fn print_boards<W: Write>(
        &mut self,
        out: &mut W,
        boards: &[crate::model::Board],
    ) -> anyhow::Result<()> {
        let headers = vec!["ID".to_string(), "Name".to_string()];
        let rows = boards
            .iter()
            .map(|board| vec![self.paint(&board.id.to_string(), "33"), board.name.clone()])
            .collect();

        write_table(out, headers, rows)?;
        Ok(())
    }

    #[tracing::instrument(skip(self, out, view), fields(title = %view.title))]
    pub fn print_board<W: Write>(&mut self, out: &mut W, view: &BoardView) -> anyhow::Result<()> {
        writeln!(out, "{}", self.paint(&view.title, "1"))?;

        for column in &view.columns {
            writeln!(out)?;
            writeln!(out, "{}", self.paint(&column.name, "36"))?;
            writeln!(
                out,
                "{:-<width$}",
                "",
                width = UnicodeWidthStr::width(column.name.as_str())
            )?;

            for card in &column.cards {
                writeln!(out, "{}", card.title)?;
                writeln!(out, "  {}", card.description)?;
            }
        }

        Ok(())
    }

    #[tracing::instrument(skip(self, out, blocks))]
    pub fn print_blocks<W: Write>(
        &mut self,
        out: &mut W,
        blocks: &[TaskBlock],
    ) -> anyhow::Result<()> {
        if blocks.is_empty() {
            writeln!(out, "Nenhum bloco de tarefas.")?;
            return Ok(());
        }

        for (block_idx, block) in blocks.iter().enumerate() {
            if block_idx > 0 {
                writeln!(out)?;
            }
            let label = format!("{}. {}", block_idx + 1, block.title);
            writeln!(out, "{}", self.paint(&label, "1"))?;

            for (task_idx, task) in block.tasks.iter().enumerate() {
                writeln!(out, "  {}. {}", task_idx + 1, task)?;
            }
        }

        Ok(())
    }

    #[tracing::instrument(skip(self, out, outcome))]
    pub fn print_sync_outcome<W: Write>(
        &mut self,
        out: &mut W,
        outcome: &SyncOutcome,
    ) -> anyhow::Result<()> {
        match outcome {
            SyncOutcome::Accepted(_) => {
                writeln!(out, "Dados enviados para a API.")?;
            }
            SyncOutcome::Failed(reason) => {
                let line = format!("Erro ao enviar dados para a API: {reason}");
                writeln!(out, "{}", self.paint(&line, "31"))?;
            }
        }
        Ok(())
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
    let mut widths: Vec<usize> = headers
        .iter()
        .map(|header| UnicodeWidthStr::width(header.as_str()))
        .collect();

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
        for (idx, cell) in row.iter().enumerate() {
            let visible = UnicodeWidthStr::width(strip_ansi(cell).as_str());
            let padding = widths[idx].saturating_sub(visible);
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
