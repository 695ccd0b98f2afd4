//! Terminal output for reports
//!
//! Plain fixed-width text; section headers are colored when enabled.

use certstat_common::{ColorMode, CountTable};
use owo_colors::OwoColorize;
use std::fmt::Display;
use std::io::{self, IsTerminal, Write};

pub struct Printer<W: Write> {
    out: W,
    color: bool,
}

impl Printer<io::Stdout> {
    pub fn stdout(mode: ColorMode) -> Self {
        let color = match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => io::stdout().is_terminal(),
        };
        Self::new(io::stdout(), color)
    }
}

impl<W: Write> Printer<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    /// Report section title, preceded by a blank line
    pub fn section(&mut self, title: &str) -> io::Result<()> {
        writeln!(self.out)?;
        if self.color {
            writeln!(self.out, "{}", title.bold().cyan())
        } else {
            writeln!(self.out, "{}", title)
        }
    }

    pub fn line(&mut self, text: impl Display) -> io::Result<()> {
        writeln!(self.out, "{}", text)
    }

    /// A percentage followed by what it measures
    pub fn stat(&mut self, pct: f64, decimals: usize, description: &str) -> io::Result<()> {
        writeln!(self.out, "{:.decimals$} {}", pct, description)
    }

    pub fn warning(&mut self, text: impl Display) -> io::Result<()> {
        if self.color {
            writeln!(self.out, "[WARNING] {}", text.to_string().yellow())
        } else {
            writeln!(self.out, "[WARNING] {}", text)
        }
    }

    pub fn table<K: Display>(&mut self, table: &CountTable<K>, key_header: &str) -> io::Result<()> {
        write!(self.out, "{}", table.render(key_header))
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
