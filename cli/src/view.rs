//! Terminal rendering of the post list.

use std::io::{self, Write};

use parking_lot::Mutex;
use posts_core::{rows, Post, PostRow, ViewRenderer};
use tracing::warn;

/// Writes each render as a fresh block of rows.
pub struct TerminalRenderer<W> {
    out: Mutex<W>,
}

impl TerminalRenderer<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out: Mutex::new(out) }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

impl<W: Write + Send> ViewRenderer for TerminalRenderer<W> {
    fn render(&self, posts: &[Post]) {
        let mut out = self.out.lock();
        if let Err(e) = write_rows(&mut *out, &rows(posts)) {
            warn!(error = %e, "failed to write posts");
        }
    }
}

fn write_rows(out: &mut impl Write, rows: &[PostRow]) -> io::Result<()> {
    writeln!(out, "=== {} post(s) ===", rows.len())?;
    for row in rows {
        writeln!(out, "{}", row.title)?;
        writeln!(out, "  author:  {}", row.author)?;
        writeln!(out, "  date:    {}", row.date)?;
        writeln!(out, "  {}", row.content)?;
        let controls: Vec<String> = row
            .controls
            .iter()
            .map(|c| format!("[{} {}]", c.label(), c.id()))
            .collect();
        writeln!(out, "  {}", controls.join(" "))?;
    }
    out.flush()
}
