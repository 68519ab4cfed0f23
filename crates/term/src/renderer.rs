//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! A frame is written as horizontal runs of cells. The first frame (and any
//! frame after a resize or [`TerminalRenderer::invalidate`]) is one run per
//! row; after that only the runs that differ from the previous frame go out.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    style::{
        self, Attribute, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer, Rgb};

impl From<Rgb> for style::Color {
    fn from(rgb: Rgb) -> Self {
        style::Color::Rgb {
            r: rgb.r,
            g: rgb.g,
            b: rgb.b,
        }
    }
}

/// Horizontal span of cells: start column, row, and width
type Run = (u16, u16, u16);

pub struct TerminalRenderer {
    stdout: io::Stdout,
    /// The frame currently on screen, if it can be diffed against
    shown: Option<FrameBuffer>,
    scratch: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            shown: None,
            scratch: Vec::with_capacity(32 * 1024),
        }
    }

    /// Raw mode, alternate screen, and mouse capture for gestures
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.scratch.clear();
        self.scratch
            .queue(terminal::EnterAlternateScreen)?
            .queue(EnableMouseCapture)?
            .queue(cursor::Hide)?
            .queue(terminal::DisableLineWrap)?;
        self.flush()
    }

    /// Undo [`enter`](Self::enter) in reverse order
    pub fn exit(&mut self) -> Result<()> {
        self.scratch.clear();
        reset_style(&mut self.scratch)?;
        self.scratch
            .queue(terminal::EnableLineWrap)?
            .queue(cursor::Show)?
            .queue(DisableMouseCapture)?
            .queue(terminal::LeaveAlternateScreen)?;
        self.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Next draw repaints everything
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Draw `fb` and hand back the previous frame in its place
    ///
    /// The caller renders into whatever buffer comes back, so two buffers
    /// alternate between caller and renderer and nothing is cloned.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.scratch.clear();
        let mut spare = match self.shown.take() {
            Some(prev) if same_size(&prev, fb) => {
                encode_diff_into(&prev, fb, &mut self.scratch)?;
                prev
            }
            stale => {
                encode_full_into(fb, &mut self.scratch)?;
                let mut spare = stale.unwrap_or_else(|| FrameBuffer::new(0, 0));
                spare.resize(fb.width(), fb.height());
                spare
            }
        };
        self.flush()?;

        std::mem::swap(&mut spare, fb);
        self.shown = Some(spare);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout.write_all(&self.scratch)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Encode a clear followed by every row of `fb` into `out`
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let rows = (0..fb.height()).map(|y| (0, y, fb.width()));
    write_runs(fb, rows, out)
}

/// Encode only the cells of `next` that differ from `prev` into `out`
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    write_runs(next, changed_runs(prev, next), out)
}

/// Write each run of `fb`, emitting style changes only where the style differs
fn write_runs(
    fb: &FrameBuffer,
    runs: impl IntoIterator<Item = Run>,
    out: &mut Vec<u8>,
) -> Result<()> {
    let mut active: Option<CellStyle> = None;
    for (x, y, len) in runs {
        out.queue(cursor::MoveTo(x, y))?;
        for cell in (x..x + len).map(|cx| fb.get(cx, y).unwrap_or_default()) {
            if active != Some(cell.style) {
                set_style(out, cell.style)?;
                active = Some(cell.style);
            }
            out.queue(Print(cell.ch))?;
        }
    }
    reset_style(out)
}

fn set_style(out: &mut Vec<u8>, cell: CellStyle) -> Result<()> {
    out.queue(SetForegroundColor(cell.fg.into()))?
        .queue(SetBackgroundColor(cell.bg.into()))?
        .queue(SetAttribute(Attribute::Reset))?;
    if cell.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if cell.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn reset_style(out: &mut Vec<u8>) -> Result<()> {
    out.queue(ResetColor)?.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn same_size(a: &FrameBuffer, b: &FrameBuffer) -> bool {
    (a.width(), a.height()) == (b.width(), b.height())
}

/// Runs of cells that differ; whole rows when the sizes do not match
fn changed_runs(prev: &FrameBuffer, next: &FrameBuffer) -> Vec<Run> {
    let (w, h) = (next.width(), next.height());
    if !same_size(prev, next) {
        return (0..h).map(|y| (0, y, w)).collect();
    }

    let mut runs = Vec::new();
    for y in 0..h {
        let mut start = None;
        for x in 0..=w {
            let differs = x < w && prev.get(x, y) != next.get(x, y);
            match (differs, start) {
                (true, None) => start = Some(x),
                (false, Some(s)) => {
                    runs.push((s, y, x - s));
                    start = None;
                }
                _ => {}
            }
        }
    }
    runs
}
