//! Crossterm front end
//!
//! Rasterises frames into a character grid, maps terminal events to session
//! input, and paces the frame loop. Input and `advance` run on one thread, so
//! the session never sees them interleave.

use std::io::{self, Write};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind},
    execute, queue,
    style::Print,
    terminal::{self, ClearType},
};
use glam::Vec2;

use crate::render::{Frame, Renderer};
use crate::session::GameSession;
use crate::sim::{Aabb, GamePhase, WingPose, autopilot};

const OBSTACLE_CHAR: char = '#';

// ── Rasteriser ──────────────────────────────────────────────────────────────

/// Grid size that fits the playfield into the terminal
///
/// Terminal cells are roughly twice as tall as they are wide.
pub fn grid_size(cols: u16, rows: u16, playfield: Vec2) -> (usize, usize) {
    let cols = cols.max(1) as f32;
    let rows = rows.max(1) as f32;
    let aspect = playfield.x / playfield.y * 2.0;

    let mut h = rows;
    let mut w = (h * aspect).round();
    if w > cols {
        w = cols;
        h = (w / aspect).round().clamp(1.0, rows);
    }
    (w.max(1.0) as usize, h as usize)
}

fn avatar_char(pose: WingPose) -> char {
    match pose {
        WingPose::Up => '^',
        WingPose::Mid => '>',
        WingPose::Down => 'v',
    }
}

/// Cells whose centre lies in `lo..hi`, as a half-open index range
fn cell_span(lo: f32, hi: f32, scale: f32, len: usize) -> (usize, usize) {
    let start = (lo * scale - 0.5).ceil().clamp(0.0, len as f32);
    let end = (hi * scale - 0.5).ceil().clamp(0.0, len as f32);
    (start as usize, end as usize)
}

fn fill(grid: &mut [Vec<char>], b: &Aabb, scale: Vec2, ch: char) {
    let h = grid.len();
    let w = grid.first().map_or(0, Vec::len);
    let (x0, x1) = cell_span(b.left(), b.right(), scale.x, w);
    let (y0, y1) = cell_span(b.top(), b.bottom(), scale.y, h);
    for row in &mut grid[y0..y1.max(y0)] {
        for cell in &mut row[x0..x1.max(x0)] {
            *cell = ch;
        }
    }
}

fn put_centered(grid: &mut [Vec<char>], row: usize, text: &str) {
    let Some(line) = grid.get_mut(row) else {
        return;
    };
    let w = line.len();
    let chars: Vec<char> = text.chars().take(w).collect();
    let start = (w - chars.len()) / 2;
    line[start..start + chars.len()].copy_from_slice(&chars);
}

/// Place each score digit at the centre of its HUD cell
fn put_score(grid: &mut [Vec<char>], frame: &Frame, scale: Vec2) {
    for (digit, cell) in frame.score_digits() {
        let centre = (cell.min + cell.max) / 2.0 * scale;
        let (col, row) = (centre.x as usize, centre.y as usize);
        if let Some(slot) = grid.get_mut(row).and_then(|line| line.get_mut(col)) {
            *slot = char::from(b'0' + digit);
        }
    }
}

/// Draw a frame into a `w` × `h` character grid
pub fn rasterize(frame: &Frame, w: usize, h: usize) -> Vec<String> {
    let mut grid = vec![vec![' '; w]; h];
    let scale = Vec2::new(w as f32, h as f32) / frame.playfield;

    for sprite in &frame.obstacles {
        fill(&mut grid, &sprite.top, scale, OBSTACLE_CHAR);
        fill(&mut grid, &sprite.bottom, scale, OBSTACLE_CHAR);
    }
    fill(&mut grid, &frame.avatar, scale, avatar_char(frame.pose));

    match frame.phase {
        GamePhase::Ready => {
            put_centered(&mut grid, h * 3 / 4, "PRESS ANY KEY");
        }
        GamePhase::Running => {
            put_score(&mut grid, frame, scale);
        }
        GamePhase::Ended => {
            put_score(&mut grid, frame, scale);
            put_centered(&mut grid, h / 3, "GAME OVER");
            let summary = format!("SCORE {}  BEST {}", frame.score, frame.best_score);
            put_centered(&mut grid, h / 3 + 2, &summary);
            put_centered(&mut grid, h / 3 + 4, "PRESS ANY KEY TO RESTART");
        }
    }

    grid.into_iter().map(|row| row.into_iter().collect()).collect()
}

// ── Renderer ────────────────────────────────────────────────────────────────

/// Draws frames to a terminal
pub struct TerminalRenderer<W: Write> {
    out: W,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn draw(&mut self, frame: &Frame) -> Result<()> {
        let (cols, rows) = terminal::size()?;
        let (w, h) = grid_size(cols, rows, frame.playfield);
        let pad = (cols as usize).saturating_sub(w) / 2;

        for (y, line) in rasterize(frame, w, h).iter().enumerate() {
            queue!(
                self.out,
                cursor::MoveTo(pad as u16, y as u16),
                Print(line),
            )?;
        }
        self.out.flush()?;
        Ok(())
    }
}

// ── Input ───────────────────────────────────────────────────────────────────

/// What the host loop should do with a terminal event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostAction {
    Activate,
    Quit,
    Redraw,
    Ignore,
}

/// Map a terminal event; every key press and mouse press is an activate
pub fn classify(event: &Event) -> HostAction {
    match event {
        Event::Key(KeyEvent {
            code, modifiers, kind, ..
        }) => {
            if *kind == KeyEventKind::Release {
                return HostAction::Ignore;
            }
            match code {
                KeyCode::Char('q') | KeyCode::Esc => HostAction::Quit,
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => HostAction::Quit,
                _ if *kind == KeyEventKind::Repeat => HostAction::Ignore,
                _ => HostAction::Activate,
            }
        }
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::Down(_) => HostAction::Activate,
            _ => HostAction::Ignore,
        },
        Event::Resize(..) => HostAction::Redraw,
        _ => HostAction::Ignore,
    }
}

// ── Host loop ───────────────────────────────────────────────────────────────

/// Raw mode + alternate screen for the lifetime of the guard
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(
            io::stdout(),
            terminal::EnterAlternateScreen,
            event::EnableMouseCapture,
            cursor::Hide,
            terminal::DisableLineWrap,
            terminal::Clear(ClearType::All),
        )?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(
            io::stdout(),
            terminal::LeaveAlternateScreen,
            event::DisableMouseCapture,
            cursor::Show,
            terminal::EnableLineWrap,
        );
        let _ = terminal::disable_raw_mode();
    }
}

/// Run the session interactively until the player quits
///
/// With `demo` set the autopilot flaps; any key still quits or restarts.
pub fn run(session: &mut GameSession, fps: u32, demo: bool) -> Result<()> {
    let _guard = TerminalGuard::enter()?;
    let frame_dur = Duration::from_secs_f64(1.0 / fps.max(1) as f64);

    loop {
        let frame_start = Instant::now();

        // Input
        while event::poll(Duration::ZERO)? {
            match classify(&event::read()?) {
                HostAction::Quit => {
                    log::info!("Quit with score {}", session.score());
                    return Ok(());
                }
                HostAction::Activate => session.on_input(),
                HostAction::Redraw => {
                    execute!(io::stdout(), terminal::Clear(ClearType::All))?;
                }
                HostAction::Ignore => {}
            }
        }
        if demo && autopilot::wants_flap(session.state()) {
            session.on_input();
        }

        // Update + render
        session.advance();

        // Frame pacing
        let elapsed = frame_start.elapsed();
        if elapsed < frame_dur {
            thread::sleep(frame_dur - elapsed);
        }
    }
}
