//! Crossterm driver: raw-mode guard, incremental screen, animated step
//! sink and the interactive edit loop.

use std::io::{self, Stdout, Write};
use std::thread;
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor},
    terminal::{self, ClearType},
};

use gridwalk_core::{Context, Grid, Point, StepSink};

use crate::frame::Canvas;
use crate::{Config, Report, Session, describe};

/// Terminal rows above the grid reserved for the status line.
const STATUS_ROWS: u16 = 1;

/// Holds the terminal in raw mode on the alternate screen; restores it on
/// drop.
pub struct Terminal {
    mouse: bool,
}

impl Terminal {
    pub fn enter(mouse: bool) -> io::Result<Terminal> {
        terminal::enable_raw_mode()?;
        let mut guard = Terminal { mouse: false };
        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        if mouse {
            execute!(stdout, event::EnableMouseCapture)?;
            guard.mouse = true;
        }
        Ok(guard)
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        if self.mouse {
            let _ = execute!(stdout, event::DisableMouseCapture);
        }
        let _ = execute!(stdout, ResetColor, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// The grid area of the terminal plus a status line. Redraws only what
/// changed since the last draw.
pub struct Screen {
    out: Stdout,
    prev: Canvas,
}

impl Screen {
    pub fn new() -> Self {
        Self {
            out: io::stdout(),
            prev: Canvas::default(),
        }
    }

    pub fn draw(&mut self, grid: &Grid) -> io::Result<()> {
        let canvas = Canvas::render(grid);
        for (p, tone) in canvas.diff(&self.prev) {
            let (r, g, b) = tone.rgb();
            // Two columns per position keeps cells roughly square.
            queue!(
                self.out,
                cursor::MoveTo((p.x * 2) as u16, p.y as u16 + STATUS_ROWS),
                SetBackgroundColor(Color::Rgb { r, g, b }),
                Print("  ")
            )?;
        }
        queue!(self.out, ResetColor)?;
        self.out.flush()?;
        self.prev = canvas;
        Ok(())
    }

    pub fn status(&mut self, msg: &str) -> io::Result<()> {
        queue!(
            self.out,
            cursor::MoveTo(0, 0),
            terminal::Clear(ClearType::CurrentLine),
            Print(msg)
        )?;
        self.out.flush()
    }

    /// Forget what is on screen so the next draw repaints everything.
    pub fn invalidate(&mut self) -> io::Result<()> {
        self.prev = Canvas::default();
        execute!(self.out, terminal::Clear(ClearType::All))
    }

    /// The grid cell under terminal position (`column`, `row`).
    pub fn cell_at(&self, column: u16, row: u16) -> Option<Point> {
        let row = row.checked_sub(STATUS_ROWS)?;
        self.prev
            .cell_at(Point::new(i32::from(column) / 2, i32::from(row)))
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Drain pending input without blocking; true if the user asked to stop.
fn quit_requested() -> io::Result<bool> {
    while event::poll(Duration::ZERO)? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press && is_quit(&key) {
                return Ok(true);
            }
        }
    }
    Ok(false)
}

/// Animates each step: redraw the diff, pause, check for a quit key.
///
/// A quit key or a terminal error cancels the shared [`Context`]. The error
/// is kept and handed back by [`finish`](Self::finish).
pub struct TermSink<'a> {
    screen: &'a mut Screen,
    delay: Duration,
    ctx: Context,
    error: Option<io::Error>,
}

impl<'a> TermSink<'a> {
    pub fn new(screen: &'a mut Screen, delay: Duration, ctx: Context) -> Self {
        Self {
            screen,
            delay,
            ctx,
            error: None,
        }
    }

    pub fn finish(self) -> io::Result<()> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl StepSink for TermSink<'_> {
    fn step(&mut self, grid: &Grid) {
        if self.error.is_some() {
            return;
        }
        let res = self.screen.draw(grid).and_then(|()| {
            if !self.delay.is_zero() {
                thread::sleep(self.delay);
            }
            quit_requested()
        });
        match res {
            Ok(false) => {}
            Ok(true) => {
                log::debug!("run cancelled from the keyboard");
                self.ctx.cancel();
            }
            Err(e) => {
                self.error = Some(e);
                self.ctx.cancel();
            }
        }
    }
}

fn help(config: &Config) -> String {
    format!(
        "{} | {} | click: start, end, barriers  space: run  c: clear  q: quit",
        config.algorithm, config.generator
    )
}

/// Interactive session: click to place the start, the end and then
/// barriers; space runs the generator followed by the search; `c` clears
/// the board. Returns the report of the last completed run.
pub fn run_interactive(config: Config) -> Result<Option<Report>, Box<dyn std::error::Error>> {
    let mut session = Session::new(config);
    let _terminal = Terminal::enter(true)?;
    let mut screen = Screen::new();
    let ctx = Context::new();
    let mut last = None;

    screen.status(&help(&session.config))?;
    screen.draw(&session.grid)?;

    loop {
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if is_quit(&key) {
                    break;
                }
                match key.code {
                    KeyCode::Char(' ') | KeyCode::Enter => {
                        if !session.grid.is_ready() {
                            screen.status("place a start and an end first")?;
                            continue;
                        }
                        ctx.rearm();
                        let mut sink = TermSink::new(&mut screen, session.config.delay, ctx.clone());
                        let result = session.run(&mut sink, &ctx);
                        sink.finish()?;
                        let report = result?;
                        screen.draw(&session.grid)?;
                        screen.status(&format!(
                            "{} | c: clear  space: run again  q: quit",
                            describe(&report)
                        ))?;
                        last = Some(report);
                    }
                    KeyCode::Char('c') => {
                        session.clear();
                        screen.draw(&session.grid)?;
                        screen.status(&help(&session.config))?;
                    }
                    _ => {}
                }
            }
            Event::Mouse(me)
                if matches!(
                    me.kind,
                    MouseEventKind::Down(MouseButton::Left) | MouseEventKind::Drag(MouseButton::Left)
                ) =>
            {
                if let Some(p) = screen.cell_at(me.column, me.row) {
                    if session.grid.click(p) {
                        screen.draw(&session.grid)?;
                    }
                }
            }
            Event::Resize(..) => {
                screen.invalidate()?;
                screen.status(&help(&session.config))?;
                screen.draw(&session.grid)?;
            }
            _ => {}
        }
    }
    Ok(last)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn quit_keys() {
        assert!(is_quit(&key(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(is_quit(&key(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(is_quit(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!is_quit(&key(KeyCode::Char('c'), KeyModifiers::NONE)));
        assert!(!is_quit(&key(KeyCode::Char(' '), KeyModifiers::NONE)));
    }

    #[test]
    fn screen_maps_clicks_to_cells() {
        let mut screen = Screen::new();
        let g = Grid::new(3, 4, 1);
        screen.prev = Canvas::render(&g);
        assert_eq!(screen.cell_at(0, 0), None);
        assert_eq!(screen.cell_at(0, 1), Some(Point::at(0, 0)));
        assert_eq!(screen.cell_at(7, 3), Some(Point::at(2, 3)));
        assert_eq!(screen.cell_at(8, 1), None);
    }
}
