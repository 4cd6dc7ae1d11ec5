use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue, terminal,
};
use sparselife::{Cell, GameOfLife};
use std::{
    io::{self, Write},
    time::Duration,
};

pub enum ConsoleCommand {
    Exit,
    TogglePause,
    Step,
    Handled,
}

/// Terminal renderer, holds the terminal in raw mode until dropped
pub struct ConsoleRender {
    tl: Cell,
}
impl ConsoleRender {
    pub fn new() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(io::stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;
        Ok(Self { tl: Cell::zero() })
    }

    pub fn render(&self, game: &GameOfLife, paused: bool) -> io::Result<()> {
        let (cols, rows) = terminal::size()?;
        // last row is the footer
        let board_rows = rows.saturating_sub(1);
        let br = self.tl.translate(i64::from(cols), i64::from(board_rows));

        let mut stdout = io::stdout();
        queue!(stdout, terminal::Clear(terminal::ClearType::All))?;
        for cell in game.window(self.tl, br).iter() {
            let cell = cell - self.tl;
            queue!(stdout, cursor::MoveTo(cell.x as u16, cell.y as u16))?;
            stdout.write_all("█".as_bytes())?;
        }

        let footer = format!(
            "gen:{} alive:{} origin:({}, {}){}",
            game.generation(),
            game.alive_count(),
            self.tl.x,
            self.tl.y,
            if paused { " [paused]" } else { "" }
        );
        queue!(stdout, cursor::MoveTo(0, board_rows))?;
        stdout.write_all(footer.as_bytes())?;

        stdout.flush()
    }

    /// Waits up to `timeout` for a key press and applies panning keys
    pub fn poll_events(&mut self, timeout: Duration) -> io::Result<Option<ConsoleCommand>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            ..
        }) = event::read()?
        else {
            return Ok(Some(ConsoleCommand::Handled));
        };

        let command = match code {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => ConsoleCommand::Exit,
            KeyCode::Char('q') | KeyCode::Esc => ConsoleCommand::Exit,
            KeyCode::Char(' ') => ConsoleCommand::TogglePause,
            KeyCode::Char('n') => ConsoleCommand::Step,
            KeyCode::Up => self.pan(0, -1),
            KeyCode::Down => self.pan(0, 1),
            KeyCode::Left => self.pan(-1, 0),
            KeyCode::Right => self.pan(1, 0),
            _ => ConsoleCommand::Handled,
        };
        Ok(Some(command))
    }

    fn pan(&mut self, dx: i64, dy: i64) -> ConsoleCommand {
        self.tl = self.tl.translate(dx, dy);
        ConsoleCommand::Handled
    }
}
impl Drop for ConsoleRender {
    fn drop(&mut self) {
        let restored = terminal::disable_raw_mode().and_then(|()| {
            execute!(io::stdout(), cursor::Show, terminal::LeaveAlternateScreen)
        });
        if let Err(err) = restored {
            tracing::error!(%err, "failed to restore terminal");
        }
    }
}
