//! Terminal redraw of the world between turns.
use std::io::{self, Write};
use std::time::Duration;

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use navigator::{Action, Position};

use crate::error::Result;
use crate::world::World;

#[derive(Clone, Debug)]
pub struct TerminalDisplay {
    frame_delay: Duration,
}

impl TerminalDisplay {
    pub fn new(frame_delay: Duration) -> Self {
        Self { frame_delay }
    }

    /// Clears the screen, draws one frame and blocks for the frame delay.
    pub fn draw(&mut self, world: &World, agent: Position, turn: u64, action: Action) -> Result<()> {
        let mut out = io::stdout().lock();
        queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
        write!(out, "{}", world.render(agent))?;
        writeln!(out, "turn {turn}: {action}")?;
        out.flush()?;
        drop(out);

        if !self.frame_delay.is_zero() {
            std::thread::sleep(self.frame_delay);
        }
        Ok(())
    }
}
