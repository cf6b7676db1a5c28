//! JSON-lines turn log.
use std::collections::BTreeMap;
use std::io::{BufWriter, Write};

use navigator::{Action, Position};
use serde::{Serialize, Serializer};

use crate::error::Result;

/// One line of the turn log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TurnRecord {
    /// Batch run this turn belongs to.
    pub run: u64,
    pub turn: u64,
    /// World position before the action.
    pub position: Position,
    /// Percept keyed by bearing (`N`..`NW`) plus `X` for the current cell.
    pub percept: BTreeMap<&'static str, String>,
    /// Written as the action symbol (`N`, `S`, `E`, `W` or `U`).
    #[serde(serialize_with = "action_symbol")]
    pub action: Action,
    pub reached_goal: bool,
}

fn action_symbol<S>(action: &Action, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(action.symbol())
}

pub struct TurnLog {
    writer: BufWriter<Box<dyn Write + Send>>,
}

impl TurnLog {
    pub fn new<W>(writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self {
            writer: BufWriter::new(Box::new(writer)),
        }
    }

    pub fn record(&mut self, record: &TurnRecord) -> Result<()> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

impl std::fmt::Debug for TurnLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TurnLog").finish_non_exhaustive()
    }
}
