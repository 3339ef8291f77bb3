//! One game's conversation with the engine.
//!
//! The session keeps the halite map between turns, since the engine only
//! sends the cells that changed, and turns each frame into a [`Snapshot`].

use std::io::{BufRead, Write};

use prospector_core::prelude::*;

use crate::protocol::{self, GameStart, LineReader, Result};

/// A live game over an input and an output stream.
#[derive(Debug)]
pub struct Session<R, W> {
    reader: LineReader<R>,
    writer: W,
    start: GameStart,
    map: GameMap,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Read the handshake and open the session.
    pub fn handshake(input: R, output: W) -> Result<Self> {
        let mut reader = LineReader::new(input);
        let start = protocol::read_game_start(&mut reader)?;
        tracing::debug!(
            players = start.shipyards.len(),
            width = start.map.width(),
            height = start.map.height(),
            "Handshake received"
        );
        let map = start.map.clone();
        Ok(Self {
            reader,
            writer: output,
            start,
            map,
        })
    }

    /// Handshake data: constants, ids, shipyards, and the initial map.
    pub const fn game_start(&self) -> &GameStart {
        &self.start
    }

    /// This bot's player id.
    pub const fn my_id(&self) -> PlayerId {
        self.start.my_id
    }

    /// Announce the bot's name; the engine starts sending turns after this.
    pub fn ready(&mut self, name: &str) -> Result<()> {
        writeln!(self.writer, "{name}")?;
        self.writer.flush()?;
        Ok(())
    }

    /// Read the next turn.
    ///
    /// Returns `None` when input ends between turns, which is how the
    /// engine signals game over.
    pub fn receive_snapshot(&mut self) -> Result<Option<Snapshot>> {
        let Some(frame) = protocol::read_frame(&mut self.reader, self.start.shipyards.len())?
        else {
            return Ok(None);
        };

        for &(pos, halite) in &frame.updates {
            self.map.set_halite(pos, halite);
        }

        let mut players = Vec::with_capacity(frame.players.len());
        for entry in frame.players {
            let known = self.start.shipyards.iter().find(|(id, _)| *id == entry.id);
            let Some(&(_, shipyard)) = known else {
                tracing::warn!(
                    player = %entry.id,
                    "Frame lists a player missing from the handshake"
                );
                continue;
            };
            let mut player = Player::new(entry.id, shipyard, entry.halite);
            player.ships = entry.ships;
            players.push(player);
        }

        let snapshot = Snapshot::new(
            frame.turn,
            self.start.my_id,
            players,
            self.map.clone(),
            self.start.constants,
        )?;
        Ok(Some(snapshot))
    }

    /// Send one turn's commands.
    ///
    /// Returns `false` if the engine is gone (write or flush failed), which
    /// ends the game like end of input does.
    pub fn submit(&mut self, commands: &[Command]) -> bool {
        let line = protocol::encode_commands(commands);
        match writeln!(self.writer, "{line}").and_then(|()| self.writer.flush()) {
            Ok(()) => true,
            Err(e) => {
                tracing::info!(error = %e, "Engine closed the command channel");
                false
            }
        }
    }

    /// Give back the output stream.
    pub fn into_writer(self) -> W {
        self.writer
    }
}
