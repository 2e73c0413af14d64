use super::{CommandSource, TransportCommand};

/// Source that never yields a command, for drivers without interactive input.
#[derive(Default, Debug, Clone, Copy)]
pub struct NoCommands;

impl NoCommands {
    pub const fn new() -> Self {
        Self
    }
}

impl CommandSource for NoCommands {
    type Error = core::convert::Infallible;

    fn poll_command(&mut self) -> Result<Option<TransportCommand>, Self::Error> {
        Ok(None)
    }
}

/// Replays a fixed list of commands once, in order.
#[derive(Debug, Clone)]
pub struct ScriptedCommands<'a> {
    commands: &'a [TransportCommand],
    cursor: usize,
}

impl<'a> ScriptedCommands<'a> {
    pub const fn new(commands: &'a [TransportCommand]) -> Self {
        Self {
            commands,
            cursor: 0,
        }
    }

    pub fn remaining(&self) -> usize {
        self.commands.len().saturating_sub(self.cursor)
    }
}

impl CommandSource for ScriptedCommands<'_> {
    type Error = core::convert::Infallible;

    fn poll_command(&mut self) -> Result<Option<TransportCommand>, Self::Error> {
        let Some(command) = self.commands.get(self.cursor).copied() else {
            return Ok(None);
        };
        self.cursor = self.cursor.saturating_add(1);
        Ok(Some(command))
    }
}
