//! Sources of operator tokens.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Supplies the next requested activity while the machine is idle.
pub trait CommandSource {
    /// Blocking read of one token.
    ///
    /// `Ok(None)` means the source is exhausted and no more commands will
    /// arrive.
    fn next_token(&mut self) -> io::Result<Option<String>>;
}

impl<S: CommandSource + ?Sized> CommandSource for &mut S {
    fn next_token(&mut self) -> io::Result<Option<String>> {
        (**self).next_token()
    }
}

/// Pre-recorded tokens, handed out in order.
///
/// # Example
///
/// ```rust
/// use operator_fsm::effects::{CommandSource, ScriptedCommands};
///
/// let mut source = ScriptedCommands::new(["MOVEMENT", "SHOOTING"]);
/// assert_eq!(source.next_token().unwrap().as_deref(), Some("MOVEMENT"));
/// assert_eq!(source.remaining(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScriptedCommands {
    tokens: VecDeque<String>,
}

impl ScriptedCommands {
    pub fn new<I, T>(tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
        }
    }

    pub fn push(&mut self, token: impl Into<String>) {
        self.tokens.push_back(token.into());
    }

    pub fn remaining(&self) -> usize {
        self.tokens.len()
    }
}

impl CommandSource for ScriptedCommands {
    fn next_token(&mut self) -> io::Result<Option<String>> {
        Ok(self.tokens.pop_front())
    }
}

/// Menu shown to the operator before each read.
pub const MENU: [&str; 4] = ["1.IDLE", "2.MOVEMENT", "3.SHOOTING", "4.CALCULATION"];

/// Interactive source reading whitespace-separated tokens from a reader.
///
/// The menu and a `Choose process: ` prompt are written before every line
/// read. Several tokens on one line are handed out one per call without
/// prompting again.
pub struct LineCommands<R, W> {
    reader: R,
    prompt: W,
    pending: VecDeque<String>,
}

impl<R: BufRead, W: Write> LineCommands<R, W> {
    pub fn new(reader: R, prompt: W) -> Self {
        Self {
            reader,
            prompt,
            pending: VecDeque::new(),
        }
    }

    fn show_menu(&mut self) -> io::Result<()> {
        for entry in MENU {
            writeln!(self.prompt, "{entry}")?;
        }
        write!(self.prompt, "Choose process: ")?;
        self.prompt.flush()
    }
}

impl<R: BufRead, W: Write> CommandSource for LineCommands<R, W> {
    fn next_token(&mut self) -> io::Result<Option<String>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }
            self.show_menu()?;
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_string));
        }
    }
}
