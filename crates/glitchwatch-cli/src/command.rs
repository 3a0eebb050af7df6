//! Player commands typed on stdin.

use thiserror::Error;

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Leave the title screen.
    Start,
    /// Load a module from the hub.
    Scene(String),
    /// Click a hotspot.
    Click(String),
    /// Skip or close the dialogue box.
    Next,
    /// Pick a quiz option, zero-based.
    Answer(usize),
    /// Close the mission report.
    Close,
    /// Back to the hub.
    Home,
    /// Back to the title screen with progress wiped.
    Restart,
    /// Simulate backgrounding the host.
    Pause,
    /// Come back from the background.
    Resume,
    /// Print the engine snapshot as JSON.
    Status,
    /// Print the command list.
    Help,
    /// Exit.
    Quit,
}

/// Why a line could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// Unrecognised verb.
    #[error("unknown command '{0}', try 'help'")]
    Unknown(String),
    /// A verb that needs an argument got none.
    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),
    /// `answer` with something other than a positive number.
    #[error("'{0}' is not an option number")]
    InvalidOption(String),
}

/// Lines printed by `help`.
pub const HELP: &str = "\
start            leave the title screen
scene <id>       load a module from the hub
click <id>       click a hotspot
next | <enter>   skip typing or close the dialogue box
answer <n>       pick quiz option n (1-based)
close            close the mission report
home             back to the hub
restart          back to the title screen, progress wiped
pause | resume   simulate backgrounding
status           print the engine snapshot
quit             exit";

impl Command {
    /// Parses one input line. Verbs are case-insensitive; a blank line is
    /// `next`.
    ///
    /// # Errors
    ///
    /// Returns `CommandError` if the verb is unknown or an argument is
    /// missing or malformed.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(Self::Next);
        };
        let arg = words.next();

        match verb.to_ascii_lowercase().as_str() {
            "start" => Ok(Self::Start),
            "scene" | "go" => arg
                .map(|id| Self::Scene(id.to_owned()))
                .ok_or(CommandError::MissingArgument("scene")),
            "click" | "c" => arg
                .map(|id| Self::Click(id.to_owned()))
                .ok_or(CommandError::MissingArgument("click")),
            "next" | "n" => Ok(Self::Next),
            "answer" | "a" => {
                let raw = arg.ok_or(CommandError::MissingArgument("answer"))?;
                match raw.parse::<usize>() {
                    Ok(n) if n > 0 => Ok(Self::Answer(n - 1)),
                    _ => Err(CommandError::InvalidOption(raw.to_owned())),
                }
            }
            "close" => Ok(Self::Close),
            "home" => Ok(Self::Home),
            "restart" => Ok(Self::Restart),
            "pause" => Ok(Self::Pause),
            "resume" => Ok(Self::Resume),
            "status" => Ok(Self::Status),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            other => Err(CommandError::Unknown(other.to_owned())),
        }
    }
}
