//! Clipboard output for copy actions.
//!
//! [`CommandClipboard`] pipes text into the first clipboard utility that is
//! installed. When none works, [`copy_with_fallback`] prints the text instead
//! so the copy action never loses its content.

use std::io::{self, Write};
use std::process::{Command, Stdio};

use tracing::{debug, warn};

/// A single "write text" operation.
pub trait Clipboard {
    fn write_text(&self, text: &str) -> Result<(), String>;
}

/// Clipboard backed by external commands, tried in order.
#[derive(Debug, Clone)]
pub struct CommandClipboard {
    commands: Vec<(String, Vec<String>)>,
}

/// Wayland, X11 (two tools), macOS, Windows/WSL.
const DEFAULT_COMMANDS: &[(&str, &[&str])] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
    ("pbcopy", &[]),
    ("clip.exe", &[]),
];

impl Default for CommandClipboard {
    fn default() -> Self {
        Self {
            commands: DEFAULT_COMMANDS
                .iter()
                .map(|(cmd, args)| {
                    (
                        (*cmd).to_string(),
                        args.iter().map(|a| (*a).to_string()).collect(),
                    )
                })
                .collect(),
        }
    }
}

impl CommandClipboard {
    /// Clipboard that tries exactly `commands`, in order.
    pub fn with_commands(commands: Vec<(String, Vec<String>)>) -> Self {
        Self { commands }
    }

    fn run(program: &str, args: &[String], text: &str) -> io::Result<bool> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        // Drop stdin before waiting so the child sees EOF, and always reap it.
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(text.as_bytes()),
            None => Ok(()),
        };
        let status = child.wait()?;
        written?;
        Ok(status.success())
    }
}

impl Clipboard for CommandClipboard {
    fn write_text(&self, text: &str) -> Result<(), String> {
        for (program, args) in &self.commands {
            match Self::run(program, args, text) {
                Ok(true) => {
                    debug!("copied {} bytes with {program}", text.len());
                    return Ok(());
                }
                Ok(false) => debug!("{program} exited with failure"),
                Err(e) => debug!("{program} unavailable: {e}"),
            }
        }
        Err("no clipboard command available".to_string())
    }
}

/// Where copied text ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Clipboard,
    Printed,
}

/// Copy `text` to `clipboard`, or write it to `fallback` if that fails.
pub fn copy_with_fallback(
    clipboard: &dyn Clipboard,
    text: &str,
    fallback: &mut dyn Write,
) -> io::Result<CopyOutcome> {
    match clipboard.write_text(text) {
        Ok(()) => Ok(CopyOutcome::Clipboard),
        Err(e) => {
            warn!("clipboard unavailable ({e}), printing instead");
            writeln!(fallback, "{text}")?;
            Ok(CopyOutcome::Printed)
        }
    }
}
