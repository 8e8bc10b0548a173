//! Line-oriented interactive front end for the controller
//!
//! Each input line is one user action. After every action the current view
//! (position, German input, machine translation, reference, status) is
//! written out.

use crate::controller::TranslatorController;
use crate::corpus::{LanguageTag, UnknownLanguage};
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

pub const HELP: &str = "\
commands:
  open <de|en> <path>   load a corpus file (empty path cancels)
  goto <n>              jump to line n
  next | n              step forward one line
  prev | p              step back one line
  text <german>         replace the input text
  translate | t         translate the input text
  count                 show corpus line counts
  help                  show this help
  quit | q              leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Open {
        language: LanguageTag,
        path: Option<PathBuf>,
    },
    Goto(usize),
    Next,
    Prev,
    Text(String),
    Translate,
    Count,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseCommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}', type 'help'")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error(transparent)]
    Language(#[from] UnknownLanguage),
}

impl SessionCommand {
    pub fn parse(line: &str) -> Result<Self, ParseCommandError> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_lowercase().as_str() {
            "" => Err(ParseCommandError::Empty),
            "open" => {
                let (lang, path) = match rest.split_once(char::is_whitespace) {
                    Some((lang, path)) => (lang, path.trim()),
                    None => (rest, ""),
                };
                if lang.is_empty() {
                    return Err(ParseCommandError::Usage("open <de|en> <path>"));
                }
                Ok(SessionCommand::Open {
                    language: lang.parse()?,
                    path: (!path.is_empty()).then(|| PathBuf::from(path)),
                })
            }
            "goto" | "g" => rest
                .parse()
                .map(SessionCommand::Goto)
                .map_err(|_| ParseCommandError::Usage("goto <line number>")),
            "next" | "n" => Ok(SessionCommand::Next),
            "prev" | "p" => Ok(SessionCommand::Prev),
            "text" => Ok(SessionCommand::Text(rest.to_string())),
            "translate" | "t" => Ok(SessionCommand::Translate),
            "count" => Ok(SessionCommand::Count),
            "help" | "?" => Ok(SessionCommand::Help),
            "quit" | "q" | "exit" => Ok(SessionCommand::Quit),
            other => Err(ParseCommandError::Unknown(other.to_string())),
        }
    }
}

/// Write the controller's current view
pub fn render(controller: &TranslatorController, out: &mut impl Write) -> std::io::Result<()> {
    let total = controller.line_count(LanguageTag::De);
    match controller.current_index() {
        Some(index) => writeln!(out, "[{}/{}]", index, total)?,
        None => writeln!(out, "[-/{}]", total)?,
    }
    writeln!(out, "  de:  {}", controller.input())?;
    writeln!(out, "  mt:  {}", controller.output())?;
    writeln!(
        out,
        "  ref: {}",
        controller.reference().unwrap_or("(no reference)")
    )?;
    writeln!(out, "  status: {}", controller.status())
}

/// Run one command; returns `false` when the session should end
pub async fn execute(
    controller: &mut TranslatorController,
    command: SessionCommand,
    out: &mut impl Write,
) -> std::io::Result<bool> {
    match command {
        SessionCommand::Open { language, path } => {
            // Failures are reflected in the status line
            let _ = controller.open_corpus(language, path.as_deref());
        }
        SessionCommand::Goto(index) => {
            controller.navigate_to(index).await;
        }
        SessionCommand::Next => {
            controller.step_forward().await;
        }
        SessionCommand::Prev => {
            controller.step_back().await;
        }
        SessionCommand::Text(text) => {
            controller.set_input(text);
            writeln!(
                out,
                "  translate {}",
                if controller.can_translate() { "enabled" } else { "disabled" }
            )?;
            return Ok(true);
        }
        SessionCommand::Translate => {
            let _ = controller.translate_input().await;
        }
        SessionCommand::Count => {
            for language in LanguageTag::ALL {
                writeln!(
                    out,
                    "  {}: {} lines",
                    language.name(),
                    controller.line_count(language)
                )?;
            }
            return Ok(true);
        }
        SessionCommand::Help => {
            writeln!(out, "{}", HELP)?;
            return Ok(true);
        }
        SessionCommand::Quit => return Ok(false),
    }

    render(controller, out)?;
    Ok(true)
}

/// Read commands from `input` until EOF or `quit`
pub async fn run<R, W>(
    controller: &mut TranslatorController,
    input: R,
    out: &mut W,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        match SessionCommand::parse(&line) {
            Ok(command) => {
                if !execute(controller, command, out).await? {
                    break;
                }
            }
            Err(ParseCommandError::Empty) => {}
            Err(e) => writeln!(out, "  {}", e)?,
        }
        out.flush()?;
    }
    Ok(())
}
