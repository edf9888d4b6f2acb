//! Line commands: the terminal stand-in for the form's pickers, slider and buttons.

use std::path::{Path, PathBuf};

use compressor_core::{ActionKind, Quality, SelectedFile};
use thiserror::Error;

pub const HELP: &str = "\
Commands:
  pdf <path>         select a PDF (`pdf` alone clears the selection)
  image <path>       select a JPG or PNG (`image` alone clears the selection)
  quality <1-100>    JPEG quality for image compression
  compress pdf       compress the selected PDF
  compress image     compress the selected image
  health             check that the Compression API is reachable
  status             show the form again
  help               show this help
  quit               exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Picker result; `None` clears the selection.
    Pick {
        kind: ActionKind,
        path: Option<PathBuf>,
    },
    Quality(Quality),
    Compress(ActionKind),
    Health,
    Show,
    Help,
    Quit,
    Nothing,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown command `{0}` (type `help` for a list)")]
    UnknownCommand(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error("quality must be a whole number, got `{0}`")]
    InvalidQuality(String),
    #[error("nothing to compress called `{0}` (use `pdf` or `image`)")]
    UnknownTarget(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PickError {
    #[error("{name} is not accepted here (allowed: {allowed})")]
    NotAccepted { name: String, allowed: String },
    #[error("{0} is not a readable file")]
    NotAFile(PathBuf),
}

pub fn parse(line: &str) -> Result<Command, ParseError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "" => Ok(Command::Nothing),
        "pdf" => Ok(pick(ActionKind::Pdf, rest)),
        "image" | "img" => Ok(pick(ActionKind::Image, rest)),
        "quality" | "q" => {
            if rest.is_empty() {
                return Err(ParseError::MissingArgument("quality"));
            }
            rest.parse::<i64>()
                .map(|value| Command::Quality(Quality::clamped(value)))
                .map_err(|_| ParseError::InvalidQuality(rest.to_string()))
        }
        "compress" => match rest.to_ascii_lowercase().as_str() {
            "" => Err(ParseError::MissingArgument("compress")),
            "pdf" => Ok(Command::Compress(ActionKind::Pdf)),
            "image" | "img" => Ok(Command::Compress(ActionKind::Image)),
            _ => Err(ParseError::UnknownTarget(rest.to_string())),
        },
        "health" => Ok(Command::Health),
        "status" | "show" => Ok(Command::Show),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        _ => Err(ParseError::UnknownCommand(word.to_string())),
    }
}

fn pick(kind: ActionKind, rest: &str) -> Command {
    let path = (!rest.is_empty()).then(|| PathBuf::from(unquote(rest)));
    Command::Pick { kind, path }
}

fn unquote(text: &str) -> &str {
    text.strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(text)
}

/// Applies the picker's filter: extension must match `kind`, and the path must
/// be an existing file. Content is not inspected.
pub fn resolve_pick(kind: ActionKind, path: &Path) -> Result<SelectedFile, PickError> {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    if !kind.accepts(&name) {
        let allowed = kind
            .accepted_extensions()
            .iter()
            .map(|ext| format!(".{ext}"))
            .collect::<Vec<_>>()
            .join(", ");
        return Err(PickError::NotAccepted {
            name: path.display().to_string(),
            allowed,
        });
    }
    if !path.is_file() {
        return Err(PickError::NotAFile(path.to_path_buf()));
    }
    SelectedFile::from_path(path).ok_or_else(|| PickError::NotAFile(path.to_path_buf()))
}
