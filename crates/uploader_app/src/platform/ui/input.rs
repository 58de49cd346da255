use std::path::{Path, PathBuf};

use uploader_core::SelectedFile;

pub const HELP: &[&str] = &[
    "Commands:",
    "  select <path>   choose the file to send",
    "  upload          send the selected file",
    "  help            show this help",
    "  quit            exit",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Select(PathBuf),
    Upload,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    match word.to_ascii_lowercase().as_str() {
        "" => Command::Empty,
        "select" | "s" if !rest.is_empty() => Command::Select(PathBuf::from(rest)),
        "upload" | "send" | "u" => Command::Upload,
        "help" | "h" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        _ => Command::Unknown(line.to_string()),
    }
}

/// Mirrors a file picker: a path that is not a readable regular file counts
/// as nothing picked.
pub fn selection_for(path: &Path) -> Option<SelectedFile> {
    if !path.is_file() {
        return None;
    }
    let name = path.file_name()?.to_string_lossy().into_owned();
    Some(SelectedFile::new(name, path))
}
