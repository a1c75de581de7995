use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use lifeadmin_core::SelectedFile;

pub(crate) const HELP: &str = "\
commands:
  pick <path>...   choose files (replaces the current selection)
  drag-over        drag something over the drop zone
  drag-leave       drag away from the drop zone
  drop <path>...   drop files on the drop zone (replaces the selection)
  submit           upload the first selected file to /process
  status           check that the backend is reachable
  help             show this text
  quit             exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ShellCommand {
    Pick(Vec<PathBuf>),
    DragOver,
    DragLeave,
    Drop(Vec<PathBuf>),
    Submit,
    Status,
    Help,
    Quit,
}

/// Parses one input line; blank lines yield `None`, unknown verbs an error.
pub(crate) fn parse_command(line: &str) -> Result<Option<ShellCommand>, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let paths = || words.clone().map(PathBuf::from).collect::<Vec<_>>();
    let command = match verb.to_ascii_lowercase().as_str() {
        "pick" => ShellCommand::Pick(paths()),
        "drag-over" => ShellCommand::DragOver,
        "drag-leave" => ShellCommand::DragLeave,
        "drop" => ShellCommand::Drop(paths()),
        "submit" | "upload" => ShellCommand::Submit,
        "status" => ShellCommand::Status,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" => ShellCommand::Quit,
        other => return Err(format!("unknown command `{other}`; type `help`")),
    };
    Ok(Some(command))
}

/// Reads every path into memory. The file name becomes the multipart filename.
pub(crate) fn read_selection(paths: &[PathBuf]) -> anyhow::Result<Vec<SelectedFile>> {
    paths.iter().map(|path| read_file(path)).collect()
}

fn read_file(path: &Path) -> anyhow::Result<SelectedFile> {
    let bytes = fs::read(path).with_context(|| format!("cannot read {}", path.display()))?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(SelectedFile::new(name, bytes))
}
