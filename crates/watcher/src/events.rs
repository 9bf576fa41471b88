//! Translation of notify events into tail messages

use notify::event::{ModifyKind, RenameMode};
use notify::{Event as NotifyEvent, EventKind};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::trace;
use wintail_core::TailMessage;

/// Convert one notify callback result into a message for the watched file
///
/// Events for other entries of the watched directory are ignored.
pub(crate) fn to_tail_message(
    res: Result<NotifyEvent, notify::Error>,
    watched: &Path,
) -> Option<TailMessage> {
    let file_name = watched.file_name()?;

    match res {
        Ok(event) => {
            if !concerns(&event.paths, file_name) {
                trace!("Ignoring event for other paths: {:?}", event.paths);
                return None;
            }
            match event.kind {
                EventKind::Modify(ModifyKind::Name(mode))
                    if renamed_away(mode, &event.paths, file_name) =>
                {
                    Some(TailMessage::WatchError {
                        path: watched.to_path_buf(),
                        reason: "file was renamed".to_string(),
                    })
                }
                EventKind::Create(_) | EventKind::Modify(_) => {
                    Some(TailMessage::ChangeNotification {
                        path: watched.to_path_buf(),
                    })
                }
                EventKind::Remove(_) => Some(TailMessage::WatchError {
                    path: watched.to_path_buf(),
                    reason: "file was removed".to_string(),
                }),
                _ => None,
            }
        }
        Err(e) => {
            // Errors without paths concern the whole watch
            if !e.paths.is_empty() && !concerns(&e.paths, file_name) {
                return None;
            }
            Some(TailMessage::WatchError {
                path: watched.to_path_buf(),
                reason: e.to_string(),
            })
        }
    }
}

fn concerns(paths: &[PathBuf], file_name: &OsStr) -> bool {
    paths.iter().any(|p| p.file_name() == Some(file_name))
}

/// Whether a rename moved the watched file away from its name
///
/// `Both` carries `[from, to]`; renaming another file onto the watched name
/// is a change, not a loss.
fn renamed_away(mode: RenameMode, paths: &[PathBuf], file_name: &OsStr) -> bool {
    match mode {
        RenameMode::From => true,
        RenameMode::Both => paths.first().and_then(|p| p.file_name()) == Some(file_name),
        _ => false,
    }
}
