//! Copy-to-clipboard through whatever system command is available.

use std::io::Write;
use std::process::{Command, Stdio};

#[derive(thiserror::Error, Debug)]
pub enum ClipboardError {
    #[error("no clipboard command found (tried pbcopy, wl-copy, xclip, xsel, termux, tmux, win32yank)")]
    Unavailable,

    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {status}")]
    Failed {
        command: &'static str,
        status: std::process::ExitStatus,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardProvider {
    Pasteboard,
    Wayland,
    XClip,
    XSel,
    Termux,
    Tmux,
    Win32Yank,
    None,
}

fn binary_exists(name: &str) -> bool {
    which::which(name).is_ok()
}

fn env_var_is_set(name: &str) -> bool {
    std::env::var_os(name).is_some()
}

impl ClipboardProvider {
    pub fn detect() -> Self {
        if cfg!(target_os = "macos") && binary_exists("pbcopy") {
            Self::Pasteboard
        } else if env_var_is_set("WAYLAND_DISPLAY") && binary_exists("wl-copy") {
            Self::Wayland
        } else if env_var_is_set("DISPLAY") && binary_exists("xclip") {
            Self::XClip
        } else if env_var_is_set("DISPLAY") && binary_exists("xsel") {
            Self::XSel
        } else if binary_exists("termux-clipboard-set") {
            Self::Termux
        } else if env_var_is_set("TMUX") && binary_exists("tmux") {
            Self::Tmux
        } else if binary_exists("win32yank.exe") {
            Self::Win32Yank
        } else {
            Self::None
        }
    }

    /// Program and arguments that read the new clipboard contents from stdin.
    pub fn copy_command(&self) -> Option<(&'static str, &'static [&'static str])> {
        match self {
            Self::Pasteboard => Some(("pbcopy", &[])),
            Self::Wayland => Some(("wl-copy", &["--type", "text/plain"])),
            Self::XClip => Some(("xclip", &["-i", "-selection", "clipboard"])),
            Self::XSel => Some(("xsel", &["-i", "-b"])),
            Self::Termux => Some(("termux-clipboard-set", &[])),
            Self::Tmux => Some(("tmux", &["load-buffer", "-w", "-"])),
            Self::Win32Yank => Some(("win32yank.exe", &["-i", "--crlf"])),
            Self::None => None,
        }
    }

    pub fn copy(&self, content: &str) -> Result<(), ClipboardError> {
        let (command, args) = self.copy_command().ok_or(ClipboardError::Unavailable)?;

        let mut child = Command::new(command)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| ClipboardError::Spawn { command, source })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(content.as_bytes())
                .map_err(|source| ClipboardError::Spawn { command, source })?;
        }

        let status = child
            .wait()
            .map_err(|source| ClipboardError::Spawn { command, source })?;

        if status.success() {
            Ok(())
        } else {
            Err(ClipboardError::Failed { command, status })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_provider_cannot_copy() {
        assert!(ClipboardProvider::None.copy_command().is_none());
        assert!(matches!(
            ClipboardProvider::None.copy("x"),
            Err(ClipboardError::Unavailable)
        ));
    }

    #[test]
    fn test_every_real_provider_has_a_command() {
        for provider in [
            ClipboardProvider::Pasteboard,
            ClipboardProvider::Wayland,
            ClipboardProvider::XClip,
            ClipboardProvider::XSel,
            ClipboardProvider::Termux,
            ClipboardProvider::Tmux,
            ClipboardProvider::Win32Yank,
        ] {
            assert!(provider.copy_command().is_some(), "{provider:?}");
        }
    }
}
