//! Open a file with the host's default application.

use docseek_core::{OpenError, Opener};
use std::io::ErrorKind;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::debug;

/// An external program that opens a path given as its last argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Launcher {
    pub program: String,
    pub args: Vec<String>,
}

impl Launcher {
    pub fn new(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| (*a).to_string()).collect(),
        }
    }
}

/// [`Opener`] that tries each launcher in turn until one starts.
#[derive(Debug, Clone)]
pub struct SystemOpener {
    launchers: Vec<Launcher>,
}

impl SystemOpener {
    /// Use the launchers conventional for the current platform.
    #[must_use]
    pub fn new() -> Self {
        Self::with_launchers(platform_launchers())
    }

    /// Use a custom launcher chain.
    #[must_use]
    pub fn with_launchers(launchers: Vec<Launcher>) -> Self {
        Self { launchers }
    }

    #[must_use]
    pub fn launchers(&self) -> &[Launcher] {
        &self.launchers
    }
}

impl Default for SystemOpener {
    fn default() -> Self {
        Self::new()
    }
}

impl Opener for SystemOpener {
    fn open(&self, path: &Path) -> Result<(), OpenError> {
        if !path.exists() {
            return Err(OpenError::NotFound(path.to_path_buf()));
        }

        let mut last_error = None;
        for launcher in &self.launchers {
            let spawned = Command::new(&launcher.program)
                .args(&launcher.args)
                .arg(path)
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn();

            match spawned {
                Ok(_child) => {
                    debug!("Opened {:?} with {}", path, launcher.program);
                    return Ok(());
                }
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    debug!("Launcher {} not installed", launcher.program);
                }
                Err(e) => {
                    debug!("Launcher {} failed: {}", launcher.program, e);
                    last_error = Some(OpenError::Launch {
                        program: launcher.program.clone(),
                        source: e,
                    });
                }
            }
        }

        Err(last_error.unwrap_or(OpenError::NoOpener))
    }
}

fn platform_launchers() -> Vec<Launcher> {
    if cfg!(target_os = "macos") {
        vec![Launcher::new("open", &[])]
    } else if cfg!(windows) {
        // The empty argument is the window title `start` expects first
        vec![Launcher::new("cmd", &["/C", "start", ""])]
    } else {
        vec![
            Launcher::new("xdg-open", &[]),
            Launcher::new("gio", &["open"]),
            Launcher::new("gnome-open", &[]),
        ]
    }
}
