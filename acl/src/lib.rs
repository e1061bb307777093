pub mod command;
pub mod entry;
pub mod identity;
pub mod parser;
pub mod powershell;

pub use command::{run_command, AclCapabilities, CommandOutput};
pub use entry::{AccessType, PermissionEntry, PermissionRecord};
pub use identity::is_ad_group;
pub use parser::{parse_acl_line, parse_icacls_output, ParsedAce};

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AclError {
    #[error("failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} exited with code {code:?}: {stderr}")]
    CommandFailed {
        program: String,
        code: Option<i32>,
        stderr: String,
    },
    #[error("no ACL backend available (icacls or powershell required)")]
    NoBackend,
}

pub type Result<T> = std::result::Result<T, AclError>;

/// Normalize a path to the OS-native separator.
///
/// ACL output is keyed by path, so every caller normalizes before use.
pub fn normalize_path(path: &str) -> String {
    let mut normalized = PathBuf::new();
    for component in Path::new(path.trim()).components() {
        normalized.push(component.as_os_str());
    }

    if normalized.as_os_str().is_empty() {
        String::from(".")
    } else {
        normalized.to_string_lossy().into_owned()
    }
}

/// ACL query front end: icacls primary, PowerShell Get-Acl fallback.
///
/// Backend availability is probed once at startup and handed in as
/// context; there is no process-global state.
pub struct AclScanner {
    caps: AclCapabilities,
}

impl AclScanner {
    pub fn new(caps: AclCapabilities) -> Self {
        Self { caps }
    }

    pub fn capabilities(&self) -> AclCapabilities {
        self.caps
    }

    /// Query the ACL of exactly one directory.
    ///
    /// A failing icacls invocation falls back to PowerShell; the caller
    /// decides what to do when both backends fail (scans skip the directory).
    pub async fn folder_acl(&self, path: &str) -> Result<Vec<PermissionEntry>> {
        let normalized = normalize_path(path);

        if self.caps.icacls {
            match self.icacls_acl(&normalized).await {
                Ok(entries) => return Ok(entries),
                Err(err) => {
                    log::warn!(
                        "icacls failed for {}: {}; trying PowerShell fallback",
                        normalized,
                        err
                    );
                }
            }
        }

        if self.caps.powershell {
            return self.powershell_acl(&normalized).await;
        }

        Err(AclError::NoBackend)
    }

    async fn icacls_acl(&self, normalized: &str) -> Result<Vec<PermissionEntry>> {
        let output = run_command("icacls", &[normalized]).await?;

        if !output.success {
            return Err(AclError::CommandFailed {
                program: String::from("icacls"),
                code: output.code,
                stderr: output.stderr,
            });
        }

        Ok(parse_icacls_output(normalized, &output.stdout))
    }

    async fn powershell_acl(&self, normalized: &str) -> Result<Vec<PermissionEntry>> {
        let script = powershell::folder_acl_script(normalized);
        let output = run_command("powershell", &["-Command", &script]).await?;

        if !output.success {
            return Err(AclError::CommandFailed {
                program: String::from("powershell"),
                code: output.code,
                stderr: output.stderr,
            });
        }

        Ok(powershell::parse_powershell_output(&output.stdout))
    }
}
