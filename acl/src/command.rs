use tokio::process::Command;

use crate::{AclError, Result};

/// Decoded output of a finished subprocess.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub success: bool,
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// Run an external command to completion and capture its output.
///
/// Output bytes are decoded lossily; icacls on localized systems is not
/// guaranteed to emit UTF-8.
pub async fn run_command(program: &str, args: &[&str]) -> Result<CommandOutput> {
    log::debug!("Running command: {} {:?}", program, args);

    let output = Command::new(program)
        .args(args)
        .output()
        .await
        .map_err(|source| AclError::Launch {
            program: program.to_string(),
            source,
        })?;

    Ok(CommandOutput {
        success: output.status.success(),
        code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

/// Which ACL backends are present on this host.
///
/// Probed once at startup and passed into the scanner as context.
#[derive(Debug, Clone, Copy)]
pub struct AclCapabilities {
    pub icacls: bool,
    pub powershell: bool,
}

impl AclCapabilities {
    /// Look both backends up on the PATH.
    pub fn detect() -> Self {
        Self {
            icacls: which::which("icacls").is_ok(),
            powershell: which::which("powershell").is_ok(),
        }
    }

    pub fn any(&self) -> bool {
        self.icacls || self.powershell
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_program_is_a_launch_error() {
        let err = run_command("definitely-not-a-real-binary", &[])
            .await
            .unwrap_err();
        assert!(matches!(err, AclError::Launch { .. }));
    }

    #[test]
    fn capabilities_any() {
        let none = AclCapabilities {
            icacls: false,
            powershell: false,
        };
        assert!(!none.any());

        let one = AclCapabilities {
            icacls: true,
            powershell: false,
        };
        assert!(one.any());
    }
}
