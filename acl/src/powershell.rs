//! PowerShell Get-Acl fallback.
//!
//! Used when icacls fails for a directory. The generated script prints one
//! pipe-delimited line per ACE:
//! `path|identity|permissions|access_type|is_inherited`.
//!
//! The permission phrases come straight from `FileSystemRights`, so an
//! edge-case ACE may classify differently than the icacls code mapping.

use crate::entry::{AccessType, PermissionEntry};

/// Build the Get-Acl script for exactly one directory.
pub fn folder_acl_script(path: &str) -> String {
    format!(
        r#"
try {{
    $acl = Get-Acl -Path '{path}' -ErrorAction Stop
    foreach ($access in $acl.Access) {{
        $permissions = [System.Collections.Generic.List[string]]::new()

        if ($access.FileSystemRights -band [System.Security.AccessControl.FileSystemRights]::Read) {{ $permissions.Add("Read") }}
        if ($access.FileSystemRights -band [System.Security.AccessControl.FileSystemRights]::Write) {{ $permissions.Add("Write") }}
        if ($access.FileSystemRights -band [System.Security.AccessControl.FileSystemRights]::Modify) {{ $permissions.Add("Change") }}
        if ($access.FileSystemRights -band [System.Security.AccessControl.FileSystemRights]::Delete) {{ $permissions.Add("Delete") }}
        if ($access.FileSystemRights -band [System.Security.AccessControl.FileSystemRights]::ReadAndExecute) {{ $permissions.Add("List") }}

        if ($permissions.Count -gt 0) {{
            $permString = $permissions -join ", "
            Write-Output "{path}|$($access.IdentityReference)|$permString|$($access.AccessControlType)|$($access.IsInherited)"
        }}
    }}
}} catch {{
    Write-Error "Failed to get ACL for {path}: $($_.Exception.Message)"
}}
"#
    )
}

/// Parse the pipe-delimited fallback output into entries.
///
/// Lines without at least five fields or with an empty permission field are
/// dropped silently, mirroring the icacls parser's lossy policy.
pub fn parse_powershell_output(output: &str) -> Vec<PermissionEntry> {
    let mut entries = Vec::new();

    for raw_line in output.lines() {
        let line = raw_line.trim();
        if line.is_empty() || !line.contains('|') {
            continue;
        }

        let parts: Vec<&str> = line.split('|').collect();
        if parts.len() < 5 {
            continue;
        }

        let path = parts[0].trim();
        let identity = parts[1].trim();
        let permission = parts[2].trim();
        let access_type = parts[3].trim().parse().unwrap_or(AccessType::Allow);
        let inherited = parts[4].trim().eq_ignore_ascii_case("true");

        if permission.is_empty() || identity.is_empty() {
            continue;
        }

        entries.push(PermissionEntry::new(
            path,
            identity,
            permission,
            access_type,
            inherited,
        ));
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_targets_the_given_path() {
        let script = folder_acl_script("C:\\shares\\finance");
        assert!(script.contains("Get-Acl -Path 'C:\\shares\\finance'"));
        assert!(script.contains("FileSystemRights"));
    }

    #[test]
    fn parses_pipe_delimited_lines() {
        let output = "C:\\data|DOMAIN\\jdoe|Read, List|Deny|False\n\
                      C:\\data|BUILTIN\\Users|Read, Write, Change|Allow|True\n";

        let entries = parse_powershell_output(output);
        assert_eq!(entries.len(), 2);

        assert_eq!(entries[0].identity, "DOMAIN\\jdoe");
        assert_eq!(entries[0].access_type, AccessType::Deny);
        assert!(!entries[0].inherited);

        assert_eq!(entries[1].permission, "Read, Write, Change");
        assert_eq!(entries[1].access_type, AccessType::Allow);
        assert!(entries[1].inherited);
    }

    #[test]
    fn malformed_lines_are_dropped() {
        let output = "garbage without pipes\n\
                      only|three|fields\n\
                      C:\\data|identity||Allow|False\n";
        assert!(parse_powershell_output(output).is_empty());
    }

    #[test]
    fn unknown_access_type_defaults_to_allow() {
        let output = "C:\\data|users|Read|Audit|False\n";
        let entries = parse_powershell_output(output);
        assert_eq!(entries[0].access_type, AccessType::Allow);
    }
}
