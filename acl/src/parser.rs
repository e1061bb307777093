//! icacls output parser.
//!
//! Converts the textual output of `icacls <dir>` into normalized
//! [`PermissionEntry`] records. The parser is lossy by design: lines it
//! cannot interpret contribute nothing and raise no error.

use crate::entry::{AccessType, PermissionEntry};

/// Raw icacls codes accepted as permission codes. Everything else inside
/// parentheses is either handled specially (I, DENY) or is an
/// inheritance-propagation flag (OI, CI, IO) and is ignored.
const PERMISSION_CODES: &[&str] = &[
    "F", "M", "RX", "R", "W", "D", "C", "RC", "WD", "AD", "WEA", "REA", "X", "DC",
];

const FULL_CONTROL_CODES: &[&str] = &["F", "FC", "FULLCONTROL"];
const MODIFY_CODES: &[&str] = &["M", "MODIFY"];
const READ_CODES: &[&str] = &["R", "RX", "RC", "GR", "RD"];
const WRITE_CODES: &[&str] = &["W", "WD", "AD", "WEA", "GW"];
const EXECUTE_CODES: &[&str] = &["RX", "X", "GE"];
const DELETE_CODES: &[&str] = &["D", "DC", "DA"];

/// Full control and modify both collapse to the complete phrase.
const FULL_PHRASE: &str = "Read, Write, Change, Delete, List";

/// Status lines emitted by icacls that carry no ACE data.
const NOISE_PHRASES: &[&str] = &["Successfully processed", "files processed"];

/// One ACE parsed out of a single icacls line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAce {
    pub identity: String,
    pub permission: String,
    pub access_type: AccessType,
    pub inherited: bool,
}

/// Parse the full stdout of `icacls <path>` for one directory.
///
/// The first line (path echo) and any line starting with the scanned path
/// are skipped, as are blank and status lines.
pub fn parse_icacls_output(path: &str, output: &str) -> Vec<PermissionEntry> {
    let mut entries = Vec::new();

    for (index, raw_line) in output.lines().enumerate() {
        let line = raw_line.trim();

        if line.is_empty() || NOISE_PHRASES.iter().any(|phrase| line.contains(phrase)) {
            continue;
        }

        if index == 0 || line.starts_with(path) {
            continue;
        }

        if let Some(ace) = parse_acl_line(line) {
            entries.push(PermissionEntry::from_ace(path, ace));
        }
    }

    entries
}

/// Parse a single `<identity>:(<flag>)(<flag>)...` line.
///
/// Pure function; returns `None` for continuation lines, lines without a
/// `:(` marker, and lines whose flags carry no recognized permission code.
pub fn parse_acl_line(line: &str) -> Option<ParsedAce> {
    let line = line.trim();

    let marker = line.find(":(")?;
    if marker == 0 {
        return None;
    }

    let identity = line[..marker].trim();
    if identity.is_empty() {
        return None;
    }

    // Keep the leading '(' so the group walk below sees every flag.
    let payload = &line[marker + 1..];

    let mut inherited = false;
    let mut access_type = AccessType::Allow;
    let mut codes: Vec<String> = Vec::new();

    for flag in paren_groups(payload) {
        match flag {
            "I" => inherited = true,
            "DENY" => access_type = AccessType::Deny,
            code if PERMISSION_CODES.contains(&code) => codes.push(code.to_string()),
            // OI, CI, IO and friends control propagation, not access.
            _ => {}
        }
    }

    if codes.is_empty() {
        return None;
    }

    let permission = normalize_permission_codes(&codes);
    if permission.is_empty() {
        return None;
    }

    Some(ParsedAce {
        identity: identity.to_string(),
        permission,
        access_type,
        inherited,
    })
}

/// Map a set of raw icacls codes to the human-readable phrase.
///
/// Precedence: full control, then modify, then the per-permission booleans.
/// An empty result means the codes carried no access the model recognizes
/// and the caller drops the record.
pub fn normalize_permission_codes(codes: &[String]) -> String {
    let codes: Vec<String> = codes
        .iter()
        .map(|code| code.trim().to_uppercase())
        .collect();

    let has_any = |table: &[&str]| codes.iter().any(|code| table.contains(&code.as_str()));

    if has_any(FULL_CONTROL_CODES) {
        return String::from(FULL_PHRASE);
    }

    if has_any(MODIFY_CODES) {
        return String::from(FULL_PHRASE);
    }

    let mut has_read = has_any(READ_CODES);
    let mut has_execute = has_any(EXECUTE_CODES);
    let has_write = has_any(WRITE_CODES);
    let has_delete = has_any(DELETE_CODES);

    // RX means Read & Execute, which includes List.
    if codes.iter().any(|code| code == "RX") {
        has_read = true;
        has_execute = true;
    }

    let mut parts: Vec<&str> = Vec::new();
    if has_read {
        parts.push("Read");
    }
    if has_write {
        parts.push("Write");
        // Write implies Change.
        parts.push("Change");
    }
    if has_delete {
        parts.push("Delete");
    }
    if has_execute || has_read {
        parts.push("List");
    }

    parts.join(", ")
}

/// Extract every non-empty parenthesized group from a flag payload,
/// e.g. `(OI)(CI)(F)` yields `["OI", "CI", "F"]`.
fn paren_groups(payload: &str) -> Vec<&str> {
    let mut groups = Vec::new();
    let mut rest = payload;

    while let Some(open) = rest.find('(') {
        let after = &rest[open + 1..];
        match after.find(')') {
            Some(close) => {
                if close > 0 {
                    groups.push(&after[..close]);
                }
                rest = &after[close + 1..];
            }
            None => break,
        }
    }

    groups
}
