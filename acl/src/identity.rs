/// Substring indicators that mark an identity as a directory group.
/// Compared against the uppercased identity.
const AD_INDICATORS: &[&str] = &["DOMAIN\\", "BUILTIN\\", "\\DOMAIN", "\\"];

/// Heuristic: does this identity look like an AD / domain group?
///
/// Used for filtering and summary stats only; plain local accounts without
/// a backslash are classified as non-AD.
pub fn is_ad_group(identity: &str) -> bool {
    let upper = identity.to_uppercase();
    AD_INDICATORS.iter().any(|indicator| upper.contains(indicator))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_prefixed_identities_match() {
        assert!(is_ad_group("DOMAIN\\Finance-RW"));
        assert!(is_ad_group("BUILTIN\\Administrators"));
        assert!(is_ad_group("corp\\Domain Admins"));
    }

    #[test]
    fn any_backslash_counts() {
        assert!(is_ad_group("NT AUTHORITY\\SYSTEM"));
    }

    #[test]
    fn bare_identities_do_not_match() {
        assert!(!is_ad_group("Everyone"));
        assert!(!is_ad_group("jdoe"));
    }
}
