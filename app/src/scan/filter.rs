use acl::{is_ad_group, PermissionEntry};

/// Filter scan results for display or export.
///
/// `ad_only` keeps entries whose identity looks like a directory group;
/// the text filter is a case-insensitive substring match against identity,
/// path or permission.
pub fn filter_entries(
    entries: &[PermissionEntry],
    filter_text: Option<&str>,
    ad_only: bool,
) -> Vec<PermissionEntry> {
    let needle = filter_text
        .map(|text| text.to_lowercase())
        .filter(|text| !text.is_empty());

    entries
        .iter()
        .filter(|entry| !ad_only || is_ad_group(&entry.identity))
        .filter(|entry| match &needle {
            Some(needle) => {
                entry.identity.to_lowercase().contains(needle)
                    || entry.path.to_lowercase().contains(needle)
                    || entry.permission.to_lowercase().contains(needle)
            }
            None => true,
        })
        .cloned()
        .collect()
}
