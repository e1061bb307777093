#[cfg(test)]
mod tests {
    use crate::scan::{collect_directories, scan, ScanParams};
    use acl::AclCapabilities;
    use std::fs;
    use tempfile::tempdir;
    use utils::app_config::AppConfig;

    const TEST_CONFIG: &str = r#"
        [log]
        level = "info"
        max_size = 100
        max_backups = 10

        [scan]
        include_subfolders = false
        channel_capacity = 1000
        log_consumer = false

        [export]
        pretty_json = true
    "#;

    fn initialize() {
        AppConfig::init(Some(TEST_CONFIG)).unwrap();
    }

    #[tokio::test]
    async fn test_collect_non_recursive() {
        let temp_dir = tempdir().unwrap();
        let root_path = temp_dir.path();

        fs::create_dir_all(root_path.join("dir1")).unwrap();
        fs::create_dir_all(root_path.join("dir2").join("nested")).unwrap();
        fs::write(root_path.join("file1.txt"), "content1").unwrap();

        let root = root_path.to_string_lossy().into_owned();
        let directories = collect_directories(&root, false).await;

        assert_eq!(directories, vec![root]);
    }

    #[tokio::test]
    async fn test_collect_recursive() {
        let temp_dir = tempdir().unwrap();
        let root_path = temp_dir.path();

        fs::create_dir_all(root_path.join("dir1")).unwrap();
        fs::create_dir_all(root_path.join("dir2").join("nested")).unwrap();
        fs::write(root_path.join("dir1").join("file.txt"), "content").unwrap();

        let root = root_path.to_string_lossy().into_owned();
        let directories = collect_directories(&root, true).await;

        // The root itself plus dir1, dir2, dir2/nested. Files never appear.
        assert_eq!(directories.len(), 4);
        assert!(directories.iter().any(|d| d.ends_with("dir1")));
        assert!(directories.iter().any(|d| d.ends_with("nested")));
        assert!(!directories.iter().any(|d| d.ends_with("file.txt")));
    }

    #[tokio::test]
    async fn test_scan_empty_directory() {
        initialize();

        let temp_dir = tempdir().unwrap();
        let params = ScanParams {
            paths: vec![temp_dir.path().to_string_lossy().into_owned()],
            ..Default::default()
        };

        let report = scan(params, AclCapabilities::detect()).await.unwrap();
        assert_eq!(report.stats.directories_scanned, 1);
    }

    #[tokio::test]
    async fn test_scan_without_backends() {
        initialize();

        let temp_dir = tempdir().unwrap();
        let params = ScanParams {
            paths: vec![temp_dir.path().to_string_lossy().into_owned()],
            ..Default::default()
        };
        let no_backends = AclCapabilities {
            icacls: false,
            powershell: false,
        };

        // Without a backend every directory yields zero entries, but the
        // walk itself still happens and the scan completes cleanly.
        let report = scan(params, no_backends).await.unwrap();
        assert!(report.entries.is_empty());
        assert_eq!(report.stats.total_entries, 0);
        assert_eq!(report.stats.directories_scanned, 1);
    }

    #[tokio::test]
    async fn test_scan_missing_root() {
        initialize();

        let params = ScanParams {
            paths: vec![String::from("/definitely/not/a/real/path")],
            ..Default::default()
        };

        // Missing roots are logged and skipped, never fatal.
        let report = scan(params, AclCapabilities::detect()).await.unwrap();
        assert!(report.entries.is_empty());
        assert_eq!(report.stats.directories_scanned, 0);
    }
}
