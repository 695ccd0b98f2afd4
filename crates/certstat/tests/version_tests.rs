//! Version string embedded by the build script.

#[test]
fn test_version_is_embedded() {
    let version = env!("CERTSTAT_VERSION");
    assert!(!version.trim().is_empty());
    if option_env!("CERTSTAT_VERSION").is_some() {
        assert_eq!(version, option_env!("CERTSTAT_VERSION").unwrap_or_default());
    }
}
