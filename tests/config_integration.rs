use std::path::PathBuf;

use mdbrowse::browser::BrowserConfig;
use mdbrowse::config::{ConfigFlags, load_config_flags, parse_flag_tokens, save_config_flags};

#[test]
fn test_config_file_parsing_ignores_comments_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".mdbrowserc");
    let content = r"
# comment
--plain

--home Start
   
--images-path=help images
";
    std::fs::write(&path, content).unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert!(flags.plain);
    assert_eq!(flags.home.as_deref(), Some("Start"));
    assert_eq!(flags.images_path, Some(PathBuf::from("help images")));
}

#[test]
fn test_cli_flags_override_file_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".mdbrowserc");
    let content = "--plain\n--home Start\n--history-max 10\n--icon-dir /icons\n";
    std::fs::write(&path, content).unwrap();

    let file_flags = load_config_flags(&path).unwrap();
    let cli_args = vec![
        "mdbrowse".to_string(),
        "--home".to_string(),
        "Index".to_string(),
        "--icon-dir=./icons".to_string(),
        "--no-home".to_string(),
    ];
    let cli_flags = parse_flag_tokens(&cli_args);
    let merged = file_flags.union(&cli_flags);

    assert!(merged.plain);
    assert!(merged.no_home);
    assert_eq!(merged.home.as_deref(), Some("Index"));
    assert_eq!(merged.history_max, Some(10));
    assert_eq!(
        merged.icon_dirs,
        vec![PathBuf::from("/icons"), PathBuf::from("./icons")]
    );
    assert_eq!(merged.browser_config().home_topic, None);
}

#[test]
fn test_saved_flags_configure_browser() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mdbrowse").join("config");
    let flags = ConfigFlags {
        bullet_chars: Some("-*".to_string()),
        title_match: Some(r"^Title: (.*)".to_string()),
        history_max: Some(3),
        ..ConfigFlags::default()
    };
    save_config_flags(&path, &flags).unwrap();

    let loaded = load_config_flags(&path).unwrap();
    assert_eq!(loaded, flags);
    assert_eq!(
        loaded.browser_config(),
        BrowserConfig::default()
            .with_bullet_chars("-*")
            .with_history_max(3)
    );
}

#[test]
fn test_missing_config_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let flags = load_config_flags(&dir.path().join("absent")).unwrap();
    assert_eq!(flags, ConfigFlags::default());
}
