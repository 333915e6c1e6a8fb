use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::browser::BrowserConfig;

/// Options that can be set on the command line or saved in an rc file.
///
/// Each rc file line holds one flag, written exactly as on the command line
/// (`--flag value` or `--flag=value`). Values may contain spaces.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub images_path: Option<PathBuf>,
    pub icon_dirs: Vec<PathBuf>,
    pub file_match: Option<String>,
    pub title_match: Option<String>,
    pub bullet_chars: Option<String>,
    pub home: Option<String>,
    pub no_home: bool,
    pub history_max: Option<usize>,
    pub plain: bool,
}

impl ConfigFlags {
    /// Merge with `other` taking precedence for options; switches are OR-ed
    /// and icon directories from both are kept, `self` first.
    pub fn union(&self, other: &Self) -> Self {
        let mut icon_dirs = self.icon_dirs.clone();
        icon_dirs.extend(
            other
                .icon_dirs
                .iter()
                .filter(|dir| !self.icon_dirs.contains(dir))
                .cloned(),
        );
        Self {
            images_path: other
                .images_path
                .clone()
                .or_else(|| self.images_path.clone()),
            icon_dirs,
            file_match: other.file_match.clone().or_else(|| self.file_match.clone()),
            title_match: other
                .title_match
                .clone()
                .or_else(|| self.title_match.clone()),
            bullet_chars: other
                .bullet_chars
                .clone()
                .or_else(|| self.bullet_chars.clone()),
            home: other.home.clone().or_else(|| self.home.clone()),
            no_home: self.no_home || other.no_home,
            history_max: other.history_max.or(self.history_max),
            plain: self.plain || other.plain,
        }
    }

    /// Browser settings with these flags applied over the defaults.
    pub fn browser_config(&self) -> BrowserConfig {
        let mut config = BrowserConfig::default();
        if let Some(path) = &self.images_path {
            config = config.with_images_path(path.clone());
        }
        if let Some(chars) = &self.bullet_chars {
            config = config.with_bullet_chars(chars.clone());
        }
        if self.no_home {
            config = config.with_home_topic(None);
        } else if let Some(home) = &self.home {
            config = config.with_home_topic(Some(home.clone()));
        }
        if let Some(max) = self.history_max {
            config = config.with_history_max(max);
        }
        config
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("mdbrowse").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("mdbrowse")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("mdbrowse").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("mdbrowse")
                .join("config");
        }
    }

    PathBuf::from(".mdbrowserc")
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".mdbrowserc")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim_start)
        .filter(|line| !line.trim_end().is_empty() && !line.starts_with('#'))
        .flat_map(line_tokens)
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# mdbrowse defaults (saved with --save)".to_string());
    if let Some(path) = &flags.images_path {
        lines.push(format!("--images-path {}", path.display()));
    }
    for dir in &flags.icon_dirs {
        lines.push(format!("--icon-dir {}", dir.display()));
    }
    if let Some(pattern) = &flags.file_match {
        lines.push(format!("--file-match {pattern}"));
    }
    if let Some(pattern) = &flags.title_match {
        lines.push(format!("--title-match {pattern}"));
    }
    if let Some(chars) = &flags.bullet_chars {
        lines.push(format!("--bullet-chars {chars}"));
    }
    if let Some(home) = &flags.home {
        lines.push(format!("--home {home}"));
    }
    if flags.no_home {
        lines.push("--no-home".to_string());
    }
    if let Some(max) = flags.history_max {
        lines.push(format!("--history-max {max}"));
    }
    if flags.plain {
        lines.push("--plain".to_string());
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Split an rc file line into a flag and the rest of the line as its value.
///
/// Only the one separator after the flag is dropped; the value keeps any
/// other leading or trailing whitespace.
fn line_tokens(line: &str) -> Vec<String> {
    let flag_end = line.find(char::is_whitespace).unwrap_or(line.len());
    if line[..flag_end].contains('=') {
        return vec![line.to_string()];
    }
    let (flag, rest) = line.split_at(flag_end);
    let mut value = rest.chars();
    value.next();
    let value = value.as_str();
    if value.is_empty() {
        vec![flag.to_string()]
    } else {
        vec![flag.to_string(), value.to_string()]
    }
}

pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        let (name, inline_value) = match token.split_once('=') {
            Some((name, value)) if name.starts_with("--") => (name, Some(value)),
            _ => (token, None),
        };
        match name {
            "--no-home" => flags.no_home = true,
            "--plain" => flags.plain = true,
            "--images-path" | "--icon-dir" | "--file-match" | "--title-match"
            | "--bullet-chars" | "--home" | "--history-max" => {
                let value = match inline_value {
                    Some(value) => Some(value),
                    None => {
                        let next = tokens.get(i + 1).map(String::as_str);
                        if next.is_some() {
                            i += 1;
                        }
                        next
                    }
                };
                if let Some(value) = value {
                    apply_option(&mut flags, name, value);
                }
            }
            _ => {}
        }
        i += 1;
    }
    flags
}

fn apply_option(flags: &mut ConfigFlags, name: &str, value: &str) {
    match name {
        "--images-path" => flags.images_path = Some(PathBuf::from(value)),
        "--icon-dir" => flags.icon_dirs.push(PathBuf::from(value)),
        "--file-match" => flags.file_match = Some(value.to_string()),
        "--title-match" => flags.title_match = Some(value.to_string()),
        "--bullet-chars" => flags.bullet_chars = Some(value.to_string()),
        "--home" => flags.home = Some(value.to_string()),
        "--history-max" => flags.history_max = value.parse().ok(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn tokens(args: &[&str]) -> Vec<String> {
        args.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_parse_flag_tokens_extracts_known_flags() {
        let args = tokens(&[
            "mdbrowse",
            "--images-path",
            "docs/img",
            "--bullet-chars=-+",
            "--home",
            "Index",
            "--history-max=25",
            "--plain",
            "--unknown",
            "docs",
        ]);
        let flags = parse_flag_tokens(&args);
        assert_eq!(flags.images_path, Some(PathBuf::from("docs/img")));
        assert_eq!(flags.bullet_chars.as_deref(), Some("-+"));
        assert_eq!(flags.home.as_deref(), Some("Index"));
        assert_eq!(flags.history_max, Some(25));
        assert!(flags.plain);
        assert!(!flags.no_home);
    }

    #[test]
    fn test_parse_flag_tokens_ignores_bad_numbers_and_missing_values() {
        let flags = parse_flag_tokens(&tokens(&["--history-max", "lots", "--home"]));
        assert_eq!(flags.history_max, None);
        assert_eq!(flags.home, None);
    }

    #[test]
    fn test_config_union_merges_cli_over_file_for_options() {
        let file = ConfigFlags {
            plain: true,
            home: Some("README".to_string()),
            icon_dirs: vec![PathBuf::from("/icons")],
            history_max: Some(5),
            ..ConfigFlags::default()
        };
        let cli = ConfigFlags {
            no_home: true,
            home: Some("Index".to_string()),
            icon_dirs: vec![PathBuf::from("/icons"), PathBuf::from("./icons")],
            ..ConfigFlags::default()
        };
        let merged = file.union(&cli);
        assert!(merged.plain);
        assert!(merged.no_home);
        assert_eq!(merged.home.as_deref(), Some("Index"));
        assert_eq!(merged.history_max, Some(5));
        assert_eq!(
            merged.icon_dirs,
            vec![PathBuf::from("/icons"), PathBuf::from("./icons")]
        );
    }

    #[test]
    fn test_browser_config_from_flags() {
        let flags = ConfigFlags {
            images_path: Some(PathBuf::from("img")),
            bullet_chars: Some("*".to_string()),
            home: Some("Start".to_string()),
            history_max: Some(500),
            ..ConfigFlags::default()
        };
        let config = flags.browser_config();
        assert_eq!(config.images_path, PathBuf::from("img"));
        assert_eq!(config.bullet_chars, "*");
        assert_eq!(config.home_topic.as_deref(), Some("Start"));
        assert_eq!(config.history_max, 500);

        let no_home = ConfigFlags {
            no_home: true,
            ..flags
        };
        assert_eq!(no_home.browser_config().home_topic, None);
    }

    #[test]
    fn test_defaults_match_browser_defaults() {
        assert_eq!(
            ConfigFlags::default().browser_config(),
            BrowserConfig::default()
        );
    }

    #[test]
    fn test_save_load_and_clear_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join(".mdbrowserc");
        let flags = ConfigFlags {
            images_path: Some(PathBuf::from("my images")),
            icon_dirs: vec![PathBuf::from("/usr/share/icons/app")],
            file_match: Some(r"(.*)\.txt$".to_string()),
            title_match: Some(r"^ {0,3}# (.*)".to_string()),
            bullet_chars: Some("-".to_string()),
            home: Some("Start".to_string()),
            no_home: true,
            history_max: Some(20),
            plain: true,
        };

        save_config_flags(&path, &flags).unwrap();
        let loaded = load_config_flags(&path).unwrap();
        assert_eq!(loaded, flags);

        clear_config_flags(&path).unwrap();
        assert!(!path.exists());
        assert_eq!(load_config_flags(&path).unwrap(), ConfigFlags::default());
    }

    #[test]
    fn test_values_keep_surrounding_spaces_through_save() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".mdbrowserc");
        let flags = ConfigFlags {
            bullet_chars: Some(" - ".to_string()),
            title_match: Some(r"^Title: (.*) ".to_string()),
            ..ConfigFlags::default()
        };
        save_config_flags(&path, &flags).unwrap();
        assert_eq!(load_config_flags(&path).unwrap(), flags);
    }

    #[test]
    fn test_trailing_space_after_switch_is_ignored() {
        assert_eq!(line_tokens("--plain "), vec!["--plain".to_string()]);
        assert_eq!(
            line_tokens("--home  Start"),
            vec!["--home".to_string(), " Start".to_string()]
        );
    }

    #[test]
    fn test_rc_lines_with_equals_keep_spaces() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".mdbrowserc");
        fs::write(&path, "# comment\n--title-match=^Title: (.*)\n\n--plain\n").unwrap();
        let loaded = load_config_flags(&path).unwrap();
        assert_eq!(loaded.title_match.as_deref(), Some("^Title: (.*)"));
        assert!(loaded.plain);
    }
}
