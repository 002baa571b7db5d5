use std::env;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct ConfigFile {
    #[serde(alias = "url")]
    pub api_url: Option<String>,
    pub seed: Option<String>,
    #[serde(alias = "rows_per_page")]
    pub page_size: Option<u32>,
    pub scope: Option<String>,
    pub debounce_ms: Option<u64>,
    pub timeout: Option<usize>,
    pub proxy: Option<String>,
    pub format: Option<String>,
    pub log_level: Option<String>,
    pub no_color: Option<bool>,
}

fn home_dir() -> Option<PathBuf> {
    env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(|| env::var_os("USERPROFILE").map(PathBuf::from))
}

pub fn default_config_path() -> Option<PathBuf> {
    Some(home_dir()?.join(".userlist").join("config.yml"))
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/").or_else(|| path.strip_prefix("~\\")) {
        if let Some(home) = home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

pub fn parse_config(contents: &str) -> Result<ConfigFile, String> {
    serde_yaml::from_str::<Option<ConfigFile>>(contents)
        .map(Option::unwrap_or_default)
        .map_err(|e| e.to_string())
}

pub fn load_config(path: &PathBuf, allow_missing: bool) -> Result<ConfigFile, String> {
    match std::fs::read_to_string(path) {
        Ok(contents) => parse_config(&contents)
            .map_err(|e| format!("failed to parse config '{}': {e}", path.display())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
            Ok(ConfigFile::default())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(format!("config file not found '{}'", path.display()))
        }
        Err(e) => Err(format!("failed to read config '{}': {e}", path.display())),
    }
}

pub fn default_config_yaml() -> &'static str {
    r#"# userlist config
#
# Location (default):
#   ~/.userlist/config.yml

# Directory
api_url: https://randomuser.me/api/
seed: foobar
timeout: 10
# proxy: http://127.0.0.1:8080

# Browsing
# Rows per page, one of 10, 20, 30, 50, 100. Also the number of users fetched.
page_size: 10
# all, name, email, phone or location
scope: all
# Quiet time after the last keystroke before the search runs.
debounce_ms: 500

# Output
format: text
no_color: false
log_level: warn
"#
}

pub fn ensure_default_config_file(path: &PathBuf) -> Result<(), String> {
    if path.exists() {
        return Ok(());
    }
    let parent = path
        .parent()
        .ok_or_else(|| format!("invalid config path '{}'", path.display()))?;
    std::fs::create_dir_all(parent).map_err(|e| {
        format!(
            "failed to create config directory '{}': {e}",
            parent.display()
        )
    })?;
    std::fs::write(path, default_config_yaml())
        .map_err(|e| format!("failed to write config file '{}': {e}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_yaml_parses_to_defaults() {
        let cfg = parse_config(default_config_yaml()).unwrap();
        assert_eq!(cfg.page_size, Some(10));
        assert_eq!(cfg.seed.as_deref(), Some("foobar"));
        assert_eq!(cfg.scope.as_deref(), Some("all"));
        assert_eq!(cfg.debounce_ms, Some(500));
        assert_eq!(cfg.no_color, Some(false));
    }

    #[test]
    fn empty_file_is_empty_config() {
        let cfg = parse_config("# nothing here\n").unwrap();
        assert!(cfg.page_size.is_none());
        assert!(cfg.api_url.is_none());
    }

    #[test]
    fn aliases_are_accepted() {
        let cfg = parse_config("rows_per_page: 30\nurl: http://localhost/api/\n").unwrap();
        assert_eq!(cfg.page_size, Some(30));
        assert_eq!(cfg.api_url.as_deref(), Some("http://localhost/api/"));
    }

    #[test]
    fn missing_file_is_allowed_only_when_asked() {
        let path = env::temp_dir().join("userlist-missing-config-test.yml");
        let _ = std::fs::remove_file(&path);
        assert!(load_config(&path, true).is_ok());
        assert!(load_config(&path, false).is_err());
    }

    #[test]
    fn ensure_default_writes_once() {
        let dir = env::temp_dir().join(format!("userlist-cfg-{}", std::process::id()));
        let path = dir.join("config.yml");
        let _ = std::fs::remove_dir_all(&dir);
        ensure_default_config_file(&path).unwrap();
        std::fs::write(&path, "seed: custom\n").unwrap();
        ensure_default_config_file(&path).unwrap();
        let cfg = load_config(&path, false).unwrap();
        assert_eq!(cfg.seed.as_deref(), Some("custom"));
        let _ = std::fs::remove_dir_all(&dir);
    }
}
