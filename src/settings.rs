use ini::{Ini, Properties};
use shellexpand::env_with_context_no_errors;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;

static CONFIG_PATHS: &[&str] = &[
    "/etc/rangenotation",
    "$XDG_CONFIG_HOME/rangenotation",
    "$HOME/.local/etc/rangenotation",
];

static CONFIG_FILE: &str = "rn.conf";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read configuration: {0}")]
    Ini(#[from] ini::Error),
    #[error("unexpected section '{0}' in configuration")]
    UnexpectedSection(String),
    #[error("unexpected property '{0}' in configuration")]
    UnexpectedProperty(String),
    #[error("invalid value '{value}' for property '{key}'")]
    InvalidValue { key: String, value: String },
}

/// Default options of the rn command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Separator between expanded ids
    pub separator: String,
    /// Whether ids are zero-padded when expanded
    pub padded: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            separator: " ".to_string(),
            padded: false,
        }
    }
}

/// Settings read from a single file, merged on top of each other
#[derive(Debug, Default)]
struct SettingsLayer {
    separator: Option<String>,
    padded: Option<bool>,
}

impl TryFrom<&Properties> for SettingsLayer {
    type Error = SettingsError;

    fn try_from(props: &Properties) -> Result<Self, Self::Error> {
        let mut res = Self::default();

        for (k, v) in props.iter() {
            match k {
                "separator" => {
                    res.separator = Some(unquote(v).to_string());
                }
                "padded" => {
                    let padded = parse_bool(v).ok_or_else(|| SettingsError::InvalidValue {
                        key: k.to_string(),
                        value: v.to_string(),
                    })?;
                    res.padded = Some(padded);
                }
                _ => {
                    return Err(SettingsError::UnexpectedProperty(k.to_string()));
                }
            }
        }

        Ok(res)
    }
}

impl SettingsLayer {
    fn from_reader(mut reader: impl std::io::Read) -> Result<Self, SettingsError> {
        let parser = Ini::read_from_noescape(&mut reader)?;
        let mut layer = SettingsLayer::default();

        for (sec, props) in parser.iter() {
            match sec {
                None | Some("rn") => layer.merge(props.try_into()?),
                Some(sec) => return Err(SettingsError::UnexpectedSection(sec.to_string())),
            }
        }

        Ok(layer)
    }

    fn merge(&mut self, other: Self) {
        if other.separator.is_some() {
            self.separator = other.separator;
        }
        if other.padded.is_some() {
            self.padded = other.padded;
        }
    }

    fn apply(self, settings: &mut Settings) {
        if let Some(separator) = self.separator {
            settings.separator = separator;
        }
        if let Some(padded) = self.padded {
            settings.padded = padded;
        }
    }
}

fn parse_bool(v: &str) -> Option<bool> {
    match v.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

// Strip a single pair of matching quotes so that whitespace separators can be configured
fn unquote(v: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = v
            .strip_prefix(quote)
            .and_then(|v| v.strip_suffix(quote))
        {
            return inner;
        }
    }
    v
}

// Expand environment variables in a path
// Returns None in case of non-utf8 path
fn resolve_config_path(path: &Path) -> Option<PathBuf> {
    let context = |s: &str| match s {
        "HOME" => std::env::var("HOME").ok(),
        "XDG_CONFIG_HOME" => std::env::var("XDG_CONFIG_HOME").ok().or_else(|| {
            std::env::var("HOME")
                .ok()
                .and_then(|h| Path::new(&h).join(".config").to_str().map(str::to_string))
        }),
        _ => None,
    };

    Some(PathBuf::from(
        env_with_context_no_errors(path.to_str()?, context).as_ref(),
    ))
}

impl Settings {
    /// Load settings from the default configuration files
    ///
    /// Files are looked up in /etc/rangenotation, $XDG_CONFIG_HOME/rangenotation
    /// and $HOME/.local/etc/rangenotation, in that order. Later files take
    /// precedence and missing files are ignored.
    pub fn from_config() -> Result<Self, SettingsError> {
        Self::from_dirs(
            CONFIG_PATHS
                .iter()
                .filter_map(|path| resolve_config_path(Path::new(path))),
        )
    }

    /// Load settings from the configuration files found in a list of directories
    pub fn from_dirs(
        dirs: impl IntoIterator<Item = impl AsRef<Path>>,
    ) -> Result<Self, SettingsError> {
        let mut layer = SettingsLayer::default();

        for dir in dirs {
            let path = dir.as_ref().join(CONFIG_FILE);
            // Any failure to open the file (not found, permissions, ...) means it is skipped
            let Ok(file) = File::open(&path) else {
                continue;
            };
            log::debug!("loading settings from {}", path.display());
            layer.merge(SettingsLayer::from_reader(BufReader::new(file))?);
        }

        let mut settings = Settings::default();
        layer.apply(&mut settings);
        Ok(settings)
    }

    /// Load settings from a single configuration file
    pub fn from_reader(reader: impl std::io::Read) -> Result<Self, SettingsError> {
        let mut settings = Settings::default();
        SettingsLayer::from_reader(reader)?.apply(&mut settings);
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_from_reader() {
        let config = "[rn]\nseparator = \",\"\npadded = yes\n";
        assert_eq!(
            Settings::from_reader(config.as_bytes()).unwrap(),
            Settings {
                separator: ",".to_string(),
                padded: true
            }
        );

        let config = "padded = false\n";
        assert_eq!(
            Settings::from_reader(config.as_bytes()).unwrap(),
            Settings::default()
        );

        assert_eq!(
            Settings::from_reader("".as_bytes()).unwrap(),
            Settings::default()
        );
    }

    #[test]
    fn test_settings_invalid() {
        match Settings::from_reader("[rn]\ncolor = red\n".as_bytes()) {
            Err(SettingsError::UnexpectedProperty(p)) => assert_eq!(p, "color"),
            e => panic!("Expected UnexpectedProperty error, got {e:?}"),
        }

        match Settings::from_reader("[Main]\npadded = true\n".as_bytes()) {
            Err(SettingsError::UnexpectedSection(s)) => assert_eq!(s, "Main"),
            e => panic!("Expected UnexpectedSection error, got {e:?}"),
        }

        match Settings::from_reader("[rn]\npadded = maybe\n".as_bytes()) {
            Err(SettingsError::InvalidValue { key, value }) => {
                assert_eq!(key, "padded");
                assert_eq!(value, "maybe");
            }
            e => panic!("Expected InvalidValue error, got {e:?}"),
        }
    }

    #[test]
    fn test_settings_from_dirs() {
        let system = tempfile::tempdir().unwrap();
        let user = tempfile::tempdir().unwrap();
        let missing = system.path().join("missing");

        std::fs::write(
            system.path().join(CONFIG_FILE),
            "[rn]\nseparator = \",\"\npadded = true\n",
        )
        .unwrap();
        std::fs::write(user.path().join(CONFIG_FILE), "[rn]\npadded = false\n").unwrap();

        let settings =
            Settings::from_dirs([system.path(), missing.as_path(), user.path()]).unwrap();

        assert_eq!(
            settings,
            Settings {
                separator: ",".to_string(),
                padded: false
            }
        );
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("\" \""), " ");
        assert_eq!(unquote("','"), ",");
        assert_eq!(unquote(";"), ";");
        assert_eq!(unquote("\"a'"), "\"a'");
    }

    #[test]
    fn test_resolve_config_path() {
        assert_eq!(
            resolve_config_path(Path::new("/etc/rangenotation")),
            Some(PathBuf::from("/etc/rangenotation"))
        );
    }
}
