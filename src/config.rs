//! Declarative menu configuration: color settings and menu trees from TOML.

use derive_more::{AsRef, Deref, Display, From, Into};
use directories::ProjectDirs;
use palette::Srgba;
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Name a `[[menu]]` block is declared under and submenu entries refer to.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Display, Deref, From, Into, AsRef, Deserialize, Serialize,
)]
#[serde(transparent)]
pub struct MenuName(String);

crate::impl_string_newtype!(MenuName);

/// Name of a host-registered click or predicate handler.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Display, Deref, From, Into, AsRef, Deserialize, Serialize,
)]
#[serde(transparent)]
pub struct CallbackName(String);

crate::impl_string_newtype!(CallbackName);

/// Name of a host-side boolean control variable.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Display, Deref, From, Into, AsRef, Deserialize, Serialize,
)]
#[serde(transparent)]
pub struct ControlName(String);

crate::impl_string_newtype!(ControlName);

/// Color in `#rrggbb` or `#rrggbbaa` hex notation.
#[derive(Debug, Clone, Copy, PartialEq, DeserializeFromStr, SerializeDisplay)]
pub struct PieColor(pub Srgba);

#[derive(Debug, Error, PartialEq)]
#[error("color '{0}' is not #rrggbb or #rrggbbaa hex notation")]
pub struct ColorParseError(String);

impl FromStr for PieColor {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || ColorParseError(s.to_string());
        let hex = s.strip_prefix('#').ok_or_else(bad)?;
        if !hex.is_ascii() || (hex.len() != 6 && hex.len() != 8) {
            return Err(bad());
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| bad());
        let r = byte(0)?;
        let g = byte(2)?;
        let b = byte(4)?;
        let a = if hex.len() == 8 { byte(6)? } else { 255 };
        Ok(Self(Srgba::new(r, g, b, a).into_format()))
    }
}

impl fmt::Display for PieColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c: Srgba<u8> = self.0.into_format();
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", c.red, c.green, c.blue, c.alpha)
    }
}

/// The `[colors]` block. Only read when `override_colors` is set.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ColorSettings {
    pub override_colors: bool,
    pub opacity: f32,
    pub fade: f32,
    pub background: Option<PieColor>,
    pub highlight: Option<PieColor>,
}

impl Default for ColorSettings {
    fn default() -> Self {
        Self {
            override_colors: false,
            opacity: 1.0,
            fade: 0.0,
            background: None,
            highlight: None,
        }
    }
}

/// One `[[menu]]` block: a named menu and its ordered entries.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MenuDef {
    pub name: MenuName,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub entries: Vec<EntryDef>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EntryDef {
    PieSlice(SliceDef),
    PieSeparator,
    PieMenu(SubmenuDef),
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SliceDef {
    pub label: String,
    #[serde(default)]
    pub start_autohide: bool,
    #[serde(default)]
    pub autohide: bool,
    #[serde(default)]
    pub check_enable_once: bool,
    pub on_click: Option<CallbackDef>,
    pub on_enable: Option<CallbackDef>,
    pub on_visible: Option<CallbackDef>,
}

/// Handler reference with an optional fixed parameter. `control` names a
/// control variable to sync with the verdict; only meaningful on `on_enable`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CallbackDef {
    pub function: CallbackName,
    #[serde(default)]
    pub parameter: String,
    pub control: Option<ControlName>,
}

/// Reference to another declared menu. Without a label the target menu's
/// own label is shown on the wedge.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SubmenuDef {
    pub name: MenuName,
    pub label: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub colors: ColorSettings,
    #[serde(default, rename = "menu")]
    pub menus: Vec<MenuDef>,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}

pub fn get_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "piemenu", "piemenu").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(config::Environment::with_prefix("PIEMENU"))
        .build()?;

    Ok(s.try_deserialize()?)
}

/// The user's config, or the bundled menus when there is none or it fails
/// to parse.
pub fn load_or_default() -> Config {
    match load_config() {
        Ok(c) if !c.menus.is_empty() => c,
        Ok(_) => default_config(),
        Err(e) => {
            log::warn!("Falling back to default menus: {e}");
            default_config()
        }
    }
}

/// Parses the bundled `default_config.toml`.
pub fn default_config() -> Config {
    config::Config::builder()
        .add_source(config::File::from_str(
            DEFAULT_CONFIG,
            config::FileFormat::Toml,
        ))
        .build()
        .and_then(|s| s.try_deserialize())
        .unwrap_or_default()
}

pub fn write_default_config() -> std::io::Result<std::path::PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors_parse_with_and_without_alpha() {
        let c: PieColor = "#ff8000".parse().unwrap();
        assert_eq!(c.to_string(), "#ff8000ff");
        assert!((c.0.red - 1.0).abs() < 1e-6);
        assert!((c.0.alpha - 1.0).abs() < 1e-6);

        let c: PieColor = "#FF800080".parse().unwrap();
        assert!((c.0.alpha - 128.0 / 255.0).abs() < 1e-6);

        for bad in ["808080", "#80", "#gggggg", "#ff80001", "#ffffffffff"] {
            assert!(bad.parse::<PieColor>().is_err(), "{bad}");
        }
    }

    #[test]
    fn menu_tree_deserializes_from_toml() {
        let toml = r##"
            [colors]
            override_colors = true
            opacity = 0.8
            fade = 0.25
            background = "#262626cc"

            [[menu]]
            name = "object"
            label = "Object"

            [[menu.entries]]
            type = "pie_slice"
            label = "Sit Down"
            start_autohide = true
            on_click = { function = "object.sit", parameter = "sit" }
            on_enable = { function = "object.can_sit", control = "sitting" }

            [[menu.entries]]
            type = "pie_separator"

            [[menu.entries]]
            type = "pie_menu"
            name = "more"
        "##;

        let config: Config = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert!(config.colors.override_colors);
        assert_eq!(config.colors.opacity, 0.8);
        assert!(config.colors.background.is_some());
        assert!(config.colors.highlight.is_none());

        let menu = &config.menus[0];
        assert_eq!(menu.name, MenuName::new("object"));
        assert_eq!(menu.entries.len(), 3);

        match &menu.entries[0] {
            EntryDef::PieSlice(slice) => {
                assert_eq!(slice.label, "Sit Down");
                assert!(slice.start_autohide);
                assert!(!slice.autohide);
                let click = slice.on_click.as_ref().unwrap();
                assert_eq!(click.function, CallbackName::new("object.sit"));
                assert_eq!(click.parameter, "sit");
                let enable = slice.on_enable.as_ref().unwrap();
                assert_eq!(enable.control, Some(ControlName::new("sitting")));
                assert_eq!(enable.parameter, "");
            }
            other => panic!("expected slice, got {other:?}"),
        }
        assert!(matches!(menu.entries[1], EntryDef::PieSeparator));
        match &menu.entries[2] {
            EntryDef::PieMenu(sub) => {
                assert_eq!(sub.name, MenuName::new("more"));
                assert_eq!(sub.label, None);
            }
            other => panic!("expected submenu, got {other:?}"),
        }
    }

    #[test]
    fn bundled_default_config_parses() {
        let config = default_config();
        assert!(!config.menus.is_empty());
        // every submenu entry refers to a declared menu
        for menu in &config.menus {
            for entry in &menu.entries {
                if let EntryDef::PieMenu(sub) = entry {
                    assert!(
                        config.menus.iter().any(|m| m.name == sub.name),
                        "undeclared submenu {}",
                        sub.name
                    );
                }
            }
        }
    }
}
