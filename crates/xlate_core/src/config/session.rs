use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use xlate_error::{Result, XlateError};

/// Value used to get and set settings by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingValue {
    Bool(bool),
    UInt(u64),
    Text(String),
}

impl SettingValue {
    pub fn try_as_bool(&self) -> Result<bool> {
        match self {
            Self::Bool(v) => Ok(*v),
            other => Err(XlateError::invalid_setting(format!(
                "Expected a boolean, got {other}"
            ))),
        }
    }

    pub fn try_as_u64(&self) -> Result<u64> {
        match self {
            Self::UInt(v) => Ok(*v),
            other => Err(XlateError::invalid_setting(format!(
                "Expected an unsigned integer, got {other}"
            ))),
        }
    }

    /// Parse a value from user input, e.g. a command line flag.
    ///
    /// Booleans and integers are recognized, everything else is text.
    pub fn parse(s: &str) -> Self {
        match s {
            "true" | "on" => Self::Bool(true),
            "false" | "off" => Self::Bool(false),
            s => match s.parse::<u64>() {
                Ok(v) => Self::UInt(v),
                Err(_) => Self::Text(s.to_string()),
            },
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::UInt(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "'{v}'"),
        }
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        SettingValue::Bool(value)
    }
}

impl From<u64> for SettingValue {
    fn from(value: u64) -> Self {
        SettingValue::UInt(value)
    }
}

impl From<String> for SettingValue {
    fn from(value: String) -> Self {
        SettingValue::Text(value)
    }
}

impl From<&str> for SettingValue {
    fn from(value: &str) -> Self {
        SettingValue::Text(value.to_string())
    }
}

/// Configuration for the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub application_name: String,
    pub strict_translation: bool,
    pub default_string_length: Option<u32>,
}

impl SessionConfig {
    pub fn new() -> Self {
        SessionConfig {
            application_name: String::new(),
            strict_translation: true,
            default_string_length: None,
        }
    }

    pub fn set(&mut self, name: &str, value: impl Into<SettingValue>) -> Result<()> {
        let func = get_setting_functions(name)?;
        (func.set)(value.into(), self)
    }

    pub fn get(&self, name: &str) -> Result<SettingValue> {
        let func = get_setting_functions(name)?;
        Ok((func.get)(self))
    }

    pub fn reset(&mut self, name: &str) -> Result<()> {
        let def_conf = Self::new();
        let func = get_setting_functions(name)?;

        let value = (func.get)(&def_conf);
        (func.set)(value, self)
    }

    pub fn reset_all(&mut self) {
        *self = Self::new();
    }

    /// Names and descriptions of all settings, sorted by name.
    pub fn describe_settings() -> Vec<(&'static str, &'static str)> {
        let mut settings: Vec<_> = GET_SET_FUNCTIONS
            .iter()
            .map(|(name, func)| (*name, func.description))
            .collect();
        settings.sort_unstable();
        settings
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new()
    }
}

struct SettingFunctions {
    description: &'static str,
    set: fn(value: SettingValue, conf: &mut SessionConfig) -> Result<()>,
    get: fn(conf: &SessionConfig) -> SettingValue,
}

impl SettingFunctions {
    const fn new<S: SessionSetting>() -> Self {
        SettingFunctions {
            description: S::DESCRIPTION,
            set: S::set_from_value as _,
            get: S::get_as_value as _,
        }
    }
}

fn get_setting_functions(name: &str) -> Result<&'static SettingFunctions> {
    GET_SET_FUNCTIONS
        .get(name)
        .ok_or_else(|| XlateError::invalid_setting(format!("Missing setting for '{name}'")))
}

fn insert_setting<S: SessionSetting>(map: &mut HashMap<&'static str, SettingFunctions>) {
    if map.insert(S::NAME, SettingFunctions::new::<S>()).is_some() {
        panic!("Duplicate settings names: {}", S::NAME);
    }
}

static GET_SET_FUNCTIONS: LazyLock<HashMap<&'static str, SettingFunctions>> = LazyLock::new(|| {
    let mut map = HashMap::new();

    insert_setting::<ApplicationName>(&mut map);
    insert_setting::<StrictTranslation>(&mut map);
    insert_setting::<DefaultStringLength>(&mut map);

    map
});

pub trait SessionSetting: Sync + Send + 'static {
    const NAME: &'static str;
    const DESCRIPTION: &'static str;

    fn set_from_value(value: SettingValue, conf: &mut SessionConfig) -> Result<()>;
    fn get_as_value(conf: &SessionConfig) -> SettingValue;
}

pub struct ApplicationName;

impl SessionSetting for ApplicationName {
    const NAME: &'static str = "application_name";
    const DESCRIPTION: &'static str = "Name reported in session logging";

    fn set_from_value(value: SettingValue, conf: &mut SessionConfig) -> Result<()> {
        // Any value is a valid name, "123" parses as an integer.
        conf.application_name = match value {
            SettingValue::Text(s) => s,
            other => other.to_string(),
        };
        Ok(())
    }

    fn get_as_value(conf: &SessionConfig) -> SettingValue {
        conf.application_name.clone().into()
    }
}

pub struct StrictTranslation;

impl SessionSetting for StrictTranslation {
    const NAME: &'static str = "strict_translation";
    const DESCRIPTION: &'static str =
        "Fail compilation if any method call is left untranslated";

    fn set_from_value(value: SettingValue, conf: &mut SessionConfig) -> Result<()> {
        conf.strict_translation = value.try_as_bool()?;
        Ok(())
    }

    fn get_as_value(conf: &SessionConfig) -> SettingValue {
        conf.strict_translation.into()
    }
}

const MAX_STRING_LENGTH: u64 = 10_485_760;

pub struct DefaultStringLength;

impl SessionSetting for DefaultStringLength {
    const NAME: &'static str = "default_string_length";
    const DESCRIPTION: &'static str =
        "Length bound applied to casts to unbounded text, 0 for no bound";

    fn set_from_value(value: SettingValue, conf: &mut SessionConfig) -> Result<()> {
        let val = value.try_as_u64()?;
        if val > MAX_STRING_LENGTH {
            return Err(XlateError::invalid_setting(format!(
                "String length cannot be greater than {MAX_STRING_LENGTH}"
            )));
        }

        conf.default_string_length = match val {
            0 => None,
            n => Some(n as u32),
        };
        Ok(())
    }

    fn get_as_value(conf: &SessionConfig) -> SettingValue {
        (conf.default_string_length.unwrap_or(0) as u64).into()
    }
}

#[cfg(test)]
mod tests {
    use xlate_error::ErrorKind;

    use super::*;

    #[test]
    fn set_and_get() {
        let mut conf = SessionConfig::new();
        conf.set("strict_translation", false).unwrap();
        assert_eq!(SettingValue::Bool(false), conf.get("strict_translation").unwrap());

        conf.set("default_string_length", 64_u64).unwrap();
        assert_eq!(Some(64), conf.default_string_length);

        conf.set("default_string_length", 0_u64).unwrap();
        assert_eq!(None, conf.default_string_length);
    }

    #[test]
    fn reset_setting() {
        let mut conf = SessionConfig::new();
        conf.set("application_name", "reports").unwrap();
        conf.reset("application_name").unwrap();
        assert_eq!("", conf.application_name);

        conf.set("strict_translation", false).unwrap();
        conf.set("default_string_length", 32_u64).unwrap();
        conf.reset_all();
        assert_eq!(SessionConfig::new(), conf);
    }

    #[test]
    fn application_name_from_parsed_input() {
        let mut conf = SessionConfig::new();
        conf.set("application_name", SettingValue::parse("123")).unwrap();
        assert_eq!("123", conf.application_name);

        conf.set("application_name", SettingValue::parse("true")).unwrap();
        assert_eq!("true", conf.application_name);

        conf.set("application_name", SettingValue::parse("nightly")).unwrap();
        assert_eq!(
            SettingValue::Text("nightly".to_string()),
            conf.get("application_name").unwrap()
        );
    }

    #[test]
    fn unknown_setting() {
        let mut conf = SessionConfig::new();
        let err = conf.set("enable_magic", true).unwrap_err();
        assert_eq!(ErrorKind::InvalidSetting, err.kind());
    }

    #[test]
    fn wrong_value_kind() {
        let mut conf = SessionConfig::new();
        let err = conf.set("strict_translation", "yes please").unwrap_err();
        assert_eq!(ErrorKind::InvalidSetting, err.kind());
        assert!(conf.strict_translation);
    }

    #[test]
    fn length_upper_bound() {
        let mut conf = SessionConfig::new();
        conf.set("default_string_length", MAX_STRING_LENGTH + 1)
            .unwrap_err();
    }

    #[test]
    fn parse_values() {
        assert_eq!(SettingValue::Bool(true), SettingValue::parse("on"));
        assert_eq!(SettingValue::UInt(12), SettingValue::parse("12"));
        assert_eq!(SettingValue::Text("abc".to_string()), SettingValue::parse("abc"));
    }

    #[test]
    fn describe_sorted() {
        let names: Vec<_> = SessionConfig::describe_settings()
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(
            vec!["application_name", "default_string_length", "strict_translation"],
            names
        );
    }
}
