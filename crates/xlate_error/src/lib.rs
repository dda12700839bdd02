use std::error::Error;
use std::fmt;

pub type Result<T, E = XlateError> = std::result::Result<T, E>;

/// Broad category of an error.
///
/// Callers match on this instead of the message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Other,
    /// A module was requested for a session but never activated in the
    /// container the session uses.
    Configuration,
    /// A method call reached the end of compilation without any rule
    /// translating it.
    Untranslatable,
    /// Unknown setting name, or a value of the wrong kind for a setting.
    InvalidSetting,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Other => write!(f, "Error"),
            Self::Configuration => write!(f, "Configuration error"),
            Self::Untranslatable => write!(f, "Translation error"),
            Self::InvalidSetting => write!(f, "Setting error"),
        }
    }
}

#[derive(Debug)]
pub struct XlateError {
    inner: Box<XlateErrorInner>,
}

#[derive(Debug)]
struct XlateErrorInner {
    kind: ErrorKind,
    msg: String,
    source: Option<Box<dyn Error + Send + Sync>>,
    fields: Vec<ErrorField>,
}

/// Extra context attached to an error.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ErrorField {
    key: String,
    value: String,
}

impl XlateError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self::with_kind(ErrorKind::Other, msg)
    }

    pub fn with_kind(kind: ErrorKind, msg: impl Into<String>) -> Self {
        XlateError {
            inner: Box::new(XlateErrorInner {
                kind,
                msg: msg.into(),
                source: None,
                fields: Vec::new(),
            }),
        }
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::with_kind(ErrorKind::Configuration, msg)
    }

    pub fn untranslatable(msg: impl Into<String>) -> Self {
        Self::with_kind(ErrorKind::Untranslatable, msg)
    }

    pub fn invalid_setting(msg: impl Into<String>) -> Self {
        Self::with_kind(ErrorKind::InvalidSetting, msg)
    }

    pub fn with_source(msg: impl Into<String>, source: Box<dyn Error + Send + Sync>) -> Self {
        let mut err = Self::new(msg);
        err.inner.source = Some(source);
        err
    }

    /// Attach a key/value pair to the error.
    pub fn with_field(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.inner.fields.push(ErrorField {
            key: key.into(),
            value: value.to_string(),
        });
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.inner.kind
    }

    pub fn message(&self) -> &str {
        &self.inner.msg
    }

    /// Get the value of the first field with the given key.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.inner
            .fields
            .iter()
            .find(|f| f.key == key)
            .map(|f| f.value.as_str())
    }
}

impl fmt::Display for XlateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.inner.kind, self.inner.msg)?;

        if !self.inner.fields.is_empty() {
            write!(f, " (")?;
            for (idx, field) in self.inner.fields.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}: {}", field.key, field.value)?;
            }
            write!(f, ")")?;
        }

        if let Some(source) = &self.inner.source {
            write!(f, "\nCaused by: {source}")?;
        }

        Ok(())
    }
}

impl Error for XlateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.inner
            .source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

impl From<std::io::Error> for XlateError {
    fn from(value: std::io::Error) -> Self {
        XlateError::with_source("IO error", Box::new(value))
    }
}

impl From<fmt::Error> for XlateError {
    fn from(value: fmt::Error) -> Self {
        XlateError::with_source("Format error", Box::new(value))
    }
}

/// Wrap foreign errors with additional context.
pub trait ResultExt<T, E> {
    fn context(self, msg: &'static str) -> Result<T>;
    fn context_fn<F: Fn() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Error + Send + Sync + 'static> ResultExt<T, E> for std::result::Result<T, E> {
    fn context(self, msg: &'static str) -> Result<T> {
        self.map_err(|e| XlateError::with_source(msg, Box::new(e)))
    }

    fn context_fn<F: Fn() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| XlateError::with_source(f(), Box::new(e)))
    }
}

pub trait OptionExt<T> {
    /// Return an error if the option is None.
    fn required(self, what: &'static str) -> Result<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn required(self, what: &'static str) -> Result<T> {
        self.ok_or_else(|| XlateError::new(format!("Missing required value: {what}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_with_fields() {
        let err = XlateError::configuration("Module not activated")
            .with_field("module", "Geometry")
            .with_field("use_method", "use_geometry");

        assert_eq!(
            "Configuration error: Module not activated (module: Geometry, use_method: use_geometry)",
            err.to_string()
        );
    }

    #[test]
    fn field_lookup() {
        let err = XlateError::new("oops").with_field("a", 1).with_field("b", 2);
        assert_eq!(Some("2"), err.field("b"));
        assert_eq!(None, err.field("c"));
        assert_eq!(ErrorKind::Other, err.kind());
    }

    #[test]
    fn context_keeps_source() {
        let res: std::result::Result<(), std::io::Error> =
            Err(std::io::Error::other("disk on fire"));
        let err = res.context("reading expression").unwrap_err();

        assert_eq!("reading expression", err.message());
        assert!(err.source().is_some());
    }

    #[test]
    fn required_none() {
        let err = None::<i32>.required("container").unwrap_err();
        assert_eq!("Missing required value: container", err.message());
    }
}
