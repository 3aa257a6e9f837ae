//! Service records: the one entity in a registry.
//!
//! A registry file deserializes into [`RawServiceRecord`]s with every field
//! optional. [`ServiceRecord::from_raw`] turns each into a typed record or a
//! [`DomainError`] naming the offending entry and field, so a gap in the
//! registry is reported at load time instead of leaking into generated files
//! as an empty substitution.

use std::fmt;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::error::DomainError;

/// Top-level registry document (`services: [...]`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RegistryDocument {
    #[serde(default)]
    pub services: Vec<RawServiceRecord>,
}

/// A registry entry exactly as written, before validation.
///
/// Text fields take any scalar, so `team: 42` reads as `"42"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawServiceRecord {
    #[serde(default, deserialize_with = "scalar_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub path: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub language: Option<String>,
    pub port: Option<PortValue>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub namespace: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub team: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Signed(i64),
    Unsigned(u64),
    Float(f64),
    Bool(bool),
}

fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(|scalar| match scalar {
        Scalar::Text(s) => s,
        Scalar::Signed(n) => n.to_string(),
        Scalar::Unsigned(n) => n.to_string(),
        Scalar::Float(n) => n.to_string(),
        Scalar::Bool(b) => b.to_string(),
    }))
}

/// Ports may be written as `8080` or `"8080"`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PortValue {
    Number(i64),
    Text(String),
}

impl fmt::Display for PortValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// A validated service record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceRecord {
    pub name: String,
    pub path: PathBuf,
    pub language: String,
    pub port: u16,
    pub namespace: String,
    pub team: String,
}

impl ServiceRecord {
    /// Validate a raw entry. `index` is the entry's position in the registry
    /// and only used for error reporting.
    pub fn from_raw(index: usize, raw: RawServiceRecord) -> Result<Self, DomainError> {
        let name_hint = raw.name.as_deref().map(str::trim).filter(|n| !n.is_empty());
        let name_hint = name_hint.map(str::to_owned);

        let require = |value: Option<String>, field: &'static str| {
            value
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| DomainError::MissingField {
                    index,
                    name: name_hint.clone(),
                    field,
                })
        };

        let name = require(raw.name, "name")?;
        let path = require(raw.path, "path")?;
        let language = require(raw.language, "language")?;
        let namespace = require(raw.namespace, "namespace")?;
        let team = require(raw.team, "team")?;

        let port = match raw.port {
            None => {
                return Err(DomainError::MissingField {
                    index,
                    name: name_hint,
                    field: "port",
                });
            }
            Some(value) => parse_port(&value).ok_or_else(|| DomainError::InvalidPort {
                index,
                name: name_hint.clone(),
                value: value.to_string(),
            })?,
        };

        validate_token(&name)?;
        let path = validate_relative(&name, &path)?;

        Ok(Self {
            name,
            path,
            language,
            port,
            namespace,
            team,
        })
    }

    /// Build a record directly. Used by tests and programmatic callers.
    pub fn new(
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        language: impl Into<String>,
        port: u16,
        namespace: impl Into<String>,
        team: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            language: language.into(),
            port,
            namespace: namespace.into(),
            team: team.into(),
        }
    }
}

impl fmt::Display for ServiceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, :{}, ns={}, team={})",
            self.name, self.language, self.port, self.namespace, self.team
        )
    }
}

/// Validate every entry of a registry document, stopping at the first error.
pub fn validate_registry(doc: RegistryDocument) -> Result<Vec<ServiceRecord>, DomainError> {
    doc.services
        .into_iter()
        .enumerate()
        .map(|(i, raw)| ServiceRecord::from_raw(i, raw))
        .collect()
}

fn parse_port(value: &PortValue) -> Option<u16> {
    let n = match value {
        PortValue::Number(n) => *n,
        PortValue::Text(s) => s.trim().parse::<i64>().ok()?,
    };
    u16::try_from(n).ok().filter(|p| *p != 0)
}

/// A name ends up as a directory and file stem, so it has to be a single
/// plain path component.
pub(crate) fn validate_token(name: &str) -> Result<(), DomainError> {
    let reason = if name.starts_with('.') {
        Some("cannot start with '.'")
    } else if name.contains('/') || name.contains('\\') {
        Some("cannot contain path separators")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(DomainError::InvalidName {
            name: name.to_owned(),
            reason: reason.into(),
        }),
        None => Ok(()),
    }
}

fn validate_relative(name: &str, path: &str) -> Result<PathBuf, DomainError> {
    let p = Path::new(path);
    let contained = p
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));

    if contained && p.components().any(|c| matches!(c, Component::Normal(_))) {
        Ok(p.to_path_buf())
    } else {
        Err(DomainError::UnsafePath {
            name: name.to_owned(),
            path: path.to_owned(),
        })
    }
}
