//! Artifact kinds, write policies, and rendered output.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Every kind of file the pipeline writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Readme,
    Dockerfile,
    HelmChart,
    ArgoApplication,
    CiWorkflow,
    Dashboard,
    SharedSchema,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 7] = [
        Self::Readme,
        Self::Dockerfile,
        Self::HelmChart,
        Self::ArgoApplication,
        Self::CiWorkflow,
        Self::Dashboard,
        Self::SharedSchema,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Readme => "readme",
            Self::Dockerfile => "dockerfile",
            Self::HelmChart => "helm_chart",
            Self::ArgoApplication => "argo_application",
            Self::CiWorkflow => "ci_workflow",
            Self::Dashboard => "dashboard",
            Self::SharedSchema => "shared_schema",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArtifactKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == normalized)
            .ok_or_else(|| DomainError::UnknownArtifactKind(s.to_owned()))
    }
}

/// What to do when the target file already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WritePolicy {
    /// Replace the file on every run; the registry is the source of truth.
    Overwrite,
    /// Write once; later runs leave manual edits alone.
    #[serde(alias = "preserve_existing")]
    Preserve,
}

impl fmt::Display for WritePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overwrite => f.write_str("overwrite"),
            Self::Preserve => f.write_str("preserve"),
        }
    }
}

impl FromStr for WritePolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "overwrite" => Ok(Self::Overwrite),
            "preserve" | "preserve_existing" | "preserve-existing" => Ok(Self::Preserve),
            _ => Err(DomainError::UnknownWritePolicy(s.to_owned())),
        }
    }
}

/// Per-artifact write policy.
///
/// The default table keeps README and CI workflows once written and
/// regenerates everything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyTable {
    policies: BTreeMap<ArtifactKind, WritePolicy>,
}

impl Default for PolicyTable {
    fn default() -> Self {
        let policies = ArtifactKind::ALL
            .into_iter()
            .map(|kind| {
                let policy = match kind {
                    ArtifactKind::Readme | ArtifactKind::CiWorkflow => WritePolicy::Preserve,
                    _ => WritePolicy::Overwrite,
                };
                (kind, policy)
            })
            .collect();
        Self { policies }
    }
}

impl PolicyTable {
    pub fn policy_for(&self, kind: ArtifactKind) -> WritePolicy {
        self.policies
            .get(&kind)
            .copied()
            .unwrap_or(WritePolicy::Overwrite)
    }

    pub fn with_policy(mut self, kind: ArtifactKind, policy: WritePolicy) -> Self {
        self.policies.insert(kind, policy);
        self
    }

    /// Apply `kind = policy` overrides, e.g. from a config file.
    pub fn with_overrides<'a, I>(mut self, overrides: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (kind, policy) in overrides {
            self.policies.insert(kind.parse()?, policy.parse()?);
        }
        Ok(self)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ArtifactKind, WritePolicy)> + '_ {
        self.policies.iter().map(|(k, p)| (*k, *p))
    }
}

/// A file ready to be written, relative to the repository root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    pub kind: ArtifactKind,
    pub path: PathBuf,
    pub content: String,
}

impl RenderedFile {
    pub fn new(kind: ArtifactKind, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
            content: content.into(),
        }
    }
}
