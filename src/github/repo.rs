use std::str::FromStr;

use crate::error::Error;

/// A repository identifier in the form `owner/name`.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct RepoId {
    pub owner: String,
    pub repo: String,
}

impl std::fmt::Display for RepoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

impl FromStr for RepoId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('/').collect();
        if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
            Err(Error::Usage(format!(
                "invalid repository {:?}, expected 'owner/repo'",
                s
            )))
        } else {
            Ok(RepoId {
                owner: parts[0].to_string(),
                repo: parts[1].to_string(),
            })
        }
    }
}

/// Which release of a repository to resolve.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub enum VersionSelector {
    #[default]
    Latest,
    Tag(String),
}

impl VersionSelector {
    /// An absent or empty version means the latest release.
    pub fn from_version(version: Option<&str>) -> Self {
        match version {
            Some(tag) if !tag.is_empty() => VersionSelector::Tag(tag.to_string()),
            _ => VersionSelector::Latest,
        }
    }

    /// Path segment under `/releases/`.
    pub fn path(&self) -> String {
        match self {
            VersionSelector::Latest => "latest".to_string(),
            VersionSelector::Tag(tag) => format!("tags/{}", tag),
        }
    }
}

impl std::fmt::Display for VersionSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VersionSelector::Latest => write!(f, "latest release"),
            VersionSelector::Tag(tag) => write!(f, "release {}", tag),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_repo_valid() {
        let repo = RepoId::from_str("octo/tool").unwrap();
        assert_eq!(
            repo,
            RepoId {
                owner: "octo".to_string(),
                repo: "tool".to_string()
            }
        );
        assert_eq!(repo.to_string(), "octo/tool");
    }

    #[test]
    fn test_parse_repo_invalid() {
        for input in ["", "octo", "octo/", "/tool", "octo/tool/extra"] {
            let err = RepoId::from_str(input).unwrap_err();
            assert!(matches!(err, Error::Usage(_)), "input {:?}", input);
        }
    }

    #[test]
    fn test_selector_from_version() {
        assert_eq!(VersionSelector::from_version(None), VersionSelector::Latest);
        assert_eq!(VersionSelector::from_version(Some("")), VersionSelector::Latest);
        assert_eq!(
            VersionSelector::from_version(Some("v1.0.0")),
            VersionSelector::Tag("v1.0.0".into())
        );
    }

    #[test]
    fn test_selector_path() {
        assert_eq!(VersionSelector::Latest.path(), "latest");
        assert_eq!(VersionSelector::Tag("0.7.2".into()).path(), "tags/0.7.2");
    }
}
