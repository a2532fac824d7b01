//! CLI Configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Where the configuration file lives
#[derive(Debug, Clone, Default)]
pub struct Location {
    pub explicit: Option<PathBuf>,
    pub profile: Option<String>,
}

impl Location {
    pub fn path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.explicit {
            return Ok(path.clone());
        }
        let home = dirs::home_dir().context("cannot find home directory")?;
        let filename = match &self.profile {
            Some(p) => format!("config.{}.toml", p),
            None => "config.toml".to_string(),
        };
        Ok(home.join(".sar").join(filename))
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub assessor: AssessorDefaults,
    #[serde(default)]
    pub report: ReportDefaults,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessorDefaults {
    pub name: Option<String>,
    pub organization: Option<String>,
    #[serde(default)]
    pub credentials: Vec<String>,
    pub contact_info: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDefaults {
    pub title: Option<String>,
    pub scope: Option<String>,
    pub format: Option<String>,
    pub catalogue: Option<PathBuf>,
}

impl Config {
    /// Load from disk; a missing file yields the defaults
    pub fn load(location: &Location) -> Result<Self> {
        let path = location.path()?;
        if !path.exists() {
            // an explicitly named file must exist
            if location.explicit.is_some() {
                anyhow::bail!("config file {} not found", path.display());
            }
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config = Self::parse(&content).with_context(|| format!("parsing {}", path.display()))?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn save(&self, location: &Location) -> Result<PathBuf> {
        let path = location.path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content).with_context(|| format!("writing {}", path.display()))?;
        Ok(path)
    }

    /// Starter file written by `sar config init`
    pub fn template() -> Self {
        Self {
            assessor: AssessorDefaults {
                name: Some("Assessor Name".into()),
                organization: Some("Organization".into()),
                credentials: Vec::new(),
                contact_info: Some("assessor@example.com".into()),
            },
            report: ReportDefaults {
                title: None,
                scope: None,
                format: Some("html".into()),
                catalogue: None,
            },
        }
    }
}
