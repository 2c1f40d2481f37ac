//! Content types persisted in `content.json`.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::traits::Record;

pub type ProjectId = String;

/// A portfolio entry.
///
/// - `id`: stable identifier, also used as the detail page slug
/// - `title`/`category`/`tools`: the fields search ranks on
/// - `thumbnail`/`video`: optional media URLs, omitted from JSON when absent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub category: String,
    pub year: String,
    pub tools: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
    pub description: String,
    pub images: Vec<String>,
}

impl Record for Project {
    fn id(&self) -> &str { &self.id }
    fn title(&self) -> &str { &self.title }
    fn category(&self) -> &str { &self.category }
    fn tools(&self) -> &[String] { &self.tools }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Testimonial {
    pub id: String,
    pub quote: String,
    pub name: String,
    pub title: String,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AboutContent {
    pub bio: String,
    pub skills: Vec<String>,
}

/// The whole editable site, exactly as stored and exported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteContent {
    pub projects: Vec<Project>,
    pub testimonials: Vec<Testimonial>,
    pub about: AboutContent,
}

impl SiteContent {
    /// Checks invariants serde cannot express. Project ids must be unique.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for p in &self.projects {
            if !seen.insert(p.id.as_str()) {
                return Err(Error::Schema(format!("duplicate project id '{}'", p.id)));
            }
        }
        Ok(())
    }

    pub fn project_index(&self, id: &str) -> Option<usize> {
        self.projects.iter().position(|p| p.id == id)
    }

    pub fn project(&self, id: &str) -> Option<&Project> {
        self.project_index(id).map(|i| &self.projects[i])
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let content: Self = serde_json::from_value(value).map_err(|e| Error::Schema(e.to_string()))?;
        content.validate()?;
        Ok(content)
    }

    pub fn to_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}
