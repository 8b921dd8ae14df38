use crate::config::ProjectId;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ProjectCollection {
    pub data: Vec<ProjectEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectEntry {
    pub id: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Project ids in the order the API returned them. Consumed once.
pub struct Projects(Box<dyn Iterator<Item = ProjectId>>);

impl Projects {
    pub fn new<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = ProjectId>,
        I::IntoIter: 'static,
    {
        Self(Box::new(ids.into_iter()))
    }
}

impl Iterator for Projects {
    type Item = ProjectId;

    fn next(&mut self) -> Option<ProjectId> {
        self.0.next()
    }
}
