//! Stage catalog
//!
//! Ordered list of unique stage names. The position of a name in the catalog
//! is the stage index carried by `GAMESTART` commands.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of stages in the classic stage set
pub const CLASSIC_STAGE_COUNT: usize = 35;

/// Reasons a list of names cannot become a catalog
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("stage catalog must contain at least one stage")]
    Empty,
    #[error("stage name at index {index} is empty")]
    EmptyName { index: usize },
    #[error("stage name {name:?} appears more than once")]
    Duplicate { name: String },
}

/// Ordered, immutable list of stage names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct StageCatalog {
    names: Vec<String>,
}

impl StageCatalog {
    /// Build a catalog, rejecting empty names and duplicates
    pub fn new<I, S>(names: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(CatalogError::Empty);
        }
        for (index, name) in names.iter().enumerate() {
            if name.is_empty() {
                return Err(CatalogError::EmptyName { index });
            }
            if names[..index].contains(name) {
                log::warn!("Rejecting stage catalog: duplicate stage {:?}", name);
                return Err(CatalogError::Duplicate { name: name.clone() });
            }
        }
        Ok(Self { names })
    }

    /// The classic stage set, named "1" through "35"
    pub fn classic() -> Self {
        Self {
            names: (1..=CLASSIC_STAGE_COUNT).map(|n| n.to_string()).collect(),
        }
    }

    /// Position of `name` in the catalog
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Index for a requested name, falling back to the first stage
    pub fn resolve(&self, name: Option<&str>) -> usize {
        name.and_then(|n| self.index_of(n)).unwrap_or(0)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    /// Stage name at `index`
    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl Default for StageCatalog {
    fn default() -> Self {
        Self::classic()
    }
}

impl TryFrom<Vec<String>> for StageCatalog {
    type Error = CatalogError;

    fn try_from(names: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(names)
    }
}

impl From<StageCatalog> for Vec<String> {
    fn from(catalog: StageCatalog) -> Self {
        catalog.names
    }
}
