use std::{fmt, str::FromStr};
use serde::{Deserialize, Serialize};

use crate::error::KeyParseError;

/// Globally unique identifier of a color map: the key of its catalog
/// and its name inside that catalog.
///
/// Written `catalog/name`, which is also its serialized form.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash,
         Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ColorMapKey {
    catalog: String,
    name: String,
}

impl ColorMapKey {
    pub fn new(catalog: impl Into<String>, name: impl Into<String>) -> Self {
        Self { catalog: catalog.into(), name: name.into() }
    }

    /// Key of the catalog holding the color map.
    pub fn catalog(&self) -> &str { &self.catalog }

    /// Name of the color map inside its catalog.
    pub fn name(&self) -> &str { &self.name }
}

impl fmt::Display for ColorMapKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.catalog, self.name)
    }
}

impl FromStr for ColorMapKey {
    type Err = KeyParseError;

    /// Split at the first `/`; color map names may contain further
    /// slashes, catalog keys may not.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((c, n)) if !c.is_empty() && !n.is_empty() =>
                Ok(ColorMapKey::new(c, n)),
            _ => Err(KeyParseError(s.to_string())),
        }
    }
}

impl TryFrom<String> for ColorMapKey {
    type Error = KeyParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> { s.parse() }
}

impl From<ColorMapKey> for String {
    fn from(k: ColorMapKey) -> String { k.to_string() }
}
