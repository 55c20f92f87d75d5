//! Metadata of catalogs and color maps, as stored in JSON files.

use std::{fmt, fs, path::Path};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::error::{LoadError, WriteError};

/// Category of a color map.  The kind of data being visualised
/// decides which category suits best.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Changes in lightness and often saturation incrementally, often
    /// using a single hue.  Suited to ordered data that progress from
    /// low to high.
    Sequential,
    /// Changes in lightness of two colors that meet in the middle and
    /// at the ends at an unsaturated color.  Suited to values that wrap
    /// around at the endpoints, such as phase angle, wind direction, or
    /// time of day.
    Cyclic,
    /// Puts equal emphasis on mid-range critical values and extremes at
    /// both ends of the data range.  The critical class or break in the
    /// middle is emphasized with light colors and low and high extremes
    /// with dark colors that have contrasting hues.
    Diverging,
    /// Does not imply magnitude differences between classes; hues
    /// create the primary visual differences.  Best suited to nominal
    /// or categorical data.
    Qualitative,
    /// Everything else, including the typical rainbow maps.
    Other,
}

impl Category {
    pub const ALL: [Category; 5] = [Category::Sequential, Category::Cyclic,
                                    Category::Diverging, Category::Qualitative,
                                    Category::Other];

    pub fn name(self) -> &'static str {
        match self {
            Category::Sequential => "Sequential",
            Category::Cyclic => "Cyclic",
            Category::Diverging => "Diverging",
            Category::Qualitative => "Qualitative",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Contents of a catalog's `_catalog.json`.
///
/// All color maps of a single source (e.g. CET, Matplotlib) make up a
/// catalog.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogMeta {
    /// Unique identifier; the `name` is used when empty.
    #[serde(default)]
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub author: String,
    /// Where the color maps come from.
    #[serde(default)]
    pub url: String,
    /// Digital Object Identifier (e.g. from Zenodo).
    #[serde(default)]
    pub doi: String,
    #[serde(default)]
    pub license: String,
    /// Color map metadata files, relative to the catalog directory, in
    /// display order.  When absent, all JSON files of the directory are
    /// used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_maps: Option<Vec<String>>,
}

impl CatalogMeta {
    /// The catalog identifier.
    pub fn id(&self) -> &str {
        if self.key.is_empty() { &self.name } else { &self.key }
    }
}

/// Contents of a color map's JSON metadata file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorMapMeta {
    /// Identifier, unique within the catalog.
    pub name: String,
    /// Display name; derived from `name` by [`pretty_name`] when empty.
    #[serde(default)]
    pub pretty_name: String,
    /// Sample file, relative to the catalog directory.
    pub file_name: String,
    pub category: Category,
    /// Designed with quality in mind (so not the dreaded rainbow).
    #[serde(default)]
    pub recommended: bool,
    /// Equal steps in data are perceived as equal steps in color.
    #[serde(default)]
    pub perceptually_uniform: bool,
    /// Lightness strictly increases over the range.
    #[serde(default)]
    pub black_white_friendly: bool,
    /// Colors can be distinguished by most color blind people.
    #[serde(default)]
    pub color_blind_friendly: bool,
    /// All colors have equal perceptual lightness.
    #[serde(default)]
    pub isoluminant: bool,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ColorMapMeta {
    /// Metadata with all flags unset.
    pub fn new(name: impl Into<String>, file_name: impl Into<String>,
               category: Category) -> Self {
        let name = name.into();
        ColorMapMeta {
            pretty_name: pretty_name(&name),
            name,
            file_name: file_name.into(),
            category,
            recommended: false,
            perceptually_uniform: false,
            black_white_friendly: false,
            color_blind_friendly: false,
            isoluminant: false,
            notes: String::new(),
            tags: vec![],
        }
    }
}

/// Replace underscores by hyphens and capitalize the first letter of
/// every hyphen separated part.  Other letters are left untouched.
///
/// ```
/// assert_eq!(color_catalog::pretty_name("linear_grey-0_100"),
///            "Linear-Grey-0-100");
/// assert_eq!(color_catalog::pretty_name("grayC"), "GrayC");
/// ```
pub fn pretty_name(name: &str) -> String {
    name.replace('_', "-").split('-')
        .map(|part| {
            let mut c = part.chars();
            match c.next() {
                Some(first) => first.to_uppercase().chain(c).collect(),
                None => String::new(),
            }})
        .collect::<Vec<String>>()
        .join("-")
}

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path)
                                             -> Result<T, LoadError> {
    tracing::debug!("loading metadata {}", path.display());
    let content = fs::read_to_string(path)
        .map_err(|e| LoadError::io(path, e))?;
    serde_json::from_str(&content).map_err(|e| LoadError::json(path, e))
}

/// Write `value` as JSON indented by 4 spaces, the layout of the
/// files shipped in `data/`.
pub fn write_json<T: Serialize>(path: &Path, value: &T)
                                -> Result<(), WriteError> {
    tracing::debug!("saving metadata {}", path.display());
    let mut buf = Vec::new();
    let fmt = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, fmt);
    value.serialize(&mut ser).map_err(|source| {
        WriteError::Json { path: path.to_path_buf(), source } })?;
    buf.push(b'\n');
    fs::write(path, buf).map_err(|e| WriteError::io(path, e))
}
