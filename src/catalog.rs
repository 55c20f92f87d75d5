use std::{collections::HashSet, fs, path::{Path, PathBuf}};

use crate::{ColorMap, LoadError,
            meta::{read_json, CatalogMeta, ColorMapMeta},
            samples::read_samples};

/// A named collection of color maps from a single source, sharing
/// licensing metadata.
#[derive(Clone, Debug, PartialEq)]
pub struct Catalog {
    meta: CatalogMeta,
    dir: PathBuf,
    color_maps: Vec<ColorMap>,
}

impl Catalog {
    /// Load the catalog stored in `dir`: its metadata file
    /// `catalog_file_name` and all the color maps it lists.
    ///
    /// The first failing file aborts the load of the catalog.
    pub fn load(dir: &Path, catalog_file_name: &str)
                -> Result<Catalog, LoadError> {
        let meta_file = dir.join(catalog_file_name);
        let meta: CatalogMeta = read_json(&meta_file)?;
        if meta.id().is_empty() || meta.id().contains('/') {
            return Err(LoadError::InvalidKey { path: meta_file,
                                               key: meta.id().to_string() })
        }
        let files: Vec<PathBuf> = match &meta.color_maps {
            Some(files) => files.iter().map(|f| dir.join(f)).collect(),
            None => metadata_files(dir, catalog_file_name)?,
        };
        let mut names = HashSet::new();
        let mut color_maps = Vec::with_capacity(files.len());
        for file in files {
            let md: ColorMapMeta = read_json(&file)?;
            if md.name.is_empty() {
                return Err(LoadError::InvalidKey { path: file, key: md.name })
            }
            if !names.insert(md.name.clone()) {
                return Err(LoadError::DuplicateColorMap {
                    catalog: meta.id().to_string(), name: md.name })
            }
            let samples = read_samples(&dir.join(&md.file_name))?;
            color_maps.push(ColorMap::new(meta.id(), md, samples));
        }
        tracing::info!("loaded catalog {} ({} color maps) from {}",
                       meta.id(), color_maps.len(), dir.display());
        Ok(Catalog { meta, dir: dir.to_path_buf(), color_maps })
    }

    /// Identifier of the catalog, unique in the store.
    pub fn key(&self) -> &str { self.meta.id() }

    pub fn name(&self) -> &str { &self.meta.name }

    pub fn license(&self) -> &str { &self.meta.license }

    /// Where the color maps come from.
    pub fn url(&self) -> &str { &self.meta.url }

    /// All metadata, as read from the catalog file.
    pub fn meta(&self) -> &CatalogMeta { &self.meta }

    /// Directory the catalog was loaded from.
    pub fn dir(&self) -> &Path { &self.dir }

    /// The color maps, in the order of the catalog file (or of their
    /// metadata file names if the catalog does not list them).
    pub fn color_maps(&self) -> &[ColorMap] { &self.color_maps }

    /// Returns the color map named `name`, if any.
    pub fn get(&self, name: &str) -> Option<&ColorMap> {
        self.color_maps.iter().find(|c| c.name() == name)
    }
}

/// All `*.json` files of `dir` but the catalog file, sorted.
fn metadata_files(dir: &Path, catalog_file_name: &str)
                  -> Result<Vec<PathBuf>, LoadError> {
    let io = |e| LoadError::io(dir, e);
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io)? {
        let path = entry.map_err(io)?.path();
        let is_json = path.extension().is_some_and(|e| e == "json");
        let is_catalog = path.file_name()
            .is_some_and(|f| f == catalog_file_name);
        if is_json && !is_catalog && path.is_file() {
            files.push(path)
        }
    }
    files.sort();
    Ok(files)
}
