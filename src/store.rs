use std::{collections::HashSet, env, fs, path::{Path, PathBuf}};

use crate::{Catalog, ColorMap, ColorMapKey, ColorMapQuery, LoadError,
            NotFoundError};

/// Default name of the catalog metadata file.
pub const CATALOG_FILE_NAME: &str = "_catalog.json";

/// Environment variable overriding [`default_data_dir`].
pub const DATA_DIR_ENV: &str = "COLOR_CATALOG_DATA_DIR";

/// The data directory: `$COLOR_CATALOG_DATA_DIR` if set, otherwise
/// the `data/` directory shipped with this crate.
pub fn default_data_dir() -> PathBuf {
    match env::var_os(DATA_DIR_ENV) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => Path::new(env!("CARGO_MANIFEST_DIR")).join("data"),
    }
}

/// What to do with a catalog that fails to load.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Skip the catalog and keep its error, see
    /// [`CatalogStore::skipped`].
    #[default]
    SkipCatalog,
    /// Abort the whole load with the error.
    Abort,
}

/// Settings of [`CatalogStore::load_with`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadOptions {
    pub failure_policy: FailurePolicy,
    /// Name of the metadata file identifying a catalog directory.
    pub catalog_file_name: String,
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions { failure_policy: FailurePolicy::default(),
                      catalog_file_name: CATALOG_FILE_NAME.to_string() }
    }
}

impl LoadOptions {
    pub fn failure_policy(mut self, p: FailurePolicy) -> Self {
        self.failure_policy = p;
        self
    }
}

/// All catalogs of a data directory.
///
/// Loaded once by [`CatalogStore::load`] and immutable afterwards;
/// pass it (or a reference to it) to whatever needs the color maps.
#[derive(Debug, Default)]
pub struct CatalogStore {
    catalogs: Vec<Catalog>,
    skipped: Vec<LoadError>,
}

impl CatalogStore {
    /// Load the catalogs of `dir` with the default [`LoadOptions`]:
    /// catalogs that fail to load are skipped.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, LoadError> {
        Self::load_with(dir, &LoadOptions::default())
    }

    /// Load every catalog found in `dir`.
    ///
    /// A catalog is a sub-directory of `dir` (or `dir` itself)
    /// holding a file named `opts.catalog_file_name`.  Catalogs are
    /// loaded in the order of their directory names.  Fails if `dir`
    /// cannot be read, or if a catalog fails to load and the policy is
    /// [`FailurePolicy::Abort`].
    pub fn load_with(dir: impl AsRef<Path>, opts: &LoadOptions)
                     -> Result<Self, LoadError> {
        let dir = dir.as_ref();
        tracing::debug!("scanning {} for catalogs", dir.display());
        let mut store = CatalogStore::default();
        let mut keys = HashSet::new();
        for cat_dir in catalog_dirs(dir, &opts.catalog_file_name)? {
            let res = Catalog::load(&cat_dir, &opts.catalog_file_name)
                .and_then(|cat| {
                    if keys.insert(cat.key().to_string()) { Ok(cat) }
                    else { Err(LoadError::DuplicateCatalog {
                        key: cat.key().to_string(), path: cat_dir.clone() }) }
                });
            match res {
                Ok(cat) => store.catalogs.push(cat),
                Err(e) => match opts.failure_policy {
                    FailurePolicy::Abort => return Err(e),
                    FailurePolicy::SkipCatalog => {
                        tracing::warn!("skipping catalog {}: {e}",
                                       cat_dir.display());
                        store.skipped.push(e)
                    }
                }
            }
        }
        Ok(store)
    }

    /// The loaded catalogs.
    pub fn list(&self) -> &[Catalog] { &self.catalogs }

    /// Errors of the catalogs skipped during the load.
    pub fn skipped(&self) -> &[LoadError] { &self.skipped }

    /// Returns the catalog with key `key`.
    pub fn catalog(&self, key: &str) -> Result<&Catalog, NotFoundError> {
        self.catalogs.iter().find(|c| c.key() == key)
            .ok_or_else(|| NotFoundError::Catalog(key.to_string()))
    }

    /// Returns the color map `name` of the catalog `catalog`.
    pub fn find(&self, catalog: &str, name: &str)
                -> Result<&ColorMap, NotFoundError> {
        self.catalog(catalog)?.get(name).ok_or_else(|| {
            NotFoundError::ColorMap(ColorMapKey::new(catalog, name)) })
    }

    /// Same as [`find`][CatalogStore::find] with a key.
    pub fn find_key(&self, key: &ColorMapKey)
                    -> Result<&ColorMap, NotFoundError> {
        self.find(key.catalog(), key.name())
    }

    /// All color maps, catalog after catalog.
    pub fn color_maps(&self) -> impl Iterator<Item = &ColorMap> + '_ {
        self.catalogs.iter().flat_map(|c| c.color_maps())
    }

    /// Total number of color maps.
    pub fn len(&self) -> usize {
        self.catalogs.iter().map(|c| c.color_maps().len()).sum()
    }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// The color maps of `keys` that are in the store, in the order of
    /// `keys`.  Unknown keys (e.g. favorites saved with another data
    /// directory) are dropped.
    pub fn resolve<'a, I>(&self, keys: I) -> Vec<&ColorMap>
    where I: IntoIterator<Item = &'a ColorMapKey> {
        keys.into_iter().filter_map(|k| self.find_key(k).ok()).collect()
    }

    /// Start a query over all color maps.
    pub fn query(&self) -> ColorMapQuery<'_> { ColorMapQuery::new(self) }
}

/// Directories holding a catalog file: `dir` itself and its
/// sub-directories, sorted.
fn catalog_dirs(dir: &Path, catalog_file_name: &str)
                -> Result<Vec<PathBuf>, LoadError> {
    let io = |e| LoadError::io(dir, e);
    let mut dirs = Vec::new();
    if dir.join(catalog_file_name).is_file() {
        dirs.push(dir.to_path_buf())
    }
    let mut sub = Vec::new();
    for entry in fs::read_dir(dir).map_err(io)? {
        let path = entry.map_err(io)?.path();
        if path.is_dir() && path.join(catalog_file_name).is_file() {
            sub.push(path)
        }
    }
    sub.sort();
    dirs.extend(sub);
    Ok(dirs)
}
