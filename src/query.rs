use std::cmp::Ordering;

use crate::{CatalogStore, Category, ColorMap, FavoritesRegistry};

/// Sort order of a [`ColorMapQuery`].  Ties are broken by the color
/// map key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortKey {
    /// Catalog key, then color map name.
    Key,
    /// Catalog key.
    Catalog,
    /// Pretty name.
    Name,
    /// Category name.
    Category,
    /// Number of samples.
    Len,
}

/// Set criteria to find matching color maps.
///
/// Created by [`CatalogStore::query`].  Criteria not set accept every
/// color map.
#[derive(Clone)]
pub struct ColorMapQuery<'a> {
    store: &'a CatalogStore,
    categories: Vec<Category>,
    catalogs: Vec<String>,
    tags: Vec<String>,
    perceptually_uniform: bool,
    recommended: bool,
    black_white_friendly: bool,
    color_blind_friendly: bool,
    isoluminant: bool,
    min_len: usize,
    favorites: Option<&'a FavoritesRegistry>,
    sort: Option<SortKey>,
}

impl<'a> ColorMapQuery<'a> {
    pub(crate) fn new(store: &'a CatalogStore) -> Self {
        ColorMapQuery {
            store,
            categories: vec![],
            catalogs: vec![],
            tags: vec![],
            perceptually_uniform: false,
            recommended: false,
            black_white_friendly: false,
            color_blind_friendly: false,
            isoluminant: false,
            min_len: 0,
            favorites: None,
            sort: None,
        }
    }

    /// Find color maps with this category.  Use several times to
    /// specify more than one [`Category`].
    pub fn category(mut self, c: Category) -> Self {
        self.categories.push(c);
        self
    }

    /// Find color maps of the catalog with key `key`.  Use several
    /// times to accept several catalogs.
    pub fn catalog(mut self, key: impl Into<String>) -> Self {
        self.catalogs.push(key.into());
        self
    }

    /// Only color maps having the tag `tag` (ignoring case).  Use
    /// several times to require several tags.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into().to_lowercase());
        self
    }

    pub fn perceptually_uniform(mut self) -> Self {
        self.perceptually_uniform = true;
        self
    }

    pub fn recommended(mut self) -> Self {
        self.recommended = true;
        self
    }

    pub fn black_white_friendly(mut self) -> Self {
        self.black_white_friendly = true;
        self
    }

    pub fn color_blind_friendly(mut self) -> Self {
        self.color_blind_friendly = true;
        self
    }

    pub fn isoluminant(mut self) -> Self {
        self.isoluminant = true;
        self
    }

    /// Only color maps with at least `len` samples.
    pub fn min_len(mut self, len: usize) -> Self {
        self.min_len = len;
        self
    }

    /// Only the favorites of `favorites`.
    pub fn favorites(mut self, favorites: &'a FavoritesRegistry) -> Self {
        self.favorites = Some(favorites);
        self
    }

    /// Sort the result.  Without it, color maps come in store order.
    pub fn sort_by(mut self, key: SortKey) -> Self {
        self.sort = Some(key);
        self
    }

    fn accept(&self, cm: &ColorMap) -> bool {
        let md = cm.meta();
        (self.categories.is_empty() || self.categories.contains(&md.category))
            && (self.catalogs.is_empty()
                || self.catalogs.iter().any(|c| cm.catalog() == c))
            && self.tags.iter().all(|t| {
                md.tags.iter().any(|u| u.to_lowercase() == *t) })
            && (!self.perceptually_uniform || md.perceptually_uniform)
            && (!self.recommended || md.recommended)
            && (!self.black_white_friendly || md.black_white_friendly)
            && (!self.color_blind_friendly || md.color_blind_friendly)
            && (!self.isoluminant || md.isoluminant)
            && cm.len() >= self.min_len
            && self.favorites.map_or(true, |f| f.contains(cm.key()))
    }

    /// Return the color maps satisfying all the criteria.
    pub fn run(self) -> Vec<&'a ColorMap> {
        let mut v: Vec<&'a ColorMap> =
            self.store.color_maps().filter(|cm| self.accept(cm)).collect();
        if let Some(key) = self.sort {
            v.sort_by(|a, b| compare(key, a, b).then_with(|| a.key().cmp(b.key())));
        }
        v
    }
}

fn compare(key: SortKey, a: &ColorMap, b: &ColorMap) -> Ordering {
    match key {
        SortKey::Key => a.key().cmp(b.key()),
        SortKey::Catalog => a.catalog().cmp(b.catalog()),
        SortKey::Name => a.pretty_name().cmp(b.pretty_name()),
        SortKey::Category => a.category().name().cmp(b.category().name()),
        SortKey::Len => a.len().cmp(&b.len()),
    }
}
