use std::{collections::HashSet, fs, path::Path};
use color_catalog::{CatalogStore, Category, ColorMapKey, FailurePolicy,
                    FavoritesRegistry, LoadError, LoadOptions, NotFoundError,
                    SortKey};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Write a color map with `n` grey samples.
fn color_map(cat: &Path, name: &str, category: &str, extra: &str, n: usize) {
    write(&cat.join(format!("{name}.json")),
          &format!(r#"{{ "name": "{name}", "file_name": "{name}.csv",
                         "category": "{category}" {extra} }}"#));
    let rows: String = (0 .. n)
        .map(|i| { let x = i as f64 / (n - 1) as f64;
                   format!("{x:.6}, {x:.6}, {x:.6}\n") })
        .collect();
    write(&cat.join(format!("{name}.csv")), &rows);
}

fn catalog(root: &Path, dir: &str, meta: &str) -> std::path::PathBuf {
    let cat = root.join(dir);
    write(&cat.join("_catalog.json"), meta);
    cat
}

/// Two valid catalogs and a broken one.
fn fixture() -> TempDir {
    let root = tempfile::tempdir().unwrap();
    let r = root.path();

    let cet = catalog(r, "CET", r#"{ "key": "CET", "name": "CET",
        "license": "Creative Commons BY License.",
        "url": "https://peterkovesi.com/projects/colourmaps/" }"#);
    color_map(&cet, "CET-L1", "Sequential",
              r#", "perceptually_uniform": true, "black_white_friendly": true"#,
              256);
    color_map(&cet, "CET-C1", "Cyclic", r#", "perceptually_uniform": true"#, 16);
    color_map(&cet, "CET-R1", "Sequential",
              r#", "perceptually_uniform": true, "tags": ["rainbow"]"#, 64);

    let mpl = catalog(r, "MatPlotLib", r#"{ "key": "MatPlotLib",
        "name": "MatPlotLib", "license": "Matplotlib license." }"#);
    color_map(&mpl, "viridis", "Sequential",
              r#", "perceptually_uniform": true, "recommended": true"#, 256);
    color_map(&mpl, "jet", "Other", r#", "tags": ["Rainbow"]"#, 8);
    color_map(&mpl, "tab10", "Qualitative",
              r#", "color_blind_friendly": true"#, 10);

    let broken = catalog(r, "Broken", r#"{ "name": "Broken" }"#);
    color_map(&broken, "fine", "Sequential", "", 4);
    write(&broken.join("bad.json"),
          r#"{ "name": "bad", "file_name": "bad.csv", "category": "Other" }"#);
    write(&broken.join("bad.csv"), "0, 0, 0\n0.5, 1.25, 0\n");

    write(&r.join("notes.txt"), "not a catalog");
    fs::create_dir(r.join("empty")).unwrap();
    root
}

#[test]
fn load_single_catalog() {
    let root = tempfile::tempdir().unwrap();
    let cet = catalog(root.path(), "CET", r#"{ "name": "CET",
        "license": "CC-BY", "url": "https://peterkovesi.com" }"#);
    write(&cet.join("rainbow.json"), r#"{ "name": "rainbow",
        "file_name": "rainbow.csv", "category": "Other" }"#);
    write(&cet.join("rainbow.csv"), "0.0, 0.0, 1.0\n\
                                     0.0, 1.0, 1.0\n\
                                     0.0, 1.0, 0.0\n\
                                     1.0, 1.0, 0.0\n\
                                     1.0, 0.0, 0.0\n");
    let store = CatalogStore::load(root.path()).unwrap();
    assert_eq!(store.list().len(), 1);
    let cat = &store.list()[0];
    assert_eq!(cat.name(), "CET");
    assert_eq!(cat.license(), "CC-BY");
    assert_eq!(cat.color_maps().len(), 1);
    assert_eq!(cat.color_maps()[0].name(), "rainbow");
    assert_eq!(cat.color_maps()[0].len(), 5);

    let cm = store.find("CET", "rainbow").unwrap();
    assert_eq!(cm.name(), "rainbow");
    assert_eq!(cm.pretty_name(), "Rainbow");
    assert_eq!(cm.samples().len(), 5);
    assert_eq!(cm, &cat.color_maps()[0]);
}

#[test]
fn catalog_directory_itself() {
    let root = tempfile::tempdir().unwrap();
    write(&root.path().join("_catalog.json"), r#"{ "name": "Solo" }"#);
    color_map(root.path(), "grey", "Sequential", "", 2);
    let store = CatalogStore::load(root.path()).unwrap();
    assert_eq!(store.list().len(), 1);
    assert!(store.find("Solo", "grey").is_ok());
}

#[test]
fn skip_broken_catalog() {
    let root = fixture();
    let store = CatalogStore::load(root.path()).unwrap();
    let keys: Vec<_> = store.list().iter().map(|c| c.key()).collect();
    assert_eq!(keys, vec!["CET", "MatPlotLib"]);
    assert_eq!(store.len(), 6);
    assert_eq!(store.skipped().len(), 1);
    match &store.skipped()[0] {
        LoadError::OutOfRange { path, sample, value } => {
            assert_eq!(path, &root.path().join("Broken").join("bad.csv"));
            assert_eq!(*sample, 2);
            assert_eq!(*value, 1.25);
        }
        e => panic!("unexpected {e:?}"),
    }
    assert_eq!(store.catalog("Broken").unwrap_err(),
               NotFoundError::Catalog("Broken".to_string()));
}

#[test]
fn abort_on_broken_catalog() {
    let root = fixture();
    let opts = LoadOptions::default().failure_policy(FailurePolicy::Abort);
    let err = CatalogStore::load_with(root.path(), &opts).unwrap_err();
    assert!(matches!(err, LoadError::OutOfRange { .. }));
    assert!(err.to_string().contains("bad.csv"), "{err}");
}

#[test]
fn duplicate_catalog_keys() {
    let root = tempfile::tempdir().unwrap();
    for dir in ["a", "b"] {
        let cat = catalog(root.path(), dir, r#"{ "key": "CET", "name": "CET" }"#);
        color_map(&cat, "grey", "Sequential", "", 3);
    }
    let store = CatalogStore::load(root.path()).unwrap();
    assert_eq!(store.list().len(), 1);
    assert_eq!(store.list()[0].dir(), root.path().join("a"));
    assert!(matches!(&store.skipped()[..],
                     [LoadError::DuplicateCatalog { key, .. }] if key == "CET"));
}

#[test]
fn skip_catalog_with_invalid_key() {
    let root = tempfile::tempdir().unwrap();
    let sci = catalog(root.path(), "sci", r#"{ "key": "Sci/4", "name": "Sci" }"#);
    color_map(&sci, "turku", "Sequential", "", 4);
    let anon = catalog(root.path(), "anon", r#"{ "name": "" }"#);
    color_map(&anon, "x", "Other", "", 2);
    let cet = catalog(root.path(), "cet", r#"{ "name": "CET" }"#);
    color_map(&cet, "grey", "Sequential", "", 2);

    let store = CatalogStore::load(root.path()).unwrap();
    assert_eq!(store.list().len(), 1);
    assert_eq!(store.skipped().len(), 2);
    assert!(store.skipped().iter()
            .all(|e| matches!(e, LoadError::InvalidKey { .. })));

    // Favorites of the loaded maps survive a JSON round trip.
    let fav = FavoritesRegistry::from_keys(
        store.color_maps().map(|c| c.key().clone()));
    let json = serde_json::to_string(&fav).unwrap();
    let back: FavoritesRegistry = serde_json::from_str(&json).unwrap();
    assert_eq!(store.resolve(back.list()).len(), 1);
}

#[test]
fn invariants() {
    let root = fixture();
    let store = CatalogStore::load(root.path()).unwrap();
    let mut keys = HashSet::new();
    for cm in store.color_maps() {
        assert!(cm.len() >= 2);
        for c in cm.samples() {
            for x in [c.r, c.g, c.b] {
                assert!((0.0..=1.0).contains(&x), "{} in {}", x, cm.key());
            }
        }
        assert!(keys.insert(cm.key().clone()), "duplicate {}", cm.key());
        assert_eq!(&cm.key().to_string().parse::<ColorMapKey>().unwrap(),
                   cm.key());
        let found = store.find_key(cm.key()).unwrap();
        assert_eq!(found.name(), cm.key().name());
        assert_eq!(found.catalog(), cm.key().catalog());
    }
    assert_eq!(keys.len(), store.len());
}

#[test]
fn not_found() {
    let root = fixture();
    let store = CatalogStore::load(root.path()).unwrap();
    assert_eq!(store.find("CET", "viridis").unwrap_err(),
               NotFoundError::ColorMap(ColorMapKey::new("CET", "viridis")));
    assert_eq!(store.find("Nope", "viridis").unwrap_err(),
               NotFoundError::Catalog("Nope".to_string()));
}

#[test]
fn resolve_favorites() {
    let root = fixture();
    let store = CatalogStore::load(root.path()).unwrap();
    let favorites = FavoritesRegistry::from_keys(
        ["MatPlotLib/jet", "Gone/map", "CET/CET-L1"]
            .map(|s| s.parse::<ColorMapKey>().unwrap()));
    let names: Vec<_> = store.resolve(favorites.list()).iter()
        .map(|c| c.name()).collect();
    assert_eq!(names, vec!["jet", "CET-L1"]);
}

fn names(v: Vec<&color_catalog::ColorMap>) -> Vec<String> {
    v.iter().map(|c| c.key().to_string()).collect()
}

#[test]
fn query_filters() {
    let root = fixture();
    let store = CatalogStore::load(root.path()).unwrap();
    assert_eq!(store.query().run().len(), 6);
    assert_eq!(names(store.query().category(Category::Sequential).run()),
               vec!["CET/CET-L1", "CET/CET-R1", "MatPlotLib/viridis"]);
    assert_eq!(names(store.query().category(Category::Cyclic)
                     .category(Category::Qualitative).run()),
               vec!["CET/CET-C1", "MatPlotLib/tab10"]);
    assert_eq!(names(store.query().tag("RAINBOW").run()),
               vec!["CET/CET-R1", "MatPlotLib/jet"]);
    assert_eq!(names(store.query().catalog("MatPlotLib")
                     .perceptually_uniform().run()),
               vec!["MatPlotLib/viridis"]);
    assert_eq!(names(store.query().black_white_friendly().run()),
               vec!["CET/CET-L1"]);
    assert_eq!(names(store.query().color_blind_friendly().run()),
               vec!["MatPlotLib/tab10"]);
    assert_eq!(names(store.query().recommended().run()),
               vec!["MatPlotLib/viridis"]);
    assert!(store.query().isoluminant().run().is_empty());
    assert_eq!(names(store.query().min_len(64).run()),
               vec!["CET/CET-L1", "CET/CET-R1", "MatPlotLib/viridis"]);
    assert_eq!(names(store.query().catalog("Nope").catalog("MatPlotLib")
                     .category(Category::Other).run()),
               vec!["MatPlotLib/jet"]);
    assert_eq!(store.query().catalog("CET").catalog("MatPlotLib").run().len(),
               6);
}

#[test]
fn query_tags_ignore_unicode_case() {
    let root = tempfile::tempdir().unwrap();
    let cat = catalog(root.path(), "Geo", r#"{ "name": "Geo" }"#);
    color_map(&cat, "relief", "Sequential", r#", "tags": ["Élévation"]"#, 4);
    color_map(&cat, "sea", "Sequential", r#", "tags": ["bathymetry"]"#, 4);
    let store = CatalogStore::load(root.path()).unwrap();
    assert_eq!(names(store.query().tag("ÉLÉVATION").run()), vec!["Geo/relief"]);
    assert_eq!(names(store.query().tag("élévation").run()), vec!["Geo/relief"]);
}

#[test]
fn query_favorites() {
    let root = fixture();
    let store = CatalogStore::load(root.path()).unwrap();
    let mut fav = FavoritesRegistry::new();
    assert!(store.query().favorites(&fav).run().is_empty());
    fav.add(ColorMapKey::new("MatPlotLib", "jet"));
    fav.add(ColorMapKey::new("CET", "CET-C1"));
    assert_eq!(names(store.query().favorites(&fav).run()),
               vec!["CET/CET-C1", "MatPlotLib/jet"]);
}

#[test]
fn query_sort() {
    let root = fixture();
    let store = CatalogStore::load(root.path()).unwrap();
    assert_eq!(names(store.query().sort_by(SortKey::Len).run()),
               vec!["MatPlotLib/jet", "MatPlotLib/tab10", "CET/CET-C1",
                    "CET/CET-R1", "CET/CET-L1", "MatPlotLib/viridis"]);
    assert_eq!(names(store.query().sort_by(SortKey::Category).run()),
               vec!["CET/CET-C1", "MatPlotLib/jet", "MatPlotLib/tab10",
                    "CET/CET-L1", "CET/CET-R1", "MatPlotLib/viridis"]);
    assert_eq!(names(store.query().sort_by(SortKey::Name).run()),
               vec!["CET/CET-C1", "CET/CET-L1", "CET/CET-R1",
                    "MatPlotLib/jet", "MatPlotLib/tab10",
                    "MatPlotLib/viridis"]);
    let by_key = names(store.query().sort_by(SortKey::Key).run());
    let mut sorted = by_key.clone();
    sorted.sort();
    assert_eq!(by_key, sorted);
}

#[test]
fn bundled_data() {
    let store = CatalogStore::load(
        Path::new(env!("CARGO_MANIFEST_DIR")).join("data")).unwrap();
    assert!(store.skipped().is_empty(), "{:?}", store.skipped());
    let turku = store.find("ScientificColourMaps4", "turku").unwrap();
    assert_eq!(turku.len(), 256);
    assert_eq!(turku.category(), Category::Sequential);
    assert!(turku.perceptually_uniform());
    let cat = store.catalog("ScientificColourMaps4").unwrap();
    assert_eq!(cat.meta().doi, "10.5281/zenodo.2527899");
}
