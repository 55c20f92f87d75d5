//! HJSON manifest describing a catalog to ingest.

use std::string::String;
use anyhow::{bail, Context, Result};
use serde_hjson::Value::{self, *};
use color_catalog::{CatalogMeta, Category, ColorMapMeta};

#[derive(Debug)]
pub struct Manifest {
    pub catalog: CatalogMeta,
    pub maps: Vec<MapEntry>,
}

/// A color map to ingest.
#[derive(Debug)]
pub struct MapEntry {
    /// Sample file, relative to the source directory.
    pub source: String,
    pub meta: ColorMapMeta,
}

type Fields = serde_hjson::Map<String, Value>;

fn string(o: &Fields, field: &str) -> Result<String> {
    match o.get(field) {
        Some(String(s)) => Ok(s.clone()),
        None => Ok(String::new()),
        Some(v) => bail!("field {field:?}: not a string {v:?}"),
    }
}

fn required(o: &Fields, field: &str) -> Result<String> {
    match string(o, field)? {
        s if s.is_empty() => bail!("missing field {field:?}"),
        s => Ok(s),
    }
}

fn flag(o: &Fields, field: &str) -> Result<bool> {
    match o.get(field) {
        Some(Bool(b)) => Ok(*b),
        None => Ok(false),
        Some(v) => bail!("field {field:?}: not a boolean {v:?}"),
    }
}

fn category(s: &str) -> Result<Category> {
    Category::ALL.into_iter().find(|c| c.name() == s)
        .with_context(|| format!("unknown category {s:?}"))
}

fn tags(o: &Fields) -> Result<Vec<String>> {
    match o.get("tags") {
        Some(Array(a)) => a.iter().map(|v| match v {
            String(t) => Ok(t.clone()),
            _ => bail!("tag {v:?} is not a string") }).collect(),
        None => Ok(vec![]),
        Some(v) => bail!("tags: not an array {v:?}"),
    }
}

fn catalog_of_json(o: &Fields) -> Result<CatalogMeta> {
    Ok(CatalogMeta {
        key: string(o, "key")?,
        name: required(o, "name")?,
        version: string(o, "version")?,
        date: string(o, "date")?,
        author: string(o, "author")?,
        url: string(o, "url")?,
        doi: string(o, "doi")?,
        license: string(o, "license")?,
        color_maps: None,
    })
}

fn map_of_json(o: &Fields) -> Result<MapEntry> {
    let name = required(o, "name")?;
    let mut meta = ColorMapMeta::new(
        &name, format!("{name}.csv"), category(&required(o, "category")?)?);
    let pretty = string(o, "pretty_name")?;
    if !pretty.is_empty() { meta.pretty_name = pretty }
    meta.recommended = flag(o, "recommended")?;
    meta.perceptually_uniform = flag(o, "perceptually_uniform")?;
    meta.black_white_friendly = flag(o, "black_white_friendly")?;
    meta.color_blind_friendly = flag(o, "color_blind_friendly")?;
    meta.isoluminant = flag(o, "isoluminant")?;
    meta.notes = string(o, "notes")?;
    meta.tags = tags(o)?;
    let source = match string(o, "source")? {
        s if s.is_empty() => format!("{name}.csv"),
        s => s,
    };
    Ok(MapEntry { source, meta })
}

impl Manifest {
    pub fn parse(text: &str) -> Result<Manifest> {
        let json: Value = serde_hjson::from_str(text)?;
        let Object(m) = json else { bail!("the manifest is not an object") };
        let catalog = match m.get("catalog") {
            Some(Object(c)) => catalog_of_json(c).context("catalog")?,
            _ => bail!("missing \"catalog\" object"),
        };
        let maps = match m.get("maps") {
            Some(Array(a)) => a.iter().enumerate()
                .map(|(i, v)| match v {
                    Object(o) => map_of_json(o)
                        .with_context(|| format!("maps[{i}]")),
                    _ => bail!("maps[{i}] is not an object") })
                .collect::<Result<Vec<_>>>()?,
            _ => bail!("missing \"maps\" array"),
        };
        Ok(Manifest { catalog, maps })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const CET: &str = r#"{
      // Centre for Exploration Targeting
      catalog: {
        key: CET
        name: CET
        date: May 2018
        license: Creative Commons BY License.
      }
      maps: [
        { name: "CET-L1", source: "linear_grey_0-100_c0_n256.csv",
          category: "Sequential", perceptually_uniform: true,
          black_white_friendly: true, notes: "linear_grey_0-100_c0_n256" }
        { name: "CET-R1", category: "Sequential", tags: ["rainbow"] }
      ]
    }"#;

    #[test]
    fn parse() {
        let m = Manifest::parse(CET).unwrap();
        assert_eq!(m.catalog.id(), "CET");
        assert_eq!(m.catalog.date, "May 2018");
        assert_eq!(m.catalog.license, "Creative Commons BY License.");
        assert_eq!(m.maps.len(), 2);
        let l1 = &m.maps[0];
        assert_eq!(l1.source, "linear_grey_0-100_c0_n256.csv");
        assert_eq!(l1.meta.file_name, "CET-L1.csv");
        assert!(l1.meta.perceptually_uniform && l1.meta.black_white_friendly);
        assert!(!l1.meta.isoluminant);
        let r1 = &m.maps[1];
        assert_eq!(r1.source, "CET-R1.csv");
        assert_eq!(r1.meta.tags, vec!["rainbow"]);
    }

    #[test]
    fn errors() {
        let e = Manifest::parse("{ maps: [] }").unwrap_err();
        assert!(e.to_string().contains("catalog"), "{e}");
        let e = Manifest::parse(r#"{ catalog: { name: "X" }
            maps: [ { name: "a", category: "Rainbow" } ] }"#).unwrap_err();
        assert_eq!(format!("{e:#}"), "maps[0]: unknown category \"Rainbow\"");
        let e = Manifest::parse(r#"{ catalog: { name: "X" }
            maps: [ { name: "a", isoluminant: "yes", category: "Other" } ] }"#)
            .unwrap_err();
        assert!(format!("{e:#}").contains("isoluminant"), "{e:#}");
    }
}
