//! Materialize the id → record mapping as a static JSON/JSON-LD directory.
//!
//! Layout: `licenses.json` (sorted id index), `licenses-full.json` (JSON-LD
//! document with every record), one `<id>.json` per license, static
//! `@context` documents under `schema/`, and a hard-linked
//! `<scheme>/<identifier>.json` alias for every external identifier.
//!
//! All previously generated `*.json` files are removed first, so ids dropped
//! from the page don't leave stale files behind. The wipe-then-write sequence
//! is not transactional; a crash mid-run leaves a partial directory, and a
//! rerun rebuilds it.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::{json, Map, Value};
use url::Url;

use crate::models::{License, LicenseMap};

pub fn write_all(licenses: &LicenseMap, api_base_uri: &str, out_dir: &Path) -> Result<()> {
    let api_base = Url::parse(api_base_uri)?;
    let license_schema_uri = api_base.join("schema/license.jsonld")?.to_string();
    let licenses_schema_uri = api_base.join("schema/licenses.jsonld")?.to_string();

    let schema_dir = out_dir.join("schema");
    fs::create_dir_all(&schema_dir)
        .with_context(|| format!("creating {}", schema_dir.display()))?;
    remove_stale_json(out_dir)?;

    write_json(&schema_dir.join("license.jsonld"), &license_schema())?;
    write_json(
        &schema_dir.join("licenses.jsonld"),
        &licenses_schema(&license_schema_uri),
    )?;

    let index: Vec<&String> = licenses.keys().collect();
    write_json(&out_dir.join("licenses.json"), &json!(index))?;

    let mut full = Map::new();
    for (id, license) in licenses {
        let mut doc = license_doc(id, license)?;
        full.insert(id.clone(), Value::Object(doc.clone()));

        // Only the standalone per-license file carries its own @context.
        doc.insert("@context".to_string(), json!(license_schema_uri));
        let license_path = out_dir.join(format!("{id}.json"));
        write_json(&license_path, &Value::Object(doc))?;

        if let Some(identifiers) = &license.identifiers {
            for (scheme, values) in identifiers {
                let scheme_dir = out_dir.join(scheme);
                fs::create_dir_all(&scheme_dir)
                    .with_context(|| format!("creating {}", scheme_dir.display()))?;
                for identifier in values {
                    let alias = scheme_dir.join(format!("{identifier}.json"));
                    fs::hard_link(&license_path, &alias).with_context(|| {
                        format!("linking {} -> {}", alias.display(), license_path.display())
                    })?;
                }
            }
        }
    }

    write_json(
        &out_dir.join("licenses-full.json"),
        &json!({
            "@context": licenses_schema_uri,
            "licenses": full,
        }),
    )?;

    Ok(())
}

/// One record as a JSON object with its id inlined. serde_json's map keeps
/// keys sorted, so serialization order is deterministic.
fn license_doc(id: &str, license: &License) -> Result<Map<String, Value>> {
    let mut doc = match serde_json::to_value(license)? {
        Value::Object(map) => map,
        _ => unreachable!(),
    };
    doc.insert("id".to_string(), json!(id));
    Ok(doc)
}

/// JSON-LD `@context` for a single license record, mapped onto schema.org terms.
fn license_schema() -> Value {
    json!({
        "@context": {
            "schema": "https://schema.org/",
            "id": {"@id": "schema:identifier"},
            "name": {"@id": "schema:name"},
            "uris": {"@container": "@list", "@id": "schema:url"},
            "tags": {"@id": "schema:keywords"},
            "identifiers": {"@container": "@index", "@id": "schema:identifier"},
        },
    })
}

/// The record context extended with the `licenses` index container used by
/// `licenses-full.json`.
fn licenses_schema(license_schema_uri: &str) -> Value {
    let mut schema = license_schema();
    schema["@context"]["licenses"] = json!({
        "@container": "@index",
        "@id": license_schema_uri,
    });
    schema
}

/// Delete every generated `*.json` under `dir`, recursively. Schema documents
/// use the `.jsonld` extension and are simply overwritten.
fn remove_stale_json(dir: &Path) -> Result<()> {
    for entry in fs::read_dir(dir).with_context(|| format!("reading {}", dir.display()))? {
        let path = entry?.path();
        if path.is_dir() {
            remove_stale_json(&path)?;
        } else if path.extension().is_some_and(|ext| ext == "json") {
            fs::remove_file(&path).with_context(|| format!("removing {}", path.display()))?;
        }
    }
    Ok(())
}

fn write_json(path: &Path, value: &Value) -> Result<()> {
    let mut text = serde_json::to_string_pretty(value)?;
    text.push('\n');
    fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    const API_BASE: &str = "https://example.org/api/";

    fn sample_licenses() -> LicenseMap {
        let mut licenses = LicenseMap::new();
        licenses.insert(
            "Expat".to_string(),
            License {
                name: "Expat License".to_string(),
                tags: ["libre", "gpl-2-compatible"]
                    .iter()
                    .map(|t| t.to_string())
                    .collect(),
                uris: vec!["https://example.org/list.html#Expat".to_string()],
                identifiers: Some(BTreeMap::from([(
                    "spdx".to_string(),
                    vec!["MIT".to_string()],
                )])),
            },
        );
        licenses.insert(
            "Aladdin".to_string(),
            License {
                name: "Aladdin Free Public License".to_string(),
                tags: ["non-free"].iter().map(|t| t.to_string()).collect(),
                uris: vec!["https://example.org/list.html#Aladdin".to_string()],
                identifiers: None,
            },
        );
        licenses
    }

    fn read(path: &Path) -> String {
        fs::read_to_string(path).unwrap()
    }

    #[test]
    fn test_writes_index_and_per_license_files() {
        let dir = tempfile::tempdir().unwrap();
        write_all(&sample_licenses(), API_BASE, dir.path()).unwrap();

        let index: Vec<String> =
            serde_json::from_str(&read(&dir.path().join("licenses.json"))).unwrap();
        assert_eq!(index, vec!["Aladdin", "Expat"]);

        let expat: Value = serde_json::from_str(&read(&dir.path().join("Expat.json"))).unwrap();
        assert_eq!(
            expat["@context"],
            json!("https://example.org/api/schema/license.jsonld")
        );
        assert_eq!(expat["id"], json!("Expat"));
        assert_eq!(expat["tags"], json!(["gpl-2-compatible", "libre"]));
        assert_eq!(expat["identifiers"]["spdx"], json!(["MIT"]));

        let aladdin: Value =
            serde_json::from_str(&read(&dir.path().join("Aladdin.json"))).unwrap();
        assert!(aladdin.get("identifiers").is_none());
    }

    #[test]
    fn test_alias_is_byte_identical_to_owner() {
        let dir = tempfile::tempdir().unwrap();
        write_all(&sample_licenses(), API_BASE, dir.path()).unwrap();

        let owner = read(&dir.path().join("Expat.json"));
        let alias = read(&dir.path().join("spdx").join("MIT.json"));
        assert_eq!(owner, alias);
    }

    #[test]
    fn test_removes_stale_output() {
        let dir = tempfile::tempdir().unwrap();
        let stale_sub = dir.path().join("spdx");
        fs::create_dir_all(&stale_sub).unwrap();
        fs::write(dir.path().join("Removed.json"), "{}").unwrap();
        fs::write(stale_sub.join("REMOVED-1.0.json"), "{}").unwrap();

        write_all(&sample_licenses(), API_BASE, dir.path()).unwrap();

        assert!(!dir.path().join("Removed.json").exists());
        assert!(!stale_sub.join("REMOVED-1.0.json").exists());
        assert!(dir.path().join("Expat.json").exists());
    }

    #[test]
    fn test_rerun_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let licenses = sample_licenses();

        write_all(&licenses, API_BASE, dir.path()).unwrap();
        let first = [
            read(&dir.path().join("licenses.json")),
            read(&dir.path().join("licenses-full.json")),
            read(&dir.path().join("Expat.json")),
            read(&dir.path().join("schema").join("licenses.jsonld")),
        ];

        write_all(&licenses, API_BASE, dir.path()).unwrap();
        let second = [
            read(&dir.path().join("licenses.json")),
            read(&dir.path().join("licenses-full.json")),
            read(&dir.path().join("Expat.json")),
            read(&dir.path().join("schema").join("licenses.jsonld")),
        ];

        assert_eq!(first, second);
    }

    #[test]
    fn test_full_index_entries_have_no_context() {
        let dir = tempfile::tempdir().unwrap();
        write_all(&sample_licenses(), API_BASE, dir.path()).unwrap();

        let full: Value =
            serde_json::from_str(&read(&dir.path().join("licenses-full.json"))).unwrap();
        assert_eq!(
            full["@context"],
            json!("https://example.org/api/schema/licenses.jsonld")
        );
        let expat = &full["licenses"]["Expat"];
        assert_eq!(expat["id"], json!("Expat"));
        assert!(expat.get("@context").is_none());
    }

    #[test]
    fn test_schema_documents() {
        let dir = tempfile::tempdir().unwrap();
        write_all(&sample_licenses(), API_BASE, dir.path()).unwrap();

        let record: Value =
            serde_json::from_str(&read(&dir.path().join("schema").join("license.jsonld")))
                .unwrap();
        assert_eq!(record["@context"]["uris"]["@container"], json!("@list"));
        assert!(record["@context"].get("licenses").is_none());

        let index: Value =
            serde_json::from_str(&read(&dir.path().join("schema").join("licenses.jsonld")))
                .unwrap();
        assert_eq!(
            index["@context"]["licenses"]["@id"],
            json!("https://example.org/api/schema/license.jsonld")
        );
    }
}
