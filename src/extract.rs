//! Walk the parsed license list and build the id → record mapping.
//!
//! Each `<dl>` grouping carries a color class that maps to a tag set
//! ([`TAGS`]); every `<a id=...>` inside it is one license entry. Anchor ids
//! pass through the split table to one or more output ids, then contributions
//! accumulate per [`License::merge`]. Any mismatch between the static tables
//! and what the page actually contains aborts the run.

use std::collections::BTreeSet;

use anyhow::{bail, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use url::Url;

use crate::models::{License, LicenseMap};
use crate::tables::{IDENTIFIERS, SPLITS, TAGS, TAG_OVERRIDES};

/// An `<a id=...>` element currently being read; `text` accumulates its
/// visible character data until the element closes.
struct Anchor {
    oid: String,
    href: Option<String>,
    text: String,
}

/// Extract all license records from the page.
///
/// Fails on an unrecognized grouping class, on a malformed document, and on
/// split-table keys whose anchors no longer exist on the page.
pub fn extract(xhtml: &str, base_uri: &str) -> Result<LicenseMap> {
    let (licenses, seen) = walk(xhtml, base_uri)?;

    let mut stale: Vec<&str> = SPLITS
        .keys()
        .copied()
        .filter(|oid| !seen.contains(*oid))
        .collect();
    stale.sort_unstable();
    if !stale.is_empty() {
        bail!("unused split table keys: {}", stale.join(", "));
    }

    Ok(licenses)
}

/// Every identifier-table key must have produced a record, otherwise the
/// table references an id the page no longer carries. Run after [`extract`],
/// before anything is written.
pub fn check_identifier_coverage(licenses: &LicenseMap) -> Result<()> {
    let mut stale: Vec<&str> = IDENTIFIERS
        .keys()
        .copied()
        .filter(|id| !licenses.contains_key(*id))
        .collect();
    stale.sort_unstable();
    if !stale.is_empty() {
        bail!("unused identifier table keys: {}", stale.join(", "));
    }
    Ok(())
}

fn walk(xhtml: &str, base_uri: &str) -> Result<(LicenseMap, BTreeSet<String>)> {
    let base = Url::parse(base_uri)?;
    let mut reader = Reader::from_str(xhtml);
    let mut buf = Vec::new();

    // Innermost grouping's tag set; anchors outside any grouping are not
    // license entries.
    let mut groups: Vec<&'static [&'static str]> = Vec::new();
    let mut anchor: Option<Anchor> = None;
    let mut seen: BTreeSet<String> = BTreeSet::new();
    let mut licenses = LicenseMap::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.name().local_name().as_ref() {
                b"dl" => groups.push(group_tags(e)?),
                b"a" => {
                    if !groups.is_empty() && anchor.is_none() {
                        anchor = read_anchor(e)?;
                    }
                }
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match e.name().local_name().as_ref() {
                // A childless grouping still gets its class validated.
                b"dl" => {
                    group_tags(e)?;
                }
                b"a" => {
                    if let Some(group) = groups.last().copied() {
                        if let Some(a) = read_anchor(e)? {
                            record(&mut licenses, &mut seen, &a, group, &base, base_uri)?;
                        }
                    }
                }
                _ => {}
            },
            Ok(Event::Text(ref e)) => {
                if let Some(a) = anchor.as_mut() {
                    a.text.push_str(&e.unescape()?);
                }
            }
            Ok(Event::End(ref e)) => match e.name().local_name().as_ref() {
                b"dl" => {
                    groups.pop();
                }
                b"a" => {
                    if let (Some(a), Some(group)) = (anchor.take(), groups.last().copied()) {
                        record(&mut licenses, &mut seen, &a, group, &base, base_uri)?;
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => bail!(
                "XML parse error at byte {}: {}",
                reader.buffer_position(),
                e
            ),
            _ => {}
        }
        buf.clear();
    }

    Ok((licenses, seen))
}

/// Look up the tag set implied by a grouping's `class` attribute.
fn group_tags(e: &BytesStart) -> Result<&'static [&'static str]> {
    let mut class = None;
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.local_name().as_ref() == b"class" {
            class = Some(attr.unescape_value()?.into_owned());
        }
    }
    let Some(class) = class else {
        bail!("<dl> grouping without a class attribute");
    };
    match TAGS.get(class.as_str()).copied() {
        Some(tags) => Ok(tags),
        None => bail!("unrecognized <dl> class {:?}", class),
    }
}

/// Read the id/href attributes of an anchor. Anchors without an id are
/// internal bookmarks, not license entries.
fn read_anchor(e: &BytesStart) -> Result<Option<Anchor>> {
    let mut oid = None;
    let mut href = None;
    for attr in e.attributes() {
        let attr = attr?;
        match attr.key.local_name().as_ref() {
            b"id" => oid = Some(attr.unescape_value()?.into_owned()),
            b"href" => href = Some(attr.unescape_value()?.into_owned()),
            _ => {}
        }
    }
    Ok(oid.map(|oid| Anchor {
        oid,
        href,
        text: String::new(),
    }))
}

/// Apply one finished anchor to the mapping.
fn record(
    licenses: &mut LicenseMap,
    seen: &mut BTreeSet<String>,
    a: &Anchor,
    group: &'static [&'static str],
    base: &Url,
    base_uri: &str,
) -> Result<()> {
    seen.insert(a.oid.clone());

    // An anchor with no visible text is not an entry, but its id still counts
    // as present on the page for the stale-split check.
    let name = a.text.trim();
    if name.is_empty() {
        return Ok(());
    }

    let mut uris = vec![format!("{}#{}", base_uri, a.oid)];
    if let Some(href) = &a.href {
        let resolved = base.join(href)?.to_string();
        if !uris.contains(&resolved) {
            uris.push(resolved);
        }
    }

    let ids: Vec<&str> = match SPLITS.get(a.oid.as_str()) {
        Some(split) => split.to_vec(),
        None => vec![a.oid.as_str()],
    };

    for id in ids {
        match licenses.get_mut(id) {
            Some(existing) => existing.merge(group, &uris),
            None => {
                let tags = TAG_OVERRIDES.get(id).copied().unwrap_or(group);
                licenses.insert(
                    id.to_string(),
                    License {
                        name: name.to_string(),
                        tags: tags.iter().map(|t| (*t).to_string()).collect(),
                        uris: uris.clone(),
                        identifiers: IDENTIFIERS.get(id).map(|schemes| {
                            schemes
                                .iter()
                                .map(|(scheme, values)| {
                                    (
                                        (*scheme).to_string(),
                                        values.iter().map(|v| (*v).to_string()).collect(),
                                    )
                                })
                                .collect()
                        }),
                    },
                );
            }
        }
    }

    Ok(())
}
