//! Fetch the license list page and make it parseable as strict XML.
//!
//! The page declares itself XHTML but leans on HTML named character entities
//! (`&nbsp;`, `&mdash;`, ...) that a strict XML parser rejects.
//! [`normalize_entities`] rewrites those to their literal Unicode characters
//! before parsing; only the five predefined XML entities pass through.

use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;

use anyhow::{bail, Result};
use regex::{Captures, Regex};
use reqwest::Client;

/// Fetch the page body. Transport failures and non-success statuses are
/// fatal; there is no retry.
pub async fn fetch_page(client: &Client, uri: &str) -> Result<String> {
    let response = client
        .get(uri)
        .header("User-Agent", "fsf-api/0.1.0 (FSF license list scraper)")
        .send()
        .await?;

    if !response.status().is_success() {
        bail!("GET {} returned {}", uri, response.status());
    }

    Ok(response.text().await?)
}

static NAMED_ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&([A-Za-z][A-Za-z0-9]*);").expect("entity pattern"));

/// Rewrite `&name;` escapes to literal Unicode characters, leaving the five
/// predefined XML entities (and numeric references) for the parser. An escape
/// missing from [`ENTITIES`] is fatal, with the offending names in the error.
pub fn normalize_entities(html: &str) -> Result<String> {
    let mut unknown = BTreeSet::new();
    let normalized = NAMED_ENTITY.replace_all(html, |caps: &Captures| {
        let name = &caps[1];
        if matches!(name, "amp" | "lt" | "gt" | "quot" | "apos") {
            return caps[0].to_string();
        }
        match ENTITIES.get(name) {
            Some(ch) => ch.to_string(),
            None => {
                unknown.insert(name.to_string());
                String::new()
            }
        }
    });

    if !unknown.is_empty() {
        let names: Vec<String> = unknown.into_iter().collect();
        bail!("unknown named entities: {}", names.join(", "));
    }

    Ok(normalized.into_owned())
}

/// HTML named entities seen on the page, plus the rest of the Latin-1 block
/// and common punctuation.
static ENTITIES: LazyLock<HashMap<&'static str, char>> = LazyLock::new(|| {
    HashMap::from([
        ("nbsp", '\u{00a0}'),
        ("iexcl", '¡'),
        ("cent", '¢'),
        ("pound", '£'),
        ("curren", '¤'),
        ("yen", '¥'),
        ("brvbar", '¦'),
        ("sect", '§'),
        ("uml", '¨'),
        ("copy", '©'),
        ("ordf", 'ª'),
        ("laquo", '«'),
        ("not", '¬'),
        ("shy", '\u{00ad}'),
        ("reg", '®'),
        ("macr", '¯'),
        ("deg", '°'),
        ("plusmn", '±'),
        ("sup2", '²'),
        ("sup3", '³'),
        ("acute", '´'),
        ("micro", 'µ'),
        ("para", '¶'),
        ("middot", '·'),
        ("cedil", '¸'),
        ("sup1", '¹'),
        ("ordm", 'º'),
        ("raquo", '»'),
        ("frac14", '¼'),
        ("frac12", '½'),
        ("frac34", '¾'),
        ("iquest", '¿'),
        ("Agrave", 'À'),
        ("Aacute", 'Á'),
        ("Acirc", 'Â'),
        ("Atilde", 'Ã'),
        ("Auml", 'Ä'),
        ("Aring", 'Å'),
        ("AElig", 'Æ'),
        ("Ccedil", 'Ç'),
        ("Egrave", 'È'),
        ("Eacute", 'É'),
        ("Ecirc", 'Ê'),
        ("Euml", 'Ë'),
        ("Igrave", 'Ì'),
        ("Iacute", 'Í'),
        ("Icirc", 'Î'),
        ("Iuml", 'Ï'),
        ("ETH", 'Ð'),
        ("Ntilde", 'Ñ'),
        ("Ograve", 'Ò'),
        ("Oacute", 'Ó'),
        ("Ocirc", 'Ô'),
        ("Otilde", 'Õ'),
        ("Ouml", 'Ö'),
        ("times", '×'),
        ("Oslash", 'Ø'),
        ("Ugrave", 'Ù'),
        ("Uacute", 'Ú'),
        ("Ucirc", 'Û'),
        ("Uuml", 'Ü'),
        ("Yacute", 'Ý'),
        ("THORN", 'Þ'),
        ("szlig", 'ß'),
        ("agrave", 'à'),
        ("aacute", 'á'),
        ("acirc", 'â'),
        ("atilde", 'ã'),
        ("auml", 'ä'),
        ("aring", 'å'),
        ("aelig", 'æ'),
        ("ccedil", 'ç'),
        ("egrave", 'è'),
        ("eacute", 'é'),
        ("ecirc", 'ê'),
        ("euml", 'ë'),
        ("igrave", 'ì'),
        ("iacute", 'í'),
        ("icirc", 'î'),
        ("iuml", 'ï'),
        ("eth", 'ð'),
        ("ntilde", 'ñ'),
        ("ograve", 'ò'),
        ("oacute", 'ó'),
        ("ocirc", 'ô'),
        ("otilde", 'õ'),
        ("ouml", 'ö'),
        ("divide", '÷'),
        ("oslash", 'ø'),
        ("ugrave", 'ù'),
        ("uacute", 'ú'),
        ("ucirc", 'û'),
        ("uuml", 'ü'),
        ("yacute", 'ý'),
        ("thorn", 'þ'),
        ("yuml", 'ÿ'),
        ("OElig", 'Œ'),
        ("oelig", 'œ'),
        ("Scaron", 'Š'),
        ("scaron", 'š'),
        ("Yuml", 'Ÿ'),
        ("fnof", 'ƒ'),
        ("circ", 'ˆ'),
        ("tilde", '˜'),
        ("ensp", '\u{2002}'),
        ("emsp", '\u{2003}'),
        ("thinsp", '\u{2009}'),
        ("zwnj", '\u{200c}'),
        ("zwj", '\u{200d}'),
        ("lrm", '\u{200e}'),
        ("rlm", '\u{200f}'),
        ("ndash", '–'),
        ("mdash", '—'),
        ("lsquo", '‘'),
        ("rsquo", '’'),
        ("sbquo", '‚'),
        ("ldquo", '“'),
        ("rdquo", '”'),
        ("bdquo", '„'),
        ("dagger", '†'),
        ("Dagger", '‡'),
        ("bull", '•'),
        ("hellip", '…'),
        ("permil", '‰'),
        ("prime", '′'),
        ("Prime", '″'),
        ("lsaquo", '‹'),
        ("rsaquo", '›'),
        ("oline", '‾'),
        ("frasl", '⁄'),
        ("euro", '€'),
        ("trade", '™'),
        ("larr", '←'),
        ("uarr", '↑'),
        ("rarr", '→'),
        ("darr", '↓'),
        ("harr", '↔'),
        ("minus", '−'),
        ("infin", '∞'),
        ("ne", '≠'),
        ("le", '≤'),
        ("ge", '≥'),
    ])
});
