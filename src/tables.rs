//! Static lookup tables driving extraction.
//!
//! These are configuration data, not code: they pin down how the page's
//! hand-maintained markup maps onto stable license ids. When the page changes
//! in a way the tables don't cover, extraction fails loudly and an entry here
//! needs updating.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Tag sets implied by the color class on each `<dl>` grouping.
/// A grouping class outside this map is a fatal error.
pub static TAGS: LazyLock<HashMap<&'static str, &'static [&'static str]>> = LazyLock::new(|| {
    HashMap::from([
        ("blue", &["viewpoint"][..]),
        ("green", &["gpl-2-compatible", "gpl-3-compatible", "libre"][..]),
        ("orange", &["libre"][..]),
        ("purple", &["fdl-compatible", "libre"][..]),
        ("red", &["non-free"][..]),
    ])
});

/// Anchor ids that fan out to several license ids (one page entry covering
/// multiple versions), or that fold a secondary anchor into an id emitted
/// elsewhere. Every key must still exist on the page; stale keys abort the run.
pub static SPLITS: LazyLock<HashMap<&'static str, &'static [&'static str]>> = LazyLock::new(|| {
    HashMap::from([
        (
            // all versions through 3.0
            "AcademicFreeLicense",
            &[
                "AcademicFreeLicense1.1",
                "AcademicFreeLicense1.2",
                "AcademicFreeLicense2.0",
                "AcademicFreeLicense2.1",
                "AcademicFreeLicense3.0",
            ][..],
        ),
        (
            // any version
            "CC-BY-NC",
            &[
                "CC-BY-NC-1.0",
                "CC-BY-NC-2.0",
                "CC-BY-NC-2.5",
                "CC-BY-NC-3.0",
                "CC-BY-NC-4.0",
            ][..],
        ),
        (
            // any version
            "CC-BY-ND",
            &[
                "CC-BY-ND-1.0",
                "CC-BY-ND-2.0",
                "CC-BY-ND-2.5",
                "CC-BY-ND-3.0",
                "CC-BY-ND-4.0",
            ][..],
        ),
        // secondary anchor, folds into the versioned id
        ("ccbynd", &["CC-BY-ND-4.0"][..]),
        ("FDL", &["FDLv1.1", "FDLv1.2", "FDLv1.3"][..]),
        // secondary anchor group for the same versions
        ("FDLOther", &["FDLv1.1", "FDLv1.2", "FDLv1.3"][..]),
        ("FreeBSDDL", &["FreeBSD"][..]),
        ("NPL", &["NPL-1.0", "NPL-1.1"][..]),
        (
            // any version through 3.0
            "OSL",
            &["OSL-1.0", "OSL-1.1", "OSL-2.0", "OSL-2.1", "OSL-3.0"][..],
        ),
        ("PythonOld", &["Python1.6b1", "Python2.0", "Python2.1"][..]),
        // entry is titled 1.1 but its text covers 1.0 as well
        ("SILOFL", &["SILOFL-1.0", "SILOFL-1.1"][..]),
        ("Zope2.0", &["Zope2.0", "Zope2.1"][..]),
    ])
});

/// Per-id tag sets that replace the grouping-derived tags on a record's first
/// contribution, for entries whose grouping is wrong or incomplete.
pub static TAG_OVERRIDES: LazyLock<HashMap<&'static str, &'static [&'static str]>> =
    LazyLock::new(|| {
        HashMap::from([
            ("AGPLv3.0", &["gpl-3-compatible", "libre"][..]),
            ("ECL2.0", &["gpl-3-compatible", "libre"][..]),
            ("freetype", &["gpl-3-compatible", "libre"][..]),
            ("GNUGPLv3", &["gpl-3-compatible", "libre"][..]),
            ("GPLv2", &["gpl-2-compatible", "libre"][..]),
            ("LGPLv3", &["gpl-3-compatible", "libre"][..]),
        ])
    });

/// External identifiers keyed by license id, then by scheme. Every key must
/// match an emitted record; stale keys abort the run before anything is
/// written. SPDX is the only scheme the page cross-references today.
pub static IDENTIFIERS: LazyLock<
    HashMap<&'static str, HashMap<&'static str, &'static [&'static str]>>,
> = LazyLock::new(|| {
    SPDX.iter()
        .map(|&(id, spdx)| (id, HashMap::from([("spdx", spdx)])))
        .collect()
});

const SPDX: &[(&str, &[&str])] = &[
    ("AGPLv1.0", &["AGPL-1.0"]),
    ("AGPLv3.0", &["AGPL-3.0-or-later", "AGPL-3.0-only", "AGPL-3.0"]),
    ("AcademicFreeLicense1.1", &["AFL-1.1"]),
    ("AcademicFreeLicense1.2", &["AFL-1.2"]),
    ("AcademicFreeLicense2.0", &["AFL-2.0"]),
    ("AcademicFreeLicense2.1", &["AFL-2.1"]),
    ("AcademicFreeLicense3.0", &["AFL-3.0"]),
    ("Aladdin", &["Aladdin"]),
    ("apache1.1", &["Apache-1.1"]),
    ("apache1", &["Apache-1.0"]),
    ("apache2", &["Apache-2.0"]),
    ("apsl1", &["APSL-1.0"]),
    ("apsl2", &["APSL-2.0"]),
    ("ArtisticLicense", &["Artistic-1.0"]),
    ("ArtisticLicense2", &["Artistic-2.0"]),
    ("BerkeleyDB", &["Sleepycat"]),
    ("bittorrent", &["BitTorrent-1.1"]),
    ("boost", &["BSL-1.0"]),
    ("ccby", &["CC-BY-4.0"]),
    ("CC-BY-NC-1.0", &["CC-BY-NC-1.0"]),
    ("CC-BY-NC-2.0", &["CC-BY-NC-2.0"]),
    ("CC-BY-NC-2.5", &["CC-BY-NC-2.5"]),
    ("CC-BY-NC-3.0", &["CC-BY-NC-3.0"]),
    ("CC-BY-NC-4.0", &["CC-BY-NC-4.0"]),
    ("CC-BY-ND-1.0", &["CC-BY-ND-1.0"]),
    ("CC-BY-ND-2.0", &["CC-BY-ND-2.0"]),
    ("CC-BY-ND-2.5", &["CC-BY-ND-2.5"]),
    ("CC-BY-ND-3.0", &["CC-BY-ND-3.0"]),
    ("CC-BY-ND-4.0", &["CC-BY-ND-4.0"]),
    ("ccbysa", &["CC-BY-SA-4.0"]),
    ("CC0", &["CC0-1.0"]),
    ("CDDL", &["CDDL-1.0"]),
    ("CPAL", &["CPAL-1.0"]),
    ("CeCILL", &["CECILL-2.0"]),
    ("CeCILL-B", &["CECILL-B"]),
    ("CeCILL-C", &["CECILL-C"]),
    ("ClarifiedArtistic", &["ClArtistic"]),
    ("clearbsd", &["BSD-3-Clause-Clear"]),
    ("CommonPublicLicense10", &["CPL-1.0"]),
    ("cpol", &["CPOL-1.02"]),
    ("Condor", &["Condor-1.1"]),
    ("ECL2.0", &["ECL-2.0"]),
    ("eCos11", &["RHeCos-1.1"]),
    ("eCos2.0", &["GPL-2.0+ WITH eCos-exception-2.0", "eCos-2.0"]),
    ("EPL", &["EPL-1.0"]),
    ("EPL2", &["EPL-2.0"]),
    ("EUDataGrid", &["EUDatagrid"]),
    ("EUPL-1.1", &["EUPL-1.1"]),
    ("EUPL-1.2", &["EUPL-1.2"]),
    ("Eiffel", &["EFL-2.0"]),
    ("Expat", &["MIT"]),
    ("FDLv1.1", &["GFDL-1.1-or-later", "GFDL-1.1-only", "GFDL-1.1"]),
    ("FDLv1.2", &["GFDL-1.2-or-later", "GFDL-1.2-only", "GFDL-1.2"]),
    ("FDLv1.3", &["GFDL-1.3-or-later", "GFDL-1.3-only", "GFDL-1.3"]),
    (
        "FreeBSD",
        &["BSD-2-Clause-FreeBSD", "BSD-2-Clause", "BSD-2-Clause-NetBSD"],
    ),
    ("freetype", &["FTL"]),
    ("GNUAllPermissive", &["FSFAP"]),
    (
        "GNUGPLv3",
        &["GPL-3.0-or-later", "GPL-3.0-only", "GPL-3.0", "GPL-3.0+"],
    ),
    ("gnuplot", &["gnuplot"]),
    (
        "GPLv2",
        &["GPL-2.0-or-later", "GPL-2.0-only", "GPL-2.0", "GPL-2.0+"],
    ),
    ("HPND", &["HPND"]),
    ("IBMPL", &["IPL-1.0"]),
    ("iMatix", &["iMatix"]),
    ("imlib", &["Imlib2"]),
    ("ijg", &["IJG"]),
    ("intel", &["Intel"]),
    ("IPAFONT", &["IPA"]),
    ("ISC", &["ISC"]),
    ("JSON", &["JSON"]),
    (
        "LGPLv3",
        &["LGPL-3.0-or-later", "LGPL-3.0-only", "LGPL-3.0", "LGPL-3.0+"],
    ),
    (
        "LGPLv2.1",
        &["LGPL-2.1-or-later", "LGPL-2.1-only", "LGPL-2.1", "LGPL-2.1+"],
    ),
    ("LPPL-1.2", &["LPPL-1.2"]),
    ("LPPL-1.3a", &["LPPL-1.3a"]),
    ("lucent102", &["LPL-1.02"]),
    ("ModifiedBSD", &["BSD-3-Clause"]),
    ("MPL", &["MPL-1.1"]),
    ("MPL-2.0", &["MPL-2.0"]),
    ("ms-pl", &["MS-PL"]),
    ("ms-rl", &["MS-RL"]),
    ("NASA", &["NASA-1.3"]),
    ("NCSA", &["NCSA"]),
    ("newOpenLDAP", &["OLDAP-2.7"]),
    ("Nokia", &["Nokia"]),
    ("NoLicense", &["NONE"]),
    ("NOSL", &["NOSL"]),
    ("NPL-1.0", &["NPL-1.0"]),
    ("NPL-1.1", &["NPL-1.1"]),
    ("ODbl", &["ODbL-1.0"]),
    ("oldOpenLDAP", &["OLDAP-2.3"]),
    ("OpenPublicL", &["OPL-1.0"]),
    ("OpenSSL", &["OpenSSL"]),
    ("OriginalBSD", &["BSD-4-Clause"]),
    ("OSL-1.0", &["OSL-1.0"]),
    ("OSL-1.1", &["OSL-1.1"]),
    ("OSL-2.0", &["OSL-2.0"]),
    ("OSL-2.1", &["OSL-2.1"]),
    ("OSL-3.0", &["OSL-3.0"]),
    ("PHP-3.01", &["PHP-3.01"]),
    ("Python2.0", &["Python-2.0"]),
    ("QPL", &["QPL-1.0"]),
    ("RPSL", &["RPSL-1.0"]),
    ("Ruby", &["Ruby"]),
    ("SGIFreeB", &["SGI-B-2.0"]),
    ("SILOFL-1.0", &["OFL-1.0"]),
    ("SILOFL-1.1", &["OFL-1.1"]),
    ("SPL", &["SPL-1.0"]),
    ("StandardMLofNJ", &["SMLNJ", "StandardML-NJ"]),
    ("Unlicense", &["Unlicense"]),
    ("UPL", &["UPL-1.0"]),
    ("Vim", &["Vim"]),
    ("W3C", &["W3C"]),
    ("Watcom", &["Watcom-1.0"]),
    ("WTFPL", &["WTFPL"]),
    ("X11License", &["X11"]),
    ("XFree861.1License", &["XFree86-1.1"]),
    ("xinetd", &["xinetd"]),
    ("Yahoo", &["YPL-1.1"]),
    ("Zend", &["Zend-2.0"]),
    ("Zimbra", &["Zimbra-1.3"]),
    ("ZLib", &["Zlib", "Nunit"]),
    ("Zope2.0", &["ZPL-2.0"]),
    ("Zope2.1", &["ZPL-2.1"]),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_vocabulary_covers_page_colors() {
        for color in ["blue", "green", "orange", "purple", "red"] {
            assert!(TAGS.contains_key(color), "missing color {color}");
        }
    }

    #[test]
    fn test_splits_have_targets() {
        for (oid, ids) in SPLITS.iter() {
            assert!(!ids.is_empty(), "split {oid} has no output ids");
        }
    }

    #[test]
    fn test_override_tags_exist_in_vocabulary() {
        let known: Vec<&str> = TAGS.values().flat_map(|tags| tags.iter().copied()).collect();
        for (id, tags) in TAG_OVERRIDES.iter() {
            for tag in *tags {
                assert!(known.contains(tag), "override {id} uses unknown tag {tag}");
            }
        }
    }

    #[test]
    fn test_identifiers_use_spdx_scheme() {
        for schemes in IDENTIFIERS.values() {
            assert!(schemes.contains_key("spdx"));
        }
    }
}
