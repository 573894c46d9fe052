//! Anatomical site names and their WFDB signal prefixes
//!
//! Two generations of the database name their sites differently. The 2024
//! (v2) export adds the Circle-of-Willis sites; the 2019 (v1) export uses
//! Roman numerals for segment numbers. Lookups try v2 first and fall back
//! to v1.

use crate::error::{Error, Result};

/// A bidirectional site ↔ signal prefix table
#[derive(Debug, Clone, Copy)]
pub struct SiteMap {
    entries: &'static [(&'static str, &'static str)],
}

impl SiteMap {
    /// Signal prefix recorded for a model site name
    pub fn prefix_for_site(&self, site: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(name, _)| *name == site)
            .map(|(_, prefix)| *prefix)
    }

    /// Model site name for a signal prefix
    pub fn site_for_prefix(&self, prefix: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(_, p)| *p == prefix)
            .map(|(name, _)| *name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.entries.iter().copied()
    }
}

/// Mapping used by the 2024 export (includes the Circle-of-Willis sites)
pub const V2: SiteMap = SiteMap {
    entries: &[
        ("Ascending Aorta", "AorticRoot"),
        ("DTA 1", "ThorAorta"),
        ("Abdominal Aorta 4", "AbdAorta"),
        ("Abdominal Aorta 5", "IliacBif"),
        ("Left Common Carotid Artery", "LCCA"),
        ("Left Superior Temporal Artery", "SupTemporal"),
        ("Left Brachial Artery", "Brachial"),
        ("Left Radial Artery", "Radial"),
        ("Left Digital Artery 3", "Digital"),
        ("LEIA", "CommonIliac"),
        ("Left Femoral Artery", "Femoral"),
        ("Left Anterior Tibial Artery", "AntTibial"),
        ("RICA", "ICA"),
        // Complete topology records a single combined MCA signal
        ("MiddleCerebralArtery(M1)", "MCA"),
        ("LeftMiddleCerebralArtery(M1)", "LMCA"),
        ("RightMiddleCerebralArtery(M1)", "RMCA"),
        ("Right Posterior Cerebral Artery 2", "PCA"),
        ("RightAnteriorCerebralArtery2", "ACA"),
        ("Left Vertebral Artery", "LVA"),
        ("Basilar Artery 2", "BA"),
        ("Right Vertebral Artery", "RVA"),
        ("Right Common Carotid Artery", "RCCA"),
    ],
};

/// Mapping used by the 2019 export
pub const V1: SiteMap = SiteMap {
    entries: &[
        ("Ascending Aorta", "AorticRoot"),
        ("Descending Thoracic Aorta I", "ThorAorta"),
        ("Abdominal Aorta IV", "AbdAorta"),
        ("Abdominal Aorta V", "IliacBif"),
        ("Left Common Carotid Artery", "Carotid"),
        ("Left Superior Temporal Artery", "SupTemporal"),
        ("Left Superior Middle Cerebral Artery (M2)", "SupMidCerebral"),
        ("Left Brachial Artery", "Brachial"),
        ("Left Radial Artery", "Radial"),
        ("Left Digital Artery III", "Digital"),
        ("Left External Iliac Artery", "CommonIliac"),
        ("Left Femoral Artery", "Femoral"),
        ("Left Anterior Tibial Artery", "AntTibial"),
    ],
};

/// Site name for a signal prefix, v2 first then v1
pub fn site_name(prefix: &str) -> Result<&'static str> {
    V2.site_for_prefix(prefix)
        .or_else(|| V1.site_for_prefix(prefix))
        .ok_or_else(|| Error::UnknownPrefix {
            prefix: prefix.to_string(),
        })
}

/// Signal prefix for a site name, v2 first then v1
pub fn signal_prefix(site: &str) -> Result<&'static str> {
    V2.prefix_for_site(site)
        .or_else(|| V1.prefix_for_site(site))
        .ok_or_else(|| Error::UnknownSite {
            name: site.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_v2_lookup_both_directions() {
        assert_eq!(V2.site_for_prefix("Radial"), Some("Left Radial Artery"));
        assert_eq!(V2.prefix_for_site("RICA"), Some("ICA"));
    }

    #[test]
    fn test_v1_fallback() {
        // Carotid only exists in the 2019 naming
        assert_eq!(
            site_name("Carotid").unwrap(),
            "Left Common Carotid Artery"
        );
        assert_eq!(site_name("SupMidCerebral").unwrap(), "Left Superior Middle Cerebral Artery (M2)");
        assert_eq!(
            signal_prefix("Left Digital Artery III").unwrap(),
            "Digital"
        );
    }

    #[test]
    fn test_v2_preferred_over_v1() {
        // Both maps know AbdAorta; v2 wins
        assert_eq!(site_name("AbdAorta").unwrap(), "Abdominal Aorta 4");
        // Shared site name resolves to the v2 prefix
        assert_eq!(signal_prefix("Left Common Carotid Artery").unwrap(), "LCCA");
    }

    #[test]
    fn test_unknown_lookups() {
        assert!(matches!(
            site_name("Elbow"),
            Err(Error::UnknownPrefix { .. })
        ));
        assert!(matches!(
            signal_prefix("Left Elbow"),
            Err(Error::UnknownSite { .. })
        ));
    }

    #[test]
    fn test_prefixes_unique_within_each_map() {
        for map in [V1, V2] {
            let mut prefixes: Vec<_> = map.iter().map(|(_, p)| p).collect();
            let total = prefixes.len();
            prefixes.sort_unstable();
            prefixes.dedup();
            assert_eq!(prefixes.len(), total);
        }
    }
}
