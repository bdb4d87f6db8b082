//! Territorial holdings per faction.
//!
//! Holdings only ever grow. Granting a territory to one faction never removes
//! it from another, so several factions may claim the same territory at once.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Faction name -> set of territory identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TerritoryMap(BTreeMap<String, BTreeSet<String>>);

impl TerritoryMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`TerritoryMap::grant`].
    pub fn with_grant<I, S>(mut self, faction: impl Into<String>, territories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.grant(faction, territories);
        self
    }

    /// Union `territories` into the holdings of `faction`, creating the
    /// faction entry if needed (even when `territories` is empty).
    pub fn grant<I, S>(&mut self, faction: impl Into<String>, territories: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0
            .entry(faction.into())
            .or_default()
            .extend(territories.into_iter().map(Into::into));
    }

    /// Union every grant of `other` into this map.
    pub fn merge(&mut self, other: &TerritoryMap) {
        for (faction, territories) in &other.0 {
            self.grant(faction.clone(), territories.iter().cloned());
        }
    }

    /// Territories held by a faction, if the faction is known.
    pub fn holdings(&self, faction: &str) -> Option<&BTreeSet<String>> {
        self.0.get(faction)
    }

    /// Check whether a faction holds a territory.
    pub fn holds(&self, faction: &str, territory: &str) -> bool {
        self.0
            .get(faction)
            .is_some_and(|territories| territories.contains(territory))
    }

    /// All factions currently claiming a territory.
    pub fn claimants(&self, territory: &str) -> Vec<&str> {
        self.0
            .iter()
            .filter(|(_, territories)| territories.contains(territory))
            .map(|(faction, _)| faction.as_str())
            .collect()
    }

    /// Iterate over factions and their holdings.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeSet<String>)> {
        self.0.iter()
    }

    /// Known faction names.
    pub fn factions(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grant_creates_faction() {
        let mut map = TerritoryMap::new();
        map.grant("japanese", ["manchuria"]);
        assert!(map.holds("japanese", "manchuria"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_grant_is_additive() {
        let mut map = TerritoryMap::new().with_grant("communist", ["jiangxi", "fujian"]);
        map.grant("communist", ["shaanxi"]);

        let holdings = map.holdings("communist").unwrap();
        assert_eq!(holdings.len(), 3);
        assert!(holdings.contains("jiangxi"));
    }

    #[test]
    fn test_shared_claims_are_kept() {
        let mut map = TerritoryMap::new().with_grant("central_government", ["jiangxi"]);
        map.grant("communist", ["jiangxi"]);

        assert!(map.holds("central_government", "jiangxi"));
        assert!(map.holds("communist", "jiangxi"));
        assert_eq!(map.claimants("jiangxi"), vec!["central_government", "communist"]);
    }

    #[test]
    fn test_empty_grant_registers_faction() {
        let map = TerritoryMap::new().with_grant("japanese", Vec::<String>::new());
        assert!(map.holdings("japanese").is_some_and(|h| h.is_empty()));
    }

    #[test]
    fn test_merge() {
        let mut base = TerritoryMap::new().with_grant("a", ["x"]);
        let other = TerritoryMap::new().with_grant("a", ["y"]).with_grant("b", ["x"]);
        base.merge(&other);

        assert!(base.holds("a", "x"));
        assert!(base.holds("a", "y"));
        assert!(base.holds("b", "x"));
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let map = TerritoryMap::new().with_grant("japanese", ["manchuria"]);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"japanese":["manchuria"]}"#);
    }
}
