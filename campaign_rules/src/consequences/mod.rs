//! Consequences of a choice: power deltas plus territory grants.

use serde::{Deserialize, Serialize};

use crate::powers::{PowerDelta, PowerKind};
use crate::territory::TerritoryMap;

/// The structured delta applied to the player when a choice is taken.
///
/// Every field is optional in saved documents. The territory grants are
/// stored under the `territories` key.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Consequences {
    #[serde(flatten)]
    pub powers: PowerDelta,

    /// Faction -> territories added to that faction's holdings.
    #[serde(default, rename = "territories")]
    pub territory_grants: TerritoryMap,
}

impl Consequences {
    /// Consequences that change nothing.
    pub fn none() -> Self {
        Self::default()
    }

    /// Set the military power delta.
    pub fn with_military(mut self, delta: i64) -> Self {
        self.powers.military_power = delta;
        self
    }

    /// Set the political power delta.
    pub fn with_political(mut self, delta: i64) -> Self {
        self.powers.political_power = delta;
        self
    }

    /// Set the economic power delta.
    pub fn with_economic(mut self, delta: i64) -> Self {
        self.powers.economic_power = delta;
        self
    }

    /// Grant territories to a faction.
    pub fn with_grant<I, S>(mut self, faction: impl Into<String>, territories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.territory_grants.grant(faction, territories);
        self
    }

    /// Delta for a single power metric.
    pub fn power(&self, kind: PowerKind) -> i64 {
        self.powers.get(kind)
    }

    /// True when taking the choice leaves the player unchanged.
    pub fn is_empty(&self) -> bool {
        self.powers.is_zero() && self.territory_grants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let consequences = Consequences::none()
            .with_military(-20)
            .with_political(-10)
            .with_grant("japanese", ["manchuria"]);

        assert_eq!(consequences.power(PowerKind::Military), -20);
        assert_eq!(consequences.power(PowerKind::Political), -10);
        assert_eq!(consequences.power(PowerKind::Economic), 0);
        assert!(consequences.territory_grants.holds("japanese", "manchuria"));
        assert!(!consequences.is_empty());
    }

    #[test]
    fn test_missing_fields_default() {
        let consequences: Consequences = serde_json::from_str("{}").unwrap();
        assert!(consequences.is_empty());

        let consequences: Consequences =
            serde_json::from_str(r#"{"economic_power": 5, "territories": {"communist": ["fujian"]}}"#)
                .unwrap();
        assert_eq!(consequences.powers, PowerDelta::new(0, 0, 5));
        assert!(consequences.territory_grants.holds("communist", "fujian"));
    }

    #[test]
    fn test_wire_shape() {
        let consequences = Consequences::none().with_military(3).with_grant("a", ["b"]);
        let value = serde_json::to_value(&consequences).unwrap();

        assert_eq!(value["military_power"], 3);
        assert_eq!(value["political_power"], 0);
        assert_eq!(value["territories"]["a"][0], "b");
    }
}
