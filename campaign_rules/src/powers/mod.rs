//! National power metrics and the signed deltas applied to them.

use serde::{Deserialize, Serialize};

/// The three national power metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerKind {
    Military,
    Political,
    Economic,
}

impl PowerKind {
    /// All kinds, in display order.
    pub const ALL: [PowerKind; 3] = [PowerKind::Military, PowerKind::Political, PowerKind::Economic];

    /// Field name used in saved documents.
    pub fn field_name(&self) -> &'static str {
        match self {
            PowerKind::Military => "military_power",
            PowerKind::Political => "political_power",
            PowerKind::Economic => "economic_power",
        }
    }
}

/// Current power levels of the player's nation.
///
/// There is no floor or ceiling: levels may go negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Powers {
    pub military_power: i64,
    pub political_power: i64,
    pub economic_power: i64,
}

impl Powers {
    pub fn new(military_power: i64, political_power: i64, economic_power: i64) -> Self {
        Self {
            military_power,
            political_power,
            economic_power,
        }
    }

    /// Read a single metric.
    pub fn get(&self, kind: PowerKind) -> i64 {
        match kind {
            PowerKind::Military => self.military_power,
            PowerKind::Political => self.political_power,
            PowerKind::Economic => self.economic_power,
        }
    }

    /// Add a signed delta to every metric. Values saturate at the `i64` limits.
    pub fn apply(&mut self, delta: &PowerDelta) {
        self.military_power = self.military_power.saturating_add(delta.military_power);
        self.political_power = self.political_power.saturating_add(delta.political_power);
        self.economic_power = self.economic_power.saturating_add(delta.economic_power);
    }
}

impl Default for Powers {
    fn default() -> Self {
        Self::new(100, 100, 100)
    }
}

/// Signed change to the power metrics carried by a choice.
///
/// Every field defaults to zero when absent from a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PowerDelta {
    #[serde(default)]
    pub military_power: i64,
    #[serde(default)]
    pub political_power: i64,
    #[serde(default)]
    pub economic_power: i64,
}

impl PowerDelta {
    pub fn new(military_power: i64, political_power: i64, economic_power: i64) -> Self {
        Self {
            military_power,
            political_power,
            economic_power,
        }
    }

    /// Read a single component of the delta.
    pub fn get(&self, kind: PowerKind) -> i64 {
        match kind {
            PowerKind::Military => self.military_power,
            PowerKind::Political => self.political_power,
            PowerKind::Economic => self.economic_power,
        }
    }

    /// True when applying the delta changes nothing.
    pub fn is_zero(&self) -> bool {
        PowerKind::ALL.iter().all(|kind| self.get(*kind) == 0)
    }
}
