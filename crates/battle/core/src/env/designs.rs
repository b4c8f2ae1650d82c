use crate::state::{DesignId, PlayerId, WeaponKind};

/// Read-only lookup of ship design statistics.
///
/// Backed by the tech database and each player's design list. The engine
/// queries it once per token during setup and never afterwards.
pub trait DesignOracle: Send + Sync {
    fn design(&self, player: PlayerId, design: DesignId) -> Option<ShipDesign>;
}

/// Weapon installed in a design, as computed by the tech database.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeaponSpec {
    pub name: String,
    pub kind: WeaponKind,
    pub power: u32,
    pub range: u32,
    /// Hit chance in percent; beams always hit and ignore it.
    #[cfg_attr(feature = "serde", serde(default))]
    pub accuracy: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub initiative: u32,
    /// Weapons of this kind per ship.
    pub quantity: u32,
}

impl WeaponSpec {
    pub fn beam(name: impl Into<String>, power: u32, range: u32, quantity: u32) -> Self {
        Self {
            name: name.into(),
            kind: WeaponKind::Beam,
            power,
            range,
            accuracy: 0,
            initiative: 0,
            quantity,
        }
    }

    pub fn torpedo(
        name: impl Into<String>,
        power: u32,
        range: u32,
        accuracy: u32,
        quantity: u32,
    ) -> Self {
        Self {
            name: name.into(),
            kind: WeaponKind::Torpedo,
            power,
            range,
            accuracy,
            initiative: 0,
            quantity,
        }
    }

    #[must_use]
    pub fn with_initiative(mut self, initiative: u32) -> Self {
        self.initiative = initiative;
        self
    }

    /// Weapons that share a category collapse into one battle slot.
    pub(crate) fn same_category(&self, other: &WeaponSpec) -> bool {
        self.kind == other.kind
            && self.power == other.power
            && self.range == other.range
            && self.accuracy == other.accuracy
            && self.initiative == other.initiative
    }
}

/// Combat-relevant summary of a ship design.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipDesign {
    pub id: DesignId,
    pub player: PlayerId,
    pub name: String,
    /// Armor per ship.
    pub armor: u32,
    /// Shields per ship.
    #[cfg_attr(feature = "serde", serde(default))]
    pub shields: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub initiative: u32,
    /// Board squares the design can cover per round.
    #[cfg_attr(feature = "serde", serde(default = "default_movement"))]
    pub movement: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub weapons: Vec<WeaponSpec>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub cargo_capacity: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bomber: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub fuel_transport: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub starbase: bool,
}

#[cfg(feature = "serde")]
fn default_movement() -> u32 {
    1
}

impl ShipDesign {
    pub fn new(player: PlayerId, id: DesignId, name: impl Into<String>, armor: u32) -> Self {
        Self {
            id,
            player,
            name: name.into(),
            armor,
            shields: 0,
            initiative: 0,
            movement: 1,
            weapons: Vec::new(),
            cargo_capacity: 0,
            bomber: false,
            fuel_transport: false,
            starbase: false,
        }
    }

    #[must_use]
    pub fn with_shields(mut self, shields: u32) -> Self {
        self.shields = shields;
        self
    }

    #[must_use]
    pub fn with_initiative(mut self, initiative: u32) -> Self {
        self.initiative = initiative;
        self
    }

    #[must_use]
    pub fn with_movement(mut self, movement: u32) -> Self {
        self.movement = movement;
        self
    }

    #[must_use]
    pub fn with_weapon(mut self, weapon: WeaponSpec) -> Self {
        self.weapons.push(weapon);
        self
    }

    #[must_use]
    pub fn with_cargo_capacity(mut self, cargo_capacity: u32) -> Self {
        self.cargo_capacity = cargo_capacity;
        self
    }

    #[must_use]
    pub fn as_bomber(mut self) -> Self {
        self.bomber = true;
        self
    }

    #[must_use]
    pub fn as_fuel_transport(mut self) -> Self {
        self.fuel_transport = true;
        self
    }

    #[must_use]
    pub fn as_starbase(mut self) -> Self {
        self.starbase = true;
        self.movement = 0;
        self
    }

    /// A design is armed when at least one weapon can do damage.
    pub fn is_armed(&self) -> bool {
        self.weapons
            .iter()
            .any(|weapon| weapon.power > 0 && weapon.quantity > 0)
    }
}
