use super::{BattlePlan, DesignId, FleetId, MapCoords, PlayerId};

/// Whether a participant is a mobile fleet or an orbital starbase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FleetKind {
    #[default]
    Fleet,
    Starbase,
}

/// A stack of identical ships inside a fleet.
///
/// Damage is tracked per stack: `quantity_damaged` ships each carry
/// `damage` points of hull damage, the rest are pristine.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipStack {
    pub design: DesignId,
    pub quantity: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub quantity_damaged: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub damage: f64,
    /// Remaining shared shield pool; `None` means fully charged.
    #[cfg_attr(feature = "serde", serde(default))]
    pub stack_shields: Option<f64>,
}

impl ShipStack {
    pub fn new(design: DesignId, quantity: u32) -> Self {
        Self {
            design,
            quantity,
            quantity_damaged: 0,
            damage: 0.0,
            stack_shields: None,
        }
    }

    #[must_use]
    pub fn with_damage(mut self, quantity_damaged: u32, damage: f64) -> Self {
        self.quantity_damaged = quantity_damaged;
        self.damage = damage;
        self
    }

    pub fn is_destroyed(&self) -> bool {
        self.quantity == 0
    }
}

/// A fleet or starbase present at the battle location.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fleet {
    pub id: FleetId,
    pub player: PlayerId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub kind: FleetKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub plan: BattlePlan,
    pub stacks: Vec<ShipStack>,
}

impl Fleet {
    pub fn new(id: FleetId, player: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            player,
            name: name.into(),
            kind: FleetKind::Fleet,
            plan: BattlePlan::default(),
            stacks: Vec::new(),
        }
    }

    pub fn starbase(id: FleetId, player: PlayerId, name: impl Into<String>) -> Self {
        Self {
            kind: FleetKind::Starbase,
            ..Self::new(id, player, name)
        }
    }

    #[must_use]
    pub fn with_stack(mut self, stack: ShipStack) -> Self {
        self.stacks.push(stack);
        self
    }

    #[must_use]
    pub fn with_plan(mut self, plan: BattlePlan) -> Self {
        self.plan = plan;
        self
    }

    /// Total living ships across all stacks.
    pub fn ship_count(&self) -> u32 {
        self.stacks.iter().map(|stack| stack.quantity).sum()
    }

    /// True once every stack has been wiped out.
    pub fn is_destroyed(&self) -> bool {
        self.stacks.iter().all(ShipStack::is_destroyed)
    }
}

/// Everything sharing one map location at the end of a turn.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    /// Battle number assigned by the turn generator.
    pub num: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub planet: Option<u32>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub coords: MapCoords,
    pub fleets: Vec<Fleet>,
}

impl Location {
    pub fn new(num: u32, fleets: Vec<Fleet>) -> Self {
        Self {
            num,
            planet: None,
            coords: MapCoords::default(),
            fleets,
        }
    }

    #[must_use]
    pub fn at_planet(mut self, planet: u32, coords: MapCoords) -> Self {
        self.planet = Some(planet);
        self.coords = coords;
        self
    }
}
