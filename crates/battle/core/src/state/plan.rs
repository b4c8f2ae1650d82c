//! Battle plans: the standing orders a fleet fights under.

/// Which enemy tokens a fleet prefers to shoot at.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum BattleTarget {
    /// Hold fire.
    None,
    /// Anything hostile.
    #[default]
    Any,
    Starbase,
    ArmedShips,
    BombersFreighters,
    UnarmedShips,
    FuelTransports,
    Freighters,
}

/// How a fleet moves on the battle board.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum BattleTactic {
    /// Close on the preferred target and keep firing.
    #[default]
    MaximizeDamage,
    /// Fight until the stack takes damage, then run.
    DisengageIfChallenged,
    /// Run from armed enemies from the first round.
    Disengage,
}

/// Which players a fleet is willing to shoot at.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AttackWho {
    #[default]
    Enemies,
    EnemiesAndNeutrals,
}

/// Standing orders for one fleet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattlePlan {
    pub primary_target: BattleTarget,
    pub secondary_target: BattleTarget,
    pub tactic: BattleTactic,
    pub attack_who: AttackWho,
}

impl BattlePlan {
    /// The stock plan every player starts with.
    pub const fn new() -> Self {
        Self {
            primary_target: BattleTarget::ArmedShips,
            secondary_target: BattleTarget::Any,
            tactic: BattleTactic::MaximizeDamage,
            attack_who: AttackWho::Enemies,
        }
    }

    #[must_use]
    pub const fn with_targets(mut self, primary: BattleTarget, secondary: BattleTarget) -> Self {
        self.primary_target = primary;
        self.secondary_target = secondary;
        self
    }

    #[must_use]
    pub const fn with_tactic(mut self, tactic: BattleTactic) -> Self {
        self.tactic = tactic;
        self
    }

    #[must_use]
    pub const fn with_attack_who(mut self, attack_who: AttackWho) -> Self {
        self.attack_who = attack_who;
        self
    }

    /// Target policies in preference order.
    pub const fn policies(&self) -> [BattleTarget; 2] {
        [self.primary_target, self.secondary_target]
    }
}

impl Default for BattlePlan {
    fn default() -> Self {
        Self::new()
    }
}
