//! Roster construction: fleets and designs in, tokens and weapon slots out.

use crate::config::BattleRules;
use crate::env::{DesignOracle, ShipDesign, WeaponSpec};
use crate::error::ErrorContext;
use crate::state::{
    BattleRecordToken, BattleToken, BattleWeaponSlot, Fleet, FleetKind, Location, PlayerId,
    TokenAttributes, TokenId, TokenOrigin,
};

use super::BattleError;

/// Everything a battle fights with, indexed by [`TokenId`].
#[derive(Clone, Debug, Default)]
pub(crate) struct Roster {
    pub tokens: Vec<BattleToken>,
    /// Weapon slots per token, highest initiative first.
    pub weapons: Vec<Vec<BattleWeaponSlot>>,
    pub entries: Vec<BattleRecordToken>,
}

impl Roster {
    /// Longest weapon range of a token, `None` when it has no weapons.
    pub fn max_range(&self, token: TokenId) -> Option<u32> {
        self.weapons
            .get(token.index())
            .and_then(|slots| slots.iter().map(|slot| slot.range).max())
    }
}

/// Builds one token per living stack, in fleet then stack order.
///
/// Fails on the first stack whose design is unknown or whose damage
/// bookkeeping is inconsistent; nothing is built in that case.
pub(crate) fn build_roster(
    location: &Location,
    rules: &BattleRules,
    designs: &(impl DesignOracle + ?Sized),
) -> Result<Roster, BattleError> {
    let mut roster = Roster::default();
    let mut slots: Vec<PlayerId> = Vec::new();

    for (fleet_index, fleet) in location.fleets.iter().enumerate() {
        for (stack_index, stack) in fleet.stacks.iter().enumerate() {
            if stack.quantity == 0 {
                continue;
            }
            let context = ErrorContext::new(location.num)
                .with_fleet(fleet.id)
                .with_design(stack.design)
                .with_stack(stack_index);

            if stack.quantity_damaged > stack.quantity {
                return Err(BattleError::InvalidStack {
                    quantity: stack.quantity,
                    quantity_damaged: stack.quantity_damaged,
                    context,
                });
            }
            let design = designs
                .design(fleet.player, stack.design)
                .ok_or_else(|| BattleError::design_not_found(fleet.player, stack.design, context))?;

            let slot = match slots.iter().position(|&player| player == fleet.player) {
                Some(slot) => slot,
                None => {
                    slots.push(fleet.player);
                    slots.len() - 1
                }
            };

            let id = TokenId(roster.tokens.len() as u32);
            let origin = TokenOrigin {
                fleet: fleet.id,
                fleet_index,
                stack_index,
            };
            let mut token = token_for(id, fleet, &design, origin)
                .at(rules.starting_position(slot))
                .with_damage(stack.quantity_damaged, stack.damage)
                .with_shields(f64::from(design.shields));
            if let Some(pool) = stack.stack_shields {
                token.stack_shields = pool.clamp(0.0, token.max_stack_shields());
            }

            roster.entries.push(BattleRecordToken {
                token: id,
                player: token.player,
                fleet: fleet.id,
                design: design.id,
                attributes: token.attributes,
                position: token.position,
                quantity: token.quantity,
            });
            roster.weapons.push(weapon_slots(id, &design));
            roster.tokens.push(token);
        }
    }

    if roster.tokens.is_empty() {
        return Err(BattleError::no_participants(location.num));
    }

    Ok(roster)
}

fn token_for(id: TokenId, fleet: &Fleet, design: &ShipDesign, origin: TokenOrigin) -> BattleToken {
    let starbase = design.starbase || fleet.kind == FleetKind::Starbase;
    let quantity = fleet.stacks[origin.stack_index].quantity;

    let mut token = BattleToken::new(id, fleet.player, quantity, f64::from(design.armor))
        .with_attributes(attributes_of(design, starbase))
        .with_plan(fleet.plan)
        .with_initiative(design.initiative)
        .with_movement(if starbase { 0 } else { design.movement });
    token.design = design.id;
    token.origin = origin;
    token
}

/// Role flags a design carries into battle.
pub(crate) fn attributes_of(design: &ShipDesign, starbase: bool) -> TokenAttributes {
    let mut attributes = if design.is_armed() {
        TokenAttributes::ARMED
    } else {
        TokenAttributes::UNARMED
    };
    attributes.set(TokenAttributes::STARBASE, starbase);
    attributes.set(TokenAttributes::FREIGHTER, design.cargo_capacity > 0);
    attributes.set(TokenAttributes::BOMBER, design.bomber);
    attributes.set(TokenAttributes::FUEL_TRANSPORT, design.fuel_transport);
    attributes
}

/// Collapses identical weapons into one slot each, highest initiative first.
fn weapon_slots(token: TokenId, design: &ShipDesign) -> Vec<BattleWeaponSlot> {
    let mut grouped: Vec<(WeaponSpec, u32)> = Vec::new();
    for weapon in &design.weapons {
        if weapon.power == 0 || weapon.quantity == 0 {
            continue;
        }
        match grouped
            .iter_mut()
            .find(|(existing, _)| existing.same_category(weapon))
        {
            Some((_, quantity)) => *quantity += weapon.quantity,
            None => grouped.push((weapon.clone(), weapon.quantity)),
        }
    }

    let mut slots: Vec<BattleWeaponSlot> = grouped
        .into_iter()
        .map(|(weapon, quantity)| BattleWeaponSlot {
            token,
            kind: weapon.kind,
            power: weapon.power,
            range: weapon.range,
            accuracy: weapon.accuracy,
            slot_quantity: quantity,
            initiative: design.initiative + weapon.initiative,
        })
        .collect();
    slots.sort_by(|a, b| b.initiative.cmp(&a.initiative));
    slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::DesignTable;
    use crate::state::{DesignId, FleetId, Position, ShipStack, WeaponKind};

    fn destroyer() -> ShipDesign {
        ShipDesign::new(PlayerId(1), DesignId(1), "Stalwart Defender", 275)
            .with_initiative(3)
            .with_weapon(WeaponSpec::torpedo("Beta Torpedo", 12, 4, 45, 1).with_initiative(1))
            .with_weapon(WeaponSpec::beam("X-Ray Laser", 16, 1, 1).with_initiative(9))
            .with_weapon(WeaponSpec::beam("X-Ray Laser", 16, 1, 2).with_initiative(9))
    }

    fn freighter() -> ShipDesign {
        ShipDesign::new(PlayerId(2), DesignId(1), "Teamster", 100).with_cargo_capacity(70)
    }

    #[test]
    fn identical_weapons_share_a_slot() {
        let slots = weapon_slots(TokenId(0), &destroyer());

        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].kind, WeaponKind::Beam);
        assert_eq!(slots[0].slot_quantity, 3);
        assert_eq!(slots[0].initiative, 12);
        assert_eq!(slots[1].kind, WeaponKind::Torpedo);
        assert_eq!(slots[1].initiative, 4);
    }

    #[test]
    fn attributes_follow_the_design() {
        assert_eq!(attributes_of(&destroyer(), false), TokenAttributes::ARMED);
        assert_eq!(
            attributes_of(&freighter(), false),
            TokenAttributes::UNARMED | TokenAttributes::FREIGHTER
        );
        assert!(attributes_of(&destroyer(), true).contains(TokenAttributes::STARBASE));
    }

    #[test]
    fn players_start_on_their_own_squares() {
        let designs: DesignTable = [destroyer(), freighter()].into_iter().collect();
        let location = Location::new(
            1,
            vec![
                Fleet::new(FleetId(10), PlayerId(2), "Teamster")
                    .with_stack(ShipStack::new(DesignId(1), 1)),
                Fleet::new(FleetId(11), PlayerId(1), "Stalwart Defender")
                    .with_stack(ShipStack::new(DesignId(1), 2)),
                Fleet::new(FleetId(12), PlayerId(2), "Second Teamster")
                    .with_stack(ShipStack::new(DesignId(1), 0))
                    .with_stack(ShipStack::new(DesignId(1), 3)),
            ],
        );

        let roster = build_roster(&location, &BattleRules::default(), &designs).unwrap();

        assert_eq!(roster.tokens.len(), 3);
        assert_eq!(roster.tokens[0].position, Position::new(1, 4));
        assert_eq!(roster.tokens[1].position, Position::new(8, 5));
        assert_eq!(roster.tokens[2].position, Position::new(1, 4));
        assert_eq!(roster.tokens[2].origin.stack_index, 1);
        assert_eq!(roster.max_range(TokenId(1)), Some(4));
        assert_eq!(roster.max_range(TokenId(0)), None);
    }

    #[test]
    fn inconsistent_stack_is_rejected() {
        let designs: DesignTable = [freighter()].into_iter().collect();
        let location = Location::new(
            4,
            vec![
                Fleet::new(FleetId(1), PlayerId(2), "Teamster")
                    .with_stack(ShipStack::new(DesignId(1), 1).with_damage(2, 5.0)),
            ],
        );

        let error = build_roster(&location, &BattleRules::default(), &designs).unwrap_err();

        assert!(matches!(
            error,
            BattleError::InvalidStack {
                quantity: 1,
                quantity_damaged: 2,
                ..
            }
        ));
    }

    #[test]
    fn saved_shield_pool_is_restored() {
        let designs: DesignTable = [freighter().with_shields(10)].into_iter().collect();
        let mut stack = ShipStack::new(DesignId(1), 2);
        stack.stack_shields = Some(7.5);
        let location = Location::new(
            1,
            vec![Fleet::new(FleetId(1), PlayerId(2), "Teamster").with_stack(stack)],
        );

        let roster = build_roster(&location, &BattleRules::default(), &designs).unwrap();

        assert_eq!(roster.tokens[0].stack_shields, 7.5);
        assert_eq!(roster.tokens[0].max_stack_shields(), 20.0);
    }
}
