use std::collections::BTreeSet;

use super::{ActorId, EquipmentId, Faction, Position, SpellId, StatKind, StatusEffects};

const fn default_attack_range() -> u32 {
    1
}

/// Complete snapshot of a single hero or monster on the board.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorState {
    pub id: ActorId,
    pub name: String,
    pub faction: Faction,
    pub position: Position,
    /// Tiles of movement granted at the start of each of the actor's turns.
    pub movement: u32,
    pub attack_dice: u32,
    /// Attack reach in tiles; 1 means melee.
    #[cfg_attr(feature = "serde", serde(default = "default_attack_range"))]
    pub attack_range: u32,
    pub defense_dice: u32,
    pub health: u32,
    pub max_health: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub known_spells: BTreeSet<SpellId>,
    /// Carried equipment. Order matters: consuming an item removes its first
    /// occurrence.
    #[cfg_attr(feature = "serde", serde(default))]
    pub equipment: Vec<EquipmentId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub status_effects: StatusEffects,
}

impl ActorState {
    /// Creates an actor with full health, melee reach, and no cards.
    pub fn new(
        id: impl Into<ActorId>,
        name: impl Into<String>,
        faction: Faction,
        position: Position,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            faction,
            position,
            movement: 0,
            attack_dice: 0,
            attack_range: default_attack_range(),
            defense_dice: 0,
            health: 1,
            max_health: 1,
            known_spells: BTreeSet::new(),
            equipment: Vec::new(),
            status_effects: StatusEffects::empty(),
        }
    }

    pub fn with_movement(mut self, movement: u32) -> Self {
        self.movement = movement;
        self
    }

    pub fn with_attack(mut self, attack_dice: u32, attack_range: u32) -> Self {
        self.attack_dice = attack_dice;
        self.attack_range = attack_range.max(1);
        self
    }

    pub fn with_defense(mut self, defense_dice: u32) -> Self {
        self.defense_dice = defense_dice;
        self
    }

    /// Sets both current and maximum health.
    pub fn with_health(mut self, health: u32) -> Self {
        self.max_health = health.max(1);
        self.health = health.min(self.max_health);
        self
    }

    pub fn with_spell(mut self, spell: impl Into<SpellId>) -> Self {
        self.known_spells.insert(spell.into());
        self
    }

    pub fn with_equipment(mut self, equipment: impl Into<EquipmentId>) -> Self {
        self.equipment.push(equipment.into());
        self
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn knows_spell(&self, spell: &SpellId) -> bool {
        self.known_spells.contains(spell)
    }

    pub fn carries(&self, equipment: &EquipmentId) -> bool {
        self.equipment.contains(equipment)
    }

    pub fn stat(&self, stat: StatKind) -> u32 {
        match stat {
            StatKind::AttackDice => self.attack_dice,
            StatKind::DefenseDice => self.defense_dice,
            StatKind::Movement => self.movement,
            StatKind::MaxHealth => self.max_health,
        }
    }

    /// Adds `delta` to a stat and returns the change actually committed.
    ///
    /// Dice and movement floor at 0. Maximum health floors at 1 and drags
    /// current health down with it.
    pub fn adjust_stat(&mut self, stat: StatKind, delta: i32) -> i32 {
        let floor = match stat {
            StatKind::MaxHealth => 1,
            _ => 0,
        };
        let current = i64::from(self.stat(stat));
        let next = (current + i64::from(delta)).clamp(floor, i64::from(u32::MAX));
        // `next` lies in [floor, u32::MAX] after the clamp.
        let next = next as u32;

        match stat {
            StatKind::AttackDice => self.attack_dice = next,
            StatKind::DefenseDice => self.defense_dice = next,
            StatKind::Movement => self.movement = next,
            StatKind::MaxHealth => {
                self.max_health = next;
                self.health = self.health.min(next);
            }
        }

        (i64::from(next) - current) as i32
    }

    /// Subtracts `amount` from health, flooring at zero. Returns true when
    /// this call took the actor from alive to defeated.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        let was_alive = self.is_alive();
        self.health = self.health.saturating_sub(amount);
        was_alive && !self.is_alive()
    }

    pub fn heal(&mut self, amount: u32) {
        self.health = self.health.saturating_add(amount).min(self.max_health);
    }

    /// Removes the first carried copy of `equipment`.
    pub fn remove_equipment(&mut self, equipment: &EquipmentId) -> bool {
        match self.equipment.iter().position(|carried| carried == equipment) {
            Some(index) => {
                self.equipment.remove(index);
                true
            }
            None => false,
        }
    }
}
