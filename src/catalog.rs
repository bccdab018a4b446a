//! In-memory lookup layer resolving the string references a
//! [`crate::records::LoadoutRecord`] carries into concrete records.

use crate::error::{Error, ReferenceKind};
use crate::records::{ShieldRecord, ShipRecord, WeaponRecord};
use indexmap::IndexMap;

/// A catalog of normalized records keyed by name, used by
/// [`crate::contestant::Contestant::build`] to resolve a loadout's
/// references.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    ships: IndexMap<String, ShipRecord>,
    weapons: IndexMap<String, WeaponRecord>,
    shields: IndexMap<String, ShieldRecord>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_ship(&mut self, record: ShipRecord) {
        self.ships.insert(record.name.clone(), record);
    }

    pub fn insert_weapon(&mut self, record: WeaponRecord) {
        self.weapons.insert(record.name.clone(), record);
    }

    pub fn insert_shield(&mut self, record: ShieldRecord) {
        self.shields.insert(record.name.clone(), record);
    }

    pub fn ship(&self, name: &str) -> Result<&ShipRecord, Error> {
        self.ships.get(name).ok_or_else(|| Error::UnknownReference {
            kind: ReferenceKind::Ship,
            name: name.to_string(),
        })
    }

    pub fn weapon(&self, name: &str) -> Result<&WeaponRecord, Error> {
        self.weapons.get(name).ok_or_else(|| Error::UnknownReference {
            kind: ReferenceKind::Weapon,
            name: name.to_string(),
        })
    }

    pub fn shield(&self, name: &str) -> Result<&ShieldRecord, Error> {
        self.shields.get(name).ok_or_else(|| Error::UnknownReference {
            kind: ReferenceKind::Shield,
            name: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::normalize_ship;
    use serde_json::json;

    #[test]
    fn unknown_ship_reference_errors() {
        let catalog = Catalog::new();
        assert!(matches!(
            catalog.ship("anvl_hornet_f7c"),
            Err(Error::UnknownReference { kind: ReferenceKind::Ship, .. })
        ));
    }

    #[test]
    fn inserted_ship_is_found_by_name() {
        let mut catalog = Catalog::new();
        let record = normalize_ship(&json!({
            "localName": "anvl_hornet_f7c",
            "data": { "size": 1, "hull": { "totalHp": 1000, "hp": [] } }
        }))
        .unwrap();
        catalog.insert_ship(record);
        assert!(catalog.ship("anvl_hornet_f7c").is_ok());
    }
}
