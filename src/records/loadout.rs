//! Loadout normalizer: raw fit descriptor → [`LoadoutRecord`].
//!
//! This is the most structurally involved normalizer — it walks a tree of
//! mount/turret/shield slots and flattens it into an operator → weapon-name
//! mapping plus an ordered shield list.

use crate::error::Error;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Normalized loadout: which ship, how much power to weapons vs. shields,
/// and which weapons/shields are fitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadoutRecord {
    pub identifier: String,
    pub name: String,
    pub ship_name: String,
    pub weapons_power_percentage: f64,
    pub shields_power_percentage: f64,
    /// Operator → ordered list of weapon names. Always contains a `"pilot"`
    /// key; zero or more `"Turret N"` keys follow in declaration order.
    pub weapons: IndexMap<String, Vec<String>>,
    pub shields: Vec<String>,
}

fn item_types_contain_tractor_beam(entry: &Value) -> bool {
    entry
        .get("itemTypes")
        .and_then(Value::as_array)
        .map(|types| {
            types
                .iter()
                .any(|t| t.get("type").and_then(Value::as_str) == Some("TractorBeam"))
        })
        .unwrap_or(false)
}

fn calculator_type<'a>(entry: &'a Value) -> &'a str {
    entry
        .get("item")
        .and_then(|i| i.get("calculatorType"))
        .and_then(Value::as_str)
        .unwrap_or("")
}

fn local_name<'a>(entry: &'a Value) -> &'a str {
    entry
        .get("item")
        .and_then(|i| i.get("localName"))
        .and_then(Value::as_str)
        .unwrap_or("")
}

/// Walks a mount/turret's sub-loadout, collecting weapon names and skipping
/// tractor beams (spec.md §4.2: "skipping items whose itemTypes include
/// type TractorBeam").
fn collect_mounted_weapons(entry: &Value, into: &mut Vec<String>) {
    let Some(sub_loadout) = entry.get("loadout").and_then(Value::as_array) else {
        return;
    };
    for weapon in sub_loadout {
        if item_types_contain_tractor_beam(weapon) {
            continue;
        }
        if calculator_type(weapon) == "weapon" {
            into.push(local_name(weapon).to_string());
        }
    }
}

fn segment_percentage(loadout_data: &Value, segment_key: &str) -> f64 {
    let Some(slots) = loadout_data
        .get("segmentConfiguration")
        .and_then(|sc| sc.get(segment_key))
        .and_then(Value::as_array)
    else {
        return 1.0;
    };

    let mut available = 0.0_f64;
    let mut assigned = 0.0_f64;
    for slot in slots {
        let disabled = slot.get("disabled").and_then(Value::as_bool).unwrap_or(false);
        if disabled {
            continue;
        }
        let number = slot.get("number").and_then(Value::as_f64).unwrap_or(0.0);
        available += number;
        let selected = slot.get("selected").and_then(Value::as_bool).unwrap_or(false);
        if selected {
            assigned += number;
        }
    }

    if available > 0.0 {
        assigned / available
    } else {
        1.0
    }
}

/// Normalizes a raw loadout descriptor.
pub fn normalize_loadout(source: &Value) -> Result<LoadoutRecord, Error> {
    let name = source
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::DescriptorMissingField {
            path: "name".to_string(),
        })?
        .to_string();

    let identifier = source
        .get("shortened")
        .or_else(|| source.get("identifier"))
        .and_then(Value::as_str)
        .ok_or_else(|| Error::DescriptorMissingField {
            path: "shortened|identifier".to_string(),
        })?
        .to_string();

    let loadout_data = source.get("loadout").ok_or_else(|| Error::DescriptorMissingField {
        path: "loadout".to_string(),
    })?;

    let ship_name = loadout_data
        .get("ship")
        .and_then(|ship| ship.get("localName"))
        .and_then(Value::as_str)
        .ok_or_else(|| Error::DescriptorMissingField {
            path: "loadout.ship.localName".to_string(),
        })?
        .to_string();

    let weapons_power_percentage = segment_percentage(loadout_data, "weapon");
    let shields_power_percentage = segment_percentage(loadout_data, "shield");

    let mut weapons: IndexMap<String, Vec<String>> = IndexMap::new();
    weapons.insert("pilot".to_string(), Vec::new());
    let mut shields = Vec::new();
    let mut turret_counter: u32 = 1;

    let items = loadout_data
        .get("loadout")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    for item in &items {
        match item.get("card").and_then(Value::as_str) {
            Some("turrets") => {
                let sub_loadout = item.get("loadout").and_then(Value::as_array);
                if sub_loadout.map(|l| !l.is_empty()).unwrap_or(false) {
                    let operator = format!("Turret {turret_counter}");
                    turret_counter += 1;
                    let mut turret_weapons = Vec::new();
                    for entry in sub_loadout.unwrap() {
                        if item_types_contain_tractor_beam(entry) {
                            continue;
                        }
                        match calculator_type(entry) {
                            "mount" => collect_mounted_weapons(entry, &mut turret_weapons),
                            "weapon" => turret_weapons.push(local_name(entry).to_string()),
                            _ => {}
                        }
                    }
                    weapons.insert(operator, turret_weapons);
                }
            }
            Some("weapons") => {
                let pilot = weapons.get_mut("pilot").expect("pilot entry always present");
                match calculator_type(item) {
                    "mount" | "turret" => collect_mounted_weapons(item, pilot),
                    "weapon" if !local_name(item).is_empty() => {
                        pilot.push(local_name(item).to_string());
                    }
                    _ => {}
                }
            }
            Some("shields") => {
                shields.push(local_name(item).to_string());
            }
            _ => {}
        }
    }

    Ok(LoadoutRecord {
        identifier,
        name,
        ship_name,
        weapons_power_percentage,
        shields_power_percentage,
        weapons,
        shields,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_loadout() -> Value {
        json!({
            "name": "Dogfight Fit",
            "shortened": "abc123",
            "loadout": {
                "ship": { "localName": "anvl_hornet_f7c" },
                "segmentConfiguration": {
                    "weapon": [
                        { "number": 2, "disabled": false, "selected": true },
                        { "number": 2, "disabled": false, "selected": false },
                    ],
                    "shield": [
                        { "number": 4, "disabled": false, "selected": true },
                    ],
                },
                "loadout": [
                    {
                        "card": "weapons",
                        "item": { "calculatorType": "mount", "localName": "mount_nose" },
                        "loadout": [
                            { "item": { "calculatorType": "weapon", "localName": "behr_laser_s1" }, "itemTypes": [] },
                        ]
                    },
                    {
                        "card": "turrets",
                        "loadout": [
                            {
                                "item": { "calculatorType": "mount", "localName": "turret_mount" },
                                "itemTypes": [],
                                "loadout": [
                                    { "item": { "calculatorType": "weapon", "localName": "klws_scattergun_s2" }, "itemTypes": [] },
                                ]
                            }
                        ]
                    },
                    {
                        "card": "turrets",
                        "loadout": []
                    },
                    {
                        "card": "shields",
                        "item": { "localName": "mxox_shield_s2" },
                    },
                ]
            }
        })
    }

    #[test]
    fn flattens_operators_and_shields() {
        let record = normalize_loadout(&sample_loadout()).unwrap();
        assert_eq!(record.ship_name, "anvl_hornet_f7c");
        assert_eq!(record.identifier, "abc123");
        assert_eq!(record.weapons["pilot"], vec!["behr_laser_s1".to_string()]);
        assert_eq!(record.weapons["Turret 1"], vec!["klws_scattergun_s2".to_string()]);
        assert!(!record.weapons.contains_key("Turret 2")); // empty turret entry opens no operator
        assert_eq!(record.shields, vec!["mxox_shield_s2".to_string()]);
        assert_eq!(record.weapons_power_percentage, 0.5); // 2 assigned / 4 available
        assert_eq!(record.shields_power_percentage, 1.0);
    }

    #[test]
    fn tractor_beams_are_skipped() {
        let mut source = sample_loadout();
        source["loadout"]["loadout"][0]["loadout"][0]["itemTypes"] = json!([{ "type": "TractorBeam" }]);
        let record = normalize_loadout(&source).unwrap();
        assert!(record.weapons["pilot"].is_empty());
    }

    #[test]
    fn direct_pilot_weapon_uses_current_items_name() {
        let mut source = sample_loadout();
        source["loadout"]["loadout"][0] = json!({
            "card": "weapons",
            "item": { "calculatorType": "weapon", "localName": "direct_pilot_gun" },
        });
        let record = normalize_loadout(&source).unwrap();
        assert_eq!(record.weapons["pilot"], vec!["direct_pilot_gun".to_string()]);
    }

    #[test]
    fn no_available_power_defaults_to_full_percentage() {
        let mut source = sample_loadout();
        source["loadout"]["segmentConfiguration"]["weapon"] = json!([]);
        let record = normalize_loadout(&source).unwrap();
        assert_eq!(record.weapons_power_percentage, 1.0);
    }

    #[test]
    fn missing_identifier_is_an_error() {
        let mut source = sample_loadout();
        source.as_object_mut().unwrap().remove("shortened");
        assert!(matches!(
            normalize_loadout(&source),
            Err(Error::DescriptorMissingField { .. })
        ));
    }
}
