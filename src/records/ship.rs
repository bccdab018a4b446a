//! Ship normalizer: raw hull/shield/ifcs descriptor → [`ShipRecord`].

use super::{optional_f64, path, require_f64, require_str};
use crate::error::Error;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Shield face configuration, mapping to a face count used by runtime
/// [`crate::shield::Shield`] construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShieldFaces {
    None,
    Bubble,
    FrontBack,
    Quadrant,
}

impl ShieldFaces {
    /// Number of faces the aggregate shield HP is divided across.
    pub fn face_count(self) -> u32 {
        match self {
            ShieldFaces::None => 0,
            ShieldFaces::Bubble => 1,
            ShieldFaces::FrontBack => 2,
            ShieldFaces::Quadrant => 4,
        }
    }

    fn from_face_type(face_type: &str) -> ShieldFaces {
        match face_type {
            "Bubble" => ShieldFaces::Bubble,
            "FrontBack" => ShieldFaces::FrontBack,
            "Quadrant" => ShieldFaces::Quadrant,
            _ => ShieldFaces::None,
        }
    }
}

/// Normalized ship/hull statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipRecord {
    pub name: String,
    pub size: i64,
    pub shield_faces: ShieldFaces,
    pub pitch_rate: f64,
    pub scm_speed: f64,
    pub total_hp: f64,
    pub vital_hull_hp: f64,
    pub vital_hull_name: String,
    pub visible_hull_area: f64,
    pub ballistic_resistance: f64,
    pub energy_resistance: f64,
    pub distortion_resistance: f64,
    pub max_weapon_power: Option<f64>,
}

/// Normalizes a raw ship descriptor (`{ localName, data: {...} }`).
pub fn normalize_ship(source: &Value) -> Result<ShipRecord, Error> {
    let name = require_str(source, "localName")?.to_string();
    let data = source.get("data").ok_or_else(|| Error::DescriptorMissingField {
        path: "data".to_string(),
    })?;

    let size = require_f64(data, "size")? as i64;

    let max_weapon_power = path(data, "rnPowerPools.weaponGun.poolSize").and_then(Value::as_f64);

    let face_type = path(data, "shield.faceType").and_then(Value::as_str).unwrap_or("None");
    let shield_faces = ShieldFaces::from_face_type(face_type);

    let mut vital_hull_hp = 0.0_f64;
    let mut vital_hull_name = String::new();
    if let Some(parts) = path(data, "hull.hp").and_then(Value::as_array) {
        for part in parts {
            let hp = part.get("hp").and_then(Value::as_f64).unwrap_or(0.0);
            if hp > vital_hull_hp {
                vital_hull_hp = hp;
                vital_hull_name = part
                    .get("name")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
            }
        }
    }

    let total_hp = path(data, "hull.totalHp")
        .and_then(Value::as_f64)
        .unwrap_or(vital_hull_hp);

    let ballistic_resistance = optional_f64(data, "armor.data.armor.damageMultiplier.damagePhysical", 0.0);
    let energy_resistance = optional_f64(data, "armor.data.armor.damageMultiplier.damageEnergy", 0.0);
    let distortion_resistance = optional_f64(data, "armor.data.armor.damageMultiplier.damageDistortion", 0.0);

    let pitch_rate = optional_f64(data, "ifcs.angularVelocity.x", 0.0);
    let scm_speed = optional_f64(data, "ifcs.scmSpeed", 0.0);

    let mut dimensions: Vec<f64> = ["x", "y", "z"]
        .iter()
        .filter_map(|axis| path(data, &format!("vehicle.size.{axis}")).and_then(Value::as_f64))
        .collect();
    dimensions.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let visible_hull_area = if dimensions.len() >= 2 {
        let n = dimensions.len();
        dimensions[n - 1] * dimensions[n - 2]
    } else {
        100.0
    };

    Ok(ShipRecord {
        name,
        size,
        shield_faces,
        pitch_rate,
        scm_speed,
        total_hp,
        vital_hull_hp,
        vital_hull_name,
        visible_hull_area,
        ballistic_resistance,
        energy_resistance,
        distortion_resistance,
        max_weapon_power,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_ship() -> Value {
        json!({
            "localName": "anvl_hornet_f7c",
            "data": {
                "size": 1,
                "rnPowerPools": { "weaponGun": { "poolSize": 40 } },
                "shield": { "faceType": "FrontBack" },
                "hull": {
                    "totalHp": 1200,
                    "hp": [
                        { "name": "nose", "hp": 300 },
                        { "name": "core", "hp": 900 },
                    ]
                },
                "armor": { "data": { "armor": { "damageMultiplier": {
                    "damagePhysical": 0.1, "damageEnergy": 0.2, "damageDistortion": 0.0
                } } } },
                "ifcs": { "angularVelocity": { "x": 55 }, "scmSpeed": 210 },
                "vehicle": { "size": { "x": 10.0, "y": 20.0, "z": 8.0 } },
            }
        })
    }

    #[test]
    fn normalizes_full_descriptor() {
        let record = normalize_ship(&sample_ship()).unwrap();
        assert_eq!(record.name, "anvl_hornet_f7c");
        assert_eq!(record.shield_faces, ShieldFaces::FrontBack);
        assert_eq!(record.shield_faces.face_count(), 2);
        assert_eq!(record.vital_hull_hp, 900.0);
        assert_eq!(record.vital_hull_name, "core");
        assert_eq!(record.total_hp, 1200.0);
        assert_eq!(record.pitch_rate, 55.0);
        assert_eq!(record.scm_speed, 210.0);
        assert_eq!(record.visible_hull_area, 200.0); // 20 * 10, two largest
        assert_eq!(record.max_weapon_power, Some(40.0));
    }

    #[test]
    fn missing_total_hp_falls_back_to_vital() {
        let mut source = sample_ship();
        source["data"]["hull"].as_object_mut().unwrap().remove("totalHp");
        let record = normalize_ship(&source).unwrap();
        assert_eq!(record.total_hp, record.vital_hull_hp);
    }

    #[test]
    fn missing_dimensions_default_to_100() {
        let mut source = sample_ship();
        source["data"]["vehicle"] = json!({ "size": { "x": 5.0 } });
        let record = normalize_ship(&source).unwrap();
        assert_eq!(record.visible_hull_area, 100.0);
    }

    #[test]
    fn missing_resistances_default_to_zero() {
        let mut source = sample_ship();
        source["data"].as_object_mut().unwrap().remove("armor");
        let record = normalize_ship(&source).unwrap();
        assert_eq!(record.ballistic_resistance, 0.0);
        assert_eq!(record.energy_resistance, 0.0);
        assert_eq!(record.distortion_resistance, 0.0);
    }

    #[test]
    fn missing_size_is_an_error() {
        let mut source = sample_ship();
        source["data"].as_object_mut().unwrap().remove("size");
        assert!(matches!(
            normalize_ship(&source),
            Err(Error::DescriptorMissingField { .. })
        ));
    }
}
