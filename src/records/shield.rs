//! Shield normalizer: raw shield descriptor → [`ShieldRecord`].

use super::{optional_f64, require_f64, require_str};
use crate::error::Error;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A min/max pair for one damage channel's resistance or absorption.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelRange {
    pub min: f64,
    pub max: f64,
}

/// Normalized shield statistics for a single shield generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShieldRecord {
    pub name: String,
    pub total_hp: f64,
    pub size: i64,
    pub max_power_slots: f64,
    pub min_power_slots: f64,
    pub resistance_ballistic: ChannelRange,
    pub resistance_energy: ChannelRange,
    pub resistance_distortion: ChannelRange,
    pub absorption_ballistic: ChannelRange,
    pub absorption_energy: ChannelRange,
    pub absorption_distortion: ChannelRange,
}

/// Normalizes a raw shield descriptor (`{ localName, data: {...} }`).
pub fn normalize_shield(source: &Value) -> Result<ShieldRecord, Error> {
    let name = require_str(source, "localName")?.to_string();
    let data = source.get("data").ok_or_else(|| Error::DescriptorMissingField {
        path: "data".to_string(),
    })?;

    let total_hp = require_f64(data, "shield.maxShieldHealth")?;
    let size = require_f64(data, "size")? as i64;
    let max_power_slots = require_f64(data, "resource.online.consumption.powerSegment")?;
    let conversion_minimum_fraction = optional_f64(data, "resource.conversionMinimumFraction", 1.0);
    let min_power_slots = max_power_slots * conversion_minimum_fraction;

    let range = |field: &str| -> Result<ChannelRange, Error> {
        Ok(ChannelRange {
            min: require_f64(data, &format!("shield.{field}Min"))?,
            max: require_f64(data, &format!("shield.{field}Max"))?,
        })
    };

    Ok(ShieldRecord {
        name,
        total_hp,
        size,
        max_power_slots,
        min_power_slots,
        resistance_ballistic: range("resistance.physical")?,
        resistance_energy: range("resistance.energy")?,
        resistance_distortion: range("resistance.distortion")?,
        absorption_ballistic: range("absorption.physical")?,
        absorption_energy: range("absorption.energy")?,
        absorption_distortion: range("absorption.distortion")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_shield() -> Value {
        json!({
            "localName": "mxox_shield_s2",
            "data": {
                "size": 2,
                "shield": {
                    "maxShieldHealth": 4200,
                    "resistance": {
                        "physicalMin": 0.0, "physicalMax": 0.2,
                        "energyMin": -0.1, "energyMax": 0.1,
                        "distortionMin": 0.5, "distortionMax": 0.9,
                    },
                    "absorption": {
                        "physicalMin": 0.1, "physicalMax": 0.3,
                        "energyMin": 0.8, "energyMax": 1.0,
                        "distortionMin": 0.8, "distortionMax": 1.0,
                    }
                },
                "resource": { "online": { "consumption": { "powerSegment": 20 } }, "conversionMinimumFraction": 0.5 },
            }
        })
    }

    #[test]
    fn flattens_min_max_ranges() {
        let record = normalize_shield(&sample_shield()).unwrap();
        assert_eq!(record.total_hp, 4200.0);
        assert_eq!(record.max_power_slots, 20.0);
        assert_eq!(record.min_power_slots, 10.0);
        assert_eq!(record.resistance_energy, ChannelRange { min: -0.1, max: 0.1 });
        assert_eq!(record.absorption_distortion, ChannelRange { min: 0.8, max: 1.0 });
    }

    #[test]
    fn conversion_fraction_defaults_to_one() {
        let mut source = sample_shield();
        source["data"]["resource"]
            .as_object_mut()
            .unwrap()
            .remove("conversionMinimumFraction");
        let record = normalize_shield(&source).unwrap();
        assert_eq!(record.min_power_slots, record.max_power_slots);
    }

    #[test]
    fn missing_total_hp_is_an_error() {
        let mut source = sample_shield();
        source["data"]["shield"]
            .as_object_mut()
            .unwrap()
            .remove("maxShieldHealth");
        assert!(matches!(
            normalize_shield(&source),
            Err(Error::DescriptorMissingField { .. })
        ));
    }
}
