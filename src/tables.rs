//! Built-in MET and training expenditure tables.
//!
//! Values follow the Compendium of Physical Activities, selected for the
//! moderate recreational range rather than competition paces. Users can
//! override any entry through the config file; these tables are the
//! fallback when no override exists.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::CardioIntensity;

/// Multiplier applied to BMR for general (non-exercise) activity on days
/// that include a logged training session.
pub const DEFAULT_TRAINING_DAY_MULTIPLIER: f64 = 0.35;

/// Multiplier applied to BMR for general activity on rest days.
pub const DEFAULT_REST_DAY_MULTIPLIER: f64 = 0.28;

/// MET values for one cardio modality at each supported intensity.
///
/// Entries are optional so a user override can pin a single intensity
/// without restating the other two.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct MetValues {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub light: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moderate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vigorous: Option<f64>,
}

impl MetValues {
    pub fn new(light: f64, moderate: f64, vigorous: f64) -> Self {
        MetValues {
            light: Some(light),
            moderate: Some(moderate),
            vigorous: Some(vigorous),
        }
    }

    /// Looks up the MET for an intensity, `None` when the table has no
    /// value at that level.
    pub fn for_intensity(&self, intensity: CardioIntensity) -> Option<f64> {
        match intensity {
            CardioIntensity::Light => self.light,
            CardioIntensity::Moderate => self.moderate,
            CardioIntensity::Vigorous => self.vigorous,
        }
    }
}

/// One cardio modality known to the estimator.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CardioType {
    pub met: MetValues,
}

impl CardioType {
    pub fn new(light: f64, moderate: f64, vigorous: f64) -> Self {
        CardioType {
            met: MetValues::new(light, moderate, vigorous),
        }
    }
}

/// Cardio modalities keyed by lowercase activity name.
pub type CardioTable = HashMap<String, CardioType>;

/// One resistance-training style and its hourly expenditure.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct TrainingType {
    pub calories_per_hour: f64,
}

impl TrainingType {
    pub fn new(calories_per_hour: f64) -> Self {
        TrainingType { calories_per_hour }
    }
}

/// Training styles keyed by lowercase name.
pub type TrainingTable = HashMap<String, TrainingType>;

/// Builds the built-in cardio MET table.
pub fn default_cardio_table() -> CardioTable {
    let mut table = CardioTable::new();
    table.insert("walking".to_string(), CardioType::new(3.0, 3.8, 5.0));
    table.insert("running".to_string(), CardioType::new(6.0, 7.0, 9.8));
    table.insert("cycling".to_string(), CardioType::new(4.0, 6.8, 10.0));
    table.insert("swimming".to_string(), CardioType::new(4.5, 6.0, 9.5));
    table.insert("rowing".to_string(), CardioType::new(4.8, 7.0, 8.5));
    table.insert("elliptical".to_string(), CardioType::new(4.6, 5.0, 7.0));
    table.insert("hiit".to_string(), CardioType::new(6.0, 8.0, 10.0));
    table
}

/// Builds the built-in training expenditure table.
pub fn default_training_table() -> TrainingTable {
    let mut table = TrainingTable::new();
    table.insert("strength".to_string(), TrainingType::new(220.0));
    table.insert("powerlifting".to_string(), TrainingType::new(200.0));
    table.insert("bodybuilding".to_string(), TrainingType::new(250.0));
    table.insert("crossfit".to_string(), TrainingType::new(310.0));
    table.insert("calisthenics".to_string(), TrainingType::new(260.0));
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cardio_table_entries() {
        let table = default_cardio_table();
        assert!(table.contains_key("running"));
        assert!(table.contains_key("walking"));
        assert!(table.contains_key("swimming"));

        let running = &table["running"];
        assert_eq!(running.met.moderate, Some(7.0));
    }

    #[test]
    fn test_default_training_table_entries() {
        let table = default_training_table();
        assert_eq!(table["strength"].calories_per_hour, 220.0);
        assert!(table.contains_key("crossfit"));
    }

    #[test]
    fn test_met_lookup_by_intensity() {
        let met = MetValues::new(3.0, 3.8, 5.0);
        assert_eq!(met.for_intensity(CardioIntensity::Light), Some(3.0));
        assert_eq!(met.for_intensity(CardioIntensity::Moderate), Some(3.8));
        assert_eq!(met.for_intensity(CardioIntensity::Vigorous), Some(5.0));
    }

    #[test]
    fn test_partial_met_values() {
        let met = MetValues {
            moderate: Some(6.5),
            ..Default::default()
        };
        assert_eq!(met.for_intensity(CardioIntensity::Light), None);
        assert_eq!(met.for_intensity(CardioIntensity::Moderate), Some(6.5));
    }

    #[test]
    fn test_table_serde_round_trip() {
        let table = default_cardio_table();
        let json = serde_json::to_string(&table).expect("serialize table");
        let back: CardioTable = serde_json::from_str(&json).expect("deserialize table");
        assert_eq!(back["cycling"].met.vigorous, Some(10.0));
    }
}
