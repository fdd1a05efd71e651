//! ---
//! gg_section: "02-backend-client"
//! gg_subsection: "module"
//! gg_type: "source"
//! gg_scope: "code"
//! gg_description: "Data model and HTTP client for the prediction service."
//! gg_version: "v0.1.0"
//! gg_owner: "tbd"
//! ---
use chrono::{Local, Timelike};
use serde::{Deserialize, Serialize};

/// One immutable set of hypothetical load parameters, sent as a unit to the
/// backend. Mutation happens only through [`SimulationParameters::set`],
/// which replaces a single field and preserves all others; the dashboard
/// swaps snapshots wholesale rather than sharing a mutable reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    pub current_load: f64,
    pub temperature: f64,
    pub ev_count: u32,
    pub appliance_load: f64,
    pub ac_usage: f64,
    pub heating_usage: f64,
    pub time_of_day: u32,
    pub community_size: u32,
}

/// Identifies one adjustable field of [`SimulationParameters`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKey {
    CurrentLoad,
    Temperature,
    EvCount,
    ApplianceLoad,
    AcUsage,
    HeatingUsage,
    TimeOfDay,
    CommunitySize,
}

/// Control bounds for one parameter. The slider widgets enforce `[min, max]`
/// and nudge by `step`; the snapshot itself performs no range clamping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
    pub label: &'static str,
    pub unit: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl ParamKey {
    /// Display order of the control panel, matching the backend field order.
    pub const ALL: [ParamKey; 8] = [
        ParamKey::CurrentLoad,
        ParamKey::Temperature,
        ParamKey::EvCount,
        ParamKey::ApplianceLoad,
        ParamKey::AcUsage,
        ParamKey::HeatingUsage,
        ParamKey::TimeOfDay,
        ParamKey::CommunitySize,
    ];

    pub fn spec(self) -> ParamSpec {
        match self {
            ParamKey::CurrentLoad => ParamSpec {
                label: "Base Load",
                unit: "kW",
                min: 50.0,
                max: 300.0,
                step: 5.0,
            },
            ParamKey::Temperature => ParamSpec {
                label: "Temperature",
                unit: "°C",
                min: 15.0,
                max: 40.0,
                step: 0.5,
            },
            ParamKey::EvCount => ParamSpec {
                label: "EVs Charging",
                unit: "vehicles",
                min: 0.0,
                max: 15.0,
                step: 1.0,
            },
            ParamKey::ApplianceLoad => ParamSpec {
                label: "Appliance Load",
                unit: "kW",
                min: 0.0,
                max: 100.0,
                step: 5.0,
            },
            ParamKey::AcUsage => ParamSpec {
                label: "AC Usage",
                unit: "%",
                min: 0.0,
                max: 100.0,
                step: 5.0,
            },
            ParamKey::HeatingUsage => ParamSpec {
                label: "Heating Usage",
                unit: "%",
                min: 0.0,
                max: 100.0,
                step: 5.0,
            },
            ParamKey::TimeOfDay => ParamSpec {
                label: "Time of Day",
                unit: "h",
                min: 0.0,
                max: 23.0,
                step: 1.0,
            },
            ParamKey::CommunitySize => ParamSpec {
                label: "Community Size",
                unit: "homes",
                min: 50.0,
                max: 500.0,
                step: 10.0,
            },
        }
    }
}

impl SimulationParameters {
    /// Fixed default snapshot with `time_of_day` pinned to the given hour.
    pub fn defaults_at(hour: u32) -> Self {
        Self {
            current_load: 100.0,
            temperature: 25.0,
            ev_count: 1,
            appliance_load: 0.0,
            ac_usage: 0.0,
            heating_usage: 0.0,
            time_of_day: hour % 24,
            community_size: 100,
        }
    }

    /// Default snapshot with `time_of_day` taken from the wall clock now.
    pub fn defaults_now() -> Self {
        Self::defaults_at(Local::now().hour())
    }

    pub fn get(&self, key: ParamKey) -> f64 {
        match key {
            ParamKey::CurrentLoad => self.current_load,
            ParamKey::Temperature => self.temperature,
            ParamKey::EvCount => f64::from(self.ev_count),
            ParamKey::ApplianceLoad => self.appliance_load,
            ParamKey::AcUsage => self.ac_usage,
            ParamKey::HeatingUsage => self.heating_usage,
            ParamKey::TimeOfDay => f64::from(self.time_of_day),
            ParamKey::CommunitySize => f64::from(self.community_size),
        }
    }

    /// Replace one field, preserving all others. Non-finite input coerces to
    /// zero; range clamping is left to the control widgets.
    pub fn set(&mut self, key: ParamKey, value: f64) {
        let value = if value.is_finite() { value } else { 0.0 };
        match key {
            ParamKey::CurrentLoad => self.current_load = value,
            ParamKey::Temperature => self.temperature = value,
            ParamKey::EvCount => self.ev_count = coerce_count(value),
            ParamKey::ApplianceLoad => self.appliance_load = value,
            ParamKey::AcUsage => self.ac_usage = value,
            ParamKey::HeatingUsage => self.heating_usage = value,
            ParamKey::TimeOfDay => self.time_of_day = coerce_count(value),
            ParamKey::CommunitySize => self.community_size = coerce_count(value),
        }
    }

    /// Copy of this snapshot with one field replaced.
    pub fn with(&self, key: ParamKey, value: f64) -> Self {
        let mut next = self.clone();
        next.set(key, value);
        next
    }
}

fn coerce_count(value: f64) -> u32 {
    if value.is_sign_negative() {
        0
    } else {
        value.round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_field_table() {
        let params = SimulationParameters::defaults_at(14);
        assert_eq!(params.current_load, 100.0);
        assert_eq!(params.temperature, 25.0);
        assert_eq!(params.ev_count, 1);
        assert_eq!(params.appliance_load, 0.0);
        assert_eq!(params.ac_usage, 0.0);
        assert_eq!(params.heating_usage, 0.0);
        assert_eq!(params.time_of_day, 14);
        assert_eq!(params.community_size, 100);
    }

    #[test]
    fn set_replaces_only_the_named_field() {
        let before = SimulationParameters::defaults_at(9);
        let after = before.with(ParamKey::EvCount, 7.0);
        assert_eq!(after.ev_count, 7);
        assert_eq!(
            SimulationParameters {
                ev_count: before.ev_count,
                ..after.clone()
            },
            before
        );
    }

    #[test]
    fn non_finite_input_coerces_to_zero() {
        let mut params = SimulationParameters::defaults_at(0);
        params.set(ParamKey::CurrentLoad, f64::NAN);
        assert_eq!(params.current_load, 0.0);
        params.set(ParamKey::EvCount, f64::INFINITY);
        assert_eq!(params.ev_count, 0);
    }

    #[test]
    fn serialises_with_backend_field_names() {
        let params = SimulationParameters::defaults_at(18);
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["current_load"], 100.0);
        assert_eq!(json["ev_count"], 1);
        assert_eq!(json["time_of_day"], 18);
        assert_eq!(json["community_size"], 100);
    }

    #[test]
    fn every_key_has_usable_bounds() {
        for key in ParamKey::ALL {
            let spec = key.spec();
            assert!(spec.min < spec.max, "{:?}", key);
            assert!(spec.step > 0.0, "{:?}", key);
            let default = SimulationParameters::defaults_at(12).get(key);
            assert!(default >= spec.min && default <= spec.max, "{:?}", key);
        }
    }
}
