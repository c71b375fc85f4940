//! Fixed choice lists for officer demographics and ranks

use strum::{AsRefStr, EnumIter, EnumString, IntoEnumIterator};

/// A select option with a human label
pub trait Choice: IntoEnumIterator + AsRef<str> {
    fn label(&self) -> &'static str;

    /// (value, label) pairs in display order
    fn options() -> Vec<(String, String)> {
        Self::iter()
            .map(|c| (c.as_ref().to_string(), c.label().to_string()))
            .collect()
    }

    fn is_valid(value: &str) -> bool {
        Self::iter().any(|c| c.as_ref() == value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, EnumString, AsRefStr)]
pub enum Race {
    #[strum(serialize = "BLACK")]
    Black,
    #[strum(serialize = "WHITE")]
    White,
    #[strum(serialize = "ASIAN")]
    Asian,
    #[strum(serialize = "HISPANIC")]
    Hispanic,
    #[strum(serialize = "NATIVE AMERICAN")]
    NativeAmerican,
    #[strum(serialize = "PACIFIC ISLANDER")]
    PacificIslander,
    #[strum(serialize = "Other")]
    Other,
    #[strum(serialize = "Not Sure")]
    NotSure,
}

impl Choice for Race {
    fn label(&self) -> &'static str {
        match self {
            Race::Black => "Black",
            Race::White => "White",
            Race::Asian => "Asian",
            Race::Hispanic => "Hispanic",
            Race::NativeAmerican => "Native American",
            Race::PacificIslander => "Pacific Islander",
            Race::Other => "Other",
            Race::NotSure => "Not Sure",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, EnumString, AsRefStr)]
pub enum Gender {
    #[strum(serialize = "M")]
    Male,
    #[strum(serialize = "F")]
    Female,
    #[strum(serialize = "Other")]
    Other,
    #[strum(serialize = "Not Sure")]
    NotSure,
}

impl Choice for Gender {
    fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
            Gender::NotSure => "Not Sure",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, EnumString, AsRefStr)]
pub enum Rank {
    #[strum(serialize = "Not Sure")]
    NotSure,
    #[strum(serialize = "PO")]
    PoliceOfficer,
    #[strum(serialize = "FIELD")]
    FieldTrainingOfficer,
    #[strum(serialize = "SERGEANT")]
    Sergeant,
    #[strum(serialize = "LIEUTENANT")]
    Lieutenant,
    #[strum(serialize = "CAPTAIN")]
    Captain,
    #[strum(serialize = "COMMANDER")]
    Commander,
    #[strum(serialize = "DEP CHIEF")]
    DeputyChief,
    #[strum(serialize = "CHIEF")]
    Chief,
    #[strum(serialize = "DEPUTY SUPT")]
    DeputySuperintendent,
    #[strum(serialize = "SUPT OF POL")]
    Superintendent,
}

impl Choice for Rank {
    fn label(&self) -> &'static str {
        match self {
            Rank::NotSure => "Not Sure",
            Rank::PoliceOfficer => "Police Officer",
            Rank::FieldTrainingOfficer => "Field Training Officer",
            Rank::Sergeant => "Sergeant",
            Rank::Lieutenant => "Lieutenant",
            Rank::Captain => "Captain",
            Rank::Commander => "Commander",
            Rank::DeputyChief => "Deputy Chief",
            Rank::Chief => "Chief",
            Rank::DeputySuperintendent => "Deputy Superintendent",
            Rank::Superintendent => "Superintendent",
        }
    }
}

/// "Not Sure" means the same as leaving a search filter empty
pub fn is_not_sure(value: &str) -> bool {
    value == "Not Sure"
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_values_round_trip() {
        assert_eq!(Race::from_str("NATIVE AMERICAN").unwrap(), Race::NativeAmerican);
        assert_eq!(Rank::DeputyChief.as_ref(), "DEP CHIEF");
        assert_eq!(Gender::from_str("M").unwrap(), Gender::Male);
    }

    #[test]
    fn test_validity() {
        assert!(Race::is_valid("WHITE"));
        assert!(!Race::is_valid("white"));
        assert!(Rank::is_valid("COMMANDER"));
        assert!(!Gender::is_valid("X"));
    }

    #[test]
    fn test_options_in_order() {
        let options = Rank::options();
        assert_eq!(options.len(), 11);
        assert_eq!(options[0], ("Not Sure".to_string(), "Not Sure".to_string()));
        assert_eq!(options[1].1, "Police Officer");
    }
}
