#![allow(clippy::unreadable_literal)]

//! Database of fatigue parameters for the composite materials
//! considered for the platform members.

use std::collections::BTreeMap;

use crate::dadn::*;

/// Load and fracture properties that accompany a growth law.
#[derive(Debug, Clone)]
pub struct Properties {
    /// Minimum stress of the applied cycle (MPa).
    pub sigma_min: f64,
    /// Fracture toughness (MPa sqrt(m)). Not used by the growth loop.
    pub k1c: f64,
}

pub struct Material {
    pub name: &'static str,
    pub cite: &'static str,
    pub units: &'static str,
    /// A BTreeMap keeps the parameters in label order so they can be
    /// flattened to a slice and relabelled.
    pub params: BTreeMap<ParameterLabel, f64>,
    pub properties: Properties,
}

impl Default for Properties {
    fn default() -> Self {
        Self {
            sigma_min: 30.0,
            k1c: 25.0,
        }
    }
}

/// Name of the material used when none is requested.
pub const DEFAULT_MATERIAL: &str = "paris:cfrp";

lazy_static! {
    static ref MATERIALS: BTreeMap<&'static str, Material> = {
        let mut materials = BTreeMap::new();

        let mut name = "paris:cfrp";
        materials.insert(
            name,
            Material {
                name,
                cite: "carbon fibre reinforced polymer",
                units: Paris::UNITS,
                params: BTreeMap::from([(ParameterLabel::c, 1.08e-12), (ParameterLabel::m, 3.5)]),
                properties: Properties::default(),
            },
        );

        name = "paris:grp";
        materials.insert(
            name,
            Material {
                name,
                cite: "glass reinforced polymer",
                units: Paris::UNITS,
                params: BTreeMap::from([(ParameterLabel::c, 1.5e-10), (ParameterLabel::m, 3.5)]),
                properties: Properties::default(),
            },
        );

        materials
    };
}

pub fn get_material(name: &str) -> Option<&'static Material> {
    MATERIALS.get(name)
}

/// All the materials in the database, in name order.
pub fn all_materials() -> impl Iterator<Item = &'static Material> {
    MATERIALS.values()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_material_is_in_database() {
        let material = get_material(DEFAULT_MATERIAL).unwrap();
        assert_eq!(material.name, DEFAULT_MATERIAL);
        assert!((material.properties.sigma_min - 30.0).abs() <= f64::EPSILON);
        assert!((material.properties.k1c - 25.0).abs() <= f64::EPSILON);
    }

    #[test]
    fn every_material_builds_a_model() {
        for material in all_materials() {
            assert!(make_model(material.name, &material.params).is_ok());
        }
    }

    #[test]
    fn unknown_material_is_none() {
        assert!(get_material("paris:unobtainium").is_none());
    }
}
