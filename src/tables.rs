//! Static configuration tables
//!
//! Everything here is data about the game that the docs file does not carry,
//! or carries in a shape that needs a fixed mapping.

use crate::models::{Dimensions, ItemState};

/// Builds a native class tag from its FactoryGame class name.
macro_rules! native_class {
    ($name:literal) => {
        concat!("/Script/CoreUObject.Class'/Script/FactoryGame.", $name, "'")
    };
}

/// What a native class tag is parsed as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassKind {
    Item,
    Manufacturer,
    PowerGenerator,
    ItemProducer,
    ResourceExtractor,
    ResourceWellActivator,
    ResourceWellExtractor,
    Recipe,
    Ignored,
}

pub const RESOURCE_CLASS: &str = native_class!("FGResourceDescriptor");
pub const BIOMASS_CLASS: &str = native_class!("FGItemDescriptorBiomass");

pub const CLASS_KINDS: &[(&str, ClassKind)] = &[
    (RESOURCE_CLASS, ClassKind::Item),
    (native_class!("FGItemDescriptor"), ClassKind::Item),
    (BIOMASS_CLASS, ClassKind::Item),
    (native_class!("FGItemDescriptorNuclearFuel"), ClassKind::Item),
    (native_class!("FGItemDescriptorPowerBoosterFuel"), ClassKind::Item),
    (native_class!("FGPowerShardDescriptor"), ClassKind::Item),
    (native_class!("FGAmmoTypeProjectile"), ClassKind::Item),
    (native_class!("FGAmmoTypeInstantHit"), ClassKind::Item),
    (native_class!("FGAmmoTypeSpreadshot"), ClassKind::Item),
    (native_class!("FGEquipmentDescriptor"), ClassKind::Item),
    (native_class!("FGConsumableDescriptor"), ClassKind::Item),
    (native_class!("FGBuildableManufacturer"), ClassKind::Manufacturer),
    (
        native_class!("FGBuildableManufacturerVariablePower"),
        ClassKind::Manufacturer,
    ),
    (native_class!("FGBuildableGeneratorFuel"), ClassKind::PowerGenerator),
    (native_class!("FGBuildableGeneratorNuclear"), ClassKind::PowerGenerator),
    (
        native_class!("FGBuildableFactorySimpleProducer"),
        ClassKind::ItemProducer,
    ),
    (
        native_class!("FGBuildableResourceExtractor"),
        ClassKind::ResourceExtractor,
    ),
    (native_class!("FGBuildableWaterPump"), ClassKind::ResourceExtractor),
    (
        native_class!("FGBuildableFrackingActivator"),
        ClassKind::ResourceWellActivator,
    ),
    (
        native_class!("FGBuildableFrackingExtractor"),
        ClassKind::ResourceWellExtractor,
    ),
    (native_class!("FGRecipe"), ClassKind::Recipe),
];

pub const FORM_MAPPING: &[(&str, ItemState)] = &[
    ("RF_SOLID", ItemState::Solid),
    ("RF_LIQUID", ItemState::Liquid),
    ("RF_GAS", ItemState::Gas),
];

pub const EVENT_MAPPING: &[(&str, &str)] = &[("EV_Christmas", "FICSMAS")];

/// Producers that are tools or placeholders rather than buildings.
pub const FILTER_BUILDINGS: &[&str] = &[
    "BP_WorkshopComponent_C",
    "BP_WorkBenchComponent_C",
    "Build_AutomatedWorkBench_C",
    "FGBuildableAutomatedWorkBench",
    "BP_BuildGun_C",
    "FGBuildGun",
];

pub const ALTERNATE_PREFIX: &str = "Alternate: ";

/// Alternate recipes whose display name lacks the prefix.
pub const RECIPES_FORCE_ALTERNATE: &[&str] = &["Recipe_Alternate_Turbofuel_C"];

/// FICSMAS gifts are not tagged as resources but are harvested like one.
pub const ITEMS_FORCE_RESOURCE: &[&str] = &["Desc_Gift_C"];

pub const BUILDABLE_PREFIX: &str = "Build_";
pub const DESCRIPTOR_PREFIX: &str = "Desc_";

pub const WELL_ACTIVATOR_KEY: &str = "Desc_FrackingSmasher_C";

/// `mFuelClass` value standing for every biomass item.
pub const BIOMASS_FUEL_CLASS: &str = "FGItemDescriptorBiomass";

pub const ITEM_PRODUCER_OUTPUTS: &[(&str, &str, f64)] =
    &[("Desc_TreeGiftProducer_C", "Desc_Gift_C", 1.0)];

pub const BY_PRODUCT_BLACKLIST: &[&str] = &["Desc_FluidCanister_C", "Desc_GasTank_C"];

pub const RESOURCE_LIMITS: &[(&str, f64)] = &[
    ("Desc_OreBauxite_C", 9780.0),
    ("Desc_OreGold_C", 12040.0),
    ("Desc_Coal_C", 30900.0),
    ("Desc_OreCopper_C", 28860.0),
    ("Desc_LiquidOil_C", 11700.0),
    ("Desc_OreIron_C", 70380.0),
    ("Desc_Stone_C", 52860.0),
    ("Desc_NitrogenGas_C", 12000.0),
    ("Desc_RawQuartz_C", 10500.0),
    ("Desc_Sulfur_C", 6840.0),
    ("Desc_OreUranium_C", 2100.0),
    ("Desc_Water_C", 9007199254740991.0),
    ("Desc_Gift_C", 3.402823466e38),
];

const fn dims(length_m: f64, width_m: f64, height_m: f64) -> Dimensions {
    Dimensions {
        length_m,
        width_m,
        height_m,
    }
}

pub const BUILDING_DIMENSIONS: &[(&str, Dimensions)] = &[
    ("Desc_SmelterMk1_C", dims(9.0, 6.0, 9.0)),
    ("Desc_ConstructorMk1_C", dims(10.0, 8.0, 8.0)),
    ("Desc_AssemblerMk1_C", dims(15.0, 10.0, 11.0)),
    ("Desc_FoundryMk1_C", dims(9.0, 10.0, 9.0)),
    ("Desc_ManufacturerMk1_C", dims(20.0, 18.0, 12.0)),
    ("Desc_OilRefinery_C", dims(20.0, 10.0, 31.0)),
    ("Desc_Packager_C", dims(8.0, 8.0, 12.0)),
    ("Desc_Blender_C", dims(16.0, 18.0, 15.0)),
    ("Desc_HadronCollider_C", dims(38.0, 24.0, 32.0)),
    ("Desc_GeneratorBiomass_Automated_C", dims(8.0, 8.0, 7.0)),
    ("Desc_GeneratorCoal_C", dims(26.0, 10.0, 36.0)),
    ("Desc_GeneratorFuel_C", dims(20.0, 20.0, 27.0)),
    ("Desc_GeneratorNuclear_C", dims(43.0, 36.0, 49.0)),
    ("Desc_MinerMk1_C", dims(14.0, 6.0, 18.0)),
    ("Desc_MinerMk2_C", dims(14.0, 6.0, 18.0)),
    ("Desc_MinerMk3_C", dims(14.0, 6.0, 18.0)),
    ("Desc_OilPump_C", dims(14.0, 8.0, 20.0)),
    ("Desc_WaterPump_C", dims(19.5, 19.5, 26.0)),
    ("Desc_FrackingSmasher_C", dims(20.0, 20.0, 23.0)),
    ("Desc_FrackingExtractor_C", dims(4.0, 4.0, 5.0)),
];

pub fn lookup_form(code: &str) -> Option<ItemState> {
    FORM_MAPPING
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, state)| *state)
}

pub fn lookup_event(event: &str) -> Option<&'static str> {
    EVENT_MAPPING
        .iter()
        .find(|(e, _)| *e == event)
        .map(|(_, mapped)| *mapped)
}

pub fn lookup_dimensions(key: &str) -> Option<Dimensions> {
    BUILDING_DIMENSIONS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, d)| *d)
}

pub fn lookup_producer_output(key: &str) -> Option<(&'static str, f64)> {
    ITEM_PRODUCER_OUTPUTS
        .iter()
        .find(|(k, _, _)| *k == key)
        .map(|(_, item, amount)| (*item, *amount))
}

#[cfg(test)]
pub fn native_class_tag(name: &str) -> String {
    format!("/Script/CoreUObject.Class'/Script/FactoryGame.{name}'")
}

/// Maps a `Build_*` class name onto its `Desc_*` descriptor key.
pub fn canonical_building_key(class_name: &str) -> String {
    match class_name.strip_prefix(BUILDABLE_PREFIX) {
        Some(base) => format!("{DESCRIPTOR_PREFIX}{base}"),
        None => class_name.to_string(),
    }
}
