//! Docs file fragments shared by the unit tests

use serde_json::{Value, json};

use crate::docs::{ClassDefinition, NativeClass};
use crate::tables::native_class_tag;

pub fn definition(value: Value) -> ClassDefinition {
    serde_json::from_value(value).expect("fixture is a JSON object")
}

pub fn item_def(key: &str, name: &str, form: &str, energy: &str, sink_points: &str) -> ClassDefinition {
    definition(json!({
        "ClassName": key,
        "mDisplayName": name,
        "mForm": form,
        "mEnergyValue": energy,
        "mResourceSinkPoints": sink_points,
    }))
}

pub fn manufacturer_def(class_name: &str, name: &str, power_mw: &str) -> ClassDefinition {
    definition(json!({
        "ClassName": class_name,
        "mDisplayName": name,
        "mPowerConsumption": power_mw,
        "mPowerConsumptionExponent": "1.321929",
    }))
}

pub fn generator_def(class_name: &str, name: &str, production_mw: &str, ratio: &str, fuels: Value) -> ClassDefinition {
    definition(json!({
        "ClassName": class_name,
        "mDisplayName": name,
        "mPowerConsumption": "0.000000",
        "mPowerConsumptionExponent": "1.600000",
        "mPowerProduction": production_mw,
        "mSupplementalToPowerRatio": ratio,
        "mFuel": fuels,
    }))
}

pub fn extractor_def(
    class_name: &str,
    name: &str,
    forms: &str,
    allowed: Option<&[&str]>,
    items_per_cycle: &str,
    cycle_time: &str,
) -> ClassDefinition {
    let only_certain = if allowed.is_some() { "True" } else { "False" };
    let allowed = allowed.map(class_paths).unwrap_or_default();
    definition(json!({
        "ClassName": class_name,
        "mDisplayName": name,
        "mPowerConsumption": "5.000000",
        "mPowerConsumptionExponent": "1.600000",
        "mAllowedResourceForms": forms,
        "mOnlyAllowCertainResources": only_certain,
        "mAllowedResources": allowed,
        "mExtractorTypeName": "None",
        "mItemsPerCycle": items_per_cycle,
        "mExtractCycleTime": cycle_time,
    }))
}

pub fn recipe_def(key: &str, name: &str, ingredients: &[(&str, u32)], products: &[(&str, u32)], produced_in: &[&str]) -> ClassDefinition {
    definition(json!({
        "ClassName": key,
        "mDisplayName": name,
        "mIngredients": item_list(ingredients),
        "mProduct": item_list(products),
        "mManufactoringDuration": "2.000000",
        "mProducedIn": class_paths(produced_in),
        "mRelevantEvents": "",
        "mVariablePowerConsumptionConstant": "0.000000",
        "mVariablePowerConsumptionFactor": "1.000000",
    }))
}

/// Quoted package paths the way `mProducedIn` and `mAllowedResources` spell them.
pub fn class_paths(classes: &[&str]) -> String {
    let paths: Vec<String> = classes
        .iter()
        .map(|class| {
            let base = class.trim_end_matches("_C");
            format!("\"/Game/FactoryGame/Buildable/{base}.{class}\"")
        })
        .collect();
    format!("({})", paths.join(","))
}

pub fn item_list(amounts: &[(&str, u32)]) -> String {
    if amounts.is_empty() {
        return String::new();
    }

    let entries: Vec<String> = amounts
        .iter()
        .map(|(key, amount)| {
            let base = key.trim_end_matches("_C");
            format!("(ItemClass=BlueprintGeneratedClass'\"/Game/FactoryGame/Resource/{base}.{key}\"',Amount={amount})")
        })
        .collect();
    format!("({})", entries.join(","))
}

pub fn native_class(class: &str, definitions: Vec<ClassDefinition>) -> NativeClass {
    NativeClass {
        tag: native_class_tag(class),
        definitions,
    }
}

/// A small but complete world: ores, a fluid, biomass, every building
/// variant and a handful of recipes. Recipes come first to show that input
/// order does not matter.
pub fn sample_docs() -> Vec<NativeClass> {
    vec![
        native_class(
            "FGRecipe",
            vec![
                recipe_def("Recipe_IngotIron_C", "Iron Ingot", &[("Desc_OreIron_C", 1)], &[("Desc_IronIngot_C", 1)], &["Build_SmelterMk1_C", "BP_BuildGun_C"]),
                recipe_def("Recipe_Alternate_PureIronIngot_C", "Alternate: Pure Iron Ingot", &[("Desc_OreIron_C", 7), ("Desc_Water_C", 4000)], &[("Desc_IronIngot_C", 13)], &["Build_OilRefinery_C"]),
                recipe_def("Recipe_Biomass_Leaves_C", "Biomass (Leaves)", &[("Desc_Leaves_C", 10)], &[("Desc_GenericBiomass_C", 5)], &["BP_WorkBenchComponent_C", "BP_BuildGun_C"]),
            ],
        ),
        native_class(
            "FGResourceDescriptor",
            vec![
                item_def("Desc_OreIron_C", "Iron Ore", "RF_SOLID", "0.000000", "1"),
                item_def("Desc_Water_C", "Water", "RF_LIQUID", "0.000000", "0"),
                item_def("Desc_Coal_C", "Coal", "RF_SOLID", "300.000000", "3"),
                item_def("Desc_OreUranium_C", "Uranium", "RF_SOLID", "0.000000", "35"),
            ],
        ),
        native_class(
            "FGItemDescriptor",
            vec![
                item_def("Desc_IronIngot_C", "Iron Ingot", "RF_SOLID", "0.000000", "2"),
                item_def("Desc_Unused_C", "Unused Thing", "RF_SOLID", "0.000000", "1"),
            ],
        ),
        native_class(
            "FGItemDescriptorBiomass",
            vec![
                item_def("Desc_Leaves_C", "Leaves", "RF_SOLID", "15.000000", "3"),
                item_def("Desc_GenericBiomass_C", "Biomass", "RF_SOLID", "180.000000", "12"),
            ],
        ),
        native_class(
            "FGBuildableManufacturer",
            vec![manufacturer_def("Build_SmelterMk1_C", "Smelter", "4.000000")],
        ),
        native_class(
            "FGBuildableManufacturerVariablePower",
            vec![manufacturer_def("Build_OilRefinery_C", "Refinery", "30.000000")],
        ),
        native_class(
            "FGBuildableGeneratorFuel",
            vec![
                generator_def(
                    "Build_GeneratorCoal_C",
                    "Coal Generator",
                    "75.000000",
                    "0.166667",
                    json!([{ "mFuelClass": "Desc_Coal_C", "mSupplementalResourceClass": "Desc_Water_C", "mByproduct": "", "mByproductAmount": "" }]),
                ),
                generator_def(
                    "Build_GeneratorBiomass_Automated_C",
                    "Biomass Burner",
                    "30.000000",
                    "0.000000",
                    json!([{ "mFuelClass": "FGItemDescriptorBiomass", "mSupplementalResourceClass": "", "mByproduct": "", "mByproductAmount": "" }]),
                ),
            ],
        ),
        native_class(
            "FGBuildableResourceExtractor",
            vec![extractor_def("Build_MinerMk1_C", "Miner Mk.1", "(RF_SOLID)", None, "1", "1.000000")],
        ),
        native_class(
            "FGBuildableFrackingExtractor",
            vec![extractor_def("Build_FrackingExtractor_C", "Resource Well Extractor", "(RF_LIQUID,RF_GAS)", None, "1000", "1.000000")],
        ),
        native_class(
            "FGBuildableFrackingActivator",
            vec![extractor_def("Build_FrackingSmasher_C", "Resource Well Pressurizer", "(RF_LIQUID,RF_GAS)", None, "0", "1.000000")],
        ),
    ]
}
