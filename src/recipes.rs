//! Recipe parsing

use tracing::debug;

use crate::docs::ClassDefinition;
use crate::error::{ConvertError, Result};
use crate::extract;
use crate::items::find_item;
use crate::models::{Building, Item, Recipe, RecipePower};
use crate::tables::{self, ALTERNATE_PREFIX, FILTER_BUILDINGS, RECIPES_FORCE_ALTERNATE};

/// Parses a recipe against the items and buildings parsed so far.
///
/// Returns `Ok(None)` for recipes that are only made by hand or by tools,
/// which the planner has no use for.
pub fn parse_recipe(
    definition: &ClassDefinition,
    items: &[Item],
    buildings: &[Building],
) -> Result<Option<Recipe>> {
    let key = definition.str_field("ClassName")?.to_string();

    let mut produced_in: Vec<String> = extract::class_list(definition.str_field("mProducedIn")?)
        .into_iter()
        .filter(|building| !FILTER_BUILDINGS.contains(&building.as_str()))
        .collect();

    let building = match produced_in.len() {
        0 => {
            debug!(recipe = %key, "skipping recipe without a producing building");
            return Ok(None);
        }
        1 => tables::canonical_building_key(&produced_in.remove(0)),
        _ => {
            return Err(ConvertError::MultipleBuildings {
                recipe: key,
                buildings: produced_in,
            });
        }
    };

    if !buildings.iter().any(|b| b.key() == building) {
        return Err(ConvertError::UnknownBuilding {
            key: building,
            referenced_by: key,
        });
    }

    let (name, alternate) = display_name(definition.str_field("mDisplayName")?, &key);
    let state_of = |item: &str| find_item(items, item, &key).map(|item| item.state);
    let inputs = extract::item_list(definition.str_field("mIngredients")?, state_of)?;
    let outputs = extract::item_list(definition.str_field("mProduct")?, state_of)?;
    let events = parse_events(definition.str_field_or_empty("mRelevantEvents")?, &key)?;

    let power_constant = definition.f64_field("mVariablePowerConsumptionConstant")?;
    let power_factor = definition.f64_field("mVariablePowerConsumptionFactor")?;

    debug!(recipe = %key, %building, alternate, "parsed recipe");

    Ok(Some(Recipe {
        craft_time_secs: definition.f64_field("mManufactoringDuration")?,
        power_consumption: RecipePower {
            min_mw: power_constant,
            max_mw: power_constant + power_factor,
        },
        key,
        name,
        alternate,
        inputs,
        outputs,
        events,
        building,
    }))
}

/// Strips the alternate marker from a display name.
fn display_name(raw: &str, key: &str) -> (String, bool) {
    let forced = RECIPES_FORCE_ALTERNATE.contains(&key);
    match raw.strip_prefix(ALTERNATE_PREFIX) {
        Some(stripped) => (stripped.to_string(), true),
        None => (raw.to_string(), forced),
    }
}

fn parse_events(events: &str, recipe: &str) -> Result<Vec<String>> {
    extract::paren_list(events)
        .into_iter()
        .map(|event| {
            tables::lookup_event(&event)
                .map(str::to_string)
                .ok_or_else(|| ConvertError::UnknownEvent {
                    recipe: recipe.to_string(),
                    event,
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buildings;
    use crate::fixtures;
    use crate::models::{ItemAmount, ItemState};
    use serde_json::json;

    fn item(key: &str, state: ItemState) -> Item {
        Item {
            key: key.to_string(),
            name: key.to_string(),
            resource: false,
            state,
            energy_mj: 0.0,
            sink_points: 0,
            bit_mask: None,
        }
    }

    fn items() -> Vec<Item> {
        vec![
            item("Desc_OreIron_C", ItemState::Solid),
            item("Desc_IronIngot_C", ItemState::Solid),
            item("Desc_Water_C", ItemState::Liquid),
        ]
    }

    fn known_buildings() -> Vec<Building> {
        ["Build_SmelterMk1_C", "Build_FoundryMk1_C", "Build_OilRefinery_C"]
            .into_iter()
            .map(|class| buildings::parse_manufacturer(&fixtures::manufacturer_def(class, class, "4.0")).unwrap())
            .collect()
    }

    fn ingot_recipe(name: &str, key: &str, produced_in: &[&str]) -> ClassDefinition {
        fixtures::recipe_def(key, name, &[("Desc_OreIron_C", 1)], &[("Desc_IronIngot_C", 1)], produced_in)
    }

    #[test]
    fn parses_recipe_fields() {
        let def = ingot_recipe("Iron Ingot", "Recipe_IngotIron_C", &["Build_SmelterMk1_C", "BP_BuildGun_C"]);

        let recipe = parse_recipe(&def, &items(), &known_buildings()).unwrap().unwrap();

        assert_eq!(recipe.key, "Recipe_IngotIron_C");
        assert_eq!(recipe.name, "Iron Ingot");
        assert!(!recipe.alternate);
        assert_eq!(recipe.building, "Desc_SmelterMk1_C");
        assert_eq!(recipe.inputs, vec![ItemAmount::new("Desc_OreIron_C", 1.0)]);
        assert_eq!(recipe.outputs, vec![ItemAmount::new("Desc_IronIngot_C", 1.0)]);
        assert_eq!(recipe.craft_time_secs, 2.0);
        assert!(recipe.events.is_empty());
        assert_eq!(recipe.power_consumption, RecipePower { min_mw: 0.0, max_mw: 1.0 });
    }

    #[test]
    fn water_input_is_converted_to_cubic_meters() {
        let def = fixtures::recipe_def(
            "Recipe_Wet_C",
            "Wet Ingot",
            &[("Desc_Water_C", 2000)],
            &[("Desc_IronIngot_C", 1)],
            &["Build_OilRefinery_C"],
        );

        let recipe = parse_recipe(&def, &items(), &known_buildings()).unwrap().unwrap();
        assert_eq!(recipe.inputs, vec![ItemAmount::new("Desc_Water_C", 2.0)]);
    }

    #[test]
    fn oversized_amount_keeps_the_ingredient() {
        let def = fixtures::definition(json!({
            "ClassName": "Recipe_IngotIron_C",
            "mDisplayName": "Iron Ingot",
            "mIngredients": r#"(ItemClass=X'"Pkg.Desc_OreIron_C"',Amount=99999999999999999999999)"#,
            "mProduct": fixtures::item_list(&[("Desc_IronIngot_C", 1)]),
            "mManufactoringDuration": "2.000000",
            "mProducedIn": fixtures::class_paths(&["Build_SmelterMk1_C"]),
            "mRelevantEvents": "",
            "mVariablePowerConsumptionConstant": "0.000000",
            "mVariablePowerConsumptionFactor": "1.000000",
        }));

        let recipe = parse_recipe(&def, &items(), &known_buildings()).unwrap().unwrap();
        assert_eq!(recipe.inputs.len(), 1);
        assert_eq!(recipe.inputs[0].item, "Desc_OreIron_C");
        assert!(recipe.inputs[0].amount > 9.9e22);
    }

    #[test]
    fn alternate_prefix_is_stripped() {
        let def = ingot_recipe("Alternate: Pure Iron Ingot", "Recipe_Alternate_PureIronIngot_C", &["Build_OilRefinery_C"]);

        let recipe = parse_recipe(&def, &items(), &known_buildings()).unwrap().unwrap();
        assert_eq!(recipe.name, "Pure Iron Ingot");
        assert!(recipe.alternate);
    }

    #[test]
    fn override_list_forces_alternate() {
        let def = ingot_recipe("Turbofuel", "Recipe_Alternate_Turbofuel_C", &["Build_OilRefinery_C"]);

        let recipe = parse_recipe(&def, &items(), &known_buildings()).unwrap().unwrap();
        assert_eq!(recipe.name, "Turbofuel");
        assert!(recipe.alternate);
    }

    #[test]
    fn tool_only_recipe_is_dropped() {
        let def = ingot_recipe("Iron Ingot", "Recipe_IngotIron_C", &["BP_WorkBenchComponent_C", "BP_BuildGun_C"]);
        assert!(parse_recipe(&def, &items(), &known_buildings()).unwrap().is_none());

        let def = ingot_recipe("Iron Ingot", "Recipe_IngotIron_C", &[]);
        assert!(parse_recipe(&def, &items(), &known_buildings()).unwrap().is_none());
    }

    #[test]
    fn multiple_buildings_are_rejected() {
        let def = ingot_recipe("Iron Ingot", "Recipe_IngotIron_C", &["Build_SmelterMk1_C", "Build_FoundryMk1_C"]);

        let err = parse_recipe(&def, &items(), &known_buildings()).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::MultipleBuildings { ref recipe, ref buildings } if recipe == "Recipe_IngotIron_C" && buildings.len() == 2
        ));
    }

    #[test]
    fn unknown_building_is_fatal() {
        let def = ingot_recipe("Iron Ingot", "Recipe_IngotIron_C", &["Build_ConstructorMk1_C"]);

        let err = parse_recipe(&def, &items(), &known_buildings()).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::UnknownBuilding { ref key, ref referenced_by } if key == "Desc_ConstructorMk1_C" && referenced_by == "Recipe_IngotIron_C"
        ));
    }

    #[test]
    fn unknown_item_is_fatal() {
        let def = fixtures::recipe_def(
            "Recipe_Screw_C",
            "Screw",
            &[("Desc_IronRod_C", 1)],
            &[("Desc_IronIngot_C", 4)],
            &["Build_SmelterMk1_C"],
        );

        let err = parse_recipe(&def, &items(), &known_buildings()).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::UnknownItem { ref key, ref referenced_by } if key == "Desc_IronRod_C" && referenced_by == "Recipe_Screw_C"
        ));
    }

    #[test]
    fn events_are_mapped() {
        let mut value = json!({
            "ClassName": "Recipe_Candy_C",
            "mDisplayName": "Candy Cane",
            "mIngredients": fixtures::item_list(&[("Desc_OreIron_C", 3)]),
            "mProduct": fixtures::item_list(&[("Desc_IronIngot_C", 1)]),
            "mManufactoringDuration": "12.000000",
            "mProducedIn": fixtures::class_paths(&["Build_SmelterMk1_C"]),
            "mRelevantEvents": "(EV_Christmas)",
            "mVariablePowerConsumptionConstant": "0.000000",
            "mVariablePowerConsumptionFactor": "1.000000",
        });

        let recipe = parse_recipe(&fixtures::definition(value.clone()), &items(), &known_buildings())
            .unwrap()
            .unwrap();
        assert_eq!(recipe.events, ["FICSMAS"]);

        value["mRelevantEvents"] = json!("(EV_Easter)");
        let err = parse_recipe(&fixtures::definition(value), &items(), &known_buildings()).unwrap_err();
        assert!(matches!(err, ConvertError::UnknownEvent { ref event, .. } if event == "EV_Easter"));
    }

    #[test]
    fn variable_power_range() {
        let def = fixtures::definition(json!({
            "ClassName": "Recipe_Diamond_C",
            "mDisplayName": "Diamonds",
            "mIngredients": fixtures::item_list(&[("Desc_OreIron_C", 20)]),
            "mProduct": fixtures::item_list(&[("Desc_IronIngot_C", 1)]),
            "mManufactoringDuration": "2.000000",
            "mProducedIn": fixtures::class_paths(&["Build_SmelterMk1_C"]),
            "mRelevantEvents": "",
            "mVariablePowerConsumptionConstant": "250.000000",
            "mVariablePowerConsumptionFactor": "500.000000",
        }));

        let recipe = parse_recipe(&def, &items(), &known_buildings()).unwrap().unwrap();
        assert_eq!(recipe.power_consumption, RecipePower { min_mw: 250.0, max_mw: 750.0 });
    }
}
