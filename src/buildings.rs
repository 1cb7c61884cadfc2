//! Buildable parsing
//!
//! Each parser reads one buildable class and produces a [`Building`]. Keys are
//! canonicalized from `Build_*` to `Desc_*` so that recipes, which name the
//! build gun class, and the planner, which works with descriptors, agree.

use tracing::debug;

use crate::docs::ClassDefinition;
use crate::error::{ConvertError, Result};
use crate::extract::{self, LITERS_PER_M3};
use crate::fuel::{self, GeneratorRating};
use crate::items::find_item;
use crate::models::{
    Building, Dimensions, Item, ItemAmount, ItemProducer, ItemState, Manufacturer, PowerConsumption,
    PowerGenerator, ResourceExtractor, ResourceWell, ResourceWellExtractor,
};
use crate::tables::{self, WELL_ACTIVATOR_KEY};

/// Fields every buildable shares
#[derive(Debug, Clone)]
struct Header {
    key: String,
    name: String,
    power_consumption: PowerConsumption,
    dimensions: Option<Dimensions>,
}

fn parse_header(definition: &ClassDefinition) -> Result<Header> {
    let key = tables::canonical_building_key(definition.str_field("ClassName")?);
    let dimensions = tables::lookup_dimensions(&key);
    if dimensions.is_none() {
        debug!(building = %key, "no dimensions known");
    }

    Ok(Header {
        name: definition.str_field("mDisplayName")?.to_string(),
        power_consumption: parse_power(definition)?,
        dimensions,
        key,
    })
}

/// Variable-power buildings advertise an estimated minimum and maximum;
/// everything else draws a fixed amount.
pub fn parse_power(definition: &ClassDefinition) -> Result<PowerConsumption> {
    let exponent = definition.f64_field("mPowerConsumptionExponent")?;

    if definition.has_field("mEstimatedMininumPowerConsumption") {
        Ok(PowerConsumption::Variable {
            min_mw: definition.f64_field("mEstimatedMininumPowerConsumption")?,
            max_mw: definition.f64_field("mEstimatedMaximumPowerConsumption")?,
            exponent,
        })
    } else {
        Ok(PowerConsumption::Fixed {
            value_mw: definition.f64_field("mPowerConsumption")?,
            exponent,
        })
    }
}

pub fn parse_manufacturer(definition: &ClassDefinition) -> Result<Building> {
    let header = parse_header(definition)?;
    debug!(building = %header.key, "parsed manufacturer");

    Ok(Building::Manufacturer(Manufacturer {
        key: header.key,
        name: header.name,
        power_consumption: header.power_consumption,
        dimensions: header.dimensions,
    }))
}

pub fn parse_power_generator(
    definition: &ClassDefinition,
    items: &[Item],
    biomass_fuels: &[String],
) -> Result<Building> {
    let header = parse_header(definition)?;
    let power_production_mw = definition.f64_field("mPowerProduction")?;
    let rating = GeneratorRating {
        key: &header.key,
        power_production_mw,
        supplemental_ratio: definition.f64_field("mSupplementalToPowerRatio")?,
    };
    let fuels = fuel::build_fuels(rating, &definition.fuel_specs("mFuel")?, items, biomass_fuels)?;
    debug!(building = %header.key, fuels = fuels.len(), "parsed power generator");

    Ok(Building::PowerGenerator(PowerGenerator {
        key: header.key,
        name: header.name,
        power_consumption: header.power_consumption,
        power_production_mw,
        fuels,
        dimensions: header.dimensions,
    }))
}

pub fn parse_item_producer(definition: &ClassDefinition, items: &[Item]) -> Result<Building> {
    let header = parse_header(definition)?;
    let (output_key, amount) = tables::lookup_producer_output(&header.key).ok_or_else(|| {
        ConvertError::MissingProducerOutput {
            building: header.key.clone(),
        }
    })?;
    let output = find_item(items, output_key, &header.key)?;
    debug!(building = %header.key, output = %output.key, "parsed item producer");

    Ok(Building::ItemProducer(ItemProducer {
        craft_time_secs: definition.f64_field("mTimeToProduceItem")?,
        output: ItemAmount::new(output.key.clone(), amount),
        key: header.key,
        name: header.name,
        power_consumption: header.power_consumption,
        dimensions: header.dimensions,
    }))
}

pub fn parse_resource_extractor(definition: &ClassDefinition, items: &[Item]) -> Result<Building> {
    let header = parse_header(definition)?;
    let forms = allowed_forms(definition)?;
    let extraction_rate = extraction_rate(definition, &forms)?;
    debug!(building = %header.key, extraction_rate, "parsed resource extractor");

    Ok(Building::ResourceExtractor(ResourceExtractor {
        allowed_resources: allowed_resources(definition, &header.key, &forms, items)?,
        extractor_type: extractor_type(definition)?,
        extraction_rate,
        key: header.key,
        name: header.name,
        power_consumption: header.power_consumption,
        dimensions: header.dimensions,
    }))
}

/// The activator of a resource well. Its satellites are attached later by
/// [`attach_well_extractor`].
pub fn parse_resource_well(definition: &ClassDefinition, items: &[Item]) -> Result<Building> {
    let header = parse_header(definition)?;
    let forms = allowed_forms(definition)?;
    debug!(building = %header.key, "parsed resource well");

    Ok(Building::ResourceWell(ResourceWell {
        allowed_resources: allowed_resources(definition, &header.key, &forms, items)?,
        satellite_buildings: Vec::new(),
        extractor_type: extractor_type(definition)?,
        key: header.key,
        name: header.name,
        power_consumption: header.power_consumption,
        dimensions: header.dimensions,
    }))
}

/// Parses a satellite extractor and adds it to its activator.
pub fn attach_well_extractor(definition: &ClassDefinition, buildings: &mut [Building]) -> Result<()> {
    let header = parse_header(definition)?;
    let forms = allowed_forms(definition)?;
    let extraction_rate = extraction_rate(definition, &forms)?;

    let parent = buildings
        .iter_mut()
        .find_map(|building| match building {
            Building::ResourceWell(well) if well.key == WELL_ACTIVATOR_KEY => Some(well),
            _ => None,
        })
        .ok_or_else(|| ConvertError::MissingWellActivator {
            extractor: header.key.clone(),
            activator: WELL_ACTIVATOR_KEY.to_string(),
        })?;

    debug!(building = %header.key, parent = %parent.key, extraction_rate, "attached well extractor");
    parent.satellite_buildings.push(ResourceWellExtractor {
        key: header.key,
        name: header.name,
        extraction_rate,
        power_consumption: header.power_consumption,
        dimensions: header.dimensions,
    });

    Ok(())
}

fn allowed_forms(definition: &ClassDefinition) -> Result<Vec<ItemState>> {
    extract::paren_list(definition.str_field("mAllowedResourceForms")?)
        .into_iter()
        .map(|form| {
            tables::lookup_form(&form).ok_or_else(|| ConvertError::UnknownForm {
                item: definition.class_name().to_string(),
                form,
            })
        })
        .collect()
}

/// Items (or m³) per minute; fluid extractors count their cycle in liters.
fn extraction_rate(definition: &ClassDefinition, forms: &[ItemState]) -> Result<f64> {
    let mut items_per_cycle = definition.f64_field("mItemsPerCycle")?;
    if forms.iter().any(|form| form.is_fluid()) {
        items_per_cycle /= LITERS_PER_M3;
    }

    Ok(items_per_cycle * 60.0 / definition.positive_f64_field("mExtractCycleTime")?)
}

fn allowed_resources(
    definition: &ClassDefinition,
    building_key: &str,
    forms: &[ItemState],
    items: &[Item],
) -> Result<Vec<String>> {
    let restricted = definition.has_field("mOnlyAllowCertainResources")
        && definition.bool_field("mOnlyAllowCertainResources")?;

    if restricted {
        extract::class_list(definition.str_field("mAllowedResources")?)
            .into_iter()
            .map(|key| find_item(items, &key, building_key).map(|item| item.key.clone()))
            .collect()
    } else {
        Ok(items
            .iter()
            .filter(|item| item.resource && forms.contains(&item.state))
            .map(|item| item.key.clone())
            .collect())
    }
}

fn extractor_type(definition: &ClassDefinition) -> Result<Option<String>> {
    let name = definition.str_field_or_empty("mExtractorTypeName")?;
    Ok(match name {
        "" | "None" => None,
        other => Some(other.to_string()),
    })
}
