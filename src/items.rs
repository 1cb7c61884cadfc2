//! Item descriptor parsing

use tracing::debug;

use crate::docs::ClassDefinition;
use crate::error::{ConvertError, Result};
use crate::extract::LITERS_PER_M3;
use crate::models::Item;
use crate::tables::{self, BIOMASS_CLASS, ITEMS_FORCE_RESOURCE, RESOURCE_CLASS};

/// Parses item descriptors in input order.
///
/// The parser hands out resource bit masks sequentially, so the mask an item
/// receives depends on how many resources were parsed before it. It also
/// collects the keys of items that can be burnt as biomass, which the fuel
/// builder later fans the generic biomass fuel class out to.
#[derive(Debug, Default)]
pub struct ItemParser {
    resources_seen: u32,
    biomass_fuels: Vec<String>,
}

impl ItemParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(&mut self, tag: &str, definition: &ClassDefinition) -> Result<Item> {
        let key = definition.str_field("ClassName")?.to_string();
        let form = definition.str_field("mForm")?;
        let state = tables::lookup_form(form).ok_or_else(|| ConvertError::UnknownForm {
            item: key.clone(),
            form: form.to_string(),
        })?;
        let fluid = state.is_fluid();

        let sink_points = if fluid {
            0
        } else {
            definition.u32_field("mResourceSinkPoints")?
        };

        let mut energy_mj = definition.f64_field("mEnergyValue")?;
        if fluid {
            energy_mj *= LITERS_PER_M3;
        }

        let resource = tag == RESOURCE_CLASS || ITEMS_FORCE_RESOURCE.contains(&key.as_str());
        let bit_mask = if resource {
            Some(self.next_bit_mask(&key)?)
        } else {
            None
        };

        if tag == BIOMASS_CLASS && energy_mj > 0.0 && !fluid {
            self.biomass_fuels.push(key.clone());
        }

        debug!(item = %key, ?state, resource, energy_mj, "parsed item");

        Ok(Item {
            key,
            name: definition.str_field("mDisplayName")?.to_string(),
            resource,
            state,
            energy_mj,
            sink_points,
            bit_mask,
        })
    }

    /// Keys of every solid biomass item with a positive energy value, in
    /// input order.
    pub fn biomass_fuels(&self) -> &[String] {
        &self.biomass_fuels
    }

    fn next_bit_mask(&mut self, key: &str) -> Result<u16> {
        let mask = 1u16
            .checked_shl(self.resources_seen)
            .ok_or_else(|| ConvertError::ResourceMasksExhausted {
                item: key.to_string(),
            })?;
        self.resources_seen += 1;
        Ok(mask)
    }
}

/// Looks up an already parsed item; unknown keys are an integrity error.
pub fn find_item<'a>(items: &'a [Item], key: &str, referenced_by: &str) -> Result<&'a Item> {
    items
        .iter()
        .find(|item| item.key == key)
        .ok_or_else(|| ConvertError::UnknownItem {
            key: key.to_string(),
            referenced_by: referenced_by.to_string(),
        })
}
