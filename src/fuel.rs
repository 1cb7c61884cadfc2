//! Fuel lists of power generators

use tracing::debug;

use crate::docs::FuelSpec;
use crate::error::{ConvertError, Result};
use crate::extract::normalize_amount;
use crate::items::find_item;
use crate::models::{Fuel, Item, ItemAmount};
use crate::tables::BIOMASS_FUEL_CLASS;

/// Generator-level inputs of the fuel calculation
#[derive(Debug, Clone, Copy)]
pub struct GeneratorRating<'a> {
    pub key: &'a str,
    pub power_production_mw: f64,
    pub supplemental_ratio: f64,
}

/// Resolves the `mFuel` entries of a generator into fuel options.
///
/// An entry naming the biomass class expands in place into one entry per item
/// in `biomass_fuels`. Candidates without energy content are dropped.
pub fn build_fuels(
    generator: GeneratorRating<'_>,
    entries: &[FuelSpec],
    items: &[Item],
    biomass_fuels: &[String],
) -> Result<Vec<Fuel>> {
    let mut fuels = Vec::new();

    for entry in entries {
        let candidates: Vec<&Item> = if entry.fuel_class == BIOMASS_FUEL_CLASS {
            biomass_fuels
                .iter()
                .map(|key| find_item(items, key, generator.key))
                .collect::<Result<_>>()?
        } else {
            vec![find_item(items, &entry.fuel_class, generator.key)?]
        };

        for fuel_item in candidates {
            if fuel_item.energy_mj == 0.0 {
                debug!(generator = generator.key, fuel = %fuel_item.key, "skipping fuel without energy");
                continue;
            }

            fuels.push(build_fuel(generator, entry, fuel_item, items)?);
        }
    }

    Ok(fuels)
}

fn build_fuel(
    generator: GeneratorRating<'_>,
    entry: &FuelSpec,
    fuel_item: &Item,
    items: &[Item],
) -> Result<Fuel> {
    if generator.power_production_mw <= 0.0 {
        return Err(ConvertError::InvalidNumber {
            class: generator.key.to_string(),
            field: "mPowerProduction",
            value: generator.power_production_mw.to_string(),
        });
    }

    let supplemental = if entry.supplemental_class.is_empty() {
        None
    } else {
        let item = find_item(items, &entry.supplemental_class, generator.key)?;
        let amount = normalize_amount(fuel_item.energy_mj * generator.supplemental_ratio, item.state);
        Some(ItemAmount::new(item.key.clone(), amount))
    };

    // by-product amounts are carried over as written, without unit conversion
    let by_product = if entry.by_product.is_empty() || entry.by_product_amount.is_empty() {
        None
    } else {
        let item = find_item(items, &entry.by_product, generator.key)?;
        let amount = entry
            .by_product_amount
            .trim()
            .parse::<f64>()
            .map_err(|_| ConvertError::InvalidNumber {
                class: generator.key.to_string(),
                field: "mByproductAmount",
                value: entry.by_product_amount.clone(),
            })?;
        Some(ItemAmount::new(item.key.clone(), amount))
    };

    Ok(Fuel {
        fuel: ItemAmount::new(fuel_item.key.clone(), 1.0),
        supplemental,
        by_product,
        burn_time_secs: fuel_item.energy_mj / generator.power_production_mw,
    })
}
