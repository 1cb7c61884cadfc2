//! Data models for the generated game database

use std::collections::BTreeMap;

use serde::Serialize;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemState {
    Solid,
    Liquid,
    Gas,
}

impl ItemState {
    pub fn is_fluid(self) -> bool {
        !matches!(self, Self::Solid)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    pub key: String,
    pub name: String,
    pub resource: bool,
    pub state: ItemState,
    pub energy_mj: f64,
    pub sink_points: u32,
    pub bit_mask: Option<u16>,
}

/// An item key with an amount (items, or m³ for fluids)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemAmount {
    pub item: String,
    pub amount: f64,
}

impl ItemAmount {
    pub fn new(item: impl Into<String>, amount: f64) -> Self {
        Self {
            item: item.into(),
            amount,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PowerConsumption {
    Fixed {
        value_mw: f64,
        exponent: f64,
    },
    Variable {
        min_mw: f64,
        max_mw: f64,
        exponent: f64,
    },
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Dimensions {
    pub length_m: f64,
    pub width_m: f64,
    pub height_m: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Manufacturer {
    pub key: String,
    pub name: String,
    pub power_consumption: PowerConsumption,
    pub dimensions: Option<Dimensions>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fuel {
    pub fuel: ItemAmount,
    pub supplemental: Option<ItemAmount>,
    pub by_product: Option<ItemAmount>,
    pub burn_time_secs: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PowerGenerator {
    pub key: String,
    pub name: String,
    pub power_consumption: PowerConsumption,
    pub power_production_mw: f64,
    pub fuels: Vec<Fuel>,
    pub dimensions: Option<Dimensions>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemProducer {
    pub key: String,
    pub name: String,
    pub power_consumption: PowerConsumption,
    pub craft_time_secs: f64,
    pub output: ItemAmount,
    pub dimensions: Option<Dimensions>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceExtractor {
    pub key: String,
    pub name: String,
    pub power_consumption: PowerConsumption,
    /// Items (or m³) per minute
    pub extraction_rate: f64,
    pub allowed_resources: Vec<String>,
    pub extractor_type: Option<String>,
    pub dimensions: Option<Dimensions>,
}

/// A satellite extractor placed on a resource well
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceWellExtractor {
    pub key: String,
    pub name: String,
    pub extraction_rate: f64,
    pub power_consumption: PowerConsumption,
    pub dimensions: Option<Dimensions>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceWell {
    pub key: String,
    pub name: String,
    pub power_consumption: PowerConsumption,
    pub allowed_resources: Vec<String>,
    pub satellite_buildings: Vec<ResourceWellExtractor>,
    pub extractor_type: Option<String>,
    pub dimensions: Option<Dimensions>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Building {
    Manufacturer(Manufacturer),
    PowerGenerator(PowerGenerator),
    ItemProducer(ItemProducer),
    ResourceExtractor(ResourceExtractor),
    ResourceWell(ResourceWell),
}

impl Building {
    pub fn key(&self) -> &str {
        match self {
            Self::Manufacturer(m) => &m.key,
            Self::PowerGenerator(pg) => &pg.key,
            Self::ItemProducer(ip) => &ip.key,
            Self::ResourceExtractor(re) => &re.key,
            Self::ResourceWell(rw) => &rw.key,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Manufacturer(m) => &m.name,
            Self::PowerGenerator(pg) => &pg.name,
            Self::ItemProducer(ip) => &ip.name,
            Self::ResourceExtractor(re) => &re.name,
            Self::ResourceWell(rw) => &rw.name,
        }
    }

    pub fn fuels(&self) -> &[Fuel] {
        match self {
            Self::PowerGenerator(pg) => &pg.fuels,
            _ => &[],
        }
    }

    pub fn allowed_resources(&self) -> &[String] {
        match self {
            Self::ResourceExtractor(re) => &re.allowed_resources,
            Self::ResourceWell(rw) => &rw.allowed_resources,
            _ => &[],
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct RecipePower {
    pub min_mw: f64,
    pub max_mw: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recipe {
    pub key: String,
    pub name: String,
    pub alternate: bool,
    pub inputs: Vec<ItemAmount>,
    pub outputs: Vec<ItemAmount>,
    pub craft_time_secs: f64,
    pub events: Vec<String>,
    pub building: String,
    pub power_consumption: RecipePower,
}

/// The finished database, as written to disk
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameDatabase {
    pub by_product_blacklist: Vec<String>,
    pub items: Vec<Item>,
    pub buildings: Vec<Building>,
    pub recipes: Vec<Recipe>,
    pub resource_limits: BTreeMap<String, f64>,
}
