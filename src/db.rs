//! Game database assembly
//!
//! The database is built in strictly ordered passes over the docs file: items,
//! then buildings, then resource well satellites, then recipes. Every pass
//! looks up keys produced by the passes before it, so the order is part of
//! the contract. Once all passes ran the builder is frozen into a
//! [`GameDatabase`], pruned of unused items and sorted.

use std::collections::HashSet;

use tracing::{info, warn};

use crate::buildings;
use crate::classify::classify;
use crate::docs::{ClassDefinition, NativeClass};
use crate::error::Result;
use crate::items::ItemParser;
use crate::models::{Building, GameDatabase, Item, Recipe};
use crate::recipes;
use crate::tables::{BY_PRODUCT_BLACKLIST, ClassKind, RESOURCE_LIMITS};

/// Every definition of the given kind, with its native class tag, in input
/// order.
fn definitions_of(
    docs: &[NativeClass],
    kind: ClassKind,
) -> impl Iterator<Item = (&str, &ClassDefinition)> {
    docs.iter()
        .filter(move |native| classify(&native.tag) == kind)
        .flat_map(|native| {
            native
                .definitions
                .iter()
                .map(move |definition| (native.tag.as_str(), definition))
        })
}

/// Building kinds parsed in the main building pass. Resource well
/// extractors are not among them; they get a pass of their own.
fn is_building(kind: ClassKind) -> bool {
    matches!(
        kind,
        ClassKind::Manufacturer
            | ClassKind::PowerGenerator
            | ClassKind::ItemProducer
            | ClassKind::ResourceExtractor
            | ClassKind::ResourceWellActivator
    )
}

/// Mutable state shared by the parsing passes
#[derive(Debug, Default)]
pub struct GameDatabaseBuilder {
    item_parser: ItemParser,
    items: Vec<Item>,
    buildings: Vec<Building>,
    recipes: Vec<Recipe>,
    stats: BuildStats,
}

impl GameDatabaseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse_items(&mut self, docs: &[NativeClass]) -> Result<()> {
        for (tag, definition) in definitions_of(docs, ClassKind::Item) {
            let item = self.item_parser.parse(tag, definition)?;
            if self.items.iter().any(|i| i.key == item.key) {
                warn!(item = %item.key, "duplicate item key");
            }
            self.items.push(item);
        }

        self.stats.items = self.items.len();
        info!(items = self.items.len(), "parsed items");
        Ok(())
    }

    pub fn parse_buildings(&mut self, docs: &[NativeClass]) -> Result<()> {
        for native in docs {
            let kind = classify(&native.tag);
            if !is_building(kind) {
                continue;
            }

            for definition in &native.definitions {
                let building = self.parse_building(kind, definition)?;
                if self.buildings.iter().any(|b| b.key() == building.key()) {
                    warn!(building = %building.key(), "duplicate building key");
                }
                self.buildings.push(building);
            }
        }

        self.stats.buildings = self.buildings.len();
        info!(buildings = self.buildings.len(), "parsed buildings");
        Ok(())
    }

    fn parse_building(&self, kind: ClassKind, definition: &ClassDefinition) -> Result<Building> {
        match kind {
            ClassKind::PowerGenerator => buildings::parse_power_generator(
                definition,
                &self.items,
                self.item_parser.biomass_fuels(),
            ),
            ClassKind::ItemProducer => buildings::parse_item_producer(definition, &self.items),
            ClassKind::ResourceExtractor => buildings::parse_resource_extractor(definition, &self.items),
            ClassKind::ResourceWellActivator => buildings::parse_resource_well(definition, &self.items),
            _ => buildings::parse_manufacturer(definition),
        }
    }

    /// Must run after [`Self::parse_buildings`]: satellites attach to an
    /// activator parsed there.
    pub fn parse_well_extractors(&mut self, docs: &[NativeClass]) -> Result<()> {
        for (_, definition) in definitions_of(docs, ClassKind::ResourceWellExtractor) {
            buildings::attach_well_extractor(definition, &mut self.buildings)?;
            self.stats.satellites += 1;
        }

        info!(satellites = self.stats.satellites, "attached resource well extractors");
        Ok(())
    }

    pub fn parse_recipes(&mut self, docs: &[NativeClass]) -> Result<()> {
        for (_, definition) in definitions_of(docs, ClassKind::Recipe) {
            match recipes::parse_recipe(definition, &self.items, &self.buildings)? {
                Some(recipe) => {
                    if self.recipes.iter().any(|r| r.key == recipe.key) {
                        warn!(recipe = %recipe.key, "duplicate recipe key");
                    }
                    self.recipes.push(recipe);
                }
                None => self.stats.skipped_recipes += 1,
            }
        }

        self.stats.recipes = self.recipes.len();
        info!(
            recipes = self.recipes.len(),
            skipped = self.stats.skipped_recipes,
            "parsed recipes"
        );
        Ok(())
    }

    /// Ends the parsing passes, attaching the static tables.
    pub fn freeze(self) -> (GameDatabase, BuildStats) {
        let db = GameDatabase {
            by_product_blacklist: BY_PRODUCT_BLACKLIST.iter().map(|k| k.to_string()).collect(),
            items: self.items,
            buildings: self.buildings,
            recipes: self.recipes,
            resource_limits: RESOURCE_LIMITS
                .iter()
                .map(|(key, limit)| (key.to_string(), *limit))
                .collect(),
        };
        (db, self.stats)
    }
}

impl GameDatabase {
    /// Keys of every item some recipe or generator fuel mentions.
    pub fn referenced_items(&self) -> HashSet<&str> {
        let recipe_items = self
            .recipes
            .iter()
            .flat_map(|r| r.inputs.iter().chain(r.outputs.iter()));
        let fuel_items = self.buildings.iter().flat_map(Building::fuels).flat_map(|f| {
            std::iter::once(&f.fuel)
                .chain(f.supplemental.as_ref())
                .chain(f.by_product.as_ref())
        });

        recipe_items
            .chain(fuel_items)
            .map(|amount| amount.item.as_str())
            .collect()
    }

    /// Drops items no recipe or fuel refers to. Returns how many were dropped.
    ///
    /// Extractor resource lists and the resource limit table are left as they
    /// are; entries naming a dropped item are logged.
    pub fn prune_unused_items(mut self) -> (Self, usize) {
        let referenced: HashSet<String> = self
            .referenced_items()
            .into_iter()
            .map(str::to_string)
            .collect();
        let (kept, dropped): (Vec<Item>, Vec<Item>) = std::mem::take(&mut self.items)
            .into_iter()
            .partition(|item| referenced.contains(&item.key));
        self.items = kept;

        let dropped_keys: HashSet<&str> = dropped.iter().map(|item| item.key.as_str()).collect();
        for (owner, resource) in self.dangling_resource_refs() {
            if dropped_keys.contains(resource) {
                warn!(owner, resource, "pruned item is still referenced");
            }
        }

        info!(pruned = dropped.len(), remaining = self.items.len(), "pruned unused items");
        (self, dropped.len())
    }

    /// `(owner, item)` pairs where an extractor's allowed resources or the
    /// resource limit table name an item missing from the item set.
    pub fn dangling_resource_refs(&self) -> Vec<(&str, &str)> {
        let known: HashSet<&str> = self.items.iter().map(|item| item.key.as_str()).collect();
        let from_buildings = self.buildings.iter().flat_map(|building| {
            building
                .allowed_resources()
                .iter()
                .map(move |resource| (building.key(), resource.as_str()))
        });
        let from_limits = self
            .resource_limits
            .keys()
            .map(|resource| ("resource_limits", resource.as_str()));

        from_buildings
            .chain(from_limits)
            .filter(|(_, resource)| !known.contains(resource))
            .collect()
    }

    /// Resources first, then by case-insensitive name. Ties keep input order.
    pub fn sorted(mut self) -> Self {
        self.items
            .sort_by_cached_key(|item| (!item.resource, item.name.to_lowercase()));
        self.buildings
            .sort_by_cached_key(|building| building.name().to_lowercase());
        self.recipes
            .sort_by_cached_key(|recipe| recipe.name.to_lowercase());
        self
    }
}

/// Runs every pass over `docs` and post-processes the result.
pub fn build_game_database(docs: &[NativeClass], prune: bool) -> Result<(GameDatabase, BuildStats)> {
    let mut builder = GameDatabaseBuilder::new();
    builder.parse_items(docs)?;
    builder.parse_buildings(docs)?;
    builder.parse_well_extractors(docs)?;
    builder.parse_recipes(docs)?;

    let (mut db, mut stats) = builder.freeze();
    if prune {
        let (pruned_db, pruned) = db.prune_unused_items();
        db = pruned_db;
        stats.pruned_items = pruned;
    }

    Ok((db.sorted(), stats))
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BuildStats {
    pub items: usize,
    pub buildings: usize,
    pub satellites: usize,
    pub recipes: usize,
    pub skipped_recipes: usize,
    pub pruned_items: usize,
}

impl std::fmt::Display for BuildStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Converted {} items ({} pruned), {} buildings ({} well satellites), {} recipes. Skipped recipes: {}",
            self.items,
            self.pruned_items,
            self.buildings,
            self.satellites,
            self.recipes,
            self.skipped_recipes
        )
    }
}
