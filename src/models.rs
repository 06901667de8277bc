//! Data models for blueprints, items and resolution results

use std::collections::BTreeMap;
use std::fmt;

/// Stable identifier of an item type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(pub u64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A recipe is identified by the item id of its blueprint.
pub type RecipeId = ItemId;

pub type Quantity = u64;

/// One input or output line of a recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemGroup {
    pub item: ItemId,
    pub quantity: Quantity,
}

impl ItemGroup {
    pub fn new(item: u64, quantity: Quantity) -> Self {
        Self {
            item: ItemId(item),
            quantity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub id: RecipeId,
    pub inputs: Vec<ItemGroup>,
    pub outputs: Vec<ItemGroup>,
}

impl Recipe {
    pub fn new(id: u64, inputs: Vec<ItemGroup>, outputs: Vec<ItemGroup>) -> Self {
        Self {
            id: ItemId(id),
            inputs,
            outputs,
        }
    }
}

/// Materials the caller owns. Duplicate items are summed on insertion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterialSet {
    items: BTreeMap<ItemId, Quantity>,
}

impl MaterialSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, item: ItemId, quantity: Quantity) {
        let entry = self.items.entry(item).or_default();
        *entry = entry.saturating_add(quantity);
    }

    pub fn contains(&self, item: ItemId) -> bool {
        self.items.contains_key(&item)
    }

    pub fn quantity(&self, item: ItemId) -> Option<Quantity> {
        self.items.get(&item).copied()
    }

    /// Owned item ids in ascending order.
    pub fn items(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.items.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<(ItemId, Quantity)> for MaterialSet {
    fn from_iter<I: IntoIterator<Item = (ItemId, Quantity)>>(iter: I) -> Self {
        let mut set = MaterialSet::new();
        for (item, quantity) in iter {
            set.add(item, quantity);
        }
        set
    }
}

/// How an item encountered during discovery can be obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    /// Present in the caller's materials
    Owned,
    /// Output of a discovered recipe
    Produced,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RecipeState {
    Unknown,
    Resolved { completeness: f64, viable: bool },
}

impl RecipeState {
    pub fn is_resolved(&self) -> bool {
        matches!(self, RecipeState::Resolved { .. })
    }

    pub fn is_viable(&self) -> bool {
        matches!(self, RecipeState::Resolved { viable: true, .. })
    }
}

/// A producible recipe with its rounded completeness percentage.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedRecipe<'c> {
    pub recipe: &'c Recipe,
    pub completeness: u32,
    /// Every input is owned, no intermediate production needed
    pub direct: bool,
}
