//! Extraction of serialized Unreal property strings
//!
//! The docs file stores lists as Unreal's text serialization, e.g.
//! `((ItemClass=BlueprintGeneratedClass'"/Game/.../Desc_Coal.Desc_Coal_C"',Amount=3))`.
//! These helpers pull the parts we need out with regular expressions. None of
//! them fail on input they cannot make sense of; an empty field simply yields
//! an empty list.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::Result;
use crate::models::{ItemAmount, ItemState};

/// Liters per cubic meter. Fluids are counted in liters in the docs file.
pub const LITERS_PER_M3: f64 = 1000.0;

// Pattern: "/Game/FactoryGame/Buildable/Factory/SmelterMk1/Build_SmelterMk1.Build_SmelterMk1_C"
static CLASS_LIST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""[^"]*\.([^".]+)""#).expect("valid class list pattern"));

// Pattern: ItemClass=BlueprintGeneratedClass'"/Game/.../Desc_Coal.Desc_Coal_C"',Amount=3
static ITEM_LIST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"ItemClass=[^,]+'"[^.]+\.([^,]+)"',Amount=(\d+)"#).expect("valid item list pattern")
});

/// Trailing segment of every quoted, dot-qualified path in `value`.
pub fn class_list(value: &str) -> Vec<String> {
    CLASS_LIST_RE
        .captures_iter(value)
        .map(|cap| cap[1].to_string())
        .collect()
}

/// `(key, amount)` pairs of an item list, amounts as written.
/// Amounts wider than any integer type still parse as `f64`.
pub fn raw_item_list(value: &str) -> Vec<(String, f64)> {
    ITEM_LIST_RE
        .captures_iter(value)
        .map(|cap| {
            let amount = cap[2].parse::<f64>().unwrap_or(f64::INFINITY);
            (cap[1].to_string(), amount)
        })
        .collect()
}

/// Parses an item list, converting fluid amounts from liters to m³.
///
/// `state_of` resolves the physical state of each referenced item; it is where
/// unknown item keys get rejected.
pub fn item_list<F>(value: &str, mut state_of: F) -> Result<Vec<ItemAmount>>
where
    F: FnMut(&str) -> Result<ItemState>,
{
    raw_item_list(value)
        .into_iter()
        .map(|(key, amount)| {
            let state = state_of(&key)?;
            Ok(ItemAmount::new(key, normalize_amount(amount, state)))
        })
        .collect()
}

/// Converts a liter amount to m³ for fluids; solids pass through.
pub fn normalize_amount(amount: f64, state: ItemState) -> f64 {
    if state.is_fluid() {
        amount / LITERS_PER_M3
    } else {
        amount
    }
}

/// `(A,B,C)` into `["A", "B", "C"]`; an empty string yields an empty list.
pub fn paren_list(value: &str) -> Vec<String> {
    if value.is_empty() {
        return Vec::new();
    }

    value
        .trim_start_matches('(')
        .trim_end_matches(')')
        .split(',')
        .map(str::to_string)
        .collect()
}
