//! Routes native class tags to the parser that understands them

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::tables::{CLASS_KINDS, ClassKind};

static CLASSIFIER: LazyLock<HashMap<&'static str, ClassKind>> =
    LazyLock::new(|| CLASS_KINDS.iter().copied().collect());

/// Unknown tags are ignored rather than rejected; most of the docs file is
/// cosmetics, vehicles and schematics we have no use for.
pub fn classify(tag: &str) -> ClassKind {
    CLASSIFIER.get(tag).copied().unwrap_or(ClassKind::Ignored)
}
