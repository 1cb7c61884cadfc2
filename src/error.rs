//! Fatal conversion errors
//!
//! Every variant aborts the whole conversion. Messages always carry the key of
//! the class that triggered them so a broken docs file can be traced back.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Item `{item}`: unrecognized physical state `{form}`")]
    UnknownForm { item: String, form: String },

    #[error("Recipe `{recipe}` is produced in multiple buildings: {buildings:?}")]
    MultipleBuildings {
        recipe: String,
        buildings: Vec<String>,
    },

    #[error("Item `{key}` (referenced by `{referenced_by}`) is not in the game database")]
    UnknownItem { key: String, referenced_by: String },

    #[error("Building `{key}` (referenced by `{referenced_by}`) is not in the game database")]
    UnknownBuilding { key: String, referenced_by: String },

    #[error("Resource well extractor `{extractor}`: parent activator `{activator}` was not parsed")]
    MissingWellActivator { extractor: String, activator: String },

    #[error("Class `{class}` is missing field `{field}`")]
    MissingField { class: String, field: &'static str },

    #[error("Class `{class}`: field `{field}` has invalid numeric value `{value}`")]
    InvalidNumber {
        class: String,
        field: &'static str,
        value: String,
    },

    #[error("Class `{class}`: field `{field}` has an unexpected type")]
    InvalidFieldType { class: String, field: &'static str },

    #[error("Generator `{generator}`: malformed fuel entry: {source}")]
    InvalidFuel {
        generator: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Recipe `{recipe}`: unrecognized event `{event}`")]
    UnknownEvent { recipe: String, event: String },

    #[error("Item producer `{building}` has no entry in the producer output table")]
    MissingProducerOutput { building: String },

    #[error("Item `{item}`: no resource bit masks left")]
    ResourceMasksExhausted { item: String },
}

pub type Result<T> = std::result::Result<T, ConvertError>;
