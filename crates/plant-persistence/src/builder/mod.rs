//! Conversion between the live [`plant_model::PlantModel`] and descriptor trees.
//!
//! [`serialize`] walks the pool in name order and turns typed references into
//! current names qualified with their kind. [`deserialize`] does the reverse
//! in two phases: it first registers every name of the document per kind,
//! then populates a staging model, taking each reference's kind from that
//! table and its id from the staging model.

mod deserialize;
mod serialize;

use std::fmt;

use plant_model::ModelSummary;

pub use deserialize::{build_model, deserialize};
pub use serialize::serialize;

/// A reference that was dropped during a load instead of failing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Visual layout holding the dropped element.
    pub layout: String,
    /// Name of the dropped model layout element.
    pub element: String,
    /// Name of the object the element visualized.
    pub missing_object: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "layout element '{}' in visual layout '{}' dropped: unknown object '{}'",
            self.element, self.layout, self.missing_object
        )
    }
}

/// Outcome of a successful load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub summary: ModelSummary,
    pub diagnostics: Vec<Diagnostic>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}
