//! XML tree codec for plant model documents.
//!
//! # Document layout
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8"?>
//! <model version="0.0.2" name="Plant1">
//!   <point name="P1" xPosition="0" yPosition="0" zPosition="0"
//!          vehicleOrientationAngle="NaN" type="HALT_POSITION"/>
//!   <path name="P1-P2" sourcePoint="P1" destinationPoint="P2" length="1000" .../>
//!   <vehicle .../>
//!   <locationType name="LType-1"><allowedOperation name="Load"/></locationType>
//!   <location name="L1" ... type="LType-1"><link point="P2"/></location>
//!   <block name="B1"><member name="P1" type="point"/></block>
//!   <group name="G1"><member name="L1" type="location"/></group>
//!   <visualLayout name="VLayout-1" scaleX="50" scaleY="50">
//!     <shapeLayoutElement name="Label-1" layer="0"/>
//!     <modelLayoutElement name="P1" layer="0" visualizedObjectName="P1"
//!                         visualizedObjectType="point"/>
//!   </visualLayout>
//!   <property name="key" value="value"/>
//! </model>
//! ```
//!
//! Every entity element may carry `property` children. The decoder skips
//! elements and attributes it does not know, so documents written under a
//! different version still decode far enough for their version tag to be
//! checked by the caller.
//!
//! Member and visualized object references name the referenced kind with its
//! element name. A reference without a kind is resolved by the caller.

mod document;
mod error;
mod reader;
mod writer;

use plant_descriptor::{PlantModelDescriptor, Result, TreeCodec};
use plant_model::EntityKind;

/// Name of the root element.
pub const ROOT_ELEMENT: &str = "model";

/// Element name of each entity kind, also used to qualify references.
pub fn kind_element(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Point => "point",
        EntityKind::Path => "path",
        EntityKind::Vehicle => "vehicle",
        EntityKind::LocationType => "locationType",
        EntityKind::Location => "location",
        EntityKind::Block => "block",
        EntityKind::Group => "group",
        EntityKind::VisualLayout => "visualLayout",
    }
}

pub fn kind_from_element(element: &str) -> Option<EntityKind> {
    EntityKind::ALL
        .into_iter()
        .find(|&kind| kind_element(kind) == element)
}

/// quick-xml backed [`TreeCodec`].
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlCodec {
    _private: (),
}

impl XmlCodec {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TreeCodec for XmlCodec {
    fn encode(&self, model: &PlantModelDescriptor) -> Result<Vec<u8>> {
        Ok(writer::write_document(model)?)
    }

    fn decode(&self, bytes: &[u8]) -> Result<PlantModelDescriptor> {
        let root = reader::read_tree(bytes)?;
        document::model_from_element(&root)
    }
}
