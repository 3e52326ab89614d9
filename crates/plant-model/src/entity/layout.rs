use crate::entity::{Entity, Properties, apply_property, entity_basics};
use crate::error::{ModelError, Result};
use crate::model::{EntityKind, ObjectRef, PlantModel};

/// Default scale of a new visual layout, in mm per pixel.
pub const DEFAULT_SCALE: f64 = 50.0;

/// A purely graphical element (label, background shape) in a layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeLayoutElement {
    pub name: String,
    pub layer: i32,
    pub properties: Properties,
}

impl ShapeLayoutElement {
    pub fn new(name: impl Into<String>, layer: i32) -> Self {
        Self {
            name: name.into(),
            layer,
            properties: Properties::new(),
        }
    }
}

/// Presentation of a model entity in a layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelLayoutElement {
    pub name: String,
    pub layer: i32,
    pub visualized_object: ObjectRef,
    pub properties: Properties,
}

impl ModelLayoutElement {
    pub fn new(name: impl Into<String>, layer: i32, visualized_object: ObjectRef) -> Self {
        Self {
            name: name.into(),
            layer,
            visualized_object,
            properties: Properties::new(),
        }
    }
}

/// Visual presentation of the plant model.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualLayout {
    name: String,
    scale_x: f64,
    scale_y: f64,
    shape_elements: Vec<ShapeLayoutElement>,
    model_elements: Vec<ModelLayoutElement>,
    properties: Properties,
}

impl VisualLayout {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scale_x: DEFAULT_SCALE,
            scale_y: DEFAULT_SCALE,
            shape_elements: Vec::new(),
            model_elements: Vec::new(),
            properties: Properties::new(),
        }
    }

    pub fn scale_x(&self) -> f64 {
        self.scale_x
    }

    pub fn scale_y(&self) -> f64 {
        self.scale_y
    }

    pub fn shape_elements(&self) -> &[ShapeLayoutElement] {
        &self.shape_elements
    }

    pub fn model_elements(&self) -> &[ModelLayoutElement] {
        &self.model_elements
    }

    pub fn set_scale(&mut self, scale_x: f64, scale_y: f64) {
        self.scale_x = scale_x;
        self.scale_y = scale_y;
    }

    /// True if any element of this layout uses `name`.
    pub fn has_element(&self, name: &str) -> bool {
        self.shape_elements.iter().any(|element| element.name == name)
            || self.model_elements.iter().any(|element| element.name == name)
    }

    pub fn add_shape_element(&mut self, element: ShapeLayoutElement) -> Result<()> {
        self.ensure_free(&element.name)?;
        self.shape_elements.push(element);
        Ok(())
    }

    /// Add a model element. The visualized object is checked when the layout
    /// is inserted into a model, or by [`PlantModel::add_model_layout_element`].
    pub fn add_model_element(&mut self, element: ModelLayoutElement) -> Result<()> {
        self.ensure_free(&element.name)?;
        self.model_elements.push(element);
        Ok(())
    }

    pub fn set_property(&mut self, key: impl Into<String>, value: Option<String>) {
        apply_property(&mut self.properties, key, value);
    }

    pub fn set_properties(&mut self, properties: Properties) {
        self.properties = properties;
    }

    fn ensure_free(&self, name: &str) -> Result<()> {
        if self.has_element(name) {
            return Err(ModelError::DuplicateLayoutElement {
                layout: self.name.clone(),
                name: name.to_string(),
            });
        }
        Ok(())
    }
}

impl Entity for VisualLayout {
    entity_basics!(VisualLayout, EntityKind::VisualLayout, visual_layouts);

    fn check_references(&self, model: &PlantModel) -> Result<()> {
        for element in &self.model_elements {
            let object = element.visualized_object;
            if model.object_name(object).is_none() {
                return Err(ModelError::UnknownId {
                    kind: object.kind(),
                    index: object.index(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_names_unique_across_both_lists() {
        let mut layout = VisualLayout::new("VLayout-1");
        layout
            .add_shape_element(ShapeLayoutElement::new("Label-1", 0))
            .unwrap();
        let duplicate = layout.add_model_element(ModelLayoutElement::new(
            "Label-1",
            0,
            ObjectRef::Point(crate::Id::new(0)),
        ));
        assert!(matches!(
            duplicate,
            Err(ModelError::DuplicateLayoutElement { .. })
        ));
        assert_eq!(layout.model_elements().len(), 0);
    }
}
