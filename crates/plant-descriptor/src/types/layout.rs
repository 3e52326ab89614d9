use plant_model::{DEFAULT_SCALE, Properties, ValidationError, bounds};

use super::{ObjectName, builder_properties, named_descriptor};

type Result<T> = std::result::Result<T, ValidationError>;

/// A graphical element without a model counterpart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeLayoutElementDescriptor {
    name: String,
    layer: i32,
    properties: Properties,
}

named_descriptor!(ShapeLayoutElementDescriptor, "layout element");

impl ShapeLayoutElementDescriptor {
    pub fn new(name: impl Into<String>, layer: i32) -> Result<Self> {
        let name = name.into();
        bounds::name("layout element", &name)?;
        Ok(Self {
            name,
            layer,
            properties: Properties::new(),
        })
    }

    pub fn layer(&self) -> i32 {
        self.layer
    }

    #[must_use]
    pub fn with_layer(&self, layer: i32) -> Self {
        Self {
            layer,
            ..self.clone()
        }
    }
}

/// Presentation of a model entity, referenced by the entity's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelLayoutElementDescriptor {
    name: String,
    layer: i32,
    visualized_object: ObjectName,
    properties: Properties,
}

named_descriptor!(ModelLayoutElementDescriptor, "layout element");

impl ModelLayoutElementDescriptor {
    pub fn new(
        name: impl Into<String>,
        layer: i32,
        visualized_object: impl Into<ObjectName>,
    ) -> Result<Self> {
        let name = name.into();
        let visualized_object = visualized_object.into();
        bounds::name("layout element", &name)?;
        bounds::name("visualized object", visualized_object.name())?;
        Ok(Self {
            name,
            layer,
            visualized_object,
            properties: Properties::new(),
        })
    }

    pub fn layer(&self) -> i32 {
        self.layer
    }

    pub fn visualized_object(&self) -> &ObjectName {
        &self.visualized_object
    }

    #[must_use]
    pub fn with_layer(&self, layer: i32) -> Self {
        Self {
            layer,
            ..self.clone()
        }
    }

    pub fn with_visualized_object(&self, object: impl Into<ObjectName>) -> Result<Self> {
        let visualized_object = object.into();
        bounds::name("visualized object", visualized_object.name())?;
        Ok(Self {
            visualized_object,
            ..self.clone()
        })
    }
}

/// A visual layout with its scale and elements.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualLayoutDescriptor {
    name: String,
    scale_x: f64,
    scale_y: f64,
    shape_elements: Vec<ShapeLayoutElementDescriptor>,
    model_elements: Vec<ModelLayoutElementDescriptor>,
    properties: Properties,
}

named_descriptor!(VisualLayoutDescriptor, "visual layout");

impl VisualLayoutDescriptor {
    pub fn builder(name: impl Into<String>) -> VisualLayoutDescriptorBuilder {
        VisualLayoutDescriptorBuilder {
            name: name.into(),
            scale_x: DEFAULT_SCALE,
            scale_y: DEFAULT_SCALE,
            shape_elements: Vec::new(),
            model_elements: Vec::new(),
            properties: Properties::new(),
        }
    }

    /// Millimetres per pixel along x.
    pub fn scale_x(&self) -> f64 {
        self.scale_x
    }

    /// Millimetres per pixel along y.
    pub fn scale_y(&self) -> f64 {
        self.scale_y
    }

    pub fn shape_elements(&self) -> &[ShapeLayoutElementDescriptor] {
        &self.shape_elements
    }

    pub fn model_elements(&self) -> &[ModelLayoutElementDescriptor] {
        &self.model_elements
    }

    #[must_use]
    pub fn with_scale(&self, scale_x: f64, scale_y: f64) -> Self {
        Self {
            scale_x,
            scale_y,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_shape_elements(&self, elements: Vec<ShapeLayoutElementDescriptor>) -> Self {
        Self {
            shape_elements: elements,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_model_elements(&self, elements: Vec<ModelLayoutElementDescriptor>) -> Self {
        Self {
            model_elements: elements,
            ..self.clone()
        }
    }
}

/// Builder for [`VisualLayoutDescriptor`].
#[derive(Debug, Clone)]
pub struct VisualLayoutDescriptorBuilder {
    name: String,
    scale_x: f64,
    scale_y: f64,
    shape_elements: Vec<ShapeLayoutElementDescriptor>,
    model_elements: Vec<ModelLayoutElementDescriptor>,
    properties: Properties,
}

builder_properties!(VisualLayoutDescriptorBuilder);

impl VisualLayoutDescriptorBuilder {
    #[must_use]
    pub fn scale(mut self, scale_x: f64, scale_y: f64) -> Self {
        self.scale_x = scale_x;
        self.scale_y = scale_y;
        self
    }

    #[must_use]
    pub fn shape_element(mut self, element: ShapeLayoutElementDescriptor) -> Self {
        self.shape_elements.push(element);
        self
    }

    #[must_use]
    pub fn model_element(mut self, element: ModelLayoutElementDescriptor) -> Self {
        self.model_elements.push(element);
        self
    }

    pub fn build(self) -> Result<VisualLayoutDescriptor> {
        bounds::name("visual layout", &self.name)?;
        Ok(VisualLayoutDescriptor {
            name: self.name,
            scale_x: self.scale_x,
            scale_y: self.scale_y,
            shape_elements: self.shape_elements,
            model_elements: self.model_elements,
            properties: self.properties,
        })
    }
}
