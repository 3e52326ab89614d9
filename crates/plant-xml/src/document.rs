//! Element tree to descriptor tree.

use std::fmt::Display;
use std::str::FromStr;

use plant_descriptor::{
    BlockDescriptor, CodecError, GroupDescriptor, LinkDescriptor, LocationDescriptor,
    LocationTypeDescriptor, MODEL_VERSION, ModelLayoutElementDescriptor, ObjectName,
    PathDescriptor, PlantModelDescriptor, PointDescriptor, Result, ShapeLayoutElementDescriptor,
    VehicleDescriptor, VisualLayoutDescriptor,
};
use plant_model::{Properties, Triple};
use tracing::debug;

use crate::{ROOT_ELEMENT, kind_from_element};
use crate::reader::XmlElement;

/// Map the root element onto a descriptor tree. The version attribute is
/// carried through unchecked; a missing one reads as the empty string.
///
/// Documents of any other version than [`MODEL_VERSION`] stop after the root
/// attributes: their entities are never mapped, so they reach the version
/// gate even when this version's bounds would reject them.
pub(crate) fn model_from_element(root: &XmlElement) -> Result<PlantModelDescriptor> {
    if root.name != ROOT_ELEMENT {
        return Err(CodecError::UnexpectedRoot {
            found: root.name.clone(),
            expected: ROOT_ELEMENT,
        });
    }

    let version = root.attribute("version").unwrap_or_default();
    if version != MODEL_VERSION {
        debug!(version, "Foreign model version, entities not read");
        let mut model = PlantModelDescriptor::new(root.attribute("name").unwrap_or_default());
        model.version = version.to_string();
        return Ok(model);
    }

    let mut model = PlantModelDescriptor::new(required(root, "name")?);
    model.version = version.to_string();

    for child in &root.children {
        match child.name.as_str() {
            "point" => model.points.push(point(child)?),
            "path" => model.paths.push(path(child)?),
            "vehicle" => model.vehicles.push(vehicle(child)?),
            "locationType" => model.location_types.push(location_type(child)?),
            "location" => model.locations.push(location(child)?),
            "block" => model.blocks.push(block(child)?),
            "group" => model.groups.push(group(child)?),
            "visualLayout" => model.visual_layouts.push(visual_layout(child)?),
            "property" => {
                let (key, value) = property(child)?;
                model.properties.insert(key, value);
            }
            other => debug!(element = other, "Skipping unknown element"),
        }
    }
    Ok(model)
}

fn point(element: &XmlElement) -> Result<PointDescriptor> {
    let mut builder = PointDescriptor::builder(required(element, "name")?)
        .position(position(element)?)
        .properties(properties(element)?);
    if let Some(angle) = parsed(element, "vehicleOrientationAngle")? {
        builder = builder.vehicle_orientation_angle(angle);
    }
    if let Some(point_type) = parsed(element, "type")? {
        builder = builder.point_type(point_type);
    }
    Ok(builder.build()?)
}

fn path(element: &XmlElement) -> Result<PathDescriptor> {
    let mut builder = PathDescriptor::builder(
        required(element, "name")?,
        required(element, "sourcePoint")?,
        required(element, "destinationPoint")?,
    )
    .properties(properties(element)?);
    if let Some(length) = parsed(element, "length")? {
        builder = builder.length(length);
    }
    if let Some(cost) = parsed(element, "routingCost")? {
        builder = builder.routing_cost(cost);
    }
    if let Some(velocity) = parsed(element, "maxVelocity")? {
        builder = builder.max_velocity(velocity);
    }
    if let Some(velocity) = parsed(element, "maxReverseVelocity")? {
        builder = builder.max_reverse_velocity(velocity);
    }
    if let Some(locked) = parsed(element, "locked")? {
        builder = builder.locked(locked);
    }
    Ok(builder.build()?)
}

fn vehicle(element: &XmlElement) -> Result<VehicleDescriptor> {
    let mut builder =
        VehicleDescriptor::builder(required(element, "name")?).properties(properties(element)?);
    if let Some(length) = parsed(element, "length")? {
        builder = builder.length(length);
    }
    if let Some(level) = parsed(element, "energyLevelCritical")? {
        builder = builder.energy_level_critical(level);
    }
    if let Some(level) = parsed(element, "energyLevelGood")? {
        builder = builder.energy_level_good(level);
    }
    if let Some(level) = parsed(element, "energyLevelFullyRecharged")? {
        builder = builder.energy_level_fully_recharged(level);
    }
    if let Some(level) = parsed(element, "energyLevelSufficientlyRecharged")? {
        builder = builder.energy_level_sufficiently_recharged(level);
    }
    if let Some(velocity) = parsed(element, "maxVelocity")? {
        builder = builder.max_velocity(velocity);
    }
    if let Some(velocity) = parsed(element, "maxReverseVelocity")? {
        builder = builder.max_reverse_velocity(velocity);
    }
    Ok(builder.build()?)
}

fn location_type(element: &XmlElement) -> Result<LocationTypeDescriptor> {
    let mut builder = LocationTypeDescriptor::builder(required(element, "name")?)
        .properties(properties(element)?);
    for operation in operations(element)? {
        builder = builder.allowed_operation(operation);
    }
    Ok(builder.build()?)
}

fn location(element: &XmlElement) -> Result<LocationDescriptor> {
    let mut builder =
        LocationDescriptor::builder(required(element, "name")?, required(element, "type")?)
            .position(position(element)?)
            .properties(properties(element)?);
    for link in element.children_named("link") {
        let descriptor = LinkDescriptor::new(required(link, "point")?)
            .with_operations(operations(link)?);
        builder = builder.link(descriptor);
    }
    Ok(builder.build()?)
}

fn block(element: &XmlElement) -> Result<BlockDescriptor> {
    let mut builder =
        BlockDescriptor::builder(required(element, "name")?).properties(properties(element)?);
    for member in members(element)? {
        builder = builder.member(member);
    }
    Ok(builder.build()?)
}

fn group(element: &XmlElement) -> Result<GroupDescriptor> {
    let mut builder =
        GroupDescriptor::builder(required(element, "name")?).properties(properties(element)?);
    for member in members(element)? {
        builder = builder.member(member);
    }
    Ok(builder.build()?)
}

fn visual_layout(element: &XmlElement) -> Result<VisualLayoutDescriptor> {
    let mut builder = VisualLayoutDescriptor::builder(required(element, "name")?)
        .properties(properties(element)?);
    if let Some(scale_x) = parsed::<f64>(element, "scaleX")? {
        let scale_y = parsed(element, "scaleY")?.unwrap_or(scale_x);
        builder = builder.scale(scale_x, scale_y);
    } else if let Some(scale_y) = parsed::<f64>(element, "scaleY")? {
        builder = builder.scale(plant_model::DEFAULT_SCALE, scale_y);
    }

    for child in element.children_named("shapeLayoutElement") {
        let shape = ShapeLayoutElementDescriptor::new(
            required(child, "name")?,
            parsed(child, "layer")?.unwrap_or_default(),
        )?
        .with_properties(properties(child)?);
        builder = builder.shape_element(shape);
    }
    for child in element.children_named("modelLayoutElement") {
        let object = ModelLayoutElementDescriptor::new(
            required(child, "name")?,
            parsed(child, "layer")?.unwrap_or_default(),
            object_name(child, "visualizedObjectName", "visualizedObjectType")?,
        )?
        .with_properties(properties(child)?);
        builder = builder.model_element(object);
    }
    Ok(builder.build()?)
}

fn position(element: &XmlElement) -> Result<Triple> {
    Ok(Triple::new(
        parsed(element, "xPosition")?.unwrap_or_default(),
        parsed(element, "yPosition")?.unwrap_or_default(),
        parsed(element, "zPosition")?.unwrap_or_default(),
    ))
}

fn properties(element: &XmlElement) -> Result<Properties> {
    element.children_named("property").map(property).collect()
}

fn property(element: &XmlElement) -> Result<(String, String)> {
    Ok((
        required(element, "name")?.to_string(),
        element.attribute("value").unwrap_or_default().to_string(),
    ))
}

fn operations(element: &XmlElement) -> Result<Vec<&str>> {
    element
        .children_named("allowedOperation")
        .map(|child| required(child, "name"))
        .collect()
}

fn members(element: &XmlElement) -> Result<Vec<ObjectName>> {
    element
        .children_named("member")
        .map(|child| object_name(child, "name", "type"))
        .collect()
}

fn object_name(
    element: &XmlElement,
    name: &'static str,
    kind: &'static str,
) -> Result<ObjectName> {
    let object = required(element, name)?;
    let Some(token) = element.attribute(kind) else {
        return Ok(ObjectName::new(object));
    };
    match kind_from_element(token.trim()) {
        Some(kind) => Ok(ObjectName::typed(object, kind)),
        None => Err(CodecError::InvalidAttribute {
            element: element.label(),
            attribute: kind,
            value: token.to_string(),
            reason: "not an entity kind".to_string(),
        }),
    }
}

fn required<'a>(element: &'a XmlElement, attribute: &'static str) -> Result<&'a str> {
    element
        .attribute(attribute)
        .ok_or_else(|| CodecError::MissingAttribute {
            element: element.label(),
            attribute,
        })
}

fn parsed<T>(element: &XmlElement, attribute: &'static str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: Display,
{
    let Some(value) = element.attribute(attribute) else {
        return Ok(None);
    };
    value
        .trim()
        .parse()
        .map(Some)
        .map_err(|error: T::Err| CodecError::InvalidAttribute {
            element: element.label(),
            attribute,
            value: value.to_string(),
            reason: error.to_string(),
        })
}
