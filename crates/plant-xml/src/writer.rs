//! Descriptor tree to XML.

use std::fmt::Display;
use std::io::Write;

use plant_descriptor::{
    BlockDescriptor, GroupDescriptor, LocationDescriptor, LocationTypeDescriptor, ObjectName,
    PathDescriptor, PlantModelDescriptor, PointDescriptor, VehicleDescriptor,
    VisualLayoutDescriptor,
};
use plant_model::{Properties, Triple};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};

use crate::error::XmlError;
use crate::{ROOT_ELEMENT, kind_element};

type XmlResult<T> = std::result::Result<T, XmlError>;

/// Serialize a descriptor tree. Output depends only on the tree's contents
/// and order.
pub(crate) fn write_document(model: &PlantModelDescriptor) -> XmlResult<Vec<u8>> {
    let mut xml = Writer::new_with_indent(Vec::new(), b' ', 2);

    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut root = BytesStart::new(ROOT_ELEMENT);
    root.push_attribute(("version", model.version.as_str()));
    root.push_attribute(("name", model.name.as_str()));
    xml.write_event(Event::Start(root))?;

    for point in &model.points {
        write_point(&mut xml, point)?;
    }
    for path in &model.paths {
        write_path(&mut xml, path)?;
    }
    for vehicle in &model.vehicles {
        write_vehicle(&mut xml, vehicle)?;
    }
    for location_type in &model.location_types {
        write_location_type(&mut xml, location_type)?;
    }
    for location in &model.locations {
        write_location(&mut xml, location)?;
    }
    for block in &model.blocks {
        write_block(&mut xml, block)?;
    }
    for group in &model.groups {
        write_group(&mut xml, group)?;
    }
    for layout in &model.visual_layouts {
        write_visual_layout(&mut xml, layout)?;
    }
    write_properties(&mut xml, &model.properties)?;

    xml.write_event(Event::End(BytesEnd::new(ROOT_ELEMENT)))?;

    let mut bytes = xml.into_inner();
    bytes.push(b'\n');
    Ok(bytes)
}

fn write_point<W: Write>(xml: &mut Writer<W>, point: &PointDescriptor) -> XmlResult<()> {
    let mut node = BytesStart::new("point");
    node.push_attribute(("name", point.name()));
    push_position(&mut node, point.position());
    push_value(&mut node, "vehicleOrientationAngle", point.vehicle_orientation_angle());
    node.push_attribute(("type", point.point_type().as_str()));
    write_element(xml, node, !point.properties().is_empty(), |xml| {
        write_properties(xml, point.properties())
    })
}

fn write_path<W: Write>(xml: &mut Writer<W>, path: &PathDescriptor) -> XmlResult<()> {
    let mut node = BytesStart::new("path");
    node.push_attribute(("name", path.name()));
    node.push_attribute(("sourcePoint", path.source_point()));
    node.push_attribute(("destinationPoint", path.destination_point()));
    push_value(&mut node, "length", path.length());
    push_value(&mut node, "routingCost", path.routing_cost());
    push_value(&mut node, "maxVelocity", path.max_velocity());
    push_value(&mut node, "maxReverseVelocity", path.max_reverse_velocity());
    push_value(&mut node, "locked", path.is_locked());
    write_element(xml, node, !path.properties().is_empty(), |xml| {
        write_properties(xml, path.properties())
    })
}

fn write_vehicle<W: Write>(xml: &mut Writer<W>, vehicle: &VehicleDescriptor) -> XmlResult<()> {
    let mut node = BytesStart::new("vehicle");
    node.push_attribute(("name", vehicle.name()));
    push_value(&mut node, "length", vehicle.length());
    push_value(&mut node, "energyLevelCritical", vehicle.energy_level_critical());
    push_value(&mut node, "energyLevelGood", vehicle.energy_level_good());
    push_value(
        &mut node,
        "energyLevelFullyRecharged",
        vehicle.energy_level_fully_recharged(),
    );
    push_value(
        &mut node,
        "energyLevelSufficientlyRecharged",
        vehicle.energy_level_sufficiently_recharged(),
    );
    push_value(&mut node, "maxVelocity", vehicle.max_velocity());
    push_value(&mut node, "maxReverseVelocity", vehicle.max_reverse_velocity());
    write_element(xml, node, !vehicle.properties().is_empty(), |xml| {
        write_properties(xml, vehicle.properties())
    })
}

fn write_location_type<W: Write>(
    xml: &mut Writer<W>,
    location_type: &LocationTypeDescriptor,
) -> XmlResult<()> {
    let mut node = BytesStart::new("locationType");
    node.push_attribute(("name", location_type.name()));
    let has_children = !location_type.allowed_operations().is_empty()
        || !location_type.properties().is_empty();
    write_element(xml, node, has_children, |xml| {
        write_operations(xml, location_type.allowed_operations())?;
        write_properties(xml, location_type.properties())
    })
}

fn write_location<W: Write>(xml: &mut Writer<W>, location: &LocationDescriptor) -> XmlResult<()> {
    let mut node = BytesStart::new("location");
    node.push_attribute(("name", location.name()));
    push_position(&mut node, location.position());
    node.push_attribute(("type", location.location_type()));
    let has_children = !location.links().is_empty() || !location.properties().is_empty();
    write_element(xml, node, has_children, |xml| {
        for link in location.links() {
            let mut link_node = BytesStart::new("link");
            link_node.push_attribute(("point", link.point.as_str()));
            write_element(xml, link_node, !link.allowed_operations.is_empty(), |xml| {
                write_operations(xml, &link.allowed_operations)
            })?;
        }
        write_properties(xml, location.properties())
    })
}

fn write_block<W: Write>(xml: &mut Writer<W>, block: &BlockDescriptor) -> XmlResult<()> {
    write_members(xml, "block", block.name(), block.members(), block.properties())
}

fn write_group<W: Write>(xml: &mut Writer<W>, group: &GroupDescriptor) -> XmlResult<()> {
    write_members(xml, "group", group.name(), group.members(), group.properties())
}

fn write_members<'a, W, I>(
    xml: &mut Writer<W>,
    element: &str,
    name: &str,
    members: I,
    properties: &Properties,
) -> XmlResult<()>
where
    W: Write,
    I: IntoIterator<Item = &'a ObjectName> + Clone,
{
    let mut node = BytesStart::new(element);
    node.push_attribute(("name", name));
    let has_children = members.clone().into_iter().next().is_some() || !properties.is_empty();
    write_element(xml, node, has_children, |xml| {
        for member in members {
            let mut member_node = BytesStart::new("member");
            member_node.push_attribute(("name", member.name()));
            if let Some(kind) = member.kind() {
                member_node.push_attribute(("type", kind_element(kind)));
            }
            xml.write_event(Event::Empty(member_node))?;
        }
        write_properties(xml, properties)
    })
}

fn write_visual_layout<W: Write>(
    xml: &mut Writer<W>,
    layout: &VisualLayoutDescriptor,
) -> XmlResult<()> {
    let mut node = BytesStart::new("visualLayout");
    node.push_attribute(("name", layout.name()));
    push_value(&mut node, "scaleX", layout.scale_x());
    push_value(&mut node, "scaleY", layout.scale_y());
    let has_children = !layout.shape_elements().is_empty()
        || !layout.model_elements().is_empty()
        || !layout.properties().is_empty();
    write_element(xml, node, has_children, |xml| {
        for element in layout.shape_elements() {
            let mut element_node = BytesStart::new("shapeLayoutElement");
            element_node.push_attribute(("name", element.name()));
            push_value(&mut element_node, "layer", element.layer());
            write_element(xml, element_node, !element.properties().is_empty(), |xml| {
                write_properties(xml, element.properties())
            })?;
        }
        for element in layout.model_elements() {
            let mut element_node = BytesStart::new("modelLayoutElement");
            element_node.push_attribute(("name", element.name()));
            push_value(&mut element_node, "layer", element.layer());
            let object = element.visualized_object();
            element_node.push_attribute(("visualizedObjectName", object.name()));
            if let Some(kind) = object.kind() {
                element_node.push_attribute(("visualizedObjectType", kind_element(kind)));
            }
            write_element(xml, element_node, !element.properties().is_empty(), |xml| {
                write_properties(xml, element.properties())
            })?;
        }
        write_properties(xml, layout.properties())
    })
}

fn write_operations<'a, W, I>(xml: &mut Writer<W>, operations: I) -> XmlResult<()>
where
    W: Write,
    I: IntoIterator<Item = &'a String>,
{
    for operation in operations {
        let mut node = BytesStart::new("allowedOperation");
        node.push_attribute(("name", operation.as_str()));
        xml.write_event(Event::Empty(node))?;
    }
    Ok(())
}

fn write_properties<W: Write>(xml: &mut Writer<W>, properties: &Properties) -> XmlResult<()> {
    for (key, value) in properties {
        let mut node = BytesStart::new("property");
        node.push_attribute(("name", key.as_str()));
        node.push_attribute(("value", value.as_str()));
        xml.write_event(Event::Empty(node))?;
    }
    Ok(())
}

/// Write `node` as an empty element, or as a start/end pair around `children`.
fn write_element<W, F>(
    xml: &mut Writer<W>,
    node: BytesStart<'_>,
    has_children: bool,
    children: F,
) -> XmlResult<()>
where
    W: Write,
    F: FnOnce(&mut Writer<W>) -> XmlResult<()>,
{
    if !has_children {
        xml.write_event(Event::Empty(node))?;
        return Ok(());
    }
    let end = node.to_end().into_owned();
    xml.write_event(Event::Start(node))?;
    children(xml)?;
    xml.write_event(Event::End(end))?;
    Ok(())
}

fn push_position(node: &mut BytesStart<'_>, position: Triple) {
    push_value(node, "xPosition", position.x);
    push_value(node, "yPosition", position.y);
    push_value(node, "zPosition", position.z);
}

fn push_value(node: &mut BytesStart<'_>, key: &str, value: impl Display) {
    let text = value.to_string();
    node.push_attribute((key, text.as_str()));
}
