use plant_descriptor::{
    BlockDescriptor, GroupDescriptor, LinkDescriptor, LocationDescriptor, LocationTypeDescriptor,
    ModelLayoutElementDescriptor, ObjectName, PathDescriptor, PlantModelDescriptor, PointDescriptor,
    ShapeLayoutElementDescriptor, VehicleDescriptor, VisualLayoutDescriptor,
};
use plant_model::{
    Block, Entity, Group, Id, Location, LocationType, ModelError, ObjectRef, Path, PlantModel,
    Point, Vehicle, VisualLayout,
};

use crate::error::Result;

/// Convert the live model into a descriptor tree.
///
/// Entities, members, links and layout elements come out sorted by their
/// current name, so an unchanged model always yields the same tree.
pub fn serialize(model: &PlantModel) -> Result<PlantModelDescriptor> {
    let mut tree = PlantModelDescriptor::new(model.name());
    tree.properties = model.properties().clone();

    for (_, point) in model.iter::<Point>() {
        tree.points.push(
            PointDescriptor::builder(point.name())
                .position(point.position())
                .vehicle_orientation_angle(point.vehicle_orientation_angle())
                .point_type(point.point_type())
                .properties(point.properties().clone())
                .build()?,
        );
    }

    for (_, path) in model.iter::<Path>() {
        tree.paths.push(
            PathDescriptor::builder(
                path.name(),
                name_of(model, path.source_point())?,
                name_of(model, path.destination_point())?,
            )
            .length(path.length())
            .routing_cost(path.routing_cost())
            .max_velocity(path.max_velocity())
            .max_reverse_velocity(path.max_reverse_velocity())
            .locked(path.is_locked())
            .properties(path.properties().clone())
            .build()?,
        );
    }

    for (_, vehicle) in model.iter::<Vehicle>() {
        let levels = vehicle.energy_levels();
        tree.vehicles.push(
            VehicleDescriptor::builder(vehicle.name())
                .length(vehicle.length())
                .energy_level_critical(levels.critical)
                .energy_level_good(levels.good)
                .energy_level_fully_recharged(levels.fully_recharged)
                .energy_level_sufficiently_recharged(levels.sufficiently_recharged)
                .max_velocity(vehicle.max_velocity())
                .max_reverse_velocity(vehicle.max_reverse_velocity())
                .properties(vehicle.properties().clone())
                .build()?,
        );
    }

    for (_, location_type) in model.iter::<LocationType>() {
        let mut builder = LocationTypeDescriptor::builder(location_type.name())
            .properties(location_type.properties().clone());
        for operation in location_type.allowed_operations() {
            builder = builder.allowed_operation(operation.as_str());
        }
        tree.location_types.push(builder.build()?);
    }

    for (_, location) in model.iter::<Location>() {
        let mut links = location
            .links()
            .iter()
            .map(|link| {
                Ok(LinkDescriptor::new(name_of(model, link.point)?)
                    .with_operations(link.allowed_operations.iter().map(String::as_str)))
            })
            .collect::<Result<Vec<_>>>()?;
        links.sort();

        let mut builder =
            LocationDescriptor::builder(location.name(), name_of(model, location.location_type())?)
                .position(location.position())
                .properties(location.properties().clone());
        for link in links {
            builder = builder.link(link);
        }
        tree.locations.push(builder.build()?);
    }

    for (_, block) in model.iter::<Block>() {
        let mut builder =
            BlockDescriptor::builder(block.name()).properties(block.properties().clone());
        for member in block.members() {
            builder = builder.member(object_name(model, member.as_object())?);
        }
        tree.blocks.push(builder.build()?);
    }

    for (_, group) in model.iter::<Group>() {
        let mut builder =
            GroupDescriptor::builder(group.name()).properties(group.properties().clone());
        for member in group.members() {
            builder = builder.member(object_name(model, *member)?);
        }
        tree.groups.push(builder.build()?);
    }

    for (_, layout) in model.iter::<VisualLayout>() {
        tree.visual_layouts.push(visual_layout(model, layout)?);
    }

    Ok(tree)
}

fn visual_layout(model: &PlantModel, layout: &VisualLayout) -> Result<VisualLayoutDescriptor> {
    let mut builder = VisualLayoutDescriptor::builder(layout.name())
        .scale(layout.scale_x(), layout.scale_y())
        .properties(layout.properties().clone());

    let mut shapes: Vec<_> = layout.shape_elements().iter().collect();
    shapes.sort_by(|a, b| a.name.cmp(&b.name));
    for shape in shapes {
        builder = builder.shape_element(
            ShapeLayoutElementDescriptor::new(shape.name.as_str(), shape.layer)?
                .with_properties(shape.properties.clone()),
        );
    }

    let mut elements: Vec<_> = layout.model_elements().iter().collect();
    elements.sort_by(|a, b| a.name.cmp(&b.name));
    for element in elements {
        // Resolved now: the object may have been renamed since the element was added.
        let object = object_name(model, element.visualized_object)?;
        builder = builder.model_element(
            ModelLayoutElementDescriptor::new(element.name.as_str(), element.layer, object)?
                .with_properties(element.properties.clone()),
        );
    }

    Ok(builder.build()?)
}

fn name_of<T: Entity>(model: &PlantModel, id: Id<T>) -> Result<&str> {
    model.get(id).map(Entity::name).ok_or_else(|| {
        ModelError::UnknownId {
            kind: T::KIND,
            index: id.index(),
        }
        .into()
    })
}

/// The current name of `object`, qualified with its kind.
fn object_name(model: &PlantModel, object: ObjectRef) -> Result<ObjectName> {
    let name = model
        .object_name(object)
        .ok_or_else(|| ModelError::UnknownId {
            kind: object.kind(),
            index: object.index(),
        })?;
    Ok(ObjectName::typed(name, object.kind()))
}
