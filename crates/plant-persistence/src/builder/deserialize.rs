use std::collections::{BTreeMap, BTreeSet};

use plant_descriptor::{MODEL_VERSION, ObjectName, PlantModelDescriptor, VisualLayoutDescriptor};
use plant_model::{
    Block, EntityKind, Group, Link, Location, LocationType, ModelLayoutElement, ObjectRef, Path,
    PlantModel, Point, ResourceRef, ShapeLayoutElement, Vehicle, VisualLayout,
};
use tracing::{debug, warn};

use super::{Diagnostic, LoadReport};
use crate::error::{PersistenceError, Result};

/// Replace the contents of `target` with the model described by `tree`.
///
/// A version mismatch is reported before `target` is touched. Any other
/// failure leaves `target` cleared: no entity of a rejected document is
/// ever visible.
pub fn deserialize(tree: &PlantModelDescriptor, target: &mut PlantModel) -> Result<LoadReport> {
    check_version(tree)?;
    target.clear();
    let (model, report) = populate(tree)?;
    *target = model;
    Ok(report)
}

/// Build a fresh model from `tree`.
pub fn build_model(tree: &PlantModelDescriptor) -> Result<(PlantModel, LoadReport)> {
    check_version(tree)?;
    populate(tree)
}

fn check_version(tree: &PlantModelDescriptor) -> Result<()> {
    if tree.version != MODEL_VERSION {
        return Err(PersistenceError::VersionMismatch {
            found: tree.version.clone(),
            supported: MODEL_VERSION,
        });
    }
    Ok(())
}

/// Kinds a block member may reference.
const RESOURCE_KINDS: &[EntityKind] = &[EntityKind::Point, EntityKind::Path];

/// Kinds a group member or a model layout element may reference.
const OBJECT_KINDS: &[EntityKind] = &[
    EntityKind::Point,
    EntityKind::Path,
    EntityKind::Vehicle,
    EntityKind::LocationType,
    EntityKind::Location,
    EntityKind::Block,
    EntityKind::Group,
];

fn populate(tree: &PlantModelDescriptor) -> Result<(PlantModel, LoadReport)> {
    let names = NameTable::register(tree)?;

    let mut model = PlantModel::default();
    model.set_name(tree.name.as_str())?;
    model.set_properties(tree.properties.clone());
    let mut report = LoadReport::default();

    for descriptor in &tree.points {
        let mut point = Point::new(descriptor.name());
        point.set_position(descriptor.position());
        point.set_vehicle_orientation_angle(descriptor.vehicle_orientation_angle())?;
        point.set_point_type(descriptor.point_type());
        point.set_properties(descriptor.properties().clone());
        model.insert(point)?;
    }

    for descriptor in &tree.paths {
        let source = resolve_point(
            &model,
            EntityKind::Path,
            descriptor.name(),
            descriptor.source_point(),
        )?;
        let destination = resolve_point(
            &model,
            EntityKind::Path,
            descriptor.name(),
            descriptor.destination_point(),
        )?;
        let mut path = Path::new(descriptor.name(), source, destination, descriptor.length())?;
        path.set_routing_cost(descriptor.routing_cost());
        path.set_max_velocity(descriptor.max_velocity())?;
        path.set_max_reverse_velocity(descriptor.max_reverse_velocity())?;
        path.set_locked(descriptor.is_locked());
        path.set_properties(descriptor.properties().clone());
        model.insert(path)?;
    }

    for descriptor in &tree.vehicles {
        let mut vehicle = Vehicle::new(descriptor.name());
        vehicle.set_length(descriptor.length())?;
        vehicle.set_energy_levels(descriptor.energy_levels())?;
        vehicle.set_max_velocity(descriptor.max_velocity())?;
        vehicle.set_max_reverse_velocity(descriptor.max_reverse_velocity())?;
        vehicle.set_properties(descriptor.properties().clone());
        model.insert(vehicle)?;
    }

    for descriptor in &tree.location_types {
        let mut location_type = LocationType::new(descriptor.name());
        location_type.set_allowed_operations(descriptor.allowed_operations().clone());
        location_type.set_properties(descriptor.properties().clone());
        model.insert(location_type)?;
    }

    for descriptor in &tree.locations {
        let location_type = model
            .id_of::<LocationType>(descriptor.location_type())
            .ok_or_else(|| PersistenceError::UnresolvedReference {
                kind: EntityKind::Location,
                name: descriptor.name().to_string(),
                target: descriptor.location_type().to_string(),
                expected: "location type",
            })?;
        let mut location = Location::new(descriptor.name(), location_type);
        location.set_position(descriptor.position());
        for link in descriptor.links() {
            let point = resolve_point(&model, EntityKind::Location, descriptor.name(), &link.point)?;
            location.attach_link(
                Link::new(point).with_operations(link.allowed_operations.iter().cloned()),
            );
        }
        location.set_properties(descriptor.properties().clone());
        model.insert(location)?;
    }

    // Blocks and groups are registered before any member is attached, so a
    // group may contain groups listed after it.
    let mut blocks = Vec::with_capacity(tree.blocks.len());
    for descriptor in &tree.blocks {
        let mut block = Block::new(descriptor.name());
        block.set_properties(descriptor.properties().clone());
        blocks.push((model.insert(block)?, descriptor));
    }
    let mut groups = Vec::with_capacity(tree.groups.len());
    for descriptor in &tree.groups {
        let mut group = Group::new(descriptor.name());
        group.set_properties(descriptor.properties().clone());
        groups.push((model.insert(group)?, descriptor));
    }

    for (id, descriptor) in blocks {
        for member in descriptor.members() {
            let resource = names
                .resolve(&model, member, RESOURCE_KINDS)
                .and_then(ResourceRef::from_object)
                .ok_or_else(|| PersistenceError::UnresolvedReference {
                    kind: EntityKind::Block,
                    name: descriptor.name().to_string(),
                    target: member.name().to_string(),
                    expected: "point or path",
                })?;
            model.add_block_member(id, resource)?;
        }
    }
    for (id, descriptor) in groups {
        for member in descriptor.members() {
            let object = names.resolve(&model, member, OBJECT_KINDS).ok_or_else(|| {
                PersistenceError::UnresolvedReference {
                    kind: EntityKind::Group,
                    name: descriptor.name().to_string(),
                    target: member.name().to_string(),
                    expected: "object",
                }
            })?;
            model.add_group_member(id, object)?;
        }
    }

    for descriptor in &tree.visual_layouts {
        populate_layout(&mut model, &names, descriptor, &mut report)?;
    }

    report.summary = model.summary();
    debug!(
        model = %model.name(),
        entities = report.summary.total(),
        dropped = report.diagnostics.len(),
        "Populated plant model"
    );
    Ok((model, report))
}

fn populate_layout(
    model: &mut PlantModel,
    names: &NameTable<'_>,
    descriptor: &VisualLayoutDescriptor,
    report: &mut LoadReport,
) -> Result<()> {
    let mut layout = VisualLayout::new(descriptor.name());
    layout.set_scale(descriptor.scale_x(), descriptor.scale_y());
    layout.set_properties(descriptor.properties().clone());
    for shape in descriptor.shape_elements() {
        let mut element = ShapeLayoutElement::new(shape.name(), shape.layer());
        element.properties = shape.properties().clone();
        layout.add_shape_element(element)?;
    }
    let id = model.insert(layout)?;

    for element in descriptor.model_elements() {
        let Some(object) = names.resolve(model, element.visualized_object(), OBJECT_KINDS) else {
            let diagnostic = Diagnostic {
                layout: descriptor.name().to_string(),
                element: element.name().to_string(),
                missing_object: element.visualized_object().name().to_string(),
            };
            warn!(%diagnostic, "Dropping layout element");
            report.diagnostics.push(diagnostic);
            continue;
        };
        let mut live = ModelLayoutElement::new(element.name(), element.layer(), object);
        live.properties = element.properties().clone();
        model.add_model_layout_element(id, live)?;
    }
    Ok(())
}

fn resolve_point(
    model: &PlantModel,
    kind: EntityKind,
    name: &str,
    point: &str,
) -> Result<plant_model::PointId> {
    model
        .id_of::<Point>(point)
        .ok_or_else(|| PersistenceError::UnresolvedReference {
            kind,
            name: name.to_string(),
            target: point.to_string(),
            expected: "point",
        })
}

/// Every name of a document, per kind. Registering fails on the first
/// duplicate, before any entity is instantiated. References pick their kind
/// from this table and their id from the model under construction.
struct NameTable<'a> {
    names: BTreeMap<EntityKind, BTreeSet<&'a str>>,
}

impl<'a> NameTable<'a> {
    fn register(tree: &'a PlantModelDescriptor) -> Result<Self> {
        let mut table = Self {
            names: BTreeMap::new(),
        };
        table.add_all(EntityKind::Point, tree.points.iter().map(|d| d.name()))?;
        table.add_all(EntityKind::Path, tree.paths.iter().map(|d| d.name()))?;
        table.add_all(EntityKind::Vehicle, tree.vehicles.iter().map(|d| d.name()))?;
        table.add_all(
            EntityKind::LocationType,
            tree.location_types.iter().map(|d| d.name()),
        )?;
        table.add_all(EntityKind::Location, tree.locations.iter().map(|d| d.name()))?;
        table.add_all(EntityKind::Block, tree.blocks.iter().map(|d| d.name()))?;
        table.add_all(EntityKind::Group, tree.groups.iter().map(|d| d.name()))?;
        table.add_all(
            EntityKind::VisualLayout,
            tree.visual_layouts.iter().map(|d| d.name()),
        )?;
        Ok(table)
    }

    /// Kind a reference names: its own kind when it carries one, otherwise
    /// the first of `candidates` declaring the name.
    fn kind_of(&self, reference: &ObjectName, candidates: &[EntityKind]) -> Option<EntityKind> {
        let declares = |kind: &EntityKind| {
            self.names
                .get(kind)
                .is_some_and(|names| names.contains(reference.name()))
        };
        match reference.kind() {
            Some(kind) => Some(kind).filter(|kind| candidates.contains(kind) && declares(kind)),
            None => candidates.iter().copied().find(|kind| declares(kind)),
        }
    }

    fn resolve(
        &self,
        model: &PlantModel,
        reference: &ObjectName,
        candidates: &[EntityKind],
    ) -> Option<ObjectRef> {
        let kind = self.kind_of(reference, candidates)?;
        model.find_object_of(kind, reference.name())
    }

    fn add_all(&mut self, kind: EntityKind, names: impl Iterator<Item = &'a str>) -> Result<()> {
        let registered = self.names.entry(kind).or_default();
        for name in names {
            if !registered.insert(name) {
                return Err(PersistenceError::DuplicateName {
                    kind,
                    name: name.to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plant_descriptor::{
        BlockDescriptor, GroupDescriptor, LocationDescriptor, LocationTypeDescriptor,
        PointDescriptor,
    };

    #[test]
    fn groups_may_contain_later_groups() {
        let mut tree = PlantModelDescriptor::new("Plant1");
        tree.groups
            .push(GroupDescriptor::builder("A").member("B").build().unwrap());
        tree.groups.push(GroupDescriptor::builder("B").build().unwrap());
        let (model, report) = build_model(&tree).unwrap();
        assert!(report.is_clean());
        let a = model.by_name::<Group>("A").unwrap();
        assert_eq!(a.members().len(), 1);
    }

    #[test]
    fn duplicate_is_found_before_population() {
        let mut tree = PlantModelDescriptor::new("Plant1");
        tree.points.push(PointDescriptor::new("P1").unwrap());
        tree.points.push(PointDescriptor::new("P1").unwrap());
        assert!(matches!(
            NameTable::register(&tree),
            Err(PersistenceError::DuplicateName {
                kind: EntityKind::Point,
                ..
            })
        ));
    }

    fn shared_name_tree() -> PlantModelDescriptor {
        let mut tree = PlantModelDescriptor::new("Plant1");
        tree.points.push(PointDescriptor::new("X").unwrap());
        tree.location_types
            .push(LocationTypeDescriptor::builder("LType-1").build().unwrap());
        tree.locations
            .push(LocationDescriptor::builder("X", "LType-1").build().unwrap());
        tree
    }

    #[test]
    fn typed_reference_picks_its_kind() {
        let tree = shared_name_tree();
        let names = NameTable::register(&tree).unwrap();
        let location = ObjectName::typed("X", EntityKind::Location);
        assert_eq!(
            names.kind_of(&location, OBJECT_KINDS),
            Some(EntityKind::Location)
        );
        assert_eq!(
            names.kind_of(&ObjectName::new("X"), OBJECT_KINDS),
            Some(EntityKind::Point)
        );
        assert_eq!(names.kind_of(&location, RESOURCE_KINDS), None);
        assert_eq!(
            names.kind_of(&ObjectName::typed("X", EntityKind::Vehicle), OBJECT_KINDS),
            None
        );
    }

    #[test]
    fn group_member_keeps_its_kind() {
        let mut tree = shared_name_tree();
        tree.groups.push(
            GroupDescriptor::builder("G")
                .member(ObjectName::typed("X", EntityKind::Location))
                .build()
                .unwrap(),
        );
        let (model, _) = build_model(&tree).unwrap();
        let group = model.by_name::<Group>("G").unwrap();
        let kinds: Vec<_> = group.members().iter().map(|m| m.kind()).collect();
        assert_eq!(kinds, [EntityKind::Location]);
    }

    #[test]
    fn block_rejects_a_member_of_another_kind() {
        let mut tree = shared_name_tree();
        tree.blocks.push(
            BlockDescriptor::builder("B")
                .member(ObjectName::typed("X", EntityKind::Location))
                .build()
                .unwrap(),
        );
        assert!(matches!(
            build_model(&tree),
            Err(PersistenceError::UnresolvedReference {
                kind: EntityKind::Block,
                expected: "point or path",
                ..
            })
        ));
    }
}
