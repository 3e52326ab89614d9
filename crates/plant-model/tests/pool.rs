use plant_model::{
    Block, Entity, EntityKind, Group, Link, Location, LocationType, ModelError, ModelLayoutElement,
    ObjectRef, Path, PlantModel, Point, ResourceRef, Triple, VisualLayout,
};

fn two_point_model() -> (PlantModel, plant_model::PointId, plant_model::PointId) {
    let mut model = PlantModel::new("Plant1");
    let p1 = model.insert(Point::new("P1")).expect("insert P1");
    let mut p2 = Point::new("P2");
    p2.set_position(Triple::new(1000, 0, 0));
    let p2 = model.insert(p2).expect("insert P2");
    (model, p1, p2)
}

#[test]
fn duplicate_name_within_kind_is_rejected() {
    let (mut model, _, _) = two_point_model();
    let result = model.insert(Point::new("P1"));
    assert_eq!(
        result,
        Err(ModelError::DuplicateName {
            kind: EntityKind::Point,
            name: "P1".to_string(),
        })
    );
    assert_eq!(model.count::<Point>(), 2);
}

#[test]
fn same_name_in_different_kinds_is_allowed() {
    let (mut model, _, _) = two_point_model();
    model.insert(Block::new("P1")).expect("block named like a point");
    assert_eq!(model.find_object("P1").map(|o| o.kind()), Some(EntityKind::Point));

    let block = model.find_object_of(EntityKind::Block, "P1").unwrap();
    assert_eq!(block.kind(), EntityKind::Block);
    assert_eq!(ResourceRef::from_object(block), None);
    assert!(model.find_object_of(EntityKind::VisualLayout, "P1").is_none());
}

#[test]
fn path_endpoints_resolve_to_pooled_points() {
    let (mut model, p1, p2) = two_point_model();
    let path = model
        .insert(Path::new("P1-P2", p1, p2, 1000).expect("valid path"))
        .expect("insert path");

    let path = model.get(path).expect("path");
    let source = model.get(path.source_point()).expect("source");
    assert!(std::ptr::eq(source, model.by_name::<Point>("P1").expect("P1")));
    assert_eq!(model.get(path.destination_point()).map(|p| p.position().x), Some(1000));
}

#[test]
fn path_with_foreign_point_id_is_rejected() {
    let (mut model, p1, _) = two_point_model();
    let mut other = PlantModel::new("Other");
    other.insert(Point::new("A")).unwrap();
    other.insert(Point::new("B")).unwrap();
    let foreign = other.insert(Point::new("C")).unwrap();

    let result = model.insert(Path::new("bad", p1, foreign, 10).unwrap());
    assert!(matches!(result, Err(ModelError::UnknownId { kind: EntityKind::Point, .. })));
    assert_eq!(model.count::<Path>(), 0);
}

#[test]
fn rename_updates_index_and_keeps_references() {
    let (mut model, p1, p2) = two_point_model();
    let path = model.insert(Path::new("P1-P2", p1, p2, 1000).unwrap()).unwrap();

    model.rename(p1, "Start").expect("rename");
    assert!(model.by_name::<Point>("P1").is_none());
    assert_eq!(model.id_of::<Point>("Start"), Some(p1));

    let source = model.get(path).unwrap().source_point();
    assert_eq!(model.get(source).map(|p| p.name().to_string()), Some("Start".to_string()));
}

#[test]
fn rename_to_taken_name_fails() {
    let (mut model, p1, _) = two_point_model();
    assert!(matches!(
        model.rename(p1, "P2"),
        Err(ModelError::DuplicateName { .. })
    ));
    assert_eq!(model.get(p1).map(|p| p.name().to_string()), Some("P1".to_string()));
}

#[test]
fn iteration_is_ordered_by_name() {
    let mut model = PlantModel::new("Plant1");
    for name in ["P3", "P1", "P2"] {
        model.insert(Point::new(name)).unwrap();
    }
    let names: Vec<&str> = model.iter::<Point>().map(|(_, p)| p.name()).collect();
    assert_eq!(names, vec!["P1", "P2", "P3"]);
}

#[test]
fn members_and_layout_elements_are_checked() {
    let (mut model, p1, p2) = two_point_model();
    let path = model.insert(Path::new("P1-P2", p1, p2, 1000).unwrap()).unwrap();
    let ty = model.insert(LocationType::new("LType-1")).unwrap();
    let mut location = Location::new("L1", ty);
    location.attach_link(Link::new(p2).with_operations(["Load"]));
    let location = model.insert(location).unwrap();

    let block = model.insert(Block::new("B1")).unwrap();
    assert!(model.add_block_member(block, ResourceRef::Path(path)).unwrap());
    assert!(model.add_block_member(block, ResourceRef::Point(p1)).unwrap());

    let group = model.insert(Group::new("G1")).unwrap();
    assert!(model.add_group_member(group, ObjectRef::Location(location)).unwrap());
    assert!(model.add_group_member(group, ObjectRef::Group(group)).unwrap());

    let layout = model.insert(VisualLayout::new("VLayout-1")).unwrap();
    model
        .add_model_layout_element(layout, ModelLayoutElement::new("P1", 0, ObjectRef::Point(p1)))
        .unwrap();
    assert_eq!(model.get(layout).unwrap().model_elements().len(), 1);
    assert_eq!(model.summary().total(), 8);
}

#[test]
fn clear_empties_everything() {
    let (mut model, _, _) = two_point_model();
    model.set_property("owner", Some("ops".to_string()));
    model.clear();
    assert!(model.is_empty());
    assert!(model.properties().is_empty());
    assert_eq!(model.name(), PlantModel::DEFAULT_NAME);
}
