use std::fs;
use std::path::Path;

use chrono::{TimeZone, Utc};
use plant_descriptor::CodecError;
use plant_model::Path as PlantPath;
use plant_model::{
    Block, EnergyLevels, EntityKind, Group, Link, Location, LocationType, ModelLayoutElement,
    ObjectRef, PlantModel, Point, PointType, ResourceRef, Triple, ValidationError, Vehicle,
    VisualLayout,
};
use plant_persistence::{DurableStore, FixedClock, PersistenceError, serialize};
use plant_xml::XmlCodec;
use tempfile::tempdir;

fn store(home: &Path) -> DurableStore<XmlCodec, FixedClock> {
    let instant = Utc.with_ymd_and_hms(2024, 1, 31, 23, 59, 59).unwrap();
    DurableStore::new(home).with_clock(FixedClock(instant))
}

fn write_snapshot(home: &Path, xml: &str) {
    let data = home.join("data");
    fs::create_dir_all(&data).unwrap();
    fs::write(data.join("model.xml"), xml).unwrap();
}

/// Two points, a path between them, a vehicle, a location linked to P2, a
/// block, a group and a layout.
fn plant1() -> PlantModel {
    let mut model = PlantModel::new("Plant1");
    model.set_property("site", Some("Hall 3".to_string()));

    let mut p1 = Point::new("P1");
    p1.set_vehicle_orientation_angle(0.0).unwrap();
    let p1 = model.insert(p1).unwrap();
    let mut p2 = Point::new("P2");
    p2.set_position(Triple::new(1000, 0, 0));
    p2.set_point_type(PointType::Park);
    p2.set_vehicle_orientation_angle(90.0).unwrap();
    let p2 = model.insert(p2).unwrap();

    let path = model
        .insert(PlantPath::new("P1-P2", p1, p2, 1000).unwrap())
        .unwrap();

    let mut vehicle = Vehicle::new("V1");
    vehicle
        .set_energy_levels(EnergyLevels {
            critical: 15,
            good: 60,
            fully_recharged: 95,
            sufficiently_recharged: 50,
        })
        .unwrap();
    model.insert(vehicle).unwrap();

    let mut location_type = LocationType::new("LType-1");
    location_type.set_allowed_operations(["Load".to_string(), "Unload".to_string()].into());
    let location_type = model.insert(location_type).unwrap();

    let mut location = Location::new("L1", location_type);
    location.set_position(Triple::new(1000, 500, 0));
    location.attach_link(Link::new(p2).with_operations(["Load"]));
    let location = model.insert(location).unwrap();

    let block = model.insert(Block::new("B1")).unwrap();
    model.add_block_member(block, ResourceRef::Point(p1)).unwrap();
    model.add_block_member(block, ResourceRef::Path(path)).unwrap();

    let group = model.insert(Group::new("G1")).unwrap();
    model.add_group_member(group, ObjectRef::Location(location)).unwrap();

    let layout = model.insert(VisualLayout::new("VLayout-1")).unwrap();
    model
        .add_model_layout_element(layout, ModelLayoutElement::new("P1", 0, ObjectRef::Point(p1)))
        .unwrap();
    model
}

fn two_points() -> PlantModel {
    let mut model = PlantModel::new("Existing");
    model.insert(Point::new("A")).unwrap();
    model.insert(Point::new("B")).unwrap();
    model
}

#[test]
fn saved_model_reads_back_equivalent() {
    let dir = tempdir().unwrap();
    let store = store(dir.path());
    let model = plant1();

    store.save_model(&model).unwrap();
    assert!(store.has_saved_model());

    let (loaded, report) = store.read_model_with_report().unwrap();
    assert!(report.is_clean());
    assert_eq!(loaded.summary(), model.summary());
    assert_eq!(serialize(&loaded).unwrap(), serialize(&model).unwrap());
}

#[test]
fn plant1_path_endpoints_are_the_pooled_points() {
    let dir = tempdir().unwrap();
    let store = store(dir.path());
    store.save_model(&plant1()).unwrap();

    let loaded = store.read_model().unwrap();
    let path = loaded.by_name::<PlantPath>("P1-P2").unwrap();
    let source = loaded.get(path.source_point()).unwrap();
    let destination = loaded.get(path.destination_point()).unwrap();
    assert!(std::ptr::eq(source, loaded.by_name::<Point>("P1").unwrap()));
    assert!(std::ptr::eq(destination, loaded.by_name::<Point>("P2").unwrap()));
    assert_eq!(destination.position(), Triple::new(1000, 0, 0));

    let location = loaded.by_name::<Location>("L1").unwrap();
    assert!(location.link_to(path.destination_point()).is_some());
    assert_eq!(loaded.properties().get("site").map(String::as_str), Some("Hall 3"));
}

#[test]
fn plant1_points_and_path_survive_reload_field_for_field() {
    let mut model = PlantModel::new("Plant1");
    let p1 = model.insert(Point::new("P1")).unwrap();
    let mut p2 = Point::new("P2");
    p2.set_position(Triple::new(1000, 0, 0));
    let p2 = model.insert(p2).unwrap();
    model
        .insert(PlantPath::new("P1-P2", p1, p2, 1000).unwrap())
        .unwrap();

    let dir = tempdir().unwrap();
    let store = store(dir.path());
    store.save_model(&model).unwrap();
    let loaded = store.read_model().unwrap();
    assert_eq!(serialize(&loaded).unwrap(), serialize(&model).unwrap());

    for name in ["P1", "P2"] {
        let point = loaded.by_name::<Point>(name).unwrap();
        assert_eq!(Some(point), model.by_name::<Point>(name));
        assert_eq!(point.point_type(), PointType::Halt);
        assert!(point.vehicle_orientation_angle().is_nan());
    }
    assert_eq!(
        loaded.by_name::<Point>("P2").unwrap().position(),
        Triple::new(1000, 0, 0)
    );

    let path = loaded.by_name::<PlantPath>("P1-P2").unwrap();
    assert_eq!(path.length(), 1000);
    assert_eq!(path.routing_cost(), 1);
    assert_eq!(path.max_velocity(), 1000);
    assert!(!path.is_locked());
    assert!(std::ptr::eq(
        loaded.get(path.source_point()).unwrap(),
        loaded.by_name::<Point>("P1").unwrap()
    ));
    assert!(std::ptr::eq(
        loaded.get(path.destination_point()).unwrap(),
        loaded.by_name::<Point>("P2").unwrap()
    ));
}

#[test]
fn member_keeps_its_kind_when_names_are_shared() {
    let mut model = PlantModel::new("Plant1");
    model.insert(Point::new("X")).unwrap();
    let location_type = model.insert(LocationType::new("LType-1")).unwrap();
    let location = model.insert(Location::new("X", location_type)).unwrap();
    let group = model.insert(Group::new("G")).unwrap();
    model.add_group_member(group, ObjectRef::Location(location)).unwrap();
    let layout = model.insert(VisualLayout::new("VLayout-1")).unwrap();
    model
        .add_model_layout_element(
            layout,
            ModelLayoutElement::new("Label-X", 0, ObjectRef::Location(location)),
        )
        .unwrap();

    let dir = tempdir().unwrap();
    let store = store(dir.path());
    store.save_model(&model).unwrap();
    let loaded = store.read_model().unwrap();

    let members: Vec<_> = loaded
        .by_name::<Group>("G")
        .unwrap()
        .members()
        .iter()
        .map(|member| (member.kind(), loaded.object_name(*member)))
        .collect();
    assert_eq!(members, [(EntityKind::Location, Some("X"))]);
    let layout = loaded.by_name::<VisualLayout>("VLayout-1").unwrap();
    assert_eq!(
        layout.model_elements()[0].visualized_object.kind(),
        EntityKind::Location
    );
    assert_eq!(serialize(&loaded).unwrap(), serialize(&model).unwrap());
}

#[test]
fn resaving_unchanged_model_is_byte_identical() {
    let dir = tempdir().unwrap();
    let store = store(dir.path());
    store.save_model(&plant1()).unwrap();
    let first = fs::read(store.snapshot_path()).unwrap();

    let loaded = store.read_model().unwrap();
    store.save_model(&loaded).unwrap();
    let second = fs::read(store.snapshot_path()).unwrap();
    assert_eq!(first, second);

    let backups = store.list_backups().unwrap();
    assert_eq!(backups.len(), 1);
    assert_eq!(Some(backups[0].digest.clone()), store.snapshot_digest().unwrap());
}

#[test]
fn save_backs_up_previous_snapshot() {
    let dir = tempdir().unwrap();
    let store = store(dir.path());

    store.save_model(&PlantModel::new("A")).unwrap();
    let content_a = fs::read(store.snapshot_path()).unwrap();
    store.save_model(&PlantModel::new("B")).unwrap();

    let backups = store.list_backups().unwrap();
    assert_eq!(backups.len(), 1);
    assert_eq!(
        backups[0].path.file_name().unwrap(),
        "model.xml_backup_20240131-235959-000"
    );
    assert_eq!(fs::read(&backups[0].path).unwrap(), content_a);
    assert_eq!(store.read_model().unwrap().name(), "B");
}

#[test]
fn missing_snapshot_reads_as_unnamed_empty_model() {
    let dir = tempdir().unwrap();
    let store = store(dir.path());
    assert!(!store.has_saved_model());
    let model = store.read_model().unwrap();
    assert!(model.is_empty());
    assert_eq!(model.name(), PlantModel::DEFAULT_NAME);
    assert_eq!(store.snapshot_digest().unwrap(), None);
}

#[test]
fn remove_backs_up_then_deletes() {
    let dir = tempdir().unwrap();
    let store = store(dir.path());
    store.remove_model().unwrap();
    assert!(store.list_backups().unwrap().is_empty());

    store.save_model(&plant1()).unwrap();
    store.remove_model().unwrap();
    assert!(!store.has_saved_model());
    assert_eq!(store.list_backups().unwrap().len(), 1);
}

#[test]
fn duplicate_names_fail_and_leave_target_empty() {
    let dir = tempdir().unwrap();
    write_snapshot(
        dir.path(),
        r#"<model version="0.0.2" name="Plant1">
  <point name="P1"/>
  <point name="P1"/>
</model>"#,
    );
    let mut target = two_points();
    let error = store(dir.path()).load_into(&mut target).unwrap_err();
    assert!(matches!(error, PersistenceError::DuplicateName { .. }));
    assert!(error.is_structural());
    assert!(target.is_empty());
}

#[test]
fn dangling_path_endpoint_fails_the_load() {
    let dir = tempdir().unwrap();
    write_snapshot(
        dir.path(),
        r#"<model version="0.0.2" name="Plant1">
  <point name="P1"/>
  <path name="P1-P9" sourcePoint="P1" destinationPoint="P9" length="100"/>
</model>"#,
    );
    let mut target = two_points();
    let error = store(dir.path()).load_into(&mut target).unwrap_err();
    assert!(matches!(
        error,
        PersistenceError::UnresolvedReference { target: ref missing, expected: "point", .. }
            if missing == "P9"
    ));
    assert!(target.is_empty());
}

#[test]
fn dangling_group_member_fails_the_load() {
    let dir = tempdir().unwrap();
    write_snapshot(
        dir.path(),
        r#"<model version="0.0.2" name="Plant1">
  <group name="G1"><member name="Nowhere"/></group>
</model>"#,
    );
    let error = store(dir.path()).read_model().unwrap_err();
    assert!(matches!(error, PersistenceError::UnresolvedReference { .. }));
}

#[test]
fn dangling_layout_element_is_dropped_with_diagnostic() {
    let dir = tempdir().unwrap();
    write_snapshot(
        dir.path(),
        r#"<model version="0.0.2" name="Plant1">
  <point name="P1"/>
  <visualLayout name="VLayout-1" scaleX="50" scaleY="50">
    <modelLayoutElement name="Ghost" layer="0" visualizedObjectName="Nowhere"/>
    <modelLayoutElement name="P1" layer="0" visualizedObjectName="P1"/>
  </visualLayout>
</model>"#,
    );
    let (model, report) = store(dir.path()).read_model_with_report().unwrap();
    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(report.diagnostics[0].element, "Ghost");
    assert_eq!(report.diagnostics[0].missing_object, "Nowhere");

    let layout = model.by_name::<VisualLayout>("VLayout-1").unwrap();
    assert_eq!(layout.model_elements().len(), 1);
    assert_eq!(layout.model_elements()[0].name, "P1");
}

#[test]
fn version_mismatch_leaves_target_untouched() {
    let dir = tempdir().unwrap();
    write_snapshot(
        dir.path(),
        r#"<model version="9.9.9" name="Future">
  <point name="P1"/>
</model>"#,
    );
    let mut target = two_points();
    let error = store(dir.path()).load_into(&mut target).unwrap_err();
    assert!(matches!(
        error,
        PersistenceError::VersionMismatch { ref found, supported: "0.0.2" } if found == "9.9.9"
    ));
    assert_eq!(target.name(), "Existing");
    assert_eq!(target.count::<Point>(), 2);
}

#[test]
fn foreign_version_is_reported_before_entity_bounds() {
    let dir = tempdir().unwrap();
    write_snapshot(
        dir.path(),
        r#"<model version="9.9.9" name="Future">
  <vehicle name="V1" energyLevelCritical="150"/>
</model>"#,
    );
    let mut target = two_points();
    let error = store(dir.path()).load_into(&mut target).unwrap_err();
    assert!(matches!(
        error,
        PersistenceError::VersionMismatch { ref found, .. } if found == "9.9.9"
    ));
    assert_eq!(target.name(), "Existing");
    assert_eq!(target.count::<Point>(), 2);
}

#[test]
fn out_of_range_energy_level_is_a_validation_error() {
    let dir = tempdir().unwrap();
    write_snapshot(
        dir.path(),
        r#"<model version="0.0.2" name="Plant1">
  <vehicle name="V1" energyLevelGood="150"/>
</model>"#,
    );
    let error = store(dir.path()).read_model().unwrap_err();
    assert!(matches!(
        error,
        PersistenceError::Codec {
            source: CodecError::Validation(ValidationError::OutOfRange { value: 150, .. }),
            ..
        }
    ));
}

#[test]
fn zero_path_length_is_a_validation_error() {
    let dir = tempdir().unwrap();
    write_snapshot(
        dir.path(),
        r#"<model version="0.0.2" name="Plant1">
  <point name="P1"/>
  <point name="P2"/>
  <path name="P1-P2" sourcePoint="P1" destinationPoint="P2" length="0"/>
</model>"#,
    );
    let error = store(dir.path()).read_model().unwrap_err();
    assert!(matches!(
        error,
        PersistenceError::Codec {
            source: CodecError::Validation(ValidationError::BelowMinimum { value: 0, .. }),
            ..
        }
    ));
}

#[test]
fn export_writes_a_readable_document() {
    let dir = tempdir().unwrap();
    let store = store(dir.path());
    let target = dir.path().join("export.xml");
    store.write_document(&plant1(), &target).unwrap();

    let tree = store.read_document(&target).unwrap();
    assert_eq!(tree.name, "Plant1");
    assert_eq!(tree.points.len(), 2);
    assert!(!store.has_saved_model());
}
