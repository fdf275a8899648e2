use simstore::{
    Acyclic, AcyclicRow, BasicDataStore, CyclicRow, DataStore, DataStoreError, DataStoreRead,
    DataStoreWrite, EntityId, Parameter, RunInformation, Timestamp, Value,
};

fn populate(store: &mut impl DataStoreWrite) {
    for timestamp in 0..5 {
        for entity_id in 0..4 {
            store
                .put_cyclic(
                    Timestamp(timestamp * 100),
                    EntityId(entity_id),
                    "Vehicle/Velocity",
                    timestamp as f64,
                )
                .unwrap();
            store
                .put_cyclic(
                    Timestamp(timestamp * 100),
                    EntityId(entity_id),
                    "Vehicle/Lane",
                    entity_id as i32,
                )
                .unwrap();
        }
    }
}

#[test]
fn written_row_is_read_back() {
    let mut store = BasicDataStore::default();
    for (timestamp, entity_id, key, value) in [
        (0, 0, "a", Value::Bool(true)),
        (-5, 7, "a/b", Value::String("x".to_string())),
        (i64::MAX, usize::MAX, "deep/ly/nested/key", Value::DoubleVec(vec![1.0, 2.0])),
    ] {
        store
            .put_cyclic(Timestamp(timestamp), EntityId(entity_id), key, value.clone())
            .unwrap();

        let result = store.get_cyclic(Some(Timestamp(timestamp)), Some(EntityId(entity_id)), key);
        assert_eq!(result.len(), 1);
        assert_eq!(
            result.at(0),
            &CyclicRow::new(Timestamp(timestamp), EntityId(entity_id), key, value)
        );
    }
}

#[test]
fn joint_query_is_intersection_of_single_filters() {
    let mut store = BasicDataStore::default();
    populate(&mut store);

    for timestamp in [0, 100, 400, 500] {
        for entity_id in 0..5 {
            let (timestamp, entity_id) = (Timestamp(timestamp), EntityId(entity_id));
            let joint = store.get_cyclic(Some(timestamp), Some(entity_id), "Vehicle/*");
            let by_time = store.get_cyclic(Some(timestamp), None, "Vehicle/*");
            let by_entity = store.get_cyclic(None, Some(entity_id), "Vehicle/*");

            let expected: Vec<_> = by_time
                .handles()
                .filter(|handle| by_entity.handles().any(|other| other == *handle))
                .collect();
            assert_eq!(joint.handles().collect::<Vec<_>>(), expected);
        }
    }
}

#[test]
fn wildcard_returns_everything_in_insertion_order() {
    let mut store = BasicDataStore::default();
    populate(&mut store);
    store.put_cyclic(Timestamp(0), EntityId(9), "Late", 1).unwrap();

    let result = store.get_cyclic(None, None, "*");
    assert_eq!(result.len(), store.cyclic_len());
    let ordinals: Vec<_> = result.handles().map(|handle| handle.ordinal).collect();
    assert_eq!(ordinals, (0..store.cyclic_len()).collect::<Vec<_>>());
    assert_eq!(result.last().map(|row| row.key.as_str()), Some("Late"));
}

#[test]
fn persistent_statics_survive_clear() {
    let mut store = BasicDataStore::default();
    store.put_static_persistent("p", 1).unwrap();
    store.put_static("np", 0).unwrap();

    store.clear();

    assert_eq!(store.get_static("p"), vec![Value::Int(1)]);
    assert_eq!(store.get_static("np"), Vec::<Value>::new());
}

#[test]
fn first_static_write_wins() {
    let mut store = BasicDataStore::default();
    store.put_static("k", 1).unwrap();
    store.put_static("k", 2).unwrap();

    assert_eq!(store.get_static("k"), vec![Value::Int(1)]);
}

#[test]
fn keys_enumerate_one_level() {
    let mut store = BasicDataStore::default();
    store.put_static("level1b/level2a", 0).unwrap();
    store.put_static("level1b/level2b", 0).unwrap();

    assert_eq!(store.get_keys("Statics/level1b"), vec!["level2a", "level2b"]);
}

#[test]
fn entity_history_in_write_order() {
    let mut store = BasicDataStore::default();
    store.put_cyclic(Timestamp(0), EntityId(1), "intVal", 2).unwrap();
    store.put_cyclic(Timestamp(1), EntityId(1), "intVal", 5).unwrap();
    store.put_cyclic(Timestamp(2), EntityId(1), "intVal", 8).unwrap();

    let values: Vec<_> = store
        .get_cyclic(None, Some(EntityId(1)), "intVal")
        .iter()
        .map(|row| (row.timestamp, row.value.clone()))
        .collect();
    assert_eq!(
        values,
        vec![
            (Timestamp(0), Value::Int(2)),
            (Timestamp(1), Value::Int(5)),
            (Timestamp(2), Value::Int(8))
        ]
    );
}

#[test]
fn acyclic_row_is_read_back() {
    let mut store = BasicDataStore::default();
    let event = Acyclic::new(
        "name",
        [0, 1],
        [2, 3],
        Parameter::from([("param1".to_string(), Value::Int(1))]),
    );
    store
        .put_acyclic(Timestamp(0), EntityId(0), "key1", event.clone())
        .unwrap();

    assert_eq!(
        store.get_acyclic(None, None, "key1").at(0),
        &AcyclicRow::new(Timestamp(0), EntityId(0), "key1", event)
    );
}

#[test]
fn clear_twice_equals_clear_once() {
    let mut store = BasicDataStore::default();
    populate(&mut store);
    store.put_static_persistent("Scenario/Name", "highway").unwrap();
    store
        .put_acyclic(
            Timestamp(0),
            EntityId(0),
            "Collision",
            Acyclic::with_entity("Collision", EntityId(0), Parameter::new()),
        )
        .unwrap();

    store.clear();
    let statistics = store.statistics();
    let keys = store.get_keys("Statics");
    store.clear();

    assert_eq!(store.statistics(), statistics);
    assert_eq!(store.get_keys("Statics"), keys);
    assert!(store.get_cyclic(None, None, "*").is_empty());
    assert!(store.get_acyclic(None, None, "*").is_empty());
}

#[test]
fn empty_results_are_valid() {
    let store = BasicDataStore::default();

    let result = store.get_cyclic(Some(Timestamp(0)), Some(EntityId(0)), "missing");
    assert!(result.is_empty());
    assert_eq!(result.iter().count(), 0);
    assert!(store.get_acyclic(None, None, "*").is_empty());
    assert!(store.get_static("missing").is_empty());
    assert!(store.get_keys("Cyclics").is_empty());
}

#[test]
fn rejected_write_leaves_store_unchanged() {
    let mut store = BasicDataStore::default();
    populate(&mut store);
    let before = store.statistics();

    let error = store
        .put_cyclic(Timestamp(0), EntityId(0), "Vehicle//Velocity", 1.0)
        .unwrap_err();
    assert!(matches!(error, DataStoreError::InvalidKey { ref key, .. } if key == "Vehicle//Velocity"));
    assert_eq!(
        error.to_string(),
        "Error: invalid key 'Vehicle//Velocity': key contains an empty token"
    );
    assert_eq!(store.statistics(), before);
}

#[test]
fn store_is_usable_through_trait_objects() {
    let mut store: Box<dyn DataStore> =
        Box::new(BasicDataStore::new(RunInformation::default().with_run_id(2)));

    store
        .put_cyclic_value(Timestamp(0), EntityId(0), "Velocity", Value::Double(1.5))
        .unwrap();
    store
        .put_static_value("Scenario/Name", Value::from("highway"), true)
        .unwrap();

    let reader: &dyn DataStoreRead = &*store;
    assert_eq!(reader.run_information().run_id, 2);
    assert_eq!(reader.get_cyclic(None, None, "Velocity").len(), 1);
    assert_eq!(reader.get_keys("Statics/Scenario"), vec!["Name"]);
}

#[test]
fn handles_outlive_views_but_not_clear() {
    let mut store = BasicDataStore::default();
    populate(&mut store);

    let handles: Vec<_> = store
        .get_cyclic(Some(Timestamp(200)), None, "Vehicle/Lane")
        .handles()
        .collect();
    store.put_cyclic(Timestamp(600), EntityId(0), "Vehicle/Lane", 1).unwrap();

    let lanes: Vec<_> = handles
        .iter()
        .filter_map(|handle| store.resolve_cyclic(*handle))
        .map(|row| row.value.clone())
        .collect();
    assert_eq!(lanes, (0..4).map(Value::Int).collect::<Vec<_>>());

    store.clear();
    assert!(handles.iter().all(|handle| store.resolve_cyclic(*handle).is_none()));
}

#[test]
fn rows_serialize_for_exporters() {
    let mut store = BasicDataStore::default();
    store.put_cyclic(Timestamp(100), EntityId(3), "Vehicle/Lane", 2).unwrap();

    let json = serde_json::to_value(store.get_cyclic(None, None, "*").at(0)).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "timestamp": 100,
            "entity_id": 3,
            "key": "Vehicle/Lane",
            "value": {"kind": "Int", "value": 2}
        })
    );
}
