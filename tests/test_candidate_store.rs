use pokefinder::domain::entities::candidate::CandidateRecord;
use pokefinder::domain::ports::candidate_store::CandidateStore;
use pokefinder::infrastructure::sqlite::candidate_store::SqliteCandidateStore;
use pokefinder::infrastructure::sqlite::migrations::run_migrations;
use rusqlite::Connection;

fn setup() -> SqliteCandidateStore {
    let conn = Connection::open_in_memory().unwrap();
    run_migrations(&conn).unwrap();
    SqliteCandidateStore::new(conn)
}

fn record(name: &str, embedding: Vec<f32>) -> CandidateRecord {
    CandidateRecord {
        name: name.into(),
        description: format!("{name} description"),
        embedding,
    }
}

#[test]
fn test_nearest_orders_by_cosine_distance() {
    let store = setup();
    store
        .upsert(&[
            record("Far", vec![0.0, 1.0, 0.0]),
            record("Closest", vec![1.0, 0.05, 0.0]),
            record("Middle", vec![1.0, 1.0, 0.0]),
            record("Opposite", vec![-1.0, 0.0, 0.0]),
        ])
        .unwrap();

    let names: Vec<String> = store
        .nearest(&[1.0, 0.0, 0.0], 3)
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["Closest", "Middle", "Far"]);
}

#[test]
fn test_nearest_limits_to_k_and_handles_fewer_rows() {
    let store = setup();
    store
        .upsert(&[record("A", vec![1.0, 0.0]), record("B", vec![0.0, 1.0])])
        .unwrap();
    assert_eq!(store.nearest(&[1.0, 0.0], 1).unwrap().len(), 1);
    assert_eq!(store.nearest(&[1.0, 0.0], 3).unwrap().len(), 2);
}

#[test]
fn test_nearest_on_empty_store() {
    let store = setup();
    assert!(store.nearest(&[1.0, 0.0], 3).unwrap().is_empty());
}

#[test]
fn test_nearest_skips_incompatible_vectors() {
    let store = setup();
    store
        .upsert(&[record("Short", vec![1.0, 0.0]), record("Right", vec![1.0, 0.0, 0.0])])
        .unwrap();
    let found = store.nearest(&[1.0, 0.0, 0.0], 3).unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Right");
    assert_eq!(found[0].description, "Right description");
}

#[test]
fn test_upsert_replaces_by_name() {
    let store = setup();
    store.upsert(&[record("Pikachu", vec![1.0, 0.0])]).unwrap();
    store
        .upsert(&[CandidateRecord {
            name: "Pikachu".into(),
            description: "updated".into(),
            embedding: vec![0.0, 1.0],
        }])
        .unwrap();

    assert_eq!(store.count().unwrap(), 1);
    let found = store.nearest(&[0.0, 1.0], 1).unwrap();
    assert_eq!(found[0].description, "updated");
}

#[test]
fn test_stored_dimension() {
    let store = setup();
    assert_eq!(store.stored_dimension().unwrap(), None);
    store.upsert(&[record("A", vec![0.1; 768])]).unwrap();
    assert_eq!(store.stored_dimension().unwrap(), Some(768));
}
