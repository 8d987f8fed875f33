//! Integration tests for learning path updates.

use resumark::{Error, LearningPath, ModuleUpdate, ResourceUpdate};

const PATH_JSON: &str = r#"{
    "id": "lp-42",
    "title": "Cloud Engineer",
    "modules": [
        {
            "id": "networking",
            "title": "Networking fundamentals",
            "completed": false,
            "resources": [
                {"id": "osi", "title": "OSI model", "url": "https://example.com/osi", "type": "article", "completed": false},
                {"id": "dns", "title": "DNS deep dive", "type": "video", "completed": true}
            ]
        },
        {
            "id": "k8s",
            "title": "Kubernetes",
            "completed": false,
            "resources": []
        }
    ]
}"#;

fn sample() -> LearningPath {
    serde_json::from_str(PATH_JSON).unwrap()
}

#[test]
fn test_complete_module_updates_progress() {
    let mut path = sample();
    assert_eq!(path.progress(), 0.0);

    path.update_module("networking", ModuleUpdate::completed(true)).unwrap();
    assert!(path.modules[0].completed);
    assert!((path.progress() - 0.5).abs() < f32::EPSILON);

    path.update_module("k8s", ModuleUpdate::completed(true)).unwrap();
    assert_eq!(path.progress(), 1.0);
}

#[test]
fn test_complete_resource() {
    let mut path = sample();
    path.update_resource("networking", "osi", ResourceUpdate::completed(true))
        .unwrap();
    assert!(path.modules[0].resources.iter().all(|r| r.completed));
    // Resource completion does not complete the module
    assert!(!path.modules[0].completed);
}

#[test]
fn test_empty_update_changes_nothing() {
    let mut path = sample();
    let before = path.clone();
    path.update_module("networking", ModuleUpdate::default()).unwrap();
    path.update_resource("networking", "dns", ResourceUpdate::default())
        .unwrap();
    assert_eq!(path, before);
}

#[test]
fn test_unknown_ids() {
    let mut path = sample();
    assert!(matches!(
        path.update_module("nope", ModuleUpdate::completed(true)),
        Err(Error::ModuleNotFound(ref id)) if id == "nope"
    ));
    assert!(matches!(
        path.update_resource("k8s", "osi", ResourceUpdate::completed(true)),
        Err(Error::ResourceNotFound { .. })
    ));
}

#[test]
fn test_update_payload_shape() {
    let json = serde_json::to_string(&ModuleUpdate::completed(true)).unwrap();
    assert_eq!(json, r#"{"completed":true}"#);
    assert_eq!(serde_json::to_string(&ResourceUpdate::default()).unwrap(), "{}");
}

#[test]
fn test_round_trip_keeps_type_field() {
    let json = serde_json::to_string(&sample()).unwrap();
    assert!(json.contains(r#""type":"article""#));
    let back: LearningPath = serde_json::from_str(&json).unwrap();
    assert_eq!(back, sample());
}
