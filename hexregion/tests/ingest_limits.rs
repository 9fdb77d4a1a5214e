use hexregion::json::{cells_from_value, polygon_from_value};
use hexregion::{GeoPoint, Grid, GridError};
use serde_json::json;

#[test]
fn json_caps_exceeded_holes() {
    let too_many = 100_001usize;
    let holes: Vec<_> = (0..too_many).map(|_| json!([])).collect();
    let v = json!({"outer": [[0.0, 0.0], [0.0, 1.0], [1.0, 1.0]], "holes": holes});
    let err = polygon_from_value(v).unwrap_err();
    assert!(matches!(err, GridError::Argument(_)), "expected failure on holes cap");
}

#[test]
fn json_mixed_element_kinds() {
    let v = json!(["8928308280fffff", {"cell": "8928308280fffff"}]);
    let err = cells_from_value(&v).unwrap_err();
    assert!(err.message().contains("cells[1]"));
}

#[test]
fn json_polygon_shape_checks() {
    assert!(polygon_from_value(json!({"outer": [["a", 1.0]]})).is_err());
    assert!(polygon_from_value(json!({"outer": [[89.0, 540.0]]})).is_ok());
    assert!(polygon_from_value(json!({"outer": [[0.0, 0.0]], "holes": [[[0.0]]]})).is_err());
}

#[test]
fn json_polygon_latitude_range() {
    for bad in [json!([1.0e308, 0.0]), json!([90.5, 0.0]), json!([-100.0, 10.0])] {
        let v = json!({"outer": [[0.0, 0.0], [0.0, 1.0], bad]});
        let err = polygon_from_value(v).unwrap_err();
        assert!(matches!(err, GridError::Argument(_)));
    }
    let hole = json!({"outer": [[0.0, 0.0], [0.0, 1.0], [1.0, 1.0]], "holes": [[[0.1, 0.1], [95.0, 0.2], [0.2, 0.2]]]});
    assert!(polygon_from_value(hole).is_err());
}

#[test]
fn typed_polygon_latitude_range() {
    let g = Grid::new();
    let poly = hexregion::Polygon::new(
        hexregion::CellBoundary::new(vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 1.0),
            GeoPoint::new(1.0e308, 0.5),
        ]),
        vec![],
    );
    assert!(matches!(g.polygon_to_cells(&poly, 5), Err(GridError::Argument(_))));
    assert!(matches!(g.max_polygon_to_cells_size(&poly, 5), Err(GridError::Argument(_))));
}

#[test]
fn json_polygon_vertex_cap() {
    let ring: Vec<_> = (0..1_000_001).map(|i| json!([0.0, (i % 360) as f64 - 180.0])).collect();
    let err = polygon_from_value(json!({"outer": ring})).unwrap_err();
    assert!(matches!(err, GridError::Argument(_)));
}

#[test]
fn parsed_polygon_feeds_fill() {
    let g = Grid::new();
    let poly = polygon_from_value(json!({
        "outer": [[0.0, 0.0], [0.0, 0.5], [0.5, 0.5], [0.5, 0.0]],
        "holes": []
    }))
    .unwrap();
    let cells = g.polygon_to_cells(&poly, 5).unwrap();
    assert!(!cells.is_empty());
    let bound = g.max_polygon_to_cells_size(&poly, 5).unwrap();
    assert!(cells.len() <= bound);
}

#[test]
fn parsed_cells_feed_extractor() {
    let g = Grid::new();
    let v = json!(["8928308280fffff", 617700169958293503u64]);
    let cells = cells_from_value(&v).unwrap();
    // Duplicates collapse.
    let mp = g.cells_to_multi_polygon(&cells).unwrap();
    assert_eq!(mp.len(), 1);
    assert_eq!(mp.polygons[0].outer.len(), 6);
}
