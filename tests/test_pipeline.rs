//! End-to-end extraction: build a cloud the way a sensor driver would,
//! bind handlers, and hand the arrays to a (pretend) renderer.

use pointattrs_core::{FieldDescriptor, FieldType, PointCloudBlob, Rgb};
use pointattrs_handlers::{
    extract_aligned, AttributeHandler, ColorArray, ColorHandler, GeometryHandler, LayerConfig,
};
use rand::prelude::*;
use rayon::prelude::*;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// `x y z _ rgb _ _ _`: the padded 32-byte XYZRGB layout.
fn xyzrgb_layout() -> PointCloudBlob {
    let fields = vec![
        FieldDescriptor::new("x", 0, FieldType::Float32),
        FieldDescriptor::new("y", 4, FieldType::Float32),
        FieldDescriptor::new("z", 8, FieldType::Float32),
        FieldDescriptor::new("rgb", 16, FieldType::Float32),
    ];
    PointCloudBlob::new(fields, 32).unwrap()
}

/// Random scene with roughly `invalid_ratio` of records carrying a NaN
/// in one coordinate.
fn build_scene(n: usize, invalid_ratio: f64, seed: u64) -> PointCloudBlob {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut blob = xyzrgb_layout();
    for _ in 0..n {
        let mut p = [
            rng.gen_range(-20.0f32..20.0),
            rng.gen_range(-20.0f32..20.0),
            rng.gen_range(-2.0f32..5.0),
        ];
        if rng.gen_bool(invalid_ratio) {
            p[rng.gen_range(0..3)] = f32::NAN;
        }
        let idx = blob
            .push_point(&[("x", p[0]), ("y", p[1]), ("z", p[2])])
            .unwrap();
        blob.set_rgb(idx, Rgb::new(rng.gen(), rng.gen(), rng.gen()))
            .unwrap();
    }
    blob.set_dense(invalid_ratio == 0.0);
    blob
}

#[test]
fn four_record_scenario() {
    init_logging();
    let mut blob = PointCloudBlob::packed(&["x", "y", "z", "rgb"]).unwrap();
    let rows = [
        [0.0, 0.0, 0.0],
        [1.0, 1.0, 1.0],
        [2.0, f32::NAN, 2.0],
        [3.0, 3.0, 3.0],
    ];
    for (i, [x, y, z]) in rows.into_iter().enumerate() {
        let idx = blob
            .push_point(&[("x", x), ("y", y), ("z", z)])
            .unwrap();
        blob.set_rgb(idx, Rgb::new(10 * i as u8, 0, 0)).unwrap();
    }
    blob.set_dense(false);

    let geometry = GeometryHandler::xyz(blob.view()).extract().unwrap();
    assert_eq!(
        geometry.as_flat(),
        &[0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 3.0, 3.0, 3.0]
    );

    // Record 2 has a finite `x` and a finite `rgb`, so the color stream
    // keeps it even though the geometry stream dropped it.
    let colors = ColorHandler::rgb_field(blob.view()).extract().unwrap();
    assert_eq!(
        colors.as_rgb().unwrap(),
        &[[0, 0, 0], [10, 0, 0], [20, 0, 0], [30, 0, 0]]
    );

    let aligned = extract_aligned(
        &GeometryHandler::xyz(blob.view()),
        &ColorHandler::rgb_field(blob.view()),
    )
    .unwrap();
    assert_eq!(aligned.len(), 3);
    assert_eq!(
        aligned.colors.as_rgb().unwrap(),
        &[[0, 0, 0], [10, 0, 0], [30, 0, 0]]
    );
}

#[test]
fn padded_layout_scene() {
    init_logging();
    let blob = build_scene(5_000, 0.1, 7);
    let view = blob.view();

    let expected: Vec<[f32; 3]> = view
        .records()
        .map(|r| {
            [
                pointattrs_core::read_f32(r, 0),
                pointattrs_core::read_f32(r, 4),
                pointattrs_core::read_f32(r, 8),
            ]
        })
        .filter(|p| p.iter().all(|v| v.is_finite()))
        .collect();

    let geometry = GeometryHandler::xyz(view).extract().unwrap();
    assert_eq!(geometry.len(), expected.len());
    assert_eq!(&*geometry, &expected[..]);
    assert!(geometry.len() < blob.len());

    let finite_x = view
        .records()
        .filter(|r| pointattrs_core::read_f32(r, 0).is_finite())
        .count();
    let colors = ColorHandler::rgb_field(view).extract().unwrap();
    assert_eq!(colors.len(), finite_x);
    assert!(colors.len() >= geometry.len());

    let aligned = extract_aligned(
        &GeometryHandler::xyz(view),
        &ColorHandler::rgb_field(view),
    )
    .unwrap();
    assert_eq!(aligned.positions, geometry);
    assert_eq!(aligned.colors.len(), aligned.positions.len());
}

#[test]
fn dense_scene_keeps_every_point() {
    let blob = build_scene(2_000, 0.0, 3);
    let geometry = GeometryHandler::xyz(blob.view()).extract().unwrap();
    assert_eq!(geometry.len(), blob.len());
    for (i, p) in geometry.iter().enumerate() {
        let r = blob.view().record(i);
        assert_eq!(p[0], pointattrs_core::read_f32(r, 0));
        assert_eq!(p[2], pointattrs_core::read_f32(r, 8));
    }
    let colors = ColorHandler::rgb_field(blob.view()).extract().unwrap();
    assert_eq!(colors.len(), blob.len());
}

#[test]
fn organized_cloud_extracts_row_major() {
    let mut blob = PointCloudBlob::packed(&["x", "y", "z"]).unwrap();
    for row in 0..4 {
        for col in 0..3 {
            blob.push_point(&[("x", col as f32), ("y", row as f32), ("z", 1.0)])
                .unwrap();
        }
    }
    blob.reshape(3, 4).unwrap();
    let view = blob.view();
    assert_eq!(view.width(), 3);
    assert_eq!(view.height(), 4);

    let out = GeometryHandler::xyz(view).extract().unwrap();
    assert_eq!(out.len(), 12);
    assert_eq!(out[4], [1.0, 1.0, 1.0]);
    assert_eq!(out[11], [2.0, 3.0, 1.0]);
}

#[test]
fn configured_layer_renders_intensity() {
    init_logging();
    let mut blob = PointCloudBlob::packed(&["x", "y", "z", "intensity"]).unwrap();
    for i in 0..10 {
        let v = i as f32;
        blob.push_point(&[("x", v), ("y", -v), ("z", 0.5), ("intensity", v * 0.1)])
            .unwrap();
    }

    let layer = LayerConfig {
        geometry: Default::default(),
        color: pointattrs_handlers::ColorHandlerConfig::GenericField {
            field: "intensity".into(),
        },
    };
    let (geometry, color) = layer.build(blob.view());
    assert_eq!(geometry.name(), "xyz");
    assert_eq!(color.field_name(), "intensity");

    let positions = geometry.extract().unwrap();
    let scalars = color.extract().unwrap();
    assert_eq!(positions.len(), scalars.len());
    assert!(matches!(scalars, ColorArray::Scalar(ref s) if s.len() == 10));
}

#[test]
fn one_cloud_many_threads() {
    let blob = build_scene(20_000, 0.05, 99);
    let view = blob.view();
    let reference = GeometryHandler::xyz(view).extract().unwrap();

    let results: Vec<(usize, usize, Rgb)> = (0..16)
        .into_par_iter()
        .map(|_| {
            let geometry = GeometryHandler::xyz(view).extract().unwrap();
            let random = ColorHandler::random(view);
            let color = random.color().unwrap();
            let colors = random.extract().unwrap();
            assert!(colors.as_rgb().unwrap().iter().all(|c| *c == color.to_array()));
            (geometry.len(), colors.len(), color)
        })
        .collect();

    for (geometry_len, color_len, _) in &results {
        assert_eq!(*geometry_len, reference.len());
        assert_eq!(*color_len, blob.len());
    }
}

#[test]
fn handlers_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GeometryHandler<'static>>();
    assert_send_sync::<ColorHandler<'static>>();
}
