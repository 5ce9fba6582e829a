//! Integration tests: full summation runs against on-disk rasters.
//!
//! Each test builds a small store in a temp directory, runs the driver,
//! and checks the total and (where requested) the output raster.

use raster_store::testdata::{write_raster_f64, write_raster_i32};
use raster_store::{Georef, RasterStore, RowBuf};
use raster_sum::{OutputKind, RowDriver, SumConfig, SumError};

fn temp_store() -> (tempfile::TempDir, RasterStore) {
    let dir = tempfile::tempdir().expect("temp dir");
    let store = RasterStore::open(dir.path());
    (dir, store)
}

fn read_rows(store: &RasterStore, name: &str) -> Vec<RowBuf> {
    let mut reader = store.open_raster(name).expect("open output");
    let mut buf = reader.row_buf();
    let mut rows = Vec::new();
    for row in 0..reader.rows() {
        reader.read_row(row, &mut buf).expect("read output row");
        rows.push(buf.clone());
    }
    rows
}

#[test]
fn test_integer_grid_totals_ten() {
    let (_dir, store) = temp_store();
    write_raster_i32(&store, "grid", 2, 2, &[1, 2, 3, 4], None).unwrap();

    let config = SumConfig::new("grid");
    let outcome = RowDriver::new(&store, &config).run().unwrap();

    assert_eq!(outcome.total, 10.0);
    assert_eq!(outcome.scaled(config.scale), 10.0);
    assert_eq!(outcome.cells_counted, 4);
    assert_eq!((outcome.rows, outcome.cols), (2, 2));
}

#[test]
fn test_scale_doubles_reported_total() {
    let (_dir, store) = temp_store();
    write_raster_i32(&store, "grid", 2, 2, &[1, 2, 3, 4], None).unwrap();

    let mut config = SumConfig::new("grid");
    config.scale = 2.0;
    let outcome = RowDriver::new(&store, &config).run().unwrap();

    // The scan total is unscaled; the scale applies once at reporting.
    assert_eq!(outcome.total, 10.0);
    assert_eq!(outcome.scaled(config.scale), 20.0);
}

#[test]
fn test_nan_cells_excluded_from_total_and_output() {
    let (_dir, store) = temp_store();
    write_raster_f64(&store, "vals", 1, 3, &[1.0, f64::NAN, 3.0], None).unwrap();

    let mut config = SumConfig::new("vals");
    config.output = Some("contrib".to_string());
    let outcome = RowDriver::new(&store, &config).run().unwrap();

    assert_eq!(outcome.total, 4.0);
    assert_eq!(outcome.cells_counted, 2);

    let rows = read_rows(&store, "contrib");
    assert_eq!(rows, vec![RowBuf::Double(vec![1.0, 0.0, 3.0])]);
}

#[test]
fn test_mask_gates_total_and_output() {
    let (_dir, store) = temp_store();
    write_raster_i32(&store, "vals", 1, 2, &[5, 7], None).unwrap();
    write_raster_i32(&store, "zones", 1, 2, &[1, 0], None).unwrap();

    let mut config = SumConfig::new("vals");
    config.mask = Some("zones".to_string());
    config.field = Some(1);
    config.output = Some("picked".to_string());
    let outcome = RowDriver::new(&store, &config).run().unwrap();

    assert_eq!(outcome.total, 5.0);
    assert_eq!(outcome.cells_counted, 1);

    let rows = read_rows(&store, "picked");
    assert_eq!(rows, vec![RowBuf::Double(vec![5.0, 0.0])]);
}

#[test]
fn test_mask_without_field_fails_before_any_io() {
    let (_dir, store) = temp_store();
    write_raster_i32(&store, "vals", 1, 2, &[5, 7], None).unwrap();
    write_raster_i32(&store, "zones", 1, 2, &[1, 0], None).unwrap();

    let mut config = SumConfig::new("vals");
    config.mask = Some("zones".to_string());
    config.output = Some("never".to_string());

    let result = RowDriver::new(&store, &config).run();
    assert!(matches!(result, Err(SumError::Config(_))));
    // Config errors are caught before setup, so no output was created.
    assert!(!store.exists("never"));
}

#[test]
fn test_null_fill_marks_excluded_cells_nan() {
    let (_dir, store) = temp_store();
    write_raster_i32(&store, "vals", 1, 2, &[5, 7], None).unwrap();
    write_raster_i32(&store, "zones", 1, 2, &[1, 0], None).unwrap();

    let mut config = SumConfig::new("vals");
    config.mask = Some("zones".to_string());
    config.field = Some(1);
    config.output = Some("picked".to_string());
    config.null_fill = true;
    let outcome = RowDriver::new(&store, &config).run().unwrap();

    assert_eq!(outcome.total, 5.0);

    let rows = read_rows(&store, "picked");
    assert_eq!(rows[0].get_f64(0), 5.0);
    assert!(rows[0].get_f64(1).is_nan());
}

#[test]
fn test_single_precision_output_kind() {
    let (_dir, store) = temp_store();
    write_raster_i32(&store, "vals", 1, 2, &[3, 4], None).unwrap();

    let mut config = SumConfig::new("vals");
    config.output = Some("narrow".to_string());
    config.output_kind = OutputKind::Single;
    let outcome = RowDriver::new(&store, &config).run().unwrap();

    assert_eq!(outcome.total, 7.0);

    // Integer inputs representable in f32 come through losslessly.
    let rows = read_rows(&store, "narrow");
    assert_eq!(rows, vec![RowBuf::Single(vec![3.0, 4.0])]);
}

#[test]
fn test_area_weight_on_geographic_raster() {
    let (_dir, store) = temp_store();
    let georef = Georef::geographic(50.0, 48.0, 10.0, 12.0);
    write_raster_f64(&store, "ones", 2, 2, &[1.0; 4], Some(georef)).unwrap();

    let mut config = SumConfig::new("ones");
    config.area_weight = true;
    let outcome = RowDriver::new(&store, &config).run().unwrap();

    // Summing a grid of ones weighted by area yields the grid's total
    // ground area.
    let expected: f64 = (0..2)
        .map(|row| georef.cell_area_at_row(row, 2, 2) * 2.0)
        .sum();
    assert!((outcome.total - expected).abs() / expected < 1e-12);
    assert!(outcome.total > 0.0);
}

#[test]
fn test_area_weight_off_matches_unit_area() {
    let (_dir, store) = temp_store();
    let georef = Georef::geographic(50.0, 48.0, 10.0, 12.0);
    write_raster_f64(&store, "vals", 2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], Some(georef))
        .unwrap();

    let config = SumConfig::new("vals");
    let outcome = RowDriver::new(&store, &config).run().unwrap();

    // A georeferenced raster without the flag still sums in plain cell
    // units.
    assert_eq!(outcome.total, 21.0);
}

#[test]
fn test_area_weight_rejects_unmeasurable() {
    let (_dir, store) = temp_store();
    write_raster_f64(&store, "plain", 2, 2, &[1.0; 4], None).unwrap();

    let mut config = SumConfig::new("plain");
    config.area_weight = true;
    let result = RowDriver::new(&store, &config).run();
    assert!(matches!(result, Err(SumError::Config(_))));
}

#[test]
fn test_area_weight_rejects_uniform_cell_size() {
    let (_dir, store) = temp_store();
    let georef = Georef::projected(2000.0, 0.0, 0.0, 2000.0);
    write_raster_f64(&store, "proj", 2, 2, &[1.0; 4], Some(georef)).unwrap();

    let mut config = SumConfig::new("proj");
    config.area_weight = true;
    let result = RowDriver::new(&store, &config).run();
    // Uniform cell size is rejected like unmeasurable cell size.
    assert!(matches!(result, Err(SumError::Config(_))));
}

#[test]
fn test_missing_input_raster_is_fatal() {
    let (_dir, store) = temp_store();
    let config = SumConfig::new("absent");
    let result = RowDriver::new(&store, &config).run();
    assert!(matches!(result, Err(SumError::Store(_))));
}

#[test]
fn test_repeat_runs_are_bit_identical() {
    let (_dir, store) = temp_store();
    let values: Vec<f64> = (0..30).map(|i| (i as f64) * 0.1 - 1.5).collect();
    write_raster_f64(&store, "vals", 5, 6, &values, None).unwrap();

    let config = SumConfig::new("vals");
    let first = RowDriver::new(&store, &config).run().unwrap();
    let second = RowDriver::new(&store, &config).run().unwrap();

    assert_eq!(first.total.to_bits(), second.total.to_bits());
}

#[test]
fn test_output_history_carries_command_line() {
    let (_dir, store) = temp_store();
    write_raster_i32(&store, "vals", 1, 1, &[9], None).unwrap();

    let mut config = SumConfig::new("vals");
    config.output = Some("out".to_string());
    config.command = Some("rsum --input vals --output out".to_string());
    RowDriver::new(&store, &config).run().unwrap();

    let reader = store.open_raster("out").expect("open output");
    assert_eq!(
        reader.header().history,
        vec!["rsum --input vals --output out".to_string()]
    );
}

#[test]
fn test_output_inherits_input_georef() {
    let (_dir, store) = temp_store();
    let georef = Georef::geographic(10.0, 0.0, 0.0, 10.0);
    write_raster_f64(&store, "vals", 2, 2, &[1.0; 4], Some(georef)).unwrap();

    let mut config = SumConfig::new("vals");
    config.output = Some("out".to_string());
    RowDriver::new(&store, &config).run().unwrap();

    let reader = store.open_raster("out").expect("open output");
    assert_eq!(reader.header().georef, Some(georef));
}

#[test]
fn test_mask_and_nan_combine() {
    let (_dir, store) = temp_store();
    // NaN in an included cell, real value in an excluded cell.
    write_raster_f64(&store, "vals", 1, 3, &[f64::NAN, 2.0, 4.0], None).unwrap();
    write_raster_i32(&store, "zones", 1, 3, &[1, 0, 1], None).unwrap();

    let mut config = SumConfig::new("vals");
    config.mask = Some("zones".to_string());
    config.field = Some(1);
    config.output = Some("out".to_string());
    let outcome = RowDriver::new(&store, &config).run().unwrap();

    // Only the included non-NaN cell counts, independent of mask
    // outcome elsewhere.
    assert_eq!(outcome.total, 4.0);
    assert_eq!(outcome.cells_counted, 1);

    let rows = read_rows(&store, "out");
    assert_eq!(rows, vec![RowBuf::Double(vec![0.0, 0.0, 4.0])]);
}
