use std::sync::Arc;

use ndarray::{Array2, array};

use super::{
    AnalysisError, DensityField, DensitySampler, Histogram, LinearFit, pearson, reduce_mean,
    threshold_mask,
};
use crate::annotations::{AnnotationError, AnnotationStore};
use crate::model::{Extent, PixelType, Raster};

fn assert_close(left: f64, right: f64) {
    assert!(
        (left - right).abs() < 1e-9,
        "expected {right}, found {left}"
    );
}

#[test]
fn reduce_all_ones_with_ragged_edges() {
    let grid = Array2::<f64>::ones((10, 10));
    let reduced = reduce_mean(grid.view(), 3).expect("reduce");
    assert_eq!(reduced.dim(), (4, 4));
    assert!(reduced.iter().all(|value| *value == 1.0));
}

#[test]
fn reduce_averages_truncated_blocks() {
    let grid = Array2::from_shape_fn((5, 7), |(row, column)| (row * 7 + column) as f64);
    let reduced = reduce_mean(grid.view(), 2).expect("reduce");
    assert_eq!(reduced.dim(), (3, 4));
    for ((row, column), value) in reduced.indexed_iter() {
        let rows = (row * 2)..((row * 2 + 2).min(5));
        let columns = (column * 2)..((column * 2 + 2).min(7));
        let mut sum = 0.0;
        let mut count = 0.0;
        for r in rows {
            for c in columns.clone() {
                sum += grid[[r, c]];
                count += 1.0;
            }
        }
        assert_close(*value, sum / count);
    }
    // bottom-right block is the single cell (4, 6)
    assert_close(reduced[[2, 3]], 34.0);
}

#[test]
fn oversized_window_yields_global_mean() {
    let grid = array![[1.0_f64, 2.0, 3.0], [4.0, 5.0, 9.0]];
    let reduced = reduce_mean(grid.view(), 10).expect("reduce");
    assert_eq!(reduced.dim(), (1, 1));
    assert_close(reduced[[0, 0]], 4.0);
}

#[test]
fn zero_window_is_rejected() {
    let grid = Array2::<f64>::ones((2, 2));
    assert!(matches!(
        reduce_mean(grid.view(), 0),
        Err(AnalysisError::InvalidParameter(_))
    ));
}

#[test]
fn mask_uses_strict_inequality() {
    let grid = array![[0.5_f64, 1.0], [1.5, 2.0]];
    let mask = threshold_mask(&grid, 1.0);
    assert_eq!(mask, array![[false, false], [true, true]]);
}

#[test]
fn density_counts_neighbours_within_radius() {
    let points = [(10.0, 10.0), (12.0, 10.0), (80.0, 80.0)];
    let extent = Extent {
        width: 91,
        height: 91,
    };
    let field = DensityField::estimate(&points, 5.0, [10, 10], Some(extent)).expect("field");
    assert_eq!(field.values().dim(), (10, 10));
    assert_eq!(field.bounds(), (0.0, 0.0, 90.0, 90.0));
    // node (10, 10) sees both close points, node (80, 80) only one
    assert_close(field.probe(10.0, 10.0), 2.0);
    assert_close(field.probe(80.0, 80.0), 1.0);
    assert_close(field.probe(50.0, 50.0), 0.0);
    assert_close(field.max(), 2.0);
}

#[test]
fn density_probe_interpolates_and_clamps() {
    let points = [(0.0, 0.0)];
    let extent = Extent {
        width: 11,
        height: 11,
    };
    let field = DensityField::estimate(&points, 1.0, [2, 2], Some(extent)).expect("field");
    assert_close(field.probe(0.0, 0.0), 1.0);
    assert_close(field.probe(5.0, 0.0), 0.5);
    assert_close(field.probe(5.0, 5.0), 0.25);
    assert_close(field.probe(-100.0, -100.0), 1.0);
}

#[test]
fn density_without_extent_pads_point_bounds() {
    let points = [(20.0, 30.0), (40.0, 50.0)];
    let field = DensityField::estimate(&points, 10.0, [5, 5], None).expect("field");
    assert_eq!(field.bounds(), (10.0, 20.0, 50.0, 60.0));
}

#[test]
fn density_rejects_bad_parameters() {
    let points = [(1.0, 1.0)];
    assert!(DensityField::estimate(&points, 0.0, [4, 4], None).is_err());
    assert!(DensityField::estimate(&points, -3.0, [4, 4], None).is_err());
    assert!(DensityField::estimate(&points, 2.0, [1, 4], None).is_err());
    assert!(DensityField::estimate(&[], 2.0, [4, 4], None).is_err());
}

#[test]
fn sampler_aligns_density_and_intensity_per_point() {
    let data = Array2::from_shape_fn((100, 100), |(row, column)| (row + column) as f32);
    let raster = Arc::new(Raster::new(data, PixelType::U8).expect("raster"));
    let mut store = AnnotationStore::with_intensity_source(Arc::clone(&raster));
    store.add(10.0, 10.0, None);
    store.add(50.0, 50.0, None);
    store.add(90.0, 90.0, None);

    let sampling = DensitySampler::default()
        .compute(&store, 20.0, Some(raster.extent()))
        .expect("sampling");
    assert_eq!(sampling.len(), 3);
    assert_eq!(sampling.coordinates, vec![(10, 10), (50, 50), (90, 90)]);
    assert!(
        sampling
            .densities
            .iter()
            .all(|value| value.is_finite() && *value >= 0.0)
    );
    assert!(sampling.densities[1] >= sampling.densities[0] - 1e-9);
    assert_eq!(sampling.intensities, vec![20.0, 100.0, 180.0]);
    for ((x, y), density) in sampling.coordinates.iter().zip(&sampling.densities) {
        assert_close(*density, sampling.field.probe(*x as f64, *y as f64));
    }

    let records = sampling.records();
    assert_eq!(records.len(), 3);
    assert_eq!((records[2].x, records[2].y), (90, 90));
    assert_eq!(records[2].intensity, 180.0);
}

#[test]
fn sampler_propagates_empty_set() {
    let store = AnnotationStore::new();
    let error = DensitySampler::default()
        .compute(&store, 20.0, None)
        .expect_err("empty");
    assert!(matches!(
        error,
        AnalysisError::Annotations(AnnotationError::EmptySet)
    ));
}

#[test]
fn sampler_rejects_non_positive_radius() {
    let mut store = AnnotationStore::new();
    store.add(1.0, 1.0, Some(1.0));
    assert!(matches!(
        DensitySampler::default().compute(&store, 0.0, None),
        Err(AnalysisError::InvalidParameter(_))
    ));
}

#[test]
fn correlation_of_linear_data_is_one() {
    let xs = [1.0, 2.0, 3.0, 4.0];
    let ys = [3.0, 5.0, 7.0, 9.0];
    assert_close(pearson(&xs, &ys).expect("pearson"), 1.0);
    let fit = LinearFit::fit(&xs, &ys).expect("fit");
    assert_close(fit.slope, 2.0);
    assert_close(fit.intercept, 1.0);
    assert_close(fit.evaluate(10.0), 21.0);
}

#[test]
fn degenerate_inputs_fail_to_fit() {
    assert!(matches!(
        pearson(&[1.0], &[2.0]),
        Err(AnalysisError::DegenerateFit(_))
    ));
    assert!(matches!(
        pearson(&[2.0, 2.0, 2.0], &[1.0, 2.0, 3.0]),
        Err(AnalysisError::DegenerateFit(_))
    ));
    assert!(matches!(
        pearson(&[1.0, 2.0, 3.0], &[4.0, 4.0, 4.0]),
        Err(AnalysisError::DegenerateFit(_))
    ));
    assert!(LinearFit::fit(&[1.0, 2.0], &[1.0]).is_err());
    assert!(LinearFit::fit(&[1.0, 2.0, 3.0], &[4.0, 4.0, 4.0]).is_ok());
}

#[test]
fn histogram_bins_cover_range() {
    let values = [0.0, 1.0, 2.0, 3.0, 4.0, f64::NAN];
    let histogram = Histogram::new(&values, 4).expect("histogram");
    assert_eq!(histogram.counts, vec![1, 1, 1, 2]);
    assert_eq!(histogram.min, 0.0);
    assert_eq!(histogram.max, 4.0);
    assert_close(histogram.value_at_fraction(0.25), 1.0);
    assert_close(histogram.value_at_fraction(2.0), 4.0);
    assert_eq!(histogram.peak(), 2);
    assert!(Histogram::new(&values, 0).is_err());
}

#[test]
fn histogram_of_constant_values_uses_first_bin() {
    let values = [3.0; 5];
    let histogram = Histogram::new(&values, 3).expect("histogram");
    assert_eq!(histogram.counts, vec![5, 0, 0]);
}
