use ndarray::array;

use crate::io::format::{format_matrix_blocks, nice_bool};

#[test]
fn test_io_format_nice_bool() {
    assert_eq!(nice_bool(true), "yes");
    assert_eq!(nice_bool(false), "no");
}

#[test]
fn test_io_format_matrix_blocks() {
    let mat = array![[1.0, 0.0, -0.5], [0.0, 2.0, 0.25]];
    let lines = format_matrix_blocks(&mat.view(), 2, 3);
    // Two column blocks, each with a header, two rows and a blank separator.
    assert_eq!(lines.len(), 8);
    assert_eq!(lines[0], format!("  {:>10}{:>10}", 0, 1));
    assert_eq!(lines[1], format!("0 {:>10.3e}{:>10.3e}", 1.0, 0.0));
    assert_eq!(lines[4], format!("  {:>10}", 2));
    assert_eq!(lines[5], format!("0 {:>10.3e}", -0.5));
    assert!(lines[7].is_empty());

    let empty = ndarray::Array2::<f64>::zeros((0, 0));
    assert!(format_matrix_blocks(&empty.view(), 8, 3).is_empty());
}
