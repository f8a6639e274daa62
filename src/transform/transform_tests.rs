use approx;
use ndarray::{array, Array2};

use crate::basis::ao::{col_boundary_indices, row_boundary_indices, BasisShell};
use crate::transform::{
    BasisTransformationError, ShellBlockTransformBuilder, TransformMatrices, TransformSelector,
};

fn mixed_shells() -> Vec<BasisShell> {
    vec![
        BasisShell::new(0, true),
        BasisShell::new(1, true),
        BasisShell::new(2, true),
        BasisShell::new(2, false),
        BasisShell::new(3, true),
        BasisShell::new(1, false),
        BasisShell::new(3, false),
        BasisShell::new(0, false),
    ]
}

#[test]
fn test_transform_s_shell() {
    for pure in [true, false] {
        let shells = vec![BasisShell::new(0, pure)];
        let mats = ShellBlockTransformBuilder::new(&shells).build().unwrap();
        assert_eq!(mats.primary, array![[1.0]]);
        assert_eq!(mats.secondary, array![[1.0]]);
    }
}

#[test]
fn test_transform_cartesian_p_shell() {
    let shells = vec![BasisShell::new(1, false)];
    let mats = ShellBlockTransformBuilder::new(&shells).build().unwrap();
    assert_eq!(mats.primary, Array2::<f64>::eye(3));
    assert_eq!(mats.secondary, Array2::<f64>::eye(3));
}

#[test]
fn test_transform_pure_p_shell() {
    let shells = vec![BasisShell::new(1, true)];
    let mats = ShellBlockTransformBuilder::new(&shells).build().unwrap();
    let pmat = array![[0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
    assert_eq!(mats.primary, pmat);
    assert_eq!(mats.secondary, pmat);
}

#[test]
fn test_transform_pure_d_shell() {
    let shells = vec![BasisShell::new(2, true)];
    let mats = ShellBlockTransformBuilder::new(&shells).build().unwrap();
    assert_eq!(mats.dim(), (5, 6));

    // d2c involves only xx and yy.
    let row_2c = mats.primary.row(3);
    for (col, &value) in row_2c.iter().enumerate() {
        if col > 1 {
            assert_eq!(value, 0.0);
        }
    }
    assert!(row_2c[0] > 0.0);
    approx::assert_relative_eq!(row_2c[0], -row_2c[1]);

    // primary / secondary is the normalisation ratio of the row.
    let ratios = [2.0 / 3.0, 1.0, 1.0, 2.0 / 3.0, 1.0];
    for ((row, col), &primary) in mats.primary.indexed_iter() {
        let secondary = mats.secondary[(row, col)];
        if secondary != 0.0 {
            approx::assert_relative_eq!(primary / secondary, ratios[row], epsilon = 1e-14);
        } else {
            assert_eq!(primary, 0.0);
        }
    }
}

#[test]
fn test_transform_cartesian_d_shell() {
    let shells = vec![BasisShell::new(2, false)];
    let mats = ShellBlockTransformBuilder::new(&shells).build().unwrap();
    let sq3 = 3.0f64.sqrt();
    let cmat = array![
        [1.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        [0.0, 0.0, 0.0, sq3, 0.0, 0.0],
        [0.0, 0.0, 0.0, 0.0, sq3, 0.0],
        [0.0, 1.0, 0.0, 0.0, 0.0, 0.0],
        [0.0, 0.0, 0.0, 0.0, 0.0, sq3],
        [0.0, 0.0, 1.0, 0.0, 0.0, 0.0],
    ];
    let fmat = cmat.map(|&x| if x != 0.0 { 1.0 / x } else { 0.0 });
    approx::assert_relative_eq!(
        (&mats.primary - &cmat).map(|x| x * x).sum().sqrt(),
        0.0,
        epsilon = 1e-14
    );
    approx::assert_relative_eq!(
        (&mats.secondary - &fmat).map(|x| x * x).sum().sqrt(),
        0.0,
        epsilon = 1e-14
    );
}

#[test]
fn test_transform_offsets_and_block_diagonality() {
    let shells = mixed_shells();
    let builder = ShellBlockTransformBuilder::new(&shells);
    assert_eq!(builder.n_rows(), 1 + 3 + 5 + 6 + 7 + 3 + 10 + 1);
    assert_eq!(builder.n_cols(), 1 + 3 + 6 + 6 + 10 + 3 + 10 + 1);
    let mats = builder.build().unwrap();
    assert_eq!(mats.dim(), (builder.n_rows(), builder.n_cols()));
    assert_eq!(mats.secondary.dim(), mats.primary.dim());

    let row_bounds = row_boundary_indices(&shells);
    let col_bounds = col_boundary_indices(&shells);
    let shell_of = |bounds: &[(usize, usize)], i: usize| {
        bounds
            .iter()
            .position(|&(start, end)| start <= i && i < end)
            .unwrap()
    };
    for ((row, col), &primary) in mats.primary.indexed_iter() {
        let secondary = mats.secondary[(row, col)];
        if shell_of(&row_bounds, row) != shell_of(&col_bounds, col) {
            assert_eq!(primary, 0.0);
            assert_eq!(secondary, 0.0);
        }
        // C and F share the same zero pattern.
        assert_eq!(primary == 0.0, secondary == 0.0);
    }

    // Every shell block must be identical to that of the shell built on its own.
    for (shell, (&(r0, r1), &(c0, c1))) in shells
        .iter()
        .zip(row_bounds.iter().zip(col_bounds.iter()))
    {
        let single = vec![*shell];
        let single_mats = ShellBlockTransformBuilder::new(&single).build().unwrap();
        assert_eq!(
            mats.primary.slice(ndarray::s![r0..r1, c0..c1]),
            single_mats.primary
        );
        assert_eq!(
            mats.secondary.slice(ndarray::s![r0..r1, c0..c1]),
            single_mats.secondary
        );
    }
}

#[test]
fn test_transform_biorthogonality() {
    let shells = mixed_shells();
    let mats = ShellBlockTransformBuilder::new(&shells).build().unwrap();
    let n = mats.primary.nrows();
    approx::assert_relative_eq!(
        (mats.primary.dot(&mats.secondary.t()) - Array2::<f64>::eye(n))
            .map(|x| x * x)
            .sum()
            .sqrt(),
        0.0,
        epsilon = 1e-12
    );
}

#[test]
fn test_transform_empty() {
    let shells: Vec<BasisShell> = vec![];
    let mats = ShellBlockTransformBuilder::new(&shells).build().unwrap();
    assert_eq!(mats.dim(), (0, 0));
    assert_eq!(mats.secondary.dim(), (0, 0));
}

#[test]
fn test_transform_unsupported_angular_momentum() {
    let shells = vec![
        BasisShell::new(0, true),
        BasisShell::new(4, true),
        BasisShell::new(5, false),
    ];
    assert_eq!(
        ShellBlockTransformBuilder::new(&shells).build(),
        Err(BasisTransformationError::UnsupportedAngularMomentum(4))
    );

    let shells = vec![BasisShell::new(4, false)];
    assert_eq!(
        ShellBlockTransformBuilder::new(&shells).build(),
        Err(BasisTransformationError::UnsupportedAngularMomentum(4))
    );
}

#[test]
fn test_transform_unsupported_angular_momentum_precedes_dimensions() {
    let shells = vec![BasisShell::new(0, true), BasisShell::new(u32::MAX, true)];
    let builder = ShellBlockTransformBuilder::new(&shells);
    let unsupported = Err(BasisTransformationError::UnsupportedAngularMomentum(u32::MAX));
    assert_eq!(builder.check_angular_momenta(), unsupported);
    assert_eq!(builder.check_dimensions(1, 1), unsupported);
    assert_eq!(builder.build_with_dims(1, 1).map(|_| ()), unsupported);
    let mut primary = Array2::<f64>::zeros((1, 1));
    let mut secondary = Array2::<f64>::zeros((1, 1));
    assert_eq!(
        builder.build_into(primary.view_mut(), secondary.view_mut()),
        unsupported
    );

    let shells = vec![BasisShell::new(4, false)];
    let builder = ShellBlockTransformBuilder::new(&shells);
    assert_eq!(
        builder.build_with_dims(1, 1),
        Err(BasisTransformationError::UnsupportedAngularMomentum(4))
    );
    let mut primary = Array2::<f64>::zeros((2, 2));
    let mut secondary = Array2::<f64>::zeros((2, 2));
    assert_eq!(
        builder.build_into(primary.view_mut(), secondary.view_mut()),
        Err(BasisTransformationError::UnsupportedAngularMomentum(4))
    );
}

#[test]
fn test_transform_build_with_dims() {
    let shells = vec![BasisShell::new(1, true), BasisShell::new(2, true)];
    let builder = ShellBlockTransformBuilder::new(&shells);
    assert!(builder.build_with_dims(8, 9).is_ok());
    assert_eq!(
        builder.build_with_dims(9, 9),
        Err(BasisTransformationError::DimensionMismatch {
            expected: (8, 9),
            found: (9, 9)
        })
    );
}

#[test]
fn test_transform_build_into() {
    let shells = vec![BasisShell::new(2, true), BasisShell::new(3, false)];
    let builder = ShellBlockTransformBuilder::new(&shells);
    let reference = builder.build().unwrap();

    let mut primary = Array2::<f64>::zeros((15, 16));
    let mut secondary = Array2::<f64>::zeros((15, 16));
    builder
        .build_into(primary.view_mut(), secondary.view_mut())
        .unwrap();
    assert_eq!(primary, reference.primary);
    assert_eq!(secondary, reference.secondary);

    let mut wrong = Array2::<f64>::zeros((15, 15));
    assert_eq!(
        builder.build_into(primary.view_mut(), wrong.view_mut()),
        Err(BasisTransformationError::DimensionMismatch {
            expected: (15, 16),
            found: (15, 15)
        })
    );

    // Nothing is written when a shell is unsupported.
    let shells = vec![BasisShell::new(1, true), BasisShell::new(4, true)];
    let builder = ShellBlockTransformBuilder::new(&shells);
    let mut primary = Array2::<f64>::zeros((12, 18));
    let mut secondary = Array2::<f64>::zeros((12, 18));
    assert_eq!(
        builder.build_into(primary.view_mut(), secondary.view_mut()),
        Err(BasisTransformationError::UnsupportedAngularMomentum(4))
    );
    assert!(primary.iter().all(|&x| x == 0.0));
    assert!(secondary.iter().all(|&x| x == 0.0));
}

#[test]
fn test_transform_selector() {
    assert_eq!("C".parse::<TransformSelector>(), Ok(TransformSelector::C));
    assert_eq!("F".parse::<TransformSelector>(), Ok(TransformSelector::F));
    assert_eq!(
        "X".parse::<TransformSelector>(),
        Err(BasisTransformationError::InvalidSelector("X".to_string()))
    );
    assert_eq!(
        "".parse::<TransformSelector>(),
        Err(BasisTransformationError::InvalidSelector(String::new()))
    );
    assert!("c".parse::<TransformSelector>().is_err());

    let shells = vec![BasisShell::new(2, true)];
    let mats: TransformMatrices = ShellBlockTransformBuilder::new(&shells).build().unwrap();
    assert_eq!(mats.select_str("C").unwrap(), &mats.primary);
    assert_eq!(mats.select_str("F").unwrap(), &mats.secondary);
    assert_eq!(
        mats.select_str("X"),
        Err(BasisTransformationError::InvalidSelector("X".to_string()))
    );
    assert_eq!(
        mats.select(TransformSelector::C).dim(),
        mats.select(TransformSelector::F).dim()
    );
    let secondary = mats.secondary.clone();
    assert_eq!(mats.into_selected(TransformSelector::F), secondary);
}

#[test]
fn test_transform_error_display() {
    assert_eq!(
        BasisTransformationError::UnsupportedAngularMomentum(4).to_string(),
        "Basis transformation error: angular momentum l = 4 is not supported (maximum l = 3)."
    );
    assert_eq!(
        BasisTransformationError::InvalidSelector("X".to_string()).to_string(),
        "Basis transformation error: invalid matrix selector `X` (expected `C` or `F`)."
    );
    assert_eq!(
        BasisTransformationError::DimensionMismatch {
            expected: (5, 6),
            found: (6, 6)
        }
        .to_string(),
        "Basis transformation error: expected dimensions 5 × 6, but found 6 × 6."
    );
}
