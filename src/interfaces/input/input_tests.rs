use std::path::PathBuf;

use crate::basis::ao::BasisShell;
use crate::interfaces::binaries::{ByteOrder, FockPacking, MatrixOrder};
use crate::interfaces::input::ao_basis::{InputBasis, InputBasisShell};
use crate::interfaces::InputHandle;
use crate::io::read_aotrans_yaml;

use super::Input;

const ROOT: &str = env!("CARGO_MANIFEST_DIR");

#[test]
fn test_interfaces_input_spd_pure() {
    let name = format!("{ROOT}/tests/input/test_input_spd_pure.yml");
    let inp = read_aotrans_yaml::<Input, _>(&name).unwrap();

    assert!(inp.basis.pure);
    assert_eq!(
        inp.basis.shells,
        vec![
            InputBasisShell::Label("S".to_string()),
            InputBasisShell::Label("P".to_string()),
            InputBasisShell::Label("D".to_string()),
        ]
    );
    assert_eq!(inp.basis.dimensions().unwrap(), Some((9, 10)));
    assert_eq!(
        inp.basis.to_basis_shells().unwrap(),
        vec![
            BasisShell::new(0, true),
            BasisShell::new(1, true),
            BasisShell::new(2, true),
        ]
    );
    assert_eq!(inp.transformation.trans_mat.as_deref(), Some("C"));
    assert_eq!(inp.transformation.print, 0);
    assert!(inp.transformation.result_save_name.is_none());
    assert!(inp.conversion.is_none());

    assert!(inp.handle().is_ok());
}

#[test]
fn test_interfaces_input_mixed_explicit() {
    let name = format!("{ROOT}/tests/input/test_input_mixed_explicit.yml");
    let inp = read_aotrans_yaml::<Input, _>(&name).unwrap();

    assert!(!inp.basis.pure);
    assert_eq!(inp.basis.dimensions().unwrap(), None);
    assert_eq!(
        inp.basis.to_basis_shells().unwrap(),
        vec![
            BasisShell::new(3, false),
            BasisShell::new(2, false),
            BasisShell::new(1, true),
            BasisShell::new(3, true),
        ]
    );
    assert_eq!(inp.transformation.trans_mat.as_deref(), Some("F"));
    assert_eq!(inp.transformation.print, 2);

    assert!(inp.handle().is_ok());
}

#[test]
fn test_interfaces_input_conversion() {
    let name = format!("{ROOT}/tests/input/test_input_conversion.yml");
    let inp = read_aotrans_yaml::<Input, _>(&name).unwrap();

    assert!(inp.basis.pure);
    assert_eq!(inp.transformation.print, 1);
    let conversion = inp.conversion.as_ref().unwrap();
    assert_eq!(conversion.fock, PathBuf::from("tests/binaries/spd_fock_lt"));
    assert_eq!(
        conversion.coefficients,
        PathBuf::from("tests/binaries/spd_coefficients_cm")
    );
    assert_eq!(conversion.fock_packing, FockPacking::LowerTriangle);
    assert_eq!(conversion.matrix_order, MatrixOrder::ColMajor);
    assert_eq!(conversion.byte_order, ByteOrder::LittleEndian);

    let mut inp_abs = inp.clone();
    if let Some(conversion) = inp_abs.conversion.as_mut() {
        conversion.fock = PathBuf::from(ROOT).join(&conversion.fock);
        conversion.coefficients = PathBuf::from(ROOT).join(&conversion.coefficients);
    }
    assert!(inp_abs.handle().is_ok());
}

#[test]
fn test_interfaces_input_errors() {
    let name = format!("{ROOT}/tests/input/test_input_unsupported.yml");
    let inp = read_aotrans_yaml::<Input, _>(&name).unwrap();
    assert_eq!(inp.basis.to_basis_shells().unwrap()[2], BasisShell::new(4, true));
    assert!(inp.handle().is_err());

    let name = format!("{ROOT}/tests/input/test_input_no_selector.yml");
    let inp = read_aotrans_yaml::<Input, _>(&name).unwrap();
    assert!(inp.transformation.trans_mat.is_none());
    assert!(inp.handle().is_err());

    let name = format!("{ROOT}/tests/input/test_input_no_transformation.yml");
    let inp = read_aotrans_yaml::<Input, _>(&name).unwrap();
    assert!(inp.transformation.trans_mat.is_none());
    assert!(inp.conversion.is_none());
    assert!(inp.handle().is_err());

    let inp = serde_yaml::from_str::<Input>(
        "basis:\n  shells:\n    - S\n    - {l: 4294967295}\n  n_so: 1\n  n_ao: 1\ntransformation:\n  trans_mat: C\n",
    )
    .unwrap();
    assert_eq!(inp.basis.to_basis_shells().unwrap()[1].l, u32::MAX);
    assert!(inp.handle().is_err());
}

#[test]
fn test_interfaces_input_basis_shell_labels() {
    assert_eq!(
        InputBasisShell::Label("f".to_string())
            .to_basis_shell(false)
            .unwrap(),
        BasisShell::new(3, false)
    );
    assert_eq!(
        InputBasisShell::Label(" p ".to_string())
            .to_basis_shell(true)
            .unwrap(),
        BasisShell::new(1, true)
    );
    assert!(InputBasisShell::Label("Q".to_string())
        .to_basis_shell(true)
        .is_err());
    assert_eq!(
        InputBasisShell::Explicit(BasisShell::new(2, false))
            .to_basis_shell(true)
            .unwrap(),
        BasisShell::new(2, false)
    );

    let basis = InputBasis {
        pure: true,
        shells: vec![],
        n_so: Some(3),
        n_ao: None,
    };
    assert!(basis.dimensions().is_err());
}

#[test]
fn test_interfaces_input_default_round_trip() {
    let inp = Input::default();
    let yaml = serde_yaml::to_string(&inp).unwrap();
    let inp_read: Input = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(inp_read.basis, inp.basis);
    assert_eq!(
        inp_read.basis.to_basis_shells().unwrap(),
        vec![
            BasisShell::new(0, true),
            BasisShell::new(0, true),
            BasisShell::new(1, true),
            BasisShell::new(2, false),
        ]
    );
    assert_eq!(inp_read.transformation.trans_mat.as_deref(), Some("C"));
    assert!(inp_read.conversion.is_some());
}
