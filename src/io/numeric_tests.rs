use std::io::{self, Cursor, Read};

use byteorder::{BigEndian, LittleEndian};
use ndarray::{array, Array2};

use crate::io::numeric::NumericReader;

const ROOT: &str = env!("CARGO_MANIFEST_DIR");

#[test]
fn test_io_numeric_reader_f64() {
    let path = format!("{ROOT}/tests/binaries/nine_f64");
    let v = NumericReader::<_, LittleEndian, f64>::from_file(path)
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    let a = Array2::from_shape_vec((3, 3), v).unwrap();
    let a_ref = array![
        [0.0f64, 1.0f64, 2.0f64],
        [3.0f64, 4.0f64, 5.0f64],
        [6.0f64, 7.0f64, 8.0f64],
    ];
    assert_eq!(a, a_ref);
}

#[test]
fn test_io_numeric_reader_f64_big_endian() {
    let path = format!("{ROOT}/tests/binaries/nine_f64_be");
    let v = NumericReader::<_, BigEndian, f64>::from_file(path)
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert_eq!(v, (0..9).map(f64::from).collect::<Vec<_>>());
}

#[test]
fn test_io_numeric_reader_i32() {
    let path = format!("{ROOT}/tests/binaries/fifteen_i32");
    let v = NumericReader::<_, LittleEndian, i32>::from_file(path)
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    let a = Array2::from_shape_vec((3, 5), v).unwrap();
    let a_ref = array![[0, 1, 2, 3, 4], [5, 6, 7, 8, 9], [10, 11, 12, 13, 14],];
    assert_eq!(a, a_ref);
}

#[test]
fn test_io_numeric_reader_in_memory() {
    let bytes = [1.5f64, -2.25f64]
        .iter()
        .flat_map(|x| x.to_le_bytes())
        .collect::<Vec<_>>();
    let v = NumericReader::<_, LittleEndian, f64>::new(Cursor::new(bytes))
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert_eq!(v, vec![1.5, -2.25]);
}

#[test]
fn test_io_numeric_reader_trailing_bytes() {
    let bytes = [1.5f64, -2.25f64]
        .iter()
        .flat_map(|x| x.to_le_bytes())
        .chain([0u8; 3])
        .collect::<Vec<_>>();
    let mut reader = NumericReader::<_, LittleEndian, f64>::new(Cursor::new(bytes));
    assert_eq!(reader.next().unwrap().unwrap(), 1.5);
    assert_eq!(reader.next().unwrap().unwrap(), -2.25);
    let err = reader.next().unwrap().unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    assert!(reader.next().is_none());
}

#[test]
fn test_io_numeric_reader_failed_read() {
    struct FailingRead;

    impl Read for FailingRead {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "device error"))
        }
    }

    let res =
        NumericReader::<_, LittleEndian, f64>::new(FailingRead).collect::<Result<Vec<_>, _>>();
    assert_eq!(res.unwrap_err().kind(), io::ErrorKind::Other);
}

#[test]
fn test_io_numeric_reader_missing_file() {
    let path = format!("{ROOT}/tests/binaries/does_not_exist");
    assert!(NumericReader::<_, LittleEndian, f64>::from_file(path).is_err());
}
