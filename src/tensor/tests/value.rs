use crate::tensor::{ElementType, Tensor, Value};

#[test]
fn test_value_tags() {
    let float: Value = Tensor::new(&[1f32, 2.], &[2]).into();
    assert_eq!(float.dtype(), ElementType::F32);
    assert_eq!(float.shape(), &[2]);
    assert!(float.as_float().is_some());
    assert!(float.as_int().is_none());

    let int: Value = Tensor::new(&[1i64, 2, 3], &[1, 3]).into();
    assert_eq!(int.dtype(), ElementType::I64);
    assert_eq!(int.shape(), &[1, 3]);
    assert!(int.as_float().is_none());
    assert_eq!(int.as_int().map(|t| t.to_vec()), Some(vec![1, 2, 3]));
}

#[test]
fn test_element_type_display() {
    assert_eq!(ElementType::F32.to_string(), "float32");
    assert_eq!(ElementType::I64.to_string(), "int64");
}
