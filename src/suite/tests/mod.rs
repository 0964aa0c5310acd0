use crate::nn::ModuleDescriptor;
use crate::tensor::{Tensor, TestUtils, Value};


/// 取出第`position`个输出的浮点张量，类型不符时 panic
fn float_output(outputs: &[Value], position: usize) -> &Tensor<f32> {
    outputs[position].as_float().unwrap_or_else(|| {
        panic!("第{position}个输出不是浮点张量：{:?}", outputs[position].dtype())
    })
}

/// 取出第`position`个输出的整数张量，类型不符时 panic
fn int_output(outputs: &[Value], position: usize) -> &Tensor<i64> {
    outputs[position].as_int().unwrap_or_else(|| {
        panic!("第{position}个输出不是整数张量：{:?}", outputs[position].dtype())
    })
}

fn ones_input(tu: &mut TestUtils) -> Vec<Value> {
    vec![tu.ones(&[1, 1, 8, 8]).into()]
}

fn identity_module() -> ModuleDescriptor {
    super::catalog::adaptive_avg_pool2d_module()
}
