use crate::tensor::Tensor;

mod avg_pool2d;
mod max_pool2d_backward;

/// 元素依次为 1, 2, 3, ... 的张量
fn arange(shape: &[usize]) -> Tensor {
    let data: Vec<f32> = (1..=shape.iter().product::<usize>())
        .map(|x| x as f32)
        .collect();
    Tensor::new(&data, shape)
}
