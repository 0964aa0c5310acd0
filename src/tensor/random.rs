/*
 * @Description  : 测试数据工具：用固定种子生成可复现的随机张量
 */

use rand::SeedableRng;
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;

use super::Tensor;

/// 可复现的测试数据生成器
///
/// 同一个种子、同样的调用序列，得到的张量逐元素相同。
pub struct TestUtils {
    seed: u64,
    rng: StdRng,
}

impl TestUtils {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// `[0, 1)`上均匀分布的随机张量
    pub fn rand(&mut self, shape: &[usize]) -> Tensor<f32> {
        self.rand_range(shape, 0.0, 1.0)
    }

    /// `[low, high)`上均匀分布的随机张量。`low`须小于`high`，否则会panic
    pub fn rand_range(&mut self, shape: &[usize], low: f32, high: f32) -> Tensor<f32> {
        assert!(low < high, "随机区间无效：low={low}须小于high={high}");
        let uniform = Uniform::new(low, high);
        let data = (0..shape.iter().product::<usize>())
            .map(|_| uniform.sample(&mut self.rng))
            .collect::<Vec<_>>();
        Tensor::new(&data, shape)
    }

    /// `[0, high)`上均匀分布的随机整数张量。`high`须为正，否则会panic
    pub fn randint(&mut self, high: i64, shape: &[usize]) -> Tensor<i64> {
        assert!(high > 0, "随机整数上界须>0，实际为{high}");
        let uniform = Uniform::new(0, high);
        let data = (0..shape.iter().product::<usize>())
            .map(|_| uniform.sample(&mut self.rng))
            .collect::<Vec<_>>();
        Tensor::new(&data, shape)
    }

    /// 全1张量（不消耗随机数）
    pub fn ones(&self, shape: &[usize]) -> Tensor<f32> {
        Tensor::ones(shape)
    }
}
