/*
 * @Description  : 池化用例目录
 *
 * 同一算子的静态/动态形状、3D/4D 输入、有无索引输出等变体刻意分开注册，
 * 因为它们在下游编译器中走的是不同的代码路径。
 */

use super::Registry;
use crate::errors::PoolError;
use crate::nn::ModuleDescriptor;
use crate::nn::ShapePattern;
use crate::nn::pool::{
    AdaptiveAvgPool2d, AvgPool2d, AvgPool2dParams, MaxPool2d, MaxPool2dWithIndices,
    MaxPool2dWithIndicesBackward, Pool2dParams,
};
use crate::tensor::ElementType::{F32, I64};

/// 构建全部池化用例
pub fn pooling_cases() -> Result<Registry, PoolError> {
    let mut registry = Registry::new();

    // ==================== 自适应平均池化 ====================
    registry.register("AdaptiveAvgPool2dModule_basic", adaptive_avg_pool2d_module, |tu| {
        vec![tu.rand(&[10, 3, 8, 9]).into()]
    })?;

    // ==================== 最大池化 ====================
    registry.register("MaxPool2dModule_basic", max_pool2d_module, |tu| {
        vec![(tu.rand(&[1, 1, 20, 20]) - 0.5).into()]
    })?;
    registry.register("MaxPool2dStaticModule_basic", max_pool2d_static_module, |tu| {
        vec![tu.rand(&[1, 64, 112, 112]).into()]
    })?;
    registry.register("MaxPool2dWith3dInputModule_basic", max_pool2d_with_3d_input_module, |tu| {
        vec![(tu.rand(&[1, 20, 20]) - 0.5).into()]
    })?;

    // ==================== 带索引的最大池化 ====================
    registry.register("MaxPool2dWithIndicesModule_basic", max_pool2d_with_indices_module, |tu| {
        vec![tu.rand_range(&[1, 1, 8, 8], 0.5, 1.0).into()]
    })?;
    registry.register(
        "MaxPool2dWithIndicesFullSizeKernelModule_basic",
        max_pool2d_with_indices_full_size_kernel_module,
        |tu| vec![tu.rand_range(&[2, 3, 4, 4], 0.5, 1.0).into()],
    )?;
    registry.register(
        "MaxPool2dWithIndicesNonDefaultPaddingModule_basic",
        max_pool2d_with_indices_non_default_padding_module,
        |tu| vec![tu.rand_range(&[2, 4, 16, 16], -1.5, 1.0).into()],
    )?;
    registry.register(
        "MaxPool2dWithIndicesNonDefaultStrideModule_basic",
        max_pool2d_with_indices_non_default_stride_module,
        |tu| vec![tu.rand_range(&[1, 4, 16, 80], 0.5, 2.0).into()],
    )?;
    registry.register(
        "MaxPool2dWithIndicesNonDefaultDilationModule_basic",
        max_pool2d_with_indices_non_default_dilation_module,
        |tu| vec![tu.rand_range(&[1, 4, 16, 80], 0.5, 2.0).into()],
    )?;
    registry.register(
        "MaxPool2dWithIndicesNonDefaultParamsModule_basic",
        max_pool2d_with_indices_non_default_params_module,
        |tu| vec![tu.rand_range(&[1, 4, 16, 80], -0.5, 4.0).into()],
    )?;
    registry.register(
        "MaxPool2dWithIndicesAllNegativeValuesModule_basic",
        max_pool2d_with_indices_all_negative_values_module,
        |tu| vec![tu.rand_range(&[2, 4, 16, 16], -4.5, -1.0).into()],
    )?;
    registry.register(
        "MaxPool2dWithIndicesStaticModule_basic",
        max_pool2d_with_indices_static_module,
        |tu| vec![tu.rand_range(&[2, 4, 16, 16], -4.5, -1.0).into()],
    )?;
    registry.register(
        "MaxPool2dWithIndicesAllOnesModule_basic",
        max_pool2d_with_indices_all_ones_module,
        |tu| vec![tu.ones(&[1, 1, 8, 8]).into()],
    )?;
    registry.register(
        "MaxPool2dWithIndicesWith3dInputModule_basic",
        max_pool2d_with_indices_with_3d_input_module,
        |tu| vec![tu.rand_range(&[1, 8, 8], 0.5, 1.0).into()],
    )?;

    // ==================== 最大池化反向 ====================
    registry.register(
        "MaxPool2dWithIndicesBackwardStatic4DModule_basic",
        max_pool2d_with_indices_backward_static_4d_module,
        |tu| {
            vec![
                tu.rand(&[2, 4, 7, 6]).into(),
                tu.rand(&[2, 4, 6, 5]).into(),
                tu.randint(16, &[2, 4, 7, 6]).into(),
            ]
        },
    )?;
    registry.register(
        "MaxPool2dWithIndicesBackwardStatic3DModule_basic",
        max_pool2d_with_indices_backward_static_3d_module,
        |tu| {
            vec![
                tu.rand(&[4, 7, 6]).into(),
                tu.rand(&[4, 6, 5]).into(),
                tu.randint(16, &[4, 7, 6]).into(),
            ]
        },
    )?;
    registry.register(
        "MaxPool2dWithIndicesBackwardDynamic4DModule_basic",
        max_pool2d_with_indices_backward_dynamic_4d_module,
        |tu| {
            vec![
                tu.rand(&[2, 4, 7, 6]).into(),
                tu.rand(&[2, 4, 6, 5]).into(),
                tu.randint(16, &[2, 4, 7, 6]).into(),
            ]
        },
    )?;
    registry.register(
        "MaxPool2dWithIndicesBackwardDynamic3DModule_basic",
        max_pool2d_with_indices_backward_dynamic_3d_module,
        |tu| {
            vec![
                tu.rand(&[2, 7, 6]).into(),
                tu.rand(&[2, 6, 5]).into(),
                tu.randint(16, &[2, 7, 6]).into(),
            ]
        },
    )?;

    // ==================== 平均池化 ====================
    registry.register("AvgPool2dFloatModule_basic", avg_pool2d_float_module, |tu| {
        vec![(tu.rand(&[2, 4, 20, 20]) - 0.5).into()]
    })?;
    registry.register("AvgPool2dIntModule_basic", avg_pool2d_int_module, |tu| {
        vec![tu.randint(100, &[2, 4, 20, 20]).into()]
    })?;
    registry.register("AvgPool2dStaticModule_basic", avg_pool2d_static_module, |tu| {
        vec![(tu.rand(&[2, 2, 10, 20]) - 0.5).into()]
    })?;
    registry.register(
        "AvgPool2dDivisorOverrideModule_basic",
        avg_pool2d_divisor_override_module,
        |tu| vec![(tu.rand(&[4, 4, 20, 20]) - 0.5).into()],
    )?;

    Ok(registry)
}

fn dynamic(rank: usize) -> ShapePattern {
    ShapePattern::dynamic(rank)
}

fn fixed(dims: &[usize]) -> ShapePattern {
    ShapePattern::fixed(dims)
}

// ==================== 自适应平均池化 ====================

pub fn adaptive_avg_pool2d_module() -> ModuleDescriptor {
    ModuleDescriptor::new("AdaptiveAvgPool2dModule", AdaptiveAvgPool2d::new((1, 1))).arg(
        dynamic(4),
        F32,
        true,
    )
}

// ==================== 最大池化 ====================

/// 6x8 核，步长2，填充3x4，膨胀2
fn dilated_max_pool_params() -> Pool2dParams {
    Pool2dParams::new((6, 8))
        .with_stride((2, 2))
        .with_padding((3, 4))
        .with_dilation((2, 2))
}

pub fn max_pool2d_module() -> ModuleDescriptor {
    ModuleDescriptor::new("MaxPool2dModule", MaxPool2d::new(dilated_max_pool_params())).arg(
        dynamic(4),
        F32,
        true,
    )
}

pub fn max_pool2d_static_module() -> ModuleDescriptor {
    let params = Pool2dParams::new((3, 3))
        .with_stride((2, 2))
        .with_padding((1, 1))
        .with_dilation((1, 1));
    ModuleDescriptor::new("MaxPool2dStaticModule", MaxPool2d::new(params)).arg(
        fixed(&[1, 64, 112, 112]),
        F32,
        true,
    )
}

pub fn max_pool2d_with_3d_input_module() -> ModuleDescriptor {
    ModuleDescriptor::new("MaxPool2dWith3dInputModule", MaxPool2d::new(dilated_max_pool_params()))
        .arg(dynamic(3), F32, true)
}

// ==================== 带索引的最大池化 ====================

/// 2x2 核，步长1，无填充
fn unit_stride_2x2_params() -> Pool2dParams {
    Pool2dParams::new((2, 2))
        .with_stride((1, 1))
        .with_padding((0, 0))
        .with_dilation((1, 1))
}

/// 4x8 核，步长1，填充2x4
fn padded_4x8_params() -> Pool2dParams {
    Pool2dParams::new((4, 8))
        .with_stride((1, 1))
        .with_padding((2, 4))
}

fn with_indices(name: &str, params: Pool2dParams) -> ModuleDescriptor {
    ModuleDescriptor::new(name, MaxPool2dWithIndices::new(params))
}

pub fn max_pool2d_with_indices_module() -> ModuleDescriptor {
    with_indices("MaxPool2dWithIndicesModule", unit_stride_2x2_params()).arg(dynamic(4), F32, true)
}

pub fn max_pool2d_with_indices_full_size_kernel_module() -> ModuleDescriptor {
    let params = Pool2dParams::new((4, 4)).with_stride((1, 1));
    with_indices("MaxPool2dWithIndicesFullSizeKernelModule", params).arg(dynamic(4), F32, true)
}

pub fn max_pool2d_with_indices_non_default_padding_module() -> ModuleDescriptor {
    with_indices("MaxPool2dWithIndicesNonDefaultPaddingModule", padded_4x8_params()).arg(
        dynamic(4),
        F32,
        true,
    )
}

pub fn max_pool2d_with_indices_non_default_stride_module() -> ModuleDescriptor {
    let params = Pool2dParams::new((4, 4)).with_stride((1, 2));
    with_indices("MaxPool2dWithIndicesNonDefaultStrideModule", params).arg(dynamic(4), F32, true)
}

pub fn max_pool2d_with_indices_non_default_dilation_module() -> ModuleDescriptor {
    let params = Pool2dParams::new((4, 4))
        .with_stride((1, 1))
        .with_dilation((2, 2));
    with_indices("MaxPool2dWithIndicesNonDefaultDilationModule", params).arg(dynamic(4), F32, true)
}

pub fn max_pool2d_with_indices_non_default_params_module() -> ModuleDescriptor {
    let params = Pool2dParams::new((8, 4))
        .with_stride((2, 2))
        .with_padding((1, 2))
        .with_dilation((2, 2));
    with_indices("MaxPool2dWithIndicesNonDefaultParamsModule", params).arg(dynamic(4), F32, true)
}

pub fn max_pool2d_with_indices_all_negative_values_module() -> ModuleDescriptor {
    with_indices("MaxPool2dWithIndicesAllNegativeValuesModule", padded_4x8_params()).arg(
        dynamic(4),
        F32,
        true,
    )
}

pub fn max_pool2d_with_indices_static_module() -> ModuleDescriptor {
    with_indices("MaxPool2dWithIndicesStaticModule", padded_4x8_params()).arg(
        fixed(&[2, 4, 16, 16]),
        F32,
        true,
    )
}

pub fn max_pool2d_with_indices_all_ones_module() -> ModuleDescriptor {
    with_indices("MaxPool2dWithIndicesAllOnesModule", unit_stride_2x2_params()).arg(
        dynamic(4),
        F32,
        true,
    )
}

pub fn max_pool2d_with_indices_with_3d_input_module() -> ModuleDescriptor {
    with_indices("MaxPool2dWithIndicesWith3dInputModule", unit_stride_2x2_params()).arg(
        dynamic(3),
        F32,
        true,
    )
}

// ==================== 最大池化反向 ====================

/// 反向用例共用：2x2 核，步长1，填充1，不使用 ceil 模式
fn backward(name: &str) -> ModuleDescriptor {
    let params = Pool2dParams::new((2, 2))
        .with_stride((1, 1))
        .with_padding((1, 1))
        .with_dilation((1, 1))
        .with_ceil_mode(false);
    ModuleDescriptor::new(name, MaxPool2dWithIndicesBackward::new(params))
}

pub fn max_pool2d_with_indices_backward_static_4d_module() -> ModuleDescriptor {
    backward("MaxPool2dWithIndicesBackwardStatic4DModule")
        .arg(fixed(&[2, 4, 7, 6]), F32, true)
        .arg(fixed(&[2, 4, 6, 5]), F32, true)
        .arg(fixed(&[2, 4, 7, 6]), I64, true)
}

pub fn max_pool2d_with_indices_backward_static_3d_module() -> ModuleDescriptor {
    backward("MaxPool2dWithIndicesBackwardStatic3DModule")
        .arg(fixed(&[4, 7, 6]), F32, true)
        .arg(fixed(&[4, 6, 5]), F32, true)
        .arg(fixed(&[4, 7, 6]), I64, true)
}

pub fn max_pool2d_with_indices_backward_dynamic_4d_module() -> ModuleDescriptor {
    backward("MaxPool2dWithIndicesBackwardDynamic4DModule")
        .arg(dynamic(4), F32, true)
        .arg(dynamic(4), F32, true)
        .arg(dynamic(4), I64, true)
}

pub fn max_pool2d_with_indices_backward_dynamic_3d_module() -> ModuleDescriptor {
    backward("MaxPool2dWithIndicesBackwardDynamic3DModule")
        .arg(dynamic(3), F32, true)
        .arg(dynamic(3), F32, true)
        .arg(dynamic(3), I64, true)
}

// ==================== 平均池化 ====================

/// 6x8 核，步长2，填充3x4，计入填充，无除数覆盖
fn padded_6x8_avg_params() -> AvgPool2dParams {
    AvgPool2dParams::new((6, 8))
        .with_stride((2, 2))
        .with_padding((3, 4))
        .with_ceil_mode(false)
        .with_count_include_pad(true)
        .with_divisor_override(None)
}

pub fn avg_pool2d_float_module() -> ModuleDescriptor {
    ModuleDescriptor::new("AvgPool2dFloatModule", AvgPool2d::new(padded_6x8_avg_params())).arg(
        dynamic(4),
        F32,
        true,
    )
}

pub fn avg_pool2d_int_module() -> ModuleDescriptor {
    ModuleDescriptor::new("AvgPool2dIntModule", AvgPool2d::new(padded_6x8_avg_params())).arg(
        dynamic(4),
        I64,
        true,
    )
}

pub fn avg_pool2d_static_module() -> ModuleDescriptor {
    ModuleDescriptor::new("AvgPool2dStaticModule", AvgPool2d::new(padded_6x8_avg_params())).arg(
        fixed(&[2, 2, 10, 20]),
        F32,
        true,
    )
}

pub fn avg_pool2d_divisor_override_module() -> ModuleDescriptor {
    let params = AvgPool2dParams::new((4, 8))
        .with_stride((2, 3))
        .with_padding((2, 4))
        .with_ceil_mode(false)
        .with_count_include_pad(true)
        .with_divisor_override(Some(22));
    ModuleDescriptor::new("AvgPool2dDivisorOverrideModule", AvgPool2d::new(params)).arg(
        fixed(&[4, 4, 20, 20]),
        F32,
        true,
    )
}
