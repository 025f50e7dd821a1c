//! AArch64 NEON kernels.
//!
//! NEON has fused `a + b * c` (`fmla`) and `a - b * c` (`fmls`) only; the
//! other two forms negate the addend first. Negation is exact, so every
//! kernel still rounds once. There is no alternating add/subtract
//! instruction, hence no `FusedMulAddSub` impl.

#![allow(clippy::wildcard_imports)]

use std::arch::aarch64::*;

use super::impl_fused;
use crate::arch::Neon64;

macro_rules! neon_fused {
    ($native:ty, $fma:ident, $fms:ident, $neg:ident;
     $add:ident, $sub:ident, $nadd:ident, $nsub:ident) => {
        #[target_feature(enable = "neon")]
        #[inline]
        unsafe fn $add(x: $native, y: $native, z: $native) -> $native {
            $fma(z, x, y)
        }

        #[target_feature(enable = "neon")]
        #[inline]
        unsafe fn $sub(x: $native, y: $native, z: $native) -> $native {
            $fma($neg(z), x, y)
        }

        #[target_feature(enable = "neon")]
        #[inline]
        unsafe fn $nadd(x: $native, y: $native, z: $native) -> $native {
            $fms(z, x, y)
        }

        #[target_feature(enable = "neon")]
        #[inline]
        unsafe fn $nsub(x: $native, y: $native, z: $native) -> $native {
            $fms($neg(z), x, y)
        }
    };
}

neon_fused!(float32x4_t, vfmaq_f32, vfmsq_f32, vnegq_f32;
    fma_f32x4, fms_f32x4, fnma_f32x4, fnms_f32x4);
neon_fused!(float64x2_t, vfmaq_f64, vfmsq_f64, vnegq_f64;
    fma_f64x2, fms_f64x2, fnma_f64x2, fnms_f64x2);

impl_fused!(f32 => float32x4_t;
    fma = fma_f32x4, fms = fms_f32x4, fnma = fnma_f32x4, fnms = fnms_f32x4;
    Neon64);
impl_fused!(f64 => float64x2_t;
    fma = fma_f64x2, fms = fms_f64x2, fnma = fnma_f64x2, fnms = fnms_f64x2;
    Neon64);
