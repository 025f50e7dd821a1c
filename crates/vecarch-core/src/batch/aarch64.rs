//! AArch64 NEON registers (128-bit).

#![allow(clippy::wildcard_imports)]

use std::arch::aarch64::*;

use super::{check_lanes, Register};
use crate::arch::Neon64;

macro_rules! neon_register {
    ($elem:ty => $native:ty, $lanes:expr;
     $load:ident = $ld1:ident, $store:ident = $st1:ident, $splat:ident = $dup:ident) => {
        #[target_feature(enable = "neon")]
        #[inline]
        unsafe fn $load(src: *const $elem) -> $native {
            $ld1(src)
        }

        #[target_feature(enable = "neon")]
        #[inline]
        unsafe fn $store(dst: *mut $elem, value: $native) {
            $st1(dst, value);
        }

        #[target_feature(enable = "neon")]
        #[inline]
        unsafe fn $splat(value: $elem) -> $native {
            $dup(value)
        }

        impl Register<$elem> for Neon64 {
            type Native = $native;
            const LANES: usize = $lanes;

            #[inline]
            fn load(self, src: &[$elem]) -> $native {
                check_lanes(src.len(), $lanes);
                // SAFETY: NEON is architectural on AArch64 and `src` holds at
                // least one register of elements.
                unsafe { $load(src.as_ptr()) }
            }

            #[inline]
            fn store(self, value: $native, dst: &mut [$elem]) {
                check_lanes(dst.len(), $lanes);
                // SAFETY: as for `load`, with `dst` writable for one register.
                unsafe { $store(dst.as_mut_ptr(), value) }
            }

            #[inline]
            fn splat(self, value: $elem) -> $native {
                // SAFETY: NEON is architectural on AArch64.
                unsafe { $splat(value) }
            }
        }
    };
}

neon_register!(f32 => float32x4_t, 4;
    load_f32x4 = vld1q_f32, store_f32x4 = vst1q_f32, splat_f32x4 = vdupq_n_f32);
neon_register!(f64 => float64x2_t, 2;
    load_f64x2 = vld1q_f64, store_f64x2 = vst1q_f64, splat_f64x2 = vdupq_n_f64);
