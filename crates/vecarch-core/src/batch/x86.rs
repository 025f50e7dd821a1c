//! x86 registers: 128-bit SSE, 256-bit AVX and 512-bit AVX-512.
//!
//! Intrinsics are only called from `#[target_feature]` helpers; the
//! [`Register`] impls reach them through the tag token, which proves the
//! feature is usable.

#![allow(clippy::wildcard_imports)]

#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use super::{check_lanes, Register};
use crate::arch::{Avx, Avx2, Avx512f, Fma3, Sse2, Sse3, Sse4_1, Sse4_2, Ssse3};

// =============================================================================
// Feature-gated load/store/splat helpers
// =============================================================================

macro_rules! register_ops {
    ($feature:tt, $elem:ty => $native:ty;
     $load:ident = $loadu:ident, $store:ident = $storeu:ident, $splat:ident = $set1:ident) => {
        #[target_feature(enable = $feature)]
        #[inline]
        unsafe fn $load(src: *const $elem) -> $native {
            $loadu(src)
        }

        #[target_feature(enable = $feature)]
        #[inline]
        unsafe fn $store(dst: *mut $elem, value: $native) {
            $storeu(dst, value);
        }

        #[target_feature(enable = $feature)]
        #[inline]
        unsafe fn $splat(value: $elem) -> $native {
            $set1(value)
        }
    };
}

register_ops!("sse2", f32 => __m128;
    load_ps128 = _mm_loadu_ps, store_ps128 = _mm_storeu_ps, splat_ps128 = _mm_set1_ps);
register_ops!("sse2", f64 => __m128d;
    load_pd128 = _mm_loadu_pd, store_pd128 = _mm_storeu_pd, splat_pd128 = _mm_set1_pd);
register_ops!("avx", f32 => __m256;
    load_ps256 = _mm256_loadu_ps, store_ps256 = _mm256_storeu_ps, splat_ps256 = _mm256_set1_ps);
register_ops!("avx", f64 => __m256d;
    load_pd256 = _mm256_loadu_pd, store_pd256 = _mm256_storeu_pd, splat_pd256 = _mm256_set1_pd);
register_ops!("avx512f", f32 => __m512;
    load_ps512 = _mm512_loadu_ps, store_ps512 = _mm512_storeu_ps, splat_ps512 = _mm512_set1_ps);
register_ops!("avx512f", f64 => __m512d;
    load_pd512 = _mm512_loadu_pd, store_pd512 = _mm512_storeu_pd, splat_pd512 = _mm512_set1_pd);

// =============================================================================
// Register impls
// =============================================================================

macro_rules! impl_registers {
    ($elem:ty => $native:ty, $lanes:expr, $load:ident, $store:ident, $splat:ident;
     $($tag:ty),+ $(,)?) => {$(
        impl Register<$elem> for $tag {
            type Native = $native;
            const LANES: usize = $lanes;

            #[inline]
            fn load(self, src: &[$elem]) -> $native {
                check_lanes(src.len(), $lanes);
                // SAFETY: the token proves the register state is usable and
                // `src` holds at least one register of elements.
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
                // SAFETY: the token proves the register state is usable.
                unsafe { $splat(value) }
            }
        }
    )+};
}

impl_registers!(f32 => __m128, 4, load_ps128, store_ps128, splat_ps128;
    Sse2, Sse3, Ssse3, Sse4_1, Sse4_2, Fma3<Sse4_2>);
impl_registers!(f64 => __m128d, 2, load_pd128, store_pd128, splat_pd128;
    Sse2, Sse3, Ssse3, Sse4_1, Sse4_2, Fma3<Sse4_2>);
impl_registers!(f32 => __m256, 8, load_ps256, store_ps256, splat_ps256;
    Avx, Avx2, Fma3<Avx>, Fma3<Avx2>);
impl_registers!(f64 => __m256d, 4, load_pd256, store_pd256, splat_pd256;
    Avx, Avx2, Fma3<Avx>, Fma3<Avx2>);
impl_registers!(f32 => __m512, 16, load_ps512, store_ps512, splat_ps512; Avx512f);
impl_registers!(f64 => __m512d, 8, load_pd512, store_pd512, splat_pd512; Avx512f);
