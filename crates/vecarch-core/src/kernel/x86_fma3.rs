//! FMA3 kernels on 128-bit and 256-bit registers.
//!
//! `vfmadd*`, `vfmsub*`, `vfnmadd*`, `vfnmsub*` and `vfmaddsub*` in their
//! XMM and YMM forms. `Fma3<Avx>` and `Fma3<Avx2>` share the YMM kernels.

#![allow(clippy::wildcard_imports)]

#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use super::{fused_intrinsics, impl_fused, impl_fused_addsub};
use crate::arch::{Avx, Avx2, Fma3, Sse4_2};

// =============================================================================
// 128-bit
// =============================================================================

fused_intrinsics!("fma", __m128;
    fmadd_ps128 = _mm_fmadd_ps,
    fmsub_ps128 = _mm_fmsub_ps,
    fnmadd_ps128 = _mm_fnmadd_ps,
    fnmsub_ps128 = _mm_fnmsub_ps,
    fmaddsub_ps128 = _mm_fmaddsub_ps,
);

fused_intrinsics!("fma", __m128d;
    fmadd_pd128 = _mm_fmadd_pd,
    fmsub_pd128 = _mm_fmsub_pd,
    fnmadd_pd128 = _mm_fnmadd_pd,
    fnmsub_pd128 = _mm_fnmsub_pd,
    fmaddsub_pd128 = _mm_fmaddsub_pd,
);

impl_fused!(f32 => __m128;
    fma = fmadd_ps128, fms = fmsub_ps128, fnma = fnmadd_ps128, fnms = fnmsub_ps128;
    Fma3<Sse4_2>);
impl_fused!(f64 => __m128d;
    fma = fmadd_pd128, fms = fmsub_pd128, fnma = fnmadd_pd128, fnms = fnmsub_pd128;
    Fma3<Sse4_2>);
impl_fused_addsub!(f32 => __m128; fmas = fmaddsub_ps128; Fma3<Sse4_2>);
impl_fused_addsub!(f64 => __m128d; fmas = fmaddsub_pd128; Fma3<Sse4_2>);

// =============================================================================
// 256-bit
// =============================================================================

fused_intrinsics!("fma", __m256;
    fmadd_ps256 = _mm256_fmadd_ps,
    fmsub_ps256 = _mm256_fmsub_ps,
    fnmadd_ps256 = _mm256_fnmadd_ps,
    fnmsub_ps256 = _mm256_fnmsub_ps,
    fmaddsub_ps256 = _mm256_fmaddsub_ps,
);

fused_intrinsics!("fma", __m256d;
    fmadd_pd256 = _mm256_fmadd_pd,
    fmsub_pd256 = _mm256_fmsub_pd,
    fnmadd_pd256 = _mm256_fnmadd_pd,
    fnmsub_pd256 = _mm256_fnmsub_pd,
    fmaddsub_pd256 = _mm256_fmaddsub_pd,
);

impl_fused!(f32 => __m256;
    fma = fmadd_ps256, fms = fmsub_ps256, fnma = fnmadd_ps256, fnms = fnmsub_ps256;
    Fma3<Avx>, Fma3<Avx2>);
impl_fused!(f64 => __m256d;
    fma = fmadd_pd256, fms = fmsub_pd256, fnma = fnmadd_pd256, fnms = fnmsub_pd256;
    Fma3<Avx>, Fma3<Avx2>);
impl_fused_addsub!(f32 => __m256; fmas = fmaddsub_ps256; Fma3<Avx>, Fma3<Avx2>);
impl_fused_addsub!(f64 => __m256d; fmas = fmaddsub_pd256; Fma3<Avx>, Fma3<Avx2>);
