//! AVX-512F kernels on 512-bit registers.

#![allow(clippy::wildcard_imports)]

#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use super::{fused_intrinsics, impl_fused, impl_fused_addsub};
use crate::arch::Avx512f;

fused_intrinsics!("avx512f", __m512;
    fmadd_ps512 = _mm512_fmadd_ps,
    fmsub_ps512 = _mm512_fmsub_ps,
    fnmadd_ps512 = _mm512_fnmadd_ps,
    fnmsub_ps512 = _mm512_fnmsub_ps,
    fmaddsub_ps512 = _mm512_fmaddsub_ps,
);

fused_intrinsics!("avx512f", __m512d;
    fmadd_pd512 = _mm512_fmadd_pd,
    fmsub_pd512 = _mm512_fmsub_pd,
    fnmadd_pd512 = _mm512_fnmadd_pd,
    fnmsub_pd512 = _mm512_fnmsub_pd,
    fmaddsub_pd512 = _mm512_fmaddsub_pd,
);

impl_fused!(f32 => __m512;
    fma = fmadd_ps512, fms = fmsub_ps512, fnma = fnmadd_ps512, fnms = fnmsub_ps512;
    Avx512f);
impl_fused!(f64 => __m512d;
    fma = fmadd_pd512, fms = fmsub_pd512, fnma = fnmadd_pd512, fnms = fnmsub_pd512;
    Avx512f);
impl_fused_addsub!(f32 => __m512; fmas = fmaddsub_ps512; Avx512f);
impl_fused_addsub!(f64 => __m512d; fmas = fmaddsub_pd512; Avx512f);
