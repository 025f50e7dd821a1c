//! Tests for the batch container.

#![allow(clippy::float_cmp)]

use super::*;

fn ramp<T: Element + From<u8>>(len: usize) -> Vec<T> {
    (0..len)
        .map(|i| T::from(u8::try_from(i + 1).unwrap_or(u8::MAX)))
        .collect()
}

/// Exercises load/store/splat for one (type, tag) pair if the tag is usable.
fn check_register<T, A>()
where
    T: Element + From<u8>,
    A: Register<T>,
{
    let Some(arch) = A::detect() else {
        return;
    };
    let lanes = Batch::<T, A>::LANES;
    assert_eq!(
        lanes * std::mem::size_of::<T>() * 8,
        A::ID.width_bits(),
        "{:?}",
        A::ID
    );

    let src = ramp::<T>(lanes + 3);
    let batch = Batch::load(arch, &src);
    assert_eq!(batch.to_vec(), src[..lanes]);
    assert_eq!(batch.arch(), arch);

    let mut dst = vec![T::default(); lanes + 2];
    Batch::splat(arch, T::from(7)).store(&mut dst);
    assert!(dst[..lanes].iter().all(|&v| v == T::from(7)));
    assert!(dst[lanes..].iter().all(|&v| v == T::default()), "tail untouched");

    let rewrapped = Batch::from_native(arch, batch.native());
    assert_eq!(rewrapped.to_vec(), batch.to_vec());
}

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
mod x86_registers {
    use super::check_register;
    use crate::arch::{Avx, Avx2, Avx512f, Fma3, Sse2, Sse3, Sse4_1, Sse4_2, Ssse3};

    #[test]
    fn test_sse_registers() {
        check_register::<f32, Sse2>();
        check_register::<f64, Sse2>();
        check_register::<f32, Sse3>();
        check_register::<f32, Ssse3>();
        check_register::<f32, Sse4_1>();
        check_register::<f64, Sse4_2>();
        check_register::<f32, Fma3<Sse4_2>>();
        check_register::<f64, Fma3<Sse4_2>>();
    }

    #[test]
    fn test_avx_registers() {
        check_register::<f32, Avx>();
        check_register::<f64, Avx>();
        check_register::<f32, Avx2>();
        check_register::<f32, Fma3<Avx>>();
        check_register::<f64, Fma3<Avx>>();
        check_register::<f32, Fma3<Avx2>>();
        check_register::<f64, Fma3<Avx2>>();
    }

    #[test]
    fn test_avx512_registers() {
        check_register::<f32, Avx512f>();
        check_register::<f64, Avx512f>();
    }
}

#[cfg(target_arch = "aarch64")]
#[test]
fn test_neon64_registers() {
    check_register::<f32, crate::arch::Neon64>();
    check_register::<f64, crate::arch::Neon64>();
}

#[cfg(target_arch = "x86_64")]
fn baseline() -> crate::arch::Sse2 {
    // SAFETY: SSE2 is part of the x86_64 baseline.
    unsafe { <crate::arch::Sse2 as crate::arch::Arch>::new_unchecked() }
}

#[cfg(target_arch = "aarch64")]
fn baseline() -> crate::arch::Neon64 {
    // SAFETY: NEON is architectural on AArch64.
    unsafe { <crate::arch::Neon64 as crate::arch::Arch>::new_unchecked() }
}

#[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
#[test]
#[should_panic(expected = "shorter than one batch")]
fn test_short_load_panics() {
    let _ = Batch::<f32, _>::load(baseline(), &[1.0, 2.0]);
}

#[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
#[test]
#[should_panic(expected = "shorter than one batch")]
fn test_short_store_panics() {
    let mut dst = [0.0_f64; 1];
    Batch::<f64, _>::splat(baseline(), 1.0).store(&mut dst);
}

#[cfg(any(target_arch = "x86_64", target_arch = "aarch64"))]
#[test]
fn test_debug_shows_tag_and_lanes() {
    let batch = Batch::<f32, _>::splat(baseline(), 0.5);
    let rendered = format!("{batch:?}");
    assert!(rendered.starts_with("Batch"), "{rendered}");
    assert!(rendered.contains("0.5"), "{rendered}");
}
