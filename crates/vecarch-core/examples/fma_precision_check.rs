//! FMA Precision Check
//!
//! Picks the widest fused multiply-add tag this machine supports and shows
//! the single-rounding difference against an unfused multiply then add.
//!
//! Run with: `cargo run --example fma_precision_check`

#![allow(clippy::uninlined_format_args)]
#![allow(clippy::float_cmp)]

use vecarch_core::{fma, Arch, Batch, FusedMulAdd};

// (1 + 2^-12)^2 - (1 + 2^-11) = 2^-24 exactly; an unfused f32 product rounds
// the 2^-24 term away.
const A: f32 = 1.0 + 1.0 / 4096.0;
const C: f32 = -(1.0 + 1.0 / 2048.0);

fn run<T: FusedMulAdd<f32>>(arch: T) {
    let a = Batch::splat(arch, A);
    let c = Batch::splat(arch, C);
    let fused = fma(a, a, c, arch).to_vec();
    let unfused = std::hint::black_box(A) * std::hint::black_box(A) + C;

    println!("tag:      {} ({} lanes)", arch.id(), T::LANES);
    println!("fused:    {:e}", fused[0]);
    println!("unfused:  {:e}", unfused);
    println!("exact:    {:e}", 1.0_f32 / 16_777_216.0);
    assert!(fused.iter().all(|&lane| lane == fused[0]));
}

fn main() {
    let snapshot = vecarch_core::available_architectures();
    println!("best tag: {:?}\n", snapshot.best());

    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    {
        use vecarch_core::arch::{Avx, Avx2, Avx512f, Fma3, Sse4_2};

        if let Some(arch) = Avx512f::detect() {
            return run(arch);
        }
        if let Some(arch) = Fma3::<Avx2>::detect() {
            return run(arch);
        }
        if let Some(arch) = Fma3::<Avx>::detect() {
            return run(arch);
        }
        if let Some(arch) = Fma3::<Sse4_2>::detect() {
            return run(arch);
        }
    }

    #[cfg(target_arch = "aarch64")]
    if let Some(arch) = vecarch_core::arch::Neon64::detect() {
        return run(arch);
    }

    println!("no fused multiply-add tag is usable on this machine");
}
