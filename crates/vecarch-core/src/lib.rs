//! # vecarch-core
//!
//! Runtime CPU/OS SIMD capability probing and architecture-tagged fused
//! multiply-add kernels.
//!
//! ## Features
//!
//! - **Feature probe**: CPUID/XCR0 on x86, the auxiliary vector on ARM and
//!   RISC-V. A feature counts only if the OS has enabled its register state.
//! - **Process-wide snapshot**: probed once, published through a `OnceLock`,
//!   read lock-free afterwards.
//! - **Tag catalogue**: one zero-sized marker type per instruction-set
//!   generation, ordered by the features they build on.
//! - **Kernels**: `fma`, `fms`, `fnma`, `fnms` and `fmas` selected at compile
//!   time by the tag.
//!
//! ## Quick Start
//!
//! ```rust
//! use vecarch_core::arch::{Arch, Avx, Fma3};
//! use vecarch_core::batch::Batch;
//! use vecarch_core::kernel::fma;
//!
//! let features = vecarch_core::available_architectures();
//! println!("best tag: {:?}", features.best());
//!
//! // Kernels only run with a token proving the tag is usable.
//! if let Some(arch) = Fma3::<Avx>::detect() {
//!     let x = Batch::load(arch, &[2.0_f32, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
//!     let y = Batch::splat(arch, 1.0);
//!     let z = Batch::splat(arch, 0.0);
//!     assert_eq!(fma(x, y, z, arch).to_vec(), [2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
//! }
//! ```

#![warn(missing_docs)]
// Clippy lints configured in workspace Cargo.toml [workspace.lints.clippy]
#![cfg_attr(
    test,
    allow(
        clippy::doc_markdown,
        clippy::uninlined_format_args,
        clippy::single_match_else,
        clippy::cast_lossless,
        clippy::manual_assert
    )
)]

pub mod arch;
pub mod batch;
pub mod config;
pub mod error;
pub mod features;
pub mod kernel;

pub use arch::{Arch, ArchFamily, ArchId};
pub use batch::{Batch, Element, Register};
pub use config::ProbeConfig;
pub use error::{ConfigError, Error, Result, UnknownArch};
pub use features::{available_architectures, initialize, CpuidRegs, SupportedArch, X86Registers};
pub use kernel::{fma, fmas, fms, fnma, fnms, FusedMulAdd, FusedMulAddSub};
