//! Tests for the feature probe decode, OS gating and the cached snapshot.

use super::*;

const ALL_BITS: CpuidRegs = CpuidRegs {
    eax: u32::MAX,
    ebx: u32::MAX,
    ecx: u32::MAX,
    edx: u32::MAX,
};

const OSXSAVE: u32 = 1 << 27;
const XCR0_SSE: u32 = 1 << 1;
const XCR0_AVX: u32 = 1 << 2;
const XCR0_AVX512: u32 = 1 << 6;

fn every_isa_bit(xcr0: u32) -> X86Registers {
    X86Registers {
        leaf1: ALL_BITS,
        leaf7: ALL_BITS,
        leaf7_sub1: ALL_BITS,
        ext_leaf1: ALL_BITS,
        xcr0,
    }
}

fn x86_ids() -> impl Iterator<Item = ArchId> {
    ArchId::ALL
        .into_iter()
        .filter(|id| id.family() == crate::arch::ArchFamily::X86)
}

// ============================================================================
// x86 decode
// ============================================================================

#[test]
fn test_all_zero_registers_report_nothing() {
    let snapshot = SupportedArch::from_x86_registers(&X86Registers::default());
    assert_eq!(snapshot, SupportedArch::none());
    assert_eq!(snapshot.best(), None);
}

#[test]
fn test_all_bits_with_full_os_state_report_every_x86_tag() {
    let snapshot = SupportedArch::from_x86_registers(&every_isa_bit(u32::MAX));
    for id in x86_ids() {
        assert!(snapshot.has(id), "{id} should be reported");
    }
    assert!(!snapshot.neon && !snapshot.sve && !snapshot.rvv && !snapshot.wasm);
    assert_eq!(snapshot.best(), Some(ArchId::Avx512VnniAvx512vbmi2));
}

#[test]
fn test_sse2_is_leaf1_edx_bit_26() {
    let regs = X86Registers {
        leaf1: CpuidRegs {
            edx: 1 << 26,
            ..CpuidRegs::default()
        },
        ..X86Registers::default()
    };
    let snapshot = SupportedArch::from_x86_registers(&regs);
    assert_eq!(snapshot.available().collect::<Vec<_>>(), vec![ArchId::Sse2]);
}

#[test]
fn test_leaf1_ecx_bits() {
    let cases = [
        (0, ArchId::Sse3),
        (9, ArchId::Ssse3),
        (19, ArchId::Sse4_1),
        (20, ArchId::Sse4_2),
        (12, ArchId::Fma3Sse4_2),
        (28, ArchId::Avx),
    ];
    for (bit, id) in cases {
        let regs = X86Registers {
            leaf1: CpuidRegs {
                ecx: 1 << bit,
                ..CpuidRegs::default()
            },
            ..X86Registers::default()
        };
        let snapshot = SupportedArch::from_x86_registers(&regs);
        assert_eq!(
            snapshot.available().collect::<Vec<_>>(),
            vec![id],
            "leaf 1 ECX bit {bit}"
        );
    }
}

#[test]
fn test_leaf7_bits() {
    let ebx_cases = [
        (5, ArchId::Avx2),
        (16, ArchId::Avx512f),
        (17, ArchId::Avx512dq),
        (21, ArchId::Avx512ifma),
        (26, ArchId::Avx512pf),
        (27, ArchId::Avx512er),
        (28, ArchId::Avx512cd),
        (30, ArchId::Avx512bw),
    ];
    for (bit, id) in ebx_cases {
        let regs = X86Registers {
            leaf7: CpuidRegs {
                ebx: 1 << bit,
                ..CpuidRegs::default()
            },
            ..X86Registers::default()
        };
        let snapshot = SupportedArch::from_x86_registers(&regs);
        assert_eq!(snapshot.available().collect::<Vec<_>>(), vec![id], "EBX bit {bit}");
    }

    let ecx_cases = [
        (1, ArchId::Avx512vbmi),
        (6, ArchId::Avx512vbmi2),
        (11, ArchId::Avx512VnniAvx512bw),
    ];
    for (bit, id) in ecx_cases {
        let regs = X86Registers {
            leaf7: CpuidRegs {
                ecx: 1 << bit,
                ..CpuidRegs::default()
            },
            ..X86Registers::default()
        };
        let snapshot = SupportedArch::from_x86_registers(&regs);
        assert_eq!(snapshot.available().collect::<Vec<_>>(), vec![id], "ECX bit {bit}");
    }
}

#[test]
fn test_fma4_and_avxvnni_bits() {
    let regs = X86Registers {
        ext_leaf1: CpuidRegs {
            ecx: 1 << 16,
            ..CpuidRegs::default()
        },
        leaf7_sub1: CpuidRegs {
            eax: 1 << 4,
            ..CpuidRegs::default()
        },
        ..X86Registers::default()
    };
    let snapshot = SupportedArch::from_x86_registers(&regs);
    assert!(snapshot.fma4);
    assert!(snapshot.avxvnni);
    assert!(!snapshot.avx);
}

// ============================================================================
// OS enablement gating
// ============================================================================

#[test]
fn test_without_osxsave_all_state_is_assumed_enabled() {
    let mut regs = every_isa_bit(0);
    regs.leaf1.ecx &= !OSXSAVE;
    let snapshot = SupportedArch::from_x86_registers(&regs);
    assert!(snapshot.avx512f);
    assert!(snapshot.fma3_avx2);
    assert!(snapshot.sse2);
}

#[test]
fn test_avx_state_disabled_clears_every_avx_feature() {
    let snapshot = SupportedArch::from_x86_registers(&every_isa_bit(XCR0_SSE));
    assert!(snapshot.sse2 && snapshot.sse4_2);
    assert!(!snapshot.fma3_sse42, "FMA3 is VEX-encoded");
    assert!(!snapshot.avx);
    assert!(!snapshot.avx2);
    assert!(!snapshot.fma3_avx);
    assert!(!snapshot.fma3_avx2);
    assert!(!snapshot.fma4);
    assert!(!snapshot.avxvnni);
    for id in x86_ids().filter(|id| id.width_bits() == 512) {
        assert!(!snapshot.has(id), "{id} must follow the AVX state gate");
    }
}

#[test]
fn test_avx_state_requires_sse_state() {
    let snapshot = SupportedArch::from_x86_registers(&every_isa_bit(XCR0_AVX | XCR0_AVX512));
    assert_eq!(snapshot, SupportedArch::none());
}

#[test]
fn test_avx512_state_disabled_keeps_avx2() {
    let snapshot = SupportedArch::from_x86_registers(&every_isa_bit(XCR0_SSE | XCR0_AVX));
    assert!(snapshot.avx2 && snapshot.fma3_avx2);
    assert!(!snapshot.avx512f && !snapshot.avx512bw && !snapshot.avx512vnni_vbmi2);
}

// ============================================================================
// Derived fields
// ============================================================================

#[test]
fn test_fma3_avx_needs_avx() {
    let regs = X86Registers {
        leaf1: CpuidRegs {
            ecx: 1 << 12,
            ..CpuidRegs::default()
        },
        ..X86Registers::default()
    };
    let snapshot = SupportedArch::from_x86_registers(&regs);
    assert!(snapshot.fma3_sse42);
    assert!(!snapshot.fma3_avx);
}

#[test]
fn test_fma3_avx2_needs_avx_as_well_as_avx2() {
    let regs = X86Registers {
        leaf1: CpuidRegs {
            ecx: 1 << 12,
            ..CpuidRegs::default()
        },
        leaf7: CpuidRegs {
            ebx: 1 << 5,
            ..CpuidRegs::default()
        },
        ..X86Registers::default()
    };
    let snapshot = SupportedArch::from_x86_registers(&regs);
    assert!(snapshot.avx2 && snapshot.fma3_sse42);
    assert!(!snapshot.avx);
    assert!(!snapshot.fma3_avx2);
}

#[test]
fn test_vnni_on_vbmi2_is_a_conjunction() {
    let vnni_only = X86Registers {
        leaf7: CpuidRegs {
            ecx: 1 << 11,
            ..CpuidRegs::default()
        },
        ..X86Registers::default()
    };
    assert!(!SupportedArch::from_x86_registers(&vnni_only).avx512vnni_vbmi2);

    let both = X86Registers {
        leaf7: CpuidRegs {
            ecx: (1 << 11) | (1 << 6),
            ..CpuidRegs::default()
        },
        ..X86Registers::default()
    };
    assert!(SupportedArch::from_x86_registers(&both).avx512vnni_vbmi2);
}

// ============================================================================
// Auxiliary vector decode
// ============================================================================

#[test]
fn test_aarch64_always_has_neon() {
    let snapshot = SupportedArch::from_aarch64_hwcaps(0, 0);
    assert!(snapshot.neon && snapshot.neon64);
    assert!(!snapshot.i8mm_neon64 && !snapshot.sve);
    assert_eq!(snapshot.best(), Some(ArchId::Neon64));
}

#[test]
fn test_aarch64_i8mm_and_sve_bits() {
    let snapshot = SupportedArch::from_aarch64_hwcaps(HWCAP_SVE, HWCAP2_I8MM);
    assert!(snapshot.has(ArchId::I8mmNeon64));
    assert!(snapshot.has(ArchId::Sve128));
    assert!(snapshot.has(ArchId::Sve256));
    assert!(snapshot.has(ArchId::Sve512));

    // The I8MM bit lives in AT_HWCAP2, not AT_HWCAP.
    assert!(!SupportedArch::from_aarch64_hwcaps(HWCAP2_I8MM, 0).i8mm_neon64);
}

#[test]
fn test_arm_and_riscv_bits() {
    assert!(SupportedArch::from_arm_hwcap(HWCAP_NEON).neon);
    assert!(!SupportedArch::from_arm_hwcap(HWCAP_NEON).neon64);
    assert!(!SupportedArch::from_arm_hwcap(!HWCAP_NEON).neon);

    assert_eq!(HWCAP_V, 1 << 21);
    let snapshot = SupportedArch::from_riscv_hwcap(HWCAP_V);
    assert!(snapshot.has(ArchId::Rvv128) && snapshot.has(ArchId::Rvv512));
    assert!(!SupportedArch::from_riscv_hwcap(0).rvv);
}

// ============================================================================
// Masking
// ============================================================================

#[test]
fn test_without_clears_dependent_tags() {
    let full = SupportedArch::from_x86_registers(&every_isa_bit(u32::MAX));
    let masked = full.without(&[ArchId::Avx]);
    assert!(masked.sse4_2 && masked.fma3_sse42 && masked.fma4);
    assert!(!masked.avx && !masked.avx2 && !masked.fma3_avx && !masked.fma3_avx2);
    assert!(!masked.avx512f && !masked.avx512vnni_vbmi2);
}

#[test]
fn test_without_derived_tag_keeps_its_parents() {
    let full = SupportedArch::from_x86_registers(&every_isa_bit(u32::MAX));
    let masked = full.without(&[ArchId::Fma3Avx]);
    assert!(masked.avx && masked.avx2 && masked.fma3_sse42);
    assert!(!masked.fma3_avx && !masked.fma3_avx2);
    assert_eq!(masked.best(), Some(ArchId::AvxVnni));
}

#[test]
fn test_without_sve_width_clears_the_shared_flag() {
    let snapshot = SupportedArch::from_aarch64_hwcaps(HWCAP_SVE, 0).without(&[ArchId::Sve512]);
    assert!(!snapshot.has(ArchId::Sve128));
    assert!(snapshot.neon64);
}

#[test]
fn test_without_nothing_is_identity() {
    let full = SupportedArch::from_x86_registers(&every_isa_bit(u32::MAX));
    assert_eq!(full.without(&[]), full);
}

// ============================================================================
// Host probe and the published snapshot
// ============================================================================

#[test]
fn test_detect_is_idempotent() {
    assert_eq!(SupportedArch::detect(), SupportedArch::detect());
}

#[cfg(target_arch = "x86_64")]
#[test]
fn test_x86_64_host_reports_sse2() {
    // SSE2 is part of the x86_64 baseline.
    assert!(SupportedArch::detect().sse2);
}

#[cfg(target_arch = "aarch64")]
#[test]
fn test_aarch64_host_reports_neon64() {
    assert!(SupportedArch::detect().neon64);
}

#[test]
fn test_available_architectures_is_stable() {
    let first = available_architectures();
    for _ in 0..100 {
        assert_eq!(available_architectures(), first);
    }
}

#[test]
fn test_initialize_after_publication_fails() {
    let _ = available_architectures();
    let err = initialize(&ProbeConfig::default()).unwrap_err();
    assert!(matches!(err, Error::AlreadyInitialized), "got {err:?}");
}

#[test]
fn test_initialize_rejects_unknown_names_before_publishing() {
    let err = initialize(&ProbeConfig::default().disable("avx4096")).unwrap_err();
    assert!(matches!(err, Error::Config(_)), "got {err:?}");
}

#[test]
fn test_snapshot_serializes_field_names() {
    let json = serde_json::to_value(SupportedArch::from_aarch64_hwcaps(0, HWCAP2_I8MM))
        .expect("serialize");
    assert_eq!(json["neon64"], true);
    assert_eq!(json["i8mm_neon64"], true);
    assert_eq!(json["avx"], false);
}
