//! Property-Based Tests for Address Resolution
//!
//! Uses proptest to verify the resolver's arithmetic across arbitrary valid
//! geometries and the full virtual LBA range.
//!
//! # Test Properties
//!
//! 1. **Determinism**: same input always produces the same output
//! 2. **Reconstruction**: outputs recombine exactly into their inputs
//! 3. **Range Bounds**: every derived quantity stays inside its geometry
//! 4. **Aliasing**: cluster indices `cache_lines` apart share a line and
//!    differ in tag by exactly 1
//! 5. **Translation**: span checks and byte truncation agree with direct
//!    resolution of the addresses involved

#![cfg(test)]

use proptest::prelude::*;

use super::AddressResolver;
use crate::geometry::CacheGeometry;

// =============================================================================
// Property Strategies
// =============================================================================

/// Strategy for generating valid geometries.
///
/// Built from factors (block size, blocks per cluster, ways, lines) so the
/// divisibility invariants hold by construction. 520 covers the DIF-style
/// non-power-of-two sector sizes.
fn geometry_strategy() -> impl Strategy<Value = CacheGeometry> {
    (
        prop_oneof![Just(512u64), Just(520), Just(4096)],
        1u64..=1024,
        1u64..=16,
        1u64..=4096,
    )
        .prop_map(|(lba_size, blocks_per_cluster, ways, lines)| CacheGeometry {
            cluster_size_bytes: lba_size * blocks_per_cluster,
            lba_size_bytes: lba_size,
            cache_slots: ways * lines,
            cache_associativity: ways,
        })
}

/// Strategy for cluster indices with headroom for aliasing arithmetic.
fn cluster_index_strategy() -> impl Strategy<Value = u64> {
    0u64..(1 << 40)
}

// =============================================================================
// Determinism Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: resolving the same LBA twice yields identical output.
    #[test]
    fn prop_resolve_deterministic(
        geometry in geometry_strategy(),
        vlba in any::<u64>(),
    ) {
        let resolver = AddressResolver::new(geometry)?;
        prop_assert_eq!(resolver.resolve(vlba), resolver.resolve(vlba));
    }

    /// Property: the signed entry point agrees with the unsigned one on the
    /// shared domain and rejects everything below it.
    #[test]
    fn prop_signed_entry_point(
        geometry in geometry_strategy(),
        vlba in any::<i64>(),
    ) {
        let resolver = AddressResolver::new(geometry)?;
        if vlba < 0 {
            prop_assert!(resolver.resolve_signed(vlba).is_err());
        } else {
            prop_assert_eq!(resolver.resolve_signed(vlba)?, resolver.resolve(vlba as u64));
        }
    }
}

// =============================================================================
// Reconstruction Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: tag and line recombine into the cluster index, and the
    /// cluster index and offset recombine into the LBA.
    #[test]
    fn prop_reconstruction_laws(
        geometry in geometry_strategy(),
        vlba in any::<u64>(),
    ) {
        let resolver = AddressResolver::new(geometry)?;
        let r = resolver.resolve(vlba);

        prop_assert_eq!(r.tag * resolver.cache_lines() + r.line_index, r.cluster_index);
        prop_assert_eq!(r.cluster_index * resolver.cluster_lbas() + r.cluster_offset, vlba);
    }

    /// Property: two LBAs in the same cluster agree on everything but the
    /// offset.
    #[test]
    fn prop_same_cluster_same_line(
        geometry in geometry_strategy(),
        cluster_index in cluster_index_strategy(),
        (a, b) in (any::<u64>(), any::<u64>()),
    ) {
        let resolver = AddressResolver::new(geometry)?;
        let lbas = resolver.cluster_lbas();
        let first = resolver.resolve(cluster_index * lbas + a % lbas);
        let second = resolver.resolve(cluster_index * lbas + b % lbas);

        prop_assert_eq!(first.cluster_index, second.cluster_index);
        prop_assert_eq!(first.tag, second.tag);
        prop_assert_eq!(first.line_index, second.line_index);
        prop_assert_eq!(first.slots, second.slots);
    }
}

// =============================================================================
// Range Bound Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: every derived quantity stays inside the geometry's bounds.
    #[test]
    fn prop_range_bounds(
        geometry in geometry_strategy(),
        vlba in any::<u64>(),
    ) {
        let resolver = AddressResolver::new(geometry)?;
        let r = resolver.resolve(vlba);

        prop_assert!(r.cluster_offset < resolver.cluster_lbas());
        prop_assert!(r.line_index < resolver.cache_lines());

        let slots: Vec<u64> = r.slots.iter().collect();
        prop_assert_eq!(slots.len() as u64, geometry.cache_associativity);
        prop_assert!(slots.iter().all(|slot| *slot < geometry.cache_slots));

        // The range iterates strictly ascending, so equal length after
        // dedup means all entries are distinct.
        let mut deduped = slots.clone();
        deduped.dedup();
        prop_assert_eq!(deduped.len(), slots.len());
    }

    /// Property: slot membership agrees with enumeration.
    #[test]
    fn prop_slot_membership(
        geometry in geometry_strategy(),
        vlba in any::<u64>(),
        probe in any::<u64>(),
    ) {
        let resolver = AddressResolver::new(geometry)?;
        let slots = resolver.resolve(vlba).slots;
        let enumerated = slots.iter().any(|slot| slot == probe);

        prop_assert_eq!(slots.contains(probe), enumerated);
    }
}

// =============================================================================
// Aliasing Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: cluster indices exactly `cache_lines` apart land on the
    /// same line with tags one apart.
    #[test]
    fn prop_aliasing_one_generation_apart(
        geometry in geometry_strategy(),
        cluster_index in cluster_index_strategy(),
    ) {
        let resolver = AddressResolver::new(geometry)?;
        let lbas = resolver.cluster_lbas();
        let near = resolver.resolve(cluster_index * lbas);
        let far = resolver.resolve((cluster_index + resolver.cache_lines()) * lbas);

        prop_assert_eq!(near.line_index, far.line_index);
        prop_assert_eq!(near.slots, far.slots);
        prop_assert_eq!(near.tag + 1, far.tag);
    }
}

// =============================================================================
// Translation Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: the span check agrees with resolving both ends of the
    /// transfer.
    #[test]
    fn prop_span_check_matches_endpoints(
        geometry in geometry_strategy(),
        vlba in 0u64..(1 << 50),
        length0 in any::<u16>(),
    ) {
        let resolver = AddressResolver::new(geometry)?;
        let first = resolver.resolve(vlba).cluster_index;
        let last = resolver.resolve(vlba + u64::from(length0)).cluster_index;

        prop_assert_eq!(resolver.spans_clusters(vlba, length0), first != last);
    }

    /// Property: byte-address truncation lands on the same cluster the
    /// block-level resolution picks.
    #[test]
    fn prop_byte_truncation_matches_resolve(
        geometry in geometry_strategy(),
        byte_addr in any::<u64>(),
    ) {
        let resolver = AddressResolver::new(geometry)?;
        let by_byte = resolver.cluster_of_byte(byte_addr);
        let by_block = resolver.resolve(byte_addr / geometry.lba_size_bytes).cluster_index;

        prop_assert_eq!(by_byte, by_block);
    }

    /// Property: a cluster's start LBA resolves to that cluster at offset 0.
    #[test]
    fn prop_cluster_start_round_trips(
        geometry in geometry_strategy(),
        cluster_index in cluster_index_strategy(),
    ) {
        let resolver = AddressResolver::new(geometry)?;
        let r = resolver.resolve(resolver.cluster_start_lba(cluster_index));

        prop_assert_eq!(r.cluster_index, cluster_index);
        prop_assert_eq!(r.cluster_offset, 0);
    }
}
