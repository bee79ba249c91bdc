use crate::domain::snapshot::SnapshotSequence;
use crate::domain::unit_type::{classify_and_find_lowest, TypeBand};
use crate::tests::utils::record;

const T1: &str = "2026-01-01 09:00:00";

#[test]
fn banding_boundaries() {
    assert_eq!(TypeBand::classify(49.9), TypeBand::Other);
    assert_eq!(TypeBand::classify(50.0), TypeBand::T59);
    assert_eq!(TypeBand::classify(69.9), TypeBand::T59);
    assert_eq!(TypeBand::classify(70.0), TypeBand::T84);
    assert_eq!(TypeBand::classify(99.9), TypeBand::T84);
    assert_eq!(TypeBand::classify(100.0), TypeBand::T120);
    assert_eq!(TypeBand::classify(135.0), TypeBand::T152);
    assert_eq!(TypeBand::classify(165.0), TypeBand::T175);
    assert_eq!(TypeBand::classify(199.9), TypeBand::T175);
    assert_eq!(TypeBand::classify(200.0), TypeBand::Other);
}

#[test]
fn surfaces_all_tied_cheapest() {
    let mut cheap_first = record("L1", T1);
    cheap_first.area_exclusive = 84.9;
    cheap_first.price_amount = 500_000_000;

    let mut cheap_second = record("L2", T1);
    cheap_second.area_exclusive = 84.5;
    cheap_second.price_amount = 500_000_000;

    let mut pricier = record("L3", T1);
    pricier.area_exclusive = 84.9;
    pricier.price_amount = 600_000_000;

    let records = vec![cheap_first, cheap_second, pricier];
    let snapshot = SnapshotSequence::index(&records).snapshots.remove(0);

    let lowest = classify_and_find_lowest(&snapshot);
    let band = lowest.get(&TypeBand::T84).unwrap();

    assert_eq!(band.lowest_price, 500_000_000);
    assert_eq!(band.tied.len(), 2);
    // Representative is whichever tied record came first in snapshot order.
    assert_eq!(band.representative.listing_id, "L1");
}

#[test]
fn empty_bands_are_omitted_and_other_excluded() {
    let mut in_band = record("A", T1);
    in_band.area_exclusive = 84.9;

    let mut tiny = record("B", T1);
    tiny.area_exclusive = 30.0; // "기타"

    let records = vec![in_band, tiny];
    let snapshot = SnapshotSequence::index(&records).snapshots.remove(0);

    let lowest = classify_and_find_lowest(&snapshot);

    assert_eq!(lowest.len(), 1);
    assert!(lowest.contains_key(&TypeBand::T84));
    assert!(!lowest.contains_key(&TypeBand::Other));
}

#[test]
fn bands_do_not_mix() {
    let mut small = record("A", T1);
    small.area_exclusive = 59.8;
    small.price_amount = 300_000_000;

    let mut large = record("B", T1);
    large.area_exclusive = 152.0;
    large.price_amount = 900_000_000;

    let records = vec![small, large];
    let snapshot = SnapshotSequence::index(&records).snapshots.remove(0);

    let lowest = classify_and_find_lowest(&snapshot);

    assert_eq!(lowest.len(), 2);
    assert_eq!(lowest.get(&TypeBand::T59).unwrap().lowest_price, 300_000_000);
    assert_eq!(lowest.get(&TypeBand::T152).unwrap().lowest_price, 900_000_000);
}
