// src/domain/unit_type.rs

use crate::domain::record::ListingRecord;
use crate::domain::snapshot::Snapshot;
use std::collections::BTreeMap;

/// Coarse bucket of exclusive-area ranges used to compare "like" units.
/// Labels follow the Korean market convention of naming a unit type by its
/// nominal exclusive area in m².
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TypeBand {
    T59,
    T84,
    T120,
    T152,
    T175,
    Other,
}

impl TypeBand {
    /// Band boundaries by exclusive floor area, lower bound inclusive.
    pub fn classify(area_exclusive: f64) -> TypeBand {
        match area_exclusive {
            a if (50.0..70.0).contains(&a) => TypeBand::T59,
            a if (70.0..100.0).contains(&a) => TypeBand::T84,
            a if (100.0..135.0).contains(&a) => TypeBand::T120,
            a if (135.0..165.0).contains(&a) => TypeBand::T152,
            a if (165.0..200.0).contains(&a) => TypeBand::T175,
            _ => TypeBand::Other,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TypeBand::T59 => "59",
            TypeBand::T84 => "84",
            TypeBand::T120 => "120",
            TypeBand::T152 => "152",
            TypeBand::T175 => "175",
            TypeBand::Other => "기타",
        }
    }
}

/// The cheapest advertised records of one band within one snapshot.
#[derive(Debug, Clone)]
pub struct BandLowest {
    pub band: TypeBand,
    pub lowest_price: i64,
    /// First record at the minimum price, in snapshot order.
    pub representative: ListingRecord,
    /// Every record exactly at the minimum, in snapshot order. Ties are real:
    /// near-identical units routinely share the advertised minimum and all of
    /// them must be surfaced.
    pub tied: Vec<ListingRecord>,
}

/// Bucket a snapshot's listings into type bands and find the minimum-price
/// records per named band. Bands with no listings are omitted; the "기타"
/// catch-all participates in classification but not in this output.
pub fn classify_and_find_lowest(snapshot: &Snapshot) -> BTreeMap<TypeBand, BandLowest> {
    let mut by_band: BTreeMap<TypeBand, Vec<&ListingRecord>> = BTreeMap::new();

    for record in &snapshot.records {
        let band = TypeBand::classify(record.area_exclusive);
        if band == TypeBand::Other {
            continue;
        }
        by_band.entry(band).or_default().push(record);
    }

    by_band
        .into_iter()
        .map(|(band, records)| {
            let lowest_price = records.iter().map(|r| r.price_amount).min().unwrap_or(0);
            let tied: Vec<ListingRecord> = records
                .iter()
                .filter(|r| r.price_amount == lowest_price)
                .map(|r| (*r).clone())
                .collect();
            let representative = tied[0].clone();

            (
                band,
                BandLowest {
                    band,
                    lowest_price,
                    representative,
                    tied,
                },
            )
        })
        .collect()
}
