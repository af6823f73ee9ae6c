use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use serde_json::Value;

/// A curated listing shown on the marketing dashboard. Static content; the
/// advertised gross yield comes from the listing sheet, not the engine.
#[derive(Debug, Clone, Serialize)]
pub struct Listing {
    pub id: &'static str,
    pub name: &'static str,
    pub location: &'static str,
    pub price: Decimal,
    pub gross_yield: Decimal,
    pub age_years: u32,
    pub unit_type: &'static str,
}

pub fn curated_listings() -> Vec<Listing> {
    vec![
        Listing {
            id: "1",
            name: "THE ROA 南青山レジデンス",
            location: "東京都港区南青山",
            price: dec!(128_000_000),
            gross_yield: dec!(3.8),
            age_years: 2,
            unit_type: "1LDK / Premium",
        },
        Listing {
            id: "2",
            name: "中目黒アーバン・リトリート",
            location: "東京都目黒区上目黒",
            price: dec!(82_000_000),
            gross_yield: dec!(4.5),
            age_years: 8,
            unit_type: "1K / High-rise",
        },
        Listing {
            id: "3",
            name: "スカイゲート西新宿 48F",
            location: "東京都新宿区西新宿",
            price: dec!(59_000_000),
            gross_yield: dec!(5.2),
            age_years: 15,
            unit_type: "Studio / Tower",
        },
    ]
}

pub fn run_listings() -> Result<Value, Box<dyn std::error::Error>> {
    Ok(serde_json::to_value(curated_listings())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listings_are_priced_and_distinct() {
        let listings = curated_listings();
        assert_eq!(listings.len(), 3);

        for listing in &listings {
            assert!(listing.price > Decimal::ZERO);
            assert!(listing.gross_yield > Decimal::ZERO);
        }

        let mut ids: Vec<&str> = listings.iter().map(|l| l.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }
}
