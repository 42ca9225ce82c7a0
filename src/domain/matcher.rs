//! Cross-Reference Matcher
//!
//! Finds the registry record corroborating a market listing. Registries are
//! scanned in priority order (presale registry, then scraper) and the first
//! record whose `name` is exactly equal to the listing's name wins. Matching
//! is case-sensitive; symbols are never compared.
//!
//! Once a registry match is chosen its missing fields resolve to "Unknown".
//! There is no per-field fallback into lower-priority registries.

use super::listing::{MarketListing, RegistryKind, RegistryRecord};

/// All records fetched from one auxiliary registry during a run
#[derive(Debug, Clone, PartialEq)]
pub struct Registry {
    pub kind: RegistryKind,
    pub records: Vec<RegistryRecord>,
}

impl Registry {
    pub fn new(kind: RegistryKind, records: Vec<RegistryRecord>) -> Self {
        Self { kind, records }
    }

    pub fn find(&self, name: &str) -> Option<&RegistryRecord> {
        self.records.iter().find(|r| r.name == name)
    }
}

/// The record chosen for a listing and the registry it came from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegistryMatch<'a> {
    pub kind: RegistryKind,
    pub record: &'a RegistryRecord,
}

/// Find the best matching record across registries
///
/// `registries` may arrive in any order; they are consulted by
/// [`RegistryKind::priority`].
pub fn cross_reference<'a>(
    listing: &MarketListing,
    registries: &'a [Registry],
) -> Option<RegistryMatch<'a>> {
    let mut ordered: Vec<&Registry> = registries.iter().collect();
    ordered.sort_by_key(|r| r.kind.priority());

    ordered.into_iter().find_map(|registry| {
        registry.find(&listing.name).map(|record| RegistryMatch {
            kind: registry.kind,
            record,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn listing(name: &str) -> MarketListing {
        MarketListing::new(name, "SYM", dec!(0.5), dec!(500000), dec!(2))
    }

    #[test]
    fn test_exact_name_match() {
        let registries = vec![Registry::new(
            RegistryKind::PresaleRegistry,
            vec![RegistryRecord::named("BetaCoin"), RegistryRecord::named("AlphaCoin")],
        )];

        let found = cross_reference(&listing("AlphaCoin"), &registries).unwrap();
        assert_eq!(found.kind, RegistryKind::PresaleRegistry);
        assert_eq!(found.record.name, "AlphaCoin");
    }

    #[test]
    fn test_match_is_case_sensitive() {
        let registries = vec![Registry::new(
            RegistryKind::PresaleRegistry,
            vec![RegistryRecord::named("alphacoin"), RegistryRecord::named("AlphaCoin ")],
        )];

        assert!(cross_reference(&listing("AlphaCoin"), &registries).is_none());
    }

    #[test]
    fn test_symbol_is_not_used() {
        let registries = vec![Registry::new(
            RegistryKind::PresaleRegistry,
            vec![RegistryRecord::named("SYM")],
        )];

        assert!(cross_reference(&listing("AlphaCoin"), &registries).is_none());
    }

    #[test]
    fn test_presale_registry_wins_over_scraper() {
        let registries = vec![
            Registry::new(
                RegistryKind::UpcomingIcoScraper,
                vec![RegistryRecord::named("AlphaCoin").with_status("Scraped")],
            ),
            Registry::new(
                RegistryKind::PresaleRegistry,
                vec![RegistryRecord::named("AlphaCoin").with_status("Upcoming")],
            ),
        ];

        let found = cross_reference(&listing("AlphaCoin"), &registries).unwrap();
        assert_eq!(found.kind, RegistryKind::PresaleRegistry);
        assert_eq!(found.record.status_or_unknown(), "Upcoming");
    }

    #[test]
    fn test_falls_through_to_scraper() {
        let registries = vec![
            Registry::new(RegistryKind::PresaleRegistry, vec![RegistryRecord::named("Other")]),
            Registry::new(
                RegistryKind::UpcomingIcoScraper,
                vec![RegistryRecord::named("AlphaCoin").with_description("from icodrops")],
            ),
        ];

        let found = cross_reference(&listing("AlphaCoin"), &registries).unwrap();
        assert_eq!(found.kind, RegistryKind::UpcomingIcoScraper);
        assert_eq!(found.record.description_or_unknown(), "from icodrops");
    }

    #[test]
    fn test_no_field_fallback_across_registries() {
        let registries = vec![
            Registry::new(RegistryKind::PresaleRegistry, vec![RegistryRecord::named("AlphaCoin")]),
            Registry::new(
                RegistryKind::UpcomingIcoScraper,
                vec![RegistryRecord::named("AlphaCoin")
                    .with_status("Active")
                    .with_dates("2024-01-01", "2024-02-01")],
            ),
        ];

        let found = cross_reference(&listing("AlphaCoin"), &registries).unwrap();
        assert_eq!(found.kind, RegistryKind::PresaleRegistry);
        assert_eq!(found.record.status_or_unknown(), "Unknown");
        assert_eq!(found.record.start_date_or_unknown(), "Unknown");
    }

    #[test]
    fn test_first_record_wins_within_registry() {
        let registries = vec![Registry::new(
            RegistryKind::PresaleRegistry,
            vec![
                RegistryRecord::named("AlphaCoin").with_status("First"),
                RegistryRecord::named("AlphaCoin").with_status("Second"),
            ],
        )];

        let found = cross_reference(&listing("AlphaCoin"), &registries).unwrap();
        assert_eq!(found.record.status_or_unknown(), "First");
    }

    #[test]
    fn test_empty_registries() {
        assert!(cross_reference(&listing("AlphaCoin"), &[]).is_none());
        let registries = vec![
            Registry::new(RegistryKind::PresaleRegistry, Vec::new()),
            Registry::new(RegistryKind::UpcomingIcoScraper, Vec::new()),
        ];
        assert!(cross_reference(&listing("AlphaCoin"), &registries).is_none());
    }
}
