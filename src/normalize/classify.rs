// src/normalize/classify.rs

use crate::config::Config;

/// How a sheet should be handled, decided from its name alone.
#[derive(Debug, Clone, PartialEq)]
pub enum SheetKind {
    /// A flat transactional export; carries its raw-category label.
    RawData(String),
    /// Auxiliary/reference sheet (skip-prefix convention), not parsed.
    Skip,
    /// A normal dated sheet.
    Standard,
}

/// Classify a sheet name. Raw patterns are checked first, in declared order,
/// so a raw sheet wins even when its name also starts with the skip prefix.
pub fn classify(sheet_name: &str, config: &Config) -> SheetKind {
    let lower = sheet_name.trim().to_lowercase();
    for (pattern, category) in &config.rawdata_sheets {
        if lower.starts_with(pattern.as_str()) || lower.contains(pattern.as_str()) {
            return SheetKind::RawData(category.clone());
        }
    }
    if sheet_name.trim().starts_with(&config.skip_prefix) {
        return SheetKind::Skip;
    }
    SheetKind::Standard
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_pattern_beats_skip_prefix() {
        let cfg = Config::default();
        assert_eq!(
            classify("0.1 Data Försäljning", &cfg),
            SheetKind::RawData("rawdata_orders".into())
        );
    }

    #[test]
    fn unmapped_digit_prefixed_sheets_are_skipped() {
        let cfg = Config::default();
        assert_eq!(classify("0.5 Referens", &cfg), SheetKind::Skip);
        assert_eq!(classify("  0 Lookup", &cfg), SheetKind::Skip);
    }

    #[test]
    fn everything_else_is_standard() {
        let cfg = Config::default();
        assert_eq!(classify("Plan 2024", &cfg), SheetKind::Standard);
        assert_eq!(classify("Vecka 12", &cfg), SheetKind::Standard);
    }

    #[test]
    fn raw_pattern_matches_by_containment_too() {
        let cfg = Config::default();
        assert_eq!(
            classify("Kopia 0.0 Data Timmar", &cfg),
            SheetKind::RawData("rawdata_timmar".into())
        );
    }

    #[test]
    fn first_declared_pattern_wins() {
        let mut cfg = Config::default();
        cfg.rawdata_sheets = vec![
            ("data".into(), "first".into()),
            ("data försäljning".into(), "second".into()),
        ];
        assert_eq!(
            classify("0.1 data försäljning", &cfg),
            SheetKind::RawData("first".into())
        );
    }
}
