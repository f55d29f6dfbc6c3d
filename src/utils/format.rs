//! Formatierungs-Helfer für Dokumentfelder
//!
//! Geldbeträge werden im Format `1234,56` ausgegeben, Datumswerte als
//! `TT.MM.JJJJ`. Die Fallbacks sind Teil des Platzhalter-Schemas und
//! dürfen nicht stillschweigend geändert werden.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

/// Fallback für fehlende Geldbeträge
pub const MONEY_FALLBACK: &str = "0,00";

/// Fallback für fehlende Datumswerte
pub const DATE_FALLBACK: &str = "-";

/// Geldbetrag mit 2 Nachkommastellen und Dezimalkomma formatieren.
/// Kaufmännische Rundung (midpoint away from zero), kein Banker's Rounding.
pub fn fmt_money(value: Option<Decimal>) -> String {
    match value {
        Some(v) => {
            let rounded = v.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            format!("{:.2}", rounded).replace('.', ",")
        }
        None => MONEY_FALLBACK.to_string(),
    }
}

/// Datum als TT.MM.JJJJ formatieren, `-` wenn nicht gesetzt
pub fn fmt_date(value: Option<NaiveDate>) -> String {
    match value {
        Some(d) => d.format("%d.%m.%Y").to_string(),
        None => DATE_FALLBACK.to_string(),
    }
}

/// Freitext mit konfiguriertem Standardwert, wenn leer oder fehlend
pub fn fmt_text(value: Option<&str>, default: &str) -> String {
    match value {
        Some(s) if !s.trim().is_empty() => s.to_string(),
        _ => default.to_string(),
    }
}

/// Ganzzahlige Anzahl, `0` wenn fehlend
pub fn fmt_count(value: Option<i32>) -> String {
    value.unwrap_or(0).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_fmt_money_decimal_comma() {
        assert_eq!(fmt_money(Some(dec("1234.5"))), "1234,50");
        assert_eq!(fmt_money(Some(dec("0"))), "0,00");
    }

    #[test]
    fn test_fmt_money_fallback() {
        assert_eq!(fmt_money(None), "0,00");
    }

    #[test]
    fn test_fmt_money_standard_rounding() {
        // 0.005 rundet auf 0.01, nicht auf 0.00
        assert_eq!(fmt_money(Some(dec("0.005"))), "0,01");
        assert_eq!(fmt_money(Some(dec("2.675"))), "2,68");
    }

    #[test]
    fn test_fmt_date() {
        let d = chrono::NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        assert_eq!(fmt_date(Some(d)), "01.03.2026");
        assert_eq!(fmt_date(None), "-");
    }

    #[test]
    fn test_fmt_text_default() {
        assert_eq!(fmt_text(None, "Keine weiteren Fahrer"), "Keine weiteren Fahrer");
        assert_eq!(fmt_text(Some("  "), "Standardausstattung"), "Standardausstattung");
        assert_eq!(fmt_text(Some("Markise"), "Standardausstattung"), "Markise");
    }
}
