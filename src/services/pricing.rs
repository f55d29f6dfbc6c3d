//! Preisberechnung für Verträge
//!
//! Reine, deterministische Funktionen ohne Datenbankzugriff. Die
//! Controller laden Buchung, Fahrzeug und Preiskatalog und geben die
//! Werte hier hinein; zurück kommen die berechneten Vertragsfelder.

use std::collections::HashMap;

use chrono::{Days, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::dto::booking_dto::ExtraItem;

/// Anzahlungsquote: 30 % des Gesamtbetrags
const DOWN_PAYMENT_RATE: Decimal = dec!(0.30);

/// Berechnete Finanzfelder eines Vertrags
#[derive(Debug, Clone, PartialEq)]
pub struct PriceBreakdown {
    pub rental_days: i32,
    pub rental_total: Decimal,
    pub extras_total: Decimal,
    pub total_amount: Decimal,
    pub down_payment: Decimal,
    pub final_payment: Decimal,
    pub down_payment_due_date: Option<NaiveDate>,
    pub final_payment_due_date: Option<NaiveDate>,
}

/// Kaufmännische Rundung auf 2 Nachkommastellen (kein Banker's Rounding)
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Miettage als Kalendertagsdifferenz; negative Spannen werden auf 0
/// geklemmt und nicht als Fehler behandelt. Die Ablehnung ungültiger
/// Zeiträume ist Sache des aufrufenden Controllers.
pub fn rental_days(start_date: NaiveDate, end_date: NaiveDate) -> i32 {
    let days = (end_date - start_date).num_days();
    days.max(0) as i32
}

/// Summe der gebuchten Extras gegen den aktiven Preiskatalog
///
/// Unbekannte Schlüssel und Mengen von 0 werden übersprungen.
pub fn extras_total(extras: &[ExtraItem], price_map: &HashMap<String, Decimal>) -> Decimal {
    let sum = extras
        .iter()
        .filter(|item| item.quantity > 0)
        .filter_map(|item| {
            price_map
                .get(&item.key)
                .map(|unit_price| *unit_price * Decimal::from(item.quantity))
        })
        .sum();

    round_money(sum)
}

/// Vollständige Preisberechnung aus den Buchungsdaten
///
/// Garantie: down_payment + final_payment == total_amount, ohne
/// Rundungsrest. Die Restzahlung wird als Differenz gebildet, nicht
/// separat gerundet.
pub fn compute_breakdown(
    start_date: NaiveDate,
    end_date: NaiveDate,
    daily_rate: Decimal,
    service_fee: Decimal,
    extras_total: Decimal,
) -> PriceBreakdown {
    let days = rental_days(start_date, end_date);

    let rental_total = round_money(daily_rate * Decimal::from(days));
    let total_amount = round_money(rental_total + service_fee + extras_total);

    let down_payment = round_money(total_amount * DOWN_PAYMENT_RATE);
    let final_payment = total_amount - down_payment;

    PriceBreakdown {
        rental_days: days,
        rental_total,
        extras_total,
        total_amount,
        down_payment,
        final_payment,
        down_payment_due_date: start_date.checked_sub_days(Days::new(14)),
        final_payment_due_date: start_date.checked_sub_days(Days::new(1)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn rental_days_counts_calendar_days() {
        assert_eq!(rental_days(date(2026, 3, 1), date(2026, 3, 5)), 4);
        assert_eq!(rental_days(date(2026, 3, 1), date(2026, 3, 4)), 3);
    }

    #[test]
    fn rental_days_clamps_zero_and_negative_spans() {
        assert_eq!(rental_days(date(2026, 3, 1), date(2026, 3, 1)), 0);
        assert_eq!(rental_days(date(2026, 3, 5), date(2026, 3, 1)), 0);
    }

    #[test]
    fn happy_path_scenario() {
        let breakdown = compute_breakdown(
            date(2026, 3, 1),
            date(2026, 3, 5),
            dec!(100),
            Decimal::ZERO,
            Decimal::ZERO,
        );

        assert_eq!(breakdown.rental_days, 4);
        assert_eq!(breakdown.rental_total, dec!(400));
        assert_eq!(breakdown.total_amount, dec!(400));
        assert_eq!(breakdown.down_payment, dec!(120.00));
        assert_eq!(breakdown.final_payment, dec!(280.00));
        assert_eq!(breakdown.down_payment_due_date, Some(date(2026, 2, 15)));
        assert_eq!(breakdown.final_payment_due_date, Some(date(2026, 2, 28)));
    }

    #[test]
    fn down_and_final_payment_sum_exactly_to_total() {
        // Beträge, bei denen 30 % nicht glatt aufgehen
        for raw in ["0.01", "99.99", "333.33", "1234.57", "0.10"] {
            let total: Decimal = raw.parse().unwrap();
            let breakdown = compute_breakdown(
                date(2026, 6, 10),
                date(2026, 6, 11),
                total,
                Decimal::ZERO,
                Decimal::ZERO,
            );
            assert_eq!(
                breakdown.down_payment + breakdown.final_payment,
                breakdown.total_amount,
                "Rundungsrest bei total={}",
                raw
            );
        }
    }

    #[test]
    fn zero_day_rental_costs_only_fees() {
        let breakdown = compute_breakdown(
            date(2026, 3, 1),
            date(2026, 3, 1),
            dec!(100),
            dec!(25),
            dec!(10),
        );

        assert_eq!(breakdown.rental_days, 0);
        assert_eq!(breakdown.rental_total, Decimal::ZERO);
        assert_eq!(breakdown.total_amount, dec!(35));
    }

    #[test]
    fn extras_skip_unknown_keys_and_zero_quantities() {
        let mut price_map = HashMap::new();
        price_map.insert("bedding".to_string(), dec!(25));
        price_map.insert("camping_table".to_string(), dec!(15));

        let extras = vec![
            ExtraItem { key: "bedding".to_string(), quantity: 2 },
            ExtraItem { key: "camping_table".to_string(), quantity: 0 },
            ExtraItem { key: "does_not_exist".to_string(), quantity: 3 },
        ];

        assert_eq!(extras_total(&extras, &price_map), dec!(50));
    }

    #[test]
    fn money_rounds_midpoint_away_from_zero() {
        assert_eq!(round_money(dec!(2.345)), dec!(2.35));
        assert_eq!(round_money(dec!(2.344)), dec!(2.34));
    }
}
