//! Evaluación de vencimientos inminentes
//!
//! Una fecha proyectada es "inminente" si está estrictamente en el futuro y
//! a menos de 30 días del día actual. Granularidad de día de calendario.

use chrono::{Duration, Local, NaiveDate};

/// Ventana de aviso en días
pub const IMMINENT_WINDOW_DAYS: i64 = 30;

/// Cotas exclusivas `(después de, antes de)` de la ventana de aviso. Las
/// consultas del dashboard filtran con `fecha > after AND fecha < before`.
pub fn imminent_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let before = today
        .checked_add_signed(Duration::days(IMMINENT_WINDOW_DAYS))
        .unwrap_or(NaiveDate::MAX);
    (today, before)
}

/// Decide si una fecha proyectada debe resaltarse
pub fn is_imminent(projected: Option<NaiveDate>, today: NaiveDate) -> bool {
    let Some(projected) = projected else {
        return false;
    };
    let (after, before) = imminent_window(today);
    projected > after && projected < before
}

/// Día actual en la zona horaria local del servidor
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Banderas de inminencia para las dos columnas derivadas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DueFlags {
    pub maintenance: bool,
    pub inspection: bool,
}

impl DueFlags {
    pub fn evaluate(
        projected_maintenance: Option<NaiveDate>,
        projected_inspection: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Self {
        Self {
            maintenance: is_imminent(projected_maintenance, today),
            inspection: is_imminent(projected_inspection, today),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn date(value: &str) -> NaiveDate {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_window_boundaries() {
        let today = date("2024-01-01");
        assert!(is_imminent(Some(today + Duration::days(1)), today));
        assert!(is_imminent(Some(today + Duration::days(29)), today));
        assert!(!is_imminent(Some(today + Duration::days(30)), today));
        assert!(!is_imminent(Some(today), today));
        assert!(!is_imminent(Some(today - Duration::days(1)), today));
        assert!(!is_imminent(None, today));
    }

    #[test]
    fn test_dashboard_scenarios() {
        let today = date("2024-01-01");
        assert!(is_imminent(Some(date("2024-01-20")), today));
        assert!(!is_imminent(Some(date("2024-03-01")), today));
    }

    #[test]
    fn test_window_crosses_month_and_leap_day() {
        let today = date("2024-02-10");
        assert!(is_imminent(Some(date("2024-03-10")), today)); // 29 días (bisiesto)
        assert!(!is_imminent(Some(date("2024-03-11")), today));
    }

    #[test]
    fn test_window_bounds_agree_with_is_imminent() {
        for today in [date("2024-01-01"), date("2024-02-15"), date("2023-02-15"), date("2024-12-20")] {
            let (after, before) = imminent_window(today);
            assert_eq!(after, today);
            assert_eq!((before - after).num_days(), IMMINENT_WINDOW_DAYS);

            for (offset, expected) in [(0, false), (1, true), (29, true), (30, false)] {
                let projected = today + Duration::days(offset);
                let in_window = projected > after && projected < before;
                assert_eq!(in_window, expected, "today {} offset {}", today, offset);
                assert_eq!(is_imminent(Some(projected), today), in_window, "today {} offset {}", today, offset);
            }
        }
    }

    #[test]
    fn test_window_across_leap_day() {
        let (_, before) = imminent_window(date("2024-02-15"));
        assert_eq!(before, date("2024-03-16"));
        let (_, before) = imminent_window(date("2023-02-15"));
        assert_eq!(before, date("2023-03-17"));
    }

    #[test]
    fn test_flags_use_same_rule_for_both_columns() {
        let today = date("2024-06-01");
        let flags = DueFlags::evaluate(Some(date("2024-06-15")), Some(date("2024-08-01")), today);
        assert!(flags.maintenance);
        assert!(!flags.inspection);

        let flags = DueFlags::evaluate(Some(date("2024-08-01")), Some(date("2024-06-15")), today);
        assert!(!flags.maintenance);
        assert!(flags.inspection);
    }
}
