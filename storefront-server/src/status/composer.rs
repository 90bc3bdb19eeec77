//! Status Composer
//!
//! Merges the hours check and register check into the single
//! [`RestaurantStatus`] value. Message priority is fixed so the storefront
//! always shows one actionable reason:
//! loading > closed-by-hours > closed-by-cash > open.

use shared::models::{RestaurantStatus, StatusDebug};

use super::matcher::HoursCheck;
use super::register::RegisterCheck;

/// 查询中
pub const MSG_LOADING: &str = "Consultando disponibilidad...";
/// 营业中
pub const MSG_OPEN: &str = "Abierto ahora";
/// 不在营业时间
pub const MSG_CLOSED_HOURS: &str = "Cerrado por horario";
/// 营业时间内但没有开钱箱
pub const MSG_NO_REGISTER: &str = "Temporalmente no disponible";

/// Placeholder published before the first evaluation completes.
///
/// Fail-closed: order acceptance stays off while nothing is known yet.
pub fn initial() -> RestaurantStatus {
    RestaurantStatus {
        is_open: false,
        is_within_hours: false,
        has_cash_register: false,
        is_loading: true,
        can_accept_orders: false,
        status_message: MSG_LOADING.to_string(),
        debug_info: None,
    }
}

/// Compose one evaluation
pub fn compose(
    branch_id: Option<i64>,
    loading: bool,
    hours: &HoursCheck,
    register: &RegisterCheck,
) -> RestaurantStatus {
    let is_within_hours = hours.is_within_hours;
    let has_cash_register = register.has_open;
    let can_accept_orders = !loading && is_within_hours && has_cash_register;

    let status_message = if loading {
        MSG_LOADING
    } else if !is_within_hours {
        MSG_CLOSED_HOURS
    } else if !has_cash_register {
        MSG_NO_REGISTER
    } else {
        MSG_OPEN
    };

    RestaurantStatus {
        is_open: can_accept_orders,
        is_within_hours,
        has_cash_register,
        is_loading: loading,
        can_accept_orders,
        status_message: status_message.to_string(),
        debug_info: Some(StatusDebug {
            branch_id,
            day: hours.day,
            local_time: hours.local_time.format("%H:%M").to_string(),
            hours_reason: hours.reason,
            intervals: hours.intervals.clone(),
            matched_interval: hours.matched_interval.clone(),
            register_error: register.error.clone(),
            evaluated_at: shared::util::now_millis(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use shared::models::{CashRegister, DayOfWeek, HoursReason};

    fn hours(within: bool) -> HoursCheck {
        HoursCheck {
            is_within_hours: within,
            day: DayOfWeek::Monday,
            local_time: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            reason: if within {
                HoursReason::Matched
            } else {
                HoursReason::NoMatch
            },
            intervals: vec!["08:00-22:00".to_string()],
            matched_interval: within.then(|| "08:00-22:00".to_string()),
        }
    }

    fn register(open: bool) -> RegisterCheck {
        let open_registers = if open {
            vec![CashRegister {
                id: 1,
                branch_id: 7,
                status: shared::models::RegisterStatus::Open,
                opening_balance: 100.0,
                closing_balance: None,
                variance: None,
                opened_by: "Ana".into(),
                opened_at: 0,
                closed_at: None,
                abnormal_close: false,
                note: None,
                created_at: 0,
                updated_at: 0,
            }]
        } else {
            Vec::new()
        };
        RegisterCheck {
            has_open: open,
            open_registers,
            error: None,
        }
    }

    #[test]
    fn loading_takes_precedence_over_everything() {
        for within in [false, true] {
            for open in [false, true] {
                let status = compose(Some(7), true, &hours(within), &register(open));
                assert_eq!(status.status_message, MSG_LOADING);
                assert!(status.is_loading);
                assert!(!status.can_accept_orders);
            }
        }
    }

    #[test]
    fn acceptance_is_the_conjunction_of_both_signals() {
        for within in [false, true] {
            for open in [false, true] {
                let status = compose(Some(7), false, &hours(within), &register(open));
                assert_eq!(status.can_accept_orders, within && open);
                assert_eq!(status.is_open, status.can_accept_orders);
            }
        }
    }

    #[test]
    fn fully_open_scenario() {
        let status = compose(Some(7), false, &hours(true), &register(true));
        assert!(status.is_within_hours);
        assert!(status.has_cash_register);
        assert!(status.can_accept_orders);
        assert_eq!(status.status_message, MSG_OPEN);
    }

    #[test]
    fn closed_by_hours_scenario() {
        let status = compose(Some(7), false, &hours(false), &register(true));
        assert!(!status.is_within_hours);
        assert!(!status.can_accept_orders);
        assert_eq!(status.status_message, MSG_CLOSED_HOURS);
    }

    #[test]
    fn closed_by_cash_scenario() {
        let status = compose(Some(7), false, &hours(true), &register(false));
        assert!(status.is_within_hours);
        assert!(!status.has_cash_register);
        assert!(!status.can_accept_orders);
        assert_eq!(status.status_message, MSG_NO_REGISTER);
    }

    #[test]
    fn query_failure_stays_distinguishable_from_confirmed_closed() {
        let mut failed = register(false);
        failed.error = Some("database gone".into());

        let status = compose(Some(7), false, &hours(true), &failed);
        assert!(!status.has_cash_register);
        assert!(!status.can_accept_orders);
        // Same boolean as confirmed-closed, but the error is retained
        assert_eq!(
            status.debug_info.unwrap().register_error.as_deref(),
            Some("database gone")
        );

        let confirmed = compose(Some(7), false, &hours(true), &register(false));
        assert!(confirmed.debug_info.unwrap().register_error.is_none());
    }

    #[test]
    fn initial_value_is_loading_and_fail_closed() {
        let status = initial();
        assert!(status.is_loading);
        assert!(!status.can_accept_orders);
        assert_eq!(status.status_message, MSG_LOADING);
    }
}
