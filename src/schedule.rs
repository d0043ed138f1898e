//! Month-by-month amortization table for a fixed-installment loan.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::{Money, round_money};
use crate::payment::{calculate_installment, periodic_rate};

/// Terms of a loan as handed to the engine.
///
/// Callers guarantee `principal > 0`, `annual_rate_percent >= 0` and
/// `term_months >= 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// The amount being financed (sale price minus any down payment).
    pub principal: Money,
    /// The annual interest rate as a percentage (e.g., 12.5 for 12.5%).
    pub annual_rate_percent: Decimal,
    /// The number of monthly installments.
    pub term_months: u32,
}

impl LoanTerms {
    pub fn schedule(&self) -> AmortizationResult {
        generate_schedule(self.principal, self.annual_rate_percent, self.term_months)
    }
}

/// One month of the schedule. Every amount is rounded to a whole unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallmentRow {
    /// 1-based month number.
    pub period: u32,
    /// The amount paid this month.
    pub installment: Money,
    /// The portion of the payment that covers interest.
    pub interest: Money,
    /// The portion of the payment that reduces the balance.
    pub principal_portion: Money,
    /// The balance left after this payment.
    pub remaining_balance: Money,
}

/// The full schedule plus its aggregates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationResult {
    /// Rows in increasing `period` order.
    pub rows: Vec<InstallmentRow>,
    /// The installment in force when the schedule ended.
    ///
    /// This is the nominal installment unless the last row was trimmed to
    /// the outstanding balance, in which case it is that trimmed amount.
    pub fixed_installment: Money,
    /// Interest summed before rounding, then rounded once.
    pub total_interest: Money,
    /// Sum of the rounded installments of every row.
    pub total_cost: Money,
}

/// Generates the amortization table.
///
/// Each month the interest on the outstanding balance is charged first and the
/// rest of the installment amortizes the balance. When the installment would
/// amortize more than what is still owed, the month is trimmed: the balance is
/// paid off exactly and that month's installment shrinks to interest plus
/// balance. Iteration stops early once nothing is owed.
///
/// Arithmetic saturates at the decimal range, so absurd rates or amounts give
/// pinned figures rather than a panic.
///
/// # Arguments
///
/// * `principal` - The amount being financed.
/// * `annual_rate_percent` - The annual rate as a percentage (e.g., 12 for 12%).
/// * `term_months` - The number of monthly installments.
pub fn generate_schedule(
    principal: Money,
    annual_rate_percent: Decimal,
    term_months: u32,
) -> AmortizationResult {
    let monthly_interest_rate = periodic_rate(annual_rate_percent);
    let mut installment = calculate_installment(principal, monthly_interest_rate, term_months);

    let mut current_balance = principal;
    let mut total_interest = Decimal::ZERO;
    let mut rows = Vec::with_capacity(term_months as usize);

    for period in 1..=term_months {
        if current_balance <= Decimal::ZERO {
            break;
        }

        let interest = current_balance.saturating_mul(monthly_interest_rate);
        let mut amortization = installment.saturating_sub(interest);

        if amortization > current_balance {
            amortization = current_balance;
            installment = interest.saturating_add(amortization);
        }

        let new_balance = current_balance.saturating_sub(amortization);
        total_interest = total_interest.saturating_add(interest);

        rows.push(InstallmentRow {
            period,
            installment: round_money(installment),
            interest: round_money(interest),
            principal_portion: round_money(amortization),
            remaining_balance: round_money(new_balance),
        });

        current_balance = new_balance;
    }

    let total_cost = rows
        .iter()
        .fold(Decimal::ZERO, |total, row| total.saturating_add(row.installment));

    AmortizationResult {
        rows,
        fixed_installment: round_money(installment),
        total_interest: round_money(total_interest),
        total_cost,
    }
}
