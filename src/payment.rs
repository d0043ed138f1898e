//! Fixed installment of a French-method (Price table) loan.

use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;

use crate::money::{Money, Rate, round_money};

/// Converts an annual rate in percent to the flat monthly rate.
///
/// 12 (meaning 12% per year) becomes 0.01 per month. No compounding is
/// involved: periods are flat twelfths of a year.
pub fn periodic_rate(annual_rate_percent: Decimal) -> Rate {
    annual_rate_percent / dec!(100) / dec!(12)
}

/// Calculates the fixed periodic installment, rounded to a whole unit.
///
/// The annuity formula is: PMT = P * [i(1 + i)^n] / [(1 + i)^n - 1]
///
/// A non-positive rate is an interest-free loan and is paid off in equal
/// straight-line parts instead.
///
/// # Arguments
///
/// * `principal` - The amount being financed.
/// * `periodic_rate` - The rate per period as a fraction (not percentage).
/// * `term_months` - The number of installments.
///
/// Inputs are not validated here; callers guarantee `principal > 0` and
/// `term_months >= 1`. Figures beyond the decimal range saturate at
/// `Decimal::MAX` instead of panicking.
pub fn calculate_installment(principal: Money, periodic_rate: Rate, term_months: u32) -> Money {
    let periods = Decimal::from(term_months);

    if periodic_rate <= Decimal::ZERO {
        return round_money(principal / periods);
    }

    let interest_only = principal.saturating_mul(periodic_rate);
    let installment = match dec!(1)
        .checked_add(periodic_rate)
        .and_then(|base| base.checked_powu(term_months.into()))
    {
        // The growth factor outgrew the decimal range, so f / (f - 1) is 1.
        None => interest_only,
        // Rate too small to register over the term.
        Some(factor) if factor == dec!(1) => principal / periods,
        Some(factor) => match factor.checked_div(factor - dec!(1)) {
            Some(annuity) => interest_only.saturating_mul(annuity),
            None => interest_only,
        },
    };

    round_money(installment)
}
