use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::CalcError;
use crate::types::{Money, Percent, Rate};
use crate::CalcResult;

const NEWTON_ITERATIONS: u32 = 50;
const ROOT_TOLERANCE: Decimal = dec!(0.0000000000001);
const HUNDRED: Decimal = dec!(100);
const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Nominal monthly rate from an annual percentage: `R / 12 / 100`.
pub fn nominal_monthly_rate(annual_pct: Percent) -> Rate {
    annual_pct / MONTHS_PER_YEAR / HUNDRED
}

/// Effective monthly rate implied by an annual percentage:
/// `(1 + R/100)^(1/12) - 1`.
pub fn effective_monthly_rate(annual_pct: Percent) -> Rate {
    nth_root(Decimal::ONE + annual_pct / HUNDRED, 12) - Decimal::ONE
}

/// Newton's method for the nth root of A.
/// x_{k+1} = ((n-1)*x_k + A / x_k^(n-1)) / n
pub fn nth_root(a: Decimal, n: u32) -> Decimal {
    if a <= Decimal::ZERO || n == 0 {
        return Decimal::ZERO;
    }
    if a == Decimal::ONE || n == 1 {
        return a;
    }
    let n_dec = Decimal::from(n);
    let n_minus_1 = n_dec - Decimal::ONE;

    // Start near 1 for growth factors, which is what the calculators feed in;
    // elsewhere seed from exp(ln(a) / n) so x^(n-1) stays in range
    let mut x = if a > dec!(0.5) && a < dec!(2.0) {
        Decimal::ONE + (a - Decimal::ONE) / n_dec
    } else {
        (a.ln() / n_dec).exp()
    };

    for _ in 0..NEWTON_ITERATIONS {
        let x_pow = (0..(n - 1)).try_fold(Decimal::ONE, |acc, _| acc.checked_mul(x));
        let x_pow = match x_pow {
            Some(p) if !p.is_zero() => p,
            _ => break,
        };
        let x_new = (n_minus_1 * x + a / x_pow) / n_dec;
        if (x_new - x).abs() < ROOT_TOLERANCE {
            return x_new;
        }
        x = x_new;
    }
    x
}

/// `(1 + rate)^periods`, failing instead of panicking when Decimal overflows.
pub fn compound_factor(rate: Rate, periods: u32) -> CalcResult<Decimal> {
    (Decimal::ONE + rate)
        .checked_powu(u64::from(periods))
        .ok_or_else(|| CalcError::Overflow {
            context: format!("(1 + {rate})^{periods}"),
        })
}

/// Sum of growth factors `Σ_{d=1}^{periods} (1+r)^d`.
///
/// Values a payment made `d` months before the reference month, carried
/// forward to it.
pub fn growth_sum(rate: Rate, periods: u32) -> CalcResult<Decimal> {
    let one_plus_r = Decimal::ONE + rate;
    let mut factor = Decimal::ONE;
    let mut sum = Decimal::ZERO;
    for d in 0..periods {
        let context = format!("growth factor at period {}", d + 1);
        factor = safe_mul(factor, one_plus_r, &context)?;
        sum = safe_add(sum, factor, &context)?;
    }
    Ok(sum)
}

/// Sum of discount factors `Σ_{d=1}^{periods} (1+r)^-d`.
///
/// Once `(1+r)^d` no longer fits a `Decimal`, every later term is below the
/// 28-digit precision floor, so the sum stops there.
pub fn discount_sum(rate: Rate, periods: u32) -> CalcResult<Decimal> {
    let one_plus_r = Decimal::ONE + rate;
    if one_plus_r <= Decimal::ZERO {
        return Err(CalcError::invalid("rate", "Rate must be greater than -100%"));
    }
    let mut discount = Decimal::ONE;
    let mut sum = Decimal::ZERO;
    for _ in 0..periods {
        discount = match discount.checked_mul(one_plus_r) {
            Some(d) => d,
            None => break,
        };
        let term = match Decimal::ONE.checked_div(discount) {
            Some(t) => t,
            None => break,
        };
        if term.is_zero() && rate > Decimal::ZERO {
            break;
        }
        sum = safe_add(sum, term, "discount sum")?;
    }
    Ok(sum)
}

/// Level payment that amortizes `principal` over `nper` periods at `rate`.
///
/// Positive-sign convention: a positive principal gives a positive payment.
/// Returns `None` for the payment when the annuity factor collapses (zero
/// rate), leaving the caller to pick a fallback.
pub fn level_payment(rate: Rate, nper: u32, principal: Money) -> CalcResult<Option<Money>> {
    if nper == 0 {
        return Err(CalcError::invalid("nper", "Number of periods must be > 0"));
    }
    if rate.is_zero() {
        return Ok(None);
    }

    let factor = compound_factor(rate, nper)?;
    let denominator = factor - Decimal::ONE;
    if denominator.is_zero() {
        return Ok(None);
    }

    let numerator = principal
        .checked_mul(rate)
        .and_then(|v| v.checked_mul(factor))
        .ok_or_else(|| CalcError::Overflow {
            context: "level payment numerator".into(),
        })?;
    Ok(Some(numerator / denominator))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

pub(crate) fn safe_mul(a: Decimal, b: Decimal, ctx: &str) -> CalcResult<Decimal> {
    a.checked_mul(b).ok_or_else(|| CalcError::Overflow {
        context: ctx.to_string(),
    })
}

pub(crate) fn safe_add(a: Decimal, b: Decimal, ctx: &str) -> CalcResult<Decimal> {
    a.checked_add(b).ok_or_else(|| CalcError::Overflow {
        context: ctx.to_string(),
    })
}

pub(crate) fn safe_sub(a: Decimal, b: Decimal, ctx: &str) -> CalcResult<Decimal> {
    a.checked_sub(b).ok_or_else(|| CalcError::Overflow {
        context: ctx.to_string(),
    })
}

pub(crate) fn safe_div(num: Decimal, den: Decimal, ctx: &str) -> CalcResult<Decimal> {
    if den.is_zero() {
        return Err(CalcError::DivisionByZero {
            context: ctx.to_string(),
        });
    }
    num.checked_div(den).ok_or_else(|| CalcError::Overflow {
        context: ctx.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_nominal_monthly_rate() {
        assert_eq!(nominal_monthly_rate(dec!(12)), dec!(0.01));
    }

    #[test]
    fn test_nth_root_precision() {
        let root = nth_root(dec!(1.12), 12);
        let mut back = Decimal::ONE;
        for _ in 0..12 {
            back *= root;
        }
        assert!((back - dec!(1.12)).abs() < dec!(0.000000001));
    }

    #[test]
    fn test_effective_monthly_rate_below_nominal() {
        // (1.12)^(1/12) - 1 ≈ 0.009489, below the nominal 1%
        let r = effective_monthly_rate(dec!(12));
        assert!((r - dec!(0.009489)).abs() < dec!(0.000001));
        assert!(r < nominal_monthly_rate(dec!(12)));
    }

    #[test]
    fn test_growth_and_discount_sums_at_zero_rate() {
        assert_eq!(growth_sum(Decimal::ZERO, 5).unwrap(), dec!(5));
        assert_eq!(discount_sum(Decimal::ZERO, 5).unwrap(), dec!(5));
        assert_eq!(growth_sum(dec!(0.01), 0).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_growth_sum_two_periods() {
        // 1.1 + 1.21
        assert_eq!(growth_sum(dec!(0.1), 2).unwrap(), dec!(2.31));
    }

    #[test]
    fn test_level_payment_zero_rate_defers_to_caller() {
        assert!(level_payment(Decimal::ZERO, 12, dec!(1200)).unwrap().is_none());
    }

    #[test]
    fn test_level_payment_basic() {
        // 500000 at 1% per month over 24 months ≈ 23536.74
        let emi = level_payment(dec!(0.01), 24, dec!(500000)).unwrap().unwrap();
        assert!((emi - dec!(23536.74)).abs() < dec!(0.01));
    }

    #[test]
    fn test_discount_sum_long_horizon_converges() {
        // 30% p.a. compounded over 4000 months: (1+r)^d leaves Decimal range
        // long before the last period, the sum tends to 1/r
        let r = effective_monthly_rate(dec!(30));
        let sum = discount_sum(r, 4000).unwrap();
        assert!((sum - Decimal::ONE / r).abs() < dec!(0.000001));
    }

    #[test]
    fn test_growth_sum_long_horizon_is_overflow() {
        let r = effective_monthly_rate(dec!(30));
        let result = growth_sum(r, 4000);
        assert!(matches!(result, Err(CalcError::Overflow { .. })));
    }

    #[test]
    fn test_nth_root_of_large_value() {
        let root = nth_root(dec!(4096), 12);
        assert!((root - dec!(2)).abs() < dec!(0.000000001));
    }

    #[test]
    fn test_safe_helpers_report_errors() {
        assert!(matches!(
            safe_mul(Decimal::MAX, dec!(2), "double"),
            Err(CalcError::Overflow { .. })
        ));
        assert!(matches!(
            safe_div(Decimal::ONE, Decimal::ZERO, "split"),
            Err(CalcError::DivisionByZero { .. })
        ));
        assert_eq!(safe_add(dec!(1), dec!(2), "sum").unwrap(), dec!(3));
    }

    #[test]
    fn test_compound_factor_overflow_is_error() {
        let result = compound_factor(dec!(1), 200);
        assert!(matches!(result, Err(CalcError::Overflow { .. })));
    }
}
