//! Spread ratio

use rust_decimal::Decimal;

/// Far-term premium per unit of near-term premium.
///
/// Absent when either price is absent or not strictly positive.
pub fn compute_ratio(near_price: Option<Decimal>, far_price: Option<Decimal>) -> Option<Decimal> {
    let near = near_price.filter(|p| *p > Decimal::ZERO)?;
    let far = far_price.filter(|p| *p > Decimal::ZERO)?;
    far.checked_div(near)
}
