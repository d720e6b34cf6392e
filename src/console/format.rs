use chrono::NaiveDateTime;
use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimals displayed for money
const CURRENCY_DECIMALS: u32 = 2;

const CURRENCY_SYMBOL: &str = "₹";

/// Rupee amount with exactly two decimals and no grouping, e.g. `₹350.50`.
pub fn format_currency(amount: Decimal) -> String {
  let mut amount =
    amount.round_dp_with_strategy(CURRENCY_DECIMALS, RoundingStrategy::MidpointAwayFromZero);
  if amount.is_zero() {
    amount = Decimal::ZERO;
  }
  amount.rescale(CURRENCY_DECIMALS);
  format!("{}{}", CURRENCY_SYMBOL, amount)
}

/// Short day-month-year date, e.g. `05 Mar 2024`.
pub fn format_date(date_time: NaiveDateTime) -> String {
  date_time.format("%d %b %Y").to_string()
}
