/// Average month length in days used to spread a monthly inflation rate.
pub const DAYS_PER_MONTH: f64 = 30.4375;

/// Average year length in days used to annualize yields.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Minutes in one day.
pub const MINUTES_PER_DAY: f64 = 1440.0;

/// Months in a complete inflation year.
pub const MONTHS_PER_YEAR: usize = 12;

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Default dividend withholding tax, percent.
pub const DEFAULT_TAX_PERCENT: f64 = 13.0;
