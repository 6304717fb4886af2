/// Scales a whole-unit amount to base units (`amount * 10^decimals`).
/// Returns `None` on overflow.
pub fn to_base_units(amount: u64, decimals: u8) -> Option<u64> {
    10u64
        .checked_pow(decimals as u32)
        .and_then(|scale| amount.checked_mul(scale))
}

/// Renders a base-unit amount with its decimal point, trimming trailing zeros.
pub fn to_ui_amount(amount: u64, decimals: u8) -> String {
    let decimals = decimals as usize;
    let digits = format!("{:0>width$}", amount, width = decimals + 1);
    let (whole, frac) = digits.split_at(digits.len() - decimals);
    let frac = frac.trim_end_matches('0');
    if frac.is_empty() {
        whole.to_string()
    } else {
        format!("{}.{}", whole, frac)
    }
}
