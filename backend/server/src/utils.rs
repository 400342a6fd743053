use url::form_urlencoded;

pub const MIN_PRICE_KEY: &str = "min_price";
pub const MAX_PRICE_KEY: &str = "max_price";

/// Slider bounds sent next to the filter keys.
///
/// Values that are not numbers are ignored. A missing bound means the open end of the range.
pub fn price_bounds(query: &str) -> Option<(f64, f64)> {
    let mut min = None;
    let mut max = None;

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        let slot = match &*key {
            MIN_PRICE_KEY => &mut min,
            MAX_PRICE_KEY => &mut max,
            _ => continue,
        };

        if slot.is_none() {
            *slot = value.trim().parse::<f64>().ok();
        }
    }

    if min.is_none() && max.is_none() {
        return None;
    }

    Some((min.unwrap_or(0.0), max.unwrap_or(f64::INFINITY)))
}
