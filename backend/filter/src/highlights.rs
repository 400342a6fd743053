//! Home page sections.
use std::cmp::Ordering;

use catalog::products::Product;

pub const BEST_SELLING_LIMIT: usize = 4;
pub const NEW_ARRIVALS_LIMIT: usize = 8;

/// Highest rated first. Unrated products only fill the slots rated ones leave, in catalog order.
pub fn best_selling(products: &[Product], limit: usize) -> Vec<&Product> {
    top_by(products, limit, |a, b| {
        let rating = |p: &Product| p.rating.filter(|rating| !rating.is_nan());

        match (rating(a), rating(b)) {
            (Some(a), Some(b)) => b.total_cmp(&a),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    })
}

/// Newest first, undated last.
pub fn new_arrivals(products: &[Product], limit: usize) -> Vec<&Product> {
    top_by(products, limit, |a, b| b.created_at.cmp(&a.created_at))
}

fn top_by<F>(products: &[Product], limit: usize, compare: F) -> Vec<&Product>
where
    F: Fn(&Product, &Product) -> Ordering,
{
    let mut sorted: Vec<&Product> = products.iter().collect();

    // stable, ties keep catalog order
    sorted.sort_by(|a, b| compare(*a, *b));
    sorted.truncate(limit);
    sorted
}
