use catalog::products::Product;

pub const RELATED_LIMIT: usize = 4;

/// Products shown under a product page.
///
/// Same category when the product has one, otherwise same perfume type, otherwise anything.
/// The product itself is never included.
pub fn related_products<'a>(
    products: &'a [Product],
    product: &Product,
    limit: usize,
) -> Vec<&'a Product> {
    let shares = |other: &Product| match (product.category(), product.perfume_type()) {
        (Some(category), _) => other.category() == Some(category),
        (None, Some(perfume_type)) => other.perfume_type() == Some(perfume_type),
        (None, None) => true,
    };

    products
        .iter()
        .filter(|other| other.id != product.id && shares(*other))
        .take(limit)
        .collect()
}
