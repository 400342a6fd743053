//! # WhatsApp
//!
//! Orders and questions go through a WhatsApp chat with the shop, there is no checkout.
//!
//! - Product pages prefill an inquiry naming the product
//! - The contact page and footer open an empty chat
use catalog::products::Product;
use url::{ParseError, Url};

const WHATSAPP_BASE: &str = "https://wa.me/";
const INQUIRY_PREFIX: &str = "مرحباً، أرغب في الاستفسار عن ";

/// Chat link for `number`, which may be written with spaces or a leading `+`.
pub fn whatsapp_link(number: &str, text: &str) -> Result<Url, ParseError> {
    let digits: String = number.chars().filter(char::is_ascii_digit).collect();

    Url::parse_with_params(&format!("{WHATSAPP_BASE}{digits}"), &[("text", text)])
}

pub fn inquiry_link(number: &str, product: &Product) -> Result<Url, ParseError> {
    let name = product.name.as_deref().unwrap_or_default();

    whatsapp_link(number, &format!("{INQUIRY_PREFIX}{name}"))
}
