//! # Frontend Contract
//!
//! What the RTL frontend can rely on.
//!
//! ## Products Page
//!
//! ### Query String
//! - `category`: comma separated, e.g. `?category=نسائي,للجنسين`
//! - `perfume_type`: comma separated
//! - `search`: free text, trimmed
//! - Any other key is left alone
//!
//! Values are split on `,`, so a category or perfume type containing a comma can never be
//! selected. The dashboard refuses such labels and `process` turns commas into spaces.
//!
//! Tokens that are not in the current catalog are dropped silently. Links from the home page
//! category tiles use `category` alone.
//!
//! ### Price Slider
//! - Range is `[0, max price of the catalog]`, 500 when no product has a price
//! - Products without a price are listed as if they cost 0
//! - Sent as `min_price`/`max_price` to the API, never kept in the shared URL
//!
//! ### History
//! Filter changes replace the current history entry, back leaves the products page.
//!
//! ## Product Page
//! - Up to 4 related products: same category, else same perfume type
//! - WhatsApp button opens `https://wa.me/<number>?text=` with the product name prefilled
//!
//! ## Home Page
//! - 4 best rated products, 8 newest
//! - Carousel from active banners, two built-in slides when there are none
//!
//! ## Dashboard
//! - Products and banners listed newest first, inactive banners included
//! - Product form: name, price and category required, description, perfume type and image urls
//!   optional
//! - Banner form: image url and title required, link defaults to `/products`, active by default
//! - Send `Authorization: Bearer <token>` when the server has an `ADMIN_TOKEN` secret
