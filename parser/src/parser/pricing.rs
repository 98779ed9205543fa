//! Display-price resolution and decomposition.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use handle_feed_core::{SOLD_PRICE, format_amount, price_amount};

/// Outcome of pricing one record.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPrice {
    /// Display string: `SOLD`, `$N`, `$N (D% off $M)`, or the raw text.
    pub price: String,
    pub is_sold: bool,
    /// Percent actually applied, if any.
    pub applied_discount: Option<u32>,
    /// `false` when a non-sold price had no leading number.
    pub parsed: bool,
}

/// Resolves the display price of one record.
///
/// An inline discount above zero takes precedence over `global_discount`.
/// Discounted amounts are floored, never rounded.
pub fn resolve_price(
    raw_price_or_status: &str,
    inline_discount: Option<u32>,
    global_discount: u32,
) -> ResolvedPrice {
    let raw = raw_price_or_status.trim();

    if raw.eq_ignore_ascii_case("sold") {
        return ResolvedPrice {
            price: SOLD_PRICE.to_string(),
            is_sold: true,
            applied_discount: None,
            parsed: true,
        };
    }

    let Some(amount) = price_amount(raw) else {
        return ResolvedPrice {
            price: raw.to_string(),
            is_sold: false,
            applied_discount: None,
            parsed: false,
        };
    };

    let discount = inline_discount
        .filter(|percent| *percent > 0)
        .unwrap_or(global_discount);

    if discount == 0 {
        return ResolvedPrice {
            price: format!("${}", format_amount(amount)),
            is_sold: false,
            applied_discount: None,
            parsed: true,
        };
    }

    let discounted = amount * (1.0 - f64::from(discount) / 100.0);
    ResolvedPrice {
        price: format!(
            "${} ({discount}% off ${})",
            format_amount(discounted.floor()),
            format_amount(amount)
        ),
        is_sold: false,
        applied_discount: Some(discount),
        parsed: true,
    }
}

/// A display price split into the parts a price badge shows.
///
/// # Examples
///
/// ```
/// use handle_feed_parser::parser::PriceTag;
///
/// let tag = PriceTag::parse("$20 (50% off $40)");
/// assert_eq!(tag.display, "$20");
/// assert_eq!(tag.original.as_deref(), Some("$40"));
/// assert_eq!(tag.discount_percent, Some(50));
///
/// let plain = PriceTag::parse("SOLD");
/// assert_eq!(plain.display, "SOLD");
/// assert!(!plain.has_discount());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceTag {
    pub display: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_percent: Option<u32>,
}

impl PriceTag {
    pub fn parse(price: &str) -> Self {
        static DISCOUNTED_RE: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"\$([0-9]+(?:\.[0-9]+)?)\s*\(([0-9]+)%\s*off\s*\$([0-9]+(?:\.[0-9]+)?)\)")
                .expect("static regex must compile")
        });

        if price != SOLD_PRICE {
            if let Some(caps) = DISCOUNTED_RE.captures(price) {
                return Self {
                    display: format!("${}", &caps[1]),
                    original: Some(format!("${}", &caps[3])),
                    discount_percent: caps[2].parse().ok(),
                };
            }
        }

        Self {
            display: price.to_string(),
            original: None,
            discount_percent: None,
        }
    }

    pub fn has_discount(&self) -> bool {
        self.original.is_some()
    }
}
