use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;

/// Anything outside this range is page noise (fees, counters, totals).
pub const MIN_LISTING_PRICE: f64 = 1.0;
pub const MAX_LISTING_PRICE: f64 = 5000.0;

const OFFER_PRICE_KEYS: [&str; 5] = ["price", "lowPrice", "highPrice", "minPrice", "maxPrice"];
const AGGREGATE_PRICE_KEYS: [&str; 3] = ["lowPrice", "highPrice", "price"];

lazy_static! {
    static ref SCRIPT_BLOCK: Regex =
        Regex::new(r"(?is)<script([^>]*)>(.*?)</script>").unwrap();

    static ref INLINE_PRICE: Regex = Regex::new(
        r#""(?:price|minPrice|maxPrice|lowPrice|highPrice)"\s*:\s*"?\$?([0-9][0-9,]*(?:\.[0-9]+)?)"#
    ).unwrap();

    static ref DOLLAR_AMOUNT: Regex =
        Regex::new(r"\$\s*([0-9]{1,3}(?:,[0-9]{3})+(?:\.[0-9]{1,2})?|[0-9]+(?:\.[0-9]{1,2})?)").unwrap();
}

fn accept(price: f64) -> Option<f64> {
    (price.is_finite() && (MIN_LISTING_PRICE..=MAX_LISTING_PRICE).contains(&price)).then_some(price)
}

fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw.trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    cleaned.parse::<f64>().ok().and_then(accept)
}

fn value_price(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64().and_then(accept),
        Value::String(s) => parse_amount(s),
        _ => None,
    }
}

fn collect_offer(offer: &Value, out: &mut Vec<f64>) {
    for key in OFFER_PRICE_KEYS {
        out.extend(value_price(offer.get(key)));
    }
    if let Some(spec) = offer.get("priceSpecification") {
        out.extend(value_price(spec.get("price")));
    }
}

fn collect_structured(data: &Value, out: &mut Vec<f64>) {
    match data {
        Value::Array(items) => {
            for item in items {
                collect_structured(item, out);
            }
        }
        Value::Object(obj) => {
            if let Some(graph) = obj.get("@graph") {
                collect_structured(graph, out);
            }

            match obj.get("offers") {
                Some(Value::Array(offers)) => {
                    for offer in offers {
                        collect_offer(offer, out);
                    }
                }
                Some(offer @ Value::Object(_)) => collect_offer(offer, out),
                _ => {}
            }

            let aggregate = obj.get("aggregateOffer")
                .or_else(|| obj.get("offers").and_then(|o| o.get("aggregateOffer")));
            if let Some(agg) = aggregate {
                for key in AGGREGATE_PRICE_KEYS {
                    out.extend(value_price(agg.get(key)));
                }
            }
        }
        _ => {}
    }
}

/// Pull listing prices out of an event page.
///
/// Structured `ld+json` offers come first, then `"price": …` style keys in
/// other inline scripts, then every visible `$x.xx` amount on the page.
/// Repeats are kept: each hit counts as one listing.
pub fn extract_listing_prices(html: &str) -> Vec<f64> {
    let mut prices = Vec::new();

    for caps in SCRIPT_BLOCK.captures_iter(html) {
        let attrs = caps.get(1).map_or("", |m| m.as_str());
        let body = caps.get(2).map_or("", |m| m.as_str());

        if attrs.to_ascii_lowercase().contains("application/ld+json") {
            // Malformed blobs are common, skip them
            if let Ok(data) = serde_json::from_str::<Value>(body.trim()) {
                collect_structured(&data, &mut prices);
            }
        } else {
            for m in INLINE_PRICE.captures_iter(body) {
                prices.extend(parse_amount(&m[1]));
            }
        }
    }

    for m in DOLLAR_AMOUNT.captures_iter(html) {
        prices.extend(parse_amount(&m[1]));
    }

    prices
}
