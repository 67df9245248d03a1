//! Presentation normalizer. Every displayed value is derived here from a snapshot.
//!
//! All functions here are pure and total: an absent field at any depth turns
//! into [`PLACEHOLDER`], never into an error. Nothing is cached; callers
//! recompute on every frame from the stored snapshot.

use crate::snapshot::{LedgerEntry, PeerCompany, StockSnapshot};

/// Shown wherever a value is missing.
pub const PLACEHOLDER: &str = "-";

/// Prefix for prices. Values are interpolated verbatim, with no number formatting.
pub const CURRENCY: &str = "₹";

/// Total accessor: the value, or the placeholder when absent or empty.
pub fn field(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or(PLACEHOLDER)
}

/// A price with the currency prefix, or the bare placeholder.
pub fn money(value: Option<&str>) -> String {
    match value.filter(|v| !v.is_empty()) {
        Some(v) => format!("{CURRENCY}{v}"),
        None => PLACEHOLDER.to_string(),
    }
}

// ─── Change classification ──────────────────────────────────────────

/// Sign class of a signed-numeric-as-text value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeClass {
    Neutral,
    Negative,
    Positive,
}

/// Classify a change value.
///
/// Absent, `""` and `"NaN"` are neutral; a leading `-` is negative; anything
/// else is positive. Used for the headline change and for every peer row.
pub fn classify_change(value: Option<&str>) -> ChangeClass {
    let text = value.unwrap_or("");
    if text.is_empty() || text == "NaN" {
        ChangeClass::Neutral
    } else if text.starts_with('-') {
        ChangeClass::Negative
    } else {
        ChangeClass::Positive
    }
}

// ─── Financial metrics ──────────────────────────────────────────────

/// The metrics shown in the financials grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FinancialMetric {
    TotalRevenue,
    NetIncome,
    DilutedEpsExcludingExtraOrdItems,
    TotalAssets,
    TotalEquity,
}

impl FinancialMetric {
    /// Display order.
    pub const ALL: [FinancialMetric; 5] = [
        FinancialMetric::TotalRevenue,
        FinancialMetric::NetIncome,
        FinancialMetric::DilutedEpsExcludingExtraOrdItems,
        FinancialMetric::TotalAssets,
        FinancialMetric::TotalEquity,
    ];

    /// Ledger key as sent by the API.
    pub fn key(self) -> &'static str {
        match self {
            FinancialMetric::TotalRevenue => "TotalRevenue",
            FinancialMetric::NetIncome => "NetIncome",
            FinancialMetric::DilutedEpsExcludingExtraOrdItems => "DilutedEPSExcludingExtraOrdItems",
            FinancialMetric::TotalAssets => "TotalAssets",
            FinancialMetric::TotalEquity => "TotalEquity",
        }
    }

    pub fn label(self) -> String {
        humanize_key(self.key())
    }
}

/// Split a PascalCase key into words, keeping acronym runs together:
/// `DilutedEPSExcludingExtraOrdItems` → `Diluted EPS Excluding Extra Ord Items`.
pub fn humanize_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let mut out = String::with_capacity(key.len() + 8);
    for (i, &c) in chars.iter().enumerate() {
        if i > 0 && c.is_uppercase() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower) {
                out.push(' ');
            }
        }
        out.push(c);
    }
    out
}

/// Look up a metric value in the first financials period.
///
/// The income ledger wins over the balance ledger. An income entry with an
/// empty value falls through to the balance ledger, then to the placeholder.
pub fn financial_value<'a>(snapshot: Option<&'a StockSnapshot>, key: &str) -> &'a str {
    let Some(map) = snapshot.and_then(StockSnapshot::financial_map) else {
        return PLACEHOLDER;
    };
    ledger_value(&map.income, key)
        .or_else(|| ledger_value(&map.balance, key))
        .unwrap_or(PLACEHOLDER)
}

fn ledger_value<'a>(ledger: &'a [LedgerEntry], key: &str) -> Option<&'a str> {
    ledger
        .iter()
        .find(|entry| entry.key.as_deref() == Some(key))
        .and_then(|entry| entry.value.as_deref())
        .filter(|v| !v.is_empty())
}

/// One card of the financials grid.
#[derive(Debug, Clone, PartialEq)]
pub struct FinancialCard {
    pub metric: FinancialMetric,
    pub label: String,
    /// Currency-prefixed value, or the placeholder.
    pub value: String,
}

pub fn financial_cards(snapshot: Option<&StockSnapshot>) -> Vec<FinancialCard> {
    FinancialMetric::ALL
        .into_iter()
        .map(|metric| {
            let raw = financial_value(snapshot, metric.key());
            let value = if raw == PLACEHOLDER {
                PLACEHOLDER.to_string()
            } else {
                money(Some(raw))
            };
            FinancialCard {
                metric,
                label: metric.label(),
                value,
            }
        })
        .collect()
}

// ─── Price trend ────────────────────────────────────────────────────

/// Chart input: parallel value and label sequences in upstream order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceSeries {
    /// NSE price per sample; NaN where the sample is absent or non-numeric.
    pub values: Vec<f64>,
    /// `<days>D` per sample.
    pub labels: Vec<String>,
}

impl PriceSeries {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `(index, value)` chart points. NaN samples are skipped, leaving a gap.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_finite())
            .map(|(i, &v)| (i as f64, v))
            .collect()
    }

    /// Min and max over the plottable values.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        self.values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

pub fn price_series(snapshot: &StockSnapshot) -> PriceSeries {
    let samples = &snapshot.stock_technical_data;
    PriceSeries {
        values: samples
            .iter()
            .map(|s| parse_float(s.nse_price.as_deref()))
            .collect(),
        labels: samples
            .iter()
            .map(|s| format!("{}D", field(s.days.as_deref())))
            .collect(),
    }
}

/// Parse the longest numeric prefix after leading whitespace, like a lenient
/// float reader: `"12.5abc"` → 12.5, `"abc"` → NaN, absent → NaN.
pub fn parse_float(text: Option<&str>) -> f64 {
    let Some(text) = text else {
        return f64::NAN;
    };
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    if s[end..].starts_with("Infinity") {
        return if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let mut frac_end = end + 1;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        mantissa_digits += frac_end - (end + 1);
        end = frac_end;
    }
    if mantissa_digits == 0 {
        return f64::NAN;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }

    s[..end].parse().unwrap_or(f64::NAN)
}

// ─── Cards and peer rows ────────────────────────────────────────────

/// One overview card.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub title: &'static str,
    pub value: String,
    /// Set for cards colored by sign.
    pub change: Option<ChangeClass>,
}

/// The overview card set, in display order.
pub fn overview_cards(snapshot: &StockSnapshot) -> Vec<Card> {
    let plain = |title, value: String| Card {
        title,
        value,
        change: None,
    };
    let year_range = format!(
        "{} / {}",
        money(snapshot.year_high.as_deref()),
        money(snapshot.year_low.as_deref())
    );

    vec![
        plain("Company", field(snapshot.company_name.as_deref()).to_string()),
        plain("Industry", field(snapshot.industry.as_deref()).to_string()),
        plain("52W High / Low", year_range),
        plain("NSE Price", money(snapshot.nse_price())),
        plain("BSE Price", money(snapshot.bse_price())),
        Card {
            title: "Change",
            value: percent(snapshot.percent_change.as_deref()),
            change: Some(classify_change(snapshot.percent_change.as_deref())),
        },
    ]
}

fn percent(value: Option<&str>) -> String {
    match value.filter(|v| !v.is_empty()) {
        Some(v) => format!("{v}%"),
        None => PLACEHOLDER.to_string(),
    }
}

/// One row of the peer comparison table.
#[derive(Debug, Clone, PartialEq)]
pub struct PeerRow<'a> {
    pub company: &'a str,
    pub price: String,
    /// `<netChange> (<percentChange>%)`.
    pub change: String,
    pub change_class: ChangeClass,
    pub rating: &'a str,
}

impl<'a> From<&'a PeerCompany> for PeerRow<'a> {
    fn from(peer: &'a PeerCompany) -> Self {
        PeerRow {
            company: field(peer.company_name.as_deref()),
            price: money(peer.price.as_deref()),
            change: format!(
                "{} ({})",
                field(peer.net_change.as_deref()),
                percent(peer.percent_change.as_deref())
            ),
            change_class: classify_change(peer.percent_change.as_deref()),
            rating: field(peer.overall_rating.as_deref()),
        }
    }
}

pub fn peer_rows(snapshot: &StockSnapshot) -> Vec<PeerRow<'_>> {
    snapshot.peers().iter().map(PeerRow::from).collect()
}

/// Whether the peer table (and its export action) is shown.
pub fn has_peers(snapshot: Option<&StockSnapshot>) -> bool {
    snapshot.is_some_and(|s| !s.peers().is_empty())
}
