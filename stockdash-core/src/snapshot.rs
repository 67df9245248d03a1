//! Stock snapshot: the raw, possibly-partial API payload for one ticker.
//!
//! The upstream API is loosely typed: numbers arrive as strings or as JSON
//! numbers, whole sections go missing, and occasionally a section has the
//! wrong shape entirely. Every field here is optional and decodes leniently,
//! so a malformed section degrades to "absent" instead of failing the fetch.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::data::FetchError;

/// The full API response for one ticker at fetch time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockSnapshot {
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,

    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,

    /// 52-week high.
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub year_high: Option<String>,

    /// 52-week low.
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub year_low: Option<String>,

    #[serde(default, deserialize_with = "lenient::shape", skip_serializing_if = "Option::is_none")]
    pub current_price: Option<CurrentPrice>,

    /// Signed daily percent change, e.g. `"-1.5"`.
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub percent_change: Option<String>,

    /// Price samples in upstream order (used as a time series, never re-sorted).
    #[serde(default, deserialize_with = "lenient::list", skip_serializing_if = "Vec::is_empty")]
    pub stock_technical_data: Vec<TechnicalSample>,

    #[serde(default, deserialize_with = "lenient::list", skip_serializing_if = "Vec::is_empty")]
    pub financials: Vec<FinancialsEntry>,

    #[serde(default, deserialize_with = "lenient::shape", skip_serializing_if = "Option::is_none")]
    pub company_profile: Option<CompanyProfile>,
}

/// Current price per exchange.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentPrice {
    #[serde(rename = "NSE", default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub nse: Option<String>,

    #[serde(rename = "BSE", default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub bse: Option<String>,
}

/// One point of the price trend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalSample {
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub days: Option<String>,

    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub nse_price: Option<String>,
}

/// One financials period. Only the first period is displayed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialsEntry {
    #[serde(default, deserialize_with = "lenient::shape", skip_serializing_if = "Option::is_none")]
    pub stock_financial_map: Option<StockFinancialMap>,
}

/// The two sub-ledgers of a financials period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StockFinancialMap {
    /// Income-statement ledger.
    #[serde(rename = "INC", default, deserialize_with = "lenient::list", skip_serializing_if = "Vec::is_empty")]
    pub income: Vec<LedgerEntry>,

    /// Balance-sheet ledger.
    #[serde(rename = "BAL", default, deserialize_with = "lenient::list", skip_serializing_if = "Vec::is_empty")]
    pub balance: Vec<LedgerEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
    #[serde(default, deserialize_with = "lenient::list", skip_serializing_if = "Vec::is_empty")]
    pub peer_company_list: Vec<PeerCompany>,
}

/// A comparable company listed alongside the queried ticker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeerCompany {
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,

    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,

    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub net_change: Option<String>,

    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub percent_change: Option<String>,

    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub overall_rating: Option<String>,

    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl StockSnapshot {
    /// Decode a response body.
    ///
    /// Returns `Ok(None)` when the body carries no usable data: an empty body,
    /// or a falsy JSON value (`null`, `false`, `""`, `0`). Any JSON object,
    /// including `{}`, becomes a snapshot.
    pub fn from_body(body: &str) -> Result<Option<Self>, FetchError> {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        let value: Value = serde_json::from_str(trimmed)
            .map_err(|e| FetchError::Decode(format!("response is not valid JSON: {e}")))?;
        Self::from_value(value)
    }

    /// Decode an already-parsed JSON value. Same rules as [`Self::from_body`].
    pub fn from_value(value: Value) -> Result<Option<Self>, FetchError> {
        if is_falsy(&value) {
            return Ok(None);
        }
        if !value.is_object() {
            return Err(FetchError::Decode(format!(
                "expected a JSON object, got {}",
                json_kind(&value)
            )));
        }
        serde_json::from_value(value)
            .map(Some)
            .map_err(|e| FetchError::Decode(e.to_string()))
    }

    /// Peer list, empty when the profile is absent.
    pub fn peers(&self) -> &[PeerCompany] {
        self.company_profile
            .as_ref()
            .map(|p| p.peer_company_list.as_slice())
            .unwrap_or(&[])
    }

    /// Sub-ledgers of the first financials period.
    pub fn financial_map(&self) -> Option<&StockFinancialMap> {
        self.financials
            .first()
            .and_then(|f| f.stock_financial_map.as_ref())
    }

    pub fn nse_price(&self) -> Option<&str> {
        self.current_price.as_ref().and_then(|p| p.nse.as_deref())
    }

    pub fn bse_price(&self) -> Option<&str> {
        self.current_price.as_ref().and_then(|p| p.bse.as_deref())
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Field decoders that never fail on a wrong-typed value.
mod lenient {
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Any JSON scalar as text; containers and `null` become `None`.
    pub(super) fn text<'de, D>(de: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(de)?;
        Ok(match value {
            Some(Value::String(s)) => Some(s),
            Some(Value::Number(n)) => Some(n.to_string()),
            Some(Value::Bool(b)) => Some(b.to_string()),
            Some(other @ (Value::Array(_) | Value::Object(_))) => {
                tracing::debug!(?other, "non-scalar value in a text field, treating as absent");
                None
            }
            Some(Value::Null) | None => None,
        })
    }

    /// A nested object; anything that does not decode as `T` is absent.
    pub(super) fn shape<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        let value = Option::<Value>::deserialize(de)?;
        Ok(match value {
            None | Some(Value::Null) => None,
            Some(v) => match serde_json::from_value(v) {
                Ok(t) => Some(t),
                Err(e) => {
                    tracing::debug!(error = %e, "malformed section, treating as absent");
                    None
                }
            },
        })
    }

    /// An array; a non-array is empty, a malformed element is `T::default()`.
    ///
    /// Elements are kept in place rather than dropped so that positional
    /// series stay aligned with the upstream order.
    pub(super) fn list<'de, D, T>(de: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned + Default,
    {
        let value = Option::<Value>::deserialize(de)?;
        Ok(match value {
            Some(Value::Array(items)) => items
                .into_iter()
                .map(|item| {
                    serde_json::from_value(item).unwrap_or_else(|e| {
                        tracing::debug!(error = %e, "malformed list element, using defaults");
                        T::default()
                    })
                })
                .collect(),
            None | Some(Value::Null) => Vec::new(),
            Some(other) => {
                tracing::debug!(?other, "expected an array, treating as empty");
                Vec::new()
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_falsy_bodies_are_empty_results() {
        for body in ["", "   \n", "null", "false", "\"\"", "0"] {
            assert_eq!(StockSnapshot::from_body(body).unwrap(), None, "body {body:?}");
        }
    }

    #[test]
    fn empty_object_is_a_snapshot() {
        let snap = StockSnapshot::from_body("{}").unwrap().unwrap();
        assert_eq!(snap, StockSnapshot::default());
    }

    #[test]
    fn non_object_body_is_a_decode_error() {
        assert!(matches!(
            StockSnapshot::from_body("[1, 2]"),
            Err(FetchError::Decode(_))
        ));
        assert!(matches!(
            StockSnapshot::from_body("<html>"),
            Err(FetchError::Decode(_))
        ));
    }

    #[test]
    fn numbers_and_strings_both_decode_as_text() {
        let body = r#"{
            "companyName": "Infosys",
            "yearHigh": 2006.45,
            "yearLow": "1358.35",
            "percentChange": -1.5,
            "currentPrice": {"NSE": "1520.1", "BSE": 1519}
        }"#;
        let snap = StockSnapshot::from_body(body).unwrap().unwrap();
        assert_eq!(snap.company_name.as_deref(), Some("Infosys"));
        assert_eq!(snap.year_high.as_deref(), Some("2006.45"));
        assert_eq!(snap.year_low.as_deref(), Some("1358.35"));
        assert_eq!(snap.percent_change.as_deref(), Some("-1.5"));
        assert_eq!(snap.nse_price(), Some("1520.1"));
        assert_eq!(snap.bse_price(), Some("1519"));
    }

    #[test]
    fn wrong_shaped_sections_degrade_to_absent() {
        let body = r#"{
            "companyName": "X",
            "currentPrice": "n/a",
            "financials": {"oops": true},
            "companyProfile": [1, 2, 3],
            "industry": {"name": "IT"}
        }"#;
        let snap = StockSnapshot::from_body(body).unwrap().unwrap();
        assert_eq!(snap.company_name.as_deref(), Some("X"));
        assert!(snap.current_price.is_none());
        assert!(snap.financials.is_empty());
        assert!(snap.company_profile.is_none());
        assert!(snap.industry.is_none());
        assert!(snap.peers().is_empty());
        assert!(snap.financial_map().is_none());
    }

    #[test]
    fn malformed_list_elements_keep_their_position() {
        let body = r#"{"stockTechnicalData": [
            {"days": 5, "nsePrice": "100"},
            null,
            {"days": 30, "nsePrice": 110.5}
        ]}"#;
        let snap = StockSnapshot::from_body(body).unwrap().unwrap();
        assert_eq!(snap.stock_technical_data.len(), 3);
        assert_eq!(snap.stock_technical_data[1], TechnicalSample::default());
        assert_eq!(snap.stock_technical_data[2].days.as_deref(), Some("30"));
        assert_eq!(snap.stock_technical_data[2].nse_price.as_deref(), Some("110.5"));
    }

    #[test]
    fn financial_map_reads_first_period_only() {
        let body = r#"{"financials": [
            {"stockFinancialMap": {"INC": [{"key": "NetIncome", "value": "1"}]}},
            {"stockFinancialMap": {"INC": [{"key": "NetIncome", "value": "2"}]}}
        ]}"#;
        let snap = StockSnapshot::from_body(body).unwrap().unwrap();
        let map = snap.financial_map().unwrap();
        assert_eq!(map.income[0].value.as_deref(), Some("1"));
        assert!(map.balance.is_empty());
    }
}
