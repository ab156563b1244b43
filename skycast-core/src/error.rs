use thiserror::Error;

/// Failures a single lookup can surface. The first failing stage wins;
/// nothing is retried and no partial result is produced.
#[derive(Debug, Error)]
pub enum LookupError {
    /// Geocoding returned zero candidates for the query.
    #[error("no city found for '{city},{country_code}'")]
    NotFound { city: String, country_code: String },

    /// Geocoding's best candidate sits in a different country than the one
    /// requested. Guards against silently matching a same-named city
    /// elsewhere (e.g. Paris, US resolving to Paris, FR).
    #[error("best match for '{city}' is in {found}, not {requested}")]
    CountryMismatch {
        city: String,
        requested: String,
        found: String,
    },

    /// The provider answered with a non-success status.
    #[error("{stage} request failed with status {status}: {body}")]
    Unavailable {
        stage: &'static str,
        status: u16,
        body: String,
    },

    /// The request never completed (connection, TLS, timeout...).
    #[error("failed to reach the {stage} provider")]
    Http {
        stage: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The provider answered 200 with a body that did not parse.
    #[error("failed to decode the {stage} response")]
    Decode {
        stage: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The provider answered 200 but the payload was missing required data.
    #[error("{stage} response was missing {what}")]
    Malformed {
        stage: &'static str,
        what: &'static str,
    },

    /// Caller passed a blank city or country code.
    #[error("city and country code must both be non-empty")]
    EmptyInput,
}
