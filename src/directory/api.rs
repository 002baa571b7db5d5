use serde::Deserialize;

use super::record::Record;
use super::FetchError;

// Only the fields the engine indexes are decoded; everything else the
// directory sends back is ignored.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    results: Option<Vec<ApiUser>>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiUser {
    name: ApiName,
    email: String,
    phone: String,
    location: ApiLocation,
}

#[derive(Debug, Deserialize)]
struct ApiName {
    first: String,
    last: String,
}

#[derive(Debug, Deserialize)]
struct ApiLocation {
    city: String,
    country: String,
}

pub(in crate::directory) fn decode_records(body: &[u8]) -> Result<Vec<Record>, FetchError> {
    let response: ApiResponse =
        serde_json::from_slice(body).map_err(|e| FetchError::Decode { source: e })?;
    if let Some(message) = response.error {
        return Err(FetchError::Malformed { message });
    }
    let users = response.results.ok_or_else(|| FetchError::Malformed {
        message: "response has no `results` array".to_string(),
    })?;
    Ok(users
        .into_iter()
        .map(|u| {
            Record::new(
                &u.name.first,
                &u.name.last,
                &u.email,
                &u.phone,
                &u.location.city,
                &u.location.country,
            )
        })
        .collect())
}
