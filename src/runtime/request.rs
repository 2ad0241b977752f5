//! Request execution helpers shared by resources and the contact submission.

use futures::future::{AbortRegistration, Abortable};
use serde::de::DeserializeOwned;

use crate::{
    contact::{CONTACT_ENDPOINT, ValidContact},
    errors::ApiError,
    models::ContactResponse,
    runtime::CycleOutcome,
    transport::Transport,
};

/// Issue the GET of one fetch cycle and decode the body into `T`.
///
/// The request future is wrapped in [`Abortable`]; an abort resolves to
/// [`CycleOutcome::Canceled`] and drops the in-flight request.
pub async fn fetch_resource<T>(
    transport: &dyn Transport,
    endpoint: &str,
    registration: AbortRegistration,
) -> CycleOutcome<T>
where
    T: DeserializeOwned,
{
    let request = transport.get(endpoint);
    match Abortable::new(request, registration).await {
        Err(_aborted) => CycleOutcome::Canceled,
        Ok(Err(error)) => CycleOutcome::Settled(Err(error)),
        Ok(Ok(body)) => CycleOutcome::Settled(decode(&body)),
    }
}

/// POST a validated contact form and decode the answer.
///
/// A 2xx answer without a body counts as accepted; a body reporting
/// `success: false` is `ApiError::Rejected`.
pub async fn submit_contact(
    transport: &dyn Transport,
    contact: &ValidContact,
) -> Result<ContactResponse, ApiError> {
    let body = serde_json::to_value(contact.fields())?;
    let answer = transport.post(CONTACT_ENDPOINT, body).await?;

    if answer.trim().is_empty() {
        return Ok(ContactResponse {
            success: true,
            id: None,
        });
    }

    let response: ContactResponse = decode(&answer)?;
    if !response.success {
        return Err(ApiError::Rejected);
    }
    Ok(response)
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(ApiError::from)
}
