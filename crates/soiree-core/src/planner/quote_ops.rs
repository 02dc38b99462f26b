//! Quote request operations.

use jiff::civil;
use log::{info, warn};

use super::EventPlanner;
use crate::{
    error::{PlanningError, Result},
    params::RequestQuote,
    quote::{QuoteDraft, QuoteReceipt, SendQuotes},
};

impl EventPlanner {
    /// Builds a quote draft from the parameters and submits it.
    ///
    /// With an `event_id` the draft is pre-filled from that event; the
    /// contact and date fields in `params` override whatever it holds.
    pub async fn request_quote(&self, params: &RequestQuote) -> Result<QuoteReceipt> {
        let mut draft = match params.event_id {
            Some(id) => QuoteDraft::from_event(&self.api.get_event(id).await?),
            None => QuoteDraft::default(),
        };

        draft.vendors = params.vendors.clone();
        draft.venues = params.venues.clone();
        draft.mode = params.mode;
        draft.expand_to_network = params.expand_to_network;
        draft.notify_vendors = params.notify_vendors;
        if let Some(name) = &params.client_name {
            draft.client_name = name.clone();
        }
        if let Some(email) = &params.client_email {
            draft.client_email = email.clone();
        }
        if let Some(phone) = &params.client_phone {
            draft.client_phone = phone.clone();
        }
        if let Some(date) = &params.event_date {
            let parsed = date.trim().parse::<civil::Date>().map_err(|e| {
                PlanningError::invalid_input("eventDate").with_reason(e.to_string())
            })?;
            draft.event_date = Some(parsed);
        }
        if let Some(message) = &params.message {
            draft.message = message.clone();
        }

        self.submit_quote(&draft).await
    }

    /// Submits a composed quote draft.
    ///
    /// When the draft asks for it and came from a stored event, the picked
    /// vendors are also notified through that event. A failed notification
    /// is logged and reported through `sent_to_vendors`.
    pub async fn submit_quote(&self, draft: &QuoteDraft) -> Result<QuoteReceipt> {
        let request = draft.compose()?;
        let mut receipt = self.api.create_quote_request(&request).await?;
        info!(
            "Submitted {} quote request for {} vendors and {} venues",
            request.quote_type.as_str(),
            request.vendor_ids.len(),
            request.venue_ids.len()
        );

        if let (true, Some(event_id)) = (draft.notify_vendors, draft.origin_event_id) {
            let body = SendQuotes {
                vendor_ids: request.vendor_ids.clone(),
                venue_ids: request.venue_ids.clone(),
                quote_request_id: receipt.id,
            };
            match self.api.send_quotes(event_id, &body).await {
                Ok(_) => receipt.sent_to_vendors = true,
                Err(e) => warn!("Quote request saved but vendors were not notified: {e}"),
            }
        }

        Ok(receipt)
    }
}
