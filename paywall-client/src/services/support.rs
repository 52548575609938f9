use crate::error::ApiResult;
use crate::http::HttpClient;
use crate::request::{resource_path, ApiRequest};
use crate::validate;
use paywall_types::{
    CreateTicketRequest, SupportCategory, SupportStatistics, SupportTicket, TicketFilters,
    TicketReply, TicketStatus, UpdateTicketRequest,
};
use tracing::error;

const TICKETS: &str = "/support/tickets";

#[derive(Debug, Clone)]
pub struct SupportService {
    http: HttpClient,
}

impl SupportService {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub async fn list_tickets(&self, filters: &TicketFilters) -> ApiResult<Vec<SupportTicket>> {
        let request = ApiRequest::get(TICKETS).query_pairs(filters.to_query());
        self.http
            .json(request)
            .await
            .inspect_err(|e| error!("Failed to fetch support tickets: {e}"))
    }

    pub async fn get_ticket(&self, id: &str) -> ApiResult<SupportTicket> {
        validate::required("Ticket id", id)?;
        self.http
            .record(ApiRequest::get(resource_path(TICKETS, id, "")))
            .await
            .inspect_err(|e| error!("Failed to fetch ticket {id}: {e}"))
    }

    pub async fn create_ticket(&self, ticket: &CreateTicketRequest) -> ApiResult<SupportTicket> {
        validate::required("Subject", &ticket.subject)?;
        validate::required("Description", &ticket.description)?;
        self.http
            .record(ApiRequest::post(TICKETS).json(ticket)?)
            .await
            .inspect_err(|e| error!("Failed to create ticket: {e}"))
    }

    pub async fn update_ticket(
        &self,
        id: &str,
        update: &UpdateTicketRequest,
    ) -> ApiResult<SupportTicket> {
        validate::required("Ticket id", id)?;
        self.http
            .record(ApiRequest::put(resource_path(TICKETS, id, "")).json(update)?)
            .await
            .inspect_err(|e| error!("Failed to update ticket {id}: {e}"))
    }

    pub async fn reply(&self, id: &str, message: &str) -> ApiResult<TicketReply> {
        validate::required("Ticket id", id)?;
        validate::required("Reply", message)?;
        let request = ApiRequest::post(resource_path(TICKETS, id, "/replies"))
            .json(&serde_json::json!({ "message": message }))?;
        self.http
            .record(request)
            .await
            .inspect_err(|e| error!("Failed to reply to ticket {id}: {e}"))
    }

    pub async fn close_ticket(&self, id: &str) -> ApiResult<SupportTicket> {
        self.update_ticket(
            id,
            &UpdateTicketRequest {
                status: Some(TicketStatus::Closed),
                ..Default::default()
            },
        )
        .await
    }

    pub async fn categories(&self) -> ApiResult<Vec<SupportCategory>> {
        self.http
            .json(ApiRequest::get("/support/categories"))
            .await
            .inspect_err(|e| error!("Failed to fetch support categories: {e}"))
    }

    pub async fn statistics(&self) -> ApiResult<SupportStatistics> {
        self.http
            .json(ApiRequest::get("/support/statistics"))
            .await
            .inspect_err(|e| error!("Failed to fetch support statistics: {e}"))
    }

    pub async fn export(&self, filters: &TicketFilters) -> ApiResult<Vec<u8>> {
        let request = ApiRequest::get("/support/tickets/export").query_pairs(filters.to_query());
        self.http
            .bytes(request)
            .await
            .inspect_err(|e| error!("Failed to export support tickets: {e}"))
    }
}
