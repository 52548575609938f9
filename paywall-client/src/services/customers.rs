use crate::error::ApiResult;
use crate::http::HttpClient;
use crate::request::{resource_path, ApiRequest};
use crate::validate;
use paywall_types::{
    CreateCustomerRequest, Customer, CustomerAnalytics, CustomerFilters, CustomerSegment,
    UpdateCustomerRequest,
};
use tracing::error;

#[derive(Debug, Clone)]
pub struct CustomerService {
    http: HttpClient,
}

impl CustomerService {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub async fn list(&self, filters: &CustomerFilters) -> ApiResult<Vec<Customer>> {
        let request = ApiRequest::get("/customers").query_pairs(filters.to_query());
        self.http
            .json(request)
            .await
            .inspect_err(|e| error!("Failed to fetch customers: {e}"))
    }

    pub async fn get(&self, id: &str) -> ApiResult<Customer> {
        validate::required("Customer id", id)?;
        self.http
            .record(ApiRequest::get(resource_path("/customers", id, "")))
            .await
            .inspect_err(|e| error!("Failed to fetch customer {id}: {e}"))
    }

    pub async fn create(&self, customer: &CreateCustomerRequest) -> ApiResult<Customer> {
        validate::required("Name", &customer.name)?;
        validate::email("Email", &customer.email)?;
        self.http
            .record(ApiRequest::post("/customers").json(customer)?)
            .await
            .inspect_err(|e| error!("Failed to create customer: {e}"))
    }

    pub async fn update(&self, id: &str, update: &UpdateCustomerRequest) -> ApiResult<Customer> {
        validate::required("Customer id", id)?;
        if let Some(email) = &update.email {
            validate::email("Email", email)?;
        }
        self.http
            .record(ApiRequest::put(resource_path("/customers", id, "")).json(update)?)
            .await
            .inspect_err(|e| error!("Failed to update customer {id}: {e}"))
    }

    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        validate::required("Customer id", id)?;
        self.http
            .execute(ApiRequest::delete(resource_path("/customers", id, "")))
            .await
            .inspect_err(|e| error!("Failed to delete customer {id}: {e}"))
    }

    pub async fn segments(&self) -> ApiResult<Vec<CustomerSegment>> {
        self.http
            .json(ApiRequest::get("/customers/segments"))
            .await
            .inspect_err(|e| error!("Failed to fetch customer segments: {e}"))
    }

    pub async fn analytics(&self) -> ApiResult<CustomerAnalytics> {
        self.http
            .json(ApiRequest::get("/customers/analytics"))
            .await
            .inspect_err(|e| error!("Failed to fetch customer analytics: {e}"))
    }

    /// Downloads the CSV export for the filtered customer list.
    pub async fn export(&self, filters: &CustomerFilters) -> ApiResult<Vec<u8>> {
        let request = ApiRequest::get("/customers/export").query_pairs(filters.to_query());
        self.http
            .bytes(request)
            .await
            .inspect_err(|e| error!("Failed to export customers: {e}"))
    }
}
