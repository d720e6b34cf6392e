use std::convert::TryFrom;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, Url};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use super::wire;
use crate::banking::{
  self, ApiError, ApiResult, BankingApi, CustomerDetails, CustomerId, TransactionReceipt,
  TransactionRequest,
};

/// Implementation of [`BankingApi`] over HTTP with JSON bodies.
///
/// Requests use the transport defaults: no timeout, no retries, no cancellation.
#[derive(Debug, Clone)]
pub struct HttpBankingApi {
  client: Client,
  base_url: Url,
}

impl HttpBankingApi {
  /// Every endpoint is resolved relative to `base_url`, which usually ends with `/api`.
  pub fn new(base_url: Url) -> Self {
    Self {
      client: Client::new(),
      base_url: with_trailing_slash(base_url),
    }
  }

  fn endpoint(&self, path: &str) -> ApiResult<Url> {
    self.base_url.join(path).map_err(ApiError::transport)
  }

  /// Send the request and keep the response only if the server accepted it.
  async fn execute(&self, request: RequestBuilder) -> ApiResult<Response> {
    let response = request.send().await.map_err(ApiError::transport)?;
    let status = response.status();
    if status.is_success() {
      Ok(response)
    } else {
      let message = response
        .json::<wire::ErrorResponse>()
        .await
        .ok()
        .and_then(|body| body.error);
      warn!(status = status.as_u16(), error = ?message, "request rejected by the server");
      Err(ApiError::Application {
        status: status.as_u16(),
        message,
      })
    }
  }

  async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
    self
      .execute(request)
      .await?
      .json::<T>()
      .await
      .map_err(ApiError::transport)
  }
}

#[async_trait]
impl BankingApi for HttpBankingApi {
  #[instrument(skip(self))]
  async fn list_customers(&self) -> ApiResult<Vec<banking::Customer>> {
    debug!("GET customers");
    let url = self.endpoint("customers")?;
    let customers: Vec<wire::Customer> = self.fetch(self.client.get(url)).await?;
    customers
      .into_iter()
      .map(banking::Customer::try_from)
      .collect()
  }

  #[instrument(skip(self, details))]
  async fn create_customer(&self, details: CustomerDetails) -> ApiResult<banking::Customer> {
    debug!("POST customers");
    let url = self.endpoint("customers")?;
    let request = self
      .client
      .post(url)
      .json(&wire::CustomerPayload::from(details));
    let customer: wire::Customer = self.fetch(request).await?;
    banking::Customer::try_from(customer)
  }

  #[instrument(skip(self, details))]
  async fn update_customer(
    &self,
    id: CustomerId,
    details: CustomerDetails,
  ) -> ApiResult<banking::Customer> {
    debug!("PUT customer");
    let url = self.endpoint(&format!("customers/{}", id))?;
    let request = self
      .client
      .put(url)
      .json(&wire::CustomerPayload::from(details));
    let customer: wire::Customer = self.fetch(request).await?;
    banking::Customer::try_from(customer)
  }

  #[instrument(skip(self))]
  async fn delete_customer(&self, id: CustomerId) -> ApiResult<()> {
    debug!("DELETE customer");
    let url = self.endpoint(&format!("customers/{}", id))?;
    self.execute(self.client.delete(url)).await.map(|_| ())
  }

  #[instrument(skip(self, request), fields(kind = %request.kind))]
  async fn transact(
    &self,
    id: CustomerId,
    request: TransactionRequest,
  ) -> ApiResult<TransactionReceipt> {
    debug!(amount = %request.amount, "POST transaction");
    let url = self.endpoint(&format!("customers/{}/{}", id, request.kind))?;
    let request = self
      .client
      .post(url)
      .json(&wire::AmountRequest::from(request));
    let response: wire::MessageResponse = self.fetch(request).await?;
    Ok(response.into())
  }

  #[instrument(skip(self))]
  async fn balance(&self, id: CustomerId) -> ApiResult<Decimal> {
    debug!("GET balance");
    let url = self.endpoint(&format!("customers/{}/balance", id))?;
    let response: wire::BalanceResponse = self.fetch(self.client.get(url)).await?;
    Ok(response.balance)
  }

  #[instrument(skip(self))]
  async fn transactions(&self, id: CustomerId) -> ApiResult<Vec<banking::Transaction>> {
    debug!("GET transactions");
    let url = self.endpoint(&format!("customers/{}/transactions", id))?;
    let transactions: Vec<wire::Transaction> = self.fetch(self.client.get(url)).await?;
    transactions
      .into_iter()
      .map(banking::Transaction::try_from)
      .collect()
  }
}

/// Without the trailing slash, `Url::join` would replace the last path segment (`/api`).
fn with_trailing_slash(mut url: Url) -> Url {
  if !url.path().ends_with('/') {
    let path = format!("{}/", url.path());
    url.set_path(&path);
  }
  url
}

#[cfg(test)]
mod tests {

  use axum::{
    extract::Path,
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
  };
  use rust_decimal_macros::dec;
  use serde_json::{json, Value};

  use super::*;
  use crate::banking::TransactionKind;

  async fn spawn_server(router: Router) -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
      axum::serve(listener, router).await.unwrap();
    });
    Url::parse(&format!("http://{}/api", address)).unwrap()
  }

  fn customer_json(id: u32, first_name: &str, balance: f64) -> Value {
    json!({
      "id": id,
      "account_number": format!("ACC{:08}", id),
      "first_name": first_name,
      "last_name": "Rao",
      "email": format!("{}@bank.test", first_name.to_lowercase()),
      "phone": "9800000000",
      "balance": balance,
      "account_status": "pending",
      "kyc_verified": false,
      "created_at": "2024-03-05 10:30:00"
    })
  }

  fn details(first_name: &str) -> CustomerDetails {
    CustomerDetails {
      first_name: first_name.to_string(),
      last_name: "Rao".to_string(),
      email: "asha@bank.test".to_string(),
      phone: "9800000000".to_string(),
    }
  }

  #[test]
  fn base_url_gets_trailing_slash() {
    let cases = vec![
      ("http://localhost:5000/api", "http://localhost:5000/api/"),
      ("http://localhost:5000/api/", "http://localhost:5000/api/"),
      ("http://localhost:5000", "http://localhost:5000/"),
    ];

    for (input, expected) in cases {
      let url = with_trailing_slash(Url::parse(input).unwrap());
      assert_eq!(url.as_str(), expected);
    }
  }

  #[tokio::test]
  async fn list_customers_success() {
    let router = Router::new().route(
      "/api/customers",
      get(|| async {
        Json(json!([
          customer_json(1, "Asha", 100.0),
          customer_json(2, "Ravi", 250.5)
        ]))
      }),
    );
    let api = HttpBankingApi::new(spawn_server(router).await);

    let customers = api.list_customers().await.unwrap();

    assert_eq!(customers.len(), 2);
    assert_eq!(customers[0].id, 1);
    assert_eq!(customers[1].first_name, "Ravi");
    assert_eq!(customers[1].balance, dec!(250.5));
  }

  #[tokio::test]
  async fn create_customer_posts_details() {
    let router = Router::new().route(
      "/api/customers",
      post(|Json(body): Json<Value>| async move {
        let first_name = body["first_name"].as_str().unwrap_or_default().to_string();
        (StatusCode::CREATED, Json(customer_json(3, &first_name, 0.0)))
      }),
    );
    let api = HttpBankingApi::new(spawn_server(router).await);

    let customer = api.create_customer(details("Meera")).await.unwrap();

    assert_eq!(customer.id, 3);
    assert_eq!(customer.first_name, "Meera");
    assert_eq!(customer.balance, dec!(0));
  }

  #[tokio::test]
  async fn update_and_delete_customer() {
    let router = Router::new().route(
      "/api/customers/:id",
      put(|Path(id): Path<u32>, Json(body): Json<Value>| async move {
        let first_name = body["first_name"].as_str().unwrap_or_default().to_string();
        Json(customer_json(id, &first_name, 10.0))
      })
      .delete(|Path(_id): Path<u32>| async { StatusCode::NO_CONTENT }),
    );
    let api = HttpBankingApi::new(spawn_server(router).await);

    let customer = api.update_customer(5, details("Kiran")).await.unwrap();
    assert_eq!(customer.id, 5);
    assert_eq!(customer.first_name, "Kiran");

    assert_eq!(api.delete_customer(5).await, Ok(()));
  }

  #[tokio::test]
  async fn transact_sends_amount_and_destination() {
    let router = Router::new().route(
      "/api/customers/:id/:kind",
      post(
        |Path((id, kind)): Path<(u32, String)>, Json(body): Json<Value>| async move {
          let destination = body
            .get("to_customer_id")
            .map(|value| value.to_string())
            .unwrap_or_else(|| "-".to_string());
          Json(json!({
            "message": format!("{} {} {} {}", kind, id, body["amount"], destination)
          }))
        },
      ),
    );
    let api = HttpBankingApi::new(spawn_server(router).await);

    let deposit = api
      .transact(1, TransactionRequest::deposit(dec!(100)))
      .await
      .unwrap();
    let transfer = api
      .transact(1, TransactionRequest::transfer(dec!(25.5), 2))
      .await
      .unwrap();

    assert_eq!(deposit.message, "deposit 1 100.0 -");
    assert_eq!(deposit.fraud_alert, None);
    assert_eq!(transfer.message, "transfer 1 25.5 2");
  }

  #[tokio::test]
  async fn transact_reports_fraud_alert() {
    let router = Router::new().route(
      "/api/customers/:id/withdraw",
      post(|| async {
        Json(json!({
          "message": "Withdrawal successful",
          "new_balance": 10.0,
          "fraud_alert": "Transaction flagged for review"
        }))
      }),
    );
    let api = HttpBankingApi::new(spawn_server(router).await);

    let receipt = api
      .transact(1, TransactionRequest::withdraw(dec!(90000)))
      .await
      .unwrap();

    assert_eq!(
      receipt,
      TransactionReceipt {
        message: "Withdrawal successful".to_string(),
        fraud_alert: Some("Transaction flagged for review".to_string()),
      }
    );
  }

  #[tokio::test]
  async fn application_error_with_server_message() {
    let router = Router::new().route(
      "/api/customers/:id/deposit",
      post(|| async {
        (
          StatusCode::NOT_FOUND,
          Json(json!({ "error": "Customer not found" })),
        )
      }),
    );
    let api = HttpBankingApi::new(spawn_server(router).await);

    let result = api.transact(42, TransactionRequest::deposit(dec!(10))).await;

    assert_eq!(
      result,
      Err(ApiError::Application {
        status: 404,
        message: Some("Customer not found".to_string()),
      })
    );
  }

  #[tokio::test]
  async fn application_error_without_json_body() {
    let router = Router::new().route(
      "/api/customers/:id/balance",
      get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error") }),
    );
    let api = HttpBankingApi::new(spawn_server(router).await);

    let result = api.balance(1).await;

    assert_eq!(
      result,
      Err(ApiError::Application {
        status: 500,
        message: None,
      })
    );
  }

  #[tokio::test]
  async fn balance_success() {
    let router = Router::new().route(
      "/api/customers/:id/balance",
      get(|| async { Json(json!({ "balance": 350.5 })) }),
    );
    let api = HttpBankingApi::new(spawn_server(router).await);

    assert_eq!(api.balance(1).await, Ok(dec!(350.5)));
  }

  #[tokio::test]
  async fn transactions_success() {
    let router = Router::new()
      .route(
        "/api/customers/1/transactions",
        get(|| async {
          Json(json!([{
            "id": 10,
            "customer_id": 1,
            "transaction_type": "withdraw",
            "amount": 50.0,
            "balance_after": 50.0,
            "description": "Cash withdrawal of ₹50.0",
            "related_customer_id": null,
            "created_at": "2024-03-05 10:30:00"
          }]))
        }),
      )
      .route(
        "/api/customers/2/transactions",
        get(|| async { Json(json!([])) }),
      );
    let api = HttpBankingApi::new(spawn_server(router).await);

    let transactions = api.transactions(1).await.unwrap();
    assert_eq!(transactions.len(), 1);
    assert_eq!(transactions[0].kind, TransactionKind::Withdraw);
    assert_eq!(transactions[0].balance_after, dec!(50));

    assert_eq!(api.transactions(2).await, Ok(vec![]));
  }

  #[tokio::test]
  async fn malformed_success_body_is_a_transport_error() {
    let router = Router::new().route(
      "/api/customers",
      get(|| async { Json(json!({ "customers": [] })) }),
    );
    let api = HttpBankingApi::new(spawn_server(router).await);

    let result = api.list_customers().await;

    assert!(matches!(result, Err(ApiError::Transport(_))));
  }

  #[tokio::test]
  async fn unreachable_server_is_a_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);
    let api = HttpBankingApi::new(Url::parse(&format!("http://{}/api", address)).unwrap());

    let result = api.list_customers().await;

    assert!(matches!(result, Err(ApiError::Transport(_))));
  }
}
