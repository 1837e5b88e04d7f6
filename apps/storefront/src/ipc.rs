//! # JSON-Lines IPC
//!
//! Request/response loop between the frontend and the session.
//!
//! ## Wire Format
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  stdin  (one request per line)                                         │
//! │    {"id": 7, "cmd": "add_to_cart",                                     │
//! │     "args": {"productId": "classic-tee",                               │
//! │              "selection": {"Color": "Red", "Size": "M"}}}              │
//! │                                                                         │
//! │  stdout (one response per request, same order)                         │
//! │    {"id": 7, "ok": { ... }}                                            │
//! │    {"id": 7, "error": {"code": "UNAVAILABLE", "message": "..."}}       │
//! │                                                                         │
//! │  Blank lines are ignored. End of input ends the session.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Commands
//! | cmd                 | args                                          |
//! |---------------------|-----------------------------------------------|
//! | `list_products`     | none                                          |
//! | `get_product`       | `productId`                                   |
//! | `option_values`     | `productId`, `optionName`, `selection?`       |
//! | `choose_option`     | `productId`, `optionName`, `value`, `selection?` |
//! | `resolve_selection` | `productId`, `selection?`                     |
//! | `get_cart`          | none                                          |
//! | `add_to_cart`       | `productId`, `variantId?`, `selection?`       |
//! | `remove_from_cart`  | `variantId`                                   |
//! | `clear_cart`        | none                                          |
//! | `get_config`        | none                                          |

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, error, warn};

use crate::commands::{cart, config, product};
use crate::error::ApiError;
use crate::state::{CartState, CatalogState, ConfigState, SessionSummary};

// =============================================================================
// Messages
// =============================================================================

/// One line of input.
#[derive(Debug, Clone, Deserialize)]
pub struct Request {
    /// Echoed back unchanged; any JSON value.
    #[serde(default)]
    pub id: Option<Value>,
    pub cmd: String,
    #[serde(default)]
    pub args: Value,
}

/// One line of output.
#[derive(Debug, Clone, Serialize)]
pub struct Response {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(flatten)]
    pub body: ResponseBody,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseBody {
    Ok(Value),
    Error(ApiError),
}

impl Response {
    pub fn is_ok(&self) -> bool {
        matches!(self.body, ResponseBody::Ok(_))
    }
}

// =============================================================================
// Session
// =============================================================================

/// Everything one running session owns.
#[derive(Debug)]
pub struct Session {
    pub catalog: CatalogState,
    pub cart: CartState,
    pub config: ConfigState,
}

impl Session {
    pub fn new(catalog: CatalogState, cart: CartState, config: ConfigState) -> Self {
        Session {
            catalog,
            cart,
            config,
        }
    }

    /// Runs one request to completion.
    pub async fn dispatch(&self, request: Request) -> Response {
        let body = match self.handle(&request.cmd, request.args).await {
            Ok(value) => ResponseBody::Ok(value),
            Err(err) => {
                debug!(cmd = %request.cmd, code = ?err.code, message = %err.message, "Command failed");
                ResponseBody::Error(err)
            }
        };

        Response {
            id: request.id,
            body,
        }
    }

    async fn handle(&self, cmd: &str, args: Value) -> Result<Value, ApiError> {
        match cmd {
            "list_products" => to_value(product::list_products(&self.catalog)),
            "get_product" => {
                let a: product::ProductArgs = parse_args(args)?;
                to_value(product::get_product(&self.catalog, &a.product_id)?)
            }
            "option_values" => {
                let a: product::OptionValuesArgs = parse_args(args)?;
                to_value(product::option_values(
                    &self.catalog,
                    &a.product_id,
                    &a.option_name,
                    &a.selection,
                )?)
            }
            "choose_option" => {
                let a: product::ChooseOptionArgs = parse_args(args)?;
                to_value(product::choose_option(
                    &self.catalog,
                    &a.product_id,
                    &a.option_name,
                    &a.value,
                    &a.selection,
                )?)
            }
            "resolve_selection" => {
                let a: product::SelectionArgs = parse_args(args)?;
                to_value(product::resolve_selection(
                    &self.catalog,
                    &a.product_id,
                    &a.selection,
                )?)
            }
            "get_cart" => to_value(cart::get_cart(&self.cart, &self.config)),
            "add_to_cart" => {
                let a: cart::AddToCartArgs = parse_args(args)?;
                to_value(
                    cart::add_to_cart(
                        &self.catalog,
                        &self.cart,
                        &self.config,
                        &a.product_id,
                        a.variant_id.as_deref(),
                        &a.selection,
                    )
                    .await?,
                )
            }
            "remove_from_cart" => {
                let a: cart::RemoveFromCartArgs = parse_args(args)?;
                to_value(cart::remove_from_cart(&self.cart, &self.config, &a.variant_id)?)
            }
            "clear_cart" => to_value(cart::clear_cart(&self.cart, &self.config)),
            "get_config" => to_value(config::get_config(&self.config)),
            other => Err(ApiError::bad_request(format!("Unknown command: {}", other))),
        }
    }

    /// Ends the session and returns what was in the cart.
    pub fn end(&self) -> SessionSummary {
        self.cart.end_session()
    }
}

fn parse_args<T: DeserializeOwned>(args: Value) -> Result<T, ApiError> {
    let args = if args.is_null() {
        Value::Object(Default::default())
    } else {
        args
    };
    serde_json::from_value(args).map_err(|e| ApiError::bad_request(format!("Invalid args: {}", e)))
}

fn to_value<T: Serialize>(value: T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| {
        error!("Response serialization failed: {}", e);
        ApiError::internal("Response could not be serialized")
    })
}

// =============================================================================
// Loop
// =============================================================================

/// Serves requests until `reader` reaches end of input, then ends the
/// session.
///
/// Requests run one at a time, so responses come back in request order.
pub async fn serve<R, W>(session: &Session, reader: R, mut writer: W) -> std::io::Result<SessionSummary>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<Request>(line) {
            Ok(request) => session.dispatch(request).await,
            Err(e) => {
                warn!(error = %e, "Malformed request line");
                Response {
                    id: None,
                    body: ResponseBody::Error(ApiError::bad_request(format!(
                        "Malformed request: {}",
                        e
                    ))),
                }
            }
        };

        let mut out = serde_json::to_vec(&response)?;
        out.push(b'\n');
        writer.write_all(&out).await?;
        writer.flush().await?;
    }

    Ok(session.end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn session() -> Session {
        let config = ConfigState {
            add_delay_ms: 0,
            ..ConfigState::default()
        };
        Session::new(CatalogState::bundled().unwrap(), CartState::new(), config)
    }

    async fn run(session: &Session, input: &str) -> (Vec<Value>, SessionSummary) {
        let mut output = Vec::new();
        let summary = serve(session, input.as_bytes(), &mut output).await.unwrap();
        let responses = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        (responses, summary)
    }

    #[tokio::test]
    async fn test_shopping_session() {
        let session = session();
        let input = [
            json!({"id": 1, "cmd": "choose_option",
                   "args": {"productId": "classic-tee", "optionName": "Color", "value": "Red"}}),
            json!({"id": 2, "cmd": "choose_option",
                   "args": {"productId": "classic-tee", "optionName": "Size", "value": "S",
                            "selection": {"Color": "Red"}}}),
            json!({"id": 3, "cmd": "add_to_cart",
                   "args": {"productId": "classic-tee", "selection": {"Color": "Red", "Size": "S"}}}),
            json!({"id": 4, "cmd": "add_to_cart",
                   "args": {"productId": "enamel-mug", "selection": {"Title": "Default Title"}}}),
            json!({"id": 5, "cmd": "add_to_cart",
                   "args": {"productId": "classic-tee", "selection": {"Color": "Red", "Size": "S"}}}),
            json!({"id": 6, "cmd": "get_cart"}),
        ]
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("\n");

        let (responses, summary) = run(&session, &input).await;

        assert_eq!(responses.len(), 6);
        assert_eq!(responses[0]["ok"]["resolution"], "incomplete");
        assert_eq!(responses[1]["ok"]["resolution"], "matched");
        assert_eq!(responses[2]["ok"]["outcome"]["kind"], "inserted");
        assert_eq!(responses[4]["ok"]["outcome"]["quantity"], 2);

        let cart = &responses[5]["ok"];
        assert_eq!(responses[5]["id"], 6);
        assert_eq!(cart["itemCount"], 3);
        assert_eq!(cart["totalPrice"], "25.50");
        assert_eq!(cart["mixedCurrency"], false);

        assert_eq!(summary.item_count, 3);
        assert!(session.cart.with_cart(|c| c.is_empty()));
    }

    #[tokio::test]
    async fn test_errors_do_not_end_session() {
        let session = session();
        let input = concat!(
            "not json\n",
            "\n",
            "{\"cmd\":\"teleport\"}\n",
            "{\"id\":\"a\",\"cmd\":\"get_product\"}\n",
            "{\"id\":\"b\",\"cmd\":\"remove_from_cart\",\"args\":{\"variantId\":\"ghost\"}}\n",
        );

        let (responses, _) = run(&session, input).await;

        assert_eq!(responses.len(), 4);
        assert_eq!(responses[0]["error"]["code"], "BAD_REQUEST");
        assert!(responses[0].get("id").is_none());
        assert_eq!(responses[1]["error"]["message"], "Unknown command: teleport");
        assert_eq!(responses[2]["id"], "a");
        assert_eq!(responses[2]["error"]["code"], "BAD_REQUEST");
        assert_eq!(responses[3]["ok"]["itemCount"], 0);
    }

    #[tokio::test]
    async fn test_dispatch_unavailable_variant() {
        let session = session();
        let response = session
            .dispatch(Request {
                id: Some(json!(9)),
                cmd: "add_to_cart".to_string(),
                args: json!({"productId": "classic-tee",
                             "selection": {"Color": "Blue", "Size": "M"}}),
            })
            .await;

        assert!(!response.is_ok());
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["id"], 9);
        assert_eq!(json["error"]["code"], "UNAVAILABLE");
    }
}
