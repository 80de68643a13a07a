//! Balance refresh request.

use cashbook_types::{BalanceError, BalanceSnapshot};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

fn network(e: impl std::fmt::Debug) -> BalanceError {
    BalanceError::Network { message: format!("{e:?}") }
}

/// `GET url` expecting a JSON object of balances.
pub async fn get_balances(url: &str) -> Result<BalanceSnapshot, BalanceError> {
    let opts = RequestInit::new();
    opts.set_method("GET");

    let request = Request::new_with_str_and_init(url, &opts).map_err(network)?;
    request.headers().set("Accept", "application/json").map_err(network)?;
    request.headers().set("X-Requested-With", "XMLHttpRequest").map_err(network)?;

    let window = web_sys::window().ok_or_else(|| network("No window"))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request)).await.map_err(network)?;

    let resp: Response = resp_value.dyn_into().map_err(|_| network("Response is not a Response"))?;

    if !resp.ok() {
        return Err(BalanceError::Status { status: resp.status() });
    }

    let body = resp.json().map_err(|e| BalanceError::Decode { message: format!("{e:?}") })?;
    let json = JsFuture::from(body)
        .await
        .map_err(|e| BalanceError::Decode { message: format!("{e:?}") })?;

    serde_wasm_bindgen::from_value(json)
        .map_err(|e| BalanceError::Decode { message: e.to_string() })
}
