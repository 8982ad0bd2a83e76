//! Request submission: one multipart POST per submission, busy-state
//! handling with guaranteed restore, and an abortable timeout.

use std::cell::Cell;
use std::rc::Rc;

use docsim_core::contract::{self, CompareError};
use docsim_core::{CompareResponse, ResultView};
use js_sys::Reflect;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    console, AbortController, Event, FormData, Request, RequestInit, RequestMode, Response,
};

use crate::app::AppContext;
use crate::render;

/// Submit control label while the round trip is in flight.
const BUSY_LABEL: &str = "Analyzing...";

/// How long a comparison may run before the client aborts it. The
/// service runs model inference per request, so the deadline is
/// generous; without it a hung request would leave the submit control
/// disabled forever.
const REQUEST_TIMEOUT_MS: i32 = 120_000;

const TIMEOUT_MESSAGE: &str = "The comparison request timed out";

/// Wire the form's submit event.
pub(crate) fn wire_form(context: &Rc<AppContext>) -> Result<(), JsValue> {
    let ctx = Rc::clone(context);
    let on_submit = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        event.prevent_default();
        // The disabled button alone does not stop programmatic submit
        // events; the lifecycle is the real guard.
        if !ctx.phase.borrow_mut().begin() {
            return;
        }
        wasm_bindgen_futures::spawn_local(run_submission(Rc::clone(&ctx)));
    });
    context
        .ui
        .form
        .add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
    on_submit.forget();
    Ok(())
}

/// Drive one submission: busy state, round trip, render or surface the
/// failure. Callers must have moved the lifecycle into `Submitting`.
pub(crate) async fn run_submission(context: Rc<AppContext>) {
    let button = &context.ui.submit_button;
    let original_label = button.text_content();
    button.set_text_content(Some(BUSY_LABEL));
    button.set_disabled(true);

    let outcome = submit_once(&context).await;

    // Restore the control on every exit path, success or failure.
    button.set_text_content(original_label.as_deref());
    button.set_disabled(false);

    match outcome {
        Ok(response) => {
            let view = ResultView::project(&response);
            match render::render_results(&context.ui, &view) {
                Ok(()) => context.phase.borrow_mut().complete(),
                Err(err) => {
                    console::error_1(&err);
                    alert(contract::GENERIC_NETWORK_ERROR);
                    context.phase.borrow_mut().fail();
                }
            }
        }
        Err(error) => {
            let message = error.to_string();
            console::error_1(&JsValue::from_str(&message));
            alert(&message);
            context.phase.borrow_mut().fail();
        }
    }
}

async fn submit_once(context: &AppContext) -> Result<CompareResponse, CompareError> {
    let form_data = FormData::new_with_form(&context.ui.form)
        .map_err(|err| CompareError::Network(js_error_message(&err)))?;
    post_compare(&context.api_base, &form_data).await
}

/// POST the multipart body and run the response through the contract
/// validator. This is the flow's only suspension point.
pub(crate) async fn post_compare(
    api_base: &str,
    form_data: &FormData,
) -> Result<CompareResponse, CompareError> {
    let window = web_sys::window()
        .ok_or_else(|| CompareError::Network("No window object available".to_string()))?;

    let controller = AbortController::new().map_err(to_network)?;
    let timed_out = Rc::new(Cell::new(false));

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(form_data);
    opts.set_signal(Some(&controller.signal()));

    let url = format!("{}{}", api_base, contract::COMPARE_PATH);
    let request = Request::new_with_str_and_init(&url, &opts).map_err(to_network)?;

    // Abort a hung request instead of waiting forever.
    let on_timeout = {
        let controller = controller.clone();
        let timed_out = Rc::clone(&timed_out);
        Closure::once(move || {
            timed_out.set(true);
            controller.abort();
        })
    };
    let timer = window
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            on_timeout.as_ref().unchecked_ref(),
            REQUEST_TIMEOUT_MS,
        )
        .map_err(to_network)?;

    let fetched = JsFuture::from(window.fetch_with_request(&request)).await;
    window.clear_timeout_with_handle(timer);
    drop(on_timeout);

    let response: Response = match fetched {
        Ok(value) => value
            .dyn_into()
            .map_err(|_| CompareError::Network(contract::GENERIC_NETWORK_ERROR.to_string()))?,
        Err(err) => {
            return Err(CompareError::Network(if timed_out.get() {
                TIMEOUT_MESSAGE.to_string()
            } else {
                js_error_message(&err)
            }));
        }
    };

    let body = JsFuture::from(response.text().map_err(to_network)?)
        .await
        .map_err(to_network)?
        .as_string()
        .unwrap_or_default();

    if !response.ok() {
        return Err(contract::parse_error_body(response.status(), &body));
    }

    Ok(contract::parse_success(&body)?)
}

fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

fn to_network(err: JsValue) -> CompareError {
    CompareError::Network(js_error_message(&err))
}

fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            Reflect::get(value, &JsValue::from_str("message"))
                .ok()
                .and_then(|message| message.as_string())
        })
        .unwrap_or_else(|| contract::GENERIC_NETWORK_ERROR.to_string())
}
