//! Concrete save sinks: the browser-side halves of the save fan-out.
//!
//! Each sink is fire-and-forget, owns its own asynchrony and logs its own
//! outcome; the session never waits on either of them.

use gloo_net::http::Request;
use yew::platform::spawn_local;

use common::session::SaveSink;

/// POSTs each saved template to the submission endpoint. The response
/// status is logged and not otherwise interpreted.
pub struct HttpSubmitSink {
    url: String,
}

impl HttpSubmitSink {
    pub fn new(url: impl Into<String>) -> Self {
        HttpSubmitSink { url: url.into() }
    }
}

impl SaveSink for HttpSubmitSink {
    fn name(&self) -> &'static str {
        "http-submit"
    }

    fn submit(&self, payload: &str) {
        let url = self.url.clone();
        let body = payload.to_string();
        spawn_local(async move {
            let request = Request::post(&url)
                .header("Content-Type", "application/json")
                .body(body);
            match request {
                Ok(request) => match request.send().await {
                    Ok(response) => {
                        gloo_console::log!(format!("{}: {}", url, response.status()));
                    }
                    Err(err) => {
                        gloo_console::error!(format!("template submit to {url} failed: {err}"));
                    }
                },
                Err(err) => {
                    gloo_console::error!(format!("template submit to {url} failed: {err}"));
                }
            }
        });
    }
}

/// Delivers each saved template to the hosting parent context via
/// `postMessage`, for the case where the editor runs embedded. No
/// acknowledgement is awaited.
pub struct ParentFrameSink {
    target_origin: String,
}

impl ParentFrameSink {
    pub fn new(target_origin: impl Into<String>) -> Self {
        ParentFrameSink {
            target_origin: target_origin.into(),
        }
    }
}

impl SaveSink for ParentFrameSink {
    fn name(&self) -> &'static str {
        "parent-frame"
    }

    fn submit(&self, payload: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let parent = match window.parent() {
            Ok(Some(parent)) => parent,
            _ => {
                gloo_console::warn!("no parent frame to notify");
                return;
            }
        };
        // The parent receives the template as an object, not as text.
        let message = match js_sys::JSON::parse(payload) {
            Ok(message) => message,
            Err(err) => {
                gloo_console::error!(format!("payload for parent frame is unparsable: {err:?}"));
                return;
            }
        };
        if let Err(err) = parent.post_message(&message, &self.target_origin) {
            gloo_console::error!(format!(
                "postMessage to {} failed: {:?}",
                self.target_origin, err
            ));
        }
    }
}
