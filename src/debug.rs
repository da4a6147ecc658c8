use std::time::{Duration, SystemTime};

use log::{debug, log_enabled, Level};
use reqwest::{Method, Response, Url};

use crate::error::TransportError;
use crate::utils::format_datetime;

/// Dumps one finished exchange at debug level.
pub(crate) fn log_exchange(
    method: &Method,
    url: &Url,
    start: SystemTime,
    result: &Result<Response, TransportError>,
    proxy: Option<&str>,
) {
    if !log_enabled!(Level::Debug) {
        return;
    }

    let end = SystemTime::now();
    let process_time = end.duration_since(start).unwrap_or(Duration::from_secs(0)).as_secs_f64();

    let mut msg = format!(
        "\n==== [{} {}] ====\nRequest Time: {} -> {} ({:.4}s)\n",
        method,
        url,
        format_datetime(start),
        format_datetime(end),
        process_time
    );
    match result {
        Ok(response) => describe_response(&mut msg, response),
        Err(TransportError::Status(response)) => {
            describe_response(&mut msg, response);
            msg.push_str("Reported as: HTTP status error\n");
        }
        Err(e) => msg.push_str(&format!("Error: {}\n", e)),
    }
    if let Some(p) = proxy {
        msg.push_str(&format!("Proxy: {}\n", p));
    }

    debug!("{}", msg);
}

fn describe_response(msg: &mut String, response: &Response) {
    msg.push_str(&format!("Status: {}\nHeaders:\n", response.status()));
    for (key, value) in response.headers() {
        msg.push_str(&format!("  {}: {:?}\n", key, value));
    }
}
