use url::Url;

use crate::util::{
    EXIT_CONNECTION_ERROR, EXIT_OK, EXIT_USAGE_ERROR, client, exit_code_for_status, print_error,
    print_json, response_body,
};

pub async fn run(api_url: &str) -> i32 {
    let url = match health_url(api_url) {
        Ok(u) => u,
        Err(e) => {
            print_error("cli_error", &e, Some("Check RISKCHAT_API_URL."));
            return EXIT_USAGE_ERROR;
        }
    };

    let resp = match client().get(url).send().await {
        Ok(r) => r,
        Err(e) => {
            print_error(
                "connection_error",
                &format!("{e}"),
                Some("Is the agent API running? Check RISKCHAT_API_URL."),
            );
            return EXIT_CONNECTION_ERROR;
        }
    };

    let exit_code = exit_code_for_status(resp.status().as_u16());
    let body = match response_body(resp).await {
        Ok(b) => b,
        Err(e) => {
            print_error("connection_error", &e, None);
            return EXIT_CONNECTION_ERROR;
        }
    };

    if exit_code != EXIT_OK {
        print_error("health_error", &body.to_string(), None);
        return exit_code;
    }
    match print_json(&body) {
        Ok(()) => EXIT_OK,
        Err(e) => {
            print_error("cli_error", &e, None);
            EXIT_USAGE_ERROR
        }
    }
}

/// `/health` on the same host as the agent endpoint.
pub fn health_url(api_url: &str) -> Result<Url, String> {
    let base = Url::parse(api_url).map_err(|e| format!("Invalid URL: {api_url}: {e}"))?;
    base.join("/health")
        .map_err(|e| format!("Invalid URL: {api_url}: {e}"))
}
