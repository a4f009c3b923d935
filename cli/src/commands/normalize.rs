use riskchat_core::Normalizer;

use crate::chat::ChatEntry;
use crate::util::{EXIT_OK, EXIT_USAGE_ERROR, print_error, print_json, read_json_from_file};

/// Normalize a payload read from a file or stdin and print the agent entry.
pub fn run(normalizer: &Normalizer, file: &str, envelope: bool) -> i32 {
    let body = match read_json_from_file(file) {
        Ok(v) => v,
        Err(e) => {
            print_error(
                "usage_error",
                &e,
                Some("Pass --file <path> or pipe JSON into --file -"),
            );
            return EXIT_USAGE_ERROR;
        }
    };

    let entry = if envelope {
        ChatEntry::agent(normalizer, &body)
    } else {
        ChatEntry::agent_payload(normalizer, &body)
    };

    match print_json(&entry) {
        Ok(()) => EXIT_OK,
        Err(e) => {
            print_error("cli_error", &e, None);
            EXIT_USAGE_ERROR
        }
    }
}
