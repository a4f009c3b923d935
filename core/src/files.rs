use url::Url;

use crate::message::FileRef;
use crate::patterns::{label_phrase_before, markdown_label_at, urls};

/// File references for every absolute URL in `sources`, in order of first
/// appearance. A repeated URL keeps its first entry; a label found on a later
/// mention fills in only when the first mention had none.
pub fn extract(sources: &[String]) -> Vec<FileRef> {
    let mut files: Vec<FileRef> = Vec::new();
    for source in sources {
        for found in urls(source) {
            let Some(parsed) = absolute_url(found.url) else {
                tracing::trace!(url = found.url, "skipping non-absolute url");
                continue;
            };
            let label = markdown_label_at(source, found.start)
                .or_else(|| label_phrase_before(source, found.start))
                .map(str::to_string);

            match files.iter_mut().find(|f| f.url == found.url) {
                Some(existing) => {
                    if existing.label.is_none() {
                        existing.label = label;
                    }
                }
                None => files.push(FileRef {
                    url: found.url.to_string(),
                    label,
                    mime: guess_mime(&parsed),
                }),
            }
        }
    }
    files
}

fn absolute_url(raw: &str) -> Option<Url> {
    let parsed = Url::parse(raw).ok()?;
    let web = matches!(parsed.scheme(), "http" | "https");
    (web && parsed.host_str().is_some_and(|h| !h.is_empty())).then_some(parsed)
}

/// MIME type from the URL path's extension.
fn guess_mime(url: &Url) -> Option<String> {
    mime_guess::from_path(url.path())
        .first_raw()
        .map(str::to_string)
}
