//! Print the OpenAPI document as JSON.

use std::io::Write;

use roster::ApiDoc;
use utoipa::OpenApi;

fn main() -> std::io::Result<()> {
    let document = ApiDoc::openapi()
        .to_pretty_json()
        .map_err(std::io::Error::other)?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{document}")
}
