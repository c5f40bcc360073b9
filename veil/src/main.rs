use tokio::io::{AsyncBufReadExt, AsyncWrite, BufReader};
use tracing::{info, warn};
use utils::init_tracing;
use veil_config::VeilConfig;
use veil_http::{Headers, RequestLine, Slice, body};
use veil_routing::HiddenRoutingSlice;

use crate::echo::EchoSlice;

mod echo;

const DEFAULT_CONFIG: &str = "veil.conf";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::var("VEIL_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG.to_string());
    let cfg = VeilConfig::from_file_or_default(&config_path);

    init_tracing(cfg.global().log_level());
    cfg.print();

    let chain = build_chain(&cfg)?;
    info!(
        target: "veil::cli",
        layers = cfg.routing().layers(),
        "Reading request lines from stdin"
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    let mut served = 0usize;

    while let Some(line) = lines.next_line().await? {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        if serve_line(chain.as_ref(), line, &mut stdout).await? {
            served += 1;
        }
    }

    info!(target: "veil::cli", served, "End of input");
    Ok(())
}

/// Echo slice wrapped in `routing.layers` hidden routing slices.
fn build_chain(cfg: &VeilConfig) -> anyhow::Result<Box<dyn Slice>> {
    let mut chain: Box<dyn Slice> = Box::new(EchoSlice::new(cfg.echo())?);
    for _ in 0..cfg.routing().layers() {
        chain = Box::new(HiddenRoutingSlice::new(chain));
    }
    Ok(chain)
}

/// Returns `false` when the response head was refused and nothing was
/// written; I/O errors are returned as-is.
async fn serve_line<W>(chain: &dyn Slice, line: &str, out: &mut W) -> anyhow::Result<bool>
where
    W: AsyncWrite + Unpin,
{
    if let Err(err) = RequestLine::parse(line) {
        warn!(
            target: "veil::cli",
            %line,
            error = %err,
            "Not a METHOD TARGET VERSION line; forwarding as-is"
        );
    }

    let rs = chain.response(line, Headers::new(), body::empty());
    if let Err(err) = rs.validate_head() {
        warn!(
            target: "veil::cli",
            %line,
            error = %err,
            "Response head refused; line skipped"
        );
        return Ok(false);
    }
    rs.write_to(out).await?;
    Ok(true)
}
