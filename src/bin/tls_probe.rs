//! TLS handshake probe CLI
//!
//! Connects to a host, sends a TLS 1.2 ClientHello, and reports what
//! the server answered: negotiated version and cipher suite, the
//! certificate chain sizes, or the named failure reason. Never a raw
//! byte dump.
//!
//! Run with: `tls_probe <host> <port> [sni]`

use std::env;
use std::process::ExitCode;

use anyhow::{Context, Result};
use tokio::net::TcpStream;
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

use tls_probe::probe::{HandshakeClient, ProbeConfig, ProbeOutcome, TcpTransport};

fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

async fn run(host: &str, port: u16, sni: Option<String>) -> Result<ProbeOutcome> {
    let stream = TcpStream::connect((host, port))
        .await
        .with_context(|| format!("failed to connect to {host}:{port}"))?;
    let mut transport = TcpTransport::new(stream);

    let config = ProbeConfig {
        server_name: sni,
        ..ProbeConfig::default()
    };
    let client = HandshakeClient::new(config);
    Ok(client.probe(&mut transport).await)
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();

    let args: Vec<String> = env::args().collect();
    let (host, port) = match (args.get(1), args.get(2).and_then(|p| p.parse::<u16>().ok())) {
        (Some(host), Some(port)) => (host.clone(), port),
        _ => {
            eprintln!("Usage: {} <host> <port> [sni]", args[0]);
            return ExitCode::from(2);
        }
    };
    let sni = args.get(3).cloned().or_else(|| Some(host.clone()));

    match run(&host, port, sni).await {
        Ok(ProbeOutcome::Success(response)) => {
            info!(
                version = %response.server_hello.version,
                cipher_suite = %response.server_hello.cipher_suite,
                certificates = response.certificates.len(),
                "handshake probe succeeded"
            );
            for (i, cert) in response.certificates.certificates.iter().enumerate() {
                info!(index = i, der_bytes = cert.len(), "certificate");
            }
            ExitCode::SUCCESS
        }
        Ok(ProbeOutcome::Failure { reason, partial }) => {
            error!(
                reason = %reason.reason(),
                recoverable = reason.is_recoverable(),
                partial_bytes = partial.as_ref().map_or(0, |p| p.raw.len()),
                "handshake probe failed"
            );
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("probe error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
