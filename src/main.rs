use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use epc_qr_config::Config;
use epc_qr_payload::{qr_file_name, validated_payload, CreditTransferFields, ExportError};
use epc_qr_types::Date;
use tracing_subscriber::EnvFilter;

/// Reads a transfer description, filling in `version` and `charset` from the
/// config when the file does not set them.
fn read_transfer(path: &Path, config: &Config) -> anyhow::Result<CreditTransferFields> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("could not read {}", path.display()))?;
    let table: toml::Table = toml::from_str(&text)
        .with_context(|| format!("could not parse {}", path.display()))?;
    let has_version = table.contains_key("version");
    let has_charset = table.contains_key("charset");

    let mut fields: CreditTransferFields = toml::Value::Table(table)
        .try_into()
        .with_context(|| format!("{} is not a valid transfer", path.display()))?;
    if !has_version {
        fields.version = config.defaults().version()?;
    }
    if !has_charset {
        fields.charset = config.defaults().charset()?;
    }
    Ok(fields)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let Some(transfer) = std::env::args_os().nth(1).map(PathBuf::from) else {
        bail!("usage: epc-qr <transfer.toml>");
    };

    let config = match std::env::var_os("EPC_QR_CONFIG") {
        Some(path) => Config::load_from(&PathBuf::from(path))?,
        None => Config::load_from_file()?,
    };
    for problem in config.config_errors() {
        tracing::warn!("config: {problem}");
    }

    let fields = read_transfer(&transfer, &config)?;
    let payload = match validated_payload(&fields) {
        Ok(payload) => payload,
        Err(ExportError::Validation(e)) => {
            tracing::error!(key = e.message_key(), "transfer rejected");
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    };

    println!("{}", payload.numbered_preview());
    let file = qr_file_name(&fields.amount, &fields.iban, Date::today());
    println!("\nQR image: {}", config.output().directory.join(file).display());
    Ok(())
}
