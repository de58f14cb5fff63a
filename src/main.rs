mod args;

use args::{Cli, CommonArgs, Commands};
use clap::Parser;
use log::{debug, info};

use std::fs;
use std::io::{self, Write};
use std::ops::ControlFlow;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use aesctr::{Cipher, Nonce, Progress};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("password must not be empty")]
    EmptyPassword,

    #[error("nothing to process: input is empty")]
    EmptyInput,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Aes(#[from] aesctr::Error),
}

fn main() -> ExitCode {
    let args = Cli::parse();

    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match aes_cli(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn aes_cli(args: Cli) -> Result<(), CliError> {
    match args.command {
        Commands::Encrypt(enc) => {
            let random_nonce = enc.random_nonce;
            let common = enc.common;
            let (plaintext, output) = read_source(&common, "encrypt.txt")?;
            let cipher = Cipher::from_password(&common.password, common.key_size.into());

            let nonce = if random_nonce {
                debug!("nonce source: OS RNG");
                Nonce::random()?
            } else {
                debug!("nonce source: timestamp");
                Nonce::generate()?
            };

            let start = Instant::now();
            let envelope = cipher.encrypt_ctr_observed(&plaintext, nonce, log_progress)?;
            let duration = start.elapsed();

            let encoded = aesctr::base64_encode(&envelope);
            write_output(output, encoded.as_bytes())?;
            eprintln!(
                "Encrypted {} bytes in {} ms",
                plaintext.len(),
                duration.as_millis()
            );
            Ok(())
        }
        Commands::Decrypt(common) => {
            let (encoded, output) = read_source(&common, "decrypt.txt")?;
            let cipher = Cipher::from_password(&common.password, common.key_size.into());

            // base64 is ASCII; anything else is reported by the decoder
            let envelope = aesctr::base64_decode(&String::from_utf8_lossy(&encoded))?;

            let start = Instant::now();
            let plaintext = cipher.decrypt_ctr_observed(&envelope, log_progress)?;
            let duration = start.elapsed();
            let len = plaintext.len();

            match output {
                // stdout gets text, files get the exact decrypted bytes
                None => write_output(None, aesctr::utf8_decode(plaintext).as_bytes())?,
                Some(path) => write_output(Some(path), &plaintext)?,
            }
            eprintln!("Decrypted {} bytes in {} ms", len, duration.as_millis());
            Ok(())
        }
    }
}

// returns the input bytes and where to write the result (None is stdout)
fn read_source(
    common: &CommonArgs,
    default_output: &str,
) -> Result<(Vec<u8>, Option<PathBuf>), CliError> {
    if common.password.is_empty() {
        return Err(CliError::EmptyPassword);
    }

    let (data, default) = match (&common.text, &common.input) {
        (Some(text), _) => (aesctr::utf8_encode(text), None),
        (None, Some(path)) => {
            info!("reading {}", path.display());
            (fs::read(path)?, Some(PathBuf::from(default_output)))
        }
        // clap enforces the source group
        (None, None) => return Err(CliError::EmptyInput),
    };

    // whitespace-only input counts as empty
    if data.trim_ascii().is_empty() {
        return Err(CliError::EmptyInput);
    }

    Ok((data, common.output.clone().or(default)))
}

fn write_output(path: Option<PathBuf>, data: &[u8]) -> Result<(), CliError> {
    match path {
        Some(path) => {
            fs::write(&path, data)?;
            info!("wrote {} bytes to {}", data.len(), path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(data)?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}

fn log_progress(progress: Progress) -> ControlFlow<()> {
    debug!(
        "{:>3.0}% ({}/{} blocks)",
        progress.fraction() * 100.0,
        progress.blocks_done,
        progress.blocks_total
    );
    ControlFlow::Continue(())
}
