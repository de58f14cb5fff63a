use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about, author, arg_required_else_help = true)]
pub struct Cli {
    /// Log progress and timing details to stderr (RUST_LOG overrides)
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Encrypt text or a file to a Base64 envelope
    Encrypt(EncryptArgs),

    /// Decrypt a Base64 envelope back to text
    Decrypt(CommonArgs),
}

#[derive(Args, Debug)]
#[command(arg_required_else_help = true)]
#[command(group(ArgGroup::new("source").required(true).args(["text", "input"])))]
pub struct CommonArgs {
    /// Text to process, given directly on the command line.
    #[arg(short = 't', long = "text")]
    pub text: Option<String>,

    /// Input file path.
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file path. Defaults to stdout for --text, and to encrypt.txt / decrypt.txt
    /// for --input.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Password the key is derived from.
    #[arg(
        short = 'p',
        long = "password",
        env = "AESCTR_PASSWORD",
        hide_env_values = true
    )]
    pub password: String,

    /// Key size in bits.
    #[arg(
        short = 'k',
        long = "key-size",
        value_enum,
        default_value_t = KeySize::Bits256,
    )]
    pub key_size: KeySize,
}

#[derive(Args, Debug)]
#[command(arg_required_else_help = true)]
pub struct EncryptArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Draw the whole nonce from the OS RNG instead of the timestamp layout.
    #[arg(long = "random-nonce")]
    pub random_nonce: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum, Eq, PartialEq)]
pub enum KeySize {
    #[value(name = "128")]
    Bits128,
    #[value(name = "192")]
    Bits192,
    #[value(name = "256")]
    Bits256,
}

impl From<KeySize> for aesctr::KeySize {
    fn from(size: KeySize) -> Self {
        match size {
            KeySize::Bits128 => aesctr::KeySize::Bits128,
            KeySize::Bits192 => aesctr::KeySize::Bits192,
            KeySize::Bits256 => aesctr::KeySize::Bits256,
        }
    }
}
