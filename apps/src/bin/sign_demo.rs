use tracing::info;

use alloy_primitives::U256;
use alloy_signer_local::PrivateKeySigner;
use anyhow::Result;
use clap::Parser;

use tip712_apps::{init_tracing, load_dotenv, nonce_or_now, parse_args, DomainArgs};
use tip712_common::typed_data::mail_typed_data;
use tip712_common::{verify_typed_data, Mail, Person, Tip712Signer};

/// Sign a TIP-712 `Mail` and verify it locally. The signer's own address
/// stands in for the verifying contract, so no node is contacted.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Private key used for signing.
    #[clap(long, env)]
    private_key: PrivateKeySigner,

    #[clap(flatten)]
    domain: DomainArgs,

    /// Mail body.
    #[clap(long, default_value = "Hello from TRON typed data!")]
    contents: String,

    /// Mail nonce; defaults to the current time in milliseconds.
    #[clap(long)]
    nonce: Option<U256>,
}

fn main() -> Result<()> {
    init_tracing();
    load_dotenv()?;

    let args: Args = parse_args()?;

    let signer = Tip712Signer::new(args.private_key);
    let signer_address = signer.tron_address();
    info!(
        "Signer: {signer_address}, network: {} (chain id {})",
        args.domain.network,
        args.domain.network.chain_id_hex()
    );

    let domain = args.domain.config(signer_address).build();
    let mail = Mail::new(
        Person::new("Cow", signer.address()),
        Person::new("Bob", signer.address()),
        args.contents,
        nonce_or_now(args.nonce)?,
    );

    let raw = signer.sign_mail(&domain, &mail)?;
    println!("Signature: {raw}");

    let signature = raw.normalized();
    println!("Signature: {signature}");

    let ok = verify_typed_data(&mail_typed_data(&mail, &domain), &signature, signer.address())?;
    println!("Verified: {ok}");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use clap::CommandFactory;

    const KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn command_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn private_key_is_required() {
        let err = Args::try_parse_from(["sign_demo"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        assert!(err.use_stderr());
    }

    #[test]
    fn parses_with_defaults() {
        let args = Args::try_parse_from(["sign_demo", "--private-key", KEY, "--nonce", "1700000000000"])
            .unwrap();
        assert_eq!(args.contents, "Hello from TRON typed data!");
        assert_eq!(args.nonce, Some(U256::from(1_700_000_000_000_u64)));
    }

    #[test]
    fn malformed_private_key_is_rejected() {
        let err = Args::try_parse_from(["sign_demo", "--private-key", "0x1234"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn version_flag_is_not_an_error_exit() {
        let err = Args::try_parse_from(["sign_demo", "--version"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayVersion);
        assert!(!err.use_stderr());
    }
}
