use std::path::PathBuf;
use tracing::{debug, info};

use alloy_primitives::U256;
use alloy_signer_local::PrivateKeySigner;
use anyhow::{Context, Result};
use clap::Parser;
use url::Url;

use tip712_apps::{init_tracing, load_dotenv, nonce_or_now, parse_args, DomainArgs};
use tip712_common::contract::DEFAULT_ARTIFACT_PATH;
use tip712_common::typed_data::mail_typed_data;
use tip712_common::{
    verify_typed_data, Mail, Person, Tip712Signer, Tip712Verifier, TronAddress, TronClient,
    VerifierArtifact,
};

/// Sign a TIP-712 `Mail`, verify it locally, then ask the deployed verifier
/// contract to check the same signature.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// URL of the TRON full node HTTP API.
    #[clap(long, env)]
    full_host: Url,

    /// TronGrid API key, sent as the `TRON-PRO-API-KEY` header.
    #[clap(long, env)]
    tron_pro_api_key: Option<String>,

    /// Private key used for signing.
    #[clap(long, env)]
    private_key: PrivateKeySigner,

    /// Address of the deployed verifier contract (base58 or hex).
    #[clap(long, env)]
    verifying_contract: TronAddress,

    #[clap(flatten)]
    domain: DomainArgs,

    /// Contract build artifact holding the verifier ABI.
    #[clap(long, value_name = "FILE", default_value = DEFAULT_ARTIFACT_PATH)]
    artifact: PathBuf,

    /// Mail body.
    #[clap(long, default_value = "Hello TIP-712 on TRON!")]
    contents: String,

    /// Mail nonce; defaults to the current time in milliseconds.
    #[clap(long)]
    nonce: Option<U256>,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    load_dotenv()?;

    let args: Args = parse_args()?;

    let artifact = VerifierArtifact::load(&args.artifact)
        .with_context(|| format!("loading {}", args.artifact.display()))?;
    let client = TronClient::new(args.full_host.clone(), args.tron_pro_api_key.as_deref())?;

    let signer = Tip712Signer::new(args.private_key);
    let signer_address = signer.tron_address();
    info!(
        "Signer: {signer_address}, network: {} (chain id {})",
        args.domain.network,
        args.domain.network.chain_id_hex()
    );

    // Domain must match the contract constructor and its address
    let domain = args.domain.config(args.verifying_contract).build();
    let mail = Mail::new(
        Person::new("Cow", signer.address()),
        Person::new("Bob", signer.address()),
        args.contents,
        nonce_or_now(args.nonce)?,
    );
    let typed_data = mail_typed_data(&mail, &domain);
    debug!("Typed data: {}", serde_json::to_string(&typed_data)?);

    // 1) Sign, then move the recovery id to 27/28
    let signature = signer.sign_mail(&domain, &mail)?.normalized();
    println!("Signature: {signature}");

    // 2) Local verify
    let ok_local = verify_typed_data(&typed_data, &signature, signer.address())?;
    println!("Local verify: {ok_local}");

    // 3) On-chain verify
    let verifier = Tip712Verifier::new(&client, args.verifying_contract, &artifact.abi)?;
    let ok_on_chain = verifier
        .verify(&signer_address, &mail, &signer_address, &signature)
        .await
        .context("on-chain verification call failed")?;
    println!("On-chain verify: {ok_on_chain}");

    Ok(())
}
