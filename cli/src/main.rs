mod config;
mod keypair;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, bail, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use dialoguer::Confirm;
use indicatif::{ProgressBar, ProgressStyle};
use mintkit_api::prelude::*;
use mintkit_client::{
    consts::CONFIRM_TIMEOUT_SECS, create_mint, get_mint, get_or_create_associated_token_account, get_token_account,
    associated_token_address, launch, mint_to, AssetParams, Authority, LaunchOptions, MplTokenMetadata,
    ProvisionOptions,
};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{commitment_config::CommitmentConfig, pubkey::Pubkey, signature::Keypair, signer::Signer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::{parse_commitment, resolve_payer, resolve_recipient, token_options, Cluster};

#[derive(Parser)]
#[command(name = "mintkit")]
#[command(about = "Launch SPL tokens on Solana with a priority fee on every transaction")]
struct Cli {
    #[arg(long, global = true, help = "Path to Solana keypair file (default: ~/.config/solana/id.json)")]
    keypair: Option<PathBuf>,

    #[arg(long, global = true, env = "MINTKIT_PAYER", hide_env_values = true, help = "Payer secret key (base58); overrides --keypair")]
    payer_secret: Option<String>,

    #[arg(
        long,
        global = true,
        env = "MINTKIT_RPC_URL",
        default_value = "l",
        help = "Solana cluster (l = localnet, m = mainnet, d = devnet, t = testnet, or a custom RPC URL)"
    )]
    cluster: Cluster,

    #[arg(long, global = true, help = "Priority fee in micro-lamports per compute unit")]
    priority_fee: Option<u64>,

    #[arg(long, global = true, default_value = "finalized", value_parser = parse_commitment, help = "Confirmation level (processed, confirmed, finalized)")]
    commitment: CommitmentConfig,

    #[arg(long, global = true, help = "Skip preflight simulation")]
    skip_preflight: bool,

    #[arg(long, global = true, default_value_t = CONFIRM_TIMEOUT_SECS, help = "Seconds to wait for each confirmation")]
    timeout: u64,

    #[arg(short, long, global = true, help = "Enable debug logging")]
    verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    json: bool,

    #[arg(short = 'y', long, global = true, help = "Do not ask for confirmation on mainnet")]
    yes: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Creates a mint, attaches metadata, and mints the full supply to a recipient
    Launch {
        #[arg(long, help = "Token name (max 32 bytes)")]
        name: String,

        #[arg(long, help = "Token symbol (max 10 bytes)")]
        symbol: String,

        #[arg(long, help = "Metadata JSON URI (max 200 bytes)")]
        uri: String,

        #[arg(long, default_value_t = 6, help = "Decimals for the mint")]
        decimals: u8,

        #[arg(long, help = "Supply to mint, in whole tokens")]
        supply: u64,

        #[arg(long, env = "MINTKIT_RECIPIENT", hide_env_values = true, help = "Recipient address or secret key (base58)")]
        recipient: Option<String>,

        #[arg(long, help = "Allow a recipient that is a program-derived address")]
        allow_owner_off_curve: bool,
    },

    /// Creates a bare mint with the payer as mint authority
    CreateMint {
        #[arg(long, default_value_t = 6, help = "Decimals for the mint")]
        decimals: u8,

        #[arg(long, help = "Optional freeze authority")]
        freeze_authority: Option<Pubkey>,
    },

    /// Finds or creates the associated token account of an owner
    CreateAccount {
        #[arg(long, help = "Mint address")]
        mint: Pubkey,

        #[arg(long, help = "Owner address (default: payer)")]
        owner: Option<Pubkey>,

        #[arg(long, help = "Allow an owner that is a program-derived address")]
        allow_owner_off_curve: bool,
    },

    /// Mints tokens to an owner's associated token account, creating it if needed
    MintTo {
        #[arg(long, help = "Mint address")]
        mint: Pubkey,

        #[arg(long, help = "Owner of the destination account")]
        owner: Pubkey,

        #[arg(long, help = "Amount in whole tokens (scaled by the mint's decimals)")]
        amount: u64,
    },

    /// Shows an owner's associated token account
    GetAccount {
        #[arg(long, help = "Mint address")]
        mint: Pubkey,

        #[arg(long, help = "Owner address (default: payer)")]
        owner: Option<Pubkey>,
    },
}

fn init_logging(verbose: bool, json: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);

    let res = if json { builder.json().try_init() } else { builder.try_init() };
    res.map_err(|e| anyhow!("Failed to initialize logging: {}", e))
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template("{spinner:.green} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()));
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn confirm_mainnet(cluster: &Cluster, yes: bool) -> Result<()> {
    if yes || !cluster.is_mainnet() {
        return Ok(());
    }
    let proceed = Confirm::new()
        .with_prompt("You are about to spend real SOL on mainnet. Continue?")
        .default(false)
        .interact()?;
    if !proceed {
        bail!("Aborted");
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    config::load_env();
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.json)?;

    let payer = resolve_payer(cli.payer_secret.as_deref(), cli.keypair.clone())?;
    let token = token_options(cli.priority_fee, cli.commitment, cli.skip_preflight, cli.timeout)?;
    let client = RpcClient::new_with_commitment(cli.cluster.rpc_url(), cli.commitment);

    info!(
        rpc = %cli.cluster.rpc_url(),
        payer = %payer.pubkey(),
        priority_fee = token.fee.micro_lamports_per_cu(),
        "mintkit ready"
    );

    match cli.command {
        Commands::Launch { name, symbol, uri, decimals, supply, recipient, allow_owner_off_curve } => {
            let recipient = resolve_recipient(recipient.as_deref())?;
            let asset = AssetParams {
                metadata: TokenMetadata::new(name, symbol, uri),
                decimals,
                supply,
            };
            asset.validate()?;
            confirm_mainnet(&cli.cluster, cli.yes)?;

            let opts = LaunchOptions { token, allow_owner_off_curve };
            let pb = spinner("Launching token...");
            let report = launch(&client, &payer, &recipient, &asset, &MplTokenMetadata, &opts).await;
            pb.finish_and_clear();
            let report = report?;

            println!("{} Launched {} ({})", "✔".green(), asset.metadata.name.bold(), asset.metadata.symbol);
            println!("  Mint:              {}", report.mint);
            println!("  Metadata:          {}", report.metadata);
            println!("  Recipient account: {}", report.recipient_account);
            println!("  Supply:            {}", to_ui_amount(report.amount, decimals));
            println!("  Mint tx:           {}", report.mint_signature);
            println!("  Metadata tx:       {}", report.metadata_signature);
            println!("  Mint-to tx:        {}", report.mint_to_signature);
        }

        Commands::CreateMint { decimals, freeze_authority } => {
            confirm_mainnet(&cli.cluster, cli.yes)?;

            let mint = Keypair::new();
            let pb = spinner("Creating mint...");
            let res = create_mint(&client, &payer, &payer.pubkey(), freeze_authority.as_ref(), decimals, &mint, &token).await;
            pb.finish_and_clear();
            let (mint, signature) = res?;

            println!("{} Mint created. Mint: {}. Signature: {}", "✔".green(), mint, signature);
        }

        Commands::CreateAccount { mint, owner, allow_owner_off_curve } => {
            let owner = owner.unwrap_or_else(|| payer.pubkey());
            let opts = ProvisionOptions { allow_owner_off_curve, commitment: cli.commitment, token };

            let pb = spinner("Provisioning token account...");
            let res = get_or_create_associated_token_account(&client, &payer, &mint, &owner, &opts).await;
            pb.finish_and_clear();
            let account = res?;

            println!("{} Token account {} (owner {}, mint {})", "✔".green(), account.address, account.owner, account.mint);
        }

        Commands::MintTo { mint, owner, amount } => {
            confirm_mainnet(&cli.cluster, cli.yes)?;

            let mint_state = get_mint(&client, &mint, cli.commitment, &token.program_id).await?;
            let base_units = to_base_units(amount, mint_state.decimals)
                .ok_or_else(|| anyhow!("{} tokens with {} decimals overflows u64", amount, mint_state.decimals))?;

            let opts = ProvisionOptions { allow_owner_off_curve: false, commitment: cli.commitment, token };
            let pb = spinner("Minting tokens...");
            let res = async {
                let account = get_or_create_associated_token_account(&client, &payer, &mint, &owner, &opts).await?;
                let signature = mint_to(&client, &payer, &mint, &account.address, Authority::Signer(&payer), &[], base_units, &token).await?;
                Ok::<_, mintkit_client::MintKitError>((account, signature))
            }
            .await;
            pb.finish_and_clear();
            let (account, signature) = res?;

            println!(
                "{} Minted {} tokens to {}. Signature: {}",
                "✔".green(),
                to_ui_amount(base_units, mint_state.decimals),
                account.address,
                signature
            );
        }

        Commands::GetAccount { mint, owner } => {
            let owner = owner.unwrap_or_else(|| payer.pubkey());
            let address = associated_token_address(&owner, &mint, true, &token)?;
            let mint_state = get_mint(&client, &mint, cli.commitment, &token.program_id).await?;
            let account = get_token_account(&client, &address, cli.commitment, &token.program_id).await?;

            println!("Token Account:");
            println!("  Address:   {}", account.address);
            println!("  Mint:      {}", account.mint);
            println!("  Owner:     {}", account.owner);
            println!("  Balance:   {}", to_ui_amount(account.amount, mint_state.decimals));
            println!("  Frozen:    {}", account.is_frozen);
            if let Some(delegate) = account.delegate {
                println!("  Delegate:  {} ({})", delegate, to_ui_amount(account.delegated_amount, mint_state.decimals));
            }
            println!("\nMint:");
            println!("  Decimals:  {}", mint_state.decimals);
            println!("  Supply:    {}", to_ui_amount(mint_state.supply, mint_state.decimals));
            match mint_state.mint_authority {
                Some(authority) => println!("  Authority: {}", authority),
                None => println!("  Authority: {}", "none (fixed supply)".dimmed()),
            }
        }
    }

    Ok(())
}
