#![cfg(test)]
use litesvm::{types::TransactionResult, LiteSVM};
use mintkit_api::prelude::*;
use solana_sdk::{
    program_pack::Pack,
    pubkey::Pubkey,
    signature::Keypair,
    signer::Signer,
    transaction::Transaction,
};
use super::print_tx;

pub fn setup_svm() -> LiteSVM {
    // token and associated-token programs are preloaded
    LiteSVM::new()
}

pub fn send_tx(svm: &mut LiteSVM, tx: Transaction) -> TransactionResult {
    let res = svm.send_transaction(tx.clone());

    let meta = match res.as_ref() {
        Ok(v) => v.clone(),
        Err(v) => v.meta.clone()
    };

    print_tx(meta, tx);

    if res.is_err() {
        println!("error:\t{:?}", res.as_ref().err().unwrap().err);
    }

    res
}

pub fn send_plan(svm: &mut LiteSVM, plan: &InstructionPlan, payer: &Keypair, signers: &[&Keypair]) -> TransactionResult {
    let blockhash = svm.latest_blockhash();
    let mut all: Vec<&Keypair> = vec![payer];
    all.extend_from_slice(signers);
    let tx = Transaction::new_signed_with_payer(plan.instructions(), Some(&payer.pubkey()), &all[..], blockhash);
    send_tx(svm, tx)
}

pub fn create_payer(svm: &mut LiteSVM) -> Keypair {
    let payer_kp = Keypair::new();
    let payer_pk = payer_kp.pubkey();
    svm.airdrop(&payer_pk, 10_000_000_000).unwrap();
    payer_kp
}

pub fn create_keypair() -> Keypair {
    Keypair::new()
}

pub fn create_mint(svm: &mut LiteSVM, payer: &Keypair, decimals: u8, fee: FeePolicy) -> Pubkey {
    let mint = create_keypair();
    let lamports = svm.minimum_balance_for_rent_exemption(MINT_LEN);
    let plan = build_create_mint_plan(
        &payer.pubkey(),
        &mint.pubkey(),
        &payer.pubkey(),
        None,
        decimals,
        lamports,
        &spl_token::ID,
        fee,
    ).unwrap();
    send_plan(svm, &plan, payer, &[&mint]).unwrap();
    mint.pubkey()
}

pub fn get_mint(svm: &LiteSVM, mint: &Pubkey) -> spl_token::state::Mint {
    let account = svm.get_account(mint).unwrap();
    spl_token::state::Mint::unpack(&account.data).unwrap()
}

pub fn get_token_account(svm: &LiteSVM, address: &Pubkey) -> spl_token::state::Account {
    let account = svm.get_account(address).unwrap();
    spl_token::state::Account::unpack(&account.data).unwrap()
}
