use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use mintkit_client::{Ledger, MintKitError, Result};
use solana_sdk::{
    account::Account,
    commitment_config::CommitmentConfig,
    hash::Hash,
    instruction::{AccountMeta, Instruction},
    program_option::COption,
    program_pack::Pack,
    pubkey::Pubkey,
    rent::Rent,
    signature::Signature,
    system_instruction::SystemInstruction,
    system_program,
    transaction::{Transaction, TransactionError},
};
use spl_associated_token_account::get_associated_token_address_with_program_id;
use spl_token::{
    instruction::{TokenInstruction, MAX_SIGNERS},
    state::{Account as TokenAccountState, AccountState, Mint as MintState, Multisig},
};

type Exec = std::result::Result<(), String>;

#[derive(Default)]
struct Inner {
    accounts: HashMap<Pubkey, Account>,
    sent: Vec<Transaction>,
    attempts: usize,
    rejections: VecDeque<String>,
    races: VecDeque<(Pubkey, Account)>,
    landed: Vec<Signature>,
    never_confirm: bool,
}

/// In-memory ledger that executes the handful of system, token and
/// associated-token instructions the launcher emits. Every transaction is
/// applied atomically; writability is not enforced.
#[derive(Default)]
pub struct MockLedger {
    inner: Mutex<Inner>,
}

impl MockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap()
    }

    pub fn airdrop(&self, address: &Pubkey, lamports: u64) {
        let mut inner = self.lock();
        let account = inner
            .accounts
            .entry(*address)
            .or_insert_with(|| Account::new(0, 0, &system_program::ID));
        account.lamports += lamports;
    }

    pub fn set_account(&self, address: &Pubkey, account: Account) {
        self.lock().accounts.insert(*address, account);
    }

    pub fn account(&self, address: &Pubkey) -> Option<Account> {
        self.lock().accounts.get(address).cloned()
    }

    pub fn add_mint(&self, address: &Pubkey, authority: &Pubkey, decimals: u8) {
        let state = MintState {
            mint_authority: COption::Some(*authority),
            decimals,
            is_initialized: true,
            ..MintState::default()
        };
        self.set_account(address, packed(state, spl_token::ID));
    }

    pub fn add_token_account(&self, address: &Pubkey, mint: &Pubkey, owner: &Pubkey, amount: u64) {
        self.set_account(address, token_account(mint, owner, amount));
    }

    pub fn add_multisig(&self, address: &Pubkey, m: u8, members: &[Pubkey]) {
        let mut signers = [Pubkey::default(); MAX_SIGNERS];
        signers[..members.len()].copy_from_slice(members);
        let state = Multisig {
            m,
            n: members.len() as u8,
            is_initialized: true,
            signers,
        };
        self.set_account(address, packed(state, spl_token::ID));
    }

    pub fn get_rent(&self, data_len: usize) -> u64 {
        Rent::default().minimum_balance(data_len)
    }

    pub fn mint_state(&self, address: &Pubkey) -> Option<MintState> {
        self.account(address).and_then(|a| MintState::unpack(&a.data).ok())
    }

    pub fn token_state(&self, address: &Pubkey) -> Option<TokenAccountState> {
        self.account(address).and_then(|a| TokenAccountState::unpack(&a.data).ok())
    }

    /// The next send is refused with `reason` before anything executes.
    pub fn reject_next_send(&self, reason: &str) {
        self.lock().rejections.push_back(reason.to_string());
    }

    /// `account` lands at `address` right before the next send executes.
    pub fn race_next_send(&self, address: &Pubkey, account: Account) {
        self.lock().races.push_back((*address, account));
    }

    /// Sent transactions stay unconfirmed forever.
    pub fn never_confirm(&self) {
        self.lock().never_confirm = true;
    }

    /// Transactions that executed successfully, in order.
    pub fn sent(&self) -> Vec<Transaction> {
        self.lock().sent.clone()
    }

    /// Every send call, refused ones included.
    pub fn attempts(&self) -> usize {
        self.lock().attempts
    }
}

#[async_trait]
impl Ledger for MockLedger {
    async fn get_account(&self, address: &Pubkey, _commitment: CommitmentConfig) -> Result<Option<Account>> {
        let snapshot = self.lock().accounts.get(address).cloned();
        // let concurrent callers observe the same snapshot
        tokio::task::yield_now().await;
        Ok(snapshot)
    }

    async fn get_minimum_balance_for_rent_exemption(&self, data_len: usize) -> Result<u64> {
        Ok(Rent::default().minimum_balance(data_len))
    }

    async fn get_latest_blockhash(&self) -> Result<Hash> {
        Ok(Hash::new_unique())
    }

    async fn send_transaction(&self, transaction: &Transaction, _skip_preflight: bool) -> Result<Signature> {
        let mut inner = self.lock();
        inner.attempts += 1;

        if let Some((address, account)) = inner.races.pop_front() {
            inner.accounts.insert(address, account);
        }
        if let Some(reason) = inner.rejections.pop_front() {
            return Err(MintKitError::Submission(reason));
        }
        transaction
            .verify()
            .map_err(|e| MintKitError::Submission(e.to_string()))?;

        let mut accounts = inner.accounts.clone();
        for ix in decompile(transaction) {
            execute(&mut accounts, &ix).map_err(MintKitError::Submission)?;
        }

        let signature = transaction.signatures[0];
        inner.accounts = accounts;
        inner.sent.push(transaction.clone());
        inner.landed.push(signature);
        Ok(signature)
    }

    async fn signature_status(
        &self,
        signature: &Signature,
        _commitment: CommitmentConfig,
    ) -> Result<Option<std::result::Result<(), TransactionError>>> {
        let inner = self.lock();
        if inner.never_confirm || !inner.landed.contains(signature) {
            return Ok(None);
        }
        Ok(Some(Ok(())))
    }
}

/// Rebuilds the instructions of a legacy transaction.
pub fn decompile(tx: &Transaction) -> Vec<Instruction> {
    let message = &tx.message;
    message
        .instructions
        .iter()
        .map(|ci| Instruction {
            program_id: message.account_keys[ci.program_id_index as usize],
            accounts: ci
                .accounts
                .iter()
                .map(|&i| {
                    let i = i as usize;
                    AccountMeta {
                        pubkey: message.account_keys[i],
                        is_signer: message.is_signer(i),
                        is_writable: message.is_maybe_writable(i, None),
                    }
                })
                .collect(),
            data: ci.data.clone(),
        })
        .collect()
}

pub fn token_account(mint: &Pubkey, owner: &Pubkey, amount: u64) -> Account {
    let state = TokenAccountState {
        mint: *mint,
        owner: *owner,
        amount,
        state: AccountState::Initialized,
        ..TokenAccountState::default()
    };
    packed(state, spl_token::ID)
}

fn packed<T: Pack>(state: T, owner: Pubkey) -> Account {
    let mut data = vec![0u8; T::LEN];
    T::pack(state, &mut data).unwrap();
    Account {
        lamports: Rent::default().minimum_balance(T::LEN),
        data,
        owner,
        executable: false,
        rent_epoch: 0,
    }
}

fn execute(accounts: &mut HashMap<Pubkey, Account>, ix: &Instruction) -> Exec {
    if ix.program_id == system_program::ID {
        execute_system(accounts, ix)
    } else if ix.program_id == spl_associated_token_account::ID {
        execute_associated(accounts, ix)
    } else if ix.program_id == spl_token::ID {
        execute_token(accounts, ix)
    } else {
        // compute budget, metadata
        Ok(())
    }
}

fn allocate(
    accounts: &mut HashMap<Pubkey, Account>,
    from: &Pubkey,
    to: &Pubkey,
    lamports: u64,
    space: usize,
    owner: &Pubkey,
) -> Exec {
    if accounts.contains_key(to) {
        return Err(format!("account {} already in use", to));
    }
    let payer = accounts
        .get_mut(from)
        .ok_or_else(|| format!("payer {} has no account", from))?;
    payer.lamports = payer
        .lamports
        .checked_sub(lamports)
        .ok_or_else(|| format!("payer {} has insufficient lamports", from))?;
    accounts.insert(*to, Account::new(lamports, space, owner));
    Ok(())
}

fn execute_system(accounts: &mut HashMap<Pubkey, Account>, ix: &Instruction) -> Exec {
    match bincode::deserialize::<SystemInstruction>(&ix.data).map_err(|e| e.to_string())? {
        SystemInstruction::CreateAccount { lamports, space, owner } => allocate(
            accounts,
            &ix.accounts[0].pubkey,
            &ix.accounts[1].pubkey,
            lamports,
            space as usize,
            &owner,
        ),
        other => Err(format!("unsupported system instruction {:?}", other)),
    }
}

fn execute_associated(accounts: &mut HashMap<Pubkey, Account>, ix: &Instruction) -> Exec {
    if !matches!(ix.data.first(), None | Some(0)) {
        return Err("only Create is supported".to_string());
    }
    let payer = ix.accounts[0].pubkey;
    let address = ix.accounts[1].pubkey;
    let wallet = ix.accounts[2].pubkey;
    let mint = ix.accounts[3].pubkey;
    let token_program = ix.accounts[5].pubkey;

    if get_associated_token_address_with_program_id(&wallet, &mint, &token_program) != address {
        return Err(format!("{} is not the associated address", address));
    }
    let mint_account = accounts
        .get(&mint)
        .ok_or_else(|| format!("mint {} does not exist", mint))?;
    if mint_account.owner != token_program || MintState::unpack(&mint_account.data).is_err() {
        return Err(format!("{} is not a mint", mint));
    }

    let lamports = Rent::default().minimum_balance(TokenAccountState::LEN);
    allocate(accounts, &payer, &address, lamports, TokenAccountState::LEN, &token_program)?;
    if let Some(account) = accounts.get_mut(&address) {
        let state = TokenAccountState {
            mint,
            owner: wallet,
            state: AccountState::Initialized,
            ..TokenAccountState::default()
        };
        TokenAccountState::pack(state, &mut account.data).map_err(|e| e.to_string())?;
    }
    Ok(())
}

fn execute_token(accounts: &mut HashMap<Pubkey, Account>, ix: &Instruction) -> Exec {
    match TokenInstruction::unpack(&ix.data).map_err(|e| e.to_string())? {
        TokenInstruction::InitializeMint2 { decimals, mint_authority, freeze_authority } => {
            let account = owned_mut(accounts, &ix.accounts[0].pubkey, MintState::LEN)?;
            if MintState::unpack_unchecked(&account.data).map_err(|e| e.to_string())?.is_initialized {
                return Err("mint already initialized".to_string());
            }
            let state = MintState {
                mint_authority: COption::Some(mint_authority),
                supply: 0,
                decimals,
                is_initialized: true,
                freeze_authority,
            };
            MintState::pack(state, &mut account.data).map_err(|e| e.to_string())
        }

        TokenInstruction::InitializeAccount3 { owner } => {
            let mint = ix.accounts[1].pubkey;
            let mint_account = accounts.get(&mint).ok_or_else(|| format!("mint {} does not exist", mint))?;
            MintState::unpack(&mint_account.data).map_err(|e| e.to_string())?;

            let account = owned_mut(accounts, &ix.accounts[0].pubkey, TokenAccountState::LEN)?;
            let state = TokenAccountState {
                mint,
                owner,
                state: AccountState::Initialized,
                ..TokenAccountState::default()
            };
            TokenAccountState::pack(state, &mut account.data).map_err(|e| e.to_string())
        }

        TokenInstruction::MintTo { amount } => {
            let mint = ix.accounts[0].pubkey;
            let destination = ix.accounts[1].pubkey;

            let expected = owned_mut(accounts, &mint, MintState::LEN)
                .and_then(|a| MintState::unpack(&a.data).map_err(|e| e.to_string()))?
                .mint_authority;
            check_authority(accounts, &expected, &ix.accounts[2..])?;

            let mint_account = owned_mut(accounts, &mint, MintState::LEN)?;
            let mut mint_state = MintState::unpack(&mint_account.data).map_err(|e| e.to_string())?;
            mint_state.supply = mint_state
                .supply
                .checked_add(amount)
                .ok_or_else(|| "supply overflow".to_string())?;
            MintState::pack(mint_state, &mut mint_account.data).map_err(|e| e.to_string())?;

            let account = owned_mut(accounts, &destination, TokenAccountState::LEN)?;
            let mut state = TokenAccountState::unpack(&account.data).map_err(|e| e.to_string())?;
            if state.mint != mint {
                return Err("account not associated with this mint".to_string());
            }
            state.amount = state
                .amount
                .checked_add(amount)
                .ok_or_else(|| "amount overflow".to_string())?;
            TokenAccountState::pack(state, &mut account.data).map_err(|e| e.to_string())
        }

        other => Err(format!("unsupported token instruction {:?}", other)),
    }
}

/// `metas[0]` is the authority; a multisig authority needs `m` of its
/// members among the trailing signers.
fn check_authority(accounts: &HashMap<Pubkey, Account>, expected: &COption<Pubkey>, metas: &[AccountMeta]) -> Exec {
    let authority = &metas[0];
    if *expected != COption::Some(authority.pubkey) {
        return Err("owner does not match".to_string());
    }

    let multisig = accounts
        .get(&authority.pubkey)
        .filter(|a| a.owner == spl_token::ID && a.data.len() == Multisig::LEN)
        .and_then(|a| Multisig::unpack(&a.data).ok());

    match multisig {
        None if authority.is_signer => Ok(()),
        None => Err("missing required signature".to_string()),
        Some(multisig) => {
            let members = &multisig.signers[..multisig.n as usize];
            let signed = metas[1..]
                .iter()
                .filter(|m| m.is_signer && members.contains(&m.pubkey))
                .count();
            if signed < multisig.m as usize {
                return Err(format!("multisig needs {} signatures, got {}", multisig.m, signed));
            }
            Ok(())
        }
    }
}

fn owned_mut<'a>(accounts: &'a mut HashMap<Pubkey, Account>, address: &Pubkey, len: usize) -> std::result::Result<&'a mut Account, String> {
    let account = accounts
        .get_mut(address)
        .ok_or_else(|| format!("account {} does not exist", address))?;
    if account.owner != spl_token::ID || account.data.len() != len {
        return Err(format!("account {} is not a token program account", address));
    }
    Ok(account)
}
