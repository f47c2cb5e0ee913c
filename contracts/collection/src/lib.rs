#![no_std]

//! Unique-ownership item registry (one collection per deployment).
//!
//! `CollectionInterface` is the client-facing surface other contracts code
//! against; `CollectionContract` is the reference implementation deployed
//! next to the staking pool. The split mirrors the SDK's token interface /
//! Stellar Asset Contract pair: transfer-path functions follow the SAC
//! convention of trapping via `panic_with_error!` so that a rejected
//! transfer aborts the calling invocation as a whole, while lifecycle
//! functions return `Result` like the rest of the workspace.

use soroban_sdk::{
    contract, contractclient, contractimpl, panic_with_error, symbol_short, Address, Env, String,
    Symbol,
};

// ── Storage key constants ────────────────────────────────────────────────────

const ADMIN: Symbol = symbol_short!("ADMIN");
const INITIALIZED: Symbol = symbol_short!("INIT");
const NAME: Symbol = symbol_short!("NAME");
const SYM: Symbol = symbol_short!("SYM");

// Per-item and per-holder persistent storage uses tuple keys: (prefix, key)
const OWNER: Symbol = symbol_short!("OWNER");
const APPROVED: Symbol = symbol_short!("APPROVED");
const BALANCE: Symbol = symbol_short!("BAL");

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum CollectionError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    ItemNotFound = 4,
    ItemAlreadyMinted = 5,
    NotOwner = 6,
    NotApproved = 7,
}

// ── Client-facing interface ──────────────────────────────────────────────────

/// Interface a custodial contract uses to hold and release items.
///
/// All functions trap on failure rather than returning an error, so a
/// caller that has already committed its own state is rolled back by the
/// host together with the failed transfer.
#[contractclient(name = "CollectionClient")]
pub trait CollectionInterface {
    /// Number of items currently held by `owner`.
    fn balance(env: Env, owner: Address) -> u32;

    /// Current owner of `item_id`. Traps if the item was never minted.
    fn owner_of(env: Env, item_id: u64) -> Address;

    /// Grant `spender` the right to move `item_id` once.
    fn approve(env: Env, owner: Address, spender: Address, item_id: u64);

    /// The address approved for `item_id`, if any.
    fn get_approved(env: Env, item_id: u64) -> Option<Address>;

    /// Move `item_id` from its owner `from` to `to`.
    fn transfer(env: Env, from: Address, to: Address, item_id: u64);

    /// Move `item_id` on behalf of its owner, consuming `spender`'s approval.
    fn transfer_from(env: Env, spender: Address, from: Address, to: Address, item_id: u64);
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct CollectionContract;

#[contractimpl]
impl CollectionContract {
    /// Bootstrap the collection with its admin and metadata.
    pub fn initialize(
        env: Env,
        admin: Address,
        name: String,
        symbol: String,
    ) -> Result<(), CollectionError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(CollectionError::AlreadyInitialized);
        }

        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&INITIALIZED, &true);
        env.storage().instance().set(&NAME, &name);
        env.storage().instance().set(&SYM, &symbol);

        Ok(())
    }

    /// Mint `item_id` to `to`. Admin-only; item ids are caller-chosen and
    /// must be fresh.
    pub fn mint(env: Env, caller: Address, to: Address, item_id: u64) -> Result<(), CollectionError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(CollectionError::NotInitialized);
        }
        caller.require_auth();

        let admin: Address = env
            .storage()
            .instance()
            .get(&ADMIN)
            .ok_or(CollectionError::NotInitialized)?;
        if caller != admin {
            return Err(CollectionError::Unauthorized);
        }
        if env.storage().persistent().has(&(OWNER, item_id)) {
            return Err(CollectionError::ItemAlreadyMinted);
        }

        env.storage().persistent().set(&(OWNER, item_id), &to);
        let balance: u32 = env
            .storage()
            .persistent()
            .get(&(BALANCE, to.clone()))
            .unwrap_or(0);
        env.storage()
            .persistent()
            .set(&(BALANCE, to.clone()), &balance.saturating_add(1));

        env.events()
            .publish((symbol_short!("mint"), to), item_id);

        Ok(())
    }

    pub fn name(env: Env) -> Result<String, CollectionError> {
        env.storage()
            .instance()
            .get(&NAME)
            .ok_or(CollectionError::NotInitialized)
    }

    pub fn symbol(env: Env) -> Result<String, CollectionError> {
        env.storage()
            .instance()
            .get(&SYM)
            .ok_or(CollectionError::NotInitialized)
    }

    pub fn get_admin(env: Env) -> Result<Address, CollectionError> {
        env.storage()
            .instance()
            .get(&ADMIN)
            .ok_or(CollectionError::NotInitialized)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }
}

#[contractimpl]
impl CollectionInterface for CollectionContract {
    fn balance(env: Env, owner: Address) -> u32 {
        env.storage()
            .persistent()
            .get(&(BALANCE, owner))
            .unwrap_or(0)
    }

    fn owner_of(env: Env, item_id: u64) -> Address {
        match env.storage().persistent().get(&(OWNER, item_id)) {
            Some(owner) => owner,
            None => panic_with_error!(&env, CollectionError::ItemNotFound),
        }
    }

    fn approve(env: Env, owner: Address, spender: Address, item_id: u64) {
        owner.require_auth();

        let current: Address = match env.storage().persistent().get(&(OWNER, item_id)) {
            Some(owner) => owner,
            None => panic_with_error!(&env, CollectionError::ItemNotFound),
        };
        if current != owner {
            panic_with_error!(&env, CollectionError::NotOwner);
        }

        env.storage().persistent().set(&(APPROVED, item_id), &spender);

        env.events()
            .publish((symbol_short!("approve"), owner, spender), item_id);
    }

    fn get_approved(env: Env, item_id: u64) -> Option<Address> {
        env.storage().persistent().get(&(APPROVED, item_id))
    }

    fn transfer(env: Env, from: Address, to: Address, item_id: u64) {
        from.require_auth();
        Self::require_owner(&env, &from, item_id);
        Self::move_item(&env, &from, &to, item_id);
    }

    fn transfer_from(env: Env, spender: Address, from: Address, to: Address, item_id: u64) {
        spender.require_auth();
        Self::require_owner(&env, &from, item_id);

        if spender != from {
            let approved: Option<Address> = env.storage().persistent().get(&(APPROVED, item_id));
            if approved != Some(spender) {
                panic_with_error!(&env, CollectionError::NotApproved);
            }
        }

        Self::move_item(&env, &from, &to, item_id);
    }
}

impl CollectionContract {
    /// Trap unless `expected` currently owns `item_id`.
    fn require_owner(env: &Env, expected: &Address, item_id: u64) {
        let current: Address = match env.storage().persistent().get(&(OWNER, item_id)) {
            Some(owner) => owner,
            None => panic_with_error!(env, CollectionError::ItemNotFound),
        };
        if current != *expected {
            panic_with_error!(env, CollectionError::NotOwner);
        }
    }

    /// Reassign ownership and balances; any outstanding approval is consumed.
    fn move_item(env: &Env, from: &Address, to: &Address, item_id: u64) {
        env.storage().persistent().set(&(OWNER, item_id), to);
        env.storage().persistent().remove(&(APPROVED, item_id));

        let from_balance: u32 = env
            .storage()
            .persistent()
            .get(&(BALANCE, from.clone()))
            .unwrap_or(0);
        env.storage()
            .persistent()
            .set(&(BALANCE, from.clone()), &from_balance.saturating_sub(1));

        let to_balance: u32 = env
            .storage()
            .persistent()
            .get(&(BALANCE, to.clone()))
            .unwrap_or(0);
        env.storage()
            .persistent()
            .set(&(BALANCE, to.clone()), &to_balance.saturating_add(1));

        env.events()
            .publish((symbol_short!("transfer"), from.clone(), to.clone()), item_id);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
