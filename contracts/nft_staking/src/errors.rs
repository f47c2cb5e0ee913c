use soroban_sdk::contracttype;

/// Coarse classification used by off-chain tooling when triaging failures.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorCategory {
    /// Malformed or out-of-range input parameters.
    Validation = 1,
    /// Caller lacks the identity an operation requires.
    Authorization = 2,
    /// State or time-gate precondition not met; retryable once it is.
    Precondition = 3,
    /// The pool's reward balance cannot cover an owed payout.
    InsufficientFunds = 4,
}

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidInput = 4,
    NotOwner = 5,
    AlreadyStaked = 6,
    NotStaked = 7,
    UnbondingNotElapsed = 8,
    ClaimPending = 9,
    NothingToClaim = 10,
    InsufficientRewardPool = 11,
}

impl ContractError {
    /// Returns the error category for this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ContractError::NotInitialized
            | ContractError::AlreadyInitialized
            | ContractError::InvalidInput => ErrorCategory::Validation,
            ContractError::Unauthorized | ContractError::NotOwner => ErrorCategory::Authorization,
            ContractError::AlreadyStaked
            | ContractError::NotStaked
            | ContractError::UnbondingNotElapsed
            | ContractError::ClaimPending
            | ContractError::NothingToClaim => ErrorCategory::Precondition,
            ContractError::InsufficientRewardPool => ErrorCategory::InsufficientFunds,
        }
    }

    /// Returns a human-readable message naming the violated condition.
    pub fn message(&self) -> &'static str {
        match self {
            ContractError::NotInitialized => "Contract has not been initialized",
            ContractError::AlreadyInitialized => "Contract is already initialized",
            ContractError::Unauthorized => "Caller is not the pool admin",
            ContractError::InvalidInput => "Invalid input parameters provided",
            ContractError::NotOwner => "Caller does not own the item",
            ContractError::AlreadyStaked => "Item is already staked in the pool",
            ContractError::NotStaked => "Item is not staked by the caller",
            ContractError::UnbondingNotElapsed => "Unbonding time has not elapsed for the item",
            ContractError::ClaimPending => "A claim request is pending its delay window",
            ContractError::NothingToClaim => "No rewards have accrued",
            ContractError::InsufficientRewardPool => "Reward pool balance cannot cover the payout",
        }
    }
}
