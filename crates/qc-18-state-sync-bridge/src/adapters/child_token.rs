//! In-Memory Child Token Adapter
//!
//! Implements `MintableLedger` as a plain balance map whose only minter is the
//! child chain manager proxy.

use crate::domain::{Address, BridgeError, BridgeResult, U256};
use crate::ports::outbound::MintableLedger;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::{debug, warn};

#[derive(Debug, Default)]
struct LedgerState {
    balances: HashMap<Address, U256>,
    total_supply: U256,
}

/// Child-chain token with manager-gated minting.
#[derive(Debug)]
pub struct InMemoryChildToken {
    address: Address,
    name: String,
    symbol: String,
    decimals: u8,
    child_chain_manager_proxy: Address,
    state: RwLock<LedgerState>,
}

impl InMemoryChildToken {
    /// Create a token minted only by `child_chain_manager_proxy`.
    pub fn new(
        address: Address,
        name: impl Into<String>,
        symbol: impl Into<String>,
        decimals: u8,
        child_chain_manager_proxy: Address,
    ) -> Self {
        Self {
            address,
            name: name.into(),
            symbol: symbol.into(),
            decimals,
            child_chain_manager_proxy,
            state: RwLock::new(LedgerState::default()),
        }
    }

    fn authorize_minter(&self, minter: Address) -> BridgeResult<()> {
        if minter != self.child_chain_manager_proxy {
            warn!("[qc-18] Rejected mint on {} by {}", self.address, minter);
            return Err(BridgeError::Unauthorized {
                caller: minter,
                required: "childChainManagerProxy".to_string(),
            });
        }
        Ok(())
    }

    /// Supply and balance of `to` after crediting `amount`.
    fn credited_totals(
        &self,
        state: &LedgerState,
        to: Address,
        amount: U256,
    ) -> BridgeResult<(U256, U256)> {
        let overflow = || BridgeError::BalanceOverflow {
            account: to,
            amount,
        };
        let supply = state.total_supply.checked_add(amount).ok_or_else(overflow)?;
        let balance = state
            .balances
            .get(&to)
            .copied()
            .unwrap_or_default()
            .checked_add(amount)
            .ok_or_else(overflow)?;
        Ok((supply, balance))
    }
}

impl MintableLedger for InMemoryChildToken {
    fn address(&self) -> Address {
        self.address
    }

    fn name(&self) -> String {
        self.name.clone()
    }

    fn symbol(&self) -> String {
        self.symbol.clone()
    }

    fn decimals(&self) -> u8 {
        self.decimals
    }

    fn child_chain_manager_proxy(&self) -> Address {
        self.child_chain_manager_proxy
    }

    fn check_mint(&self, minter: Address, to: Address, amount: U256) -> BridgeResult<()> {
        self.authorize_minter(minter)?;
        self.credited_totals(&self.state.read(), to, amount).map(|_| ())
    }

    fn mint(&self, minter: Address, to: Address, amount: U256) -> BridgeResult<()> {
        self.authorize_minter(minter)?;

        let mut state = self.state.write();
        let (supply, balance) = self.credited_totals(&state, to, amount)?;
        state.total_supply = supply;
        state.balances.insert(to, balance);
        debug!("[qc-18] Minted {} {} to {}", amount, self.symbol, to);
        Ok(())
    }

    fn balance_of(&self, account: &Address) -> U256 {
        self.state
            .read()
            .balances
            .get(account)
            .copied()
            .unwrap_or_default()
    }

    fn total_supply(&self) -> U256 {
        self.state.read().total_supply
    }
}
