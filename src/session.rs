//! Contexto explícito de sessão: rede, cliente de leitura e lista de tokens.
//!
//! Trocar de rede é construir uma nova `Session`; nada aqui é estado global.
//! O cliente é injetado via [`PoolReader`], que expõe só os acessores
//! somente-leitura do contrato (parâmetros e reservas).

use std::collections::{BTreeMap, HashMap};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::curve::error::Result;
use crate::curve::error_catalog::CurveErrorCode;
use crate::curve::model::CurveModel;
use crate::curve::pricing::get_current_price;
use crate::curve::types::{PoolCurveParams, ReservePoint, Wad};
use crate::curve::verify::verify_point;
use crate::{curve_bail, curve_err};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConfig {
    pub key: String,
    pub name: String,
    pub chain_id: u64,
    pub factory: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rpc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explorer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_currency: Option<NativeCurrency>,
}

impl NetworkConfig {
    /// Substitui a tabela embutida por uma lista JSON.
    pub fn list_from_json(json: &str) -> Result<Vec<NetworkConfig>> {
        serde_json::from_str(json)
            .map_err(|e| curve_err!(CurveErrorCode::InvalidParameter, param => "networks", value => e))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
    pub symbol: String,
    pub address: String,
    pub decimals: u8,
    pub name: String,
}

pub type TokenList = BTreeMap<String, Vec<TokenInfo>>;

impl TokenInfo {
    /// Lista de tokens por chave de rede, no formato `{ "mainnet": [...] }`.
    pub fn list_from_json(json: &str) -> Result<TokenList> {
        serde_json::from_str(json)
            .map_err(|e| curve_err!(CurveErrorCode::InvalidParameter, param => "token_list", value => e))
    }
}

fn network(key: &str, name: &str, chain_id: u64, factory: &str) -> NetworkConfig {
    NetworkConfig {
        key: key.into(),
        name: name.into(),
        chain_id,
        factory: factory.into(),
        rpc: None,
        explorer: None,
        native_currency: None,
    }
}

fn token(symbol: &str, address: &str, decimals: u8, name: &str) -> TokenInfo {
    TokenInfo { symbol: symbol.into(), address: address.into(), decimals, name: name.into() }
}

static NETWORKS: Lazy<Vec<NetworkConfig>> = Lazy::new(|| {
    let mut unichain = network("unichain", "Unichain", 130, "0x45b146BC07c9985589B52df651310e75C6BE066A");
    unichain.rpc = Some("https://mainnet.unichain.org".into());
    unichain.explorer = Some("https://uniscan.xyz".into());
    unichain.native_currency = Some(NativeCurrency { name: "Unichain".into(), symbol: "UNI".into(), decimals: 18 });

    let mut devland = network("devland", "Devland (Local)", 31337, "0x11dE489De683DbBe8e1483700656F54280224531");
    devland.rpc = Some("http://localhost:8545".into());
    devland.native_currency = Some(NativeCurrency { name: "ETH".into(), symbol: "ETH".into(), decimals: 18 });

    vec![
        network("mainnet", "Ethereum Mainnet", 1, "0xb013be1D0D380C13B58e889f412895970A2Cf228"),
        network("base", "Base", 8453, "0xf0CFe22d23699ff1B2CFe6B8f706A6DB63911262"),
        network("avalanche", "Avalanche C-Chain", 43114, "0x8A1D3a4850ed7deeC9003680Cf41b8E75D27e440"),
        network("bsc", "BNB Smart Chain", 56, "0x3e378e5E339DF5e0Da32964F9EEC2CDb90D28Cc7"),
        unichain,
        devland,
    ]
});

static TOKENS: Lazy<TokenList> = Lazy::new(|| {
    let mut list = TokenList::new();
    list.insert(
        "mainnet".into(),
        vec![
            token("ETH", "0x0000000000000000000000000000000000000000", 18, "Ether"),
            token("USDC", "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48", 6, "USD Coin"),
            token("USDT", "0xdAC17F958D2ee523a2206206994597C13D831ec7", 6, "Tether USD"),
            token("DAI", "0x6B175474E89094C44Da98b954EedeAC495271d0F", 18, "Dai Stablecoin"),
            token("WBTC", "0x2260FAC5E5542a773Aa44fBCfeDf7C193bc2C599", 8, "Wrapped BTC"),
            token("WETH", "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2", 18, "Wrapped Ether"),
        ],
    );
    list.insert(
        "base".into(),
        vec![
            token("ETH", "0x4200000000000000000000000000000000000006", 18, "Ether"),
            token("USDC", "0xd9AAEC86B65d86F6A7B5b1b0c42FFA531710b6CA", 6, "USD Coin"),
            token("DAI", "0xF14F9596430931E177469715c591513308244e8F", 18, "Dai Stablecoin"),
            token("USDbC", "0xd9AAEC86B65d86F6A7B5b1b0c42FFA531710b6CA", 6, "USD Base Coin"),
        ],
    );
    list.insert(
        "avalanche".into(),
        vec![
            token("AVAX", "0xB31f66AA3C1e785363F0875A1B74E27b85FD66c7", 18, "Avalanche"),
            token("USDC", "0xB97EF9Ef8734C71904D8002F8b6Bc66Dd9c48a6E", 6, "USD Coin"),
            token("USDT", "0xc7198437980c041c805A1EDcbA50c1Ce5db95118", 6, "Tether USD"),
            token("DAI", "0xd586E7F844cEa2F87f50152665BCbc2C279D8d70", 18, "Dai Stablecoin"),
            token("WETH", "0x49D5c2BdFfac6CE2BFdB6640F4F80f226bc10bAB", 18, "Wrapped Ether"),
        ],
    );
    list.insert(
        "bsc".into(),
        vec![
            token("BNB", "0x0000000000000000000000000000000000000000", 18, "BNB"),
            token("USDT", "0x55d398326f99059fF775485246999027B3197955", 18, "Tether USD"),
            token("USDC", "0x8ac76a51cc950d9822d68b83fe1ad97b32cd580d", 18, "USD Coin"),
            token("DAI", "0x1AF3F329e8BE154074D8769D1FFa4eE058B1DBc3", 18, "Dai Stablecoin"),
            token("WBNB", "0xBB4CdB9CBd36B01bD1cBaEBF2De08d9173bc095c", 18, "Wrapped BNB"),
        ],
    );
    list
});

/// Tabela de redes embutida.
pub fn builtin_networks() -> &'static [NetworkConfig] {
    &NETWORKS
}

/// Tokens embutidos; redes sem lista retornam vazio.
pub fn builtin_tokens() -> &'static TokenList {
    &TOKENS
}

// --------- Leitura do contrato ---------
/// Acessores somente-leitura do pool.
pub trait PoolReader {
    fn read_params(&self, pool: &str) -> Result<PoolCurveParams>;
    fn read_reserves(&self, pool: &str) -> Result<ReservePoint>;
}

/// `PoolReader` em memória para testes e demos.
#[derive(Clone, Debug, Default)]
pub struct InMemoryPoolReader {
    pools: HashMap<String, (PoolCurveParams, ReservePoint)>,
}

impl InMemoryPoolReader {
    pub fn new() -> Self { Self::default() }

    pub fn with_pool(mut self, pool: &str, params: PoolCurveParams, reserves: ReservePoint) -> Self {
        self.insert(pool, params, reserves);
        self
    }

    pub fn insert(&mut self, pool: &str, params: PoolCurveParams, reserves: ReservePoint) {
        self.pools.insert(pool.to_ascii_lowercase(), (params, reserves));
    }

    fn get(&self, pool: &str) -> Result<&(PoolCurveParams, ReservePoint)> {
        self.pools
            .get(&pool.to_ascii_lowercase())
            .ok_or_else(|| curve_err!(CurveErrorCode::InvalidParameter, param => "pool", value => pool))
    }
}

impl PoolReader for InMemoryPoolReader {
    fn read_params(&self, pool: &str) -> Result<PoolCurveParams> {
        self.get(pool).map(|(params, _)| *params)
    }

    fn read_reserves(&self, pool: &str) -> Result<ReservePoint> {
        self.get(pool).map(|(_, reserves)| *reserves)
    }
}

// --------- Sessão ---------
/// Estado lido de um pool num instante.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolSnapshot {
    pub params: PoolCurveParams,
    pub reserves: ReservePoint,
    pub on_curve: bool,
    /// `None` quando o preço não é definido (reserva zero no ramo).
    pub price: Option<Wad>,
}

#[derive(Clone, Debug)]
pub struct Session<R: PoolReader> {
    network: NetworkConfig,
    client: R,
    token_list: Vec<TokenInfo>,
}

impl<R: PoolReader> Session<R> {
    pub fn new(network: NetworkConfig, client: R, token_list: Vec<TokenInfo>) -> Self {
        Self { network, client, token_list }
    }

    /// Sessão a partir das tabelas embutidas.
    pub fn for_network_key(key: &str, client: R) -> Result<Self> {
        Self::from_registry(key, client, builtin_networks(), builtin_tokens())
    }

    /// Sessão a partir de tabelas fornecidas (ex.: carregadas de JSON).
    pub fn from_registry(key: &str, client: R, networks: &[NetworkConfig], tokens: &TokenList) -> Result<Self> {
        let Some(network) = networks.iter().find(|n| n.key == key) else {
            curve_bail!(CurveErrorCode::UnknownNetwork, network => key);
        };
        let token_list = tokens.get(key).cloned().unwrap_or_default();
        tracing::debug!(network = key, chain_id = network.chain_id, tokens = token_list.len(), "sessão criada");
        Ok(Self::new(network.clone(), client, token_list))
    }

    pub fn network(&self) -> &NetworkConfig { &self.network }
    pub fn client(&self) -> &R { &self.client }
    pub fn token_list(&self) -> &[TokenInfo] { &self.token_list }

    /// Busca por endereço, ignorando caixa (checksum EIP-55 ou não).
    pub fn find_token(&self, address: &str) -> Option<&TokenInfo> {
        self.token_list.iter().find(|t| t.address.eq_ignore_ascii_case(address))
    }

    pub fn find_token_by_symbol(&self, symbol: &str) -> Option<&TokenInfo> {
        self.token_list.iter().find(|t| t.symbol == symbol)
    }

    pub fn curve_model(&self, pool: &str) -> Result<CurveModel> {
        CurveModel::new(self.client.read_params(pool)?)
    }

    pub fn snapshot(&self, pool: &str) -> Result<PoolSnapshot> {
        let params = self.client.read_params(pool)?;
        params.validate()?;
        let reserves = self.client.read_reserves(pool)?;
        let on_curve = verify_point(&params, reserves.x, reserves.y);
        let price = match get_current_price(&params, reserves.x, reserves.y) {
            Ok(p) => Some(p),
            Err(err) if err.code == CurveErrorCode::InvalidParameter => None,
            Err(err) => return Err(err),
        };
        if !on_curve {
            tracing::warn!(pool, x = reserves.x, y = reserves.y, "reservas abaixo da curva");
        }
        Ok(PoolSnapshot { params, reserves, on_curve, price })
    }
}
