//! Static catalog of tracked coins and their per-exchange pair symbols.

use crate::Exchange;

/// One tracked coin with the pair symbol each exchange quotes it under.
///
/// Conventions differ per venue: Paribu separates with an underscore and
/// calls the quote currency "TL" (e.g., "BTC_TL"), BtcTurk concatenates
/// against TRY (e.g., "BTCTRY"), Binance against USDT (e.g., "BTCUSDT").
/// A few listings are irregular, so all three symbols are spelled out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoinSpec {
    /// Ticker symbol (e.g., "BTC").
    pub symbol: &'static str,
    /// Display name (e.g., "Bitcoin").
    pub name: &'static str,
    /// Paribu pair symbol.
    pub paribu_pair: &'static str,
    /// BtcTurk pair symbol.
    pub btcturk_pair: &'static str,
    /// Binance pair symbol.
    pub binance_pair: &'static str,
}

impl CoinSpec {
    /// Pair symbol this coin trades under on the given exchange.
    pub fn pair_on(&self, exchange: Exchange) -> &'static str {
        match exchange {
            Exchange::Paribu => self.paribu_pair,
            Exchange::Btcturk => self.btcturk_pair,
            Exchange::Binance => self.binance_pair,
        }
    }
}

const fn coin(
    symbol: &'static str,
    name: &'static str,
    paribu_pair: &'static str,
    btcturk_pair: &'static str,
    binance_pair: &'static str,
) -> CoinSpec {
    CoinSpec {
        symbol,
        name,
        paribu_pair,
        btcturk_pair,
        binance_pair,
    }
}

/// Coins listed on all three exchanges, in display order.
const COINS: &[CoinSpec] = &[
    coin("DOT", "Polkadot", "DOT_TL", "DOTTRY", "DOTUSDT"),
    coin("AVAX", "Avalanche", "AVAX_TL", "AVAXTRY", "AVAXUSDT"),
    coin("TRX", "TRON", "TRX_TL", "TRXTRY", "TRXUSDT"),
    coin("EOS", "EOS", "EOS_TL", "EOSTRY", "EOSUSDT"),
    coin("BTTC", "BitTorrent", "BTTC_TL", "BTTCTRY", "BTTCUSDT"),
    coin("XRP", "Ripple", "XRP_TL", "XRPTRY", "XRPUSDT"),
    coin("XLM", "Stellar", "XLM_TL", "XLMTRY", "XLMUSDT"),
    coin("ONT", "Ontology", "ONT_TL", "ONTTRY", "ONTUSDT"),
    coin("ATOM", "Cosmos", "ATOM_TL", "ATOMTRY", "ATOMUSDT"),
    coin("HOT", "Holo", "HOT_TL", "HOTTRY", "HOTUSDT"),
    coin("NEO", "Neo", "NEO_TL", "NEOTRY", "NEOUSDT"),
    coin("BAT", "Basic Attention Token", "BAT_TL", "BATTRY", "BATUSDT"),
    coin("CHZ", "Chiliz", "CHZ_TL", "CHZTRY", "CHZUSDT"),
    coin("UNI", "Uniswap", "UNI_TL", "UNITRY", "UNIUSDT"),
    coin("BAL", "Balancer", "BAL_TL", "BALTRY", "BALUSDT"),
    coin("AAVE", "Aave", "AAVE_TL", "AAVETRY", "AAVEUSDT"),
    coin("LINK", "Chainlink", "LINK_TL", "LINKTRY", "LINKUSDT"),
    coin("MKR", "Maker", "MKR_TL", "MKRTRY", "MKRUSDT"),
    coin("W", "Wormhole", "W_TL", "WTRY", "WUSDT"),
    coin("RAY", "Raydium", "RAY_TL", "RAYTRY", "RAYUSDT"),
    coin("LRC", "Loopring", "LRC_TL", "LRCTRY", "LRCUSDT"),
    coin("BAND", "Band Protocol", "BAND_TL", "BANDTRY", "BANDUSDT"),
    coin("ALGO", "Algorand", "ALGO_TL", "ALGOTRY", "ALGOUSDT"),
    coin("GRT", "The Graph", "GRT_TL", "GRTTRY", "GRTUSDT"),
    coin("ENJ", "Enjin Coin", "ENJ_TL", "ENJTRY", "ENJUSDT"),
    coin("THETA", "Theta", "THETA_TL", "THETATRY", "THETAUSDT"),
    coin("MATIC", "Polygon", "MATIC_TL", "MATICTRY", "MATICUSDT"),
    coin("OXT", "Orchid", "OXT_TL", "OXTTRY", "OXTUSDT"),
    coin("CRV", "Curve", "CRV_TL", "CRVTRY", "CRVUSDT"),
    coin("OGN", "Origin Protocol", "OGN_TL", "OGNTRY", "OGNUSDT"),
    coin("MANA", "Decentraland", "MANA_TL", "MANATRY", "MANAUSDT"),
    // IOTA trades as MIOTA locally but IOTA on Binance.
    coin("MIOTA", "IOTA", "MIOTA_TL", "MIOTATRY", "IOTAUSDT"),
    coin("SOL", "Solana", "SOL_TL", "SOLTRY", "SOLUSDT"),
    coin("APE", "ApeCoin", "APE_TL", "APETRY", "APEUSDT"),
    coin("VET", "VeChain", "VET_TL", "VETTRY", "VETUSDT"),
    coin("ANKR", "Ankr", "ANKR_TL", "ANKRTRY", "ANKRUSDT"),
    coin("SHIB", "Shiba Inu", "SHIB_TL", "SHIBTRY", "SHIBUSDT"),
    coin("LPT", "Livepeer", "LPT_TL", "LPTTRY", "LPTUSDT"),
    coin("INJ", "Injective", "INJ_TL", "INJTRY", "INJUSDT"),
    coin("ICP", "Internet Computer", "ICP_TL", "ICPTRY", "ICPUSDT"),
    coin("FTM", "Fantom", "FTM_TL", "FTMTRY", "FTMUSDT"),
    coin("AXS", "Axie Infinity", "AXS_TL", "AXSTRY", "AXSUSDT"),
    coin("ENS", "Ethereum Name Service", "ENS_TL", "ENSTRY", "ENSUSDT"),
    coin("SAND", "The Sandbox", "SAND_TL", "SANDTRY", "SANDUSDT"),
    coin("AUDIO", "Audius", "AUDIO_TL", "AUDIOTRY", "AUDIOUSDT"),
    coin("BTC", "Bitcoin", "BTC_TL", "BTCTRY", "BTCUSDT"),
    coin("ETH", "Ethereum", "ETH_TL", "ETHTRY", "ETHUSDT"),
];

/// All tracked coins, in display order.
pub fn coins() -> &'static [CoinSpec] {
    COINS
}

/// Look up a coin by its ticker symbol.
pub fn coin_by_symbol(symbol: &str) -> Option<&'static CoinSpec> {
    COINS.iter().find(|c| c.symbol == symbol)
}
