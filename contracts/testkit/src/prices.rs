use soroban_sdk::{contract, contractimpl, contracttype, Env};
use treasury_shared::fixed_point::{adjust_decimals, pow10};

use crate::MockError;

#[contracttype]
#[derive(Clone)]
enum DataKey {
    Feed(u32, u32), // (currency, base) -> (price, decimals)
}

#[contract]
pub struct MockPrices;

#[contractimpl]
impl MockPrices {
    /// Units of `currency` one `base` costs, expressed with `decimals`.
    pub fn set_price(env: Env, currency: u32, base: u32, price: i128, decimals: u32) {
        env.storage()
            .instance()
            .set(&DataKey::Feed(currency, base), &(price, decimals));
    }

    pub fn price_for(env: Env, currency: u32, base: u32, decimals: u32) -> Result<i128, MockError> {
        if currency == base {
            return pow10(decimals).ok_or(MockError::PriceFeedNotFound);
        }

        let (price, feed_decimals): (i128, u32) = env
            .storage()
            .instance()
            .get(&DataKey::Feed(currency, base))
            .ok_or(MockError::PriceFeedNotFound)?;
        adjust_decimals(price, feed_decimals, decimals).ok_or(MockError::PriceFeedNotFound)
    }
}
